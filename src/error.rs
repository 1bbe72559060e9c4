use thiserror::Error;

/// The result type used across the crate.
pub type Result<T> = std::result::Result<T, MeshError>;

/// Failures surfaced by mesh construction, training and persistence.
#[derive(Debug, Error)]
pub enum MeshError {
    /// The mesh has no layer structure: it was constructed without an
    /// architecture and nothing has been loaded into it since.
    #[error("network architecture is not defined; build the mesh with layer sizes or load a saved model")]
    UninitializedArchitecture,

    /// The model file could not be read or written.
    #[error("model file i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// The model file did not parse, or its encoded shapes do not chain.
    /// The mesh keeps whatever state it had before the load attempt.
    #[error("corrupt or incompatible model file: {0}")]
    CorruptModel(String),
}
