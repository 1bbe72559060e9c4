pub mod activation;
pub mod error;
pub mod mesh;
pub mod train;

// Convenience re-exports
pub use activation::activation::ActivationFunction;
pub use error::{MeshError, Result};
pub use mesh::mesh::NetworkMesh;
pub use mesh::record::ModelRecord;
pub use train::epoch_stats::EpochStats;
pub use train::sgd_config::SgdConfig;
pub use train::target::{Sample, Target};
