use serde::{Serialize, Deserialize};

/// Per-epoch observations reported by `NetworkMesh::sgd`.
///
/// One value is produced at the end of every completed epoch. Evaluation
/// over test data is a side observation: it reads the parameters but never
/// changes them or the course of training.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Mean squared output error over all training samples in this epoch.
    pub train_loss: f64,
    /// Fraction of test samples classified correctly (argmax match), when
    /// test data was supplied.
    pub test_accuracy: Option<f64>,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}
