/// Hyperparameters for one SGD run.
///
/// # Fields
/// - `epochs`     — total number of full passes over the training data
/// - `batch_size` — samples per mini-batch; use `1` for online SGD
/// - `lr`         — learning rate applied to each averaged batch update
#[derive(Debug, Clone)]
pub struct SgdConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub lr: f64,
}

impl SgdConfig {
    pub fn new(epochs: usize, batch_size: usize, lr: f64) -> SgdConfig {
        SgdConfig { epochs, batch_size, lr }
    }
}
