pub mod epoch_stats;
pub mod sgd;
pub mod sgd_config;
pub mod target;

pub use epoch_stats::EpochStats;
pub use sgd_config::SgdConfig;
pub use target::{Sample, Target};
