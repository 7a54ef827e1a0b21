use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the capture side: where hour buckets live and which
/// devices are tracked in the counter report cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Directory prefix for hour-bucketed capture files. `None` disables
    /// raw-line capture.
    #[serde(default)]
    pub bucket_dir: Option<PathBuf>,

    /// Device names reported in the end-of-ingest counter cycle.
    #[serde(default)]
    pub devices: Vec<String>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            bucket_dir: None,
            devices: Vec::new(),
        }
    }
}
