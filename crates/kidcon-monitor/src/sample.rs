use kidcon_types::LocalTime;
use serde::{Deserialize, Serialize};

/// One reading of a device's cumulative byte counters.
///
/// Ephemeral: produced by a registry query and immediately rendered into a
/// report line. The sample time is captured but not part of the line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterSample {
    pub device: String,
    pub bytes_up: u64,
    pub bytes_down: u64,
    pub sampled_at: LocalTime,
}

impl CounterSample {
    pub fn new(
        device: impl Into<String>,
        bytes_up: u64,
        bytes_down: u64,
        sampled_at: LocalTime,
    ) -> Self {
        Self {
            device: device.into(),
            bytes_up,
            bytes_down,
            sampled_at,
        }
    }

    /// Render the report line for this sample.
    pub fn to_line(&self) -> String {
        format!(
            "kid-control: {} bytes-up={} bytes-down={}",
            self.device, self.bytes_up, self.bytes_down
        )
    }
}
