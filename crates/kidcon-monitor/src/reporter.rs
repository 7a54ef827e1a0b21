use std::sync::Arc;

use kidcon_capture::Clock;
use kidcon_types::Result;

use crate::registry::DeviceRegistry;
use crate::sample::CounterSample;
use crate::sink::LogSink;

/// Outcome of one report-and-reset cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleSummary {
    /// Devices reported in phase one.
    pub reported: usize,
    /// Whether the single global reset ran.
    pub reset: bool,
}

/// Formats per-device counter report lines from registry queries.
///
/// `report` is read-only; resetting counters is a separate, global
/// operation sequenced by `run_cycle`.
pub struct DeviceCounterReporter {
    registry: Arc<dyn DeviceRegistry>,
    clock: Arc<dyn Clock>,
}

impl DeviceCounterReporter {
    pub fn new(registry: Arc<dyn DeviceRegistry>, clock: Arc<dyn Clock>) -> Self {
        Self { registry, clock }
    }

    /// Query the counters of one device and return its report line.
    pub fn report(&self, name: &str) -> Result<String> {
        let id = self.registry.find_by_name(name)?;
        let (bytes_up, bytes_down) = self.registry.counters(&id)?;
        let sample = CounterSample::new(name, bytes_up, bytes_down, self.clock.now());
        Ok(sample.to_line())
    }

    /// Two-phase batch: report every name in order, emitting each line to
    /// `sink`, then issue exactly one global counter reset.
    ///
    /// Phase two only runs once every read in phase one has completed; a
    /// failed read aborts the cycle with the counters untouched.
    pub fn run_cycle(&self, names: &[String], sink: &dyn LogSink) -> Result<CycleSummary> {
        let mut reported = 0;
        for name in names {
            let line = self.report(name)?;
            sink.emit(&line)?;
            reported += 1;
        }

        self.registry.reset_all()?;
        tracing::debug!(reported, "reset device counters");

        Ok(CycleSummary {
            reported,
            reset: true,
        })
    }
}
