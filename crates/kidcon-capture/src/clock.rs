use kidcon_types::LocalTime;
use parking_lot::Mutex;

/// Wall-clock collaborator. Bucket identity and bucket headers both come
/// from a single captured instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> LocalTime;
}

/// Clock backed by the host wall clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> LocalTime {
        LocalTime::now()
    }
}

/// Settable clock for tests and replay.
pub struct FixedClock {
    instant: Mutex<LocalTime>,
}

impl FixedClock {
    pub fn new(instant: LocalTime) -> Self {
        Self {
            instant: Mutex::new(instant),
        }
    }

    /// Move the clock to a new instant.
    pub fn set(&self, instant: LocalTime) {
        *self.instant.lock() = instant;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> LocalTime {
        *self.instant.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    #[test]
    fn test_system_clock_advances() {
        let clock = SystemClock;
        assert!(clock.now().timestamp() > 0);
    }

    #[test]
    fn test_fixed_clock_set() {
        let t1 = LocalTime::from_chrono(Local.with_ymd_and_hms(2026, 8, 6, 14, 0, 0).unwrap());
        let t2 = LocalTime::from_chrono(Local.with_ymd_and_hms(2026, 8, 6, 15, 0, 0).unwrap());

        let clock = FixedClock::new(t1);
        assert_eq!(clock.now().hour_label(), "14");

        clock.set(t2);
        assert_eq!(clock.now().hour_label(), "15");
    }
}
