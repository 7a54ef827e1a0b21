use std::fmt;

use chrono::{DateTime, Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// A local-time timestamp wrapper around `chrono::DateTime<Local>`.
///
/// Bucket identity and bucket headers are both derived from host-local
/// wall-clock time, so the wrapper is local rather than UTC.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalTime {
    inner: DateTime<Local>,
}

impl LocalTime {
    /// Get the current local time.
    pub fn now() -> Self {
        Self {
            inner: Local::now(),
        }
    }

    /// Create from a chrono `DateTime<Local>`.
    pub fn from_chrono(dt: DateTime<Local>) -> Self {
        Self { inner: dt }
    }

    /// Access the inner `DateTime<Local>`.
    pub fn as_chrono(&self) -> &DateTime<Local> {
        &self.inner
    }

    /// The two-digit hour component, `"00"` through `"23"`.
    pub fn hour_label(&self) -> String {
        format!("{:02}", self.inner.hour())
    }

    /// Full date-and-time stamp for bucket file headers.
    pub fn header_stamp(&self) -> String {
        self.inner.format("%c").to_string()
    }

    /// The timestamp without its offset.
    pub fn naive_local(&self) -> NaiveDateTime {
        self.inner.naive_local()
    }

    /// Seconds since Unix epoch.
    pub fn timestamp(&self) -> i64 {
        self.inner.timestamp()
    }
}

impl fmt::Debug for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocalTime({})", self.inner.to_rfc3339())
    }
}

impl fmt::Display for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner.to_rfc3339())
    }
}

impl From<DateTime<Local>> for LocalTime {
    fn from(dt: DateTime<Local>) -> Self {
        Self { inner: dt }
    }
}

impl From<LocalTime> for DateTime<Local> {
    fn from(t: LocalTime) -> Self {
        t.inner
    }
}
