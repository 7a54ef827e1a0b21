use chrono::{Datelike, NaiveDateTime};
use kidcon_types::{IngestCode, Result, Status};
use regex::Regex;

use crate::units::parse_bytes;

/// Router syslog lines carrying a kid-control counter report:
/// `Jun 15 14:03:22 <host> kid-control: <name> bytes-up=<v> bytes-down=<v>`.
const LINE_PATTERN: &str =
    r"(\w\w\w \d\d \d\d:\d\d:\d\d) \S+ kid-control: (\S+) bytes-up=(\S+) bytes-down=(\S+)";

/// One counter report parsed out of a router log line.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSample {
    pub timestamp: NaiveDateTime,
    pub device: String,
    pub bytes_up: f64,
    pub bytes_down: f64,
}

/// Parser for kid-control counter lines.
pub struct LineParser {
    pattern: Regex,
}

impl LineParser {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(LINE_PATTERN).expect("line pattern compiles"),
        }
    }

    /// Parse one log line.
    ///
    /// Lines that do not carry a counter report return `Ok(None)` and are
    /// skipped by callers. A matching line with an unparseable value or
    /// timestamp is an error.
    pub fn parse_line(&self, line: &str, now: NaiveDateTime) -> Result<Option<ParsedSample>> {
        let caps = match self.pattern.captures(line) {
            Some(caps) => caps,
            None => return Ok(None),
        };

        let timestamp = infer_year_timestamp(&caps[1], now)?;
        let device = caps[2].to_string();
        let bytes_up = parse_bytes(&caps[3])?;
        let bytes_down = parse_bytes(&caps[4])?;

        Ok(Some(ParsedSample {
            timestamp,
            device,
            bytes_up,
            bytes_down,
        }))
    }
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve a yearless `%b %d %H:%M:%S` syslog timestamp against `now`.
///
/// The year is the current or the previous one, whichever places the
/// timestamp nearer to `now`; ties go to the current year. This keeps
/// year-end log backlogs parsing correctly in early January.
fn infer_year_timestamp(s: &str, now: NaiveDateTime) -> Result<NaiveDateTime> {
    let mut best: Option<NaiveDateTime> = None;

    for year in [now.year(), now.year() - 1] {
        let candidate = format!("{} {}", year, s);
        if let Ok(dt) = NaiveDateTime::parse_from_str(&candidate, "%Y %b %d %H:%M:%S") {
            let closer = match best {
                Some(b) => (dt - now).num_seconds().abs() < (b - now).num_seconds().abs(),
                None => true,
            };
            if closer {
                best = Some(dt);
            }
        }
    }

    best.ok_or_else(|| {
        Status::with_message(
            IngestCode::INVALID_TIMESTAMP,
            format!("unparseable timestamp {:?}", s),
        )
    })
}
