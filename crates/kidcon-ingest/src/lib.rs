//! Parsing of router syslog lines carrying kid-control counter reports.

pub mod parser;
pub mod units;

pub use parser::{LineParser, ParsedSample};
pub use units::parse_bytes;
