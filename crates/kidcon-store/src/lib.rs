//! SQLite persistence for parsed counter samples.

pub mod db;

pub use db::{SampleStore, StoredSample};
