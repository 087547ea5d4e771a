//! Station-pair record loading.
//!
//! The metro network is described by a CSV of adjacent station pairs, each
//! with the travel time, distance and fare of the hop between them.

mod error;
mod loader;

pub use error::LoadError;
pub use loader::{StationRecord, load_records, load_records_from_path};
