//! CSV loader for station-pair records.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::{debug, warn};

use crate::domain::StationId;

use super::error::LoadError;

/// Number of columns in a station-pair row.
const FIELD_COUNT: usize = 5;

/// One undirected connection between two adjacent stations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationRecord {
    pub from: StationId,
    pub to: StationId,
    pub time: u32,
    pub distance: u32,
    pub cost: u32,
}

impl StationRecord {
    /// Creates a new record.
    pub fn new(from: StationId, to: StationId, time: u32, distance: u32, cost: u32) -> Self {
        Self {
            from,
            to,
            time,
            distance,
            cost,
        }
    }
}

/// Load station-pair records from a CSV file.
pub fn load_records_from_path(path: impl AsRef<Path>) -> Result<Vec<StationRecord>, LoadError> {
    let file = File::open(path.as_ref())?;
    load_records(BufReader::new(file))
}

/// Load station-pair records from CSV text.
///
/// The first row is a header and is skipped whatever it says. Every other
/// row is `origin, destination, time, distance, cost`, read by position.
/// Rows with the wrong number of columns are skipped with a warning.
pub fn load_records<R: Read>(reader: R) -> Result<Vec<StationRecord>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for row in rdr.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();

        if row.len() != FIELD_COUNT {
            warn!(line, fields = row.len(), "skipping station row with wrong field count");
            skipped += 1;
            continue;
        }

        let station = |idx: usize| {
            StationId::parse(&row[idx]).map_err(|source| LoadError::InvalidStation { line, source })
        };
        let number = |idx: usize, column: &'static str| {
            row[idx].parse::<u32>().map_err(|_| LoadError::InvalidNumber {
                line,
                column,
                value: row[idx].to_string(),
            })
        };

        records.push(StationRecord {
            from: station(0)?,
            to: station(1)?,
            time: number(2, "time")?,
            distance: number(3, "distance")?,
            cost: number(4, "cost")?,
        });
    }

    debug!(records = records.len(), skipped, "loaded station records");

    Ok(records)
}
