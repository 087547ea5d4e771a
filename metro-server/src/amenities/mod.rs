//! Amenities near stations.
//!
//! Each station may list the nearest restroom, convenience store and
//! restaurant together with the walking distance to each.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::StationId;
use crate::stations::LoadError;

/// Number of columns in an amenities row.
const FIELD_COUNT: usize = 7;

/// Kind of facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AmenityKind {
    Restroom,
    ConvenienceStore,
    Restaurant,
}

impl AmenityKind {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            AmenityKind::Restroom => "Restroom",
            AmenityKind::ConvenienceStore => "Convenience store",
            AmenityKind::Restaurant => "Restaurant",
        }
    }
}

/// A facility near a station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Amenity {
    pub name: String,
    pub kind: AmenityKind,
    /// Walking distance in metres, if known
    pub distance_m: Option<u32>,
}

/// Amenities keyed by station.
#[derive(Debug, Clone, Default)]
pub struct AmenityIndex {
    by_station: HashMap<StationId, Vec<Amenity>>,
}

impl AmenityIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Amenities near a station, empty if none are known.
    pub fn for_station(&self, station: &StationId) -> &[Amenity] {
        self.by_station
            .get(station)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the number of stations with amenity data.
    pub fn len(&self) -> usize {
        self.by_station.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_station.is_empty()
    }
}

/// Load amenities from a CSV file.
pub fn load_amenities_from_path(path: impl AsRef<Path>) -> Result<AmenityIndex, LoadError> {
    let file = File::open(path.as_ref())?;
    load_amenities(BufReader::new(file))
}

/// Load amenities from CSV text.
///
/// After a header row, each row is `station, restroom, convenience store,
/// restaurant, restroom distance, store distance, restaurant distance`.
/// A distance that is not a number is treated as unknown. Rows that are too
/// short or name an invalid station are skipped with a warning.
pub fn load_amenities<R: Read>(reader: R) -> Result<AmenityIndex, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut index = AmenityIndex::new();

    for row in rdr.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();

        if row.len() < FIELD_COUNT {
            warn!(line, fields = row.len(), "skipping short amenities row");
            continue;
        }

        let station = match StationId::parse(&row[0]) {
            Ok(station) => station,
            Err(e) => {
                warn!(line, error = %e, "skipping amenities row");
                continue;
            }
        };

        let kinds = [
            AmenityKind::Restroom,
            AmenityKind::ConvenienceStore,
            AmenityKind::Restaurant,
        ];
        let amenities = index.by_station.entry(station).or_default();
        for (i, kind) in kinds.into_iter().enumerate() {
            amenities.push(Amenity {
                name: row[1 + i].to_string(),
                kind,
                distance_m: row[4 + i].parse().ok(),
            });
        }
    }

    debug!(stations = index.len(), "loaded amenities");

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> StationId {
        StationId::parse(s).unwrap()
    }

    const CSV: &str = "\
station,restroom,store,restaurant,d1,d2,d3
101,Gate 1 restroom,CU,Noodle House,50,120,300
102,Platform restroom,GS25,Burger Stop,30,-,abc
";

    #[test]
    fn loads_three_amenities_per_station() {
        let index = load_amenities(CSV.as_bytes()).unwrap();
        assert_eq!(index.len(), 2);

        let near = index.for_station(&id("101"));
        assert_eq!(near.len(), 3);
        assert_eq!(
            near[0],
            Amenity {
                name: "Gate 1 restroom".to_string(),
                kind: AmenityKind::Restroom,
                distance_m: Some(50),
            }
        );
        assert_eq!(near[1].kind, AmenityKind::ConvenienceStore);
        assert_eq!(near[1].name, "CU");
        assert_eq!(near[2].kind, AmenityKind::Restaurant);
        assert_eq!(near[2].distance_m, Some(300));
    }

    #[test]
    fn unparsable_distance_is_unknown() {
        let index = load_amenities(CSV.as_bytes()).unwrap();
        let near = index.for_station(&id("102"));
        assert_eq!(near[0].distance_m, Some(30));
        assert_eq!(near[1].distance_m, None);
        assert_eq!(near[2].distance_m, None);
    }

    #[test]
    fn unknown_station_has_nothing() {
        let index = load_amenities(CSV.as_bytes()).unwrap();
        assert!(index.for_station(&id("999")).is_empty());
    }

    #[test]
    fn bad_rows_are_skipped() {
        let csv = "h\n101,a,b\nX01,a,b,c,1,2,3\n102,a,b,c,1,2,3\n";
        let index = load_amenities(csv.as_bytes()).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.for_station(&id("102")).len(), 3);
    }

    #[test]
    fn serializes_kind_in_snake_case() {
        let json = serde_json::to_string(&AmenityKind::ConvenienceStore).unwrap();
        assert_eq!(json, "\"convenience_store\"");
    }
}
