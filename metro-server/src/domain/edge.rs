//! Directed edges of the metro graph.

use super::{Hop, StationId};

/// A directed hop to a neighbouring station.
///
/// The time unit is whatever the source data uses; the bundled data set
/// uses seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    /// Station this edge leads to
    pub destination: StationId,
    /// Travel time
    pub time: u32,
    /// Distance in metres
    pub distance: u32,
    /// Fare in currency units
    pub cost: u32,
}

impl Edge {
    /// Creates a new edge.
    pub fn new(destination: StationId, time: u32, distance: u32, cost: u32) -> Self {
        Self {
            destination,
            time,
            distance,
            cost,
        }
    }
}

impl From<&Edge> for Hop {
    fn from(edge: &Edge) -> Self {
        Hop {
            time: edge.time,
            distance: edge.distance,
            cost: edge.cost,
        }
    }
}
