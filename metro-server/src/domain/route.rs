//! Route types.
//!
//! A `Route` is the outcome of one path search: the stations visited in
//! order, the metrics of every hop between them and the number of line
//! transfers along the way.

use super::{DomainError, LineNumber, StationId};

/// Metrics of a single traversed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hop {
    pub time: u32,
    pub distance: u32,
    pub cost: u32,
}

/// A route from an origin station to a destination station.
///
/// # Invariants
///
/// - At least one station (a single station means origin == destination)
/// - `distances`, `costs` and `times` each have one entry per hop,
///   i.e. `stations.len() - 1` entries, in traversal order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    stations: Vec<StationId>,
    distances: Vec<u32>,
    costs: Vec<u32>,
    times: Vec<u32>,
    total_transfers: u32,
}

impl Route {
    /// Builds a route from its stations and the hops between them.
    ///
    /// The transfer count is derived from the station lines.
    ///
    /// # Errors
    ///
    /// Returns an error if `stations` is empty or if the number of hops is
    /// not exactly one less than the number of stations.
    pub fn new(stations: Vec<StationId>, hops: &[Hop]) -> Result<Self, DomainError> {
        if stations.is_empty() {
            return Err(DomainError::EmptyRoute);
        }
        if hops.len() + 1 != stations.len() {
            return Err(DomainError::HopCountMismatch {
                stations: stations.len(),
                hops: hops.len(),
            });
        }

        let total_transfers = stations
            .windows(2)
            .filter(|pair| pair[0].is_transfer_to(&pair[1]))
            .count() as u32;

        Ok(Self {
            distances: hops.iter().map(|h| h.distance).collect(),
            costs: hops.iter().map(|h| h.cost).collect(),
            times: hops.iter().map(|h| h.time).collect(),
            stations,
            total_transfers,
        })
    }

    /// Assembles a route from parts already known to be consistent.
    ///
    /// Used by the path finder, which tracks transfers as it goes.
    pub(crate) fn from_search(stations: Vec<StationId>, hops: &[Hop], total_transfers: u32) -> Self {
        debug_assert_eq!(hops.len() + 1, stations.len());
        Self {
            distances: hops.iter().map(|h| h.distance).collect(),
            costs: hops.iter().map(|h| h.cost).collect(),
            times: hops.iter().map(|h| h.time).collect(),
            stations,
            total_transfers,
        }
    }

    /// A route that starts and ends at the same station.
    pub fn trivial(station: StationId) -> Self {
        Self {
            stations: vec![station],
            distances: Vec::new(),
            costs: Vec::new(),
            times: Vec::new(),
            total_transfers: 0,
        }
    }

    /// Stations in traversal order.
    pub fn stations(&self) -> &[StationId] {
        &self.stations
    }

    /// Per-hop distances in metres.
    pub fn distances(&self) -> &[u32] {
        &self.distances
    }

    /// Per-hop fares.
    pub fn costs(&self) -> &[u32] {
        &self.costs
    }

    /// Per-hop travel times.
    pub fn times(&self) -> &[u32] {
        &self.times
    }

    /// Metrics of hop `index` (the edge from station `index` to `index + 1`).
    pub fn hop(&self, index: usize) -> Option<Hop> {
        Some(Hop {
            time: *self.times.get(index)?,
            distance: *self.distances.get(index)?,
            cost: *self.costs.get(index)?,
        })
    }

    /// Number of hops where the line changes.
    pub fn total_transfers(&self) -> u32 {
        self.total_transfers
    }

    /// Totals saturate at `u32::MAX`, matching the search labels.
    pub fn total_time(&self) -> u32 {
        saturating_sum(&self.times)
    }

    pub fn total_cost(&self) -> u32 {
        saturating_sum(&self.costs)
    }

    pub fn total_distance(&self) -> u32 {
        saturating_sum(&self.distances)
    }

    /// Number of hops.
    pub fn hop_count(&self) -> usize {
        self.stations.len() - 1
    }

    pub fn origin(&self) -> &StationId {
        &self.stations[0]
    }

    pub fn destination(&self) -> &StationId {
        &self.stations[self.stations.len() - 1]
    }

    /// Returns true if the route never leaves its origin.
    pub fn is_trivial(&self) -> bool {
        self.stations.len() == 1
    }

    /// Stations at which the rider arrives on a new line.
    ///
    /// For `101 -> 102 -> 201 -> 202` this is `[201]`.
    pub fn transfer_points(&self) -> Vec<&StationId> {
        self.stations
            .windows(2)
            .filter(|pair| pair[0].is_transfer_to(&pair[1]))
            .map(|pair| &pair[1])
            .collect()
    }

    /// Splits the route into maximal runs of stations on the same line.
    ///
    /// Each run starts at the origin or at a transfer point. Runs never
    /// share a station, so concatenating their stations reproduces the
    /// whole route.
    pub fn line_segments(&self) -> Vec<LineSegment<'_>> {
        let mut segments = Vec::new();
        let mut start = 0;

        for i in 1..=self.stations.len() {
            let boundary = i == self.stations.len()
                || self.stations[i - 1].is_transfer_to(&self.stations[i]);
            if boundary {
                segments.push(LineSegment {
                    line: self.stations[start].line(),
                    stations: &self.stations[start..i],
                });
                start = i;
            }
        }

        segments
    }
}

fn saturating_sum(values: &[u32]) -> u32 {
    values.iter().fold(0u32, |acc, v| acc.saturating_add(*v))
}

/// A run of consecutive route stations on one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSegment<'a> {
    pub line: LineNumber,
    pub stations: &'a [StationId],
}

impl LineSegment<'_> {
    /// The first station of the run (origin or transfer point).
    pub fn first(&self) -> &StationId {
        &self.stations[0]
    }

    /// The last station of the run.
    pub fn last(&self) -> &StationId {
        &self.stations[self.stations.len() - 1]
    }

    /// Stations strictly between `first` and `last`.
    pub fn intermediate(&self) -> &[StationId] {
        if self.stations.len() <= 2 {
            &[]
        } else {
            &self.stations[1..self.stations.len() - 1]
        }
    }
}
