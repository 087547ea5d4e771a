//! Adjacency graph of the metro network.
//!
//! Each station-pair record describes an undirected connection. The graph
//! stores it as two directed edges with identical weights so that the path
//! finder only ever needs to look at outgoing edges.

use std::collections::HashMap;

use crate::domain::{Edge, StationId};
use crate::stations::StationRecord;

/// Outgoing edges for every station in the network.
///
/// Built once from the loaded records and then only read. Edges for a
/// station keep the order of the records that produced them.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: HashMap<StationId, Vec<Edge>>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from station-pair records.
    ///
    /// Duplicate records are not merged; they become parallel edges.
    pub fn build(records: &[StationRecord]) -> Self {
        let mut graph = Self::new();
        for record in records {
            graph.add(record);
        }
        graph
    }

    /// Add one record as a pair of mirrored edges.
    pub fn add(&mut self, record: &StationRecord) {
        self.adjacency
            .entry(record.from.clone())
            .or_default()
            .push(Edge::new(
                record.to.clone(),
                record.time,
                record.distance,
                record.cost,
            ));
        self.adjacency
            .entry(record.to.clone())
            .or_default()
            .push(Edge::new(
                record.from.clone(),
                record.time,
                record.distance,
                record.cost,
            ));
    }

    /// Outgoing edges of a station, empty if the station is unknown.
    pub fn edges_from(&self, station: &StationId) -> &[Edge] {
        self.adjacency
            .get(station)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Check if a station appears in any record.
    pub fn contains(&self, station: &StationId) -> bool {
        self.adjacency.contains_key(station)
    }

    /// All stations, sorted by identifier.
    pub fn stations(&self) -> Vec<&StationId> {
        let mut stations: Vec<&StationId> = self.adjacency.keys().collect();
        stations.sort();
        stations
    }

    /// Look up a station by its text, returning the graph's own identifier.
    pub fn find_station(&self, text: &str) -> Option<&StationId> {
        let id = StationId::parse(text).ok()?;
        self.adjacency.get_key_value(&id).map(|(k, _)| k)
    }

    /// Returns the number of stations.
    pub fn station_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns the number of directed edges (two per record).
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Returns true if the graph has no stations.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

impl FromIterator<StationRecord> for Graph {
    fn from_iter<I: IntoIterator<Item = StationRecord>>(iter: I) -> Self {
        let mut graph = Self::new();
        for record in iter {
            graph.add(&record);
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> StationId {
        StationId::parse(s).unwrap()
    }

    fn record(from: &str, to: &str, time: u32, distance: u32, cost: u32) -> StationRecord {
        StationRecord::new(id(from), id(to), time, distance, cost)
    }

    #[test]
    fn empty_graph() {
        let graph = Graph::build(&[]);
        assert!(graph.is_empty());
        assert_eq!(graph.station_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.edges_from(&id("101")).is_empty());
    }

    #[test]
    fn single_record_is_symmetric() {
        let graph = Graph::build(&[record("101", "102", 5, 100, 1000)]);

        assert_eq!(
            graph.edges_from(&id("101")),
            &[Edge::new(id("102"), 5, 100, 1000)]
        );
        assert_eq!(
            graph.edges_from(&id("102")),
            &[Edge::new(id("101"), 5, 100, 1000)]
        );
        assert_eq!(graph.station_count(), 2);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn duplicates_become_parallel_edges() {
        let graph = Graph::build(&[
            record("101", "102", 5, 100, 1000),
            record("101", "102", 3, 100, 2000),
        ]);

        let edges = graph.edges_from(&id("101"));
        assert_eq!(edges.len(), 2);
        // Record order is preserved
        assert_eq!(edges[0].time, 5);
        assert_eq!(edges[1].time, 3);
    }

    #[test]
    fn contains_and_stations() {
        let graph = Graph::build(&[
            record("201", "202", 1, 1, 1),
            record("101", "201", 1, 1, 1),
        ]);

        assert!(graph.contains(&id("101")));
        assert!(!graph.contains(&id("999")));

        let names: Vec<&str> = graph.stations().iter().map(|s| s.as_str()).collect();
        assert_eq!(names, vec!["101", "201", "202"]);
    }

    #[test]
    fn find_station_by_text() {
        let graph = Graph::build(&[record("101", "102", 1, 1, 1)]);
        assert_eq!(graph.find_station("102"), Some(&id("102")));
        assert_eq!(graph.find_station("103"), None);
        assert_eq!(graph.find_station("abc"), None);
    }

    #[test]
    fn from_iterator() {
        let graph: Graph = vec![record("101", "102", 1, 1, 1)].into_iter().collect();
        assert_eq!(graph.edge_count(), 2);
    }
}
