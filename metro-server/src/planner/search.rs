//! Multi-criteria shortest path search.
//!
//! A label-setting search in the style of Dijkstra's algorithm. Every
//! reached station carries a full [`Label`] (distance, cost, time and
//! transfers), but stations are ordered and improved only by the active
//! criterion's `(primary, secondary)` key. All weights are non-negative, so
//! the first time the destination is popped its label is optimal.

use std::cmp::Reverse;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap};

use tracing::{debug, trace};

use crate::domain::{Hop, Route, StationId};
use crate::graph::Graph;

use super::criterion::Criterion;
use super::label::Label;

/// Best label for a station plus how it was reached.
#[derive(Debug, Clone)]
struct Reached {
    label: Label,
    /// Predecessor and the hop taken from it; `None` only for the start.
    via: Option<(StationId, Hop)>,
}

/// Entry in the pending queue.
///
/// `seq` is a push counter, so equal keys pop in insertion order.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Pending {
    key: (u32, u32),
    seq: u64,
    station: StationId,
}

/// Find the best route from `start` to `end` under `criterion`.
///
/// Returns `None` if `end` cannot be reached from `start`. When
/// `start == end` the result is the single-station route, even if the
/// station is not in the graph.
pub fn find_path(
    graph: &Graph,
    start: &StationId,
    end: &StationId,
    criterion: Criterion,
) -> Option<Route> {
    let mut reached: HashMap<StationId, Reached> = HashMap::new();
    let mut pending: BinaryHeap<Reverse<Pending>> = BinaryHeap::new();
    let mut seq = 0u64;
    let mut settled = 0usize;

    reached.insert(
        start.clone(),
        Reached {
            label: Label::default(),
            via: None,
        },
    );
    pending.push(Reverse(Pending {
        key: criterion.key(&Label::default()),
        seq,
        station: start.clone(),
    }));

    while let Some(Reverse(Pending { key, station, .. })) = pending.pop() {
        let Some(current) = reached.get(&station).map(|r| r.label) else {
            continue;
        };

        // Superseded by a better label pushed later
        if criterion.key(&current) != key {
            continue;
        }

        settled += 1;
        trace!(station = %station, ?key, "settled station");

        if &station == end {
            let route = reconstruct(&reached, end, current.transfers);
            debug!(
                %criterion,
                start = %start,
                end = %end,
                settled,
                hops = route.hop_count(),
                "route found"
            );
            return Some(route);
        }

        for edge in graph.edges_from(&station) {
            let candidate = current.extend(&station, edge);
            let candidate_key = criterion.key(&candidate);

            let improved = match reached.entry(edge.destination.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(Reached {
                        label: candidate,
                        via: Some((station.clone(), Hop::from(edge))),
                    });
                    true
                }
                Entry::Occupied(mut slot) => {
                    if candidate_key < criterion.key(&slot.get().label) {
                        slot.insert(Reached {
                            label: candidate,
                            via: Some((station.clone(), Hop::from(edge))),
                        });
                        true
                    } else {
                        false
                    }
                }
            };

            if improved {
                seq += 1;
                pending.push(Reverse(Pending {
                    key: candidate_key,
                    seq,
                    station: edge.destination.clone(),
                }));
            }
        }
    }

    debug!(
        %criterion,
        start = %start,
        end = %end,
        settled,
        "no route found"
    );
    None
}

/// Walk predecessors back from `end` and assemble the route.
///
/// Predecessors are always settled before their successors are relaxed,
/// so the chain is final and acyclic.
fn reconstruct(reached: &HashMap<StationId, Reached>, end: &StationId, transfers: u32) -> Route {
    let mut stations = vec![end.clone()];
    let mut hops = Vec::new();

    let mut current = end;
    while let Some((prev, hop)) = reached.get(current).and_then(|r| r.via.as_ref()) {
        hops.push(*hop);
        stations.push(prev.clone());
        current = prev;
    }

    stations.reverse();
    hops.reverse();

    Route::from_search(stations, &hops, transfers)
}

/// Path finder bound to one graph.
///
/// Holds only a shared reference, so any number of finders (on any
/// number of threads) can search the same graph at once.
#[derive(Debug, Clone, Copy)]
pub struct PathFinder<'g> {
    graph: &'g Graph,
}

impl<'g> PathFinder<'g> {
    /// Create a new path finder.
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    /// Search under the given criterion.
    pub fn find(&self, start: &StationId, end: &StationId, criterion: Criterion) -> Option<Route> {
        find_path(self.graph, start, end, criterion)
    }

    /// Minimum travel time, ties broken by cost.
    pub fn fastest(&self, start: &StationId, end: &StationId) -> Option<Route> {
        self.find(start, end, Criterion::Time)
    }

    /// Minimum fare, ties broken by time.
    pub fn cheapest(&self, start: &StationId, end: &StationId) -> Option<Route> {
        self.find(start, end, Criterion::Cost)
    }

    /// Minimum line transfers, ties broken by time.
    pub fn fewest_transfers(&self, start: &StationId, end: &StationId) -> Option<Route> {
        self.find(start, end, Criterion::Transfers)
    }

    /// Run one search per criterion, in [`Criterion::ALL`] order.
    pub fn find_all(&self, start: &StationId, end: &StationId) -> Vec<(Criterion, Option<Route>)> {
        Criterion::ALL
            .into_iter()
            .map(|criterion| (criterion, self.find(start, end, criterion)))
            .collect()
    }
}
