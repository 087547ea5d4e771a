//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::amenities::{Amenity, AmenityKind};
use crate::congestion::{CongestionLevel, CongestionReport};
use crate::domain::{Route, StationId};
use crate::planner::Criterion;

/// Request for a single route.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    /// Start station identifier
    #[serde(default)]
    pub from: String,

    /// End station identifier
    #[serde(default)]
    pub to: String,

    /// What to optimize: time, cost or transfers (defaults to time)
    pub criterion: Option<String>,
}

/// Request for the routes under every criterion.
#[derive(Debug, Deserialize)]
pub struct RoutesRequest {
    #[serde(default)]
    pub from: String,

    #[serde(default)]
    pub to: String,
}

/// A route in responses.
#[derive(Debug, Serialize)]
pub struct RouteResult {
    /// Criterion the route was optimized for
    pub criterion: Criterion,

    /// Stations from start to end
    pub stations: Vec<String>,

    /// Per-hop distances
    pub distances: Vec<u32>,

    /// Per-hop costs
    pub costs: Vec<u32>,

    /// Per-hop times in seconds
    pub times: Vec<u32>,

    pub total_time: u32,
    pub total_cost: u32,
    pub total_distance: u32,
    pub total_transfers: u32,

    /// Origin, transfer stations and destination
    pub key_stations: Vec<String>,

    /// Per-line congestion along the route
    pub congestion: Vec<LineCongestionResult>,
}

impl RouteResult {
    /// Create from a domain Route.
    pub fn from_route(criterion: Criterion, route: &Route, congestion: &CongestionReport) -> Self {
        Self {
            criterion,
            stations: route.stations().iter().map(station_text).collect(),
            distances: route.distances().to_vec(),
            costs: route.costs().to_vec(),
            times: route.times().to_vec(),
            total_time: route.total_time(),
            total_cost: route.total_cost(),
            total_distance: route.total_distance(),
            total_transfers: route.total_transfers(),
            key_stations: key_stations(route).into_iter().map(station_text).collect(),
            congestion: congestion
                .iter()
                .map(|(line, c)| LineCongestionResult {
                    line: line.get(),
                    average: c.average,
                    level: c.level,
                })
                .collect(),
        }
    }
}

/// Congestion on one line of a route.
#[derive(Debug, Serialize)]
pub struct LineCongestionResult {
    pub line: u8,
    pub average: u8,
    pub level: CongestionLevel,
}

/// Response for the all-criteria request.
///
/// Criteria with no route are omitted.
#[derive(Debug, Serialize)]
pub struct RoutesResponse {
    pub routes: Vec<RouteResult>,
}

/// Response for the station list.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    /// Station identifiers, sorted
    pub stations: Vec<String>,
}

/// An amenity near a station.
#[derive(Debug, Serialize)]
pub struct AmenityResult {
    pub kind: AmenityKind,
    pub label: &'static str,
    pub name: String,
    pub distance_m: Option<u32>,
}

impl AmenityResult {
    pub fn from_amenity(amenity: &Amenity) -> Self {
        Self {
            kind: amenity.kind,
            label: amenity.kind.label(),
            name: amenity.name.clone(),
            distance_m: amenity.distance_m,
        }
    }
}

/// Response for the amenities of a station.
#[derive(Debug, Serialize)]
pub struct AmenitiesResponse {
    pub station: String,
    pub amenities: Vec<AmenityResult>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Stations a rider needs to notice: the origin, every station where the
/// line changes, and the destination.
pub fn key_stations(route: &Route) -> Vec<&StationId> {
    let mut keys = vec![route.origin()];
    keys.extend(route.transfer_points());
    // The destination may already be there as the final transfer point
    if keys.last().copied() != Some(route.destination()) {
        keys.push(route.destination());
    }
    keys
}

fn station_text(station: &StationId) -> String {
    station.as_str().to_string()
}
