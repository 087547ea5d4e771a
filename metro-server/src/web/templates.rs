//! Askama templates for the web frontend.

use askama::Template;
use chrono::Duration;

use crate::congestion::CongestionReport;
use crate::domain::{LineSegment, Route};
use crate::planner::Criterion;

use super::dto::key_stations;
use super::palette::line_colour;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the route search form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    /// Known stations, offered as suggestions
    pub stations: Vec<String>,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Route results fragment.
#[derive(Template)]
#[template(path = "route_results.html")]
pub struct RouteResultsTemplate {
    pub routes: Vec<RouteView>,
}

/// Amenities fragment.
#[derive(Template)]
#[template(path = "amenities.html")]
pub struct AmenitiesTemplate {
    pub station: String,
    pub amenities: Vec<AmenityView>,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Route view model for templates.
#[derive(Debug, Clone)]
pub struct RouteView {
    pub title: &'static str,
    pub criterion: &'static str,
    pub duration_display: String,
    pub total_cost: u32,
    pub total_distance: u32,
    pub transfers: u32,
    pub key_stations: Vec<String>,
    pub segments: Vec<SegmentView>,
}

impl RouteView {
    /// Create from a domain Route and its congestion estimate.
    pub fn from_route(criterion: Criterion, route: &Route, congestion: &CongestionReport) -> Self {
        let segments = route
            .line_segments()
            .iter()
            .map(|segment| SegmentView::from_segment(segment, congestion))
            .collect();

        Self {
            title: criterion.title(),
            criterion: criterion.as_str(),
            duration_display: duration_display(route.total_time()),
            total_cost: route.total_cost(),
            total_distance: route.total_distance(),
            transfers: route.total_transfers(),
            key_stations: key_stations(route)
                .iter()
                .map(|s| s.as_str().to_string())
                .collect(),
            segments,
        }
    }
}

/// A run of stations on one line.
#[derive(Debug, Clone)]
pub struct SegmentView {
    pub line: u8,
    pub colour: &'static str,
    pub first_station: String,
    pub last_station: String,
    /// Stations passed through between the first and last
    pub intermediate: Vec<String>,
    pub station_count: usize,
    /// Congestion level of the line, if estimated
    pub congestion: Option<&'static str>,
}

impl SegmentView {
    pub fn from_segment(segment: &LineSegment<'_>, congestion: &CongestionReport) -> Self {
        Self {
            line: segment.line.get(),
            colour: line_colour(segment.line),
            first_station: segment.first().as_str().to_string(),
            last_station: segment.last().as_str().to_string(),
            intermediate: segment
                .intermediate()
                .iter()
                .map(|s| s.as_str().to_string())
                .collect(),
            station_count: segment.stations.len(),
            congestion: congestion.get(segment.line).map(|c| c.level.as_str()),
        }
    }
}

/// Amenity view model.
#[derive(Debug, Clone)]
pub struct AmenityView {
    pub label: &'static str,
    pub name: String,
    pub distance_display: String,
}

impl AmenityView {
    pub fn from_amenity(amenity: &crate::amenities::Amenity) -> Self {
        Self {
            label: amenity.kind.label(),
            name: amenity.name.clone(),
            distance_display: amenity
                .distance_m
                .map(|m| format!("{m} m"))
                .unwrap_or_else(|| "unknown".to_string()),
        }
    }
}

/// Format a travel time given in seconds, e.g. `"1h 2m 5s"`, `"4m 0s"` or
/// `"45s"`.
pub fn duration_display(seconds: u32) -> String {
    let duration = Duration::seconds(i64::from(seconds));
    let hours = duration.num_hours();
    let mins = duration.num_minutes() % 60;
    let secs = duration.num_seconds() % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, mins, secs)
    } else if mins > 0 {
        format!("{}m {}s", mins, secs)
    } else {
        format!("{}s", secs)
    }
}
