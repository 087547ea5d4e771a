//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tracing::{debug, error, warn};

use crate::congestion::{CongestionReport, estimate};
use crate::domain::{Route, StationId};
use crate::graph::Graph;
use crate::planner::{Criterion, PathFinder};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: impl AsRef<std::path::Path>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/stations", get(list_stations))
        .route("/api/stations/:id/amenities", get(station_amenities))
        .route("/route", get(find_route))
        .route("/routes", get(find_routes))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with search form.
async fn index_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let template = IndexTemplate {
        stations: station_names(&state.graph),
    };
    render(&template).map(Html)
}

/// List every station in the network.
async fn list_stations(State(state): State<AppState>) -> Json<StationsResponse> {
    Json(StationsResponse {
        stations: station_names(&state.graph),
    })
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Find the best route for one criterion.
async fn find_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<RouteRequest>,
) -> Result<Response, AppError> {
    let (start, end) = validate_endpoints(&state.graph, &req.from, &req.to)?;
    let criterion = match req.criterion.as_deref() {
        None | Some("") => Criterion::Time,
        Some(name) => name.parse::<Criterion>().map_err(|e| AppError::BadRequest {
            message: e.to_string(),
        })?,
    };

    let route = PathFinder::new(&state.graph)
        .find(start, end, criterion)
        .ok_or_else(|| AppError::NotFound {
            message: format!("no {criterion} route found from {start} to {end}"),
        })?;
    let congestion = estimate_congestion(&state, &route);

    if accepts_html(&headers) {
        let template = RouteResultsTemplate {
            routes: vec![RouteView::from_route(criterion, &route, &congestion)],
        };
        Ok(Html(render(&template)?).into_response())
    } else {
        Ok(Json(RouteResult::from_route(criterion, &route, &congestion)).into_response())
    }
}

/// Find the best route for every criterion.
async fn find_routes(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<RoutesRequest>,
) -> Result<Response, AppError> {
    let (start, end) = validate_endpoints(&state.graph, &req.from, &req.to)?;

    let found: Vec<(Criterion, Route)> = PathFinder::new(&state.graph)
        .find_all(start, end)
        .into_iter()
        .filter_map(|(criterion, route)| route.map(|r| (criterion, r)))
        .collect();

    if found.is_empty() {
        return Err(AppError::NotFound {
            message: format!("no route found from {start} to {end}"),
        });
    }

    let routes = found.iter().map(|(criterion, route)| {
        let congestion = estimate_congestion(&state, route);
        (*criterion, route, congestion)
    });

    if accepts_html(&headers) {
        let template = RouteResultsTemplate {
            routes: routes
                .map(|(criterion, route, congestion)| {
                    RouteView::from_route(criterion, route, &congestion)
                })
                .collect(),
        };
        Ok(Html(render(&template)?).into_response())
    } else {
        let routes = routes
            .map(|(criterion, route, congestion)| {
                RouteResult::from_route(criterion, route, &congestion)
            })
            .collect();
        Ok(Json(RoutesResponse { routes }).into_response())
    }
}

/// Amenities near a station.
async fn station_amenities(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let station = StationId::parse(&id).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;
    if !state.graph.contains(&station) {
        return Err(AppError::NotFound {
            message: format!("unknown station: {station}"),
        });
    }

    let amenities = state.amenities.for_station(&station);

    if accepts_html(&headers) {
        let template = AmenitiesTemplate {
            station: station.to_string(),
            amenities: amenities.iter().map(AmenityView::from_amenity).collect(),
        };
        Ok(Html(render(&template)?).into_response())
    } else {
        Ok(Json(AmenitiesResponse {
            station: station.to_string(),
            amenities: amenities.iter().map(AmenityResult::from_amenity).collect(),
        })
        .into_response())
    }
}

/// Check the requested stations before searching.
///
/// Blank input is reported first. Two unknown stations are reported
/// together, ahead of identical stations, and a single unknown station
/// comes last.
fn validate_endpoints<'g>(
    graph: &'g Graph,
    from: &str,
    to: &str,
) -> Result<(&'g StationId, &'g StationId), AppError> {
    let (from, to) = (from.trim(), to.trim());

    let blank = match (from.is_empty(), to.is_empty()) {
        (true, true) => Some("enter a start and an end station"),
        (true, false) => Some("enter a start station"),
        (false, true) => Some("enter an end station"),
        (false, false) => None,
    };
    if let Some(message) = blank {
        return Err(AppError::BadRequest {
            message: message.to_string(),
        });
    }

    let (start, end) = (graph.find_station(from), graph.find_station(to));
    let message = match (start, end) {
        (None, None) => format!("unknown start and end stations: {from}, {to}"),
        _ if from == to => "start and end stations are the same".to_string(),
        (Some(start), Some(end)) => return Ok((start, end)),
        (None, Some(_)) => format!("unknown start station: {from}"),
        (Some(_), None) => format!("unknown end station: {to}"),
    };
    Err(AppError::BadRequest { message })
}

fn estimate_congestion(state: &AppState, route: &Route) -> CongestionReport {
    let report = estimate(route, &state.congestion, &mut rand::rng());
    debug!(
        lines = report.len(),
        cached_hops = state.congestion.entry_count(),
        "estimated congestion"
    );
    report
}

fn station_names(graph: &Graph) -> Vec<String> {
    graph
        .stations()
        .into_iter()
        .map(|s| s.as_str().to_string())
        .collect()
}

fn render(template: &impl Template) -> Result<String, AppError> {
    template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else if status == StatusCode::NOT_FOUND {
            debug!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "rejected request");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
