//! Application state for the web layer.

use std::sync::Arc;

use crate::amenities::AmenityIndex;
use crate::congestion::CongestionCache;
use crate::graph::Graph;

/// Shared application state.
///
/// The graph and amenities are read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Metro network
    pub graph: Arc<Graph>,

    /// Amenities near stations
    pub amenities: Arc<AmenityIndex>,

    /// Per-hop congestion levels
    pub congestion: CongestionCache,
}

impl AppState {
    /// Create a new app state.
    pub fn new(graph: Graph, amenities: AmenityIndex, congestion: CongestionCache) -> Self {
        Self {
            graph: Arc::new(graph),
            amenities: Arc::new(amenities),
            congestion,
        }
    }
}
