use std::error::Error;
use std::io;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use metro_server::amenities::{AmenityIndex, load_amenities_from_path};
use metro_server::config::ServerConfig;
use metro_server::congestion::CongestionCache;
use metro_server::graph::Graph;
use metro_server::stations::{LoadError, load_records_from_path};
use metro_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ServerConfig::from_env()?;

    // The network is required
    let records = load_records_from_path(&config.stations_csv)?;
    let graph = Graph::build(&records);
    info!(
        path = %config.stations_csv.display(),
        stations = graph.station_count(),
        edges = graph.edge_count(),
        "loaded metro network"
    );
    if graph.is_empty() {
        warn!("metro network is empty; every route request will fail");
    }

    // Amenities are optional
    let amenities = match load_amenities_from_path(&config.amenities_csv) {
        Ok(index) => index,
        Err(LoadError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
            warn!(path = %config.amenities_csv.display(), "no amenities file");
            AmenityIndex::new()
        }
        Err(e) => return Err(e.into()),
    };
    info!(stations = amenities.len(), "loaded amenities");

    let congestion = CongestionCache::new(&config.congestion);
    let state = AppState::new(graph, amenities, congestion);
    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Metro Route Planner listening on http://{}", config.bind_addr);
    info!("  GET  /health                      - Health check");
    info!("  GET  /api/stations                - Station list");
    info!("  GET  /route?from=&to=&criterion=  - Best route for one criterion");
    info!("  GET  /routes?from=&to=            - Best route for every criterion");
    info!("  GET  /api/stations/:id/amenities  - Amenities near a station");

    axum::serve(listener, app).await?;

    Ok(())
}
