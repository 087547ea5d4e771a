//! Web layer for the metro route planner.
//!
//! Provides HTTP endpoints for finding routes and looking up stations.

mod dto;
mod palette;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use palette::line_colour;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
