//! Domain types for the metro route planner.
//!
//! This module contains the core domain model types. All types enforce
//! their invariants at construction time, so code that receives these types
//! can trust their validity.

mod edge;
mod error;
mod route;
mod station;

pub use edge::Edge;
pub use error::DomainError;
pub use route::{Hop, LineSegment, Route};
pub use station::{InvalidStationId, LineNumber, StationId};
