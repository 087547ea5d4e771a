//! Domain error types.
//!
//! These errors represent invariant violations when constructing domain
//! values. They are distinct from loading and HTTP errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Route has no stations
    #[error("route must have at least one station")]
    EmptyRoute,

    /// Per-hop metrics don't line up with the stations
    #[error("route with {stations} stations needs {expected} hops, got {hops}", expected = .stations.saturating_sub(1))]
    HopCountMismatch { stations: usize, hops: usize },
}
