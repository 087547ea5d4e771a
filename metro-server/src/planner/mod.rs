//! Route planner using a multi-criteria shortest path search.
//!
//! This module implements the core routing algorithm that answers:
//! "What is the fastest / cheapest / least-transfer way from A to B?"
//!
//! One search routine serves all three criteria; a [`Criterion`] only
//! decides which accumulated metric is compared first and which breaks
//! ties.

mod criterion;
mod label;
mod search;


pub use criterion::{Criterion, UnknownCriterion};
pub use label::Label;
pub use search::{PathFinder, find_path};
