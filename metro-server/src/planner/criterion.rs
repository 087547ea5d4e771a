//! Optimization criteria.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::label::Label;

/// Error returned when parsing an unknown criterion name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown criterion {0:?} (expected time, cost or transfers)")]
pub struct UnknownCriterion(String);

/// What a search minimizes.
///
/// Each criterion orders labels by a primary metric and breaks ties on a
/// fixed secondary metric:
///
/// | criterion   | primary   | secondary |
/// |-------------|-----------|-----------|
/// | `Time`      | time      | cost      |
/// | `Cost`      | cost      | time      |
/// | `Transfers` | transfers | time      |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    Time,
    Cost,
    Transfers,
}

impl Criterion {
    /// All criteria, in the order results are presented.
    pub const ALL: [Criterion; 3] = [Criterion::Transfers, Criterion::Cost, Criterion::Time];

    /// The `(primary, secondary)` comparison key of a label.
    ///
    /// Smaller keys are better; comparison is lexicographic.
    pub fn key(self, label: &Label) -> (u32, u32) {
        match self {
            Criterion::Time => (label.time, label.cost),
            Criterion::Cost => (label.cost, label.time),
            Criterion::Transfers => (label.transfers, label.time),
        }
    }

    /// Machine name, as used in query strings and JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Criterion::Time => "time",
            Criterion::Cost => "cost",
            Criterion::Transfers => "transfers",
        }
    }

    /// Human-readable route title.
    pub fn title(self) -> &'static str {
        match self {
            Criterion::Time => "Fastest route",
            Criterion::Cost => "Cheapest route",
            Criterion::Transfers => "Fewest transfers",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Criterion {
    type Err = UnknownCriterion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "time" => Ok(Criterion::Time),
            "cost" => Ok(Criterion::Cost),
            "transfers" => Ok(Criterion::Transfers),
            _ => Err(UnknownCriterion(s.to_string())),
        }
    }
}
