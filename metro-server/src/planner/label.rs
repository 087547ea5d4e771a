//! Per-station search labels.

use crate::domain::{Edge, StationId};

/// Best-known accumulated metrics for reaching a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Label {
    pub distance: u32,
    pub cost: u32,
    pub time: u32,
    pub transfers: u32,
}

impl Label {
    /// The label obtained by following `edge` out of `from`.
    ///
    /// A transfer is counted when the edge leads onto a different line.
    pub fn extend(&self, from: &StationId, edge: &Edge) -> Self {
        let transfer = u32::from(from.is_transfer_to(&edge.destination));
        Self {
            distance: self.distance.saturating_add(edge.distance),
            cost: self.cost.saturating_add(edge.cost),
            time: self.time.saturating_add(edge.time),
            transfers: self.transfers + transfer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> StationId {
        StationId::parse(s).unwrap()
    }

    #[test]
    fn extend_same_line() {
        let label = Label::default().extend(&id("101"), &Edge::new(id("102"), 60, 900, 1250));
        assert_eq!(
            label,
            Label {
                distance: 900,
                cost: 1250,
                time: 60,
                transfers: 0
            }
        );
    }

    #[test]
    fn extend_across_lines_counts_transfer() {
        let start = Label {
            distance: 10,
            cost: 20,
            time: 30,
            transfers: 2,
        };
        let label = start.extend(&id("102"), &Edge::new(id("201"), 5, 5, 5));
        assert_eq!(label.transfers, 3);
        assert_eq!(label.time, 35);
    }

    #[test]
    fn extend_saturates() {
        let start = Label {
            time: u32::MAX - 1,
            ..Label::default()
        };
        let label = start.extend(&id("101"), &Edge::new(id("102"), 10, 0, 0));
        assert_eq!(label.time, u32::MAX);
    }
}
