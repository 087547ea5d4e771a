//! Congestion estimates for a route.
//!
//! There is no live occupancy feed, so each hop of a route is assigned a
//! random congestion level between 1 and 100. Levels are cached per hop so
//! that the same hop keeps its value for the lifetime of a cache entry,
//! whichever route it appears in. The estimate is purely presentational and
//! is never consulted by the path finder.

use std::collections::BTreeMap;
use std::fmt;

use moka::sync::Cache as MokaCache;
use rand::Rng;
use serde::Serialize;
use tracing::trace;

use crate::config::CongestionConfig;
use crate::domain::{LineNumber, Route, StationId};

/// Cache key for one hop, attributed to one line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SegmentKey {
    pub line: LineNumber,
    pub from: StationId,
    pub to: StationId,
}

impl SegmentKey {
    pub fn new(line: LineNumber, from: StationId, to: StationId) -> Self {
        Self { line, from, to }
    }
}

/// How crowded a line is along a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CongestionLevel {
    Comfortable,
    Moderate,
    Congested,
}

impl CongestionLevel {
    /// Classify an average level: above 70 is congested, 30 to 70 is
    /// moderate, below 30 is comfortable.
    pub fn from_average(average: u8) -> Self {
        match average {
            71.. => CongestionLevel::Congested,
            30..=70 => CongestionLevel::Moderate,
            _ => CongestionLevel::Comfortable,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CongestionLevel::Comfortable => "comfortable",
            CongestionLevel::Moderate => "moderate",
            CongestionLevel::Congested => "congested",
        }
    }
}

impl fmt::Display for CongestionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Congestion summary for one line of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineCongestion {
    /// Mean of the hop levels attributed to the line, rounded down
    pub average: u8,
    pub level: CongestionLevel,
}

/// Per-line congestion for a whole route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CongestionReport {
    lines: BTreeMap<LineNumber, LineCongestion>,
}

impl CongestionReport {
    /// Congestion for a line, if the route uses it.
    pub fn get(&self, line: LineNumber) -> Option<LineCongestion> {
        self.lines.get(&line).copied()
    }

    /// Lines in ascending order with their congestion.
    pub fn iter(&self) -> impl Iterator<Item = (LineNumber, LineCongestion)> + '_ {
        self.lines.iter().map(|(line, c)| (*line, *c))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Side table of hop congestion levels.
///
/// Entries expire after the configured TTL, after which a hop gets a fresh
/// random level.
#[derive(Clone)]
pub struct CongestionCache {
    segments: MokaCache<SegmentKey, u8>,
}

impl CongestionCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CongestionConfig) -> Self {
        let segments = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { segments }
    }

    /// Level for a hop, drawing a new one from `rng` on a miss.
    pub fn level<R: Rng>(&self, key: SegmentKey, rng: &mut R) -> u8 {
        self.segments.get_with(key, || rng.random_range(1..=100))
    }

    /// Store a level for a hop, replacing any cached one.
    pub fn insert(&self, key: SegmentKey, level: u8) {
        self.segments.insert(key, level);
    }

    /// Cached level for a hop, without drawing a new one.
    pub fn get(&self, key: &SegmentKey) -> Option<u8> {
        self.segments.get(key)
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.segments.entry_count()
    }

    /// Forget every cached level.
    pub fn invalidate_all(&self) {
        self.segments.invalidate_all();
    }
}

/// Estimate per-line congestion along a route.
///
/// Each hop counts towards the line of the station it leaves. The last hop
/// additionally counts towards the destination's line, so the line the
/// rider arrives on always has an estimate. A single-station route has no
/// hops and gives an empty report.
pub fn estimate<R: Rng>(
    route: &Route,
    cache: &CongestionCache,
    rng: &mut R,
) -> CongestionReport {
    let mut samples: BTreeMap<LineNumber, Vec<u8>> = BTreeMap::new();
    let stations = route.stations();

    for pair in stations.windows(2) {
        let (from, to) = (&pair[0], &pair[1]);
        let key = SegmentKey::new(from.line(), from.clone(), to.clone());
        let level = cache.level(key, rng);
        samples.entry(from.line()).or_default().push(level);
    }

    if let [.., second_last, last] = stations {
        let key = SegmentKey::new(last.line(), second_last.clone(), last.clone());
        let level = cache.level(key, rng);
        samples.entry(last.line()).or_default().push(level);
    }

    let lines = samples
        .into_iter()
        .map(|(line, levels)| {
            let sum: u32 = levels.iter().map(|l| u32::from(*l)).sum();
            // Levels are at most 100, so the mean fits in a u8
            let average = (sum / levels.len() as u32) as u8;
            trace!(%line, average, hops = levels.len(), "line congestion");
            (
                line,
                LineCongestion {
                    average,
                    level: CongestionLevel::from_average(average),
                },
            )
        })
        .collect();

    CongestionReport { lines }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Hop;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::time::Duration;

    fn id(s: &str) -> StationId {
        StationId::parse(s).unwrap()
    }

    fn route(names: &[&str]) -> Route {
        let stations: Vec<StationId> = names.iter().map(|s| id(s)).collect();
        let hops = vec![Hop::default(); stations.len() - 1];
        Route::new(stations, &hops).unwrap()
    }

    fn cache() -> CongestionCache {
        CongestionCache::new(&CongestionConfig {
            ttl: Duration::from_secs(600),
            max_capacity: 100,
        })
    }

    fn key(line_of: &str, from: &str, to: &str) -> SegmentKey {
        SegmentKey::new(id(line_of).line(), id(from), id(to))
    }

    #[test]
    fn thresholds() {
        assert_eq!(CongestionLevel::from_average(1), CongestionLevel::Comfortable);
        assert_eq!(CongestionLevel::from_average(29), CongestionLevel::Comfortable);
        assert_eq!(CongestionLevel::from_average(30), CongestionLevel::Moderate);
        assert_eq!(CongestionLevel::from_average(70), CongestionLevel::Moderate);
        assert_eq!(CongestionLevel::from_average(71), CongestionLevel::Congested);
        assert_eq!(CongestionLevel::from_average(100), CongestionLevel::Congested);
    }

    #[test]
    fn single_station_route_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        let report = estimate(&route(&["101"]), &cache(), &mut rng);
        assert!(report.is_empty());
    }

    #[test]
    fn averages_use_cached_levels() {
        let cache = cache();
        cache.insert(key("101", "101", "102"), 20);
        cache.insert(key("102", "102", "201"), 40);
        cache.insert(key("201", "201", "202"), 90);
        // Last hop counted again under the destination line
        cache.insert(key("202", "201", "202"), 90);

        let mut rng = StdRng::seed_from_u64(1);
        let report = estimate(&route(&["101", "102", "201", "202"]), &cache, &mut rng);

        assert_eq!(report.len(), 2);
        let line1 = report.get(id("101").line()).unwrap();
        assert_eq!(line1.average, 30);
        assert_eq!(line1.level, CongestionLevel::Moderate);

        let line2 = report.get(id("201").line()).unwrap();
        assert_eq!(line2.average, 90);
        assert_eq!(line2.level, CongestionLevel::Congested);
    }

    #[test]
    fn destination_line_always_rated() {
        // Transfer on the final hop: line 2 only has the extra sample
        let cache = cache();
        cache.insert(key("101", "101", "102"), 10);
        cache.insert(key("102", "102", "201"), 20);
        cache.insert(key("201", "102", "201"), 75);

        let mut rng = StdRng::seed_from_u64(1);
        let report = estimate(&route(&["101", "102", "201"]), &cache, &mut rng);

        assert_eq!(report.get(id("101").line()).unwrap().average, 15);
        let line2 = report.get(id("201").line()).unwrap();
        assert_eq!(line2.average, 75);
        assert_eq!(line2.level, CongestionLevel::Congested);
    }

    #[test]
    fn levels_are_stable_across_calls() {
        let cache = cache();
        let r = route(&["101", "102", "103", "201"]);

        let mut rng = StdRng::seed_from_u64(7);
        let first = estimate(&r, &cache, &mut rng);

        // A different generator must not change cached hops
        let mut other = StdRng::seed_from_u64(99);
        let second = estimate(&r, &cache, &mut other);

        assert_eq!(first, second);
    }

    #[test]
    fn drawn_levels_are_in_range() {
        let cache = cache();
        let mut rng = StdRng::seed_from_u64(3);
        let r = route(&["101", "102", "103", "104", "105"]);
        estimate(&r, &cache, &mut rng);

        for pair in r.stations().windows(2) {
            let level = cache
                .get(&SegmentKey::new(pair[0].line(), pair[0].clone(), pair[1].clone()))
                .unwrap();
            assert!((1..=100).contains(&level));
        }
    }

    #[test]
    fn keys_distinguish_line_and_direction() {
        assert_ne!(key("101", "101", "102"), key("101", "102", "101"));
        assert_ne!(key("101", "102", "201"), key("201", "102", "201"));
    }

    #[test]
    fn invalidate_all_clears_levels() {
        let cache = cache();
        cache.insert(key("101", "101", "102"), 50);
        cache.invalidate_all();
        assert!(cache.get(&key("101", "101", "102")).is_none());
    }
}
