//! In-memory provider for recorded or hand-built timing data

use chrono::Datelike;
use serde::de::DeserializeOwned;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info, warn};

use super::parse_collection;
use crate::provider::{Collection, Provider};
use crate::types::{Driver, IntervalSample, LapSample, OfficialResult, PositionSample, Session};
use crate::{Result, ResultsError};

/// Provider that serves collections held in memory
///
/// Collections can be built up record by record, or loaded from a directory
/// of recorded OpenF1 responses named after their endpoint (`sessions.json`,
/// `position.json`, `drivers.json`, `laps.json`, `intervals.json`,
/// `session_result.json`). Any collection can be marked as failing to exercise
/// degraded paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    sessions: Vec<Session>,
    positions: HashMap<u32, Vec<PositionSample>>,
    drivers: HashMap<u32, Vec<Driver>>,
    laps: HashMap<u32, Vec<LapSample>>,
    intervals: HashMap<u32, Vec<IntervalSample>>,
    official_results: HashMap<u32, Vec<OfficialResult>>,
    failing: HashSet<Collection>,
}

/// Records that carry the session they belong to
trait SessionScoped {
    fn session_key(&self) -> Option<u32>;
}

macro_rules! session_scoped {
    ($($record:ty),*) => {
        $(impl SessionScoped for $record {
            fn session_key(&self) -> Option<u32> {
                self.session_key
            }
        })*
    };
}

session_scoped!(PositionSample, Driver, LapSample, IntervalSample, OfficialResult);

impl MemoryProvider {
    /// Create an empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Load recorded OpenF1 responses from a directory
    ///
    /// Missing files leave their collection empty. Rows without a
    /// `session_key` cannot be attributed to a session and are skipped.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        info!("Loading recorded OpenF1 data from {}", dir.display());

        let mut provider = Self::new();
        provider.sessions = read_collection(dir, Collection::Sessions)?;
        provider.positions = group_by_session(read_collection(dir, Collection::Positions)?);
        provider.drivers = group_by_session(read_collection(dir, Collection::Drivers)?);
        provider.laps = group_by_session(read_collection(dir, Collection::Laps)?);
        provider.intervals = group_by_session(read_collection(dir, Collection::Intervals)?);
        provider.official_results =
            group_by_session(read_collection(dir, Collection::OfficialResults)?);

        debug!(
            sessions = provider.sessions.len(),
            position_sessions = provider.positions.len(),
            lap_sessions = provider.laps.len(),
            "Recorded data loaded"
        );
        Ok(provider)
    }

    pub fn with_sessions(mut self, sessions: Vec<Session>) -> Self {
        self.sessions.extend(sessions);
        self
    }

    pub fn with_positions(mut self, session_key: u32, rows: Vec<PositionSample>) -> Self {
        self.positions.entry(session_key).or_default().extend(rows);
        self
    }

    pub fn with_drivers(mut self, session_key: u32, rows: Vec<Driver>) -> Self {
        self.drivers.entry(session_key).or_default().extend(rows);
        self
    }

    pub fn with_laps(mut self, session_key: u32, rows: Vec<LapSample>) -> Self {
        self.laps.entry(session_key).or_default().extend(rows);
        self
    }

    pub fn with_intervals(mut self, session_key: u32, rows: Vec<IntervalSample>) -> Self {
        self.intervals.entry(session_key).or_default().extend(rows);
        self
    }

    pub fn with_official_results(mut self, session_key: u32, rows: Vec<OfficialResult>) -> Self {
        self.official_results.entry(session_key).or_default().extend(rows);
        self
    }

    /// Make every request for `collection` fail as an unavailable upstream
    pub fn failing(mut self, collection: Collection) -> Self {
        self.failing.insert(collection);
        self
    }

    fn check(&self, collection: Collection) -> Result<()> {
        if self.failing.contains(&collection) {
            debug!("Simulating {} failure", collection);
            return Err(ResultsError::upstream_unavailable(collection, "simulated failure"));
        }
        Ok(())
    }

    fn rows<T: Clone>(
        &self,
        collection: Collection,
        map: &HashMap<u32, Vec<T>>,
        session_key: u32,
    ) -> Result<Vec<T>> {
        self.check(collection)?;
        Ok(map.get(&session_key).cloned().unwrap_or_default())
    }
}

fn read_collection<T: DeserializeOwned>(dir: &Path, collection: Collection) -> Result<Vec<T>> {
    let path = dir.join(format!("{}.json", collection.endpoint()));
    if !path.exists() {
        debug!("No recorded {} at {}", collection, path.display());
        return Ok(Vec::new());
    }
    let body = std::fs::read_to_string(&path).map_err(|e| ResultsError::file_error(path.clone(), e))?;
    parse_collection(collection, &body)
}

fn group_by_session<T: SessionScoped>(rows: Vec<T>) -> HashMap<u32, Vec<T>> {
    let mut grouped: HashMap<u32, Vec<T>> = HashMap::new();
    let mut unscoped = 0usize;
    for row in rows {
        match row.session_key() {
            Some(key) => grouped.entry(key).or_default().push(row),
            None => unscoped += 1,
        }
    }
    if unscoped > 0 {
        warn!(rows = unscoped, "Skipped recorded rows without a session_key");
    }
    grouped
}

#[async_trait::async_trait]
impl Provider for MemoryProvider {
    async fn sessions(&self, year: i32) -> Result<Vec<Session>> {
        self.check(Collection::Sessions)?;
        Ok(self
            .sessions
            .iter()
            .filter(|s| s.year.unwrap_or_else(|| s.date_start.year()) == year)
            .cloned()
            .collect())
    }

    async fn positions(&self, session_key: u32) -> Result<Vec<PositionSample>> {
        self.rows(Collection::Positions, &self.positions, session_key)
    }

    async fn drivers(&self, session_key: u32) -> Result<Vec<Driver>> {
        self.rows(Collection::Drivers, &self.drivers, session_key)
    }

    async fn laps(&self, session_key: u32) -> Result<Vec<LapSample>> {
        self.rows(Collection::Laps, &self.laps, session_key)
    }

    async fn intervals(&self, session_key: u32) -> Result<Vec<IntervalSample>> {
        self.rows(Collection::Intervals, &self.intervals, session_key)
    }

    async fn official_results(&self, session_key: u32) -> Result<Vec<OfficialResult>> {
        self.rows(Collection::OfficialResults, &self.official_results, session_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{self, lap, session};

    #[tokio::test]
    async fn serves_rows_per_session_and_year() {
        let provider = MemoryProvider::new()
            .with_sessions(vec![
                session(9005, "Race", "Race", "2025-04-13T15:00:00Z"),
                session(8000, "Race", "Race", "2024-03-02T15:00:00Z"),
            ])
            .with_laps(9005, vec![lap(1, Some(95.0))]);

        assert_eq!(provider.sessions(2025).await.unwrap().len(), 1);
        assert_eq!(provider.laps(9005).await.unwrap().len(), 1);
        assert!(provider.laps(8000).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failing_collection_is_upstream_unavailable() {
        let provider = MemoryProvider::new().failing(Collection::Drivers);
        let error = provider.drivers(1).await.unwrap_err();
        assert_eq!(error.collection(), Some(Collection::Drivers));
        assert!(provider.laps(1).await.is_ok());
    }

    #[tokio::test]
    async fn loads_recorded_fixture_directory() {
        let dir = test_utils::require_openf1_fixtures().expect("OpenF1 fixtures missing");
        let provider = MemoryProvider::from_dir(&dir).unwrap();

        let sessions = provider.sessions(2025).await.unwrap();
        assert_eq!(sessions.len(), 5);
        assert!(!provider.positions(9005).await.unwrap().is_empty());
        assert_eq!(provider.official_results(9004).await.unwrap().len(), 4);
    }

    #[test]
    fn missing_directory_yields_empty_provider() {
        let provider = MemoryProvider::from_dir("/nonexistent/openf1").unwrap();
        assert!(provider.sessions.is_empty());
    }
}
