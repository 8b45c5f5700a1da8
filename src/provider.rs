//! Provider trait for timing data sources

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Result;
use crate::types::{Driver, IntervalSample, LapSample, OfficialResult, PositionSample, Session};

/// Collections a provider serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Sessions,
    Positions,
    Drivers,
    Laps,
    Intervals,
    OfficialResults,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Sessions,
        Collection::Positions,
        Collection::Drivers,
        Collection::Laps,
        Collection::Intervals,
        Collection::OfficialResults,
    ];

    /// Whether a failure of this collection aborts classification.
    pub fn is_required(self) -> bool {
        matches!(self, Collection::Sessions | Collection::Positions | Collection::Drivers)
    }

    /// OpenF1 endpoint name, also the stem of recorded fixture files.
    pub fn endpoint(self) -> &'static str {
        match self {
            Collection::Sessions => "sessions",
            Collection::Positions => "position",
            Collection::Drivers => "drivers",
            Collection::Laps => "laps",
            Collection::Intervals => "intervals",
            Collection::OfficialResults => "session_result",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Collection::Sessions => "sessions",
            Collection::Positions => "positions",
            Collection::Drivers => "drivers",
            Collection::Laps => "laps",
            Collection::Intervals => "intervals",
            Collection::OfficialResults => "official results",
        };
        f.write_str(name)
    }
}

/// Trait for timing data sources
///
/// Providers abstract over where timing data comes from (the OpenF1 HTTP API,
/// recorded responses, in-memory fixtures). Each method returns one whole
/// collection as typed records; validation happens here, once.
///
/// Returns:
/// - `Ok(rows)` - collection fetched (possibly empty)
/// - `Err(e)` - transport, status or parse failure
#[async_trait::async_trait]
pub trait Provider: Send + Sync {
    /// All sessions of a season
    async fn sessions(&self, year: i32) -> Result<Vec<Session>>;

    /// Running-position samples of a session
    async fn positions(&self, session_key: u32) -> Result<Vec<PositionSample>>;

    /// Driver identities of a session
    async fn drivers(&self, session_key: u32) -> Result<Vec<Driver>>;

    /// Lap records of a session
    async fn laps(&self, session_key: u32) -> Result<Vec<LapSample>>;

    /// Interval / gap-to-leader samples of a session
    async fn intervals(&self, session_key: u32) -> Result<Vec<IntervalSample>>;

    /// Authoritative result records of a session
    async fn official_results(&self, session_key: u32) -> Result<Vec<OfficialResult>>;
}

#[async_trait::async_trait]
impl<P: Provider + ?Sized> Provider for std::sync::Arc<P> {
    async fn sessions(&self, year: i32) -> Result<Vec<Session>> {
        (**self).sessions(year).await
    }

    async fn positions(&self, session_key: u32) -> Result<Vec<PositionSample>> {
        (**self).positions(session_key).await
    }

    async fn drivers(&self, session_key: u32) -> Result<Vec<Driver>> {
        (**self).drivers(session_key).await
    }

    async fn laps(&self, session_key: u32) -> Result<Vec<LapSample>> {
        (**self).laps(session_key).await
    }

    async fn intervals(&self, session_key: u32) -> Result<Vec<IntervalSample>> {
        (**self).intervals(session_key).await
    }

    async fn official_results(&self, session_key: u32) -> Result<Vec<OfficialResult>> {
        (**self).official_results(session_key).await
    }
}
