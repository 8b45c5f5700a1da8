//! Session results resolution
//!
//! [`ResultsResolver`] ties the pieces together: it asks the provider for the
//! season's sessions, selects one, fetches the collections its session kind
//! needs, reduces them per driver and hands them to the matching builder.
//!
//! Fetches are strictly sequential. Required collections (sessions, positions,
//! drivers) abort the resolution; auxiliary ones (laps, intervals, official
//! results) degrade to empty data.
//!
//! ```rust,no_run
//! use paddock::{ResolverConfig, ResultsResolver, SessionKind};
//! use paddock::providers::OpenF1Provider;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> paddock::Result<()> {
//! let resolver = ResultsResolver::new(OpenF1Provider::new()?, ResolverConfig::default());
//! let race = resolver.latest(Some(SessionKind::Race)).await;
//! for entry in &race.entries {
//!     println!("{:>2} {:<20} {}", entry.position, entry.driver, entry.time);
//! }
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Datelike, Utc};
use tracing::{debug, info, warn};

use crate::aggregate::LapSummary;
use crate::classify::{self, RaceInputs};
use crate::config::ResolverConfig;
use crate::provider::{Collection, Provider};
use crate::selector::SessionSelector;
use crate::types::{DriverLookup, Session, SessionClassification, SessionKind};
use crate::{Result, ResultsError};

/// Resolves session classifications from a timing data provider
#[derive(Debug, Clone)]
pub struct ResultsResolver<P: Provider> {
    provider: P,
    config: ResolverConfig,
    /// Fixed reference instant; the wall clock when unset
    now: Option<DateTime<Utc>>,
}

impl<P: Provider> ResultsResolver<P> {
    pub fn new(provider: P, config: ResolverConfig) -> Self {
        Self { provider, config, now: None }
    }

    /// Pin the reference instant used for selection and placeholder dates.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    fn now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }

    /// Season the resolver reports on.
    pub fn year(&self) -> i32 {
        self.config.year.unwrap_or_else(|| self.now().year())
    }

    fn selector(&self) -> SessionSelector {
        SessionSelector::new(self.config.selection, self.now())
    }

    /// Classification of the most recent session of `kind`, or of the
    /// preferred kind when `kind` is `None`.
    pub async fn try_latest(&self, kind: Option<SessionKind>) -> Result<SessionClassification> {
        let year = self.year();
        info!(year, kind = ?kind, "Resolving latest session results");

        let sessions = self.provider.sessions(year).await?;
        debug!(year, sessions = sessions.len(), "Fetched season sessions");

        let session = self.selector().select(&sessions, kind, year)?;
        self.classify_session(session).await
    }

    /// Like [`try_latest`](Self::try_latest), but never fails: any error is
    /// logged and replaced by placeholder data flagged `synthetic`.
    pub async fn latest(&self, kind: Option<SessionKind>) -> SessionClassification {
        match self.try_latest(kind).await {
            Ok(classification) => classification,
            Err(error) => {
                self.log_fallback(&error);
                SessionClassification::placeholder(self.now())
            }
        }
    }

    /// Classifications of every practice segment of the most recent
    /// practice meeting, in segment order.
    ///
    /// With `segment` set only that segment is classified; a segment the
    /// meeting does not have yields an empty list.
    pub async fn try_practice(&self, segment: Option<u8>) -> Result<Vec<SessionClassification>> {
        let year = self.year();
        info!(year, ?segment, "Resolving practice results");

        let sessions = self.provider.sessions(year).await?;
        let meeting = self.selector().practice_meeting(&sessions, segment, year)?;

        let mut classifications = Vec::with_capacity(meeting.len());
        for session in meeting {
            classifications.push(self.classify_session(session).await?);
        }
        Ok(classifications)
    }

    /// Like [`try_practice`](Self::try_practice), but never fails: any error
    /// yields a single placeholder classification.
    pub async fn practice(&self, segment: Option<u8>) -> Vec<SessionClassification> {
        match self.try_practice(segment).await {
            Ok(classifications) => classifications,
            Err(error) => {
                self.log_fallback(&error);
                vec![SessionClassification::placeholder(self.now())]
            }
        }
    }

    /// Fetch and classify one already-selected session.
    pub async fn classify_session(&self, session: &Session) -> Result<SessionClassification> {
        let key = session.session_key;
        let policy = self.config.missing_driver;
        let kind = session.kind().ok_or_else(|| {
            ResultsError::parse(
                "session selection",
                format!("session {key} has unsupported type '{}'", session.session_type),
            )
        })?;

        debug!(session_key = key, %kind, name = %session.display_name(), "Classifying session");

        let classification = match kind {
            SessionKind::Race | SessionKind::Sprint => {
                let positions = self.provider.positions(key).await?;
                let drivers = DriverLookup::new(self.provider.drivers(key).await?);
                let laps = recover_auxiliary(Collection::Laps, key, self.provider.laps(key).await);
                let intervals =
                    recover_auxiliary(Collection::Intervals, key, self.provider.intervals(key).await);
                let laps = LapSummary::from_laps(&laps);

                let inputs = RaceInputs {
                    positions: &positions,
                    drivers: &drivers,
                    laps: &laps,
                    intervals: &intervals,
                };
                classify::race(session, inputs, policy)
            }
            SessionKind::Qualifying => {
                let drivers = DriverLookup::new(self.provider.drivers(key).await?);
                let official = recover_auxiliary(
                    Collection::OfficialResults,
                    key,
                    self.provider.official_results(key).await,
                );
                let laps = recover_auxiliary(Collection::Laps, key, self.provider.laps(key).await);
                classify::qualifying(session, &official, &drivers, &LapSummary::from_laps(&laps), policy)
            }
            SessionKind::Practice => {
                let drivers = DriverLookup::new(self.provider.drivers(key).await?);
                let laps = recover_auxiliary(Collection::Laps, key, self.provider.laps(key).await);
                classify::practice(session, &drivers, &LapSummary::from_laps(&laps), policy)
            }
        };

        info!(
            session_key = key,
            name = %classification.name,
            entries = classification.len(),
            "Resolved session results"
        );
        Ok(classification)
    }

    fn log_fallback(&self, error: &ResultsError) {
        if error.falls_back_to_placeholder() {
            warn!(
                error = %error,
                retryable = error.is_retryable(),
                "Results unavailable, returning placeholder data"
            );
        } else {
            tracing::error!(error = ?error, "Unexpected error, returning placeholder data");
        }
    }
}

/// Degrade a failed auxiliary fetch to an empty collection.
fn recover_auxiliary<T>(collection: Collection, session_key: u32, fetched: Result<Vec<T>>) -> Vec<T> {
    match fetched {
        Ok(rows) => rows,
        Err(error) => {
            let missing = ResultsError::auxiliary_missing(collection, error.to_string());
            warn!(session_key, error = %missing, "Continuing without {}", collection);
            Vec::new()
        }
    }
}
