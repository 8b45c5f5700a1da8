//! Session records and session kinds

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ResultsError;

/// Kind of on-track session a classification is built for.
///
/// Sprints share the `"Race"` session type upstream and are told apart by
/// their `"Sprint"` session name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    Race,
    Qualifying,
    Sprint,
    Practice,
}

impl SessionKind {
    /// Selection preference when no kind is requested.
    pub const PREFERENCE: [SessionKind; 4] =
        [SessionKind::Race, SessionKind::Qualifying, SessionKind::Sprint, SessionKind::Practice];

    /// Classify upstream `session_type`/`session_name` labels.
    pub fn from_labels(session_type: &str, session_name: &str) -> Option<Self> {
        match session_type {
            "Race" if session_name == "Sprint" => Some(SessionKind::Sprint),
            "Race" => Some(SessionKind::Race),
            "Qualifying" => Some(SessionKind::Qualifying),
            "Practice" => Some(SessionKind::Practice),
            _ => None,
        }
    }

    /// Whether finishing positions score championship points.
    pub fn awards_points(self) -> bool {
        matches!(self, SessionKind::Race | SessionKind::Sprint)
    }

    /// Human label used in logs and messages.
    pub fn label(self) -> &'static str {
        match self {
            SessionKind::Race => "Race",
            SessionKind::Qualifying => "Qualifying",
            SessionKind::Sprint => "Sprint",
            SessionKind::Practice => "Practice",
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SessionKind {
    type Err = ResultsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "race" => Ok(SessionKind::Race),
            "qualifying" | "quali" => Ok(SessionKind::Qualifying),
            "sprint" => Ok(SessionKind::Sprint),
            "practice" => Ok(SessionKind::Practice),
            other => Err(ResultsError::parse("session kind", format!("unknown kind '{other}'"))),
        }
    }
}

/// One timed on-track segment as published by the timing provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    /// Provider key used to fetch the session's collections
    pub session_key: u32,
    /// Race weekend the session belongs to
    #[serde(default)]
    pub meeting_key: Option<u32>,
    /// Upstream category (`Race`, `Qualifying`, `Practice`)
    pub session_type: String,
    /// Upstream label (`Race`, `Sprint`, `Practice 1`, ...)
    pub session_name: String,
    #[serde(default)]
    pub country_name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub circuit_short_name: Option<String>,
    pub date_start: DateTime<Utc>,
    #[serde(default)]
    pub date_end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub year: Option<i32>,
}

impl Session {
    /// Session kind, or `None` for session types the resolver does not report on.
    pub fn kind(&self) -> Option<SessionKind> {
        SessionKind::from_labels(&self.session_type, &self.session_name)
    }

    /// Display name: `"<country> Grand Prix"`, `"<country> Sprint"` or `"<country> <session name>"`.
    pub fn display_name(&self) -> String {
        match self.kind() {
            Some(SessionKind::Race) => format!("{} Grand Prix", self.country_name),
            Some(SessionKind::Sprint) => format!("{} Sprint", self.country_name),
            _ => format!("{} {}", self.country_name, self.session_name),
        }
    }

    /// End of the session, falling back to the start when no end is published.
    pub fn finished_at(&self) -> DateTime<Utc> {
        self.date_end.unwrap_or(self.date_start)
    }

    /// Whether the session ended strictly before `now`.
    pub fn is_completed(&self, now: DateTime<Utc>) -> bool {
        self.finished_at() < now
    }

    /// Practice segment number parsed from names like `"Practice 2"`.
    pub fn practice_segment(&self) -> Option<u8> {
        if self.kind() != Some(SessionKind::Practice) {
            return None;
        }
        self.session_name.split_whitespace().last().and_then(|n| n.parse().ok())
    }
}
