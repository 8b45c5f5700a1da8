//! Session selection
//!
//! Picks the single session a classification is built for, and the set of
//! practice sessions belonging to the most recent practice meeting.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::SelectionPolicy;
use crate::types::{Session, SessionKind};
use crate::{Result, ResultsError};

/// Chooses sessions relative to a reference instant
#[derive(Debug, Clone, Copy)]
pub struct SessionSelector {
    policy: SelectionPolicy,
    now: DateTime<Utc>,
}

impl SessionSelector {
    pub fn new(policy: SelectionPolicy, now: DateTime<Utc>) -> Self {
        Self { policy, now }
    }

    /// Whether the policy allows reporting on `session`.
    pub fn is_candidate(&self, session: &Session) -> bool {
        match self.policy {
            SelectionPolicy::CompletedOnly => session.is_completed(self.now),
            SelectionPolicy::AllSessions => true,
        }
    }

    /// Candidate sessions, most recent start first.
    fn candidates<'a>(&self, sessions: &'a [Session]) -> Vec<&'a Session> {
        let mut candidates: Vec<&Session> =
            sessions.iter().filter(|s| self.is_candidate(s)).collect();
        // Stable sort keeps upstream order for equal start times
        candidates.sort_by(|a, b| b.date_start.cmp(&a.date_start));
        candidates
    }

    /// Select the session to classify.
    ///
    /// With no `wanted` kind, kinds are tried in [`SessionKind::PREFERENCE`]
    /// order and the most recent candidate of the first kind present wins.
    pub fn select<'a>(
        &self,
        sessions: &'a [Session],
        wanted: Option<SessionKind>,
        year: i32,
    ) -> Result<&'a Session> {
        let candidates = self.candidates(sessions);
        let kinds: &[SessionKind] = match &wanted {
            Some(kind) => std::slice::from_ref(kind),
            None => &SessionKind::PREFERENCE,
        };

        for kind in kinds {
            if let Some(session) = candidates.iter().copied().find(|s| s.kind() == Some(*kind)) {
                debug!(
                    session_key = session.session_key,
                    kind = %kind,
                    name = %session.session_name,
                    candidates = candidates.len(),
                    "Selected session"
                );
                return Ok(session);
            }
        }

        let wanted = match (wanted, self.policy) {
            (Some(kind), _) => kind.label().to_string(),
            (None, SelectionPolicy::CompletedOnly) => "completed".to_string(),
            (None, SelectionPolicy::AllSessions) => "reportable".to_string(),
        };
        Err(ResultsError::no_session_found(year, wanted))
    }

    /// Practice sessions of the most recent meeting that has one.
    ///
    /// Sessions are returned in segment order (FP1, FP2, FP3). With `segment`
    /// set, only that segment is kept; a segment the meeting does not have
    /// yields an empty list.
    pub fn practice_meeting<'a>(
        &self,
        sessions: &'a [Session],
        segment: Option<u8>,
        year: i32,
    ) -> Result<Vec<&'a Session>> {
        let practice: Vec<&Session> = self
            .candidates(sessions)
            .into_iter()
            .filter(|s| s.kind() == Some(SessionKind::Practice))
            .collect();

        let Some(latest) = practice.first() else {
            return Err(ResultsError::no_session_found(year, "practice"));
        };

        let meeting_key = latest.meeting_key;
        let mut meeting: Vec<&Session> = match meeting_key {
            Some(key) => practice.iter().copied().filter(|s| s.meeting_key == Some(key)).collect(),
            None => vec![*latest],
        };
        meeting.sort_by_key(|s| (s.practice_segment().unwrap_or(u8::MAX), s.date_start));

        if let Some(segment) = segment {
            meeting.retain(|s| s.practice_segment() == Some(segment));
        }

        debug!(
            meeting_key = ?meeting_key,
            sessions = meeting.len(),
            ?segment,
            "Selected practice meeting"
        );
        Ok(meeting)
    }
}
