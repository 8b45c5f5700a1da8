//! Authoritative session result records

use serde::{Deserialize, Serialize};

/// Duration published with an official result.
///
/// Races carry a single total; qualifying carries one slot per phase
/// (`[Q1, Q2, Q3]`), null for phases the driver did not reach.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ResultDuration {
    Total(f64),
    Phases(Vec<Option<f64>>),
}

/// Official per-driver result for a session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OfficialResult {
    pub driver_number: u32,
    /// Classified position; absent for non-starters and disqualifications
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default)]
    pub duration: Option<ResultDuration>,
    #[serde(default)]
    pub number_of_laps: Option<u32>,
    #[serde(default)]
    pub dnf: bool,
    #[serde(default)]
    pub dns: bool,
    #[serde(default)]
    pub dsq: bool,
    #[serde(default)]
    pub session_key: Option<u32>,
}

impl OfficialResult {
    /// Time from the most advanced phase the driver reached (Q3, then Q2, then Q1).
    ///
    /// Null and non-positive slots are skipped.
    pub fn best_phase_time(&self) -> Option<f64> {
        match self.duration.as_ref()? {
            ResultDuration::Total(total) => Some(*total),
            ResultDuration::Phases(slots) => {
                slots.iter().take(3).rev().flatten().copied().find(|t| *t > 0.0)
            }
        }
    }
}
