//! Per-driver timing samples
//!
//! Rows arrive unordered and repeated per driver; the aggregator reduces them
//! to one value per driver.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A sample tagged with a driver and the instant it was recorded.
pub trait TimedSample {
    fn driver_number(&self) -> u32;
    fn timestamp(&self) -> DateTime<Utc>;
}

/// Running position of a driver at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PositionSample {
    pub driver_number: u32,
    pub date: DateTime<Utc>,
    pub position: u32,
    #[serde(default)]
    pub session_key: Option<u32>,
}

impl TimedSample for PositionSample {
    fn driver_number(&self) -> u32 {
        self.driver_number
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.date
    }
}

/// One completed (or aborted) lap.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LapSample {
    pub driver_number: u32,
    #[serde(default)]
    pub lap_number: Option<u32>,
    #[serde(default)]
    pub date_start: Option<DateTime<Utc>>,
    /// Lap time in seconds; absent for out-laps and incomplete laps
    #[serde(default)]
    pub lap_duration: Option<f64>,
    #[serde(default)]
    pub session_key: Option<u32>,
}

impl LapSample {
    /// Lap duration when it is a usable, strictly positive time.
    pub fn valid_duration(&self) -> Option<f64> {
        self.lap_duration.filter(|d| d.is_finite() && *d > 0.0)
    }
}

/// Gap value as published: seconds, or a marker such as `"+1 LAP"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum GapValue {
    Seconds(f64),
    Text(String),
}

/// Interval and gap-to-leader of a driver at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntervalSample {
    pub driver_number: u32,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub gap_to_leader: Option<GapValue>,
    #[serde(default)]
    pub interval: Option<GapValue>,
    #[serde(default)]
    pub session_key: Option<u32>,
}

impl TimedSample for IntervalSample {
    fn driver_number(&self) -> u32 {
        self.driver_number
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.date
    }
}
