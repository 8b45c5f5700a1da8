//! Driver identity records
//!
//! Every sample must resolve to a driver before it can appear in a classification.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Static driver identity for a session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Driver {
    /// Race number
    pub driver_number: u32,
    /// Full display name
    pub full_name: String,
    /// Team name
    ///
    /// **Note**: OpenF1 publishes `null` for some reserve drivers; those resolve to an empty name.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub team_name: String,
    /// Three-letter acronym
    #[serde(default)]
    pub name_acronym: Option<String>,
    /// Team colour (hex, no leading `#`)
    #[serde(default)]
    pub team_colour: Option<String>,
    #[serde(default)]
    pub session_key: Option<u32>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Drivers of one session indexed by race number
#[derive(Debug, Clone, Default)]
pub struct DriverLookup {
    drivers: HashMap<u32, Driver>,
}

impl DriverLookup {
    /// Index drivers by number; a repeated number keeps the last record.
    pub fn new(drivers: Vec<Driver>) -> Self {
        let drivers = drivers.into_iter().map(|d| (d.driver_number, d)).collect();
        Self { drivers }
    }

    pub fn get(&self, driver_number: u32) -> Option<&Driver> {
        self.drivers.get(&driver_number)
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }
}
