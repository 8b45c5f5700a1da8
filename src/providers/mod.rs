//! Provider implementations
//!
//! - [`OpenF1Provider`] talks to the public OpenF1 HTTP API
//! - [`MemoryProvider`] serves in-memory or recorded collections for offline use

pub mod memory;
pub mod openf1;

pub use memory::MemoryProvider;
pub use openf1::OpenF1Provider;

use serde::de::DeserializeOwned;

use crate::provider::Collection;
use crate::{Result, ResultsError};

/// Deserialize a JSON array response into typed records.
///
/// A missing required field fails the whole collection here rather than
/// surfacing later during aggregation.
pub fn parse_collection<T: DeserializeOwned>(collection: Collection, body: &str) -> Result<Vec<T>> {
    serde_json::from_str(body)
        .map_err(|e| ResultsError::parse(format!("{collection} response"), e.to_string()))
}
