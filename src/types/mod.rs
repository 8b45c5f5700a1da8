//! Core types for timing data and classifications.
//!
//! Provider responses are mapped to explicit typed records once, at the
//! provider boundary; everything downstream works on these types.
//!
//! ## Inputs
//! - [`Session`] and [`SessionKind`] describe what can be reported on
//! - [`PositionSample`], [`LapSample`] and [`IntervalSample`] are the raw per-driver rows
//! - [`Driver`] resolves a race number to a name and team
//! - [`OfficialResult`] is the authoritative result feed
//!
//! ## Outputs
//! - [`ClassificationEntry`] and [`SessionClassification`]
//!
//! ## Usage Example
//!
//! ```rust
//! use paddock::types::{Session, SessionKind};
//!
//! let session: Session = serde_json::from_str(r#"{
//!     "session_key": 9005, "meeting_key": 1250,
//!     "session_type": "Race", "session_name": "Sprint",
//!     "country_name": "China", "location": "Shanghai",
//!     "date_start": "2025-03-22T03:00:00+00:00",
//!     "date_end": "2025-03-22T04:00:00+00:00"
//! }"#).unwrap();
//!
//! assert_eq!(session.kind(), Some(SessionKind::Sprint));
//! assert_eq!(session.display_name(), "China Sprint");
//! ```

mod classification;
mod driver;
mod official;
mod sample;
mod session;

pub use classification::{ClassificationEntry, PLACEHOLDER_NAME, SessionClassification};
pub use driver::{Driver, DriverLookup};
pub use official::{OfficialResult, ResultDuration};
pub use sample::{GapValue, IntervalSample, LapSample, PositionSample, TimedSample};
pub use session::{Session, SessionKind};
