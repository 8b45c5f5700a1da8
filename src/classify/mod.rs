//! Classification builders
//!
//! Turn aggregated timing data into ranked [`SessionClassification`]s. One
//! builder per session family:
//!
//! - [`race`] for races and sprints (positions, points, gaps)
//! - [`qualifying`] from official results, falling back to lap times
//! - [`practice`] ranked purely by fastest lap
//!
//! Builders never fetch anything; the resolver hands them already-reduced
//! data.

pub mod practice;
pub mod qualifying;
pub mod race;

pub use practice::practice;
pub use qualifying::qualifying;
pub use race::{RaceInputs, race};

use tracing::warn;

use crate::config::MissingDriverPolicy;
use crate::types::{ClassificationEntry, DriverLookup, Session, SessionClassification, SessionKind};

/// Championship points for positions 1 through 10.
pub const POINTS_TABLE: [u32; 10] = [25, 18, 15, 12, 10, 8, 6, 4, 2, 1];

/// Points scored for finishing `position` in a session of `kind`.
///
/// Only races and sprints score; everything past tenth scores nothing.
pub fn points_for(kind: SessionKind, position: u32) -> u32 {
    if !kind.awards_points() || position == 0 {
        return 0;
    }
    POINTS_TABLE.get(position as usize - 1).copied().unwrap_or(0)
}

/// Driver name and team resolved for an entry.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Identity {
    pub name: String,
    pub team: String,
}

/// Resolve a driver number to a display identity under `policy`.
///
/// `None` means the driver is dropped from the classification.
pub(crate) fn identify(
    drivers: &DriverLookup,
    driver_number: u32,
    policy: MissingDriverPolicy,
    session_key: u32,
) -> Option<Identity> {
    if let Some(driver) = drivers.get(driver_number) {
        return Some(Identity { name: driver.full_name.clone(), team: driver.team_name.clone() });
    }

    match policy {
        MissingDriverPolicy::Drop => {
            warn!(driver_number, session_key, "Driver missing from driver list, dropping entry");
            None
        }
        MissingDriverPolicy::Placeholder => {
            warn!(driver_number, session_key, "Driver missing from driver list, keeping placeholder");
            Some(Identity { name: format!("Unknown driver #{driver_number}"), team: String::new() })
        }
    }
}

/// Empty classification carrying the session's metadata.
pub(crate) fn shell(session: &Session, kind: SessionKind) -> SessionClassification {
    SessionClassification {
        name: session.display_name(),
        kind,
        date: session.date_start,
        location: session.location.clone(),
        entries: Vec::new(),
        synthetic: false,
    }
}

/// Number drivers `1..N` in the given order, skipping unresolvable ones
/// before numbering so positions stay dense.
pub(crate) fn dense_ranking<F>(
    ranked: &[(u32, f64)],
    drivers: &DriverLookup,
    policy: MissingDriverPolicy,
    session_key: u32,
    mut row: F,
) -> Vec<ClassificationEntry>
where
    F: FnMut(u32, u32, Identity, f64) -> ClassificationEntry,
{
    ranked
        .iter()
        .filter_map(|&(number, time)| {
            identify(drivers, number, policy, session_key).map(|id| (number, id, time))
        })
        .zip(1u32..)
        .map(|((number, identity, time), position)| row(position, number, identity, time))
        .collect()
}
