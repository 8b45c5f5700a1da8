//! Practice classification

use tracing::debug;

use super::{dense_ranking, shell};
use crate::aggregate::LapSummary;
use crate::config::MissingDriverPolicy;
use crate::timing::format_lap_time;
use crate::types::{ClassificationEntry, DriverLookup, Session, SessionClassification, SessionKind};

/// Build a practice classification ranked by fastest valid lap.
///
/// No points and no gaps; the driver's best lap is both the time and the
/// fastest lap. Drivers without a valid lap are left out.
pub fn practice(
    session: &Session,
    drivers: &DriverLookup,
    laps: &LapSummary,
    policy: MissingDriverPolicy,
) -> SessionClassification {
    let entries = dense_ranking(
        &laps.ranked_by_fastest(),
        drivers,
        policy,
        session.session_key,
        |position, driver_number, identity, best| {
            let best = format_lap_time(best);
            ClassificationEntry {
                position,
                driver_number,
                driver: identity.name,
                team: identity.team,
                time: best.clone(),
                points: 0,
                fastest_lap: best,
            }
        },
    );

    debug!(
        session_key = session.session_key,
        segment = ?session.practice_segment(),
        entries = entries.len(),
        "Built practice classification"
    );

    SessionClassification { entries, ..shell(session, SessionKind::Practice) }
}
