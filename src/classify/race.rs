//! Race and sprint classification

use std::collections::HashMap;
use tracing::debug;

use super::{identify, points_for, shell};
use crate::aggregate::{LapSummary, latest_intervals, latest_positions};
use crate::config::MissingDriverPolicy;
use crate::timing::{format_gap, format_lap_time};
use crate::types::{
    ClassificationEntry, DriverLookup, GapValue, IntervalSample, PositionSample, Session,
    SessionClassification, SessionKind,
};

/// Data a race classification is built from.
#[derive(Debug, Clone, Copy)]
pub struct RaceInputs<'a> {
    pub positions: &'a [PositionSample],
    pub drivers: &'a DriverLookup,
    pub laps: &'a LapSummary,
    pub intervals: &'a [IntervalSample],
}

/// Build a race or sprint classification.
///
/// Final positions come from each driver's latest position sample. A driver
/// missing from the driver list is handled per `policy`; dropped drivers
/// leave their position unused rather than renumbering the field.
pub fn race(
    session: &Session,
    inputs: RaceInputs<'_>,
    policy: MissingDriverPolicy,
) -> SessionClassification {
    let kind = match session.kind() {
        Some(SessionKind::Sprint) => SessionKind::Sprint,
        _ => SessionKind::Race,
    };
    let intervals = latest_intervals(inputs.intervals);
    let leader_total = inputs.laps.leader_total();

    let mut entries: Vec<ClassificationEntry> = latest_positions(inputs.positions)
        .into_iter()
        .filter_map(|sample| {
            let number = sample.driver_number;
            let identity = identify(inputs.drivers, number, policy, session.session_key)?;
            Some(ClassificationEntry {
                position: sample.position,
                driver_number: number,
                driver: identity.name,
                team: identity.team,
                time: time_display(sample.position, number, inputs.laps, leader_total, &intervals),
                points: points_for(kind, sample.position),
                fastest_lap: inputs.laps.fastest(number).map(format_lap_time).unwrap_or_default(),
            })
        })
        .collect();
    entries.sort_by_key(|e| e.position);

    debug!(
        session_key = session.session_key,
        kind = %kind,
        entries = entries.len(),
        "Built race classification"
    );

    SessionClassification { entries, ..shell(session, kind) }
}

/// Time column for one driver: total for the winner, gap for the rest.
fn time_display(
    position: u32,
    driver_number: u32,
    laps: &LapSummary,
    leader_total: Option<f64>,
    intervals: &HashMap<u32, &IntervalSample>,
) -> String {
    if let Some(total) = laps.cumulative(driver_number) {
        if position == 1 {
            return format_lap_time(total);
        }
        if let Some(leader) = leader_total {
            return format_gap(total - leader);
        }
    }

    if position > 1 {
        let gap = intervals.get(&driver_number).and_then(|s| s.gap_to_leader.as_ref());
        match gap {
            Some(GapValue::Seconds(seconds)) => return format_gap(*seconds),
            Some(GapValue::Text(marker)) => return marker.clone(),
            None => {}
        }
    }

    format!("P{position}")
}
