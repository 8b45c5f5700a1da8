//! Qualifying classification

use tracing::{debug, warn};

use super::{dense_ranking, identify, shell};
use crate::aggregate::LapSummary;
use crate::config::MissingDriverPolicy;
use crate::timing::format_lap_time;
use crate::types::{
    ClassificationEntry, DriverLookup, OfficialResult, Session, SessionClassification, SessionKind,
};

/// Build a qualifying classification.
///
/// Official results are authoritative: position from the record, time from
/// the furthest phase reached. When no official record carries a position,
/// drivers are ranked by their fastest lap instead. Either way the best time
/// lands in `fastest_lap` and `time` stays empty.
pub fn qualifying(
    session: &Session,
    official: &[OfficialResult],
    drivers: &DriverLookup,
    laps: &LapSummary,
    policy: MissingDriverPolicy,
) -> SessionClassification {
    let mut entries: Vec<ClassificationEntry> = official
        .iter()
        .filter_map(|record| {
            let position = record.position?;
            let identity = identify(drivers, record.driver_number, policy, session.session_key)?;
            Some(ClassificationEntry {
                position,
                driver_number: record.driver_number,
                driver: identity.name,
                team: identity.team,
                time: String::new(),
                points: 0,
                fastest_lap: record.best_phase_time().map(format_lap_time).unwrap_or_default(),
            })
        })
        .collect();

    if entries.is_empty() {
        if !official.is_empty() {
            warn!(
                session_key = session.session_key,
                records = official.len(),
                "Official results carry no positions, ranking by lap times"
            );
        }
        entries = dense_ranking(
            &laps.ranked_by_fastest(),
            drivers,
            policy,
            session.session_key,
            |position, driver_number, identity, best| ClassificationEntry {
                position,
                driver_number,
                driver: identity.name,
                team: identity.team,
                time: String::new(),
                points: 0,
                fastest_lap: format_lap_time(best),
            },
        );
    } else {
        entries.sort_by_key(|e| e.position);
    }

    debug!(
        session_key = session.session_key,
        official = official.len(),
        entries = entries.len(),
        "Built qualifying classification"
    );

    SessionClassification { entries, ..shell(session, SessionKind::Qualifying) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{driver, lap, official, session};

    fn grid() -> DriverLookup {
        DriverLookup::new(vec![
            driver(1, "Max Verstappen", "Red Bull Racing"),
            driver(4, "Lando Norris", "McLaren"),
            driver(16, "Charles Leclerc", "Ferrari"),
            driver(81, "Oscar Piastri", "McLaren"),
        ])
    }

    fn quali_session() -> Session {
        session(9004, "Qualifying", "Qualifying", "2025-04-12T16:00:00Z")
    }

    #[test]
    fn official_results_rank_by_record_position() {
        let records = vec![
            official(4, Some(2), vec![Some(91.0), Some(90.4), Some(90.1)]),
            official(81, Some(1), vec![Some(91.2), Some(90.5), Some(89.9)]),
            official(1, Some(4), vec![Some(91.8), None, None]),
            official(16, Some(3), vec![Some(91.5), Some(90.9), None]),
        ];

        let result = qualifying(
            &quali_session(),
            &records,
            &grid(),
            &LapSummary::empty(),
            MissingDriverPolicy::Drop,
        );

        let best: Vec<&str> = result.entries.iter().map(|e| e.fastest_lap.as_str()).collect();
        assert_eq!(best, vec!["1:29.900", "1:30.100", "1:30.900", "1:31.800"]);
        assert!(result.entries.iter().all(|e| e.time.is_empty() && e.points == 0));
        assert_eq!(result.name, "Bahrain Qualifying");
        assert_eq!(result.pole_gaps(), vec!["pole", "+0.200", "+1.000", "+1.900"]);
    }

    #[test]
    fn records_without_position_are_skipped() {
        let records = vec![
            official(81, Some(1), vec![Some(89.9)]),
            official(1, None, vec![None, None, None]),
        ];
        let result = qualifying(
            &quali_session(),
            &records,
            &grid(),
            &LapSummary::empty(),
            MissingDriverPolicy::Drop,
        );
        assert_eq!(result.len(), 1);
        assert_eq!(result.entries[0].driver_number, 81);
    }

    #[test]
    fn falls_back_to_fastest_laps_without_official_data() {
        let laps = LapSummary::from_laps(&[
            lap(16, Some(90.9)),
            lap(81, Some(89.9)),
            lap(99, Some(89.0)),
            lap(1, None),
            lap(4, Some(90.1)),
        ]);

        let result = qualifying(&quali_session(), &[], &grid(), &laps, MissingDriverPolicy::Drop);

        let order: Vec<(u32, u32)> =
            result.entries.iter().map(|e| (e.position, e.driver_number)).collect();
        assert_eq!(order, vec![(1, 81), (2, 4), (3, 16)]);
        assert_eq!(result.entries[0].fastest_lap, "1:29.900");
    }
}
