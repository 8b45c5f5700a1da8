//! Classification output types
//!
//! These are the externally visible artifacts. Rendering (tables, colours,
//! JSON, Markdown) belongs to the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SessionKind;
use crate::timing::{format_pole_gap, parse_lap_time};

/// Display name used for placeholder classifications.
pub const PLACEHOLDER_NAME: &str = "Mock Grand Prix (API Error)";

/// One driver's final standing in a session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct ClassificationEntry {
    /// 1-based classified position
    pub position: u32,
    pub driver_number: u32,
    pub driver: String,
    pub team: String,
    /// Total time, gap string or `P<n>` placeholder; empty for qualifying
    pub time: String,
    /// Championship points (0 outside races and sprints)
    pub points: u32,
    /// Fastest lap as `M:SS.mmm`, empty when none was recorded
    pub fastest_lap: String,
}

/// Ranked result set for one session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct SessionClassification {
    pub name: String,
    pub kind: SessionKind,
    pub date: DateTime<Utc>,
    pub location: String,
    /// Entries sorted ascending by position
    pub entries: Vec<ClassificationEntry>,
    /// `true` when this is placeholder data rather than a real result
    pub synthetic: bool,
}

impl SessionClassification {
    /// Fixed demonstrative classification returned when real data cannot be resolved.
    pub fn placeholder(date: DateTime<Utc>) -> Self {
        let row = |position, driver: &str, team: &str, time: &str, points, fastest_lap: &str| {
            ClassificationEntry {
                position,
                driver_number: 0,
                driver: driver.to_string(),
                team: team.to_string(),
                time: time.to_string(),
                points,
                fastest_lap: fastest_lap.to_string(),
            }
        };

        Self {
            name: PLACEHOLDER_NAME.to_string(),
            kind: SessionKind::Race,
            date,
            location: "Mock Circuit".to_string(),
            entries: vec![
                row(1, "Max Verstappen", "Red Bull Racing", "1:32:28.851", 25, "1:36.236"),
                row(2, "Sergio Pérez", "Red Bull Racing", "+22.896", 18, ""),
                row(3, "Charles Leclerc", "Ferrari", "+34.808", 15, ""),
                row(4, "Carlos Sainz", "Ferrari", "+47.036", 12, ""),
                row(5, "Lando Norris", "McLaren", "+1:13.715", 10, ""),
            ],
            synthetic: true,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Gap-to-pole column, one string per entry in entry order.
    ///
    /// The pole sitter shows `"pole"`; everyone else shows `+<seconds>` with
    /// three decimals computed from the `fastest_lap` strings. Unparseable
    /// times produce an empty string.
    pub fn pole_gaps(&self) -> Vec<String> {
        let pole_time = self
            .entries
            .iter()
            .find(|e| e.position == 1)
            .and_then(|e| parse_lap_time(&e.fastest_lap));

        self.entries
            .iter()
            .map(|entry| {
                if entry.position == 1 {
                    return "pole".to_string();
                }
                match (pole_time, parse_lap_time(&entry.fastest_lap)) {
                    (Some(pole), Some(time)) => format_pole_gap(time - pole),
                    _ => String::new(),
                }
            })
            .collect()
    }

    /// Entry holding the quickest fastest lap of the session.
    pub fn overall_fastest_lap(&self) -> Option<&ClassificationEntry> {
        self.entries
            .iter()
            .filter_map(|e| parse_lap_time(&e.fastest_lap).map(|t| (t, e)))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, entry)| entry)
    }

    /// Top three entries (fewer when the classification is shorter).
    pub fn podium(&self) -> &[ClassificationEntry] {
        &self.entries[..self.entries.len().min(3)]
    }

    /// Heading for the top-three summary of this session kind.
    pub fn podium_title(&self) -> &'static str {
        match self.kind {
            SessionKind::Race => "Podium Finishers",
            SessionKind::Qualifying => "Top Qualifiers",
            SessionKind::Sprint => "Sprint Podium",
            SessionKind::Practice => "Top 3 Results",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::entry;

    fn qualifying(entries: Vec<ClassificationEntry>) -> SessionClassification {
        SessionClassification {
            name: "Bahrain Qualifying".to_string(),
            kind: SessionKind::Qualifying,
            date: "2025-04-12T16:00:00Z".parse().unwrap(),
            location: "Sakhir".to_string(),
            entries,
            synthetic: false,
        }
    }

    #[test]
    fn pole_gaps_mark_pole_and_measure_others() {
        let classification = qualifying(vec![
            entry(1, 81, "", "1:29.900"),
            entry(2, 4, "", "1:30.100"),
            entry(3, 16, "", "1:31.000"),
        ]);
        assert_eq!(classification.pole_gaps(), vec!["pole", "+0.200", "+1.100"]);
    }

    #[test]
    fn pole_marker_ignores_pole_time_value() {
        let classification = qualifying(vec![entry(1, 81, "", "no time"), entry(2, 4, "", "1:30.100")]);
        assert_eq!(classification.pole_gaps(), vec!["pole", ""]);
    }

    #[test]
    fn malformed_times_yield_empty_gap() {
        let classification = qualifying(vec![
            entry(1, 81, "", "1:29.900"),
            entry(2, 4, "", "90.1"),
            entry(3, 16, "", ""),
        ]);
        assert_eq!(classification.pole_gaps(), vec!["pole", "", ""]);
    }

    #[test]
    fn overall_fastest_lap_picks_minimum() {
        let classification = qualifying(vec![
            entry(1, 81, "", "1:33.100"),
            entry(2, 4, "", "1:32.950"),
            entry(3, 16, "", ""),
        ]);
        assert_eq!(classification.overall_fastest_lap().map(|e| e.driver_number), Some(4));
    }

    #[test]
    fn placeholder_is_flagged_and_populated() {
        let placeholder = SessionClassification::placeholder(Utc::now());
        assert!(placeholder.synthetic);
        assert!(placeholder.name.contains("Mock"));
        assert_eq!(placeholder.len(), 5);
        assert_eq!(placeholder.podium().len(), 3);
        assert_eq!(placeholder.podium_title(), "Podium Finishers");
    }
}
