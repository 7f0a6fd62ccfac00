//! Hunt session records and their derived views.
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{LogRecord, ValidationError, non_negative};

/// A single timed play session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HuntRecord {
    pub date: NaiveDate,
    pub location: String,
    pub duration_minutes: i64,
    pub profit: i64,
    /// Zero when no level-up happened during the session.
    pub levels_gained: i64,
    pub notes: String,
}

impl LogRecord for HuntRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn validate(&self) -> Result<(), ValidationError> {
        non_negative("duration_minutes", self.duration_minutes)?;
        non_negative("profit", self.profit)?;
        non_negative("levels_gained", self.levels_gained)
    }
}

/// First day of the calendar week used by weekly views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    /// Sunday-to-Saturday weeks.
    #[default]
    Sunday,
    /// Monday-to-Sunday weeks.
    Monday,
}

/// Inclusive `(start, end)` bounds of the week containing `reference`.
///
/// The start is the most recent week-start day on or before `reference`;
/// a reference that is itself the week-start day begins its own week.
#[must_use]
pub fn week_bounds(reference: NaiveDate, week_start: WeekStart) -> (NaiveDate, NaiveDate) {
    let offset = match week_start {
        WeekStart::Sunday => reference.weekday().num_days_from_sunday(),
        WeekStart::Monday => reference.weekday().num_days_from_monday(),
    };
    let start = reference - Days::new(u64::from(offset));
    (start, start + Days::new(6))
}

/// Subset of `records` whose date falls inside the week containing
/// `reference`.
#[must_use]
pub fn filter_by_week(
    records: &[HuntRecord],
    reference: NaiveDate,
    week_start: WeekStart,
) -> Vec<HuntRecord> {
    let (start, end) = week_bounds(reference, week_start);
    records
        .iter()
        .filter(|r| r.date >= start && r.date <= end)
        .cloned()
        .collect()
}

/// Subset of `records` dated exactly `day`.
#[must_use]
pub fn filter_by_day(records: &[HuntRecord], day: NaiveDate) -> Vec<HuntRecord> {
    records.iter().filter(|r| r.date == day).cloned().collect()
}

/// Records sorted by date ascending, ties kept in insertion order.
#[must_use]
pub fn sorted_by_date(records: &[HuntRecord]) -> Vec<HuntRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by_key(|r| r.date);
    sorted
}

/// Running profit total per session, date ascending.
#[must_use]
pub fn cumulative_profit(records: &[HuntRecord]) -> Vec<(NaiveDate, i64)> {
    let mut running = 0_i64;
    sorted_by_date(records)
        .into_iter()
        .map(|r| {
            running += r.profit;
            (r.date, running)
        })
        .collect()
}

/// Character level after each recorded session, date ascending.
#[must_use]
pub fn level_timeline(records: &[HuntRecord], initial_level: i64) -> Vec<(NaiveDate, i64)> {
    let mut level = initial_level;
    sorted_by_date(records)
        .into_iter()
        .map(|r| {
            level += r.levels_gained;
            (r.date, level)
        })
        .collect()
}

/// Current character level: the configured starting level plus every
/// recorded gain.
#[must_use]
pub fn current_level(records: &[HuntRecord], initial_level: i64) -> i64 {
    initial_level + records.iter().map(|r| r.levels_gained).sum::<i64>()
}

/// Play-time and profit totals for a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub total_minutes: i64,
    pub total_profit: i64,
    pub sessions: usize,
}

/// Aggregate one day's sessions; `None` when nothing was recorded that day.
#[must_use]
pub fn day_summary(records: &[HuntRecord], day: NaiveDate) -> Option<DaySummary> {
    let picked = filter_by_day(records, day);
    if picked.is_empty() {
        return None;
    }
    Some(DaySummary {
        date: day,
        total_minutes: picked.iter().map(|r| r.duration_minutes).sum(),
        total_profit: picked.iter().map(|r| r.profit).sum(),
        sessions: picked.len(),
    })
}

/// Hours/minutes breakdown used by the history table.
#[must_use]
pub fn format_duration(minutes: i64) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours > 0 {
        format!("{hours}h {mins}min")
    } else {
        format!("{mins}min")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn hunt_on(date: NaiveDate, profit: i64, levels: i64) -> HuntRecord {
        HuntRecord {
            date,
            location: "Pits".to_string(),
            duration_minutes: 90,
            profit,
            levels_gained: levels,
            notes: String::new(),
        }
    }

    #[test]
    fn week_bounds_start_on_the_most_recent_sunday() {
        // 2025-08-06 is a Wednesday; the containing week is Aug 3 - Aug 9.
        let (start, end) = week_bounds(day(2025, 8, 6), WeekStart::Sunday);
        assert_eq!(start, day(2025, 8, 3));
        assert_eq!(end, day(2025, 8, 9));
    }

    #[test]
    fn week_bounds_treat_a_sunday_reference_as_its_own_start() {
        let sunday = day(2025, 8, 3);
        let (start, end) = week_bounds(sunday, WeekStart::Sunday);
        assert_eq!(start, sunday);
        assert_eq!(end, day(2025, 8, 9));
    }

    #[test]
    fn week_bounds_support_monday_start() {
        let (start, end) = week_bounds(day(2025, 8, 3), WeekStart::Monday);
        assert_eq!(start, day(2025, 7, 28));
        assert_eq!(end, day(2025, 8, 3));
    }

    #[test]
    fn filter_by_week_keeps_only_the_containing_week() {
        let records = vec![
            hunt_on(day(2025, 8, 2), 10, 0),  // Saturday before
            hunt_on(day(2025, 8, 3), 20, 0),  // Sunday start
            hunt_on(day(2025, 8, 9), 30, 0),  // Saturday end
            hunt_on(day(2025, 8, 10), 40, 0), // Sunday after
        ];
        let week = filter_by_week(&records, day(2025, 8, 3), WeekStart::Sunday);
        let profits: Vec<i64> = week.iter().map(|r| r.profit).collect();
        assert_eq!(profits, vec![20, 30]);
    }

    #[test]
    fn filter_by_day_matches_exact_dates() {
        let records = vec![
            hunt_on(day(2025, 8, 3), 10, 0),
            hunt_on(day(2025, 8, 4), 20, 0),
            hunt_on(day(2025, 8, 3), 30, 0),
        ];
        let picked = filter_by_day(&records, day(2025, 8, 3));
        assert_eq!(picked.len(), 2);
        assert!(picked.iter().all(|r| r.date == day(2025, 8, 3)));
        assert!(filter_by_day(&records, day(2025, 8, 5)).is_empty());
    }

    #[test]
    fn cumulative_profit_sorts_by_date_and_is_monotone() {
        let records = vec![
            hunt_on(day(2025, 8, 5), 300, 0),
            hunt_on(day(2025, 8, 3), 100, 0),
            hunt_on(day(2025, 8, 4), 0, 0),
        ];
        let series = cumulative_profit(&records);
        assert_eq!(
            series,
            vec![
                (day(2025, 8, 3), 100),
                (day(2025, 8, 4), 100),
                (day(2025, 8, 5), 400),
            ]
        );
        assert!(series.windows(2).all(|w| w[0].1 <= w[1].1));
    }

    #[test]
    fn cumulative_profit_keeps_insertion_order_on_equal_dates() {
        let same_day = day(2025, 8, 3);
        let records = vec![hunt_on(same_day, 100, 0), hunt_on(same_day, 1, 0)];
        let series = cumulative_profit(&records);
        assert_eq!(series, vec![(same_day, 100), (same_day, 101)]);
    }

    #[test]
    fn level_timeline_accumulates_from_the_initial_level() {
        let records = vec![
            hunt_on(day(2025, 8, 4), 0, 2),
            hunt_on(day(2025, 8, 3), 0, 1),
            hunt_on(day(2025, 8, 5), 0, 0),
        ];
        let timeline = level_timeline(&records, 486);
        assert_eq!(
            timeline,
            vec![
                (day(2025, 8, 3), 487),
                (day(2025, 8, 4), 489),
                (day(2025, 8, 5), 489),
            ]
        );
        assert_eq!(current_level(&records, 486), 489);
    }

    #[test]
    fn current_level_without_records_is_the_initial_level() {
        assert_eq!(current_level(&[], 486), 486);
    }

    #[test]
    fn day_summary_totals_one_day() {
        let records = vec![
            hunt_on(day(2025, 8, 3), 100, 0),
            hunt_on(day(2025, 8, 3), 50, 1),
            hunt_on(day(2025, 8, 4), 999, 0),
        ];
        let summary = day_summary(&records, day(2025, 8, 3)).unwrap();
        assert_eq!(summary.total_minutes, 180);
        assert_eq!(summary.total_profit, 150);
        assert_eq!(summary.sessions, 2);
        assert!(day_summary(&records, day(2025, 8, 6)).is_none());
    }

    #[test]
    fn format_duration_breaks_into_hours_and_minutes() {
        assert_eq!(format_duration(0), "0min");
        assert_eq!(format_duration(59), "59min");
        assert_eq!(format_duration(60), "1h 0min");
        assert_eq!(format_duration(90), "1h 30min");
        assert_eq!(format_duration(125), "2h 5min");
    }

    #[test]
    fn validate_rejects_each_negative_field() {
        let good = hunt_on(day(2025, 8, 3), 0, 0);
        assert!(good.validate().is_ok());

        for (field, mutate) in [
            (
                "duration_minutes",
                Box::new(|r: &mut HuntRecord| r.duration_minutes = -1)
                    as Box<dyn Fn(&mut HuntRecord)>,
            ),
            ("profit", Box::new(|r: &mut HuntRecord| r.profit = -5)),
            (
                "levels_gained",
                Box::new(|r: &mut HuntRecord| r.levels_gained = -2),
            ),
        ] {
            let mut bad = good.clone();
            mutate(&mut bad);
            let err = bad.validate().unwrap_err();
            assert!(
                matches!(err, ValidationError::NegativeField { field: f, .. } if f == field),
                "expected {field} rejection, got {err}"
            );
        }
    }
}
