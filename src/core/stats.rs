//! Workout statistics.
//!
//! Summaries over the exercise history for the stats screen and the
//! `stats` command. Everything here is a pure function of the history and
//! the reference date.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Days, Local, NaiveDate};
use serde::Serialize;

use super::progress::ExerciseRecord;

/// Days covered by the recent-activity chart.
pub const RECENT_DAYS: usize = 14;

/// Minutes trained on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub duration_minutes: f64,
}

/// Statistics report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub total_duration_minutes: f64,
    /// Distinct calendar days with at least one session
    pub workout_days: usize,
    pub total_workouts: usize,
    pub avg_duration_minutes: f64,
    /// Oldest first, ending with the reference date
    pub last_14_days: Vec<DailyTotal>,
    /// Mean session minutes per level
    pub level_stats: BTreeMap<u32, f64>,
    /// Total minutes per level
    pub level_totals: BTreeMap<u32, f64>,
}

impl Stats {
    /// Largest daily total in the recent window.
    pub fn busiest_recent_day(&self) -> f64 {
        self.last_14_days.iter().map(|d| d.duration_minutes).fold(0.0, f64::max)
    }
}

/// Statistics calculator.
pub struct StatsAggregator;

impl StatsAggregator {
    /// Calculate statistics relative to `today`.
    pub fn calculate(history: &[ExerciseRecord], today: NaiveDate) -> Stats {
        let last_14_days = Self::daily_totals(history, today, RECENT_DAYS);

        if history.is_empty() {
            return Stats {
                total_duration_minutes: 0.0,
                workout_days: 0,
                total_workouts: 0,
                avg_duration_minutes: 0.0,
                last_14_days,
                level_stats: BTreeMap::new(),
                level_totals: BTreeMap::new(),
            };
        }

        let total_duration_minutes: f64 = history.iter().map(ExerciseRecord::duration_minutes).sum();
        let workout_days = history.iter().map(|r| r.date.date()).collect::<BTreeSet<_>>().len();

        let mut level_totals: BTreeMap<u32, f64> = BTreeMap::new();
        let mut level_counts: BTreeMap<u32, u32> = BTreeMap::new();
        for record in history {
            *level_totals.entry(record.level).or_default() += record.duration_minutes();
            *level_counts.entry(record.level).or_default() += 1;
        }

        let level_stats = level_totals
            .iter()
            .map(|(level, total)| {
                let count = level_counts.get(level).copied().unwrap_or(1).max(1);
                (*level, total / f64::from(count))
            })
            .collect();

        Stats {
            total_duration_minutes,
            workout_days,
            total_workouts: history.len(),
            avg_duration_minutes: total_duration_minutes / history.len() as f64,
            last_14_days,
            level_stats,
            level_totals,
        }
    }

    /// Calculate statistics relative to the local date.
    pub fn calculate_now(history: &[ExerciseRecord]) -> Stats {
        Self::calculate(history, Local::now().date_naive())
    }

    /// The last `n` sessions, oldest first.
    pub fn recent_sessions(history: &[ExerciseRecord], n: usize) -> &[ExerciseRecord] {
        &history[history.len().saturating_sub(n)..]
    }

    /// Per-day minutes for the `days` days ending on `today`.
    fn daily_totals(history: &[ExerciseRecord], today: NaiveDate, days: usize) -> Vec<DailyTotal> {
        (0..days)
            .rev()
            .map(|offset| {
                let date = today.checked_sub_days(Days::new(offset as u64)).unwrap_or(NaiveDate::MIN);
                let duration_minutes = history
                    .iter()
                    .filter(|r| r.date.date() == date)
                    .map(ExerciseRecord::duration_minutes)
                    .sum();
                DailyTotal { date, duration_minutes }
            })
            .collect()
    }
}

/// Format minutes as `1h 05m`, or `12m` under an hour.
pub fn format_minutes(minutes: f64) -> String {
    let total = minutes.max(0.0).round() as u64;
    if total > 60 {
        format!("{}h {:02}m", total / 60, total % 60)
    } else {
        format!("{total}m")
    }
}
