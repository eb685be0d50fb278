//! Routine generation.
//!
//! Turns a `(level, day)` progression coordinate into a fully parameterised
//! [`Routine`]. Generation is a pure function: the same inputs always give the
//! same routine, so nothing here touches the clock or the filesystem.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Number of pulse sets in every routine.
pub const PULSE_SETS: usize = 3;

/// Rest between pulse sets, in seconds.
pub const PULSE_SET_REST_SECS: f64 = 10.0;

/// Length of a single pulse squeeze, in seconds.
pub const PULSE_SQUEEZE_SECS: f64 = 0.6;

/// Length of a single pulse release, in seconds.
pub const PULSE_RELEASE_SECS: f64 = 0.6;

/// "Get ready" frame shown before each pulse set, in seconds.
pub const PULSE_SET_INTRO_SECS: f64 = 2.0;

/// Hard bounds for the classic hold time.
const MIN_HOLD_SECS: u32 = 4;
const MAX_HOLD_SECS: u32 = 30;

/// Pulse sets never drop below this many reps.
const MIN_PULSE_REPS: u32 = 5;

/// Upper bound on the number of days in a level.
pub const MAX_DAYS_IN_LEVEL: u32 = 12;

/// The exercise plan for one level/day pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Routine {
    /// Progression level (1-based)
    pub level: u32,
    /// Day within the level (1-based)
    pub day: u32,
    /// Seconds to hold each classic squeeze
    pub classic_hold_secs: u32,
    /// Seconds to rest after each classic squeeze
    pub classic_rest_secs: u32,
    /// Number of classic hold/rest repetitions
    pub classic_reps: u32,
    /// Reps in each pulse set, in set order
    pub pulse_set_reps: [u32; PULSE_SETS],
    /// How many days the current level lasts
    pub total_days_in_level: u32,
}

impl Routine {
    /// Total number of pulse reps across all sets.
    pub fn total_pulse_reps(&self) -> u64 {
        self.pulse_set_reps.iter().map(|&reps| u64::from(reps)).sum()
    }

    /// Whether this is the last day of its level.
    pub fn is_last_day(&self) -> bool {
        self.day >= self.total_days_in_level
    }

    /// Planned session length if run without pauses.
    pub fn estimated_duration(&self) -> Duration {
        let classic =
            f64::from(self.classic_reps) * f64::from(self.classic_hold_secs + self.classic_rest_secs);
        let pulses = self.total_pulse_reps() as f64 * (PULSE_SQUEEZE_SECS + PULSE_RELEASE_SECS);
        let intros = PULSE_SETS as f64 * PULSE_SET_INTRO_SECS;
        let set_rests = (PULSE_SETS - 1) as f64 * PULSE_SET_REST_SECS;

        Duration::from_secs_f64(classic + pulses + intros + set_rests)
    }

    /// Pulse reps rendered as `[a, b, c]`.
    pub fn pulse_display(&self) -> String {
        let parts: Vec<String> = self.pulse_set_reps.iter().map(ToString::to_string).collect();
        format!("[{}]", parts.join(", "))
    }
}

/// Routine generator.
///
/// Progression is piecewise by level band. The thresholds below define the
/// difficulty curve and must stay exactly as they are; stored progress from
/// earlier versions depends on them.
pub struct RoutineGenerator;

impl RoutineGenerator {
    /// Generate the routine for a level/day pair.
    ///
    /// Never fails. A zero level or day is treated as 1.
    pub fn generate(level: u32, day: u32) -> Routine {
        let level = level.max(1);
        let day = day.max(1);

        Routine {
            level,
            day,
            classic_hold_secs: Self::classic_hold(level, day),
            classic_rest_secs: Self::classic_rest(level),
            classic_reps: Self::classic_reps(level, day),
            pulse_set_reps: Self::pulse_set_reps(level, day),
            total_days_in_level: Self::days_in_level(level),
        }
    }

    /// Number of days in a level.
    pub fn days_in_level(level: u32) -> u32 {
        match level {
            0..=3 => 5,
            4..=6 => 6,
            7..=10 => 6 + 2.min((level - 6) / 2),
            11..=15 => 7 + 1.min((level - 11) / 4),
            _ => MAX_DAYS_IN_LEVEL.min(8 + (level - 15) / 3),
        }
    }

    /// Seconds to hold each classic squeeze.
    pub fn classic_hold(level: u32, day: u32) -> u32 {
        let hold = if level <= 10 {
            let mut base = 3 + level;
            if level >= 7 && day >= 4 {
                base += 1;
            }
            base
        } else if level <= 14 {
            let mut base = 11 + (level - 10);
            if level == 12 && day >= 4 {
                base += 2;
            }
            base
        } else {
            let mut base = 14 + (level - 14) / 2;
            if day >= Self::days_in_level(level) / 2 {
                base += 1;
            }
            base
        };

        hold.clamp(MIN_HOLD_SECS, MAX_HOLD_SECS)
    }

    /// Seconds to rest between classic squeezes.
    pub fn classic_rest(level: u32) -> u32 {
        if level < 11 {
            4
        } else {
            5
        }
    }

    /// Number of classic repetitions.
    pub fn classic_reps(level: u32, day: u32) -> u32 {
        if level <= 10 {
            return (10 + level).saturating_add(day.saturating_sub(1) / 3);
        }

        match level {
            11 if day >= 6 => 16,
            12 if day <= 3 => 16,
            13 if day == 1 => 15,
            13 => 16,
            14.. => 16,
            _ => 15,
        }
    }

    /// Reps for each pulse set.
    ///
    /// Counts saturate at `u32::MAX` for extreme inputs. Later sets lag the day progression by one and two steps, so difficulty
    /// ramps set by set across the level instead of uniformly.
    pub fn pulse_set_reps(level: u32, day: u32) -> [u32; PULSE_SETS] {
        let base = if level <= 10 {
            10 + 2 * level
        } else {
            (level - 10).saturating_mul(2).saturating_add(25)
        };
        let day_adjustment = day.saturating_sub(1) / 2;

        let mut sets = [0; PULSE_SETS];
        for (set, reps) in sets.iter_mut().enumerate() {
            let lag = set as u32;
            *reps = MIN_PULSE_REPS.max(base.saturating_add(day_adjustment.saturating_sub(lag)));
        }
        sets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_day_routine() {
        let routine = RoutineGenerator::generate(1, 1);
        assert_eq!(routine.classic_hold_secs, 4);
        assert_eq!(routine.classic_rest_secs, 4);
        assert_eq!(routine.classic_reps, 11);
        assert_eq!(routine.pulse_set_reps, [12, 12, 12]);
        assert_eq!(routine.total_days_in_level, 5);
    }

    #[test]
    fn test_level_eleven_override() {
        let routine = RoutineGenerator::generate(11, 6);
        assert_eq!(routine.classic_reps, 16);
        assert_eq!(routine.classic_rest_secs, 5);

        assert_eq!(RoutineGenerator::classic_reps(11, 5), 15);
    }

    #[test]
    fn test_classic_reps_overrides() {
        assert_eq!(RoutineGenerator::classic_reps(12, 1), 16);
        assert_eq!(RoutineGenerator::classic_reps(12, 3), 16);
        assert_eq!(RoutineGenerator::classic_reps(12, 4), 15);
        assert_eq!(RoutineGenerator::classic_reps(13, 1), 15);
        assert_eq!(RoutineGenerator::classic_reps(13, 2), 16);
        assert_eq!(RoutineGenerator::classic_reps(14, 1), 16);
        assert_eq!(RoutineGenerator::classic_reps(25, 9), 16);
    }

    #[test]
    fn test_classic_reps_low_levels_step_every_three_days() {
        assert_eq!(RoutineGenerator::classic_reps(4, 1), 14);
        assert_eq!(RoutineGenerator::classic_reps(4, 3), 14);
        assert_eq!(RoutineGenerator::classic_reps(4, 4), 15);
        assert_eq!(RoutineGenerator::classic_reps(10, 7), 22);
    }

    #[test]
    fn test_days_in_level_bands() {
        let expected = [
            (1, 5),
            (3, 5),
            (4, 6),
            (6, 6),
            (7, 6),
            (8, 7),
            (10, 8),
            (11, 7),
            (14, 7),
            (15, 8),
            (16, 8),
            (18, 9),
            (27, 12),
            (100, 12),
        ];
        for (level, days) in expected {
            assert_eq!(RoutineGenerator::days_in_level(level), days, "level {level}");
        }
    }

    #[test]
    fn test_days_in_level_monotonic_and_capped() {
        // The 11-15 band restarts at 7 days after level 10's 8; each band is
        // non-decreasing on its own.
        for band in [1..=10, 11..=200] {
            let mut previous = 0;
            for level in band {
                let days = RoutineGenerator::days_in_level(level);
                assert!(days >= previous, "level {level} shrank from {previous} to {days}");
                assert!(days <= MAX_DAYS_IN_LEVEL);
                previous = days;
            }
        }
        assert_eq!(RoutineGenerator::days_in_level(10), 8);
        assert_eq!(RoutineGenerator::days_in_level(11), 7);
    }

    #[test]
    fn test_classic_hold_thresholds() {
        assert_eq!(RoutineGenerator::classic_hold(6, 5), 9);
        assert_eq!(RoutineGenerator::classic_hold(7, 3), 10);
        assert_eq!(RoutineGenerator::classic_hold(7, 4), 11);
        assert_eq!(RoutineGenerator::classic_hold(11, 1), 12);
        assert_eq!(RoutineGenerator::classic_hold(12, 3), 13);
        assert_eq!(RoutineGenerator::classic_hold(12, 4), 15);
        assert_eq!(RoutineGenerator::classic_hold(15, 3), 14);
        // days_in_level(15) = 8, so the bump lands on day 4
        assert_eq!(RoutineGenerator::classic_hold(15, 4), 15);
        assert_eq!(RoutineGenerator::classic_hold(200, 1), 30);
    }

    #[test]
    fn test_pulse_sets_lag_behind() {
        assert_eq!(RoutineGenerator::pulse_set_reps(1, 3), [13, 12, 12]);
        assert_eq!(RoutineGenerator::pulse_set_reps(1, 5), [14, 13, 12]);
        assert_eq!(RoutineGenerator::pulse_set_reps(2, 6), [16, 15, 14]);
        assert_eq!(RoutineGenerator::pulse_set_reps(11, 1), [27, 27, 27]);
    }

    #[test]
    fn test_bounds_hold_for_all_valid_inputs() {
        for level in 1..=30 {
            let days = RoutineGenerator::days_in_level(level);
            for day in 1..=days {
                let routine = RoutineGenerator::generate(level, day);
                assert!((4..=30).contains(&routine.classic_hold_secs));
                assert!(routine.pulse_set_reps.iter().all(|&reps| reps >= 5));
                assert!(routine.classic_reps > 0);
                assert!(routine.classic_rest_secs > 0);
                assert_eq!(routine.total_days_in_level, days);
                assert!(routine.day <= routine.total_days_in_level);
            }
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        assert_eq!(RoutineGenerator::generate(9, 4), RoutineGenerator::generate(9, 4));
    }

    #[test]
    fn test_zero_inputs_are_normalised() {
        assert_eq!(RoutineGenerator::generate(0, 0), RoutineGenerator::generate(1, 1));
    }

    #[test]
    fn test_estimated_duration() {
        let routine = RoutineGenerator::generate(1, 1);
        // 11 * (4 + 4) + 36 * 1.2 + 3 * 2 + 2 * 10
        let expected = 88.0 + 43.2 + 6.0 + 20.0;
        assert!((routine.estimated_duration().as_secs_f64() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_pulse_display() {
        let routine = RoutineGenerator::generate(1, 5);
        assert_eq!(routine.pulse_display(), "[14, 13, 12]");
    }

    #[test]
    fn test_extreme_inputs_saturate() {
        let routine = RoutineGenerator::generate(3_000_000_000, 1);
        assert_eq!(routine.pulse_set_reps, [u32::MAX; PULSE_SETS]);
        assert_eq!(routine.total_pulse_reps(), 3 * u64::from(u32::MAX));
        assert!((4..=30).contains(&routine.classic_hold_secs));
        assert_eq!(routine.total_days_in_level, MAX_DAYS_IN_LEVEL);

        let routine = RoutineGenerator::generate(u32::MAX, u32::MAX);
        assert!((4..=30).contains(&routine.classic_hold_secs));
        assert_eq!(routine.classic_rest_secs, 5);
        assert_eq!(routine.classic_reps, 16);
        assert_eq!(routine.pulse_set_reps, [u32::MAX; PULSE_SETS]);
        assert!(routine.estimated_duration() > Duration::ZERO);

        let routine = RoutineGenerator::generate(1, u32::MAX);
        assert_eq!(routine.pulse_set_reps[0], 12 + (u32::MAX - 1) / 2);
        assert_eq!(
            routine.total_pulse_reps(),
            routine.pulse_set_reps.iter().map(|&reps| u64::from(reps)).sum::<u64>()
        );
        assert_eq!(routine.classic_reps, 11 + (u32::MAX - 1) / 3);
    }
}
