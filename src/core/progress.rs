//! Progress persistence.
//!
//! Stores the user's level/day position and the history of completed
//! sessions in a single JSON file under the per-user data directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::error::{StoreError, StoreResult};
use super::routine::{Routine, RoutineGenerator, PULSE_SETS};
use super::session::SessionOutcome;

/// One completed session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    /// Local time the session finished
    #[serde(default = "epoch", alias = "timestamp")]
    pub date: NaiveDateTime,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub day: u32,
    #[serde(default, alias = "durationSeconds")]
    pub duration_seconds: f64,
    #[serde(default, alias = "classicReps")]
    pub classic_reps: u32,
    /// Reps per pulse set, copied from the routine
    #[serde(default, alias = "pulseReps")]
    pub pulse_reps: [u32; PULSE_SETS],
}

impl ExerciseRecord {
    /// Build a record for a routine finished at `date`.
    pub fn from_routine(routine: &Routine, duration_seconds: f64, date: NaiveDateTime) -> Self {
        Self {
            date,
            level: routine.level,
            day: routine.day,
            duration_seconds: duration_seconds.max(0.0),
            classic_reps: routine.classic_reps,
            pulse_reps: routine.pulse_set_reps,
        }
    }

    pub fn duration_minutes(&self) -> f64 {
        self.duration_seconds / 60.0
    }
}

/// The single mutable progress record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserState {
    #[serde(alias = "currentLevel")]
    pub current_level: u32,
    #[serde(alias = "currentDay")]
    pub current_day: u32,
    #[serde(alias = "lastPerformed", with = "optional_timestamp")]
    pub last_performed: Option<NaiveDateTime>,
    /// Completed sessions, oldest first
    #[serde(alias = "exerciseHistory")]
    pub exercise_history: Vec<ExerciseRecord>,
}

impl Default for UserState {
    fn default() -> Self {
        Self { current_level: 1, current_day: 1, last_performed: None, exercise_history: Vec::new() }
    }
}

impl UserState {
    /// The routine for the current position.
    pub fn current_routine(&self) -> Routine {
        RoutineGenerator::generate(self.current_level, self.current_day)
    }

    /// Move to the next day, rolling over to a new level after the last one.
    pub fn advance(&mut self, days_in_current_level: u32) {
        if self.current_day >= days_in_current_level {
            self.current_level += 1;
            self.current_day = 1;
        } else {
            self.current_day += 1;
        }
    }

    /// Last workout date for display.
    pub fn last_performed_display(&self) -> String {
        self.last_performed
            .map(|ts| ts.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "Never".to_string())
    }

    /// Pull level/day back into their valid ranges.
    fn normalize(&mut self) {
        self.current_level = self.current_level.max(1);
        let days = RoutineGenerator::days_in_level(self.current_level);
        self.current_day = self.current_day.clamp(1, days);
    }
}

/// Loads and saves [`UserState`].
#[derive(Debug, Clone)]
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    /// Name of the state file inside the data directory.
    pub const FILE_NAME: &'static str = "progress.json";

    /// Store in the platform data directory (`~/.local/share/kegel` on Linux).
    pub fn new() -> StoreResult<Self> {
        Ok(Self::in_dir(Self::default_data_dir()?))
    }

    /// Store inside a specific directory.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self { path: dir.as_ref().join(Self::FILE_NAME) }
    }

    /// Store at an exact file path (for testing).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Platform data directory for the application.
    pub fn default_data_dir() -> StoreResult<PathBuf> {
        dirs::data_dir().map(|dir| dir.join(crate::APP_NAME)).ok_or(StoreError::NoDataDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored state.
    ///
    /// A missing, unreadable or malformed file yields fresh defaults; nothing
    /// is partially recovered.
    pub fn load(&self) -> UserState {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = ?self.path, "No progress file, starting fresh");
                return UserState::default();
            }
            Err(e) => {
                tracing::warn!(path = ?self.path, error = %e, "Failed to read progress, starting fresh");
                return UserState::default();
            }
        };

        match serde_json::from_str::<UserState>(&content) {
            Ok(mut state) => {
                state.normalize();
                tracing::debug!(
                    level = state.current_level,
                    day = state.current_day,
                    sessions = state.exercise_history.len(),
                    "Loaded progress"
                );
                state
            }
            Err(e) => {
                tracing::warn!(path = ?self.path, error = %e, "Corrupt progress file, starting fresh");
                UserState::default()
            }
        }
    }

    /// Overwrite the state file.
    pub fn save(&self, state: &UserState) -> StoreResult<()> {
        let content = serde_json::to_string_pretty(state)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        fs::write(&self.path, content).map_err(|e| StoreError::io(&self.path, e))?;
        Ok(())
    }

    /// Append a record for a finished routine and persist.
    ///
    /// The record is added to `state` before writing, so a failed write
    /// leaves the in-memory state ready for another `save`.
    pub fn add_record(
        &self,
        state: &mut UserState,
        routine: &Routine,
        duration_seconds: f64,
    ) -> StoreResult<ExerciseRecord> {
        let record = ExerciseRecord::from_routine(routine, duration_seconds, now());
        state.last_performed = Some(record.date);
        state.exercise_history.push(record.clone());
        tracing::info!(
            level = record.level,
            day = record.day,
            duration_seconds = record.duration_seconds,
            "Recorded session"
        );

        self.save(state)?;
        Ok(record)
    }

    /// Apply the level/day advancement rule and persist.
    pub fn advance(&self, state: &mut UserState, days_in_current_level: u32) -> StoreResult<()> {
        state.advance(days_in_current_level);
        tracing::debug!(level = state.current_level, day = state.current_day, "Advanced progress");
        self.save(state)
    }

    /// Apply the result of a session.
    ///
    /// A completed session appends exactly one record and advances exactly
    /// once; a stopped one changes nothing. Both mutations are applied even
    /// if the first write fails, and the first write error is returned.
    pub fn complete_session(
        &self,
        state: &mut UserState,
        routine: &Routine,
        outcome: &SessionOutcome,
        count_paused_time: bool,
    ) -> StoreResult<Option<ExerciseRecord>> {
        if !outcome.is_completed() {
            return Ok(None);
        }

        let recorded = self.add_record(state, routine, outcome.recorded_secs(count_paused_time));
        let advanced = self.advance(state, routine.total_days_in_level);

        let record = recorded?;
        advanced?;
        Ok(Some(record))
    }

    /// Delete all progress and start over. Irreversible.
    pub fn reset(&self) -> StoreResult<UserState> {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(StoreError::io(&self.path, e)),
        }

        let state = UserState::default();
        self.save(&state)?;
        tracing::info!(path = ?self.path, "Progress reset");
        Ok(state)
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn epoch() -> NaiveDateTime {
    DateTime::from_timestamp(0, 0).map(|dt| dt.naive_utc()).unwrap_or(NaiveDateTime::MIN)
}

/// `last_performed` is written as `""` when unset.
mod optional_timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => ts.serialize(serializer),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => text.parse().map(Some).map_err(serde::de::Error::custom),
        }
    }
}
