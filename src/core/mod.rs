//! Core types and functionality for Kegel.
//!
//! This module contains everything that does not depend on a front-end:
//! routine generation, the session state machine, progress persistence,
//! statistics and configuration.

mod config;
mod error;
mod progress;
mod routine;
mod session;
mod stats;

pub use config::{Config, GeneralConfig, SessionConfig, UiConfig};
pub use error::{StoreError, StoreResult};
pub use progress::{ExerciseRecord, ProgressStore, UserState};
pub use routine::{
    Routine, RoutineGenerator, MAX_DAYS_IN_LEVEL, PULSE_RELEASE_SECS, PULSE_SETS,
    PULSE_SET_INTRO_SECS, PULSE_SET_REST_SECS, PULSE_SQUEEZE_SECS,
};
pub use session::{
    drive_session, Phase, SessionClock, SessionFrontend, SessionOutcome, SessionSnapshot,
    TickInput,
};
pub use stats::{format_minutes, DailyTotal, Stats, StatsAggregator, RECENT_DAYS};
