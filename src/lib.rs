#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::trivially_copy_pass_by_ref)]

//! # Kegel
//!
//! Pelvic-floor exercise coach for your terminal.
//!
//! Kegel generates a progressively harder daily routine from your current
//! level and day, walks you through the timed squeeze/rest and pulse phases,
//! and records each completed session to drive the next one.
//!
//! ## Features
//!
//! - **Progressive routines**: hold times, reps and pulse sets grow with level
//! - **Timed sessions**: pause and stop at any point; stopped sessions are not recorded
//! - **Statistics**: totals, 14-day activity and per-level averages
//! - **Two front-ends**: a full TUI and a plain line-oriented mode
//!
//! ## Quick Start
//!
//! ```bash
//! # Open the interactive coach
//! kegel
//!
//! # Run today's session without the TUI
//! kegel workout
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
// Allow common patterns that are intentional in this codebase
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::derivable_impls)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::use_self)]

pub mod app;
pub mod core;
pub mod guide;
pub mod plain;
pub mod tui;

// Re-export commonly used types
pub use app::App;
pub use core::{
    Config, ExerciseRecord, ProgressStore, Routine, RoutineGenerator, SessionClock,
    SessionOutcome, Stats, StatsAggregator, UserState,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "kegel";
