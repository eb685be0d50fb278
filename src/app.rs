//! Application state and lifecycle management.
//!
//! This module contains the `App` struct that holds all application state
//! and coordinates between the TUI, the session clock and the progress store.
//! Nothing here draws or reads the terminal.

use std::time::Duration;

use crate::core::{
    format_minutes, Config, ExerciseRecord, ProgressStore, SessionClock, SessionOutcome,
    SessionSnapshot, Stats, StatsAggregator, TickInput, UserState,
};
use crate::tui::Theme;

/// Main application state.
#[derive(Debug)]
pub struct App {
    /// Application configuration
    pub config: Config,

    /// Current UI theme
    pub theme: Theme,

    /// Where progress is persisted
    store: ProgressStore,

    /// Progress as last loaded or updated
    pub user_state: UserState,

    /// Current mode of the application
    pub mode: AppMode,

    /// Highlighted menu entry
    pub menu_selected: usize,

    /// The running (or just finished) session
    pub session: Option<SessionClock>,

    /// Pause toggle requested since the last tick
    pending_pause: bool,

    /// Stop requested since the last tick
    pending_stop: bool,

    /// How the last session ended
    pub last_outcome: Option<SessionOutcome>,

    /// Record written for the last completed session
    pub last_record: Option<ExerciseRecord>,

    /// The last write failed; in-memory state is ahead of the file
    pub save_failed: bool,

    /// Status message to display (if any)
    pub status_message: Option<String>,

    /// Whether the application should quit
    pub should_quit: bool,
}

/// Application modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Main menu
    #[default]
    Menu,

    /// A session is running
    Workout,

    /// Summary after a session completed or was stopped
    Finished,

    /// How-to instructions
    Info,

    /// Current level/day with the reset option
    Progress,

    /// Asking before wiping all progress
    ConfirmReset,

    /// Statistics and charts
    Stats,
}

/// Entries of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    StartWorkout,
    Info,
    Progress,
    Stats,
    Quit,
}

impl MenuAction {
    /// All entries in display order.
    pub const ALL: [Self; 5] = [Self::StartWorkout, Self::Info, Self::Progress, Self::Stats, Self::Quit];

    /// Shortcut key.
    pub fn key(self) -> char {
        match self {
            Self::StartWorkout => 's',
            Self::Info => 'i',
            Self::Progress => 'p',
            Self::Stats => 't',
            Self::Quit => 'q',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::StartWorkout => "Start Workout",
            Self::Info => "How To",
            Self::Progress => "Progress",
            Self::Stats => "Statistics",
            Self::Quit => "Quit",
        }
    }

    /// Find the entry bound to a shortcut key.
    pub fn from_key(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.key() == c.to_ascii_lowercase())
    }
}

impl App {
    /// Create the application, loading progress from `store`.
    pub fn new(config: Config, store: ProgressStore) -> Self {
        let theme = Self::resolve_theme(&config);
        let user_state = store.load();

        Self {
            config,
            theme,
            store,
            user_state,
            mode: AppMode::default(),
            menu_selected: 0,
            session: None,
            pending_pause: false,
            pending_stop: false,
            last_outcome: None,
            last_record: None,
            save_failed: false,
            status_message: None,
            should_quit: false,
        }
    }

    /// Resolve theme from configuration.
    fn resolve_theme(config: &Config) -> Theme {
        Theme::by_name(&config.ui.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.ui.theme, "Unknown theme, using default");
            Theme::default()
        })
    }

    pub fn store(&self) -> &ProgressStore {
        &self.store
    }

    /// Interval between session ticks.
    pub fn tick_rate(&self) -> Duration {
        self.config.ui.tick_rate()
    }

    /// Move menu selection down.
    pub fn select_next(&mut self) {
        self.menu_selected = (self.menu_selected + 1).min(MenuAction::ALL.len() - 1);
    }

    /// Move menu selection up.
    pub fn select_previous(&mut self) {
        self.menu_selected = self.menu_selected.saturating_sub(1);
    }

    /// The highlighted menu entry.
    pub fn selected_action(&self) -> MenuAction {
        MenuAction::ALL[self.menu_selected.min(MenuAction::ALL.len() - 1)]
    }

    /// Run a menu entry.
    pub fn perform(&mut self, action: MenuAction) {
        self.clear_status();
        match action {
            MenuAction::StartWorkout => self.start_workout(),
            MenuAction::Info => self.mode = AppMode::Info,
            MenuAction::Progress => self.mode = AppMode::Progress,
            MenuAction::Stats => self.mode = AppMode::Stats,
            MenuAction::Quit => self.quit(),
        }
    }

    /// Begin today's session.
    pub fn start_workout(&mut self) {
        let routine = self.user_state.current_routine();
        tracing::info!(level = routine.level, day = routine.day, "Starting workout");

        let mut clock = SessionClock::new(routine);
        clock.start();
        self.session = Some(clock);
        self.pending_pause = false;
        self.pending_stop = false;
        self.last_outcome = None;
        self.last_record = None;
        self.mode = AppMode::Workout;
    }

    /// Ask the running session to flip its paused flag on the next tick.
    pub fn request_pause(&mut self) {
        if self.mode == AppMode::Workout {
            self.pending_pause = !self.pending_pause;
        }
    }

    /// Ask the running session to stop on the next tick.
    pub fn request_stop(&mut self) {
        if self.mode == AppMode::Workout {
            self.pending_stop = true;
        }
    }

    /// Snapshot of the running session.
    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.session.as_ref().map(SessionClock::snapshot)
    }

    /// Perform periodic updates (called on tick).
    ///
    /// Feeds elapsed time and any pending pause/stop request to the session.
    pub fn tick(&mut self, elapsed: Duration) {
        if self.mode != AppMode::Workout {
            return;
        }

        let input = TickInput {
            elapsed,
            toggle_pause: std::mem::take(&mut self.pending_pause),
            stop: std::mem::take(&mut self.pending_stop),
        };

        let outcome = match self.session.as_mut() {
            Some(clock) => {
                clock.tick(input);
                clock.outcome()
            }
            None => {
                self.mode = AppMode::Menu;
                return;
            }
        };

        if let Some(outcome) = outcome {
            self.finish_session(outcome);
        }
    }

    /// Apply a finished session to the stored progress.
    fn finish_session(&mut self, outcome: SessionOutcome) {
        let Some(routine) = self.session.as_ref().map(|clock| clock.routine().clone()) else {
            return;
        };

        let count_paused_time = self.config.session.count_paused_time;
        match self.store.complete_session(&mut self.user_state, &routine, &outcome, count_paused_time) {
            Ok(record) => {
                self.last_record = record;
                self.save_failed = false;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to save session");
                self.last_record = self.user_state.exercise_history.last().cloned();
                self.save_failed = true;
                self.set_status(format!("Save failed: {e}, press w to retry"));
            }
        }

        if !outcome.is_completed() {
            tracing::info!(active_secs = outcome.recorded_secs(false), "Workout stopped early");
        }

        self.last_outcome = Some(outcome);
        self.mode = AppMode::Finished;
    }

    /// Leave the session summary.
    pub fn dismiss_finished(&mut self) {
        self.session = None;
        self.mode = AppMode::Menu;
    }

    /// Write the in-memory state again after a failed save.
    pub fn retry_save(&mut self) {
        if !self.save_failed {
            return;
        }

        match self.store.save(&self.user_state) {
            Ok(()) => {
                self.save_failed = false;
                self.set_status("Progress saved");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Retry save failed");
                self.set_status(format!("Save failed: {e}, press w to retry"));
            }
        }
    }

    /// Show the reset confirmation.
    pub fn ask_reset(&mut self) {
        self.mode = AppMode::ConfirmReset;
    }

    /// Wipe all progress after confirmation.
    pub fn confirm_reset(&mut self) {
        match self.store.reset() {
            Ok(state) => {
                self.user_state = state;
                self.save_failed = false;
                self.set_status("Progress has been reset");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Reset failed");
                self.set_status(format!("Reset failed: {e}"));
            }
        }
        self.mode = AppMode::Progress;
    }

    pub fn cancel_reset(&mut self) {
        self.mode = AppMode::Progress;
    }

    /// Return to the main menu.
    pub fn back_to_menu(&mut self) {
        self.mode = AppMode::Menu;
    }

    /// Statistics over the stored history.
    pub fn stats(&self) -> Stats {
        StatsAggregator::calculate_now(&self.user_state.exercise_history)
    }

    /// One-line summary for the menu, e.g. `Total: 1h 05m | Days: 3`.
    pub fn quick_stats(&self) -> Option<String> {
        if self.user_state.exercise_history.is_empty() {
            return None;
        }
        let stats = self.stats();
        Some(format!(
            "Total: {} | Days: {}",
            format_minutes(stats.total_duration_minutes),
            stats.workout_days
        ))
    }

    /// Set a status message.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message.
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Request the application to quit.
    ///
    /// A running session is abandoned without recording.
    pub fn quit(&mut self) {
        if let Some(clock) = self.session.as_mut() {
            clock.stop();
        }
        self.should_quit = true;
    }
}
