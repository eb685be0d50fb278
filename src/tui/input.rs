//! Input handling for the TUI.
//!
//! Processes keyboard events and updates application state.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{AppMode, MenuAction};
use crate::App;

/// Handle keyboard events.
pub fn handle_events(key: KeyEvent, app: &mut App) {
    // Ctrl+C quits from anywhere
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    match app.mode {
        AppMode::Menu => handle_menu_mode(key, app),
        AppMode::Workout => handle_workout_mode(key, app),
        AppMode::Finished => app.dismiss_finished(),
        AppMode::Progress => handle_progress_mode(key, app),
        AppMode::ConfirmReset => handle_confirm_reset_mode(key, app),
        AppMode::Info | AppMode::Stats => handle_page_mode(key, app),
    }
}

/// Handle input in the main menu.
fn handle_menu_mode(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Enter => {
            let action = app.selected_action();
            app.perform(action);
        }
        KeyCode::Esc => app.quit(),
        // Retry a failed save
        KeyCode::Char('w' | 'W') => app.retry_save(),
        KeyCode::Char(c) => {
            if let Some(action) = MenuAction::from_key(c) {
                app.perform(action);
            }
        }
        _ => {}
    }
}

/// Handle input while a session is running.
fn handle_workout_mode(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('p' | 'P' | ' ') => app.request_pause(),
        KeyCode::Char('s' | 'S' | 'q' | 'Q') | KeyCode::Esc => app.request_stop(),
        _ => {}
    }
}

/// Handle input on the progress screen.
fn handle_progress_mode(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('r' | 'R') => app.ask_reset(),
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q' | 'Q') => app.back_to_menu(),
        _ => {}
    }
}

/// Handle input in the reset confirmation dialog.
fn handle_confirm_reset_mode(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('y' | 'Y') => app.confirm_reset(),
        KeyCode::Char('n' | 'N' | 'q') | KeyCode::Esc => app.cancel_reset(),
        _ => {}
    }
}

/// Handle input on read-only pages (info, stats).
fn handle_page_mode(key: KeyEvent, app: &mut App) {
    if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q' | 'Q')) {
        app.back_to_menu();
    }
}
