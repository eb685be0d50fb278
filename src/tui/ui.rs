//! UI rendering for the TUI.
//!
//! Handles layout and widget rendering using ratatui.
//! Supports customizable themes via the Theme struct.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
    Frame,
};

use crate::app::{AppMode, MenuAction};
use crate::core::{format_minutes, Phase, SessionOutcome, SessionSnapshot, StatsAggregator};
use crate::guide::GUIDE;
use crate::tui::Theme;
use crate::App;

/// Sessions shown in the recent-sessions chart.
const RECENT_SESSIONS: usize = 7;

/// Draw the main UI.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(8),    // Screen content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_header(frame, app, chunks[0]);

    match app.mode {
        AppMode::Menu => draw_menu(frame, app, chunks[1]),
        AppMode::Workout => draw_workout(frame, app, chunks[1]),
        AppMode::Finished => draw_finished(frame, app, chunks[1]),
        AppMode::Info => draw_info(frame, app, chunks[1]),
        AppMode::Progress | AppMode::ConfirmReset => draw_progress(frame, app, chunks[1]),
        AppMode::Stats => draw_stats(frame, app, chunks[1]),
    }

    draw_status_bar(frame, app, chunks[2]);

    if app.mode == AppMode::ConfirmReset {
        draw_reset_dialog(frame, app);
    }
}

/// Draw the header with the current position.
fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let state = &app.user_state;

    let header = Paragraph::new(Line::from(vec![
        Span::styled(" KEGEL ", Style::default().fg(theme.primary).add_modifier(Modifier::BOLD)),
        Span::styled("│ ", Style::default().fg(theme.border)),
        Span::styled(
            format!("Level {}  Day {}", state.current_level, state.current_day),
            Style::default().fg(theme.text),
        ),
        Span::styled(
            format!("  │  Last workout: {}", state.last_performed_display()),
            Style::default().fg(theme.text_dim),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .style(Style::default().bg(theme.background)),
    );

    frame.render_widget(header, area);
}

/// Draw the main menu with today's routine.
fn draw_menu(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(5)])
        .split(area);

    let mut items = vec![Line::from("")];
    for (i, action) in MenuAction::ALL.iter().enumerate() {
        let selected = i == app.menu_selected;
        let marker = if selected { "▶ " } else { "  " };
        let label_style = if selected {
            Style::default().fg(theme.primary).bg(theme.selected_bg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };

        items.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(theme.primary)),
            Span::styled(format!("[{}] ", action.key()), Style::default().fg(theme.accent)),
            Span::styled(format!("{:<16}", action.label()), label_style),
        ]));
    }

    let menu = Paragraph::new(items).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary))
            .title(Span::styled(
                " Main Menu ",
                Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
            )),
    );
    frame.render_widget(menu, chunks[0]);

    let routine = app.user_state.current_routine();
    let mut lines = vec![
        Line::from(vec![
            Span::styled("  Classic:  ", Style::default().fg(theme.text_dim)),
            Span::styled(
                format!(
                    "{} reps · hold {}s · rest {}s",
                    routine.classic_reps, routine.classic_hold_secs, routine.classic_rest_secs
                ),
                Style::default().fg(theme.text),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Pulses:   ", Style::default().fg(theme.text_dim)),
            Span::styled(routine.pulse_display(), Style::default().fg(theme.text)),
        ]),
        Line::from(vec![
            Span::styled("  Length:   ", Style::default().fg(theme.text_dim)),
            Span::styled(
                format!("about {}", format_minutes(routine.estimated_duration().as_secs_f64() / 60.0)),
                Style::default().fg(theme.text),
            ),
            Span::styled(
                format!("   (day {} of {})", routine.day, routine.total_days_in_level),
                Style::default().fg(theme.text_muted),
            ),
        ]),
    ];

    if let Some(summary) = app.quick_stats() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {summary}"),
            Style::default().fg(theme.secondary),
        )));
    }

    let today = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(Span::styled(" Today's Routine ", Style::default().fg(theme.accent))),
    );
    frame.render_widget(today, chunks[1]);
}

/// Draw the running session.
fn draw_workout(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let Some(snapshot) = app.snapshot() else {
        return;
    };

    let phase_color = theme.phase_color(snapshot.phase.is_squeeze());
    let bar_width = area.width.saturating_sub(10) as usize;
    let filled = ((snapshot.phase_progress * bar_width as f64) as usize).min(bar_width);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            snapshot.phase.label(),
            Style::default().fg(phase_color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}", snapshot.display_secs),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("█".repeat(filled), Style::default().fg(phase_color)),
            Span::styled("░".repeat(bar_width - filled), Style::default().fg(theme.border)),
        ]),
        Line::from(""),
        Line::from(Span::styled(progress_label(&snapshot), Style::default().fg(theme.text_dim))),
        Line::from(Span::styled(
            format!("Elapsed {}", format_clock(snapshot.active_secs)),
            Style::default().fg(theme.text_muted),
        )),
    ];

    if snapshot.paused {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "PAUSED",
            Style::default().fg(theme.warning).add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
        )));
    }

    let routine = app.session.as_ref().map(|clock| clock.routine());
    let title = routine
        .map(|r| format!(" Level {} · Day {} ", r.level, r.day))
        .unwrap_or_default();

    let body = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(phase_color))
            .title(Span::styled(title, Style::default().fg(theme.primary).add_modifier(Modifier::BOLD))),
    );
    frame.render_widget(body, area);
}

/// "Rep 3/11" or "Pulse set 2/3 · Rep 4/12".
fn progress_label(snapshot: &SessionSnapshot) -> String {
    if snapshot.phase == Phase::PulseSetIntro {
        format!("PULSE SET {}/{}", snapshot.set, snapshot.set_total)
    } else if snapshot.set > 0 {
        format!(
            "Pulse set {}/{} · Rep {}/{}",
            snapshot.set, snapshot.set_total, snapshot.rep, snapshot.rep_total
        )
    } else {
        format!("Rep {}/{}", snapshot.rep, snapshot.rep_total)
    }
}

/// Draw the summary after a session ends.
fn draw_finished(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let state = &app.user_state;

    let mut lines = vec![Line::from("")];
    match app.last_outcome {
        Some(outcome @ SessionOutcome::Completed { .. }) => {
            lines.push(Line::from(Span::styled(
                "SESSION COMPLETE!",
                Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
            let recorded = outcome.recorded_secs(app.config.session.count_paused_time);
            lines.push(Line::from(Span::styled(
                format!("Duration: {}", format_clock(recorded)),
                Style::default().fg(theme.text),
            )));

            let leveled_up =
                app.last_record.as_ref().is_some_and(|record| record.level < state.current_level);
            if leveled_up {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("LEVEL UP! Welcome to level {}", state.current_level),
                    Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                )));
            }
            lines.push(Line::from(Span::styled(
                format!("Next: Level {}, Day {}", state.current_level, state.current_day),
                Style::default().fg(theme.text_dim),
            )));
        }
        Some(SessionOutcome::Stopped { active_secs, .. }) => {
            lines.push(Line::from(Span::styled(
                "SESSION STOPPED",
                Style::default().fg(theme.warning).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Stopped after {}. Progress was not recorded.", format_clock(active_secs)),
                Style::default().fg(theme.text_dim),
            )));
        }
        None => {}
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to return to the menu",
        Style::default().fg(theme.text_muted),
    )));

    let body = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default().borders(Borders::ALL).border_style(Style::default().fg(theme.border)),
    );
    frame.render_widget(body, area);
}

/// Draw the how-to page.
fn draw_info(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let mut lines = Vec::new();
    for section in GUIDE {
        lines.push(Line::from(Span::styled(
            section.title,
            Style::default().fg(theme.secondary).add_modifier(Modifier::BOLD),
        )));
        for text in section.lines {
            lines.push(Line::from(vec![
                Span::styled("  • ", Style::default().fg(theme.accent)),
                Span::styled(*text, Style::default().fg(theme.text)),
            ]));
        }
        lines.push(Line::from(""));
    }

    let info = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary))
            .title(Span::styled(
                " How To Kegel ",
                Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
            ))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(info, area);
}

/// Draw the progress page.
fn draw_progress(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let state = &app.user_state;
    let routine = state.current_routine();

    let lines = vec![
        Line::from(""),
        labeled("Level", state.current_level.to_string(), theme),
        labeled("Day", format!("{} of {}", state.current_day, routine.total_days_in_level), theme),
        labeled("Last workout", state.last_performed_display(), theme),
        labeled("Sessions", state.exercise_history.len().to_string(), theme),
        Line::from(""),
        Line::from(""),
        Line::from(vec![
            Span::styled("  [r] ", Style::default().fg(theme.error).add_modifier(Modifier::BOLD)),
            Span::styled("Reset all progress", Style::default().fg(theme.error)),
        ]),
    ];

    let body = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary))
            .title(Span::styled(
                " Current Progress ",
                Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
            )),
    );
    frame.render_widget(body, area);
}

/// Draw the reset confirmation overlay.
fn draw_reset_dialog(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let popup_area = centered_rect(48, 7, frame.area());

    frame.render_widget(Clear, popup_area);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            " This deletes every recorded session.",
            Style::default().fg(theme.text),
        )),
        Line::from(Span::styled(" It cannot be undone.", Style::default().fg(theme.text_dim))),
        Line::from(""),
        Line::from(vec![
            Span::styled(" [y] Reset  ", Style::default().fg(theme.error).add_modifier(Modifier::BOLD)),
            Span::styled("[n] Cancel", Style::default().fg(theme.text_muted)),
        ]),
    ];

    let popup = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.error))
            .title(" Reset Progress? ")
            .title_style(Style::default().fg(theme.error).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(theme.background)),
    );
    frame.render_widget(popup, popup_area);
}

/// Draw the statistics page.
fn draw_stats(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let history = &app.user_state.exercise_history;
    let stats = app.stats();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(8)])
        .split(area);

    let summary = Paragraph::new(Line::from(vec![
        Span::styled("  Total: ", Style::default().fg(theme.text_dim)),
        Span::styled(
            format_minutes(stats.total_duration_minutes),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled("    Workouts: ", Style::default().fg(theme.text_dim)),
        Span::styled(
            stats.total_workouts.to_string(),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled("    Days: ", Style::default().fg(theme.text_dim)),
        Span::styled(
            stats.workout_days.to_string(),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled("    Average: ", Style::default().fg(theme.text_dim)),
        Span::styled(
            format!("{:.1} min", stats.avg_duration_minutes),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(Span::styled(" Statistics ", Style::default().fg(theme.primary))),
    );
    frame.render_widget(summary, chunks[0]);

    if history.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No workouts yet", Style::default().fg(theme.text_dim))),
            Line::from(""),
            Line::from(Span::styled(
                "Complete a session to see your statistics",
                Style::default().fg(theme.text_muted),
            )),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(theme.border)));
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(RECENT_SESSIONS as u16 + 2), Constraint::Min(3)])
        .split(columns[1]);

    // Last 14 days
    let bar_max = columns[0].width.saturating_sub(24) as usize;
    let busiest = stats.busiest_recent_day();
    let daily: Vec<Line> = stats
        .last_14_days
        .iter()
        .map(|day| {
            bar_line(day.date.format("%m-%d").to_string(), day.duration_minutes, busiest, bar_max, theme)
        })
        .collect();
    frame.render_widget(chart_block(daily, " Last 14 Days (min) ", theme), columns[0]);

    // Recent sessions
    let recent = StatsAggregator::recent_sessions(history, RECENT_SESSIONS);
    let recent_max = recent.iter().map(|r| r.duration_minutes()).fold(0.0, f64::max);
    let bar_max = columns[1].width.saturating_sub(24) as usize;
    let sessions: Vec<Line> = recent
        .iter()
        .map(|record| {
            bar_line(record.date.format("%m-%d").to_string(), record.duration_minutes(), recent_max, bar_max, theme)
        })
        .collect();
    frame.render_widget(chart_block(sessions, " Last 7 Sessions (min) ", theme), right[0]);

    // Per level
    let levels: Vec<Line> = stats
        .level_stats
        .iter()
        .map(|(level, avg)| {
            let total = stats.level_totals.get(level).copied().unwrap_or_default();
            Line::from(vec![
                Span::styled(format!("Level {level:<3}"), Style::default().fg(theme.text)),
                Span::styled(format!(" avg {avg:>5.1} min"), Style::default().fg(theme.text_dim)),
                Span::styled(format!("  total {}", format_minutes(total)), Style::default().fg(theme.text_muted)),
            ])
        })
        .collect();
    frame.render_widget(chart_block(levels, " By Level ", theme), right[1]);
}

/// One labelled horizontal bar.
fn bar_line(label: String, value: f64, max: f64, width: usize, theme: &Theme) -> Line<'static> {
    let len = if max > 0.0 { (value / max * width as f64).round() as usize } else { 0 };
    let bar = if value > 0.0 { "█".repeat(len.max(1)) } else { String::new() };

    Line::from(vec![
        Span::styled(format!("{label} "), Style::default().fg(theme.text_dim)),
        Span::styled(bar, Style::default().fg(theme.chart)),
        Span::styled(format!(" {value:.1}"), Style::default().fg(theme.text_muted)),
    ])
}

fn chart_block<'a>(lines: Vec<Line<'a>>, title: &'a str, theme: &Theme) -> Paragraph<'a> {
    Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(Span::styled(title, Style::default().fg(theme.accent)))
            .padding(Padding::horizontal(1)),
    )
}

/// "  Label:  value" row.
fn labeled(label: &str, value: String, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<14}", format!("{label}:")), Style::default().fg(theme.text_dim)),
        Span::styled(value, Style::default().fg(theme.text).add_modifier(Modifier::BOLD)),
    ])
}

/// Draw the status bar with key hints or the current status message.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let line = if let Some(message) = &app.status_message {
        let color = if app.save_failed { theme.error } else { theme.success };
        Line::from(Span::styled(format!(" {message}"), Style::default().fg(color)))
    } else {
        let hints: &[(&str, &str)] = match app.mode {
            AppMode::Menu => &[("↑↓", "move"), ("Enter", "select"), ("s", "start"), ("q", "quit")],
            AppMode::Workout => &[("p", "pause"), ("s", "stop")],
            AppMode::Finished => &[("any key", "continue")],
            AppMode::Progress => &[("r", "reset"), ("q", "back")],
            AppMode::ConfirmReset => &[("y", "confirm"), ("n", "cancel")],
            AppMode::Info | AppMode::Stats => &[("q", "back")],
        };

        let mut spans = Vec::new();
        for (key, description) in hints {
            spans.push(Span::styled(
                format!(" {key} "),
                Style::default().fg(theme.text).bg(theme.selected_bg).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(format!(" {description}  "), Style::default().fg(theme.text_muted)));
        }
        Line::from(spans)
    };

    let status = Paragraph::new(line).style(Style::default().bg(theme.background));
    frame.render_widget(status, area);
}

/// A `width` x `height` rectangle centered in `area`.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height);
    Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    )
}

/// Seconds as `m:ss`.
fn format_clock(secs: f64) -> String {
    let total = secs.max(0.0).round() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
