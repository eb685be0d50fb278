//! Kegel - pelvic-floor exercise coach for your terminal.
//!
//! Generates a progressive daily routine, times each session and keeps
//! track of completed workouts.

#![allow(clippy::single_match_else)]

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use serde::Serialize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use kegel::core::{
    drive_session, format_minutes, Config, ProgressStore, Routine, RoutineGenerator,
    SessionClock, StatsAggregator,
};
use kegel::plain::PlainFrontend;
use kegel::{guide, tui, App};

/// Pelvic-floor exercise coach for your terminal
#[derive(Parser)]
#[command(name = "kegel")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory holding progress.json
    #[arg(long, global = true, env = "KEGEL_DATA_DIR", value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "KEGEL_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive coach (default)
    Run,

    /// Run today's session with plain text output
    Workout,

    /// Show current level, day and today's routine
    Status {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Print the routine for a level and day
    Routine {
        /// Level (1 or higher)
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        level: u32,

        /// Day within the level (1 or higher)
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        day: u32,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Show every day of a level
    Plan {
        /// Level (1 or higher)
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        level: u32,
    },

    /// Show workout statistics
    Stats {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Delete all progress
    Reset {
        /// Don't ask for confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// How to do the exercises
    Info,

    /// Show configuration
    Config {
        /// Show config file path
        #[arg(long)]
        path: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Commands that must work even with a broken config
    match &cli.command {
        Some(Commands::Completions { shell }) => {
            cmd_completions(*shell);
            return Ok(());
        }
        Some(Commands::Config { path: true }) => {
            return cmd_config_path(cli.config.as_deref());
        }
        _ => {}
    }

    let config = Config::resolve(cli.config.as_deref())?;
    let data_dir = resolve_data_dir(cli.data_dir.clone(), &config)?;

    // The TUI owns the terminal, so it logs to a file instead
    let interactive = matches!(cli.command, None | Some(Commands::Run));
    let log_file = interactive.then(|| data_dir.join("kegel.log"));
    init_logging(cli.verbose, log_file.as_deref());

    tracing::debug!(data_dir = ?data_dir, "Starting");
    let store = ProgressStore::in_dir(&data_dir);

    match cli.command {
        None | Some(Commands::Run) => {
            cmd_run(config, store)?;
        }
        Some(Commands::Workout) => {
            cmd_workout(&config, &store)?;
        }
        Some(Commands::Status { format }) => {
            cmd_status(&store, &format)?;
        }
        Some(Commands::Routine { level, day, format }) => {
            cmd_routine(level, day, &format)?;
        }
        Some(Commands::Plan { level }) => {
            cmd_plan(level);
        }
        Some(Commands::Stats { format }) => {
            cmd_stats(&store, &format)?;
        }
        Some(Commands::Reset { yes }) => {
            cmd_reset(&store, yes)?;
        }
        Some(Commands::Info) => {
            print!("{}", guide::render_plain());
        }
        Some(Commands::Config { .. }) => {
            println!("{}", config.to_toml()?);
        }
        Some(Commands::Completions { .. }) => {}
    }

    Ok(())
}

/// Setup logging: `warn` by default, `debug` with `--verbose`, `RUST_LOG` otherwise honoured.
fn init_logging(verbose: bool, log_file: Option<&Path>) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let layer = fmt::layer().with_target(false);
    match LogTarget::resolve(log_file) {
        LogTarget::Stderr => {
            tracing_subscriber::registry().with(layer.with_writer(io::stderr)).with(filter).init();
        }
        LogTarget::File(file) => tracing_subscriber::registry()
            .with(layer.with_ansi(false).with_writer(Mutex::new(file)))
            .with(filter)
            .init(),
        LogTarget::Discard => tracing_subscriber::registry()
            .with(layer.with_ansi(false).with_writer(io::sink))
            .with(filter)
            .init(),
    }
}

/// Where log lines go.
#[derive(Debug)]
enum LogTarget {
    /// Plain commands
    Stderr,
    /// The TUI owns the terminal
    File(fs::File),
    /// The TUI's log file could not be opened
    Discard,
}

impl LogTarget {
    fn resolve(log_file: Option<&Path>) -> Self {
        let Some(path) = log_file else {
            return Self::Stderr;
        };

        match open_log_file(path) {
            Ok(file) => Self::File(file),
            Err(e) => {
                // Printed before the alternate screen is entered
                eprintln!("Warning: logging disabled, cannot open {}: {e}", path.display());
                Self::Discard
            }
        }
    }
}

fn open_log_file(path: &Path) -> io::Result<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::OpenOptions::new().create(true).append(true).open(path)
}

/// Flag, then config, then the platform data directory.
fn resolve_data_dir(flag: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    match flag.or_else(|| config.general.data_dir.clone()) {
        Some(dir) => Ok(dir),
        None => Ok(ProgressStore::default_data_dir()?),
    }
}

/// Run the interactive TUI.
fn cmd_run(config: Config, store: ProgressStore) -> Result<()> {
    let app = App::new(config, store);
    tui::run_tui(app)
}

/// Run today's session in the plain front-end.
fn cmd_workout(config: &Config, store: &ProgressStore) -> Result<()> {
    let mut state = store.load();
    let routine = state.current_routine();

    print_routine(&routine);
    println!("\nType p + Enter to pause or resume, s + Enter to stop.\n");

    let mut clock = SessionClock::new(routine.clone());
    let mut frontend = PlainFrontend::with_stdin(io::stdout());
    let outcome = drive_session(&mut clock, &mut frontend, config.ui.tick_rate())?;

    let count_paused_time = config.session.count_paused_time;
    match store.complete_session(&mut state, &routine, &outcome, count_paused_time)? {
        Some(record) => {
            println!(
                "\nRecorded {:.0}s at level {}, day {}.",
                record.duration_seconds, record.level, record.day
            );
            if state.current_level > record.level {
                println!("LEVEL UP! Welcome to level {}.", state.current_level);
            }
            println!("Next: Level {}, Day {}", state.current_level, state.current_day);
        }
        None => {
            println!("\nSession stopped; progress not recorded.");
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct StatusReport<'a> {
    current_level: u32,
    current_day: u32,
    last_performed: Option<String>,
    total_sessions: usize,
    routine: &'a Routine,
}

/// Show current progress.
fn cmd_status(store: &ProgressStore, format: &str) -> Result<()> {
    let state = store.load();
    let routine = state.current_routine();

    match format {
        "json" => {
            let report = StatusReport {
                current_level: state.current_level,
                current_day: state.current_day,
                last_performed: state.last_performed.map(|ts| ts.to_string()),
                total_sessions: state.exercise_history.len(),
                routine: &routine,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            println!("Level:        {}", state.current_level);
            println!("Day:          {} of {}", state.current_day, routine.total_days_in_level);
            println!("Last workout: {}", state.last_performed_display());
            println!("Sessions:     {}", state.exercise_history.len());
            println!();
            print_routine(&routine);
        }
    }

    Ok(())
}

/// Print a generated routine.
fn cmd_routine(level: u32, day: u32, format: &str) -> Result<()> {
    let routine = RoutineGenerator::generate(level, day);

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&routine)?),
        _ => print_routine(&routine),
    }

    Ok(())
}

/// Print every day of a level as a table.
fn cmd_plan(level: u32) {
    let days = RoutineGenerator::days_in_level(level);
    println!("Level {level} ({days} days)\n");
    println!("{:>4}  {:>5}  {:>5}  {:>5}  {:<14}  {:>6}", "Day", "Hold", "Rest", "Reps", "Pulses", "Time");

    for day in 1..=days {
        let routine = RoutineGenerator::generate(level, day);
        println!(
            "{:>4}  {:>4}s  {:>4}s  {:>5}  {:<14}  {:>6}",
            day,
            routine.classic_hold_secs,
            routine.classic_rest_secs,
            routine.classic_reps,
            routine.pulse_display(),
            format_minutes(routine.estimated_duration().as_secs_f64() / 60.0)
        );
    }
}

/// Show statistics.
fn cmd_stats(store: &ProgressStore, format: &str) -> Result<()> {
    let state = store.load();
    let stats = StatsAggregator::calculate_now(&state.exercise_history);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    if stats.total_workouts == 0 {
        println!("No workouts yet. Run `kegel` to start your first session.");
        return Ok(());
    }

    println!("Total time:   {}", format_minutes(stats.total_duration_minutes));
    println!("Workouts:     {}", stats.total_workouts);
    println!("Workout days: {}", stats.workout_days);
    println!("Average:      {:.1} min", stats.avg_duration_minutes);

    println!("\nLast 14 days (minutes)");
    let busiest = stats.busiest_recent_day();
    for day in &stats.last_14_days {
        let len = if busiest > 0.0 { (day.duration_minutes / busiest * 30.0).round() as usize } else { 0 };
        let bar = if day.duration_minutes > 0.0 { "█".repeat(len.max(1)) } else { String::new() };
        println!("  {} {bar} {:.1}", day.date.format("%m-%d"), day.duration_minutes);
    }

    println!("\nBy level");
    for (level, avg) in &stats.level_stats {
        let total = stats.level_totals.get(level).copied().unwrap_or_default();
        println!("  Level {level:<3} avg {avg:>5.1} min  total {}", format_minutes(total));
    }

    Ok(())
}

/// Delete all progress.
fn cmd_reset(store: &ProgressStore, skip_confirm: bool) -> Result<()> {
    if !skip_confirm {
        print!("Delete all progress and history? This cannot be undone. [y/N] ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled");
            return Ok(());
        }
    }

    store.reset()?;
    println!("Progress has been reset.");
    Ok(())
}

/// Show the config file path.
fn cmd_config_path(explicit: Option<&Path>) -> Result<()> {
    let path = explicit.map(Path::to_path_buf).or_else(Config::default_path);
    match path {
        Some(path) => println!("{}", path.display()),
        None => anyhow::bail!("Could not determine config directory"),
    }
    Ok(())
}

/// Generate shell completions.
fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "kegel", &mut io::stdout());
}

fn print_routine(routine: &Routine) {
    println!("Level {}, Day {} of {}", routine.level, routine.day, routine.total_days_in_level);
    println!(
        "  Classic: {} reps, hold {}s, rest {}s",
        routine.classic_reps, routine.classic_hold_secs, routine.classic_rest_secs
    );
    println!("  Pulses:  {} (total {})", routine.pulse_display(), routine.total_pulse_reps());
    println!(
        "  Length:  about {}",
        format_minutes(routine.estimated_duration().as_secs_f64() / 60.0)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_log_target_without_file_is_stderr() {
        assert!(matches!(LogTarget::resolve(None), LogTarget::Stderr));
    }

    #[test]
    fn test_log_target_creates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("kegel.log");

        assert!(matches!(LogTarget::resolve(Some(&path)), LogTarget::File(_)));
        assert!(path.exists());
    }

    #[test]
    fn test_unopenable_log_file_never_falls_back_to_stderr() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("data");
        fs::write(&blocker, "not a directory").unwrap();

        let target = LogTarget::resolve(Some(&blocker.join("kegel.log")));
        assert!(matches!(target, LogTarget::Discard));
    }
}
