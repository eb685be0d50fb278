//! Line-oriented session front-end.
//!
//! Prints one line whenever the countdown, phase or pause state changes and
//! reads commands (`p` + Enter to pause, `s` + Enter to stop) from stdin on a
//! background thread. Works over pipes and in terminals without raw mode.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use crate::core::{Phase, SessionFrontend, SessionSnapshot, TickInput};

/// A command typed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlainCommand {
    TogglePause,
    Stop,
}

impl PlainCommand {
    /// Parse one input line.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "p" | "pause" | "r" | "resume" => Some(Self::TogglePause),
            "s" | "q" | "stop" | "quit" => Some(Self::Stop),
            _ => None,
        }
    }
}

/// What the last printed line showed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineKey {
    phase: Phase,
    display_secs: u32,
    rep: u32,
    set: u32,
    paused: bool,
}

impl From<&SessionSnapshot> for LineKey {
    fn from(snapshot: &SessionSnapshot) -> Self {
        Self {
            phase: snapshot.phase,
            display_secs: snapshot.display_secs,
            rep: snapshot.rep,
            set: snapshot.set,
            paused: snapshot.paused,
        }
    }
}

/// Plain-text [`SessionFrontend`].
pub struct PlainFrontend<W: Write> {
    out: W,
    commands: Option<Receiver<PlainCommand>>,
    last_tick: Instant,
    last_line: Option<LineKey>,
}

impl<W: Write> PlainFrontend<W> {
    /// Front-end reading commands from `commands`.
    pub fn new(out: W, commands: Receiver<PlainCommand>) -> Self {
        Self { out, commands: Some(commands), last_tick: Instant::now(), last_line: None }
    }

    /// Front-end reading commands from stdin.
    pub fn with_stdin(out: W) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines().map_while(Result::ok) {
                if let Some(command) = PlainCommand::parse(&line) {
                    if tx.send(command).is_err() {
                        break;
                    }
                }
            }
        });

        Self::new(out, rx)
    }

    /// Consume the front-end, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SessionFrontend for PlainFrontend<W> {
    fn render(&mut self, snapshot: &SessionSnapshot) -> anyhow::Result<()> {
        let key = LineKey::from(snapshot);
        if self.last_line == Some(key) {
            return Ok(());
        }
        self.last_line = Some(key);

        writeln!(self.out, "{}", format_line(snapshot))?;
        self.out.flush()?;
        Ok(())
    }

    fn poll(&mut self, timeout: Duration) -> anyhow::Result<TickInput> {
        let command = match &self.commands {
            Some(rx) => match rx.recv_timeout(timeout) {
                Ok(command) => Some(command),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => {
                    // Input closed; keep running on time alone
                    self.commands = None;
                    None
                }
            },
            None => {
                thread::sleep(timeout);
                None
            }
        };

        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;

        Ok(TickInput {
            elapsed,
            toggle_pause: command == Some(PlainCommand::TogglePause),
            stop: command == Some(PlainCommand::Stop),
        })
    }
}

/// One status line, e.g. `[set 2/3 rep 4/12] PULSE SQUEEZE 1`.
pub fn format_line(snapshot: &SessionSnapshot) -> String {
    match snapshot.phase {
        Phase::Completed | Phase::Stopped => return snapshot.phase.label().to_string(),
        Phase::PulseSetIntro => {
            return format!(
                "{} - PULSE SET {}/{} in {}",
                snapshot.phase.label(),
                snapshot.set,
                snapshot.set_total,
                snapshot.display_secs
            );
        }
        _ => {}
    }

    let position = if snapshot.set > 0 {
        format!("set {}/{} rep {}/{}", snapshot.set, snapshot.set_total, snapshot.rep, snapshot.rep_total)
    } else {
        format!("rep {}/{}", snapshot.rep, snapshot.rep_total)
    };
    let paused = if snapshot.paused { "  (paused, p to resume)" } else { "" };

    format!("[{position}] {} {}{paused}", snapshot.phase.label(), snapshot.display_secs)
}
