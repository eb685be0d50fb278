//! Exercise session state machine.
//!
//! A [`SessionClock`] walks one [`Routine`] through its timed phases:
//! classic hold/rest repetitions, then three pulse sets of rapid
//! squeeze/release reps separated by rests. It is driven by explicit ticks
//! carrying the elapsed time and any pause/stop request, so the same clock
//! works under a blocking poll loop, the TUI event loop, or a test script.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use super::routine::{
    Routine, PULSE_RELEASE_SECS, PULSE_SETS, PULSE_SET_INTRO_SECS, PULSE_SET_REST_SECS,
    PULSE_SQUEEZE_SECS,
};

/// Remaining time at or below this is treated as a phase boundary.
const BOUNDARY_EPSILON: f64 = 1e-9;

/// Session phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Phase {
    /// Created but not started
    Idle,
    /// Classic squeeze, held
    ClassicHold,
    /// Relaxation after a classic squeeze
    ClassicRest,
    /// "Get ready" frame before a pulse set
    PulseSetIntro,
    /// Quick pulse squeeze
    PulseSqueeze,
    /// Quick pulse release
    PulseRelease,
    /// Rest between pulse sets
    PulseSetRest,
    /// Every phase ran to the end
    Completed,
    /// Stopped by the user
    Stopped,
}

impl Phase {
    /// Whether the session can no longer change.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Stopped)
    }

    /// Whether the user should be contracting.
    pub fn is_squeeze(self) -> bool {
        matches!(self, Self::ClassicHold | Self::PulseSqueeze)
    }

    /// Whether this phase belongs to the pulse block.
    pub fn is_pulse(self) -> bool {
        matches!(
            self,
            Self::PulseSetIntro | Self::PulseSqueeze | Self::PulseRelease | Self::PulseSetRest
        )
    }

    /// Label shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "GET READY",
            Self::ClassicHold => "SQUEEZE",
            Self::ClassicRest => "REST",
            Self::PulseSetIntro => "GET READY FOR PULSES",
            Self::PulseSqueeze => "PULSE SQUEEZE",
            Self::PulseRelease => "RELEASE",
            Self::PulseSetRest => "REST BETWEEN SETS",
            Self::Completed => "SESSION COMPLETE",
            Self::Stopped => "SESSION STOPPED",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything a front-end reports for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Time since the previous tick
    pub elapsed: Duration,
    /// Flip the paused flag
    pub toggle_pause: bool,
    /// Stop the session
    pub stop: bool,
}

impl TickInput {
    /// A tick that only advances time.
    pub fn elapsed(elapsed: Duration) -> Self {
        Self { elapsed, ..Self::default() }
    }

    /// A tick carrying a stop request.
    pub fn stop() -> Self {
        Self { stop: true, ..Self::default() }
    }

    /// A tick carrying a pause toggle.
    pub fn toggle_pause() -> Self {
        Self { toggle_pause: true, ..Self::default() }
    }
}

/// What a renderer needs to draw the session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    /// Continuous time left in the current phase
    pub remaining_secs: f64,
    /// Countdown value to show (ceiling of `remaining_secs`, never 0 while running)
    pub display_secs: u32,
    /// Fraction of the current phase already elapsed
    pub phase_progress: f64,
    /// Current rep, 1-based (classic rep or rep within the pulse set)
    pub rep: u32,
    pub rep_total: u32,
    /// Current pulse set, 1-based; 0 during the classic block
    pub set: u32,
    pub set_total: u32,
    pub paused: bool,
    /// Session time excluding pauses
    pub active_secs: f64,
    /// Session time including pauses
    pub wall_secs: f64,
}

impl SessionSnapshot {
    /// Reps still to do in the current block, counting the current one.
    pub fn reps_remaining(&self) -> u32 {
        (self.rep_total + 1).saturating_sub(self.rep)
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum SessionOutcome {
    Completed { active_secs: f64, wall_secs: f64 },
    Stopped { active_secs: f64, wall_secs: f64, phase: Phase },
}

impl SessionOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Duration to record for the session.
    ///
    /// With `count_paused_time` the wall-clock span is used, otherwise only
    /// the time spent exercising.
    pub fn recorded_secs(&self, count_paused_time: bool) -> f64 {
        let (active, wall) = match *self {
            Self::Completed { active_secs, wall_secs }
            | Self::Stopped { active_secs, wall_secs, .. } => (active_secs, wall_secs),
        };
        if count_paused_time {
            wall
        } else {
            active
        }
    }
}

/// Drives one routine through its phases.
#[derive(Debug, Clone)]
pub struct SessionClock {
    routine: Routine,
    phase: Phase,
    /// Seconds left in the current phase
    remaining: f64,
    /// Full length of the current phase
    phase_length: f64,
    /// 0-based rep within the classic block or the current pulse set
    rep_index: u32,
    /// 0-based pulse set
    set_index: usize,
    paused: bool,
    active_secs: f64,
    wall_secs: f64,
    /// Phase the user stopped in
    stopped_in: Option<Phase>,
}

impl SessionClock {
    /// Create a clock for a routine. The clock starts `Idle`.
    pub fn new(routine: Routine) -> Self {
        Self {
            routine,
            phase: Phase::Idle,
            remaining: 0.0,
            phase_length: 0.0,
            rep_index: 0,
            set_index: 0,
            paused: false,
            active_secs: 0.0,
            wall_secs: 0.0,
            stopped_in: None,
        }
    }

    pub fn routine(&self) -> &Routine {
        &self.routine
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Leave `Idle` and begin the first hold. No-op once started.
    pub fn start(&mut self) {
        if self.phase == Phase::Idle {
            tracing::debug!(
                level = self.routine.level,
                day = self.routine.day,
                "Starting session"
            );
            self.rep_index = 0;
            self.set_index = 0;
            self.enter(Phase::ClassicHold);
        }
    }

    /// Flip the paused flag. Ignored once the session has ended.
    pub fn toggle_pause(&mut self) {
        if !self.is_finished() {
            self.paused = !self.paused;
            tracing::debug!(paused = self.paused, phase = ?self.phase, "Pause toggled");
        }
    }

    /// Stop the session immediately.
    pub fn stop(&mut self) {
        if !self.is_finished() {
            tracing::debug!(phase = ?self.phase, "Session stopped");
            self.stopped_in = Some(self.phase);
            self.paused = false;
            self.phase = Phase::Stopped;
            self.remaining = 0.0;
        }
    }

    /// Advance the clock by one tick.
    ///
    /// A stop request wins over everything else in the same tick. The
    /// elapsed time is booked under the paused state it was spent in, and a
    /// pause toggle only takes effect after it. While paused, only wall-clock
    /// time accumulates. Time left over after a phase ends carries into the
    /// next one.
    pub fn tick(&mut self, input: TickInput) -> SessionSnapshot {
        if self.is_finished() {
            return self.snapshot();
        }

        if input.stop {
            self.stop();
            return self.snapshot();
        }

        let elapsed = input.elapsed.as_secs_f64();
        if self.paused {
            self.wall_secs += elapsed;
        } else {
            self.start();
            let leftover = self.consume(elapsed);
            let used = elapsed - leftover;
            self.active_secs += used;
            self.wall_secs += used;
        }

        if input.toggle_pause {
            self.toggle_pause();
        }

        self.snapshot()
    }

    /// Current render state.
    pub fn snapshot(&self) -> SessionSnapshot {
        let running = !matches!(self.phase, Phase::Idle) && !self.is_finished();
        let display_secs = if running { (self.remaining.ceil() as u32).max(1) } else { 0 };
        let phase_progress = if self.phase_length > 0.0 {
            (1.0 - self.remaining / self.phase_length).clamp(0.0, 1.0)
        } else if self.phase == Phase::Completed {
            1.0
        } else {
            0.0
        };

        let in_pulses = self.phase.is_pulse()
            || matches!(self.stopped_in, Some(phase) if phase.is_pulse())
            || self.phase == Phase::Completed;
        let (rep_total, set) = if in_pulses {
            (self.routine.pulse_set_reps[self.set_index.min(PULSE_SETS - 1)], self.set_index as u32 + 1)
        } else {
            (self.routine.classic_reps, 0)
        };

        SessionSnapshot {
            phase: self.phase,
            remaining_secs: self.remaining.max(0.0),
            display_secs,
            phase_progress,
            rep: (self.rep_index + 1).min(rep_total),
            rep_total,
            set,
            set_total: PULSE_SETS as u32,
            paused: self.paused,
            active_secs: self.active_secs,
            wall_secs: self.wall_secs,
        }
    }

    /// Final outcome, once the session has ended.
    pub fn outcome(&self) -> Option<SessionOutcome> {
        match self.phase {
            Phase::Completed => Some(SessionOutcome::Completed {
                active_secs: self.active_secs,
                wall_secs: self.wall_secs,
            }),
            Phase::Stopped => Some(SessionOutcome::Stopped {
                active_secs: self.active_secs,
                wall_secs: self.wall_secs,
                phase: self.stopped_in.unwrap_or(Phase::Idle),
            }),
            _ => None,
        }
    }

    /// Spend `budget` seconds on the phase sequence, returning what is left
    /// once the session completes.
    fn consume(&mut self, mut budget: f64) -> f64 {
        while !self.is_finished() {
            if self.remaining - budget > BOUNDARY_EPSILON {
                self.remaining -= budget;
                return 0.0;
            }
            budget = (budget - self.remaining).max(0.0);
            self.advance_phase();
        }
        budget
    }

    fn advance_phase(&mut self) {
        match self.phase {
            Phase::Idle => self.enter(Phase::ClassicHold),
            Phase::ClassicHold => self.enter(Phase::ClassicRest),
            Phase::ClassicRest => {
                self.rep_index += 1;
                if self.rep_index < self.routine.classic_reps {
                    self.enter(Phase::ClassicHold);
                } else {
                    self.rep_index = 0;
                    self.set_index = 0;
                    self.enter(Phase::PulseSetIntro);
                }
            }
            Phase::PulseSetIntro => {
                self.rep_index = 0;
                self.enter(Phase::PulseSqueeze);
            }
            Phase::PulseSqueeze => self.enter(Phase::PulseRelease),
            Phase::PulseRelease => {
                self.rep_index += 1;
                if self.rep_index < self.routine.pulse_set_reps[self.set_index] {
                    self.enter(Phase::PulseSqueeze);
                } else if self.set_index + 1 < PULSE_SETS {
                    self.enter(Phase::PulseSetRest);
                } else {
                    tracing::debug!(active_secs = self.active_secs, "Session completed");
                    self.enter(Phase::Completed);
                }
            }
            Phase::PulseSetRest => {
                self.set_index += 1;
                self.rep_index = 0;
                self.enter(Phase::PulseSetIntro);
            }
            Phase::Completed | Phase::Stopped => {}
        }
    }

    fn enter(&mut self, phase: Phase) {
        let length = self.phase_duration(phase);
        self.phase = phase;
        self.phase_length = length;
        self.remaining = length;
    }

    fn phase_duration(&self, phase: Phase) -> f64 {
        match phase {
            Phase::ClassicHold => f64::from(self.routine.classic_hold_secs),
            Phase::ClassicRest => f64::from(self.routine.classic_rest_secs),
            Phase::PulseSetIntro => PULSE_SET_INTRO_SECS,
            Phase::PulseSqueeze => PULSE_SQUEEZE_SECS,
            Phase::PulseRelease => PULSE_RELEASE_SECS,
            Phase::PulseSetRest => PULSE_SET_REST_SECS,
            Phase::Idle | Phase::Completed | Phase::Stopped => 0.0,
        }
    }
}

/// A renderer plus input source for a running session.
///
/// The TUI drives [`SessionClock`] from its own event loop; simpler
/// front-ends implement this trait and hand control to [`drive_session`].
pub trait SessionFrontend {
    /// Draw the current state.
    fn render(&mut self, snapshot: &SessionSnapshot) -> anyhow::Result<()>;

    /// Wait up to `timeout` for input and report the tick.
    fn poll(&mut self, timeout: Duration) -> anyhow::Result<TickInput>;
}

/// Run a session to completion or stop on the given front-end.
pub fn drive_session<F>(
    clock: &mut SessionClock,
    frontend: &mut F,
    tick_rate: Duration,
) -> anyhow::Result<SessionOutcome>
where
    F: SessionFrontend + ?Sized,
{
    clock.start();

    loop {
        if let Some(outcome) = clock.outcome() {
            frontend.render(&clock.snapshot())?;
            return Ok(outcome);
        }

        frontend.render(&clock.snapshot())?;
        let input = frontend.poll(tick_rate)?;
        clock.tick(input);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RoutineGenerator;

    fn small_routine() -> Routine {
        Routine {
            level: 1,
            day: 1,
            classic_hold_secs: 4,
            classic_rest_secs: 4,
            classic_reps: 2,
            pulse_set_reps: [5, 5, 5],
            total_days_in_level: 5,
        }
    }

    fn secs(value: f64) -> TickInput {
        TickInput::elapsed(Duration::from_secs_f64(value))
    }

    /// Tick until finished, recording every phase change.
    fn run_recording(clock: &mut SessionClock, step: f64) -> Vec<Phase> {
        let mut phases = vec![clock.phase()];
        for _ in 0..1_000_000 {
            let snapshot = clock.tick(secs(step));
            if phases.last() != Some(&snapshot.phase) {
                phases.push(snapshot.phase);
            }
            if clock.is_finished() {
                break;
            }
        }
        phases
    }

    #[test]
    fn test_clock_starts_idle() {
        let clock = SessionClock::new(small_routine());
        assert_eq!(clock.phase(), Phase::Idle);
        assert!(clock.outcome().is_none());
        assert_eq!(clock.snapshot().display_secs, 0);
    }

    #[test]
    fn test_first_tick_starts_hold() {
        let mut clock = SessionClock::new(small_routine());
        let snapshot = clock.tick(secs(0.5));
        assert_eq!(snapshot.phase, Phase::ClassicHold);
        assert!((snapshot.remaining_secs - 3.5).abs() < 1e-9);
        assert_eq!(snapshot.display_secs, 4);
        assert_eq!(snapshot.rep, 1);
        assert_eq!(snapshot.rep_total, 2);
        assert_eq!(snapshot.set, 0);
    }

    #[test]
    fn test_full_phase_sequence() {
        let mut clock = SessionClock::new(small_routine());
        let phases = run_recording(&mut clock, 0.05);

        let count = |phase: Phase| phases.iter().filter(|p| **p == phase).count();
        assert_eq!(count(Phase::ClassicHold), 2);
        assert_eq!(count(Phase::ClassicRest), 2);
        assert_eq!(count(Phase::PulseSetIntro), 3);
        assert_eq!(count(Phase::PulseSqueeze), 15);
        assert_eq!(count(Phase::PulseRelease), 15);
        assert_eq!(count(Phase::PulseSetRest), 2);
        assert_eq!(phases.last(), Some(&Phase::Completed));

        assert_eq!(
            &phases[..6],
            &[
                Phase::Idle,
                Phase::ClassicHold,
                Phase::ClassicRest,
                Phase::ClassicHold,
                Phase::ClassicRest,
                Phase::PulseSetIntro,
            ]
        );
        // No rest after the final set
        let last_rest = phases.iter().rposition(|p| *p == Phase::PulseSetRest).unwrap();
        let last_intro = phases.iter().rposition(|p| *p == Phase::PulseSetIntro).unwrap();
        assert!(last_rest < last_intro);
    }

    #[test]
    fn test_completed_duration_matches_plan() {
        let routine = small_routine();
        let planned = routine.estimated_duration().as_secs_f64();
        let mut clock = SessionClock::new(routine);
        run_recording(&mut clock, 0.1);

        match clock.outcome() {
            Some(SessionOutcome::Completed { active_secs, wall_secs }) => {
                assert!((active_secs - planned).abs() < 1e-6, "{active_secs} vs {planned}");
                assert!((wall_secs - planned).abs() < 1e-6);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_large_tick_carries_into_next_phase() {
        let mut clock = SessionClock::new(small_routine());
        let snapshot = clock.tick(secs(5.0));
        assert_eq!(snapshot.phase, Phase::ClassicRest);
        assert!((snapshot.remaining_secs - 3.0).abs() < 1e-9);
        assert!((snapshot.active_secs - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_huge_tick_completes_without_overcounting() {
        let routine = small_routine();
        let planned = routine.estimated_duration().as_secs_f64();
        let mut clock = SessionClock::new(routine);
        let snapshot = clock.tick(secs(10_000.0));
        assert_eq!(snapshot.phase, Phase::Completed);
        assert!((snapshot.active_secs - planned).abs() < 1e-6);
    }

    #[test]
    fn test_display_never_shows_zero() {
        let mut clock = SessionClock::new(small_routine());
        let snapshot = clock.tick(secs(3.0));
        assert_eq!(snapshot.phase, Phase::ClassicHold);
        assert_eq!(snapshot.display_secs, 1);

        let snapshot = clock.tick(secs(1.0));
        assert_eq!(snapshot.phase, Phase::ClassicRest);
        assert_eq!(snapshot.display_secs, 4);
    }

    #[test]
    fn test_display_is_ceiling() {
        let mut clock = SessionClock::new(small_routine());
        let snapshot = clock.tick(secs(0.8));
        assert_eq!(snapshot.display_secs, 4);
        let snapshot = clock.tick(secs(0.3));
        assert_eq!(snapshot.display_secs, 3);
    }

    #[test]
    fn test_pause_freezes_phase() {
        let mut clock = SessionClock::new(small_routine());
        clock.tick(secs(1.0));

        let running = clock.tick(secs(1.0));
        assert!(!running.paused);
        let paused = clock.tick(TickInput::toggle_pause());
        assert!(paused.paused);
        assert_eq!(paused.phase, Phase::ClassicHold);
        assert!((paused.remaining_secs - 2.0).abs() < 1e-9);

        let still = clock.tick(secs(30.0));
        assert_eq!(still.phase, Phase::ClassicHold);
        assert!((still.remaining_secs - 2.0).abs() < 1e-9);
        assert!((still.active_secs - 2.0).abs() < 1e-9);
        assert!((still.wall_secs - 32.0).abs() < 1e-9);

        let resumed = clock.tick(TickInput::toggle_pause());
        assert!(!resumed.paused);
        assert_eq!(resumed.phase, Phase::ClassicHold);
        assert!((resumed.remaining_secs - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_pause_toggle_books_tick_under_previous_state() {
        let mut clock = SessionClock::new(small_routine());
        clock.tick(secs(1.0));

        // The two seconds before the pause key were spent exercising
        let paused = clock.tick(TickInput { elapsed: Duration::from_secs(2), toggle_pause: true, stop: false });
        assert!(paused.paused);
        assert!((paused.remaining_secs - 1.0).abs() < 1e-9);
        assert!((paused.active_secs - 3.0).abs() < 1e-9);
        assert!((paused.wall_secs - 3.0).abs() < 1e-9);

        clock.tick(secs(30.0));

        // The second before the resume key was spent paused
        let resumed = clock.tick(TickInput { elapsed: Duration::from_secs(1), toggle_pause: true, stop: false });
        assert!(!resumed.paused);
        assert_eq!(resumed.phase, Phase::ClassicHold);
        assert!((resumed.remaining_secs - 1.0).abs() < 1e-9);
        assert!((resumed.active_secs - 3.0).abs() < 1e-9);
        assert!((resumed.wall_secs - 34.0).abs() < 1e-9);

        let next = clock.tick(secs(0.5));
        assert!((next.remaining_secs - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_paused_time_excluded_from_recorded_duration() {
        let routine = small_routine();
        let planned = routine.estimated_duration().as_secs_f64();
        let mut clock = SessionClock::new(routine);
        clock.tick(secs(1.0));
        clock.tick(TickInput::toggle_pause());
        clock.tick(secs(60.0));
        clock.tick(TickInput::toggle_pause());
        run_recording(&mut clock, 0.1);

        let outcome = clock.outcome().unwrap();
        assert!(outcome.is_completed());
        assert!((outcome.recorded_secs(false) - planned).abs() < 1e-6);
        assert!((outcome.recorded_secs(true) - (planned + 60.0)).abs() < 1e-6);
    }

    #[test]
    fn test_stop_from_every_phase() {
        let routine = small_routine();
        let mut reference = SessionClock::new(routine.clone());
        let phases = run_recording(&mut reference, 0.05);

        for target in phases.iter().filter(|p| !p.is_terminal()) {
            let mut clock = SessionClock::new(routine.clone());
            while clock.phase() != *target {
                clock.tick(secs(0.05));
            }
            clock.tick(TickInput::stop());
            assert_eq!(clock.phase(), Phase::Stopped);
            match clock.outcome() {
                Some(SessionOutcome::Stopped { phase, .. }) => assert_eq!(phase, *target),
                other => panic!("unexpected outcome {other:?}"),
            }
        }
    }

    #[test]
    fn test_stop_wins_over_elapsed_in_same_tick() {
        let mut clock = SessionClock::new(small_routine());
        clock.tick(secs(1.0));
        let snapshot = clock.tick(TickInput {
            elapsed: Duration::from_secs(10_000),
            toggle_pause: false,
            stop: true,
        });
        assert_eq!(snapshot.phase, Phase::Stopped);
        assert!((snapshot.active_secs - 1.0).abs() < 1e-9);
        assert!(!clock.outcome().unwrap().is_completed());
    }

    #[test]
    fn test_stop_while_paused() {
        let mut clock = SessionClock::new(small_routine());
        clock.tick(secs(1.0));
        clock.toggle_pause();
        clock.tick(TickInput::stop());
        assert_eq!(clock.phase(), Phase::Stopped);
        assert!(!clock.is_paused());
    }

    #[test]
    fn test_terminal_state_ignores_ticks() {
        let mut clock = SessionClock::new(small_routine());
        clock.stop();
        let before = clock.snapshot();
        let after = clock.tick(secs(5.0));
        assert_eq!(before, after);
        clock.toggle_pause();
        assert!(!clock.is_paused());
    }

    #[test]
    fn test_pulse_snapshot_tracks_sets() {
        let mut clock = SessionClock::new(small_routine());
        // Classic block: 2 * (4 + 4) = 16s, then a 2s intro
        let snapshot = clock.tick(secs(16.0 + 2.0 + 0.1));
        assert_eq!(snapshot.phase, Phase::PulseSqueeze);
        assert_eq!(snapshot.set, 1);
        assert_eq!(snapshot.rep, 1);
        assert_eq!(snapshot.rep_total, 5);
        assert_eq!(snapshot.reps_remaining(), 5);

        // Finish set one: 5 reps * 1.2s, minus the 0.1 already spent
        let snapshot = clock.tick(secs(6.0 - 0.1 + 0.5));
        assert_eq!(snapshot.phase, Phase::PulseSetRest);
        assert_eq!(snapshot.set, 1);
    }

    #[test]
    fn test_generated_routine_runs_to_completion() {
        let mut clock = SessionClock::new(RoutineGenerator::generate(4, 2));
        run_recording(&mut clock, 0.1);
        assert_eq!(clock.phase(), Phase::Completed);
    }

    struct ScriptedFrontend {
        script: Vec<TickInput>,
        renders: usize,
    }

    impl SessionFrontend for ScriptedFrontend {
        fn render(&mut self, _snapshot: &SessionSnapshot) -> anyhow::Result<()> {
            self.renders += 1;
            Ok(())
        }

        fn poll(&mut self, timeout: Duration) -> anyhow::Result<TickInput> {
            if self.script.is_empty() {
                Ok(TickInput::elapsed(timeout))
            } else {
                Ok(self.script.remove(0))
            }
        }
    }

    #[test]
    fn test_drive_session_completes() {
        let mut clock = SessionClock::new(small_routine());
        let mut frontend = ScriptedFrontend { script: Vec::new(), renders: 0 };
        let outcome = drive_session(&mut clock, &mut frontend, Duration::from_millis(100)).unwrap();
        assert!(outcome.is_completed());
        assert!(frontend.renders > 100);
    }

    #[test]
    fn test_drive_session_stops() {
        let mut clock = SessionClock::new(small_routine());
        let mut frontend = ScriptedFrontend {
            script: vec![secs(1.0), TickInput::toggle_pause(), TickInput::stop()],
            renders: 0,
        };
        let outcome = drive_session(&mut clock, &mut frontend, Duration::from_millis(100)).unwrap();
        assert!(!outcome.is_completed());
        assert_eq!(frontend.renders, 4);
    }
}
