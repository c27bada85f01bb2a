use std::io::Write;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info};

use crate::core::engine::{Spinner, Teardown};
use crate::core::options::SpinnerOptions;
use crate::core::timer::TimerSlot;
use crate::error::{Result, SpinnerError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Restart;

/// Replays a spinner a bounded number of times with a pause between runs.
///
/// A run that reaches its completion frame, either through the final-frame
/// timer or [`RepeatController::succeed`], counts towards `max_runs`.
/// [`RepeatController::stop`] cancels the whole cycle without counting.
pub struct RepeatController<W: Write> {
    engine: Spinner<W>,
    completed_runs: u32,
    max_runs: u32,
    pause: Duration,
    restart: TimerSlot<Restart>,
    finished: bool,
}

impl<W: Write> RepeatController<W> {
    pub fn new(engine: Spinner<W>, max_runs: u32, pause: Duration) -> Result<Self> {
        if max_runs == 0 {
            return Err(SpinnerError::InvalidOptions(
                "max loops must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            engine: engine.with_teardown(Teardown::Leave),
            completed_runs: 0,
            max_runs,
            pause,
            restart: TimerSlot::new(),
            finished: false,
        })
    }

    pub fn from_options(options: &SpinnerOptions, out: W) -> Result<Self> {
        Self::new(
            Spinner::from_options(options, out),
            options.max_loops,
            options.loop_delay,
        )
    }

    /// Starts the first run. A finished controller starts a new cycle.
    pub fn start(&mut self) -> &mut Self {
        if self.is_active() {
            return self;
        }

        if self.finished {
            self.completed_runs = 0;
            self.finished = false;
        }

        self.engine.start();
        self
    }

    /// Cancels the cycle, including a restart waiting out its pause.
    pub fn stop(&mut self) -> &mut Self {
        let was_running = self.engine.is_running();
        let was_waiting = self.restart.cancel();
        if !was_running && !was_waiting {
            return self;
        }

        self.engine.stop();
        self.engine.finish_line();
        self.finished = true;
        info!(
            "Stopped after {} of {} runs",
            self.completed_runs, self.max_runs
        );
        self
    }

    /// Completes the current run early with the completion frame.
    pub fn succeed(&mut self) -> &mut Self {
        let was_running = self.engine.is_running();
        self.engine.succeed();
        if was_running {
            self.on_run_complete();
        }
        self
    }

    pub fn fire(&mut self) {
        if self.restart.take().is_some() {
            debug!("Starting run {} of {}", self.completed_runs + 1, self.max_runs);
            self.engine.start();
            return;
        }

        let was_running = self.engine.is_running();
        self.engine.fire();
        if was_running && !self.engine.is_running() {
            self.on_run_complete();
        }
    }

    fn on_run_complete(&mut self) {
        self.completed_runs += 1;

        if self.completed_runs < self.max_runs {
            self.restart.schedule(self.pause, Restart);
            return;
        }

        self.engine.finish_line();
        self.engine
            .write_raw(&format!("\nCompleted {} loops!\n", self.completed_runs));
        self.finished = true;
        info!("Completed {} loops", self.completed_runs);
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.engine
            .next_deadline()
            .or_else(|| self.restart.deadline())
    }

    /// Whether a run is animating or a restart is pending.
    pub fn is_active(&self) -> bool {
        self.engine.is_running() || self.restart.is_pending()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn completed_runs(&self) -> u32 {
        self.completed_runs
    }

    pub fn max_runs(&self) -> u32 {
        self.max_runs
    }

    pub fn pause(&self) -> Duration {
        self.pause
    }

    pub fn engine(&self) -> &Spinner<W> {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::core::cursor::CursorTracker;
    use crate::core::definition::SpinnerDefinition;
    use crate::core::testing::{HIDE, SHOW, SharedBuffer, line};

    fn controller(max_runs: u32) -> (RepeatController<SharedBuffer>, SharedBuffer) {
        let buffer = SharedBuffer::new();
        let engine = Spinner::new(SpinnerDefinition::base(), "Loop", "/l.log", buffer.clone())
            .with_cursor(Arc::new(CursorTracker::new()));
        let controller = RepeatController::new(engine, max_runs, Duration::from_millis(300))
            .unwrap();
        (controller, buffer)
    }

    /// Fires until idle, returning the number of restarts observed.
    fn run_to_end(controller: &mut RepeatController<SharedBuffer>) -> usize {
        let mut restarts = 0;
        while controller.next_deadline().is_some() {
            let waiting = !controller.engine().is_running();
            controller.fire();
            if waiting && controller.engine().is_running() {
                restarts += 1;
            }
        }
        restarts
    }

    #[test]
    fn loops_exactly_max_runs() {
        let (mut controller, buffer) = controller(3);

        controller.start();
        let restarts = run_to_end(&mut controller);

        assert_eq!(restarts, 2);
        assert_eq!(controller.completed_runs(), 3);
        assert!(controller.is_finished());
        assert!(!controller.is_active());

        let output = buffer.contents();
        assert_eq!(output.matches(HIDE).count(), 1);
        assert_eq!(output.matches(SHOW).count(), 1);
        let done = line("Loop", "   ✓", "/l.log");
        assert!(output.ends_with(&format!("{done}\n{SHOW}\nCompleted 3 loops!\n")));
        // 5 renders plus the final redraw, per run
        assert_eq!(buffer.frames().len(), 18);
    }

    #[test]
    fn pause_separates_runs() {
        let (mut controller, _buffer) = controller(2);

        controller.start();
        for _ in 0..5 {
            controller.fire();
        }
        assert_eq!(controller.completed_runs(), 1);
        assert!(!controller.engine().is_running());
        assert!(controller.is_active());
        assert!(controller.next_deadline().is_some());

        controller.fire();
        assert!(controller.engine().is_running());
        assert_eq!(controller.engine().frame_index(), 1);
    }

    #[test]
    fn stop_is_terminal_and_uncounted() {
        let (mut controller, buffer) = controller(3);

        controller.start();
        controller.fire();
        controller.stop();

        assert_eq!(controller.completed_runs(), 0);
        assert!(controller.is_finished());
        assert!(controller.next_deadline().is_none());
        let output = buffer.contents();
        assert!(output.ends_with(&format!("\n{SHOW}")));
        assert!(!output.contains("Completed"));
    }

    #[test]
    fn stop_during_pause_cancels_restart() {
        let (mut controller, buffer) = controller(3);

        controller.start();
        for _ in 0..5 {
            controller.fire();
        }
        assert!(controller.is_active());

        controller.stop();

        assert!(!controller.is_active());
        assert_eq!(controller.completed_runs(), 1);
        assert_eq!(buffer.contents().matches(SHOW).count(), 1);
    }

    #[test]
    fn stop_when_idle_writes_nothing() {
        let (mut controller, buffer) = controller(3);

        controller.stop();

        assert!(buffer.contents().is_empty());
        assert_eq!(controller.completed_runs(), 0);
        assert!(!controller.is_finished());
    }

    #[test]
    fn succeed_counts_as_completed_run() {
        let (mut controller, buffer) = controller(2);

        controller.start();
        controller.succeed();
        assert_eq!(controller.completed_runs(), 1);
        assert!(controller.is_active());

        controller.fire();
        controller.succeed();

        assert_eq!(controller.completed_runs(), 2);
        assert!(controller.is_finished());
        assert!(buffer.contents().ends_with("Completed 2 loops!\n"));
    }

    #[test]
    fn start_after_finish_resets_cycle() {
        let (mut controller, _buffer) = controller(1);

        controller.start();
        run_to_end(&mut controller);
        assert!(controller.is_finished());

        controller.start();
        assert_eq!(controller.completed_runs(), 0);
        assert!(controller.engine().is_running());
    }

    #[test]
    fn zero_max_runs_is_rejected() {
        let engine = Spinner::new(SpinnerDefinition::base(), "x", "y", SharedBuffer::new());
        let result = RepeatController::new(engine, 0, Duration::ZERO);
        assert!(matches!(result, Err(SpinnerError::InvalidOptions(_))));
    }

    #[test]
    fn from_options_uses_loop_settings() {
        let options = SpinnerOptions {
            max_loops: 4,
            loop_delay: Duration::from_millis(50),
            ..SpinnerOptions::default()
        };
        let controller = RepeatController::from_options(&options, SharedBuffer::new()).unwrap();

        assert_eq!(controller.max_runs(), 4);
        assert_eq!(controller.pause(), Duration::from_millis(50));
    }
}
