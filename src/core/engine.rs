use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::core::cursor::CursorTracker;
use crate::core::definition::SpinnerDefinition;
use crate::core::options::SpinnerOptions;
use crate::core::timer::{Timer, TimerSlot};

/// Width the label is padded to in the output line.
pub const LABEL_WIDTH: usize = 15;

/// What the engine's pending timer will do when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Render,
    Complete,
}

/// How a finished session leaves the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Teardown {
    /// End the line and show the cursor again.
    #[default]
    Restore,
    /// Leave the final frame on the line and keep the cursor hidden, for an
    /// owner that restarts the animation.
    Leave,
}

/// A single-line spinner driven by one pending timer at a time.
///
/// The engine never sleeps. Each step writes to the sink and schedules the
/// next step; whoever owns the engine calls [`Spinner::fire`] once the
/// pending deadline has passed.
pub struct Spinner<W: Write> {
    definition: SpinnerDefinition,
    label: String,
    detail: String,
    frame_index: usize,
    running: bool,
    timer: TimerSlot<Action>,
    started_at: Option<DateTime<Local>>,
    started: Option<Instant>,
    teardown: Teardown,
    cursor: Arc<CursorTracker>,
    holds_cursor: bool,
    out: W,
}

impl<W: Write> Spinner<W> {
    pub fn new(
        definition: SpinnerDefinition,
        label: impl Into<String>,
        detail: impl Into<String>,
        out: W,
    ) -> Self {
        Self {
            definition,
            label: label.into(),
            detail: detail.into(),
            frame_index: 0,
            running: false,
            timer: TimerSlot::new(),
            started_at: None,
            started: None,
            teardown: Teardown::Restore,
            cursor: CursorTracker::global(),
            holds_cursor: false,
            out,
        }
    }

    pub fn from_options(options: &SpinnerOptions, out: W) -> Self {
        Self::new(
            options.definition(),
            options.label.clone(),
            options.detail.clone(),
            out,
        )
    }

    pub fn with_cursor(mut self, cursor: Arc<CursorTracker>) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn with_teardown(mut self, teardown: Teardown) -> Self {
        self.teardown = teardown;
        self
    }

    /// Starts a new session. Does nothing if one is already running.
    pub fn start(&mut self) -> &mut Self {
        if self.running {
            return self;
        }

        self.running = true;
        self.frame_index = 0;
        self.started_at = Some(Local::now());
        self.started = Some(Instant::now());
        debug!("Starting spinner '{}'", self.label);

        self.hide_cursor();
        self.render();
        self
    }

    /// Ends the session, leaving the current frame on screen.
    pub fn stop(&mut self) -> &mut Self {
        if !self.running {
            return self;
        }

        self.running = false;
        self.timer.cancel();

        match self.teardown {
            Teardown::Restore => {
                self.draw(true);
                self.release_cursor();
            }
            Teardown::Leave => self.draw(false),
        }

        debug!(
            "Stopped spinner '{}' after {:?}",
            self.label,
            self.elapsed().unwrap_or_default()
        );
        self
    }

    /// Jumps to the completion frame and stops.
    pub fn succeed(&mut self) -> &mut Self {
        self.frame_index = self.definition.last_index();
        self.stop()
    }

    /// Runs the pending timer's callback, if any.
    pub fn fire(&mut self) {
        match self.timer.take() {
            Some(Action::Render) => self.render(),
            Some(Action::Complete) => {
                self.stop();
            }
            None => {}
        }
    }

    fn render(&mut self) {
        if !self.running {
            return;
        }

        self.draw(false);

        let interval = self.definition.interval_at(self.frame_index);
        if self.frame_index >= self.definition.last_index() {
            self.timer.schedule(interval, Action::Complete);
            return;
        }

        self.frame_index += 1;
        self.timer.schedule(interval, Action::Render);
    }

    /// The output line for the current frame.
    pub fn format_output(&self) -> String {
        format!(
            "{:<width$} {} {}",
            self.label,
            self.current_frame(),
            self.detail,
            width = LABEL_WIDTH
        )
    }

    pub fn current_frame(&self) -> &str {
        self.definition.frame(self.frame_index).unwrap_or_default()
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn definition(&self) -> &SpinnerDefinition {
        &self.definition
    }

    /// Wall-clock time the latest session started.
    pub fn started_at(&self) -> Option<DateTime<Local>> {
        self.started_at
    }

    /// Time since the latest session started.
    pub fn elapsed(&self) -> Option<Duration> {
        self.started.map(|started| started.elapsed())
    }

    pub fn pending(&self) -> Option<&Timer<Action>> {
        self.timer.get()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Ends the line and gives back the cursor reference, if held.
    pub(crate) fn finish_line(&mut self) {
        self.write_raw("\n");
        self.release_cursor();
    }

    pub(crate) fn write_raw(&mut self, text: &str) {
        self.emit("output", |out| out.write_all(text.as_bytes()));
    }

    fn draw(&mut self, newline: bool) {
        let line = self.format_output();
        self.emit("frame", |out| {
            queue!(out, Clear(ClearType::CurrentLine), Print('\r'), Print(&line))?;
            if newline {
                out.write_all(b"\n")?;
            }
            Ok(())
        });
    }

    fn hide_cursor(&mut self) {
        if self.holds_cursor {
            return;
        }
        self.holds_cursor = true;

        let cursor = Arc::clone(&self.cursor);
        self.emit("hide-cursor sequence", |out| cursor.hide(out));
    }

    fn release_cursor(&mut self) {
        if !self.holds_cursor {
            return;
        }
        self.holds_cursor = false;

        let cursor = Arc::clone(&self.cursor);
        self.emit("show-cursor sequence", |out| cursor.show(out));
    }

    fn emit(&mut self, what: &str, write: impl FnOnce(&mut W) -> io::Result<()>) {
        if let Err(e) = write(&mut self.out).and_then(|()| self.out.flush()) {
            warn!("Failed to write spinner {what}: {e}");
        }
    }
}

impl<W: Write> Drop for Spinner<W> {
    fn drop(&mut self) {
        self.stop();
        self.release_cursor();
    }
}
