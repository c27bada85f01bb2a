//! Runs a spinner on the tokio runtime.
//!
//! The spinner state machines are synchronous. The driver owns one on a
//! task, sleeps until its pending deadline, fires it, and applies commands
//! sent through a [`SpinnerHandle`] in between.

use std::future::Future;
use std::io::Write;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::debug;

use crate::core::engine::Spinner;
use crate::core::repeat::RepeatController;
use crate::error::Result;

/// Something the driver can animate.
pub trait Animation {
    fn start(&mut self);
    fn stop(&mut self);
    fn succeed(&mut self);
    /// Runs the pending timer's callback.
    fn fire(&mut self);
    /// When the pending timer is due, or `None` once the animation is idle.
    fn next_deadline(&self) -> Option<Instant>;
}

impl<W: Write> Animation for Spinner<W> {
    fn start(&mut self) {
        Spinner::start(self);
    }

    fn stop(&mut self) {
        Spinner::stop(self);
    }

    fn succeed(&mut self) {
        Spinner::succeed(self);
    }

    fn fire(&mut self) {
        Spinner::fire(self);
    }

    fn next_deadline(&self) -> Option<Instant> {
        Spinner::next_deadline(self)
    }
}

impl<W: Write> Animation for RepeatController<W> {
    fn start(&mut self) {
        RepeatController::start(self);
    }

    fn stop(&mut self) {
        RepeatController::stop(self);
    }

    fn succeed(&mut self) {
        RepeatController::succeed(self);
    }

    fn fire(&mut self) {
        RepeatController::fire(self);
    }

    fn next_deadline(&self) -> Option<Instant> {
        RepeatController::next_deadline(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Stop,
    Succeed,
}

/// Cloneable sender of commands to a driven spinner.
///
/// Commands sent after the animation has finished are ignored.
#[derive(Debug, Clone)]
pub struct SpinnerControl {
    commands: mpsc::UnboundedSender<Command>,
}

impl SpinnerControl {
    pub fn stop(&self) {
        let _ = self.commands.send(Command::Stop);
    }

    pub fn succeed(&self) {
        let _ = self.commands.send(Command::Succeed);
    }
}

/// Handle to an animation running on its own task.
pub struct SpinnerHandle<A> {
    control: SpinnerControl,
    task: JoinHandle<A>,
}

impl<A> SpinnerHandle<A> {
    pub fn stop(&self) {
        self.control.stop();
    }

    pub fn succeed(&self) {
        self.control.succeed();
    }

    pub fn control(&self) -> SpinnerControl {
        self.control.clone()
    }

    /// Waits for the animation to go idle and hands it back.
    pub async fn join(self) -> Result<A> {
        Ok(self.task.await?)
    }
}

/// Starts `animation` on a new task.
pub fn spawn<A>(animation: A) -> SpinnerHandle<A>
where
    A: Animation + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(drive(animation, rx));

    SpinnerHandle {
        control: SpinnerControl { commands: tx },
        task,
    }
}

async fn drive<A: Animation>(
    mut animation: A,
    mut commands: mpsc::UnboundedReceiver<Command>,
) -> A {
    animation.start();
    let mut listening = true;

    while let Some(deadline) = animation.next_deadline() {
        tokio::select! {
            () = time::sleep_until(deadline) => animation.fire(),
            command = commands.recv(), if listening => match command {
                Some(Command::Stop) => animation.stop(),
                Some(Command::Succeed) => animation.succeed(),
                None => listening = false,
            },
        }
    }

    debug!("Spinner task finished");
    animation
}

/// Animates while `operation` runs, then marks the outcome.
///
/// The spinner succeeds if the operation returns `Ok` and is stopped on
/// the current frame otherwise. Returns the operation's own result once the
/// animation has finished.
pub async fn track<A, F, T, E>(animation: A, operation: F) -> Result<std::result::Result<T, E>>
where
    A: Animation + Send + 'static,
    F: Future<Output = std::result::Result<T, E>>,
{
    let handle = spawn(animation);
    let outcome = operation.await;

    match outcome {
        Ok(_) => handle.succeed(),
        Err(_) => handle.stop(),
    }
    handle.join().await?;

    Ok(outcome)
}
