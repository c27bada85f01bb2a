//! Terminal cursor visibility shared between spinners.
//!
//! Hiding the cursor is global terminal state. Each spinner takes a
//! reference while it animates; the hide sequence goes out when the first
//! reference is taken and the show sequence when the last one is dropped.

use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use crossterm::cursor::{Hide, Show};
use crossterm::queue;

static GLOBAL: OnceLock<Arc<CursorTracker>> = OnceLock::new();

/// Reference count of spinners that want the cursor hidden.
#[derive(Debug, Default)]
pub struct CursorTracker {
    hidden: AtomicUsize,
}

impl CursorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide tracker used by spinners unless one is injected.
    pub fn global() -> Arc<Self> {
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(Self::new())))
    }

    /// Takes a reference, writing the hide sequence if it is the first.
    pub fn hide<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.hidden.fetch_add(1, Ordering::SeqCst) == 0 {
            queue!(out, Hide)?;
        }
        Ok(())
    }

    /// Drops a reference, writing the show sequence if it was the last.
    pub fn show<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let previous = self
            .hidden
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .unwrap_or(0);

        if previous == 1 {
            queue!(out, Show)?;
        }
        Ok(())
    }

    pub fn hidden_count(&self) -> usize {
        self.hidden.load(Ordering::SeqCst)
    }
}
