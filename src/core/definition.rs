use std::time::Duration;

use crate::error::{Result, SpinnerError};

const BASE_FRAMES: &[&str] = &["→   ", " →  ", "  → ", "   →", "   ✓"];
const BASE_INTERVAL_MS: u64 = 120;

const EASE_OUT_FRAMES: &[&str] = &["→___", "-→__", "--→_", "---→", "---→", "---→", "---✓"];
const EASE_OUT_INTERVAL_MS: u64 = 80;
const EASE_OUT_INTERVALS_MS: &[u64] = &[80, 85, 95, 110, 130, 160, 500];

/// Frames plus timing for one spinner animation.
///
/// The last frame is the completion glyph. Definitions are immutable and can
/// be shared by any number of spinners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinnerDefinition {
    frames: Vec<String>,
    interval: Duration,
    frame_intervals: Option<Vec<Duration>>,
}

impl SpinnerDefinition {
    /// Creates a definition with a uniform frame interval.
    pub fn new<I, S>(frames: I, interval: Duration) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let frames: Vec<String> = frames.into_iter().map(Into::into).collect();

        if frames.is_empty() {
            return Err(SpinnerError::InvalidDefinition(
                "at least one frame is required".to_string(),
            ));
        }
        if interval.is_zero() {
            return Err(SpinnerError::InvalidDefinition(
                "interval must be positive".to_string(),
            ));
        }

        Ok(Self {
            frames,
            interval,
            frame_intervals: None,
        })
    }

    /// Overrides the interval of each frame by index.
    ///
    /// There must be exactly one positive interval per frame.
    pub fn with_frame_intervals(mut self, intervals: Vec<Duration>) -> Result<Self> {
        if intervals.len() != self.frames.len() {
            return Err(SpinnerError::InvalidDefinition(format!(
                "{} frame intervals given for {} frames",
                intervals.len(),
                self.frames.len()
            )));
        }
        if let Some(index) = intervals.iter().position(Duration::is_zero) {
            return Err(SpinnerError::InvalidDefinition(format!(
                "interval for frame {index} must be positive"
            )));
        }

        self.frame_intervals = Some(intervals);
        Ok(self)
    }

    /// Arrow sliding right into a check mark, 120ms per frame.
    pub fn base() -> Self {
        Self {
            frames: BASE_FRAMES.iter().map(|f| f.to_string()).collect(),
            interval: Duration::from_millis(BASE_INTERVAL_MS),
            frame_intervals: None,
        }
    }

    /// Arrow trailing dashes, slowing down towards the check mark.
    pub fn ease_out() -> Self {
        Self {
            frames: EASE_OUT_FRAMES.iter().map(|f| f.to_string()).collect(),
            interval: Duration::from_millis(EASE_OUT_INTERVAL_MS),
            frame_intervals: Some(
                EASE_OUT_INTERVALS_MS
                    .iter()
                    .copied()
                    .map(Duration::from_millis)
                    .collect(),
            ),
        }
    }

    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    pub fn frame(&self, index: usize) -> Option<&str> {
        self.frames.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false: construction rejects empty frame lists.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Index of the completion frame.
    pub fn last_index(&self) -> usize {
        self.frames.len() - 1
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// How long the frame at `index` stays on screen.
    ///
    /// Falls back to the default interval when there is no per-frame
    /// override for that index.
    pub fn interval_at(&self, index: usize) -> Duration {
        self.frame_intervals
            .as_ref()
            .and_then(|intervals| intervals.get(index))
            .copied()
            .unwrap_or(self.interval)
    }
}

impl Default for SpinnerDefinition {
    fn default() -> Self {
        Self::base()
    }
}
