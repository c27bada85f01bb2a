use std::time::Duration;

use crate::core::definition::SpinnerDefinition;

pub const DEFAULT_LABEL: &str = "Process";
pub const DEFAULT_DETAIL: &str = "/var/log/app.log";
pub const DEFAULT_MAX_LOOPS: u32 = 20;
pub const DEFAULT_LOOP_DELAY_MS: u64 = 300;

/// Construction options shared by the single-run and looping spinners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinnerOptions {
    /// Name printed at the start of the line
    pub label: String,
    /// Text printed after the frame, usually a log path. Display only.
    pub detail: String,
    /// Use the ease-out preset instead of the base one
    pub use_ease_out: bool,
    /// Runs before a looping spinner finishes
    pub max_loops: u32,
    /// Pause between looped runs
    pub loop_delay: Duration,
}

impl Default for SpinnerOptions {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
            detail: DEFAULT_DETAIL.to_string(),
            use_ease_out: false,
            max_loops: DEFAULT_MAX_LOOPS,
            loop_delay: Duration::from_millis(DEFAULT_LOOP_DELAY_MS),
        }
    }
}

impl SpinnerOptions {
    pub fn definition(&self) -> SpinnerDefinition {
        if self.use_ease_out {
            SpinnerDefinition::ease_out()
        } else {
            SpinnerDefinition::base()
        }
    }

    /// Human readable name of the selected preset.
    pub fn preset_name(&self) -> &'static str {
        if self.use_ease_out { "ease-out" } else { "base" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = SpinnerOptions::default();
        assert_eq!(options.label, "Process");
        assert_eq!(options.detail, "/var/log/app.log");
        assert!(!options.use_ease_out);
        assert_eq!(options.max_loops, 20);
        assert_eq!(options.loop_delay, Duration::from_millis(300));
        assert_eq!(options.definition(), SpinnerDefinition::base());
        assert_eq!(options.preset_name(), "base");
    }

    #[test]
    fn ease_out_selects_eased_preset() {
        let options = SpinnerOptions {
            use_ease_out: true,
            ..SpinnerOptions::default()
        };
        assert_eq!(options.definition(), SpinnerDefinition::ease_out());
        assert_eq!(options.preset_name(), "ease-out");
    }
}
