use std::time::Duration;

use clap::Parser;

use crate::core::options::{
    DEFAULT_DETAIL, DEFAULT_LABEL, DEFAULT_LOOP_DELAY_MS, DEFAULT_MAX_LOOPS, SpinnerOptions,
};

#[derive(Parser, Debug)]
#[command(name = "logspin")]
#[command(author, version, about = "Terminal spinner for log writes", long_about = None)]
pub struct Cli {
    /// Name shown before the spinner
    #[arg(short, long, default_value = DEFAULT_LABEL, env = "LOGSPIN_LABEL")]
    pub label: String,

    /// Text shown after the spinner, e.g. a log path (display only)
    #[arg(short, long, default_value = DEFAULT_DETAIL, env = "LOGSPIN_DETAIL")]
    pub detail: String,

    /// Use the decelerating ease-out animation
    #[arg(short, long)]
    pub ease_out: bool,

    /// Loop the animation instead of running it once
    #[arg(short, long)]
    pub repeat: bool,

    /// Number of runs when looping
    #[arg(long, default_value_t = DEFAULT_MAX_LOOPS, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_loops: u32,

    /// Pause between runs when looping, in milliseconds
    #[arg(long, default_value_t = DEFAULT_LOOP_DELAY_MS)]
    pub loop_delay: u64,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn options(&self) -> SpinnerOptions {
        SpinnerOptions {
            label: self.label.clone(),
            detail: self.detail.clone(),
            use_ease_out: self.ease_out,
            max_loops: self.max_loops,
            loop_delay: Duration::from_millis(self.loop_delay),
        }
    }
}
