pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::{
    Animation, CursorTracker, RepeatController, Spinner, SpinnerDefinition, SpinnerHandle,
    SpinnerOptions,
};
pub use error::{Result, SpinnerError};
