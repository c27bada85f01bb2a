pub mod cursor;
pub mod definition;
pub mod driver;
pub mod engine;
pub mod options;
pub mod repeat;
pub mod timer;

#[cfg(test)]
pub(crate) mod testing;

pub use cursor::CursorTracker;
pub use definition::SpinnerDefinition;
pub use driver::{Animation, SpinnerControl, SpinnerHandle, spawn, track};
pub use engine::{Spinner, Teardown};
pub use options::SpinnerOptions;
pub use repeat::RepeatController;
