//! Editing core of a time-of-day range slider: a working list of intervals
//! that can be dragged, typed into, added to and removed from, and merged
//! into a sorted, disjoint list whenever the user saves.

extern crate chrono;
extern crate serde;

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

#[cfg(test)]
#[macro_use]
extern crate proptest;
#[cfg(test)]
extern crate serde_json;

pub mod drag;
pub mod editor;
pub mod error;
pub mod interval;
pub mod interval_set;
pub mod script;
pub mod util;

// Reexports
pub use drag::{ContainerGeometry, DragController, DragSession, MoveOutcome};
pub use editor::{SliderObserver, TimeRangeEditor};
pub use error::SliderError;
pub use interval::{ExternalInterval, Handle, TimeInterval};
pub use interval_set::IntervalSet;
pub use script::{replay, Event, Replay, SessionScript};
