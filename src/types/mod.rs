//! Data types for the service state tracker
//!
//! This module contains the records stored by the event store and the views
//! derived from them.

mod event;
mod interval;
mod transition;

pub use event::Event;
pub use interval::Interval;
pub use transition::{ServiceSeen, Transition, TransitionOutcome};
