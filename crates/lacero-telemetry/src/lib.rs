//! # lacero-telemetry
//!
//! Structured tear events (initiation, committed edges, arrested tips,
//! completion, fall) and the plumbing that carries them to consumers:
//! an in-process [`EventBus`] and pluggable sinks.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{ArrestReason, EventKind, SimulationEvent};
pub use sinks::{EventSink, TracingSink, VecSink};
