//! Pluggable event sinks.

use std::sync::{Arc, Mutex};

use crate::events::{EventKind, SimulationEvent};

/// Trait for event consumers.
pub trait EventSink: Send {
    /// Process a single event.
    fn handle(&mut self, event: &SimulationEvent);

    /// Called when the simulation ends.
    fn finalize(&mut self) {}

    /// Returns a human-readable name for this sink.
    fn name(&self) -> &str;
}

/// Collects events into a shared buffer.
///
/// Clones share the buffer, so a test can keep one clone and hand the
/// other to an [`EventBus`](crate::EventBus).
#[derive(Clone, Default)]
pub struct VecSink {
    events: Arc<Mutex<Vec<SimulationEvent>>>,
}

impl VecSink {
    /// Creates an empty vec sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every event received so far.
    pub fn events(&self) -> Vec<SimulationEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Number of received events with the given label.
    pub fn count(&self, label: &str) -> usize {
        self.events()
            .iter()
            .filter(|e| e.kind.label() == label)
            .count()
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &SimulationEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// Forwards events to `tracing`.
///
/// Milestones (initiation, arrest, completion, fall) are logged at `info`;
/// individual committed edges at `debug`.
#[derive(Debug, Default)]
pub struct TracingSink {
    handled: usize,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &SimulationEvent) {
        self.handled += 1;
        match &event.kind {
            EventKind::EdgeCommitted { start_uv, end_uv, .. } => {
                tracing::debug!(
                    timestep = event.timestep,
                    start = ?start_uv,
                    end = ?end_uv,
                    "edge_committed"
                );
            }
            kind => {
                tracing::info!(timestep = event.timestep, event = ?kind, "{}", kind.label());
            }
        }
    }

    fn finalize(&mut self) {
        tracing::debug!(events = self.handled, "tracing sink finished");
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}
