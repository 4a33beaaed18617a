//! Event bus: fan-out of tear events to pluggable sinks.
//!
//! Producers `emit` into an `mpsc` channel; `flush` drains it into every
//! registered sink on the calling thread.

use std::sync::mpsc;

use crate::events::SimulationEvent;
use crate::sinks::EventSink;

/// In-process event bus.
pub struct EventBus {
    sender: mpsc::Sender<SimulationEvent>,
    receiver: mpsc::Receiver<SimulationEvent>,
    sinks: Vec<Box<dyn EventSink>>,
    /// Disabled bus drops events on emit.
    enabled: bool,
    delivered: usize,
}

impl EventBus {
    /// Creates a new event bus with no sinks.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            sinks: Vec::new(),
            enabled: true,
            delivered: 0,
        }
    }

    /// Registers a sink to receive events.
    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// Enables or disables the bus.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Queues one event. No-op while disabled.
    pub fn emit(&self, event: SimulationEvent) {
        if !self.enabled {
            return;
        }
        // The receiver lives as long as the bus.
        let _ = self.sender.send(event);
    }

    /// Queues every event of a step, in order.
    pub fn emit_all(&self, events: impl IntoIterator<Item = SimulationEvent>) {
        for event in events {
            self.emit(event);
        }
    }

    /// Delivers all pending events to every sink. Returns how many events
    /// were drained.
    pub fn flush(&mut self) -> usize {
        let mut drained = 0;
        while let Ok(event) = self.receiver.try_recv() {
            for sink in &mut self.sinks {
                sink.handle(&event);
            }
            drained += 1;
        }
        self.delivered += drained;
        drained
    }

    /// Flushes, then lets every sink finalize.
    pub fn finish(&mut self) {
        self.flush();
        for sink in &mut self.sinks {
            sink.finalize();
        }
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Total events delivered since creation.
    pub fn delivered(&self) -> usize {
        self.delivered
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
