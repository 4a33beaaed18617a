//! One page, from first touch to the end of its fall.
//!
//! [`PageSession`] is the single place where the pointer, the engine, the
//! visual models and the outside world meet. Everything runs on the
//! caller's thread inside [`PageSession::update`]; effects are fire and
//! forget, and a failing effect is logged and skipped.

use lacero_math::{Vec2, Vec3};
use lacero_mesh::BufferData;
use lacero_solver::TearEngine;
use lacero_telemetry::{EventBus, EventKind, EventSink, SimulationEvent};
use lacero_types::{LaceroResult, TearConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::controller::{DragCommand, DragController, DragPhase, DragSettings};
use crate::fall::{FallMotion, FallSettings};
use crate::peel::PeelModel;

/// Outside collaborators: audio, display, celebration.
pub trait EffectSink {
    /// A tear started (`intensity` 1) or advanced by an edge.
    fn play_tear_sound(&mut self, intensity: f32) -> LaceroResult<()>;
    /// Shows the current frame.
    fn present(&mut self, frame: &BufferData) -> LaceroResult<()>;
    /// The page is gone.
    fn celebrate(&mut self) -> LaceroResult<()>;
}

/// Effects that do nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEffects;

impl EffectSink for NullEffects {
    fn play_tear_sound(&mut self, _intensity: f32) -> LaceroResult<()> {
        Ok(())
    }

    fn present(&mut self, _frame: &BufferData) -> LaceroResult<()> {
        Ok(())
    }

    fn celebrate(&mut self) -> LaceroResult<()> {
        Ok(())
    }
}

/// Tuning for a [`PageSession`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    pub drag: DragSettings,
    pub fall: FallSettings,
    /// Easing rate of the peel model (1/s).
    pub peel_response: f32,
    /// Sound intensity for each committed edge.
    pub edge_sound_intensity: f32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            drag: DragSettings::default(),
            fall: FallSettings::default(),
            peel_response: 8.0,
            edge_sound_intensity: 0.4,
        }
    }
}

/// Owns the engine and interaction state of the current page.
pub struct PageSession {
    config: TearConfig,
    settings: SessionSettings,
    engine: TearEngine,
    controller: DragController,
    peel: PeelModel,
    fall: Option<FallMotion>,
    effects: Box<dyn EffectSink>,
    bus: EventBus,
    pages_torn: u32,
}

impl PageSession {
    pub fn new(
        config: TearConfig,
        settings: SessionSettings,
        effects: Box<dyn EffectSink>,
    ) -> LaceroResult<Self> {
        let engine = TearEngine::new(config.clone())?;
        let controller = DragController::new(settings.drag.clone(), config.width, config.height);
        let peel = PeelModel::new(config.bending_stiffness, settings.peel_response);
        Ok(Self {
            config,
            settings,
            engine,
            controller,
            peel,
            fall: None,
            effects,
            bus: EventBus::new(),
            pages_torn: 0,
        })
    }

    /// Every event produced by [`update`](Self::update) is also delivered
    /// to `sink`.
    pub fn add_event_sink(&mut self, sink: Box<dyn EventSink>) {
        self.bus.add_sink(sink);
    }

    pub fn engine(&self) -> &TearEngine {
        &self.engine
    }

    pub fn controller(&self) -> &DragController {
        &self.controller
    }

    /// Direct engine access, e.g. for scripted cuts.
    pub fn engine_mut(&mut self) -> &mut TearEngine {
        &mut self.engine
    }

    /// For locking and unlocking input.
    pub fn controller_mut(&mut self) -> &mut DragController {
        &mut self.controller
    }

    pub fn peel(&self) -> &PeelModel {
        &self.peel
    }

    pub fn fall(&self) -> Option<&FallMotion> {
        self.fall.as_ref()
    }

    pub fn phase(&self) -> DragPhase {
        self.controller.phase()
    }

    /// Pages that finished falling in this session.
    pub fn pages_torn(&self) -> u32 {
        self.pages_torn
    }

    // ─── Input ───────────────────────────────────────────────────

    pub fn pointer_down(&mut self, uv: Vec2) {
        let command = self.controller.pointer_down(uv);
        self.dispatch(command);
    }

    pub fn pointer_move(&mut self, uv: Vec2, dt: f32) {
        let command = self.controller.pointer_move(uv, dt);
        self.dispatch(command);
    }

    pub fn pointer_up(&mut self) {
        let command = self.controller.pointer_up();
        self.dispatch(command);
    }

    fn dispatch(&mut self, command: DragCommand) {
        match command {
            DragCommand::None => {}
            DragCommand::BeginGrab { uv, target } => {
                if self.engine.start_grab(uv).is_some() {
                    self.engine.update_grab(target);
                } else {
                    debug!(u = uv.x, v = uv.y, "handoff found nothing to grab");
                }
            }
            DragCommand::MoveGrab { target } => self.engine.update_grab(target),
            DragCommand::EndGrab => self.engine.end_grab(),
        }
    }

    // ─── Frame ───────────────────────────────────────────────────

    /// Advances the page by `dt` and presents the result.
    ///
    /// While attached the engine steps; once detached the fall motion
    /// takes over; a torn page is static.
    pub fn update(&mut self, dt: f32) -> Vec<SimulationEvent> {
        let mut events = match self.controller.phase() {
            DragPhase::Falling => self.update_fall(dt),
            DragPhase::Torn => Vec::new(),
            _ => self.engine.step(dt),
        };
        self.peel.update(self.controller.targets(), dt);

        // Reactions may settle more tearing; those events join this frame.
        let mut next = 0;
        while next < events.len() {
            let event = events[next].clone();
            let settled = self.react(&event);
            events.extend(settled);
            next += 1;
        }
        self.bus.emit_all(events.iter().cloned());
        self.bus.flush();

        let frame = self.frame();
        report("present", self.effects.present(&frame));
        events
    }

    fn update_fall(&mut self, dt: f32) -> Vec<SimulationEvent> {
        match self.fall.as_mut().map(|fall| fall.update(dt)) {
            Some(true) => vec![SimulationEvent::new(
                self.engine.timestep(),
                EventKind::FallComplete,
            )],
            _ => Vec::new(),
        }
    }

    /// Applies one event to the session. Returns events the engine raised
    /// in response.
    fn react(&mut self, event: &SimulationEvent) -> Vec<SimulationEvent> {
        match event.kind {
            EventKind::TearInitiated { .. } => {
                report("tear sound", self.effects.play_tear_sound(1.0));
            }
            EventKind::EdgeCommitted { .. } => {
                let intensity = self.settings.edge_sound_intensity;
                report("tear sound", self.effects.play_tear_sound(intensity));
            }
            EventKind::TipArrested { .. } => {}
            EventKind::TearComplete { detached_area } => {
                self.engine.end_grab();
                let release = self.controller.mark_detached();
                let size = Vec2::new(self.config.width, self.config.height);
                self.fall = Some(FallMotion::new(release, size, self.settings.fall.clone()));
                info!(detached_area, "page detached, falling");
                // The engine is not stepped once falling: collect what the
                // release settled now. A zero step only drains the queue.
                return self.engine.step(0.0);
            }
            EventKind::FallComplete => {
                self.controller.mark_torn();
                self.pages_torn += 1;
                info!(pages = self.pages_torn, "page gone");
                report("celebration", self.effects.celebrate());
            }
        }
        Vec::new()
    }

    /// Render buffers with the peel curl (before handoff) or the fall
    /// transform applied.
    pub fn frame(&self) -> BufferData {
        let mut frame = self.engine.buffer_data();
        match (&self.fall, self.controller.phase()) {
            (Some(fall), DragPhase::Falling | DragPhase::Torn) => fall.apply(&mut frame),
            (_, DragPhase::Idle | DragPhase::Dragging) => self.peel.apply(&mut frame),
            _ => {}
        }
        frame
    }

    /// Replaces the page with a fresh one from the same config.
    pub fn next_page(&mut self) -> LaceroResult<()> {
        self.engine = TearEngine::new(self.config.clone())?;
        self.controller.reset();
        self.peel = PeelModel::new(self.config.bending_stiffness, self.settings.peel_response);
        self.fall = None;
        debug!("next page ready");
        Ok(())
    }

    /// World position of rest point `uv` on the current page.
    pub fn world_at(&self, uv: Vec2) -> Vec3 {
        let p = (uv - Vec2::splat(0.5)) * Vec2::new(self.config.width, self.config.height);
        Vec3::new(p.x, p.y, 0.0)
    }
}

fn report(effect: &str, result: LaceroResult<()>) {
    if let Err(error) = result {
        warn!(effect, %error, "effect failed, skipping");
    }
}
