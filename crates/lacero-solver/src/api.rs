//! Handle-based facade for embedding applications.
//!
//! Callers hold opaque [`MeshHandle`]s instead of engines. Every operation
//! validates its handle and reports an unknown one as
//! [`LaceroError::UnknownHandle`] rather than panicking.

use std::collections::BTreeMap;
use std::fmt;

use lacero_math::{Vec2, Vec3};
use lacero_mesh::BufferData;
use lacero_telemetry::SimulationEvent;
use lacero_types::{LaceroError, LaceroResult, TearConfig, VertexId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::TearEngine;

/// Opaque id of a simulated sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MeshHandle(u32);

impl MeshHandle {
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for MeshHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mesh#{}", self.0)
    }
}

/// Owns any number of independent sheets.
#[derive(Default)]
pub struct TearSimulator {
    engines: BTreeMap<MeshHandle, TearEngine>,
    next: u32,
}

impl TearSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a sheet from `config`. Handles are never reused.
    pub fn create_mesh(&mut self, config: TearConfig) -> LaceroResult<MeshHandle> {
        let engine = TearEngine::new(config)?;
        let handle = MeshHandle(self.next);
        self.next += 1;
        self.engines.insert(handle, engine);
        debug!(%handle, "mesh created");
        Ok(handle)
    }

    /// Drops a sheet and everything it owns.
    pub fn discard(&mut self, handle: MeshHandle) -> LaceroResult<()> {
        self.engines
            .remove(&handle)
            .map(|_| debug!(%handle, "mesh discarded"))
            .ok_or(LaceroError::UnknownHandle(handle.0))
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    pub fn engine(&self, handle: MeshHandle) -> LaceroResult<&TearEngine> {
        self.engines
            .get(&handle)
            .ok_or(LaceroError::UnknownHandle(handle.0))
    }

    pub fn engine_mut(&mut self, handle: MeshHandle) -> LaceroResult<&mut TearEngine> {
        self.engines
            .get_mut(&handle)
            .ok_or(LaceroError::UnknownHandle(handle.0))
    }

    pub fn step(&mut self, handle: MeshHandle, dt: f32) -> LaceroResult<Vec<SimulationEvent>> {
        Ok(self.engine_mut(handle)?.step(dt))
    }

    pub fn start_grab(&mut self, handle: MeshHandle, uv: Vec2) -> LaceroResult<Option<VertexId>> {
        Ok(self.engine_mut(handle)?.start_grab(uv))
    }

    pub fn update_grab(&mut self, handle: MeshHandle, target: Vec3) -> LaceroResult<()> {
        self.engine_mut(handle)?.update_grab(target);
        Ok(())
    }

    pub fn end_grab(&mut self, handle: MeshHandle) -> LaceroResult<()> {
        self.engine_mut(handle)?.end_grab();
        Ok(())
    }

    /// Seeds a tear. Unlike [`TearEngine::initiate_tear_at`], an unknown
    /// vertex is an error instead of a panic.
    pub fn initiate_tear_at(&mut self, handle: MeshHandle, vertex: VertexId) -> LaceroResult<bool> {
        let engine = self.engine_mut(handle)?;
        if engine.mesh().get_vertex(vertex).is_none() {
            return Err(LaceroError::InvalidMesh(format!(
                "{handle} has no vertex {vertex}"
            )));
        }
        Ok(engine.initiate_tear_at(vertex))
    }

    pub fn buffer_data(&self, handle: MeshHandle) -> LaceroResult<BufferData> {
        Ok(self.engine(handle)?.buffer_data())
    }
}
