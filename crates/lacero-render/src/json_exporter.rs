//! JSON frame exporter: writes per-frame mesh data for visual inspection.
//!
//! Positions are stored for every frame. Triangle indices are stored only
//! on frames where they differ from the previous frame, which in practice
//! means the first frame and each frame after an edge commit. Tear events
//! are written alongside so a viewer can draw the detail strokes.

use std::path::PathBuf;

use lacero_mesh::BufferData;
use lacero_telemetry::SimulationEvent;
use lacero_types::{LaceroError, LaceroResult};
use serde::Serialize;
use tracing::info;

use crate::renderer::{RenderFrame, Renderer};

#[derive(Serialize)]
struct FrameData {
    timestep: u32,
    positions: Vec<f32>, // Interleaved [x0,y0,z0, x1,y1,z1, ...]
    #[serde(skip_serializing_if = "Option::is_none")]
    indices: Option<Vec<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    uvs: Option<Vec<f32>>,
}

#[derive(Serialize)]
struct AnimationData<'a> {
    frame_count: usize,
    frames: &'a [FrameData],
    events: &'a [SimulationEvent],
}

/// Exports simulation frames to a JSON file.
///
/// ```text
/// let mut exporter = JsonFrameExporter::new("frames.json");
/// exporter.init(&engine.buffer_data())?;
/// // ... submit_frame() each step, record_events() with what step() returned ...
/// exporter.finalize()?; // writes the file
/// ```
pub struct JsonFrameExporter {
    output_path: PathBuf,
    last_indices: Vec<u32>,
    frames: Vec<FrameData>,
    events: Vec<SimulationEvent>,
}

impl JsonFrameExporter {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            last_indices: Vec::new(),
            frames: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn record_events(&mut self, events: &[SimulationEvent]) {
        self.events.extend_from_slice(events);
    }

    /// Number of frames that carry a new index buffer.
    pub fn topology_changes(&self) -> usize {
        self.frames.iter().filter(|f| f.indices.is_some()).count()
    }

    /// Serializes everything captured so far.
    pub fn to_json(&self) -> LaceroResult<String> {
        let data = AnimationData {
            frame_count: self.frames.len(),
            frames: &self.frames,
            events: &self.events,
        };
        serde_json::to_string(&data)
            .map_err(|e| LaceroError::Serialization(format!("JSON serialization failed: {e}")))
    }
}

impl Renderer for JsonFrameExporter {
    fn init(&mut self, _buffers: &BufferData) -> LaceroResult<()> {
        self.last_indices.clear();
        self.frames.clear();
        self.events.clear();
        Ok(())
    }

    fn submit_frame(&mut self, frame: &RenderFrame) -> LaceroResult<()> {
        let changed = self.frames.is_empty() || frame.buffers.indices != self.last_indices;
        if changed {
            self.last_indices = frame.buffers.indices.clone();
        }
        self.frames.push(FrameData {
            timestep: frame.timestep,
            positions: frame.buffers.positions.clone(),
            indices: changed.then(|| frame.buffers.indices.clone()),
            uvs: changed.then(|| frame.buffers.uvs.clone()),
        });
        Ok(())
    }

    fn finalize(&mut self) -> LaceroResult<()> {
        let json = self.to_json()?;
        std::fs::write(&self.output_path, json)?;
        info!(
            path = %self.output_path.display(),
            frames = self.frames.len(),
            events = self.events.len(),
            "frames exported"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "json_exporter"
    }

    fn frame_count(&self) -> u32 {
        self.frames.len() as u32
    }
}
