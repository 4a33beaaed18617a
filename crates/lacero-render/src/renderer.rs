//! Renderer trait and HeadlessRenderer stub.
//!
//! A renderer is handed one [`RenderFrame`] per presented step. Tearing
//! adds vertices and triangles, so every frame carries its own buffers
//! rather than positions over a fixed topology.

use lacero_mesh::BufferData;
use lacero_types::LaceroResult;

/// A single render frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    /// Timestep this frame corresponds to.
    pub timestep: u32,
    pub buffers: BufferData,
}

impl RenderFrame {
    pub fn new(timestep: u32, buffers: BufferData) -> Self {
        Self { timestep, buffers }
    }
}

/// Trait for presenting simulation output.
///
/// # Implementations
/// - [`HeadlessRenderer`]: discards frames (benchmarks, CI)
/// - [`JsonFrameExporter`](crate::JsonFrameExporter): writes frames to disk
pub trait Renderer: Send {
    /// Called once with the first frame's buffers.
    fn init(&mut self, buffers: &BufferData) -> LaceroResult<()>;

    fn submit_frame(&mut self, frame: &RenderFrame) -> LaceroResult<()>;

    /// Flush buffers, close files.
    fn finalize(&mut self) -> LaceroResult<()>;

    fn name(&self) -> &str;

    /// Number of frames submitted so far.
    fn frame_count(&self) -> u32;
}

/// Headless renderer. Counts frames and discards them.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    frames: u32,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for HeadlessRenderer {
    fn init(&mut self, _buffers: &BufferData) -> LaceroResult<()> {
        Ok(())
    }

    fn submit_frame(&mut self, _frame: &RenderFrame) -> LaceroResult<()> {
        self.frames += 1;
        Ok(())
    }

    fn finalize(&mut self) -> LaceroResult<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "headless"
    }

    fn frame_count(&self) -> u32 {
        self.frames
    }
}
