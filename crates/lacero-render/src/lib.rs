//! # lacero-render
//!
//! Pluggable output for Lacero.
//!
//! Provides a `Renderer` trait with a `HeadlessRenderer` stub, a
//! `JsonFrameExporter` that writes frames for offline viewing, and the
//! `TearMask` detail layer built from committed tear edges.

pub mod json_exporter;
pub mod mask;
pub mod renderer;

pub use json_exporter::JsonFrameExporter;
pub use mask::{TearMask, TearStroke};
pub use renderer::{HeadlessRenderer, RenderFrame, Renderer};
