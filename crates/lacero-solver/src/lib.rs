//! # lacero-solver
//!
//! Advances a tearing sheet one frame at a time.
//!
//! ## Key Types
//!
//! - [`TearEngine`]: owns one [`TearMesh`](lacero_mesh::TearMesh) and runs
//!   the per-step pipeline: forces, tear tips, integration
//! - [`TearTip`]: an active crack front and its accumulated energy
//! - [`ForceCluster`]: one side of the two-way force partition at a tip
//! - [`TearSimulator`]: handle-based facade over many engines

pub mod api;
pub mod cluster;
pub mod engine;
pub mod forces;
pub mod integrate;
pub mod tip;

pub use api::{MeshHandle, TearSimulator};
pub use cluster::{cluster_forces, ForceCluster};
pub use engine::TearEngine;
pub use forces::Grab;
pub use tip::{TearTip, TipPhase};
