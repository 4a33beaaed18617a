//! # lacero-mesh
//!
//! The coarse simulation mesh of a paper sheet and every operation that
//! changes its topology.
//!
//! ## Key Types
//!
//! - [`TearMesh`]: vertex/triangle arenas plus the derived edge set.
//!   All topology mutation (vertex splitting, edge tearing, edge
//!   subdivision) goes through its methods so boundary flags and
//!   adjacency are always re-derived in one place.
//! - [`BufferData`]: flat arrays handed to a renderer.
//! - Grid generator ([`TearMesh::build`]) for calendar pages.

pub mod buffers;
pub mod generators;
pub mod mesh;
pub mod mutation;
pub mod topology;

pub use buffers::BufferData;
pub use mesh::{Edge, TearMesh, Triangle, Vertex};
pub use mutation::EdgeTear;
