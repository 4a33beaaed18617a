//! # lacero-types
//!
//! Shared identifiers, error types, physical constants and the sheet
//! configuration for the Lacero paper-tearing simulator.
//!
//! This crate has no simulation logic. It defines the vocabulary that
//! every other Lacero crate shares.

pub mod config;
pub mod constants;
pub mod error;
pub mod ids;

pub use config::TearConfig;
pub use error::{LaceroError, LaceroResult};
pub use ids::{EdgeKey, TriangleId, VertexId};
