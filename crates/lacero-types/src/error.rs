//! Error types for the Lacero simulator.
//!
//! Caller-facing fallible operations return `LaceroResult<T>`. Topology
//! misuse (an id that did not come from the mesh) is a programmer error
//! and panics instead.

use thiserror::Error;

/// Unified error type for Lacero.
#[derive(Debug, Error)]
pub enum LaceroError {
    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Mesh data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// A mesh handle does not refer to a live simulation.
    #[error("Unknown mesh handle: {0}")]
    UnknownHandle(u32),

    /// A material preset name was not found.
    #[error("Unknown material '{name}' (available: {available})")]
    UnknownMaterial { name: String, available: String },

    /// An external effect collaborator (sound, texture) failed.
    #[error("Effect unavailable: {0}")]
    Effect(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, LaceroError>`.
pub type LaceroResult<T> = Result<T, LaceroError>;
