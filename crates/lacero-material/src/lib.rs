//! # lacero-material
//!
//! Named paper stocks. A [`PaperProperties`] preset carries the material
//! constants of a [`TearConfig`](lacero_types::TearConfig) (mass, stiffness,
//! fracture behavior, grain) and can be stamped onto any config; the
//! [`PaperDatabase`] looks presets up by name.

pub mod database;
pub mod properties;

pub use database::PaperDatabase;
pub use properties::PaperProperties;
