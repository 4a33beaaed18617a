//! # lacero-interaction
//!
//! Everything between a pointer and the tear engine.
//!
//! ## Key Types
//!
//! - [`DragController`]: turns pointer down/move/up into either kinematic
//!   peel targets or grab commands for the engine
//! - [`PeelModel`]: eased visual curl driven by the peel targets
//! - [`FallMotion`]: tumble of a detached page
//! - [`PageSession`]: owns one page and drives all of the above each frame,
//!   reporting to an [`EffectSink`]

pub mod controller;
pub mod fall;
pub mod peel;
pub mod pointer;
pub mod session;

pub use controller::{DragCommand, DragController, DragPhase, DragSettings, PeelTargets};
pub use fall::{FallMotion, FallSettings};
pub use peel::PeelModel;
pub use pointer::PointerHistory;
pub use session::{EffectSink, NullEffects, PageSession, SessionSettings};
