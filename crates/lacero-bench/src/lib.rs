//! # lacero-bench
//!
//! Benchmark suite for the Lacero tear engine.
//!
//! Provides 3 scripted tearing scenarios, a runner that drives the engine
//! through them, and CSV export of the collected metrics.

pub mod metrics;
pub mod runner;
pub mod scenarios;

pub use metrics::ScenarioMetrics;
pub use runner::ScenarioRunner;
pub use scenarios::{GrabPath, Scenario, ScenarioKind};
