//! Scenario runner: drives the tear engine through a scenario and
//! collects metrics.

use std::time::Instant;

use lacero_math::Vec3;
use lacero_solver::TearEngine;
use lacero_telemetry::{EventKind, SimulationEvent};
use lacero_types::LaceroResult;
use tracing::{debug, info};

use crate::metrics::ScenarioMetrics;
use crate::scenarios::{Scenario, ScenarioKind};

/// Runs scenarios and collects metrics.
pub struct ScenarioRunner;

impl ScenarioRunner {
    /// Runs one scenario to its step count, or until the tear completes.
    pub fn run(scenario: &Scenario) -> LaceroResult<ScenarioMetrics> {
        Self::run_observed(scenario, |_, _| Ok(()))
    }

    /// Like [`run`](Self::run), calling `observe` with the engine before
    /// the first step and after every step, together with that step's
    /// events. An observer error aborts the run.
    pub fn run_observed<F>(scenario: &Scenario, mut observe: F) -> LaceroResult<ScenarioMetrics>
    where
        F: FnMut(&TearEngine, &[SimulationEvent]) -> LaceroResult<()>,
    {
        let mut engine = TearEngine::new(scenario.config.clone())?;
        let initial: Vec<Vec3> = engine.mesh().vertices().iter().map(|v| v.position).collect();

        let grab = scenario.grab.as_ref().and_then(|path| {
            let vertex = engine.start_grab(path.uv)?;
            Some((path, engine.mesh().vertex(vertex).position))
        });
        if scenario.grab.is_some() && grab.is_none() {
            debug!(scenario = %scenario.kind, "grab point out of reach, running without");
        }
        observe(&engine, &[])?;

        let mut step_times = Vec::with_capacity(scenario.timesteps as usize);
        let (mut initiated, mut torn, mut arrested) = (0, 0, 0);
        let total_start = Instant::now();

        for step in 0..scenario.timesteps {
            if let Some((path, base)) = grab {
                engine.update_grab(base + path.offset_at(step));
            }
            let started = Instant::now();
            let events = engine.step(scenario.dt);
            step_times.push(started.elapsed().as_secs_f64());

            for event in &events {
                match event.kind {
                    EventKind::TearInitiated { .. } => initiated += 1,
                    EventKind::EdgeCommitted { .. } => torn += 1,
                    EventKind::TipArrested { .. } => arrested += 1,
                    _ => {}
                }
            }
            observe(&engine, &events)?;
            if engine.is_complete() {
                break;
            }
        }
        engine.end_grab();

        let total_wall_time = total_start.elapsed().as_secs_f64();
        let mesh = engine.mesh();
        let max_displacement = mesh
            .vertices()
            .iter()
            .zip(&initial)
            .map(|(v, start)| v.position.distance(*start))
            .fold(0.0f32, f32::max);
        let avg_step_time = if step_times.is_empty() {
            0.0
        } else {
            step_times.iter().sum::<f64>() / step_times.len() as f64
        };

        let metrics = ScenarioMetrics {
            scenario: scenario.kind.name().to_string(),
            material: scenario.material.clone().unwrap_or_else(|| "default".into()),
            vertex_count: mesh.vertex_count(),
            triangle_count: mesh.triangle_count(),
            timesteps: step_times.len() as u32,
            total_wall_time,
            avg_step_time,
            max_step_time: step_times.iter().copied().fold(0.0, f64::max),
            tears_initiated: initiated,
            edges_torn: torn,
            tips_arrested: arrested,
            detached_area: mesh.detached_area(),
            complete: engine.is_complete(),
            max_displacement,
        };
        info!(
            scenario = %metrics.scenario,
            edges = metrics.edges_torn,
            complete = metrics.complete,
            wall = metrics.total_wall_time,
            "scenario finished"
        );
        Ok(metrics)
    }

    /// Runs every scenario kind with its defaults.
    pub fn run_all() -> LaceroResult<Vec<ScenarioMetrics>> {
        ScenarioKind::all()
            .iter()
            .map(|&kind| Self::run(&Scenario::from_kind(kind)))
            .collect()
    }
}
