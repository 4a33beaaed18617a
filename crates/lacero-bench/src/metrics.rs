//! Data collected during a scenario run.

use serde::{Deserialize, Serialize};

/// Metrics collected from one scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioMetrics {
    pub scenario: String,
    /// Material preset, or `default`.
    pub material: String,
    /// Vertex count at the end of the run (tearing adds vertices).
    pub vertex_count: usize,
    pub triangle_count: usize,
    /// Steps actually executed.
    pub timesteps: u32,
    /// Total wall-clock time (seconds).
    pub total_wall_time: f64,
    /// Average wall-clock time per step (seconds).
    pub avg_step_time: f64,
    pub max_step_time: f64,
    pub tears_initiated: usize,
    pub edges_torn: usize,
    pub tips_arrested: usize,
    /// Rest area cut loose from the binding (m²).
    pub detached_area: f32,
    /// Whether the tear sequence completed.
    pub complete: bool,
    /// Largest distance any original vertex moved from where it started.
    pub max_displacement: f32,
}

impl ScenarioMetrics {
    pub fn to_csv_header() -> String {
        "scenario,material,vertex_count,triangle_count,timesteps,total_wall_time_s,avg_step_ms,max_step_ms,tears_initiated,edges_torn,tips_arrested,detached_area,complete,max_displacement".to_string()
    }

    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{:.6},{:.4},{:.4},{},{},{},{:.6},{},{:.6}",
            self.scenario,
            self.material,
            self.vertex_count,
            self.triangle_count,
            self.timesteps,
            self.total_wall_time,
            self.avg_step_time * 1000.0,
            self.max_step_time * 1000.0,
            self.tears_initiated,
            self.edges_torn,
            self.tips_arrested,
            self.detached_area,
            self.complete,
            self.max_displacement,
        )
    }

    /// Header plus one row per run.
    pub fn to_csv(metrics: &[ScenarioMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }
}
