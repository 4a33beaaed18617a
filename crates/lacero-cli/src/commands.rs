//! CLI command implementations.

use lacero_bench::{Scenario, ScenarioKind, ScenarioMetrics, ScenarioRunner};
use lacero_material::{PaperDatabase, PaperProperties};
use lacero_render::{JsonFrameExporter, RenderFrame, Renderer, TearMask};
use lacero_types::TearConfig;
use tracing::info;

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Sideways wobble of mask strokes, as a share of edge length.
const MASK_JAGGEDNESS: f32 = 0.15;

fn scenario_kinds(name: &str) -> Result<Vec<ScenarioKind>, Box<dyn std::error::Error>> {
    if name == "all" {
        Ok(ScenarioKind::all().to_vec())
    } else {
        Ok(vec![name.parse()?])
    }
}

fn build_scenario(kind: ScenarioKind, material: Option<&PaperProperties>) -> Scenario {
    let scenario = Scenario::from_kind(kind);
    match material {
        Some(props) => scenario.with_material(props),
        None => scenario,
    }
}

/// Run scenarios and print or write their metrics.
pub fn run(scenario_name: &str, material_name: Option<&str>, output_path: Option<&str>) -> CliResult {
    println!("Lacero Scenario Runner");
    println!("══════════════════════");
    println!();

    let db = PaperDatabase::with_defaults();
    let material = material_name.map(|name| db.lookup(name)).transpose()?;
    if let Some(props) = material {
        println!("Material: {}", props.name);
        println!();
    }

    let mut all_metrics = Vec::new();
    for kind in scenario_kinds(scenario_name)? {
        let scenario = build_scenario(kind, material);
        println!(
            "Running: {} ({} cells across, {} steps)",
            kind.name(),
            scenario.config.cols(),
            scenario.timesteps,
        );

        let metrics = ScenarioRunner::run(&scenario)?;
        println!("  Wall time:     {:.3}s", metrics.total_wall_time);
        println!("  Avg step:      {:.3}ms", metrics.avg_step_time * 1000.0);
        println!("  Edges torn:    {}", metrics.edges_torn);
        println!("  Detached:      {:.4}m²", metrics.detached_area);
        println!("  Complete:      {}", metrics.complete);
        println!();
        all_metrics.push(metrics);
    }

    let csv = ScenarioMetrics::to_csv(&all_metrics);
    if let Some(path) = output_path {
        std::fs::write(path, &csv)?;
        println!("Results written to: {path}");
    } else {
        println!("CSV Output:");
        println!("{csv}");
    }
    Ok(())
}

/// Run one scenario, exporting frames (and optionally the tear mask).
pub fn export(
    scenario_name: &str,
    output_path: &str,
    material_name: Option<&str>,
    mask_path: Option<&str>,
    mask_resolution: usize,
) -> CliResult {
    let kind: ScenarioKind = scenario_name.parse()?;
    let db = PaperDatabase::with_defaults();
    let material = material_name.map(|name| db.lookup(name)).transpose()?;
    let scenario = build_scenario(kind, material);

    let mut exporter = JsonFrameExporter::new(output_path);
    let mut mask = TearMask::new(mask_resolution, MASK_JAGGEDNESS);
    let mut initialized = false;

    let metrics = ScenarioRunner::run_observed(&scenario, |engine, events| {
        let buffers = engine.buffer_data();
        if !initialized {
            exporter.init(&buffers)?;
            initialized = true;
        }
        exporter.record_events(events);
        mask.record_all(events);
        exporter.submit_frame(&RenderFrame::new(engine.timestep(), buffers))
    })?;
    exporter.finalize()?;
    println!(
        "Exported {} frames of {} to {output_path}",
        exporter.frame_count(),
        metrics.scenario
    );

    if let Some(path) = mask_path {
        std::fs::write(path, mask.to_pgm())?;
        info!(strokes = mask.strokes().len(), path, "mask written");
        println!("Mask written to: {path}");
    }
    Ok(())
}

/// Validate a config or material preset file.
pub fn validate(path: &str, material: bool) -> CliResult {
    println!("Lacero Validator");
    println!("────────────────");
    println!();

    let content = std::fs::read_to_string(path)?;
    if material {
        let props = PaperProperties::from_toml_str(&content)?;
        println!("✅ Material '{}' is valid.", props.name);
    } else {
        let config = TearConfig::from_toml_str(&content)?;
        println!(
            "✅ Config is valid ({}×{} cells, {}m × {}m).",
            config.cols(),
            config.rows(),
            config.width,
            config.height
        );
    }
    Ok(())
}

/// List the built-in paper presets.
pub fn materials() -> CliResult {
    let db = PaperDatabase::with_defaults();
    println!("{:<16} {:>9} {:>10} {:>9}  grain", "name", "g/m²", "threshold", "stiffness");
    for props in db.iter() {
        println!(
            "{:<16} {:>9.1} {:>10.4} {:>9.1}  {}",
            props.name,
            props.grammage,
            props.fracture_threshold,
            props.stiffness,
            if props.is_grain_sensitive() { "yes" } else { "no" },
        );
    }
    Ok(())
}
