//! Integration tests for lacero-bench.

use lacero_bench::{GrabPath, Scenario, ScenarioKind, ScenarioMetrics, ScenarioRunner};
use lacero_material::PaperDatabase;
use lacero_math::{Vec2, Vec3};
use lacero_types::LaceroError;

fn sample_metrics(name: &str) -> ScenarioMetrics {
    ScenarioMetrics {
        scenario: name.into(),
        material: "default".into(),
        vertex_count: 49,
        triangle_count: 72,
        timesteps: 120,
        total_wall_time: 0.5,
        avg_step_time: 0.004,
        max_step_time: 0.01,
        tears_initiated: 1,
        edges_torn: 4,
        tips_arrested: 0,
        detached_area: 0.25,
        complete: false,
        max_displacement: 0.1,
    }
}

// ─── Scenario Tests ───────────────────────────────────────────

#[test]
fn scenario_names_parse_back() {
    assert_eq!(ScenarioKind::all().len(), 3);
    for &kind in ScenarioKind::all() {
        assert_eq!(kind.name().parse::<ScenarioKind>().unwrap(), kind);
        assert_eq!(kind.to_string(), kind.name());
    }
    assert!(matches!(
        "sphere_drape".parse::<ScenarioKind>(),
        Err(LaceroError::InvalidConfig(_))
    ));
}

#[test]
fn scenario_configs_are_valid() {
    for &kind in ScenarioKind::all() {
        let scenario = Scenario::from_kind(kind);
        assert_eq!(scenario.kind, kind);
        assert!(scenario.config.validate().is_ok(), "{kind}");
    }
    assert!(Scenario::hanging_page().grab.is_none());
}

#[test]
fn grab_path_ramps_then_holds() {
    let path = GrabPath {
        uv: Vec2::ZERO,
        pull: Vec3::new(0.0, 4.0, 0.0),
        ramp_steps: 4,
    };
    assert_eq!(path.offset_at(0), Vec3::new(0.0, 1.0, 0.0));
    assert_eq!(path.offset_at(3), path.pull);
    assert_eq!(path.offset_at(100), path.pull);
}

#[test]
fn material_overrides_config() {
    let db = PaperDatabase::with_defaults();
    let tissue = db.lookup("tissue").unwrap();
    let scenario = Scenario::hanging_page().with_material(tissue);
    assert_eq!(scenario.material.as_deref(), Some("tissue"));
    assert_eq!(scenario.config.fracture_threshold, tissue.fracture_threshold);
    // Geometry is untouched.
    assert_eq!(scenario.config.subdivisions, Scenario::hanging_page().config.subdivisions);
}

// ─── Runner Tests ─────────────────────────────────────────────

#[test]
fn hanging_page_sags_without_tearing() {
    let metrics = ScenarioRunner::run(&Scenario::hanging_page()).unwrap();
    assert_eq!(metrics.scenario, "hanging_page");
    assert_eq!(metrics.timesteps, 120);
    assert_eq!(metrics.edges_torn, 0);
    assert_eq!(metrics.tears_initiated, 0);
    assert!(!metrics.complete);
    assert!(metrics.max_displacement > 0.0);
}

#[test]
fn straight_pull_tears_edges() {
    let metrics = ScenarioRunner::run(&Scenario::straight_pull()).unwrap();
    assert!(metrics.tears_initiated >= 1);
    assert!(metrics.edges_torn >= 1);
    // Every torn edge adds at least one split vertex at the sheet edge.
    assert!(metrics.vertex_count > 25);
}

#[test]
fn observer_sees_every_step() {
    let mut scenario = Scenario::corner_peel();
    scenario.timesteps = 10;
    let mut calls = 0;
    let metrics = ScenarioRunner::run_observed(&scenario, |engine, _events| {
        assert!(engine.mesh().validate().is_ok());
        calls += 1;
        Ok(())
    })
    .unwrap();
    // Once before stepping, then once per step.
    assert_eq!(calls, metrics.timesteps + 1);
}

#[test]
fn observer_error_aborts_run() {
    let result = ScenarioRunner::run_observed(&Scenario::hanging_page(), |engine, _| {
        if engine.timestep() == 3 {
            Err(LaceroError::Effect("disk full".into()))
        } else {
            Ok(())
        }
    });
    assert!(matches!(result, Err(LaceroError::Effect(_))));
}

// ─── Metrics Tests ────────────────────────────────────────────

#[test]
fn metrics_csv_output() {
    let csv = ScenarioMetrics::to_csv(&[sample_metrics("a"), sample_metrics("b")]);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("scenario,material"));
    let columns = lines[0].split(',').count();
    assert!(lines[1..].iter().all(|l| l.split(',').count() == columns));
    assert!(lines[1].starts_with("a,default,49,72,120"));
}

#[test]
fn metrics_json_round_trip() {
    let metrics = sample_metrics("straight_pull");
    let json = serde_json::to_string(&metrics).unwrap();
    let back: ScenarioMetrics = serde_json::from_str(&json).unwrap();
    assert_eq!(back, metrics);
}
