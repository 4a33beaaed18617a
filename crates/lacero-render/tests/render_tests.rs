//! Integration tests for lacero-render.

use lacero_math::Vec2;
use lacero_mesh::generators::sheet_grid;
use lacero_render::{HeadlessRenderer, JsonFrameExporter, RenderFrame, Renderer, TearMask, TearStroke};
use lacero_telemetry::{EventKind, SimulationEvent};
use lacero_types::VertexId;

fn edge_event(start: Vec2, end: Vec2, width: f32) -> SimulationEvent {
    SimulationEvent::new(
        3,
        EventKind::EdgeCommitted {
            start_uv: start,
            end_uv: end,
            width,
        },
    )
}

// ─── Renderers ────────────────────────────────────────────────

#[test]
fn headless_counts_frames() {
    let mesh = sheet_grid(2, 2, 1.0, 1.0, 1.0);
    let buffers = mesh.buffer_data();
    let mut renderer = HeadlessRenderer::new();
    renderer.init(&buffers).unwrap();
    assert_eq!(renderer.name(), "headless");
    assert_eq!(renderer.frame_count(), 0);

    let frame = RenderFrame::new(0, buffers);
    renderer.submit_frame(&frame).unwrap();
    renderer.submit_frame(&frame).unwrap();
    assert_eq!(renderer.frame_count(), 2);
    renderer.finalize().unwrap();
}

#[test]
fn exporter_stores_indices_only_on_topology_change() {
    let mut mesh = sheet_grid(4, 4, 1.0, 1.0, 1.0);
    let mut exporter = JsonFrameExporter::new("unused.json");
    exporter.init(&mesh.buffer_data()).unwrap();

    exporter.submit_frame(&RenderFrame::new(0, mesh.buffer_data())).unwrap();
    exporter.submit_frame(&RenderFrame::new(1, mesh.buffer_data())).unwrap();
    mesh.tear_edge(VertexId(15), VertexId(16));
    exporter.submit_frame(&RenderFrame::new(2, mesh.buffer_data())).unwrap();

    assert_eq!(exporter.frame_count(), 3);
    assert_eq!(exporter.topology_changes(), 2);

    let json: serde_json::Value = serde_json::from_str(&exporter.to_json().unwrap()).unwrap();
    let frames = json["frames"].as_array().unwrap();
    assert!(frames[0].get("indices").is_some());
    assert!(frames[1].get("indices").is_none());
    // The tear split a vertex: 26 positions.
    assert_eq!(frames[2]["positions"].as_array().unwrap().len(), 26 * 3);
}

#[test]
fn exporter_writes_events_to_file() {
    let path = std::env::temp_dir().join(format!("lacero_export_{}.json", std::process::id()));
    let mesh = sheet_grid(2, 2, 1.0, 1.0, 1.0);
    let mut exporter = JsonFrameExporter::new(&path);
    exporter.init(&mesh.buffer_data()).unwrap();
    exporter.submit_frame(&RenderFrame::new(0, mesh.buffer_data())).unwrap();
    exporter.record_events(&[edge_event(Vec2::ZERO, Vec2::X, 0.01)]);
    exporter.finalize().unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).ok();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["frame_count"], 1);
    assert_eq!(json["events"].as_array().unwrap().len(), 1);
}

// ─── Mask ─────────────────────────────────────────────────────

#[test]
fn straight_stroke_covers_its_edge() {
    let mut mask = TearMask::new(32, 0.0);
    assert!(mask.record(&edge_event(Vec2::new(0.0, 0.5), Vec2::new(1.0, 0.5), 0.05)));
    assert_eq!(mask.coverage(Vec2::new(0.5, 0.5)), 1.0);
    assert_eq!(mask.coverage(Vec2::new(0.5, 0.9)), 0.0);
}

#[test]
fn jagged_stroke_keeps_endpoints() {
    let start = Vec2::new(0.2, 0.3);
    let end = Vec2::new(0.6, 0.3);
    let stroke = TearStroke::jagged(start, end, 0.01, 0.1, 7);
    assert_eq!(stroke.points.first(), Some(&start));
    assert_eq!(stroke.points.last(), Some(&end));
    assert!(stroke.points.iter().any(|p| p.y != 0.3));
    // Never strays further than jaggedness × length.
    assert!(stroke.points.iter().all(|p| (p.y - 0.3).abs() <= 0.04 + 1e-6));
    assert_eq!(stroke, TearStroke::jagged(start, end, 0.01, 0.1, 7));
}

#[test]
fn mask_ignores_other_events() {
    let mut mask = TearMask::new(8, 0.1);
    let events = vec![
        SimulationEvent::new(0, EventKind::FallComplete),
        edge_event(Vec2::ZERO, Vec2::X, 0.01),
        SimulationEvent::new(0, EventKind::TearComplete { detached_area: 0.5 }),
        edge_event(Vec2::X, Vec2::ONE, 0.01),
    ];
    assert_eq!(mask.record_all(&events), 2);
    assert_eq!(mask.strokes().len(), 2);
    mask.clear();
    assert!(mask.strokes().is_empty());
}

#[test]
fn raster_is_top_down() {
    let mut mask = TearMask::new(10, 0.0);
    // Horizontal tear through the upper fifth of the page.
    mask.record(&edge_event(Vec2::new(0.0, 0.85), Vec2::new(1.0, 0.85), 0.1));
    let pixels = mask.rasterize();
    assert_eq!(pixels.len(), 100);
    assert_eq!(pixels[10 + 5], 255);
    assert_eq!(pixels[90 + 5], 0);

    let pgm = mask.to_pgm();
    assert!(pgm.starts_with(b"P5\n10 10\n255\n"));
    assert_eq!(pgm.len(), b"P5\n10 10\n255\n".len() + 100);
}
