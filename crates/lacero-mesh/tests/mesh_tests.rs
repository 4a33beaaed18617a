//! Integration tests for lacero-mesh.

use lacero_math::{Vec2, Vec3};
use lacero_mesh::TearMesh;
use lacero_types::{EdgeKey, TearConfig, TriangleId, VertexId};

fn grid(subdivisions: u32) -> TearMesh {
    TearMesh::build(&square_config(subdivisions))
}

fn square_config(subdivisions: u32) -> TearConfig {
    TearConfig {
        width: 1.0,
        height: 1.0,
        subdivisions,
        density: 2.0,
        ..Default::default()
    }
}

/// Vertex id of grid index `(i, j)` on a square grid with `cols` cells.
fn at(cols: u32, i: u32, j: u32) -> VertexId {
    VertexId(j * (cols + 1) + i)
}

fn assert_boundary_consistent(mesh: &TearMesh) {
    for vertex in mesh.vertices() {
        let on_open_edge = mesh
            .vertex_edges(vertex.id)
            .iter()
            .any(|e| e.is_boundary());
        assert_eq!(
            vertex.is_boundary(),
            on_open_edge,
            "vertex {} boundary flag disagrees with its edges",
            vertex.id
        );
    }
}

// ─── Construction ─────────────────────────────────────────────

#[test]
fn grid_counts() {
    for (subdivisions, height) in [(1, 1.0), (4, 1.0), (6, 1.5), (10, 0.5)] {
        let config = TearConfig {
            width: 1.0,
            height,
            subdivisions,
            ..Default::default()
        };
        let mesh = TearMesh::build(&config);
        let cols = config.cols() as usize;
        let rows = config.rows() as usize;
        assert_eq!(mesh.vertex_count(), (cols + 1) * (rows + 1));
        assert_eq!(mesh.triangle_count(), 2 * cols * rows);
        assert!(mesh.validate().is_ok());
    }
}

#[test]
fn triangles_reference_distinct_existing_vertices() {
    let mesh = grid(5);
    for tri in mesh.triangles() {
        let [a, b, c] = tri.vertices();
        assert!(a != b && b != c && a != c);
        for v in tri.vertices() {
            assert!(mesh.get_vertex(v).is_some());
        }
    }
}

#[test]
fn edges_have_one_or_two_triangles() {
    let mesh = grid(5);
    for edge in mesh.edges() {
        let n = edge.triangles().len();
        assert!(n == 1 || n == 2, "edge {} has {n} triangles", edge.key());
    }
    // 5×5 cells: 6·5 horizontal + 6·5 vertical + 25 diagonals.
    assert_eq!(mesh.edge_count(), 85);
    assert_eq!(mesh.open_edge_count(), 20);
}

#[test]
fn winding_is_counter_clockwise() {
    let mesh = grid(3);
    for tri in mesh.triangles() {
        let [a, b, c] = tri.vertices().map(|v| mesh.vertex(v).rest_uv);
        let cross = (b - a).perp_dot(c - a);
        assert!(cross > 0.0);
    }
}

#[test]
fn top_row_is_pinned() {
    let mesh = grid(4);
    for vertex in mesh.vertices() {
        assert_eq!(vertex.pinned, vertex.rest_uv.y > 0.95);
    }
    assert_eq!(mesh.vertices().iter().filter(|v| v.pinned).count(), 5);
}

#[test]
fn positions_span_sheet() {
    let config = TearConfig {
        width: 2.0,
        height: 1.0,
        subdivisions: 4,
        ..Default::default()
    };
    let mesh = TearMesh::build(&config);
    let first = mesh.vertex(VertexId(0)).position;
    let last = mesh.vertex(VertexId(mesh.vertex_count() as u32 - 1)).position;
    assert!((first - Vec3::new(-1.0, -0.5, 0.0)).length() < 1e-6);
    assert!((last - Vec3::new(1.0, 0.5, 0.0)).length() < 1e-6);
}

#[test]
fn mass_is_conserved_at_construction() {
    for subdivisions in [1, 3, 8] {
        let config = TearConfig {
            width: 1.3,
            height: 0.9,
            subdivisions,
            density: 2.5,
            ..Default::default()
        };
        let mesh = TearMesh::build(&config);
        let expected = config.density * mesh.total_rest_area();
        assert!(
            (mesh.total_mass() - expected).abs() < 1e-4 * expected.max(1.0),
            "mass {} vs density × area {}",
            mesh.total_mass(),
            expected
        );
        assert!((mesh.total_rest_area() - 1.3 * 0.9).abs() < 1e-4);
    }
}

#[test]
fn corner_vertex_gets_quarter_cell() {
    let mesh = grid(4);
    let cell_mass = 2.0 * 0.25 * 0.25;
    assert!((mesh.vertex(VertexId(0)).mass - cell_mass / 4.0).abs() < 1e-6);
    assert!((mesh.vertex(at(4, 2, 2)).mass - cell_mass).abs() < 1e-6);
}

// ─── Topology queries ─────────────────────────────────────────

#[test]
fn boundary_flags_match_open_edges() {
    let mesh = grid(4);
    assert_boundary_consistent(&mesh);
    assert!(mesh.vertex(at(4, 0, 2)).is_boundary());
    assert!(!mesh.vertex(at(4, 2, 2)).is_boundary());
}

#[test]
fn center_vertex_adjacency() {
    let mesh = grid(2);
    let center = VertexId(4);
    assert_eq!(mesh.vertex_triangles(center).len(), 6);
    assert_eq!(mesh.one_ring(center).len(), 6);
    assert_eq!(mesh.vertex_edges(center).len(), 6);
}

#[test]
fn unknown_vertex_queries_are_empty() {
    let mesh = grid(2);
    assert!(mesh.vertex_triangles(VertexId(999)).is_empty());
    assert!(mesh.vertex_edges(VertexId(999)).is_empty());
    assert!(mesh.edge(VertexId(0), VertexId(999)).is_none());
}

#[test]
#[should_panic(expected = "unknown vertex")]
fn unknown_vertex_lookup_panics() {
    let mesh = grid(2);
    let _ = mesh.vertex(VertexId(999));
}

#[test]
fn triangle_adjacency_is_symmetric() {
    let mesh = grid(3);
    for tri in mesh.triangles() {
        assert!(tri.adjacent().len() <= 3);
        for &n in tri.adjacent() {
            assert!(mesh.triangle(n).adjacent().contains(&tri.id()));
        }
    }
}

#[test]
fn boundary_walk_follows_silhouette() {
    let mesh = grid(4);
    let walk = mesh.boundary_loop();
    // Bottom row (5) then up the right side until the pinned corner (3).
    assert_eq!(walk.len(), 8);
    assert_eq!(walk[0], VertexId(0));
    for pair in walk.windows(2) {
        let edge = mesh.edge(pair[0], pair[1]).expect("consecutive walk vertices share an edge");
        assert!(edge.is_boundary());
    }
    assert!(walk.iter().all(|&v| !mesh.vertex(v).pinned));
}

// ─── split_vertex ─────────────────────────────────────────────

#[test]
fn split_vertex_adds_one_vertex() {
    let mut mesh = grid(2);
    let center = VertexId(4);
    let fan = mesh.vertex_triangles(center);
    let moved: Vec<TriangleId> = fan[..2].to_vec();
    let before_vertices = mesh.vertex_count();
    let before_triangles = mesh.triangle_count();

    let copy = mesh.split_vertex(center, &moved);

    assert_eq!(mesh.vertex_count(), before_vertices + 1);
    assert_eq!(mesh.triangle_count(), before_triangles);
    for &t in &moved {
        assert!(mesh.triangle(t).contains(copy));
        assert!(!mesh.triangle(t).contains(center));
    }
    for &t in &fan[2..] {
        assert!(mesh.triangle(t).contains(center));
    }
    assert_eq!(mesh.vertex(copy).position, mesh.vertex(center).position);
    assert_eq!(mesh.vertex(copy).rest_uv, mesh.vertex(center).rest_uv);
    assert!(mesh.validate().is_ok());
    assert_boundary_consistent(&mesh);
}

// ─── tear_edge ────────────────────────────────────────────────

#[test]
fn tear_from_silhouette_splits_outer_endpoint() {
    let mut mesh = grid(4);
    let outer = at(4, 0, 3);
    let inner = at(4, 1, 3);

    let tear = mesh.tear_edge(outer, inner).expect("interior edge tears");

    assert_eq!(tear.key, EdgeKey::new(outer, inner));
    assert_eq!(tear.splits.len(), 1);
    assert_eq!(tear.splits[0].0, outer);
    assert_eq!(mesh.vertex_count(), 26);
    assert_eq!(mesh.torn_edge_count(), 2);
    assert!(mesh.vertex(inner).is_boundary());
    assert!(mesh.validate().is_ok());
    assert_boundary_consistent(&mesh);
}

#[test]
fn tear_is_idempotent() {
    let mut mesh = grid(4);
    let a = at(4, 0, 3);
    let b = at(4, 1, 3);
    assert!(mesh.tear_edge(a, b).is_some());
    let vertices = mesh.vertex_count();
    let triangles = mesh.triangle_count();

    assert!(mesh.tear_edge(a, b).is_none());
    assert!(mesh.tear_edge(b, a).is_none());
    assert_eq!(mesh.vertex_count(), vertices);
    assert_eq!(mesh.triangle_count(), triangles);
}

#[test]
fn tear_missing_edge_is_noop() {
    let mut mesh = grid(4);
    let before = mesh.vertex_count();
    assert!(mesh.tear_edge(VertexId(0), VertexId(24)).is_none());
    assert!(mesh.tear_edge(VertexId(0), VertexId(9999)).is_none());
    assert_eq!(mesh.vertex_count(), before);
    assert_eq!(mesh.torn_edge_count(), 0);
}

#[test]
fn crack_tip_splits_when_tear_continues() {
    let mut mesh = grid(4);
    mesh.tear_edge(at(4, 0, 3), at(4, 1, 3));
    let tear = mesh
        .tear_edge(at(4, 1, 3), at(4, 2, 3))
        .expect("next edge along the row tears");
    assert_eq!(tear.splits.len(), 1);
    assert_eq!(tear.splits[0].0, at(4, 1, 3));
    assert!(mesh.validate().is_ok());
    assert_boundary_consistent(&mesh);
}

#[test]
fn full_row_tear_detaches_page() {
    let mut mesh = grid(4);
    assert_eq!(mesh.detached_area(), 0.0);
    for i in 0..4 {
        assert!(mesh.tear_edge(at(4, i, 3), at(4, i + 1, 3)).is_some());
    }
    assert!((mesh.detached_area() - 0.75).abs() < 1e-4);
    assert_eq!(mesh.triangle_components().len(), 2);
    assert!(mesh.validate().is_ok());
    assert_boundary_consistent(&mesh);
}

#[test]
fn tearing_silhouette_edge_only_marks_it() {
    let mut mesh = grid(2);
    let before = mesh.vertex_count();
    let tear = mesh.tear_edge(VertexId(0), VertexId(1)).unwrap();
    assert!(tear.splits.is_empty());
    assert_eq!(mesh.vertex_count(), before);
    assert!(mesh.edge(VertexId(0), VertexId(1)).unwrap().is_torn());
}

// ─── insert_vertex_on_edge ────────────────────────────────────

#[test]
fn insert_on_interior_edge_splits_both_triangles() {
    let mut mesh = grid(2);
    let a = VertexId(1);
    let b = VertexId(4);
    let area = mesh.total_rest_area();
    let triangles = mesh.triangle_count();

    let mid = mesh.insert_vertex_on_edge(a, b, 0.25);

    assert_eq!(mesh.triangle_count(), triangles + 2);
    assert!(mesh.edge(a, b).is_none());
    assert!(mesh.edge(a, mid).is_some());
    assert!(mesh.edge(mid, b).is_some());
    let expected = mesh.vertex(a).rest_uv.lerp(mesh.vertex(b).rest_uv, 0.25);
    assert!((mesh.vertex(mid).rest_uv - expected).length() < 1e-6);
    assert!((mesh.total_rest_area() - area).abs() < 1e-5);
    assert!(!mesh.vertex(mid).is_boundary());
    assert!(mesh.validate().is_ok());
}

#[test]
fn insert_on_silhouette_edge_adds_one_triangle() {
    let mut mesh = grid(2);
    let triangles = mesh.triangle_count();
    let mid = mesh.insert_vertex_on_edge(VertexId(0), VertexId(1), 0.5);
    assert_eq!(mesh.triangle_count(), triangles + 1);
    assert!(mesh.vertex(mid).is_boundary());
    assert!(mesh.validate().is_ok());
    assert_boundary_consistent(&mesh);
}

#[test]
fn insert_on_torn_edge_keeps_halves_torn() {
    let mut mesh = grid(2);
    mesh.tear_edge(VertexId(0), VertexId(1));
    let mid = mesh.insert_vertex_on_edge(VertexId(0), VertexId(1), 0.5);
    assert!(mesh.edge(VertexId(0), mid).unwrap().is_torn());
    assert!(mesh.edge(mid, VertexId(1)).unwrap().is_torn());
}

#[test]
#[should_panic(expected = "unknown edge")]
fn insert_on_missing_edge_panics() {
    let mut mesh = grid(2);
    mesh.insert_vertex_on_edge(VertexId(0), VertexId(8), 0.5);
}

// ─── Manual construction ──────────────────────────────────────

#[test]
fn collinear_triangle_is_degenerate() {
    let mut mesh = TearMesh::new(1.0, 1.0);
    let a = mesh.add_vertex(Vec3::ZERO, Vec2::new(0.0, 0.0), 1.0, false);
    let b = mesh.add_vertex(Vec3::X, Vec2::new(0.5, 0.5), 1.0, false);
    let c = mesh.add_vertex(Vec3::Y, Vec2::new(1.0, 1.0), 1.0, false);
    let t = mesh.add_triangle([a, b, c]);
    mesh.rebuild_edges();
    assert!(mesh.triangle(t).is_degenerate());
    assert_eq!(mesh.triangle(t).rest_area(), 0.0);
}

#[test]
#[should_panic(expected = "repeated vertex ids")]
fn repeated_corner_panics() {
    let mut mesh = TearMesh::new(1.0, 1.0);
    let a = mesh.add_vertex(Vec3::ZERO, Vec2::ZERO, 1.0, false);
    let b = mesh.add_vertex(Vec3::X, Vec2::X, 1.0, false);
    mesh.add_triangle([a, b, a]);
}

// ─── Buffers ──────────────────────────────────────────────────

#[test]
fn buffer_data_layout() {
    let mesh = grid(3);
    let data = mesh.buffer_data();
    assert_eq!(data.positions.len(), mesh.vertex_count() * 3);
    assert_eq!(data.uvs.len(), mesh.vertex_count() * 2);
    assert_eq!(data.triangle_count(), mesh.triangle_count());
    assert_eq!(data.vertex_count(), mesh.vertex_count());
    let boundary = mesh.vertices().iter().filter(|v| v.is_boundary()).count();
    assert_eq!(data.boundary.iter().filter(|&&b| b == 1).count(), boundary);
}

#[test]
fn buffer_data_serializes() {
    let data = grid(1).buffer_data();
    let json = serde_json::to_string(&data).unwrap();
    assert!(json.contains("indices"));
}
