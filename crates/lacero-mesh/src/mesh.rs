//! Core mesh storage: vertex and triangle arenas plus the derived edge map.
//!
//! Vertices and triangles live in contiguous `Vec`s indexed by their ids.
//! Nothing is ever removed, so ids stay stable for the mesh's lifetime.
//! Edges are not stored independently: they are re-derived from the
//! triangle vertex lists by [`TearMesh::rebuild_edges`] after every
//! topology change. The only edge state that survives a rebuild is the set
//! of torn keys and the per-edge tear progress.

use std::collections::{BTreeMap, BTreeSet};

use lacero_math::{signed_area2, Vec2, Vec3};
use lacero_types::constants::DEGENERATE_AREA_THRESHOLD;
use lacero_types::{EdgeKey, LaceroError, LaceroResult, TriangleId, VertexId};

/// A point of the simulated sheet.
#[derive(Debug, Clone)]
pub struct Vertex {
    /// Stable id (index into the vertex arena).
    pub id: VertexId,
    /// Current, deformed position.
    pub position: Vec3,
    /// Undeformed pattern-space coordinate. Never changes after creation.
    pub rest_uv: Vec2,
    /// Velocity, integrated each step.
    pub velocity: Vec3,
    /// Lumped mass (kg).
    pub mass: f32,
    /// Pinned vertices model the binding strip and are never integrated.
    pub pinned: bool,
    pub(crate) is_boundary: bool,
    pub(crate) is_tear_tip: bool,
}

impl Vertex {
    /// True if the vertex lies on the silhouette or on a tear.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.is_boundary
    }

    /// True if the vertex is the active frontier of a tear.
    #[inline]
    pub fn is_tear_tip(&self) -> bool {
        self.is_tear_tip
    }
}

/// A consistently wound (counter-clockwise in rest UV) triangle.
#[derive(Debug, Clone)]
pub struct Triangle {
    pub(crate) id: TriangleId,
    pub(crate) vertices: [VertexId; 3],
    /// Twice the signed rest-UV area.
    pub(crate) uv_det: f32,
    /// Physical rest area (UV area scaled by width × height).
    pub(crate) rest_area: f32,
    pub(crate) adjacent: Vec<TriangleId>,
}

impl Triangle {
    #[inline]
    pub fn id(&self) -> TriangleId {
        self.id
    }

    #[inline]
    pub fn vertices(&self) -> [VertexId; 3] {
        self.vertices
    }

    #[inline]
    pub fn rest_area(&self) -> f32 {
        self.rest_area
    }

    /// Neighbouring triangles across untorn shared edges (at most 3).
    #[inline]
    pub fn adjacent(&self) -> &[TriangleId] {
        &self.adjacent
    }

    /// True if the rest-UV determinant is too small to define strain.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.uv_det.abs() < DEGENERATE_AREA_THRESHOLD
    }

    /// True if `v` is one of the three corners.
    #[inline]
    pub fn contains(&self, v: VertexId) -> bool {
        self.vertices.contains(&v)
    }

    /// The three edges in winding order: `(v0, v1), (v1, v2), (v2, v0)`.
    #[inline]
    pub fn edge_pairs(&self) -> [(VertexId, VertexId); 3] {
        let [a, b, c] = self.vertices;
        [(a, b), (b, c), (c, a)]
    }

    /// The corner that is neither `a` nor `b`.
    pub fn opposite(&self, a: VertexId, b: VertexId) -> Option<VertexId> {
        self.vertices.iter().copied().find(|&v| v != a && v != b)
    }
}

/// An undirected edge derived from triangle adjacency.
#[derive(Debug, Clone)]
pub struct Edge {
    pub(crate) key: EdgeKey,
    pub(crate) triangles: Vec<TriangleId>,
    pub(crate) is_boundary: bool,
    pub(crate) is_torn: bool,
    pub(crate) tear_progress: f32,
}

impl Edge {
    #[inline]
    pub fn key(&self) -> EdgeKey {
        self.key
    }

    /// Adjacent triangles (1 or 2).
    #[inline]
    pub fn triangles(&self) -> &[TriangleId] {
        &self.triangles
    }

    /// Borders exactly one triangle, or has been torn.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.is_boundary
    }

    #[inline]
    pub fn is_torn(&self) -> bool {
        self.is_torn
    }

    /// True for untorn edges shared by two triangles.
    #[inline]
    pub fn is_interior(&self) -> bool {
        !self.is_torn && self.triangles.len() == 2
    }

    /// Partial-tear visualization progress in `[0, 1]`.
    #[inline]
    pub fn tear_progress(&self) -> f32 {
        self.tear_progress
    }
}

/// The simulation mesh of one sheet.
#[derive(Debug, Clone)]
pub struct TearMesh {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) triangles: Vec<Triangle>,
    pub(crate) edges: BTreeMap<EdgeKey, Edge>,
    pub(crate) torn: BTreeSet<EdgeKey>,
    pub(crate) width: f32,
    pub(crate) height: f32,
}

impl TearMesh {
    /// Creates an empty mesh for a sheet of the given physical size.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
            edges: BTreeMap::new(),
            torn: BTreeSet::new(),
            width,
            height,
        }
    }

    /// Creates an empty mesh with pre-allocated capacity.
    pub fn with_capacity(width: f32, height: f32, vertices: usize, triangles: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            triangles: Vec::with_capacity(triangles),
            ..Self::new(width, height)
        }
    }

    /// Appends a vertex at rest. Call [`rebuild_edges`](Self::rebuild_edges)
    /// once all triangles are added.
    pub fn add_vertex(&mut self, position: Vec3, rest_uv: Vec2, mass: f32, pinned: bool) -> VertexId {
        let id = VertexId(self.vertices.len() as u32);
        self.vertices.push(Vertex {
            id,
            position,
            rest_uv,
            velocity: Vec3::ZERO,
            mass: mass.max(0.0),
            pinned,
            is_boundary: false,
            is_tear_tip: false,
        });
        id
    }

    /// Appends a triangle. The corners must be three distinct known vertices.
    ///
    /// # Panics
    /// On unknown or repeated vertex ids.
    pub fn add_triangle(&mut self, vertices: [VertexId; 3]) -> TriangleId {
        let [a, b, c] = vertices;
        assert!(
            a != b && b != c && a != c,
            "triangle has repeated vertex ids: [{a}, {b}, {c}]"
        );
        for v in vertices {
            self.vertex(v);
        }
        let id = TriangleId(self.triangles.len() as u32);
        let (uv_det, rest_area) = self.rest_measure(vertices);
        self.triangles.push(Triangle {
            id,
            vertices,
            uv_det,
            rest_area,
            adjacent: Vec::new(),
        });
        id
    }

    /// `(2 × signed UV area, physical rest area)` of a corner triple.
    pub(crate) fn rest_measure(&self, [a, b, c]: [VertexId; 3]) -> (f32, f32) {
        let ua = self.vertex(a).rest_uv;
        let ub = self.vertex(b).rest_uv;
        let uc = self.vertex(c).rest_uv;
        let signed = signed_area2(ua, ub, uc);
        (2.0 * signed, signed.abs() * self.width * self.height)
    }

    // ─── Accessors ───────────────────────────────────────────────

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Physical sheet width.
    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Physical sheet height.
    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Returns the vertex with the given id.
    ///
    /// # Panics
    /// If the id did not come from this mesh.
    #[inline]
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        self.vertices
            .get(id.index())
            .unwrap_or_else(|| panic!("unknown vertex {id} (mesh has {})", self.vertices.len()))
    }

    /// Mutable access to a vertex's kinematic state.
    ///
    /// # Panics
    /// If the id did not come from this mesh.
    #[inline]
    pub fn vertex_mut(&mut self, id: VertexId) -> &mut Vertex {
        let count = self.vertices.len();
        self.vertices
            .get_mut(id.index())
            .unwrap_or_else(|| panic!("unknown vertex {id} (mesh has {count})"))
    }

    /// Returns the vertex with the given id, if it exists.
    #[inline]
    pub fn get_vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.index())
    }

    /// Returns the triangle with the given id.
    ///
    /// # Panics
    /// If the id did not come from this mesh.
    #[inline]
    pub fn triangle(&self, id: TriangleId) -> &Triangle {
        self.triangles
            .get(id.index())
            .unwrap_or_else(|| panic!("unknown triangle {id} (mesh has {})", self.triangles.len()))
    }

    /// Looks up an edge. Missing edges are a normal outcome, not an error.
    #[inline]
    pub fn edge(&self, a: VertexId, b: VertexId) -> Option<&Edge> {
        self.edges.get(&EdgeKey::new(a, b))
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Mutable vertex slice for integrators. Topology flags stay read-only.
    pub fn vertices_mut(&mut self) -> &mut [Vertex] {
        &mut self.vertices
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// All edges in key order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Number of edges that have been torn.
    pub fn torn_edge_count(&self) -> usize {
        self.edges.values().filter(|e| e.is_torn).count()
    }

    /// Marks or clears the tear-tip flag of a vertex.
    pub fn set_tear_tip(&mut self, id: VertexId, is_tip: bool) {
        self.vertex_mut(id).is_tear_tip = is_tip;
    }

    /// Records partial-tear progress on an edge. Missing edges are ignored.
    pub fn set_tear_progress(&mut self, a: VertexId, b: VertexId, progress: f32) {
        if let Some(edge) = self.edges.get_mut(&EdgeKey::new(a, b)) {
            if !edge.is_torn {
                edge.tear_progress = progress.clamp(0.0, 1.0);
            }
        }
    }

    /// Sum of triangle rest areas.
    pub fn total_rest_area(&self) -> f32 {
        self.triangles.iter().map(|t| t.rest_area).sum()
    }

    /// Sum of vertex masses.
    pub fn total_mass(&self) -> f32 {
        self.vertices.iter().map(|v| v.mass).sum()
    }

    /// Validates mesh integrity.
    ///
    /// Checks:
    /// - Every triangle references 3 distinct, existing vertices
    /// - Every edge has 1 or 2 adjacent triangles
    /// - Vertex boundary flags agree with the edge set
    pub fn validate(&self) -> LaceroResult<()> {
        let n = self.vertices.len();
        for tri in &self.triangles {
            let [a, b, c] = tri.vertices;
            if a == b || b == c || a == c {
                return Err(LaceroError::InvalidMesh(format!(
                    "Triangle {} has repeated vertex ids: [{a}, {b}, {c}]",
                    tri.id
                )));
            }
            if let Some(bad) = tri.vertices.iter().find(|v| v.index() >= n) {
                return Err(LaceroError::InvalidMesh(format!(
                    "Triangle {} references unknown vertex {bad} (vertex count: {n})",
                    tri.id
                )));
            }
        }

        for edge in self.edges.values() {
            let count = edge.triangles.len();
            if count == 0 || count > 2 {
                return Err(LaceroError::InvalidMesh(format!(
                    "Edge {} has {count} adjacent triangles",
                    edge.key
                )));
            }
        }

        let mut on_boundary = vec![false; n];
        for edge in self.edges.values().filter(|e| e.is_boundary) {
            on_boundary[edge.key.lo().index()] = true;
            on_boundary[edge.key.hi().index()] = true;
        }
        for vertex in &self.vertices {
            if vertex.is_boundary != on_boundary[vertex.id.index()] {
                return Err(LaceroError::InvalidMesh(format!(
                    "Vertex {} boundary flag is stale",
                    vertex.id
                )));
            }
        }

        Ok(())
    }
}
