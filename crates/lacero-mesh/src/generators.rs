//! Calendar-page mesh generator.
//!
//! Produces a regular grid in the XY plane with deterministic diagonal
//! splits and counter-clockwise winding in rest UV.

use lacero_math::{Vec2, Vec3};
use lacero_types::constants::PIN_V_THRESHOLD;
use lacero_types::{TearConfig, VertexId};
use tracing::debug;

use crate::mesh::TearMesh;

impl TearMesh {
    /// Builds the sheet described by `config`.
    ///
    /// A `(cols + 1) × (rows + 1)` vertex grid spanning
    /// `[-width/2, width/2] × [-height/2, height/2]` at `z = 0`, with `v = 1`
    /// at the top. Vertices above [`PIN_V_THRESHOLD`] are pinned to the
    /// binding. Each vertex receives a quarter of `density × cell area` for
    /// every cell it touches.
    ///
    /// # Example
    /// ```
    /// use lacero_mesh::TearMesh;
    /// use lacero_types::TearConfig;
    ///
    /// let config = TearConfig { width: 1.0, height: 1.0, subdivisions: 2, ..Default::default() };
    /// let mesh = TearMesh::build(&config);
    /// assert_eq!(mesh.vertex_count(), 9);   // 3×3 vertices
    /// assert_eq!(mesh.triangle_count(), 8); // 2×2 cells × 2 tris each
    /// ```
    pub fn build(config: &TearConfig) -> Self {
        let cols = config.cols() as usize;
        let rows = config.rows() as usize;
        sheet_grid(cols, rows, config.width, config.height, config.density)
    }
}

/// Generates a pinned sheet grid with `cols × rows` cells.
pub fn sheet_grid(cols: usize, rows: usize, width: f32, height: f32, density: f32) -> TearMesh {
    let cols = cols.max(1);
    let rows = rows.max(1);
    let verts_x = cols + 1;
    let verts_y = rows + 1;

    let mut mesh = TearMesh::with_capacity(width, height, verts_x * verts_y, cols * rows * 2);

    let cell_w = width / cols as f32;
    let cell_h = height / rows as f32;
    let quarter_cell_mass = density * cell_w * cell_h / 4.0;

    for j in 0..verts_y {
        for i in 0..verts_x {
            let u = i as f32 / cols as f32;
            let v = j as f32 / rows as f32;
            let position = Vec3::new(u * width - width / 2.0, v * height - height / 2.0, 0.0);

            let cells_x = usize::from(i > 0) + usize::from(i < cols);
            let cells_y = usize::from(j > 0) + usize::from(j < rows);
            let mass = (cells_x * cells_y) as f32 * quarter_cell_mass;

            mesh.add_vertex(position, Vec2::new(u, v), mass, v > PIN_V_THRESHOLD);
        }
    }

    for j in 0..rows {
        for i in 0..cols {
            let bottom_left = (j * verts_x + i) as u32;
            let bottom_right = bottom_left + 1;
            let top_left = bottom_left + verts_x as u32;
            let top_right = top_left + 1;

            mesh.add_triangle([
                VertexId(bottom_left),
                VertexId(bottom_right),
                VertexId(top_left),
            ]);
            mesh.add_triangle([
                VertexId(bottom_right),
                VertexId(top_right),
                VertexId(top_left),
            ]);
        }
    }

    mesh.rebuild_edges();
    debug!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        edges = mesh.edge_count(),
        "built sheet grid"
    );
    mesh
}
