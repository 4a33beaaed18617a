//! Incremental topology mutation: vertex splitting, edge tearing and edge
//! subdivision.
//!
//! Every public operation ends with [`TearMesh::rebuild_edges`].

use lacero_types::{EdgeKey, TriangleId, VertexId};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::mesh::{TearMesh, Triangle, Vertex};

/// Outcome of a successful [`TearMesh::tear_edge`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeTear {
    /// The edge that was torn.
    pub key: EdgeKey,
    /// `(original, duplicate)` for every endpoint that was split apart.
    pub splits: Vec<(VertexId, VertexId)>,
}

impl TearMesh {
    /// Duplicates `v` under a new id and moves `triangles` onto the copy.
    ///
    /// The copy shares position, rest UV, velocity and mass with the
    /// original. Torn edges that the moved triangles carried keep their
    /// torn state under the new key.
    ///
    /// # Panics
    /// If `v` is unknown or a listed triangle does not reference `v`.
    pub fn split_vertex(&mut self, v: VertexId, triangles: &[TriangleId]) -> VertexId {
        let copy = self.split_vertex_deferred(v, triangles);
        self.rebuild_edges();
        copy
    }

    /// [`split_vertex`](Self::split_vertex) without the trailing rebuild.
    fn split_vertex_deferred(&mut self, v: VertexId, triangles: &[TriangleId]) -> VertexId {
        let source = self.vertex(v).clone();
        let copy = VertexId(self.vertices.len() as u32);
        self.vertices.push(Vertex {
            id: copy,
            is_tear_tip: false,
            ..source
        });

        for &t in triangles {
            let tri = self.triangle(t);
            assert!(tri.contains(v), "triangle {t} does not reference vertex {v}");

            let carried: Vec<EdgeKey> = tri
                .vertices
                .iter()
                .filter(|&&n| n != v && self.torn.contains(&EdgeKey::new(v, n)))
                .map(|&n| EdgeKey::new(copy, n))
                .collect();
            self.torn.extend(carried);

            let tri = &mut self.triangles[t.index()];
            for corner in tri.vertices.iter_mut() {
                if *corner == v {
                    *corner = copy;
                }
            }
        }

        trace!(%v, %copy, moved = triangles.len(), "split vertex");
        copy
    }

    /// Tears the edge `(v0, v1)`.
    ///
    /// Returns `None` (and changes nothing) if the edge does not exist or is
    /// already torn. Otherwise the edge is marked torn and, if it was shared
    /// by two triangles, each endpoint whose triangle fan is now cut in two
    /// is split so the far side of the edge gets its own copy. An endpoint
    /// whose fan stays connected around the other side (the interior end of
    /// a crack) is left shared.
    pub fn tear_edge(&mut self, v0: VertexId, v1: VertexId) -> Option<EdgeTear> {
        let key = EdgeKey::new(v0, v1);
        let edge = self.edges.get(&key)?;
        if edge.is_torn {
            return None;
        }
        let sides = edge.triangles.clone();
        self.torn.insert(key);

        let mut splits = Vec::new();
        if let &[near, far] = sides.as_slice() {
            for endpoint in [key.lo(), key.hi()] {
                let groups = self.fan_components(endpoint);
                let moving = groups
                    .into_iter()
                    .find(|g| g.contains(&far) && !g.contains(&near));
                if let Some(group) = moving {
                    let copy = self.split_vertex_deferred(endpoint, &group);
                    splits.push((endpoint, copy));
                }
            }
        }

        self.rebuild_edges();
        trace!(%key, splits = splits.len(), "tore edge");
        Some(EdgeTear { key, splits })
    }

    /// Inserts a vertex at parameter `t` along `(v0, v1)` and splits each
    /// adjacent triangle in two.
    ///
    /// The new vertex interpolates position, rest UV, velocity and mass.
    /// If the edge was torn, both halves stay torn.
    ///
    /// # Panics
    /// If the edge does not exist.
    pub fn insert_vertex_on_edge(&mut self, v0: VertexId, v1: VertexId, t: f32) -> VertexId {
        let key = EdgeKey::new(v0, v1);
        let sides = match self.edges.get(&key) {
            Some(edge) => edge.triangles.clone(),
            None => panic!("insert_vertex_on_edge on unknown edge {key}"),
        };
        let t = t.clamp(0.0, 1.0);

        let a = self.vertex(v0).clone();
        let b = self.vertex(v1).clone();
        let mid = VertexId(self.vertices.len() as u32);
        self.vertices.push(Vertex {
            id: mid,
            position: a.position.lerp(b.position, t),
            rest_uv: a.rest_uv.lerp(b.rest_uv, t),
            velocity: a.velocity.lerp(b.velocity, t),
            mass: a.mass + (b.mass - a.mass) * t,
            pinned: a.pinned && b.pinned,
            is_boundary: false,
            is_tear_tip: false,
        });

        for tri_id in sides {
            let original = self.triangle(tri_id).vertices;
            let near_half = original.map(|c| if c == v1 { mid } else { c });
            let far_half = original.map(|c| if c == v0 { mid } else { c });

            let (uv_det, rest_area) = self.rest_measure(near_half);
            let tri = &mut self.triangles[tri_id.index()];
            tri.vertices = near_half;
            tri.uv_det = uv_det;
            tri.rest_area = rest_area;

            let (uv_det, rest_area) = self.rest_measure(far_half);
            let id = TriangleId(self.triangles.len() as u32);
            self.triangles.push(Triangle {
                id,
                vertices: far_half,
                uv_det,
                rest_area,
                adjacent: Vec::new(),
            });
        }

        if self.torn.remove(&key) {
            self.torn.insert(EdgeKey::new(v0, mid));
            self.torn.insert(EdgeKey::new(mid, v1));
        }

        self.rebuild_edges();
        trace!(%key, %mid, t, "inserted vertex on edge");
        mid
    }
}
