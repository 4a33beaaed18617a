//! Topology derivation and queries.
//!
//! The edge set, triangle adjacency and every boundary flag are derived
//! here from the triangle vertex lists. Nothing is maintained
//! incrementally, so a mutation can never leave stale flags behind.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use lacero_types::{EdgeKey, TriangleId, VertexId};

use crate::mesh::{Edge, TearMesh};

impl TearMesh {
    /// Re-derives edges, triangle adjacency and boundary flags.
    ///
    /// O(triangles). Must run after every topology mutation. Torn keys and
    /// tear progress of surviving edges are carried over; torn keys whose
    /// edge no longer exists are dropped.
    pub fn rebuild_edges(&mut self) {
        let mut edge_tris: BTreeMap<EdgeKey, Vec<TriangleId>> = BTreeMap::new();
        for tri in &self.triangles {
            for (a, b) in tri.edge_pairs() {
                edge_tris.entry(EdgeKey::new(a, b)).or_default().push(tri.id);
            }
        }

        let previous = std::mem::take(&mut self.edges);
        self.torn.retain(|key| edge_tris.contains_key(key));

        for (key, triangles) in edge_tris {
            let is_torn = self.torn.contains(&key);
            let tear_progress = if is_torn {
                1.0
            } else {
                previous.get(&key).map_or(0.0, |e| e.tear_progress)
            };
            let is_boundary = triangles.len() == 1 || is_torn;
            self.edges.insert(
                key,
                Edge {
                    key,
                    triangles,
                    is_boundary,
                    is_torn,
                    tear_progress,
                },
            );
        }

        for tri in &mut self.triangles {
            tri.adjacent.clear();
        }
        for edge in self.edges.values() {
            if let &[t0, t1] = edge.triangles.as_slice() {
                if !edge.is_torn {
                    self.triangles[t0.index()].adjacent.push(t1);
                    self.triangles[t1.index()].adjacent.push(t0);
                }
            }
        }

        for vertex in &mut self.vertices {
            vertex.is_boundary = false;
        }
        for edge in self.edges.values().filter(|e| e.is_boundary) {
            self.vertices[edge.key.lo().index()].is_boundary = true;
            self.vertices[edge.key.hi().index()].is_boundary = true;
        }
    }

    /// Triangles that reference `v`. Linear scan; empty for unknown ids.
    pub fn vertex_triangles(&self, v: VertexId) -> Vec<TriangleId> {
        self.triangles
            .iter()
            .filter(|t| t.contains(v))
            .map(|t| t.id)
            .collect()
    }

    /// Edges incident to `v`, in key order. Linear scan; empty for unknown ids.
    pub fn vertex_edges(&self, v: VertexId) -> Vec<&Edge> {
        self.edges.values().filter(|e| e.key.contains(v)).collect()
    }

    /// Vertices sharing a triangle with `v`, sorted by id.
    pub fn one_ring(&self, v: VertexId) -> Vec<VertexId> {
        let ring: BTreeSet<VertexId> = self
            .triangles
            .iter()
            .filter(|t| t.contains(v))
            .flat_map(|t| t.vertices)
            .filter(|&n| n != v)
            .collect();
        ring.into_iter().collect()
    }

    /// Walks the boundary from the lowest-id free boundary vertex.
    ///
    /// At each vertex the walk follows the first unvisited, unpinned
    /// boundary neighbour (edge key order) and stops when none is left.
    /// Only the first connected run is returned; a boundary cut apart by
    /// tears or pins is not closed into a loop.
    pub fn boundary_loop(&self) -> Vec<VertexId> {
        let Some(start) = self
            .vertices
            .iter()
            .find(|v| v.is_boundary && !v.pinned)
            .map(|v| v.id)
        else {
            return Vec::new();
        };

        let mut visited = BTreeSet::from([start]);
        let mut walk = vec![start];
        let mut current = start;

        loop {
            let next = self
                .edges
                .values()
                .filter(|e| e.is_boundary)
                .filter_map(|e| e.key.other(current))
                .find(|n| !visited.contains(n) && !self.vertex(*n).pinned);
            match next {
                Some(n) => {
                    visited.insert(n);
                    walk.push(n);
                    current = n;
                }
                None => break,
            }
        }

        walk
    }

    /// Groups the triangles around `v` into fans connected across untorn
    /// edges incident to `v`.
    ///
    /// A vertex whose fan falls apart into more than one group can be
    /// split so each group gets its own copy.
    pub(crate) fn fan_components(&self, v: VertexId) -> Vec<Vec<TriangleId>> {
        let fan = self.vertex_triangles(v);
        let mut component: BTreeMap<TriangleId, usize> = BTreeMap::new();
        let mut groups: Vec<Vec<TriangleId>> = Vec::new();

        for &seed in &fan {
            if component.contains_key(&seed) {
                continue;
            }
            let group_index = groups.len();
            let mut group = Vec::new();
            let mut queue = VecDeque::from([seed]);
            component.insert(seed, group_index);

            while let Some(t) = queue.pop_front() {
                group.push(t);
                let tri = self.triangle(t);
                for &other in &fan {
                    if component.contains_key(&other) {
                        continue;
                    }
                    let other_tri = self.triangle(other);
                    let joined = tri.vertices.iter().any(|&n| {
                        n != v
                            && other_tri.contains(n)
                            && !self.torn.contains(&EdgeKey::new(v, n))
                    });
                    if joined {
                        component.insert(other, group_index);
                        queue.push_back(other);
                    }
                }
            }
            groups.push(group);
        }

        groups
    }

    /// Connected components of triangles across untorn shared edges.
    pub fn triangle_components(&self) -> Vec<Vec<TriangleId>> {
        let mut seen = vec![false; self.triangles.len()];
        let mut components = Vec::new();

        for start in 0..self.triangles.len() {
            if seen[start] {
                continue;
            }
            seen[start] = true;
            let mut queue = VecDeque::from([TriangleId(start as u32)]);
            let mut component = Vec::new();
            while let Some(t) = queue.pop_front() {
                component.push(t);
                for &n in &self.triangles[t.index()].adjacent {
                    if !seen[n.index()] {
                        seen[n.index()] = true;
                        queue.push_back(n);
                    }
                }
            }
            components.push(component);
        }

        components
    }

    /// Rest area of the triangle components that no longer reach a pinned
    /// vertex, i.e. the part of the sheet torn free of the binding.
    pub fn detached_area(&self) -> f32 {
        self.triangle_components()
            .iter()
            .filter(|component| {
                !component.iter().any(|&t| {
                    self.triangles[t.index()]
                        .vertices
                        .iter()
                        .any(|&v| self.vertices[v.index()].pinned)
                })
            })
            .flat_map(|component| component.iter())
            .map(|&t| self.triangles[t.index()].rest_area)
            .sum()
    }

    /// Returns the number of edges bordering exactly one triangle.
    pub fn open_edge_count(&self) -> usize {
        self.edges.values().filter(|e| e.triangles.len() == 1).count()
    }
}
