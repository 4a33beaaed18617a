//! Strongly-typed identifiers for mesh entities.
//!
//! Ids are arena indices handed out by the mesh. They are never reused
//! within a mesh's lifetime, so a stale id can only come from a bug.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Index into the mesh vertex arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(pub u32);

/// Index into the mesh triangle arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TriangleId(pub u32);

impl VertexId {
    /// Returns the raw index as `usize` for array indexing.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl TriangleId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for VertexId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl From<u32> for TriangleId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl fmt::Display for TriangleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Canonical key of an undirected edge: `(min id, max id)`.
///
/// Built only through [`EdgeKey::new`], so the same pair of endpoints
/// always maps to the same key regardless of argument order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeKey {
    lo: VertexId,
    hi: VertexId,
}

impl EdgeKey {
    #[inline]
    pub fn new(a: VertexId, b: VertexId) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    /// The smaller endpoint id.
    #[inline]
    pub fn lo(self) -> VertexId {
        self.lo
    }

    /// The larger endpoint id.
    #[inline]
    pub fn hi(self) -> VertexId {
        self.hi
    }

    /// Returns true if `v` is one of the two endpoints.
    #[inline]
    pub fn contains(self, v: VertexId) -> bool {
        self.lo == v || self.hi == v
    }

    /// Returns the endpoint opposite to `v`, or `None` if `v` is not on the edge.
    #[inline]
    pub fn other(self, v: VertexId) -> Option<VertexId> {
        if v == self.lo {
            Some(self.hi)
        } else if v == self.hi {
            Some(self.lo)
        } else {
            None
        }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lo, self.hi)
    }
}
