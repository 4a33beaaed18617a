//! Two-way partition of the forces around a tear tip.

use lacero_math::{safe_normalize2, Vec2};
use lacero_types::constants::EPSILON;

/// One side of the force partition at a tip.
#[derive(Debug, Clone, PartialEq)]
pub struct ForceCluster {
    /// Normalized sum of the members (unit, or zero if they cancel).
    pub direction: Vec2,
    /// Sum of member magnitudes.
    pub magnitude: f32,
    pub members: Vec<Vec2>,
}

impl ForceCluster {
    fn from_members(members: Vec<Vec2>) -> Self {
        let sum: Vec2 = members.iter().copied().sum();
        Self {
            direction: safe_normalize2(sum),
            magnitude: members.iter().map(|m| m.length()).sum(),
            members,
        }
    }
}

/// Splits force samples into two opposing clusters.
///
/// The two samples with the most negative dot product seed the clusters;
/// every other sample joins the seed it is more aligned with (ties go to
/// the first). Samples that are zero or non-finite are ignored. Returns
/// `None` if fewer than two usable samples remain.
pub fn cluster_forces(samples: &[Vec2]) -> Option<(ForceCluster, ForceCluster)> {
    let usable: Vec<Vec2> = samples
        .iter()
        .copied()
        .filter(|s| s.is_finite() && s.length() > EPSILON)
        .collect();
    if usable.len() < 2 {
        return None;
    }

    let mut seeds = (0, 1);
    let mut most_opposed = f32::INFINITY;
    for i in 0..usable.len() {
        for j in (i + 1)..usable.len() {
            let d = usable[i].dot(usable[j]);
            if d < most_opposed {
                most_opposed = d;
                seeds = (i, j);
            }
        }
    }

    let (seed_a, seed_b) = (usable[seeds.0], usable[seeds.1]);
    let mut a = vec![seed_a];
    let mut b = vec![seed_b];
    for (k, &sample) in usable.iter().enumerate() {
        if k == seeds.0 || k == seeds.1 {
            continue;
        }
        if sample.dot(seed_a) >= sample.dot(seed_b) {
            a.push(sample);
        } else {
            b.push(sample);
        }
    }

    Some((ForceCluster::from_members(a), ForceCluster::from_members(b)))
}
