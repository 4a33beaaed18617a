//! Torn-edge detail mask.
//!
//! Every `EdgeCommitted` event becomes a [`TearStroke`]: a polyline from
//! the edge's start UV to its end UV with its interior points pushed
//! sideways to look ripped. [`TearMask`] collects strokes and rasterizes
//! them into a square 8-bit coverage image in UV space that a renderer
//! can use to fray the paper texture along the tear.
//!
//! Jitter comes from an RNG seeded with the stroke index, so the same
//! event sequence always produces the same mask.

use lacero_math::{perpendicular, safe_normalize2, Vec2};
use lacero_telemetry::{EventKind, SimulationEvent};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Polyline pieces per stroke.
const STROKE_SEGMENTS: usize = 6;

/// One jagged polyline in UV space.
#[derive(Debug, Clone, PartialEq)]
pub struct TearStroke {
    pub points: Vec<Vec2>,
    /// Full width in UV units.
    pub width: f32,
}

impl TearStroke {
    /// Builds a stroke from `start` to `end`. Interior points are displaced
    /// perpendicular to the edge by at most `jaggedness × edge length`; the
    /// endpoints are exact so consecutive strokes join up. Equal seeds give
    /// equal strokes.
    pub fn jagged(start: Vec2, end: Vec2, width: f32, jaggedness: f32, seed: u64) -> Self {
        let along = end - start;
        let side = perpendicular(safe_normalize2(along));
        let amplitude = jaggedness.max(0.0) * along.length();
        let mut rng = StdRng::seed_from_u64(seed);

        let points = (0..=STROKE_SEGMENTS)
            .map(|k| {
                let t = k as f32 / STROKE_SEGMENTS as f32;
                let base = start + along * t;
                if k == 0 || k == STROKE_SEGMENTS {
                    base
                } else {
                    base + side * (amplitude * rng.gen_range(-1.0_f32..=1.0))
                }
            })
            .collect();

        Self {
            points,
            width: width.max(0.0),
        }
    }

    /// Squared distance from `p` to the nearest point of the polyline.
    pub fn distance_sq(&self, p: Vec2) -> f32 {
        match self.points.as_slice() {
            [] => f32::INFINITY,
            [only] => only.distance_squared(p),
            points => points
                .windows(2)
                .map(|w| segment_distance_sq(p, w[0], w[1]))
                .fold(f32::INFINITY, f32::min),
        }
    }
}

/// Accumulated tear strokes for one page.
#[derive(Debug, Clone)]
pub struct TearMask {
    /// Side length of the rasterized image in pixels.
    resolution: usize,
    jaggedness: f32,
    strokes: Vec<TearStroke>,
}

impl TearMask {
    pub fn new(resolution: usize, jaggedness: f32) -> Self {
        Self {
            resolution: resolution.max(1),
            jaggedness,
            strokes: Vec::new(),
        }
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn strokes(&self) -> &[TearStroke] {
        &self.strokes
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    /// Adds a stroke for an `EdgeCommitted` event. Returns false for any
    /// other event.
    pub fn record(&mut self, event: &SimulationEvent) -> bool {
        let EventKind::EdgeCommitted {
            start_uv,
            end_uv,
            width,
        } = event.kind
        else {
            return false;
        };
        let seed = self.strokes.len() as u64;
        self.strokes.push(TearStroke::jagged(
            start_uv,
            end_uv,
            width,
            self.jaggedness,
            seed,
        ));
        true
    }

    /// Records every event; returns how many became strokes.
    pub fn record_all(&mut self, events: &[SimulationEvent]) -> usize {
        events.iter().filter(|e| self.record(e)).count()
    }

    /// Coverage in `[0, 1]` at `uv`: 1 inside a stroke, fading to 0 over
    /// one pixel outside it.
    pub fn coverage(&self, uv: Vec2) -> f32 {
        let feather = 1.0 / self.resolution as f32;
        self.strokes
            .iter()
            .map(|s| {
                let d = s.distance_sq(uv).sqrt();
                ((s.width * 0.5 + feather - d) / feather).clamp(0.0, 1.0)
            })
            .fold(0.0, f32::max)
    }

    /// Row-major 8-bit coverage image, `resolution²` bytes. Row 0 is the
    /// top of the page (`v = 1`); pixels are sampled at their centres.
    pub fn rasterize(&self) -> Vec<u8> {
        let n = self.resolution;
        let mut pixels = Vec::with_capacity(n * n);
        for row in 0..n {
            let v = 1.0 - (row as f32 + 0.5) / n as f32;
            for col in 0..n {
                let u = (col as f32 + 0.5) / n as f32;
                pixels.push((self.coverage(Vec2::new(u, v)) * 255.0).round() as u8);
            }
        }
        pixels
    }

    /// The rasterized mask as a binary PGM (`P5`) image.
    pub fn to_pgm(&self) -> Vec<u8> {
        let n = self.resolution;
        let mut out = format!("P5\n{n} {n}\n255\n").into_bytes();
        out.extend(self.rasterize());
        out
    }
}

fn segment_distance_sq(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < 1e-12 {
        return p.distance_squared(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance_squared(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jitter_stays_within_amplitude() {
        let (start, end) = (Vec2::new(0.2, 0.5), Vec2::new(0.6, 0.5));
        for seed in 0..50 {
            let stroke = TearStroke::jagged(start, end, 0.01, 0.25, seed);
            assert_eq!(stroke.points.len(), STROKE_SEGMENTS + 1);
            for p in &stroke.points {
                assert!((p.y - 0.5).abs() <= 0.25 * 0.4 + 1e-6, "offset {}", p.y - 0.5);
            }
        }
    }

    #[test]
    fn stroke_depends_only_on_seed() {
        let (start, end) = (Vec2::ZERO, Vec2::ONE);
        let a = TearStroke::jagged(start, end, 0.01, 0.2, 7);
        assert_eq!(a, TearStroke::jagged(start, end, 0.01, 0.2, 7));
        assert_ne!(a, TearStroke::jagged(start, end, 0.01, 0.2, 8));
    }

    #[test]
    fn segment_distance_clamps_to_ends() {
        let a = Vec2::ZERO;
        let b = Vec2::X;
        assert!((segment_distance_sq(Vec2::new(0.5, 0.2), a, b) - 0.04).abs() < 1e-6);
        assert!((segment_distance_sq(Vec2::new(2.0, 0.0), a, b) - 1.0).abs() < 1e-6);
        assert!((segment_distance_sq(Vec2::new(3.0, 4.0), a, a) - 25.0).abs() < 1e-5);
    }
}
