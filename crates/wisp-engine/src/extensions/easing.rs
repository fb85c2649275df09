// extensions/easing.rs
//
// Pure easing and smoothing functions for the traveler's ramps.
// No dependencies on the traveler or the spark pool. Just math.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Easing curve applied to the avatar fade-in ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant velocity (no easing).
    Linear,
    /// Slow end.
    QuadOut,
    /// Stronger slow end.
    #[default]
    CubicOut,
    /// Slow start and end.
    SineInOut,
}

impl Easing {
    /// Apply the easing function to a normalized time value `t` in [0, 1].
    /// Every variant maps 0 to 0 and 1 to 1 without overshoot.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
        }
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linearly interpolate between two Vec3 values.
#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/// Hermite smoothstep of `x` between `edge0` and `edge1`, GLSL argument order.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let width = edge1 - edge0;
    if width.abs() <= f32::EPSILON {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / width).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Frame-rate independent smoothing factor `1 - base^dt`.
///
/// `base` is the fraction of the gap left after one second, so two half-second
/// steps close exactly as much as one full-second step.
#[inline]
pub fn damp_factor(base: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return 0.0;
    }
    (1.0 - base.clamp(0.0, 1.0).powf(dt)).clamp(0.0, 1.0)
}

/// Interpolate between two angles along the shortest arc.
#[inline]
pub fn lerp_angle(from: f32, to: f32, t: f32) -> f32 {
    let mut delta = (to - from) % TAU;
    if delta > PI {
        delta -= TAU;
    } else if delta < -PI {
        delta += TAU;
    }
    from + delta * t
}
