//! Desired travel direction with decaying lateral wobble.

use glam::Vec3;

use crate::api::config::WobbleConfig;
use crate::extensions::easing::smoothstep;

/// Per-journey oscillator phases, re-rolled at every launch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WobblePhase {
    pub a: f32,
    pub b: f32,
}

/// Steering toward a target along a wobbling path.
///
/// Stateless: the same inputs always give the same direction.
#[derive(Debug, Clone)]
pub struct SteeringModel {
    wobble: WobbleConfig,
    stop_distance: f32,
}

impl SteeringModel {
    pub fn new(wobble: WobbleConfig, stop_distance: f32) -> Self {
        Self { wobble, stop_distance }
    }

    /// Unit direction to travel this frame, or zero when already on the target.
    ///
    /// `progress` is the covered fraction of the journey in [0, 1]; `clock` is
    /// wall time in seconds and drives the oscillation.
    pub fn direction(&self, to_target: Vec3, progress: f32, phase: WobblePhase, clock: f32) -> Vec3 {
        let distance = to_target.length();
        let Some(forward) = to_target.try_normalize() else {
            return Vec3::ZERO;
        };

        let amplitude = self.amplitude(progress, distance);
        if amplitude <= 0.0 {
            return forward;
        }

        let w = &self.wobble;
        let (side1, side2) = side_vectors(forward);
        let sway = side1 * (clock * w.frequency_a + phase.a).sin()
            + side2 * (clock * w.frequency_b + phase.b).cos() * w.side_ratio;

        (forward + sway * amplitude).try_normalize().unwrap_or(forward)
    }

    /// Wobble amplitude: strongest at launch, zero at the end of the journey
    /// and inside the settle span around the target.
    pub fn amplitude(&self, progress: f32, distance: f32) -> f32 {
        let w = &self.wobble;
        let remaining = (1.0 - progress.clamp(0.0, 1.0)).powf(w.falloff_exponent);
        let settle = smoothstep(0.0, self.stop_distance * w.settle_span, distance);
        w.amplitude * w.amplitude_scale * remaining * settle
    }
}

/// Two unit vectors perpendicular to `forward` and to each other.
///
/// The reference up axis switches to world X for near-vertical travel so the
/// cross product never degenerates.
pub fn side_vectors(forward: Vec3) -> (Vec3, Vec3) {
    let up = if forward.y.abs() > 0.9 { Vec3::X } else { Vec3::Y };
    let side1 = forward.cross(up).normalize_or_zero();
    let side2 = forward.cross(side1).normalize_or_zero();
    (side1, side2)
}
