use serde::{Deserialize, Serialize};

use crate::extensions::easing::Easing;
use crate::sparks::burst::{BurstCounts, BurstProfile};

/// Complete tuning for the traveler, its sparks, and the frame clock.
///
/// Every field has a default, so a JSON override only needs the values it changes:
///
/// ```text
/// { "motion": { "travel_speed": 30.0 }, "seed": 7 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelerConfig {
    pub motion: MotionConfig,
    pub wobble: WobbleConfig,
    pub arrival: ArrivalConfig,
    pub sparks: SparkConfig,
    pub bursts: BurstConfig,
    pub timing: TimingConfig,
    /// Seed for every random draw (wobble phases, spark scatter).
    pub seed: u64,
}

impl Default for TravelerConfig {
    fn default() -> Self {
        Self {
            motion: MotionConfig::default(),
            wobble: WobbleConfig::default(),
            arrival: ArrivalConfig::default(),
            sparks: SparkConfig::default(),
            bursts: BurstConfig::default(),
            timing: TimingConfig::default(),
            seed: 42,
        }
    }
}

impl TravelerConfig {
    /// Parse a configuration from a JSON string. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Orb travel, home fall, and the fade/glow ramps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Orb speed in world units per second.
    pub travel_speed: f32,
    /// Remaining distance at which the orb is snapped onto the target.
    pub snap_distance: f32,
    /// Fraction of the yaw gap left after one second.
    pub yaw_smoothing_base: f32,
    /// Vertical descent speed while falling home.
    pub fall_speed: f32,
    /// Fraction of the horizontal gap to home left after one second of falling.
    pub fall_xz_base: f32,
    /// Height above home ground the orb is lifted to before falling.
    pub home_fall_altitude: f32,
    /// Height above home ground at which the fall ends.
    pub fall_stop_offset: f32,
    /// Seconds for the avatar to fade back in after the burst.
    pub fade_duration: f32,
    /// Curve of the fade-in ramp.
    pub fade_easing: Easing,
    /// Value the explosion boost jumps to on arrival.
    pub explosion_boost_peak: f32,
    /// Explosion boost decay per second.
    pub explosion_boost_decay: f32,
    /// Lower clamp for the distance captured at launch.
    pub min_start_distance: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            travel_speed: 22.0,
            snap_distance: 0.02,
            yaw_smoothing_base: 1e-3,
            fall_speed: 16.0,
            fall_xz_base: 0.001,
            home_fall_altitude: 14.0,
            fall_stop_offset: 0.0,
            fade_duration: 0.6,
            fade_easing: Easing::CubicOut,
            explosion_boost_peak: 1.6,
            explosion_boost_decay: 0.6,
            min_start_distance: 1e-3,
        }
    }
}

/// Lateral oscillation added to the direct path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WobbleConfig {
    /// Base amplitude, relative to a unit travel direction.
    pub amplitude: f32,
    /// Scale applied on top of `amplitude`.
    pub amplitude_scale: f32,
    /// Exponent of the `(1 - progress)` falloff.
    pub falloff_exponent: f32,
    /// Angular frequency (rad/s) of the first side oscillation.
    pub frequency_a: f32,
    /// Angular frequency (rad/s) of the second side oscillation.
    pub frequency_b: f32,
    /// Weight of the second side oscillation.
    pub side_ratio: f32,
    /// Multiple of the stop distance over which wobble fades out near the target.
    pub settle_span: f32,
}

impl Default for WobbleConfig {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            amplitude_scale: 0.6,
            falloff_exponent: 1.2,
            frequency_a: 5.2,
            frequency_b: 3.7,
            side_ratio: 0.85,
            settle_span: 2.5,
        }
    }
}

/// Thresholds of the three arrival signals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrivalConfig {
    /// Distance at or under which the orb has arrived.
    pub stop_distance: f32,
    /// Radius inside which the dwell timer charges.
    pub near_distance: f32,
    /// Dwell time that counts as arrival.
    pub dwell: f32,
    /// Discharge rate of the dwell timer outside the near radius, relative to `dt`.
    pub leak_rate: f32,
}

impl Default for ArrivalConfig {
    fn default() -> Self {
        Self {
            stop_distance: 0.9,
            near_distance: 1.4,
            dwell: 0.06,
            leak_rate: 0.5,
        }
    }
}

/// Spark pool capacity, physics, and trail emission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SparkConfig {
    /// Hard cap on live sparks.
    pub max_live: usize,
    /// Slots in the render feed.
    pub render_slots: usize,
    /// Downward acceleration.
    pub gravity: f32,
    /// Fraction of vertical speed kept on a ground bounce.
    pub restitution: f32,
    /// Fraction of horizontal speed kept per ground contact.
    pub ground_friction: f32,
    /// Exponential air drag rate per second.
    pub air_drag: f32,
    /// Upward speed under which a bounce settles onto the ground.
    pub settle_speed: f32,
    /// Life lost per second while grounded.
    pub decay_grounded: f32,
    /// Life lost per second while airborne.
    pub decay_airborne: f32,
    /// Extra life lost per second once resting longer than `rest_after`.
    pub decay_resting: f32,
    /// Ground time after which the resting decay kicks in.
    pub rest_after: f32,
    /// Trail sparks emitted per travel frame.
    pub trail_per_frame: usize,
    /// Radius of the emission disk behind the orb.
    pub trail_radius: f32,
    /// Distance of the emission disk behind the orb.
    pub trail_offset: f32,
    /// Backward speed as a fraction of the orb speed.
    pub trail_speed_factor: (f32, f32),
    /// Random velocity jitter per axis.
    pub trail_jitter: f32,
    /// Initial life of a trail spark.
    pub trail_life: (f32, f32),
}

impl Default for SparkConfig {
    fn default() -> Self {
        Self {
            max_live: 1800,
            render_slots: 3000,
            gravity: 9.8,
            restitution: 0.38,
            ground_friction: 0.94,
            air_drag: 0.6,
            settle_speed: 0.4,
            decay_grounded: 0.03,
            decay_airborne: 0.04,
            decay_resting: 0.18,
            rest_after: 1.2,
            trail_per_frame: 8,
            trail_radius: 0.5,
            trail_offset: 0.28,
            trail_speed_factor: (0.12, 0.3),
            trail_jitter: 0.6,
            trail_life: (0.05, 0.09),
        }
    }
}

/// Burst profiles, staged draining, and spawn geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstConfig {
    /// Maximum sparks spawned per category per frame while draining.
    pub batch_size: u32,
    /// Burst staged when the orb reaches its destination.
    pub arrival: BurstProfile,
    /// Splash under the feet when leaving for a target.
    pub launch: BurstProfile,
    /// Splash under the feet when leaving for home.
    pub home_launch: BurstProfile,
    /// Height above the landing point the sphere and ring erupt from.
    pub origin_lift: f32,
    pub sphere_speed: (f32, f32),
    pub ring_speed: (f32, f32),
    /// Vertical velocity jitter of ring sparks.
    pub ring_jitter: f32,
    pub splash_speed: (f32, f32),
    /// Radial spawn offset of splash sparks.
    pub splash_radius: (f32, f32),
    /// Height above ground splash sparks spawn at.
    pub splash_height: f32,
    /// Upward kick of splash sparks.
    pub splash_lift: (f32, f32),
    /// Extra horizontal velocity jitter of splash sparks.
    pub puddle_jitter: f32,
    /// Initial life of every burst spark.
    pub life: (f32, f32),
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            batch_size: 60,
            arrival: BurstProfile {
                total: BurstCounts::new(200, 100, 120),
                immediate: BurstCounts::new(140, 70, 90),
            },
            launch: BurstProfile {
                total: BurstCounts::new(0, 0, 140),
                immediate: BurstCounts::new(0, 0, 80),
            },
            home_launch: BurstProfile {
                total: BurstCounts::new(0, 0, 80),
                immediate: BurstCounts::new(0, 0, 50),
            },
            origin_lift: 0.5,
            sphere_speed: (6.0, 14.0),
            ring_speed: (7.0, 11.0),
            ring_jitter: 0.8,
            splash_speed: (2.0, 6.0),
            splash_radius: (0.15, 0.6),
            splash_height: 0.05,
            splash_lift: (1.0, 3.0),
            puddle_jitter: 1.2,
            life: (0.55, 0.95),
        }
    }
}

/// Frame delta clamping and per-frame output capacities.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Lower clamp of the interpolation delta.
    pub min_dt: f32,
    /// Upper clamp of the interpolation delta.
    pub max_dt: f32,
    /// Maximum sound cues forwarded per frame.
    pub max_sounds: usize,
    /// Maximum notifications forwarded per frame.
    pub max_events: usize,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            min_dt: 1.0 / 120.0,
            max_dt: 1.0 / 30.0,
            max_sounds: 32,
            max_events: 32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_documented_constants() {
        let c = TravelerConfig::default();
        assert_eq!(c.motion.travel_speed, 22.0);
        assert_eq!(c.arrival.stop_distance, 0.9);
        assert_eq!(c.arrival.near_distance, 1.4);
        assert_eq!(c.sparks.max_live, 1800);
        assert_eq!(c.sparks.render_slots, 3000);
        assert_eq!(c.sparks.restitution, 0.38);
        assert_eq!(c.bursts.batch_size, 60);
        assert_eq!(c.bursts.arrival.total.sphere, 200);
        assert_eq!(c.bursts.arrival.immediate.splash, 90);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{
            "motion": { "travel_speed": 30.0 },
            "bursts": { "batch_size": 25 },
            "seed": 7
        }"#;
        let c = TravelerConfig::from_json(json).unwrap();
        assert_eq!(c.motion.travel_speed, 30.0);
        assert_eq!(c.motion.fall_speed, 16.0);
        assert_eq!(c.bursts.batch_size, 25);
        assert_eq!(c.bursts.arrival.total.ring, 100);
        assert_eq!(c.seed, 7);
    }

    #[test]
    fn easing_parses_from_snake_case() {
        let c = TravelerConfig::from_json(r#"{ "motion": { "fade_easing": "sine_in_out" } }"#).unwrap();
        assert_eq!(c.motion.fade_easing, Easing::SineInOut);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(TravelerConfig::from_json("{ motion: }").is_err());
    }
}
