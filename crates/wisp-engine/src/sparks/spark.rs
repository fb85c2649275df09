//! A single simulated spark.

use glam::Vec3;

use crate::api::config::SparkConfig;

/// Which emitter produced a spark. Trail sparks are purged on arrival;
/// burst sparks decay on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SparkKind {
    Trail,
    Burst,
}

/// A single spark with physics and lifetime state.
#[derive(Debug, Clone)]
pub struct Spark {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Remaining life. The spark is retired once this reaches zero.
    pub life: f32,
    /// Life at spawn.
    pub life0: f32,
    /// Set on the first ground contact and never cleared.
    pub grounded: bool,
    /// Time spent on the ground since the first contact.
    pub ground_time: f32,
    /// Height of the ground plane under the spawn point. The spark only ever
    /// collides with this plane, so a later ground change elsewhere leaves it alone.
    pub ground: f32,
    pub kind: SparkKind,
    /// Color interpolation factor frozen at spawn (trail sparks only).
    pub color_mix: Option<f32>,
}

impl Spark {
    pub fn burst(position: Vec3, velocity: Vec3, life: f32, ground: f32) -> Self {
        Spark {
            position,
            velocity,
            life,
            life0: life,
            grounded: false,
            ground_time: 0.0,
            ground,
            kind: SparkKind::Burst,
            color_mix: None,
        }
    }

    pub fn trail(position: Vec3, velocity: Vec3, life: f32, color_mix: f32, ground: f32) -> Self {
        Spark {
            kind: SparkKind::Trail,
            color_mix: Some(color_mix.clamp(0.0, 1.0)),
            ..Spark::burst(position, velocity, life, ground)
        }
    }

    /// Advance spark physics. Returns false when expired.
    pub fn tick(&mut self, dt: f32, physics: &SparkConfig) -> bool {
        self.velocity.y -= physics.gravity * dt;
        self.velocity *= (-physics.air_drag * dt).exp();
        self.position += self.velocity * dt;

        if self.position.y <= self.ground {
            self.position.y = self.ground;
            if self.velocity.y < 0.0 {
                self.velocity.y = -self.velocity.y * physics.restitution;
                if self.velocity.y < physics.settle_speed {
                    self.velocity.y = 0.0;
                }
            }
            self.velocity.x *= physics.ground_friction;
            self.velocity.z *= physics.ground_friction;
            self.grounded = true;
        }

        let mut decay = if self.grounded {
            self.ground_time += dt;
            physics.decay_grounded
        } else {
            physics.decay_airborne
        };
        if self.ground_time > physics.rest_after {
            decay += physics.decay_resting;
        }
        self.life -= decay * dt;

        self.life > 0.0
    }
}
