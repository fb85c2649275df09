//! Staged explosion bursts.
//!
//! A burst request spawns part of each category immediately and queues the
//! rest. `drain` then releases at most `batch_size` sparks per category per
//! frame, which caps the spawn cost of a 400+ spark arrival.

use std::f32::consts::TAU;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::api::config::BurstConfig;

use super::pool::SparkPool;
use super::rng::Rng;
use super::spark::Spark;

/// Spawn geometry of a burst category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstShape {
    /// Uniform directions over the unit sphere.
    Sphere,
    /// Uniform directions in the ground plane.
    Ring,
    /// Low, wide spray hugging the ground.
    Splash,
}

impl BurstShape {
    pub const ALL: [BurstShape; 3] = [BurstShape::Sphere, BurstShape::Ring, BurstShape::Splash];
}

/// Per-category spark counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstCounts {
    pub sphere: u32,
    pub ring: u32,
    pub splash: u32,
}

impl BurstCounts {
    pub const fn new(sphere: u32, ring: u32, splash: u32) -> Self {
        Self { sphere, ring, splash }
    }

    pub fn get(&self, shape: BurstShape) -> u32 {
        match shape {
            BurstShape::Sphere => self.sphere,
            BurstShape::Ring => self.ring,
            BurstShape::Splash => self.splash,
        }
    }

    fn slot(&mut self, shape: BurstShape) -> &mut u32 {
        match shape {
            BurstShape::Sphere => &mut self.sphere,
            BurstShape::Ring => &mut self.ring,
            BurstShape::Splash => &mut self.splash,
        }
    }

    pub fn total(&self) -> u32 {
        self.sphere.saturating_add(self.ring).saturating_add(self.splash)
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// A burst request: the full count and how much of it spawns on the first frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstProfile {
    pub total: BurstCounts,
    pub immediate: BurstCounts,
}

/// Remaining sparks of a staged burst and the point they erupt from.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExplosionQueue {
    pub pending: BurstCounts,
    pub origin: Vec3,
    /// Ground height splash sparks are placed on.
    pub ground: f32,
}

/// Converts burst requests into an immediate spawn plus a queued remainder.
pub struct ExplosionScheduler {
    config: BurstConfig,
    queue: ExplosionQueue,
    spawned: BurstCounts,
}

impl ExplosionScheduler {
    pub fn new(config: BurstConfig) -> Self {
        Self {
            config,
            queue: ExplosionQueue::default(),
            spawned: BurstCounts::default(),
        }
    }

    /// Spawn the immediate share of `profile` at `origin` and queue the remainder.
    ///
    /// A request that lands while an earlier burst is still draining adds its
    /// remainder to the queue and moves the origin.
    pub fn request(
        &mut self,
        profile: &BurstProfile,
        origin: Vec3,
        ground: f32,
        pool: &mut SparkPool,
        rng: &mut Rng,
    ) {
        self.queue.origin = origin;
        self.queue.ground = ground;

        let mut batch = Vec::with_capacity(profile.immediate.total() as usize);
        for shape in BurstShape::ALL {
            let total = profile.total.get(shape);
            let now = profile.immediate.get(shape).min(total);
            for _ in 0..now {
                batch.push(self.make_spark(shape, rng));
            }
            *self.spawned.slot(shape) += now;
            let pending = self.queue.pending.slot(shape);
            *pending = pending.saturating_add(total - now);
        }
        pool.spawn_burst(batch);

        log::trace!(
            "burst staged at {:?}: immediate {:?}, queued {:?}",
            origin,
            profile.immediate,
            self.queue.pending
        );
    }

    /// Release up to `batch_size` sparks per category. Returns the number spawned.
    pub fn drain(&mut self, pool: &mut SparkPool, rng: &mut Rng) -> u32 {
        if self.queue.pending.is_empty() {
            return 0;
        }
        let batch_size = self.config.batch_size.max(1);
        let mut batch = Vec::new();
        for shape in BurstShape::ALL {
            let now = self.queue.pending.get(shape).min(batch_size);
            for _ in 0..now {
                batch.push(self.make_spark(shape, rng));
            }
            *self.queue.pending.slot(shape) -= now;
            *self.spawned.slot(shape) += now;
        }
        let count = batch.len() as u32;
        pool.spawn_burst(batch);
        count
    }

    pub fn is_idle(&self) -> bool {
        self.queue.pending.is_empty()
    }

    pub fn queue(&self) -> &ExplosionQueue {
        &self.queue
    }

    /// Sparks produced per category since construction (immediate + drained).
    pub fn spawned(&self) -> BurstCounts {
        self.spawned
    }

    pub fn config(&self) -> &BurstConfig {
        &self.config
    }

    fn make_spark(&self, shape: BurstShape, rng: &mut Rng) -> Spark {
        let c = &self.config;
        let origin = self.queue.origin;
        let ground = self.queue.ground;
        let life = rng.range(c.life.0, c.life.1);
        match shape {
            BurstShape::Sphere => {
                let speed = rng.range(c.sphere_speed.0, c.sphere_speed.1);
                Spark::burst(origin, sphere_direction(rng) * speed, life, ground)
            }
            BurstShape::Ring => {
                let speed = rng.range(c.ring_speed.0, c.ring_speed.1);
                let angle = rng.angle();
                let velocity = Vec3::new(
                    angle.cos() * speed,
                    rng.signed(c.ring_jitter),
                    angle.sin() * speed,
                );
                Spark::burst(origin, velocity, life, ground)
            }
            BurstShape::Splash => {
                let angle = rng.angle();
                let radial = Vec3::new(angle.cos(), 0.0, angle.sin());
                let radius = rng.range(c.splash_radius.0, c.splash_radius.1);
                let mut position = origin + radial * radius;
                position.y = ground + c.splash_height;

                let speed = rng.range(c.splash_speed.0, c.splash_speed.1);
                let puddle = Vec3::new(rng.signed(c.puddle_jitter), 0.0, rng.signed(c.puddle_jitter));
                let mut velocity = radial * speed + puddle;
                velocity.y = rng.range(c.splash_lift.0, c.splash_lift.1);
                Spark::burst(position, velocity, life, ground)
            }
        }
    }
}

/// Uniform direction on the unit sphere by inverse-transform sampling.
pub fn sphere_direction(rng: &mut Rng) -> Vec3 {
    let u = 2.0 * rng.next_f32() - 1.0;
    let phi = TAU * rng.next_f32();
    let r = (1.0 - u * u).max(0.0).sqrt();
    Vec3::new(r * phi.cos(), u, r * phi.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::SparkConfig;

    fn roomy_pool() -> SparkPool {
        SparkPool::new(SparkConfig {
            max_live: 10_000,
            ..SparkConfig::default()
        })
    }

    fn arrival() -> BurstProfile {
        BurstConfig::default().arrival
    }

    #[test]
    fn request_spawns_immediate_share_and_queues_rest() {
        let mut pool = roomy_pool();
        let mut rng = Rng::new(1);
        let mut sched = ExplosionScheduler::new(BurstConfig::default());

        sched.request(&arrival(), Vec3::new(0.0, 0.5, -16.0), 0.0, &mut pool, &mut rng);

        assert_eq!(pool.len(), 140 + 70 + 90);
        assert_eq!(sched.queue().pending, BurstCounts::new(60, 30, 30));
    }

    #[test]
    fn staged_sphere_drains_to_exact_total() {
        let mut pool = roomy_pool();
        let mut rng = Rng::new(2);
        let mut sched = ExplosionScheduler::new(BurstConfig::default());
        let profile = BurstProfile {
            total: BurstCounts::new(200, 100, 120),
            immediate: BurstCounts::default(),
        };

        sched.request(&profile, Vec3::ZERO, 0.0, &mut pool, &mut rng);
        // ceil(200 / 60) = 4 frames for the largest category.
        for _ in 0..4 {
            sched.drain(&mut pool, &mut rng);
        }
        assert_eq!(sched.queue().pending.sphere, 0);
        assert_eq!(sched.spawned().sphere, 200);

        // Slack frames must not spawn more.
        for _ in 0..5 {
            assert_eq!(sched.drain(&mut pool, &mut rng), 0);
        }
        assert_eq!(sched.spawned(), BurstCounts::new(200, 100, 120));
        assert_eq!(pool.len(), 420);
        assert!(sched.is_idle());
    }

    #[test]
    fn drain_respects_batch_size() {
        let mut pool = roomy_pool();
        let mut rng = Rng::new(3);
        let mut sched = ExplosionScheduler::new(BurstConfig::default());
        let profile = BurstProfile {
            total: BurstCounts::new(200, 100, 120),
            immediate: BurstCounts::default(),
        };
        sched.request(&profile, Vec3::ZERO, 0.0, &mut pool, &mut rng);

        let spawned = sched.drain(&mut pool, &mut rng);
        assert_eq!(spawned, 180);
        assert_eq!(sched.queue().pending, BurstCounts::new(140, 40, 60));
    }

    #[test]
    fn counters_only_decrease_while_draining() {
        let mut pool = roomy_pool();
        let mut rng = Rng::new(4);
        let mut sched = ExplosionScheduler::new(BurstConfig {
            batch_size: 7,
            ..BurstConfig::default()
        });
        sched.request(&arrival(), Vec3::ZERO, 0.0, &mut pool, &mut rng);

        let mut last = sched.queue().pending;
        for _ in 0..50 {
            sched.drain(&mut pool, &mut rng);
            let now = sched.queue().pending;
            for shape in BurstShape::ALL {
                assert!(now.get(shape) <= last.get(shape));
            }
            last = now;
        }
        assert!(sched.is_idle());
    }

    #[test]
    fn immediate_larger_than_total_is_clamped() {
        let mut pool = roomy_pool();
        let mut rng = Rng::new(5);
        let mut sched = ExplosionScheduler::new(BurstConfig::default());
        let profile = BurstProfile {
            total: BurstCounts::new(10, 0, 0),
            immediate: BurstCounts::new(50, 0, 0),
        };
        sched.request(&profile, Vec3::ZERO, 0.0, &mut pool, &mut rng);
        assert_eq!(pool.len(), 10);
        assert!(sched.is_idle());
    }

    #[test]
    fn sphere_directions_are_unit_and_cover_both_hemispheres() {
        let mut rng = Rng::new(6);
        let mut up = 0;
        for _ in 0..2000 {
            let d = sphere_direction(&mut rng);
            assert!((d.length() - 1.0).abs() < 1e-3);
            if d.y > 0.0 {
                up += 1;
            }
        }
        assert!((800..1200).contains(&up), "skewed hemisphere split: {}", up);
    }

    #[test]
    fn splash_sparks_start_near_ground() {
        let mut pool = roomy_pool();
        let mut rng = Rng::new(7);
        let mut sched = ExplosionScheduler::new(BurstConfig::default());
        let profile = BurstProfile {
            total: BurstCounts::new(0, 0, 40),
            immediate: BurstCounts::new(0, 0, 40),
        };
        sched.request(&profile, Vec3::new(3.0, 2.0, 3.0), 1.0, &mut pool, &mut rng);
        for s in pool.iter() {
            assert!((s.position.y - 1.05).abs() < 1e-5);
            let flat = Vec3::new(s.position.x - 3.0, 0.0, s.position.z - 3.0).length();
            assert!(flat <= 0.6 + 1e-4);
        }
    }

    #[test]
    fn huge_counts_saturate() {
        let counts = BurstCounts::new(u32::MAX, u32::MAX, 1);
        assert_eq!(counts.total(), u32::MAX);
        assert!(!counts.is_empty());
    }
}
