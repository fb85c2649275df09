//! Capacity-bounded spark storage.
//!
//! Sparks live in one contiguous `Vec` in spawn order, so the front of the
//! vector is always the oldest spark and eviction is a single front drain.

use crate::api::config::SparkConfig;

use super::spark::{Spark, SparkKind};

/// Ordered, capacity-bounded collection of live sparks.
pub struct SparkPool {
    sparks: Vec<Spark>,
    physics: SparkConfig,
    dropped: u64,
    evicted: u64,
}

impl SparkPool {
    pub fn new(physics: SparkConfig) -> Self {
        let capacity = physics.max_live;
        Self {
            sparks: Vec::with_capacity(capacity),
            physics,
            dropped: 0,
            evicted: 0,
        }
    }

    /// Append a spark if there is room. A full pool drops it silently.
    pub fn spawn(&mut self, spark: Spark) -> bool {
        if self.sparks.len() >= self.capacity() {
            self.dropped += 1;
            return false;
        }
        self.sparks.push(spark);
        true
    }

    /// Append a whole burst, then evict the oldest sparks until back at capacity.
    /// Fresh burst sparks take priority over whatever has been alive longest.
    pub fn spawn_burst<I>(&mut self, sparks: I) -> usize
    where
        I: IntoIterator<Item = Spark>,
    {
        let before = self.sparks.len();
        self.sparks.extend(sparks);
        let added = self.sparks.len() - before;
        self.evict_overflow();
        added
    }

    /// Advance every spark and retire the expired ones.
    pub fn step(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let physics = &self.physics;
        self.sparks.retain_mut(|s| s.tick(dt, physics));
        self.evict_overflow();
    }

    /// Remove every spark of the given kind, regardless of remaining life.
    pub fn purge_by_tag(&mut self, kind: SparkKind) -> usize {
        let before = self.sparks.len();
        self.sparks.retain(|s| s.kind != kind);
        before - self.sparks.len()
    }

    /// Drop the oldest sparks until the pool is at capacity. Returns how many were evicted.
    pub fn evict_overflow(&mut self) -> usize {
        let excess = self.sparks.len().saturating_sub(self.capacity());
        if excess > 0 {
            self.sparks.drain(..excess);
            self.evicted += excess as u64;
        }
        excess
    }

    pub fn len(&self) -> usize {
        self.sparks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sparks.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.physics.max_live
    }

    pub fn count_kind(&self, kind: SparkKind) -> usize {
        self.sparks.iter().filter(|s| s.kind == kind).count()
    }

    /// Iterate oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Spark> {
        self.sparks.iter()
    }

    pub fn as_slice(&self) -> &[Spark] {
        &self.sparks
    }

    pub fn physics(&self) -> &SparkConfig {
        &self.physics
    }

    /// Sparks rejected by `spawn` because the pool was full.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Sparks removed from the front to make room for bursts.
    pub fn evicted(&self) -> u64 {
        self.evicted
    }
}

impl Default for SparkPool {
    fn default() -> Self {
        Self::new(SparkConfig::default())
    }
}
