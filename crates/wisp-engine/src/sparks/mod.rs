//! Spark simulation: the bounded pool, staged bursts, and the shared RNG.
//!
//! `SparkPool` owns the live sparks; `ExplosionScheduler` feeds it in
//! capped batches. Both take the traveler's `Rng` so a seed replays a run.

pub mod rng;
pub mod spark;
pub mod pool;
pub mod burst;

// Re-export public types
pub use rng::Rng;
pub use spark::{Spark, SparkKind};
pub use pool::SparkPool;
pub use burst::{BurstCounts, BurstProfile, BurstShape, ExplosionQueue, ExplosionScheduler};
