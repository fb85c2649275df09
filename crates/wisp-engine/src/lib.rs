pub mod api;
pub mod core;
pub mod sparks;
pub mod traveler;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::config::{
    ArrivalConfig, BurstConfig, MotionConfig, SparkConfig, TimingConfig, TravelerConfig,
    WobbleConfig,
};
pub use api::types::{Destination, SoundCue, TargetId, TravelerEvent, WireEvent};
pub use core::time::{FrameClock, FrameDelta};
pub use traveler::{
    ArrivalDetector, ArrivalSignal, GlowScalars, SteeringModel, Traveler, TravelerState,
    Visibility, WobblePhase,
};
pub use sparks::{
    BurstCounts, BurstProfile, BurstShape, ExplosionQueue, ExplosionScheduler, Rng, Spark,
    SparkKind, SparkPool,
};
pub use renderer::{RenderFeed, SparkVertex};
pub use input::queue::{Command, CommandQueue};
pub use assets::manifest::{TargetDescriptor, TargetManifest};
pub use assets::registry::{TargetPoint, TargetRegistry, HOME_TARGET};
pub use bridge::protocol::ProtocolLayout;

// Extensions: decoupled math helpers
pub use extensions::{Easing, damp_factor, lerp, lerp_angle, lerp_vec3, smoothstep};
