//! The traveler: an avatar that turns into a glowing orb, flies to a target
//! along a wobbling path, explodes into sparks, and fades back in.

pub mod steering;
pub mod arrival;
pub mod visibility;
pub mod fsm;

pub use steering::{side_vectors, SteeringModel, WobblePhase};
pub use arrival::{ArrivalDetector, ArrivalSignal};
pub use visibility::{GlowScalars, Visibility};
pub use fsm::{Traveler, TravelerState};
