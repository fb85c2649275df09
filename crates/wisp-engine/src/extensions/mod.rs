// extensions/mod.rs
//
// Math helpers shared by the traveler and the render feed.
// Pure functions, no traveler state.

pub mod easing;

pub use easing::{Easing, lerp, lerp_vec3, lerp_angle, smoothstep, damp_factor};
