use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// Navigation targets for a scene, keyed by id.
/// Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetManifest {
    /// Named destinations the traveler can fly to.
    #[serde(default)]
    pub targets: HashMap<String, TargetDescriptor>,
    /// Landing point of the home sentinel. Defaults to the world origin.
    #[serde(default)]
    pub home: Option<TargetDescriptor>,
}

/// Describes a single destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetDescriptor {
    /// World-space point the orb flies to.
    pub position: [f32; 3],
    /// Height of the ground plane under the target (default: the target's own height).
    #[serde(default)]
    pub ground: Option<f32>,
}

impl TargetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
