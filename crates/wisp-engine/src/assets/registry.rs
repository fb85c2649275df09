use std::collections::HashMap;

use glam::Vec3;

use crate::api::types::{Destination, TargetId};
use crate::assets::manifest::{TargetDescriptor, TargetManifest};

/// Id that always resolves to the home point, whatever the manifest says.
pub const HOME_TARGET: &str = "home";

/// A resolved destination: where the orb flies and the ground it lands on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetPoint {
    pub position: Vec3,
    pub ground: f32,
}

impl TargetPoint {
    pub fn new(position: Vec3, ground: f32) -> Self {
        Self { position, ground }
    }

    /// A point resting on its own ground.
    pub fn on_ground(position: Vec3) -> Self {
        Self::new(position, position.y)
    }

    fn from_descriptor(desc: &TargetDescriptor) -> Self {
        let position = Vec3::from_array(desc.position);
        Self::new(position, desc.ground.unwrap_or(position.y))
    }
}

/// Registry of named targets, built from a TargetManifest.
/// Ids are assigned in name order, so the same manifest always yields the same ids.
#[derive(Debug, Clone)]
pub struct TargetRegistry {
    ids: HashMap<String, TargetId>,
    names: Vec<String>,
    points: Vec<TargetPoint>,
    home: TargetPoint,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self {
            ids: HashMap::new(),
            names: Vec::new(),
            points: Vec::new(),
            home: TargetPoint::on_ground(Vec3::ZERO),
        }
    }

    /// Build a registry from a parsed TargetManifest.
    pub fn from_manifest(manifest: &TargetManifest) -> Self {
        let mut registry = Self::new();
        let mut names: Vec<&String> = manifest
            .targets
            .keys()
            .filter(|name| name.as_str() != HOME_TARGET)
            .collect();
        names.sort();
        for name in names {
            registry.insert(name, TargetPoint::from_descriptor(&manifest.targets[name]));
        }
        if let Some(home) = &manifest.home {
            registry.home = TargetPoint::from_descriptor(home);
        }
        registry
    }

    /// Add or move a named target. The home id is reserved and ignored.
    pub fn insert(&mut self, name: &str, point: TargetPoint) -> Option<TargetId> {
        if name == HOME_TARGET {
            return None;
        }
        if let Some(&id) = self.ids.get(name) {
            self.points[id.0 as usize] = point;
            return Some(id);
        }
        let id = TargetId(self.points.len() as u32);
        self.ids.insert(name.to_string(), id);
        self.names.push(name.to_string());
        self.points.push(point);
        Some(id)
    }

    pub fn home(&self) -> TargetPoint {
        self.home
    }

    /// Resolve a navigation id. Returns None for unknown ids.
    pub fn resolve(&self, name: &str) -> Option<(Destination, TargetPoint)> {
        if name == HOME_TARGET {
            return Some((Destination::Home, self.home));
        }
        let id = *self.ids.get(name)?;
        Some((Destination::Target(id), self.points[id.0 as usize]))
    }

    pub fn name(&self, id: TargetId) -> Option<&str> {
        self.names.get(id.0 as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Default for TargetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_from_manifest() {
        let json = r#"{
            "targets": {
                "work": { "position": [4.0, 2.0, -9.0], "ground": 0.0 },
                "about": { "position": [0.0, 0.0, -16.0] }
            }
        }"#;
        let manifest = TargetManifest::from_json(json).unwrap();
        let reg = TargetRegistry::from_manifest(&manifest);

        let (dest, point) = reg.resolve("work").expect("work should exist");
        assert_eq!(dest, Destination::Target(TargetId(1)));
        assert_eq!(point.position, Vec3::new(4.0, 2.0, -9.0));
        assert_eq!(point.ground, 0.0);

        let (_, about) = reg.resolve("about").unwrap();
        assert_eq!(about.ground, 0.0);
        assert_eq!(reg.name(TargetId(0)), Some("about"));
    }

    #[test]
    fn home_sentinel_always_resolves() {
        let reg = TargetRegistry::new();
        let (dest, point) = reg.resolve(HOME_TARGET).unwrap();
        assert_eq!(dest, Destination::Home);
        assert_eq!(point.position, Vec3::ZERO);
    }

    #[test]
    fn manifest_cannot_shadow_home() {
        let json = r#"{
            "targets": { "home": { "position": [9.0, 9.0, 9.0] } },
            "home": { "position": [1.0, 0.0, 1.0] }
        }"#;
        let reg = TargetRegistry::from_manifest(&TargetManifest::from_json(json).unwrap());
        assert!(reg.is_empty());
        let (_, point) = reg.resolve("home").unwrap();
        assert_eq!(point.position, Vec3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn unknown_returns_none() {
        let reg = TargetRegistry::new();
        assert!(reg.resolve("nonexistent").is_none());
    }

    #[test]
    fn insert_existing_name_moves_it() {
        let mut reg = TargetRegistry::new();
        let a = reg.insert("a", TargetPoint::on_ground(Vec3::X)).unwrap();
        let b = reg.insert("a", TargetPoint::on_ground(Vec3::Z)).unwrap();
        assert_eq!(a, b);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.resolve("a").unwrap().1.position, Vec3::Z);
    }
}
