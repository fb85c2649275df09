use bytemuck::{Pod, Zeroable};

/// Index of a named target in the `TargetRegistry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(pub u32);

/// Where a journey is headed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Target(TargetId),
    /// The home sentinel: the orb falls from above instead of flying.
    Home,
}

/// A fire-and-forget audio trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SoundCue {
    Launch = 1,
    Splash = 2,
    Arrival = 3,
}

impl SoundCue {
    /// Wire id read by the TypeScript sound manager.
    pub fn id(self) -> u8 {
        self as u8
    }
}

/// Notifications emitted by the traveler, drained once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TravelerEvent {
    /// The orb appeared (`true`) or the avatar is fully back (`false`).
    OrbStateChanged(bool),
    /// The journey reached its destination and the burst went off.
    ReachedTarget(Destination),
    /// A home journey switched to its vertical fall.
    HomeFallStart,
    /// A home journey hit the ground.
    HomeSplash,
    Sound(SoundCue),
}

/// A traveler event in SharedArrayBuffer form.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct WireEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl WireEvent {
    pub const FLOATS: usize = 4;

    pub const ORB_STATE: f32 = 1.0;
    pub const REACHED_TARGET: f32 = 2.0;
    pub const HOME_FALL_START: f32 = 3.0;
    pub const HOME_SPLASH: f32 = 4.0;

    /// Wire form of a notification. Sound cues travel in their own buffer and map to `None`.
    ///
    /// `ReachedTarget` carries the target index in `a`, or -1 for home.
    pub fn from_event(event: &TravelerEvent) -> Option<Self> {
        let (kind, a) = match *event {
            TravelerEvent::OrbStateChanged(on) => (Self::ORB_STATE, if on { 1.0 } else { 0.0 }),
            TravelerEvent::ReachedTarget(Destination::Target(TargetId(i))) => (Self::REACHED_TARGET, i as f32),
            TravelerEvent::ReachedTarget(Destination::Home) => (Self::REACHED_TARGET, -1.0),
            TravelerEvent::HomeFallStart => (Self::HOME_FALL_START, 0.0),
            TravelerEvent::HomeSplash => (Self::HOME_SPLASH, 0.0),
            TravelerEvent::Sound(_) => return None,
        };
        Some(Self { kind, a, b: 0.0, c: 0.0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_event_is_four_floats() {
        assert_eq!(std::mem::size_of::<WireEvent>(), WireEvent::FLOATS * 4);
    }

    #[test]
    fn reached_target_encodes_index() {
        let w = WireEvent::from_event(&TravelerEvent::ReachedTarget(Destination::Target(TargetId(3)))).unwrap();
        assert_eq!(w.kind, WireEvent::REACHED_TARGET);
        assert_eq!(w.a, 3.0);
        let home = WireEvent::from_event(&TravelerEvent::ReachedTarget(Destination::Home)).unwrap();
        assert_eq!(home.a, -1.0);
    }

    #[test]
    fn sounds_stay_off_the_event_wire() {
        assert!(WireEvent::from_event(&TravelerEvent::Sound(SoundCue::Arrival)).is_none());
        assert_eq!(SoundCue::Splash.id(), 2);
    }
}
