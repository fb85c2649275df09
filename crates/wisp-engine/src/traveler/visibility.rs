//! Avatar opacity ramp, shadow flag, and the post-arrival glow boost.

use crate::extensions::easing::Easing;

/// Scalars the renderer blends the orb and sparks with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowScalars {
    pub color_mix: f32,
    pub size_boost: f32,
    pub opacity_boost: f32,
}

/// Visibility state of the avatar and the orb.
///
/// Opacity only takes values strictly between 0 and 1 while a fade is running.
#[derive(Debug, Clone)]
pub struct Visibility {
    opacity: f32,
    cast_shadow: bool,
    orb_visible: bool,
    explosion_boost: f32,
    fade_elapsed: f32,
    fading: bool,
}

impl Visibility {
    pub fn new() -> Self {
        Self {
            opacity: 1.0,
            cast_shadow: true,
            orb_visible: false,
            explosion_boost: 0.0,
            fade_elapsed: 0.0,
            fading: false,
        }
    }

    /// Swap the avatar for the orb.
    pub fn hide_avatar(&mut self) {
        self.opacity = 0.0;
        self.cast_shadow = false;
        self.orb_visible = true;
        self.fading = false;
    }

    /// Drop the orb and start fading the avatar back in.
    pub fn begin_fade(&mut self) {
        self.orb_visible = false;
        self.fade_elapsed = 0.0;
        self.fading = true;
    }

    /// Advance the fade. Returns true once the avatar is fully opaque.
    pub fn advance_fade(&mut self, dt: f32, duration: f32, easing: Easing) -> bool {
        if !self.fading {
            return self.opacity >= 1.0;
        }
        self.fade_elapsed += dt.max(0.0);
        let t = if duration > 0.0 { self.fade_elapsed / duration } else { 1.0 };
        self.opacity = if t >= 1.0 { 1.0 } else { easing.apply(t) };
        self.opacity >= 1.0
    }

    /// Avatar fully back: opaque and casting shadows again.
    pub fn finish(&mut self) {
        self.opacity = 1.0;
        self.cast_shadow = true;
        self.fading = false;
    }

    pub fn ignite(&mut self, peak: f32) {
        self.explosion_boost = peak.max(self.explosion_boost);
    }

    pub fn decay_boost(&mut self, dt: f32, rate: f32) {
        self.explosion_boost = (self.explosion_boost - rate * dt.max(0.0)).max(0.0);
    }

    /// Render scalars for the given journey progress in [0, 1].
    pub fn glow(&self, progress: f32) -> GlowScalars {
        let boost = self.explosion_boost;
        GlowScalars {
            color_mix: (progress + boost * 0.35).clamp(0.0, 1.0),
            size_boost: 1.0 + boost * 0.6,
            opacity_boost: 1.0 + boost * 0.4,
        }
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn cast_shadow(&self) -> bool {
        self.cast_shadow
    }

    pub fn orb_visible(&self) -> bool {
        self.orb_visible
    }

    pub fn explosion_boost(&self) -> f32 {
        self.explosion_boost
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_as_visible_avatar() {
        let v = Visibility::new();
        assert_eq!(v.opacity(), 1.0);
        assert!(v.cast_shadow());
        assert!(!v.orb_visible());
    }

    #[test]
    fn fade_ramps_to_one_within_duration() {
        let mut v = Visibility::new();
        v.hide_avatar();
        v.begin_fade();
        let mut frames = 0;
        while !v.advance_fade(1.0 / 60.0, 0.6, Easing::CubicOut) {
            assert!(v.opacity() >= 0.0 && v.opacity() < 1.0);
            frames += 1;
            assert!(frames < 100, "fade never finished");
        }
        assert_eq!(v.opacity(), 1.0);
        assert!((35..=37).contains(&frames), "took {} frames", frames);
    }

    #[test]
    fn zero_duration_fade_is_instant() {
        let mut v = Visibility::new();
        v.hide_avatar();
        v.begin_fade();
        assert!(v.advance_fade(0.0, 0.0, Easing::Linear));
    }

    #[test]
    fn boost_decays_linearly_to_zero() {
        let mut v = Visibility::new();
        v.ignite(1.6);
        v.decay_boost(1.0, 0.6);
        assert!((v.explosion_boost() - 1.0).abs() < 1e-6);
        v.decay_boost(5.0, 0.6);
        assert_eq!(v.explosion_boost(), 0.0);
    }

    #[test]
    fn glow_scalars_follow_boost() {
        let mut v = Visibility::new();
        let calm = v.glow(0.5);
        assert_eq!(calm.color_mix, 0.5);
        assert_eq!(calm.size_boost, 1.0);
        v.ignite(1.6);
        let hot = v.glow(0.5);
        assert_eq!(hot.color_mix, 1.0);
        assert!(hot.size_boost > 1.9);
        assert!(hot.opacity_boost > 1.6);
    }
}
