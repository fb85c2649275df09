//! The traveler state machine.
//!
//! ```text
//! Grounded ──navigate──▶ Launching ──▶ Traveling ──arrived──▶ Exploding ──▶ FadingIn ──opaque──▶ Grounded
//!                                 └──▶ Falling ───landed──┘
//! ```
//!
//! `Launching` and `Exploding` are one-frame states: their side effects run and
//! the machine moves on within the same `step`.

use glam::Vec3;

use crate::api::config::TravelerConfig;
use crate::api::types::{Destination, SoundCue, TravelerEvent};
use crate::assets::registry::{TargetPoint, TargetRegistry};
use crate::core::time::FrameDelta;
use crate::extensions::easing::{damp_factor, lerp_angle, lerp_vec3};
use crate::sparks::{ExplosionScheduler, Rng, Spark, SparkKind, SparkPool};

use super::arrival::{ArrivalDetector, ArrivalSignal};
use super::steering::{side_vectors, SteeringModel, WobblePhase};
use super::visibility::{GlowScalars, Visibility};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelerState {
    Grounded,
    Launching,
    Traveling,
    Falling,
    Exploding,
    FadingIn,
}

impl TravelerState {
    /// Numeric code written into the render feed header.
    pub fn index(self) -> u32 {
        match self {
            TravelerState::Grounded => 0,
            TravelerState::Launching => 1,
            TravelerState::Traveling => 2,
            TravelerState::Falling => 3,
            TravelerState::Exploding => 4,
            TravelerState::FadingIn => 5,
        }
    }
}

/// The avatar/orb entity. Owns its sparks, its burst queue, and all journey state.
pub struct Traveler {
    config: TravelerConfig,
    state: TravelerState,
    position: Vec3,
    yaw: f32,
    ground_height: f32,
    destination: Option<Destination>,
    target: TargetPoint,
    start_distance: f32,
    distance: f32,
    phase: WobblePhase,
    steering: SteeringModel,
    arrival: ArrivalDetector,
    last_signal: Option<ArrivalSignal>,
    visibility: Visibility,
    pool: SparkPool,
    scheduler: ExplosionScheduler,
    rng: Rng,
    targets: TargetRegistry,
    events: Vec<TravelerEvent>,
}

impl Traveler {
    /// A grounded traveler standing at the registry's home point.
    pub fn new(config: TravelerConfig, targets: TargetRegistry) -> Self {
        let home = targets.home();
        Self {
            state: TravelerState::Grounded,
            position: Vec3::new(home.position.x, home.ground, home.position.z),
            yaw: 0.0,
            ground_height: home.ground,
            destination: None,
            target: home,
            start_distance: config.motion.min_start_distance,
            distance: 0.0,
            phase: WobblePhase::default(),
            steering: SteeringModel::new(config.wobble.clone(), config.arrival.stop_distance),
            arrival: ArrivalDetector::new(config.arrival.clone()),
            last_signal: None,
            visibility: Visibility::new(),
            pool: SparkPool::new(config.sparks.clone()),
            scheduler: ExplosionScheduler::new(config.bursts.clone()),
            rng: Rng::new(config.seed),
            targets,
            events: Vec::with_capacity(config.timing.max_events),
            config,
        }
    }

    /// Start a journey to `id` (a registry name or `"home"`).
    ///
    /// Ignored while a journey is in progress or when the id does not resolve.
    /// Returns whether the journey started.
    pub fn navigate(&mut self, id: &str) -> bool {
        if self.state != TravelerState::Grounded {
            log::debug!("navigate({}) ignored: {:?} in progress", id, self.state);
            return false;
        }
        let Some((destination, point)) = self.targets.resolve(id) else {
            log::warn!("navigate({}) ignored: unknown target", id);
            return false;
        };
        self.launch(destination, point);
        log::info!(
            "journey to {} started: {:.2} units from {:?}",
            id,
            self.start_distance,
            self.position
        );
        true
    }

    /// Advance one frame.
    pub fn step(&mut self, frame: FrameDelta) {
        self.visibility
            .decay_boost(frame.smooth, self.config.motion.explosion_boost_decay);
        // Drain before this frame's transitions so a fresh request never
        // spawns its immediate share and a batch on the same frame.
        self.scheduler.drain(&mut self.pool, &mut self.rng);

        if self.state == TravelerState::Launching {
            self.enter_flight();
        }

        let landed = match self.state {
            TravelerState::Traveling => self.travel(frame),
            TravelerState::Falling => self.fall(frame),
            _ => false,
        };

        if landed {
            self.set_state(TravelerState::Exploding);
            self.explode();
        } else if self.state == TravelerState::FadingIn {
            self.fade_in(frame.smooth);
        }

        self.pool.step(frame.smooth);
    }

    fn launch(&mut self, destination: Destination, point: TargetPoint) {
        let home = destination == Destination::Home;
        let bursts = self.scheduler.config();
        let profile = if home { bursts.home_launch } else { bursts.launch };
        let feet = Vec3::new(self.position.x, self.ground_height, self.position.z);
        self.scheduler
            .request(&profile, feet, self.ground_height, &mut self.pool, &mut self.rng);

        if home {
            let drop_height = point.ground + self.config.motion.home_fall_altitude;
            self.position.y = self.position.y.max(drop_height);
        }

        self.destination = Some(destination);
        self.target = point;
        self.distance = self.position.distance(point.position);
        self.start_distance = self.distance.max(self.config.motion.min_start_distance);
        self.phase = WobblePhase {
            a: self.rng.angle(),
            b: self.rng.angle(),
        };
        self.arrival.reset();
        self.last_signal = None;
        self.visibility.hide_avatar();

        self.events.push(TravelerEvent::Sound(SoundCue::Launch));
        self.events.push(TravelerEvent::OrbStateChanged(true));
        self.set_state(TravelerState::Launching);
    }

    fn enter_flight(&mut self) {
        self.arrival.reset();
        if self.destination == Some(Destination::Home) {
            self.set_state(TravelerState::Falling);
            self.events.push(TravelerEvent::HomeFallStart);
        } else {
            self.set_state(TravelerState::Traveling);
        }
    }

    /// One frame of steered flight. Returns true on arrival.
    fn travel(&mut self, frame: FrameDelta) -> bool {
        let to_target = self.target.position - self.position;
        let distance = to_target.length();
        let progress = self.progress_at(distance);
        let direction = self.steering.direction(to_target, progress, self.phase, frame.elapsed);

        let step = distance.min(self.config.motion.travel_speed * frame.raw);
        self.position += direction * step;

        let mut remaining = self.target.position.distance(self.position);
        if remaining <= self.config.motion.snap_distance {
            self.position = self.target.position;
            remaining = 0.0;
        }
        self.distance = remaining;

        if direction != Vec3::ZERO {
            let heading = direction.x.atan2(direction.z);
            let k = damp_factor(self.config.motion.yaw_smoothing_base, frame.smooth);
            self.yaw = lerp_angle(self.yaw, heading, k);

            let speed = if frame.raw > 0.0 { step / frame.raw } else { 0.0 };
            self.emit_trail(direction, speed, remaining);
        }

        match self.arrival.update(remaining, frame.smooth) {
            Some(signal) => {
                log::debug!("arrived by {:?} at {:.3} units", signal, remaining);
                self.last_signal = Some(signal);
                true
            }
            None => false,
        }
    }

    /// One frame of the vertical home fall. Returns true on touchdown.
    fn fall(&mut self, frame: FrameDelta) -> bool {
        let motion = &self.config.motion;
        let stop = self.target.ground + motion.fall_stop_offset;
        let k = damp_factor(motion.fall_xz_base, frame.smooth);

        self.position.y -= motion.fall_speed * frame.raw;
        let above_home = Vec3::new(self.target.position.x, self.position.y, self.target.position.z);
        self.position = lerp_vec3(self.position, above_home, k);

        let landed = self.position.y <= stop;
        if landed {
            self.position.y = stop;
        }
        self.distance = self.position.distance(self.target.position);
        landed
    }

    /// Spawn this frame's trail from a disk behind the orb.
    fn emit_trail(&mut self, direction: Vec3, speed: f32, remaining: f32) {
        let color_mix = self.progress_at(remaining);
        let c = &self.config.sparks;
        let (side1, side2) = side_vectors(direction);
        let center = self.position - direction * c.trail_offset;
        let ground = self.ground_height;

        for _ in 0..c.trail_per_frame {
            let r = c.trail_radius * self.rng.next_f32().sqrt();
            let theta = self.rng.angle();
            let position = center + (side1 * theta.cos() + side2 * theta.sin()) * r;

            let back = speed * self.rng.range(c.trail_speed_factor.0, c.trail_speed_factor.1);
            let jitter = Vec3::new(
                self.rng.signed(c.trail_jitter),
                self.rng.signed(c.trail_jitter),
                self.rng.signed(c.trail_jitter),
            );
            let velocity = -direction * back + jitter;
            let life = self.rng.range(c.trail_life.0, c.trail_life.1);

            self.pool.spawn(Spark::trail(position, velocity, life, color_mix, ground));
        }
    }

    fn explode(&mut self) {
        let ground = self.target.ground;
        self.position.y = ground;
        self.ground_height = ground;

        let purged = self.pool.purge_by_tag(SparkKind::Trail);
        let bursts = self.scheduler.config();
        let origin = self.position + Vec3::Y * bursts.origin_lift;
        let profile = bursts.arrival;
        self.scheduler
            .request(&profile, origin, ground, &mut self.pool, &mut self.rng);

        self.visibility.ignite(self.config.motion.explosion_boost_peak);
        self.visibility.begin_fade();

        self.events.push(TravelerEvent::Sound(SoundCue::Arrival));
        if let Some(destination) = self.destination {
            if destination == Destination::Home {
                self.events.push(TravelerEvent::HomeSplash);
                self.events.push(TravelerEvent::Sound(SoundCue::Splash));
            }
            self.events.push(TravelerEvent::ReachedTarget(destination));
        }
        log::info!(
            "journey ended at {:?}: {} trail sparks purged, burst staged",
            self.position,
            purged
        );
        self.set_state(TravelerState::FadingIn);
    }

    fn fade_in(&mut self, dt: f32) {
        let motion = &self.config.motion;
        if self
            .visibility
            .advance_fade(dt, motion.fade_duration, motion.fade_easing)
        {
            self.visibility.finish();
            self.destination = None;
            self.events.push(TravelerEvent::OrbStateChanged(false));
            self.set_state(TravelerState::Grounded);
        }
    }

    fn set_state(&mut self, next: TravelerState) {
        log::debug!("traveler: {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn progress_at(&self, distance: f32) -> f32 {
        (1.0 - distance / self.start_distance).clamp(0.0, 1.0)
    }

    // -- Per-frame outputs --

    /// Events emitted since the last `clear_frame_data`.
    pub fn events(&self) -> &[TravelerEvent] {
        &self.events
    }

    /// Clear per-frame transient data. Called by the runner before each frame.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }

    /// Render scalars derived from the glow boost and journey progress.
    pub fn glow(&self) -> GlowScalars {
        self.visibility.glow(self.progress())
    }

    // -- Accessors --

    pub fn state(&self) -> TravelerState {
        self.state
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn ground_height(&self) -> f32 {
        self.ground_height
    }

    pub fn destination(&self) -> Option<Destination> {
        self.destination
    }

    pub fn target_position(&self) -> Vec3 {
        self.target.position
    }

    pub fn start_distance(&self) -> f32 {
        self.start_distance
    }

    /// Distance to the target after the latest move.
    pub fn distance_to_target(&self) -> f32 {
        self.distance
    }

    /// Covered fraction of the current journey.
    pub fn progress(&self) -> f32 {
        self.progress_at(self.distance)
    }

    /// Signal that ended the latest steered flight.
    pub fn last_arrival_signal(&self) -> Option<ArrivalSignal> {
        self.last_signal
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    pub fn pool(&self) -> &SparkPool {
        &self.pool
    }

    pub fn scheduler(&self) -> &ExplosionScheduler {
        &self.scheduler
    }

    pub fn targets(&self) -> &TargetRegistry {
        &self.targets
    }

    /// Swap the target set. Takes effect from the next journey.
    pub fn set_targets(&mut self, targets: TargetRegistry) {
        self.targets = targets;
    }

    pub fn config(&self) -> &TravelerConfig {
        &self.config
    }
}
