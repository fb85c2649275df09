use wisp_engine::{
    Command, CommandQueue, FrameClock, ProtocolLayout, RenderFeed, TargetManifest,
    TargetRegistry, Traveler, TravelerConfig, TravelerEvent, WireEvent,
};

/// Wires the traveler into the browser frame loop.
///
/// The page keeps one `TravelerRunner` in a `thread_local!` and drives it
/// through the free `#[wasm_bindgen]` functions in `lib.rs`.
pub struct TravelerRunner {
    traveler: Traveler,
    commands: CommandQueue,
    clock: FrameClock,
    feed: RenderFeed,
    config: TravelerConfig,
    layout: ProtocolLayout,
    initialized: bool,
    /// Flat buffer of sound cue IDs for SharedArrayBuffer reads.
    sound_buffer: Vec<u8>,
    /// Flat buffer of wire events for SharedArrayBuffer reads.
    event_buffer: Vec<WireEvent>,
}

impl TravelerRunner {
    pub fn new(config: TravelerConfig) -> Self {
        let layout = ProtocolLayout::from_config(&config);
        Self {
            traveler: Traveler::new(config.clone(), TargetRegistry::new()),
            commands: CommandQueue::new(),
            clock: FrameClock::from_config(&config.timing),
            feed: RenderFeed::new(layout.max_sparks),
            sound_buffer: Vec::with_capacity(layout.max_sounds),
            event_buffer: Vec::with_capacity(layout.max_events),
            layout,
            config,
            initialized: false,
        }
    }

    /// Build the first feed so the page can draw before the first tick. Call once after construction.
    pub fn init(&mut self) {
        self.feed.rebuild(&self.traveler);
        self.initialized = true;
    }

    /// Replace the tuning. Rebuilds the traveler at its home point; targets are kept.
    /// Returns false and keeps the previous configuration when the JSON is invalid.
    pub fn load_config(&mut self, json: &str) -> bool {
        let config = match TravelerConfig::from_json(json) {
            Ok(config) => config,
            Err(err) => {
                log::error!("invalid traveler config: {}", err);
                return false;
            }
        };
        let targets = self.traveler.targets().clone();
        self.layout = ProtocolLayout::from_config(&config);
        self.clock = FrameClock::from_config(&config.timing);
        self.feed = RenderFeed::new(self.layout.max_sparks);
        self.traveler = Traveler::new(config.clone(), targets);
        self.config = config;
        if self.initialized {
            self.feed.rebuild(&self.traveler);
        }
        log::info!(
            "traveler config loaded: {} spark slots, {} live sparks max",
            self.layout.max_sparks,
            self.config.sparks.max_live
        );
        true
    }

    /// Replace the target set from a manifest. Returns the number of named targets,
    /// or None when the JSON is invalid.
    pub fn load_targets(&mut self, json: &str) -> Option<usize> {
        let manifest = match TargetManifest::from_json(json) {
            Ok(manifest) => manifest,
            Err(err) => {
                log::error!("invalid target manifest: {}", err);
                return None;
            }
        };
        let registry = TargetRegistry::from_manifest(&manifest);
        let count = registry.len();
        self.traveler.set_targets(registry);
        log::info!("{} targets loaded", count);
        Some(count)
    }

    /// Queue a journey. Applied at the start of the next tick.
    pub fn navigate(&mut self, id: &str) {
        self.commands.push(Command::Navigate(id.to_string()));
    }

    /// Run one frame: apply commands, step the traveler, rebuild the feed.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.traveler.clear_frame_data();

        for command in self.commands.drain() {
            match command {
                Command::Navigate(id) => {
                    self.traveler.navigate(&id);
                }
            }
        }

        let frame = self.clock.advance(dt);
        self.traveler.step(frame);

        self.feed.rebuild(&self.traveler);
        self.pack_events();
    }

    fn pack_events(&mut self) {
        let events = self.traveler.events();

        self.sound_buffer.clear();
        self.sound_buffer.extend(
            events
                .iter()
                .filter_map(|event| match event {
                    TravelerEvent::Sound(cue) => Some(cue.id()),
                    _ => None,
                })
                .take(self.layout.max_sounds),
        );

        self.event_buffer.clear();
        self.event_buffer.extend(
            events
                .iter()
                .filter_map(WireEvent::from_event)
                .take(self.layout.max_events),
        );
    }

    pub fn traveler(&self) -> &Traveler {
        &self.traveler
    }

    pub fn config(&self) -> &TravelerConfig {
        &self.config
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.feed.header_ptr()
    }

    pub fn sparks_ptr(&self) -> *const f32 {
        self.feed.sparks_ptr()
    }

    pub fn spark_count(&self) -> u32 {
        self.feed.spark_count()
    }

    pub fn sound_events_ptr(&self) -> *const u8 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.event_buffer.as_ptr() as *const f32
    }

    pub fn events_len(&self) -> u32 {
        self.event_buffer.len() as u32
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_sparks(&self) -> u32 {
        self.layout.max_sparks as u32
    }

    pub fn max_sounds(&self) -> u32 {
        self.layout.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wisp_engine::{SoundCue, TravelerState};

    const TARGETS: &str = r#"{
        "targets": {
            "about": { "position": [0.0, 0.0, -16.0] },
            "tower": { "position": [10.0, 6.0, 4.0], "ground": 5.5 }
        }
    }"#;

    fn runner() -> TravelerRunner {
        let mut r = TravelerRunner::new(TravelerConfig::default());
        r.init();
        assert_eq!(r.load_targets(TARGETS), Some(2));
        r
    }

    #[test]
    fn tick_before_init_is_ignored() {
        let mut r = TravelerRunner::new(TravelerConfig::default());
        r.navigate("about");
        r.tick(1.0 / 60.0);
        assert_eq!(r.traveler().state(), TravelerState::Grounded);
    }

    #[test]
    fn navigate_is_applied_on_the_next_tick() {
        let mut r = runner();
        r.navigate("about");
        assert_eq!(r.traveler().state(), TravelerState::Grounded);

        r.tick(1.0 / 60.0);
        assert_eq!(r.traveler().state(), TravelerState::Traveling);
        assert_eq!(r.sound_events_len(), 1);
        assert_eq!(r.sound_buffer[0], SoundCue::Launch.id());
        assert_eq!(r.events_len(), 1);
        assert_eq!(r.event_buffer[0].kind, WireEvent::ORB_STATE);
        assert!(r.spark_count() > 0);
    }

    #[test]
    fn per_frame_buffers_are_cleared() {
        let mut r = runner();
        r.navigate("about");
        r.tick(1.0 / 60.0);
        r.tick(1.0 / 60.0);
        assert_eq!(r.sound_events_len(), 0);
        assert_eq!(r.events_len(), 0);
    }

    #[test]
    fn event_buffer_respects_capacity() {
        let mut r = TravelerRunner::new(TravelerConfig::default());
        assert!(r.load_config(r#"{ "timing": { "max_events": 0, "max_sounds": 0 } }"#));
        r.init();
        r.load_targets(TARGETS);
        r.navigate("about");
        r.tick(1.0 / 60.0);
        assert_eq!(r.events_len(), 0);
        assert_eq!(r.sound_events_len(), 0);
        assert_eq!(r.traveler().state(), TravelerState::Traveling);
    }

    #[test]
    fn bad_json_keeps_previous_state() {
        let mut r = runner();
        assert!(!r.load_config("{ not json"));
        assert_eq!(r.load_targets("[1, 2"), None);
        assert_eq!(r.traveler().targets().len(), 2);
        assert_eq!(r.max_sparks(), 3000);
    }

    #[test]
    fn config_reload_keeps_targets() {
        let mut r = runner();
        assert!(r.load_config(r#"{ "sparks": { "render_slots": 64 } }"#));
        assert_eq!(r.max_sparks(), 64);
        assert_eq!(r.traveler().targets().len(), 2);
    }

    #[test]
    fn full_journey_reports_arrival() {
        let mut r = runner();
        r.navigate("about");
        let mut reached = false;
        for _ in 0..300 {
            r.tick(1.0 / 60.0);
            reached |= r.event_buffer.iter().any(|e| e.kind == WireEvent::REACHED_TARGET);
        }
        assert!(reached);
        assert_eq!(r.traveler().state(), TravelerState::Grounded);
    }
}
