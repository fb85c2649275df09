pub mod runner;

pub use runner::TravelerRunner;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wisp_engine::TravelerConfig;

thread_local! {
    static RUNNER: RefCell<Option<TravelerRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut TravelerRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow.as_mut().expect("Traveler not initialized. Call wisp_init() first.");
        f(runner)
    })
}

#[wasm_bindgen]
pub fn wisp_init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"wisp: logger already installed".into());
    }

    let config = TravelerConfig {
        seed: (js_sys::Math::random() * u32::MAX as f64) as u64,
        ..TravelerConfig::default()
    };
    let mut runner = TravelerRunner::new(config);
    runner.init();

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("wisp: initialized");
}

/// Returns false when the JSON is rejected; the previous tuning stays active.
#[wasm_bindgen]
pub fn wisp_load_config(json: &str) -> bool {
    with_runner(|r| r.load_config(json))
}

/// Returns the number of named targets, or -1 when the manifest is rejected.
#[wasm_bindgen]
pub fn wisp_load_targets(json: &str) -> i32 {
    with_runner(|r| r.load_targets(json).map_or(-1, |n| n as i32))
}

#[wasm_bindgen]
pub fn wisp_navigate(id: &str) {
    with_runner(|r| r.navigate(id));
}

#[wasm_bindgen]
pub fn wisp_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_header_ptr() -> *const f32 {
    with_runner(|r| r.header_ptr())
}

#[wasm_bindgen]
pub fn get_sparks_ptr() -> *const f32 {
    with_runner(|r| r.sparks_ptr())
}

#[wasm_bindgen]
pub fn get_spark_count() -> u32 {
    with_runner(|r| r.spark_count())
}

#[wasm_bindgen]
pub fn get_sound_events_ptr() -> *const u8 {
    with_runner(|r| r.sound_events_ptr())
}

#[wasm_bindgen]
pub fn get_sound_events_len() -> u32 {
    with_runner(|r| r.sound_events_len())
}

#[wasm_bindgen]
pub fn get_events_ptr() -> *const f32 {
    with_runner(|r| r.events_ptr())
}

#[wasm_bindgen]
pub fn get_events_len() -> u32 {
    with_runner(|r| r.events_len())
}

// ---- Capacity accessors ----

#[wasm_bindgen]
pub fn get_max_sparks() -> u32 {
    with_runner(|r| r.max_sparks())
}

#[wasm_bindgen]
pub fn get_max_sounds() -> u32 {
    with_runner(|r| r.max_sounds())
}

#[wasm_bindgen]
pub fn get_max_events() -> u32 {
    with_runner(|r| r.max_events())
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats())
}
