//! Browser bridge for the omikuji scene.
//!
//! A single [`SceneRunner`] lives in a `thread_local!`; the exported free
//! functions forward to it. Bulk data (draw instances, events) is read by
//! the host straight out of wasm memory through the pointer accessors.

pub mod runner;

pub use runner::SceneRunner;

use std::cell::RefCell;

use omikuji_engine::{InputEvent, SceneConfig};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<SceneRunner>> = const { RefCell::new(None) };
}

fn with_runner<R: Default>(f: impl FnOnce(&mut SceneRunner) -> R) -> R {
    RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
        Some(runner) => f(runner),
        None => {
            web_sys::console::warn_1(&JsValue::from_str("omikuji: scene_init() has not been called"));
            R::default()
        }
    })
}

fn random_seed() -> u64 {
    let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let lo = (js_sys::Math::random() * u32::MAX as f64) as u64;
    (hi << 32) | lo
}

#[wasm_bindgen]
pub fn scene_init(width: f32, height: f32) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = SceneConfig {
        width,
        height,
        ..SceneConfig::default()
    };
    let runner = SceneRunner::new(config, random_seed());
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("omikuji: initialized");
}

#[wasm_bindgen]
pub fn scene_tick(dt_ms: f32) {
    with_runner(|r| r.tick(dt_ms));
}

#[wasm_bindgen]
pub fn scene_activate() {
    with_runner(|r| r.push_input(InputEvent::Activate));
}

#[wasm_bindgen]
pub fn scene_resize(width: f32, height: f32) {
    with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
}

#[wasm_bindgen]
pub fn get_render_state_json() -> String {
    with_runner(|r| r.render_state_json().to_owned())
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_draw_instances_ptr() -> *const f32 {
    RUNNER.with(|cell| {
        cell.borrow()
            .as_ref()
            .map_or(std::ptr::null(), |r| r.draw_instances_ptr())
    })
}

#[wasm_bindgen]
pub fn get_draw_instance_count() -> u32 {
    with_runner(|r| r.draw_instance_count())
}

#[wasm_bindgen]
pub fn get_events_ptr() -> *const f32 {
    RUNNER.with(|cell| cell.borrow().as_ref().map_or(std::ptr::null(), |r| r.events_ptr()))
}

#[wasm_bindgen]
pub fn get_events_len() -> u32 {
    with_runner(|r| r.events_len())
}
