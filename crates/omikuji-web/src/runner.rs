use omikuji_engine::{DrawEvent, FortuneScene, FrameClock, InputEvent, InputQueue, SceneConfig};

/// Drives one [`FortuneScene`] from browser callbacks.
///
/// `lib.rs` keeps a single runner in a `thread_local!` and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export a
/// struct holding engine types directly. Input arrives between frames and
/// is applied at the start of the next tick.
pub struct SceneRunner {
    scene: FortuneScene,
    input: InputQueue,
    clock: FrameClock,
    /// Events from the last tick, kept alive for pointer reads.
    event_buffer: Vec<DrawEvent>,
    /// Last serialised snapshot.
    render_json: String,
}

impl SceneRunner {
    pub fn new(config: SceneConfig, seed: u64) -> Self {
        Self {
            scene: FortuneScene::new(config, seed),
            input: InputQueue::new(),
            clock: FrameClock::default(),
            event_buffer: Vec::with_capacity(8),
            render_json: String::new(),
        }
    }

    /// Queue an input event for the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: apply queued input, then advance by the frame time.
    pub fn tick(&mut self, dt_ms: f32) {
        self.event_buffer.clear();

        self.scene.apply_input(&mut self.input);

        let ticks = self.clock.accumulate(dt_ms / 1000.0);
        if ticks > 0.0 {
            self.scene.advance(ticks);
        }

        self.event_buffer.extend(self.scene.drain_events());
    }

    /// Serialise the current snapshot. Falls back to the previous one if
    /// serialisation fails.
    pub fn render_state_json(&mut self) -> &str {
        match serde_json::to_string(&self.scene.render_state()) {
            Ok(json) => self.render_json = json,
            Err(err) => log::error!("render state serialisation failed: {}", err),
        }
        &self.render_json
    }

    pub fn scene(&self) -> &FortuneScene {
        &self.scene
    }

    pub fn elapsed_ticks(&self) -> f64 {
        self.clock.elapsed_ticks()
    }

    // ---- Pointer accessors for direct memory reads ----

    pub fn draw_instances_ptr(&self) -> *const f32 {
        self.scene.draw_buffer().instances_ptr()
    }

    pub fn draw_instance_count(&self) -> u32 {
        self.scene.draw_buffer().instance_count()
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.event_buffer.as_ptr() as *const f32
    }

    pub fn events_len(&self) -> u32 {
        self.event_buffer.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use omikuji_engine::{event_kind, Phase};

    const FRAME_MS: f32 = 1000.0 / 60.0;

    fn runner() -> SceneRunner {
        SceneRunner::new(SceneConfig::default(), 11)
    }

    #[test]
    fn queued_activate_applies_on_next_tick() {
        let mut r = runner();
        r.push_input(InputEvent::Activate);
        assert_eq!(r.scene().state().phase, Phase::Idle);
        r.tick(FRAME_MS);
        assert_eq!(r.scene().state().phase, Phase::Charging);
        assert_eq!(r.events_len(), 1);
    }

    #[test]
    fn events_only_cover_the_last_tick() {
        let mut r = runner();
        r.push_input(InputEvent::Activate);
        r.tick(FRAME_MS);
        r.tick(FRAME_MS);
        assert_eq!(r.events_len(), 0);
    }

    #[test]
    fn full_cycle_through_frame_times() {
        let mut r = runner();
        r.push_input(InputEvent::Activate);
        let mut kinds = Vec::new();
        for _ in 0..200 {
            r.tick(FRAME_MS);
            let events = unsafe {
                std::slice::from_raw_parts(r.events_ptr(), r.events_len() as usize * DrawEvent::FLOATS)
            };
            kinds.extend(events.chunks(DrawEvent::FLOATS).map(|e| e[0]));
        }
        assert_eq!(r.scene().state().phase, Phase::Result);
        assert_eq!(
            kinds,
            vec![event_kind::CHARGE_STARTED, event_kind::RELEASED, event_kind::REVEALED]
        );
    }

    #[test]
    fn stalled_frame_is_capped() {
        let mut r = runner();
        r.push_input(InputEvent::Activate);
        r.tick(5000.0);
        assert!((r.elapsed_ticks() - FrameClock::DEFAULT_MAX_TICKS as f64).abs() < 1e-6);
        assert_eq!(r.scene().state().phase, Phase::Charging);
    }

    #[test]
    fn render_json_reflects_resize() {
        let mut r = runner();
        r.push_input(InputEvent::Resize { width: 1200.0, height: 800.0 });
        r.tick(FRAME_MS);
        let json = r.render_state_json().to_owned();
        assert!(json.contains("\"center\":[600.0,400.0]"));
        assert!(json.contains("\"prompt_visible\":true"));
    }
}
