/// Nominal frame rate. One tick is `1 / FRAME_RATE` seconds.
pub const FRAME_RATE: f32 = 60.0;

/// Convert frame-normalised ticks to seconds.
#[inline]
pub fn ticks_to_secs(ticks: f32) -> f32 {
    ticks / FRAME_RATE
}

/// Converts host frame times (seconds) into frame-normalised ticks.
/// A tick of 1.0 is one nominal frame; slow frames produce larger ticks.
pub struct FrameClock {
    /// Largest delta handed to the simulation in one call.
    max_ticks: f32,
    /// Total ticks handed out so far.
    elapsed_ticks: f64,
}

impl FrameClock {
    /// Default cap: a stalled tab resumes with at most ten frames of catch-up.
    pub const DEFAULT_MAX_TICKS: f32 = 10.0;

    pub fn new(max_ticks: f32) -> Self {
        Self {
            max_ticks: max_ticks.max(1.0),
            elapsed_ticks: 0.0,
        }
    }

    /// Convert a frame time in seconds into ticks, capped at `max_ticks`.
    /// Negative or non-finite input yields zero.
    pub fn accumulate(&mut self, frame_secs: f32) -> f32 {
        if !frame_secs.is_finite() || frame_secs <= 0.0 {
            return 0.0;
        }
        let ticks = (frame_secs * FRAME_RATE).min(self.max_ticks);
        self.elapsed_ticks += ticks as f64;
        ticks
    }

    pub fn elapsed_ticks(&self) -> f64 {
        self.elapsed_ticks
    }

    pub fn max_ticks(&self) -> f32 {
        self.max_ticks
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_TICKS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_nominal_frame_is_one_tick() {
        let mut clock = FrameClock::default();
        let ticks = clock.accumulate(1.0 / 60.0);
        assert!((ticks - 1.0).abs() < 1e-4);
    }

    #[test]
    fn caps_at_max_ticks() {
        let mut clock = FrameClock::default();
        let ticks = clock.accumulate(1.0);
        assert_eq!(ticks, 10.0);
    }

    #[test]
    fn rejects_bad_input() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.accumulate(-0.5), 0.0);
        assert_eq!(clock.accumulate(f32::NAN), 0.0);
        assert_eq!(clock.elapsed_ticks(), 0.0);
    }

    #[test]
    fn ticks_convert_to_seconds() {
        assert!((ticks_to_secs(90.0) - 1.5).abs() < 1e-6);
    }
}
