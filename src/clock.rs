/// Nominal 60 Hz frame step, in seconds.
pub const FRAME_STEP: f64 = 0.016;

/// Animation time that advances by a fixed step per rendered frame.
///
/// The clock never looks at wall time, so the animation runs at the same
/// pace per frame regardless of the display's refresh rate. Time is derived
/// from the frame count rather than accumulated, which keeps it strictly
/// increasing for any realistic page lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    frames: u64,
    step: f64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(FRAME_STEP)
    }
}

impl FrameClock {
    pub fn new(step: f64) -> Self {
        Self { frames: 0, step }
    }

    /// Advances one frame and returns the new elapsed time.
    pub fn advance(&mut self) -> f64 {
        self.frames = self.frames.saturating_add(1);
        self.elapsed()
    }

    pub fn elapsed(&self) -> f64 {
        self.frames as f64 * self.step
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
