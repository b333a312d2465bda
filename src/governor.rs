//! Adaptive load governor.
//!
//! Counts completed frames per rolling one-second window. Sustained
//! underperformance first disables triangle shading (the most expensive
//! stage) and shrinks the particle count by 10%; recovery re-enables
//! shading but never grows the count back.

/// Below this rate fidelity is reduced.
pub const LOW_FPS: f32 = 45.0;
/// Above this rate triangle shading is restored.
pub const HIGH_FPS: f32 = 55.0;
/// Sampling window in milliseconds.
const WINDOW_MS: f64 = 1000.0;

/// Outcome of a completed sampling window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GovernorSample {
    /// Frames completed in the window.
    pub fps: f32,
    /// The caller should shrink the particle count by 10%.
    pub shrink: bool,
}

pub struct FpsGovernor {
    window_start: f64,
    frames: u32,
    shading: bool,
    master: bool,
}

impl FpsGovernor {
    /// `master` is the configured triangle switch; shading is never enabled
    /// beyond it.
    pub fn new(master: bool, now_ms: f64) -> Self {
        Self {
            window_start: now_ms,
            frames: 0,
            shading: master,
            master,
        }
    }

    #[inline]
    pub fn shading_enabled(&self) -> bool {
        self.shading
    }

    pub fn set_master(&mut self, master: bool) {
        self.master = master;
        self.shading = self.shading && master;
    }

    /// Restart the sampling window, e.g. after a pause. Without this the
    /// first window after resume would count the hidden time as dropped
    /// frames and spuriously degrade.
    pub fn reset(&mut self, now_ms: f64) {
        self.window_start = now_ms;
        self.frames = 0;
    }

    /// Record a completed frame. Returns a sample when a window closes.
    pub fn on_frame(&mut self, now_ms: f64) -> Option<GovernorSample> {
        self.frames += 1;
        if now_ms - self.window_start < WINDOW_MS {
            return None;
        }
        let fps = self.frames as f32;
        self.frames = 0;
        self.window_start = now_ms;

        let mut shrink = false;
        if fps < LOW_FPS {
            self.shading = false;
            shrink = true;
        } else if fps > HIGH_FPS {
            self.shading = self.master;
        }
        Some(GovernorSample { fps, shrink })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drive the governor at a fixed rate for one full window.
    fn run_window(gov: &mut FpsGovernor, start_ms: f64, fps: u32) -> Option<GovernorSample> {
        let dt = 1000.0 / fps as f64;
        let mut now = start_ms;
        for _ in 0..fps * 2 {
            now += dt;
            if let Some(sample) = gov.on_frame(now) {
                return Some(sample);
            }
        }
        None
    }

    #[test]
    fn test_low_fps_disables_shading_and_shrinks() {
        let mut gov = FpsGovernor::new(true, 0.0);
        let sample = run_window(&mut gov, 0.0, 30).unwrap();
        assert!(sample.shrink);
        assert!(!gov.shading_enabled());
    }

    #[test]
    fn test_recovery_restores_shading() {
        let mut gov = FpsGovernor::new(true, 0.0);
        run_window(&mut gov, 0.0, 30).unwrap();
        assert!(!gov.shading_enabled());

        let sample = run_window(&mut gov, 1100.0, 60).unwrap();
        assert!(!sample.shrink);
        assert!(gov.shading_enabled());
    }

    #[test]
    fn test_hysteresis_band_keeps_state() {
        // 50 fps is between the thresholds: neither degrade nor restore
        let mut gov = FpsGovernor::new(true, 0.0);
        run_window(&mut gov, 0.0, 30).unwrap();
        run_window(&mut gov, 1100.0, 50).unwrap();
        assert!(!gov.shading_enabled());
    }

    #[test]
    fn test_master_off_never_enables() {
        let mut gov = FpsGovernor::new(false, 0.0);
        assert!(!gov.shading_enabled());
        run_window(&mut gov, 0.0, 60).unwrap();
        assert!(!gov.shading_enabled());
    }

    #[test]
    fn test_no_sample_before_window_closes() {
        let mut gov = FpsGovernor::new(true, 0.0);
        assert!(gov.on_frame(100.0).is_none());
        assert!(gov.on_frame(500.0).is_none());
        assert!(gov.on_frame(999.0).is_none());
        assert!(gov.on_frame(1001.0).is_some());
    }

    #[test]
    fn test_reset_discards_partial_window() {
        let mut gov = FpsGovernor::new(true, 0.0);
        gov.on_frame(100.0);
        gov.on_frame(200.0);
        gov.reset(5000.0);
        // only one frame in the new window, so no sample yet
        assert!(gov.on_frame(5100.0).is_none());
    }
}
