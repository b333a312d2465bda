//! Oscillator math, harmony envelope, hex lattice and snap scheduling.
//!
//! Motion is the sum of three detuned sinusoids per axis plus a periodic
//! pull toward the nearest hexagonal lattice point. Three ingredients keep
//! it from ever looking mechanically repetitive: incommensurate oscillator
//! periods with a small detune, a very slow envelope that waxes and wanes
//! over minutes, and randomly scheduled snap pulses.

use glam::Vec2;

use crate::rng::XorShift32;

pub const TAU: f32 = std::f32::consts::TAU;

/// Oscillator angular frequencies, from periods of 36 s, 54 s and 81 s.
/// The second and third are detuned so the trio never exactly repeats.
pub const OMEGA1: f32 = TAU / 36.0;
pub const OMEGA2: f32 = TAU / 54.0 * 0.999;
pub const OMEGA3: f32 = TAU / 81.0 * 1.004;

/// Always-on lattice coherence before envelope scaling.
pub const BASELINE_PULL: f32 = 0.02;

/// Wrap an angle into `[-π, π]`. Non-finite input wraps to 0 so a corrupted
/// phase cannot poison downstream trigonometry.
pub fn wrap_angle(a: f32) -> f32 {
    if !a.is_finite() {
        return 0.0;
    }
    let mut a = a % TAU;
    if a > std::f32::consts::PI {
        a -= TAU;
    } else if a < -std::f32::consts::PI {
        a += TAU;
    }
    a
}

/// Cubic smoothstep on `[0, 1]`.
pub fn smoothstep(x: f32) -> f32 {
    let x = x.clamp(0.0, 1.0);
    x * x * (3.0 - 2.0 * x)
}

/// Slow modulation signal in roughly `[0.18, 1]`.
///
/// Product of two very low frequency sines (periods 89 s and 144 s) eased
/// in over the first 34 seconds of uptime. Scales oscillation amplitude and
/// the baseline lattice pull.
pub fn harmony_envelope(elapsed: f64) -> f32 {
    // the sines only need phase, so wrapped time keeps f32 precision;
    // the ramp needs true elapsed time and saturates after 34 s anyway
    let t = (elapsed % 3600.0) as f32;
    let a = 0.5 * (1.0 + (t * (TAU / 89.0)).sin());
    let b = 0.5 * (1.0 + (t * (TAU / 144.0)).sin());
    let ramp = (elapsed / 34.0).min(1.0) as f32;
    0.18 + 0.82 * a * b * ramp
}

/// Lattice spacing for a viewport, clamped to a readable range.
pub fn lattice_step(width: f32, height: f32) -> f32 {
    (width.min(height) / 8.0).clamp(96.0, 160.0)
}

/// Nearest point on a hexagonal (triangular) lattice with the given cell
/// size. Odd rows are offset half a cell.
pub fn hex_target(p: Vec2, step: f32) -> Vec2 {
    let row_h = step * 0.866_025_4; // sqrt(3)/2
    let row = (p.y / row_h).round();
    let offset = if (row as i64) & 1 != 0 { step * 0.5 } else { 0.0 };
    let col = ((p.x - offset) / step).round();
    Vec2::new(col * step + offset, row * row_h)
}

/// Schedules "harmony" pulses: windows where the lattice pull rises to its
/// configured peak, holds, and releases.
///
/// Between pulses the pull sits at an envelope-scaled baseline. Pulse start
/// times are drawn from the configured range with the renderer's own
/// deterministic generator, so two runs with the same seed pulse at the
/// same moments.
#[derive(Debug, Clone)]
pub struct SnapScheduler {
    next_at: f64,
    every: [f32; 2],
    rise: f32,
    hold: f32,
    fall: f32,
    peak: f32,
}

impl SnapScheduler {
    pub fn new(
        every: [f32; 2],
        rise: f32,
        hold: f32,
        fall: f32,
        peak: f32,
        rng: &mut XorShift32,
    ) -> Self {
        Self {
            next_at: rng.range(every[0], every[1]) as f64,
            every,
            rise,
            hold,
            fall,
            peak,
        }
    }

    /// Update pulse tuning without disturbing the current schedule.
    pub fn reconfigure(&mut self, every: [f32; 2], rise: f32, hold: f32, fall: f32, peak: f32) {
        self.every = every;
        self.rise = rise;
        self.hold = hold;
        self.fall = fall;
        self.peak = peak;
    }

    /// Elapsed time of the next scheduled pulse, in seconds.
    pub fn next_pulse_at(&self) -> f64 {
        self.next_at
    }

    /// Pull strength at elapsed time `t` seconds, given the envelope-scaled
    /// baseline. Redraws the next pulse time once a pulse has fully fallen.
    pub fn pull(&mut self, t: f64, baseline: f32, rng: &mut XorShift32) -> f32 {
        if t < self.next_at {
            return baseline;
        }
        let u = (t - self.next_at) as f32;
        let total = self.rise + self.hold + self.fall;
        if u < self.rise {
            baseline + (self.peak - baseline) * smoothstep(u / self.rise)
        } else if u < self.rise + self.hold {
            self.peak
        } else if u < total {
            let x = (u - self.rise - self.hold) / self.fall;
            baseline + (self.peak - baseline) * (1.0 - smoothstep(x))
        } else {
            self.next_at = t + rng.range(self.every[0], self.every[1]) as f64;
            baseline
        }
    }
}
