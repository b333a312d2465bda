//! Particle field: flat position/velocity/phase buffers and the per-frame
//! state update.
//!
//! Layout is struct-of-arrays so the hot loops touch contiguous memory.
//! Every buffer is owned exclusively by one renderer instance.

use glam::Vec2;

use crate::config::FieldSize;
use crate::motion::{hex_target, lattice_step, wrap_angle, OMEGA1, OMEGA2, OMEGA3, TAU};
use crate::rng::XorShift32;

/// Screen positions may overshoot the viewport by this many pixels.
pub const VIEW_PAD: f32 = 64.0;

/// Base-position drift scale per millisecond.
const DRIFT_SCALE: f32 = 0.05;

pub struct ParticleField {
    width: f32,
    height: f32,
    // base position (slow drift)
    bx: Vec<f32>,
    by: Vec<f32>,
    // drift velocity
    vx: Vec<f32>,
    vy: Vec<f32>,
    // screen position (base + oscillator + lattice pull)
    sx: Vec<f32>,
    sy: Vec<f32>,
    // per-particle oscillator phases
    p1: Vec<f32>,
    p2: Vec<f32>,
    p3: Vec<f32>,
}

impl ParticleField {
    pub fn new() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            bx: Vec::new(),
            by: Vec::new(),
            vx: Vec::new(),
            vy: Vec::new(),
            sx: Vec::new(),
            sy: Vec::new(),
            p1: Vec::new(),
            p2: Vec::new(),
            p3: Vec::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bx.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bx.is_empty()
    }

    /// Resize the field to a new viewport and target count.
    ///
    /// Existing particles are retained; shrinking truncates from the tail
    /// and growing appends freshly seeded particles, so a resize does not
    /// visually reshuffle the surviving points.
    pub fn resize(&mut self, size: &FieldSize, rng: &mut XorShift32) {
        self.width = size.width;
        self.height = size.height;

        if self.len() > size.count {
            self.truncate(size.count);
        }
        // survivors of a shrinking viewport may sit outside the new bounds,
        // where edge reflection would trap them oscillating in place
        for i in 0..self.len() {
            self.bx[i] = self.bx[i].clamp(0.0, self.width);
            self.by[i] = self.by[i].clamp(0.0, self.height);
        }
        while self.len() < size.count {
            let bx = rng.range(0.0, self.width);
            let by = rng.range(0.0, self.height);
            self.bx.push(bx);
            self.by.push(by);
            self.vx.push(rng.range(-0.05, 0.05));
            self.vy.push(rng.range(-0.05, 0.05));
            self.sx.push(bx);
            self.sy.push(by);
            self.p1.push(rng.range(0.0, TAU));
            self.p2.push(rng.range(0.0, TAU));
            self.p3.push(rng.range(0.0, TAU));
        }
    }

    /// Drop particles from the tail down to `count`. Used by the load
    /// governor; never grows.
    pub fn truncate(&mut self, count: usize) {
        if count >= self.len() {
            return;
        }
        self.bx.truncate(count);
        self.by.truncate(count);
        self.vx.truncate(count);
        self.vy.truncate(count);
        self.sx.truncate(count);
        self.sy.truncate(count);
        self.p1.truncate(count);
        self.p2.truncate(count);
        self.p3.truncate(count);
    }

    /// Advance one frame.
    ///
    /// `t_osc` is wrapped simulation time in seconds (phase source for the
    /// oscillators), `dt_ms` the clamped frame delta, `pull` the current
    /// lattice pull strength and `env` the harmony envelope value.
    pub fn step(&mut self, t_osc: f32, dt_ms: f32, pull: f32, env: f32, poly_amp: f32) {
        let dt = dt_ms.clamp(0.0, 32.0);
        let amp = poly_amp * (0.6 + 0.4 * env);
        let g_step = lattice_step(self.width, self.height);

        for i in 0..self.len() {
            // slow independent drift, reflected at the viewport edges
            self.bx[i] += self.vx[i] * dt * DRIFT_SCALE;
            self.by[i] += self.vy[i] * dt * DRIFT_SCALE;
            if self.bx[i] < 0.0 || self.bx[i] > self.width {
                self.vx[i] = -self.vx[i];
            }
            if self.by[i] < 0.0 || self.by[i] > self.height {
                self.vy[i] = -self.vy[i];
            }

            // polyrhythmic offsets; angles stay wrapped for precision.
            // x and y use different phase multipliers so the axes decorrelate
            let a1 = wrap_angle(OMEGA1 * t_osc + self.p1[i]);
            let a2 = wrap_angle(OMEGA2 * t_osc + self.p2[i]);
            let a3 = wrap_angle(OMEGA3 * t_osc + self.p3[i]);

            let ox = amp
                * (a1.sin() + 0.6 * a2.sin() + 0.4 * wrap_angle(a3 + self.bx[i] * 0.002).sin());
            let oy = amp
                * (wrap_angle(a1 * 1.07).cos()
                    + 0.6 * wrap_angle(a2 * 1.13 + self.by[i] * 0.002).cos()
                    + 0.4 * a3.cos());

            // pull toward the nearest hex lattice site
            let base = Vec2::new(self.bx[i], self.by[i]);
            let target = hex_target(base, g_step);
            let gx = (target.x - base.x) * pull;
            let gy = (target.y - base.y) * pull;

            let sx = (base.x + ox + gx).clamp(-VIEW_PAD, self.width + VIEW_PAD);
            let sy = (base.y + oy + gy).clamp(-VIEW_PAD, self.height + VIEW_PAD);

            // numerical-stability guard: fall back to the base position
            if sx.is_finite() && sy.is_finite() {
                self.sx[i] = sx;
                self.sy[i] = sy;
            } else {
                self.sx[i] = base.x;
                self.sy[i] = base.y;
            }
        }
    }

    #[inline]
    pub fn screen_x(&self) -> &[f32] {
        &self.sx
    }

    #[inline]
    pub fn screen_y(&self) -> &[f32] {
        &self.sy
    }

    #[inline]
    pub fn screen_pos(&self, i: usize) -> Vec2 {
        Vec2::new(self.sx[i], self.sy[i])
    }

    #[inline]
    pub fn base_pos(&self, i: usize) -> Vec2 {
        Vec2::new(self.bx[i], self.by[i])
    }

    #[inline]
    pub fn velocity(&self, i: usize) -> Vec2 {
        Vec2::new(self.vx[i], self.vy[i])
    }

    /// Closeness of two particles: 1 coincident, 0 at the link threshold,
    /// negative beyond it.
    #[inline]
    pub fn closeness(&self, i: usize, j: usize, link_dist_sq: f32) -> f32 {
        let dx = self.sx[i] - self.sx[j];
        let dy = self.sy[i] - self.sy[j];
        1.0 - (dx * dx + dy * dy) / link_dist_sq
    }

    #[cfg(test)]
    pub(crate) fn set_particle(&mut self, i: usize, base: Vec2, vel: Vec2) {
        self.bx[i] = base.x;
        self.by[i] = base.y;
        self.vx[i] = vel.x;
        self.vy[i] = vel.y;
        self.sx[i] = base.x;
        self.sy[i] = base.y;
    }
}

impl Default for ParticleField {
    fn default() -> Self {
        Self::new()
    }
}
