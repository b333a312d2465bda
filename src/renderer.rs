//! Frame orchestration and lifecycle.
//!
//! [`Renderer`] owns every piece of per-instance state (particles, spatial
//! grid, triangle cache, canvas, governor) and advances them once per call
//! to [`Renderer::frame`]. It is driven entirely by caller-supplied
//! millisecond timestamps: the windowed driver feeds it real time, tests
//! feed it synthetic time.
//!
//! Stage order per frame: particle step, spatial index rebuild, neighbor
//! lists, triangle accumulator, draw, load governor. A frame always runs
//! to completion; pause and teardown only gate whether the next frame
//! happens.

use crate::canvas::{Canvas, Hsla};
use crate::config::{BackgroundConfig, FieldSize, MIN_PARTICLES};
use crate::field::ParticleField;
use crate::governor::FpsGovernor;
use crate::mesh::{TriangleMesh, MIN_TRI_ALPHA};
use crate::motion::{harmony_envelope, SnapScheduler, BASELINE_PULL};
use crate::rng::XorShift32;
use crate::spatial::SpatialGrid;

/// Canvas clear color (near-black navy, the backdrop the page shows).
pub const CLEAR_COLOR: [u8; 4] = [6, 7, 12, 255];

/// Lifecycle state of a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    /// Constructed, no frame seen yet.
    Idle,
    /// Advancing every frame.
    Running,
    /// Page hidden; frames are skipped until resume.
    Paused,
    /// Reduced-motion preference active: terminal, renders nothing.
    Disabled,
}

pub struct Renderer {
    config: BackgroundConfig,
    state: RenderState,
    hue: f32,
    rng: XorShift32,
    size: FieldSize,
    field: ParticleField,
    grid: SpatialGrid,
    mesh: TriangleMesh,
    canvas: Canvas,
    governor: FpsGovernor,
    snap: SnapScheduler,
    neighbors: Vec<Vec<u32>>,
    start_ms: f64,
    last_ms: f64,
}

impl Renderer {
    /// Build a renderer for a viewport.
    ///
    /// `reduced_motion` is the platform preference, resolved by the caller;
    /// combined with `respect_reduced_motion` it puts the renderer into the
    /// terminal [`RenderState::Disabled`] state where no work is performed.
    pub fn new(config: BackgroundConfig, width: f32, height: f32, reduced_motion: bool) -> Self {
        let config = config.sanitized();
        let state = if config.respect_reduced_motion && reduced_motion {
            RenderState::Disabled
        } else {
            RenderState::Idle
        };

        let mut rng = XorShift32::new(config.seed);
        let size = FieldSize::compute(width, height, config.density, config.max_links_px);
        let mut field = ParticleField::new();
        if state != RenderState::Disabled {
            field.resize(&size, &mut rng);
        }
        let snap = SnapScheduler::new(
            config.snap_every,
            config.snap_rise,
            config.snap_hold,
            config.snap_fall,
            config.harmony_strength,
            &mut rng,
        );

        Self {
            hue: config.resolve_hue(None),
            state,
            rng,
            size,
            field,
            grid: SpatialGrid::new(),
            mesh: TriangleMesh::new(config.triangle_strength, config.tri_smoothing, config.fade_out),
            canvas: Canvas::new(size.width as u32, size.height as u32),
            governor: FpsGovernor::new(config.triangles, 0.0),
            snap,
            neighbors: Vec::new(),
            start_ms: 0.0,
            last_ms: 0.0,
            config,
        }
    }

    #[inline]
    pub fn state(&self) -> RenderState {
        self.state
    }

    #[inline]
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    #[inline]
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    #[inline]
    pub fn mesh(&self) -> &TriangleMesh {
        &self.mesh
    }

    #[inline]
    pub fn size(&self) -> FieldSize {
        self.size
    }

    #[inline]
    pub fn particle_count(&self) -> usize {
        self.field.len()
    }

    #[inline]
    pub fn shading_enabled(&self) -> bool {
        self.governor.shading_enabled()
    }

    #[inline]
    pub fn hue(&self) -> f32 {
        self.hue
    }

    /// Re-run field sizing for a new viewport. Valid while Running or
    /// Paused; does not reset the animation clock.
    pub fn resize(&mut self, width: f32, height: f32) {
        if self.state == RenderState::Disabled {
            return;
        }
        self.size = FieldSize::compute(width, height, self.config.density, self.config.max_links_px);
        self.field.resize(&self.size, &mut self.rng);
        self.canvas.resize(self.size.width as u32, self.size.height as u32);
    }

    /// Update tunables in place without tearing down buffers or resetting
    /// the clock.
    pub fn reconfigure(&mut self, config: BackgroundConfig) {
        let config = config.sanitized();
        self.hue = config.resolve_hue(None);
        self.mesh.reconfigure(config.triangle_strength, config.tri_smoothing, config.fade_out);
        self.governor.set_master(config.triangles);
        self.snap.reconfigure(
            config.snap_every,
            config.snap_rise,
            config.snap_hold,
            config.snap_fall,
            config.harmony_strength,
        );
        self.config = config;
        if self.state != RenderState::Disabled {
            // density or link overrides may have changed the sizing
            self.size = FieldSize::compute(
                self.size.width,
                self.size.height,
                self.config.density,
                self.config.max_links_px,
            );
            self.field.resize(&self.size, &mut self.rng);
        }
    }

    /// Stop advancing frames. Idempotent.
    pub fn pause(&mut self) {
        if self.state == RenderState::Running {
            self.state = RenderState::Paused;
        }
    }

    /// Resume after a pause, resetting the frame-delta baseline so the
    /// hidden interval does not appear as one giant delta. Idempotent.
    pub fn resume(&mut self, now_ms: f64) {
        if self.state == RenderState::Paused {
            self.state = RenderState::Running;
            self.last_ms = now_ms;
            self.governor.reset(now_ms);
        }
    }

    /// Advance one frame at the given timestamp.
    ///
    /// No-op while Paused or Disabled. The first call transitions
    /// Idle to Running and establishes the time baselines.
    pub fn frame(&mut self, now_ms: f64) {
        match self.state {
            RenderState::Disabled | RenderState::Paused => return,
            RenderState::Idle => {
                self.state = RenderState::Running;
                self.start_ms = now_ms;
                self.last_ms = now_ms;
                self.governor.reset(now_ms);
            }
            RenderState::Running => {}
        }

        let dt_ms = ((now_ms - self.last_ms).max(0.0) as f32).min(32.0);
        self.last_ms = now_ms;
        let elapsed = ((now_ms - self.start_ms) * 1e-3).max(0.0);
        // wrap phase time hourly so f32 trigonometry keeps its precision
        let t_osc = (elapsed % 3600.0) as f32;

        let env = harmony_envelope(elapsed);
        let pull = self.snap.pull(elapsed, BASELINE_PULL * env, &mut self.rng);
        self.field.step(t_osc, dt_ms, pull, env, self.config.poly_amp);

        let link2 = self.size.link_dist_sq();
        self.grid.build(
            self.field.screen_x(),
            self.field.screen_y(),
            self.size.width,
            self.size.height,
            self.size.cell_size,
        );
        let n = self.field.len();
        self.neighbors.resize_with(n, Vec::new);
        for i in 0..n {
            self.grid.neighbors(
                i,
                self.field.screen_x(),
                self.field.screen_y(),
                link2,
                &mut self.neighbors[i],
            );
        }

        if self.governor.shading_enabled() {
            let field = &self.field;
            self.mesh.update(&self.neighbors, |i, j| {
                field.closeness(i as usize, j as usize, link2)
            });
        } else {
            // keep decaying so stale triangles cannot pop back at full
            // opacity when shading is re-enabled
            self.mesh.decay_all();
        }

        self.draw(link2);

        if let Some(sample) = self.governor.on_frame(now_ms) {
            if sample.shrink && self.field.len() > MIN_PARTICLES {
                let target = (self.field.len() as f32 * 0.9).floor() as usize;
                self.field.truncate(target.max(MIN_PARTICLES));
            }
        }
    }

    fn draw(&mut self, link2: f32) {
        self.canvas.clear(CLEAR_COLOR);

        if self.governor.shading_enabled() {
            // faintest first, so brighter triangles layer on top
            for (key, alpha) in self.mesh.sorted_entries() {
                if alpha <= MIN_TRI_ALPHA {
                    continue;
                }
                let (i, j, k) = (key.0 as usize, key.1 as usize, key.2 as usize);
                if k >= self.field.len() {
                    continue; // cache may briefly reference truncated particles
                }
                let t = (self.field.closeness(i, j, link2)
                    + self.field.closeness(j, k, link2)
                    + self.field.closeness(k, i, link2))
                    / 3.0;
                let light = 45.0 + (1.0 - t) * 8.0;
                self.canvas.fill_triangle(
                    self.field.screen_pos(i),
                    self.field.screen_pos(j),
                    self.field.screen_pos(k),
                    Hsla::new(self.hue, 75.0, light, alpha),
                );
            }
        }

        // each edge once: only forward neighbors
        for i in 0..self.field.len() {
            for &j in &self.neighbors[i] {
                let j = j as usize;
                if j <= i {
                    continue;
                }
                let t = self.field.closeness(i, j, link2);
                self.canvas.stroke_line(
                    self.field.screen_pos(i),
                    self.field.screen_pos(j),
                    Hsla::new(self.hue, 70.0, 45.0, 0.10 + 0.28 * t),
                );
            }
        }

        let point_color = Hsla::new(self.hue, 70.0, 50.0, 0.75);
        for i in 0..self.field.len() {
            self.canvas.fill_circle(self.field.screen_pos(i), 1.6, point_color);
        }
    }
}
