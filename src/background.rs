//! Background builder and runner.

use crate::config::{accent_hue, BackgroundConfig};
use crate::error::BackgroundError;
use crate::renderer::Renderer;
use crate::window::App;
use winit::event_loop::{ControlFlow, EventLoop};

/// An animated background builder.
///
/// Use method chaining to configure, then either call `.run()` to open a
/// window, or `.build(width, height)` to drive the [`Renderer`] yourself.
///
/// ```no_run
/// use driftmesh::Background;
///
/// Background::new()
///     .with_density(0.8)
///     .with_accent_css("hsl(38 92% 50%)")
///     .run()
///     .unwrap();
/// ```
pub struct Background {
    config: BackgroundConfig,
    reduced_motion: bool,
    title: String,
}

impl Background {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self {
            config: BackgroundConfig::default(),
            reduced_motion: false,
            title: "driftmesh".to_string(),
        }
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Scale the viewport-derived particle count.
    pub fn with_density(mut self, density: f32) -> Self {
        self.config.density = density;
        self
    }

    /// Override the accent hue in degrees.
    pub fn with_hue(mut self, hue: f32) -> Self {
        self.config.hue = Some(hue);
        self
    }

    /// Take the accent hue from a CSS-style `hsl(...)` value, e.g. a
    /// resolved theme variable. Unparseable values leave the hue untouched.
    pub fn with_accent_css(mut self, value: &str) -> Self {
        if let Some(hue) = accent_hue(value) {
            self.config.hue = Some(hue);
        }
        self
    }

    /// Seed the deterministic generator. Two backgrounds with the same seed
    /// and viewport animate identically.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.config.seed = seed;
        self
    }

    /// Master switch for triangle shading.
    pub fn with_triangles(mut self, on: bool) -> Self {
        self.config.triangles = on;
        self
    }

    /// Intensity of triangle fills, `0..=1`.
    pub fn with_triangle_strength(mut self, strength: f32) -> Self {
        self.config.triangle_strength = strength;
        self
    }

    /// EMA factor for triangle opacity smoothing, `0..=1`.
    pub fn with_tri_smoothing(mut self, smoothing: f32) -> Self {
        self.config.tri_smoothing = smoothing;
        self
    }

    /// Per-frame decay for triangles that lost their geometry, `0..=1`.
    pub fn with_fade_out(mut self, fade_out: f32) -> Self {
        self.config.fade_out = fade_out;
        self
    }

    /// Fix the link distance instead of deriving it from the viewport.
    pub fn with_max_links_px(mut self, dist: f32) -> Self {
        self.config.max_links_px = Some(dist);
        self
    }

    /// Amplitude of the sinusoidal offsets in pixels.
    pub fn with_poly_amp(mut self, amp: f32) -> Self {
        self.config.poly_amp = amp;
        self
    }

    /// Lattice pull strength at a snap pulse peak.
    pub fn with_harmony_strength(mut self, strength: f32) -> Self {
        self.config.harmony_strength = strength;
        self
    }

    /// Seconds between snap pulses, drawn uniformly from `[min, max]`.
    pub fn with_snap_every(mut self, min: f32, max: f32) -> Self {
        self.config.snap_every = [min, max];
        self
    }

    /// Shape of a snap pulse: seconds to rise, hold and fall.
    pub fn with_snap_envelope(mut self, rise: f32, hold: f32, fall: f32) -> Self {
        self.config.snap_rise = rise;
        self.config.snap_hold = hold;
        self.config.snap_fall = fall;
        self
    }

    /// Whether a platform reduced-motion preference disables the animation.
    pub fn respect_reduced_motion(mut self, respect: bool) -> Self {
        self.config.respect_reduced_motion = respect;
        self
    }

    /// Declare the platform reduced-motion preference. The renderer never
    /// queries the system itself.
    pub fn reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = reduced;
        self
    }

    /// Build a headless renderer for the given viewport, e.g. to drive it
    /// with your own clock or to export frames.
    pub fn build(self, width: f32, height: f32) -> Renderer {
        Renderer::new(self.config, width, height, self.reduced_motion)
    }

    /// Open a window and animate until it is closed.
    pub fn run(self) -> Result<(), BackgroundError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);
        let mut app = App::new(self.config, self.reduced_motion, self.title);
        event_loop.run_app(&mut app)?;
        Ok(())
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::new()
    }
}
