//! Renderer configuration and viewport-derived sizing.
//!
//! All tunables live in one [`BackgroundConfig`] consumed at construction;
//! the renderer never re-reads ambient state after that. The accent hue is
//! resolved by the caller, optionally through [`accent_hue`] which parses a
//! CSS-style `hsl(...)` value.

use crate::rng::DEFAULT_SEED;

/// Hue used when no override is given and the theme value cannot be parsed.
pub const FALLBACK_HUE: f32 = 38.0;

/// Smallest particle count the field will ever hold.
pub const MIN_PARTICLES: usize = 36;
/// Largest particle count regardless of viewport area.
pub const MAX_PARTICLES: usize = 180;

/// Configuration for a background renderer.
///
/// Defaults match the tuning of the production animation; every field can be
/// overridden through the [`Background`](crate::background::Background)
/// builder.
#[derive(Debug, Clone)]
pub struct BackgroundConfig {
    /// Linear multiplier on the viewport-derived particle count.
    pub density: f32,
    /// Accent hue override in degrees. `None` means the caller-resolved
    /// theme hue (or [`FALLBACK_HUE`]) is used.
    pub hue: Option<f32>,
    /// Seed for the deterministic generator.
    pub seed: u32,
    /// Honor the platform reduced-motion preference.
    pub respect_reduced_motion: bool,
    /// Master switch for triangle shading.
    pub triangles: bool,
    /// Overall intensity of triangle fills, `[0, 1]`.
    pub triangle_strength: f32,
    /// EMA factor for triangle alpha, `[0, 1]`.
    pub tri_smoothing: f32,
    /// Per-frame geometric decay for triangles no longer present, `[0, 1]`.
    pub fade_out: f32,
    /// Fixed link-distance override in pixels; adaptive when `None`.
    pub max_links_px: Option<f32>,
    /// Amplitude of the sinusoidal offsets in pixels.
    pub poly_amp: f32,
    /// Lattice pull strength at a snap pulse peak.
    pub harmony_strength: f32,
    /// `[min, max]` seconds between snap pulses.
    pub snap_every: [f32; 2],
    /// Seconds to rise into a snap pulse.
    pub snap_rise: f32,
    /// Seconds to hold the pulse peak.
    pub snap_hold: f32,
    /// Seconds to release from the pulse.
    pub snap_fall: f32,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            density: 1.0,
            hue: None,
            seed: DEFAULT_SEED,
            respect_reduced_motion: true,
            triangles: true,
            triangle_strength: 0.8,
            tri_smoothing: 0.12,
            fade_out: 0.08,
            max_links_px: None,
            poly_amp: 12.0,
            harmony_strength: 0.18,
            snap_every: [25.0, 60.0],
            snap_rise: 3.0,
            snap_hold: 4.0,
            snap_fall: 5.0,
        }
    }
}

impl BackgroundConfig {
    /// Clamp every tunable into its valid range.
    pub fn sanitized(mut self) -> Self {
        self.density = self.density.max(0.0);
        self.triangle_strength = self.triangle_strength.clamp(0.0, 1.0);
        self.tri_smoothing = self.tri_smoothing.clamp(0.0, 1.0);
        self.fade_out = self.fade_out.clamp(0.0, 1.0);
        self.harmony_strength = self.harmony_strength.clamp(0.0, 1.0);
        self.poly_amp = self.poly_amp.max(0.0);
        // envelope phases must have nonzero length for the smoothstep ramps
        self.snap_rise = self.snap_rise.max(0.01);
        self.snap_hold = self.snap_hold.max(0.0);
        self.snap_fall = self.snap_fall.max(0.01);
        if self.snap_every[1] < self.snap_every[0] {
            self.snap_every.swap(0, 1);
        }
        self.snap_every[0] = self.snap_every[0].max(1.0);
        self.snap_every[1] = self.snap_every[1].max(self.snap_every[0]);
        if let Some(d) = self.max_links_px {
            self.max_links_px = Some(d.max(1.0));
        }
        self
    }

    /// Hue to render with, given the caller-resolved theme hue (if any).
    pub fn resolve_hue(&self, theme_hue: Option<f32>) -> f32 {
        self.hue.or(theme_hue).unwrap_or(FALLBACK_HUE)
    }
}

/// Parse the hue out of a CSS-style accent value such as
/// `hsl(38 92% 50%)` or `hsl(210, 40%, 60%)`.
///
/// Callers resolve their theme variable and hand the string here; the
/// renderer itself never inspects global theme state.
pub fn accent_hue(value: &str) -> Option<f32> {
    let rest = value.trim().strip_prefix("hsl")?.trim_start();
    let rest = rest.strip_prefix('(')?;
    let digits: String = rest
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Viewport-derived field dimensions.
///
/// Recomputed on every resize; particle count, link distance and grid cell
/// size all follow the viewport area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSize {
    /// Viewport width in pixels, at least 1.
    pub width: f32,
    /// Viewport height in pixels, at least 1.
    pub height: f32,
    /// Target particle count.
    pub count: usize,
    /// Link-distance threshold in pixels.
    pub link_dist: f32,
    /// Spatial grid cell size in pixels.
    pub cell_size: f32,
}

impl FieldSize {
    /// Compute sizing for a viewport. Zero or negative dimensions are
    /// clamped to 1 so grid sizing never divides by zero.
    pub fn compute(width: f32, height: f32, density: f32, max_links_px: Option<f32>) -> Self {
        let width = if width.is_finite() { width.max(1.0) } else { 1.0 };
        let height = if height.is_finite() { height.max(1.0) } else { 1.0 };
        let area = width * height;

        let count = ((area / 12_000.0 * density).round() as i64)
            .clamp(MIN_PARTICLES as i64, MAX_PARTICLES as i64) as usize;

        let link_dist = max_links_px.unwrap_or_else(|| (area.sqrt() / 18.0).clamp(80.0, 140.0));
        let cell_size = link_dist.floor().max(24.0);

        Self {
            width,
            height,
            count,
            link_dist,
            cell_size,
        }
    }

    /// Squared link distance, the threshold used by neighbor queries.
    #[inline]
    pub fn link_dist_sq(&self) -> f32 {
        self.link_dist * self.link_dist
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let cfg = BackgroundConfig::default().sanitized();
        assert_eq!(cfg.density, 1.0);
        assert!(cfg.triangles);
        assert_eq!(cfg.snap_every, [25.0, 60.0]);
    }

    #[test]
    fn test_sanitize_clamps_factors() {
        let cfg = BackgroundConfig {
            tri_smoothing: 3.0,
            fade_out: -1.0,
            snap_every: [60.0, 25.0],
            ..Default::default()
        }
        .sanitized();
        assert_eq!(cfg.tri_smoothing, 1.0);
        assert_eq!(cfg.fade_out, 0.0);
        assert_eq!(cfg.snap_every, [25.0, 60.0]);
    }

    #[test]
    fn test_accent_hue_parses_modern_syntax() {
        assert_eq!(accent_hue("hsl(38 92% 50%)"), Some(38.0));
        assert_eq!(accent_hue("  hsl(210, 40%, 60%)"), Some(210.0));
        assert_eq!(accent_hue("hsl(12.5 10% 10%)"), Some(12.5));
    }

    #[test]
    fn test_accent_hue_rejects_garbage() {
        assert_eq!(accent_hue(""), None);
        assert_eq!(accent_hue("rgb(1 2 3)"), None);
        assert_eq!(accent_hue("hsl()"), None);
    }

    #[test]
    fn test_resolve_hue_precedence() {
        let mut cfg = BackgroundConfig::default();
        assert_eq!(cfg.resolve_hue(None), FALLBACK_HUE);
        assert_eq!(cfg.resolve_hue(Some(200.0)), 200.0);
        cfg.hue = Some(120.0);
        assert_eq!(cfg.resolve_hue(Some(200.0)), 120.0);
    }

    #[test]
    fn test_field_size_reference_viewport() {
        // 1200x800 at density 1: area/12000 = 80 particles, sqrt(area)/18
        // is ~54.4 which clamps up to the 80 px link floor.
        let size = FieldSize::compute(1200.0, 800.0, 1.0, None);
        assert_eq!(size.count, 80);
        assert_eq!(size.link_dist, 80.0);
        assert_eq!(size.cell_size, 80.0);
    }

    #[test]
    fn test_field_size_bounds() {
        let tiny = FieldSize::compute(100.0, 100.0, 1.0, None);
        assert_eq!(tiny.count, MIN_PARTICLES);
        assert_eq!(tiny.link_dist, 80.0);

        let huge = FieldSize::compute(4000.0, 3000.0, 1.0, None);
        assert_eq!(huge.count, MAX_PARTICLES);
        assert_eq!(huge.link_dist, 140.0);
    }

    #[test]
    fn test_field_size_zero_viewport_clamped() {
        let size = FieldSize::compute(0.0, -5.0, 1.0, None);
        assert_eq!(size.width, 1.0);
        assert_eq!(size.height, 1.0);
        assert!(size.cell_size >= 24.0);
    }

    #[test]
    fn test_field_size_link_override() {
        let size = FieldSize::compute(1200.0, 800.0, 1.0, Some(100.0));
        assert_eq!(size.link_dist, 100.0);
        assert_eq!(size.cell_size, 100.0);
    }
}
