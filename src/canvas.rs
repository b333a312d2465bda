//! Software canvas: an RGBA8 pixel buffer with the handful of primitives
//! the renderer needs (filled triangles, 1 px lines, small discs).
//!
//! Drawing composites src-over onto an opaque background, so the finished
//! frame can be uploaded to the GPU as-is. Colors are specified in HSL with
//! an alpha, matching the fixed-hue color model of the renderer.

use glam::Vec2;
use std::path::Path;

use crate::error::SnapshotError;

/// HSL color with alpha. Hue in degrees, saturation/lightness in percent,
/// alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    pub h: f32,
    pub s: f32,
    pub l: f32,
    pub a: f32,
}

impl Hsla {
    pub const fn new(h: f32, s: f32, l: f32, a: f32) -> Self {
        Self { h, s, l, a }
    }

    /// Convert to linear-ish RGB in `[0, 1]` (standard HSL conversion).
    pub fn to_rgb(self) -> [f32; 3] {
        let h = self.h.rem_euclid(360.0);
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let l = (self.l / 100.0).clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let hp = h / 60.0;
        let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
        let (r1, g1, b1) = match hp as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        [r1 + m, g1 + m, b1 + m]
    }
}

pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            pixels: vec![[0, 0, 0, 255]; (width * height) as usize],
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        let width = width.max(1);
        let height = height.max(1);
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize((width * height) as usize, [0, 0, 0, 255]);
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw pixel bytes, row-major RGBA8. Suitable for a texture upload.
    pub fn data(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn clear(&mut self, color: [u8; 4]) {
        self.pixels.fill(color);
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels[(y * self.width + x) as usize]
    }

    #[inline]
    fn blend(&mut self, x: i64, y: i64, rgb: [f32; 3], alpha: f32) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let a = alpha.clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        let px = &mut self.pixels[(y as u32 * self.width + x as u32) as usize];
        for c in 0..3 {
            let src = rgb[c].clamp(0.0, 1.0) * 255.0;
            let dst = px[c] as f32;
            px[c] = (src * a + dst * (1.0 - a)).round() as u8;
        }
        px[3] = 255;
    }

    /// Fill a triangle, blending `color` over the existing pixels.
    pub fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Hsla) {
        let area = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
        if !area.is_finite() || area.abs() < 1e-6 {
            return;
        }

        let min_x = a.x.min(b.x).min(c.x).floor().max(0.0) as i64;
        let max_x = (a.x.max(b.x).max(c.x).ceil() as i64).min(self.width as i64 - 1);
        let min_y = a.y.min(b.y).min(c.y).floor().max(0.0) as i64;
        let max_y = (a.y.max(b.y).max(c.y).ceil() as i64).min(self.height as i64 - 1);

        let rgb = color.to_rgb();
        let sign = area.signum();
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let w0 = ((b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)) * sign;
                let w1 = ((c.x - b.x) * (p.y - b.y) - (c.y - b.y) * (p.x - b.x)) * sign;
                let w2 = ((a.x - c.x) * (p.y - c.y) - (a.y - c.y) * (p.x - c.x)) * sign;
                if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                    self.blend(x, y, rgb, color.a);
                }
            }
        }
    }

    /// Draw a 1 px line from `a` to `b` (Bresenham).
    pub fn stroke_line(&mut self, a: Vec2, b: Vec2, color: Hsla) {
        if !a.is_finite() || !b.is_finite() {
            return;
        }
        let rgb = color.to_rgb();
        let mut x0 = a.x.round() as i64;
        let mut y0 = a.y.round() as i64;
        let x1 = b.x.round() as i64;
        let y1 = b.y.round() as i64;

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.blend(x0, y0, rgb, color.a);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Fill a small disc centered at `center`.
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Hsla) {
        if !center.is_finite() || radius <= 0.0 {
            return;
        }
        let rgb = color.to_rgb();
        let r2 = radius * radius;
        let min_x = (center.x - radius).floor() as i64;
        let max_x = (center.x + radius).ceil() as i64;
        let min_y = (center.y - radius).floor() as i64;
        let max_y = (center.y + radius).ceil() as i64;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f32 + 0.5 - center.x;
                let dy = y as f32 + 0.5 - center.y;
                if dx * dx + dy * dy <= r2 {
                    self.blend(x, y, rgb, color.a);
                }
            }
        }
    }

    /// Write the current frame as a PNG.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), SnapshotError> {
        image::save_buffer(
            path,
            self.data(),
            self.width,
            self.height,
            image::ExtendedColorType::Rgba8,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsl_primaries() {
        let red = Hsla::new(0.0, 100.0, 50.0, 1.0).to_rgb();
        assert!((red[0] - 1.0).abs() < 1e-5 && red[1] < 1e-5 && red[2] < 1e-5);

        let white = Hsla::new(120.0, 50.0, 100.0, 1.0).to_rgb();
        assert!(white.iter().all(|&c| (c - 1.0).abs() < 1e-5));

        let gray = Hsla::new(200.0, 0.0, 50.0, 1.0).to_rgb();
        assert!(gray.iter().all(|&c| (c - 0.5).abs() < 1e-5));
    }

    #[test]
    fn test_clear_and_dimensions() {
        let mut canvas = Canvas::new(4, 3);
        canvas.clear([10, 20, 30, 255]);
        assert_eq!(canvas.data().len(), 4 * 3 * 4);
        assert_eq!(canvas.pixel(3, 2), [10, 20, 30, 255]);
    }

    #[test]
    fn test_zero_size_clamped() {
        let canvas = Canvas::new(0, 0);
        assert_eq!(canvas.width(), 1);
        assert_eq!(canvas.height(), 1);
    }

    #[test]
    fn test_triangle_covers_center() {
        let mut canvas = Canvas::new(20, 20);
        canvas.clear([0, 0, 0, 255]);
        canvas.fill_triangle(
            Vec2::new(2.0, 2.0),
            Vec2::new(18.0, 2.0),
            Vec2::new(10.0, 18.0),
            Hsla::new(0.0, 100.0, 50.0, 1.0),
        );
        assert_eq!(canvas.pixel(10, 6)[0], 255);
        // corner outside the triangle is untouched
        assert_eq!(canvas.pixel(0, 19), [0, 0, 0, 255]);
    }

    #[test]
    fn test_triangle_winding_independent() {
        let a = Vec2::new(2.0, 2.0);
        let b = Vec2::new(18.0, 2.0);
        let c = Vec2::new(10.0, 18.0);
        let color = Hsla::new(0.0, 100.0, 50.0, 1.0);

        let mut cw = Canvas::new(20, 20);
        let mut ccw = Canvas::new(20, 20);
        cw.fill_triangle(a, b, c, color);
        ccw.fill_triangle(c, b, a, color);
        assert_eq!(cw.data(), ccw.data());
    }

    #[test]
    fn test_alpha_blend_half() {
        let mut canvas = Canvas::new(2, 1);
        canvas.clear([0, 0, 0, 255]);
        canvas.fill_circle(Vec2::new(0.5, 0.5), 0.6, Hsla::new(0.0, 100.0, 100.0, 0.5));
        let px = canvas.pixel(0, 0);
        assert!((px[0] as i32 - 128).abs() <= 1);
    }

    #[test]
    fn test_line_endpoints() {
        let mut canvas = Canvas::new(10, 10);
        canvas.clear([0, 0, 0, 255]);
        canvas.stroke_line(
            Vec2::new(1.0, 1.0),
            Vec2::new(8.0, 8.0),
            Hsla::new(0.0, 0.0, 100.0, 1.0),
        );
        assert_eq!(canvas.pixel(1, 1)[0], 255);
        assert_eq!(canvas.pixel(8, 8)[0], 255);
    }

    #[test]
    fn test_out_of_bounds_draws_are_clipped() {
        let mut canvas = Canvas::new(8, 8);
        canvas.clear([0, 0, 0, 255]);
        canvas.fill_circle(Vec2::new(-50.0, -50.0), 3.0, Hsla::new(0.0, 100.0, 50.0, 1.0));
        canvas.stroke_line(
            Vec2::new(-20.0, 4.0),
            Vec2::new(30.0, 4.0),
            Hsla::new(0.0, 100.0, 50.0, 1.0),
        );
        // horizontal line crosses the canvas; circle never touches it
        assert!(canvas.pixel(4, 4)[0] > 0);
        assert_eq!(canvas.pixel(0, 0)[0], canvas.pixel(7, 7)[0]);
    }

    #[test]
    fn test_save_png_roundtrip() {
        let mut canvas = Canvas::new(16, 16);
        canvas.clear([5, 6, 12, 255]);
        let path = std::env::temp_dir().join("driftmesh_canvas_test.png");
        canvas.save_png(&path).unwrap();
        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (16, 16));
        assert_eq!(img.get_pixel(0, 0).0, [5, 6, 12, 255]);
        let _ = std::fs::remove_file(&path);
    }
}
