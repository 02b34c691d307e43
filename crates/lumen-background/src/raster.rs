//! Persistent RGB pixel buffer the animation draws into.
//!
//! Pixels are kept as floats so repeated low-opacity fades converge smoothly
//! instead of stalling on 8-bit rounding. Two vertically stacked pixels make
//! one terminal cell when shown (see [`AnimatedBackground`]).
//!
//! [`AnimatedBackground`]: crate::AnimatedBackground

use std::f32::consts::PI;

use lumen_core::{Point, Rgb, Rgba, Viewport};

use crate::color::{blend, sample_gradient, to_rgb};
use crate::surface::{GradientStop, Surface};

/// Below this pixel radius a circle is drawn as a single partially covered
/// pixel.
const MIN_SHAPE_RADIUS: f32 = 0.75;

/// Upper bound on the pixels stepped along one line.
const MAX_LINE_STEPS: usize = 4096;

/// Drawing surface backed by a pixel grid.
#[derive(Debug, Clone)]
pub struct Raster {
    viewport: Viewport,
    /// Viewport units per pixel.
    scale: f32,
    width: usize,
    height: usize,
    pixels: Vec<[f32; 3]>,
}

impl Raster {
    /// Allocate a raster covering `viewport`, filled with `background`.
    pub fn new(viewport: Viewport, scale: f32, background: Rgb) -> Self {
        let scale = if scale > 0.0 { scale } else { 1.0 };
        let mut raster = Self {
            viewport: Viewport::default(),
            scale,
            width: 0,
            height: 0,
            pixels: Vec::new(),
        };
        raster.resize(viewport, background);
        raster
    }

    /// Viewport covered by a terminal area of `cols` x `rows` cells.
    pub fn viewport_for_cells(cols: u16, rows: u16, scale: f32) -> Viewport {
        Viewport::new(cols as f32 * scale, rows as f32 * 2.0 * scale)
    }

    /// Reallocate for a new viewport. Pixel contents are reset.
    pub fn resize(&mut self, viewport: Viewport, background: Rgb) {
        self.viewport = viewport;
        self.width = (viewport.width.max(0.0) / self.scale).ceil() as usize;
        self.height = (viewport.height.max(0.0) / self.scale).ceil() as usize;
        self.pixels = vec![background.to_f32(); self.width * self.height];
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        self.pixel_f32(x, y).map(to_rgb)
    }

    pub(crate) fn pixel_f32(&self, x: usize, y: usize) -> Option<[f32; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    fn to_pixels(&self, p: Point) -> (f32, f32) {
        (p.x / self.scale, p.y / self.scale)
    }

    fn blend_at(&mut self, x: i64, y: i64, color: Rgba) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        blend(&mut self.pixels[idx], color);
    }

    /// Fill the pixels whose centres lie within `radius` pixels of `center`
    /// with the colour `shade` picks for their normalized distance.
    fn fill_circle(&mut self, center: Point, radius: f32, shade: impl Fn(f32) -> Rgba) {
        let (cx, cy) = self.to_pixels(center);
        let r = radius / self.scale;
        if r.is_nan() || r <= 0.0 {
            return;
        }
        if r < MIN_SHAPE_RADIUS {
            let coverage = (PI * r * r).min(1.0);
            self.blend_at(cx.floor() as i64, cy.floor() as i64, shade(0.0).scaled(coverage));
            return;
        }

        let (x0, x1) = ((cx - r).floor() as i64, (cx + r).ceil() as i64);
        let (y0, y1) = ((cy - r).floor() as i64, (cy + r).ceil() as i64);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                let d = (dx * dx + dy * dy).sqrt();
                if d <= r {
                    self.blend_at(x, y, shade(d / r));
                }
            }
        }
    }
}

impl Surface for Raster {
    fn fade(&mut self, color: Rgb, alpha: f32) {
        let src = color.with_alpha(alpha);
        for px in &mut self.pixels {
            blend(px, src);
        }
    }

    fn line(&mut self, from: Point, to: Point, color: Rgba) {
        let (x0, y0) = self.to_pixels(from);
        let (x1, y1) = self.to_pixels(to);
        let span = (x1 - x0).abs().max((y1 - y0).abs());
        if !span.is_finite() {
            return;
        }
        let steps = (span.ceil() as usize).clamp(1, MAX_LINE_STEPS);

        let mut last = None;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = (x0 + (x1 - x0) * t).floor() as i64;
            let y = (y0 + (y1 - y0) * t).floor() as i64;
            if last != Some((x, y)) {
                self.blend_at(x, y, color);
                last = Some((x, y));
            }
        }
    }

    fn radial_glow(&mut self, center: Point, radius: f32, stops: &[GradientStop]) {
        self.fill_circle(center, radius, |t| sample_gradient(stops, t));
    }

    fn disc(&mut self, center: Point, radius: f32, color: Rgba) {
        self.fill_circle(center, radius, |_| color);
    }
}
