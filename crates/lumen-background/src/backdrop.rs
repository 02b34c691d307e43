//! The full animated backdrop: theme gradient, animation layer, overlays.
//!
//! Each terminal cell shows two vertically stacked pixels, the upper one as
//! the foreground of a `▀` glyph and the lower one as its background.

use lumen_core::{Palette, Rgb, Theme};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::color::{blend, composite, linear_gradient, to_color, to_rgb};
use crate::raster::Raster;

/// Colour of the diagonal theme gradient at normalized position (`u`, `v`).
pub(crate) fn gradient_at(palette: &Palette, u: f32, v: f32) -> Rgb {
    linear_gradient(&palette.gradient, (u + v) / 2.0)
}

/// Elliptical distance from (`cx`, `cy`) with radii `rx` and `ry`.
fn ellipse_distance(u: f32, v: f32, (cx, cy): (f32, f32), (rx, ry): (f32, f32)) -> f32 {
    ((u - cx) / rx).hypot((v - cy) / ry)
}

/// A drawn [`Raster`] blended over the theme gradient.
#[derive(Debug, Clone, Copy)]
pub struct AnimatedBackground<'a> {
    raster: &'a Raster,
    theme: Theme,
}

impl<'a> AnimatedBackground<'a> {
    pub fn new(raster: &'a Raster, theme: Theme) -> Self {
        Self { raster, theme }
    }

    /// Final colour of raster pixel (`x`, `y`).
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        self.compose(x, y).map(to_rgb)
    }

    fn compose(&self, x: usize, y: usize) -> Option<[f32; 3]> {
        let layer = self.raster.pixel_f32(x, y)?;
        let palette = self.theme.palette();
        let u = (x as f32 + 0.5) / self.raster.width() as f32;
        let v = (y as f32 + 0.5) / self.raster.height() as f32;

        let base = gradient_at(palette, u, v).to_f32();
        let mut px = composite(palette.blend, base, layer);

        let highlight = ellipse_distance(u, v, (0.5, -0.1), (0.8, 0.5));
        blend(&mut px, palette.highlight.scaled((1.0 - highlight).max(0.0)));

        // clear inside 40% of the half-extent
        let edge = ellipse_distance(u, v, (0.5, 0.5), (1.0, 1.0));
        blend(&mut px, palette.vignette.scaled((edge - 0.4) / 0.6));
        Some(px)
    }
}

impl Widget for AnimatedBackground<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for row in 0..area.height {
            for col in 0..area.width {
                let x = col as usize;
                let top = 2 * row as usize;
                let Some(upper) = self.compose(x, top) else {
                    continue;
                };
                let lower = self.compose(x, top + 1).unwrap_or(upper);
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_char('▀')
                        .set_fg(to_color(upper))
                        .set_bg(to_color(lower));
                }
            }
        }
    }
}
