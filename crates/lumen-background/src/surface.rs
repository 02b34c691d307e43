//! Drawing target abstraction.

use lumen_core::{Point, Rgb, Rgba};

/// A colour stop of a radial gradient; `offset` runs from the centre (0.0)
/// to the rim (1.0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Rgba,
}

impl GradientStop {
    pub const fn new(offset: f32, color: Rgba) -> Self {
        Self { offset, color }
    }
}

/// Something the animator can paint on. Coordinates are viewport units.
pub trait Surface {
    /// Composite `color` at `alpha` over the whole surface.
    fn fade(&mut self, color: Rgb, alpha: f32);

    /// Stroke a one-unit line.
    fn line(&mut self, from: Point, to: Point, color: Rgba);

    /// Fill a circle with a radial gradient.
    fn radial_glow(&mut self, center: Point, radius: f32, stops: &[GradientStop]);

    /// Fill a solid circle.
    fn disc(&mut self, center: Point, radius: f32, color: Rgba);
}
