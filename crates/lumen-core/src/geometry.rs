//! Points, viewport dimensions and pointer state.

/// A position in viewport units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Point at fraction `t` along the straight line to `other`.
    pub fn lerp(self, other: Point, t: f32) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

/// Dimensions of the drawing area in viewport units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether there is anything to draw on.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Cursor position normalized to the viewport, both axes in 0.0-1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
}

impl Default for Pointer {
    /// The centre, where the pointer exerts no displacement.
    fn default() -> Self {
        Self { x: 0.5, y: 0.5 }
    }
}

impl Pointer {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: x.clamp(0.0, 1.0),
            y: y.clamp(0.0, 1.0),
        }
    }

    /// Normalize an absolute position against the viewport.
    pub fn from_position(position: Point, viewport: Viewport) -> Self {
        if viewport.is_empty() {
            return Self::default();
        }
        Self::new(position.x / viewport.width, position.y / viewport.height)
    }
}
