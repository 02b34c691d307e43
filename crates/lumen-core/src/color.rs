//! Colour values used by palettes and drawing surfaces.

use ratatui::style::Color;

/// An opaque 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Attach an opacity to this colour.
    pub const fn with_alpha(self, a: f32) -> Rgba {
        Rgba { rgb: self, a }
    }

    /// Linear interpolation towards `other`; `t` is clamped to 0.0-1.0.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    /// Channels as floats in 0.0-255.0.
    pub fn to_f32(self) -> [f32; 3] {
        [self.r as f32, self.g as f32, self.b as f32]
    }
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::Rgb(c.r, c.g, c.b)
    }
}

/// An RGB colour with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    pub rgb: Rgb,
    pub a: f32,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Rgba = Rgba {
        rgb: Rgb::new(0, 0, 0),
        a: 0.0,
    };

    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            rgb: Rgb::new(r, g, b),
            a,
        }
    }

    /// Same colour with its alpha multiplied by `factor`.
    pub fn scaled(self, factor: f32) -> Rgba {
        Rgba {
            rgb: self.rgb,
            a: (self.a * factor).clamp(0.0, 1.0),
        }
    }

    /// Interpolate colour and alpha towards `other`.
    ///
    /// A transparent endpoint keeps the other endpoint's colour so fading to
    /// transparent does not darken the way a naive lerp through black would.
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let rgb = if other.a == 0.0 {
            self.rgb
        } else if self.a == 0.0 {
            other.rgb
        } else {
            self.rgb.lerp(other.rgb, t)
        };
        Rgba {
            rgb,
            a: self.a + (other.a - self.a) * t,
        }
    }

    pub fn is_visible(self) -> bool {
        self.a > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_lerp_endpoints() {
        let a = Rgb::new(0, 0, 0);
        let b = Rgb::new(200, 100, 50);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Rgb::new(100, 50, 25));
        assert_eq!(a.lerp(b, 7.0), b);
    }

    #[test]
    fn test_rgba_lerp_to_transparent_keeps_hue() {
        let amber = Rgba::new(245, 158, 11, 0.9);
        let mid = amber.lerp(Rgba::TRANSPARENT, 0.5);
        assert_eq!(mid.rgb, amber.rgb);
        assert!((mid.a - 0.45).abs() < 1e-6);
    }

    #[test]
    fn test_scaled_clamps() {
        let c = Rgba::new(1, 2, 3, 0.8);
        assert_eq!(c.scaled(2.0).a, 1.0);
        assert_eq!(c.scaled(-1.0).a, 0.0);
        assert!(!c.scaled(0.0).is_visible());
    }

    #[test]
    fn test_into_ratatui_color() {
        let color: Color = Rgb::new(10, 6, 32).into();
        assert_eq!(color, Color::Rgb(10, 6, 32));
    }
}
