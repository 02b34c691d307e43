//! Colour helpers for gradients and alpha compositing.

use lumen_core::{BlendMode, Rgb, Rgba};
use ratatui::style::Color;

use crate::surface::GradientStop;

/// Colour of a gradient at `t` (0.0 centre, 1.0 rim).
///
/// Outside the first and last stops the nearest stop's colour is used.
pub fn sample_gradient(stops: &[GradientStop], t: f32) -> Rgba {
    let Some(first) = stops.first() else {
        return Rgba::TRANSPARENT;
    };
    if t <= first.offset {
        return first.color;
    }

    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            let local = if span > 0.0 { (t - a.offset) / span } else { 1.0 };
            return a.color.lerp(b.color, local);
        }
    }

    stops[stops.len() - 1].color
}

/// Composite `src` over a float RGB pixel.
pub fn blend(dst: &mut [f32; 3], src: Rgba) {
    let a = src.a.clamp(0.0, 1.0);
    if a == 0.0 {
        return;
    }
    let s = src.rgb.to_f32();
    for (d, s) in dst.iter_mut().zip(s) {
        *d += (s - *d) * a;
    }
}

/// Combine a `top` layer pixel with the `base` pixel beneath it.
pub fn composite(mode: BlendMode, base: [f32; 3], top: [f32; 3]) -> [f32; 3] {
    let mut out = [0.0; 3];
    for ((o, b), t) in out.iter_mut().zip(base).zip(top) {
        *o = match mode {
            BlendMode::Screen => 255.0 - (255.0 - b) * (255.0 - t) / 255.0,
            BlendMode::Multiply => b * t / 255.0,
        };
    }
    out
}

/// Quantize a float RGB pixel to a terminal colour.
pub fn to_color(px: [f32; 3]) -> Color {
    let q = |v: f32| v.round().clamp(0.0, 255.0) as u8;
    Color::Rgb(q(px[0]), q(px[1]), q(px[2]))
}

/// Quantize a float RGB pixel.
pub fn to_rgb(px: [f32; 3]) -> Rgb {
    let q = |v: f32| v.round().clamp(0.0, 255.0) as u8;
    Rgb::new(q(px[0]), q(px[1]), q(px[2]))
}

/// Colour along a multi-stop linear gradient, `t` in 0.0-1.0.
pub fn linear_gradient(stops: &[Rgb], t: f32) -> Rgb {
    match stops {
        [] => Rgb::default(),
        [only] => *only,
        _ => {
            let t = t.clamp(0.0, 1.0) * (stops.len() - 1) as f32;
            let i = (t.floor() as usize).min(stops.len() - 2);
            stops[i].lerp(stops[i + 1], t - i as f32)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glow() -> [GradientStop; 3] {
        [
            GradientStop::new(0.0, Rgba::new(245, 158, 11, 0.9)),
            GradientStop::new(0.4, Rgba::new(0, 240, 255, 0.4)),
            GradientStop::new(1.0, Rgba::TRANSPARENT),
        ]
    }

    #[test]
    fn test_sample_gradient_stops() {
        let stops = glow();
        assert_eq!(sample_gradient(&stops, 0.0), stops[0].color);
        let mid = sample_gradient(&stops, 0.4);
        assert_eq!(mid.rgb, stops[1].color.rgb);
        assert!((mid.a - 0.4).abs() < 1e-6);
        assert_eq!(sample_gradient(&stops, 1.0).a, 0.0);
        assert_eq!(sample_gradient(&[], 0.5), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_sample_gradient_alpha_falls_off() {
        let stops = glow();
        let mut previous = f32::INFINITY;
        for i in 0..=10 {
            let a = sample_gradient(&stops, i as f32 / 10.0).a;
            assert!(a <= previous);
            previous = a;
        }
    }

    #[test]
    fn test_blend() {
        let mut px = [0.0, 0.0, 0.0];
        blend(&mut px, Rgba::new(200, 100, 0, 0.5));
        assert_eq!(px, [100.0, 50.0, 0.0]);
        blend(&mut px, Rgba::new(255, 255, 255, 0.0));
        assert_eq!(px, [100.0, 50.0, 0.0]);
    }

    #[test]
    fn test_linear_gradient() {
        let stops = [Rgb::new(0, 0, 0), Rgb::new(100, 100, 100), Rgb::new(200, 0, 0)];
        assert_eq!(linear_gradient(&stops, 0.0), stops[0]);
        assert_eq!(linear_gradient(&stops, 0.5), stops[1]);
        assert_eq!(linear_gradient(&stops, 1.0), stops[2]);
        assert_eq!(linear_gradient(&stops, 0.25), Rgb::new(50, 50, 50));
    }

    #[test]
    fn test_composite_modes() {
        let base = [100.0, 50.0, 200.0];
        assert_eq!(composite(BlendMode::Screen, base, [0.0; 3]), base);
        assert_eq!(composite(BlendMode::Screen, base, [255.0; 3]), [255.0; 3]);
        assert_eq!(composite(BlendMode::Multiply, base, [255.0; 3]), base);
        assert_eq!(composite(BlendMode::Multiply, base, [0.0; 3]), [0.0; 3]);
    }
}
