//! Light/dark themes and the colour palettes they select.

use serde::{Deserialize, Serialize};

use crate::color::{Rgb, Rgba};

/// Active colour theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// Switch between light and dark.
    pub fn toggle(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Parse a theme name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Palette for this theme.
    pub fn palette(&self) -> &'static Palette {
        match self {
            Theme::Light => &LIGHT,
            Theme::Dark => &DARK,
        }
    }
}

/// How the animation layer combines with the gradient beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// Lightens: dark layer pixels leave the gradient almost untouched.
    Screen,
    /// Darkens: light layer pixels leave the gradient almost untouched.
    Multiply,
}

/// Every colour the animator and the static fallback draw with.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    /// Colour the trail fade composites towards.
    pub background: Rgb,
    /// Opacity of the per-frame trail fade.
    pub fade_alpha: f32,
    /// Wave grid stroke.
    pub grid: Rgba,
    /// Connection stroke colour.
    pub link: Rgb,
    /// Opacity of a connection of zero length.
    pub link_max_alpha: f32,
    /// Node glow centre at full pulse.
    pub glow_inner: Rgba,
    /// Node glow midpoint at full pulse.
    pub glow_mid: Rgba,
    /// Node core colour.
    pub core: Rgb,
    /// Core opacity at the bottom of the pulse.
    pub core_alpha_base: f32,
    /// Additional core opacity at the top of the pulse.
    pub core_alpha_pulse: f32,
    /// Travelling pulse glow stops (centre, 40%).
    pub pulse_glow: [Rgba; 2],
    /// Travelling pulse core.
    pub pulse_core: Rgba,
    /// Diagonal gradient under everything, top-left to bottom-right.
    pub gradient: [Rgb; 3],
    /// Blend of the animation layer onto the gradient.
    pub blend: BlendMode,
    /// Highlight over the animation, strongest above the top edge.
    pub highlight: Rgba,
    /// Edge darkening (or lightening) over the animation.
    pub vignette: Rgba,
}

const PULSE_GLOW: [Rgba; 2] = [Rgba::new(245, 158, 11, 0.9), Rgba::new(0, 240, 255, 0.4)];
const PULSE_CORE: Rgba = Rgba::new(255, 255, 255, 0.9);

static DARK: Palette = Palette {
    background: Rgb::new(10, 6, 32),
    fade_alpha: 0.15,
    grid: Rgba::new(0, 240, 255, 0.04),
    link: Rgb::new(0, 240, 255),
    link_max_alpha: 0.12,
    glow_inner: Rgba::new(0, 240, 255, 0.25),
    glow_mid: Rgba::new(139, 92, 246, 0.08),
    core: Rgb::new(0, 240, 255),
    core_alpha_base: 0.5,
    core_alpha_pulse: 0.5,
    pulse_glow: PULSE_GLOW,
    pulse_core: PULSE_CORE,
    // indigo-950, slate-950, cyan-950
    gradient: [Rgb::new(30, 27, 75), Rgb::new(2, 6, 23), Rgb::new(8, 51, 68)],
    blend: BlendMode::Screen,
    highlight: Rgba::new(0, 240, 255, 0.08),
    vignette: Rgba::new(10, 6, 32, 0.5),
};

static LIGHT: Palette = Palette {
    background: Rgb::new(248, 250, 252),
    fade_alpha: 0.15,
    grid: Rgba::new(0, 180, 200, 0.08),
    link: Rgb::new(0, 150, 180),
    link_max_alpha: 0.2,
    glow_inner: Rgba::new(0, 150, 200, 0.3),
    glow_mid: Rgba::new(100, 60, 200, 0.12),
    core: Rgb::new(0, 150, 200),
    core_alpha_base: 0.6,
    core_alpha_pulse: 0.4,
    pulse_glow: PULSE_GLOW,
    pulse_core: PULSE_CORE,
    // slate-100, slate-50, cyan-50
    gradient: [
        Rgb::new(241, 245, 249),
        Rgb::new(248, 250, 252),
        Rgb::new(236, 254, 255),
    ],
    blend: BlendMode::Multiply,
    highlight: Rgba::new(0, 150, 200, 0.05),
    vignette: Rgba::new(248, 250, 252, 0.3),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trip() {
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
        assert_eq!(Theme::Light.toggle().toggle(), Theme::Light);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name("Dark"), Some(Theme::Dark));
        assert_eq!(Theme::from_name(" light "), Some(Theme::Light));
        assert_eq!(Theme::from_name("sepia"), None);
    }

    #[test]
    fn test_palettes_differ() {
        let dark = Theme::Dark.palette();
        let light = Theme::Light.palette();
        assert_ne!(dark.background, light.background);
        assert!(light.link_max_alpha > dark.link_max_alpha);
        assert_eq!(dark.pulse_core, light.pulse_core);
        assert_eq!(dark.blend, BlendMode::Screen);
        assert_eq!(light.blend, BlendMode::Multiply);
    }
}
