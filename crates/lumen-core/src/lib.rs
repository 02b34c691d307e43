//! Core types shared by the lumen crates.

mod capabilities;
mod color;
mod geometry;
mod settings;
mod theme;

pub use capabilities::{Capabilities, is_mobile_platform};
pub use color::{Rgb, Rgba};
pub use geometry::{Point, Pointer, Viewport};
pub use settings::{AnimationSpeed, AnimatorSettings, NetworkSettings, PulseSettings};
pub use theme::{BlendMode, Palette, Theme};
