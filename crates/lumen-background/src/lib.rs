//! Procedural background animation for lumen.
//!
//! A small graph of drifting nodes linked to their nearest neighbours, with
//! pulses travelling along the links over a flowing wave grid. The update
//! step ([`Animator::tick`]) is independent of any drawing target; drawing
//! goes through the [`Surface`] trait, and [`BackgroundSession`] ties an
//! animator to a [`Host`] that supplies events and frame scheduling.

mod animator;
mod backdrop;
mod color;
mod fallback;
pub mod node;
pub mod pulse;
mod raster;
mod session;
mod surface;
pub mod wave;

pub use animator::Animator;
pub use backdrop::AnimatedBackground;
pub use fallback::StaticBackground;
pub use node::{Node, link_alpha};
pub use pulse::{Pulse, PulseField};
pub use raster::Raster;
pub use session::{BackgroundSession, FrameHandle, Host, HostEvent};
pub use surface::{GradientStop, Surface};
