//! Tunable animator settings.

use serde::{Deserialize, Serialize};

/// Time step added to the animation clock every frame at normal speed.
const FRAME_STEP: f32 = 0.016;

/// Animation speed setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl AnimationSpeed {
    /// Multiplier applied to the nominal frame step.
    pub fn time_scale(&self) -> f32 {
        match self {
            AnimationSpeed::Slow => 0.5,
            AnimationSpeed::Medium => 1.0,
            AnimationSpeed::Fast => 2.0,
        }
    }

    /// Clock advance per frame.
    pub fn frame_step(&self) -> f32 {
        FRAME_STEP * self.time_scale()
    }
}

/// Node graph settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSettings {
    /// Number of nodes generated per session.
    pub node_count: usize,
    /// Nearest neighbours each node links to.
    pub links_per_node: usize,
    /// Live distance at and beyond which a link is not drawn.
    pub link_distance: f32,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            node_count: 40,
            links_per_node: 2,
            link_distance: 280.0,
        }
    }
}

/// Travelling pulse settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseSettings {
    /// Upper bound on concurrently active pulses.
    pub max_active: usize,
    /// Probability of a spawn roll succeeding each frame.
    pub spawn_chance: f64,
    /// Slowest progress per frame.
    pub min_speed: f32,
    /// Fastest progress per frame (exclusive).
    pub max_speed: f32,
}

impl Default for PulseSettings {
    fn default() -> Self {
        Self {
            max_active: 10,
            spawn_chance: 0.025,
            min_speed: 0.012,
            max_speed: 0.027,
        }
    }
}

/// Everything the animator needs besides the host.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimatorSettings {
    pub network: NetworkSettings,
    pub pulses: PulseSettings,
    pub speed: AnimationSpeed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_step_scales() {
        assert_eq!(AnimationSpeed::Medium.frame_step(), 0.016);
        assert_eq!(AnimationSpeed::Slow.frame_step(), 0.008);
        assert_eq!(AnimationSpeed::Fast.frame_step(), 0.032);
    }

    #[test]
    fn test_defaults() {
        let settings = AnimatorSettings::default();
        assert_eq!(settings.network.node_count, 40);
        assert_eq!(settings.network.links_per_node, 2);
        assert_eq!(settings.pulses.max_active, 10);
        assert_eq!(settings.speed, AnimationSpeed::Medium);
    }
}
