//! Pulses travelling along node links.

use lumen_core::{Point, PulseSettings};
use rand::Rng;

use crate::node::Node;

/// A pulse moving from one node to a linked node.
#[derive(Debug, Clone, PartialEq)]
pub struct Pulse {
    pub from: usize,
    pub to: usize,
    /// Fraction of the way travelled, 0.0 up to (but never reaching) 1.0.
    pub progress: f32,
    /// Progress gained per tick.
    pub speed: f32,
}

impl Pulse {
    /// Current position between the live positions of its endpoints.
    pub fn position(&self, nodes: &[Node]) -> Option<Point> {
        let from = nodes.get(self.from)?;
        let to = nodes.get(self.to)?;
        Some(from.position.lerp(to.position, self.progress))
    }
}

/// The set of active pulses.
#[derive(Debug, Clone, Default)]
pub struct PulseField {
    pulses: Vec<Pulse>,
    settings: PulseSettings,
}

impl PulseField {
    pub fn new(settings: PulseSettings) -> Self {
        Self {
            pulses: Vec::with_capacity(settings.max_active),
            settings,
        }
    }

    pub fn pulses(&self) -> &[Pulse] {
        &self.pulses
    }

    pub fn len(&self) -> usize {
        self.pulses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pulses.is_empty()
    }

    /// Roll for a new pulse along a random link of a random node.
    ///
    /// Returns whether a pulse was spawned. Nothing is spawned when the roll
    /// fails, the field is full, or the chosen node has no links.
    pub fn maybe_spawn<R: Rng>(&mut self, rng: &mut R, nodes: &[Node]) -> bool {
        if rng.r#gen::<f64>() >= self.settings.spawn_chance
            || self.pulses.len() >= self.settings.max_active
            || nodes.is_empty()
        {
            return false;
        }

        let from = rng.gen_range(0..nodes.len());
        let links = &nodes[from].links;
        if links.is_empty() {
            return false;
        }
        let to = links[rng.gen_range(0..links.len())];

        let PulseSettings {
            min_speed,
            max_speed,
            ..
        } = self.settings;
        let span = max_speed - min_speed;
        let speed = if span.is_finite() && span > 0.0 {
            rng.gen_range(min_speed..max_speed)
        } else {
            min_speed
        };

        self.pulses.push(Pulse {
            from,
            to,
            progress: 0.0,
            speed,
        });
        true
    }

    /// Advance every pulse and drop those that arrived. Returns how many
    /// were dropped.
    pub fn advance(&mut self) -> usize {
        let before = self.pulses.len();
        for pulse in &mut self.pulses {
            pulse.progress += pulse.speed.max(0.0);
        }
        self.pulses.retain(|p| p.progress < 1.0);
        before - self.pulses.len()
    }

    /// Insert a pulse directly, respecting the cap.
    pub fn push(&mut self, pulse: Pulse) -> bool {
        if self.pulses.len() >= self.settings.max_active {
            return false;
        }
        self.pulses.push(pulse);
        true
    }
}
