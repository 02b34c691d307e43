//! The animated node network.

use lumen_core::{AnimatorSettings, Pointer, Rgba, Theme, Viewport};
use rand::Rng;

use crate::node::{self, Node, link_alpha};
use crate::pulse::PulseField;
use crate::surface::{GradientStop, Surface};
use crate::wave;

/// Node glow radius as a multiple of the pulsing core radius.
const GLOW_SCALE: f32 = 5.0;
/// How much a node's core grows at the top of its pulse.
const CORE_SWELL: f32 = 0.4;
/// Travelling pulse glow radius.
const PULSE_GLOW_RADIUS: f32 = 12.0;
/// Travelling pulse core radius.
const PULSE_CORE_RADIUS: f32 = 2.5;

/// Owns the node graph, active pulses, clock and pointer for one session.
#[derive(Debug)]
pub struct Animator<R> {
    settings: AnimatorSettings,
    nodes: Vec<Node>,
    pulses: PulseField,
    /// Animation clock, advanced by every tick.
    time: f32,
    pointer: Pointer,
    viewport: Viewport,
    theme: Theme,
    rng: R,
}

impl<R: Rng> Animator<R> {
    /// Scatter and link a fresh node set over `viewport`.
    pub fn new(settings: AnimatorSettings, viewport: Viewport, theme: Theme, mut rng: R) -> Self {
        let nodes = node::generate(
            &mut rng,
            settings.network.node_count,
            settings.network.links_per_node,
            viewport,
        );
        Self {
            settings,
            nodes,
            pulses: PulseField::new(settings.pulses),
            time: 0.0,
            pointer: Pointer::default(),
            viewport,
            theme,
            rng,
        }
    }

    /// Advance the animation by `dt`: move nodes, roll for a new pulse and
    /// move pulses along, dropping the ones that arrived.
    pub fn tick(&mut self, dt: f32) {
        self.time += dt;

        let (time, pointer) = (self.time, self.pointer);
        for (i, node) in self.nodes.iter_mut().enumerate() {
            node.position = node.live_position(i, time, pointer);
        }

        self.pulses.maybe_spawn(&mut self.rng, &self.nodes);
        self.pulses.advance();
    }

    /// Advance by one nominal frame at the configured speed.
    pub fn step(&mut self) {
        self.tick(self.settings.speed.frame_step());
    }

    /// Paint the current state onto `surface`.
    pub fn draw<S: Surface>(&self, surface: &mut S) {
        let palette = self.theme.palette();

        surface.fade(palette.background, palette.fade_alpha);

        for (from, to) in wave::segments(self.viewport, self.time, self.pointer) {
            surface.line(from, to, palette.grid);
        }

        let threshold = self.settings.network.link_distance;
        for node in &self.nodes {
            for &j in &node.links {
                let Some(other) = self.nodes.get(j) else {
                    continue;
                };
                let distance = node.position.distance(other.position);
                if let Some(alpha) = link_alpha(distance, threshold, palette.link_max_alpha) {
                    surface.line(node.position, other.position, palette.link.with_alpha(alpha));
                }
            }

            let pulse = node.pulse(self.time);
            let radius = node.radius * (1.0 + pulse * CORE_SWELL);
            surface.radial_glow(
                node.position,
                radius * GLOW_SCALE,
                &[
                    GradientStop::new(0.0, palette.glow_inner.scaled(pulse)),
                    GradientStop::new(0.5, palette.glow_mid.scaled(pulse)),
                    GradientStop::new(1.0, Rgba::TRANSPARENT),
                ],
            );
            surface.disc(
                node.position,
                radius,
                palette
                    .core
                    .with_alpha(palette.core_alpha_base + pulse * palette.core_alpha_pulse),
            );
        }

        let [head, tail] = palette.pulse_glow;
        for pulse in self.pulses.pulses() {
            let Some(at) = pulse.position(&self.nodes) else {
                continue;
            };
            surface.radial_glow(
                at,
                PULSE_GLOW_RADIUS,
                &[
                    GradientStop::new(0.0, head),
                    GradientStop::new(0.4, tail),
                    GradientStop::new(1.0, Rgba::TRANSPARENT),
                ],
            );
            surface.disc(at, PULSE_CORE_RADIUS, palette.pulse_core);
        }
    }

    /// Track new viewport dimensions. Nodes and pulses are kept as they are.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn set_pointer(&mut self, pointer: Pointer) {
        self.pointer = pointer;
    }

    /// Switch palettes for subsequent frames without touching any state.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn pulses(&self) -> &PulseField {
        &self.pulses
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn settings(&self) -> &AnimatorSettings {
        &self.settings
    }

    #[cfg(test)]
    pub(crate) fn nodes_mut(&mut self) -> &mut Vec<Node> {
        &mut self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::recording::{DrawOp, Recorder};
    use lumen_core::{Point, PulseSettings};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn animator(settings: AnimatorSettings) -> Animator<StdRng> {
        Animator::new(
            settings,
            Viewport::new(1600.0, 900.0),
            Theme::Dark,
            StdRng::seed_from_u64(42),
        )
    }

    fn busy() -> AnimatorSettings {
        AnimatorSettings {
            pulses: PulseSettings {
                spawn_chance: 1.0,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Connection lines of one drawn frame: every line after the wave grid.
    fn link_lines(a: &Animator<StdRng>) -> Vec<(Point, Point, Rgba)> {
        let mut rec = Recorder::default();
        a.draw(&mut rec);
        let grid = wave::segments(a.viewport(), a.time(), a.pointer());
        let lines: Vec<_> = rec.lines().collect();
        let (grid_lines, links) = lines.split_at(grid.len());
        assert!(grid_lines.iter().map(|&(from, to, _)| (from, to)).eq(grid));
        links.to_vec()
    }

    /// Two linked nodes 50 units apart.
    fn pair() -> Animator<StdRng> {
        let mut a = animator(AnimatorSettings::default());
        let mut left = Node::new(Point::new(400.0, 400.0), 3.0, 0.0);
        let mut right = Node::new(Point::new(450.0, 400.0), 3.0, 0.0);
        left.links = vec![1];
        right.links = vec![0];
        *a.nodes_mut() = vec![left, right];
        a
    }

    #[test]
    fn test_tick_advances_clock() {
        let mut a = animator(AnimatorSettings::default());
        a.tick(0.016);
        a.tick(0.016);
        assert!((a.time() - 0.032).abs() < 1e-6);
        a.step();
        assert!((a.time() - 0.048).abs() < 1e-6);
    }

    #[test]
    fn test_topology_is_fixed() {
        let mut a = animator(busy());
        let before: Vec<(Point, Vec<usize>)> =
            a.nodes().iter().map(|n| (n.base, n.links.clone())).collect();
        a.set_pointer(Pointer::new(0.9, 0.1));
        for _ in 0..500 {
            a.tick(0.016);
        }
        let after: Vec<(Point, Vec<usize>)> =
            a.nodes().iter().map(|n| (n.base, n.links.clone())).collect();
        assert_eq!(before, after);
        assert!(a.nodes().iter().any(|n| n.position != n.base));
    }

    #[test]
    fn test_pulse_cap_holds_under_constant_spawning() {
        let mut a = animator(busy());
        for _ in 0..1_000 {
            a.tick(0.016);
            assert!(a.pulses().len() <= 10);
        }
        assert!(!a.pulses().is_empty());
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = animator(busy());
        let mut b = animator(busy());
        for _ in 0..120 {
            a.tick(0.016);
            b.tick(0.016);
        }
        assert_eq!(a.pulses().pulses(), b.pulses().pulses());
        assert_eq!(a.nodes(), b.nodes());
    }

    #[test]
    fn test_draw_order() {
        let mut a = animator(busy());
        a.tick(0.016);
        let mut rec = Recorder::default();
        a.draw(&mut rec);

        let palette = Theme::Dark.palette();
        assert_eq!(
            rec.ops.first(),
            Some(&DrawOp::Fade(palette.background, palette.fade_alpha))
        );
        let node_discs = rec
            .discs()
            .filter(|(_, _, c)| c.rgb == palette.core)
            .count();
        assert_eq!(node_discs, 40);
        let pulse_cores = rec
            .discs()
            .filter(|(_, r, c)| *r == PULSE_CORE_RADIUS && *c == palette.pulse_core)
            .count();
        assert_eq!(pulse_cores, a.pulses().len());
    }

    #[test]
    fn test_links_drawn_only_under_threshold() {
        let mut a = animator(AnimatorSettings::default());
        a.tick(0.016);

        let links = link_lines(&a);
        assert!(!links.is_empty());
        let link = Theme::Dark.palette().link;
        for (from, to, color) in links {
            assert_eq!(color.rgb, link);
            let d = from.distance(to);
            assert!(d < 280.0);
            assert!((color.a - (1.0 - d / 280.0) * 0.12).abs() < 1e-5);
        }
    }

    #[test]
    fn test_link_visibility_follows_live_distance() {
        let mut a = pair();
        a.tick(0.016);
        // both ends draw the shared link
        assert_eq!(link_lines(&a).len(), 2);

        // pull the pair apart beyond the threshold for one frame
        a.nodes_mut()[1].position = Point::new(750.0, 400.0);
        assert!(link_lines(&a).is_empty());

        // the next tick recomputes positions from the bases
        a.tick(0.016);
        assert_eq!(link_lines(&a).len(), 2);
    }

    #[test]
    fn test_theme_change_keeps_state() {
        let mut a = animator(busy());
        for _ in 0..30 {
            a.tick(0.016);
        }
        let nodes = a.nodes().to_vec();
        let pulses = a.pulses().pulses().to_vec();
        a.set_theme(Theme::Light);
        assert_eq!(a.nodes(), nodes.as_slice());
        assert_eq!(a.pulses().pulses(), pulses.as_slice());

        let mut rec = Recorder::default();
        a.draw(&mut rec);
        let light = Theme::Light.palette();
        assert_eq!(
            rec.ops.first(),
            Some(&DrawOp::Fade(light.background, light.fade_alpha))
        );
    }

    #[test]
    fn test_resize_keeps_nodes_and_pulses() {
        let mut a = animator(busy());
        for _ in 0..30 {
            a.tick(0.016);
        }
        let bases: Vec<Point> = a.nodes().iter().map(|n| n.base).collect();
        let pulses = a.pulses().pulses().to_vec();
        a.resize(Viewport::new(800.0, 400.0));
        assert_eq!(a.viewport(), Viewport::new(800.0, 400.0));
        assert_eq!(a.nodes().iter().map(|n| n.base).collect::<Vec<_>>(), bases);
        assert_eq!(a.pulses().pulses(), pulses.as_slice());
    }
}
