//! Network nodes and their nearest-neighbour links.

use std::f32::consts::TAU;

use lumen_core::{Point, Pointer, Viewport};
use rand::Rng;

/// Horizontal oscillation amplitude.
const SWAY_X: f32 = 25.0;
/// Vertical oscillation amplitude.
const SWAY_Y: f32 = 18.0;
/// Displacement at the viewport edge before the per-node weighting.
const POINTER_PULL: f32 = 40.0;

/// A node of the background graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Live position, recomputed every tick.
    pub position: Point,
    /// Anchor the node oscillates around.
    pub base: Point,
    /// Core radius before pulsing.
    pub radius: f32,
    /// Phase offset for oscillation and pulsing.
    pub phase: f32,
    /// Indices of the nearest other nodes, closest first.
    pub links: Vec<usize>,
}

impl Node {
    pub fn new(base: Point, radius: f32, phase: f32) -> Self {
        Self {
            position: base,
            base,
            radius,
            phase,
            links: Vec::new(),
        }
    }

    /// Live position at `time` for the node stored at `index`.
    ///
    /// The index varies how strongly each node follows the pointer so the
    /// graph does not move as one rigid sheet.
    pub fn live_position(&self, index: usize, time: f32, pointer: Pointer) -> Point {
        let pull_x = (index % 3) as f32 * 0.3 + 0.2;
        let pull_y = (index % 2) as f32 * 0.3 + 0.2;
        Point::new(
            self.base.x
                + (time * 0.3 + self.phase).sin() * SWAY_X
                + (pointer.x - 0.5) * POINTER_PULL * pull_x,
            self.base.y
                + (time * 0.25 + self.phase).cos() * SWAY_Y
                + (pointer.y - 0.5) * POINTER_PULL * pull_y,
        )
    }

    /// Brightness pulse in 0.0-1.0.
    pub fn pulse(&self, time: f32) -> f32 {
        (time * 2.0 + self.phase).sin() * 0.5 + 0.5
    }
}

/// Generate `count` nodes scattered uniformly over the viewport and link
/// each to its nearest neighbours.
pub fn generate<R: Rng>(
    rng: &mut R,
    count: usize,
    links_per_node: usize,
    viewport: Viewport,
) -> Vec<Node> {
    let mut nodes: Vec<Node> = (0..count)
        .map(|_| {
            let base = Point::new(
                rng.r#gen::<f32>() * viewport.width,
                rng.r#gen::<f32>() * viewport.height,
            );
            let radius = 2.0 + rng.r#gen::<f32>() * 2.0;
            let phase = rng.r#gen::<f32>() * TAU;
            Node::new(base, radius, phase)
        })
        .collect();
    link_nearest(&mut nodes, links_per_node);
    nodes
}

/// Replace every node's links with its `k` nearest other nodes by base
/// position, closest first.
pub fn link_nearest(nodes: &mut [Node], k: usize) {
    let bases: Vec<Point> = nodes.iter().map(|n| n.base).collect();

    for (i, node) in nodes.iter_mut().enumerate() {
        let mut distances: Vec<(usize, f32)> = bases
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(j, &other)| (j, node.base.distance(other)))
            .collect();
        distances.sort_by(|a, b| a.1.total_cmp(&b.1));
        node.links = distances.into_iter().take(k).map(|(j, _)| j).collect();
    }
}

/// Opacity of a link of live length `distance`, or `None` when it is too
/// long to draw.
pub fn link_alpha(distance: f32, threshold: f32, max_alpha: f32) -> Option<f32> {
    (distance < threshold).then(|| (1.0 - distance / threshold) * max_alpha)
}
