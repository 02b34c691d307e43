//! The flowing wave grid drawn behind the network.

use lumen_core::{Point, Pointer, Viewport};

/// Distance between grid vertices.
pub const GRID_PITCH: f32 = 50.0;

/// Time-driven vertical offset of the vertex at `(x, y)`.
fn wave(x: f32, y: f32, time: f32) -> f32 {
    (time * 0.4 + x * 0.008 + y * 0.008).sin() * 12.0
}

/// Pointer-driven vertical offset for column `x`, zero when the pointer is
/// horizontally centred.
fn pointer_wave(x: f32, width: f32, pointer: Pointer) -> f32 {
    ((x - pointer.x * width) * 0.005).sin() * 15.0 * (pointer.x - 0.5)
}

/// Line segments of the wave grid at `time`.
///
/// Each vertex connects to its right and lower neighbours when they fall
/// inside the viewport. Both ends of a segment carry the pointer offset of
/// the vertex it starts from.
pub fn segments(viewport: Viewport, time: f32, pointer: Pointer) -> Vec<(Point, Point)> {
    let mut out = Vec::new();
    if viewport.is_empty() {
        return out;
    }

    let cols = (viewport.width / GRID_PITCH).ceil() as usize;
    let rows = (viewport.height / GRID_PITCH).ceil() as usize;

    for col in 0..cols {
        let x = col as f32 * GRID_PITCH;
        let shift = pointer_wave(x, viewport.width, pointer);
        for row in 0..rows {
            let y = row as f32 * GRID_PITCH;
            let start = Point::new(x, y + wave(x, y, time) + shift);

            let right = x + GRID_PITCH;
            if right < viewport.width {
                out.push((start, Point::new(right, y + wave(right, y, time) + shift)));
            }
            let below = y + GRID_PITCH;
            if below < viewport.height {
                out.push((start, Point::new(x, below + wave(x, below, time) + shift)));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_count() {
        // vertices at 0, 50, 100, 150 across and 0, 50 down
        let segs = segments(Viewport::new(200.0, 100.0), 0.0, Pointer::default());
        let horizontal = 3 * 2;
        let vertical = 4;
        assert_eq!(segs.len(), horizontal + vertical);
    }

    #[test]
    fn test_empty_viewport() {
        assert!(segments(Viewport::default(), 1.0, Pointer::default()).is_empty());
    }

    #[test]
    fn test_centred_pointer_adds_no_offset() {
        assert_eq!(pointer_wave(120.0, 800.0, Pointer::default()), 0.0);
        assert_ne!(pointer_wave(120.0, 800.0, Pointer::new(0.9, 0.5)), 0.0);
    }

    #[test]
    fn test_offsets_move_over_time() {
        let viewport = Viewport::new(300.0, 300.0);
        let a = segments(viewport, 0.0, Pointer::default());
        let b = segments(viewport, 1.0, Pointer::default());
        assert_eq!(a.len(), b.len());
        assert_ne!(a, b);
        for ((a0, _), (b0, _)) in a.iter().zip(&b) {
            assert_eq!(a0.x, b0.x);
            assert!((a0.y - b0.y).abs() <= 24.0);
        }
    }
}
