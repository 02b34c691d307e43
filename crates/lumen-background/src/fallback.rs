//! Static gradient shown when animation is disabled.

use lumen_core::Theme;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::backdrop::gradient_at;

/// Strength of the highlight bleeding in from above the top edge.
const HIGHLIGHT: f32 = 0.15;

/// Diagonal three-stop gradient for the active theme, with a soft highlight
/// centred above the top edge.
#[derive(Debug, Clone, Copy)]
pub struct StaticBackground {
    theme: Theme,
}

impl StaticBackground {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }
}

impl Widget for StaticBackground {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let palette = self.theme.palette();
        let width = area.width.max(1) as f32;
        let height = area.height.max(1) as f32;

        for row in 0..area.height {
            for col in 0..area.width {
                let u = col as f32 / width;
                let v = row as f32 / height;
                let base = gradient_at(palette, u, v);

                // elliptical falloff around (0.5, -0.2)
                let dx = (u - 0.5) / 0.8;
                let dy = (v + 0.2) / 0.8;
                let falloff = (1.0 - (dx * dx + dy * dy).sqrt()).max(0.0);
                let color = base.lerp(palette.link, falloff * HIGHLIGHT);

                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_char(' ').set_bg(color.into());
                }
            }
        }
    }
}
