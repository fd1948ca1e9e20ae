//! Terminal cell canvas: a [`Surface`] that rasterizes nodes into characters.

use driftnodes_core::{Rgb, Viewport};
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

use crate::chars::{body_char, tail_char};
use crate::surface::{NodeSprite, Surface};

/// Terminals have no alpha channel; style alphas are boosted so a node at
/// full plateau opacity reads clearly against the background.
const ALPHA_GAIN: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    fg: Rgb,
    bg: Option<Rgb>,
    /// Effective alpha of the draw that produced this cell.
    weight: f32,
}

/// Character grid mapping surface pixels onto terminal cells.
#[derive(Debug, Clone)]
pub struct CellCanvas {
    cols: u16,
    rows: u16,
    cell_width_px: f32,
    cell_height_px: f32,
    background: Rgb,
    cells: Vec<Option<Cell>>,
}

impl CellCanvas {
    pub fn new(
        cols: u16,
        rows: u16,
        cell_width_px: u16,
        cell_height_px: u16,
        background: Rgb,
    ) -> Self {
        Self {
            cols,
            rows,
            cell_width_px: f32::from(cell_width_px.max(1)),
            cell_height_px: f32::from(cell_height_px.max(1)),
            background,
            cells: vec![None; cols as usize * rows as usize],
        }
    }

    /// Cell containing a surface pixel, if it lies on the canvas.
    fn cell_index(&self, x_px: f32, y_px: f32) -> Option<usize> {
        if x_px < 0.0 || y_px < 0.0 {
            return None;
        }
        let col = (x_px / self.cell_width_px) as usize;
        let row = (y_px / self.cell_height_px) as usize;
        (col < self.cols as usize && row < self.rows as usize)
            .then(|| row * self.cols as usize + col)
    }

    /// Write a cell unless a more opaque draw already occupies it.
    fn plot(&mut self, x_px: f32, y_px: f32, ch: char, color: Rgb, bg: Option<Rgb>, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let Some(idx) = self.cell_index(x_px, y_px) else {
            return;
        };
        if self.cells[idx].is_some_and(|c| c.weight >= alpha) {
            return;
        }
        self.cells[idx] = Some(Cell {
            ch,
            fg: color.over(self.background, alpha),
            bg,
            weight: alpha,
        });
    }

    fn draw_tail(&mut self, sprite: &NodeSprite, viewport: Viewport) {
        let (ax, ay) = sprite.tail_anchor_px(viewport);
        let (ex, ey) = sprite.tail_end_px(viewport);
        let ch = tail_char(sprite.tail_screen_angle_deg());
        let base = sprite.style.tail;

        let step = self.cell_width_px.min(self.cell_height_px) / 2.0;
        let steps = (sprite.tail.length_px / step).ceil().max(1.0) as usize;
        let body_cell = {
            let (cx, cy) = sprite.center_px(viewport);
            self.cell_index(cx, cy)
        };

        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = ax + (ex - ax) * t;
            let y = ay + (ey - ay) * t;
            if body_cell.is_some() && self.cell_index(x, y) == body_cell {
                continue;
            }
            // Linear gradient from the tail color to transparent.
            let alpha = base.alpha * ALPHA_GAIN * sprite.opacity * (1.0 - t);
            self.plot(x, y, ch, base.rgb, None, alpha);
        }
    }

    fn draw_body(&mut self, sprite: &NodeSprite, viewport: Viewport) {
        let (cx, cy) = sprite.center_px(viewport);
        let style = sprite.style;
        let alpha = style.fill_inner.alpha * ALPHA_GAIN * sprite.opacity;
        let glow_alpha = (style.shadow.alpha * ALPHA_GAIN * sprite.opacity).clamp(0.0, 1.0);
        let glow = style.shadow.rgb.over(self.background, glow_alpha);
        self.plot(
            cx,
            cy,
            body_char(sprite.shape, sprite.size_px),
            style.border.rgb,
            Some(glow),
            alpha,
        );
    }

    /// Character and foreground color at a cell, if anything was drawn there.
    #[cfg(test)]
    fn glyph_at(&self, col: u16, row: u16) -> Option<(char, Rgb)> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells[row as usize * self.cols as usize + col as usize].map(|c| (c.ch, c.fg))
    }

    /// Number of cells holding a glyph.
    #[cfg(test)]
    fn filled(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Convert the grid into styled lines.
    pub fn into_lines(self) -> Vec<Line<'static>> {
        let cols = self.cols as usize;
        if cols == 0 {
            return Vec::new();
        }
        self.cells
            .chunks(cols)
            .map(|row| {
                let spans: Vec<Span> = row
                    .iter()
                    .map(|cell| match cell {
                        Some(c) => {
                            let mut style = Style::new().fg(Color::from(c.fg));
                            if let Some(bg) = c.bg {
                                style = style.bg(Color::from(bg));
                            }
                            Span::styled(c.ch.to_string(), style)
                        }
                        None => Span::raw(" "),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

impl Surface for CellCanvas {
    fn viewport(&self) -> Viewport {
        Viewport::new(
            f32::from(self.cols) * self.cell_width_px,
            f32::from(self.rows) * self.cell_height_px,
        )
    }

    fn draw_node(&mut self, sprite: &NodeSprite) {
        let viewport = self.viewport();
        self.draw_tail(sprite, viewport);
        self.draw_body(sprite, viewport);
    }
}

#[cfg(test)]
mod tests {
    use driftnodes_core::{NodeColor, NodeShape};

    use super::*;
    use crate::node::NodeId;
    use crate::surface::TailSprite;

    const BG: Rgb = Rgb(0, 0, 0);

    fn canvas() -> CellCanvas {
        // 80x25 cells of 8x16 px: 640x400 px.
        CellCanvas::new(80, 25, 8, 16, BG)
    }

    /// A node whose body center sits at pixel (`x`, `y`).
    fn sprite_at(x: f32, y: f32, shape: NodeShape, tail_rotation_deg: f32) -> NodeSprite {
        let size = 20.0;
        NodeSprite {
            id: NodeId(0),
            shape,
            style: NodeColor::Teal.style(),
            size_px: size,
            left_px: x - size / 2.0,
            bottom_px: -30.0,
            offset_x_px: 0.0,
            // top = 400 + 30 - 20 + offset, center = top + 10
            offset_y_px: y - 420.0,
            opacity: 0.8,
            rotation_deg: shape.body_rotation_deg(),
            tail: TailSprite {
                length_px: 64.0,
                rotation_deg: tail_rotation_deg,
            },
        }
    }

    #[test]
    fn test_viewport_from_cells() {
        assert_eq!(canvas().viewport(), Viewport::new(640.0, 400.0));
    }

    #[test]
    fn test_body_lands_in_its_cell() {
        let mut c = canvas();
        c.draw_node(&sprite_at(100.0, 200.0, NodeShape::Circle, 0.0));
        let (ch, fg) = c.glyph_at(12, 12).unwrap();
        assert_eq!(ch, '●');
        assert_eq!(fg, Rgb(0, 212, 255).over(BG, 0.64));
    }

    #[test]
    fn test_horizontal_tail_trails_right_and_fades() {
        let mut c = canvas();
        c.draw_node(&sprite_at(100.0, 200.0, NodeShape::Square, 0.0));
        let near = c.glyph_at(13, 12).unwrap();
        let far = c.glyph_at(19, 12).unwrap();
        assert_eq!(near.0, '─');
        assert_eq!(far.0, '─');
        assert!(near.1.1 > far.1.1);
        assert!(c.glyph_at(11, 12).is_none());
    }

    #[test]
    fn test_diamond_tail_uses_screen_angle() {
        let mut c = canvas();
        // Configured angle 0 on a diamond: relative rotation -45, on-screen 0.
        c.draw_node(&sprite_at(100.0, 200.0, NodeShape::Diamond, -45.0));
        assert_eq!(c.glyph_at(12, 12).unwrap().0, '◆');
        assert_eq!(c.glyph_at(16, 12).unwrap().0, '─');
    }

    #[test]
    fn test_offscreen_node_draws_nothing() {
        let mut c = canvas();
        c.draw_node(&sprite_at(100.0, 1000.0, NodeShape::Circle, 0.0));
        c.draw_node(&sprite_at(-200.0, 100.0, NodeShape::Circle, 0.0));
        assert_eq!(c.filled(), 0);
    }

    #[test]
    fn test_invisible_node_draws_nothing() {
        let mut c = canvas();
        let mut s = sprite_at(100.0, 200.0, NodeShape::Circle, 0.0);
        s.opacity = 0.0;
        c.draw_node(&s);
        assert_eq!(c.filled(), 0);
    }

    #[test]
    fn test_stronger_draw_wins() {
        let mut c = canvas();
        let mut faint = sprite_at(100.0, 200.0, NodeShape::Square, 0.0);
        faint.opacity = 0.2;
        let bright = sprite_at(100.0, 200.0, NodeShape::Circle, 0.0);
        c.draw_node(&bright);
        c.draw_node(&faint);
        assert_eq!(c.glyph_at(12, 12).unwrap().0, '●');
    }

    #[test]
    fn test_into_lines_shape() {
        let mut c = canvas();
        c.draw_node(&sprite_at(100.0, 200.0, NodeShape::Circle, 0.0));
        let lines = c.into_lines();
        assert_eq!(lines.len(), 25);
        assert!(lines.iter().all(|l| l.spans.len() == 80));
        assert_eq!(lines[12].spans[12].content, "●");
        assert_eq!(lines[0].spans[0].content, " ");
    }
}
