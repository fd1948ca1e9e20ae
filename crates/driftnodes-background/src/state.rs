//! Floating background state for ratatui frames.

use driftnodes_core::{Rgb, Viewport};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
};
use tracing::debug;

use crate::animator::{AnimatorSettings, NodeAnimator, TickReport};
use crate::canvas::CellCanvas;
use crate::node::NodeId;

/// Floating node background bound to the terminal frame.
#[derive(Debug)]
pub struct FloatingBackground {
    animator: NodeAnimator,
    /// Pixel width of one terminal cell.
    cell_width_px: u16,
    /// Pixel height of one terminal cell.
    cell_height_px: u16,
    /// Color nodes fade into.
    background: Rgb,
    /// Area of the last rendered frame; `None` before the first frame.
    last_area: Option<Rect>,
}

impl FloatingBackground {
    pub fn new(
        settings: AnimatorSettings,
        cell_width_px: u16,
        cell_height_px: u16,
        background: Rgb,
    ) -> Self {
        Self {
            animator: NodeAnimator::new(settings),
            cell_width_px: cell_width_px.max(1),
            cell_height_px: cell_height_px.max(1),
            background,
            last_area: None,
        }
    }

    pub fn animator(&self) -> &NodeAnimator {
        &self.animator
    }

    /// Pixel viewport covered by a terminal area.
    pub fn viewport_for(&self, area: Rect) -> Viewport {
        Viewport::new(
            f32::from(area.width) * f32::from(self.cell_width_px),
            f32::from(area.height) * f32::from(self.cell_height_px),
        )
    }

    fn container(&self) -> Option<Viewport> {
        self.last_area
            .map(|area| self.viewport_for(area))
            .filter(|v| !v.is_empty())
    }

    /// Spawn a node immediately, outside the regular schedule.
    pub fn spawn_now(&mut self, now_ms: u64) -> Option<NodeId> {
        self.container()?;
        self.animator.spawn_node(now_ms)
    }

    /// Advance the animation to `now_ms` and draw it into `area`.
    pub fn render_area(&mut self, frame: &mut Frame, area: Rect, now_ms: u64) -> TickReport {
        if self.last_area != Some(area) {
            debug!(width = area.width, height = area.height, "container resized");
            self.last_area = Some(area);
        }

        let report = self.animator.tick(now_ms, self.container());

        let mut canvas = CellCanvas::new(
            area.width,
            area.height,
            self.cell_width_px,
            self.cell_height_px,
            self.background,
        );
        self.animator.render(now_ms, &mut canvas);

        let paragraph = Paragraph::new(canvas.into_lines())
            .style(Style::new().bg(Color::from(self.background)));
        frame.render_widget(paragraph, area);
        report
    }

    /// Advance the animation to `now_ms` and draw it over the whole frame.
    pub fn render(&mut self, frame: &mut Frame, now_ms: u64) -> TickReport {
        let area = frame.area();
        self.render_area(frame, area, now_ms)
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    fn background() -> FloatingBackground {
        FloatingBackground::new(
            AnimatorSettings {
                seed: Some(1),
                ..Default::default()
            },
            8,
            16,
            Rgb(0, 0, 0),
        )
    }

    #[test]
    fn test_renders_into_terminal() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut bg = background();

        let mut report = TickReport::default();
        for now in (0..=10_000).step_by(100) {
            terminal
                .draw(|frame| report = bg.render(frame, now))
                .unwrap();
        }
        assert_eq!(report.live, bg.animator().live_count());
        assert_eq!(bg.animator().live_count(), 12);

        let buffer = terminal.backend().buffer();
        let drawn = buffer
            .content()
            .iter()
            .filter(|cell| cell.symbol() != " ")
            .count();
        assert!(drawn > 0);
    }

    #[test]
    fn test_zero_area_suppresses_spawning() {
        let mut terminal = Terminal::new(TestBackend::new(10, 10)).unwrap();
        let mut bg = background();
        terminal
            .draw(|frame| {
                bg.render_area(frame, Rect::default(), 5_000);
            })
            .unwrap();
        assert_eq!(bg.animator().live_count(), 0);
        assert_eq!(bg.spawn_now(5_000), None);
    }

    #[test]
    fn test_spawn_now_needs_a_rendered_frame() {
        let mut bg = background();
        assert_eq!(bg.spawn_now(0), None);

        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        terminal
            .draw(|frame| {
                bg.render(frame, 0);
            })
            .unwrap();
        assert!(bg.spawn_now(0).is_some());
        assert_eq!(bg.animator().live_count(), 2);
    }

    #[test]
    fn test_viewport_for_area() {
        let bg = background();
        assert_eq!(
            bg.viewport_for(Rect::new(0, 0, 100, 30)),
            Viewport::new(800.0, 480.0)
        );
    }
}
