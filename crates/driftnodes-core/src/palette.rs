//! Color palette for floating nodes.

use ratatui::style::Color;

/// Opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Alpha-composite `self` over `background`.
    pub fn over(self, background: Rgb, alpha: f32) -> Rgb {
        let a = alpha.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| (bg as f32 + (fg as f32 - bg as f32) * a).round() as u8;
        Rgb(
            mix(self.0, background.0),
            mix(self.1, background.1),
            mix(self.2, background.2),
        )
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.0, rgb.1, rgb.2)
    }
}

/// RGB color with a straight alpha channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Self {
            rgb: Rgb(r, g, b),
            alpha,
        }
    }
}

/// Visual attributes shared by every node of one color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStyle {
    /// Radial fill, bright near the highlight.
    pub fill_inner: Rgba,
    /// Radial fill at the rim.
    pub fill_outer: Rgba,
    pub border: Rgba,
    /// Outer glow.
    pub shadow: Rgba,
    /// Start color of the tail line; it fades to transparent.
    pub tail: Rgba,
}

const fn style(r: u8, g: u8, b: u8) -> ColorStyle {
    ColorStyle {
        fill_inner: Rgba::new(r, g, b, 0.4),
        fill_outer: Rgba::new(r, g, b, 0.1),
        border: Rgba::new(r, g, b, 0.3),
        shadow: Rgba::new(r, g, b, 0.2),
        tail: Rgba::new(r, g, b, 0.4),
    }
}

pub(crate) static TEAL: ColorStyle = style(0, 212, 255);
pub(crate) static GOLD: ColorStyle = style(212, 160, 18);
pub(crate) static GREEN: ColorStyle = style(16, 185, 129);
