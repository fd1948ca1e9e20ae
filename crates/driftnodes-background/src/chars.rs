//! Character constants for node rendering.

use driftnodes_core::NodeShape;

/// Node bodies at or above this size use the large glyph.
pub const LARGE_BODY_PX: f32 = 17.0;

/// Body glyphs for small nodes.
pub const SMALL_BODY_CHARS: [(NodeShape, char); 3] = [
    (NodeShape::Circle, '•'),
    (NodeShape::Square, '▪'),
    (NodeShape::Diamond, '⬩'),
];

/// Body glyphs for large nodes.
pub const LARGE_BODY_CHARS: [(NodeShape, char); 3] = [
    (NodeShape::Circle, '●'),
    (NodeShape::Square, '■'),
    (NodeShape::Diamond, '◆'),
];

/// Tail glyphs for horizontal, falling, vertical and rising segments.
pub const TAIL_CHARS: [char; 4] = ['─', '╲', '│', '╱'];

/// Glyph for a node body.
pub fn body_char(shape: NodeShape, size_px: f32) -> char {
    let table = if size_px >= LARGE_BODY_PX {
        &LARGE_BODY_CHARS
    } else {
        &SMALL_BODY_CHARS
    };
    table
        .iter()
        .find(|(s, _)| *s == shape)
        .map(|(_, ch)| *ch)
        .unwrap_or('·')
}

/// Glyph for a tail segment at a screen angle, clockwise with y down.
pub fn tail_char(angle_deg: f32) -> char {
    let a = angle_deg.rem_euclid(180.0);
    let idx = if !(22.5..157.5).contains(&a) {
        0
    } else if a < 67.5 {
        1
    } else if a < 112.5 {
        2
    } else {
        3
    };
    TAIL_CHARS[idx]
}
