//! Built-in 3x5 bitmap font, drawn at 2x

use glam::IVec2;

use super::framebuffer::{Framebuffer, Pixel};

const GLYPH_W: i32 = 3;
const GLYPH_H: i32 = 5;
const SCALE: i32 = 2;
/// Horizontal distance between glyph origins
pub const ADVANCE: i32 = GLYPH_W * SCALE + 2;
pub const LINE_HEIGHT: i32 = GLYPH_H * SCALE;

/// Rows of a glyph, top to bottom; bit 2 is the leftmost column
fn glyph(c: char) -> [u8; 5] {
    match c.to_ascii_uppercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        ' ' => [0; 5],
        // Unknown characters show as a hollow box
        _ => [0b111, 0b101, 0b101, 0b101, 0b111],
    }
}

/// Pixel size of `text` when rendered
pub fn text_size(text: &str) -> IVec2 {
    IVec2::new(text.chars().count() as i32 * ADVANCE, LINE_HEIGHT)
}

/// Render `text` in `ink` on a transparent surface
pub fn render(text: &str, ink: Pixel) -> Framebuffer {
    let size = text_size(text);
    let mut out = Framebuffer::new(size.x, size.y);
    for (i, c) in text.chars().enumerate() {
        let origin = i as i32 * ADVANCE;
        for (row, bits) in glyph(c).iter().enumerate() {
            for col in 0..GLYPH_W {
                if bits & (0b100 >> col) == 0 {
                    continue;
                }
                for dy in 0..SCALE {
                    for dx in 0..SCALE {
                        out.set(origin + col * SCALE + dx, row as i32 * SCALE + dy, ink);
                    }
                }
            }
        }
    }
    out
}
