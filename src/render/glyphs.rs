//! One-bit drawing surface and text helpers for the non-time modes.

use core::convert::Infallible;

use embedded_graphics::{
    mono_font::{DecorationDimensions, MonoFont, MonoTextStyle, mapping::StrGlyphMapping},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Circle, ContainsPoint, PrimitiveStyle},
    text::{Baseline, Text},
};

use crate::layout::{COLUMNS, ROWS};

// Packed bitmap for the internal 3x4 font (ASCII 0x20-0x7E).
const FONT_3X4_DATA: [u8; 144] = [
    0x0a, 0xd5, 0x10, 0x4a, 0xa0, 0x01, 0x0a, 0xfe, 0x68, 0x85, 0x70, 0x02, 0x08, 0x74, 0x90, 0x86,
    0xa5, 0xc4, 0x08, 0x5e, 0x68, 0x48, 0x08, 0x10, 0xeb, 0x7b, 0xe7, 0xfd, 0x22, 0x27, 0xb8, 0x9b,
    0x39, 0xb4, 0x05, 0xd1, 0xa9, 0x3e, 0xea, 0x5d, 0x28, 0x0a, 0xff, 0xf3, 0xfc, 0xe4, 0x45, 0xd2,
    0xff, 0x7d, 0xff, 0xbc, 0xd9, 0xff, 0xb7, 0xcb, 0xb4, 0xe8, 0xe9, 0xfd, 0xfe, 0xcb, 0x25, 0xaa,
    0xd9, 0x7d, 0x97, 0x7d, 0xe7, 0xbf, 0xdf, 0x6f, 0xdf, 0x7f, 0x6d, 0xb7, 0xe0, 0xd0, 0xf7, 0xe5,
    0x6d, 0x48, 0xc0, 0x68, 0xdf, 0x35, 0x6f, 0x49, 0x40, 0x40, 0x86, 0xf5, 0xd7, 0xab, 0xe0, 0xc7,
    0x5f, 0x7d, 0xff, 0xbc, 0xd9, 0xff, 0x37, 0xcb, 0xb4, 0xe8, 0xe9, 0xfd, 0x1e, 0xcb, 0x25, 0xaa,
    0xd9, 0x7d, 0x17, 0x7d, 0xe7, 0xbf, 0xdf, 0x6f, 0xdf, 0x7f, 0x6d, 0xb7, 0xb1, 0x80, 0xf7, 0xe5,
    0x6d, 0x48, 0xa0, 0xa8, 0xdf, 0x35, 0x6f, 0x49, 0x20, 0x90, 0x86, 0xf5, 0xd7, 0xab, 0xb1, 0x80,
];
const FONT_3X4_IMAGE_WIDTH: u32 = 48;
const FONT_3X4_GLYPH_MAPPING: StrGlyphMapping<'static> = StrGlyphMapping::new("\0 \u{7e}", 0);

/// Monospace 3x4 font, small enough to stack two lines of digits on the grid.
#[must_use]
pub(crate) fn font_3x4() -> MonoFont<'static> {
    MonoFont {
        image: embedded_graphics::image::ImageRaw::new(&FONT_3X4_DATA, FONT_3X4_IMAGE_WIDTH),
        glyph_mapping: &FONT_3X4_GLYPH_MAPPING,
        character_size: Size::new(3, 4),
        character_spacing: 0,
        baseline: 3,
        underline: DecorationDimensions::new(3, 1),
        strikethrough: DecorationDimensions::new(2, 1),
    }
}

/// Which grid cells are lit, as drawn by embedded-graphics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Mask([[bool; COLUMNS]; ROWS]);

impl Mask {
    pub(crate) const fn new() -> Self {
        Self([[false; COLUMNS]; ROWS])
    }

    /// Lit cells as `(row, col)`, row-major.
    pub(crate) fn lit(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|(_, lit)| **lit)
                .map(move |(col, _)| (row, col))
        })
    }

    pub(crate) fn light(&mut self, row: usize, col: usize) {
        if let Some(cell) = self.0.get_mut(row).and_then(|cells| cells.get_mut(col)) {
            *cell = true;
        }
    }

    pub(crate) fn light_row(&mut self, row: usize) {
        if let Some(cells) = self.0.get_mut(row) {
            *cells = [true; COLUMNS];
        }
    }

    /// Draw `text` one glyph at a time, leaving `gap` blank columns between glyphs.
    pub(crate) fn draw_chars(&mut self, font: &MonoFont<'_>, text: &str, origin: Point, gap: i32) {
        let advance = font.character_size.width as i32 + gap;
        let style = MonoTextStyle::new(font, BinaryColor::On);
        let mut position = origin;
        for ch in text.chars() {
            let mut buf = [0u8; 4];
            let glyph = ch.encode_utf8(&mut buf);
            let Ok(_) = Text::with_baseline(glyph, position, style, Baseline::Top).draw(self);
            position.x += advance;
        }
    }

    /// Draw `text` horizontally centered with its top edge on row `top`.
    pub(crate) fn draw_centered(&mut self, font: &MonoFont<'_>, text: &str, top: i32, gap: i32) {
        let left = (COLUMNS as i32 - text_width(font, text, gap)) / 2;
        self.draw_chars(font, text, Point::new(left, top), gap);
    }

    /// Moon disc for phase `0..8` (0 new, 4 full), waxing lit from the right.
    pub(crate) fn draw_moon(&mut self, phase: u8) {
        let disc = Circle::new(Point::new(1, 0), 9);
        let Ok(()) = disc
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(self);
        let center = disc.center();
        for row in 0..ROWS {
            for col in 0..COLUMNS {
                let point = Point::new(col as i32, row as i32);
                if !disc.contains(point) {
                    continue;
                }
                let dx = point.x - center.x;
                let lit = match phase % 8 {
                    0 => false,
                    1 => dx >= 2,
                    2 => dx >= 0,
                    3 => dx >= -2,
                    4 => true,
                    5 => dx <= 2,
                    6 => dx <= 0,
                    _ => dx <= -2,
                };
                if lit {
                    self.light(row, col);
                }
            }
        }
    }
}

/// Columns `text` spans when drawn with [`Mask::draw_chars`].
pub(crate) fn text_width(font: &MonoFont<'_>, text: &str, gap: i32) -> i32 {
    let count = text.chars().count() as i32;
    if count == 0 {
        return 0;
    }
    count * font.character_size.width as i32 + (count - 1) * gap
}

impl OriginDimensions for Mask {
    fn size(&self) -> Size {
        Size::new(COLUMNS as u32, ROWS as u32)
    }
}

impl DrawTarget for Mask {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if color.is_on() && coord.x >= 0 && coord.y >= 0 {
                self.light(coord.y as usize, coord.x as usize);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mono_font::ascii::FONT_5X7;

    #[test]
    fn two_glyphs_of_5x7_fill_the_width() {
        assert_eq!(text_width(&FONT_5X7, "07", 1), COLUMNS as i32);
        let mut mask = Mask::new();
        mask.draw_centered(&FONT_5X7, "88", 1, 1);
        assert!(mask.lit().all(|(row, col)| (1..8).contains(&row) && col != 5));
        assert!(mask.lit().any(|(_, col)| col < 5));
        assert!(mask.lit().any(|(_, col)| col > 5));
    }

    #[test]
    fn new_moon_is_only_an_outline_and_full_moon_is_a_disc() {
        let mut new_moon = Mask::new();
        new_moon.draw_moon(0);
        let mut full_moon = Mask::new();
        full_moon.draw_moon(4);
        let outline = new_moon.lit().count();
        let disc = full_moon.lit().count();
        assert!(outline > 0);
        assert!(disc > outline);
        assert!(new_moon.lit().all(|cell| full_moon.lit().any(|lit| lit == cell)));
    }

    #[test]
    fn drawing_off_the_grid_is_clipped() {
        let mut mask = Mask::new();
        mask.draw_chars(&FONT_5X7, "W", Point::new(-3, -2), 0);
        mask.draw_chars(&FONT_5X7, "W", Point::new(9, 8), 0);
        assert!(mask.lit().count() > 0);
    }
}
