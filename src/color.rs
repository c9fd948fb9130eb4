//! The closed color palette of the clock.
//!
//! Every lit LED carries one of these named colors plus a brightness. The RGB values
//! are the full-intensity base of each color; brightness scaling happens on output.

use serde::{Deserialize, Serialize};
use smart_leds::RGB8;

/// A named color from the fixed palette.
///
/// Variants with a `25`/`50` suffix are the base hue mixed 25 % / 50 % toward white.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    /// White.
    White,
    /// Red.
    Red,
    /// Red, 25 % white.
    Red25,
    /// Red, 50 % white.
    Red50,
    /// Orange.
    Orange,
    /// Yellow.
    Yellow,
    /// Yellow, 25 % white.
    Yellow25,
    /// Yellow, 50 % white.
    Yellow50,
    /// Yellow-green.
    GreenYellow,
    /// Green.
    Green,
    /// Green, 25 % white.
    Green25,
    /// Green, 50 % white.
    Green50,
    /// Mint green.
    MintGreen,
    /// Cyan.
    Cyan,
    /// Cyan, 25 % white.
    Cyan25,
    /// Cyan, 50 % white.
    Cyan50,
    /// Light blue.
    LightBlue,
    /// Blue.
    Blue,
    /// Blue, 25 % white.
    Blue25,
    /// Blue, 50 % white.
    Blue50,
    /// Violet.
    Violet,
    /// Magenta.
    Magenta,
    /// Magenta, 25 % white.
    Magenta25,
    /// Magenta, 50 % white.
    Magenta50,
    /// Pink.
    Pink,
}

impl Color {
    /// Number of colors in the palette.
    pub const COUNT: usize = 25;

    /// Every palette member in declaration order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::White,
        Self::Red,
        Self::Red25,
        Self::Red50,
        Self::Orange,
        Self::Yellow,
        Self::Yellow25,
        Self::Yellow50,
        Self::GreenYellow,
        Self::Green,
        Self::Green25,
        Self::Green50,
        Self::MintGreen,
        Self::Cyan,
        Self::Cyan25,
        Self::Cyan50,
        Self::LightBlue,
        Self::Blue,
        Self::Blue25,
        Self::Blue50,
        Self::Violet,
        Self::Magenta,
        Self::Magenta25,
        Self::Magenta50,
        Self::Pink,
    ];

    /// Full-intensity RGB value of this color.
    #[must_use]
    pub const fn rgb(self) -> RGB8 {
        let (r, g, b) = match self {
            Self::White => (0xFF, 0xFF, 0xFF),
            Self::Red => (0xFF, 0x00, 0x00),
            Self::Red25 => (0xFF, 0x40, 0x40),
            Self::Red50 => (0xFF, 0x80, 0x80),
            Self::Orange => (0xFF, 0x7F, 0x00),
            Self::Yellow => (0xFF, 0xFF, 0x00),
            Self::Yellow25 => (0xFF, 0xFF, 0x40),
            Self::Yellow50 => (0xFF, 0xFF, 0x80),
            Self::GreenYellow => (0x7F, 0xFF, 0x00),
            Self::Green => (0x00, 0xFF, 0x00),
            Self::Green25 => (0x40, 0xFF, 0x40),
            Self::Green50 => (0x80, 0xFF, 0x80),
            Self::MintGreen => (0x00, 0xFF, 0x7F),
            Self::Cyan => (0x00, 0xFF, 0xFF),
            Self::Cyan25 => (0x40, 0xFF, 0xFF),
            Self::Cyan50 => (0x80, 0xFF, 0xFF),
            Self::LightBlue => (0x00, 0x7F, 0xFF),
            Self::Blue => (0x00, 0x00, 0xFF),
            Self::Blue25 => (0x40, 0x40, 0xFF),
            Self::Blue50 => (0x80, 0x80, 0xFF),
            Self::Violet => (0x7F, 0x00, 0xFF),
            Self::Magenta => (0xFF, 0x00, 0xFF),
            Self::Magenta25 => (0xFF, 0x40, 0xFF),
            Self::Magenta50 => (0xFF, 0x80, 0xFF),
            Self::Pink => (0xFF, 0x00, 0x7F),
        };
        RGB8::new(r, g, b)
    }

    /// Position of this color in [`Self::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The color `steps` places further along the palette, wrapping around.
    #[must_use]
    pub const fn rotated(self, steps: u32) -> Self {
        let offset = (steps % Self::COUNT as u32) as usize;
        Self::ALL[(self.index() + offset) % Self::COUNT]
    }

    /// The next color along the palette, wrapping from `Pink` back to `White`.
    #[must_use]
    pub const fn next(self) -> Self {
        self.rotated(1)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::White
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_declaration_order() {
        for (index, color) in Color::ALL.iter().enumerate() {
            assert_eq!(color.index(), index);
        }
    }

    #[test]
    fn rotation_wraps_around_the_palette() {
        assert_eq!(Color::Pink.next(), Color::White);
        assert_eq!(Color::Cyan.rotated(Color::COUNT as u32), Color::Cyan);
        assert_eq!(Color::White.rotated(13), Color::Cyan);
    }

    #[test]
    fn tinted_variants_keep_their_base_channel() {
        assert_eq!(Color::Cyan25.rgb(), RGB8::new(0x40, 0xFF, 0xFF));
        assert_eq!(Color::Yellow25.rgb().b, 0x40);
    }
}
