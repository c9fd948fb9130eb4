//! Frame values: what every LED shows for one tick.
//!
//! [`Frame`] is addressed logically (grid cells and named specials) and is what the
//! renderer composes and the animator blends. [`StripFrame`] is the same content laid
//! out along the physical strip by a [`Topology`](crate::layout::Topology).

use smart_leds::RGB8;

use crate::color::Color;
use crate::layout::{COLUMNS, LED_COUNT, LogicalAddress, PhysicalIndex, ROWS, SPECIAL_COUNT};

/// Color plus brightness of one LED. Brightness 0 always means off.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pixel {
    /// Palette color.
    pub color: Color,
    /// `0` is off; other values are the already-clamped output level.
    pub brightness: u8,
}

impl Pixel {
    /// The unlit pixel. Every pixel with brightness 0 compares equal to this.
    pub const OFF: Self = Self {
        color: Color::White,
        brightness: 0,
    };

    /// Create a pixel, normalizing brightness 0 to [`Self::OFF`].
    #[must_use]
    pub const fn new(color: Color, brightness: u8) -> Self {
        if brightness == 0 {
            Self::OFF
        } else {
            Self { color, brightness }
        }
    }

    /// Whether this pixel is dark.
    #[must_use]
    pub const fn is_off(self) -> bool {
        self.brightness == 0
    }

    /// The same color at another brightness.
    #[must_use]
    pub const fn with_brightness(self, brightness: u8) -> Self {
        Self::new(self.color, brightness)
    }

    /// RGB value with brightness applied.
    #[must_use]
    pub const fn rgb(self) -> RGB8 {
        Self::scale_rgb(self.color.rgb(), self.brightness)
    }

    /// Scale a full-intensity RGB value to `brightness`.
    #[must_use]
    pub const fn scale_rgb(rgb: RGB8, brightness: u8) -> RGB8 {
        RGB8::new(
            scale(rgb.r, brightness),
            scale(rgb.g, brightness),
            scale(rgb.b, brightness),
        )
    }
}

impl Default for Pixel {
    fn default() -> Self {
        Self::OFF
    }
}

const fn scale(channel: u8, brightness: u8) -> u8 {
    ((channel as u16 * brightness as u16 + 127) / 255) as u8
}

/// One complete logical frame: 10×11 grid cells plus the special LEDs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Frame {
    grid: [[Pixel; COLUMNS]; ROWS],
    specials: [Pixel; SPECIAL_COUNT],
}

impl Frame {
    /// A frame with every LED off.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            grid: [[Pixel::OFF; COLUMNS]; ROWS],
            specials: [Pixel::OFF; SPECIAL_COUNT],
        }
    }

    /// A frame with every LED, specials included, set to `pixel`.
    #[must_use]
    pub const fn filled(pixel: Pixel) -> Self {
        Self {
            grid: [[pixel; COLUMNS]; ROWS],
            specials: [pixel; SPECIAL_COUNT],
        }
    }

    /// Pixel at `address`; addresses outside the grid read as off.
    #[must_use]
    pub fn get(&self, address: LogicalAddress) -> Pixel {
        match address {
            LogicalAddress::Grid { row, col } => self
                .grid
                .get(usize::from(row))
                .and_then(|cells| cells.get(usize::from(col)))
                .copied()
                .unwrap_or(Pixel::OFF),
            LogicalAddress::Special(special) => self
                .specials
                .get(special.slot())
                .copied()
                .unwrap_or(Pixel::OFF),
        }
    }

    /// Set the pixel at `address`; addresses outside the grid are ignored.
    pub fn set(&mut self, address: LogicalAddress, pixel: Pixel) {
        let slot = match address {
            LogicalAddress::Grid { row, col } => self
                .grid
                .get_mut(usize::from(row))
                .and_then(|cells| cells.get_mut(usize::from(col))),
            LogicalAddress::Special(special) => self.specials.get_mut(special.slot()),
        };
        if let Some(slot) = slot {
            *slot = Pixel::new(pixel.color, pixel.brightness);
        }
    }

    /// Pixel of a grid cell.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Pixel {
        self.grid
            .get(row)
            .and_then(|cells| cells.get(col))
            .copied()
            .unwrap_or(Pixel::OFF)
    }

    /// Addresses of every lit pixel, grid first in row-major order.
    pub fn lit(&self) -> impl Iterator<Item = LogicalAddress> + '_ {
        LogicalAddress::all().filter(|address| !self.get(*address).is_off())
    }

    /// Whether no pixel is lit.
    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.lit().next().is_none()
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

/// A frame laid out along the strip: one pixel per [`PhysicalIndex`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StripFrame {
    pixels: [Pixel; LED_COUNT],
}

impl StripFrame {
    /// All LEDs off.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pixels: [Pixel::OFF; LED_COUNT],
        }
    }

    pub(crate) fn set(&mut self, index: PhysicalIndex, pixel: Pixel) {
        if let Some(slot) = self.pixels.get_mut(index.get()) {
            *slot = pixel;
        }
    }

    /// Pixel at a physical index.
    #[must_use]
    pub fn get(&self, index: PhysicalIndex) -> Pixel {
        self.pixels.get(index.get()).copied().unwrap_or(Pixel::OFF)
    }

    /// Pixels in strip order.
    #[must_use]
    pub const fn pixels(&self) -> &[Pixel; LED_COUNT] {
        &self.pixels
    }
}

impl Default for StripFrame {
    fn default() -> Self {
        Self::new()
    }
}
