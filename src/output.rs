//! Physical strip output: gamma correction and changed-pixel writes.
//!
//! The control loop hands a [`StripFrame`] to a [`StripSync`], which writes only the
//! pixels that differ from what was last shown and then latches with one `show()`.
//!
//! Any `smart_leds::SmartLedsWrite` driver becomes a [`StripOutput`] through
//! [`SmartLedsOutput`].

use smart_leds::{RGB8, SmartLedsWrite};

use crate::frame::{Pixel, StripFrame};
use crate::layout::{LED_COUNT, PhysicalIndex};
use crate::{Error, Result};

// ============================================================================
// Gamma Correction
// ============================================================================

/// Gamma correction mode for the strip.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gamma {
    /// Linear gamma (no correction). Gamma = 1.0
    Linear,
    /// Standard gamma 2.2 correction for perceived brightness.
    #[default]
    Gamma2_2,
}

/// Gamma 2.2 lookup table for 8-bit values.
/// Pre-computed to avoid floating point math: corrected = (value/255)^2.2 * 255
const GAMMA_2_2_TABLE: [u8; 256] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 2,
    3, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 6, 6, 6, 6, 7, 7, 7, 8, 8, 8, 9, 9, 9, 10, 10, 11, 11,
    11, 12, 12, 13, 13, 13, 14, 14, 15, 15, 16, 16, 17, 17, 18, 18, 19, 19, 20, 20, 21, 22, 22, 23,
    23, 24, 25, 25, 26, 26, 27, 28, 28, 29, 30, 30, 31, 32, 33, 33, 34, 35, 35, 36, 37, 38, 39, 39,
    40, 41, 42, 43, 43, 44, 45, 46, 47, 48, 49, 49, 50, 51, 52, 53, 54, 55, 56, 57, 58, 59, 60, 61,
    62, 63, 64, 65, 66, 67, 68, 69, 70, 71, 73, 74, 75, 76, 77, 78, 79, 81, 82, 83, 84, 85, 87, 88,
    89, 90, 91, 93, 94, 95, 97, 98, 99, 100, 102, 103, 105, 106, 107, 109, 110, 111, 113, 114, 116,
    117, 119, 120, 121, 123, 124, 126, 127, 129, 130, 132, 133, 135, 137, 138, 140, 141, 143, 145,
    146, 148, 149, 151, 153, 154, 156, 158, 159, 161, 163, 165, 166, 168, 170, 172, 173, 175, 177,
    179, 181, 182, 184, 186, 188, 190, 192, 194, 196, 197, 199, 201, 203, 205, 207, 209, 211, 213,
    215, 217, 219, 221, 223, 225, 227, 229, 231, 234, 236, 238, 240, 242, 244, 246, 248, 251, 253,
    255,
];

/// Build the output lookup table for `gamma`.
#[must_use]
pub const fn gamma_table(gamma: Gamma) -> [u8; 256] {
    let mut result = [0u8; 256];
    let mut index = 0;
    while index < 256 {
        result[index] = match gamma {
            Gamma::Linear => index as u8,
            Gamma::Gamma2_2 => GAMMA_2_2_TABLE[index],
        };
        index += 1;
    }
    result
}

/// Where frames end up: an addressable strip that latches on `show`.
pub trait StripOutput {
    /// Stage `color` at `brightness` (0 is off) for the LED at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver rejects the pixel.
    fn set_pixel(&mut self, index: PhysicalIndex, color: RGB8, brightness: u8) -> Result<()>;

    /// Latch every staged pixel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StripWrite`] if the driver fails.
    fn show(&mut self) -> Result<()>;
}

/// Adapts a `smart_leds` driver, applying brightness and gamma in software.
pub struct SmartLedsOutput<W> {
    writer: W,
    buffer: [RGB8; LED_COUNT],
    table: [u8; 256],
}

impl<W> SmartLedsOutput<W>
where
    W: SmartLedsWrite<Color = RGB8>,
{
    /// Wrap `writer` with the given gamma curve.
    #[must_use]
    pub const fn new(writer: W, gamma: Gamma) -> Self {
        Self {
            writer,
            buffer: [RGB8::new(0, 0, 0); LED_COUNT],
            table: gamma_table(gamma),
        }
    }

    /// Corrected values staged for the next `show`.
    #[must_use]
    pub const fn buffer(&self) -> &[RGB8; LED_COUNT] {
        &self.buffer
    }

    /// Borrow the driver.
    #[must_use]
    pub const fn writer(&self) -> &W {
        &self.writer
    }

    fn correct(&self, channel: u8) -> u8 {
        self.table.get(usize::from(channel)).copied().unwrap_or(channel)
    }
}

impl<W> StripOutput for SmartLedsOutput<W>
where
    W: SmartLedsWrite<Color = RGB8>,
{
    fn set_pixel(&mut self, index: PhysicalIndex, color: RGB8, brightness: u8) -> Result<()> {
        let scaled = Pixel::scale_rgb(color, brightness);
        let corrected = RGB8::new(
            self.correct(scaled.r),
            self.correct(scaled.g),
            self.correct(scaled.b),
        );
        let slot = self
            .buffer
            .get_mut(index.get())
            .ok_or(Error::IndexOutOfBounds)?;
        *slot = corrected;
        Ok(())
    }

    fn show(&mut self) -> Result<()> {
        self.writer
            .write(self.buffer.iter().copied())
            .map_err(|_| Error::StripWrite)
    }
}

/// Tracks what the strip shows and writes only differences.
#[derive(Clone, Debug, Default)]
pub struct StripSync {
    shown: Option<StripFrame>,
}

impl StripSync {
    /// Nothing shown yet; the first [`present`](Self::present) writes every LED.
    #[must_use]
    pub const fn new() -> Self {
        Self { shown: None }
    }

    /// Write every pixel of `strip` that changed, then `show()` once.
    ///
    /// Returns how many pixels were written. `show()` runs even when none changed.
    ///
    /// # Errors
    ///
    /// Returns the output's error. The next present then rewrites every LED.
    pub fn present<O: StripOutput + ?Sized>(
        &mut self,
        output: &mut O,
        strip: &StripFrame,
    ) -> Result<usize> {
        let previous = self.shown.take();
        let mut written = 0usize;
        for (index, pixel) in strip.pixels().iter().enumerate() {
            let unchanged = previous
                .as_ref()
                .and_then(|shown| shown.pixels().get(index))
                .is_some_and(|shown| shown == pixel);
            if unchanged {
                continue;
            }
            let index = u16::try_from(index).map_err(|_| Error::IndexOutOfBounds)?;
            output.set_pixel(PhysicalIndex::new(index), pixel.color.rgb(), pixel.brightness)?;
            written += 1;
        }
        output.show()?;
        trace!("Output: wrote {} pixels", written);
        self.shown = Some(*strip);
        Ok(written)
    }
}
