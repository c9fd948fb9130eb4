//! Layout Mapper: logical word-grid addresses to physical strip indices.
//!
//! A [`Topology`] is a fixed table built at compile time from a serpentine
//! [`LedLayout`] plus the strip positions reserved for the corner-minute and alarm
//! LEDs. Grid LEDs take the physical indices that are not reserved, in strip order.
//!
//! ```rust
//! use word_clock::layout::{LogicalAddress, PhysicalIndex, Special, Topology};
//!
//! let topology = Topology::HORIZONTAL_1;
//! assert_eq!(topology.resolve(LogicalAddress::grid(1, 0)), Some(PhysicalIndex::new(21)));
//! assert_eq!(
//!     topology.resolve(LogicalAddress::Special(Special::Alarm)),
//!     Some(PhysicalIndex::new(114))
//! );
//!
//! // Using the top-right minute LED as alarm LED removes that corner.
//! let shared = topology.with_alarm_on_corner();
//! assert_eq!(shared.resolve(LogicalAddress::Special(Special::CornerTopRight)), None);
//! ```

pub mod led_layout;

pub use led_layout::LedLayout;

use crate::frame::{Frame, StripFrame};

/// Columns of the word grid.
pub const COLUMNS: usize = 11;
/// Rows of the word grid.
pub const ROWS: usize = 10;
/// LEDs behind the word grid.
pub const GRID_LED_COUNT: usize = COLUMNS * ROWS;
/// Named special LEDs: four corner minutes and the alarm indicator.
pub const SPECIAL_COUNT: usize = 5;
/// LEDs on the strip.
pub const LED_COUNT: usize = GRID_LED_COUNT + SPECIAL_COUNT;

/// Serpentine layout of the word grid alone.
pub type GridLayout = LedLayout<GRID_LED_COUNT, COLUMNS, ROWS>;

/// Position on the physical strip, always in `0..LED_COUNT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhysicalIndex(u16);

impl PhysicalIndex {
    /// Wrap a strip position.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`LED_COUNT`].
    #[must_use]
    pub const fn new(index: u16) -> Self {
        assert!((index as usize) < LED_COUNT, "physical index out of range");
        Self(index)
    }

    /// Strip position as a `usize`.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0 as usize
    }
}

/// Named LEDs outside the word grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Special {
    /// Minute indicator in the top-left corner.
    CornerTopLeft,
    /// Minute indicator in the top-right corner.
    CornerTopRight,
    /// Minute indicator in the bottom-right corner.
    CornerBottomRight,
    /// Minute indicator in the bottom-left corner.
    CornerBottomLeft,
    /// Alarm indicator.
    Alarm,
}

impl Special {
    /// All specials in slot order.
    pub const ALL: [Self; SPECIAL_COUNT] = [
        Self::CornerTopLeft,
        Self::CornerTopRight,
        Self::CornerBottomRight,
        Self::CornerBottomLeft,
        Self::Alarm,
    ];

    /// Corner minutes clockwise from the top-left.
    pub const CORNERS: [Self; 4] = [
        Self::CornerTopLeft,
        Self::CornerTopRight,
        Self::CornerBottomRight,
        Self::CornerBottomLeft,
    ];

    pub(crate) const fn slot(self) -> usize {
        self as usize
    }
}

/// Where content is drawn before wiring is taken into account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LogicalAddress {
    /// A cell of the word grid; `(0, 0)` is the top-left letter as seen from the front.
    Grid {
        /// Row, `0..ROWS`.
        row: u8,
        /// Column, `0..COLUMNS`.
        col: u8,
    },
    /// One of the named special LEDs.
    Special(Special),
}

impl LogicalAddress {
    /// Grid cell shorthand.
    #[must_use]
    pub const fn grid(row: u8, col: u8) -> Self {
        Self::Grid { row, col }
    }

    /// Every logical address a frame can hold, grid cells first in row-major order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..ROWS)
            .flat_map(|row| (0..COLUMNS).map(move |col| (row, col)))
            .filter_map(|(row, col)| Some(Self::grid(u8::try_from(row).ok()?, u8::try_from(col).ok()?)))
            .chain(Special::ALL.into_iter().map(Self::Special))
    }
}

/// A fixed wiring table for 110 grid cells and up to five special LEDs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Topology {
    grid: [u16; GRID_LED_COUNT],
    specials: [Option<u16>; SPECIAL_COUNT],
}

impl Topology {
    /// Horizontal serpentine; corner and alarm LEDs at the end of the strip.
    ///
    /// ```text
    /// 111                    114                    112
    ///    000 001 002 003 004 005 006 007 008 009 010
    ///    021 020 019 018 017 016 015 014 013 012 011
    ///    ...
    ///    109 108 107 106 105 104 103 102 101 100 099
    /// 110                                           113
    /// ```
    pub const HORIZONTAL_1: Self = Self::new(
        GridLayout::serpentine_row_major(),
        [Some(111), Some(112), Some(113), Some(110), Some(114)],
    );

    /// Vertical serpentine; corner and alarm LEDs (almost) within the strip.
    ///
    /// ```text
    /// 000                    114                    102
    ///    001 021 022 041 042 061 062 081 082 101 103
    ///    ...
    ///    010 012 031 032 051 052 071 072 091 092 112
    /// 011                                           113
    /// ```
    pub const VERTICAL_1: Self = Self::new(
        GridLayout::serpentine_column_major(),
        [Some(0), Some(102), Some(113), Some(11), Some(114)],
    );

    /// Vertical serpentine entering bottom-left; specials at the end of the strip.
    ///
    /// ```text
    /// 112                    111                    110
    ///    009 010 029 030 049 050 069 070 089 090 109
    ///    ...
    ///    000 019 020 039 040 059 060 079 080 099 100
    /// 113                                           114
    /// ```
    pub const VERTICAL_2: Self = Self::new(
        GridLayout::serpentine_column_major().flip_v(),
        [Some(112), Some(110), Some(114), Some(113), Some(111)],
    );

    /// Same grid as [`Self::VERTICAL_2`] with the specials wired in a different order.
    ///
    /// ```text
    /// 111                    114                    110
    ///    ...
    /// 112                                           113
    /// ```
    pub const VERTICAL_3: Self = Self::new(
        GridLayout::serpentine_column_major().flip_v(),
        [Some(111), Some(110), Some(113), Some(112), Some(114)],
    );

    /// Build a topology from a grid layout and the strip positions of the specials
    /// (in [`Special::ALL`] order, `None` when the build has no such LED).
    ///
    /// Grid LEDs occupy the physical indices not reserved for specials, in strip order.
    ///
    /// # Panics
    ///
    /// Panics (at compile time when used in a `const`) if a special is out of range
    /// or two specials share a physical index.
    #[must_use]
    pub const fn new(layout: GridLayout, specials: [Option<u16>; SPECIAL_COUNT]) -> Self {
        let mut reserved = [false; LED_COUNT];
        let mut slot = 0;
        while slot < SPECIAL_COUNT {
            if let Some(index) = specials[slot] {
                let index = index as usize;
                assert!(index < LED_COUNT, "special LED out of range");
                assert!(!reserved[index], "two specials share a physical index");
                reserved[index] = true;
            }
            slot += 1;
        }

        let mut order_to_physical = [0u16; GRID_LED_COUNT];
        let mut order = 0;
        let mut physical = 0;
        while physical < LED_COUNT && order < GRID_LED_COUNT {
            if !reserved[physical] {
                order_to_physical[order] = physical as u16;
                order += 1;
            }
            physical += 1;
        }
        assert!(order == GRID_LED_COUNT, "not enough strip positions for the grid");

        let cell_to_order = layout.strip_order();
        let mut grid = [0u16; GRID_LED_COUNT];
        let mut cell = 0;
        while cell < GRID_LED_COUNT {
            grid[cell] = order_to_physical[cell_to_order[cell] as usize];
            cell += 1;
        }

        Self { grid, specials }
    }

    /// Use the top-right minute LED as alarm indicator; that corner becomes absent.
    #[must_use]
    pub const fn with_alarm_on_corner(self) -> Self {
        let mut specials = self.specials;
        specials[Special::Alarm.slot()] = specials[Special::CornerTopRight.slot()];
        specials[Special::CornerTopRight.slot()] = None;
        Self {
            grid: self.grid,
            specials,
        }
    }

    /// Translate a logical address, or `None` when this topology has no such LED.
    ///
    /// Callers treat `None` as a silent no-op.
    #[must_use]
    pub const fn resolve(&self, address: LogicalAddress) -> Option<PhysicalIndex> {
        match address {
            LogicalAddress::Grid { row, col } => {
                let (row, col) = (row as usize, col as usize);
                if row >= ROWS || col >= COLUMNS {
                    return None;
                }
                Some(PhysicalIndex(self.grid[row * COLUMNS + col]))
            }
            LogicalAddress::Special(special) => match self.specials[special.slot()] {
                Some(index) => Some(PhysicalIndex(index)),
                None => None,
            },
        }
    }

    /// Physical indices this topology claims, in logical order.
    pub fn claimed(&self) -> impl Iterator<Item = PhysicalIndex> + '_ {
        LogicalAddress::all().filter_map(|address| self.resolve(address))
    }

    /// Lay a logical frame out along the strip. Unclaimed indices stay off.
    #[must_use]
    pub fn to_strip(&self, frame: &Frame) -> StripFrame {
        let mut strip = StripFrame::new();
        for address in LogicalAddress::all() {
            if let Some(index) = self.resolve(address) {
                strip.set(index, frame.get(address));
            }
        }
        strip
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self::HORIZONTAL_1
    }
}
