//! Serpentine wiring of the word grid.
//!
//! Word clocks are wired as one continuous strip snaking through the letter grid,
//! either along the rows or along the columns. [`LedLayout`] captures that order
//! for the grid LEDs only; [`Topology`](crate::layout::Topology) then interleaves
//! the corner-minute and alarm LEDs.

/// Strip order of the LEDs behind a `W`×`H` grid.
///
/// Entry `i` is the `(col, row)` cell lit by the `i`-th grid LED along the strip.
/// `(0, 0)` is the top-left letter as seen from the front.
///
/// Every constructor checks that each cell is wired exactly once, so a bad table
/// in a `const` fails the build.
///
/// ```rust
/// use word_clock::layout::LedLayout;
///
/// // Enters at the bottom-left and snakes up and down the columns.
/// const WIRED: LedLayout<6, 3, 2> = LedLayout::serpentine_column_major().flip_v();
/// assert_eq!(
///     *WIRED.cells(),
///     [(0, 1), (0, 0), (1, 0), (1, 1), (2, 1), (2, 0)]
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LedLayout<const N: usize, const W: usize, const H: usize> {
    cells: [(u16, u16); N],
}

#[derive(Clone, Copy)]
enum Run {
    Rows,
    Columns,
}

impl<const N: usize, const W: usize, const H: usize> LedLayout<N, W, H> {
    /// Wrap an explicit strip-order table.
    ///
    /// # Panics
    ///
    /// Panics if a cell lies outside the grid, is wired twice, or `N != W * H`.
    #[must_use]
    pub const fn new(cells: [(u16, u16); N]) -> Self {
        assert!(W > 0 && H > 0 && W * H == N, "layout size must be W*H");
        assert!(N <= u16::MAX as usize, "layout too large for u16 indices");
        let mut wired = [false; N];
        let mut order = 0;
        while order < N {
            let (col, row) = cells[order];
            assert!((col as usize) < W && (row as usize) < H, "cell outside the grid");
            let cell = row as usize * W + col as usize;
            assert!(!wired[cell], "grid cell wired twice");
            wired[cell] = true;
            order += 1;
        }
        // N distinct cells of a W*H == N grid cover all of it.
        Self { cells }
    }

    /// Rows alternate direction: even rows left to right, odd rows right to left.
    ///
    /// ```text
    ///   0 1 2
    ///   5 4 3
    /// ```
    #[must_use]
    pub const fn serpentine_row_major() -> Self {
        Self::serpentine(Run::Rows)
    }

    /// Columns alternate direction: even columns downward, odd columns upward.
    ///
    /// ```text
    ///   0 3 4
    ///   1 2 5
    /// ```
    #[must_use]
    pub const fn serpentine_column_major() -> Self {
        Self::serpentine(Run::Columns)
    }

    const fn serpentine(run: Run) -> Self {
        assert!(W > 0 && H > 0 && W * H == N, "layout size must be W*H");
        let lane_length = match run {
            Run::Rows => W,
            Run::Columns => H,
        };
        let mut cells = [(0u16, 0u16); N];
        let mut order = 0;
        while order < N {
            let lane = order / lane_length;
            let mut along = order % lane_length;
            if lane % 2 == 1 {
                along = lane_length - 1 - along;
            }
            cells[order] = match run {
                Run::Rows => (along as u16, lane as u16),
                Run::Columns => (lane as u16, along as u16),
            };
            order += 1;
        }
        Self::new(cells)
    }

    /// Mirror the rows, for strips that enter the grid at the bottom.
    #[must_use]
    pub const fn flip_v(self) -> Self {
        let mut cells = self.cells;
        let mut order = 0;
        while order < N {
            cells[order].1 = (H - 1) as u16 - cells[order].1;
            order += 1;
        }
        Self::new(cells)
    }

    /// The `(col, row)` cell of every grid LED, in strip order.
    #[must_use]
    pub const fn cells(&self) -> &[(u16, u16); N] {
        &self.cells
    }

    /// Position along the strip of every cell, indexed by `row * W + col`.
    #[must_use]
    pub const fn strip_order(&self) -> [u16; N] {
        let mut positions = [0u16; N];
        let mut order = 0;
        while order < N {
            let (col, row) = self.cells[order];
            positions[row as usize * W + col as usize] = order as u16;
            order += 1;
        }
        positions
    }
}
