//! Transition Animator: morphs the displayed frame into a newly composed one.
//!
//! [`blend`] is the pure rule for one intermediate frame. [`Animator`] holds the
//! frame pair and the progress, and refuses a new target while a transition is
//! in flight unless the caller cancels it first.

use crate::frame::{Frame, Pixel};
use crate::layout::{COLUMNS, LogicalAddress, ROWS, Special};
use crate::settings::Transition;
use crate::{Error, Result};

/// Steps of a `MoveUp` transition: one row per step.
pub const MOVE_UP_STEPS: u16 = ROWS as u16;

/// Steps of a `Fade` transition.
pub const FADE_STEPS: u16 = 16;

/// Steps `style` takes to reach the target; `Normal` has none.
#[must_use]
pub const fn step_count(style: Transition) -> u16 {
    match style {
        Transition::Normal => 0,
        Transition::MoveUp => MOVE_UP_STEPS,
        Transition::Fade => FADE_STEPS,
    }
}

/// Frame `step` of `style` on the way from `prev` to `target`.
///
/// Step 0 is `prev`; from [`step_count`] on the result is `target`.
#[must_use]
pub fn blend(prev: &Frame, target: &Frame, style: Transition, step: u16) -> Frame {
    let steps = step_count(style);
    if step >= steps {
        return *target;
    }
    if step == 0 {
        return *prev;
    }
    match style {
        Transition::Normal => *target,
        Transition::MoveUp => move_up(prev, target, usize::from(step)),
        Transition::Fade => {
            let mut frame = Frame::new();
            for address in LogicalAddress::all() {
                frame.set(
                    address,
                    fade(prev.get(address), target.get(address), step, steps),
                );
            }
            frame
        }
    }
}

// Changed columns scroll up: old content leaves at the top, new content enters at the bottom.
fn move_up(prev: &Frame, target: &Frame, shift: usize) -> Frame {
    let mut frame = *target;
    for col in 0..COLUMNS {
        let changed = (0..ROWS).any(|row| prev.cell(row, col) != target.cell(row, col));
        if !changed {
            continue;
        }
        for row in 0..ROWS {
            let source = row + shift;
            let pixel = if source < ROWS {
                prev.cell(source, col)
            } else {
                target.cell(source - ROWS, col)
            };
            frame.set(grid(row, col), pixel);
        }
    }
    for special in Special::ALL {
        frame.set(LogicalAddress::Special(special), target.get(LogicalAddress::Special(special)));
    }
    frame
}

fn fade(prev: Pixel, target: Pixel, step: u16, steps: u16) -> Pixel {
    if prev == target {
        return target;
    }
    if prev.is_off() {
        return target.with_brightness(lerp(0, target.brightness, step, steps));
    }
    if target.is_off() || prev.color == target.color {
        return prev.with_brightness(lerp(prev.brightness, target.brightness, step, steps));
    }
    // Different colors: fade the old one out, then the new one in.
    let half = steps / 2;
    if step < half {
        prev.with_brightness(lerp(prev.brightness, 0, step, half))
    } else {
        target.with_brightness(lerp(0, target.brightness, step - half, steps - half))
    }
}

fn lerp(from: u8, to: u8, step: u16, steps: u16) -> u8 {
    let (from, to) = (i32::from(from), i32::from(to));
    let value = from + (to - from) * i32::from(step) / i32::from(steps.max(1));
    u8::try_from(value.clamp(0, 255)).unwrap_or(u8::MAX)
}

fn grid(row: usize, col: usize) -> LogicalAddress {
    LogicalAddress::grid(
        u8::try_from(row).unwrap_or(u8::MAX),
        u8::try_from(col).unwrap_or(u8::MAX),
    )
}

/// The current/target frame pair and the progress between them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Animator {
    start: Frame,
    current: Frame,
    target: Frame,
    style: Transition,
    step: u16,
}

impl Animator {
    /// An idle animator showing `frame`.
    #[must_use]
    pub const fn new(frame: Frame) -> Self {
        Self {
            start: frame,
            current: frame,
            target: frame,
            style: Transition::Normal,
            step: 0,
        }
    }

    /// The frame on display.
    #[must_use]
    pub const fn current(&self) -> &Frame {
        &self.current
    }

    /// The frame being approached, or the current one when idle.
    #[must_use]
    pub const fn target(&self) -> &Frame {
        &self.target
    }

    /// Style of the running or last transition.
    #[must_use]
    pub const fn style(&self) -> Transition {
        self.style
    }

    /// Whether steps remain before `current` equals `target`.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.step < step_count(self.style)
    }

    /// Start a transition from the current frame to `target`.
    ///
    /// `Normal` commits `target` at once. Offering the frame already targeted is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TransitionInProgress`] if another target is still being
    /// approached; call [`cancel`](Self::cancel) first to abandon it.
    pub fn retarget(&mut self, target: Frame, style: Transition) -> Result<()> {
        if target == self.target {
            return Ok(());
        }
        if self.is_animating() {
            return Err(Error::TransitionInProgress);
        }
        self.start = self.current;
        self.target = target;
        self.style = style;
        self.step = 0;
        if !self.is_animating() {
            self.current = target;
        }
        trace!("Animator: transition {:?} started", style);
        Ok(())
    }

    /// Snap to the target, dropping the remaining steps.
    pub fn cancel(&mut self) {
        if self.is_animating() {
            debug!("Animator: transition cancelled at step {}", self.step);
        }
        self.current = self.target;
        self.step = step_count(self.style);
    }

    /// Advance one step and return the frame to show.
    ///
    /// Once the target is reached further calls return it unchanged.
    pub fn step(&mut self) -> &Frame {
        if self.is_animating() {
            self.step = self.step.saturating_add(1);
            self.current = blend(&self.start, &self.target, self.style, self.step);
        }
        &self.current
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::new(Frame::new())
    }
}
