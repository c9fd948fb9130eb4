//! Mode Sequencer: which mode is shown, and when that changes.
//!
//! The cycle is the runtime list of [`EnabledModes`]. On top of the cyclic mode sit
//! two overlays that never change it: `Blank` (display off until turned on again)
//! and `Feed` (scrolling text that ends on its own). Every clock decision is made
//! in [`Sequencer::tick`] from an `Instant` and a [`Snapshot`] the caller supplies.

use embassy_time::{Duration, Instant};

use crate::alarm::{Beep, due_beep, minute_of_day};
use crate::color::Color;
use crate::config::ClockConfig;
use crate::domain::Snapshot;
use crate::event::{self, Event, FeedText};
use crate::layout::COLUMNS;
use crate::mode::{EnabledModes, Mode};
use crate::render::Scene;
use crate::settings::Settings;
use crate::Result;

/// Columns one character of feed text occupies.
pub const FEED_GLYPH_WIDTH: u16 = 6;

/// Scrolling text and how far it has moved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feed {
    text: FeedText,
    color: Color,
    offset: u16,
}

impl Feed {
    /// Text entering from the right edge.
    #[must_use]
    pub const fn new(text: FeedText, color: Color) -> Self {
        Self {
            text,
            color,
            offset: 0,
        }
    }

    /// The text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text color.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Columns scrolled so far.
    #[must_use]
    pub const fn offset(&self) -> u16 {
        self.offset
    }

    /// Columns to scroll until the last character has left the grid.
    #[must_use]
    pub fn width(&self) -> u16 {
        let chars = u16::try_from(self.text.chars().count()).unwrap_or(u16::MAX);
        chars.saturating_mul(FEED_GLYPH_WIDTH).saturating_add(COLUMNS as u16)
    }

    /// Whether the text has scrolled out.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.offset >= self.width()
    }

    fn step(&mut self) {
        self.offset = self.offset.saturating_add(1);
    }
}

/// A user input from buttons or a remote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Input {
    /// Toggle the display.
    OnOff,
    /// Next mode.
    Mode,
    /// Back to the time.
    Time,
}

/// Intervals the sequencer works with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    /// Interval of the automatic mode cycle.
    pub auto_mode_change: Duration,
    /// Interval between event feeds; `None` disables events.
    pub event_interval: Option<Duration>,
    /// Time per one-column scroll of a feed.
    pub feed_step: Duration,
}

impl From<&ClockConfig> for Timing {
    fn from(config: &ClockConfig) -> Self {
        Self {
            auto_mode_change: config.auto_mode_change,
            event_interval: config.event_interval,
            feed_step: config.feed_step,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Overlay {
    Blank,
    Feed { feed: Feed, last_step: Instant },
}

/// The mode state machine.
#[derive(Clone, Debug)]
pub struct Sequencer {
    modes: EnabledModes,
    timing: Timing,
    current: Mode,
    overlay: Option<Overlay>,
    last_advance: Instant,
    manual_since: Option<Instant>,
    last_event: Option<Instant>,
    last_minute: Option<(time::Date, u16)>,
    color_step: u32,
    timer_end: Option<Instant>,
}

impl Sequencer {
    /// Start at [`Mode::Time`] with the automatic timer running from `now`.
    #[must_use]
    pub const fn new(modes: EnabledModes, timing: Timing, now: Instant) -> Self {
        Self {
            modes,
            timing,
            current: Mode::Time,
            overlay: None,
            last_advance: now,
            manual_since: None,
            last_event: None,
            last_minute: None,
            color_step: 0,
            timer_end: None,
        }
    }

    /// The cyclic mode, ignoring overlays.
    #[must_use]
    pub const fn current(&self) -> Mode {
        self.current
    }

    /// What is on the display: `Blank`, `Feed`, or the cyclic mode.
    #[must_use]
    pub const fn displayed(&self) -> Mode {
        match self.overlay {
            Some(Overlay::Blank) => Mode::Blank,
            Some(Overlay::Feed { .. }) => Mode::Feed,
            None => self.current,
        }
    }

    /// The enabled cycle.
    #[must_use]
    pub const fn modes(&self) -> &EnabledModes {
        &self.modes
    }

    /// Whether the display is turned off.
    #[must_use]
    pub const fn is_blank(&self) -> bool {
        matches!(self.overlay, Some(Overlay::Blank))
    }

    /// The running feed.
    #[must_use]
    pub const fn feed(&self) -> Option<&Feed> {
        match &self.overlay {
            Some(Overlay::Feed { feed, .. }) => Some(feed),
            _ => None,
        }
    }

    /// Completed mode cycles, for [`ColorChange::ModeCycle`](crate::settings::ColorChange::ModeCycle).
    #[must_use]
    pub const fn color_step(&self) -> u32 {
        self.color_step
    }

    /// Time left on the countdown timer, `None` when none is running.
    #[must_use]
    pub fn timer_remaining(&self, now: Instant) -> Option<Duration> {
        self.timer_end.map(|end| end.saturating_duration_since(now))
    }

    /// Everything the renderer needs from the sequencer at `now`.
    #[must_use]
    pub fn scene(&self, now: Instant) -> Scene {
        Scene {
            mode: self.displayed(),
            feed: self.feed().cloned(),
            color_step: self.color_step,
            timer_minutes: self.timer_remaining(now).map(|left| {
                let minutes = left.as_secs().div_ceil(60);
                u16::try_from(minutes).unwrap_or(u16::MAX)
            }),
        }
    }

    /// Manual advance: next available mode now, automatic timer restarted.
    ///
    /// Ends a running feed. Ignored while blank.
    pub fn advance(&mut self, now: Instant, snapshot: &Snapshot) {
        if self.is_blank() {
            debug!("Sequencer: advance ignored while blank");
            return;
        }
        self.overlay = None;
        self.step_cycle(snapshot);
        self.manual_since = Some(now);
        self.last_advance = now;
        info!("Sequencer: manual advance to {:?}", self.current);
    }

    /// Back to [`Mode::Time`]; ends a running feed.
    pub fn go_to_time(&mut self, now: Instant) {
        if matches!(self.overlay, Some(Overlay::Feed { .. })) {
            self.overlay = None;
        }
        self.current = Mode::Time;
        self.manual_since = None;
        self.last_advance = now;
    }

    /// Blank the display until [`turn_on`](Self::turn_on).
    pub fn turn_off(&mut self) {
        if !self.is_blank() {
            self.overlay = Some(Overlay::Blank);
            info!("Sequencer: display off");
        }
    }

    /// Leave `Blank`, resuming the cyclic mode that was active.
    pub fn turn_on(&mut self, now: Instant) {
        if self.is_blank() {
            self.overlay = None;
            self.last_advance = now;
            info!("Sequencer: display on, resuming {:?}", self.current);
        }
    }

    /// Toggle between blank and on.
    pub fn toggle_power(&mut self, now: Instant) {
        if self.is_blank() {
            self.turn_on(now);
        } else {
            self.turn_off();
        }
    }

    /// Apply a user input.
    pub fn handle_input(&mut self, input: Input, now: Instant, snapshot: &Snapshot) {
        match input {
            Input::OnOff => self.toggle_power(now),
            Input::Mode => self.advance(now, snapshot),
            Input::Time => self.go_to_time(now),
        }
    }

    /// Scroll `text` once across the display, then resume. Ignored while blank.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FeedTooLong`](crate::Error::FeedTooLong) if the text does not fit.
    pub fn show_text(&mut self, text: &str, color: Color, now: Instant) -> Result<()> {
        let mut feed_text = FeedText::new();
        feed_text
            .push_str(text)
            .map_err(|()| crate::Error::FeedTooLong)?;
        if self.is_blank() {
            debug!("Sequencer: feed ignored while blank");
            return Ok(());
        }
        self.start_feed(feed_text, color, now);
        Ok(())
    }

    /// Start a countdown of `minutes`.
    pub fn start_timer(&mut self, minutes: u16, now: Instant) {
        let length = Duration::from_secs(u64::from(minutes).saturating_mul(60));
        self.timer_end = Some(now.checked_add(length).unwrap_or(Instant::MAX));
        info!("Sequencer: timer set to {} min", minutes);
    }

    /// Cancel the countdown.
    pub fn stop_timer(&mut self) {
        self.timer_end = None;
    }

    /// Advance every timer to `now`. Returns the beep the buzzer should sound, if any.
    pub fn tick(
        &mut self,
        now: Instant,
        snapshot: &Snapshot,
        settings: &Settings,
        events: &[Event],
    ) -> Option<Beep> {
        let mut beep = None;

        if self.timer_end.is_some_and(|end| now >= end) {
            self.timer_end = None;
            beep = Some(Beep::Timer);
            info!("Sequencer: timer elapsed");
        }

        if let Some(at) = snapshot.time {
            let key = (at.date(), minute_of_day(at));
            if self.last_minute != Some(key) {
                self.last_minute = Some(key);
                let minute = u32::from(key.1);
                if settings.night_off_time != settings.day_on_time {
                    if minute == settings.night_off_time / 60 {
                        self.turn_off();
                    }
                    if minute == settings.day_on_time / 60 {
                        self.turn_on(now);
                    }
                }
                if let Some(due) = due_beep(settings, at) {
                    beep = Some(due);
                }
            }
        }

        if let Some(Overlay::Feed { feed, last_step }) = &mut self.overlay {
            if now.saturating_duration_since(*last_step) >= self.timing.feed_step {
                feed.step();
                *last_step = now;
            }
            if feed.is_done() {
                self.overlay = None;
                self.last_advance = now;
                debug!("Sequencer: feed done, resuming {:?}", self.current);
            }
        }

        self.schedule_event(now, snapshot, events);

        if self.overlay.is_none() {
            self.check_timeout(now, settings);
            if settings.mode_change
                && now.saturating_duration_since(self.last_advance) >= self.timing.auto_mode_change
            {
                self.step_cycle(snapshot);
                self.last_advance = now;
                debug!("Sequencer: auto advance to {:?}", self.current);
            }
        }

        if !self.is_available(self.current, snapshot) {
            let fallback = self.next_available(self.current, snapshot);
            debug!(
                "Sequencer: {:?} unavailable, showing {:?}",
                self.current, fallback
            );
            self.current = fallback;
        }

        beep
    }

    fn schedule_event(&mut self, now: Instant, snapshot: &Snapshot, events: &[Event]) {
        let (Some(interval), Some(at), None) = (self.timing.event_interval, snapshot.time, &self.overlay)
        else {
            return;
        };
        let Some(event) = event::find(events, at.date()) else {
            return;
        };
        if !self
            .last_event
            .is_none_or(|shown| now.saturating_duration_since(shown) >= interval)
        {
            return;
        }
        self.last_event = Some(now);
        match event.feed_text(at.year()) {
            Ok(text) => {
                info!("Sequencer: event feed");
                self.start_feed(text, event.color, now);
            }
            Err(err) => warn!("Sequencer: event text rejected: {:?}", err),
        }
    }

    fn check_timeout(&mut self, now: Instant, settings: &Settings) {
        let Some(since) = self.manual_since else {
            return;
        };
        if self.current == Mode::Time {
            self.manual_since = None;
            return;
        }
        let timeout = Duration::from_secs(u64::from(settings.timeout));
        if settings.timeout != 0 && now.saturating_duration_since(since) >= timeout {
            debug!("Sequencer: {:?} timed out", self.current);
            self.current = Mode::Time;
            self.manual_since = None;
            self.last_advance = now;
        }
    }

    fn start_feed(&mut self, text: FeedText, color: Color, now: Instant) {
        self.overlay = Some(Overlay::Feed {
            feed: Feed::new(text, color),
            last_step: now,
        });
    }

    fn step_cycle(&mut self, snapshot: &Snapshot) {
        let from = self.modes.position(self.current);
        let next = self.next_available(self.current, snapshot);
        let to = self.modes.position(next);
        if let (Some(from), Some(to)) = (from, to)
            && to <= from
        {
            self.color_step = self.color_step.wrapping_add(1);
        }
        self.current = next;
    }

    fn next_available(&self, from: Mode, snapshot: &Snapshot) -> Mode {
        let mut candidate = from;
        for _ in 0..self.modes.len() {
            candidate = self.modes.after(candidate);
            if self.is_available(candidate, snapshot) {
                return candidate;
            }
        }
        Mode::Time
    }

    fn is_available(&self, mode: Mode, snapshot: &Snapshot) -> bool {
        if !self.modes.contains(mode) {
            return false;
        }
        match mode {
            Mode::Time
            | Mode::Timer
            | Mode::Test
            | Mode::Red
            | Mode::Green
            | Mode::Blue
            | Mode::White => true,
            Mode::AmPm | Mode::Seconds | Mode::Weekday | Mode::Date | Mode::MoonPhase => {
                snapshot.time.is_some()
            }
            Mode::Temperature => snapshot.indoor_temperature.is_some(),
            Mode::Humidity => snapshot.indoor_humidity.is_some(),
            Mode::ExtTemperature | Mode::ExtHumidity => snapshot.weather.is_some(),
            Mode::Blank | Mode::Feed => false,
        }
    }
}
