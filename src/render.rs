//! Renderer: turns a [`Scene`], the [`Settings`], and one [`Snapshot`] into a [`Frame`].
//!
//! Composition is pure. The same inputs always give the same frame, and nothing
//! here touches the strip; the control loop decides when and how to show it.
//!
//! # Example
//!
//! ```rust
//! use time::macros::datetime;
//! use word_clock::color::Color;
//! use word_clock::domain::Snapshot;
//! use word_clock::mode::Mode;
//! use word_clock::render::{Renderer, Scene};
//! use word_clock::settings::Settings;
//!
//! let renderer: Renderer = Renderer::default();
//! let settings = Settings::default();
//! let snapshot = Snapshot::at(datetime!(2024-05-04 14:15:00));
//! let frame = renderer.compose(&Scene::of(Mode::Time), &settings, &snapshot);
//! assert!(frame.lit().all(|address| frame.get(address).color == Color::Cyan));
//! ```

pub mod cover;
mod glyphs;

use core::fmt::Write as _;

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::ascii::{FONT_5X7, FONT_6X10};
use embedded_graphics::prelude::Point;
use heapless::String;
use time::PrimitiveDateTime;

use crate::alarm::minute_of_day;
use crate::color::Color;
use crate::config::ClockConfig;
use crate::domain::Snapshot;
use crate::frame::{Frame, Pixel};
use crate::layout::{COLUMNS, LogicalAddress, Special};
use crate::mode::Mode;
use crate::sequencer::Feed;
use crate::settings::{ColorChange, Settings};
use cover::{English, FrontCover};
use glyphs::{Mask, font_3x4};

// Julian day of the new moon of 2000-01-06, and its offset into that day in 1e-5 days.
const NEW_MOON_JULIAN_DAY: i64 = 2_451_550;
const NEW_MOON_OFFSET: i64 = 10_000;
// Mean synodic month in 1e-5 days.
const SYNODIC_MONTH: i64 = 2_953_059;
const DAY_UNITS: i64 = 100_000;
const MOON_PHASES: i64 = 8;

const MINUTES_PER_DAY: i64 = 1440;

/// What the sequencer wants on the display for this tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    /// Displayed mode, including the `Blank` and `Feed` overlays.
    pub mode: Mode,
    /// The running feed when `mode` is [`Mode::Feed`].
    pub feed: Option<Feed>,
    /// Completed mode cycles.
    pub color_step: u32,
    /// Minutes left on the countdown, rounded up.
    pub timer_minutes: Option<u16>,
}

impl Scene {
    /// A scene showing `mode` with no feed, timer, or cycle count.
    #[must_use]
    pub const fn of(mode: Mode) -> Self {
        Self {
            mode,
            feed: None,
            color_step: 0,
            timer_minutes: None,
        }
    }
}

/// Composes frames for one front cover.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Renderer<C = English> {
    cover: C,
    min_brightness: u8,
    max_brightness: u8,
    test_brightness: u8,
    alarm_led_color: Option<Color>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(English, &ClockConfig::default())
    }
}

impl<C: FrontCover> Renderer<C> {
    /// Create a renderer for `cover` with the brightness limits of `config`.
    #[must_use]
    pub const fn new(cover: C, config: &ClockConfig) -> Self {
        Self {
            cover,
            min_brightness: config.min_brightness,
            max_brightness: config.max_brightness,
            test_brightness: config.test_brightness,
            alarm_led_color: config.alarm_led_color,
        }
    }

    /// The front cover.
    #[must_use]
    pub const fn cover(&self) -> &C {
        &self.cover
    }

    /// Compose the frame for `scene`.
    #[must_use]
    pub fn compose(&self, scene: &Scene, settings: &Settings, snapshot: &Snapshot) -> Frame {
        let brightness = self.brightness(settings, snapshot);
        let base = Pixel::new(self.base_color(scene, settings, snapshot), brightness);
        let test = self.test_brightness;

        let mut frame = match scene.mode {
            Mode::Blank => return Frame::new(),
            Mode::Red => return Frame::filled(Pixel::new(Color::Red, test)),
            Mode::Green => return Frame::filled(Pixel::new(Color::Green, test)),
            Mode::Blue => return Frame::filled(Pixel::new(Color::Blue, test)),
            Mode::White => return Frame::filled(Pixel::new(Color::White, test)),
            Mode::Feed => scene
                .feed
                .as_ref()
                .map_or_else(Frame::new, |feed| feed_frame(feed, brightness)),
            Mode::Test => {
                let second = snapshot.time.map_or(0, PrimitiveDateTime::second);
                let mut mask = Mask::new();
                mask.light_row(usize::from(second % 10));
                painted(&mask, base.with_brightness(test))
            }
            mode => self
                .content(mode, scene, settings, snapshot, base)
                .unwrap_or_else(|| self.idle(base)),
        };

        if settings.any_alarm_enabled() {
            let color = self.alarm_led_color.unwrap_or(base.color);
            frame.set(
                LogicalAddress::Special(Special::Alarm),
                Pixel::new(color, brightness),
            );
        }
        frame
    }

    /// Output brightness: the setting, scaled by ambient light when adaptive
    /// brightness is on, clamped to the configured limits.
    #[must_use]
    pub fn brightness(&self, settings: &Settings, snapshot: &Snapshot) -> u8 {
        let level = match (settings.use_abc, snapshot.ambient_light) {
            (true, Some(ambient)) => {
                let scaled = u16::from(settings.brightness) * u16::from(ambient) / 255;
                u8::try_from(scaled).unwrap_or(u8::MAX)
            }
            _ => settings.brightness,
        };
        level.max(self.min_brightness).min(self.max_brightness)
    }

    /// The base color after the color-change policy.
    #[must_use]
    pub fn base_color(&self, scene: &Scene, settings: &Settings, snapshot: &Snapshot) -> Color {
        let minutes_per_step = match settings.color_change {
            ColorChange::No => return settings.color,
            ColorChange::ModeCycle => return settings.color.rotated(scene.color_step),
            ColorChange::Minute => 1,
            ColorChange::FiveMinutes => 5,
            ColorChange::Hour => 60,
            ColorChange::Day => MINUTES_PER_DAY,
        };
        let Some(at) = snapshot.time else {
            return settings.color;
        };
        let minutes =
            i64::from(at.date().to_julian_day()) * MINUTES_PER_DAY + i64::from(minute_of_day(at));
        let steps = (minutes / minutes_per_step).rem_euclid(Color::COUNT as i64);
        settings.color.rotated(u32::try_from(steps).unwrap_or(0))
    }

    /// The safe pattern shown while a mode has nothing valid to show.
    fn idle(&self, base: Pixel) -> Frame {
        let mut frame = Frame::new();
        for corner in Special::CORNERS {
            frame.set(
                LogicalAddress::Special(corner),
                base.with_brightness(self.min_brightness),
            );
        }
        frame
    }

    fn content(
        &self,
        mode: Mode,
        scene: &Scene,
        settings: &Settings,
        snapshot: &Snapshot,
        base: Pixel,
    ) -> Option<Frame> {
        let mut mask = Mask::new();
        let mut text: String<8> = String::new();
        match mode {
            Mode::Time => return snapshot.time.map(|at| self.time_frame(at, settings, base)),
            Mode::AmPm => {
                let at = snapshot.time?;
                let label = if at.hour() < 12 { "AM" } else { "PM" };
                mask.draw_centered(&FONT_5X7, label, 1, 1);
            }
            Mode::Seconds => {
                let at = snapshot.time?;
                write!(text, "{:02}", at.second()).ok()?;
                mask.draw_centered(&FONT_5X7, &text, 1, 1);
            }
            Mode::Weekday => {
                let at = snapshot.time?;
                let label = self.cover.weekday_abbreviation(at.weekday());
                mask.draw_centered(&FONT_5X7, label, 1, 1);
            }
            Mode::Date => {
                let at = snapshot.time?;
                let font = font_3x4();
                write!(text, "{:02}", at.day()).ok()?;
                mask.draw_centered(&font, &text, 0, 1);
                text.clear();
                write!(text, "{:02}", u8::from(at.month())).ok()?;
                mask.draw_centered(&font, &text, 5, 1);
            }
            Mode::MoonPhase => mask.draw_moon(moon_phase(snapshot.time?)),
            Mode::Temperature => {
                write!(text, "{}", snapshot.indoor_temperature?).ok()?;
                draw_value(&mut mask, &text);
            }
            Mode::Humidity => {
                write!(text, "{}", snapshot.indoor_humidity?).ok()?;
                draw_value(&mut mask, &text);
            }
            Mode::ExtTemperature => {
                write!(text, "{}", snapshot.weather.as_ref()?.temperature).ok()?;
                draw_value(&mut mask, &text);
            }
            Mode::ExtHumidity => {
                write!(text, "{}", snapshot.weather.as_ref()?.humidity).ok()?;
                draw_value(&mut mask, &text);
            }
            Mode::Timer => {
                write!(text, "{}", scene.timer_minutes.unwrap_or(0).min(99)).ok()?;
                draw_value(&mut mask, &text);
            }
            Mode::Test
            | Mode::Red
            | Mode::Green
            | Mode::Blue
            | Mode::White
            | Mode::Blank
            | Mode::Feed => return None,
        }
        Some(painted(&mask, base))
    }

    fn time_frame(&self, at: PrimitiveDateTime, settings: &Settings, base: Pixel) -> Frame {
        let mut frame = Frame::new();
        for word in self.cover.time_words(at.hour(), at.minute(), settings.it_is) {
            for (row, col) in word.cells() {
                frame.set(grid_address(row, col), base);
            }
        }
        let corners = usize::from(at.minute() % 5);
        for corner in Special::CORNERS.into_iter().take(corners) {
            frame.set(LogicalAddress::Special(corner), base);
        }
        frame
    }
}

/// Moon phase `0..8` at `at`, 0 new and 4 full.
#[must_use]
pub fn moon_phase(at: PrimitiveDateTime) -> u8 {
    let seconds = i64::from(at.hour()) * 3600 + i64::from(at.minute()) * 60 + i64::from(at.second());
    let now = (i64::from(at.date().to_julian_day()) - NEW_MOON_JULIAN_DAY) * DAY_UNITS
        + seconds * DAY_UNITS / 86_400
        - NEW_MOON_OFFSET;
    let age = now.rem_euclid(SYNODIC_MONTH);
    let phase = (age * MOON_PHASES + SYNODIC_MONTH / 2) / SYNODIC_MONTH % MOON_PHASES;
    u8::try_from(phase).unwrap_or(0)
}

// Short values in the large font, three characters in the small one.
fn draw_value(mask: &mut Mask, text: &str) {
    if text.chars().count() <= 2 {
        mask.draw_centered(&FONT_5X7, text, 1, 1);
    } else {
        mask.draw_centered(&font_3x4(), text, 3, 1);
    }
}

fn feed_frame(feed: &Feed, brightness: u8) -> Frame {
    let font: &MonoFont<'_> = &FONT_6X10;
    let left = COLUMNS as i32 - i32::from(feed.offset());
    let mut mask = Mask::new();
    mask.draw_chars(font, feed.text(), Point::new(left, 0), 0);
    painted(&mask, Pixel::new(feed.color(), brightness))
}

fn painted(mask: &Mask, pixel: Pixel) -> Frame {
    let mut frame = Frame::new();
    for (row, col) in mask.lit() {
        frame.set(grid_address(row, col), pixel);
    }
    frame
}

fn grid_address(row: usize, col: usize) -> LogicalAddress {
    LogicalAddress::grid(
        u8::try_from(row).unwrap_or(u8::MAX),
        u8::try_from(col).unwrap_or(u8::MAX),
    )
}
