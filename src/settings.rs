//! The persisted user settings record and its factory presets.
//!
//! [`Settings`] is a plain value. It is read and written as a whole by the
//! [`ConfigStore`](crate::config_store::ConfigStore); changes arrive as
//! [`SettingsChange`] values so every mutation goes through one persist path.

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Seconds in one day; times of day are `0..SECONDS_PER_DAY`.
pub const SECONDS_PER_DAY: u32 = 86_400;

/// How the frame changes when the displayed content changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// Replace atomically.
    Normal,
    /// Changed columns scroll upward, old content leaving at the top.
    MoveUp,
    /// Per-pixel cross-fade.
    Fade,
}

/// When the base color rotates through the palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorChange {
    /// Keep the configured color.
    No,
    /// Next color every minute.
    Minute,
    /// Next color every five minutes.
    FiveMinutes,
    /// Next color every hour.
    Hour,
    /// Next color every day.
    Day,
    /// Next color each time the mode cycle wraps back to its first mode.
    ModeCycle,
}

/// One alarm slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Alarm {
    /// Whether the alarm rings at all.
    pub enabled: bool,
    /// Seconds since midnight; only the minute is compared.
    pub time: u32,
    /// Bit `n` enables weekday `n`, numbered from Sunday = 1 to Saturday = 7. Bit 0 is unused.
    pub weekdays: u8,
}

impl Alarm {
    /// Every weekday enabled, bit 0 left clear.
    pub const ALL_WEEKDAYS: u8 = 0b1111_1110;

    /// Disabled alarm at midnight on every weekday.
    pub const OFF: Self = Self {
        enabled: false,
        time: 0,
        weekdays: Self::ALL_WEEKDAYS,
    };
}

/// Factory default sets shipped by different builds. The schema is identical.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DefaultPreset {
    /// Bright cyan, fading, hourly beep.
    #[default]
    Standard,
    /// Dimmer white, no animation, silent.
    Quiet,
}

/// The persisted user settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    /// Scale brightness by the ambient-light reading.
    pub use_abc: bool,
    /// Base brightness before ambient scaling and clamping.
    pub brightness: u8,
    /// Base color.
    pub color: Color,
    /// Color rotation policy.
    pub color_change: ColorChange,
    /// Animation between frames.
    pub transition: Transition,
    /// Seconds until a manually selected mode falls back to the time; 0 disables.
    pub timeout: u8,
    /// Cycle through the enabled modes automatically.
    pub mode_change: bool,
    /// Always light the "IT IS" prefix.
    pub it_is: bool,
    /// First alarm.
    pub alarm1: Alarm,
    /// Second alarm.
    pub alarm2: Alarm,
    /// Time of day the display blanks itself.
    pub night_off_time: u32,
    /// Time of day the display turns itself back on.
    pub day_on_time: u32,
    /// Beep at every full hour.
    pub hour_beep: bool,
}

impl Settings {
    /// The compiled-in factory settings of `preset`.
    #[must_use]
    pub const fn defaults(preset: DefaultPreset) -> Self {
        let standard = Self {
            use_abc: true,
            brightness: 100,
            color: Color::Cyan,
            color_change: ColorChange::No,
            transition: Transition::Fade,
            timeout: 10,
            mode_change: false,
            it_is: true,
            alarm1: Alarm::OFF,
            alarm2: Alarm::OFF,
            night_off_time: 23 * 3600,
            day_on_time: 6 * 3600,
            hour_beep: true,
        };
        match preset {
            DefaultPreset::Standard => standard,
            DefaultPreset::Quiet => Self {
                brightness: 60,
                color: Color::White,
                transition: Transition::Normal,
                hour_beep: false,
                ..standard
            },
        }
    }

    /// Whether either alarm is armed.
    #[must_use]
    pub const fn any_alarm_enabled(&self) -> bool {
        self.alarm1.enabled || self.alarm2.enabled
    }

    /// This record with `change` applied.
    #[must_use]
    pub const fn with(self, change: SettingsChange) -> Self {
        let mut next = self;
        match change {
            SettingsChange::UseAbc(value) => next.use_abc = value,
            SettingsChange::Brightness(value) => next.brightness = value,
            SettingsChange::Color(value) => next.color = value,
            SettingsChange::ColorChange(value) => next.color_change = value,
            SettingsChange::Transition(value) => next.transition = value,
            SettingsChange::Timeout(value) => next.timeout = value,
            SettingsChange::ModeChange(value) => next.mode_change = value,
            SettingsChange::ItIs(value) => next.it_is = value,
            SettingsChange::Alarm1(value) => next.alarm1 = value,
            SettingsChange::Alarm2(value) => next.alarm2 = value,
            SettingsChange::NightOffTime(value) => next.night_off_time = value % SECONDS_PER_DAY,
            SettingsChange::DayOnTime(value) => next.day_on_time = value % SECONDS_PER_DAY,
            SettingsChange::HourBeep(value) => next.hour_beep = value,
        }
        next
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::defaults(DefaultPreset::Standard)
    }
}

/// A single setter call, as produced by a configuration surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsChange {
    /// Set [`Settings::use_abc`].
    UseAbc(bool),
    /// Set [`Settings::brightness`].
    Brightness(u8),
    /// Set [`Settings::color`].
    Color(Color),
    /// Set [`Settings::color_change`].
    ColorChange(ColorChange),
    /// Set [`Settings::transition`].
    Transition(Transition),
    /// Set [`Settings::timeout`].
    Timeout(u8),
    /// Set [`Settings::mode_change`].
    ModeChange(bool),
    /// Set [`Settings::it_is`].
    ItIs(bool),
    /// Replace [`Settings::alarm1`].
    Alarm1(Alarm),
    /// Replace [`Settings::alarm2`].
    Alarm2(Alarm),
    /// Set [`Settings::night_off_time`], wrapped into one day.
    NightOffTime(u32),
    /// Set [`Settings::day_on_time`], wrapped into one day.
    DayOnTime(u32),
    /// Set [`Settings::hour_beep`].
    HourBeep(bool),
}
