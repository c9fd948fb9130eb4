//! Display modes and the runtime list of the enabled ones.
//!
//! [`ModeFlags`] says which optional modes a build offers; [`EnabledModes`] turns it
//! into the ordered cycle the sequencer walks. `Time` is always first and always
//! enabled. `Blank` and `Feed` are never members of the cycle.

use heapless::Vec;

/// What the display is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// The time in words.
    Time,
    /// "AM" or "PM".
    AmPm,
    /// Seconds of the current minute.
    Seconds,
    /// Two-letter weekday.
    Weekday,
    /// Day over month.
    Date,
    /// Moon phase disc.
    MoonPhase,
    /// Indoor temperature.
    Temperature,
    /// Indoor humidity.
    Humidity,
    /// Outdoor temperature.
    ExtTemperature,
    /// Outdoor humidity.
    ExtHumidity,
    /// Minutes left on the countdown timer.
    Timer,
    /// One lit row per second.
    Test,
    /// Every LED red.
    Red,
    /// Every LED green.
    Green,
    /// Every LED blue.
    Blue,
    /// Every LED white.
    White,
    /// Display off.
    Blank,
    /// Scrolling text.
    Feed,
}

/// Number of modes that can take part in the cycle.
pub const CYCLIC_MODE_COUNT: usize = 16;

impl Mode {
    /// Cyclic modes in cycle order.
    pub const CYCLIC: [Self; CYCLIC_MODE_COUNT] = [
        Self::Time,
        Self::AmPm,
        Self::Seconds,
        Self::Weekday,
        Self::Date,
        Self::MoonPhase,
        Self::Temperature,
        Self::Humidity,
        Self::ExtTemperature,
        Self::ExtHumidity,
        Self::Timer,
        Self::Test,
        Self::Red,
        Self::Green,
        Self::Blue,
        Self::White,
    ];
}

/// Which optional modes a build shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeFlags {
    /// [`Mode::AmPm`].
    pub am_pm: bool,
    /// [`Mode::Seconds`].
    pub seconds: bool,
    /// [`Mode::Weekday`].
    pub weekday: bool,
    /// [`Mode::Date`].
    pub date: bool,
    /// [`Mode::MoonPhase`].
    pub moon_phase: bool,
    /// [`Mode::Temperature`], needs an indoor sensor.
    pub temperature: bool,
    /// [`Mode::Humidity`], needs an indoor humidity sensor.
    pub humidity: bool,
    /// [`Mode::ExtTemperature`] and [`Mode::ExtHumidity`], need a weather client.
    pub weather: bool,
    /// [`Mode::Timer`], needs a buzzer.
    pub timer: bool,
    /// [`Mode::Test`] and the four color fills.
    pub test: bool,
}

impl ModeFlags {
    /// Only [`Mode::Time`].
    pub const TIME_ONLY: Self = Self {
        am_pm: false,
        seconds: false,
        weekday: false,
        date: false,
        moon_phase: false,
        temperature: false,
        humidity: false,
        weather: false,
        timer: false,
        test: false,
    };

    /// Every mode.
    pub const ALL: Self = Self {
        am_pm: true,
        seconds: true,
        weekday: true,
        date: true,
        moon_phase: true,
        temperature: true,
        humidity: true,
        weather: true,
        timer: true,
        test: true,
    };

    /// Whether `mode` belongs to the cycle under these flags.
    #[must_use]
    pub const fn enables(&self, mode: Mode) -> bool {
        match mode {
            Mode::Time => true,
            Mode::AmPm => self.am_pm,
            Mode::Seconds => self.seconds,
            Mode::Weekday => self.weekday,
            Mode::Date => self.date,
            Mode::MoonPhase => self.moon_phase,
            Mode::Temperature => self.temperature,
            Mode::Humidity => self.humidity,
            Mode::ExtTemperature | Mode::ExtHumidity => self.weather,
            Mode::Timer => self.timer,
            Mode::Test | Mode::Red | Mode::Green | Mode::Blue | Mode::White => self.test,
            Mode::Blank | Mode::Feed => false,
        }
    }
}

impl Default for ModeFlags {
    /// Clock-only build with weather: no indoor sensor, no buzzer.
    fn default() -> Self {
        Self {
            temperature: false,
            humidity: false,
            timer: false,
            ..Self::ALL
        }
    }
}

/// The ordered cycle of enabled modes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnabledModes {
    modes: Vec<Mode, CYCLIC_MODE_COUNT>,
}

impl EnabledModes {
    /// Build the cycle from `flags`, in [`Mode::CYCLIC`] order.
    #[must_use]
    pub fn new(flags: ModeFlags) -> Self {
        let modes = Mode::CYCLIC
            .into_iter()
            .filter(|mode| flags.enables(*mode))
            .collect();
        Self { modes }
    }

    /// The cycle length, `MODE_COUNT`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modes.len()
    }

    /// Never true: `Time` is always enabled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    /// Whether `mode` is in the cycle.
    #[must_use]
    pub fn contains(&self, mode: Mode) -> bool {
        self.modes.contains(&mode)
    }

    /// Position of `mode` in the cycle.
    #[must_use]
    pub fn position(&self, mode: Mode) -> Option<usize> {
        self.modes.iter().position(|member| *member == mode)
    }

    /// Members in cycle order.
    pub fn iter(&self) -> impl Iterator<Item = Mode> + '_ {
        self.modes.iter().copied()
    }

    /// The member after `mode`, wrapping; `Time` when `mode` is not a member.
    #[must_use]
    pub fn after(&self, mode: Mode) -> Mode {
        let next = self
            .position(mode)
            .map_or(0, |index| (index + 1) % self.modes.len());
        self.modes.get(next).copied().unwrap_or(Mode::Time)
    }
}

impl Default for EnabledModes {
    fn default() -> Self {
        Self::new(ModeFlags::default())
    }
}
