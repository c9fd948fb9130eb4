//! Build-time configuration of one clock: wiring, modes, timing, and limits.
//!
//! Unlike [`Settings`](crate::settings::Settings) this is not persisted; it
//! describes the hardware and is fixed for the lifetime of the firmware.

use embassy_time::Duration;

use crate::color::Color;
use crate::layout::Topology;
use crate::mode::ModeFlags;
use crate::output::Gamma;
use crate::settings::DefaultPreset;

/// Fixed parameters of a clock build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockConfig {
    /// Strip wiring.
    pub topology: Topology,
    /// Use the top-right minute LED as alarm LED.
    pub alarm_on_corner: bool,
    /// Optional modes present in this build.
    pub modes: ModeFlags,
    /// Interval of the automatic mode cycle.
    pub auto_mode_change: Duration,
    /// Interval between event feeds; `None` disables events.
    pub event_interval: Option<Duration>,
    /// Time per one-column scroll of a feed.
    pub feed_step: Duration,
    /// Time per transition step.
    pub animation_step: Duration,
    /// Alarm LED color; `None` uses the display color.
    pub alarm_led_color: Option<Color>,
    /// Lowest brightness of a lit LED.
    pub min_brightness: u8,
    /// Highest brightness of a lit LED.
    pub max_brightness: u8,
    /// Brightness of the test patterns.
    pub test_brightness: u8,
    /// Output curve.
    pub gamma: Gamma,
    /// Factory settings this build ships.
    pub preset: DefaultPreset,
}

impl ClockConfig {
    /// The topology with the alarm LED option applied.
    #[must_use]
    pub const fn wiring(&self) -> Topology {
        if self.alarm_on_corner {
            self.topology.with_alarm_on_corner()
        } else {
            self.topology
        }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            topology: Topology::HORIZONTAL_1,
            alarm_on_corner: false,
            modes: ModeFlags::default(),
            auto_mode_change: Duration::from_secs(60),
            event_interval: Some(Duration::from_secs(300)),
            feed_step: Duration::from_millis(100),
            animation_step: Duration::from_millis(30),
            alarm_led_color: Some(Color::Red),
            min_brightness: 20,
            max_brightness: 255,
            test_brightness: 80,
            gamma: Gamma::Gamma2_2,
            preset: DefaultPreset::Standard,
        }
    }
}
