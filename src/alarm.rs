//! Alarm schedule checks and the beep requests the core hands to the buzzer.

use time::{PrimitiveDateTime, Weekday};

use crate::settings::{Alarm, Settings};

/// A request for the buzzer collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Beep {
    /// Alarm 1 is due.
    Alarm1,
    /// Alarm 2 is due.
    Alarm2,
    /// The countdown timer ran out.
    Timer,
    /// A full hour started.
    Hour,
}

/// Bit of `weekday` in an alarm weekday mask (Sunday = bit 1 ... Saturday = bit 7).
#[must_use]
pub const fn weekday_bit(weekday: Weekday) -> u8 {
    1 << weekday.number_from_sunday()
}

/// Minutes since local midnight.
#[must_use]
pub fn minute_of_day(at: PrimitiveDateTime) -> u16 {
    u16::from(at.hour())
        .saturating_mul(60)
        .saturating_add(u16::from(at.minute()))
}

impl Alarm {
    /// Whether the alarm rings during the minute containing `at`.
    #[must_use]
    pub fn rings_at(&self, at: PrimitiveDateTime) -> bool {
        self.enabled
            && self.weekdays & weekday_bit(at.weekday()) != 0
            && self.time / 60 == u32::from(minute_of_day(at))
    }
}

/// The beep due in the minute containing `at`, alarms before the hourly beep.
#[must_use]
pub fn due_beep(settings: &Settings, at: PrimitiveDateTime) -> Option<Beep> {
    if settings.alarm1.rings_at(at) {
        Some(Beep::Alarm1)
    } else if settings.alarm2.rings_at(at) {
        Some(Beep::Alarm2)
    } else if settings.hour_beep && at.minute() == 0 {
        Some(Beep::Hour)
    } else {
        None
    }
}
