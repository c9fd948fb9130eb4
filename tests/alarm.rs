#![allow(missing_docs)]
//! Host-level tests for alarm weekday masks and beeps.

use time::macros::{date, time};
use time::{Duration, PrimitiveDateTime, Weekday};
use word_clock::alarm::{Beep, due_beep, weekday_bit};
use word_clock::settings::{Alarm, Settings};

fn quiet_with(alarm1: Alarm) -> Settings {
    Settings {
        alarm1,
        hour_beep: false,
        ..Settings::default()
    }
}

// A week starting on Sunday 2024-05-05, at the alarm minute.
fn week_at(hour: u8, minute: u8) -> impl Iterator<Item = PrimitiveDateTime> {
    let sunday = date!(2024 - 05 - 05);
    (0..7).filter_map(move |offset| {
        let day = sunday.checked_add(Duration::days(offset))?;
        day.with_hms(hour, minute, 0).ok()
    })
}

#[test]
fn bit_zero_is_unused() {
    let bits: u8 = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ]
    .into_iter()
    .map(weekday_bit)
    .fold(0, |mask, bit| mask | bit);
    assert_eq!(bits, 0b1111_1110);
    assert_eq!(bits, Alarm::ALL_WEEKDAYS);
}

#[test]
fn full_mask_rings_every_day() {
    let settings = quiet_with(Alarm {
        enabled: true,
        time: 6 * 3600 + 15 * 60,
        weekdays: 0b1111_1110,
    });
    for at in week_at(6, 15) {
        assert_eq!(due_beep(&settings, at), Some(Beep::Alarm1), "{at}");
    }
}

#[test]
fn cleared_bits_never_ring() {
    let workdays = weekday_bit(Weekday::Monday)
        | weekday_bit(Weekday::Tuesday)
        | weekday_bit(Weekday::Wednesday)
        | weekday_bit(Weekday::Thursday)
        | weekday_bit(Weekday::Friday);
    let settings = quiet_with(Alarm {
        enabled: true,
        time: 6 * 3600 + 15 * 60,
        weekdays: workdays,
    });
    for at in week_at(6, 15) {
        let rings = due_beep(&settings, at).is_some();
        let weekend = matches!(at.weekday(), Weekday::Saturday | Weekday::Sunday);
        assert_eq!(rings, !weekend, "{at}");
    }
}

#[test]
fn disabled_alarm_and_other_minutes_stay_silent() {
    let alarm = Alarm {
        enabled: true,
        time: 6 * 3600 + 15 * 60,
        weekdays: Alarm::ALL_WEEKDAYS,
    };
    let disabled = quiet_with(Alarm {
        enabled: false,
        ..alarm
    });
    let enabled = quiet_with(alarm);
    let at = date!(2024 - 05 - 07).with_time(time!(6:15));
    assert_eq!(due_beep(&disabled, at), None);
    assert_eq!(due_beep(&enabled, date!(2024 - 05 - 07).with_time(time!(6:16))), None);
}

#[test]
fn alarms_take_precedence_over_the_hour_beep() {
    let mut settings = Settings {
        hour_beep: true,
        ..Settings::default()
    };
    settings.alarm2 = Alarm {
        enabled: true,
        time: 7 * 3600,
        weekdays: Alarm::ALL_WEEKDAYS,
    };
    let seven = date!(2024 - 05 - 07).with_time(time!(7:00));
    assert_eq!(due_beep(&settings, seven), Some(Beep::Alarm2));
    let eight = date!(2024 - 05 - 07).with_time(time!(8:00));
    assert_eq!(due_beep(&settings, eight), Some(Beep::Hour));
}
