#![allow(missing_docs)]
//! Host-level tests for the mode state machine.

use embassy_time::{Duration, Instant};
use time::macros::datetime;
use time::PrimitiveDateTime;
use word_clock::alarm::Beep;
use word_clock::color::Color;
use word_clock::domain::{Snapshot, Weather};
use word_clock::event::{EVENTS, Event};
use word_clock::mode::{EnabledModes, Mode, ModeFlags};
use word_clock::sequencer::{Input, Sequencer, Timing};
use word_clock::settings::Settings;

const TIMING: Timing = Timing {
    auto_mode_change: Duration::from_secs(60),
    event_interval: Some(Duration::from_secs(300)),
    feed_step: Duration::from_millis(100),
};

const NO_EVENTS: [Event; 0] = [];

fn start() -> Instant {
    Instant::from_secs(1_000)
}

fn cycling() -> Settings {
    Settings {
        mode_change: true,
        hour_beep: false,
        ..Settings::default()
    }
}

fn time_and_clock_modes() -> EnabledModes {
    EnabledModes::new(ModeFlags {
        temperature: false,
        humidity: false,
        weather: false,
        timer: false,
        test: false,
        ..ModeFlags::ALL
    })
}

#[test]
fn automatic_advance_is_a_closed_cycle() {
    let modes = time_and_clock_modes();
    let snapshot = Snapshot::at(datetime!(2024-05-04 10:20:00));
    let settings = cycling();
    let mut sequencer = Sequencer::new(modes.clone(), TIMING, start());
    let mut now = start();
    let mut visited = Vec::new();
    for _ in 0..modes.len() {
        now += TIMING.auto_mode_change;
        sequencer.tick(now, &snapshot, &settings, &NO_EVENTS);
        visited.push(sequencer.current());
    }
    assert_eq!(sequencer.current(), Mode::Time);
    assert_eq!(visited.len(), 6);
    assert_eq!(
        visited,
        [
            Mode::AmPm,
            Mode::Seconds,
            Mode::Weekday,
            Mode::Date,
            Mode::MoonPhase,
            Mode::Time
        ]
    );
    assert!(visited.iter().all(|mode| modes.contains(*mode)));
    assert_eq!(sequencer.color_step(), 1);
}

#[test]
fn manual_advance_resets_the_automatic_timer() {
    let snapshot = Snapshot::at(datetime!(2024-05-04 10:20:00));
    let settings = Settings {
        timeout: 0,
        ..cycling()
    };
    let mut sequencer = Sequencer::new(time_and_clock_modes(), TIMING, start());
    let pressed = start() + Duration::from_secs(50);
    sequencer.advance(pressed, &snapshot);
    assert_eq!(sequencer.current(), Mode::AmPm);

    sequencer.tick(start() + Duration::from_secs(61), &snapshot, &settings, &NO_EVENTS);
    assert_eq!(sequencer.current(), Mode::AmPm);
}

#[test]
fn manual_mode_times_out_back_to_time() {
    let snapshot = Snapshot::at(datetime!(2024-05-04 10:20:00));
    let settings = Settings::default();
    let mut sequencer = Sequencer::new(time_and_clock_modes(), TIMING, start());
    sequencer.handle_input(Input::Mode, start(), &snapshot);
    sequencer.handle_input(Input::Mode, start(), &snapshot);
    assert_eq!(sequencer.current(), Mode::Seconds);

    let later = start() + Duration::from_secs(u64::from(settings.timeout));
    sequencer.tick(later, &snapshot, &settings, &NO_EVENTS);
    assert_eq!(sequencer.current(), Mode::Time);
}

#[test]
fn blank_restores_the_previous_mode() {
    let snapshot = Snapshot::at(datetime!(2024-05-04 10:20:00));
    let mut sequencer = Sequencer::new(time_and_clock_modes(), TIMING, start());
    sequencer.advance(start(), &snapshot);
    sequencer.turn_off();
    assert_eq!(sequencer.displayed(), Mode::Blank);

    sequencer.advance(start(), &snapshot);
    assert_eq!(sequencer.displayed(), Mode::Blank);

    sequencer.toggle_power(start());
    assert_eq!(sequencer.displayed(), Mode::AmPm);
}

#[test]
fn invalid_time_skips_time_dependent_modes() {
    let modes = EnabledModes::new(ModeFlags::ALL);
    let snapshot = Snapshot {
        indoor_temperature: Some(22),
        ..Snapshot::default()
    };
    let mut sequencer = Sequencer::new(modes, TIMING, start());
    sequencer.advance(start(), &snapshot);
    assert_eq!(sequencer.current(), Mode::Temperature);
    sequencer.advance(start(), &snapshot);
    assert_eq!(sequencer.current(), Mode::Timer);
    sequencer.advance(start(), &snapshot);
    assert_eq!(sequencer.current(), Mode::Test);
}

#[test]
fn every_mode_takes_its_turn_with_all_data_present() {
    let modes = EnabledModes::new(ModeFlags::ALL);
    let snapshot = Snapshot {
        indoor_temperature: Some(22),
        indoor_humidity: Some(41),
        weather: Some(Weather {
            temperature: 14,
            humidity: 70,
            pressure: 1009,
            sunrise: time::macros::time!(6:05),
            sunset: time::macros::time!(20:51),
            description: "cloudy".try_into().expect("fits"),
        }),
        ..Snapshot::at(datetime!(2024-05-04 10:20:00))
    };
    let settings = Settings {
        timeout: 0,
        ..cycling()
    };
    let mut sequencer = Sequencer::new(modes.clone(), TIMING, start());
    assert_eq!(sequencer.timer_remaining(start()), None);

    let mut now = start();
    let mut visited = Vec::new();
    for _ in 0..modes.len() {
        now += TIMING.auto_mode_change;
        sequencer.tick(now, &snapshot, &settings, &NO_EVENTS);
        visited.push(sequencer.current());
    }
    assert_eq!(modes.len(), 16);
    assert_eq!(sequencer.current(), Mode::Time);
    assert!(visited.contains(&Mode::Timer));
    let mut expected = Mode::CYCLIC.to_vec();
    expected.rotate_left(1);
    assert_eq!(visited, expected);
}

#[test]
fn missing_weather_drops_out_of_the_cycle() {
    let modes = EnabledModes::default();
    let at = datetime!(2024-05-04 10:20:00);
    let mut sequencer = Sequencer::new(modes, TIMING, start());
    let snapshot = Snapshot::at(at);
    for _ in 0..5 {
        sequencer.advance(start(), &snapshot);
    }
    assert_eq!(sequencer.current(), Mode::MoonPhase);
    sequencer.advance(start(), &snapshot);
    assert_eq!(sequencer.current(), Mode::Test);
}

#[test]
fn event_feed_is_scheduled_without_changing_the_mode() {
    let snapshot = Snapshot::at(datetime!(2025-01-01 09:30:00));
    let settings = Settings {
        hour_beep: false,
        timeout: 0,
        ..Settings::default()
    };
    let mut sequencer = Sequencer::new(time_and_clock_modes(), TIMING, start());
    sequencer.advance(start(), &snapshot);
    let current = sequencer.current();

    sequencer.tick(start(), &snapshot, &settings, &EVENTS);
    assert_eq!(sequencer.displayed(), Mode::Feed);
    let feed = sequencer.feed().cloned().expect("feed");
    assert_eq!(feed.text(), "Happy New Year!");
    assert_eq!(feed.color(), Color::Yellow25);
    assert_eq!(sequencer.current(), current);

    let mut now = start();
    for _ in 0..feed.width() {
        now += TIMING.feed_step;
        sequencer.tick(now, &snapshot, &settings, &EVENTS);
    }
    assert_eq!(sequencer.displayed(), current);

    sequencer.tick(now + Duration::from_secs(10), &snapshot, &settings, &EVENTS);
    assert_eq!(sequencer.displayed(), current);

    sequencer.tick(start() + Duration::from_secs(300), &snapshot, &settings, &EVENTS);
    assert_eq!(sequencer.displayed(), Mode::Feed);
}

#[test]
fn no_event_on_other_days() {
    let snapshot = Snapshot::at(datetime!(2025-01-02 09:30:00));
    let mut sequencer = Sequencer::new(time_and_clock_modes(), TIMING, start());
    sequencer.tick(start(), &snapshot, &Settings::default(), &EVENTS);
    assert_eq!(sequencer.displayed(), Mode::Time);
}

#[test]
fn alarm_fires_once_per_matching_minute() {
    let mut settings = Settings {
        hour_beep: false,
        ..Settings::default()
    };
    settings.alarm1.enabled = true;
    settings.alarm1.time = 7 * 3600 + 30 * 60;
    settings.alarm1.weekdays = 0b1111_1110;
    let mut sequencer = Sequencer::new(time_and_clock_modes(), TIMING, start());

    let at = |second| -> PrimitiveDateTime {
        datetime!(2024-05-06 07:30:00).replace_second(second).expect("second")
    };
    let beep = sequencer.tick(start(), &Snapshot::at(at(0)), &settings, &NO_EVENTS);
    assert_eq!(beep, Some(Beep::Alarm1));
    let again = sequencer.tick(start(), &Snapshot::at(at(30)), &settings, &NO_EVENTS);
    assert_eq!(again, None);
}

#[test]
fn night_off_and_day_on() {
    let settings = Settings {
        hour_beep: false,
        ..Settings::default()
    };
    let mut sequencer = Sequencer::new(time_and_clock_modes(), TIMING, start());
    sequencer.tick(start(), &Snapshot::at(datetime!(2024-05-04 23:00:00)), &settings, &NO_EVENTS);
    assert_eq!(sequencer.displayed(), Mode::Blank);
    sequencer.tick(start(), &Snapshot::at(datetime!(2024-05-05 06:00:00)), &settings, &NO_EVENTS);
    assert_eq!(sequencer.displayed(), Mode::Time);
}

#[test]
fn timer_counts_down_and_beeps() {
    let snapshot = Snapshot::at(datetime!(2024-05-04 10:20:00));
    let settings = Settings {
        hour_beep: false,
        ..Settings::default()
    };
    let modes = EnabledModes::new(ModeFlags::ALL);
    let mut sequencer = Sequencer::new(modes, TIMING, start());
    sequencer.start_timer(3, start());
    assert_eq!(
        sequencer.scene(start() + Duration::from_secs(61)).timer_minutes,
        Some(2)
    );
    let beep = sequencer.tick(start() + Duration::from_secs(180), &snapshot, &settings, &NO_EVENTS);
    assert_eq!(beep, Some(Beep::Timer));
    assert_eq!(sequencer.timer_remaining(start()), None);
}

#[test]
fn show_text_rejects_overlong_text() {
    let mut sequencer = Sequencer::new(time_and_clock_modes(), TIMING, start());
    let text = "x".repeat(65);
    assert!(sequencer.show_text(&text, Color::Red, start()).is_err());
    assert!(sequencer.show_text("ok", Color::Red, start()).is_ok());
    assert_eq!(sequencer.displayed(), Mode::Feed);
    sequencer.go_to_time(start());
    assert_eq!(sequencer.displayed(), Mode::Time);
}

#[test]
fn longest_timer_keeps_its_length() {
    let mut sequencer = Sequencer::new(time_and_clock_modes(), TIMING, start());
    sequencer.start_timer(u16::MAX, start());
    assert_eq!(
        sequencer.timer_remaining(start()),
        Some(Duration::from_secs(u64::from(u16::MAX) * 60))
    );
    assert_eq!(sequencer.scene(start()).timer_minutes, Some(u16::MAX));
    sequencer.stop_timer();
    assert_eq!(sequencer.scene(start()).timer_minutes, None);
}
