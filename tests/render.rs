#![allow(missing_docs)]
//! Host-level tests for frame composition.

use std::collections::HashSet;

use time::macros::datetime;
use word_clock::color::Color;
use word_clock::domain::{Snapshot, Weather};
use word_clock::frame::Pixel;
use word_clock::layout::{LogicalAddress, Topology};
use word_clock::mode::Mode;
use word_clock::render::cover::{English, FrontCover};
use word_clock::render::{Renderer, Scene};
use word_clock::sequencer::Feed;
use word_clock::settings::{ColorChange, Settings, Transition};

fn scenario_settings() -> Settings {
    Settings {
        brightness: 100,
        color: Color::Cyan,
        transition: Transition::Fade,
        ..Settings::default()
    }
}

fn spelled(row: u8, col: u8) -> char {
    English
        .letters()
        .get(usize::from(row))
        .and_then(|letters| letters.chars().nth(usize::from(col)))
        .unwrap_or('?')
}

#[test]
fn quarter_past_two_in_cyan() {
    let renderer: Renderer = Renderer::default();
    let snapshot = Snapshot::at(datetime!(2024-05-04 14:15:00));
    let frame = renderer.compose(&Scene::of(Mode::Time), &scenario_settings(), &snapshot);

    let lit: Vec<_> = frame.lit().collect();
    let text: String = lit
        .iter()
        .map(|address| match address {
            LogicalAddress::Grid { row, col } => spelled(*row, *col),
            LogicalAddress::Special(_) => '*',
        })
        .collect();
    assert_eq!(text, "ITISQUARTERPASTTWO");
    for address in &lit {
        assert_eq!(frame.get(*address), Pixel::new(Color::Cyan, 100));
    }

    let topology = Topology::HORIZONTAL_1;
    let expected: HashSet<_> = lit
        .iter()
        .filter_map(|address| topology.resolve(*address))
        .collect();
    let strip = topology.to_strip(&frame);
    for index in topology.claimed() {
        assert_eq!(
            !strip.get(index).is_off(),
            expected.contains(&index),
            "{index:?}"
        );
    }
}

#[test]
fn composing_twice_gives_identical_frames() {
    let renderer: Renderer = Renderer::default();
    let settings = Settings {
        color_change: ColorChange::Minute,
        ..scenario_settings()
    };
    let snapshot = Snapshot {
        ambient_light: Some(140),
        indoor_temperature: Some(21),
        ..Snapshot::at(datetime!(2024-12-24 18:42:17))
    };
    for mode in Mode::CYCLIC {
        let scene = Scene::of(mode);
        assert_eq!(
            renderer.compose(&scene, &settings, &snapshot),
            renderer.compose(&scene, &settings, &snapshot),
            "{mode:?}"
        );
    }
}

#[test]
fn it_is_prefix_follows_the_setting() {
    let renderer: Renderer = Renderer::default();
    let snapshot = Snapshot::at(datetime!(2024-05-04 14:15:00));
    let without = Settings {
        it_is: false,
        ..scenario_settings()
    };
    let frame = renderer.compose(&Scene::of(Mode::Time), &without, &snapshot);
    assert!(frame.get(LogicalAddress::grid(0, 0)).is_off());
    assert!(!frame.get(LogicalAddress::grid(1, 2)).is_off());
}

#[test]
fn outdoor_modes_show_the_weather_value() {
    let renderer: Renderer = Renderer::default();
    let snapshot = Snapshot {
        weather: Some(Weather {
            temperature: -12,
            humidity: 64,
            pressure: 1013,
            sunrise: time::macros::time!(7:12),
            sunset: time::macros::time!(16:30),
            description: "snow".try_into().expect("fits"),
        }),
        ..Snapshot::at(datetime!(2024-01-10 08:00:00))
    };
    let settings = scenario_settings();
    let temperature = renderer.compose(&Scene::of(Mode::ExtTemperature), &settings, &snapshot);
    let humidity = renderer.compose(&Scene::of(Mode::ExtHumidity), &settings, &snapshot);
    assert!(temperature.lit().count() > 4);
    assert!(humidity.lit().count() > 4);
    assert_ne!(temperature, humidity);
}

#[test]
fn idle_timer_shows_zero() {
    let renderer: Renderer = Renderer::default();
    let snapshot = Snapshot::at(datetime!(2024-05-04 10:20:00));
    let settings = scenario_settings();
    let idle = renderer.compose(&Scene::of(Mode::Timer), &settings, &snapshot);
    let zero = Scene {
        timer_minutes: Some(0),
        ..Scene::of(Mode::Timer)
    };
    assert!(!idle.is_dark());
    assert_eq!(idle, renderer.compose(&zero, &settings, &snapshot));
}

#[test]
fn feed_scrolls_in_from_the_right() {
    let renderer: Renderer = Renderer::default();
    let settings = scenario_settings();
    let snapshot = Snapshot::default();
    let text = "Hi".try_into().expect("fits");
    let feed = Feed::new(text, Color::Yellow25);
    let scene = Scene {
        feed: Some(feed),
        ..Scene::of(Mode::Feed)
    };
    let frame = renderer.compose(&scene, &settings, &snapshot);
    assert!(frame.is_dark(), "text starts just off the right edge");
}

#[test]
fn blank_is_dark_even_with_an_alarm_set() {
    let renderer: Renderer = Renderer::default();
    let mut settings = scenario_settings();
    settings.alarm1.enabled = true;
    let frame = renderer.compose(
        &Scene::of(Mode::Blank),
        &settings,
        &Snapshot::at(datetime!(2024-05-04 14:15:00)),
    );
    assert!(frame.is_dark());
}

#[test]
fn test_mode_sweeps_one_row_per_second() {
    let renderer: Renderer = Renderer::default();
    let settings = scenario_settings();
    let frame = renderer.compose(
        &Scene::of(Mode::Test),
        &settings,
        &Snapshot::at(datetime!(2024-05-04 14:15:03)),
    );
    assert_eq!(frame.lit().count(), 11);
    assert!(!frame.get(LogicalAddress::grid(3, 5)).is_off());
}
