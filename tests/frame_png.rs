#![cfg(feature = "host")]
#![allow(missing_docs)]
//! PNG previews of composed frames.

use std::error::Error;
use std::fs::File;

use time::macros::datetime;
use word_clock::domain::Snapshot;
use word_clock::frame::Frame;
use word_clock::mode::Mode;
use word_clock::render::{Renderer, Scene};
use word_clock::settings::{Settings, Transition};
use word_clock::to_png::{write_frame_png, write_frames_apng};
use word_clock::transition::{FADE_STEPS, blend};

fn quarter_past_two() -> Frame {
    let renderer: Renderer = Renderer::default();
    renderer.compose(
        &Scene::of(Mode::Time),
        &Settings::default(),
        &Snapshot::at(datetime!(2024-05-04 14:17:00)),
    )
}

fn decoded_size(path: &std::path::Path) -> Result<(u32, u32, u32), Box<dyn Error>> {
    let decoder = png::Decoder::new(File::open(path)?);
    let reader = decoder.read_info()?;
    let info = reader.info();
    let frames = info
        .animation_control
        .map_or(1, |control| control.num_frames);
    Ok((info.width, info.height, frames))
}

#[test]
fn frame_png_has_the_requested_size() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested").join("quarter_past_two.png");
    write_frame_png(&quarter_past_two(), &path, 240)?;
    assert_eq!(decoded_size(&path)?, (240, 240, 1));
    Ok(())
}

#[test]
fn transition_apng_holds_every_step() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("fade.png");
    let dark = Frame::new();
    let target = quarter_past_two();
    let frames: Vec<Frame> = (0..=FADE_STEPS)
        .map(|step| blend(&dark, &target, Transition::Fade, step))
        .collect();
    write_frames_apng(&frames, &path, 120, 30)?;
    assert_eq!(decoded_size(&path)?, (120, 120, u32::from(FADE_STEPS) + 1));
    Ok(())
}

#[test]
fn empty_animation_is_rejected() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    assert!(write_frames_apng(&[], dir.path().join("empty.png"), 120, 30).is_err());
    Ok(())
}
