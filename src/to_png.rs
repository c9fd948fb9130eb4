#![cfg(feature = "host")]
//! PNG previews of composed frames, for documentation and visual tests on the host.
//!
//! The grid is drawn as round LEDs with one extra ring of cells around it: the
//! corner minutes sit in the corners of that ring and the alarm LED in the middle
//! of its bottom edge.

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use png::{BitDepth, ColorType, Encoder, ScaledFloat};
use smart_leds::RGB8;

use crate::frame::Frame;
use crate::layout::{COLUMNS, LogicalAddress, ROWS, Special};

const PREVIEW_INVERSE_GAMMA: f32 = 2.2;
const CANVAS_COLUMNS: usize = COLUMNS + 2;
const CANVAS_ROWS: usize = ROWS + 2;

/// Render `frame` into a PNG whose larger side is at most `target_max_dimension`.
///
/// # Errors
///
/// Returns the file-system or encoder error.
pub fn write_frame_png(
    frame: &Frame,
    output_path: impl AsRef<Path>,
    target_max_dimension: u32,
) -> Result<(), Box<dyn Error>> {
    let output_path = output_path.as_ref();
    let cell_size = select_cell_size(target_max_dimension);
    let (width, height, pixels) = panel_pixels(frame, cell_size);
    let mut encoder = encoder(output_path, width, height)?;
    encoder.set_color(ColorType::Rgb);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&pixels)?;
    writer.finish()?;
    Ok(())
}

/// Render `frames` into a looping APNG, `frame_delay_ms` per frame.
///
/// Handy for previewing a transition frame by frame.
///
/// # Errors
///
/// Returns an error for an empty slice, a delay that does not fit the format, or
/// a file-system or encoder failure.
pub fn write_frames_apng(
    frames: &[Frame],
    output_path: impl AsRef<Path>,
    target_max_dimension: u32,
    frame_delay_ms: u16,
) -> Result<(), Box<dyn Error>> {
    if frames.is_empty() {
        return Err("no frames to write".into());
    }
    let output_path = output_path.as_ref();
    let cell_size = select_cell_size(target_max_dimension);
    let frame_count = u32::try_from(frames.len())?;
    let (width, height) = canvas_size(cell_size);

    let mut encoder = encoder(output_path, width, height)?;
    encoder.set_animated(frame_count, 0)?;
    let mut writer = encoder.write_header()?;
    for frame in frames {
        let (_, _, pixels) = panel_pixels(frame, cell_size);
        writer.set_frame_delay(frame_delay_ms, 1000)?;
        writer.write_image_data(&pixels)?;
    }
    writer.finish()?;
    Ok(())
}

fn encoder(
    output_path: &Path,
    width: u32,
    height: u32,
) -> Result<Encoder<'static, BufWriter<File>>, Box<dyn Error>> {
    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(output_path)?;
    let mut encoder = Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Sixteen);
    encoder.set_source_gamma(ScaledFloat::new(1.0));
    Ok(encoder)
}

fn select_cell_size(target_max_dimension: u32) -> u32 {
    let largest = CANVAS_COLUMNS.max(CANVAS_ROWS) as u32;
    (target_max_dimension / largest).max(4)
}

fn canvas_size(cell_size: u32) -> (u32, u32) {
    (
        CANVAS_COLUMNS as u32 * cell_size,
        CANVAS_ROWS as u32 * cell_size,
    )
}

// LEDs on the canvas, `None` where there is no LED.
fn canvas(frame: &Frame) -> [[Option<RGB8>; CANVAS_COLUMNS]; CANVAS_ROWS] {
    let mut canvas = [[None; CANVAS_COLUMNS]; CANVAS_ROWS];
    for row in 0..ROWS {
        for col in 0..COLUMNS {
            canvas[row + 1][col + 1] = Some(frame.cell(row, col).rgb());
        }
    }
    let specials = [
        (Special::CornerTopLeft, 0, 0),
        (Special::CornerTopRight, 0, CANVAS_COLUMNS - 1),
        (Special::CornerBottomRight, CANVAS_ROWS - 1, CANVAS_COLUMNS - 1),
        (Special::CornerBottomLeft, CANVAS_ROWS - 1, 0),
        (Special::Alarm, CANVAS_ROWS - 1, CANVAS_COLUMNS / 2),
    ];
    for (special, row, col) in specials {
        canvas[row][col] = Some(frame.get(LogicalAddress::Special(special)).rgb());
    }
    canvas
}

fn panel_pixels(frame: &Frame, cell_size: u32) -> (u32, u32, Vec<u8>) {
    let (width, height) = canvas_size(cell_size);
    let mut bytes = vec![0u8; (width * height * 3 * 2) as usize];
    let led_margin = (cell_size / 8).max(1);
    let led_radius = (cell_size - led_margin * 2) / 2;
    let fade_width = (led_radius / 3).max(1);
    let led_radius_f = led_radius as f32;
    let inner_radius_f = led_radius.saturating_sub(fade_width) as f32;
    let radius_sq = (led_radius as i32) * (led_radius as i32);
    let center = (cell_size - 1) as i32 / 2;

    for (row_index, cells) in canvas(frame).iter().enumerate() {
        for (column_index, led) in cells.iter().enumerate() {
            let Some(led) = led else {
                continue;
            };
            let origin_x = column_index as u32 * cell_size;
            let origin_y = row_index as u32 * cell_size;
            for local_y in 0..cell_size {
                let delta_y = local_y as i32 - center;
                for local_x in 0..cell_size {
                    let delta_x = local_x as i32 - center;
                    let distance_sq = delta_x * delta_x + delta_y * delta_y;
                    if distance_sq > radius_sq {
                        continue;
                    }
                    let distance = (distance_sq as f32).sqrt();
                    let intensity = if distance <= inner_radius_f {
                        1.0
                    } else {
                        (1.0 - (distance - inner_radius_f) / (led_radius_f - inner_radius_f))
                            .max(0.0)
                    };
                    let x = origin_x + local_x;
                    let y = origin_y + local_y;
                    let index = ((y * width + x) * 3 * 2) as usize;
                    for (offset, channel) in [led.r, led.g, led.b].into_iter().enumerate() {
                        let value = linear_to_u16(inverse_gamma_to_linear(channel) * intensity);
                        bytes[index + offset * 2] = (value >> 8) as u8;
                        bytes[index + offset * 2 + 1] = value as u8;
                    }
                }
            }
        }
    }

    (width, height, bytes)
}

fn inverse_gamma_to_linear(channel: u8) -> f32 {
    (f32::from(channel) / 255.0).powf(PREVIEW_INVERSE_GAMMA)
}

fn linear_to_u16(value: f32) -> u16 {
    (value.clamp(0.0, 1.0) * 65535.0).round() as u16
}
