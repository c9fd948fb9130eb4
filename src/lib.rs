//! Display core for LED word clocks.
//!
//! A word clock lights the letters of a printed grid so they read as the time
//! ("IT IS QUARTER PAST TWO"), plus four corner LEDs for the minutes in between
//! and an alarm indicator. This crate is everything between the sensors and the
//! LED driver:
//!
//! - [`layout`]: logical addresses to physical strip indices, per wiring topology.
//! - [`render`]: composes a [`frame::Frame`] for the displayed mode.
//! - [`sequencer`]: the mode state machine with its timers, events, and overlays.
//! - [`transition`]: animates from one frame to the next.
//! - [`config_store`]: the versioned, CRC-checked settings record.
//! - [`clock`]: the control loop tying them together.
//!
//! Collaborators (time source, sensors, weather client, strip driver, storage) are
//! traits; the core never blocks and never reads a clock on its own.
//!
//! # Glossary
//!
//! - **Topology:** a fixed wiring of the strip behind the grid.
//! - **Frame:** color and brightness of every LED for one tick.
//! - **Mode:** one kind of content: time, date, temperature, ...
//! - **Feed:** text scrolling across the grid once.
//! - **Cover:** the printed letter grid and its reading rules.
#![cfg_attr(not(any(test, feature = "host")), no_std)]

// Compile-time check: at most one board
#[cfg(all(feature = "pico1", feature = "pico2"))]
compile_error!("Cannot enable both 'pico1' and 'pico2' features simultaneously");

#[macro_use]
mod fmt;

pub mod alarm;
pub mod clock;
pub mod color;
pub mod config;
pub mod config_store;
pub mod domain;
mod error;
pub mod event;
#[cfg(any(feature = "pico1", feature = "pico2"))]
pub mod flash_storage;
pub mod frame;
pub mod layout;
pub mod mode;
pub mod output;
pub mod render;
pub mod sequencer;
pub mod settings;
#[cfg(feature = "host")]
pub mod to_png;
pub mod transition;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};
