//! The control loop: one owner for settings, sequencer, renderer, animator, and output state.
//!
//! Every tick the firmware samples its collaborators into a [`Snapshot`], drains the
//! [`CommandChannel`] that web and remote handlers write to, and calls
//! [`WordClock::tick`]. Nothing else mutates the clock.
//!
//! ```rust
//! use embassy_time::{Duration, Instant};
//! use word_clock::Result;
//! use word_clock::clock::{Command, CommandChannel, WordClock};
//! use word_clock::config::ClockConfig;
//! use word_clock::config_store::{RECORD_SIZE, RamStorage};
//! use word_clock::domain::Snapshot;
//! use word_clock::layout::PhysicalIndex;
//! use word_clock::output::StripOutput;
//! use word_clock::render::cover::English;
//! use word_clock::sequencer::Input;
//! use smart_leds::RGB8;
//!
//! struct Discard;
//!
//! impl StripOutput for Discard {
//!     fn set_pixel(&mut self, _: PhysicalIndex, _: RGB8, _: u8) -> Result<()> {
//!         Ok(())
//!     }
//!
//!     fn show(&mut self) -> Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! static COMMANDS: CommandChannel = CommandChannel::new();
//!
//! let start = Instant::from_millis(0);
//! let mut clock = WordClock::new(
//!     &ClockConfig::default(),
//!     English,
//!     RamStorage::<RECORD_SIZE>::new(),
//!     start,
//! );
//! COMMANDS.try_send(Command::Input(Input::OnOff)).ok();
//!
//! let now = start + Duration::from_millis(100);
//! let snapshot = Snapshot::default();
//! let failed = clock.drain(&COMMANDS, now, &snapshot);
//! assert!(failed.is_empty());
//! let tick = clock.tick(now, &snapshot, &mut Discard);
//! assert!(clock.frame().is_dark());
//! assert!(tick.output.is_ok());
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Instant};
use heapless::Vec;

use crate::alarm::Beep;
use crate::color::Color;
use crate::config::ClockConfig;
use crate::config_store::{ConfigStore, Storage};
use crate::domain::Snapshot;
use crate::event::{EVENTS, Event, FeedText};
use crate::frame::Frame;
use crate::layout::Topology;
use crate::mode::{EnabledModes, Mode};
use crate::output::{StripOutput, StripSync};
use crate::render::cover::{English, FrontCover};
use crate::render::{Renderer, Scene};
use crate::sequencer::{Input, Sequencer, Timing};
use crate::settings::{Settings, SettingsChange, Transition};
use crate::transition::Animator;
use crate::{Error, Result};

/// Commands the channel can hold before senders see it full.
pub const COMMAND_CAPACITY: usize = 8;

/// A request from outside the control loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Change and persist one setting.
    Settings(SettingsChange),
    /// Restore the factory settings of the build's preset.
    ResetSettings,
    /// A button or remote input.
    Input(Input),
    /// Start the countdown timer, in minutes.
    StartTimer(u16),
    /// Cancel the countdown timer.
    StopTimer,
    /// Scroll a text once.
    ShowText(FeedText, Color),
}

/// Queue from asynchronous surfaces to the control loop.
pub type CommandChannel = Channel<CriticalSectionRawMutex, Command, COMMAND_CAPACITY>;

/// Drained commands that failed, with why.
pub type Failures = Vec<(Command, Error), COMMAND_CAPACITY>;

/// What one tick did.
#[derive(Debug)]
pub struct Tick {
    /// Beep for the buzzer collaborator.
    pub beep: Option<Beep>,
    /// Mode on display after the tick.
    pub mode: Mode,
    /// Pixels written to the strip, or why the strip refused them.
    pub output: Result<usize>,
}

/// A complete word clock core.
pub struct WordClock<S: Storage, C: FrontCover = English> {
    store: ConfigStore<S>,
    sequencer: Sequencer,
    renderer: Renderer<C>,
    animator: Animator,
    topology: Topology,
    sync: StripSync,
    events: &'static [Event],
    animation_step: Duration,
    last_animation: Instant,
    shown_mode: Mode,
}

impl<S: Storage, C: FrontCover> WordClock<S, C> {
    /// Load the settings from `storage` and start showing the time at `now`.
    pub fn new(config: &ClockConfig, cover: C, storage: S, now: Instant) -> Self {
        let mut store = ConfigStore::new(storage, config.preset);
        let settings = store.load();
        info!(
            "WordClock: started, brightness {}, transition {:?}",
            settings.brightness, settings.transition
        );
        Self {
            store,
            sequencer: Sequencer::new(EnabledModes::new(config.modes), Timing::from(config), now),
            renderer: Renderer::new(cover, config),
            animator: Animator::default(),
            topology: config.wiring(),
            sync: StripSync::new(),
            events: &EVENTS,
            animation_step: config.animation_step,
            last_animation: now,
            shown_mode: Mode::Blank,
        }
    }

    /// Replace the event calendar.
    #[must_use]
    pub fn with_events(mut self, events: &'static [Event]) -> Self {
        self.events = events;
        self
    }

    /// The committed settings.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        self.store.settings()
    }

    /// The settings store.
    #[must_use]
    pub const fn store(&self) -> &ConfigStore<S> {
        &self.store
    }

    /// The mode state machine.
    #[must_use]
    pub const fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    /// The strip wiring.
    #[must_use]
    pub const fn topology(&self) -> &Topology {
        &self.topology
    }

    /// The frame last handed to the strip.
    #[must_use]
    pub const fn frame(&self) -> &Frame {
        self.animator.current()
    }

    /// Apply one command.
    ///
    /// # Errors
    ///
    /// Returns the storage error of a settings change, which leaves the committed
    /// settings as they were, or [`Error::FeedTooLong`](crate::Error::FeedTooLong).
    pub fn handle(&mut self, command: Command, now: Instant, snapshot: &Snapshot) -> Result<()> {
        match command {
            Command::Settings(change) => {
                self.store.apply(change)?;
            }
            Command::ResetSettings => self.store.reset()?,
            Command::Input(input) => self.sequencer.handle_input(input, now, snapshot),
            Command::StartTimer(minutes) => self.sequencer.start_timer(minutes, now),
            Command::StopTimer => self.sequencer.stop_timer(),
            Command::ShowText(text, color) => self.sequencer.show_text(&text, color, now)?,
        }
        Ok(())
    }

    /// Apply every queued command and return the ones that failed.
    ///
    /// A failure does not stop the drain. The caller reports each one to the surface
    /// that sent it; a failed settings change left the committed settings untouched.
    #[must_use]
    pub fn drain(
        &mut self,
        commands: &CommandChannel,
        now: Instant,
        snapshot: &Snapshot,
    ) -> Failures {
        let mut failures = Failures::new();
        while let Ok(command) = commands.try_receive() {
            if let Err(err) = self.handle(command.clone(), now, snapshot) {
                warn!("WordClock: command failed: {:?}", err);
                if failures.push((command, err)).is_err() {
                    warn!("WordClock: too many failures to report");
                }
            }
        }
        failures
    }

    /// Advance the clock to `now` using one consistent `snapshot`.
    ///
    /// Runs the sequencer, then either one animation step or a fresh compose, and
    /// writes the changed pixels to `output` with a single `show()`.
    pub fn tick<O: StripOutput + ?Sized>(
        &mut self,
        now: Instant,
        snapshot: &Snapshot,
        output: &mut O,
    ) -> Tick {
        let settings = *self.store.settings();
        let beep = self
            .sequencer
            .tick(now, snapshot, &settings, self.events);
        if let Some(beep) = beep {
            info!("WordClock: beep {:?}", beep);
        }
        let scene = self.sequencer.scene(now);

        if self.animator.is_animating() {
            let overlay_started =
                scene.mode != self.shown_mode && matches!(scene.mode, Mode::Blank | Mode::Feed);
            if overlay_started {
                self.animator.cancel();
                self.start(&scene, &settings, snapshot, now);
            } else if now.saturating_duration_since(self.last_animation) >= self.animation_step {
                self.animator.step();
                self.last_animation = now;
            }
        } else {
            self.start(&scene, &settings, snapshot, now);
        }

        let strip = self.topology.to_strip(self.animator.current());
        let output = self.sync.present(output, &strip);
        if let Err(err) = &output {
            warn!("WordClock: strip output failed: {:?}", err);
        }
        Tick {
            beep,
            mode: scene.mode,
            output,
        }
    }

    fn start(&mut self, scene: &Scene, settings: &Settings, snapshot: &Snapshot, now: Instant) {
        let target = self.renderer.compose(scene, settings, snapshot);
        let style = if scene.mode == Mode::Feed || self.shown_mode == Mode::Feed {
            Transition::Normal
        } else {
            settings.transition
        };
        self.shown_mode = scene.mode;
        if target == *self.animator.target() {
            return;
        }
        if let Err(err) = self.animator.retarget(target, style) {
            warn!("WordClock: {:?}, snapping to the new frame", err);
            self.animator = Animator::new(target);
            return;
        }
        self.animator.step();
        self.last_animation = now;
    }
}
