//! The body of the main loop, tying inputs, menu, pedal and outputs together.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::DrawTarget;

use crate::configuration::Configuration;
use crate::input::snapshot::Snapshot;
use crate::input::Store as Inputs;
use crate::log;
use crate::menu::{view, Menu, Reaction, Redraw, Write};
use crate::midi::{control_change, MidiOut};
use crate::pedal::{Pedal, Reading};
use crate::render::Painter;
use crate::storage::Storage;
use crate::{Duration, Instant};

/// How often is the pedal sampled and the monitor refreshed.
pub const PEDAL_POLL_INTERVAL: Duration = Duration::millis(100);

/// Rows assumed until a display is attached.
const DEFAULT_VISIBLE_ROWS: usize = 13;

/// The controller owning all the state of the device.
///
/// It is meant to be polled from a single loop as often as possible. The
/// display is attached later through [`Controller::begin`], until then
/// the user input is ignored, while the pedal keeps sending MIDI.
pub struct Controller<S, D, M> {
    storage: S,
    midi: M,
    display: Option<Painter<D>>,
    display_stale: bool,
    menu: Menu,
    pedal: Pedal,
    inputs: Inputs,
    last_pedal_poll: Option<Instant>,
}

impl<S, D, M> Controller<S, D, M>
where
    S: Storage,
    D: DrawTarget<Color = Rgb565>,
    M: MidiOut,
{
    /// Load the configuration, writing defaults on the first boot.
    pub fn new(mut storage: S, midi: M) -> Self {
        let (configuration, _existed) = Configuration::load(&mut storage);
        Self {
            storage,
            midi,
            display: None,
            display_stale: false,
            menu: Menu::new(configuration, DEFAULT_VISIBLE_ROWS),
            pedal: Pedal::new(),
            inputs: Inputs::default(),
            last_pedal_poll: None,
        }
    }

    /// Attach the display and draw the main screen on it.
    pub fn begin(&mut self, target: D) {
        let painter = Painter::new(target);
        self.menu.set_visible_rows(painter.visible_rows());
        self.display = Some(painter);
        self.redraw(Redraw::Screen);
    }

    /// Process a snapshot of inputs taken at the given time.
    ///
    /// Returns the pedal reading if the pedal was sampled in this poll.
    pub fn poll(&mut self, snapshot: Snapshot, now: Instant) -> Option<Reading> {
        let events = self.inputs.update(snapshot, now);
        if self.display.is_some() {
            for event in events {
                let reaction = self.menu.handle(event, snapshot.pedal);
                self.apply(reaction);
            }
        }

        if self.pedal_poll_is_due(now) {
            self.last_pedal_poll = Some(now);
            Some(self.process_pedal(snapshot.pedal))
        } else {
            None
        }
    }

    #[must_use]
    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    #[must_use]
    pub fn configuration(&self) -> &Configuration {
        self.menu.configuration()
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    #[must_use]
    pub fn midi(&self) -> &M {
        &self.midi
    }

    pub fn display(&self) -> Option<&D> {
        self.display.as_ref().map(Painter::target)
    }

    fn pedal_poll_is_due(&self, now: Instant) -> bool {
        match self.last_pedal_poll {
            None => true,
            Some(last) => now
                .checked_duration_since(last)
                .map_or(false, |elapsed| elapsed >= PEDAL_POLL_INTERVAL),
        }
    }

    fn process_pedal(&mut self, raw: u16) -> Reading {
        let configuration = *self.menu.configuration();
        let reading = self.pedal.process(raw, &configuration);
        if reading.changed {
            self.midi.send(control_change(
                configuration.channel,
                configuration.cc,
                reading.midi,
            ));
        }
        if self.menu.update_monitor(&reading) {
            self.redraw(Redraw::Update);
        }
        reading
    }

    fn apply(&mut self, reaction: Reaction) {
        if let Some(write) = reaction.write {
            self.write(write);
        }
        self.redraw(reaction.redraw);
    }

    fn write(&mut self, write: Write) {
        log::info!("Writing setting={:?}", write);
        match write {
            Write::Cc(cc) => self.storage.save_cc(cc),
            Write::Channel(channel) => self.storage.save_channel(channel),
            Write::Curve(curve) => self.storage.save_curve(curve.index() as u8),
            Write::Invert(inverted) => self.storage.save_invert(inverted),
            Write::ActiveInstrument(index) => self.storage.save_active_instrument(index),
            Write::Calibration { min, max } => self.storage.save_calibration(min, max),
        }
    }

    /// Draw the requested part of the screen.
    ///
    /// After a failure, the whole screen is redrawn on the next request.
    fn redraw(&mut self, redraw: Redraw) {
        if let Some(painter) = self.display.as_mut() {
            let redraw = if self.display_stale {
                Redraw::Screen
            } else {
                redraw
            };
            self.display_stale = view::draw(&self.menu, painter, redraw).is_err();
            if self.display_stale {
                log::warning!("Failed to draw screen={:?}", self.menu.screen());
            }
        }
    }
}
