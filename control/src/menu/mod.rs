//! Menu of the device, the state machine driven by user input.
//!
//! The menu owns the committed configuration. Screens editing a setting
//! keep a [`Draft`] of it and write it back only on confirmation. Every
//! handled event yields a [`Reaction`], telling the caller which setting
//! needs to be persisted and how much of the screen needs to be redrawn.

mod draft;
pub mod view;

use expr2midi_dsp::curve::Curve;
use expr2midi_dsp::MIDI_MAX;

pub use self::draft::Draft;
use crate::calibration::Endpoint;
use crate::configuration::{Configuration, CHANNEL_MAX, CHANNEL_MIN};
use crate::instrument;
use crate::log;
use crate::pedal::Reading;

/// Discrete input of the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    RotateCW,
    RotateCCW,
    Confirm,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    Main,
    Monitor,
    MidiChannel,
    MidiCC,
    Calibration,
    Invert,
    Curve,
    Instruments,
}

/// Options of the main screen and where they lead.
pub const MAIN_OPTIONS: [(&str, Screen); 7] = [
    ("Monitor", Screen::Monitor),
    ("MIDI Channel", Screen::MidiChannel),
    ("MIDI CC", Screen::MidiCC),
    ("Calibration", Screen::Calibration),
    ("Invert", Screen::Invert),
    ("Curve", Screen::Curve),
    ("Instruments", Screen::Instruments),
];

/// A single setting to be written to the storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Write {
    Cc(u8),
    Channel(u8),
    Curve(Curve),
    Invert(bool),
    ActiveInstrument(u8),
    Calibration { min: u16, max: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Redraw {
    None,
    /// The same screen stays, only changed regions need to be redrawn.
    Update,
    /// A different screen is shown, it must be drawn from scratch.
    Screen,
}

/// Response of the menu to a handled event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reaction {
    pub write: Option<Write>,
    pub redraw: Redraw,
}

impl Reaction {
    fn none() -> Self {
        Self {
            write: None,
            redraw: Redraw::None,
        }
    }

    fn update() -> Self {
        Self {
            write: None,
            redraw: Redraw::Update,
        }
    }

    fn screen() -> Self {
        Self {
            write: None,
            redraw: Redraw::Screen,
        }
    }

    fn with_write(self, write: Write) -> Self {
        Self {
            write: Some(write),
            ..self
        }
    }
}

/// Confirmation shown after a setting got persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Saved {
    Setting,
    Endpoint(Endpoint),
}

/// The latest pedal values, kept for display.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Monitor {
    pub input: u16,
    pub raw: u16,
    pub normalized: u16,
    pub midi: u8,
}

#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Menu {
    configuration: Configuration,
    screen: Screen,
    main_selected: usize,
    main_top: usize,
    cc: Draft<u8>,
    curve: Draft<Curve>,
    invert: Draft<bool>,
    instrument: Draft<u8>,
    instrument_top: usize,
    visible_rows: usize,
    setting_max: bool,
    saved: Option<Saved>,
    monitor: Monitor,
}

impl Menu {
    #[must_use]
    pub fn new(configuration: Configuration, visible_rows: usize) -> Self {
        Self {
            configuration,
            screen: Screen::Main,
            main_selected: 0,
            main_top: 0,
            cc: Draft::new(configuration.cc),
            curve: Draft::new(configuration.curve),
            invert: Draft::new(configuration.inverted),
            instrument: Draft::new(configuration.instrument),
            instrument_top: 0,
            visible_rows: visible_rows.max(1),
            setting_max: false,
            saved: None,
            monitor: Monitor::default(),
        }
    }

    #[must_use]
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn main_selected(&self) -> usize {
        self.main_selected
    }

    /// The first main option shown on the display.
    #[must_use]
    pub fn main_top(&self) -> usize {
        self.main_top
    }

    #[must_use]
    pub fn selected_cc(&self) -> u8 {
        self.cc.get()
    }

    #[must_use]
    pub fn staged_curve(&self) -> Curve {
        self.curve.get()
    }

    #[must_use]
    pub fn staged_invert(&self) -> bool {
        self.invert.get()
    }

    #[must_use]
    pub fn highlighted_instrument(&self) -> u8 {
        self.instrument.get()
    }

    #[must_use]
    pub fn instrument_top(&self) -> usize {
        self.instrument_top
    }

    #[must_use]
    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    /// Whether the next confirmation on the calibration screen sets the
    /// maximum.
    #[must_use]
    pub fn setting_max(&self) -> bool {
        self.setting_max
    }

    #[must_use]
    pub fn saved(&self) -> Option<Saved> {
        self.saved
    }

    #[must_use]
    pub fn monitor(&self) -> Monitor {
        self.monitor
    }

    pub fn set_visible_rows(&mut self, visible_rows: usize) {
        self.visible_rows = visible_rows.max(1);
        self.scroll_to_selection();
        self.scroll_to_highlight();
    }

    /// Label of the selected CC on the active instrument.
    ///
    /// The highlighted instrument on the instruments screen does not
    /// matter until it is confirmed.
    #[must_use]
    pub fn selected_cc_label(&self) -> Option<&'static str> {
        self.configuration.label_for_cc(self.cc.get())
    }

    #[must_use]
    pub fn selected_cc_is_active(&self) -> bool {
        !self.cc.is_dirty(self.configuration.cc)
    }

    /// Store the latest pedal reading.
    ///
    /// Returns `true` when the current screen shows any of the values and
    /// at least one of them changed.
    pub fn update_monitor(&mut self, reading: &Reading) -> bool {
        let monitor = Monitor {
            input: reading.input,
            raw: reading.raw,
            normalized: reading.normalized,
            midi: reading.midi,
        };
        let changed = monitor != self.monitor;
        self.monitor = monitor;
        changed && matches!(self.screen, Screen::Monitor | Screen::Calibration)
    }

    /// Handle a single input event.
    ///
    /// The `raw_now` is the current raw pedal sample, used when a
    /// calibration endpoint gets captured.
    pub fn handle(&mut self, event: Event, raw_now: u16) -> Reaction {
        match self.screen {
            Screen::Main => self.handle_main(event),
            Screen::Monitor => self.handle_monitor(event),
            Screen::MidiChannel => self.handle_midi_channel(event),
            Screen::MidiCC => self.handle_midi_cc(event),
            Screen::Calibration => self.handle_calibration(event, raw_now),
            Screen::Invert => self.handle_invert(event),
            Screen::Curve => self.handle_curve(event),
            Screen::Instruments => self.handle_instruments(event),
        }
    }

    fn handle_main(&mut self, event: Event) -> Reaction {
        match event {
            Event::RotateCW => {
                self.main_selected = wrap_increment(self.main_selected, MAIN_OPTIONS.len());
                self.scroll_to_selection();
                Reaction::update()
            }
            Event::RotateCCW => {
                self.main_selected = wrap_decrement(self.main_selected, MAIN_OPTIONS.len());
                self.scroll_to_selection();
                Reaction::update()
            }
            Event::Confirm => {
                let (_, screen) = MAIN_OPTIONS[self.main_selected];
                self.enter(screen)
            }
            Event::Cancel => self.enter(Screen::Monitor),
        }
    }

    fn handle_monitor(&mut self, event: Event) -> Reaction {
        match event {
            Event::RotateCW | Event::RotateCCW | Event::Confirm => Reaction::none(),
            Event::Cancel => self.return_to_main(),
        }
    }

    fn handle_midi_channel(&mut self, event: Event) -> Reaction {
        match event {
            Event::RotateCW => {
                self.configuration.channel = if self.configuration.channel >= CHANNEL_MAX {
                    CHANNEL_MIN
                } else {
                    self.configuration.channel + 1
                };
                self.saved = None;
                Reaction::update()
            }
            Event::RotateCCW => {
                self.configuration.channel = if self.configuration.channel <= CHANNEL_MIN {
                    CHANNEL_MAX
                } else {
                    self.configuration.channel - 1
                };
                self.saved = None;
                Reaction::update()
            }
            Event::Confirm => {
                log::info!("Setting channel={:?}", self.configuration.channel);
                self.saved = Some(Saved::Setting);
                Reaction::update().with_write(Write::Channel(self.configuration.channel))
            }
            Event::Cancel => self.return_to_main(),
        }
    }

    fn handle_midi_cc(&mut self, event: Event) -> Reaction {
        match event {
            Event::RotateCW => {
                self.cc.update(|cc| if cc >= MIDI_MAX { 0 } else { cc + 1 });
                self.saved = None;
                Reaction::update()
            }
            Event::RotateCCW => {
                self.cc.update(|cc| if cc == 0 { MIDI_MAX } else { cc - 1 });
                self.saved = None;
                Reaction::update()
            }
            Event::Confirm => {
                let cc = self.cc.commit(&mut self.configuration.cc);
                log::info!("Setting cc={:?}", cc);
                self.saved = Some(Saved::Setting);
                Reaction::update().with_write(Write::Cc(cc))
            }
            Event::Cancel => self.return_to_main(),
        }
    }

    fn handle_calibration(&mut self, event: Event, raw_now: u16) -> Reaction {
        match event {
            Event::RotateCW | Event::RotateCCW => {
                self.setting_max = !self.setting_max;
                self.saved = None;
                Reaction::update()
            }
            Event::Confirm => {
                let endpoint = if self.setting_max {
                    Endpoint::Max
                } else {
                    Endpoint::Min
                };
                let calibration = self
                    .configuration
                    .calibration
                    .with_endpoint(endpoint, raw_now);
                log::info!("Capturing endpoint={:?} raw={:?}", endpoint, raw_now);
                self.configuration.calibration = calibration;
                self.saved = Some(Saved::Endpoint(endpoint));
                Reaction::update().with_write(Write::Calibration {
                    min: calibration.min,
                    max: calibration.max,
                })
            }
            Event::Cancel => self.return_to_main(),
        }
    }

    fn handle_invert(&mut self, event: Event) -> Reaction {
        match event {
            Event::RotateCW | Event::RotateCCW => {
                self.invert.update(|inverted| !inverted);
                Reaction::update()
            }
            Event::Confirm => {
                let inverted = self.invert.commit(&mut self.configuration.inverted);
                log::info!("Setting inverted={:?}", inverted);
                self.return_to_main().with_write(Write::Invert(inverted))
            }
            Event::Cancel => self.return_to_main(),
        }
    }

    fn handle_curve(&mut self, event: Event) -> Reaction {
        match event {
            Event::RotateCW => {
                self.curve.update(Curve::next);
                Reaction::update()
            }
            Event::RotateCCW => {
                self.curve.update(Curve::previous);
                Reaction::update()
            }
            Event::Confirm => {
                let curve = self.curve.commit(&mut self.configuration.curve);
                log::info!("Setting curve={:?}", curve);
                self.return_to_main().with_write(Write::Curve(curve))
            }
            Event::Cancel => self.return_to_main(),
        }
    }

    fn handle_instruments(&mut self, event: Event) -> Reaction {
        let count = instrument::count();
        match event {
            Event::RotateCW => {
                self.instrument
                    .update(|index| wrap_increment(index as usize, count) as u8);
                self.scroll_to_highlight();
                Reaction::update()
            }
            Event::RotateCCW => {
                self.instrument
                    .update(|index| wrap_decrement(index as usize, count) as u8);
                self.scroll_to_highlight();
                Reaction::update()
            }
            Event::Confirm => {
                let index = self.instrument.commit(&mut self.configuration.instrument);
                log::info!("Setting instrument={:?}", index);
                self.saved = Some(Saved::Setting);
                Reaction::update().with_write(Write::ActiveInstrument(index))
            }
            Event::Cancel => self.return_to_main(),
        }
    }

    fn enter(&mut self, screen: Screen) -> Reaction {
        log::info!("Entering screen={:?}", screen);
        self.sync_drafts();
        self.saved = None;
        self.setting_max = false;
        self.screen = screen;
        Reaction::screen()
    }

    fn return_to_main(&mut self) -> Reaction {
        self.enter(Screen::Main)
    }

    fn sync_drafts(&mut self) {
        self.cc.sync(self.configuration.cc);
        self.curve.sync(self.configuration.curve);
        self.invert.sync(self.configuration.inverted);
        self.instrument.sync(self.configuration.instrument);
        self.scroll_to_highlight();
    }

    fn scroll_to_selection(&mut self) {
        self.main_top = scroll_window(self.main_top, self.main_selected, self.visible_rows);
    }

    fn scroll_to_highlight(&mut self) {
        let highlighted = self.instrument.get() as usize;
        self.instrument_top = scroll_window(self.instrument_top, highlighted, self.visible_rows);
    }
}

/// Move the window of `visible` rows starting at `top` the least possible
/// to keep `highlighted` in it.
fn scroll_window(top: usize, highlighted: usize, visible: usize) -> usize {
    if highlighted < top {
        highlighted
    } else if highlighted >= top + visible {
        highlighted + 1 - visible
    } else {
        top
    }
}

fn wrap_increment(value: usize, count: usize) -> usize {
    if value + 1 >= count {
        0
    } else {
        value + 1
    }
}

fn wrap_decrement(value: usize, count: usize) -> usize {
    if value == 0 {
        count.saturating_sub(1)
    } else {
        value - 1
    }
}
