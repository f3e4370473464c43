//! Settings of the device as the user committed them.

use expr2midi_dsp::curve::{apply_curve, Curve};
use expr2midi_dsp::MIDI_MAX;

use crate::calibration::Calibration;
use crate::instrument::{self, Instrument};
use crate::log;
use crate::storage::Storage;

pub const DEFAULT_CC: u8 = 74;

/// MIDI channels are numbered from 1 here, as shown to the user.
pub const DEFAULT_CHANNEL: u8 = 15;
pub const CHANNEL_MIN: u8 = 1;
pub const CHANNEL_MAX: u8 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Configuration {
    pub cc: u8,
    pub channel: u8,
    pub curve: Curve,
    pub inverted: bool,
    pub instrument: u8,
    pub calibration: Calibration,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            cc: DEFAULT_CC,
            channel: DEFAULT_CHANNEL,
            curve: Curve::default(),
            inverted: false,
            instrument: instrument::NONE,
            calibration: Calibration::default(),
        }
    }
}

impl Configuration {
    /// Initialize the storage and read the configuration from it.
    ///
    /// The returned flag tells whether prior settings existed. When they
    /// did not, the storage has just written its defaults.
    pub fn load(storage: &mut impl Storage) -> (Self, bool) {
        let existed = storage.init();
        let configuration = Self::from_storage(storage);
        if existed {
            log::info!("Loaded configuration={:?}", configuration);
        } else {
            log::info!("No prior configuration, defaults were written");
        }
        (configuration, existed)
    }

    /// Read all settings, replacing those out of range with safe values.
    pub fn from_storage(storage: &impl Storage) -> Self {
        Self {
            cc: sanitize_cc(storage.cc()),
            channel: sanitize_channel(storage.channel()),
            curve: Curve::from_index(storage.curve()).unwrap_or_default(),
            inverted: storage.invert(),
            instrument: sanitize_instrument(storage.active_instrument()),
            calibration: Calibration::new(storage.pedal_min(), storage.pedal_max()),
        }
    }

    /// Shape the linear pedal position with the committed curve and
    /// inversion.
    #[must_use]
    pub fn apply_curve(&self, linear: u16) -> u16 {
        apply_curve(self.curve, self.inverted, linear)
    }

    #[must_use]
    pub fn instrument(&self) -> Option<&'static Instrument> {
        instrument::get(self.instrument)
    }

    /// Label of the given controller on the active instrument.
    #[must_use]
    pub fn label_for_cc(&self, cc: u8) -> Option<&'static str> {
        instrument::label_for_cc(self.instrument, cc)
    }
}

fn sanitize_cc(cc: u8) -> u8 {
    if cc > MIDI_MAX {
        0
    } else {
        cc
    }
}

fn sanitize_channel(channel: u8) -> u8 {
    if (CHANNEL_MIN..=CHANNEL_MAX).contains(&channel) {
        channel
    } else {
        DEFAULT_CHANNEL
    }
}

fn sanitize_instrument(index: u8) -> u8 {
    if (index as usize) < instrument::count() {
        index
    } else {
        instrument::NONE
    }
}
