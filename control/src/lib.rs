//! User interface and configuration of the expression pedal to MIDI
//! converter.
//!
//! It is meant to run inside of a firmware with a single polling loop,
//! however, all of it is hardware agnostic and runs on a host as well.
//!
//! Following is the flow of data within a single poll:
//!
//! ```text
//!    [Encoder] [Buttons]                 [Pedal ADC]
//!         |       |                           |
//!         V       V                           V
//!        [ Inputs ] --(Event)--> [ Menu ] <- [ Pedal ] --(CC)--> {MidiOut}
//!                               |   |  |        A
//!                       (Write) |   |  +--------+ (Configuration)
//!                               V   |
//!                         {Storage} | (Redraw)
//!                                   V
//!                              [ Painter ] --> {DrawTarget}
//! ```
//!
//! Items in curly braces are collaborators provided by the caller.

#![cfg_attr(not(test), no_std)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_precision_loss)]

pub mod calibration;
pub mod configuration;
pub mod controller;
pub mod input;
pub mod instrument;
mod log;
pub mod menu;
pub mod midi;
pub mod pedal;
pub mod render;
pub mod save;
pub mod storage;

#[cfg(test)]
mod testlib;

pub use crate::configuration::Configuration;
pub use crate::controller::Controller;
pub use crate::input::snapshot::Snapshot as InputSnapshot;
pub use crate::menu::{Event, Menu, Reaction, Redraw, Screen, Write};
pub use crate::midi::MidiOut;
pub use crate::render::Painter;
pub use crate::save::{Save, Store as SaveStore};
pub use crate::storage::{FlashStorage, MemoryStorage, Storage};

pub use expr2midi_dsp::curve::Curve;

/// Monotonic time of the polling loop, in milliseconds.
pub type Instant = fugit::TimerInstantU64<1000>;

/// Span of time in milliseconds.
pub type Duration = fugit::MillisDurationU64;
