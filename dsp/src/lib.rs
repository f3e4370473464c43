//! Numeric building blocks of the pedal signal path.
//!
//! These are pure, allocation-free components, shared by the control loop
//! and by anything that needs to preview what the pedal would send (such as
//! a curve plot on the display).
//!
//! ```text
//!   [ normalized 0..=1023 ] -> [ OnePoleFilter ] -> [ Curve ] -> [ quantization ] -> [ 0..=127 ]
//! ```

#![cfg_attr(not(test), no_std)]

#[cfg(test)]
#[macro_use]
extern crate approx;

pub mod curve;
pub mod one_pole_filter;
pub mod quantization;

/// Upper bound of the normalized pedal range the curves work with.
pub const NORMALIZED_MAX: u16 = 1023;

/// Upper bound of a MIDI Control Change value.
pub const MIDI_MAX: u8 = 127;
