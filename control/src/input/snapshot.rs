//! Structures used to pass the current state of hardware peripherals.

/// The current state of all peripherals.
///
/// `InputSnapshot` is meant to be passed from the hardware binding to the
/// control package once per poll. It should pass pretty raw data: levels
/// of the buttons as they are, without debouncing, encoder ticks
/// accumulated since the previous snapshot, and the last pedal sample.
#[derive(Debug, Default, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    /// Positive ticks turn clockwise, negative counter-clockwise.
    pub encoder: i32,
    pub encoder_button: bool,
    pub aux_button: bool,
    /// Raw 12-bit ADC reading of the pedal.
    pub pedal: u16,
}
