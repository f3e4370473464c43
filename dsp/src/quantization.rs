//! Reduction of the 10-bit curved position into a 7-bit MIDI value.

use crate::{MIDI_MAX, NORMALIZED_MAX};

/// Quantize a position in `0..=1023` into a MIDI value in `0..=127`.
///
/// This is equal to `round(value * 127 / 1023)`. Since 1023 is odd, the
/// fraction can never land exactly on one half, so there is no tie to
/// break. Values above 1023 are treated as 1023.
#[must_use]
pub fn quantize(value: u16) -> u8 {
    let value = u32::from(value.min(NORMALIZED_MAX));
    let max = u32::from(NORMALIZED_MAX);
    ((value * u32::from(MIDI_MAX) + max / 2) / max) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn endpoints_map_onto_midi_endpoints() {
        assert_eq!(quantize(0), 0);
        assert_eq!(quantize(1023), 127);
    }

    #[test]
    fn values_are_rounded_to_nearest() {
        assert_eq!(quantize(102), 13);
        assert_eq!(quantize(4), 0);
        assert_eq!(quantize(5), 1);
        assert_eq!(quantize(512), 64);
    }

    #[test]
    fn matches_floating_point_rounding_for_whole_range() {
        for value in 0..=1023_u16 {
            let expected = libm::roundf(f32::from(value) * 127.0 / 1023.0) as u8;
            assert_eq!(quantize(value), expected, "at {value}");
        }
    }

    proptest! {
        #[test]
        fn never_exceeds_midi_range(value in any::<u16>()) {
            prop_assert!(quantize(value) <= 127);
        }
    }
}
