//! Turn raw readings of the expression pedal into MIDI values.

use expr2midi_dsp::one_pole_filter::OnePoleFilter;
use expr2midi_dsp::quantization::quantize;
use expr2midi_dsp::NORMALIZED_MAX;
#[allow(unused_imports)]
use micromath::F32Ext;

use crate::configuration::Configuration;

/// The smallest change of the MIDI value that is worth sending.
pub const DEADBAND: u8 = 1;

/// Intermediate and final values of a single processed sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    /// Raw sample as it came from the ADC.
    pub input: u16,
    /// Raw sample clamped into the calibrated range.
    pub raw: u16,
    /// Position within the calibrated range, `0..=1023`.
    pub normalized: u16,
    pub smoothed: u16,
    pub curved: u16,
    pub midi: u8,
    /// Whether the MIDI value moved past the deadband since the last
    /// reported change.
    pub changed: bool,
}

/// Signal processor of the single pedal input.
///
/// Keeps the smoothing state and the last reported MIDI value between
/// samples.
#[derive(Debug, Default)]
pub struct Pedal {
    filter: OnePoleFilter,
    last_midi: Option<u8>,
}

impl Pedal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one raw ADC sample using the committed configuration.
    ///
    /// No sample is ever rejected. The MIDI value is returned even when
    /// it did not pass the deadband, only `changed` is cleared then.
    pub fn process(&mut self, raw: u16, configuration: &Configuration) -> Reading {
        let calibration = &configuration.calibration;
        let input = raw;
        let raw = calibration.clamp(input);
        let normalized = calibration.normalize(raw).min(NORMALIZED_MAX);

        let smoothed = self.filter.tick(f32::from(normalized)).round() as u16;
        let smoothed = smoothed.min(NORMALIZED_MAX);
        let curved = configuration.apply_curve(smoothed);
        let midi = quantize(curved);

        let changed = match self.last_midi {
            Some(last) => last.abs_diff(midi) >= DEADBAND,
            None => true,
        };
        if changed {
            self.last_midi = Some(midi);
        }

        Reading {
            input,
            raw,
            normalized,
            smoothed,
            curved,
            midi,
            changed,
        }
    }

    /// The last value that passed the deadband.
    #[must_use]
    pub fn last_midi(&self) -> Option<u8> {
        self.last_midi
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::Calibration;
    use expr2midi_dsp::curve::Curve;

    #[test]
    fn first_sample_of_half_pressed_pedal() {
        let mut pedal = Pedal::new();
        let reading = pedal.process(2048, &Configuration::default());
        assert_eq!(reading.raw, 2048);
        assert_eq!(reading.normalized, 512);
        assert_eq!(reading.smoothed, 102);
        assert_eq!(reading.curved, 102);
        assert_eq!(reading.midi, 13);
        assert!(reading.changed);
    }

    #[test]
    fn repeated_samples_converge_to_the_position() {
        let mut pedal = Pedal::new();
        let configuration = Configuration::default();
        let mut reading = pedal.process(4095, &configuration);
        for _ in 0..100 {
            reading = pedal.process(4095, &configuration);
        }
        assert_eq!(reading.smoothed, 1023);
        assert_eq!(reading.midi, 127);
    }

    #[test]
    fn unchanged_value_is_not_reported_again() {
        let mut pedal = Pedal::new();
        let configuration = Configuration::default();
        for _ in 0..100 {
            pedal.process(0, &configuration);
        }
        let reading = pedal.process(0, &configuration);
        assert_eq!(reading.midi, 0);
        assert!(!reading.changed);
        assert_eq!(pedal.last_midi(), Some(0));
    }

    #[test]
    fn when_calibration_is_degenerate_output_is_zero() {
        let mut pedal = Pedal::new();
        let configuration = Configuration {
            calibration: Calibration::new(3000, 1000),
            ..Configuration::default()
        };
        for raw in [0, 1000, 2000, 3000, 4095] {
            let reading = pedal.process(raw, &configuration);
            assert_eq!(reading.normalized, 0);
            assert_eq!(reading.midi, 0);
        }
    }

    #[test]
    fn raw_value_is_clamped_to_calibration() {
        let mut pedal = Pedal::new();
        let configuration = Configuration {
            calibration: Calibration::new(500, 3500),
            ..Configuration::default()
        };
        let reading = pedal.process(100, &configuration);
        assert_eq!(reading.input, 100);
        assert_eq!(reading.raw, 500);
        assert_eq!(reading.normalized, 0);
        let reading = pedal.process(4000, &configuration);
        assert_eq!(reading.raw, 3500);
        assert_eq!(reading.normalized, 1023);
    }

    #[test]
    fn inverted_pedal_at_rest_sends_maximum() {
        let mut pedal = Pedal::new();
        let configuration = Configuration {
            inverted: true,
            curve: Curve::Exponential,
            ..Configuration::default()
        };
        let reading = pedal.process(0, &configuration);
        assert_eq!(reading.curved, 1023);
        assert_eq!(reading.midi, 127);
    }
}
