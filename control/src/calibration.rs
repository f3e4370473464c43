//! Calculate and store calibration of the pedal travel.

use expr2midi_dsp::NORMALIZED_MAX;

/// The highest reading of the 12-bit pedal ADC.
pub const ADC_MAX: u16 = 4095;

/// Raw ADC readings of the pedal's physical extremes.
///
/// The endpoints are not required to be ordered. When the maximum is not
/// above the minimum, the pedal is considered uncalibrated and it reads as
/// zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    pub min: u16,
    pub max: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Endpoint {
    Min,
    Max,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            min: 0,
            max: ADC_MAX,
        }
    }
}

impl Calibration {
    /// Endpoints above the ADC range are limited to it.
    #[must_use]
    pub fn new(min: u16, max: u16) -> Self {
        Self {
            min: min.min(ADC_MAX),
            max: max.min(ADC_MAX),
        }
    }

    #[must_use]
    pub fn is_calibrated(&self) -> bool {
        self.max > self.min
    }

    #[must_use]
    pub fn with_endpoint(self, endpoint: Endpoint, raw: u16) -> Self {
        match endpoint {
            Endpoint::Min => Self::new(raw, self.max),
            Endpoint::Max => Self::new(self.min, raw),
        }
    }

    /// Pull the reading into the calibrated range.
    ///
    /// The bounds are checked one after another, so this stays defined
    /// even when the endpoints are swapped.
    #[must_use]
    pub fn clamp(&self, raw: u16) -> u16 {
        if raw < self.min {
            self.min
        } else if raw > self.max {
            self.max
        } else {
            raw
        }
    }

    /// Rescale the reading from the calibrated range to `0..=1023`.
    #[must_use]
    pub fn normalize(&self, raw: u16) -> u16 {
        if !self.is_calibrated() {
            return 0;
        }

        let clamped = self.clamp(raw);
        let span = u32::from(self.max - self.min);
        let offset = u32::from(clamped - self.min);
        let normalized = (offset * u32::from(NORMALIZED_MAX) + span / 2) / span;
        normalized.min(u32::from(NORMALIZED_MAX)) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_calibration_covers_whole_adc_range() {
        let calibration = Calibration::default();
        assert!(calibration.is_calibrated());
        assert_eq!(calibration.normalize(0), 0);
        assert_eq!(calibration.normalize(2048), 512);
        assert_eq!(calibration.normalize(4095), 1023);
    }

    #[test]
    fn when_reading_is_outside_the_range_it_gets_clamped() {
        let calibration = Calibration::new(1000, 3000);
        assert_eq!(calibration.clamp(10), 1000);
        assert_eq!(calibration.clamp(4000), 3000);
        assert_eq!(calibration.clamp(2000), 2000);
        assert_eq!(calibration.normalize(10), 0);
        assert_eq!(calibration.normalize(4000), 1023);
        assert_eq!(calibration.normalize(2000), 512);
    }

    #[test]
    fn when_endpoints_are_equal_it_reads_zero() {
        let calibration = Calibration::new(2000, 2000);
        assert!(!calibration.is_calibrated());
        for raw in [0, 1999, 2000, 2001, 4095] {
            assert_eq!(calibration.normalize(raw), 0);
        }
    }

    #[test]
    fn when_endpoints_are_swapped_it_reads_zero_without_panicking() {
        let calibration = Calibration::new(3000, 1000);
        assert!(!calibration.is_calibrated());
        for raw in [0, 500, 1000, 2000, 3000, 4095] {
            assert_eq!(calibration.normalize(raw), 0);
        }
        assert_eq!(calibration.clamp(500), 3000);
        assert_eq!(calibration.clamp(3500), 1000);
    }

    #[test]
    fn endpoints_above_adc_range_are_limited() {
        let calibration = Calibration::new(5000, 9000);
        assert_eq!(calibration.min, ADC_MAX);
        assert_eq!(calibration.max, ADC_MAX);
    }

    #[test]
    fn setting_an_endpoint_keeps_the_other_one() {
        let calibration = Calibration::default()
            .with_endpoint(Endpoint::Min, 120)
            .with_endpoint(Endpoint::Max, 3900);
        assert_eq!(calibration, Calibration::new(120, 3900));
    }
}
