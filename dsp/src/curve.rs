//! Response curves reshaping the pedal travel.
//!
//! All curves take a linear position in `0..=1023` and return a curved
//! position in the same range. Every curve is non-decreasing and maps the
//! endpoints onto themselves, so the pedal always covers the full range.

use libm::{expf, logf, roundf, tanf};

use crate::NORMALIZED_MAX;

/// Base of the logarithmic curve. Must be above 1.0.
pub const LOG_BASE: f32 = 10.0;

/// Multiplier of the exponent in the exponential curve.
pub const EXP_K: f32 = 3.0;

/// Steepness of the logistic function used by the sigmoidal curve.
pub const SIGMOID_STEEPNESS: f32 = 12.0;

/// Scale of the tangent curve. Must stay below PI, or the curve would
/// cross the asymptote.
pub const TAN_SCALE: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Curve {
    #[default]
    Linear,
    Logarithmic,
    Exponential,
    Sigmoidal,
    Tangent,
}

impl Curve {
    /// All curves, in the order they are offered to the user and in the
    /// order of their persisted identifiers.
    pub const ALL: [Curve; 5] = [
        Curve::Linear,
        Curve::Logarithmic,
        Curve::Exponential,
        Curve::Sigmoidal,
        Curve::Tangent,
    ];

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Curve::Linear => 0,
            Curve::Logarithmic => 1,
            Curve::Exponential => 2,
            Curve::Sigmoidal => 3,
            Curve::Tangent => 4,
        }
    }

    /// Recover a curve from its persisted identifier.
    #[must_use]
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    #[must_use]
    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Curve::Linear => "Linear",
            Curve::Logarithmic => "Logarithmic",
            Curve::Exponential => "Exponential",
            Curve::Sigmoidal => "Sigmoidal",
            Curve::Tangent => "Tangent",
        }
    }

    /// Shape a linear position in `0..=1023` into the curved position.
    #[must_use]
    pub fn map(self, linear: u16) -> u16 {
        map_curve(self, linear)
    }
}

/// Shape a linear position in `0..=1023` with the given curve.
///
/// Inputs above 1023 are treated as 1023.
#[must_use]
pub fn map_curve(curve: Curve, linear: u16) -> u16 {
    let x = f32::from(linear.min(NORMALIZED_MAX)) / f32::from(NORMALIZED_MAX);

    let y = match curve {
        Curve::Linear => x,
        Curve::Logarithmic => logarithmic(x),
        Curve::Exponential => exponential(x),
        Curve::Sigmoidal => sigmoidal(x),
        Curve::Tangent => tangent(x),
    };

    let y = if y.is_nan() { x } else { y.clamp(0.0, 1.0) };
    roundf(y * f32::from(NORMALIZED_MAX)) as u16
}

/// Shape a linear position and optionally reflect the result.
#[must_use]
pub fn apply_curve(curve: Curve, inverted: bool, linear: u16) -> u16 {
    let curved = map_curve(curve, linear);
    if inverted {
        NORMALIZED_MAX - curved
    } else {
        curved
    }
}

fn logarithmic(x: f32) -> f32 {
    let denominator = logf(LOG_BASE);
    if denominator == 0.0 {
        return x;
    }
    logf(1.0 + (LOG_BASE - 1.0) * x) / denominator
}

fn exponential(x: f32) -> f32 {
    let denominator = expf(EXP_K) - 1.0;
    if denominator == 0.0 {
        return x;
    }
    (expf(EXP_K * x) - 1.0) / denominator
}

// The bare logistic function never reaches 0.0 or 1.0, it gets rescaled so
// both endpoints are hit exactly.
fn sigmoidal(x: f32) -> f32 {
    let logistic = |x: f32| 1.0 / (1.0 + expf(-SIGMOID_STEEPNESS * (x - 0.5)));
    let bottom = logistic(0.0);
    let top = logistic(1.0);
    let denominator = top - bottom;
    if denominator == 0.0 {
        return x;
    }
    (logistic(x) - bottom) / denominator
}

fn tangent(x: f32) -> f32 {
    let bottom = tanf(-TAN_SCALE / 2.0);
    let top = tanf(TAN_SCALE / 2.0);
    let denominator = top - bottom;
    if denominator == 0.0 {
        return x;
    }
    (tanf(TAN_SCALE * (x - 0.5)) - bottom) / denominator
}
