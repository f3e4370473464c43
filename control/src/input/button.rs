//! Manage button's state.

use crate::{Duration, Instant};

/// How long must a button stay in the new level before it is accepted.
pub const DEBOUNCE: Duration = Duration::millis(50);

/// Use this to hold buttons state over time.
///
/// Filters out contact bounce and detects clicking.
#[derive(Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Button {
    pub pressed: bool,
    pub clicked: bool,
    level: bool,
    level_since: Option<Instant>,
}

impl Button {
    pub fn update(&mut self, down: bool, now: Instant) {
        self.clicked = false;

        if down != self.level || self.level_since.is_none() {
            self.level = down;
            self.level_since = Some(now);
        }

        if self.level == self.pressed {
            return;
        }

        let stable = self
            .level_since
            .and_then(|since| now.checked_duration_since(since))
            .map_or(false, |duration| duration >= DEBOUNCE);
        if stable {
            self.pressed = self.level;
            self.clicked = self.pressed;
        }
    }
}
