//! Process all inputs peripherals over time.

use super::button::Button;
use super::snapshot::Snapshot;
use crate::menu::Event;
use crate::Instant;

/// Stateful store of raw inputs.
///
/// This struct turns the raw snapshot into a set of abstracted peripherals
/// and those into menu events.
///
/// Note that despite all its attributes are public, they should be only read
/// from.
#[derive(Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Store {
    pub encoder_button: Button,
    pub aux_button: Button,
}

impl Store {
    /// Feed the snapshot and collect the events it produced.
    ///
    /// Every encoder tick becomes one rotation event. Rotations come first,
    /// followed by a confirmation and a cancellation, if any of the buttons
    /// got clicked.
    pub fn update(&mut self, snapshot: Snapshot, now: Instant) -> Events {
        self.encoder_button.update(snapshot.encoder_button, now);
        self.aux_button.update(snapshot.aux_button, now);

        Events {
            rotation: snapshot.encoder,
            confirm: self.encoder_button.clicked,
            cancel: self.aux_button.clicked,
        }
    }
}

/// Iterator over events detected in a single snapshot.
#[derive(Debug, Clone)]
pub struct Events {
    rotation: i32,
    confirm: bool,
    cancel: bool,
}

impl Iterator for Events {
    type Item = Event;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rotation > 0 {
            self.rotation -= 1;
            Some(Event::RotateCW)
        } else if self.rotation < 0 {
            self.rotation += 1;
            Some(Event::RotateCCW)
        } else if self.confirm {
            self.confirm = false;
            Some(Event::Confirm)
        } else if self.cancel {
            self.cancel = false;
            Some(Event::Cancel)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(millis: u64) -> Instant {
        Instant::from_ticks(millis)
    }

    #[test]
    fn each_encoder_tick_becomes_one_event() {
        let mut store = Store::default();
        let events: Vec<_> = store
            .update(
                Snapshot {
                    encoder: 3,
                    ..Snapshot::default()
                },
                at(0),
            )
            .collect();
        assert_eq!(events, [Event::RotateCW; 3]);

        let events: Vec<_> = store
            .update(
                Snapshot {
                    encoder: -2,
                    ..Snapshot::default()
                },
                at(1),
            )
            .collect();
        assert_eq!(events, [Event::RotateCCW; 2]);
    }

    #[test]
    fn buttons_emit_events_after_debounce() {
        let mut store = Store::default();
        let snapshot = Snapshot {
            encoder_button: true,
            aux_button: true,
            ..Snapshot::default()
        };
        assert_eq!(store.update(snapshot, at(0)).count(), 0);
        let events: Vec<_> = store.update(snapshot, at(50)).collect();
        assert_eq!(events, [Event::Confirm, Event::Cancel]);
        assert_eq!(store.update(snapshot, at(100)).count(), 0);
    }

    #[test]
    fn rotation_goes_before_buttons() {
        let mut store = Store::default();
        let snapshot = Snapshot {
            encoder_button: true,
            ..Snapshot::default()
        };
        store.update(snapshot, at(0));
        let events: Vec<_> = store
            .update(
                Snapshot {
                    encoder: 1,
                    ..snapshot
                },
                at(50),
            )
            .collect();
        assert_eq!(events, [Event::RotateCW, Event::Confirm]);
    }
}
