//! Output of the pedal value as MIDI Control Change.

use wmidi::{Channel, ControlFunction, MidiMessage, U7};

/// Transport of MIDI messages, implemented by the hardware binding.
pub trait MidiOut {
    fn send(&mut self, message: MidiMessage<'static>);
}

/// Build a Control Change message.
///
/// The channel is expected in `1..=16`, as shown to the user. Values out
/// of their range are folded into it rather than rejected.
#[must_use]
pub fn control_change(channel: u8, cc: u8, value: u8) -> MidiMessage<'static> {
    let channel = Channel::from_index(channel.wrapping_sub(1) & 0x0F).unwrap_or(Channel::Ch1);
    MidiMessage::ControlChange(
        channel,
        ControlFunction(U7::from_u8_lossy(cc)),
        U7::from_u8_lossy(value),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_is_converted_to_wire_index() {
        let message = control_change(15, 74, 13);
        assert_eq!(
            message,
            MidiMessage::ControlChange(
                Channel::Ch15,
                ControlFunction(U7::from_u8_lossy(74)),
                U7::from_u8_lossy(13)
            )
        );
    }

    #[test]
    fn first_and_last_channel() {
        let MidiMessage::ControlChange(channel, ..) = control_change(1, 0, 0) else {
            panic!("expected control change");
        };
        assert_eq!(channel, Channel::Ch1);
        assert_eq!(channel.index(), 0);

        let MidiMessage::ControlChange(channel, ..) = control_change(16, 0, 0) else {
            panic!("expected control change");
        };
        assert_eq!(channel, Channel::Ch16);
        assert_eq!(channel.index(), 15);
    }

    #[test]
    fn value_keeps_seven_bits() {
        let MidiMessage::ControlChange(_, function, value) = control_change(1, 7, 127) else {
            panic!("expected control change");
        };
        assert_eq!(u8::from(function.0), 7);
        assert_eq!(u8::from(value), 127);
    }
}
