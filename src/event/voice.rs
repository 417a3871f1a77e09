use num_enum::TryFromPrimitive;

use crate::error::{DecodeError, DecodeErrorKind, DecodeResult, EventError};
use crate::reader::Reader;

/// The status nibble of each channel voice message.
///
/// The low nibble of a status byte carries the channel, so dispatch happens
/// on `status & 0xF0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u8)]
pub(crate) enum VoiceStatus {
    NoteOff = 0x80,
    NoteOn = 0x90,
    PolyAftertouch = 0xA0,
    ControlChange = 0xB0,
    ProgramChange = 0xC0,
    ChannelAftertouch = 0xD0,
    PitchBend = 0xE0,
}

#[doc = r#"
A channel voice message: a channel in `0..=15` plus a [`VoiceEvent`].

The original status byte is not stored; [`ChannelVoiceEvent::status`]
reconstructs it, so an event decoded through running status compares equal
to one decoded from an explicit status byte.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelVoiceEvent {
    channel: u8,
    event: VoiceEvent,
}

impl ChannelVoiceEvent {
    /// The channel this message addresses (`0..=15`, the status low nibble).
    pub const fn channel(&self) -> u8 {
        self.channel
    }

    /// The message payload.
    pub const fn event(&self) -> &VoiceEvent {
        &self.event
    }

    /// The status byte: message nibble in the high four bits, channel in
    /// the low four.
    pub const fn status(&self) -> u8 {
        self.event.status_nibble() | self.channel
    }

    /// Decode the data bytes for `status`. The cursor sits on the first
    /// data byte, both after an explicit status byte and when the status
    /// is supplied by running status.
    pub(crate) fn read(status: u8, reader: &mut Reader) -> DecodeResult<Self> {
        let kind = VoiceStatus::try_from(status & 0xF0).map_err(|_| {
            DecodeError::new(
                reader.position(),
                DecodeErrorKind::Invariant("voice dispatch on a non-channel status"),
            )
        })?;

        let event = match kind {
            VoiceStatus::NoteOff => VoiceEvent::NoteOff {
                key: data_byte(reader)?,
                velocity: data_byte(reader)?,
            },
            VoiceStatus::NoteOn => VoiceEvent::NoteOn {
                key: data_byte(reader)?,
                velocity: data_byte(reader)?,
            },
            VoiceStatus::PolyAftertouch => VoiceEvent::PolyAftertouch {
                key: data_byte(reader)?,
                value: data_byte(reader)?,
            },
            VoiceStatus::ControlChange => VoiceEvent::ControlChange {
                controller: data_byte(reader)?,
                value: data_byte(reader)?,
            },
            VoiceStatus::ProgramChange => VoiceEvent::ProgramChange {
                program: data_byte(reader)?,
            },
            VoiceStatus::ChannelAftertouch => VoiceEvent::ChannelAftertouch {
                value: data_byte(reader)?,
            },
            VoiceStatus::PitchBend => {
                let lsb = data_byte(reader)?;
                let msb = data_byte(reader)?;
                VoiceEvent::PitchBend {
                    bend: u16::from(msb) << 7 | u16::from(lsb),
                }
            }
        };

        Ok(Self {
            channel: status & 0x0F,
            event,
        })
    }
}

/// The set of channel voice messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VoiceEvent {
    /// Release a key
    NoteOff {
        /// Key number (`0..=127`, middle C is 60)
        key: u8,
        /// Release velocity
        velocity: u8,
    },
    /// Press a key. A velocity of zero is conventionally a note off.
    NoteOn {
        /// Key number
        key: u8,
        /// Strike velocity
        velocity: u8,
    },
    /// Per-key pressure while a key is held
    PolyAftertouch {
        /// Key number
        key: u8,
        /// Pressure amount
        value: u8,
    },
    /// A controller value changed
    ControlChange {
        /// Controller number
        controller: u8,
        /// New controller value
        value: u8,
    },
    /// Select a program (patch) on the channel
    ProgramChange {
        /// Program number
        program: u8,
    },
    /// Channel-wide pressure
    ChannelAftertouch {
        /// Pressure amount
        value: u8,
    },
    /// Bend the channel's pitch
    PitchBend {
        /// 14-bit bend amount, `0x2000` is center. On the wire the low
        /// seven bits arrive first.
        bend: u16,
    },
}

impl VoiceEvent {
    /// The high nibble of the status byte for this message kind.
    pub const fn status_nibble(&self) -> u8 {
        match self {
            Self::NoteOff { .. } => 0x80,
            Self::NoteOn { .. } => 0x90,
            Self::PolyAftertouch { .. } => 0xA0,
            Self::ControlChange { .. } => 0xB0,
            Self::ProgramChange { .. } => 0xC0,
            Self::ChannelAftertouch { .. } => 0xD0,
            Self::PitchBend { .. } => 0xE0,
        }
    }
}

/// Data bytes must have the high bit clear. A set bit means the stream has
/// desynchronized and a status byte is being consumed as data.
fn data_byte(reader: &mut Reader) -> DecodeResult<u8> {
    let offset = reader.position();
    let byte = reader.read_u8()?;
    if byte & 0x80 != 0 {
        return Err(DecodeError::new(offset, EventError::InvalidDataByte(byte)));
    }
    Ok(byte)
}

#[test]
fn reconstructs_the_status_byte() {
    use pretty_assertions::assert_eq;
    let mut reader = Reader::new(&[0x40, 0x7F]);
    let event = ChannelVoiceEvent::read(0x93, &mut reader).unwrap();
    assert_eq!(event.status(), 0x93);
    assert_eq!(event.channel(), 3);
    assert_eq!(
        *event.event(),
        VoiceEvent::NoteOn {
            key: 0x40,
            velocity: 0x7F
        }
    );
}

#[test]
fn pitch_bend_combines_seven_bit_halves() {
    use pretty_assertions::assert_eq;
    // lsb then msb: center is 00 40
    let mut reader = Reader::new(&[0x00, 0x40]);
    let event = ChannelVoiceEvent::read(0xE0, &mut reader).unwrap();
    assert_eq!(*event.event(), VoiceEvent::PitchBend { bend: 0x2000 });
}

#[test]
fn status_byte_in_data_position_is_rejected() {
    let mut reader = Reader::new(&[0x40, 0x90]);
    let err = ChannelVoiceEvent::read(0x80, &mut reader).unwrap_err();
    assert_eq!(err.offset(), 1);
    assert!(matches!(
        err.kind(),
        DecodeErrorKind::Event(EventError::InvalidDataByte(0x90))
    ));
}
