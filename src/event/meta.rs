use num_enum::TryFromPrimitive;

use crate::error::EventError;
use crate::event::SmpteOffset;
use crate::options::UnknownMetaBehavior;

/// The meta type bytes this crate recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u8)]
pub(crate) enum MetaType {
    SequenceNumber = 0x00,
    Text = 0x01,
    CopyrightNotice = 0x02,
    TrackName = 0x03,
    InstrumentName = 0x04,
    Lyric = 0x05,
    Marker = 0x06,
    CuePoint = 0x07,
    ChannelPrefix = 0x20,
    MidiPort = 0x21,
    EndOfTrack = 0x2F,
    SetTempo = 0x51,
    SmpteOffset = 0x54,
    TimeSignature = 0x58,
    KeySignature = 0x59,
    SequencerSpecific = 0x7F,
}

#[doc = r#"
A `0xFF`-prefixed track event carrying non-sound metadata.

Fixed-shape kinds are validated against their required payload length at
decode time; the text family and [`MetaEvent::SequencerSpecific`] keep
their payload verbatim, with no character set assumed.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MetaEvent {
    /// Sequence identifier, at most one per track, before any nonzero
    /// delta time. `None` when the file omits the number and the track's
    /// position in the file stands in for it.
    SequenceNumber(Option<u16>),
    /// Free text
    Text(Vec<u8>),
    /// Copyright notice, conventionally in the first track
    CopyrightNotice(Vec<u8>),
    /// Sequence or track name
    TrackName(Vec<u8>),
    /// Instrumentation description
    InstrumentName(Vec<u8>),
    /// A syllable of lyrics, timed to its note
    Lyric(Vec<u8>),
    /// Rehearsal or section marker
    Marker(Vec<u8>),
    /// A cue to something happening outside the music
    CuePoint(Vec<u8>),
    /// The channel to associate with following meta and sysex events
    ChannelPrefix(u8),
    /// The port this track plays on
    MidiPort(u8),
    /// Terminates a track. Appears exactly once, as the last event.
    EndOfTrack,
    /// Tempo in microseconds per quarter note (24-bit big-endian on
    /// the wire)
    SetTempo(u32),
    /// Absolute timecode at which the track begins
    SmpteOffset(SmpteOffset),
    /// Time signature and MIDI clock configuration
    TimeSignature {
        /// Numerator of the signature
        numerator: u8,
        /// Denominator as a power of two: 3 means an eighth-note beat
        denominator: u8,
        /// MIDI clocks per metronome click
        clocks_per_click: u8,
        /// Notated 32nd notes per MIDI quarter note (24 clocks)
        thirty_seconds_per_quarter: u8,
    },
    /// Key signature
    KeySignature {
        /// Sharps when positive, flats when negative
        accidentals: i8,
        /// Minor key when true
        minor: bool,
    },
    /// Sequencer-specific payload, opaque to this crate
    SequencerSpecific(Vec<u8>),
    /// A meta type outside the known set, kept only when
    /// [`UnknownMetaBehavior::Keep`] is configured.
    Unknown {
        /// The unrecognized type byte
        meta_type: u8,
        /// The raw payload
        data: Vec<u8>,
    },
}

impl MetaEvent {
    /// Build a typed meta event from a type byte and its raw payload,
    /// validating fixed-shape payload lengths.
    pub(crate) fn from_payload(
        meta_type: u8,
        data: Vec<u8>,
        unknown: UnknownMetaBehavior,
    ) -> Result<Self, EventError> {
        let Ok(ty) = MetaType::try_from(meta_type) else {
            return match unknown {
                UnknownMetaBehavior::Reject => Err(EventError::UnrecognizedMeta(meta_type)),
                UnknownMetaBehavior::Keep => Ok(Self::Unknown { meta_type, data }),
            };
        };

        let bad_len = || EventError::MetaLength {
            meta_type,
            found: data.len(),
        };

        let event = match ty {
            MetaType::SequenceNumber => match data.as_slice() {
                &[] => Self::SequenceNumber(None),
                &[msb, lsb] => Self::SequenceNumber(Some(u16::from_be_bytes([msb, lsb]))),
                _ => return Err(bad_len()),
            },
            MetaType::Text => Self::Text(data),
            MetaType::CopyrightNotice => Self::CopyrightNotice(data),
            MetaType::TrackName => Self::TrackName(data),
            MetaType::InstrumentName => Self::InstrumentName(data),
            MetaType::Lyric => Self::Lyric(data),
            MetaType::Marker => Self::Marker(data),
            MetaType::CuePoint => Self::CuePoint(data),
            MetaType::ChannelPrefix => match data.as_slice() {
                &[channel] => Self::ChannelPrefix(channel),
                _ => return Err(bad_len()),
            },
            MetaType::MidiPort => match data.as_slice() {
                &[port] => Self::MidiPort(port),
                _ => return Err(bad_len()),
            },
            MetaType::EndOfTrack => {
                if !data.is_empty() {
                    return Err(bad_len());
                }
                Self::EndOfTrack
            }
            MetaType::SetTempo => match data.as_slice() {
                &[a, b, c] => {
                    Self::SetTempo(u32::from(a) << 16 | u32::from(b) << 8 | u32::from(c))
                }
                _ => return Err(bad_len()),
            },
            MetaType::SmpteOffset => Self::SmpteOffset(SmpteOffset::parse(&data)?),
            MetaType::TimeSignature => match data.as_slice() {
                &[numerator, denominator, clocks_per_click, thirty_seconds_per_quarter] => {
                    Self::TimeSignature {
                        numerator,
                        denominator,
                        clocks_per_click,
                        thirty_seconds_per_quarter,
                    }
                }
                _ => return Err(bad_len()),
            },
            MetaType::KeySignature => match data.as_slice() {
                &[accidentals, mode] => Self::KeySignature {
                    accidentals: accidentals as i8,
                    minor: mode != 0,
                },
                _ => return Err(bad_len()),
            },
            MetaType::SequencerSpecific => Self::SequencerSpecific(data),
        };
        Ok(event)
    }

    /// The type byte this event was decoded from.
    pub const fn meta_type(&self) -> u8 {
        match self {
            Self::SequenceNumber(_) => 0x00,
            Self::Text(_) => 0x01,
            Self::CopyrightNotice(_) => 0x02,
            Self::TrackName(_) => 0x03,
            Self::InstrumentName(_) => 0x04,
            Self::Lyric(_) => 0x05,
            Self::Marker(_) => 0x06,
            Self::CuePoint(_) => 0x07,
            Self::ChannelPrefix(_) => 0x20,
            Self::MidiPort(_) => 0x21,
            Self::EndOfTrack => 0x2F,
            Self::SetTempo(_) => 0x51,
            Self::SmpteOffset(_) => 0x54,
            Self::TimeSignature { .. } => 0x58,
            Self::KeySignature { .. } => 0x59,
            Self::SequencerSpecific(_) => 0x7F,
            Self::Unknown { meta_type, .. } => *meta_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strict(meta_type: u8, data: &[u8]) -> Result<MetaEvent, EventError> {
        MetaEvent::from_payload(meta_type, data.to_vec(), UnknownMetaBehavior::Reject)
    }

    #[test]
    fn fixed_shape_payloads() {
        assert_eq!(strict(0x00, &[]), Ok(MetaEvent::SequenceNumber(None)));
        assert_eq!(
            strict(0x00, &[0x01, 0x02]),
            Ok(MetaEvent::SequenceNumber(Some(0x0102)))
        );
        assert_eq!(strict(0x20, &[0x05]), Ok(MetaEvent::ChannelPrefix(5)));
        assert_eq!(strict(0x21, &[0x02]), Ok(MetaEvent::MidiPort(2)));
        assert_eq!(strict(0x2F, &[]), Ok(MetaEvent::EndOfTrack));
        assert_eq!(
            strict(0x51, &[0x07, 0xA1, 0x20]),
            Ok(MetaEvent::SetTempo(500_000))
        );
        assert_eq!(
            strict(0x58, &[0x06, 0x03, 0x24, 0x08]),
            Ok(MetaEvent::TimeSignature {
                numerator: 6,
                denominator: 3,
                clocks_per_click: 36,
                thirty_seconds_per_quarter: 8,
            })
        );
        assert_eq!(
            strict(0x59, &[0xFD, 0x01]),
            Ok(MetaEvent::KeySignature {
                accidentals: -3,
                minor: true,
            })
        );
    }

    #[test]
    fn text_family_keeps_payload_verbatim() {
        assert_eq!(
            strict(0x01, b"piano"),
            Ok(MetaEvent::Text(b"piano".to_vec()))
        );
        // not UTF-8, still kept as-is
        assert_eq!(
            strict(0x03, &[0xFF, 0xFE, 0x00]),
            Ok(MetaEvent::TrackName(vec![0xFF, 0xFE, 0x00]))
        );
        assert_eq!(
            strict(0x7F, &[0x00, 0x41, 0x09]),
            Ok(MetaEvent::SequencerSpecific(vec![0x00, 0x41, 0x09]))
        );
    }

    #[test]
    fn wrong_fixed_length_is_rejected() {
        for (meta_type, data) in [
            (0x00u8, &[0x01u8][..]),
            (0x20, &[][..]),
            (0x21, &[0x01, 0x02]),
            (0x2F, &[0x00]),
            (0x51, &[0x07, 0xA1]),
            (0x58, &[0x04, 0x02, 0x18]),
            (0x59, &[0x00]),
        ] {
            assert_eq!(
                strict(meta_type, data),
                Err(EventError::MetaLength {
                    meta_type,
                    found: data.len()
                })
            );
        }
    }

    #[test]
    fn unknown_type_respects_behavior() {
        assert_eq!(strict(0x60, &[0x01]), Err(EventError::UnrecognizedMeta(0x60)));
        assert_eq!(
            MetaEvent::from_payload(0x60, vec![0x01], UnknownMetaBehavior::Keep),
            Ok(MetaEvent::Unknown {
                meta_type: 0x60,
                data: vec![0x01]
            })
        );
    }

    #[test]
    fn meta_type_round_trips() {
        let event = strict(0x51, &[0x07, 0xA1, 0x20]).unwrap();
        assert_eq!(event.meta_type(), 0x51);
        let unknown =
            MetaEvent::from_payload(0x4A, Vec::new(), UnknownMetaBehavior::Keep).unwrap();
        assert_eq!(unknown.meta_type(), 0x4A);
    }
}
