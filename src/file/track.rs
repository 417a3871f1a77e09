#![doc = r#"
The per-track event decoder.

A track payload is a self-describing byte stream: every event starts with a
variable-length delta time, and the byte after it decides the event
category. Channel voice events may omit their status byte entirely
("running status"), reusing the most recent explicit one, so the decoder
carries that status as state. The state lives for one invocation and one
track only; it never leaks across tracks.
"#]

use crate::error::{DecodeError, DecodeErrorKind, DecodeResult, EventError};
use crate::event::{ChannelVoiceEvent, MetaEvent, SysExEvent, TrackEvent, TrackEventKind};
use crate::file::chunk::RawTrackChunk;
use crate::options::DecodeOptions;
use crate::reader::Reader;
use crate::vlq::read_vlq;

/// One decoded track: the chunk's declared payload length and its events
/// in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MidiTrack {
    declared_len: u32,
    events: Vec<TrackEvent>,
}

impl MidiTrack {
    /// The payload length in bytes declared after the `MTrk` identifier.
    pub const fn declared_len(&self) -> u32 {
        self.declared_len
    }

    /// Every event of the track, in file order. Never empty; the last
    /// event is always [`MetaEvent::EndOfTrack`].
    pub fn events(&self) -> &[TrackEvent] {
        &self.events
    }
}

/// Decode one track's payload. Byte offsets in errors are relative to the
/// start of the payload; the caller adds the track index.
pub(crate) fn decode_track(
    chunk: &RawTrackChunk,
    options: &DecodeOptions,
) -> DecodeResult<MidiTrack> {
    let decoder = TrackDecoder {
        reader: Reader::new(&chunk.data),
        running_status: None,
        options: *options,
    };
    Ok(MidiTrack {
        declared_len: chunk.declared_len,
        events: decoder.run()?,
    })
}

/// Data-byte counts for System Common and Real-Time statuses, indexed by
/// the status low nibble. Only `0xF1..=0xF6` and `0xF8..=0xFE` are looked
/// up here; `0xF0`/`0xF7` are sysex and `0xFF` is meta.
const SYSTEM_DATA_LEN: [u8; 16] = [0, 0, 2, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];

struct TrackDecoder<'a> {
    reader: Reader<'a>,
    /// The status of the last explicit channel voice event. Only statuses
    /// in `0x80..=0xEF` are ever stored.
    running_status: Option<u8>,
    options: DecodeOptions,
}

impl TrackDecoder<'_> {
    fn run(mut self) -> DecodeResult<Vec<TrackEvent>> {
        let mut events = Vec::new();

        loop {
            let delta_time = read_vlq(&mut self.reader)?;
            let Some(kind) = self.read_event()? else {
                // dropped System Common/Real-Time event
                continue;
            };
            let end = matches!(kind, TrackEventKind::Meta(MetaEvent::EndOfTrack));
            events.push(TrackEvent::new(delta_time, kind));
            if end {
                break;
            }
        }

        if !self.reader.is_empty() {
            return Err(DecodeError::new(
                self.reader.position(),
                DecodeErrorKind::TrailingData,
            ));
        }

        Ok(events)
    }

    /// Decode the event following a delta time. Returns `None` for System
    /// Common/Real-Time statuses, which are consumed but not retained.
    fn read_event(&mut self) -> DecodeResult<Option<TrackEventKind>> {
        let offset = self.reader.position();
        let byte = self.reader.peek_u8()?;

        let kind = match byte {
            0xFF => {
                self.reader.read_u8()?;
                Some(self.read_meta()?.into())
            }
            0xF0 | 0xF7 => {
                self.reader.read_u8()?;
                Some(SysExEvent::read(&mut self.reader)?.into())
            }
            0x80..=0xEF => {
                let status = self.reader.read_u8()?;
                self.running_status = Some(status);
                Some(ChannelVoiceEvent::read(status, &mut self.reader)?.into())
            }
            0xF1..=0xF6 | 0xF8..=0xFE => {
                let status = self.reader.read_u8()?;
                let len = SYSTEM_DATA_LEN[usize::from(status & 0x0F)];
                self.reader.read_bytes(usize::from(len))?;
                None
            }
            0x00..=0x7F => {
                // no status byte: the peeked byte is already the first
                // data byte of a running-status channel voice event
                let Some(status) = self.running_status else {
                    return Err(DecodeError::new(offset, EventError::MissingRunningStatus));
                };
                Some(ChannelVoiceEvent::read(status, &mut self.reader)?.into())
            }
        };

        Ok(kind)
    }

    fn read_meta(&mut self) -> DecodeResult<MetaEvent> {
        let type_offset = self.reader.position();
        let meta_type = self.reader.read_u8()?;
        let len = read_vlq(&mut self.reader)?;
        let data = self.reader.read_bytes(len as usize)?.to_vec();

        MetaEvent::from_payload(meta_type, data, self.options.unknown_meta)
            .map_err(|e| DecodeError::new(type_offset, e))
    }
}
