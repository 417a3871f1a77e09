#![doc = r#"
The file-level decoder: chunk loading, per-track fan-out and the
[`MidiFile`] result.

Chunk loading is strictly sequential and materializes every track payload
as an owned buffer before decoding begins. The payloads are independent,
so tracks decode in parallel; results are stitched back together in file
order. A failure in any track fails the whole parse.
"#]

pub(crate) mod chunk;

mod header;
pub use header::*;

mod track;
pub use track::*;

use std::path::Path;

use log::debug;
use rayon::prelude::*;

use crate::error::{DecodeError, DecodeErrorKind, DecodeResult};
use crate::file::chunk::RawTrackChunk;
use crate::options::DecodeOptions;
use crate::reader::Reader;

#[doc = r#"
A fully decoded Standard MIDI File.

Created only by a successful [`parse`](MidiFile::parse); immutable
afterwards. On success `tracks().len()` always equals the header's
declared track count, and every track ends with exactly one
End of Track meta event.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MidiFile {
    header: FileHeader,
    tracks: Vec<MidiTrack>,
}

impl MidiFile {
    /// Parse a complete MIDI file from memory with default (strict)
    /// options.
    pub fn parse(bytes: impl AsRef<[u8]>) -> DecodeResult<Self> {
        Self::parse_with(bytes, DecodeOptions::default())
    }

    /// Parse a complete MIDI file from memory.
    pub fn parse_with(bytes: impl AsRef<[u8]>, options: DecodeOptions) -> DecodeResult<Self> {
        let mut reader = Reader::new(bytes.as_ref());
        let (header, chunks) = chunk::load_chunks(&mut reader)?;

        debug!(
            "header: format {:?}, {} track(s), division {:#06X}",
            header.format(),
            header.num_tracks(),
            header.division().raw()
        );

        let tracks = decode_tracks(&chunks, &options)?;
        Ok(Self { header, tracks })
    }

    /// Read `path` into memory and [`parse`](MidiFile::parse) it.
    pub fn open(path: impl AsRef<Path>) -> DecodeResult<Self> {
        let bytes = std::fs::read(path).map_err(DecodeError::io)?;
        Self::parse(bytes)
    }

    /// The parsed header chunk.
    pub const fn header(&self) -> &FileHeader {
        &self.header
    }

    /// The declared file format.
    pub const fn format(&self) -> Format {
        self.header.format()
    }

    /// The number of tracks, equal to the header's declared count.
    pub const fn num_tracks(&self) -> u16 {
        self.header.num_tracks()
    }

    /// The division field mapping ticks to time.
    pub const fn division(&self) -> Division {
        self.header.division()
    }

    /// The decoded tracks, in file order.
    pub fn tracks(&self) -> &[MidiTrack] {
        &self.tracks
    }
}

/// Fan out one track decoder per payload, fan results back in file order.
/// Every payload is decoded on the thread pool; afterwards the first
/// failure in track order, if any, aborts the parse and the sibling
/// results are discarded.
fn decode_tracks(
    chunks: &[RawTrackChunk],
    options: &DecodeOptions,
) -> DecodeResult<Vec<MidiTrack>> {
    debug!("decoding {} track(s)", chunks.len());

    let results: Vec<DecodeResult<MidiTrack>> = chunks
        .par_iter()
        .enumerate()
        .map(|(index, chunk)| {
            decode_track(chunk, options).map_err(|e| e.with_track(index as u16))
        })
        .collect();

    if results.len() != chunks.len() {
        return Err(DecodeError::new(
            0,
            DecodeErrorKind::Invariant("track fan-in lost a result"),
        ));
    }

    results.into_iter().collect()
}
