#![doc = r#"
Errors produced while decoding a MIDI file.

Every error carries the byte offset at which decoding stopped. Errors raised
inside a track decoder additionally carry the zero-based track index, and
their offset is relative to the start of that track's payload; errors raised
while loading chunks carry an offset into the whole file.
"#]

use thiserror::Error;

/// An error produced by [`MidiFile::parse`](crate::MidiFile::parse) and friends.
///
/// Decoding is fail-fast: the first error aborts the whole parse and no
/// partial [`MidiFile`](crate::MidiFile) is ever returned.
#[derive(Debug, Error)]
#[error("{}byte {offset}: {kind}", fmt_track(.track))]
pub struct DecodeError {
    offset: usize,
    track: Option<u16>,
    kind: DecodeErrorKind,
}

fn fmt_track(track: &Option<u16>) -> String {
    match track {
        Some(t) => format!("track {t}, "),
        None => String::new(),
    }
}

impl DecodeError {
    /// Create an error from a byte offset and kind.
    pub fn new(offset: usize, kind: impl Into<DecodeErrorKind>) -> Self {
        Self {
            offset,
            track: None,
            kind: kind.into(),
        }
    }

    pub(crate) fn io(err: std::io::Error) -> Self {
        Self::new(0, DecodeErrorKind::Io(err))
    }

    pub(crate) fn with_track(mut self, track: u16) -> Self {
        self.track = Some(track);
        self
    }

    /// The byte offset at which decoding stopped.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// The zero-based index of the track being decoded, if the error
    /// occurred inside a track payload.
    pub const fn track(&self) -> Option<u16> {
        self.track
    }

    /// The kind of failure.
    pub const fn kind(&self) -> &DecodeErrorKind {
        &self.kind
    }

    /// True if decoding ran off the end of the input or a track payload.
    pub const fn is_unexpected_eof(&self) -> bool {
        matches!(self.kind, DecodeErrorKind::UnexpectedEof)
    }
}

/// A kind of decoding failure (see [`DecodeError`]).
#[derive(Debug, Error)]
pub enum DecodeErrorKind {
    /// Structural chunk framing errors
    #[error(transparent)]
    Chunk(#[from] ChunkError),
    /// Track event decoding errors
    #[error(transparent)]
    Event(#[from] EventError),
    /// Bytes remain in a track payload after its End of Track event.
    #[error("data remains after the End of Track event")]
    TrailingData,
    /// A read ran past the end of the available bytes.
    #[error("read out of bounds")]
    UnexpectedEof,
    /// Failure reading the underlying file
    #[error("i/o: {0}")]
    Io(#[from] std::io::Error),
    /// Internal decoder consistency failure. Seeing this is a bug in `mtrk`.
    #[error("decoder invariant violated: {0}")]
    Invariant(&'static str),
}

/// Structural errors in a file's chunk framing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChunkError {
    /// The file does not start with `MThd`.
    #[error("expected `MThd` identifier, found {0:02X?}")]
    InvalidHeaderId([u8; 4]),
    /// A track chunk does not start with `MTrk`.
    #[error("expected `MTrk` identifier, found {0:02X?}")]
    InvalidTrackId([u8; 4]),
    /// The header chunk must declare a length of exactly 6.
    #[error("header chunk length must be 6, found {0}")]
    InvalidHeaderLen(u32),
    /// The header's format field is not 0, 1 or 2.
    #[error("unknown file format {0}")]
    UnknownFormat(u16),
    /// The SMPTE frames-per-second byte of the division field is invalid.
    #[error("invalid SMPTE frames per second {0} in division")]
    InvalidSmpteFps(i8),
    /// The declared chunk lengths do not account for the whole file.
    #[error("{0} byte(s) remain after the last declared track chunk")]
    TrailingBytes(usize),
}

/// Errors while decoding a single track event.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventError {
    /// A variable-length quantity ran past its 4-byte maximum.
    #[error("variable-length quantity exceeds 4 bytes")]
    VlqOverflow,
    /// A fixed-shape meta event declared the wrong payload length.
    #[error("meta type {meta_type:#04X} has payload length {found}, which is invalid")]
    MetaLength {
        /// The meta type byte
        meta_type: u8,
        /// The declared payload length
        found: usize,
    },
    /// A meta type byte outside the known set (strict mode only).
    #[error("unrecognized meta type {0:#04X}")]
    UnrecognizedMeta(u8),
    /// A system exclusive payload with no `0xF7` terminator.
    #[error("system exclusive event is missing its 0xF7 terminator")]
    UnterminatedSysEx,
    /// A channel voice data byte with its high bit set.
    #[error("expected a data byte, found {0:#04X}")]
    InvalidDataByte(u8),
    /// A data byte was encountered before any channel status byte.
    #[error("running status byte without a preceding channel status")]
    MissingRunningStatus,
    /// SMPTE offset field validation errors
    #[error("SMPTE offset: {0}")]
    Smpte(#[from] SmpteError),
}

/// Errors validating the fields of an SMPTE offset meta event.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SmpteError {
    /// The payload is not exactly 5 bytes.
    #[error("payload must be 5 bytes, found {0}")]
    Length(usize),
    /// The frame rate bits are not one of the four defined rates.
    #[error("invalid frame rate type {0}")]
    FrameRate(u8),
    /// Hours above 23
    #[error("hour {0} out of range")]
    Hour(u8),
    /// Minutes above 59
    #[error("minute {0} out of range")]
    Minute(u8),
    /// Seconds above 59
    #[error("second {0} out of range")]
    Second(u8),
    /// Subframes above 99
    #[error("subframe {0} out of range")]
    Subframe(u8),
}

/// The decode result type (see [`DecodeError`])
pub type DecodeResult<T> = Result<T, DecodeError>;
