use num_enum::TryFromPrimitive;

use crate::error::{ChunkError, DecodeError, DecodeResult};
use crate::event::SmpteFps;
use crate::reader::Reader;

/// The file format declared in the header chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u16)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Format {
    /// Format 0: one track carrying every channel
    SingleMultiChannel = 0,
    /// Format 1: simultaneous tracks of one song
    Simultaneous = 1,
    /// Format 2: independent single-track patterns
    SequentiallyIndependent = 2,
}

#[doc = r#"
The header chunk's division field: how delta-time ticks map to time.

The raw big-endian `u16` is kept as read. When its high bit is clear the
value is a tick rate per quarter note; when set, the high byte is a negated
SMPTE frame rate and the low byte a tick rate per frame.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Division {
    inner: [u8; 2],
}

/// A decoded view of a [`Division`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DivisionKind {
    /// Tempo-relative time: ticks per quarter note
    TicksPerQuarterNote(u16),
    /// Absolute time: SMPTE frames per second and ticks per frame
    Smpte {
        /// Frame rate
        fps: SmpteFps,
        /// Ticks within one frame
        ticks_per_frame: u8,
    },
}

impl Division {
    pub(crate) const fn from_bytes(bytes: [u8; 2]) -> Result<Self, ChunkError> {
        if bytes[0] >> 7 == 1 {
            // Bits 14..8 must hold one of -24, -25, -29, -30
            let fps = bytes[0] as i8;
            if !matches!(fps, -24 | -25 | -29 | -30) {
                return Err(ChunkError::InvalidSmpteFps(fps));
            }
        }
        Ok(Self { inner: bytes })
    }

    /// The division field exactly as stored in the header, big-endian.
    pub const fn raw(&self) -> u16 {
        u16::from_be_bytes(self.inner)
    }

    /// The decoded view.
    pub const fn kind(&self) -> DivisionKind {
        if self.inner[0] >> 7 == 0 {
            DivisionKind::TicksPerQuarterNote(self.raw())
        } else {
            let fps = match self.inner[0] as i8 {
                -24 => SmpteFps::TwentyFour,
                -25 => SmpteFps::TwentyFive,
                -29 => SmpteFps::TwentyNine,
                _ => SmpteFps::Thirty,
            };
            DivisionKind::Smpte {
                fps,
                ticks_per_frame: self.inner[1],
            }
        }
    }

    /// Some if the division is tempo-relative.
    pub const fn ticks_per_quarter_note(&self) -> Option<u16> {
        match self.kind() {
            DivisionKind::TicksPerQuarterNote(t) => Some(t),
            DivisionKind::Smpte { .. } => None,
        }
    }
}

/// The parsed contents of the 6-byte header chunk payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileHeader {
    format: Format,
    num_tracks: u16,
    division: Division,
}

impl FileHeader {
    /// Read format, track count and division off the cursor. The `MThd`
    /// identifier and chunk length have already been consumed.
    pub(crate) fn read(reader: &mut Reader) -> DecodeResult<Self> {
        let format_offset = reader.position();
        let raw_format = reader.read_u16_be()?;
        let format = Format::try_from(raw_format)
            .map_err(|_| DecodeError::new(format_offset, ChunkError::UnknownFormat(raw_format)))?;

        let num_tracks = reader.read_u16_be()?;

        let division_offset = reader.position();
        let division = Division::from_bytes(reader.read_array()?)
            .map_err(|e| DecodeError::new(division_offset, e))?;

        Ok(Self {
            format,
            num_tracks,
            division,
        })
    }

    /// The declared file format.
    pub const fn format(&self) -> Format {
        self.format
    }

    /// The declared number of track chunks.
    pub const fn num_tracks(&self) -> u16 {
        self.num_tracks
    }

    /// The division field.
    pub const fn division(&self) -> Division {
        self.division
    }
}

#[test]
fn division_keeps_the_raw_field() {
    use pretty_assertions::assert_eq;
    let division = Division::from_bytes([0x00, 0xC0]).unwrap();
    assert_eq!(division.raw(), 192);
    assert_eq!(division.kind(), DivisionKind::TicksPerQuarterNote(192));
    assert_eq!(division.ticks_per_quarter_note(), Some(192));
}

#[test]
fn division_decodes_smpte() {
    use pretty_assertions::assert_eq;
    // -25 fps, 40 ticks per frame
    let division = Division::from_bytes([0xE7, 0x28]).unwrap();
    assert_eq!(
        division.kind(),
        DivisionKind::Smpte {
            fps: SmpteFps::TwentyFive,
            ticks_per_frame: 40
        }
    );
    assert_eq!(division.ticks_per_quarter_note(), None);
    assert_eq!(division.raw(), 0xE728);
}

#[test]
fn division_rejects_unknown_fps() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        Division::from_bytes([0x9C, 0x28]),
        Err(ChunkError::InvalidSmpteFps(-100))
    );
}
