//! Chunk framing: reads the header chunk and every track chunk's raw
//! payload into owned buffers before any event decoding starts.

use log::trace;

use crate::error::{ChunkError, DecodeError, DecodeResult};
use crate::file::FileHeader;
use crate::reader::Reader;

const HEADER_ID: [u8; 4] = *b"MThd";
const TRACK_ID: [u8; 4] = *b"MTrk";

/// The header chunk payload is always 6 bytes.
const HEADER_LEN: u32 = 6;

/// One track chunk's framing and raw, still-undecoded payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawTrackChunk {
    pub(crate) declared_len: u32,
    pub(crate) data: Vec<u8>,
}

/// Read the header chunk and all `num_tracks` track chunks. The source
/// must be exactly exhausted afterwards; leftover bytes fail the parse
/// just like missing ones.
pub(crate) fn load_chunks(reader: &mut Reader) -> DecodeResult<(FileHeader, Vec<RawTrackChunk>)> {
    let header = read_header(reader)?;

    let mut chunks = Vec::with_capacity(usize::from(header.num_tracks()));
    for index in 0..header.num_tracks() {
        let chunk = read_track_chunk(reader)?;
        trace!(
            "track chunk {index}: {} byte(s) of event data",
            chunk.declared_len
        );
        chunks.push(chunk);
    }

    if !reader.is_empty() {
        return Err(DecodeError::new(
            reader.position(),
            ChunkError::TrailingBytes(reader.remaining()),
        ));
    }

    Ok((header, chunks))
}

fn read_header(reader: &mut Reader) -> DecodeResult<FileHeader> {
    let id_offset = reader.position();
    let id: [u8; 4] = reader.read_array()?;
    if id != HEADER_ID {
        return Err(DecodeError::new(id_offset, ChunkError::InvalidHeaderId(id)));
    }

    let len_offset = reader.position();
    let len = reader.read_u32_be()?;
    if len != HEADER_LEN {
        return Err(DecodeError::new(len_offset, ChunkError::InvalidHeaderLen(len)));
    }

    FileHeader::read(reader)
}

fn read_track_chunk(reader: &mut Reader) -> DecodeResult<RawTrackChunk> {
    let id_offset = reader.position();
    let id: [u8; 4] = reader.read_array()?;
    if id != TRACK_ID {
        return Err(DecodeError::new(id_offset, ChunkError::InvalidTrackId(id)));
    }

    let declared_len = reader.read_u32_be()?;
    let data = reader.read_bytes(declared_len as usize)?.to_vec();

    Ok(RawTrackChunk { declared_len, data })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeErrorKind;
    use pretty_assertions::assert_eq;

    fn header_bytes() -> Vec<u8> {
        vec![
            0x4D, 0x54, 0x68, 0x64, // MThd
            0x00, 0x00, 0x00, 0x06, // length 6
            0x00, 0x01, // format 1
            0x00, 0x01, // one track
            0x00, 0x60, // 96 ticks per quarter
        ]
    }

    #[test]
    fn loads_header_and_track_payloads() {
        let mut bytes = header_bytes();
        bytes.extend([0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x04]);
        bytes.extend([0x00, 0xFF, 0x2F, 0x00]);

        let mut reader = Reader::new(&bytes);
        let (header, chunks) = load_chunks(&mut reader).unwrap();
        assert_eq!(header.num_tracks(), 1);
        assert_eq!(header.division().raw(), 96);
        assert_eq!(
            chunks,
            vec![RawTrackChunk {
                declared_len: 4,
                data: vec![0x00, 0xFF, 0x2F, 0x00],
            }]
        );
    }

    #[test]
    fn rejects_a_bad_header_identifier() {
        let mut bytes = header_bytes();
        bytes[0] = b'X';
        let err = load_chunks(&mut Reader::new(&bytes)).unwrap_err();
        assert_eq!(err.offset(), 0);
        assert!(matches!(
            err.kind(),
            DecodeErrorKind::Chunk(ChunkError::InvalidHeaderId(_))
        ));
    }

    #[test]
    fn rejects_a_bad_header_length() {
        let mut bytes = header_bytes();
        bytes[7] = 0x07;
        let err = load_chunks(&mut Reader::new(&bytes)).unwrap_err();
        assert_eq!(err.offset(), 4);
        assert!(matches!(
            err.kind(),
            DecodeErrorKind::Chunk(ChunkError::InvalidHeaderLen(7))
        ));
    }

    #[test]
    fn rejects_a_bad_track_identifier() {
        let mut bytes = header_bytes();
        bytes.extend(*b"MTRK");
        bytes.extend([0x00, 0x00, 0x00, 0x00]);
        let err = load_chunks(&mut Reader::new(&bytes)).unwrap_err();
        assert_eq!(err.offset(), 14);
        assert!(matches!(
            err.kind(),
            DecodeErrorKind::Chunk(ChunkError::InvalidTrackId(_))
        ));
    }

    #[test]
    fn rejects_trailing_bytes_after_the_last_chunk() {
        let mut bytes = header_bytes();
        bytes.extend([0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x00]);
        bytes.push(0xAB);
        let err = load_chunks(&mut Reader::new(&bytes)).unwrap_err();
        assert!(matches!(
            err.kind(),
            DecodeErrorKind::Chunk(ChunkError::TrailingBytes(1))
        ));
    }

    #[test]
    fn rejects_a_short_final_chunk() {
        let mut bytes = header_bytes();
        bytes.extend([0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x08]);
        bytes.extend([0x00, 0xFF, 0x2F, 0x00]); // only 4 of the declared 8
        let err = load_chunks(&mut Reader::new(&bytes)).unwrap_err();
        assert!(err.is_unexpected_eof());
    }
}
