//! Whole-file failure behavior: the first error aborts the parse, no
//! partial result, byte offset and track index attached.

use mtrk::error::{ChunkError, DecodeErrorKind, EventError};
use mtrk::prelude::*;

fn header(format: u16, num_tracks: u16, division: u16) -> Vec<u8> {
    let mut bytes = vec![0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06];
    bytes.extend(format.to_be_bytes());
    bytes.extend(num_tracks.to_be_bytes());
    bytes.extend(division.to_be_bytes());
    bytes
}

fn track(payload: &[u8]) -> Vec<u8> {
    let mut bytes = vec![0x4D, 0x54, 0x72, 0x6B];
    bytes.extend((payload.len() as u32).to_be_bytes());
    bytes.extend(payload);
    bytes
}

const END_OF_TRACK: [u8; 4] = [0x00, 0xFF, 0x2F, 0x00];

#[test]
fn bad_header_identifier() {
    let mut bytes = header(0, 1, 96);
    bytes[3] = b'X';
    bytes.extend(track(&END_OF_TRACK));

    let err = MidiFile::parse(&bytes).unwrap_err();
    assert_eq!(err.offset(), 0);
    assert_eq!(err.track(), None);
    assert!(matches!(
        err.kind(),
        DecodeErrorKind::Chunk(ChunkError::InvalidHeaderId(_))
    ));
}

#[test]
fn bad_header_length() {
    let mut bytes = header(0, 1, 96);
    bytes[7] = 0x08;
    bytes.extend(track(&END_OF_TRACK));

    let err = MidiFile::parse(&bytes).unwrap_err();
    assert!(matches!(
        err.kind(),
        DecodeErrorKind::Chunk(ChunkError::InvalidHeaderLen(8))
    ));
}

#[test]
fn unknown_format() {
    let mut bytes = header(3, 1, 96);
    bytes.extend(track(&END_OF_TRACK));

    let err = MidiFile::parse(&bytes).unwrap_err();
    assert_eq!(err.offset(), 8);
    assert!(matches!(
        err.kind(),
        DecodeErrorKind::Chunk(ChunkError::UnknownFormat(3))
    ));
}

#[test]
fn bad_track_identifier() {
    let mut bytes = header(0, 1, 96);
    let mut chunk = track(&END_OF_TRACK);
    chunk[3] = b'K'; // "MTrK"
    bytes.extend(chunk);

    let err = MidiFile::parse(&bytes).unwrap_err();
    assert_eq!(err.offset(), 14);
    assert!(matches!(
        err.kind(),
        DecodeErrorKind::Chunk(ChunkError::InvalidTrackId(_))
    ));
}

#[test]
fn trailing_bytes_after_the_last_track() {
    let mut bytes = header(0, 1, 96);
    bytes.extend(track(&END_OF_TRACK));
    bytes.extend([0x00, 0x00]);

    let err = MidiFile::parse(&bytes).unwrap_err();
    assert!(matches!(
        err.kind(),
        DecodeErrorKind::Chunk(ChunkError::TrailingBytes(2))
    ));
}

#[test]
fn declared_length_longer_than_the_file() {
    let mut bytes = header(0, 1, 96);
    bytes.extend([0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x20]);
    bytes.extend(END_OF_TRACK); // 4 of the declared 32 bytes

    let err = MidiFile::parse(&bytes).unwrap_err();
    assert!(err.is_unexpected_eof());
}

#[test]
fn fewer_chunks_than_declared() {
    let mut bytes = header(1, 2, 96);
    bytes.extend(track(&END_OF_TRACK));

    let err = MidiFile::parse(&bytes).unwrap_err();
    assert!(err.is_unexpected_eof());
}

#[test]
fn one_bad_track_fails_the_whole_parse() {
    // track 1 carries a data byte with no preceding status
    let bad: Vec<u8> = [&[0x00, 0x40, 0x40][..], &END_OF_TRACK].concat();

    let mut bytes = header(1, 3, 96);
    bytes.extend(track(&END_OF_TRACK));
    bytes.extend(track(&bad));
    bytes.extend(track(&END_OF_TRACK));

    let err = MidiFile::parse(&bytes).unwrap_err();
    assert_eq!(err.track(), Some(1));
    // offset is relative to that track's payload
    assert_eq!(err.offset(), 1);
    assert!(matches!(
        err.kind(),
        DecodeErrorKind::Event(EventError::MissingRunningStatus)
    ));
}

#[test]
fn data_after_end_of_track() {
    let payload: Vec<u8> = [&END_OF_TRACK[..], &[0x00, 0x90, 0x40, 0x40]].concat();
    let mut bytes = header(0, 1, 96);
    bytes.extend(track(&payload));

    let err = MidiFile::parse(&bytes).unwrap_err();
    assert_eq!(err.track(), Some(0));
    assert_eq!(err.offset(), 4);
    assert!(matches!(err.kind(), DecodeErrorKind::TrailingData));
}

#[test]
fn five_byte_delta_time() {
    let payload: Vec<u8> = [&[0xFF, 0xFF, 0xFF, 0xFF, 0x7F][..], &END_OF_TRACK].concat();
    let mut bytes = header(0, 1, 96);
    bytes.extend(track(&payload));

    let err = MidiFile::parse(&bytes).unwrap_err();
    assert_eq!(err.track(), Some(0));
    assert!(matches!(
        err.kind(),
        DecodeErrorKind::Event(EventError::VlqOverflow)
    ));
}

#[test]
fn wrong_meta_payload_length() {
    // End of Track declaring a 1-byte payload
    let payload = [0x00, 0xFF, 0x2F, 0x01, 0x00];
    let mut bytes = header(0, 1, 96);
    bytes.extend(track(&payload));

    let err = MidiFile::parse(&bytes).unwrap_err();
    assert!(matches!(
        err.kind(),
        DecodeErrorKind::Event(EventError::MetaLength {
            meta_type: 0x2F,
            found: 1
        })
    ));
}

#[test]
fn unterminated_sysex() {
    let payload = [0x00, 0xF0, 0x43, 0x12];
    let mut bytes = header(0, 1, 96);
    bytes.extend(track(&payload));

    let err = MidiFile::parse(&bytes).unwrap_err();
    assert!(matches!(
        err.kind(),
        DecodeErrorKind::Event(EventError::UnterminatedSysEx)
    ));
}

#[test]
fn invalid_smpte_division() {
    let mut bytes = header(0, 1, 0x9C28); // -100 "fps"
    bytes.extend(track(&END_OF_TRACK));

    let err = MidiFile::parse(&bytes).unwrap_err();
    assert_eq!(err.offset(), 12);
    assert!(matches!(
        err.kind(),
        DecodeErrorKind::Chunk(ChunkError::InvalidSmpteFps(-100))
    ));
}

#[test]
fn smpte_offset_field_out_of_range() {
    // minute byte of 80
    let payload: Vec<u8> = [
        &[0x00, 0xFF, 0x54, 0x05, 0x41, 0x50, 0x2D, 0x0C, 0x22][..],
        &END_OF_TRACK,
    ]
    .concat();
    let mut bytes = header(0, 1, 96);
    bytes.extend(track(&payload));

    let err = MidiFile::parse(&bytes).unwrap_err();
    assert!(matches!(
        err.kind(),
        DecodeErrorKind::Event(EventError::Smpte(_))
    ));
}

#[test]
fn errors_mention_track_and_offset() {
    let bad: Vec<u8> = [&[0x00, 0x40, 0x40][..], &END_OF_TRACK].concat();
    let mut bytes = header(0, 1, 96);
    bytes.extend(track(&bad));

    let err = MidiFile::parse(&bytes).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("track 0"), "unexpected message: {message}");
    assert!(message.contains("byte 1"), "unexpected message: {message}");
}
