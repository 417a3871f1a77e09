#![doc = r#"
Decode Standard MIDI Files into typed, owned event structures.

A `.mid` file is a header chunk followed by one raw payload chunk per
track. [`MidiFile::parse`] loads that framing, decodes every track's
payload (in parallel, one task per track), and returns an immutable
[`MidiFile`]: tracks in file order, each a list of [`TrackEvent`]s with
their delta times in ticks. Tick-to-wall-clock conversion, playback and
writing files back out are intentionally not provided.

# Example

```
use mtrk::{MidiFile, TrackEventKind};

// format 0, one track: NoteOn, NoteOff, End of Track
let bytes = [
    0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, // MThd, length 6
    0x00, 0x00, 0x00, 0x01, 0x00, 0x60, // format 0, 1 track, 96 tpqn
    0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x0C, // MTrk, length 12
    0x00, 0x90, 0x3C, 0x40, // delta 0, NoteOn ch0 middle C
    0x60, 0x80, 0x3C, 0x40, // delta 96, NoteOff
    0x00, 0xFF, 0x2F, 0x00, // delta 0, End of Track
];

let file = MidiFile::parse(&bytes)?;
assert_eq!(file.num_tracks(), 1);
assert_eq!(file.division().ticks_per_quarter_note(), Some(96));

for event in file.tracks()[0].events() {
    match event.kind() {
        TrackEventKind::ChannelVoice(v) => println!("ch {} {:?}", v.channel(), v.event()),
        TrackEventKind::Meta(m) => println!("meta {:?}", m),
        TrackEventKind::SysEx(s) => println!("sysex, {} byte(s)", s.data().len()),
    }
}
# Ok::<(), mtrk::DecodeError>(())
```

Malformed input never yields a partial file: the first error aborts the
parse, carrying the byte offset and, for track payloads, the track index.
Unrecognized meta types are rejected by default; see
[`DecodeOptions::keep_unknown_meta`] to pass them through instead.
"#]

pub mod error;
pub use error::{DecodeError, DecodeResult};

pub mod event;
pub use event::{
    ChannelVoiceEvent, MetaEvent, SysExEvent, TrackEvent, TrackEventKind, VoiceEvent,
};

pub mod file;
pub use file::{Division, DivisionKind, FileHeader, Format, MidiFile, MidiTrack};

mod options;
pub use options::{DecodeOptions, UnknownMetaBehavior};

mod reader;
mod vlq;

#[doc = r#"
Commonly used types, for glob import.
"#]
pub mod prelude {
    pub use crate::error::*;
    pub use crate::event::*;
    pub use crate::file::*;
    pub use crate::options::*;
}
