#![doc = r#"
The typed event model produced by track decoding.

Every decoded event is a [`TrackEvent`]: a delta time in ticks plus one of
three mutually exclusive payloads ([`TrackEventKind`]). Consumers are
expected to `match` exhaustively; there is no behavior here, only data.
"#]

mod meta;
pub use meta::*;

mod smpte;
pub use smpte::*;

mod sysex;
pub use sysex::*;

mod voice;
pub use voice::*;

/// One timed event from a track's payload.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackEvent {
    pub(crate) delta_time: u32,
    pub(crate) kind: TrackEventKind,
}

impl TrackEvent {
    pub(crate) const fn new(delta_time: u32, kind: TrackEventKind) -> Self {
        Self { delta_time, kind }
    }

    /// Ticks elapsed since the previous event in the same track.
    ///
    /// The encoding caps this at 28 bits, so the value always fits a `u32`.
    pub const fn delta_time(&self) -> u32 {
        self.delta_time
    }

    /// The event payload.
    pub const fn kind(&self) -> &TrackEventKind {
        &self.kind
    }

    /// True for the meta event that terminates a track.
    pub const fn is_end_of_track(&self) -> bool {
        matches!(self.kind, TrackEventKind::Meta(MetaEvent::EndOfTrack))
    }
}

/// The three event categories a track payload can contain.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrackEventKind {
    /// A `0xFF`-prefixed event carrying non-sound metadata
    Meta(MetaEvent),
    /// A channel voice message
    ChannelVoice(ChannelVoiceEvent),
    /// A system exclusive payload
    SysEx(SysExEvent),
}

impl From<MetaEvent> for TrackEventKind {
    fn from(value: MetaEvent) -> Self {
        Self::Meta(value)
    }
}

impl From<ChannelVoiceEvent> for TrackEventKind {
    fn from(value: ChannelVoiceEvent) -> Self {
        Self::ChannelVoice(value)
    }
}

impl From<SysExEvent> for TrackEventKind {
    fn from(value: SysExEvent) -> Self {
        Self::SysEx(value)
    }
}
