//! Decoding configuration.

/// Options accepted by [`MidiFile::parse_with`](crate::MidiFile::parse_with).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// What to do with a meta type byte outside the known set.
    pub unknown_meta: UnknownMetaBehavior,
}

impl DecodeOptions {
    /// Strict decoding, identical to [`DecodeOptions::default`].
    pub const fn strict() -> Self {
        Self {
            unknown_meta: UnknownMetaBehavior::Reject,
        }
    }

    /// Keep unrecognized meta events as opaque
    /// [`MetaEvent::Unknown`](crate::event::MetaEvent::Unknown) records
    /// instead of failing the parse.
    pub const fn keep_unknown_meta(mut self) -> Self {
        self.unknown_meta = UnknownMetaBehavior::Keep;
        self
    }
}

/// Behavior on a meta type byte this crate does not recognize.
///
/// Files in the wild carry vendor meta types; rejecting them is the safer
/// default, keeping them loses no information.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownMetaBehavior {
    /// Fail the parse with an unrecognized-meta error.
    #[default]
    Reject,
    /// Pass the event through with its type byte and raw payload.
    Keep,
}
