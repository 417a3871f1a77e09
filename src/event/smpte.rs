use crate::error::SmpteError;

/// The four SMPTE frame rates the MIDI file format defines.
///
/// `TwentyNine` is the NTSC drop-frame rate (30000/1001 ≈ 29.97 fps); the
/// timecode numbering skips values to stay aligned with real time, no video
/// frames are actually dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmpteFps {
    /// 24 fps, standard film rate
    TwentyFour,
    /// 25 fps, PAL/SECAM television
    TwentyFive,
    /// 29.97 fps, NTSC color drop-frame
    TwentyNine,
    /// 30 fps, NTSC black & white
    Thirty,
}

impl SmpteFps {
    /// The nominal integer rate used in timing division. Drop-frame 29.97
    /// returns 30 here, matching how the header division encodes it.
    pub const fn as_division(&self) -> u8 {
        match self {
            Self::TwentyFour => 24,
            Self::TwentyFive => 25,
            Self::TwentyNine => 30,
            Self::Thirty => 30,
        }
    }

    /// The precise rate, including the fractional drop-frame value.
    pub const fn as_f64(&self) -> f64 {
        match self {
            Self::TwentyFour => 24.,
            Self::TwentyFive => 25.,
            Self::TwentyNine => DROP_FRAME,
            Self::Thirty => 30.,
        }
    }
}

/// NTSC drop-frame rate: 29.97002997... fps
const DROP_FRAME: f64 = 30_000. / 1001.;

#[doc = r#"
The payload of an SMPTE offset meta event: the absolute timecode at which a
track is meant to begin, for synchronizing against film or video.

The five payload bytes are
- `0rrhhhhh` — frame rate type in bits 5-6, hours in the low five bits
- minutes (`0..=59`)
- seconds (`0..=59`)
- frames (upper bound depends on the rate)
- subframes, hundredths of a frame (`0..=99`)
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmpteOffset {
    /// Frame rate encoded in the hour byte
    pub fps: SmpteFps,
    /// Hour component (`0..=23`)
    pub hour: u8,
    /// Minute component (`0..=59`)
    pub minute: u8,
    /// Second component (`0..=59`)
    pub second: u8,
    /// Frame within the current second
    pub frame: u8,
    /// Hundredths of a frame (`0..=99`)
    pub subframe: u8,
}

impl SmpteOffset {
    /// Parse and validate the 5-byte payload.
    pub const fn parse(data: &[u8]) -> Result<Self, SmpteError> {
        if data.len() != 5 {
            return Err(SmpteError::Length(data.len()));
        }

        // 0 rr hhhhh
        let fps = match data[0] >> 5 {
            0 => SmpteFps::TwentyFour,
            1 => SmpteFps::TwentyFive,
            2 => SmpteFps::TwentyNine,
            3 => SmpteFps::Thirty,
            v => return Err(SmpteError::FrameRate(v)),
        };
        let hour = data[0] & 0b0001_1111;
        if hour > 23 {
            return Err(SmpteError::Hour(hour));
        }
        let minute = data[1];
        if minute > 59 {
            return Err(SmpteError::Minute(minute));
        }
        let second = data[2];
        if second > 59 {
            return Err(SmpteError::Second(second));
        }
        let frame = data[3];
        let subframe = data[4];
        if subframe > 99 {
            return Err(SmpteError::Subframe(subframe));
        }

        Ok(Self {
            fps,
            hour,
            minute,
            second,
            frame,
            subframe,
        })
    }

    /// The absolute offset in microseconds at this offset's own frame rate.
    pub const fn as_micros(&self) -> f64 {
        ((((self.hour as u64 * 3600) + (self.minute as u64) * 60 + self.second as u64) * 1_000_000)
            as f64)
            + ((self.frame as u64) * 1_000_000) as f64 / self.fps.as_f64()
            + ((self.subframe as u32) * 10_000) as f64 / self.fps.as_f64()
    }
}

#[test]
fn parse_smpte_offset() {
    use pretty_assertions::assert_eq;
    // payload bytes following FF 54 05
    let bytes = [0x41, 0x17, 0x2D, 0x0C, 0x22];
    let offset = SmpteOffset::parse(&bytes).unwrap();

    assert_eq!(offset.fps, SmpteFps::TwentyNine);
    assert_eq!(offset.hour, 1);
    assert_eq!(offset.minute, 23);
    assert_eq!(offset.second, 45);
    assert_eq!(offset.frame, 12);
    assert_eq!(offset.subframe, 34);
}

#[test]
fn parse_invalid_smpte_offset() {
    use pretty_assertions::assert_eq;
    let bytes = [0x7F, 0x17, 0x2D, 0x0C, 0x22];
    let err = SmpteOffset::parse(&bytes).unwrap_err();
    assert_eq!(err, SmpteError::Hour(31));

    let bytes = [0x41, 0x50, 0x2D, 0x0C, 0x22];
    let err = SmpteOffset::parse(&bytes).unwrap_err();
    assert_eq!(err, SmpteError::Minute(80));
}
