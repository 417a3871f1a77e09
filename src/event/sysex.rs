use log::warn;

use crate::error::{DecodeError, DecodeResult, EventError};
use crate::reader::Reader;

#[doc = r#"
A system exclusive event: an opaque, vendor-defined payload delimited by a
`0xF0` or `0xF7` status byte and a `0xF7` terminator.

The payload is everything between the opening status and the terminator,
terminator excluded. Some writers prefix the payload with a variable-length
byte count; the terminator scan is authoritative and the prefix, when
present, is kept as part of the payload.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SysExEvent {
    data: Vec<u8>,
}

impl SysExEvent {
    /// The raw payload, `0xF7` terminator excluded.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Scan the payload off the cursor. The opening `0xF0`/`0xF7` status
    /// has already been consumed.
    pub(crate) fn read(reader: &mut Reader) -> DecodeResult<Self> {
        let start = reader.position();
        let mut data = Vec::new();
        loop {
            let byte = reader
                .read_u8()
                .map_err(|_| DecodeError::new(start, EventError::UnterminatedSysEx))?;
            if byte == 0xF7 {
                break;
            }
            data.push(byte);
        }

        if let Some(declared) = length_hint(&data) {
            // the declared count covers everything after the quantity,
            // terminator included
            let scanned = data.len() - declared.encoded_len + 1;
            if declared.value as usize != scanned {
                warn!(
                    "sysex at byte {start} declares {} byte(s) but the 0xF7 terminator \
                     was found after {scanned}; trusting the terminator",
                    declared.value,
                );
            }
        }

        Ok(Self { data })
    }
}

struct LengthHint {
    value: u32,
    encoded_len: usize,
}

/// Decode the leading bytes of the payload as a variable-length quantity,
/// if they form a complete one.
fn length_hint(data: &[u8]) -> Option<LengthHint> {
    let mut value: u32 = 0;
    for (i, byte) in data.iter().copied().take(4).enumerate() {
        value = (value << 7) | u32::from(byte & 0x7F);
        if byte & 0x80 == 0 {
            return Some(LengthHint {
                value,
                encoded_len: i + 1,
            });
        }
    }
    None
}
