//! Wire format serialization and framing
//!
//! Every message travels as one length-prefixed frame:
//!
//! ```text
//! ┌──────────────────┬──────────────────────────┐
//! │ Length (4 bytes) │ Payload (variable)       │
//! │ Big-endian u32   │ JSON or Postcard binary  │
//! └──────────────────┴──────────────────────────┘
//! ```
//!
//! - **Maximum payload size**: 16 MiB. Scenarios embed the full map text,
//!   so frames are larger than typical command traffic.
//! - **End of stream**: EOF exactly at a frame boundary ends the exchange
//!   cleanly; EOF inside a frame is a protocol error.
//!
//! ## Wire Formats
//!
//! - **JSON** (default): human-readable, easy to drive from scripts.
//! - **Postcard**: compact binary, both ends must share the Rust types.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io::{ErrorKind, Read, Write};

/// Largest accepted frame payload (bytes)
pub const MAX_FRAME_SIZE: usize = 16 * 1024 * 1024;

/// Supported wire formats
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum WireFormat {
    /// JSON format - human-readable for debugging
    #[default]
    Json,
    /// Binary format using postcard - fast and compact
    Postcard,
}

/// Serializer for the configured format
#[derive(Clone, Debug)]
pub struct Serializer {
    format: WireFormat,
}

impl Serializer {
    /// Create a new serializer for the given format
    pub fn new(format: WireFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> WireFormat {
        self.format
    }

    /// Serialize a message to bytes
    pub fn serialize<T: Serialize>(&self, msg: &T) -> Result<Vec<u8>> {
        match self.format {
            WireFormat::Postcard => {
                postcard::to_allocvec(msg).map_err(|e| Error::Serialization(e.to_string()))
            }
            WireFormat::Json => {
                serde_json::to_vec(msg).map_err(|e| Error::Serialization(e.to_string()))
            }
        }
    }

    /// Deserialize bytes to a message
    pub fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        match self.format {
            WireFormat::Postcard => {
                postcard::from_bytes(bytes).map_err(|e| Error::Serialization(e.to_string()))
            }
            WireFormat::Json => {
                serde_json::from_slice(bytes).map_err(|e| Error::Serialization(e.to_string()))
            }
        }
    }
}

/// Write one frame (length prefix + payload)
pub fn write_frame<W: Write>(writer: &mut W, payload: &[u8]) -> Result<()> {
    if payload.len() > MAX_FRAME_SIZE {
        return Err(Error::Protocol(format!(
            "frame of {} bytes exceeds limit of {}",
            payload.len(),
            MAX_FRAME_SIZE
        )));
    }
    let len = payload.len() as u32;
    writer.write_all(&len.to_be_bytes())?;
    writer.write_all(payload)?;
    Ok(())
}

/// Read one frame. Returns `None` on EOF at a frame boundary.
pub fn read_frame<R: Read>(reader: &mut R) -> Result<Option<Vec<u8>>> {
    let mut len_buf = [0u8; 4];
    let mut filled = 0;
    while filled < len_buf.len() {
        match reader.read(&mut len_buf[filled..]) {
            Ok(0) if filled == 0 => return Ok(None),
            Ok(0) => {
                return Err(Error::Protocol(format!(
                    "stream ended inside length prefix ({} of 4 bytes)",
                    filled
                )));
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }

    let len = u32::from_be_bytes(len_buf) as usize;
    if len > MAX_FRAME_SIZE {
        return Err(Error::Protocol(format!(
            "incoming frame of {} bytes exceeds limit of {}",
            len, MAX_FRAME_SIZE
        )));
    }

    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload).map_err(|e| {
        if e.kind() == ErrorKind::UnexpectedEof {
            Error::Protocol(format!("stream ended inside {}-byte payload", len))
        } else {
            Error::Io(e)
        }
    })?;
    Ok(Some(payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::messages::InboundMessage;
    use std::io::Cursor;

    #[test]
    fn test_frame_layout() {
        let mut buf = Vec::new();
        write_frame(&mut buf, b"abc").unwrap();
        assert_eq!(buf, vec![0, 0, 0, 3, b'a', b'b', b'c']);
    }

    #[test]
    fn test_read_frames_until_eof() {
        let mut buf = Vec::new();
        write_frame(&mut buf, b"one").unwrap();
        write_frame(&mut buf, b"").unwrap();
        let mut cursor = Cursor::new(buf);

        assert_eq!(read_frame(&mut cursor).unwrap(), Some(b"one".to_vec()));
        assert_eq!(read_frame(&mut cursor).unwrap(), Some(Vec::new()));
        assert_eq!(read_frame(&mut cursor).unwrap(), None);
    }

    #[test]
    fn test_truncated_prefix() {
        let mut cursor = Cursor::new(vec![0u8, 0]);
        assert!(matches!(read_frame(&mut cursor), Err(Error::Protocol(_))));
    }

    #[test]
    fn test_truncated_payload() {
        let mut cursor = Cursor::new(vec![0u8, 0, 0, 9, 1, 2]);
        assert!(matches!(read_frame(&mut cursor), Err(Error::Protocol(_))));
    }

    #[test]
    fn test_oversized_frame_rejected() {
        let len = (MAX_FRAME_SIZE as u32 + 1).to_be_bytes();
        let mut cursor = Cursor::new(len.to_vec());
        assert!(matches!(read_frame(&mut cursor), Err(Error::Protocol(_))));
    }

    #[test]
    fn test_postcard_inbound() {
        let serializer = Serializer::new(WireFormat::Postcard);
        let bytes = serializer.serialize(&InboundMessage::Seed(7)).unwrap();
        let back: InboundMessage = serializer.deserialize(&bytes).unwrap();
        assert_eq!(back, InboundMessage::Seed(7));
    }

    #[test]
    fn test_json_garbage_is_serialization_error() {
        let serializer = Serializer::new(WireFormat::Json);
        let result: Result<InboundMessage> = serializer.deserialize(b"{not json");
        assert!(matches!(result, Err(Error::Serialization(_))));
    }

    #[test]
    fn test_wire_format_from_config_text() {
        #[derive(serde::Deserialize)]
        struct T {
            wire_format: WireFormat,
        }
        let t: T = toml::from_str("wire_format = \"postcard\"").unwrap();
        assert_eq!(t.wire_format, WireFormat::Postcard);
    }
}
