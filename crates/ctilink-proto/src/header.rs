//! The 8-byte message header and whole-message encoding.
//!
//! Every message on the wire is `header ‖ body`: a big-endian `u32` body
//! length (excluding the header itself) followed by a big-endian `u32`
//! message type id. A declared length above [`MAX_BODY_LEN`] is a hard
//! framing error and is rejected before any body byte is read.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::ProtocolError;
use crate::messages::Message;
use crate::types::message_type_name;

/// Size of the wire header in bytes.
pub const HEADER_LEN: usize = 8;

/// Largest body a conforming peer will send.
pub const MAX_BODY_LEN: u32 = 65536;

/// Parsed message header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    /// Body length in bytes, excluding the header.
    pub length: u32,
    /// Message type id.
    pub type_id: u32,
}

impl MessageHeader {
    /// Parses a header, rejecting lengths above [`MAX_BODY_LEN`].
    pub fn parse(bytes: &[u8; HEADER_LEN]) -> Result<Self, ProtocolError> {
        let length = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let type_id = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);

        if length > MAX_BODY_LEN {
            return Err(ProtocolError::BodyTooLarge { length, max: MAX_BODY_LEN });
        }

        Ok(Self { length, type_id })
    }

    /// Serializes the header.
    pub fn to_bytes(self) -> [u8; HEADER_LEN] {
        let mut buf = [0u8; HEADER_LEN];
        buf[0..4].copy_from_slice(&self.length.to_be_bytes());
        buf[4..8].copy_from_slice(&self.type_id.to_be_bytes());
        buf
    }
}

impl std::fmt::Display for MessageHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}({}) len={}",
            message_type_name(self.type_id),
            self.type_id,
            self.length
        )
    }
}

/// Encodes a complete wire message, header included.
///
/// The written length always equals the length of the serialized body that
/// follows it. Bodies above [`MAX_BODY_LEN`] are rejected rather than sent
/// with a header the peer would refuse.
pub fn encode_message(msg: &Message) -> Result<Bytes, ProtocolError> {
    let body = msg.encode_body();
    if body.len() > MAX_BODY_LEN as usize {
        return Err(ProtocolError::BodyTooLarge {
            length: body.len() as u32,
            max: MAX_BODY_LEN,
        });
    }

    let header = MessageHeader {
        length: body.len() as u32,
        type_id: msg.type_id(),
    };

    let mut buf = BytesMut::with_capacity(HEADER_LEN + body.len());
    buf.put_slice(&header.to_bytes());
    buf.put_slice(&body);
    Ok(buf.freeze())
}
