//! Error types for the wire codec.
//!
//! All errors are structured and comparable so tests can assert on the
//! exact failure, not a formatted string.

use thiserror::Error;

/// Errors produced while framing or decoding protocol bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// A fixed-region read ran past the end of the body.
    #[error("body ended early: needed {needed} more bytes at offset {offset}")]
    UnexpectedEnd {
        /// Bytes the read still required
        needed: usize,
        /// Offset at which the read started
        offset: usize,
    },

    /// A floating-field header declared more value bytes than remain.
    #[error("floating field length {length} overruns remaining {remaining} bytes")]
    FloatingOverrun {
        /// Declared value length
        length: usize,
        /// Bytes actually remaining after the field header
        remaining: usize,
    },

    /// The message header declared a body larger than the protocol allows.
    #[error("declared body length {length} exceeds maximum {max}")]
    BodyTooLarge {
        /// Length claimed by the header
        length: u32,
        /// Maximum body length the protocol permits
        max: u32,
    },
}
