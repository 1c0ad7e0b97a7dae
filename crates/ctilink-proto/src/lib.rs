//! GED-188 (CTI protocol, version 24) wire codec.
//!
//! This crate is the pure byte-level half of the ctilink client: it knows how
//! to frame, encode and decode every protocol message but performs no I/O.
//! All multi-byte integers on the wire are big-endian.
//!
//! A message is `header ‖ body`. The [`header::MessageHeader`] is 8 bytes
//! (body length, then type id). The body is a message-specific fixed region
//! of scalars followed by a floating region of tag-length-value entries
//! ([`floating`]). The typed catalog lives in [`messages`], with
//! [`messages::Message::decode`] acting as the registry from type id to
//! decoder; unknown type ids decode to [`messages::GenericMessage`] so a
//! newer peer never breaks dispatch.
//!
//! # Layers
//!
//! - [`wire`]: positioned big-endian reads/writes with sticky error
//!   semantics
//! - [`floating`]: the tag-length-value floating-field codec
//! - [`tags`] / [`types`]: the protocol dictionary (tag ids, type ids,
//!   masks, enumerated values)
//! - [`header`] / [`messages`]: framing and the typed message catalog

#![forbid(unsafe_code)]

pub mod error;
pub mod floating;
pub mod header;
pub mod messages;
pub mod tags;
pub mod types;
pub mod wire;

pub use error::ProtocolError;
pub use floating::{FloatingField, FloatingFields, FloatingWriter};
pub use header::{encode_message, MessageHeader, HEADER_LEN, MAX_BODY_LEN};
pub use messages::{GenericMessage, Message};

/// Convenient result alias for codec operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;
