//! Error types for the session engine.
//!
//! The engine distinguishes errors that tear down the current connection
//! and trigger a reconnect (framing, transport, liveness, open rejection)
//! from ones that flow out of [`Client::run`] unchanged (cancellation).
//! Deadline expiry on a read is modeled as its own kind because it is not
//! a failure at all — it is the dispatch loop's chance to check for
//! cancellation.
//!
//! [`Client::run`]: crate::client::Client::run

use std::io;

use ctilink_proto::ProtocolError;
use thiserror::Error;

/// Errors surfaced by the client engine.
#[derive(Error, Debug)]
pub enum ClientError {
    /// TCP dial failed or timed out.
    #[error("connect failed: {0}")]
    Connect(#[source] io::Error),

    /// The connection died mid-session (read/write failure or EOF).
    #[error("transport error: {0}")]
    Transport(#[source] io::Error),

    /// A read deadline expired; not a failure, the caller loops.
    #[error("read deadline expired")]
    ReadTimeout,

    /// The byte stream violated framing rules; fatal to the connection.
    #[error("framing error: {0}")]
    Framing(#[from] ProtocolError),

    /// A well-framed body for a known type failed to decode.
    ///
    /// The dispatch loop logs and drops the message; the connection
    /// survives.
    #[error("cannot decode {type_id} message of {len} bytes: {source}")]
    Decode {
        /// Message type id from the header.
        type_id: u32,
        /// Body length from the header.
        len: u32,
        /// The underlying decode failure.
        source: ProtocolError,
    },

    /// The server answered OPEN_REQ with a failure.
    #[error("session open rejected with status {status}")]
    OpenRejected {
        /// Status code from FAILURE_CONF / FAILURE_EVENT.
        status: u32,
    },

    /// No OPEN_CONF arrived within the open deadline.
    #[error("timed out waiting for OPEN_CONF")]
    OpenTimeout,

    /// Three heartbeats went unconfirmed; the link is considered dead.
    #[error("heartbeat liveness failure")]
    HeartbeatLiveness,

    /// A send was attempted with no connection established.
    #[error("not connected")]
    NotConnected,

    /// Reconnect attempts exhausted; carries the final attempt's error.
    #[error("reconnect attempts exhausted: {0}")]
    RetriesExhausted(#[source] Box<ClientError>),

    /// The run loop was cancelled by the caller.
    #[error("cancelled")]
    Cancelled,
}

impl ClientError {
    /// True for errors the run loop absorbs by returning to Disconnected
    /// and retrying.
    pub fn is_reconnectable(&self) -> bool {
        matches!(
            self,
            Self::Connect(_)
                | Self::Transport(_)
                | Self::Framing(_)
                | Self::OpenRejected { .. }
                | Self::OpenTimeout
                | Self::HeartbeatLiveness
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reconnectable_kinds() {
        assert!(ClientError::OpenTimeout.is_reconnectable());
        assert!(ClientError::HeartbeatLiveness.is_reconnectable());
        assert!(ClientError::OpenRejected { status: 3 }.is_reconnectable());
        assert!(!ClientError::Cancelled.is_reconnectable());
        assert!(!ClientError::ReadTimeout.is_reconnectable());
        assert!(!ClientError::NotConnected.is_reconnectable());
    }
}
