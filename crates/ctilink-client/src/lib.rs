//! GED-188 CTI session engine.
//!
//! This crate drives a supervised session against a peripheral gateway:
//! it dials, opens a session, keeps the link alive with heartbeats,
//! forwards telephony events to a consumer callback, and reconnects with
//! proper teardown when anything goes wrong. All wire knowledge lives in
//! `ctilink-proto`; this crate owns the I/O and the state machine.
//!
//! # Architecture
//!
//! At most two tasks run per open session:
//!
//! - the **dispatch task** owns the read half of the TCP connection and
//!   pulls frames with short deadlines (so cancellation is observed even
//!   on an idle link);
//! - the **heartbeat task** owns a periodic timer and writes through the
//!   shared connection handle.
//!
//! Writes from the heartbeat task and from caller-issued requests are
//! serialized by one mutex on the connection's write half; session state
//! sits behind a read/write lock in [`session::Session`]; the invoke-id
//! counter is a plain atomic shared by every outbound request.
//!
//! ```text
//! Disconnected → Connecting → Connected → Opening → Open → Closing
//!        ↑                                            │
//!        └───────── reconnect delay ←─────────────────┘
//! ```

#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;
pub mod session;

mod conn;
mod framer;
mod heartbeat;

pub use client::{Client, EventHandler};
pub use config::{ClientConfig, ConfigError};
pub use error::ClientError;
pub use session::SessionState;
