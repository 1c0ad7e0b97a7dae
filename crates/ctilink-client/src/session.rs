//! The in-memory session record.
//!
//! Owned exclusively by the engine; external readers observe through
//! copy-returning accessors. State reads take the shared side of the
//! lock, transitions the exclusive side. The invoke-id counter is an
//! atomic shared by every outbound request and heartbeat — it is never
//! reset, so invoke ids stay strictly increasing across reconnects and
//! make cross-connection log correlation trivial.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::RwLock;

/// Lifecycle state of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SessionState {
    /// No connection.
    Disconnected,
    /// TCP dial in progress.
    Connecting,
    /// TCP established, session not yet opened.
    Connected,
    /// OPEN_REQ sent, waiting for OPEN_CONF.
    Opening,
    /// Session established; events flowing.
    Open,
    /// CLOSE_REQ sent, waiting for CLOSE_CONF.
    Closing,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Disconnected => "Disconnected",
            Self::Connecting => "Connecting",
            Self::Connected => "Connected",
            Self::Opening => "Opening",
            Self::Open => "Open",
            Self::Closing => "Closing",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Default)]
struct Details {
    monitor_id: u32,
    services_granted: u32,
    peripheral_id: u32,
    agent_state: u16,
}

/// Session state shared between the engine tasks and external readers.
#[derive(Debug)]
pub struct Session {
    state: RwLock<SessionState>,
    details: RwLock<Details>,
    invoke_id: AtomicU32,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates a session in the Disconnected state.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(SessionState::Disconnected),
            details: RwLock::new(Details::default()),
            invoke_id: AtomicU32::new(0),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        *self.state.read().expect("session state lock poisoned")
    }

    /// Transitions to `state`.
    pub fn set_state(&self, state: SessionState) {
        *self.state.write().expect("session state lock poisoned") = state;
    }

    /// True once OPEN_CONF has been accepted.
    pub fn is_open(&self) -> bool {
        self.state() == SessionState::Open
    }

    /// Allocates the next invoke id.
    ///
    /// Wraps silently after `u32::MAX`; the server tolerates id reuse at
    /// that distance.
    pub fn next_invoke_id(&self) -> u32 {
        self.invoke_id.fetch_add(1, Ordering::Relaxed).wrapping_add(1)
    }

    /// Server-assigned monitor id; 0 while no session is open.
    pub fn monitor_id(&self) -> u32 {
        self.details.read().expect("session details lock poisoned").monitor_id
    }

    /// Services granted in OPEN_CONF.
    pub fn services_granted(&self) -> u32 {
        self.details.read().expect("session details lock poisoned").services_granted
    }

    /// Peripheral id reported in OPEN_CONF.
    pub fn peripheral_id(&self) -> u32 {
        self.details.read().expect("session details lock poisoned").peripheral_id
    }

    /// Agent state reported in OPEN_CONF.
    pub fn agent_state(&self) -> u16 {
        self.details.read().expect("session details lock poisoned").agent_state
    }

    /// Records the identity granted by OPEN_CONF.
    pub fn store_open_conf(
        &self,
        monitor_id: u32,
        services_granted: u32,
        peripheral_id: u32,
        agent_state: u16,
    ) {
        let mut details = self.details.write().expect("session details lock poisoned");
        details.monitor_id = monitor_id;
        details.services_granted = services_granted;
        details.peripheral_id = peripheral_id;
        details.agent_state = agent_state;
    }

    /// Drops back to Disconnected and clears per-session identity.
    ///
    /// The invoke-id counter is deliberately left alone.
    pub fn reset(&self) {
        self.set_state(SessionState::Disconnected);
        let mut details = self.details.write().expect("session details lock poisoned");
        *details = Details::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_disconnected_with_no_identity() {
        let session = Session::new();
        assert_eq!(session.state(), SessionState::Disconnected);
        assert_eq!(session.monitor_id(), 0);
        assert!(!session.is_open());
    }

    #[test]
    fn invoke_ids_are_strictly_increasing() {
        let session = Session::new();
        let a = session.next_invoke_id();
        let b = session.next_invoke_id();
        let c = session.next_invoke_id();
        assert_eq!(a, 1);
        assert!(b > a && c > b);
    }

    #[test]
    fn reset_clears_identity_but_not_invoke_counter() {
        let session = Session::new();
        session.set_state(SessionState::Open);
        session.store_open_conf(42, 0x11, 5001, 2);
        assert_eq!(session.monitor_id(), 42);
        assert_eq!(session.peripheral_id(), 5001);
        let before = session.next_invoke_id();

        session.reset();
        assert_eq!(session.state(), SessionState::Disconnected);
        assert_eq!(session.monitor_id(), 0);
        assert_eq!(session.services_granted(), 0);
        assert_eq!(session.agent_state(), 0);
        assert!(session.next_invoke_id() > before);
    }

    #[test]
    fn states_order_matches_lifecycle() {
        // The dispatch invariant "state stays at or below Opening until
        // OPEN_CONF" relies on this ordering.
        assert!(SessionState::Opening < SessionState::Open);
        assert!(SessionState::Connected < SessionState::Opening);
        assert!(SessionState::Disconnected < SessionState::Connecting);
    }
}
