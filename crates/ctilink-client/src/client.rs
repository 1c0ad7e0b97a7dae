//! The public client handle and its run loop.
//!
//! [`Client::run`] drives the whole lifecycle: dial, open, steady-state
//! dispatch with a heartbeat task, teardown, bounded reconnection. The
//! dispatch loop owns the read half and is the only place messages are
//! consumed, so events reach the consumer callback in the server's send
//! order.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use ctilink_proto::messages::{
    ConferenceCallReq, ConsultCallReq, HeartbeatReq, HoldCallReq, OpenReq,
    RetrieveCallReq, TransferCallReq,
};
use ctilink_proto::types::{self, PROTOCOL_VERSION};
use ctilink_proto::Message;
use tokio::net::TcpStream;
use tokio::time::{sleep, timeout, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::config::ClientConfig;
use crate::conn::ConnHandle;
use crate::error::ClientError;
use crate::framer::Framer;
use crate::heartbeat::{self, HeartbeatOutcome, HeartbeatTrack};
use crate::session::{Session, SessionState};

/// TCP dial deadline.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// How long to wait for OPEN_CONF after sending OPEN_REQ.
const OPEN_TIMEOUT: Duration = Duration::from_secs(30);

/// Steady-state read slice; expiry is a cancellation checkpoint, not a
/// failure.
const READ_SLICE: Duration = Duration::from_secs(5);

/// Grace period for CLOSE_CONF after sending CLOSE_REQ.
const CLOSE_GRACE: Duration = Duration::from_millis(500);

/// Consumer seam: called once per event, on the dispatch task.
///
/// Implementations must not block indefinitely and must not call back
/// into [`Client::close`].
pub trait EventHandler: Send + Sync + 'static {
    /// Handles one decoded event message.
    fn on_event(&self, msg: Message);
}

impl<F> EventHandler for F
where
    F: Fn(Message) + Send + Sync + 'static,
{
    fn on_event(&self, msg: Message) {
        self(msg)
    }
}

struct Inner {
    cfg: ClientConfig,
    session: Session,
    conn: ConnHandle,
    heartbeat: HeartbeatTrack,
    handler: Box<dyn EventHandler>,
    /// Set by `close()`; distinguishes a user-requested shutdown from a
    /// connection failure.
    closed: CancellationToken,
}

impl Inner {
    async fn send_heartbeat(&self) -> Result<u32, ClientError> {
        let invoke_id = self.session.next_invoke_id();
        self.conn
            .send(&Message::HeartbeatReq(HeartbeatReq { invoke_id }))
            .await?;
        Ok(invoke_id)
    }
}

/// How one session ended, seen from the run loop.
enum SessionOutcome {
    Cancelled,
    Closed,
    Failed(ClientError),
}

/// A supervised CTI client.
///
/// Not `Clone`; wrap it in an `Arc` when requests must be issued from
/// tasks other than the one driving [`Client::run`].
pub struct Client {
    inner: Arc<Inner>,
}

impl Client {
    /// Creates a client; no connection is attempted until [`run`].
    ///
    /// [`run`]: Client::run
    pub fn new(cfg: ClientConfig, handler: impl EventHandler) -> Self {
        Self {
            inner: Arc::new(Inner {
                cfg,
                session: Session::new(),
                conn: ConnHandle::new(),
                heartbeat: HeartbeatTrack::new(),
                handler: Box::new(handler),
                closed: CancellationToken::new(),
            }),
        }
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.inner.session.state()
    }

    /// Monitor id assigned by the server; 0 while no session is open.
    pub fn monitor_id(&self) -> u32 {
        self.inner.session.monitor_id()
    }

    /// Services granted in OPEN_CONF.
    pub fn services_granted(&self) -> u32 {
        self.inner.session.services_granted()
    }

    /// Peripheral id reported in OPEN_CONF.
    pub fn peripheral_id(&self) -> u32 {
        self.inner.session.peripheral_id()
    }

    /// Agent state reported in OPEN_CONF.
    pub fn agent_state(&self) -> u16 {
        self.inner.session.agent_state()
    }

    /// Connects and processes messages until cancelled or closed.
    ///
    /// Reconnectable failures put the loop back into Disconnected, wait
    /// the configured delay, and retry — up to `reconnect_max_attempts`
    /// consecutive failures (0 means forever, the counter resets on each
    /// successful open). Cancellation returns [`ClientError::Cancelled`];
    /// a [`close`]-initiated shutdown returns `Ok(())`.
    ///
    /// [`close`]: Client::close
    pub async fn run(&self, cancel: CancellationToken) -> Result<(), ClientError> {
        let mut consecutive_failures: u32 = 0;

        loop {
            if cancel.is_cancelled() {
                return Err(ClientError::Cancelled);
            }
            if self.inner.closed.is_cancelled() {
                return Ok(());
            }

            let (opened, outcome) = self.run_session(&cancel).await;

            self.inner.conn.close().await;
            self.inner.session.reset();

            if opened {
                consecutive_failures = 0;
            }

            match outcome {
                SessionOutcome::Cancelled => return Err(ClientError::Cancelled),
                SessionOutcome::Closed => {
                    info!("session closed");
                    return Ok(());
                }
                SessionOutcome::Failed(err) => {
                    error!(error = %err, "session ended");
                    consecutive_failures += 1;

                    let max = self.inner.cfg.reconnect_max_attempts;
                    if max != 0 && consecutive_failures >= max {
                        return Err(ClientError::RetriesExhausted(Box::new(err)));
                    }

                    debug!(
                        delay_secs = self.inner.cfg.reconnect_delay.as_secs_f64(),
                        "waiting before reconnect"
                    );
                    tokio::select! {
                        _ = cancel.cancelled() => return Err(ClientError::Cancelled),
                        _ = self.inner.closed.cancelled() => return Ok(()),
                        _ = sleep(self.inner.cfg.reconnect_delay) => {}
                    }
                }
            }
        }
    }

    /// Best-effort graceful shutdown.
    ///
    /// Sends CLOSE_REQ if a session is open, gives the server
    /// [`CLOSE_GRACE`] to answer with CLOSE_CONF, then drops the
    /// connection regardless. A concurrent [`run`] returns `Ok(())`.
    ///
    /// [`run`]: Client::run
    pub async fn close(&self) {
        if self.inner.session.is_open() {
            self.inner.session.set_state(SessionState::Closing);
            info!("closing session");

            let req = ctilink_proto::messages::CloseReq {
                invoke_id: self.inner.session.next_invoke_id(),
                status: 0,
            };
            if let Err(err) = self.inner.conn.send(&Message::CloseReq(req)).await {
                warn!(error = %err, "failed to send CLOSE_REQ");
            }

            sleep(CLOSE_GRACE).await;
        }

        self.inner.closed.cancel();
        self.inner.conn.close().await;
    }

    /// Requests a hold on a connection. Returns the invoke id used.
    pub async fn hold_call(
        &self,
        peripheral_id: u32,
        connection_call_id: u32,
        connection_device_id_type: u16,
        connection_device_id: &str,
    ) -> Result<u32, ClientError> {
        let invoke_id = self.inner.session.next_invoke_id();
        let req = HoldCallReq {
            invoke_id,
            peripheral_id,
            connection_call_id,
            connection_device_id_type,
            connection_device_id: connection_device_id.into(),
            ..HoldCallReq::default()
        };
        self.inner.conn.send(&Message::HoldCallReq(req)).await?;
        Ok(invoke_id)
    }

    /// Retrieves a held connection. Returns the invoke id used.
    pub async fn retrieve_call(
        &self,
        peripheral_id: u32,
        connection_call_id: u32,
        connection_device_id_type: u16,
        connection_device_id: &str,
    ) -> Result<u32, ClientError> {
        let invoke_id = self.inner.session.next_invoke_id();
        let req = RetrieveCallReq {
            invoke_id,
            peripheral_id,
            connection_call_id,
            connection_device_id_type,
            connection_device_id: connection_device_id.into(),
            ..RetrieveCallReq::default()
        };
        self.inner.conn.send(&Message::RetrieveCallReq(req)).await?;
        Ok(invoke_id)
    }

    /// Starts a consultation call from an active call. Returns the
    /// invoke id used.
    pub async fn consult_call(
        &self,
        peripheral_id: u32,
        active_connection_call_id: u32,
        active_connection_device_id: &str,
        consulted_device_id: &str,
    ) -> Result<u32, ClientError> {
        let invoke_id = self.inner.session.next_invoke_id();
        let req = ConsultCallReq {
            invoke_id,
            peripheral_id,
            active_connection_call_id,
            active_connection_device_id: active_connection_device_id.into(),
            consulted_device_id: consulted_device_id.into(),
            ..ConsultCallReq::default()
        };
        self.inner.conn.send(&Message::ConsultCallReq(req)).await?;
        Ok(invoke_id)
    }

    /// Conferences an active call with a held call. Returns the invoke
    /// id used.
    pub async fn conference_call(
        &self,
        peripheral_id: u32,
        active_connection_call_id: u32,
        held_connection_call_id: u32,
    ) -> Result<u32, ClientError> {
        let invoke_id = self.inner.session.next_invoke_id();
        let req = ConferenceCallReq {
            invoke_id,
            peripheral_id,
            active_connection_call_id,
            held_connection_call_id,
            ..ConferenceCallReq::default()
        };
        self.inner.conn.send(&Message::ConferenceCallReq(req)).await?;
        Ok(invoke_id)
    }

    /// Transfers an active call to the held party. Returns the invoke
    /// id used.
    pub async fn transfer_call(
        &self,
        peripheral_id: u32,
        active_connection_call_id: u32,
        held_connection_call_id: u32,
    ) -> Result<u32, ClientError> {
        let invoke_id = self.inner.session.next_invoke_id();
        let req = TransferCallReq {
            invoke_id,
            peripheral_id,
            active_connection_call_id,
            held_connection_call_id,
            ..TransferCallReq::default()
        };
        self.inner.conn.send(&Message::TransferCallReq(req)).await?;
        Ok(invoke_id)
    }

    /// One connect → open → dispatch cycle. Returns whether a session
    /// was opened and how the cycle ended.
    async fn run_session(&self, cancel: &CancellationToken) -> (bool, SessionOutcome) {
        let inner = &self.inner;

        // Connect.
        inner.session.set_state(SessionState::Connecting);
        let addr = inner.cfg.server_addr();
        info!(%addr, "connecting");

        let stream = tokio::select! {
            _ = cancel.cancelled() => return (false, SessionOutcome::Cancelled),
            result = timeout(CONNECT_TIMEOUT, TcpStream::connect(&addr)) => match result {
                Ok(Ok(stream)) => stream,
                Ok(Err(err)) => return (false, SessionOutcome::Failed(ClientError::Connect(err))),
                Err(_elapsed) => {
                    let err = io::Error::new(io::ErrorKind::TimedOut, "connect timed out");
                    return (false, SessionOutcome::Failed(ClientError::Connect(err)));
                }
            },
        };

        let (read_half, write_half) = stream.into_split();
        inner.conn.install(write_half).await;
        let mut framer = Framer::new(read_half);
        inner.session.set_state(SessionState::Connected);
        info!("connected");

        // Open.
        match self.open_session(cancel, &mut framer).await {
            Ok(()) => {}
            Err(outcome) => return (false, outcome),
        }

        // Steady state: heartbeat task plus dispatch loop.
        let hb_cancel = cancel.child_token();
        let mut hb_task = tokio::spawn({
            let inner = Arc::clone(&self.inner);
            let token = hb_cancel.clone();
            async move {
                let sender_inner = Arc::clone(&inner);
                heartbeat::run(
                    &inner.heartbeat,
                    inner.cfg.heartbeat_interval,
                    move || {
                        let inner = Arc::clone(&sender_inner);
                        async move { inner.send_heartbeat().await }
                    },
                    token,
                )
                .await
            }
        });

        let mut hb_finished = false;
        let outcome = loop {
            tokio::select! {
                _ = cancel.cancelled() => break SessionOutcome::Cancelled,
                _ = inner.closed.cancelled() => break SessionOutcome::Closed,

                joined = &mut hb_task => {
                    hb_finished = true;
                    match joined {
                        Ok(HeartbeatOutcome::LivenessFailure) => {
                            break SessionOutcome::Failed(ClientError::HeartbeatLiveness);
                        }
                        Ok(HeartbeatOutcome::Cancelled) => {
                            break SessionOutcome::Cancelled;
                        }
                        Err(err) => {
                            error!(error = %err, "heartbeat task panicked");
                            break SessionOutcome::Failed(ClientError::HeartbeatLiveness);
                        }
                    }
                }

                received = framer.read_message(READ_SLICE) => match received {
                    Err(ClientError::ReadTimeout) => continue,
                    Err(ClientError::Decode { type_id, len, source }) => {
                        // The frame boundary is intact; drop the message
                        // and keep dispatching.
                        warn!(
                            type_id,
                            name = types::message_type_name(type_id),
                            len,
                            error = %source,
                            "dropping undecodable message"
                        );
                        continue;
                    }
                    Err(err) => break SessionOutcome::Failed(err),

                    Ok(Message::HeartbeatConf(conf)) => {
                        inner.heartbeat.confirm(conf.invoke_id);
                    }
                    Ok(Message::CloseConf(_)) => {
                        if inner.session.state() == SessionState::Closing {
                            break SessionOutcome::Closed;
                        }
                        warn!("unsolicited CLOSE_CONF");
                        let err = io::Error::new(
                            io::ErrorKind::ConnectionAborted,
                            "server closed the session",
                        );
                        break SessionOutcome::Failed(ClientError::Transport(err));
                    }
                    Ok(Message::FailureConf(conf)) => {
                        error!(
                            invoke_id = conf.invoke_id,
                            status = conf.status,
                            status_name = types::status_name(conf.status),
                            "request failed"
                        );
                    }
                    Ok(Message::FailureEvent(event)) => {
                        error!(
                            status = event.status,
                            status_name = types::status_name(event.status),
                            "failure event"
                        );
                    }
                    Ok(msg) => {
                        debug!(name = msg.name(), "event received");
                        inner.handler.on_event(msg);
                    }
                },
            }
        };

        if !hb_finished {
            hb_cancel.cancel();
            let _ = hb_task.await;
        }

        (true, outcome)
    }

    /// Sends OPEN_REQ and waits for OPEN_CONF.
    async fn open_session<R>(
        &self,
        cancel: &CancellationToken,
        framer: &mut Framer<R>,
    ) -> Result<(), SessionOutcome>
    where
        R: tokio::io::AsyncRead + Unpin,
    {
        let inner = &self.inner;
        inner.session.set_state(SessionState::Opening);

        let invoke_id = inner.session.next_invoke_id();
        let req = OpenReq {
            invoke_id,
            version_number: PROTOCOL_VERSION,
            idle_timeout: inner.cfg.idle_timeout.as_secs() as u32,
            peripheral_id: inner.cfg.peripheral_id,
            services_requested: inner.cfg.services_requested,
            call_msg_mask: inner.cfg.call_msg_mask,
            agent_state_mask: inner.cfg.agent_state_mask,
            config_msg_mask: inner.cfg.config_msg_mask,
            client_id: inner.cfg.client_id.clone(),
            ..OpenReq::default()
        };

        if let Err(err) = inner.conn.send(&Message::OpenReq(req)).await {
            return Err(SessionOutcome::Failed(err));
        }
        info!(invoke_id, "sent OPEN_REQ");

        let deadline = Instant::now() + OPEN_TIMEOUT;
        loop {
            if cancel.is_cancelled() {
                return Err(SessionOutcome::Cancelled);
            }
            if inner.closed.is_cancelled() {
                return Err(SessionOutcome::Closed);
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(SessionOutcome::Failed(ClientError::OpenTimeout));
            }

            match framer.read_message(remaining.min(READ_SLICE)).await {
                Err(ClientError::ReadTimeout) => continue,
                Err(ClientError::Decode { type_id, len, source }) => {
                    warn!(
                        type_id,
                        len,
                        error = %source,
                        "dropping undecodable message during open"
                    );
                    continue;
                }
                Err(err) => return Err(SessionOutcome::Failed(err)),

                // The first OPEN_CONF wins regardless of its invoke id.
                Ok(Message::OpenConf(conf)) => {
                    inner.session.store_open_conf(
                        conf.monitor_id,
                        conf.services_granted,
                        conf.flt_peripheral_id,
                        conf.agent_state,
                    );
                    inner.session.set_state(SessionState::Open);
                    info!(
                        monitor_id = conf.monitor_id,
                        services_granted = format_args!("{:#x}", conf.services_granted),
                        peripheral_id = conf.flt_peripheral_id,
                        agent_state = types::agent_state_name(conf.agent_state),
                        "session opened"
                    );
                    return Ok(());
                }
                Ok(Message::FailureConf(conf)) => {
                    return Err(SessionOutcome::Failed(ClientError::OpenRejected {
                        status: conf.status,
                    }));
                }
                Ok(Message::FailureEvent(event)) => {
                    return Err(SessionOutcome::Failed(ClientError::OpenRejected {
                        status: event.status,
                    }));
                }
                Ok(other) => {
                    warn!(name = other.name(), "unexpected message during open");
                }
            }
        }
    }
}
