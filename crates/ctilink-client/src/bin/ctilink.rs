//! CTI gateway client daemon.
//!
//! Loads configuration from `CTILINK_*` environment variables, connects
//! to the gateway, and logs every telephony event it receives. SIGINT or
//! SIGTERM triggers a graceful close; exit code 0 means a clean
//! shutdown, 1 a configuration or fatal run-loop error.

use std::process::ExitCode;

use ctilink_client::{Client, ClientConfig, ClientError};
use ctilink_proto::Message;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn log_event(msg: Message) {
    match &msg {
        Message::AgentState(event) => info!(
            agent_id = %event.agent_id,
            state = event.state_name(),
            reason = event.event_reason_code,
            "agent state"
        ),
        Message::System(event) => info!(
            event = event.event_name(),
            pg_status = event.pg_status,
            "system event"
        ),
        Message::Generic(generic) => info!(
            type_id = generic.type_id,
            len = generic.body.len(),
            "unknown message"
        ),
        other => info!(name = other.name(), "event"),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cfg = match ClientConfig::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = cfg.validate() {
        eprintln!("invalid configuration: {err}");
        return ExitCode::FAILURE;
    }

    let filter = EnvFilter::try_from_env("CTILINK_LOG")
        .unwrap_or_else(|_| EnvFilter::new(cfg.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(
        host = %cfg.server_host,
        port = cfg.server_port,
        client_id = %cfg.client_id,
        "starting ctilink"
    );

    let cancel = CancellationToken::new();
    let client = Client::new(cfg, log_event);

    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            shutdown_signal().await;
            info!("shutdown signal received");
            cancel.cancel();
        }
    });

    match client.run(cancel.clone()).await {
        Ok(()) | Err(ClientError::Cancelled) => {
            info!("ctilink stopped");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "client failed");
            ExitCode::FAILURE
        }
    }
}

async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut term = match signal(SignalKind::terminate()) {
        Ok(term) => term,
        Err(err) => {
            error!(error = %err, "cannot install SIGTERM handler");
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = term.recv() => {}
    }
}
