//! Client configuration: defaults, environment loading, validation.

use std::env;
use std::time::Duration;

use ctilink_proto::types::ServiceMask;
use thiserror::Error;

/// Configuration for a [`Client`](crate::client::Client).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// DNS name or IP literal of the gateway.
    pub server_host: String,
    /// TCP port of the gateway.
    pub server_port: u16,

    /// Client identifier sent as floating tag 1 in OPEN_REQ.
    pub client_id: String,
    /// Peripheral to bind to; 0 binds to any.
    pub peripheral_id: u32,
    /// Bitmask of capabilities to request.
    pub services_requested: u32,
    /// Server-side inactivity timeout requested in OPEN_REQ.
    pub idle_timeout: Duration,

    /// Call events to subscribe to.
    pub call_msg_mask: u32,
    /// Agent-state events to subscribe to.
    pub agent_state_mask: u32,
    /// Configuration events to subscribe to.
    pub config_msg_mask: u32,

    /// Heartbeat tick period.
    pub heartbeat_interval: Duration,

    /// Pause between reconnect attempts.
    pub reconnect_delay: Duration,
    /// Maximum consecutive failed attempts; 0 means unlimited.
    pub reconnect_max_attempts: u32,

    /// Diagnostic log level filter.
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_host: "localhost".into(),
            server_port: 42027,
            client_id: "CTIService".into(),
            peripheral_id: 0,
            services_requested: (ServiceMask::ALL_EVENTS | ServiceMask::CLIENT_EVENTS)
                .bits(),
            idle_timeout: Duration::from_secs(120),
            call_msg_mask: u32::MAX,
            agent_state_mask: u32::MAX,
            config_msg_mask: u32::MAX,
            heartbeat_interval: Duration::from_secs(30),
            reconnect_delay: Duration::from_secs(10),
            reconnect_max_attempts: 0,
            log_level: "info".into(),
        }
    }
}

/// A configuration value that could not be accepted.
///
/// Raised before any connection attempt; the process exits rather than
/// run with a surprising setup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable held an unparseable value.
    #[error("invalid value for {name}: {value:?}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// The offending value.
        value: String,
    },

    /// The server host is empty.
    #[error("server host is required")]
    EmptyHost,

    /// The server port is zero.
    #[error("server port must be nonzero")]
    ZeroPort,

    /// The heartbeat interval is below one second.
    #[error("heartbeat interval too short: {0:?}")]
    HeartbeatTooShort(Duration),

    /// The idle timeout does not cover four heartbeat intervals.
    #[error("idle timeout {idle:?} must be at least 4x heartbeat interval {heartbeat:?}")]
    IdleTimeoutTooShort {
        /// Configured idle timeout.
        idle: Duration,
        /// Configured heartbeat interval.
        heartbeat: Duration,
    },
}

impl ClientConfig {
    /// Loads configuration from `CTILINK_*` environment variables, with
    /// defaults for anything unset.
    ///
    /// Durations are integer seconds; masks accept decimal or `0x` hex.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut cfg = Self::default();

        if let Some(v) = read_var("CTILINK_SERVER_HOST") {
            cfg.server_host = v;
        }
        if let Some(v) = read_var("CTILINK_SERVER_PORT") {
            cfg.server_port = parse(&v, "CTILINK_SERVER_PORT")?;
        }
        if let Some(v) = read_var("CTILINK_CLIENT_ID") {
            cfg.client_id = v;
        }
        if let Some(v) = read_var("CTILINK_PERIPHERAL_ID") {
            cfg.peripheral_id = parse(&v, "CTILINK_PERIPHERAL_ID")?;
        }
        if let Some(v) = read_var("CTILINK_SERVICES_REQUESTED") {
            cfg.services_requested = parse_mask(&v, "CTILINK_SERVICES_REQUESTED")?;
        }
        if let Some(v) = read_var("CTILINK_CALL_MSG_MASK") {
            cfg.call_msg_mask = parse_mask(&v, "CTILINK_CALL_MSG_MASK")?;
        }
        if let Some(v) = read_var("CTILINK_AGENT_STATE_MASK") {
            cfg.agent_state_mask = parse_mask(&v, "CTILINK_AGENT_STATE_MASK")?;
        }
        if let Some(v) = read_var("CTILINK_CONFIG_MSG_MASK") {
            cfg.config_msg_mask = parse_mask(&v, "CTILINK_CONFIG_MSG_MASK")?;
        }
        if let Some(v) = read_var("CTILINK_IDLE_TIMEOUT_SECS") {
            cfg.idle_timeout = Duration::from_secs(parse(&v, "CTILINK_IDLE_TIMEOUT_SECS")?);
        }
        if let Some(v) = read_var("CTILINK_HEARTBEAT_INTERVAL_SECS") {
            cfg.heartbeat_interval =
                Duration::from_secs(parse(&v, "CTILINK_HEARTBEAT_INTERVAL_SECS")?);
        }
        if let Some(v) = read_var("CTILINK_RECONNECT_DELAY_SECS") {
            cfg.reconnect_delay =
                Duration::from_secs(parse(&v, "CTILINK_RECONNECT_DELAY_SECS")?);
        }
        if let Some(v) = read_var("CTILINK_RECONNECT_MAX_ATTEMPTS") {
            cfg.reconnect_max_attempts = parse(&v, "CTILINK_RECONNECT_MAX_ATTEMPTS")?;
        }
        if let Some(v) = read_var("CTILINK_LOG_LEVEL") {
            cfg.log_level = v;
        }

        Ok(cfg)
    }

    /// Checks the invariants the engine depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server_host.is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        if self.server_port == 0 {
            return Err(ConfigError::ZeroPort);
        }
        if self.heartbeat_interval < Duration::from_secs(1) {
            return Err(ConfigError::HeartbeatTooShort(self.heartbeat_interval));
        }
        if self.idle_timeout < self.heartbeat_interval * 4 {
            return Err(ConfigError::IdleTimeoutTooShort {
                idle: self.idle_timeout,
                heartbeat: self.heartbeat_interval,
            });
        }
        Ok(())
    }

    /// `host:port` string for dialing.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn read_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

fn parse<T: std::str::FromStr>(value: &str, name: &'static str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}

fn parse_mask(value: &str, name: &'static str) -> Result<u32, ConfigError> {
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_protocol_expectations() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.server_host, "localhost");
        assert_eq!(cfg.server_port, 42027);
        assert_eq!(cfg.client_id, "CTIService");
        assert_eq!(cfg.services_requested, 0x11);
        assert_eq!(cfg.call_msg_mask, u32::MAX);
        assert_eq!(cfg.idle_timeout, Duration::from_secs(120));
        assert_eq!(cfg.heartbeat_interval, Duration::from_secs(30));
        assert_eq!(cfg.reconnect_max_attempts, 0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut cfg = ClientConfig {
            server_host: String::new(),
            ..ClientConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::EmptyHost));

        cfg.server_host = "gw".into();
        cfg.server_port = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroPort));

        cfg.server_port = 42027;
        cfg.heartbeat_interval = Duration::from_millis(200);
        assert!(matches!(cfg.validate(), Err(ConfigError::HeartbeatTooShort(_))));

        cfg.heartbeat_interval = Duration::from_secs(60);
        cfg.idle_timeout = Duration::from_secs(120);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::IdleTimeoutTooShort { .. })
        ));
    }

    #[test]
    fn mask_parsing_accepts_hex_and_decimal() {
        assert_eq!(parse_mask("0x11", "m").unwrap(), 0x11);
        assert_eq!(parse_mask("0XFF", "m").unwrap(), 0xFF);
        assert_eq!(parse_mask("4294967295", "m").unwrap(), u32::MAX);
        assert!(parse_mask("banana", "m").is_err());
    }

    #[test]
    fn server_addr_formats_host_and_port() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.server_addr(), "localhost:42027");
    }
}
