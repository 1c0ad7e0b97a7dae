//! Session lifecycle messages: open, heartbeat, close, and the failure
//! replies.

use crate::error::ProtocolError;
use crate::floating::{FloatingFields, FloatingWriter};
use crate::tags;
use crate::wire::{BodyReader, BodyWriter};

/// OPEN_REQ (type 3) — opens a session with the peripheral gateway.
///
/// The only request that establishes session identity. Carries the
/// protocol version, the requested idle timeout, the peripheral to bind
/// to (0 for any), a service-request bitmask, and the three
/// event-subscription bitmasks, plus floating identity credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenReq {
    /// Client-assigned id echoed in the confirmation.
    pub invoke_id: u32,
    /// Protocol version; always 24.
    pub version_number: u32,
    /// Seconds of inactivity before the server closes the session.
    pub idle_timeout: u32,
    /// Peripheral to connect to; 0 binds to any.
    pub peripheral_id: u32,
    /// Bitmask of requested services.
    pub services_requested: u32,
    /// Call events to receive.
    pub call_msg_mask: u32,
    /// Agent-state events to receive.
    pub agent_state_mask: u32,
    /// Configuration events to receive.
    pub config_msg_mask: u32,
    /// Reserved.
    pub reserved1: u32,
    /// Reserved.
    pub reserved2: u32,
    /// Reserved.
    pub reserved3: u32,

    /// Client identifier (tag 1).
    pub client_id: String,
    /// Client password (tag 2).
    pub client_password: String,
    /// Client signature (tag 28).
    pub client_signature: String,
    /// Agent's extension (tag 3).
    pub agent_extension: String,
    /// Agent's id (tag 4).
    pub agent_id: String,
    /// Agent's instrument (tag 5).
    pub agent_instrument: String,
    /// Application path id (tag 90).
    pub application_path_id: i32,
}

impl OpenReq {
    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let mut m = Self {
            invoke_id: r.read_u32(),
            version_number: r.read_u32(),
            idle_timeout: r.read_u32(),
            peripheral_id: r.read_u32(),
            services_requested: r.read_u32(),
            call_msg_mask: r.read_u32(),
            agent_state_mask: r.read_u32(),
            config_msg_mask: r.read_u32(),
            reserved1: r.read_u32(),
            reserved2: r.read_u32(),
            reserved3: r.read_u32(),
            ..Self::default()
        };
        r.check()?;

        if r.remaining() > 0 {
            let ff = FloatingFields::parse(r.rest())?;
            m.client_id = ff.first_str(tags::CLIENT_ID);
            m.client_password = ff.first_str(tags::CLIENT_PASSWORD);
            m.client_signature = ff.first_str(tags::CTI_CLIENT_SIGNATURE);
            m.agent_extension = ff.first_str(tags::AGENT_EXTENSION);
            m.agent_id = ff.first_str(tags::AGENT_ID);
            m.agent_instrument = ff.first_str(tags::AGENT_INSTRUMENT);
            m.application_path_id = ff.first_u32(tags::APPLICATION_PATH_ID) as i32;
        }

        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.write_u32(self.invoke_id);
        w.write_u32(self.version_number);
        w.write_u32(self.idle_timeout);
        w.write_u32(self.peripheral_id);
        w.write_u32(self.services_requested);
        w.write_u32(self.call_msg_mask);
        w.write_u32(self.agent_state_mask);
        w.write_u32(self.config_msg_mask);
        w.write_u32(self.reserved1);
        w.write_u32(self.reserved2);
        w.write_u32(self.reserved3);

        let mut fw = FloatingWriter::new();
        fw.put_str(tags::CLIENT_ID, &self.client_id);
        fw.put_str(tags::CLIENT_PASSWORD, &self.client_password);
        fw.put_str(tags::CTI_CLIENT_SIGNATURE, &self.client_signature);
        fw.put_str(tags::AGENT_EXTENSION, &self.agent_extension);
        fw.put_str(tags::AGENT_ID, &self.agent_id);
        fw.put_str(tags::AGENT_INSTRUMENT, &self.agent_instrument);
        fw.put_u32(tags::APPLICATION_PATH_ID, self.application_path_id as u32);

        w.write_bytes(&fw.into_bytes());
        w.into_bytes()
    }
}

/// OPEN_CONF (type 4) — the server's acceptance of OPEN_REQ.
///
/// Carries the server-assigned monitor id, the granted service bitmask,
/// peripheral-gateway status, and the current agent state. The floating
/// region may add the bound peripheral id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenConf {
    /// Echo of the OPEN_REQ invoke id.
    pub invoke_id: u32,
    /// Bitmask of granted services.
    pub services_granted: u32,
    /// Server-assigned session handle; nonzero after a successful open.
    pub monitor_id: u32,
    /// Peripheral gateway status.
    pub pg_status: u32,
    /// Central controller time.
    pub icm_central_controller_time: u32,
    /// Peripheral online status.
    pub peripheral_online: bool,
    /// Type of the bound peripheral.
    pub peripheral_type: u16,
    /// Current agent state.
    pub agent_state: u16,
    /// Department id.
    pub department_id: i32,
    /// Session type.
    pub session_type: u16,

    /// Agent's extension (tag 3).
    pub agent_extension: String,
    /// Agent's id (tag 4).
    pub agent_id: String,
    /// Agent's instrument (tag 5).
    pub agent_instrument: String,
    /// Number of configured peripherals (tag 232).
    pub num_peripherals: u16,
    /// Peripheral id actually bound (tag 6).
    pub flt_peripheral_id: u32,
    /// Multiline agent control (tag 180).
    pub multiline_agent_control: u16,
}

impl OpenConf {
    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let mut m = Self {
            invoke_id: r.read_u32(),
            services_granted: r.read_u32(),
            monitor_id: r.read_u32(),
            pg_status: r.read_u32(),
            icm_central_controller_time: r.read_u32(),
            peripheral_online: r.read_bool(),
            peripheral_type: r.read_u16(),
            agent_state: r.read_u16(),
            department_id: r.read_i32(),
            session_type: r.read_u16(),
            ..Self::default()
        };
        r.check()?;

        if r.remaining() > 0 {
            let ff = FloatingFields::parse(r.rest())?;
            m.agent_extension = ff.first_str(tags::AGENT_EXTENSION);
            m.agent_id = ff.first_str(tags::AGENT_ID);
            m.agent_instrument = ff.first_str(tags::AGENT_INSTRUMENT);
            m.num_peripherals = ff.first_u16(tags::NUM_PERIPHERALS);
            m.flt_peripheral_id = ff.first_u32(tags::PERIPHERAL_ID);
            m.multiline_agent_control = ff.first_u16(tags::MULTILINE_AGENT_CONTROL);
        }

        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.write_u32(self.invoke_id);
        w.write_u32(self.services_granted);
        w.write_u32(self.monitor_id);
        w.write_u32(self.pg_status);
        w.write_u32(self.icm_central_controller_time);
        w.write_bool(self.peripheral_online);
        w.write_u16(self.peripheral_type);
        w.write_u16(self.agent_state);
        w.write_i32(self.department_id);
        w.write_u16(self.session_type);

        let mut fw = FloatingWriter::new();
        fw.put_str(tags::AGENT_EXTENSION, &self.agent_extension);
        fw.put_str(tags::AGENT_ID, &self.agent_id);
        fw.put_str(tags::AGENT_INSTRUMENT, &self.agent_instrument);
        fw.put_u16(tags::NUM_PERIPHERALS, self.num_peripherals);
        fw.put_u32(tags::PERIPHERAL_ID, self.flt_peripheral_id);
        fw.put_u16(tags::MULTILINE_AGENT_CONTROL, self.multiline_agent_control);

        w.write_bytes(&fw.into_bytes());
        w.into_bytes()
    }
}

/// HEARTBEAT_REQ (type 5) — client keepalive; carries only an invoke id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeartbeatReq {
    /// Client-assigned id echoed in the confirmation.
    pub invoke_id: u32,
}

impl HeartbeatReq {
    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let m = Self { invoke_id: r.read_u32() };
        r.check()?;
        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.write_u32(self.invoke_id);
        w.into_bytes()
    }
}

/// HEARTBEAT_CONF (type 6) — confirms a heartbeat by invoke id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeartbeatConf {
    /// Echo of the HEARTBEAT_REQ invoke id.
    pub invoke_id: u32,
}

impl HeartbeatConf {
    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let m = Self { invoke_id: r.read_u32() };
        r.check()?;
        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.write_u32(self.invoke_id);
        w.into_bytes()
    }
}

/// CLOSE_REQ (type 7) — asks the server to end the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloseReq {
    /// Client-assigned request id.
    pub invoke_id: u32,
    /// Reason for closing; 0 for a normal shutdown.
    pub status: u32,
}

impl CloseReq {
    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let m = Self {
            invoke_id: r.read_u32(),
            status: r.read_u32(),
        };
        r.check()?;
        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.write_u32(self.invoke_id);
        w.write_u32(self.status);
        w.into_bytes()
    }
}

/// CLOSE_CONF (type 8) — confirms session close.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloseConf {
    /// Echo of the CLOSE_REQ invoke id.
    pub invoke_id: u32,
}

impl CloseConf {
    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let m = Self { invoke_id: r.read_u32() };
        r.check()?;
        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.write_u32(self.invoke_id);
        w.into_bytes()
    }
}

/// FAILURE_CONF (type 1) — a request identified by invoke id failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FailureConf {
    /// Invoke id of the failed request.
    pub invoke_id: u32,
    /// Error status code.
    pub status: u32,
}

impl FailureConf {
    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let m = Self {
            invoke_id: r.read_u32(),
            status: r.read_u32(),
        };
        r.check()?;
        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.write_u32(self.invoke_id);
        w.write_u32(self.status);
        w.into_bytes()
    }
}

/// FAILURE_EVENT (type 2) — unsolicited error notification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FailureEvent {
    /// Error status code.
    pub status: u32,
}

impl FailureEvent {
    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let m = Self { status: r.read_u32() };
        r.check()?;
        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.write_u32(self.status);
        w.into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{encode_message, HEADER_LEN};
    use crate::messages::Message;
    use crate::types;

    #[test]
    fn open_req_round_trip() {
        let req = OpenReq {
            invoke_id: 17,
            version_number: types::PROTOCOL_VERSION,
            idle_timeout: 120,
            peripheral_id: 5001,
            services_requested: 0x11,
            call_msg_mask: u32::MAX,
            agent_state_mask: u32::MAX,
            config_msg_mask: u32::MAX,
            client_id: "CTIService".into(),
            client_password: "secret".into(),
            agent_id: "1001".into(),
            application_path_id: -3,
            ..OpenReq::default()
        };

        let back = OpenReq::decode(&req.encode_body()).unwrap();
        assert_eq!(back, req);
    }

    #[test]
    fn open_req_wire_layout_is_bit_exact() {
        // 44-byte fixed region plus one floating field:
        // tag(2) + length(2) + "CTIService\0"(11) = 59 = 0x3B.
        let req = OpenReq {
            invoke_id: 1,
            version_number: 24,
            idle_timeout: 120,
            peripheral_id: 0,
            services_requested: 0x11,
            call_msg_mask: 0xFFFF_FFFF,
            agent_state_mask: 0xFFFF_FFFF,
            config_msg_mask: 0xFFFF_FFFF,
            client_id: "CTIService".into(),
            ..OpenReq::default()
        };

        let body = req.encode_body();
        assert_eq!(body.len(), 59);

        let wire = encode_message(&Message::OpenReq(req)).unwrap();
        assert_eq!(
            &wire[..HEADER_LEN],
            &[0x00, 0x00, 0x00, 0x3B, 0x00, 0x00, 0x00, 0x03]
        );
        assert_eq!(wire.len(), HEADER_LEN + 59);

        // Fixed region spot checks: version at offset 4, services at 16.
        assert_eq!(&wire[HEADER_LEN + 4..HEADER_LEN + 8], &24u32.to_be_bytes());
        assert_eq!(&wire[HEADER_LEN + 16..HEADER_LEN + 20], &0x11u32.to_be_bytes());
        // Floating region: tag 1, length 11, NUL-terminated client id.
        assert_eq!(&wire[HEADER_LEN + 44..HEADER_LEN + 48], &[0, 1, 0, 11]);
        assert_eq!(&wire[HEADER_LEN + 48..HEADER_LEN + 58], b"CTIService");
        assert_eq!(wire[HEADER_LEN + 58], 0);
    }

    #[test]
    fn open_conf_decodes_identity_fields() {
        let conf = OpenConf {
            invoke_id: 1,
            services_granted: 0x11,
            monitor_id: 42,
            peripheral_online: true,
            peripheral_type: types::PERIPHERAL_TYPE_ACD,
            agent_state: types::AGENT_STATE_NOT_READY,
            department_id: -1,
            flt_peripheral_id: 5001,
            num_peripherals: 2,
            agent_id: "1001".into(),
            ..OpenConf::default()
        };

        let back = OpenConf::decode(&conf.encode_body()).unwrap();
        assert_eq!(back, conf);
        assert_eq!(back.monitor_id, 42);
        assert_eq!(back.flt_peripheral_id, 5001);
    }

    #[test]
    fn heartbeat_is_invoke_id_only() {
        let req = HeartbeatReq { invoke_id: 99 };
        let body = req.encode_body();
        assert_eq!(body, 99u32.to_be_bytes());
        assert_eq!(HeartbeatConf::decode(&body).unwrap().invoke_id, 99);
    }

    #[test]
    fn failure_messages_round_trip() {
        let conf = FailureConf { invoke_id: 12, status: types::STATUS_INVALID_SESSION };
        assert_eq!(FailureConf::decode(&conf.encode_body()).unwrap(), conf);

        let event = FailureEvent { status: types::STATUS_PROTOCOL_ERROR };
        assert_eq!(FailureEvent::decode(&event.encode_body()).unwrap(), event);
    }

    #[test]
    fn truncated_fixed_region_is_an_error() {
        assert!(OpenConf::decode(&[0u8; 10]).is_err());
        assert!(HeartbeatReq::decode(&[0u8; 2]).is_err());
    }
}
