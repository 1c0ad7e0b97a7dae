//! Protocol constants: message type ids, subscription masks, and the
//! enumerated values carried in fixed regions.
//!
//! Numeric families keep their raw wire types (`u16`/`u32` constants) with
//! a `*_name` helper for diagnostics; rejecting an out-of-dictionary value
//! would break forward compatibility, so nothing here is a closed enum.
//! The subscription masks are proper [`bitflags`] types because they are
//! composed by configuration.

use bitflags::bitflags;

/// Protocol version negotiated in OPEN_REQ.
pub const PROTOCOL_VERSION: u32 = 24;

// Message type ids.

/// FAILURE_CONF — a request failed.
pub const MSG_FAILURE_CONF: u32 = 1;
/// FAILURE_EVENT — unsolicited error notification.
pub const MSG_FAILURE_EVENT: u32 = 2;
/// OPEN_REQ — open a session.
pub const MSG_OPEN_REQ: u32 = 3;
/// OPEN_CONF — session opened.
pub const MSG_OPEN_CONF: u32 = 4;
/// HEARTBEAT_REQ — client keepalive.
pub const MSG_HEARTBEAT_REQ: u32 = 5;
/// HEARTBEAT_CONF — keepalive confirmation.
pub const MSG_HEARTBEAT_CONF: u32 = 6;
/// CLOSE_REQ — close the session.
pub const MSG_CLOSE_REQ: u32 = 7;
/// CLOSE_CONF — session closed.
pub const MSG_CLOSE_CONF: u32 = 8;
/// CALL_DELIVERED_EVENT.
pub const MSG_CALL_DELIVERED_EVENT: u32 = 9;
/// CALL_ESTABLISHED_EVENT.
pub const MSG_CALL_ESTABLISHED_EVENT: u32 = 10;
/// CALL_HELD_EVENT.
pub const MSG_CALL_HELD_EVENT: u32 = 11;
/// CALL_RETRIEVED_EVENT.
pub const MSG_CALL_RETRIEVED_EVENT: u32 = 12;
/// CALL_CLEARED_EVENT.
pub const MSG_CALL_CLEARED_EVENT: u32 = 13;
/// CALL_CONNECTION_CLEARED_EVENT.
pub const MSG_CALL_CONNECTION_CLEARED_EVENT: u32 = 14;
/// CALL_ORIGINATED_EVENT.
pub const MSG_CALL_ORIGINATED_EVENT: u32 = 15;
/// CALL_FAILED_EVENT.
pub const MSG_CALL_FAILED_EVENT: u32 = 16;
/// CALL_CONFERENCED_EVENT.
pub const MSG_CALL_CONFERENCED_EVENT: u32 = 17;
/// CALL_TRANSFERRED_EVENT.
pub const MSG_CALL_TRANSFERRED_EVENT: u32 = 18;
/// CALL_DIVERTED_EVENT.
pub const MSG_CALL_DIVERTED_EVENT: u32 = 19;
/// CALL_SERVICE_INITIATED_EVENT.
pub const MSG_CALL_SERVICE_INITIATED_EVENT: u32 = 20;
/// CALL_QUEUED_EVENT.
pub const MSG_CALL_QUEUED_EVENT: u32 = 21;
/// BEGIN_CALL_EVENT.
pub const MSG_BEGIN_CALL_EVENT: u32 = 23;
/// END_CALL_EVENT.
pub const MSG_END_CALL_EVENT: u32 = 24;
/// CALL_DATA_UPDATE_EVENT.
pub const MSG_CALL_DATA_UPDATE_EVENT: u32 = 25;
/// AGENT_STATE_EVENT.
pub const MSG_AGENT_STATE_EVENT: u32 = 30;
/// SYSTEM_EVENT.
pub const MSG_SYSTEM_EVENT: u32 = 31;
/// CONFERENCE_CALL_REQ.
pub const MSG_CONFERENCE_CALL_REQ: u32 = 48;
/// CONFERENCE_CALL_CONF.
pub const MSG_CONFERENCE_CALL_CONF: u32 = 49;
/// CONSULT_CALL_REQ.
pub const MSG_CONSULT_CALL_REQ: u32 = 50;
/// CONSULT_CALL_CONF.
pub const MSG_CONSULT_CALL_CONF: u32 = 51;
/// HOLD_CALL_REQ.
pub const MSG_HOLD_CALL_REQ: u32 = 54;
/// HOLD_CALL_CONF.
pub const MSG_HOLD_CALL_CONF: u32 = 55;
/// RETRIEVE_CALL_REQ.
pub const MSG_RETRIEVE_CALL_REQ: u32 = 62;
/// RETRIEVE_CALL_CONF.
pub const MSG_RETRIEVE_CALL_CONF: u32 = 63;
/// TRANSFER_CALL_REQ.
pub const MSG_TRANSFER_CALL_REQ: u32 = 64;
/// TRANSFER_CALL_CONF.
pub const MSG_TRANSFER_CALL_CONF: u32 = 65;
/// CALL_DEQUEUED_EVENT.
pub const MSG_CALL_DEQUEUED_EVENT: u32 = 86;
/// AGENT_PRE_CALL_EVENT.
pub const MSG_AGENT_PRE_CALL_EVENT: u32 = 87;
/// AGENT_PRE_CALL_ABORT_EVENT.
pub const MSG_AGENT_PRE_CALL_ABORT_EVENT: u32 = 88;
/// RTP_STARTED_EVENT.
pub const MSG_RTP_STARTED_EVENT: u32 = 116;
/// RTP_STOPPED_EVENT.
pub const MSG_RTP_STOPPED_EVENT: u32 = 117;
/// SUPERVISOR_ASSIST_EVENT.
pub const MSG_SUPERVISOR_ASSIST_EVENT: u32 = 120;
/// CONFIG_REQUEST_EVENT.
pub const MSG_CONFIG_REQUEST_EVENT: u32 = 232;
/// CONFIG_BEGIN_EVENT.
pub const MSG_CONFIG_BEGIN_EVENT: u32 = 233;
/// CONFIG_END_EVENT.
pub const MSG_CONFIG_END_EVENT: u32 = 234;
/// CONFIG_CSQ_EVENT.
pub const MSG_CONFIG_CSQ_EVENT: u32 = 236;
/// CONFIG_AGENT_EVENT.
pub const MSG_CONFIG_AGENT_EVENT: u32 = 237;
/// CONFIG_DEVICE_EVENT.
pub const MSG_CONFIG_DEVICE_EVENT: u32 = 238;

/// Human-readable name for a message type id.
///
/// Ids outside the dictionary return `"UNKNOWN"`; callers log the numeric
/// id alongside.
pub fn message_type_name(type_id: u32) -> &'static str {
    match type_id {
        MSG_FAILURE_CONF => "FAILURE_CONF",
        MSG_FAILURE_EVENT => "FAILURE_EVENT",
        MSG_OPEN_REQ => "OPEN_REQ",
        MSG_OPEN_CONF => "OPEN_CONF",
        MSG_HEARTBEAT_REQ => "HEARTBEAT_REQ",
        MSG_HEARTBEAT_CONF => "HEARTBEAT_CONF",
        MSG_CLOSE_REQ => "CLOSE_REQ",
        MSG_CLOSE_CONF => "CLOSE_CONF",
        MSG_CALL_DELIVERED_EVENT => "CALL_DELIVERED_EVENT",
        MSG_CALL_ESTABLISHED_EVENT => "CALL_ESTABLISHED_EVENT",
        MSG_CALL_HELD_EVENT => "CALL_HELD_EVENT",
        MSG_CALL_RETRIEVED_EVENT => "CALL_RETRIEVED_EVENT",
        MSG_CALL_CLEARED_EVENT => "CALL_CLEARED_EVENT",
        MSG_CALL_CONNECTION_CLEARED_EVENT => "CALL_CONNECTION_CLEARED_EVENT",
        MSG_CALL_ORIGINATED_EVENT => "CALL_ORIGINATED_EVENT",
        MSG_CALL_FAILED_EVENT => "CALL_FAILED_EVENT",
        MSG_CALL_CONFERENCED_EVENT => "CALL_CONFERENCED_EVENT",
        MSG_CALL_TRANSFERRED_EVENT => "CALL_TRANSFERRED_EVENT",
        MSG_CALL_DIVERTED_EVENT => "CALL_DIVERTED_EVENT",
        MSG_CALL_SERVICE_INITIATED_EVENT => "CALL_SERVICE_INITIATED_EVENT",
        MSG_CALL_QUEUED_EVENT => "CALL_QUEUED_EVENT",
        MSG_BEGIN_CALL_EVENT => "BEGIN_CALL_EVENT",
        MSG_END_CALL_EVENT => "END_CALL_EVENT",
        MSG_CALL_DATA_UPDATE_EVENT => "CALL_DATA_UPDATE_EVENT",
        MSG_AGENT_STATE_EVENT => "AGENT_STATE_EVENT",
        MSG_SYSTEM_EVENT => "SYSTEM_EVENT",
        MSG_CONFERENCE_CALL_REQ => "CONFERENCE_CALL_REQ",
        MSG_CONFERENCE_CALL_CONF => "CONFERENCE_CALL_CONF",
        MSG_CONSULT_CALL_REQ => "CONSULT_CALL_REQ",
        MSG_CONSULT_CALL_CONF => "CONSULT_CALL_CONF",
        MSG_HOLD_CALL_REQ => "HOLD_CALL_REQ",
        MSG_HOLD_CALL_CONF => "HOLD_CALL_CONF",
        MSG_RETRIEVE_CALL_REQ => "RETRIEVE_CALL_REQ",
        MSG_RETRIEVE_CALL_CONF => "RETRIEVE_CALL_CONF",
        MSG_TRANSFER_CALL_REQ => "TRANSFER_CALL_REQ",
        MSG_TRANSFER_CALL_CONF => "TRANSFER_CALL_CONF",
        MSG_CALL_DEQUEUED_EVENT => "CALL_DEQUEUED_EVENT",
        MSG_AGENT_PRE_CALL_EVENT => "AGENT_PRE_CALL_EVENT",
        MSG_AGENT_PRE_CALL_ABORT_EVENT => "AGENT_PRE_CALL_ABORT_EVENT",
        MSG_RTP_STARTED_EVENT => "RTP_STARTED_EVENT",
        MSG_RTP_STOPPED_EVENT => "RTP_STOPPED_EVENT",
        MSG_SUPERVISOR_ASSIST_EVENT => "SUPERVISOR_ASSIST_EVENT",
        MSG_CONFIG_REQUEST_EVENT => "CONFIG_REQUEST_EVENT",
        MSG_CONFIG_BEGIN_EVENT => "CONFIG_BEGIN_EVENT",
        MSG_CONFIG_END_EVENT => "CONFIG_END_EVENT",
        MSG_CONFIG_CSQ_EVENT => "CONFIG_CSQ_EVENT",
        MSG_CONFIG_AGENT_EVENT => "CONFIG_AGENT_EVENT",
        MSG_CONFIG_DEVICE_EVENT => "CONFIG_DEVICE_EVENT",
        _ => "UNKNOWN",
    }
}

bitflags! {
    /// Capabilities requested in OPEN_REQ (`ServicesRequested`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ServiceMask: u32 {
        /// Agent mode — events for the client's own device.
        const CLIENT_EVENTS = 0x0000_0001;
        /// Call-control capabilities.
        const CALL_CONTROL = 0x0000_0002;
        /// Bridge mode — events for every device on the peripheral.
        const ALL_EVENTS = 0x0000_0010;
        /// Supervisor capabilities.
        const SUPERVISOR = 0x0000_0020;
    }
}

bitflags! {
    /// Call events subscribed to in OPEN_REQ (`CallMsgMask`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CallEventMask: u32 {
        /// CALL_DELIVERED_EVENT.
        const DELIVERED = 0x0000_0001;
        /// CALL_ESTABLISHED_EVENT.
        const ESTABLISHED = 0x0000_0002;
        /// CALL_HELD_EVENT.
        const HELD = 0x0000_0004;
        /// CALL_RETRIEVED_EVENT.
        const RETRIEVED = 0x0000_0008;
        /// CALL_CLEARED_EVENT.
        const CLEARED = 0x0000_0010;
        /// CALL_CONNECTION_CLEARED_EVENT.
        const CONNECTION_CLEARED = 0x0000_0020;
        /// CALL_ORIGINATED_EVENT.
        const ORIGINATED = 0x0000_0040;
        /// CALL_FAILED_EVENT.
        const FAILED = 0x0000_0080;
        /// CALL_CONFERENCED_EVENT.
        const CONFERENCED = 0x0000_0100;
        /// CALL_TRANSFERRED_EVENT.
        const TRANSFERRED = 0x0000_0200;
        /// CALL_DIVERTED_EVENT.
        const DIVERTED = 0x0000_0400;
        /// CALL_SERVICE_INITIATED_EVENT.
        const SERVICE_INITIATED = 0x0000_0800;
        /// CALL_QUEUED_EVENT.
        const QUEUED = 0x0000_1000;
        /// CALL_DEQUEUED_EVENT.
        const DEQUEUED = 0x0000_2000;
        /// BEGIN_CALL_EVENT.
        const BEGIN_CALL = 0x0000_4000;
        /// END_CALL_EVENT.
        const END_CALL = 0x0000_8000;
        /// CALL_DATA_UPDATE_EVENT.
        const DATA_UPDATE = 0x0001_0000;
        /// AGENT_PRE_CALL_EVENT.
        const AGENT_PRE_CALL = 0x0002_0000;
        /// AGENT_PRE_CALL_ABORT_EVENT.
        const AGENT_PRE_CALL_ABORT = 0x0004_0000;

        // Servers are free to define further bits; keep them when composing.
        const _ = !0;
    }
}

bitflags! {
    /// Agent-state events subscribed to in OPEN_REQ (`AgentStateMask`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AgentStateMask: u32 {
        /// AGENT_STATE_EVENT.
        const STATE_CHANGE = 0x0000_0001;

        const _ = !0;
    }
}

bitflags! {
    /// Configuration events subscribed to in OPEN_REQ (`ConfigMsgMask`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ConfigEventMask: u32 {
        /// CONFIG_AGENT_EVENT.
        const AGENT = 0x0000_0001;
        /// CONFIG_DEVICE_EVENT.
        const DEVICE = 0x0000_0002;
        /// CONFIG_CSQ_EVENT.
        const CSQ = 0x0000_0004;
        /// Config service events.
        const SERVICE = 0x0000_0008;
        /// CONFIG_BEGIN_EVENT / CONFIG_END_EVENT framing.
        const BEGIN_END = 0x0000_0010;

        const _ = !0;
    }
}

// Agent states (USHORT).

/// Agent is logged out.
pub const AGENT_STATE_LOGGED_OUT: u16 = 0;
/// Agent is logged in.
pub const AGENT_STATE_LOGGED_IN: u16 = 1;
/// Agent is not ready for calls.
pub const AGENT_STATE_NOT_READY: u16 = 2;
/// Agent is ready for calls.
pub const AGENT_STATE_READY: u16 = 3;
/// Agent is on a call.
pub const AGENT_STATE_TALKING: u16 = 4;
/// Agent is in after-call work, not ready.
pub const AGENT_STATE_WORK_NOT_READY: u16 = 5;
/// Agent is in after-call work, ready.
pub const AGENT_STATE_WORK_READY: u16 = 6;
/// Agent has a call on hold.
pub const AGENT_STATE_HOLD: u16 = 7;
/// Agent is reserved for a routed call.
pub const AGENT_STATE_RESERVED: u16 = 8;
/// State not known to the peripheral.
pub const AGENT_STATE_UNKNOWN: u16 = 9;

/// Human-readable name for an agent state.
pub fn agent_state_name(state: u16) -> &'static str {
    match state {
        AGENT_STATE_LOGGED_OUT => "LoggedOut",
        AGENT_STATE_LOGGED_IN => "LoggedIn",
        AGENT_STATE_NOT_READY => "NotReady",
        AGENT_STATE_READY => "Ready",
        AGENT_STATE_TALKING => "Talking",
        AGENT_STATE_WORK_NOT_READY => "WorkNotReady",
        AGENT_STATE_WORK_READY => "WorkReady",
        AGENT_STATE_HOLD => "Hold",
        AGENT_STATE_RESERVED => "Reserved",
        _ => "Unknown",
    }
}

// Local connection states (USHORT).

/// No connection.
pub const CONNECTION_STATE_NULL: u16 = 0;
/// Connection is being initiated.
pub const CONNECTION_STATE_INITIATED: u16 = 1;
/// Device is alerting.
pub const CONNECTION_STATE_ALERTING: u16 = 2;
/// Parties are connected.
pub const CONNECTION_STATE_CONNECTED: u16 = 3;
/// Connection is held.
pub const CONNECTION_STATE_HELD: u16 = 4;
/// Call is queued.
pub const CONNECTION_STATE_QUEUED: u16 = 5;
/// Connection failed.
pub const CONNECTION_STATE_FAILED: u16 = 6;

/// Human-readable name for a local connection state.
pub fn connection_state_name(state: u16) -> &'static str {
    match state {
        CONNECTION_STATE_NULL => "Null",
        CONNECTION_STATE_INITIATED => "Initiated",
        CONNECTION_STATE_ALERTING => "Alerting",
        CONNECTION_STATE_CONNECTED => "Connected",
        CONNECTION_STATE_HELD => "Held",
        CONNECTION_STATE_QUEUED => "Queued",
        CONNECTION_STATE_FAILED => "Failed",
        _ => "Unknown",
    }
}

// Connection device id types (USHORT).

/// Dynamic device id.
pub const DEVICE_ID_TYPE_DYNAMIC: u16 = 0;
/// Static device id.
pub const DEVICE_ID_TYPE_STATIC: u16 = 1;
/// External device id.
pub const DEVICE_ID_TYPE_EXTERNAL: u16 = 2;

// Call types (USHORT).

/// Inbound ACD call.
pub const CALL_TYPE_INBOUND: u16 = 1;
/// Outbound call.
pub const CALL_TYPE_OUTBOUND: u16 = 2;
/// Private outbound call.
pub const CALL_TYPE_OUTBOUND_PRIVATE: u16 = 3;
/// Internal call.
pub const CALL_TYPE_INTERNAL: u16 = 4;

// Peripheral types (USHORT).

/// Automatic call distributor.
pub const PERIPHERAL_TYPE_ACD: u16 = 1;
/// Private branch exchange.
pub const PERIPHERAL_TYPE_PBX: u16 = 2;
/// Voice response unit.
pub const PERIPHERAL_TYPE_VRU: u16 = 3;
/// Voice mail system.
pub const PERIPHERAL_TYPE_VOICE_MAIL: u16 = 4;

// System event ids (UINT).

/// Central controller came online.
pub const SYSTEM_EVENT_CENTRAL_CONTROLLER_ONLINE: u32 = 1;
/// Central controller went offline.
pub const SYSTEM_EVENT_CENTRAL_CONTROLLER_OFFLINE: u32 = 2;
/// Peripheral came online.
pub const SYSTEM_EVENT_PERIPHERAL_ONLINE: u32 = 3;
/// Peripheral went offline.
pub const SYSTEM_EVENT_PERIPHERAL_OFFLINE: u32 = 4;
/// CTI server went offline.
pub const SYSTEM_EVENT_CTI_SERVER_OFFLINE: u32 = 5;
/// CTI server came online.
pub const SYSTEM_EVENT_CTI_SERVER_ONLINE: u32 = 6;
/// Half-hour boundary.
pub const SYSTEM_EVENT_HALF_HOUR_CHANGE: u32 = 7;
/// An instrument went out of service.
pub const SYSTEM_EVENT_INSTRUMENT_OUT_OF_SERVICE: u32 = 8;
/// An instrument came back in service.
pub const SYSTEM_EVENT_INSTRUMENT_BACK_IN_SERVICE: u32 = 9;

/// Human-readable name for a system event id.
pub fn system_event_name(event_id: u32) -> &'static str {
    match event_id {
        SYSTEM_EVENT_CENTRAL_CONTROLLER_ONLINE => "CentralControllerOnline",
        SYSTEM_EVENT_CENTRAL_CONTROLLER_OFFLINE => "CentralControllerOffline",
        SYSTEM_EVENT_PERIPHERAL_ONLINE => "PeripheralOnline",
        SYSTEM_EVENT_PERIPHERAL_OFFLINE => "PeripheralOffline",
        SYSTEM_EVENT_CTI_SERVER_OFFLINE => "CTIServerOffline",
        SYSTEM_EVENT_CTI_SERVER_ONLINE => "CTIServerOnline",
        SYSTEM_EVENT_HALF_HOUR_CHANGE => "HalfHourChange",
        SYSTEM_EVENT_INSTRUMENT_OUT_OF_SERVICE => "InstrumentOutOfService",
        SYSTEM_EVENT_INSTRUMENT_BACK_IN_SERVICE => "InstrumentBackInService",
        _ => "Unknown",
    }
}

// Failure status codes (UINT).

/// No error.
pub const STATUS_SUCCESS: u32 = 0;
/// Malformed or inapplicable request.
pub const STATUS_INVALID_REQUEST: u32 = 1;
/// Request not valid in the current state.
pub const STATUS_INVALID_STATE: u32 = 2;
/// Unknown or expired session.
pub const STATUS_INVALID_SESSION: u32 = 3;
/// Service not granted to this session.
pub const STATUS_INVALID_SERVICE: u32 = 4;
/// Unknown call id.
pub const STATUS_INVALID_CALL_ID: u32 = 5;
/// Unknown device id.
pub const STATUS_INVALID_DEVICE_ID: u32 = 6;
/// Resource temporarily busy.
pub const STATUS_RESOURCE_BUSY: u32 = 7;
/// Resource unavailable.
pub const STATUS_RESOURCE_UNAVAILABLE: u32 = 8;
/// Protocol violation detected by the server.
pub const STATUS_PROTOCOL_ERROR: u32 = 9;
/// Server-internal error.
pub const STATUS_INTERNAL_ERROR: u32 = 10;

/// Human-readable name for a failure status code.
pub fn status_name(status: u32) -> &'static str {
    match status {
        STATUS_SUCCESS => "Success",
        STATUS_INVALID_REQUEST => "InvalidRequest",
        STATUS_INVALID_STATE => "InvalidState",
        STATUS_INVALID_SESSION => "InvalidSession",
        STATUS_INVALID_SERVICE => "InvalidService",
        STATUS_INVALID_CALL_ID => "InvalidCallID",
        STATUS_INVALID_DEVICE_ID => "InvalidDeviceID",
        STATUS_RESOURCE_BUSY => "ResourceBusy",
        STATUS_RESOURCE_UNAVAILABLE => "ResourceUnavailable",
        STATUS_PROTOCOL_ERROR => "ProtocolError",
        STATUS_INTERNAL_ERROR => "InternalError",
        _ => "Unknown",
    }
}

// Configuration operations (USHORT).

/// Record added.
pub const CONFIG_OP_ADD: u16 = 1;
/// Record updated.
pub const CONFIG_OP_UPDATE: u16 = 2;
/// Record deleted.
pub const CONFIG_OP_DELETE: u16 = 3;

/// Human-readable name for a configuration operation.
pub fn config_operation_name(op: u16) -> &'static str {
    match op {
        CONFIG_OP_ADD => "Add",
        CONFIG_OP_UPDATE => "Update",
        CONFIG_OP_DELETE => "Delete",
        _ => "Unknown",
    }
}

// Supervisor actions (USHORT).

/// No action.
pub const SUPERVISOR_ACTION_NONE: u16 = 0;
/// Silent monitoring.
pub const SUPERVISOR_ACTION_MONITOR: u16 = 1;
/// Coaching (whisper to the agent).
pub const SUPERVISOR_ACTION_COACH: u16 = 2;
/// Barge into the call.
pub const SUPERVISOR_ACTION_BARGE: u16 = 3;
/// Intercept the call.
pub const SUPERVISOR_ACTION_INTERCEPT: u16 = 4;

/// Human-readable name for a supervisor action.
pub fn supervisor_action_name(action: u16) -> &'static str {
    match action {
        SUPERVISOR_ACTION_NONE => "None",
        SUPERVISOR_ACTION_MONITOR => "Monitor",
        SUPERVISOR_ACTION_COACH => "Coach",
        SUPERVISOR_ACTION_BARGE => "Barge",
        SUPERVISOR_ACTION_INTERCEPT => "Intercept",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_compose() {
        let services = ServiceMask::ALL_EVENTS | ServiceMask::CLIENT_EVENTS;
        assert_eq!(services.bits(), 0x11);
    }

    #[test]
    fn call_mask_all_covers_every_bit() {
        assert_eq!(CallEventMask::all().bits(), u32::MAX);
        assert_eq!(AgentStateMask::all().bits(), u32::MAX);
        assert_eq!(ConfigEventMask::all().bits(), u32::MAX);
    }

    #[test]
    fn names_for_known_values() {
        assert_eq!(message_type_name(MSG_OPEN_REQ), "OPEN_REQ");
        assert_eq!(message_type_name(999), "UNKNOWN");
        assert_eq!(agent_state_name(AGENT_STATE_TALKING), "Talking");
        assert_eq!(connection_state_name(CONNECTION_STATE_ALERTING), "Alerting");
        assert_eq!(status_name(STATUS_INVALID_SESSION), "InvalidSession");
        assert_eq!(config_operation_name(CONFIG_OP_DELETE), "Delete");
        assert_eq!(supervisor_action_name(SUPERVISOR_ACTION_BARGE), "Barge");
        assert_eq!(system_event_name(SYSTEM_EVENT_PERIPHERAL_ONLINE), "PeripheralOnline");
    }
}
