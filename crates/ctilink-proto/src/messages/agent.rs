//! Agent-state, pre-call routing, supervisor, and system events.

use crate::error::ProtocolError;
use crate::floating::{FloatingFields, FloatingWriter};
use crate::messages::CallVariables;
use crate::tags;
use crate::types;
use crate::wire::{BodyReader, BodyWriter};

/// AGENT_STATE_EVENT (type 30) — an agent changed state.
///
/// 62-byte fixed region covering the skill-group block, the new state and
/// reason code, media-routing-domain and task accounting, plus floating
/// identity strings and the optional duration / next-state / direction
/// extensions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentStateEvent {
    /// Monitor id scoping this event.
    pub monitor_id: u32,
    /// Peripheral the agent belongs to.
    pub peripheral_id: u32,
    /// Session id.
    pub session_id: u32,
    /// Type of the peripheral.
    pub peripheral_type: u16,
    /// Skill group state.
    pub skill_group_state: u16,
    /// Seconds spent in the current state.
    pub state_duration: u32,
    /// Skill group number.
    pub skill_group_number: u32,
    /// Skill group id.
    pub skill_group_id: u32,
    /// Skill group priority.
    pub skill_group_priority: u16,
    /// New agent state.
    pub agent_state: u16,
    /// Reason code for the change.
    pub event_reason_code: u16,
    /// Media routing domain id.
    pub mrd_id: i32,
    /// Number of active tasks.
    pub num_tasks: u32,
    /// Agent mode.
    pub agent_mode: u16,
    /// Maximum task limit.
    pub max_task_limit: u32,
    /// ICM agent id.
    pub icm_agent_id: i32,
    /// Availability status.
    pub agent_availability_status: u32,
    /// Number of floating skill groups.
    pub num_flt_skill_groups: u16,
    /// Department id.
    pub department_id: i32,

    /// CTI client signature (tag 28).
    pub cti_client_signature: String,
    /// Agent id (tag 4).
    pub agent_id: String,
    /// Agent's extension (tag 3).
    pub agent_extension: String,
    /// Active terminal (tag 127).
    pub active_terminal: String,
    /// Agent's instrument (tag 5).
    pub agent_instrument: String,
    /// Duration extension (tag 126).
    pub duration: u32,
    /// Next agent state (tag 123).
    pub next_agent_state: u16,
    /// Direction (tag 128).
    pub direction: u32,
}

impl AgentStateEvent {
    /// Human-readable name for the new agent state.
    pub fn state_name(&self) -> &'static str {
        types::agent_state_name(self.agent_state)
    }

    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let mut m = Self {
            monitor_id: r.read_u32(),
            peripheral_id: r.read_u32(),
            session_id: r.read_u32(),
            peripheral_type: r.read_u16(),
            skill_group_state: r.read_u16(),
            state_duration: r.read_u32(),
            skill_group_number: r.read_u32(),
            skill_group_id: r.read_u32(),
            skill_group_priority: r.read_u16(),
            agent_state: r.read_u16(),
            event_reason_code: r.read_u16(),
            mrd_id: r.read_i32(),
            num_tasks: r.read_u32(),
            agent_mode: r.read_u16(),
            max_task_limit: r.read_u32(),
            icm_agent_id: r.read_i32(),
            agent_availability_status: r.read_u32(),
            num_flt_skill_groups: r.read_u16(),
            department_id: r.read_i32(),
            ..Self::default()
        };
        r.check()?;

        if r.remaining() > 0 {
            let ff = FloatingFields::parse(r.rest())?;
            m.cti_client_signature = ff.first_str(tags::CTI_CLIENT_SIGNATURE);
            m.agent_id = ff.first_str(tags::AGENT_ID);
            m.agent_extension = ff.first_str(tags::AGENT_EXTENSION);
            m.active_terminal = ff.first_str(tags::ACTIVE_TERMINAL);
            m.agent_instrument = ff.first_str(tags::AGENT_INSTRUMENT);
            m.duration = ff.first_u32(tags::DURATION);
            m.next_agent_state = ff.first_u16(tags::NEXT_AGENT_STATE);
            m.direction = ff.first_u32(tags::DIRECTION);
        }

        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.write_u32(self.monitor_id);
        w.write_u32(self.peripheral_id);
        w.write_u32(self.session_id);
        w.write_u16(self.peripheral_type);
        w.write_u16(self.skill_group_state);
        w.write_u32(self.state_duration);
        w.write_u32(self.skill_group_number);
        w.write_u32(self.skill_group_id);
        w.write_u16(self.skill_group_priority);
        w.write_u16(self.agent_state);
        w.write_u16(self.event_reason_code);
        w.write_i32(self.mrd_id);
        w.write_u32(self.num_tasks);
        w.write_u16(self.agent_mode);
        w.write_u32(self.max_task_limit);
        w.write_i32(self.icm_agent_id);
        w.write_u32(self.agent_availability_status);
        w.write_u16(self.num_flt_skill_groups);
        w.write_i32(self.department_id);

        let mut fw = FloatingWriter::new();
        fw.put_str(tags::CTI_CLIENT_SIGNATURE, &self.cti_client_signature);
        fw.put_str(tags::AGENT_ID, &self.agent_id);
        fw.put_str(tags::AGENT_EXTENSION, &self.agent_extension);
        fw.put_str(tags::ACTIVE_TERMINAL, &self.active_terminal);
        fw.put_str(tags::AGENT_INSTRUMENT, &self.agent_instrument);
        fw.put_u32(tags::DURATION, self.duration);
        fw.put_u16(tags::NEXT_AGENT_STATE, self.next_agent_state);
        fw.put_u32(tags::DIRECTION, self.direction);

        w.write_bytes(&fw.into_bytes());
        w.into_bytes()
    }
}

/// AGENT_PRE_CALL_EVENT (type 87) — advance notice that a routed call is
/// about to arrive at an agent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentPreCallEvent {
    /// Monitor id scoping this event.
    pub monitor_id: u32,
    /// Peripheral the agent belongs to.
    pub peripheral_id: u32,
    /// Type of the peripheral.
    pub peripheral_type: u16,
    /// Kind of connection device id.
    pub connection_device_id_type: u16,
    /// Call id of the routed call.
    pub connection_call_id: u32,
    /// Service number.
    pub service_number: u32,
    /// Service id.
    pub service_id: u32,
    /// Skill group number.
    pub skill_group_number: u32,
    /// Skill group id.
    pub skill_group_id: u32,
    /// Skill group priority.
    pub skill_group_priority: u16,
    /// Number of CTI clients.
    pub num_cti_clients: u16,
    /// Number of named variables.
    pub num_named_variables: u16,
    /// Number of named arrays.
    pub num_named_arrays: u16,
    /// Type of call.
    pub call_type: u16,

    /// Connection device id (tag 31).
    pub connection_device_id: String,
    /// Caller's number (tag 15).
    pub ani: String,
    /// Dialed number (tag 16).
    pub dnis: String,
    /// Dialed number (tag 40).
    pub dialed_number: String,
    /// Caller-entered digits (tag 41).
    pub caller_entered_digits: String,
    /// User-to-user information (tag 17).
    pub user_to_user_info: String,
    /// Call variables 1..=10.
    pub call_variables: CallVariables,
    /// Call type id (tag 250).
    pub call_type_id: u32,
    /// Pre-call invoke id (tag 249).
    pub pre_call_invoke_id: u32,
    /// Router call key day (tag 72).
    pub router_call_key_day: u32,
    /// Router call key call id (tag 73).
    pub router_call_key_call_id: u32,
    /// Router call key sequence number (tag 214).
    pub router_call_key_seq_num: u32,
}

impl AgentPreCallEvent {
    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let mut m = Self {
            monitor_id: r.read_u32(),
            peripheral_id: r.read_u32(),
            peripheral_type: r.read_u16(),
            connection_device_id_type: r.read_u16(),
            connection_call_id: r.read_u32(),
            service_number: r.read_u32(),
            service_id: r.read_u32(),
            skill_group_number: r.read_u32(),
            skill_group_id: r.read_u32(),
            skill_group_priority: r.read_u16(),
            num_cti_clients: r.read_u16(),
            num_named_variables: r.read_u16(),
            num_named_arrays: r.read_u16(),
            call_type: r.read_u16(),
            ..Self::default()
        };
        r.check()?;

        if r.remaining() > 0 {
            let ff = FloatingFields::parse(r.rest())?;
            m.connection_device_id = ff.first_str(tags::CONNECTION_DEVICE_ID);
            m.ani = ff.first_str(tags::ANI);
            m.dnis = ff.first_str(tags::DNIS);
            m.dialed_number = ff.first_str(tags::DIALED_NUMBER);
            m.caller_entered_digits = ff.first_str(tags::CALLER_ENTERED_DIGITS);
            m.user_to_user_info = ff.first_str(tags::USER_TO_USER_INFO);
            m.call_variables = CallVariables::parse_from(&ff);
            m.call_type_id = ff.first_u32(tags::CALL_TYPE_ID);
            m.pre_call_invoke_id = ff.first_u32(tags::PRE_CALL_INVOKE_ID);
            m.router_call_key_day = ff.first_u32(tags::ROUTER_CALL_KEY_DAY);
            m.router_call_key_call_id = ff.first_u32(tags::ROUTER_CALL_KEY_CALL_ID);
            m.router_call_key_seq_num = ff.first_u32(tags::ROUTER_CALL_KEY_SEQ_NUM);
        }

        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.write_u32(self.monitor_id);
        w.write_u32(self.peripheral_id);
        w.write_u16(self.peripheral_type);
        w.write_u16(self.connection_device_id_type);
        w.write_u32(self.connection_call_id);
        w.write_u32(self.service_number);
        w.write_u32(self.service_id);
        w.write_u32(self.skill_group_number);
        w.write_u32(self.skill_group_id);
        w.write_u16(self.skill_group_priority);
        w.write_u16(self.num_cti_clients);
        w.write_u16(self.num_named_variables);
        w.write_u16(self.num_named_arrays);
        w.write_u16(self.call_type);

        let mut fw = FloatingWriter::new();
        fw.put_str(tags::CONNECTION_DEVICE_ID, &self.connection_device_id);
        fw.put_str(tags::ANI, &self.ani);
        fw.put_str(tags::DNIS, &self.dnis);
        fw.put_str(tags::DIALED_NUMBER, &self.dialed_number);
        fw.put_str(tags::CALLER_ENTERED_DIGITS, &self.caller_entered_digits);
        fw.put_str(tags::USER_TO_USER_INFO, &self.user_to_user_info);
        self.call_variables.write_to(&mut fw);
        fw.put_u32(tags::CALL_TYPE_ID, self.call_type_id);
        fw.put_u32(tags::PRE_CALL_INVOKE_ID, self.pre_call_invoke_id);
        fw.put_u32(tags::ROUTER_CALL_KEY_DAY, self.router_call_key_day);
        fw.put_u32(tags::ROUTER_CALL_KEY_CALL_ID, self.router_call_key_call_id);
        fw.put_u32(tags::ROUTER_CALL_KEY_SEQ_NUM, self.router_call_key_seq_num);

        w.write_bytes(&fw.into_bytes());
        w.into_bytes()
    }
}

/// AGENT_PRE_CALL_ABORT_EVENT (type 88) — a previously announced routed
/// call will not arrive after all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentPreCallAbortEvent {
    /// Monitor id scoping this event.
    pub monitor_id: u32,
    /// Peripheral the agent belongs to.
    pub peripheral_id: u32,
    /// Type of the peripheral.
    pub peripheral_type: u16,
    /// Kind of connection device id.
    pub connection_device_id_type: u16,
    /// Call id from the original announcement.
    pub connection_call_id: u32,
    /// Why the routing was abandoned.
    pub event_cause: u16,

    /// Connection device id (tag 31).
    pub connection_device_id: String,
    /// Pre-call invoke id matching the original event (tag 249).
    pub pre_call_invoke_id: u32,
}

impl AgentPreCallAbortEvent {
    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let mut m = Self {
            monitor_id: r.read_u32(),
            peripheral_id: r.read_u32(),
            peripheral_type: r.read_u16(),
            connection_device_id_type: r.read_u16(),
            connection_call_id: r.read_u32(),
            event_cause: r.read_u16(),
            ..Self::default()
        };
        r.check()?;

        if r.remaining() > 0 {
            let ff = FloatingFields::parse(r.rest())?;
            m.connection_device_id = ff.first_str(tags::CONNECTION_DEVICE_ID);
            m.pre_call_invoke_id = ff.first_u32(tags::PRE_CALL_INVOKE_ID);
        }

        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.write_u32(self.monitor_id);
        w.write_u32(self.peripheral_id);
        w.write_u16(self.peripheral_type);
        w.write_u16(self.connection_device_id_type);
        w.write_u32(self.connection_call_id);
        w.write_u16(self.event_cause);

        let mut fw = FloatingWriter::new();
        fw.put_str(tags::CONNECTION_DEVICE_ID, &self.connection_device_id);
        fw.put_u32(tags::PRE_CALL_INVOKE_ID, self.pre_call_invoke_id);
        w.write_bytes(&fw.into_bytes());
        w.into_bytes()
    }
}

/// SUPERVISOR_ASSIST_EVENT (type 120) — a supervisor acted on an agent's
/// call (monitor, coach, barge, intercept).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupervisorAssistEvent {
    /// Monitor id scoping this event.
    pub monitor_id: u32,
    /// Peripheral the call lives on.
    pub peripheral_id: u32,
    /// Type of the peripheral.
    pub peripheral_type: u16,
    /// Kind of connection device id.
    pub connection_device_id_type: u16,
    /// Call id of the supervised call.
    pub connection_call_id: u32,
    /// What the supervisor did.
    pub supervisor_action: u16,
    /// Event cause.
    pub event_cause: u16,

    /// Connection device id (tag 31).
    pub connection_device_id: String,
    /// Agent id (tag 4).
    pub agent_id: String,
    /// Agent's extension (tag 3).
    pub agent_extension: String,
    /// Agent's connection call id (tag 193).
    pub agent_connection_call_id: u32,
    /// Agent's peripheral id (tag 194).
    pub agent_peripheral_id: u32,
    /// Agent's peripheral number (tag 195).
    pub agent_peripheral_number: u32,
}

impl SupervisorAssistEvent {
    /// Human-readable name for the supervisor action.
    pub fn action_name(&self) -> &'static str {
        types::supervisor_action_name(self.supervisor_action)
    }

    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let mut m = Self {
            monitor_id: r.read_u32(),
            peripheral_id: r.read_u32(),
            peripheral_type: r.read_u16(),
            connection_device_id_type: r.read_u16(),
            connection_call_id: r.read_u32(),
            supervisor_action: r.read_u16(),
            event_cause: r.read_u16(),
            ..Self::default()
        };
        r.check()?;

        if r.remaining() > 0 {
            let ff = FloatingFields::parse(r.rest())?;
            m.connection_device_id = ff.first_str(tags::CONNECTION_DEVICE_ID);
            m.agent_id = ff.first_str(tags::AGENT_ID);
            m.agent_extension = ff.first_str(tags::AGENT_EXTENSION);
            m.agent_connection_call_id = ff.first_u32(tags::AGENT_CONNECTION_CALL_ID);
            m.agent_peripheral_id = ff.first_u32(tags::AGENT_PERIPHERAL_ID);
            m.agent_peripheral_number = ff.first_u32(tags::AGENT_PERIPHERAL_NUMBER);
        }

        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.write_u32(self.monitor_id);
        w.write_u32(self.peripheral_id);
        w.write_u16(self.peripheral_type);
        w.write_u16(self.connection_device_id_type);
        w.write_u32(self.connection_call_id);
        w.write_u16(self.supervisor_action);
        w.write_u16(self.event_cause);

        let mut fw = FloatingWriter::new();
        fw.put_str(tags::CONNECTION_DEVICE_ID, &self.connection_device_id);
        fw.put_str(tags::AGENT_ID, &self.agent_id);
        fw.put_str(tags::AGENT_EXTENSION, &self.agent_extension);
        fw.put_u32(tags::AGENT_CONNECTION_CALL_ID, self.agent_connection_call_id);
        fw.put_u32(tags::AGENT_PERIPHERAL_ID, self.agent_peripheral_id);
        fw.put_u32(tags::AGENT_PERIPHERAL_NUMBER, self.agent_peripheral_number);
        w.write_bytes(&fw.into_bytes());
        w.into_bytes()
    }
}

/// SYSTEM_EVENT (type 31) — peripheral-gateway status changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemEvent {
    /// Peripheral gateway status.
    pub pg_status: u32,
    /// Central controller time.
    pub icm_central_controller_time: u32,
    /// Which system event occurred.
    pub system_event_id: u32,
    /// Event-specific argument 1.
    pub system_event_arg1: u32,
    /// Event-specific argument 2.
    pub system_event_arg2: u32,
    /// Event-specific argument 3.
    pub system_event_arg3: u32,
    /// Device type involved.
    pub event_device_type: u16,
    /// Reserved.
    pub reserved: u16,
    /// Central controller status.
    pub icm_central_controller: u32,
}

impl SystemEvent {
    /// Human-readable name for the system event id.
    pub fn event_name(&self) -> &'static str {
        types::system_event_name(self.system_event_id)
    }

    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let m = Self {
            pg_status: r.read_u32(),
            icm_central_controller_time: r.read_u32(),
            system_event_id: r.read_u32(),
            system_event_arg1: r.read_u32(),
            system_event_arg2: r.read_u32(),
            system_event_arg3: r.read_u32(),
            event_device_type: r.read_u16(),
            reserved: r.read_u16(),
            icm_central_controller: r.read_u32(),
        };
        r.check()?;
        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.write_u32(self.pg_status);
        w.write_u32(self.icm_central_controller_time);
        w.write_u32(self.system_event_id);
        w.write_u32(self.system_event_arg1);
        w.write_u32(self.system_event_arg2);
        w.write_u32(self.system_event_arg3);
        w.write_u16(self.event_device_type);
        w.write_u16(self.reserved);
        w.write_u32(self.icm_central_controller);
        w.into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_state_fixed_region_is_62_bytes() {
        let event = AgentStateEvent::default();
        assert_eq!(event.encode_body().len(), 62);
    }

    #[test]
    fn agent_state_round_trip_with_extensions() {
        let event = AgentStateEvent {
            monitor_id: 42,
            peripheral_id: 5001,
            agent_state: 4,
            event_reason_code: 32767,
            mrd_id: -1,
            num_tasks: 1,
            icm_agent_id: 7777,
            department_id: -1,
            agent_id: "1001".into(),
            agent_extension: "2001".into(),
            duration: 125,
            next_agent_state: 3,
            direction: 1,
            ..AgentStateEvent::default()
        };

        let back = AgentStateEvent::decode(&event.encode_body()).unwrap();
        assert_eq!(back, event);
        assert_eq!(back.state_name(), "Talking");
    }

    #[test]
    fn pre_call_round_trip_with_router_key() {
        let event = AgentPreCallEvent {
            monitor_id: 42,
            connection_call_id: 900,
            call_type: 1,
            ani: "5551234".into(),
            pre_call_invoke_id: 3001,
            router_call_key_day: 151_515,
            router_call_key_call_id: 88,
            call_variables: CallVariables {
                var2: "lang=fr".into(),
                ..CallVariables::default()
            },
            ..AgentPreCallEvent::default()
        };

        let back = AgentPreCallEvent::decode(&event.encode_body()).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn pre_call_abort_matches_original_invoke_id() {
        let event = AgentPreCallAbortEvent {
            connection_call_id: 900,
            event_cause: 4,
            pre_call_invoke_id: 3001,
            ..AgentPreCallAbortEvent::default()
        };
        let back = AgentPreCallAbortEvent::decode(&event.encode_body()).unwrap();
        assert_eq!(back.pre_call_invoke_id, 3001);
        assert_eq!(back, event);
    }

    #[test]
    fn supervisor_assist_round_trip() {
        let event = SupervisorAssistEvent {
            connection_call_id: 77,
            supervisor_action: 3,
            agent_id: "1001".into(),
            agent_connection_call_id: 78,
            ..SupervisorAssistEvent::default()
        };
        let back = SupervisorAssistEvent::decode(&event.encode_body()).unwrap();
        assert_eq!(back, event);
        assert_eq!(back.action_name(), "Barge");
    }

    #[test]
    fn system_event_round_trip() {
        let event = SystemEvent {
            pg_status: 1,
            system_event_id: 3,
            system_event_arg1: 5001,
            ..SystemEvent::default()
        };
        let back = SystemEvent::decode(&event.encode_body()).unwrap();
        assert_eq!(back, event);
        assert_eq!(back.event_name(), "PeripheralOnline");
    }
}
