//! Call lifecycle events.
//!
//! Every call event opens with the same 16-byte fixed prefix — monitor id,
//! peripheral id, peripheral type, connection device id type, connection
//! call id — followed by event-specific fields, with the local connection
//! state and event cause at the tail where the event carries them.
//! Identifiers (device ids, ANI, DNIS, call variables) travel as floating
//! string tags.

use crate::error::ProtocolError;
use crate::floating::{FloatingFields, FloatingWriter};
use crate::tags;
use crate::wire::{BodyReader, BodyWriter};

/// The ten call variables delivered as floating tags 18..=27.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallVariables {
    /// Call variable 1.
    pub var1: String,
    /// Call variable 2.
    pub var2: String,
    /// Call variable 3.
    pub var3: String,
    /// Call variable 4.
    pub var4: String,
    /// Call variable 5.
    pub var5: String,
    /// Call variable 6.
    pub var6: String,
    /// Call variable 7.
    pub var7: String,
    /// Call variable 8.
    pub var8: String,
    /// Call variable 9.
    pub var9: String,
    /// Call variable 10.
    pub var10: String,
}

impl CallVariables {
    pub(crate) fn parse_from(ff: &FloatingFields) -> Self {
        Self {
            var1: ff.first_str(tags::CALL_VARIABLE_1),
            var2: ff.first_str(tags::CALL_VARIABLE_2),
            var3: ff.first_str(tags::CALL_VARIABLE_3),
            var4: ff.first_str(tags::CALL_VARIABLE_4),
            var5: ff.first_str(tags::CALL_VARIABLE_5),
            var6: ff.first_str(tags::CALL_VARIABLE_6),
            var7: ff.first_str(tags::CALL_VARIABLE_7),
            var8: ff.first_str(tags::CALL_VARIABLE_8),
            var9: ff.first_str(tags::CALL_VARIABLE_9),
            var10: ff.first_str(tags::CALL_VARIABLE_10),
        }
    }

    pub(crate) fn write_to(&self, fw: &mut FloatingWriter) {
        fw.put_str(tags::CALL_VARIABLE_1, &self.var1);
        fw.put_str(tags::CALL_VARIABLE_2, &self.var2);
        fw.put_str(tags::CALL_VARIABLE_3, &self.var3);
        fw.put_str(tags::CALL_VARIABLE_4, &self.var4);
        fw.put_str(tags::CALL_VARIABLE_5, &self.var5);
        fw.put_str(tags::CALL_VARIABLE_6, &self.var6);
        fw.put_str(tags::CALL_VARIABLE_7, &self.var7);
        fw.put_str(tags::CALL_VARIABLE_8, &self.var8);
        fw.put_str(tags::CALL_VARIABLE_9, &self.var9);
        fw.put_str(tags::CALL_VARIABLE_10, &self.var10);
    }
}

// Reads the common 16-byte call-event prefix into the given fields.
macro_rules! read_prefix {
    ($r:ident, $m:ident) => {
        $m.monitor_id = $r.read_u32();
        $m.peripheral_id = $r.read_u32();
        $m.peripheral_type = $r.read_u16();
        $m.connection_device_id_type = $r.read_u16();
        $m.connection_call_id = $r.read_u32();
    };
}

macro_rules! write_prefix {
    ($w:ident, $m:ident) => {
        $w.write_u32($m.monitor_id);
        $w.write_u32($m.peripheral_id);
        $w.write_u16($m.peripheral_type);
        $w.write_u16($m.connection_device_id_type);
        $w.write_u32($m.connection_call_id);
    };
}

/// BEGIN_CALL_EVENT (type 23) — a call has entered the monitored scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BeginCallEvent {
    /// Monitor id scoping this event.
    pub monitor_id: u32,
    /// Peripheral the call lives on.
    pub peripheral_id: u32,
    /// Type of the peripheral.
    pub peripheral_type: u16,
    /// Kind of connection device id.
    pub connection_device_id_type: u16,
    /// Call id of the connection.
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
    /// Type of call.
    pub call_type: u16,
    /// Calling device type.
    pub calling_device_type: u16,
    /// Called device type.
    pub called_device_type: u16,
    /// Last redirecting device type.
    pub last_redirect_device_type: u16,

    /// Connection device id (tag 31).
    pub connection_device_id: String,
    /// Caller's number (tag 15).
    pub ani: String,
    /// Dialed number (tag 16).
    pub dnis: String,
    /// Calling device id (tag 12).
    pub calling_device_id: String,
    /// Called device id (tag 13).
    pub called_device_id: String,
    /// Last redirecting device id (tag 14).
    pub last_redirect_device_id: String,
    /// User-to-user information (tag 17).
    pub user_to_user_info: String,
    /// Call variables 1..=10.
    pub call_variables: CallVariables,
}

impl BeginCallEvent {
    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let mut m = Self::default();
        read_prefix!(r, m);
        m.service_number = r.read_u32();
        m.service_id = r.read_u32();
        m.skill_group_number = r.read_u32();
        m.skill_group_id = r.read_u32();
        m.skill_group_priority = r.read_u16();
        m.call_type = r.read_u16();
        m.calling_device_type = r.read_u16();
        m.called_device_type = r.read_u16();
        m.last_redirect_device_type = r.read_u16();
        r.check()?;

        if r.remaining() > 0 {
            let ff = FloatingFields::parse(r.rest())?;
            m.connection_device_id = ff.first_str(tags::CONNECTION_DEVICE_ID);
            m.ani = ff.first_str(tags::ANI);
            m.dnis = ff.first_str(tags::DNIS);
            m.calling_device_id = ff.first_str(tags::CALLING_DEVICE_ID);
            m.called_device_id = ff.first_str(tags::CALLED_DEVICE_ID);
            m.last_redirect_device_id = ff.first_str(tags::LAST_REDIRECT_DEVICE_ID);
            m.user_to_user_info = ff.first_str(tags::USER_TO_USER_INFO);
            m.call_variables = CallVariables::parse_from(&ff);
        }

        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        write_prefix!(w, self);
        w.write_u32(self.service_number);
        w.write_u32(self.service_id);
        w.write_u32(self.skill_group_number);
        w.write_u32(self.skill_group_id);
        w.write_u16(self.skill_group_priority);
        w.write_u16(self.call_type);
        w.write_u16(self.calling_device_type);
        w.write_u16(self.called_device_type);
        w.write_u16(self.last_redirect_device_type);

        let mut fw = FloatingWriter::new();
        fw.put_str(tags::CONNECTION_DEVICE_ID, &self.connection_device_id);
        fw.put_str(tags::ANI, &self.ani);
        fw.put_str(tags::DNIS, &self.dnis);
        fw.put_str(tags::CALLING_DEVICE_ID, &self.calling_device_id);
        fw.put_str(tags::CALLED_DEVICE_ID, &self.called_device_id);
        fw.put_str(tags::LAST_REDIRECT_DEVICE_ID, &self.last_redirect_device_id);
        fw.put_str(tags::USER_TO_USER_INFO, &self.user_to_user_info);
        self.call_variables.write_to(&mut fw);

        w.write_bytes(&fw.into_bytes());
        w.into_bytes()
    }
}

/// END_CALL_EVENT (type 24) — the call has left the monitored scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndCallEvent {
    /// Monitor id scoping this event.
    pub monitor_id: u32,
    /// Peripheral the call lived on.
    pub peripheral_id: u32,
    /// Type of the peripheral.
    pub peripheral_type: u16,
    /// Kind of connection device id.
    pub connection_device_id_type: u16,
    /// Call id of the connection.
    pub connection_call_id: u32,
    /// Final local connection state.
    pub local_connection_state: u16,
    /// Cause of the call ending.
    pub event_cause: u16,

    /// Connection device id (tag 31).
    pub connection_device_id: String,
}

impl EndCallEvent {
    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let mut m = Self::default();
        read_prefix!(r, m);
        m.local_connection_state = r.read_u16();
        m.event_cause = r.read_u16();
        r.check()?;

        if r.remaining() > 0 {
            let ff = FloatingFields::parse(r.rest())?;
            m.connection_device_id = ff.first_str(tags::CONNECTION_DEVICE_ID);
        }

        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        write_prefix!(w, self);
        w.write_u16(self.local_connection_state);
        w.write_u16(self.event_cause);

        let mut fw = FloatingWriter::new();
        fw.put_str(tags::CONNECTION_DEVICE_ID, &self.connection_device_id);
        w.write_bytes(&fw.into_bytes());
        w.into_bytes()
    }
}

/// CALL_DATA_UPDATE_EVENT (type 25) — call context data changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallDataUpdateEvent {
    /// Monitor id scoping this event.
    pub monitor_id: u32,
    /// Peripheral the call lives on.
    pub peripheral_id: u32,
    /// Type of the peripheral.
    pub peripheral_type: u16,
    /// Kind of connection device id.
    pub connection_device_id_type: u16,
    /// Call id of the connection.
    pub connection_call_id: u32,
    /// Number of CTI clients attached to the call.
    pub num_cti_clients: u16,
    /// Number of named variables.
    pub num_named_variables: u16,
    /// Number of named arrays.
    pub num_named_arrays: u16,
    /// Type of call.
    pub call_type: u16,
    /// Call disposition.
    pub call_disposition: u32,

    /// Connection device id (tag 31).
    pub connection_device_id: String,
    /// Caller's number (tag 15).
    pub ani: String,
    /// Dialed number (tag 16).
    pub dnis: String,
    /// User-to-user information (tag 17).
    pub user_to_user_info: String,
    /// Call variables 1..=10.
    pub call_variables: CallVariables,
}

impl CallDataUpdateEvent {
    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let mut m = Self::default();
        read_prefix!(r, m);
        m.num_cti_clients = r.read_u16();
        m.num_named_variables = r.read_u16();
        m.num_named_arrays = r.read_u16();
        m.call_type = r.read_u16();
        m.call_disposition = r.read_u32();
        r.check()?;

        if r.remaining() > 0 {
            let ff = FloatingFields::parse(r.rest())?;
            m.connection_device_id = ff.first_str(tags::CONNECTION_DEVICE_ID);
            m.ani = ff.first_str(tags::ANI);
            m.dnis = ff.first_str(tags::DNIS);
            m.user_to_user_info = ff.first_str(tags::USER_TO_USER_INFO);
            m.call_variables = CallVariables::parse_from(&ff);
        }

        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        write_prefix!(w, self);
        w.write_u16(self.num_cti_clients);
        w.write_u16(self.num_named_variables);
        w.write_u16(self.num_named_arrays);
        w.write_u16(self.call_type);
        w.write_u32(self.call_disposition);

        let mut fw = FloatingWriter::new();
        fw.put_str(tags::CONNECTION_DEVICE_ID, &self.connection_device_id);
        fw.put_str(tags::ANI, &self.ani);
        fw.put_str(tags::DNIS, &self.dnis);
        fw.put_str(tags::USER_TO_USER_INFO, &self.user_to_user_info);
        self.call_variables.write_to(&mut fw);

        w.write_bytes(&fw.into_bytes());
        w.into_bytes()
    }
}

/// CALL_DELIVERED_EVENT (type 9) — a call is ringing at a device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallDeliveredEvent {
    /// Monitor id scoping this event.
    pub monitor_id: u32,
    /// Peripheral the call lives on.
    pub peripheral_id: u32,
    /// Type of the peripheral.
    pub peripheral_type: u16,
    /// Kind of connection device id.
    pub connection_device_id_type: u16,
    /// Call id of the connection.
    pub connection_call_id: u32,
    /// Line handle.
    pub line_handle: u16,
    /// Line type.
    pub line_type: u16,
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
    /// Alerting device type.
    pub alerting_device_type: u16,
    /// Calling device type.
    pub calling_device_type: u16,
    /// Called device type.
    pub called_device_type: u16,
    /// Last redirecting device type.
    pub last_redirect_device_type: u16,
    /// Local connection state.
    pub local_connection_state: u16,
    /// Event cause.
    pub event_cause: u16,

    /// Connection device id (tag 31).
    pub connection_device_id: String,
    /// Caller's number (tag 15).
    pub ani: String,
    /// Dialed number (tag 16).
    pub dnis: String,
    /// Calling device id (tag 12).
    pub calling_device_id: String,
    /// Called device id (tag 13).
    pub called_device_id: String,
    /// Last redirecting device id (tag 14).
    pub last_redirect_device_id: String,
    /// Alerting device id (tag 32).
    pub alerting_device_id: String,
}

impl CallDeliveredEvent {
    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let mut m = Self::default();
        read_prefix!(r, m);
        m.line_handle = r.read_u16();
        m.line_type = r.read_u16();
        m.service_number = r.read_u32();
        m.service_id = r.read_u32();
        m.skill_group_number = r.read_u32();
        m.skill_group_id = r.read_u32();
        m.skill_group_priority = r.read_u16();
        m.alerting_device_type = r.read_u16();
        m.calling_device_type = r.read_u16();
        m.called_device_type = r.read_u16();
        m.last_redirect_device_type = r.read_u16();
        m.local_connection_state = r.read_u16();
        m.event_cause = r.read_u16();
        r.check()?;

        if r.remaining() > 0 {
            let ff = FloatingFields::parse(r.rest())?;
            m.connection_device_id = ff.first_str(tags::CONNECTION_DEVICE_ID);
            m.ani = ff.first_str(tags::ANI);
            m.dnis = ff.first_str(tags::DNIS);
            m.calling_device_id = ff.first_str(tags::CALLING_DEVICE_ID);
            m.called_device_id = ff.first_str(tags::CALLED_DEVICE_ID);
            m.last_redirect_device_id = ff.first_str(tags::LAST_REDIRECT_DEVICE_ID);
            m.alerting_device_id = ff.first_str(tags::ALERTING_DEVICE_ID);
        }

        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        write_prefix!(w, self);
        w.write_u16(self.line_handle);
        w.write_u16(self.line_type);
        w.write_u32(self.service_number);
        w.write_u32(self.service_id);
        w.write_u32(self.skill_group_number);
        w.write_u32(self.skill_group_id);
        w.write_u16(self.skill_group_priority);
        w.write_u16(self.alerting_device_type);
        w.write_u16(self.calling_device_type);
        w.write_u16(self.called_device_type);
        w.write_u16(self.last_redirect_device_type);
        w.write_u16(self.local_connection_state);
        w.write_u16(self.event_cause);

        let mut fw = FloatingWriter::new();
        fw.put_str(tags::CONNECTION_DEVICE_ID, &self.connection_device_id);
        fw.put_str(tags::ANI, &self.ani);
        fw.put_str(tags::DNIS, &self.dnis);
        fw.put_str(tags::CALLING_DEVICE_ID, &self.calling_device_id);
        fw.put_str(tags::CALLED_DEVICE_ID, &self.called_device_id);
        fw.put_str(tags::LAST_REDIRECT_DEVICE_ID, &self.last_redirect_device_id);
        fw.put_str(tags::ALERTING_DEVICE_ID, &self.alerting_device_id);

        w.write_bytes(&fw.into_bytes());
        w.into_bytes()
    }
}

/// CALL_ESTABLISHED_EVENT (type 10) — a call was answered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallEstablishedEvent {
    /// Monitor id scoping this event.
    pub monitor_id: u32,
    /// Peripheral the call lives on.
    pub peripheral_id: u32,
    /// Type of the peripheral.
    pub peripheral_type: u16,
    /// Kind of connection device id.
    pub connection_device_id_type: u16,
    /// Call id of the connection.
    pub connection_call_id: u32,
    /// Line handle.
    pub line_handle: u16,
    /// Line type.
    pub line_type: u16,
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
    /// Answering device type.
    pub answering_device_type: u16,
    /// Calling device type.
    pub calling_device_type: u16,
    /// Called device type.
    pub called_device_type: u16,
    /// Last redirecting device type.
    pub last_redirect_device_type: u16,
    /// Local connection state.
    pub local_connection_state: u16,
    /// Event cause.
    pub event_cause: u16,

    /// Connection device id (tag 31).
    pub connection_device_id: String,
    /// Caller's number (tag 15).
    pub ani: String,
    /// Dialed number (tag 16).
    pub dnis: String,
    /// Calling device id (tag 12).
    pub calling_device_id: String,
    /// Called device id (tag 13).
    pub called_device_id: String,
    /// Answering device id (tag 33).
    pub answering_device_id: String,
}

impl CallEstablishedEvent {
    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let mut m = Self::default();
        read_prefix!(r, m);
        m.line_handle = r.read_u16();
        m.line_type = r.read_u16();
        m.service_number = r.read_u32();
        m.service_id = r.read_u32();
        m.skill_group_number = r.read_u32();
        m.skill_group_id = r.read_u32();
        m.skill_group_priority = r.read_u16();
        m.answering_device_type = r.read_u16();
        m.calling_device_type = r.read_u16();
        m.called_device_type = r.read_u16();
        m.last_redirect_device_type = r.read_u16();
        m.local_connection_state = r.read_u16();
        m.event_cause = r.read_u16();
        r.check()?;

        if r.remaining() > 0 {
            let ff = FloatingFields::parse(r.rest())?;
            m.connection_device_id = ff.first_str(tags::CONNECTION_DEVICE_ID);
            m.ani = ff.first_str(tags::ANI);
            m.dnis = ff.first_str(tags::DNIS);
            m.calling_device_id = ff.first_str(tags::CALLING_DEVICE_ID);
            m.called_device_id = ff.first_str(tags::CALLED_DEVICE_ID);
            m.answering_device_id = ff.first_str(tags::ANSWERING_DEVICE_ID);
        }

        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        write_prefix!(w, self);
        w.write_u16(self.line_handle);
        w.write_u16(self.line_type);
        w.write_u32(self.service_number);
        w.write_u32(self.service_id);
        w.write_u32(self.skill_group_number);
        w.write_u32(self.skill_group_id);
        w.write_u16(self.skill_group_priority);
        w.write_u16(self.answering_device_type);
        w.write_u16(self.calling_device_type);
        w.write_u16(self.called_device_type);
        w.write_u16(self.last_redirect_device_type);
        w.write_u16(self.local_connection_state);
        w.write_u16(self.event_cause);

        let mut fw = FloatingWriter::new();
        fw.put_str(tags::CONNECTION_DEVICE_ID, &self.connection_device_id);
        fw.put_str(tags::ANI, &self.ani);
        fw.put_str(tags::DNIS, &self.dnis);
        fw.put_str(tags::CALLING_DEVICE_ID, &self.calling_device_id);
        fw.put_str(tags::CALLED_DEVICE_ID, &self.called_device_id);
        fw.put_str(tags::ANSWERING_DEVICE_ID, &self.answering_device_id);

        w.write_bytes(&fw.into_bytes());
        w.into_bytes()
    }
}

/// CALL_HELD_EVENT (type 11) — a call was placed on hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallHeldEvent {
    /// Monitor id scoping this event.
    pub monitor_id: u32,
    /// Peripheral the call lives on.
    pub peripheral_id: u32,
    /// Type of the peripheral.
    pub peripheral_type: u16,
    /// Kind of connection device id.
    pub connection_device_id_type: u16,
    /// Call id of the connection.
    pub connection_call_id: u32,
    /// Holding device type.
    pub holding_device_type: u16,
    /// Local connection state.
    pub local_connection_state: u16,
    /// Event cause.
    pub event_cause: u16,

    /// Connection device id (tag 31).
    pub connection_device_id: String,
    /// Holding device id (tag 34).
    pub holding_device_id: String,
}

impl CallHeldEvent {
    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let mut m = Self::default();
        read_prefix!(r, m);
        m.holding_device_type = r.read_u16();
        m.local_connection_state = r.read_u16();
        m.event_cause = r.read_u16();
        r.check()?;

        if r.remaining() > 0 {
            let ff = FloatingFields::parse(r.rest())?;
            m.connection_device_id = ff.first_str(tags::CONNECTION_DEVICE_ID);
            m.holding_device_id = ff.first_str(tags::HOLDING_DEVICE_ID);
        }

        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        write_prefix!(w, self);
        w.write_u16(self.holding_device_type);
        w.write_u16(self.local_connection_state);
        w.write_u16(self.event_cause);

        let mut fw = FloatingWriter::new();
        fw.put_str(tags::CONNECTION_DEVICE_ID, &self.connection_device_id);
        fw.put_str(tags::HOLDING_DEVICE_ID, &self.holding_device_id);
        w.write_bytes(&fw.into_bytes());
        w.into_bytes()
    }
}

/// CALL_RETRIEVED_EVENT (type 12) — a held call was retrieved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallRetrievedEvent {
    /// Monitor id scoping this event.
    pub monitor_id: u32,
    /// Peripheral the call lives on.
    pub peripheral_id: u32,
    /// Type of the peripheral.
    pub peripheral_type: u16,
    /// Kind of connection device id.
    pub connection_device_id_type: u16,
    /// Call id of the connection.
    pub connection_call_id: u32,
    /// Retrieving device type.
    pub retrieving_device_type: u16,
    /// Local connection state.
    pub local_connection_state: u16,
    /// Event cause.
    pub event_cause: u16,

    /// Connection device id (tag 31).
    pub connection_device_id: String,
    /// Retrieving device id (tag 35).
    pub retrieving_device_id: String,
}

impl CallRetrievedEvent {
    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let mut m = Self::default();
        read_prefix!(r, m);
        m.retrieving_device_type = r.read_u16();
        m.local_connection_state = r.read_u16();
        m.event_cause = r.read_u16();
        r.check()?;

        if r.remaining() > 0 {
            let ff = FloatingFields::parse(r.rest())?;
            m.connection_device_id = ff.first_str(tags::CONNECTION_DEVICE_ID);
            m.retrieving_device_id = ff.first_str(tags::RETRIEVING_DEVICE_ID);
        }

        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        write_prefix!(w, self);
        w.write_u16(self.retrieving_device_type);
        w.write_u16(self.local_connection_state);
        w.write_u16(self.event_cause);

        let mut fw = FloatingWriter::new();
        fw.put_str(tags::CONNECTION_DEVICE_ID, &self.connection_device_id);
        fw.put_str(tags::RETRIEVING_DEVICE_ID, &self.retrieving_device_id);
        w.write_bytes(&fw.into_bytes());
        w.into_bytes()
    }
}

/// CALL_CLEARED_EVENT (type 13) — the whole call was torn down.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallClearedEvent {
    /// Monitor id scoping this event.
    pub monitor_id: u32,
    /// Peripheral the call lived on.
    pub peripheral_id: u32,
    /// Type of the peripheral.
    pub peripheral_type: u16,
    /// Kind of connection device id.
    pub connection_device_id_type: u16,
    /// Call id of the connection.
    pub connection_call_id: u32,
    /// Local connection state.
    pub local_connection_state: u16,
    /// Event cause.
    pub event_cause: u16,

    /// Connection device id (tag 31).
    pub connection_device_id: String,
}

impl CallClearedEvent {
    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let mut m = Self::default();
        read_prefix!(r, m);
        m.local_connection_state = r.read_u16();
        m.event_cause = r.read_u16();
        r.check()?;

        if r.remaining() > 0 {
            let ff = FloatingFields::parse(r.rest())?;
            m.connection_device_id = ff.first_str(tags::CONNECTION_DEVICE_ID);
        }

        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        write_prefix!(w, self);
        w.write_u16(self.local_connection_state);
        w.write_u16(self.event_cause);

        let mut fw = FloatingWriter::new();
        fw.put_str(tags::CONNECTION_DEVICE_ID, &self.connection_device_id);
        w.write_bytes(&fw.into_bytes());
        w.into_bytes()
    }
}

/// CALL_CONNECTION_CLEARED_EVENT (type 14) — one party left the call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallConnectionClearedEvent {
    /// Monitor id scoping this event.
    pub monitor_id: u32,
    /// Peripheral the call lives on.
    pub peripheral_id: u32,
    /// Type of the peripheral.
    pub peripheral_type: u16,
    /// Kind of connection device id.
    pub connection_device_id_type: u16,
    /// Call id of the connection.
    pub connection_call_id: u32,
    /// Releasing device type.
    pub releasing_device_type: u16,
    /// Local connection state.
    pub local_connection_state: u16,
    /// Event cause.
    pub event_cause: u16,

    /// Connection device id (tag 31).
    pub connection_device_id: String,
    /// Releasing device id (tag 36).
    pub releasing_device_id: String,
}

impl CallConnectionClearedEvent {
    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let mut m = Self::default();
        read_prefix!(r, m);
        m.releasing_device_type = r.read_u16();
        m.local_connection_state = r.read_u16();
        m.event_cause = r.read_u16();
        r.check()?;

        if r.remaining() > 0 {
            let ff = FloatingFields::parse(r.rest())?;
            m.connection_device_id = ff.first_str(tags::CONNECTION_DEVICE_ID);
            m.releasing_device_id = ff.first_str(tags::RELEASING_DEVICE_ID);
        }

        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        write_prefix!(w, self);
        w.write_u16(self.releasing_device_type);
        w.write_u16(self.local_connection_state);
        w.write_u16(self.event_cause);

        let mut fw = FloatingWriter::new();
        fw.put_str(tags::CONNECTION_DEVICE_ID, &self.connection_device_id);
        fw.put_str(tags::RELEASING_DEVICE_ID, &self.releasing_device_id);
        w.write_bytes(&fw.into_bytes());
        w.into_bytes()
    }
}

/// CALL_ORIGINATED_EVENT (type 15) — an outbound call was started.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallOriginatedEvent {
    /// Monitor id scoping this event.
    pub monitor_id: u32,
    /// Peripheral the call lives on.
    pub peripheral_id: u32,
    /// Type of the peripheral.
    pub peripheral_type: u16,
    /// Kind of connection device id.
    pub connection_device_id_type: u16,
    /// Call id of the connection.
    pub connection_call_id: u32,
    /// Line handle.
    pub line_handle: u16,
    /// Line type.
    pub line_type: u16,
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
    /// Calling device type.
    pub calling_device_type: u16,
    /// Called device type.
    pub called_device_type: u16,
    /// Local connection state.
    pub local_connection_state: u16,
    /// Event cause.
    pub event_cause: u16,

    /// Connection device id (tag 31).
    pub connection_device_id: String,
    /// Calling device id (tag 12).
    pub calling_device_id: String,
    /// Called device id (tag 13).
    pub called_device_id: String,
}

impl CallOriginatedEvent {
    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let mut m = Self::default();
        read_prefix!(r, m);
        m.line_handle = r.read_u16();
        m.line_type = r.read_u16();
        m.service_number = r.read_u32();
        m.service_id = r.read_u32();
        m.skill_group_number = r.read_u32();
        m.skill_group_id = r.read_u32();
        m.skill_group_priority = r.read_u16();
        m.calling_device_type = r.read_u16();
        m.called_device_type = r.read_u16();
        m.local_connection_state = r.read_u16();
        m.event_cause = r.read_u16();
        r.check()?;

        if r.remaining() > 0 {
            let ff = FloatingFields::parse(r.rest())?;
            m.connection_device_id = ff.first_str(tags::CONNECTION_DEVICE_ID);
            m.calling_device_id = ff.first_str(tags::CALLING_DEVICE_ID);
            m.called_device_id = ff.first_str(tags::CALLED_DEVICE_ID);
        }

        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        write_prefix!(w, self);
        w.write_u16(self.line_handle);
        w.write_u16(self.line_type);
        w.write_u32(self.service_number);
        w.write_u32(self.service_id);
        w.write_u32(self.skill_group_number);
        w.write_u32(self.skill_group_id);
        w.write_u16(self.skill_group_priority);
        w.write_u16(self.calling_device_type);
        w.write_u16(self.called_device_type);
        w.write_u16(self.local_connection_state);
        w.write_u16(self.event_cause);

        let mut fw = FloatingWriter::new();
        fw.put_str(tags::CONNECTION_DEVICE_ID, &self.connection_device_id);
        fw.put_str(tags::CALLING_DEVICE_ID, &self.calling_device_id);
        fw.put_str(tags::CALLED_DEVICE_ID, &self.called_device_id);
        w.write_bytes(&fw.into_bytes());
        w.into_bytes()
    }
}

/// CALL_FAILED_EVENT (type 16) — a call ran into a failure condition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallFailedEvent {
    /// Monitor id scoping this event.
    pub monitor_id: u32,
    /// Peripheral the call lives on.
    pub peripheral_id: u32,
    /// Type of the peripheral.
    pub peripheral_type: u16,
    /// Kind of connection device id.
    pub connection_device_id_type: u16,
    /// Call id of the connection.
    pub connection_call_id: u32,
    /// Failing device type.
    pub failing_device_type: u16,
    /// Called device type.
    pub called_device_type: u16,
    /// Local connection state.
    pub local_connection_state: u16,
    /// Event cause.
    pub event_cause: u16,

    /// Connection device id (tag 31).
    pub connection_device_id: String,
    /// Failing device id (tag 37).
    pub failing_device_id: String,
    /// Called device id (tag 13).
    pub called_device_id: String,
}

impl CallFailedEvent {
    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let mut m = Self::default();
        read_prefix!(r, m);
        m.failing_device_type = r.read_u16();
        m.called_device_type = r.read_u16();
        m.local_connection_state = r.read_u16();
        m.event_cause = r.read_u16();
        r.check()?;

        if r.remaining() > 0 {
            let ff = FloatingFields::parse(r.rest())?;
            m.connection_device_id = ff.first_str(tags::CONNECTION_DEVICE_ID);
            m.failing_device_id = ff.first_str(tags::FAILING_DEVICE_ID);
            m.called_device_id = ff.first_str(tags::CALLED_DEVICE_ID);
        }

        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        write_prefix!(w, self);
        w.write_u16(self.failing_device_type);
        w.write_u16(self.called_device_type);
        w.write_u16(self.local_connection_state);
        w.write_u16(self.event_cause);

        let mut fw = FloatingWriter::new();
        fw.put_str(tags::CONNECTION_DEVICE_ID, &self.connection_device_id);
        fw.put_str(tags::FAILING_DEVICE_ID, &self.failing_device_id);
        fw.put_str(tags::CALLED_DEVICE_ID, &self.called_device_id);
        w.write_bytes(&fw.into_bytes());
        w.into_bytes()
    }
}

/// CALL_CONFERENCED_EVENT (type 17) — two calls were joined into a
/// conference.
///
/// Carries the primary and secondary call/device triples and a declared
/// party count. The parsed floating region is retained so the repeated
/// per-party tags stay observable in wire order; the named accessors are
/// first-occurrence views. The declared count is reported as-is — it may
/// disagree with the number of party tags actually present, and iteration
/// never reads past the floating region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallConferencedEvent {
    /// Monitor id scoping this event.
    pub monitor_id: u32,
    /// Peripheral the call lives on.
    pub peripheral_id: u32,
    /// Type of the peripheral.
    pub peripheral_type: u16,
    /// Kind of connection device id.
    pub connection_device_id_type: u16,
    /// Call id of the connection.
    pub connection_call_id: u32,
    /// Primary (surviving) call id.
    pub primary_call_id: u32,
    /// Kind of the primary device id.
    pub primary_device_id_type: u16,
    /// Secondary (merged) call id.
    pub secondary_call_id: u32,
    /// Kind of the secondary device id.
    pub secondary_device_id_type: u16,
    /// Controller device type.
    pub controller_device_type: u16,
    /// Declared number of conference parties.
    pub num_parties: u16,
    /// Local connection state.
    pub local_connection_state: u16,
    /// Event cause.
    pub event_cause: u16,

    /// Every floating entry of the event, in wire order.
    pub floating: FloatingFields,
}

impl CallConferencedEvent {
    /// Primary device id (tag 46, first occurrence).
    pub fn primary_device_id(&self) -> String {
        self.floating.first_str(tags::PRIMARY_DEVICE_ID)
    }

    /// Secondary device id (tag 47, first occurrence).
    pub fn secondary_device_id(&self) -> String {
        self.floating.first_str(tags::SECONDARY_DEVICE_ID)
    }

    /// Controller device id (tag 42, first occurrence).
    pub fn controller_device_id(&self) -> String {
        self.floating.first_str(tags::CONTROLLER_DEVICE_ID)
    }

    /// Every party device id (tag 46), in wire order.
    pub fn parties(&self) -> Vec<String> {
        self.floating.all_str(tags::PRIMARY_DEVICE_ID)
    }

    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let mut m = Self::default();
        read_prefix!(r, m);
        m.primary_call_id = r.read_u32();
        m.primary_device_id_type = r.read_u16();
        m.secondary_call_id = r.read_u32();
        m.secondary_device_id_type = r.read_u16();
        m.controller_device_type = r.read_u16();
        m.num_parties = r.read_u16();
        m.local_connection_state = r.read_u16();
        m.event_cause = r.read_u16();
        r.check()?;

        if r.remaining() > 0 {
            m.floating = FloatingFields::parse(r.rest())?;
        }

        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        write_prefix!(w, self);
        w.write_u32(self.primary_call_id);
        w.write_u16(self.primary_device_id_type);
        w.write_u32(self.secondary_call_id);
        w.write_u16(self.secondary_device_id_type);
        w.write_u16(self.controller_device_type);
        w.write_u16(self.num_parties);
        w.write_u16(self.local_connection_state);
        w.write_u16(self.event_cause);

        let mut fw = FloatingWriter::new();
        for field in self.floating.iter() {
            fw.put_raw(field.tag, &field.value);
        }
        w.write_bytes(&fw.into_bytes());
        w.into_bytes()
    }
}

/// CALL_TRANSFERRED_EVENT (type 18) — a call was handed to another party.
///
/// Same retained-floating shape as [`CallConferencedEvent`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallTransferredEvent {
    /// Monitor id scoping this event.
    pub monitor_id: u32,
    /// Peripheral the call lives on.
    pub peripheral_id: u32,
    /// Type of the peripheral.
    pub peripheral_type: u16,
    /// Kind of connection device id.
    pub connection_device_id_type: u16,
    /// Call id of the connection.
    pub connection_call_id: u32,
    /// Primary (surviving) call id.
    pub primary_call_id: u32,
    /// Kind of the primary device id.
    pub primary_device_id_type: u16,
    /// Secondary (transferred-from) call id.
    pub secondary_call_id: u32,
    /// Kind of the secondary device id.
    pub secondary_device_id_type: u16,
    /// Transferring device type.
    pub transferring_device_type: u16,
    /// Transferred device type.
    pub transferred_device_type: u16,
    /// Declared number of parties.
    pub num_parties: u16,
    /// Local connection state.
    pub local_connection_state: u16,
    /// Event cause.
    pub event_cause: u16,

    /// Every floating entry of the event, in wire order.
    pub floating: FloatingFields,
}

impl CallTransferredEvent {
    /// Primary device id (tag 46, first occurrence).
    pub fn primary_device_id(&self) -> String {
        self.floating.first_str(tags::PRIMARY_DEVICE_ID)
    }

    /// Secondary device id (tag 47, first occurrence).
    pub fn secondary_device_id(&self) -> String {
        self.floating.first_str(tags::SECONDARY_DEVICE_ID)
    }

    /// Transferring device id (tag 38, first occurrence).
    pub fn transferring_device_id(&self) -> String {
        self.floating.first_str(tags::TRANSFERRING_DEVICE_ID)
    }

    /// Transferred device id (tag 39, first occurrence).
    pub fn transferred_device_id(&self) -> String {
        self.floating.first_str(tags::TRANSFERRED_DEVICE_ID)
    }

    /// Every party device id (tag 46), in wire order.
    pub fn parties(&self) -> Vec<String> {
        self.floating.all_str(tags::PRIMARY_DEVICE_ID)
    }

    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let mut m = Self::default();
        read_prefix!(r, m);
        m.primary_call_id = r.read_u32();
        m.primary_device_id_type = r.read_u16();
        m.secondary_call_id = r.read_u32();
        m.secondary_device_id_type = r.read_u16();
        m.transferring_device_type = r.read_u16();
        m.transferred_device_type = r.read_u16();
        m.num_parties = r.read_u16();
        m.local_connection_state = r.read_u16();
        m.event_cause = r.read_u16();
        r.check()?;

        if r.remaining() > 0 {
            m.floating = FloatingFields::parse(r.rest())?;
        }

        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        write_prefix!(w, self);
        w.write_u32(self.primary_call_id);
        w.write_u16(self.primary_device_id_type);
        w.write_u32(self.secondary_call_id);
        w.write_u16(self.secondary_device_id_type);
        w.write_u16(self.transferring_device_type);
        w.write_u16(self.transferred_device_type);
        w.write_u16(self.num_parties);
        w.write_u16(self.local_connection_state);
        w.write_u16(self.event_cause);

        let mut fw = FloatingWriter::new();
        for field in self.floating.iter() {
            fw.put_raw(field.tag, &field.value);
        }
        w.write_bytes(&fw.into_bytes());
        w.into_bytes()
    }
}

/// CALL_QUEUED_EVENT (type 21) — the call was placed in a queue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallQueuedEvent {
    /// Monitor id scoping this event.
    pub monitor_id: u32,
    /// Peripheral the call lives on.
    pub peripheral_id: u32,
    /// Type of the peripheral.
    pub peripheral_type: u16,
    /// Kind of connection device id.
    pub connection_device_id_type: u16,
    /// Call id of the connection.
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
    /// Queue device type.
    pub queue_device_type: u16,
    /// Calling device type.
    pub calling_device_type: u16,
    /// Called device type.
    pub called_device_type: u16,
    /// Last redirecting device type.
    pub last_redirect_device_type: u16,
    /// Local connection state.
    pub local_connection_state: u16,
    /// Event cause.
    pub event_cause: u16,

    /// Connection device id (tag 31).
    pub connection_device_id: String,
    /// Calling device id (tag 12).
    pub calling_device_id: String,
    /// Called device id (tag 13).
    pub called_device_id: String,
    /// Last redirecting device id (tag 14).
    pub last_redirect_device_id: String,
}

impl CallQueuedEvent {
    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let mut m = Self::default();
        read_prefix!(r, m);
        m.service_number = r.read_u32();
        m.service_id = r.read_u32();
        m.skill_group_number = r.read_u32();
        m.skill_group_id = r.read_u32();
        m.skill_group_priority = r.read_u16();
        m.queue_device_type = r.read_u16();
        m.calling_device_type = r.read_u16();
        m.called_device_type = r.read_u16();
        m.last_redirect_device_type = r.read_u16();
        m.local_connection_state = r.read_u16();
        m.event_cause = r.read_u16();
        r.check()?;

        if r.remaining() > 0 {
            let ff = FloatingFields::parse(r.rest())?;
            m.connection_device_id = ff.first_str(tags::CONNECTION_DEVICE_ID);
            m.calling_device_id = ff.first_str(tags::CALLING_DEVICE_ID);
            m.called_device_id = ff.first_str(tags::CALLED_DEVICE_ID);
            m.last_redirect_device_id = ff.first_str(tags::LAST_REDIRECT_DEVICE_ID);
        }

        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        write_prefix!(w, self);
        w.write_u32(self.service_number);
        w.write_u32(self.service_id);
        w.write_u32(self.skill_group_number);
        w.write_u32(self.skill_group_id);
        w.write_u16(self.skill_group_priority);
        w.write_u16(self.queue_device_type);
        w.write_u16(self.calling_device_type);
        w.write_u16(self.called_device_type);
        w.write_u16(self.last_redirect_device_type);
        w.write_u16(self.local_connection_state);
        w.write_u16(self.event_cause);

        let mut fw = FloatingWriter::new();
        fw.put_str(tags::CONNECTION_DEVICE_ID, &self.connection_device_id);
        fw.put_str(tags::CALLING_DEVICE_ID, &self.calling_device_id);
        fw.put_str(tags::CALLED_DEVICE_ID, &self.called_device_id);
        fw.put_str(tags::LAST_REDIRECT_DEVICE_ID, &self.last_redirect_device_id);
        w.write_bytes(&fw.into_bytes());
        w.into_bytes()
    }
}

/// CALL_DEQUEUED_EVENT (type 86) — the call left a queue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallDequeuedEvent {
    /// Monitor id scoping this event.
    pub monitor_id: u32,
    /// Peripheral the call lives on.
    pub peripheral_id: u32,
    /// Type of the peripheral.
    pub peripheral_type: u16,
    /// Kind of connection device id.
    pub connection_device_id_type: u16,
    /// Call id of the connection.
    pub connection_call_id: u32,
    /// Service number.
    pub service_number: u32,
    /// Service id.
    pub service_id: u32,
    /// Queue device type.
    pub queue_device_type: u16,
    /// Local connection state.
    pub local_connection_state: u16,
    /// Event cause.
    pub event_cause: u16,

    /// Connection device id (tag 31).
    pub connection_device_id: String,
}

impl CallDequeuedEvent {
    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let mut m = Self::default();
        read_prefix!(r, m);
        m.service_number = r.read_u32();
        m.service_id = r.read_u32();
        m.queue_device_type = r.read_u16();
        m.local_connection_state = r.read_u16();
        m.event_cause = r.read_u16();
        r.check()?;

        if r.remaining() > 0 {
            let ff = FloatingFields::parse(r.rest())?;
            m.connection_device_id = ff.first_str(tags::CONNECTION_DEVICE_ID);
        }

        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        write_prefix!(w, self);
        w.write_u32(self.service_number);
        w.write_u32(self.service_id);
        w.write_u16(self.queue_device_type);
        w.write_u16(self.local_connection_state);
        w.write_u16(self.event_cause);

        let mut fw = FloatingWriter::new();
        fw.put_str(tags::CONNECTION_DEVICE_ID, &self.connection_device_id);
        w.write_bytes(&fw.into_bytes());
        w.into_bytes()
    }
}

/// CALL_SERVICE_INITIATED_EVENT (type 20) — dial tone at the teleset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallServiceInitiatedEvent {
    /// Monitor id scoping this event.
    pub monitor_id: u32,
    /// Peripheral the call lives on.
    pub peripheral_id: u32,
    /// Type of the peripheral.
    pub peripheral_type: u16,
    /// Kind of connection device id.
    pub connection_device_id_type: u16,
    /// Call id of the connection.
    pub connection_call_id: u32,
    /// Line handle.
    pub line_handle: u16,
    /// Line type.
    pub line_type: u16,
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
    /// Calling device type.
    pub calling_device_type: u16,
    /// Local connection state.
    pub local_connection_state: u16,
    /// Event cause.
    pub event_cause: u16,

    /// Connection device id (tag 31).
    pub connection_device_id: String,
    /// Calling device id (tag 12).
    pub calling_device_id: String,
    /// Call reference id (tag 248).
    pub call_reference_id: String,
}

impl CallServiceInitiatedEvent {
    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let mut m = Self::default();
        read_prefix!(r, m);
        m.line_handle = r.read_u16();
        m.line_type = r.read_u16();
        m.service_number = r.read_u32();
        m.service_id = r.read_u32();
        m.skill_group_number = r.read_u32();
        m.skill_group_id = r.read_u32();
        m.skill_group_priority = r.read_u16();
        m.calling_device_type = r.read_u16();
        m.local_connection_state = r.read_u16();
        m.event_cause = r.read_u16();
        r.check()?;

        if r.remaining() > 0 {
            let ff = FloatingFields::parse(r.rest())?;
            m.connection_device_id = ff.first_str(tags::CONNECTION_DEVICE_ID);
            m.calling_device_id = ff.first_str(tags::CALLING_DEVICE_ID);
            m.call_reference_id = ff.first_str(tags::CALL_REFERENCE_ID);
        }

        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        write_prefix!(w, self);
        w.write_u16(self.line_handle);
        w.write_u16(self.line_type);
        w.write_u32(self.service_number);
        w.write_u32(self.service_id);
        w.write_u32(self.skill_group_number);
        w.write_u32(self.skill_group_id);
        w.write_u16(self.skill_group_priority);
        w.write_u16(self.calling_device_type);
        w.write_u16(self.local_connection_state);
        w.write_u16(self.event_cause);

        let mut fw = FloatingWriter::new();
        fw.put_str(tags::CONNECTION_DEVICE_ID, &self.connection_device_id);
        fw.put_str(tags::CALLING_DEVICE_ID, &self.calling_device_id);
        fw.put_str(tags::CALL_REFERENCE_ID, &self.call_reference_id);
        w.write_bytes(&fw.into_bytes());
        w.into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::BodyWriter as Raw;

    #[test]
    fn delivered_round_trip_with_identifiers() {
        let event = CallDeliveredEvent {
            monitor_id: 42,
            peripheral_id: 5001,
            peripheral_type: 1,
            connection_device_id_type: 0,
            connection_call_id: 0xABCD,
            service_number: 7,
            skill_group_id: 12,
            local_connection_state: 2,
            event_cause: 17,
            ani: "19195551234".into(),
            dnis: "8005550100".into(),
            calling_device_id: "19195551234".into(),
            called_device_id: "2001".into(),
            ..CallDeliveredEvent::default()
        };

        let back = CallDeliveredEvent::decode(&event.encode_body()).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn begin_call_carries_call_variables() {
        let event = BeginCallEvent {
            connection_call_id: 9,
            call_type: 1,
            ani: "5551234".into(),
            call_variables: CallVariables {
                var1: "account=77".into(),
                var10: "vip".into(),
                ..CallVariables::default()
            },
            ..BeginCallEvent::default()
        };

        let back = BeginCallEvent::decode(&event.encode_body()).unwrap();
        assert_eq!(back.call_variables.var1, "account=77");
        assert_eq!(back.call_variables.var10, "vip");
        assert_eq!(back, event);
    }

    #[test]
    fn conferenced_exposes_repeated_party_tags_in_order() {
        // Fixed region followed by three instances of tag 46.
        let mut w = Raw::new();
        w.write_u32(42); // monitor
        w.write_u32(5001); // peripheral
        w.write_u16(1); // peripheral type
        w.write_u16(0); // device id type
        w.write_u32(300); // call id
        w.write_u32(301); // primary call id
        w.write_u16(0); // primary device id type
        w.write_u32(302); // secondary call id
        w.write_u16(0); // secondary device id type
        w.write_u16(0); // controller device type
        w.write_u16(3); // num parties
        w.write_u16(3); // connected
        w.write_u16(10); // cause: conference
        let mut body = w.into_bytes();
        for party in [b"A", b"B", b"C"] {
            body.extend_from_slice(&46u16.to_be_bytes());
            body.extend_from_slice(&2u16.to_be_bytes());
            body.extend_from_slice(party);
            body.push(0);
        }

        let event = CallConferencedEvent::decode(&body).unwrap();
        assert_eq!(event.num_parties, 3);
        assert_eq!(event.parties(), ["A", "B", "C"]);
        assert_eq!(event.primary_device_id(), "A");

        // Re-encoding preserves the repeated tags byte-for-byte.
        assert_eq!(event.encode_body(), body);
    }

    #[test]
    fn conferenced_party_count_may_disagree_with_tags() {
        let mut w = Raw::new();
        for _ in 0..2 {
            w.write_u32(0);
        }
        w.write_u16(0);
        w.write_u16(0);
        w.write_u32(0);
        w.write_u32(0);
        w.write_u16(0);
        w.write_u32(0);
        w.write_u16(0);
        w.write_u16(0);
        w.write_u16(5); // declares five parties
        w.write_u16(0);
        w.write_u16(0);
        let mut body = w.into_bytes();
        body.extend_from_slice(&46u16.to_be_bytes());
        body.extend_from_slice(&2u16.to_be_bytes());
        body.extend_from_slice(b"A\0");

        // Only one party tag present; the decoder reports both as-is.
        let event = CallConferencedEvent::decode(&body).unwrap();
        assert_eq!(event.num_parties, 5);
        assert_eq!(event.parties(), ["A"]);
    }

    #[test]
    fn transferred_round_trip() {
        let mut w = Raw::new();
        w.write_u32(42);
        w.write_u32(5001);
        w.write_u16(1);
        w.write_u16(0);
        w.write_u32(400);
        w.write_u32(401);
        w.write_u16(0);
        w.write_u32(402);
        w.write_u16(0);
        w.write_u16(0); // transferring device type
        w.write_u16(0); // transferred device type
        w.write_u16(2); // num parties
        w.write_u16(3);
        w.write_u16(27); // cause: transfer
        let mut body = w.into_bytes();
        for (tag, value) in [(38u16, &b"3001\0"[..]), (39u16, &b"3002\0"[..])] {
            body.extend_from_slice(&tag.to_be_bytes());
            body.extend_from_slice(&(value.len() as u16).to_be_bytes());
            body.extend_from_slice(value);
        }

        let event = CallTransferredEvent::decode(&body).unwrap();
        assert_eq!(event.transferring_device_id(), "3001");
        assert_eq!(event.transferred_device_id(), "3002");
        assert_eq!(event.encode_body(), body);
    }

    #[test]
    fn end_call_is_prefix_and_state() {
        let event = EndCallEvent {
            monitor_id: 1,
            peripheral_id: 2,
            peripheral_type: 1,
            connection_device_id_type: 0,
            connection_call_id: 3,
            local_connection_state: 0,
            event_cause: 19,
            ..EndCallEvent::default()
        };
        let body = event.encode_body();
        assert_eq!(body.len(), 20);
        assert_eq!(EndCallEvent::decode(&body).unwrap(), event);
    }

    #[test]
    fn held_and_retrieved_round_trip() {
        let held = CallHeldEvent {
            connection_call_id: 77,
            holding_device_type: 1,
            local_connection_state: 4,
            event_cause: 11,
            holding_device_id: "2001".into(),
            ..CallHeldEvent::default()
        };
        assert_eq!(CallHeldEvent::decode(&held.encode_body()).unwrap(), held);

        let retrieved = CallRetrievedEvent {
            connection_call_id: 77,
            retrieving_device_id: "2001".into(),
            ..CallRetrievedEvent::default()
        };
        assert_eq!(
            CallRetrievedEvent::decode(&retrieved.encode_body()).unwrap(),
            retrieved
        );
    }

    #[test]
    fn queued_and_dequeued_round_trip() {
        let queued = CallQueuedEvent {
            connection_call_id: 8,
            skill_group_id: 3,
            queue_device_type: 2,
            local_connection_state: 5,
            calling_device_id: "5551234".into(),
            ..CallQueuedEvent::default()
        };
        assert_eq!(CallQueuedEvent::decode(&queued.encode_body()).unwrap(), queued);

        let dequeued = CallDequeuedEvent {
            connection_call_id: 8,
            service_id: 4,
            event_cause: 18,
            ..CallDequeuedEvent::default()
        };
        assert_eq!(
            CallDequeuedEvent::decode(&dequeued.encode_body()).unwrap(),
            dequeued
        );
    }

    #[test]
    fn unknown_floating_tags_are_skipped_but_listed() {
        let mut body = CallClearedEvent {
            connection_call_id: 5,
            event_cause: 19,
            ..CallClearedEvent::default()
        }
        .encode_body();
        // Append a tag no call event recognizes.
        body.extend_from_slice(&500u16.to_be_bytes());
        body.extend_from_slice(&2u16.to_be_bytes());
        body.extend_from_slice(&[0xDE, 0xAD]);

        let event = CallClearedEvent::decode(&body).unwrap();
        assert_eq!(event.connection_call_id, 5);
        assert_eq!(event.event_cause, 19);
    }
}
