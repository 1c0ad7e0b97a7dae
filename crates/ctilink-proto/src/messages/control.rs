//! Call-control requests and their confirmations.
//!
//! Each request carries a client-assigned invoke id; the confirmation
//! echoes it. New connections created by consult, conference and transfer
//! come back in the confirmation's fixed region with the device id as
//! floating tag 186.

use crate::error::ProtocolError;
use crate::floating::{FloatingFields, FloatingWriter};
use crate::messages::CallVariables;
use crate::tags;
use crate::wire::{BodyReader, BodyWriter};

/// CONSULT_CALL_REQ (type 50) — starts a consultation call from an active
/// call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsultCallReq {
    /// Client-assigned request id.
    pub invoke_id: u32,
    /// Peripheral to act on.
    pub peripheral_id: u32,
    /// Call id of the active connection.
    pub active_connection_call_id: u32,
    /// Kind of the active connection's device id.
    pub active_connection_device_id_type: u16,
    /// Kind of consultation.
    pub consult_type: u16,
    /// Reserved.
    pub reserved: u32,

    /// Active connection device id (tag 31).
    pub active_connection_device_id: String,
    /// Device to consult (tag 45).
    pub consulted_device_id: String,
    /// Caller's number to present (tag 15).
    pub ani: String,
    /// User-to-user information (tag 17).
    pub user_to_user_info: String,
    /// Call variables 1..=10.
    pub call_variables: CallVariables,
}

impl ConsultCallReq {
    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let mut m = Self {
            invoke_id: r.read_u32(),
            peripheral_id: r.read_u32(),
            active_connection_call_id: r.read_u32(),
            active_connection_device_id_type: r.read_u16(),
            consult_type: r.read_u16(),
            reserved: r.read_u32(),
            ..Self::default()
        };
        r.check()?;

        if r.remaining() > 0 {
            let ff = FloatingFields::parse(r.rest())?;
            m.active_connection_device_id = ff.first_str(tags::CONNECTION_DEVICE_ID);
            m.consulted_device_id = ff.first_str(tags::CONSULTED_DEVICE_ID);
            m.ani = ff.first_str(tags::ANI);
            m.user_to_user_info = ff.first_str(tags::USER_TO_USER_INFO);
            m.call_variables = CallVariables::parse_from(&ff);
        }

        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.write_u32(self.invoke_id);
        w.write_u32(self.peripheral_id);
        w.write_u32(self.active_connection_call_id);
        w.write_u16(self.active_connection_device_id_type);
        w.write_u16(self.consult_type);
        w.write_u32(self.reserved);

        let mut fw = FloatingWriter::new();
        fw.put_str(tags::CONNECTION_DEVICE_ID, &self.active_connection_device_id);
        fw.put_str(tags::CONSULTED_DEVICE_ID, &self.consulted_device_id);
        fw.put_str(tags::ANI, &self.ani);
        fw.put_str(tags::USER_TO_USER_INFO, &self.user_to_user_info);
        self.call_variables.write_to(&mut fw);
        w.write_bytes(&fw.into_bytes());
        w.into_bytes()
    }
}

/// CONSULT_CALL_CONF (type 51) — the consultation call was created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsultCallConf {
    /// Echo of the request's invoke id.
    pub invoke_id: u32,
    /// Call id of the new consultation connection.
    pub new_connection_call_id: u32,
    /// Kind of the new connection's device id.
    pub new_connection_device_id_type: u16,
    /// Line handle.
    pub line_handle: u16,
    /// Line type.
    pub line_type: u16,
    /// Reserved.
    pub reserved: u16,

    /// New connection device id (tag 186).
    pub new_connection_device_id: String,
}

impl ConsultCallConf {
    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let mut m = Self {
            invoke_id: r.read_u32(),
            new_connection_call_id: r.read_u32(),
            new_connection_device_id_type: r.read_u16(),
            line_handle: r.read_u16(),
            line_type: r.read_u16(),
            reserved: r.read_u16(),
            ..Self::default()
        };
        r.check()?;

        if r.remaining() > 0 {
            let ff = FloatingFields::parse(r.rest())?;
            m.new_connection_device_id = ff.first_str(tags::NEW_CONNECTION_DEVICE_ID);
        }

        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.write_u32(self.invoke_id);
        w.write_u32(self.new_connection_call_id);
        w.write_u16(self.new_connection_device_id_type);
        w.write_u16(self.line_handle);
        w.write_u16(self.line_type);
        w.write_u16(self.reserved);

        let mut fw = FloatingWriter::new();
        fw.put_str(tags::NEW_CONNECTION_DEVICE_ID, &self.new_connection_device_id);
        w.write_bytes(&fw.into_bytes());
        w.into_bytes()
    }
}

/// CONFERENCE_CALL_REQ (type 48) — joins an active and a held call into a
/// conference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConferenceCallReq {
    /// Client-assigned request id.
    pub invoke_id: u32,
    /// Peripheral to act on.
    pub peripheral_id: u32,
    /// Call id of the active connection.
    pub active_connection_call_id: u32,
    /// Kind of the active connection's device id.
    pub active_connection_device_id_type: u16,
    /// Call id of the held connection.
    pub held_connection_call_id: u32,
    /// Kind of the held connection's device id.
    pub held_connection_device_id_type: u16,
    /// Reserved.
    pub reserved: u16,

    /// Active connection device id (tag 31).
    pub active_connection_device_id: String,
    /// Held connection device id (tag 34).
    pub held_connection_device_id: String,
}

impl ConferenceCallReq {
    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let mut m = Self {
            invoke_id: r.read_u32(),
            peripheral_id: r.read_u32(),
            active_connection_call_id: r.read_u32(),
            active_connection_device_id_type: r.read_u16(),
            held_connection_call_id: r.read_u32(),
            held_connection_device_id_type: r.read_u16(),
            reserved: r.read_u16(),
            ..Self::default()
        };
        r.check()?;

        if r.remaining() > 0 {
            let ff = FloatingFields::parse(r.rest())?;
            m.active_connection_device_id = ff.first_str(tags::CONNECTION_DEVICE_ID);
            m.held_connection_device_id = ff.first_str(tags::HOLDING_DEVICE_ID);
        }

        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.write_u32(self.invoke_id);
        w.write_u32(self.peripheral_id);
        w.write_u32(self.active_connection_call_id);
        w.write_u16(self.active_connection_device_id_type);
        w.write_u32(self.held_connection_call_id);
        w.write_u16(self.held_connection_device_id_type);
        w.write_u16(self.reserved);

        let mut fw = FloatingWriter::new();
        fw.put_str(tags::CONNECTION_DEVICE_ID, &self.active_connection_device_id);
        fw.put_str(tags::HOLDING_DEVICE_ID, &self.held_connection_device_id);
        w.write_bytes(&fw.into_bytes());
        w.into_bytes()
    }
}

/// CONFERENCE_CALL_CONF (type 49) — the conference was created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConferenceCallConf {
    /// Echo of the request's invoke id.
    pub invoke_id: u32,
    /// Call id of the new conference connection.
    pub new_connection_call_id: u32,
    /// Kind of the new connection's device id.
    pub new_connection_device_id_type: u16,
    /// Line handle.
    pub line_handle: u16,
    /// Line type.
    pub line_type: u16,
    /// Reserved.
    pub reserved: u16,

    /// New connection device id (tag 186).
    pub new_connection_device_id: String,
}

impl ConferenceCallConf {
    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let mut m = Self {
            invoke_id: r.read_u32(),
            new_connection_call_id: r.read_u32(),
            new_connection_device_id_type: r.read_u16(),
            line_handle: r.read_u16(),
            line_type: r.read_u16(),
            reserved: r.read_u16(),
            ..Self::default()
        };
        r.check()?;

        if r.remaining() > 0 {
            let ff = FloatingFields::parse(r.rest())?;
            m.new_connection_device_id = ff.first_str(tags::NEW_CONNECTION_DEVICE_ID);
        }

        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.write_u32(self.invoke_id);
        w.write_u32(self.new_connection_call_id);
        w.write_u16(self.new_connection_device_id_type);
        w.write_u16(self.line_handle);
        w.write_u16(self.line_type);
        w.write_u16(self.reserved);

        let mut fw = FloatingWriter::new();
        fw.put_str(tags::NEW_CONNECTION_DEVICE_ID, &self.new_connection_device_id);
        w.write_bytes(&fw.into_bytes());
        w.into_bytes()
    }
}

/// TRANSFER_CALL_REQ (type 64) — transfers an active call to the held
/// party.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferCallReq {
    /// Client-assigned request id.
    pub invoke_id: u32,
    /// Peripheral to act on.
    pub peripheral_id: u32,
    /// Call id of the active connection.
    pub active_connection_call_id: u32,
    /// Kind of the active connection's device id.
    pub active_connection_device_id_type: u16,
    /// Call id of the held connection.
    pub held_connection_call_id: u32,
    /// Kind of the held connection's device id.
    pub held_connection_device_id_type: u16,
    /// Reserved.
    pub reserved: u16,

    /// Active connection device id (tag 31).
    pub active_connection_device_id: String,
    /// Held connection device id (tag 34).
    pub held_connection_device_id: String,
}

impl TransferCallReq {
    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let mut m = Self {
            invoke_id: r.read_u32(),
            peripheral_id: r.read_u32(),
            active_connection_call_id: r.read_u32(),
            active_connection_device_id_type: r.read_u16(),
            held_connection_call_id: r.read_u32(),
            held_connection_device_id_type: r.read_u16(),
            reserved: r.read_u16(),
            ..Self::default()
        };
        r.check()?;

        if r.remaining() > 0 {
            let ff = FloatingFields::parse(r.rest())?;
            m.active_connection_device_id = ff.first_str(tags::CONNECTION_DEVICE_ID);
            m.held_connection_device_id = ff.first_str(tags::HOLDING_DEVICE_ID);
        }

        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.write_u32(self.invoke_id);
        w.write_u32(self.peripheral_id);
        w.write_u32(self.active_connection_call_id);
        w.write_u16(self.active_connection_device_id_type);
        w.write_u32(self.held_connection_call_id);
        w.write_u16(self.held_connection_device_id_type);
        w.write_u16(self.reserved);

        let mut fw = FloatingWriter::new();
        fw.put_str(tags::CONNECTION_DEVICE_ID, &self.active_connection_device_id);
        fw.put_str(tags::HOLDING_DEVICE_ID, &self.held_connection_device_id);
        w.write_bytes(&fw.into_bytes());
        w.into_bytes()
    }
}

/// TRANSFER_CALL_CONF (type 65) — the transfer completed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferCallConf {
    /// Echo of the request's invoke id.
    pub invoke_id: u32,
    /// Call id of the surviving connection.
    pub new_connection_call_id: u32,
    /// Kind of the surviving connection's device id.
    pub new_connection_device_id_type: u16,
    /// Line handle.
    pub line_handle: u16,
    /// Line type.
    pub line_type: u16,
    /// Reserved.
    pub reserved: u16,

    /// New connection device id (tag 186).
    pub new_connection_device_id: String,
}

impl TransferCallConf {
    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let mut m = Self {
            invoke_id: r.read_u32(),
            new_connection_call_id: r.read_u32(),
            new_connection_device_id_type: r.read_u16(),
            line_handle: r.read_u16(),
            line_type: r.read_u16(),
            reserved: r.read_u16(),
            ..Self::default()
        };
        r.check()?;

        if r.remaining() > 0 {
            let ff = FloatingFields::parse(r.rest())?;
            m.new_connection_device_id = ff.first_str(tags::NEW_CONNECTION_DEVICE_ID);
        }

        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.write_u32(self.invoke_id);
        w.write_u32(self.new_connection_call_id);
        w.write_u16(self.new_connection_device_id_type);
        w.write_u16(self.line_handle);
        w.write_u16(self.line_type);
        w.write_u16(self.reserved);

        let mut fw = FloatingWriter::new();
        fw.put_str(tags::NEW_CONNECTION_DEVICE_ID, &self.new_connection_device_id);
        w.write_bytes(&fw.into_bytes());
        w.into_bytes()
    }
}

/// HOLD_CALL_REQ (type 54) — places a connection on hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoldCallReq {
    /// Client-assigned request id.
    pub invoke_id: u32,
    /// Peripheral to act on.
    pub peripheral_id: u32,
    /// Call id to hold.
    pub connection_call_id: u32,
    /// Kind of the connection's device id.
    pub connection_device_id_type: u16,
    /// Reserved.
    pub reserved: u16,

    /// Connection device id (tag 31).
    pub connection_device_id: String,
}

impl HoldCallReq {
    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let mut m = Self {
            invoke_id: r.read_u32(),
            peripheral_id: r.read_u32(),
            connection_call_id: r.read_u32(),
            connection_device_id_type: r.read_u16(),
            reserved: r.read_u16(),
            ..Self::default()
        };
        r.check()?;

        if r.remaining() > 0 {
            let ff = FloatingFields::parse(r.rest())?;
            m.connection_device_id = ff.first_str(tags::CONNECTION_DEVICE_ID);
        }

        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.write_u32(self.invoke_id);
        w.write_u32(self.peripheral_id);
        w.write_u32(self.connection_call_id);
        w.write_u16(self.connection_device_id_type);
        w.write_u16(self.reserved);

        let mut fw = FloatingWriter::new();
        fw.put_str(tags::CONNECTION_DEVICE_ID, &self.connection_device_id);
        w.write_bytes(&fw.into_bytes());
        w.into_bytes()
    }
}

/// HOLD_CALL_CONF (type 55) — the hold took effect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoldCallConf {
    /// Echo of the request's invoke id.
    pub invoke_id: u32,
}

impl HoldCallConf {
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

/// RETRIEVE_CALL_REQ (type 62) — retrieves a held connection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetrieveCallReq {
    /// Client-assigned request id.
    pub invoke_id: u32,
    /// Peripheral to act on.
    pub peripheral_id: u32,
    /// Call id to retrieve.
    pub connection_call_id: u32,
    /// Kind of the connection's device id.
    pub connection_device_id_type: u16,
    /// Reserved.
    pub reserved: u16,

    /// Connection device id (tag 31).
    pub connection_device_id: String,
}

impl RetrieveCallReq {
    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let mut m = Self {
            invoke_id: r.read_u32(),
            peripheral_id: r.read_u32(),
            connection_call_id: r.read_u32(),
            connection_device_id_type: r.read_u16(),
            reserved: r.read_u16(),
            ..Self::default()
        };
        r.check()?;

        if r.remaining() > 0 {
            let ff = FloatingFields::parse(r.rest())?;
            m.connection_device_id = ff.first_str(tags::CONNECTION_DEVICE_ID);
        }

        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.write_u32(self.invoke_id);
        w.write_u32(self.peripheral_id);
        w.write_u32(self.connection_call_id);
        w.write_u16(self.connection_device_id_type);
        w.write_u16(self.reserved);

        let mut fw = FloatingWriter::new();
        fw.put_str(tags::CONNECTION_DEVICE_ID, &self.connection_device_id);
        w.write_bytes(&fw.into_bytes());
        w.into_bytes()
    }
}

/// RETRIEVE_CALL_CONF (type 63) — the retrieve took effect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetrieveCallConf {
    /// Echo of the request's invoke id.
    pub invoke_id: u32,
}

impl RetrieveCallConf {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consult_round_trip_with_variables() {
        let req = ConsultCallReq {
            invoke_id: 9,
            peripheral_id: 5001,
            active_connection_call_id: 300,
            consult_type: 1,
            active_connection_device_id: "2001".into(),
            consulted_device_id: "2002".into(),
            call_variables: CallVariables {
                var3: "ticket=42".into(),
                ..CallVariables::default()
            },
            ..ConsultCallReq::default()
        };
        assert_eq!(ConsultCallReq::decode(&req.encode_body()).unwrap(), req);

        let conf = ConsultCallConf {
            invoke_id: 9,
            new_connection_call_id: 301,
            new_connection_device_id: "2002".into(),
            ..ConsultCallConf::default()
        };
        assert_eq!(ConsultCallConf::decode(&conf.encode_body()).unwrap(), conf);
    }

    #[test]
    fn conference_and_transfer_round_trip() {
        let req = ConferenceCallReq {
            invoke_id: 10,
            active_connection_call_id: 300,
            held_connection_call_id: 301,
            active_connection_device_id: "2001".into(),
            held_connection_device_id: "2002".into(),
            ..ConferenceCallReq::default()
        };
        assert_eq!(ConferenceCallReq::decode(&req.encode_body()).unwrap(), req);

        let xfer = TransferCallReq {
            invoke_id: 11,
            active_connection_call_id: 300,
            held_connection_call_id: 301,
            ..TransferCallReq::default()
        };
        assert_eq!(TransferCallReq::decode(&xfer.encode_body()).unwrap(), xfer);

        let conf = TransferCallConf {
            invoke_id: 11,
            new_connection_call_id: 302,
            new_connection_device_id: "3001".into(),
            ..TransferCallConf::default()
        };
        assert_eq!(TransferCallConf::decode(&conf.encode_body()).unwrap(), conf);
    }

    #[test]
    fn hold_and_retrieve_round_trip() {
        let hold = HoldCallReq {
            invoke_id: 12,
            connection_call_id: 300,
            connection_device_id: "2001".into(),
            ..HoldCallReq::default()
        };
        assert_eq!(HoldCallReq::decode(&hold.encode_body()).unwrap(), hold);
        assert_eq!(
            HoldCallConf::decode(&HoldCallConf { invoke_id: 12 }.encode_body()).unwrap(),
            HoldCallConf { invoke_id: 12 }
        );

        let retrieve = RetrieveCallReq {
            invoke_id: 13,
            connection_call_id: 300,
            ..RetrieveCallReq::default()
        };
        assert_eq!(RetrieveCallReq::decode(&retrieve.encode_body()).unwrap(), retrieve);
    }
}
