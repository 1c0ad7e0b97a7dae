//! Configuration snapshot events.
//!
//! A full configuration download is framed by CONFIG_BEGIN … N record
//! events … CONFIG_END; each record event carries a flat
//! `(peripheral_id, operation, count)` fixed region with the record's
//! fields in floating tags. Consumers that need completeness key off the
//! BEGIN/END framing, not record counting — records arrive as separate
//! messages.

use crate::error::ProtocolError;
use crate::floating::{FloatingFields, FloatingWriter};
use crate::tags;
use crate::types;
use crate::wire::{BodyReader, BodyWriter};

/// CONFIG_REQUEST_EVENT (type 232) — requests a configuration download.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigRequestEvent {
    /// Peripheral whose configuration is requested.
    pub peripheral_id: u32,
    /// Which configuration category to send.
    pub config_type: u16,
}

impl ConfigRequestEvent {
    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let m = Self {
            peripheral_id: r.read_u32(),
            config_type: r.read_u16(),
        };
        r.check()?;
        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.write_u32(self.peripheral_id);
        w.write_u16(self.config_type);
        w.into_bytes()
    }
}

/// CONFIG_BEGIN_EVENT (type 233) — a configuration download starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigBeginEvent {
    /// Peripheral the download describes.
    pub peripheral_id: u32,
    /// Which configuration category follows.
    pub config_type: u16,
}

impl ConfigBeginEvent {
    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let m = Self {
            peripheral_id: r.read_u32(),
            config_type: r.read_u16(),
        };
        r.check()?;
        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.write_u32(self.peripheral_id);
        w.write_u16(self.config_type);
        w.into_bytes()
    }
}

/// CONFIG_END_EVENT (type 234) — the download is complete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigEndEvent {
    /// Peripheral the download described.
    pub peripheral_id: u32,
    /// Which configuration category was sent.
    pub config_type: u16,
    /// Total records sent between BEGIN and END.
    pub num_records: u32,
}

impl ConfigEndEvent {
    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let m = Self {
            peripheral_id: r.read_u32(),
            config_type: r.read_u16(),
            num_records: r.read_u32(),
        };
        r.check()?;
        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.write_u32(self.peripheral_id);
        w.write_u16(self.config_type);
        w.write_u32(self.num_records);
        w.into_bytes()
    }
}

/// CONFIG_AGENT_EVENT (type 237) — an agent record was added, updated or
/// deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigAgentEvent {
    /// Peripheral the record belongs to.
    pub peripheral_id: u32,
    /// Add, update or delete.
    pub config_operation: u16,
    /// Declared record count.
    pub num_records: u16,

    /// Agent id (tag 4).
    pub agent_id: String,
    /// Agent's extension (tag 3).
    pub agent_extension: String,
    /// Login id (tag 190).
    pub login_id: String,
    /// Last name (tag 138).
    pub last_name: String,
    /// First name (tag 137).
    pub first_name: String,
    /// Skill group id (tag 10).
    pub skill_group_id: u32,
}

impl ConfigAgentEvent {
    /// Human-readable name for the operation.
    pub fn operation_name(&self) -> &'static str {
        types::config_operation_name(self.config_operation)
    }

    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let mut m = Self {
            peripheral_id: r.read_u32(),
            config_operation: r.read_u16(),
            num_records: r.read_u16(),
            ..Self::default()
        };
        r.check()?;

        if r.remaining() > 0 {
            let ff = FloatingFields::parse(r.rest())?;
            m.agent_id = ff.first_str(tags::AGENT_ID);
            m.agent_extension = ff.first_str(tags::AGENT_EXTENSION);
            m.login_id = ff.first_str(tags::LOGIN_ID);
            m.last_name = ff.first_str(tags::LAST_NAME);
            m.first_name = ff.first_str(tags::FIRST_NAME);
            m.skill_group_id = ff.first_u32(tags::SKILL_GROUP_ID);
        }

        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.write_u32(self.peripheral_id);
        w.write_u16(self.config_operation);
        w.write_u16(self.num_records);

        let mut fw = FloatingWriter::new();
        fw.put_str(tags::AGENT_ID, &self.agent_id);
        fw.put_str(tags::AGENT_EXTENSION, &self.agent_extension);
        fw.put_str(tags::LOGIN_ID, &self.login_id);
        fw.put_str(tags::LAST_NAME, &self.last_name);
        fw.put_str(tags::FIRST_NAME, &self.first_name);
        fw.put_u32(tags::SKILL_GROUP_ID, self.skill_group_id);
        w.write_bytes(&fw.into_bytes());
        w.into_bytes()
    }
}

/// CONFIG_DEVICE_EVENT (type 238) — a device record was added, updated or
/// deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDeviceEvent {
    /// Peripheral the record belongs to.
    pub peripheral_id: u32,
    /// Add, update or delete.
    pub config_operation: u16,
    /// Declared record count.
    pub num_records: u16,

    /// Device extension (tag 3).
    pub extension: String,
    /// Associated skill group id (tag 10).
    pub skill_group_id: u32,
    /// Associated service id (tag 8).
    pub service_id: u32,
}

impl ConfigDeviceEvent {
    /// Human-readable name for the operation.
    pub fn operation_name(&self) -> &'static str {
        types::config_operation_name(self.config_operation)
    }

    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let mut m = Self {
            peripheral_id: r.read_u32(),
            config_operation: r.read_u16(),
            num_records: r.read_u16(),
            ..Self::default()
        };
        r.check()?;

        if r.remaining() > 0 {
            let ff = FloatingFields::parse(r.rest())?;
            m.extension = ff.first_str(tags::AGENT_EXTENSION);
            m.skill_group_id = ff.first_u32(tags::SKILL_GROUP_ID);
            m.service_id = ff.first_u32(tags::SERVICE_ID);
        }

        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.write_u32(self.peripheral_id);
        w.write_u16(self.config_operation);
        w.write_u16(self.num_records);

        let mut fw = FloatingWriter::new();
        fw.put_str(tags::AGENT_EXTENSION, &self.extension);
        fw.put_u32(tags::SKILL_GROUP_ID, self.skill_group_id);
        fw.put_u32(tags::SERVICE_ID, self.service_id);
        w.write_bytes(&fw.into_bytes());
        w.into_bytes()
    }
}

/// CONFIG_CSQ_EVENT (type 236) — a contact-service-queue record was added,
/// updated or deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigCsqEvent {
    /// Peripheral the record belongs to.
    pub peripheral_id: u32,
    /// Add, update or delete.
    pub config_operation: u16,
    /// Declared record count.
    pub num_records: u16,

    /// Contact service queue id (tag 62).
    pub csq_id: u32,
    /// Skill group id (tag 10).
    pub skill_group_id: u32,
    /// Skill group number (tag 9).
    pub skill_group_number: u32,
    /// Service id (tag 8).
    pub service_id: u32,
    /// Service number (tag 7).
    pub service_number: u32,
}

impl ConfigCsqEvent {
    /// Human-readable name for the operation.
    pub fn operation_name(&self) -> &'static str {
        types::config_operation_name(self.config_operation)
    }

    pub(crate) fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = BodyReader::new(body);
        let mut m = Self {
            peripheral_id: r.read_u32(),
            config_operation: r.read_u16(),
            num_records: r.read_u16(),
            ..Self::default()
        };
        r.check()?;

        if r.remaining() > 0 {
            let ff = FloatingFields::parse(r.rest())?;
            m.csq_id = ff.first_u32(tags::CSQ_ID);
            m.skill_group_id = ff.first_u32(tags::SKILL_GROUP_ID);
            m.skill_group_number = ff.first_u32(tags::SKILL_GROUP_NUMBER);
            m.service_id = ff.first_u32(tags::SERVICE_ID);
            m.service_number = ff.first_u32(tags::SERVICE_NUMBER);
        }

        Ok(m)
    }

    pub(crate) fn encode_body(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.write_u32(self.peripheral_id);
        w.write_u16(self.config_operation);
        w.write_u16(self.num_records);

        let mut fw = FloatingWriter::new();
        fw.put_u32(tags::CSQ_ID, self.csq_id);
        fw.put_u32(tags::SKILL_GROUP_ID, self.skill_group_id);
        fw.put_u32(tags::SKILL_GROUP_NUMBER, self.skill_group_number);
        fw.put_u32(tags::SERVICE_ID, self.service_id);
        fw.put_u32(tags::SERVICE_NUMBER, self.service_number);
        w.write_bytes(&fw.into_bytes());
        w.into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_end_framing_round_trip() {
        let begin = ConfigBeginEvent { peripheral_id: 5001, config_type: 1 };
        assert_eq!(ConfigBeginEvent::decode(&begin.encode_body()).unwrap(), begin);

        let end = ConfigEndEvent {
            peripheral_id: 5001,
            config_type: 1,
            num_records: 250,
        };
        assert_eq!(ConfigEndEvent::decode(&end.encode_body()).unwrap(), end);
    }

    #[test]
    fn agent_record_round_trip() {
        let event = ConfigAgentEvent {
            peripheral_id: 5001,
            config_operation: 2,
            num_records: 1,
            agent_id: "1001".into(),
            login_id: "jdoe".into(),
            last_name: "Doe".into(),
            first_name: "Jamie".into(),
            skill_group_id: 12,
            ..ConfigAgentEvent::default()
        };
        let back = ConfigAgentEvent::decode(&event.encode_body()).unwrap();
        assert_eq!(back, event);
        assert_eq!(back.operation_name(), "Update");
    }

    #[test]
    fn device_and_csq_records_round_trip() {
        let device = ConfigDeviceEvent {
            peripheral_id: 5001,
            config_operation: 1,
            num_records: 1,
            extension: "2001".into(),
            service_id: 4,
            ..ConfigDeviceEvent::default()
        };
        assert_eq!(ConfigDeviceEvent::decode(&device.encode_body()).unwrap(), device);

        let csq = ConfigCsqEvent {
            peripheral_id: 5001,
            config_operation: 3,
            num_records: 1,
            csq_id: 62,
            skill_group_number: 9,
            ..ConfigCsqEvent::default()
        };
        let back = ConfigCsqEvent::decode(&csq.encode_body()).unwrap();
        assert_eq!(back, csq);
        assert_eq!(back.operation_name(), "Delete");
    }
}
