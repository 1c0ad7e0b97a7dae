//! The typed message catalog.
//!
//! Every known message is a plain struct with two inherent methods —
//! `decode(body)` and `encode_body()` — and a variant in the [`Message`]
//! enum. The `catalog!` table below is the registry: given a type id it
//! routes body bytes to the right decoder, and any id not in the table
//! decodes to [`GenericMessage`] so newer servers never break dispatch.
//!
//! Decoders read the fixed region first, then parse the floating region
//! only if bytes remain, populating the tags they recognize and skipping
//! the rest. Encoders write the fixed region in wire order, then every
//! non-default floating field.

mod agent;
mod call;
mod config;
mod control;
mod session;

pub use agent::{
    AgentPreCallAbortEvent, AgentPreCallEvent, AgentStateEvent, SupervisorAssistEvent,
    SystemEvent,
};
pub use call::{
    BeginCallEvent, CallClearedEvent, CallConferencedEvent, CallConnectionClearedEvent,
    CallDataUpdateEvent, CallDeliveredEvent, CallDequeuedEvent, CallEstablishedEvent,
    CallFailedEvent, CallHeldEvent, CallOriginatedEvent, CallQueuedEvent,
    CallRetrievedEvent, CallServiceInitiatedEvent, CallTransferredEvent, CallVariables,
    EndCallEvent,
};
pub use config::{
    ConfigAgentEvent, ConfigBeginEvent, ConfigCsqEvent, ConfigDeviceEvent,
    ConfigEndEvent, ConfigRequestEvent,
};
pub use control::{
    ConferenceCallConf, ConferenceCallReq, ConsultCallConf, ConsultCallReq, HoldCallConf,
    HoldCallReq, RetrieveCallConf, RetrieveCallReq, TransferCallConf, TransferCallReq,
};
pub use session::{
    CloseConf, CloseReq, FailureConf, FailureEvent, HeartbeatConf, HeartbeatReq,
    OpenConf, OpenReq,
};

use crate::error::ProtocolError;
use crate::types;

/// Fallback for type ids not in the catalog.
///
/// The raw body is carried verbatim and re-encoding returns it unchanged,
/// so unknown messages survive a round trip byte-for-byte.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenericMessage {
    /// Message type id from the header.
    pub type_id: u32,
    /// Undecoded body bytes.
    pub body: Vec<u8>,
}

/// Builds the [`Message`] enum and its type-id dispatch from one table.
///
/// This is the declarative registry: each row is
/// `Variant(Type) = TYPE_ID_CONST`.
macro_rules! catalog {
    ($( $name:ident($ty:ty) = $id:path ),+ $(,)?) => {
        /// A decoded protocol message.
        #[derive(Debug, Clone, PartialEq)]
        #[allow(missing_docs)]
        pub enum Message {
            $( $name($ty), )+
            /// A message whose type id is not in the catalog.
            Generic(GenericMessage),
        }

        impl Message {
            /// The wire type id of this message.
            pub fn type_id(&self) -> u32 {
                match self {
                    $( Self::$name(_) => $id, )+
                    Self::Generic(m) => m.type_id,
                }
            }

            /// Decodes `body` as the message identified by `type_id`.
            ///
            /// Unknown type ids succeed as [`Message::Generic`]; only a
            /// malformed body for a known type is an error.
            pub fn decode(type_id: u32, body: &[u8]) -> Result<Self, ProtocolError> {
                match type_id {
                    $( $id => <$ty>::decode(body).map(Self::$name), )+
                    _ => Ok(Self::Generic(GenericMessage {
                        type_id,
                        body: body.to_vec(),
                    })),
                }
            }

            /// Serializes the message body (header excluded).
            pub fn encode_body(&self) -> Vec<u8> {
                match self {
                    $( Self::$name(m) => m.encode_body(), )+
                    Self::Generic(m) => m.body.clone(),
                }
            }
        }
    };
}

catalog! {
    FailureConf(FailureConf) = types::MSG_FAILURE_CONF,
    FailureEvent(FailureEvent) = types::MSG_FAILURE_EVENT,
    OpenReq(OpenReq) = types::MSG_OPEN_REQ,
    OpenConf(OpenConf) = types::MSG_OPEN_CONF,
    HeartbeatReq(HeartbeatReq) = types::MSG_HEARTBEAT_REQ,
    HeartbeatConf(HeartbeatConf) = types::MSG_HEARTBEAT_CONF,
    CloseReq(CloseReq) = types::MSG_CLOSE_REQ,
    CloseConf(CloseConf) = types::MSG_CLOSE_CONF,
    CallDelivered(CallDeliveredEvent) = types::MSG_CALL_DELIVERED_EVENT,
    CallEstablished(CallEstablishedEvent) = types::MSG_CALL_ESTABLISHED_EVENT,
    CallHeld(CallHeldEvent) = types::MSG_CALL_HELD_EVENT,
    CallRetrieved(CallRetrievedEvent) = types::MSG_CALL_RETRIEVED_EVENT,
    CallCleared(CallClearedEvent) = types::MSG_CALL_CLEARED_EVENT,
    CallConnectionCleared(CallConnectionClearedEvent) = types::MSG_CALL_CONNECTION_CLEARED_EVENT,
    CallOriginated(CallOriginatedEvent) = types::MSG_CALL_ORIGINATED_EVENT,
    CallFailed(CallFailedEvent) = types::MSG_CALL_FAILED_EVENT,
    CallConferenced(CallConferencedEvent) = types::MSG_CALL_CONFERENCED_EVENT,
    CallTransferred(CallTransferredEvent) = types::MSG_CALL_TRANSFERRED_EVENT,
    CallServiceInitiated(CallServiceInitiatedEvent) = types::MSG_CALL_SERVICE_INITIATED_EVENT,
    CallQueued(CallQueuedEvent) = types::MSG_CALL_QUEUED_EVENT,
    BeginCall(BeginCallEvent) = types::MSG_BEGIN_CALL_EVENT,
    EndCall(EndCallEvent) = types::MSG_END_CALL_EVENT,
    CallDataUpdate(CallDataUpdateEvent) = types::MSG_CALL_DATA_UPDATE_EVENT,
    AgentState(AgentStateEvent) = types::MSG_AGENT_STATE_EVENT,
    System(SystemEvent) = types::MSG_SYSTEM_EVENT,
    ConferenceCallReq(ConferenceCallReq) = types::MSG_CONFERENCE_CALL_REQ,
    ConferenceCallConf(ConferenceCallConf) = types::MSG_CONFERENCE_CALL_CONF,
    ConsultCallReq(ConsultCallReq) = types::MSG_CONSULT_CALL_REQ,
    ConsultCallConf(ConsultCallConf) = types::MSG_CONSULT_CALL_CONF,
    HoldCallReq(HoldCallReq) = types::MSG_HOLD_CALL_REQ,
    HoldCallConf(HoldCallConf) = types::MSG_HOLD_CALL_CONF,
    RetrieveCallReq(RetrieveCallReq) = types::MSG_RETRIEVE_CALL_REQ,
    RetrieveCallConf(RetrieveCallConf) = types::MSG_RETRIEVE_CALL_CONF,
    TransferCallReq(TransferCallReq) = types::MSG_TRANSFER_CALL_REQ,
    TransferCallConf(TransferCallConf) = types::MSG_TRANSFER_CALL_CONF,
    CallDequeued(CallDequeuedEvent) = types::MSG_CALL_DEQUEUED_EVENT,
    AgentPreCall(AgentPreCallEvent) = types::MSG_AGENT_PRE_CALL_EVENT,
    AgentPreCallAbort(AgentPreCallAbortEvent) = types::MSG_AGENT_PRE_CALL_ABORT_EVENT,
    SupervisorAssist(SupervisorAssistEvent) = types::MSG_SUPERVISOR_ASSIST_EVENT,
    ConfigRequest(ConfigRequestEvent) = types::MSG_CONFIG_REQUEST_EVENT,
    ConfigBegin(ConfigBeginEvent) = types::MSG_CONFIG_BEGIN_EVENT,
    ConfigEnd(ConfigEndEvent) = types::MSG_CONFIG_END_EVENT,
    ConfigCsq(ConfigCsqEvent) = types::MSG_CONFIG_CSQ_EVENT,
    ConfigAgent(ConfigAgentEvent) = types::MSG_CONFIG_AGENT_EVENT,
    ConfigDevice(ConfigDeviceEvent) = types::MSG_CONFIG_DEVICE_EVENT,
}

impl Message {
    /// Human-readable message name for diagnostics.
    pub fn name(&self) -> &'static str {
        types::message_type_name(self.type_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_type_decodes_to_generic_with_exact_bytes() {
        let msg = Message::decode(9999, &[0xAA, 0xBB, 0xCC]).unwrap();
        match &msg {
            Message::Generic(g) => {
                assert_eq!(g.type_id, 9999);
                assert_eq!(g.body, [0xAA, 0xBB, 0xCC]);
            }
            other => panic!("expected Generic, got {other:?}"),
        }
        assert_eq!(msg.type_id(), 9999);
        assert_eq!(msg.encode_body(), [0xAA, 0xBB, 0xCC]);
    }

    #[test]
    fn known_type_dispatches_to_typed_decoder() {
        let body = 42u32.to_be_bytes();
        let msg = Message::decode(types::MSG_HEARTBEAT_CONF, &body).unwrap();
        assert_eq!(msg, Message::HeartbeatConf(HeartbeatConf { invoke_id: 42 }));
        assert_eq!(msg.name(), "HEARTBEAT_CONF");
    }

    #[test]
    fn every_catalog_entry_round_trips_default() {
        // A zeroed message of each catalog type must survive
        // encode -> decode unchanged.
        let ids = [
            types::MSG_FAILURE_CONF,
            types::MSG_FAILURE_EVENT,
            types::MSG_OPEN_REQ,
            types::MSG_OPEN_CONF,
            types::MSG_HEARTBEAT_REQ,
            types::MSG_HEARTBEAT_CONF,
            types::MSG_CLOSE_REQ,
            types::MSG_CLOSE_CONF,
            types::MSG_CALL_DELIVERED_EVENT,
            types::MSG_CALL_ESTABLISHED_EVENT,
            types::MSG_CALL_HELD_EVENT,
            types::MSG_CALL_RETRIEVED_EVENT,
            types::MSG_CALL_CLEARED_EVENT,
            types::MSG_CALL_CONNECTION_CLEARED_EVENT,
            types::MSG_CALL_ORIGINATED_EVENT,
            types::MSG_CALL_FAILED_EVENT,
            types::MSG_CALL_CONFERENCED_EVENT,
            types::MSG_CALL_TRANSFERRED_EVENT,
            types::MSG_CALL_SERVICE_INITIATED_EVENT,
            types::MSG_CALL_QUEUED_EVENT,
            types::MSG_BEGIN_CALL_EVENT,
            types::MSG_END_CALL_EVENT,
            types::MSG_CALL_DATA_UPDATE_EVENT,
            types::MSG_AGENT_STATE_EVENT,
            types::MSG_SYSTEM_EVENT,
            types::MSG_CONFERENCE_CALL_REQ,
            types::MSG_CONFERENCE_CALL_CONF,
            types::MSG_CONSULT_CALL_REQ,
            types::MSG_CONSULT_CALL_CONF,
            types::MSG_HOLD_CALL_REQ,
            types::MSG_HOLD_CALL_CONF,
            types::MSG_RETRIEVE_CALL_REQ,
            types::MSG_RETRIEVE_CALL_CONF,
            types::MSG_TRANSFER_CALL_REQ,
            types::MSG_TRANSFER_CALL_CONF,
            types::MSG_CALL_DEQUEUED_EVENT,
            types::MSG_AGENT_PRE_CALL_EVENT,
            types::MSG_AGENT_PRE_CALL_ABORT_EVENT,
            types::MSG_SUPERVISOR_ASSIST_EVENT,
            types::MSG_CONFIG_REQUEST_EVENT,
            types::MSG_CONFIG_BEGIN_EVENT,
            types::MSG_CONFIG_END_EVENT,
            types::MSG_CONFIG_CSQ_EVENT,
            types::MSG_CONFIG_AGENT_EVENT,
            types::MSG_CONFIG_DEVICE_EVENT,
        ];

        for id in ids {
            // 128 zero bytes cover every fixed region in the catalog; the
            // remainder parses as zero-tag floating entries.
            let msg = Message::decode(id, &[0u8; 128]).unwrap();
            let body = msg.encode_body();
            let back = Message::decode(id, &body).unwrap();
            assert_eq!(back, msg, "round trip failed for type {id}");
        }
    }
}
