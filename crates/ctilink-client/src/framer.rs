//! Frame reader for the connection's read half.
//!
//! One operation: accumulate 8 header bytes, validate the declared
//! length, accumulate that many body bytes, hand them to the catalog. A
//! deadline expiry maps to [`ClientError::ReadTimeout`] so the dispatch
//! loop can treat it as a cancellation checkpoint rather than a failure;
//! bytes already received stay buffered, so a frame split across
//! deadline boundaries still decodes. EOF mid-frame is a fatal transport
//! error. The framer is restartable: every call consumes exactly one
//! frame, so back-to-back messages are read back in order.

use std::io;
use std::time::Duration;

use bytes::{Buf, BytesMut};
use ctilink_proto::{Message, MessageHeader, HEADER_LEN};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::time::timeout;

use crate::error::ClientError;

#[derive(Debug)]
pub(crate) struct Framer<R> {
    reader: R,
    buf: BytesMut,
}

impl<R: AsyncRead + Unpin> Framer<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            reader,
            buf: BytesMut::with_capacity(4 * 1024),
        }
    }

    /// Reads one complete message within `deadline`.
    pub(crate) async fn read_message(
        &mut self,
        deadline: Duration,
    ) -> Result<Message, ClientError> {
        match timeout(deadline, self.fill_one_frame()).await {
            Ok(result) => result,
            // Partial bytes stay in self.buf for the next call.
            Err(_elapsed) => Err(ClientError::ReadTimeout),
        }
    }

    async fn fill_one_frame(&mut self) -> Result<Message, ClientError> {
        loop {
            if self.buf.len() >= HEADER_LEN {
                let header_bytes: [u8; HEADER_LEN] =
                    self.buf[..HEADER_LEN].try_into().expect("sliced to length");
                // Length is validated before the body is buffered or
                // allocated.
                let header = MessageHeader::parse(&header_bytes)?;
                let total = HEADER_LEN + header.length as usize;

                if self.buf.len() >= total {
                    self.buf.advance(HEADER_LEN);
                    let body = self.buf.split_to(header.length as usize);
                    return Message::decode(header.type_id, &body).map_err(|source| {
                        ClientError::Decode {
                            type_id: header.type_id,
                            len: header.length,
                            source,
                        }
                    });
                }
                self.buf.reserve(total - self.buf.len());
            }

            let n = self
                .reader
                .read_buf(&mut self.buf)
                .await
                .map_err(ClientError::Transport)?;
            if n == 0 {
                return Err(ClientError::Transport(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "connection closed by peer",
                )));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctilink_proto::messages::{HeartbeatConf, SystemEvent};
    use ctilink_proto::{encode_message, MAX_BODY_LEN};
    use tokio::io::AsyncWriteExt;

    const DEADLINE: Duration = Duration::from_secs(1);

    #[tokio::test]
    async fn reads_back_to_back_messages_in_order() {
        let (mut tx, rx) = tokio::io::duplex(4096);
        let mut framer = Framer::new(rx);

        for invoke_id in 1..=3u32 {
            let msg = Message::HeartbeatConf(HeartbeatConf { invoke_id });
            tx.write_all(&encode_message(&msg).unwrap()).await.unwrap();
        }
        let event = Message::System(SystemEvent {
            system_event_id: 3,
            ..SystemEvent::default()
        });
        tx.write_all(&encode_message(&event).unwrap()).await.unwrap();

        for invoke_id in 1..=3u32 {
            let msg = framer.read_message(DEADLINE).await.unwrap();
            assert_eq!(msg, Message::HeartbeatConf(HeartbeatConf { invoke_id }));
        }
        assert_eq!(framer.read_message(DEADLINE).await.unwrap(), event);
    }

    #[tokio::test]
    async fn unknown_type_is_forwarded_as_generic() {
        let (mut tx, rx) = tokio::io::duplex(256);
        let mut framer = Framer::new(rx);

        let mut wire = Vec::new();
        wire.extend_from_slice(&3u32.to_be_bytes());
        wire.extend_from_slice(&9999u32.to_be_bytes());
        wire.extend_from_slice(&[0xAA, 0xBB, 0xCC]);
        tx.write_all(&wire).await.unwrap();

        let msg = framer.read_message(DEADLINE).await.unwrap();
        assert_eq!(msg.type_id(), 9999);
        assert_eq!(msg.encode_body(), [0xAA, 0xBB, 0xCC]);
    }

    #[tokio::test]
    async fn oversized_header_is_a_framing_error() {
        let (mut tx, rx) = tokio::io::duplex(256);
        let mut framer = Framer::new(rx);

        let mut wire = Vec::new();
        wire.extend_from_slice(&(MAX_BODY_LEN + 1).to_be_bytes());
        wire.extend_from_slice(&5u32.to_be_bytes());
        tx.write_all(&wire).await.unwrap();

        assert!(matches!(
            framer.read_message(DEADLINE).await,
            Err(ClientError::Framing(_))
        ));
    }

    #[tokio::test]
    async fn short_body_then_eof_is_a_transport_error() {
        let (mut tx, rx) = tokio::io::duplex(256);
        let mut framer = Framer::new(rx);

        let mut wire = Vec::new();
        wire.extend_from_slice(&10u32.to_be_bytes()); // claims 10 body bytes
        wire.extend_from_slice(&5u32.to_be_bytes());
        wire.extend_from_slice(&[0x00, 0x01]); // only 2 arrive
        tx.write_all(&wire).await.unwrap();
        drop(tx);

        assert!(matches!(
            framer.read_message(DEADLINE).await,
            Err(ClientError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn frame_split_across_deadlines_still_decodes() {
        let (mut tx, rx) = tokio::io::duplex(256);
        let mut framer = Framer::new(rx);

        let msg = Message::HeartbeatConf(HeartbeatConf { invoke_id: 5 });
        let wire = encode_message(&msg).unwrap();

        // First half arrives, then the deadline expires.
        tx.write_all(&wire[..5]).await.unwrap();
        assert!(matches!(
            framer.read_message(Duration::from_millis(20)).await,
            Err(ClientError::ReadTimeout)
        ));

        // Second half arrives; the buffered prefix is not lost.
        tx.write_all(&wire[5..]).await.unwrap();
        assert_eq!(framer.read_message(DEADLINE).await.unwrap(), msg);
    }

    #[tokio::test]
    async fn idle_stream_times_out_cleanly() {
        let (_tx, rx) = tokio::io::duplex(256);
        let mut framer = Framer::new(rx);

        assert!(matches!(
            framer.read_message(Duration::from_millis(20)).await,
            Err(ClientError::ReadTimeout)
        ));
    }
}
