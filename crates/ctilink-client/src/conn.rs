//! The shared write path of the connection.
//!
//! The write half sits behind one async mutex shared by the heartbeat
//! task, caller-issued requests, and `close()`. Each send is
//! "check-not-null, write all bytes" under the lock; nothing else is
//! awaited while holding it. A closed connection leaves a null sentinel
//! behind so late writers get [`ClientError::NotConnected`] instead of a
//! broken-pipe surprise.

use ctilink_proto::{encode_message, Message};
use tokio::io::AsyncWriteExt;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::sync::Mutex;

use crate::error::ClientError;

/// Mutex-guarded write half.
#[derive(Debug, Default)]
pub(crate) struct ConnHandle {
    writer: Mutex<Option<OwnedWriteHalf>>,
}

impl ConnHandle {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Installs the write half of a freshly dialed connection.
    pub(crate) async fn install(&self, writer: OwnedWriteHalf) {
        *self.writer.lock().await = Some(writer);
    }

    /// Encodes and sends one message.
    pub(crate) async fn send(&self, msg: &Message) -> Result<(), ClientError> {
        let wire = encode_message(msg)?;

        let mut guard = self.writer.lock().await;
        let writer = guard.as_mut().ok_or(ClientError::NotConnected)?;
        writer.write_all(&wire).await.map_err(ClientError::Transport)
    }

    /// Drops the write half; later sends fail with `NotConnected`.
    ///
    /// Shutdown errors are ignored — the socket may already be gone, and
    /// teardown must proceed either way.
    pub(crate) async fn close(&self) {
        if let Some(mut writer) = self.writer.lock().await.take() {
            let _ = writer.shutdown().await;
        }
    }

    /// True while a connection is installed.
    pub(crate) async fn is_connected(&self) -> bool {
        self.writer.lock().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctilink_proto::messages::HeartbeatReq;

    #[tokio::test]
    async fn send_without_connection_is_not_connected() {
        let conn = ConnHandle::new();
        let msg = Message::HeartbeatReq(HeartbeatReq { invoke_id: 1 });
        assert!(matches!(
            conn.send(&msg).await,
            Err(ClientError::NotConnected)
        ));
        assert!(!conn.is_connected().await);
    }

    #[tokio::test]
    async fn close_leaves_null_sentinel() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (client, _server) = tokio::join!(
            tokio::net::TcpStream::connect(addr),
            listener.accept()
        );
        let (_read, write) = client.unwrap().into_split();

        let conn = ConnHandle::new();
        conn.install(write).await;
        assert!(conn.is_connected().await);

        let msg = Message::HeartbeatReq(HeartbeatReq { invoke_id: 1 });
        conn.send(&msg).await.unwrap();

        conn.close().await;
        assert!(!conn.is_connected().await);
        assert!(matches!(
            conn.send(&msg).await,
            Err(ClientError::NotConnected)
        ));
    }
}
