//! Session lifecycle tests against a scripted in-process gateway.
//!
//! Each test binds a loopback listener and plays the server side of the
//! protocol by hand: read a frame, assert on it, answer. The client under
//! test runs its real loop against the socket.

use std::sync::Arc;
use std::time::Duration;

use ctilink_client::{Client, ClientConfig, ClientError, SessionState};
use ctilink_proto::messages::{
    CloseConf, GenericMessage, HeartbeatConf, OpenConf, SystemEvent,
};
use ctilink_proto::{encode_message, Message, MessageHeader, HEADER_LEN};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout};
use tokio_util::sync::CancellationToken;

async fn read_frame(stream: &mut TcpStream) -> std::io::Result<Message> {
    let mut header_buf = [0u8; HEADER_LEN];
    stream.read_exact(&mut header_buf).await?;
    let header = MessageHeader::parse(&header_buf).expect("well-formed header");
    let mut body = vec![0u8; header.length as usize];
    stream.read_exact(&mut body).await?;
    Ok(Message::decode(header.type_id, &body).expect("decodable message"))
}

async fn send_frame(stream: &mut TcpStream, msg: &Message) {
    let wire = encode_message(msg).expect("encodable message");
    stream.write_all(&wire).await.expect("server write");
}

fn test_config(port: u16) -> ClientConfig {
    ClientConfig {
        server_host: "127.0.0.1".into(),
        server_port: port,
        reconnect_delay: Duration::from_millis(50),
        ..ClientConfig::default()
    }
}

/// Polls until `cond` holds or a few seconds pass.
async fn wait_for(mut cond: impl FnMut() -> bool) {
    timeout(Duration::from_secs(5), async {
        while !cond() {
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("condition not met in time");
}

/// Answers an OPEN_REQ with the given monitor id and returns the
/// request's invoke id.
async fn accept_open(stream: &mut TcpStream, monitor_id: u32) -> u32 {
    let msg = read_frame(stream).await.expect("OPEN_REQ");
    let req = match msg {
        Message::OpenReq(req) => req,
        other => panic!("expected OPEN_REQ, got {other:?}"),
    };
    assert_eq!(req.version_number, 24);

    let conf = OpenConf {
        invoke_id: req.invoke_id,
        services_granted: req.services_requested,
        monitor_id,
        agent_state: 2,
        flt_peripheral_id: 5001,
        ..OpenConf::default()
    };
    send_frame(stream, &Message::OpenConf(conf)).await;
    req.invoke_id
}

#[tokio::test]
async fn clean_open_stores_session_identity_and_forwards_events() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let client = Arc::new(Client::new(test_config(port), move |msg: Message| {
        events_tx.send(msg).unwrap();
    }));

    let cancel = CancellationToken::new();
    let run = tokio::spawn({
        let client = Arc::clone(&client);
        let cancel = cancel.clone();
        async move { client.run(cancel).await }
    });

    let (mut server, _) = listener.accept().await.unwrap();
    let msg = read_frame(&mut server).await.unwrap();
    let req = match msg {
        Message::OpenReq(req) => req,
        other => panic!("expected OPEN_REQ, got {other:?}"),
    };
    assert_eq!(req.version_number, 24);
    assert_eq!(req.services_requested, 0x11);
    assert_eq!(req.idle_timeout, 120);
    assert_eq!(req.client_id, "CTIService");

    send_frame(
        &mut server,
        &Message::OpenConf(OpenConf {
            invoke_id: req.invoke_id,
            services_granted: 0x11,
            monitor_id: 42,
            agent_state: 2,
            flt_peripheral_id: 5001,
            ..OpenConf::default()
        }),
    )
    .await;

    wait_for(|| client.state() == SessionState::Open).await;
    assert_eq!(client.monitor_id(), 42);
    assert_eq!(client.services_granted(), 0x11);
    assert_eq!(client.peripheral_id(), 5001);
    assert_eq!(client.agent_state(), 2);

    // An unknown type id reaches the handler as a generic message with
    // its exact body; a typed event follows it in order.
    send_frame(
        &mut server,
        &Message::Generic(GenericMessage {
            type_id: 9999,
            body: vec![0xAA, 0xBB, 0xCC],
        }),
    )
    .await;
    send_frame(
        &mut server,
        &Message::System(SystemEvent {
            system_event_id: 3,
            ..SystemEvent::default()
        }),
    )
    .await;

    let first = timeout(Duration::from_secs(3), events_rx.recv())
        .await
        .unwrap()
        .unwrap();
    match first {
        Message::Generic(generic) => {
            assert_eq!(generic.type_id, 9999);
            assert_eq!(generic.body, [0xAA, 0xBB, 0xCC]);
        }
        other => panic!("expected generic message first, got {other:?}"),
    }
    let second = timeout(Duration::from_secs(3), events_rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert!(matches!(second, Message::System(_)));

    cancel.cancel();
    let result = run.await.unwrap();
    assert!(matches!(result, Err(ClientError::Cancelled)));
}

#[tokio::test]
async fn reconnect_sends_fresh_open_req_and_stores_new_monitor_id() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let client = Arc::new(Client::new(test_config(port), |_msg: Message| {}));
    let cancel = CancellationToken::new();
    let run = tokio::spawn({
        let client = Arc::clone(&client);
        let cancel = cancel.clone();
        async move { client.run(cancel).await }
    });

    // First session.
    let (mut first, _) = listener.accept().await.unwrap();
    let first_invoke = accept_open(&mut first, 7).await;
    wait_for(|| client.monitor_id() == 7).await;

    // Drop the connection; the client must tear down and come back.
    drop(first);
    let (mut second, _) = listener.accept().await.unwrap();
    let msg = read_frame(&mut second).await.unwrap();
    let req = match msg {
        Message::OpenReq(req) => req,
        other => panic!("expected OPEN_REQ, got {other:?}"),
    };
    // The invoke counter survives the reconnect.
    assert!(req.invoke_id > first_invoke);

    send_frame(
        &mut second,
        &Message::OpenConf(OpenConf {
            invoke_id: req.invoke_id,
            monitor_id: 9,
            ..OpenConf::default()
        }),
    )
    .await;

    wait_for(|| client.monitor_id() == 9).await;
    assert_eq!(client.state(), SessionState::Open);

    cancel.cancel();
    let _ = run.await.unwrap();
}

#[tokio::test]
async fn heartbeats_are_confirmed_and_session_stays_open() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let cfg = ClientConfig {
        heartbeat_interval: Duration::from_millis(200),
        ..test_config(port)
    };
    let client = Arc::new(Client::new(cfg, |_msg: Message| {}));
    let cancel = CancellationToken::new();
    let run = tokio::spawn({
        let client = Arc::clone(&client);
        let cancel = cancel.clone();
        async move { client.run(cancel).await }
    });

    let (mut server, _) = listener.accept().await.unwrap();
    accept_open(&mut server, 42).await;
    wait_for(|| client.state() == SessionState::Open).await;

    let mut last_invoke = 0;
    for _ in 0..2 {
        let msg = timeout(Duration::from_secs(3), read_frame(&mut server))
            .await
            .unwrap()
            .unwrap();
        let req = match msg {
            Message::HeartbeatReq(req) => req,
            other => panic!("expected HEARTBEAT_REQ, got {other:?}"),
        };
        assert!(req.invoke_id > last_invoke);
        last_invoke = req.invoke_id;

        send_frame(
            &mut server,
            &Message::HeartbeatConf(HeartbeatConf {
                invoke_id: req.invoke_id,
            }),
        )
        .await;
    }

    // Confirmed heartbeats keep the session open.
    sleep(Duration::from_millis(300)).await;
    assert_eq!(client.state(), SessionState::Open);

    cancel.cancel();
    let _ = run.await.unwrap();
}

#[tokio::test]
async fn unanswered_heartbeats_trigger_reconnect() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let cfg = ClientConfig {
        heartbeat_interval: Duration::from_millis(100),
        ..test_config(port)
    };
    let client = Arc::new(Client::new(cfg, |_msg: Message| {}));
    let cancel = CancellationToken::new();
    let run = tokio::spawn({
        let client = Arc::clone(&client);
        let cancel = cancel.clone();
        async move { client.run(cancel).await }
    });

    let (mut first, _) = listener.accept().await.unwrap();
    accept_open(&mut first, 7).await;
    wait_for(|| client.state() == SessionState::Open).await;

    // Swallow heartbeats without confirming until the client gives up
    // on the link.
    let swallow = tokio::spawn(async move {
        while read_frame(&mut first).await.is_ok() {}
    });

    // Liveness trips after three unconfirmed ticks and the client dials
    // again.
    let (mut second, _) =
        timeout(Duration::from_secs(5), listener.accept()).await.unwrap().unwrap();
    accept_open(&mut second, 9).await;
    wait_for(|| client.monitor_id() == 9).await;

    swallow.await.unwrap();
    cancel.cancel();
    let _ = run.await.unwrap();
}

#[tokio::test]
async fn close_sends_close_req_and_run_returns_ok() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let client = Arc::new(Client::new(test_config(port), |_msg: Message| {}));
    let cancel = CancellationToken::new();
    let run = tokio::spawn({
        let client = Arc::clone(&client);
        let cancel = cancel.clone();
        async move { client.run(cancel).await }
    });

    let (mut server, _) = listener.accept().await.unwrap();
    accept_open(&mut server, 42).await;
    wait_for(|| client.state() == SessionState::Open).await;

    let closer = tokio::spawn({
        let client = Arc::clone(&client);
        async move { client.close().await }
    });

    let msg = timeout(Duration::from_secs(3), read_frame(&mut server))
        .await
        .unwrap()
        .unwrap();
    let req = match msg {
        Message::CloseReq(req) => req,
        other => panic!("expected CLOSE_REQ, got {other:?}"),
    };
    send_frame(
        &mut server,
        &Message::CloseConf(CloseConf {
            invoke_id: req.invoke_id,
        }),
    )
    .await;

    closer.await.unwrap();
    let result = timeout(Duration::from_secs(3), run).await.unwrap().unwrap();
    assert!(result.is_ok());
    assert_eq!(client.state(), SessionState::Disconnected);
}

#[tokio::test]
async fn call_control_requests_use_fresh_invoke_ids() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let client = Arc::new(Client::new(test_config(port), |_msg: Message| {}));
    let cancel = CancellationToken::new();
    let run = tokio::spawn({
        let client = Arc::clone(&client);
        let cancel = cancel.clone();
        async move { client.run(cancel).await }
    });

    let (mut server, _) = listener.accept().await.unwrap();
    accept_open(&mut server, 42).await;
    wait_for(|| client.state() == SessionState::Open).await;

    let hold_invoke = client
        .hold_call(5001, 300, 0, "2001")
        .await
        .expect("hold request");
    let msg = timeout(Duration::from_secs(3), read_frame(&mut server))
        .await
        .unwrap()
        .unwrap();
    match msg {
        Message::HoldCallReq(req) => {
            assert_eq!(req.invoke_id, hold_invoke);
            assert_eq!(req.connection_call_id, 300);
            assert_eq!(req.connection_device_id, "2001");
        }
        other => panic!("expected HOLD_CALL_REQ, got {other:?}"),
    }

    let retrieve_invoke = client
        .retrieve_call(5001, 300, 0, "2001")
        .await
        .expect("retrieve request");
    assert!(retrieve_invoke > hold_invoke);
    let msg = timeout(Duration::from_secs(3), read_frame(&mut server))
        .await
        .unwrap()
        .unwrap();
    assert!(matches!(msg, Message::RetrieveCallReq(_)));

    cancel.cancel();
    let _ = run.await.unwrap();
}
