//! Terminal session tests against an in-process WebSocket server.

use futures::{SinkExt, StreamExt};
use gs_client::{LineSender, TerminalSession};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;

/// Starts a one-connection server that answers each command with a status
/// frame, an ignored heartbeat frame, a command frame, and a plain-text
/// line, then closes after the first command.
async fn spawn_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind should succeed");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let mut ws = tokio_tungstenite::accept_async(stream)
            .await
            .expect("handshake");

        if let Some(Ok(Message::Text(command))) = ws.next().await {
            let frames = [
                serde_json::json!({
                    "type": "status",
                    "message": "...",
                    "timestamp": "2025-06-01 10:20:30",
                    "source": "raspberry-pi"
                })
                .to_string(),
                serde_json::json!({
                    "type": "heartbeat",
                    "message": "",
                    "timestamp": "2025-06-01 10:20:30"
                })
                .to_string(),
                serde_json::json!({
                    "type": "command",
                    "message": format!("ran {command}"),
                    "timestamp": "2025-06-01 10:20:31"
                })
                .to_string(),
                "plain output".to_string(),
            ];
            for frame in frames {
                ws.send(Message::Text(frame)).await.expect("send");
            }
        }
        let _ = ws.close(None).await;
    });

    format!("ws://{addr}/ws")
}

#[tokio::test]
async fn session_round_trip_filters_and_falls_back() {
    let url = spawn_server().await;
    let mut session = TerminalSession::connect(&url)
        .await
        .expect("connect should succeed");

    let echoed = session
        .send_command("uptime")
        .await
        .expect("send should succeed")
        .expect("non-blank command is echoed");
    assert_eq!(echoed.sender, LineSender::User);
    assert_eq!(echoed.text, "uptime");

    let first = session.next_line().await.unwrap().unwrap();
    assert_eq!(first.text, "...");
    assert_eq!(first.timestamp, "2025-06-01 10:20:30");

    let second = session.next_line().await.unwrap().unwrap();
    assert_eq!(second.text, "ran uptime");

    let third = session.next_line().await.unwrap().unwrap();
    assert_eq!(third.text, "plain output");
    assert_eq!(third.sender, LineSender::Server);

    assert!(session.next_line().await.unwrap().is_none());
}

#[tokio::test]
async fn blank_command_is_not_sent() {
    let url = spawn_server().await;
    let mut session = TerminalSession::connect(&url)
        .await
        .expect("connect should succeed");

    assert!(session.send_command("   ").await.unwrap().is_none());
    session.close().await.expect("close should succeed");
}

#[tokio::test]
async fn connect_to_closed_port_fails() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = TerminalSession::connect(&format!("ws://{addr}/ws")).await;
    assert!(result.is_err());
}
