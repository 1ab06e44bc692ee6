//! WebSocket text terminal to the ground station host.
//!
//! Commands go out as raw text. Replies come back as JSON frames
//! `{"type", "message", "timestamp"}` where `type` is `command`, `status`,
//! or `error`; frames of other types are dropped. Text that is not JSON, or
//! is a bare `null`, is shown verbatim with a local timestamp.

use chrono::{DateTime, Local, NaiveDateTime};
use futures::{Sink, SinkExt, Stream, StreamExt};
use serde::Deserialize;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use crate::error::ClientError;

/// Socket type produced by [`TerminalSession::connect`].
pub type WsSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

const SERVER_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSender {
    User,
    Server,
}

/// One rendered line of terminal history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalLine {
    pub text: String,
    pub timestamp: String,
    pub sender: LineSender,
}

impl TerminalLine {
    fn user(text: &str) -> Self {
        Self {
            text: text.to_string(),
            timestamp: local_timestamp(),
            sender: LineSender::User,
        }
    }
}

impl std::fmt::Display for TerminalLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stamp = format_timestamp(&self.timestamp);
        match self.sender {
            LineSender::User => write!(f, "[{stamp}] user@pi:~$ {}", self.text),
            LineSender::Server => write!(f, "[{stamp}] pi> {}", self.text),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Frame {
    #[serde(rename = "type")]
    kind: String,
    message: String,
    #[serde(default)]
    timestamp: Option<String>,
}

fn local_timestamp() -> String {
    Local::now().format(SERVER_TIMESTAMP_FORMAT).to_string()
}

/// Renders a server or local timestamp as `D Mon YYYY HH:MM:SS`. Anything
/// unparsable is returned unchanged.
#[must_use]
pub fn format_timestamp(raw: &str) -> String {
    const DISPLAY: &str = "%-d %b %Y %H:%M:%S";
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, SERVER_TIMESTAMP_FORMAT) {
        return naive.format(DISPLAY).to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(DISPLAY).to_string();
    }
    raw.to_string()
}

/// Turns one incoming text frame into a terminal line.
///
/// `fallback_timestamp` is only called for plain-text frames. Returns
/// `None` for JSON frames that are not a recognised terminal message.
pub fn parse_frame(raw: &str, fallback_timestamp: impl FnOnce() -> String) -> Option<TerminalLine> {
    let value = match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Null) | Err(_) => {
            return Some(TerminalLine {
                text: raw.to_string(),
                timestamp: fallback_timestamp(),
                sender: LineSender::Server,
            });
        }
        Ok(value) => value,
    };

    let frame: Frame = match serde_json::from_value(value) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::debug!(error = %e, "dropping malformed terminal frame");
            return None;
        }
    };

    match frame.kind.as_str() {
        "command" | "status" | "error" => Some(TerminalLine {
            text: frame.message,
            timestamp: frame.timestamp.unwrap_or_else(fallback_timestamp),
            sender: LineSender::Server,
        }),
        other => {
            tracing::debug!(kind = other, "ignoring terminal frame");
            None
        }
    }
}

/// An open terminal connection.
///
/// Generic over the underlying socket so tests can run it against an
/// in-process server.
pub struct TerminalSession<S> {
    socket: S,
}

impl TerminalSession<WsSocket> {
    /// Connects to the terminal endpoint at `url` (`ws://` or `wss://`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::WebSocket`] if the handshake fails.
    pub async fn connect(url: &str) -> Result<Self, ClientError> {
        let (socket, response) = tokio_tungstenite::connect_async(url).await?;
        tracing::info!(url, status = response.status().as_u16(), "terminal connected");
        Ok(Self { socket })
    }
}

impl<S> TerminalSession<S>
where
    S: Stream<Item = Result<Message, WsError>> + Sink<Message, Error = WsError> + Unpin,
{
    pub fn new(socket: S) -> Self {
        Self { socket }
    }

    /// Sends a command. Blank input is not sent and yields `None`;
    /// otherwise returns the echoed user line.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::WebSocket`] if the frame cannot be written.
    pub async fn send_command(&mut self, input: &str) -> Result<Option<TerminalLine>, ClientError> {
        if input.trim().is_empty() {
            return Ok(None);
        }
        self.socket.send(Message::Text(input.to_string())).await?;
        tracing::debug!(command = input, "terminal command sent");
        Ok(Some(TerminalLine::user(input)))
    }

    /// Waits for the next displayable line. Returns `Ok(None)` once the
    /// server closes the connection.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::WebSocket`] on a protocol or transport error.
    pub async fn next_line(&mut self) -> Result<Option<TerminalLine>, ClientError> {
        while let Some(message) = self.socket.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    if let Some(line) = parse_frame(&text, local_timestamp) {
                        return Ok(Some(line));
                    }
                }
                Ok(Message::Binary(bytes)) => {
                    let text = String::from_utf8_lossy(&bytes);
                    if let Some(line) = parse_frame(&text, local_timestamp) {
                        return Ok(Some(line));
                    }
                }
                Ok(Message::Close(frame)) => {
                    tracing::info!(?frame, "terminal disconnected");
                    return Ok(None);
                }
                Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_)) => {}
                Err(WsError::ConnectionClosed | WsError::AlreadyClosed) => return Ok(None),
                Err(e) => return Err(e.into()),
            }
        }
        Ok(None)
    }

    /// Sends a close frame.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::WebSocket`] unless the socket was already
    /// closed.
    pub async fn close(mut self) -> Result<(), ClientError> {
        match self.socket.close().await {
            Ok(()) | Err(WsError::ConnectionClosed | WsError::AlreadyClosed) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
