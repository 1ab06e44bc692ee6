use gs_core::CoordinateError;
use thiserror::Error;

/// Errors returned by the ground station client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("server error: {status} from {url}")]
    Status { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Submission was blocked before any network call.
    #[error("invalid coordinates: {0}")]
    InvalidCoordinate(#[from] CoordinateError),

    #[error("request {0} is not in the local cache")]
    UnknownRequest(i64),

    #[error("request {id} cannot be cancelled: {reason}")]
    NotCancellable { id: i64, reason: String },

    #[error("terminal connection error: {0}")]
    WebSocket(Box<tokio_tungstenite::tungstenite::Error>),
}

impl From<tokio_tungstenite::tungstenite::Error> for ClientError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        ClientError::WebSocket(Box::new(err))
    }
}
