//! Client-side plumbing for the ground station REST service and the
//! operator terminal.

pub mod cache;
pub mod client;
pub mod error;
pub mod poll;
pub mod submit;
pub mod terminal;

pub use cache::RequestCache;
pub use client::{GroundStationClient, RequestQuery};
pub use error::ClientError;
pub use poll::{poll_every, PollStats};
pub use submit::{cancel_request, submit_request, CancelMode};
pub use terminal::{
    format_timestamp, parse_frame, LineSender, TerminalLine, TerminalSession, WsSocket,
};
