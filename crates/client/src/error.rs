//! Errors of the room client.

use thiserror::Error;

#[derive(Debug, Error,)]
pub enum ClientError {
    #[error("room not found")]
    RoomNotFound,

    #[error("server answered {status}: {body}")]
    Status { status: u16, body: String, },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error,),

    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error,),

    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error,),

    #[error("no answer from {0} in time")]
    Timeout(String,),

    #[error("room event stream closed")]
    StreamClosed,

    #[error("invalid url: {0}")]
    InvalidUrl(String,),

    #[error("runtime error: {0}")]
    Runtime(#[from] std::io::Error,),
}
