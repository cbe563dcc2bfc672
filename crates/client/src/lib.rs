//! Network side of the KinoSwap client: REST calls, the room event stream and
//! the runtime that runs both next to the GUI.
#![warn(clippy::all, rust_2018_idioms)]

pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod runtime_bridge;

pub use api::{HttpRoomApi, RoomApi};
pub use config::{CandidateSource, ClientConfig};
pub use error::ClientError;
pub use runtime_bridge::UiHandle;
