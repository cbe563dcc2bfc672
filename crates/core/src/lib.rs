//! KinoSwap core: rendering-free voting logic shared by the GUI and the client.
#![warn(clippy::all, rust_2018_idioms)]

pub mod ballot;
pub mod candidate;
pub mod capability;
pub mod entry;
pub mod gesture;
pub mod lobby;
pub mod message;
pub mod results;
pub mod room;
pub mod route;
pub mod sequencer;
pub mod text;
pub mod voting;

pub use ballot::{Ballot, Decision};
pub use candidate::{Candidate, CandidateId};
pub use message::{Action, ClientEvent, RoomEvent, RoomResult, UiCmd};
pub use room::RoomId;
pub use route::Route;
