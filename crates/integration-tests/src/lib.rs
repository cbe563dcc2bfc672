//! In-process room server used by the end-to-end tests.
#![warn(clippy::all, rust_2018_idioms)]

pub mod fake_server;
pub use fake_server::FakeServer;
