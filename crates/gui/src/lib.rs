#![warn(clippy::all, rust_2018_idioms)]
pub mod entry_view;
pub use entry_view::EntryView;

pub mod lobby_view;
pub use lobby_view::LobbyView;
pub mod voting_view;
pub use voting_view::VotingView;
pub mod results_view;
pub use results_view::ResultsView;

pub mod gui;
pub use gui::{App, AppFrame, Config, View};
