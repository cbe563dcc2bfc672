use std::time::Duration;

use kinoswap_client::runtime_bridge::{self, UiHandle};
use kinoswap_client::{CandidateSource, ClientConfig};
use kinoswap_core::capability::{Recorder, Toast};
use kinoswap_core::entry::EntryState;
use kinoswap_core::lobby::LobbyState;
use kinoswap_core::results::ResultsState;
use kinoswap_core::voting::VotingSession;
use kinoswap_core::{ClientEvent, Route};
use log::info;
use tokio::runtime::Handle;
use tokio::time::sleep;

const POLL_DELAY_MS: u64 = 20;
const MAX_POLLS: u32 = 250;

/// The controller of the screen currently shown.
pub enum Screen {
    Entry(EntryState,),
    Lobby(LobbyState,),
    Voting(VotingSession,),
    Results(ResultsState,),
}

impl Screen {
    fn name(&self,) -> &'static str {
        match self {
            | Self::Entry(_,) => "entry",
            | Self::Lobby(_,) => "lobby",
            | Self::Voting(_,) => "voting",
            | Self::Results(_,) => "results",
        }
    }
}

/// A headless client: the real runtime bridge plus the screen controllers,
/// with a recording host in place of the window.
pub struct MockUi {
    name:        &'static str,
    ui_handle:   UiHandle,
    pub shell:   Recorder,
    pub screen:  Screen,
    routes_seen: usize,
}

impl MockUi {
    pub fn new(name: &'static str, api_url: String, source: CandidateSource,) -> Self {
        let config = ClientConfig {
            api_url,
            request_timeout: Duration::from_secs(5,),
            candidate_source: source,
            candidate_count: 5,
            ..ClientConfig::default()
        };
        let ui_handle =
            runtime_bridge::start_on(&Handle::current(), config,).expect("start runtime bridge",);

        Self {
            name,
            ui_handle,
            shell: Recorder::new(),
            screen: Screen::Entry(EntryState::new(),),
            routes_seen: 0,
        }
    }

    /// Sends recorded commands, feeds arrived events to the current screen
    /// and follows navigation.
    pub async fn pump(&mut self,) {
        loop {
            for cmd in self.shell.drain_commands() {
                info!("{}: -> {cmd}", self.name);
                self.ui_handle.cmd_tx.send(cmd,).await.expect("runtime bridge alive",);
            }

            if self.follow_route() {
                continue;
            }

            let Ok(event,) = self.ui_handle.msg_rx.try_recv() else {
                break;
            };
            info!("{}: <- {}", self.name, event.label());
            self.handle(&event,);
        }
    }

    /// Pumps until `done` holds.
    ///
    /// # Panics
    /// After about five seconds without success.
    pub async fn wait_for(&mut self, what: &str, done: impl Fn(&Self,) -> bool,) {
        for _ in 0..MAX_POLLS {
            self.pump().await;
            if done(self,) {
                return;
            }
            sleep(Duration::from_millis(POLL_DELAY_MS,),).await;
        }
        panic!(
            "{}: timeout waiting for {what} on the {} screen, toasts {:?}",
            self.name,
            self.screen.name(),
            self.shell.toasts
        );
    }

    pub async fn wait_for_toast(&mut self, toast: Toast,) {
        let what = format!("toast {:?}", toast.text);
        self.wait_for(&what, |ui| ui.shell.toasts.contains(&toast,),).await;
    }

    pub fn route(&self,) -> Option<&Route,> {
        self.shell.last_route()
    }

    pub fn entry(&mut self,) -> (&mut EntryState, &mut Recorder,) {
        match &mut self.screen {
            | Screen::Entry(state,) => (state, &mut self.shell,),
            | other => panic!("{}: expected entry, on {}", self.name, other.name()),
        }
    }

    pub fn lobby(&mut self,) -> (&mut LobbyState, &mut Recorder,) {
        match &mut self.screen {
            | Screen::Lobby(state,) => (state, &mut self.shell,),
            | other => panic!("{}: expected lobby, on {}", self.name, other.name()),
        }
    }

    pub fn voting(&mut self,) -> (&mut VotingSession, &mut Recorder,) {
        match &mut self.screen {
            | Screen::Voting(state,) => (state, &mut self.shell,),
            | other => panic!("{}: expected voting, on {}", self.name, other.name()),
        }
    }

    pub fn results(&self,) -> &ResultsState {
        match &self.screen {
            | Screen::Results(state,) => state,
            | other => panic!("{}: expected results, on {}", self.name, other.name()),
        }
    }

    pub fn is_on(&self, screen: &str,) -> bool {
        self.screen.name() == screen
    }

    fn handle(&mut self, event: &ClientEvent,) {
        let shell = &mut self.shell;
        match &mut self.screen {
            | Screen::Entry(state,) => state.handle(event, shell,),
            | Screen::Lobby(state,) => state.handle(event, shell,),
            | Screen::Voting(state,) => state.handle(event, shell,),
            | Screen::Results(state,) => state.handle(event, shell,),
        }
    }

    /// Switches screens when a controller navigated. Returns whether it did.
    fn follow_route(&mut self,) -> bool {
        if self.shell.routes.len() == self.routes_seen {
            return false;
        }
        self.routes_seen = self.shell.routes.len();
        let Some(route,) = self.shell.last_route().cloned() else {
            return false;
        };
        info!("{}: navigating to {route}", self.name);

        self.screen = match route {
            | Route::Entry => Screen::Entry(EntryState::new(),),
            | Route::Lobby { room, host, } => {
                let mut lobby = LobbyState::new(room, host,);
                lobby.enter(&mut self.shell,);
                Screen::Lobby(lobby,)
            },
            | Route::Voting { room, } => {
                let mut voting = VotingSession::new(room,);
                voting.enter(&mut self.shell,);
                Screen::Voting(voting,)
            },
            | Route::Results { room, } => Screen::Results(ResultsState::new(room,),),
        };
        true
    }
}

impl Drop for MockUi {
    fn drop(&mut self,) {
        let _ = self.ui_handle.cmd_tx.try_send(kinoswap_core::UiCmd::Shutdown,);
    }
}
