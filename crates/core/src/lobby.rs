//! Waiting room before the vote: readiness, preferences and the host's start.

use log::{debug, info, warn};

use crate::capability::{Clipboard, Shell};
use crate::message::{Action, ClientEvent, RoomEvent, UiCmd};
use crate::room::RoomId;
use crate::route::Route;
use crate::text;

#[derive(Debug, Clone,)]
pub struct LobbyState {
    room:               RoomId,
    is_host:            bool,
    participants:       u32,
    ready_participants: u32,
    preferences:        String,
    ready:              bool,
    submitting:         bool,
}

impl LobbyState {
    #[must_use]
    pub fn new(room: RoomId, is_host: bool,) -> Self {
        Self {
            room,
            is_host,
            participants: 1,
            ready_participants: 0,
            preferences: String::new(),
            ready: false,
            submitting: false,
        }
    }

    /// Opens the room event stream.
    pub fn enter<S: Shell + ?Sized,>(&mut self, shell: &mut S,) {
        info!("entering lobby of room {} (host: {})", self.room, self.is_host);
        shell.dispatch(UiCmd::Subscribe(self.room.clone(),),);
    }

    #[must_use]
    pub const fn room(&self,) -> &RoomId {
        &self.room
    }

    #[must_use]
    pub const fn is_host(&self,) -> bool {
        self.is_host
    }

    #[must_use]
    pub const fn participants(&self,) -> u32 {
        self.participants
    }

    #[must_use]
    pub const fn ready_participants(&self,) -> u32 {
        self.ready_participants
    }

    #[must_use]
    pub fn preferences(&self,) -> &str {
        &self.preferences
    }

    #[must_use]
    pub const fn is_ready(&self,) -> bool {
        self.ready
    }

    /// Preferences are frozen once the participant is ready.
    pub fn set_preferences(&mut self, text: impl Into<String,>,) {
        if !self.ready {
            self.preferences = text.into();
        }
    }

    pub fn mark_ready<S: Shell + ?Sized,>(&mut self, shell: &mut S,) {
        if self.ready || self.submitting {
            return;
        }
        self.submitting = true;
        shell.dispatch(UiCmd::Participate {
            room: self.room.clone(),
            text: self.preferences.clone(),
        },);
    }

    /// Host only. Navigation waits for the `voting_started` event.
    pub fn start_voting<S: Shell + ?Sized,>(&mut self, shell: &mut S,) {
        if !self.is_host {
            warn!("start requested by a non-host participant");
            return;
        }
        shell.dispatch(UiCmd::StartVoting(self.room.clone(),),);
    }

    pub fn copy_code<S: Shell + Clipboard + ?Sized,>(&self, shell: &mut S,) {
        match shell.copy(self.room.as_str(),) {
            | Ok((),) => shell.success(text::CODE_COPIED,),
            | Err(reason,) => {
                warn!("clipboard write failed: {reason}");
                shell.error(text::CODE_COPY_FAILED,);
            },
        }
    }

    pub fn leave<S: Shell + ?Sized,>(&mut self, shell: &mut S,) {
        info!("leaving room {}", self.room);
        shell.dispatch(UiCmd::Unsubscribe,);
        shell.navigate(Route::Entry,);
    }

    pub fn handle<S: Shell + ?Sized,>(&mut self, event: &ClientEvent, shell: &mut S,) {
        match event {
            | ClientEvent::ReadyAccepted => {
                self.submitting = false;
                self.ready = true;
                self.ready_participants += 1;
                if self.preferences.trim().is_empty() {
                    shell.success(text::READY_WITHOUT_WISHES,);
                } else {
                    shell.success(text::READY_WITH_WISHES,);
                }
            },
            | ClientEvent::Failed {
                action: Action::Participate,
                reason,
            } => {
                self.submitting = false;
                shell.error(&text::failure(reason,),);
            },
            | ClientEvent::StartAccepted => {
                info!("server accepted start of room {}", self.room);
            },
            | ClientEvent::Failed {
                action: Action::StartVoting,
                ..
            } => shell.error(text::START_FAILED,),
            | ClientEvent::Failed {
                action: Action::Subscribe,
                reason,
            } => shell.error(&text::failure(reason,),),
            | ClientEvent::Subscribed(room,) => debug!("subscribed to room {room}"),
            | ClientEvent::Room(room_event,) => self.apply(room_event, shell,),
            | other => debug!("lobby ignores {}", other.label()),
        }
    }

    fn apply<S: Shell + ?Sized,>(&mut self, event: &RoomEvent, shell: &mut S,) {
        match event {
            | RoomEvent::ParticipantReady { ready_participants, } => {
                self.ready_participants = *ready_participants;
            },
            | RoomEvent::LobbyUpdate { participants_count, } => {
                self.participants = *participants_count;
            },
            | RoomEvent::VotingStarted => {
                info!("voting started in room {}", self.room);
                shell.success(text::VOTING_STARTED,);
                shell.navigate(Route::Voting {
                    room: self.room.clone(),
                },);
            },
            | RoomEvent::Error { message, } => shell.error(message,),
            | RoomEvent::VotingFinished => debug!("voting_finished while in lobby"),
        }
    }
}
