//! Landing screen: create a room or join one by code.

use log::{debug, info};

use crate::capability::Shell;
use crate::message::{Action, ClientEvent, UiCmd};
use crate::room::{CodeForm, RoomId};
use crate::route::Route;
use crate::text;

#[derive(Debug, Clone, PartialEq, Eq,)]
enum Pending {
    Create,
    Join(RoomId,),
}

#[derive(Debug, Clone, Default,)]
pub struct EntryState {
    form:    CodeForm,
    pending: Option<Pending,>,
}

impl EntryState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn form(&self,) -> &CodeForm {
        &self.form
    }

    pub fn form_mut(&mut self,) -> &mut CodeForm {
        &mut self.form
    }

    /// A create or join request is in flight.
    #[must_use]
    pub const fn is_busy(&self,) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn is_join_disabled(&self,) -> bool {
        self.is_busy() || self.form.is_join_disabled()
    }

    pub fn create_room<S: Shell + ?Sized,>(&mut self, shell: &mut S,) {
        if self.is_busy() {
            return;
        }
        info!("requesting a new room");
        self.pending = Some(Pending::Create,);
        shell.dispatch(UiCmd::CreateRoom,);
    }

    /// Checks the entered code. Does nothing until all six cells are filled.
    pub fn join_room<S: Shell + ?Sized,>(&mut self, shell: &mut S,) {
        if self.is_busy() {
            return;
        }
        let Some(room,) = self.form.room_id() else {
            return;
        };
        info!("checking room {room}");
        self.pending = Some(Pending::Join(room.clone(),),);
        shell.dispatch(UiCmd::CheckRoom(room,),);
    }

    pub fn handle<S: Shell + ?Sized,>(&mut self, event: &ClientEvent, shell: &mut S,) {
        match event {
            | ClientEvent::RoomCreated(room,) => {
                if self.pending != Some(Pending::Create,) {
                    debug!("ignoring unrequested room {room}");
                    return;
                }
                self.pending = None;
                info!("room {room} created, entering lobby as host");
                shell.navigate(Route::Lobby {
                    room: room.clone(),
                    host: true,
                },);
            },
            | ClientEvent::RoomChecked { room, available, } => {
                if self.pending.as_ref() != Some(&Pending::Join(room.clone(),),) {
                    debug!("ignoring stale check of room {room}");
                    return;
                }
                self.pending = None;
                if *available {
                    info!("joining room {room}");
                    shell.navigate(Route::Lobby {
                        room: room.clone(),
                        host: false,
                    },);
                } else {
                    shell.error(text::ROOM_UNAVAILABLE,);
                }
            },
            | ClientEvent::Failed {
                action: Action::CreateRoom,
                ..
            } => {
                self.pending = None;
                shell.error(text::CREATE_FAILED,);
            },
            | ClientEvent::Failed {
                action: Action::CheckRoom,
                ..
            } => {
                self.pending = None;
                shell.error(text::JOIN_FAILED,);
            },
            | other => debug!("entry ignores {}", other.label()),
        }
    }
}
