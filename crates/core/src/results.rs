//! Completion screen. Shows the server's results once everyone has voted.

use log::{debug, info, warn};

use crate::capability::Shell;
use crate::message::{Action, ClientEvent, RoomEvent, RoomResult, UiCmd};
use crate::room::RoomId;
use crate::text;

#[derive(Debug, Clone,)]
pub struct ResultsState {
    room:     RoomId,
    finished: bool,
    results:  Option<Vec<RoomResult,>,>,
}

impl ResultsState {
    #[must_use]
    pub const fn new(room: RoomId,) -> Self {
        Self {
            room,
            finished: false,
            results: None,
        }
    }

    #[must_use]
    pub const fn room(&self,) -> &RoomId {
        &self.room
    }

    /// Every participant has voted.
    #[must_use]
    pub const fn is_finished(&self,) -> bool {
        self.finished
    }

    /// Results in the order the server sent them.
    #[must_use]
    pub fn results(&self,) -> Option<&[RoomResult],> {
        self.results.as_deref()
    }

    /// Asks for the results again, e.g. after a failed load.
    pub fn refresh<S: Shell + ?Sized,>(&mut self, shell: &mut S,) {
        shell.dispatch(UiCmd::LoadResults(self.room.clone(),),);
    }

    pub fn handle<S: Shell + ?Sized,>(&mut self, event: &ClientEvent, shell: &mut S,) {
        match event {
            | ClientEvent::Room(RoomEvent::VotingFinished,) => {
                info!("voting finished in room {}", self.room);
                self.finished = true;
                self.refresh(shell,);
            },
            | ClientEvent::Room(RoomEvent::Error { message, },) => shell.error(message,),
            | ClientEvent::ResultsLoaded(results,) => {
                info!("received {} results", results.len());
                self.results = Some(results.clone(),);
            },
            | ClientEvent::BallotSubmitted => debug!("ballot accepted"),
            | ClientEvent::Failed {
                action: Action::SubmitBallot,
                reason,
            } => {
                warn!("ballot submission failed: {reason}");
                shell.error(text::SUBMIT_FAILED,);
            },
            | ClientEvent::Failed {
                action: Action::LoadResults,
                reason,
            } => {
                warn!("loading results failed: {reason}");
                shell.error(text::RESULTS_FAILED,);
            },
            | ClientEvent::Failed {
                action: Action::Subscribe,
                reason,
            } => {
                warn!("room events lost: {reason}");
                shell.error(&text::failure(reason,),);
            },
            | other => debug!("results ignores {}", other.label()),
        }
    }
}
