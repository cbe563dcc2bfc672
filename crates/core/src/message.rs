//! Messages between the views, the network runtime and the room server.

use std::fmt;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ballot::Ballot;
use crate::candidate::Candidate;
use crate::room::RoomId;

/// Pushed by the room server over the room event stream.
///
/// Frames look like `{"type": "participant_ready", "data": {...}}`; events
/// without a payload omit `data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum RoomEvent {
    ParticipantReady { ready_participants: u32, },
    LobbyUpdate { participants_count: u32, },
    VotingStarted,
    VotingFinished,
    Error { message: String, },
}

impl RoomEvent {
    /// Decodes one text frame.
    ///
    /// # Errors
    /// Fails on malformed JSON or an unknown event type.
    pub fn from_json(text: &str,) -> serde_json::Result<Self,> {
        serde_json::from_str(text,)
    }

    /// # Errors
    /// Serialization of these variants does not fail in practice.
    pub fn to_json(&self,) -> serde_json::Result<String,> {
        serde_json::to_string(self,)
    }
}

/// One line of the room results, in the order the server returns them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize,)]
pub struct RoomResult {
    #[serde(rename = "mm")]
    pub candidate: Candidate,
    pub likes:     u32,
}

/// Sent from the views into the runtime driving network I/O.
#[derive(Debug, Clone,)]
pub enum UiCmd {
    CreateRoom,
    CheckRoom(RoomId,),
    Participate { room: RoomId, text: String, },
    StartVoting(RoomId,),
    Subscribe(RoomId,),
    Unsubscribe,
    LoadCandidates(RoomId,),
    SubmitBallot { room: RoomId, ballot: Ballot, },
    LoadResults(RoomId,),
    Shutdown,
}

impl UiCmd {
    /// The request kind, for failure reporting.
    #[must_use]
    pub const fn action(&self,) -> Action {
        match self {
            | Self::CreateRoom => Action::CreateRoom,
            | Self::CheckRoom(_,) => Action::CheckRoom,
            | Self::Participate { .. } => Action::Participate,
            | Self::StartVoting(_,) => Action::StartVoting,
            | Self::Subscribe(_,) | Self::Unsubscribe | Self::Shutdown => {
                Action::Subscribe
            },
            | Self::LoadCandidates(_,) => Action::LoadCandidates,
            | Self::SubmitBallot { .. } => Action::SubmitBallot,
            | Self::LoadResults(_,) => Action::LoadResults,
        }
    }
}

impl Display for UiCmd {
    fn fmt(&self, f: &mut Formatter<'_,>,) -> fmt::Result {
        let str = match self {
            | Self::CreateRoom => "create_room",
            | Self::CheckRoom(_,) => "check_room",
            | Self::Participate { .. } => "participate",
            | Self::StartVoting(_,) => "start_voting",
            | Self::Subscribe(_,) => "subscribe",
            | Self::Unsubscribe => "unsubscribe",
            | Self::LoadCandidates(_,) => "load_candidates",
            | Self::SubmitBallot { .. } => "submit_ballot",
            | Self::LoadResults(_,) => "load_results",
            | Self::Shutdown => "shutdown",
        };
        write!(f, "{str}")
    }
}

/// Request kinds, reported back with failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub enum Action {
    CreateRoom,
    CheckRoom,
    Participate,
    StartVoting,
    Subscribe,
    LoadCandidates,
    SubmitBallot,
    LoadResults,
}

/// Sent from the runtime back to the views.
#[derive(Debug, Clone, PartialEq,)]
pub enum ClientEvent {
    RoomCreated(RoomId,),
    RoomChecked { room: RoomId, available: bool, },
    ReadyAccepted,
    StartAccepted,
    Subscribed(RoomId,),
    Room(RoomEvent,),
    CandidatesLoaded(Vec<Candidate,>,),
    BallotSubmitted,
    ResultsLoaded(Vec<RoomResult,>,),
    Failed { action: Action, reason: String, },
}

impl ClientEvent {
    #[must_use]
    pub fn failed(action: Action, reason: impl Display,) -> Self {
        Self::Failed {
            action,
            reason: reason.to_string(),
        }
    }

    /// Returns a label of the event variant.
    #[must_use]
    pub fn label(&self,) -> &'static str {
        match self {
            | Self::RoomCreated(_,) => "RoomCreated",
            | Self::RoomChecked { .. } => "RoomChecked",
            | Self::ReadyAccepted => "ReadyAccepted",
            | Self::StartAccepted => "StartAccepted",
            | Self::Subscribed(_,) => "Subscribed",
            | Self::Room(_,) => "Room",
            | Self::CandidatesLoaded(_,) => "CandidatesLoaded",
            | Self::BallotSubmitted => "BallotSubmitted",
            | Self::ResultsLoaded(_,) => "ResultsLoaded",
            | Self::Failed { .. } => "Failed",
        }
    }
}
