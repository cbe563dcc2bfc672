//! The swipe screen: one card at a time, decided by drag or by buttons.

use log::{debug, error, info};

use crate::ballot::{Ballot, Decision};
use crate::candidate::Candidate;
use crate::capability::Shell;
use crate::gesture::{CardPose, Gesture, Point, Release, SwipeHint};
use crate::message::{Action, ClientEvent, UiCmd};
use crate::room::RoomId;
use crate::route::Route;
use crate::sequencer::{Progress, Sequencer, SessionState};
use crate::text;

#[derive(Debug, Clone,)]
pub struct VotingSession {
    room:      RoomId,
    sequencer: Sequencer,
    gesture:   Gesture,
    flipped:   bool,
    loaded:    bool,
    submitted: bool,
}

impl VotingSession {
    #[must_use]
    pub fn new(room: RoomId,) -> Self {
        Self {
            room,
            sequencer: Sequencer::default(),
            gesture: Gesture::new(),
            flipped: false,
            loaded: false,
            submitted: false,
        }
    }

    /// Requests the candidates of the room.
    pub fn enter<S: Shell + ?Sized,>(&mut self, shell: &mut S,) {
        info!("loading candidates for room {}", self.room);
        shell.dispatch(UiCmd::LoadCandidates(self.room.clone(),),);
    }

    /// Starts a session on an already known candidate list.
    pub fn load<S: Shell + ?Sized,>(&mut self, candidates: Vec<Candidate,>, shell: &mut S,) {
        info!("voting on {} candidates", candidates.len());
        self.sequencer = Sequencer::new(candidates,);
        self.gesture.reset();
        self.flipped = false;
        self.loaded = true;
        self.submitted = false;
        if self.sequencer.is_complete() {
            self.finish(shell,);
        }
    }

    #[must_use]
    pub const fn room(&self,) -> &RoomId {
        &self.room
    }

    #[must_use]
    pub const fn is_loaded(&self,) -> bool {
        self.loaded
    }

    #[must_use]
    pub fn is_complete(&self,) -> bool {
        self.loaded && self.sequencer.is_complete()
    }

    #[must_use]
    pub fn current(&self,) -> Option<&Candidate,> {
        self.sequencer.current_candidate()
    }

    #[must_use]
    pub fn progress(&self,) -> Progress {
        self.sequencer.progress()
    }

    #[must_use]
    pub const fn ballot(&self,) -> &Ballot {
        self.sequencer.ballot()
    }

    /// The details side of the current card is showing.
    #[must_use]
    pub const fn is_flipped(&self,) -> bool {
        self.flipped
    }

    #[must_use]
    pub fn pose(&self,) -> CardPose {
        self.gesture.pose()
    }

    #[must_use]
    pub fn hint(&self,) -> SwipeHint {
        self.gesture.hint()
    }

    #[must_use]
    pub const fn is_dragging(&self,) -> bool {
        self.gesture.is_dragging()
    }

    pub fn press(&mut self, at: Point,) {
        if self.current().is_some() {
            self.gesture.press(at,);
        }
    }

    pub fn drag(&mut self, at: Point,) {
        self.gesture.move_to(at,);
    }

    pub fn release<S: Shell + ?Sized,>(&mut self, shell: &mut S,) {
        let released = self.gesture.release();
        self.apply_release(released, shell,);
    }

    /// The pointer left the card mid-drag.
    pub fn leave<S: Shell + ?Sized,>(&mut self, shell: &mut S,) {
        let released = self.gesture.leave();
        self.apply_release(released, shell,);
    }

    pub fn approve<S: Shell + ?Sized,>(&mut self, shell: &mut S,) {
        self.gesture.reset();
        self.decide(Decision::Approve, shell,);
    }

    pub fn reject<S: Shell + ?Sized,>(&mut self, shell: &mut S,) {
        self.gesture.reset();
        self.decide(Decision::Reject, shell,);
    }

    /// The "flip back" control on the details side.
    pub fn hide_details(&mut self,) {
        self.flipped = false;
    }

    /// Abandons the session without submitting and returns to the landing
    /// screen.
    pub fn quit<S: Shell + ?Sized,>(&mut self, shell: &mut S,) {
        info!("leaving voting in room {} without submitting", self.room);
        self.gesture.reset();
        shell.dispatch(UiCmd::Unsubscribe,);
        shell.navigate(Route::Entry,);
    }

    pub fn handle<S: Shell + ?Sized,>(&mut self, event: &ClientEvent, shell: &mut S,) {
        match event {
            | ClientEvent::CandidatesLoaded(candidates,) => {
                self.load(candidates.clone(), shell,);
            },
            | ClientEvent::Failed {
                action: Action::LoadCandidates,
                reason,
            } => {
                error!("loading candidates failed: {reason}");
                shell.error(text::CANDIDATES_FAILED,);
            },
            | other => debug!("voting ignores {}", other.label()),
        }
    }

    fn apply_release<S: Shell + ?Sized,>(&mut self, released: Option<Release,>, shell: &mut S,) {
        match released {
            | Some(Release::Vote(decision,),) => self.decide(decision, shell,),
            | Some(Release::Tap,) => self.flipped = !self.flipped,
            | Some(Release::Cancelled,) | None => {},
        }
    }

    fn decide<S: Shell + ?Sized,>(&mut self, decision: Decision, shell: &mut S,) {
        let Some(id,) = self.current().map(|c| c.id.clone(),) else {
            debug!("{decision} with no current candidate");
            return;
        };

        match self.sequencer.record_decision(&id, decision,) {
            | Ok(state,) => {
                self.flipped = false;
                shell.success(match decision {
                    | Decision::Approve => text::APPROVED,
                    | Decision::Reject => text::REJECTED,
                },);
                if state == SessionState::Complete {
                    self.finish(shell,);
                }
            },
            | Err(e,) => error!("decision rejected: {e}"),
        }
    }

    fn finish<S: Shell + ?Sized,>(&mut self, shell: &mut S,) {
        if self.submitted {
            return;
        }
        self.submitted = true;
        info!(
            "voting complete in room {} with {} decisions",
            self.room,
            self.ballot().len()
        );
        shell.dispatch(UiCmd::SubmitBallot {
            room:   self.room.clone(),
            ballot: self.ballot().clone(),
        },);
        shell.navigate(Route::Results {
            room: self.room.clone(),
        },);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{Recorder, Toast};

    fn session() -> (VotingSession, Recorder,) {
        let mut shell = Recorder::new();
        let mut voting = VotingSession::new("482913".into(),);
        voting.enter(&mut shell,);
        assert!(matches!(shell.drain_commands().as_slice(), [UiCmd::LoadCandidates(_)]));
        voting.handle(&ClientEvent::CandidatesLoaded(Candidate::demo_set()), &mut shell,);
        (voting, shell,)
    }

    fn swipe(voting: &mut VotingSession, dx: f32, shell: &mut Recorder,) {
        voting.press(Point::new(200.0, 300.0,),);
        voting.drag(Point::new(200.0 + dx, 310.0,),);
        voting.release(shell,);
    }

    #[test]
    fn short_swipe_records_nothing() {
        let (mut voting, mut shell,) = session();
        swipe(&mut voting, 80.0, &mut shell,);
        assert!(voting.ballot().is_empty());
        assert_eq!(voting.pose(), CardPose::NEUTRAL);
        assert!(!voting.is_dragging());
        assert!(shell.toasts.is_empty());
    }

    #[test]
    fn swipe_decides_current_candidate() {
        let (mut voting, mut shell,) = session();
        swipe(&mut voting, -130.0, &mut shell,);
        assert_eq!(voting.ballot().get(&"movie-1".into()), Some(Decision::Reject));
        assert_eq!(voting.current().unwrap().id.as_str(), "movie-2");
        assert_eq!(shell.last_toast(), Some(&Toast::success(text::REJECTED)));
    }

    #[test]
    fn button_ignores_prior_drag() {
        let (mut voting, mut shell,) = session();
        voting.press(Point::new(0.0, 0.0,),);
        voting.drag(Point::new(-90.0, 0.0,),);
        voting.approve(&mut shell,);

        assert!(!voting.is_dragging());
        assert_eq!(voting.ballot().get(&"movie-1".into()), Some(Decision::Approve));
        assert_eq!(shell.last_toast(), Some(&Toast::success(text::APPROVED)));
    }

    #[test]
    fn tap_flips_until_advance() {
        let (mut voting, mut shell,) = session();
        swipe(&mut voting, 2.0, &mut shell,);
        assert!(voting.is_flipped());
        swipe(&mut voting, 0.0, &mut shell,);
        assert!(!voting.is_flipped());

        swipe(&mut voting, 1.0, &mut shell,);
        assert!(voting.is_flipped());
        voting.reject(&mut shell,);
        assert!(!voting.is_flipped());

        swipe(&mut voting, 1.0, &mut shell,);
        voting.hide_details();
        assert!(!voting.is_flipped());
    }

    #[test]
    fn leaving_the_card_never_flips() {
        let (mut voting, mut shell,) = session();
        voting.press(Point::new(0.0, 0.0,),);
        voting.leave(&mut shell,);
        assert!(!voting.is_flipped());
        assert!(voting.ballot().is_empty());
    }

    #[test]
    fn last_decision_submits_and_navigates() {
        let (mut voting, mut shell,) = session();
        voting.approve(&mut shell,);
        voting.reject(&mut shell,);
        assert!(shell.routes.is_empty());
        voting.approve(&mut shell,);

        assert!(voting.is_complete());
        assert!(matches!(
            shell.drain_commands().as_slice(),
            [UiCmd::SubmitBallot { ballot, .. }] if ballot.len() == 3
        ));
        assert_eq!(shell.last_route(), Some(&Route::Results { room: "482913".into() }));

        voting.approve(&mut shell,);
        assert!(shell.commands.is_empty());
        assert_eq!(voting.ballot().len(), 3);
    }

    #[test]
    fn empty_candidate_list_completes_at_once() {
        let mut shell = Recorder::new();
        let mut voting = VotingSession::new("1".into(),);
        voting.handle(&ClientEvent::CandidatesLoaded(Vec::new()), &mut shell,);
        assert!(voting.is_complete());
        assert_eq!(shell.last_route(), Some(&Route::Results { room: "1".into() }));
    }

    #[test]
    fn load_failure_shows_toast() {
        let mut shell = Recorder::new();
        let mut voting = VotingSession::new("1".into(),);
        voting.handle(&ClientEvent::failed(Action::LoadCandidates, "502"), &mut shell,);
        assert!(!voting.is_loaded());
        assert_eq!(shell.last_toast(), Some(&Toast::error(text::CANDIDATES_FAILED)));
    }

    #[test]
    fn quit_leaves_without_submitting() {
        let (mut voting, mut shell,) = session();
        voting.approve(&mut shell,);
        voting.quit(&mut shell,);
        assert!(matches!(shell.drain_commands().as_slice(), [UiCmd::Unsubscribe]));
        assert_eq!(shell.last_route(), Some(&Route::Entry));
    }
}
