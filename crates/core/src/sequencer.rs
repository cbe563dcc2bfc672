//! Ordered candidate sequence with a single forward-only cursor.

use log::debug;
use thiserror::Error;

use crate::ballot::{Ballot, Decision};
use crate::candidate::{Candidate, CandidateId};

/// Contract violations when recording decisions.
#[derive(Debug, Clone, PartialEq, Eq, Error,)]
pub enum SequencerError {
    #[error("decision for {got} but the current candidate is {expected}")]
    OutOfOrder {
        expected: CandidateId,
        got:      CandidateId,
    },

    #[error("decision for {0} after the session completed")]
    Exhausted(CandidateId,),
}

/// Where the session stands after a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub enum SessionState {
    InProgress,
    Complete,
}

/// "n of N" bookkeeping for the voting header and progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub struct Progress {
    /// 1-based position of the displayed candidate, capped at `total`.
    pub position: usize,
    pub total:    usize,
}

impl Progress {
    /// Fill ratio of the progress bar.
    #[must_use]
    pub fn fraction(&self,) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.position as f32 / self.total as f32
        }
    }
}

/// Holds the candidates, the cursor and the ballot of one voting session.
#[derive(Debug, Clone, Default,)]
pub struct Sequencer {
    candidates: Vec<Candidate,>,
    cursor:     usize,
    ballot:     Ballot,
}

impl Sequencer {
    #[must_use]
    pub fn new(candidates: Vec<Candidate,>,) -> Self {
        Self {
            candidates,
            cursor: 0,
            ballot: Ballot::new(),
        }
    }

    /// The candidate at the cursor, `None` once exhausted.
    #[must_use]
    pub fn current_candidate(&self,) -> Option<&Candidate,> {
        self.candidates.get(self.cursor,)
    }

    /// Records `decision` for the current candidate and advances the cursor.
    ///
    /// # Errors
    /// Fails without touching the ballot when `id` is not the current
    /// candidate or the session is already complete.
    pub fn record_decision(
        &mut self,
        id: &CandidateId,
        decision: Decision,
    ) -> Result<SessionState, SequencerError,> {
        let current = self
            .current_candidate()
            .ok_or_else(|| SequencerError::Exhausted(id.clone(),),)?;

        if current.id != *id {
            return Err(SequencerError::OutOfOrder {
                expected: current.id.clone(),
                got:      id.clone(),
            },);
        }

        self.ballot.record(id.clone(), decision,);
        self.cursor += 1;
        debug!("recorded {decision} for {id}, cursor at {}", self.cursor);

        Ok(self.state(),)
    }

    #[must_use]
    pub fn state(&self,) -> SessionState {
        if self.is_complete() {
            SessionState::Complete
        } else {
            SessionState::InProgress
        }
    }

    #[must_use]
    pub fn is_complete(&self,) -> bool {
        self.cursor >= self.candidates.len()
    }

    #[must_use]
    pub const fn cursor(&self,) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn len(&self,) -> usize {
        self.candidates.len()
    }

    #[must_use]
    pub fn is_empty(&self,) -> bool {
        self.candidates.is_empty()
    }

    #[must_use]
    pub fn progress(&self,) -> Progress {
        let total = self.candidates.len();
        Progress {
            position: (self.cursor + 1).min(total,),
            total,
        }
    }

    #[must_use]
    pub const fn ballot(&self,) -> &Ballot {
        &self.ballot
    }
}
