//! Per-session record of like/dislike decisions.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::candidate::CandidateId;

/// A binary decision on one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,)]
pub enum Decision {
    #[serde(rename = "like")]
    Approve,
    #[serde(rename = "dislike")]
    Reject,
}

impl Decision {
    /// Reaction value submitted to the room server.
    #[must_use]
    pub const fn reaction(self,) -> u8 {
        match self {
            Self::Approve => 1,
            Self::Reject => 0,
        }
    }

    #[must_use]
    pub const fn label(self,) -> &'static str {
        match self {
            Self::Approve => "like",
            Self::Reject => "dislike",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result {
        f.write_str(self.label(),)
    }
}

/// Decisions keyed by candidate, kept in the order they were made.
#[derive(Debug, Clone, Default, PartialEq, Eq,)]
pub struct Ballot {
    entries: Vec<(CandidateId, Decision,),>,
}

impl Ballot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a decision. A repeated key keeps its position and takes the
    /// new decision.
    pub fn record(&mut self, id: CandidateId, decision: Decision,) {
        match self.entries.iter_mut().find(|(key, _,)| *key == id,) {
            | Some((_, existing,),) => *existing = decision,
            | None => self.entries.push((id, decision,),),
        }
    }

    #[must_use]
    pub fn get(&self, id: &CandidateId,) -> Option<Decision,> {
        self.entries
            .iter()
            .find(|(key, _,)| key == id,)
            .map(|(_, decision,)| *decision,)
    }

    #[must_use]
    pub fn len(&self,) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self,) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self,) -> impl Iterator<Item = (&CandidateId, Decision,),> {
        self.entries.iter().map(|(id, decision,)| (id, *decision,),)
    }

    /// Reactions map in the shape the room server accepts.
    #[must_use]
    pub fn reactions(&self,) -> BTreeMap<String, u8,> {
        self.iter()
            .map(|(id, decision,)| (id.to_string(), decision.reaction(),),)
            .collect()
    }
}
