//! Canvass - the running vote counters attached to a session.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{CanvassId, VoteChoice};

/// Result of a vote, derived from the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Approved,
    Rejected,
}

impl Outcome {
    /// Approved only on a strict affirmative majority; a tie is rejected.
    pub fn from_counts(affirmative: u64, negative: u64) -> Self {
        if affirmative > negative {
            Outcome::Approved
        } else {
            Outcome::Rejected
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Approved => write!(f, "APPROVED"),
            Outcome::Rejected => write!(f, "REJECTED"),
        }
    }
}

/// Per-session vote counters.
///
/// # Invariants
///
/// - `total_votes == affirmative_votes + negative_votes`
/// - counters only grow
///
/// Stores apply increments atomically; [`Canvass::record`] is the
/// single definition of what a vote does to the counters and is what
/// in-process stores call while holding their write lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canvass {
    id: CanvassId,
    title: String,
    total_votes: u64,
    affirmative_votes: u64,
    negative_votes: u64,
}

impl Canvass {
    /// Creates zeroed counters. `title` is copied from the agenda.
    pub fn new(id: CanvassId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            total_votes: 0,
            affirmative_votes: 0,
            negative_votes: 0,
        }
    }

    /// Reconstitute from persistence.
    ///
    /// The total is recomputed from the two sides so a stored row can
    /// never yield a canvass that breaks the sum invariant.
    pub fn reconstitute(
        id: CanvassId,
        title: String,
        affirmative_votes: u64,
        negative_votes: u64,
    ) -> Self {
        Self {
            id,
            title,
            total_votes: affirmative_votes + negative_votes,
            affirmative_votes,
            negative_votes,
        }
    }

    pub fn id(&self) -> &CanvassId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn total_votes(&self) -> u64 {
        self.total_votes
    }

    pub fn affirmative_votes(&self) -> u64 {
        self.affirmative_votes
    }

    pub fn negative_votes(&self) -> u64 {
        self.negative_votes
    }

    /// Current outcome if voting stopped now.
    pub fn outcome(&self) -> Outcome {
        Outcome::from_counts(self.affirmative_votes, self.negative_votes)
    }

    /// Applies one vote to the counters.
    pub fn record(&mut self, choice: VoteChoice) {
        match choice {
            VoteChoice::Yes => self.affirmative_votes += 1,
            VoteChoice::No => self.negative_votes += 1,
        }
        self.total_votes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_canvass_is_zeroed() {
        let canvass = Canvass::new(CanvassId::new(), "Budget");
        assert_eq!(canvass.total_votes(), 0);
        assert_eq!(canvass.affirmative_votes(), 0);
        assert_eq!(canvass.negative_votes(), 0);
        assert_eq!(canvass.title(), "Budget");
    }

    #[test]
    fn yes_increments_affirmative_and_total() {
        let mut canvass = Canvass::new(CanvassId::new(), "Budget");
        canvass.record(VoteChoice::Yes);
        assert_eq!(canvass.affirmative_votes(), 1);
        assert_eq!(canvass.negative_votes(), 0);
        assert_eq!(canvass.total_votes(), 1);
    }

    #[test]
    fn no_increments_negative_and_total() {
        let mut canvass = Canvass::new(CanvassId::new(), "Budget");
        canvass.record(VoteChoice::No);
        assert_eq!(canvass.affirmative_votes(), 0);
        assert_eq!(canvass.negative_votes(), 1);
        assert_eq!(canvass.total_votes(), 1);
    }

    #[test]
    fn tie_is_rejected() {
        assert_eq!(Outcome::from_counts(0, 0), Outcome::Rejected);
        assert_eq!(Outcome::from_counts(3, 3), Outcome::Rejected);
    }

    #[test]
    fn strict_majority_is_approved() {
        assert_eq!(Outcome::from_counts(4, 3), Outcome::Approved);
        assert_eq!(Outcome::from_counts(3, 4), Outcome::Rejected);
    }

    #[test]
    fn reconstitute_recomputes_total() {
        let canvass = Canvass::reconstitute(CanvassId::new(), "Budget".into(), 2, 5);
        assert_eq!(canvass.total_votes(), 7);
    }

    #[test]
    fn outcome_serializes_upper_case() {
        assert_eq!(
            serde_json::to_string(&Outcome::Approved).unwrap(),
            "\"APPROVED\""
        );
        assert_eq!(Outcome::Rejected.to_string(), "REJECTED");
    }

    proptest! {
        #[test]
        fn counters_match_votes_cast(votes in proptest::collection::vec(any::<bool>(), 0..200)) {
            let mut canvass = Canvass::new(CanvassId::new(), "Any");
            for yes in &votes {
                canvass.record(if *yes { VoteChoice::Yes } else { VoteChoice::No });
            }

            let n = votes.iter().filter(|v| **v).count() as u64;
            let m = votes.len() as u64 - n;

            prop_assert_eq!(canvass.total_votes(), n + m);
            prop_assert_eq!(canvass.affirmative_votes(), n);
            prop_assert_eq!(canvass.negative_votes(), m);
            prop_assert_eq!(canvass.outcome() == Outcome::Approved, n > m);
        }
    }
}
