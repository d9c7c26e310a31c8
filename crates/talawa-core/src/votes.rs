//! Reconciling the current user's up-vote with loaded collections.
//!
//! Whether the user has up-voted a post or comment is derived from the
//! merged up-voter list rather than stored separately. After the server
//! confirms an up-vote or its removal, [`record_vote`] updates the up-voter
//! collection, and [`VoteChange::apply`] updates the counter shown on the
//! post or comment.

use tracing::debug;

use crate::model::{Comment, Post, UpVoter};
use crate::paginate::Collection;
use crate::traits::PageSource;
use crate::types::UserId;

/// How a confirmed vote changed an up-voter collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteChange {
    /// The user was added to the up-voters.
    Added,
    /// The user was removed from the up-voters.
    Removed,
    /// The collection already reflected the vote.
    Unchanged,
}

impl VoteChange {
    /// Adjust an up-vote counter by this change.
    pub fn apply(self, count: u64) -> u64 {
        match self {
            VoteChange::Added => count + 1,
            VoteChange::Removed => count.saturating_sub(1),
            VoteChange::Unchanged => count,
        }
    }
}

/// The current user's view of one up-voter collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteTally {
    /// Whether the user is among the loaded up-voters.
    pub up_voted: bool,
    /// Total up-votes, or the loaded count when the backend reports none.
    pub count: u64,
}

/// Derive the current user's vote from the loaded up-voters.
///
/// Only loaded pages are consulted, so a user further down an unexhausted
/// list reads as not having voted.
pub fn vote_tally<S>(voters: &Collection<S>, user: &UserId) -> VoteTally
where
    S: PageSource<Item = UpVoter>,
{
    let state = voters.state();
    VoteTally {
        up_voted: state.contains(user),
        count: state.total_count.unwrap_or(state.len() as u64),
    }
}

/// Reconcile a vote the server has confirmed.
///
/// `up_voted` is the new state: `true` after an up-vote, `false` after its
/// removal. Repeating a confirmation is a no-op.
pub fn record_vote<S>(voters: &Collection<S>, voter: UpVoter, up_voted: bool) -> VoteChange
where
    S: PageSource<Item = UpVoter>,
{
    let change = if up_voted {
        if voters.insert(voter.clone()) {
            VoteChange::Added
        } else {
            VoteChange::Unchanged
        }
    } else if voters.remove(&voter.id).is_some() {
        VoteChange::Removed
    } else {
        VoteChange::Unchanged
    };

    debug!(
        collection = voters.source().label(),
        user = %voter.id,
        ?change,
        "Recorded vote"
    );
    change
}

impl Post {
    /// Apply a reconciled vote to this post's counter.
    pub fn apply_vote(&mut self, change: VoteChange) {
        self.up_votes_count = change.apply(self.up_votes_count);
    }
}

impl Comment {
    /// Apply a reconciled vote to this comment's counter.
    pub fn apply_vote(&mut self, change: VoteChange) {
        self.up_votes_count = change.apply(self.up_votes_count);
    }
}
