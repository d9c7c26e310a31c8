//! talawa-core - Core types, traits and paginated collections for Talawa
//! clients.
//!
//! The center of the crate is [`merge`], which folds one fetched [`Page`]
//! into a [`CollectionState`], and [`Collection`], which drives fetches
//! through a [`PageSource`] and owns the merged state. Backends implement
//! [`Backend`]; the sources in [`sources`] bind a backend to a parent
//! entity. [`votes`] reconciles the current user's up-vote with a loaded
//! up-voter collection.

pub mod error;
pub mod model;
pub mod paginate;
pub mod sources;
pub mod traits;
pub mod types;
pub mod votes;

pub use error::Error;
pub use model::{Comment, Creator, Post, UpVoter};
pub use paginate::{
    Collection, CollectionRegistry, CollectionState, Identified, LoadOutcome, Page, PageRequest,
    merge, merge_by,
};
pub use sources::{CommentUpVoters, OrganizationPosts, PostComments, PostUpVoters};
pub use traits::{Backend, LogNotifier, Notifier, PageSource};
pub use types::{ApiUrl, CommentId, Cursor, OrganizationId, PostId, UserId};
pub use votes::{VoteChange, VoteTally, record_vote, vote_tally};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
