//! Entities shown in paginated collections.
//!
//! The field names follow the camelCase shape of the GraphQL nodes, so the
//! same types deserialize both API responses and snapshot files.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::paginate::Identified;
use crate::types::{CommentId, PostId, UserId};

/// The author of a post or comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    pub id: UserId,
    pub name: String,
}

/// A post in an organization's feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,

    /// Post text; posts made of attachments only have none.
    #[serde(default)]
    pub caption: Option<String>,

    /// Missing when the creating user has been deleted.
    #[serde(default)]
    pub creator: Option<Creator>,

    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub up_votes_count: u64,

    #[serde(default)]
    pub comments_count: u64,
}

/// A comment on a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub body: String,

    #[serde(default)]
    pub creator: Option<Creator>,

    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub up_votes_count: u64,
}

/// A user who up-voted a post or comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpVoter {
    pub id: UserId,
    pub name: String,

    #[serde(rename = "avatarURL", default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl Identified for Post {
    type Id = PostId;

    fn id(&self) -> &PostId {
        &self.id
    }
}

impl Identified for Comment {
    type Id = CommentId;

    fn id(&self) -> &CommentId {
        &self.id
    }
}

impl Identified for UpVoter {
    type Id = UserId;

    fn id(&self) -> &UserId {
        &self.id
    }
}
