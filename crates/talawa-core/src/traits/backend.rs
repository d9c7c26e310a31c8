//! Backend trait.

use async_trait::async_trait;

use crate::Result;
use crate::model::{Comment, Post, UpVoter};
use crate::paginate::{Page, PageRequest};
use crate::types::{ApiUrl, CommentId, OrganizationId, PostId};

/// A Talawa API backend that serves paginated connections.
///
/// Every method fetches exactly one page. Implementations report transport
/// and query failures as errors and never retry.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Returns the endpoint this backend reads from.
    fn endpoint(&self) -> &ApiUrl;

    /// Posts of an organization, newest first.
    async fn organization_posts(
        &self,
        organization: &OrganizationId,
        request: &PageRequest,
    ) -> Result<Page<Post>>;

    /// Comments of a post.
    async fn post_comments(&self, post: &PostId, request: &PageRequest) -> Result<Page<Comment>>;

    /// Users who up-voted a post.
    async fn post_up_voters(
        &self,
        post: &PostId,
        request: &PageRequest,
    ) -> Result<Page<UpVoter>>;

    /// Users who up-voted a comment.
    async fn comment_up_voters(
        &self,
        comment: &CommentId,
        request: &PageRequest,
    ) -> Result<Page<UpVoter>>;
}
