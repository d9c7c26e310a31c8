//! GraphQL-backed [`Backend`] implementation.

use async_trait::async_trait;
use tracing::{debug, instrument};

use talawa_core::error::{Error, QueryError};
use talawa_core::model::{Comment, Post, UpVoter};
use talawa_core::paginate::{Page, PageRequest};
use talawa_core::traits::Backend;
use talawa_core::types::{ApiUrl, CommentId, OrganizationId, PostId};
use talawa_core::Result;

use crate::client::GraphqlClient;
use crate::queries::*;

/// A network backend talking to a Talawa API server.
#[derive(Debug, Clone)]
pub struct GraphqlBackend {
    client: GraphqlClient,
}

impl GraphqlBackend {
    /// Create a backend for `endpoint` with default client settings.
    pub fn new(endpoint: ApiUrl) -> Result<Self> {
        Ok(Self::from_client(GraphqlClient::new(endpoint)?))
    }

    /// Create a backend from a configured client.
    pub fn from_client(client: GraphqlClient) -> Self {
        Self { client }
    }

    /// Returns the underlying client.
    pub fn client(&self) -> &GraphqlClient {
        &self.client
    }
}

fn variables<'a>(id: &'a str, request: &'a PageRequest) -> ConnectionVariables<'a> {
    ConnectionVariables {
        input: IdInput { id },
        first: request.first,
        after: request.after.as_ref().map(|c| c.as_str()),
    }
}

fn not_found(kind: &'static str, id: &str) -> Error {
    QueryError::NotFound {
        kind,
        id: id.to_string(),
    }
    .into()
}

#[async_trait]
impl Backend for GraphqlBackend {
    fn endpoint(&self) -> &ApiUrl {
        self.client.endpoint()
    }

    #[instrument(skip(self), fields(%organization))]
    async fn organization_posts(
        &self,
        organization: &OrganizationId,
        request: &PageRequest,
    ) -> Result<Page<Post>> {
        debug!("Fetching posts via GraphQL");

        let data: OrganizationPostsData<Post> = self
            .client
            .query(
                ORGANIZATION_POSTS_OP,
                ORGANIZATION_POSTS,
                &variables(organization.as_str(), request),
            )
            .await?;

        let node = data
            .organization
            .ok_or_else(|| not_found("organization", organization.as_str()))?;
        node.posts.into_page(node.posts_count)
    }

    #[instrument(skip(self), fields(%post))]
    async fn post_comments(&self, post: &PostId, request: &PageRequest) -> Result<Page<Comment>> {
        debug!("Fetching comments via GraphQL");

        let data: PostCommentsData<Comment> = self
            .client
            .query(
                POST_COMMENTS_OP,
                POST_COMMENTS,
                &variables(post.as_str(), request),
            )
            .await?;

        let node = data.post.ok_or_else(|| not_found("post", post.as_str()))?;
        node.comments.into_page(node.comments_count)
    }

    #[instrument(skip(self), fields(%post))]
    async fn post_up_voters(
        &self,
        post: &PostId,
        request: &PageRequest,
    ) -> Result<Page<UpVoter>> {
        debug!("Fetching post up-voters via GraphQL");

        let data: PostUpVotersData<UpVoter> = self
            .client
            .query(
                POST_UP_VOTERS_OP,
                POST_UP_VOTERS,
                &variables(post.as_str(), request),
            )
            .await?;

        let node = data.post.ok_or_else(|| not_found("post", post.as_str()))?;
        node.up_voters.into_page(node.up_votes_count)
    }

    #[instrument(skip(self), fields(%comment))]
    async fn comment_up_voters(
        &self,
        comment: &CommentId,
        request: &PageRequest,
    ) -> Result<Page<UpVoter>> {
        debug!("Fetching comment up-voters via GraphQL");

        let data: CommentUpVotersData<UpVoter> = self
            .client
            .query(
                COMMENT_UP_VOTERS_OP,
                COMMENT_UP_VOTERS,
                &variables(comment.as_str(), request),
            )
            .await?;

        let node = data
            .comment
            .ok_or_else(|| not_found("comment", comment.as_str()))?;
        node.up_voters.into_page(node.up_votes_count)
    }
}
