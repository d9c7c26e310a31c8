//! Backend selection for the CLI.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;

use talawa_core::{
    ApiUrl, Backend, Comment, CommentId, OrganizationId, Page, PageRequest, Post, PostId,
    UpVoter,
};
use talawa_file::FileBackend;
use talawa_graphql::{DEFAULT_TIMEOUT, GraphqlBackend, GraphqlClient};

use crate::config::Resolved;

/// Either a snapshot directory or a GraphQL server.
#[derive(Debug)]
pub enum CliBackend {
    File(FileBackend),
    Graphql(GraphqlBackend),
}

impl CliBackend {
    /// Connect to the resolved endpoint.
    pub fn connect(config: Resolved) -> Result<Self> {
        if config.api_url.is_local() {
            if config.token.is_some() {
                tracing::debug!("Ignoring token for snapshot endpoint");
            }
            let backend =
                FileBackend::from_url(config.api_url).context("Invalid snapshot endpoint")?;
            return Ok(CliBackend::File(backend));
        }

        let timeout = config
            .timeout
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);
        let mut client = GraphqlClient::with_timeout(config.api_url, timeout)
            .context("Failed to create GraphQL client")?;
        if let Some(token) = &config.token {
            client = client.with_token(token).context("Invalid token")?;
        }
        Ok(CliBackend::Graphql(GraphqlBackend::from_client(client)))
    }
}

#[async_trait]
impl Backend for CliBackend {
    fn endpoint(&self) -> &ApiUrl {
        match self {
            CliBackend::File(b) => b.endpoint(),
            CliBackend::Graphql(b) => b.endpoint(),
        }
    }

    async fn organization_posts(
        &self,
        organization: &OrganizationId,
        request: &PageRequest,
    ) -> talawa_core::Result<Page<Post>> {
        match self {
            CliBackend::File(b) => b.organization_posts(organization, request).await,
            CliBackend::Graphql(b) => b.organization_posts(organization, request).await,
        }
    }

    async fn post_comments(
        &self,
        post: &PostId,
        request: &PageRequest,
    ) -> talawa_core::Result<Page<Comment>> {
        match self {
            CliBackend::File(b) => b.post_comments(post, request).await,
            CliBackend::Graphql(b) => b.post_comments(post, request).await,
        }
    }

    async fn post_up_voters(
        &self,
        post: &PostId,
        request: &PageRequest,
    ) -> talawa_core::Result<Page<UpVoter>> {
        match self {
            CliBackend::File(b) => b.post_up_voters(post, request).await,
            CliBackend::Graphql(b) => b.post_up_voters(post, request).await,
        }
    }

    async fn comment_up_voters(
        &self,
        comment: &CommentId,
        request: &PageRequest,
    ) -> talawa_core::Result<Page<UpVoter>> {
        match self {
            CliBackend::File(b) => b.comment_up_voters(comment, request).await,
            CliBackend::Graphql(b) => b.comment_up_voters(comment, request).await,
        }
    }
}
