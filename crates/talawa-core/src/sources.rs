//! Page sources for the four paginated connections of a post feed.
//!
//! Each source binds a [`Backend`] to one parent id and forwards fetches to
//! the matching backend method.

use std::sync::Arc;

use async_trait::async_trait;

use crate::Result;
use crate::model::{Comment, Post, UpVoter};
use crate::paginate::{Page, PageRequest};
use crate::traits::{Backend, PageSource};
use crate::types::{CommentId, OrganizationId, PostId};

/// Posts requested per page.
pub const POSTS_PAGE_SIZE: u32 = 10;

/// Comments requested per page.
pub const COMMENTS_PAGE_SIZE: u32 = 10;

/// Up-voters requested per page.
pub const UP_VOTERS_PAGE_SIZE: u32 = 5;

/// Posts of an organization.
#[derive(Debug)]
pub struct OrganizationPosts<B> {
    backend: Arc<B>,
    organization: OrganizationId,
}

impl<B: Backend> OrganizationPosts<B> {
    pub fn new(backend: Arc<B>, organization: OrganizationId) -> Self {
        Self {
            backend,
            organization,
        }
    }

    pub fn organization(&self) -> &OrganizationId {
        &self.organization
    }
}

#[async_trait]
impl<B: Backend> PageSource for OrganizationPosts<B> {
    type Item = Post;

    fn label(&self) -> &str {
        "posts"
    }

    async fn fetch(&self, request: &PageRequest) -> Result<Page<Post>> {
        self.backend
            .organization_posts(&self.organization, request)
            .await
    }
}

/// Comments of a post.
#[derive(Debug)]
pub struct PostComments<B> {
    backend: Arc<B>,
    post: PostId,
}

impl<B: Backend> PostComments<B> {
    pub fn new(backend: Arc<B>, post: PostId) -> Self {
        Self { backend, post }
    }

    pub fn post(&self) -> &PostId {
        &self.post
    }
}

#[async_trait]
impl<B: Backend> PageSource for PostComments<B> {
    type Item = Comment;

    fn label(&self) -> &str {
        "comments"
    }

    async fn fetch(&self, request: &PageRequest) -> Result<Page<Comment>> {
        self.backend.post_comments(&self.post, request).await
    }
}

/// Up-voters of a post.
#[derive(Debug)]
pub struct PostUpVoters<B> {
    backend: Arc<B>,
    post: PostId,
}

impl<B: Backend> PostUpVoters<B> {
    pub fn new(backend: Arc<B>, post: PostId) -> Self {
        Self { backend, post }
    }

    pub fn post(&self) -> &PostId {
        &self.post
    }
}

#[async_trait]
impl<B: Backend> PageSource for PostUpVoters<B> {
    type Item = UpVoter;

    fn label(&self) -> &str {
        "post up-voters"
    }

    async fn fetch(&self, request: &PageRequest) -> Result<Page<UpVoter>> {
        self.backend.post_up_voters(&self.post, request).await
    }
}

/// Up-voters of a comment.
#[derive(Debug)]
pub struct CommentUpVoters<B> {
    backend: Arc<B>,
    comment: CommentId,
}

impl<B: Backend> CommentUpVoters<B> {
    pub fn new(backend: Arc<B>, comment: CommentId) -> Self {
        Self { backend, comment }
    }

    pub fn comment(&self) -> &CommentId {
        &self.comment
    }
}

#[async_trait]
impl<B: Backend> PageSource for CommentUpVoters<B> {
    type Item = UpVoter;

    fn label(&self) -> &str {
        "comment up-voters"
    }

    async fn fetch(&self, request: &PageRequest) -> Result<Page<UpVoter>> {
        self.backend.comment_up_voters(&self.comment, request).await
    }
}
