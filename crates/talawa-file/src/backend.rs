//! Snapshot-backed [`Backend`] implementation.

use std::path::Path;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use talawa_core::error::InvalidInputError;
use talawa_core::model::{Comment, Post, UpVoter};
use talawa_core::paginate::{Page, PageRequest};
use talawa_core::traits::Backend;
use talawa_core::types::{ApiUrl, CommentId, Cursor, OrganizationId, PostId};
use talawa_core::Result;

use crate::store::{ConnectionKind, SnapshotStore};

/// A backend that serves pages from a snapshot directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    store: SnapshotStore,
    url: ApiUrl,
}

impl FileBackend {
    /// Create a backend over the snapshot at `root`, reported as `url`.
    pub fn new(root: impl AsRef<Path>, url: ApiUrl) -> Self {
        Self {
            store: SnapshotStore::new(root),
            url,
        }
    }

    /// Create a backend from a `file://` endpoint.
    pub fn from_url(url: ApiUrl) -> Result<Self> {
        let root = url.to_file_path().ok_or_else(|| InvalidInputError::ApiUrl {
            value: url.to_string(),
            reason: "snapshot endpoint must be a file:// URL".to_string(),
        })?;
        Ok(Self::new(root, url))
    }

    /// Access the underlying snapshot store.
    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    async fn page<T: DeserializeOwned>(
        &self,
        kind: ConnectionKind,
        parent: &str,
        request: &PageRequest,
    ) -> Result<Page<T>> {
        let items = self.store.read::<T>(kind, parent).await?;
        let page = slice_page(items, request)?;
        debug!(
            %kind,
            parent,
            count = page.len(),
            has_next_page = page.has_next_page,
            "Served snapshot page"
        );
        Ok(page)
    }
}

/// Cut the page that `request` asks for out of a full connection.
///
/// Cursors are decimal offsets into the connection: a page's end cursor is
/// the offset just past its last item. Offsets stay valid when the file
/// repeats an id.
fn slice_page<T>(items: Vec<T>, request: &PageRequest) -> Result<Page<T>> {
    let total = items.len();

    let start = match &request.after {
        None => 0,
        Some(cursor) => parse_offset(cursor, total)?,
    };

    let end = start.saturating_add(request.first as usize).min(total);
    let has_next_page = end < total;

    let page_items: Vec<T> = items.into_iter().skip(start).take(end - start).collect();
    let end_cursor = Cursor::new(end.to_string())?;

    Ok(Page::new(page_items, Some(end_cursor), has_next_page).with_total_count(total as u64))
}

fn parse_offset(cursor: &Cursor, total: usize) -> Result<usize> {
    let offset: usize = cursor
        .as_str()
        .parse()
        .map_err(|_| InvalidInputError::Cursor {
            value: cursor.to_string(),
            reason: "snapshot cursors are item offsets".to_string(),
        })?;

    if offset > total {
        return Err(InvalidInputError::Cursor {
            value: cursor.to_string(),
            reason: format!("offset is past the end of a {}-item connection", total),
        }
        .into());
    }

    Ok(offset)
}

#[async_trait]
impl Backend for FileBackend {
    fn endpoint(&self) -> &ApiUrl {
        &self.url
    }

    #[instrument(skip(self))]
    async fn organization_posts(
        &self,
        organization: &OrganizationId,
        request: &PageRequest,
    ) -> Result<Page<Post>> {
        self.page(ConnectionKind::Posts, organization.as_str(), request)
            .await
    }

    #[instrument(skip(self))]
    async fn post_comments(&self, post: &PostId, request: &PageRequest) -> Result<Page<Comment>> {
        self.page(ConnectionKind::Comments, post.as_str(), request)
            .await
    }

    #[instrument(skip(self))]
    async fn post_up_voters(
        &self,
        post: &PostId,
        request: &PageRequest,
    ) -> Result<Page<UpVoter>> {
        self.page(ConnectionKind::PostUpVoters, post.as_str(), request)
            .await
    }

    #[instrument(skip(self))]
    async fn comment_up_voters(
        &self,
        comment: &CommentId,
        request: &PageRequest,
    ) -> Result<Page<UpVoter>> {
        self.page(ConnectionKind::CommentUpVoters, comment.as_str(), request)
            .await
    }
}
