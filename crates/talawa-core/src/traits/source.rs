//! Page source trait.

use async_trait::async_trait;

use crate::Result;
use crate::paginate::{Identified, Page, PageRequest};

/// A fetch collaborator bound to one parent entity.
///
/// A [`Collection`](crate::Collection) calls [`fetch`](PageSource::fetch)
/// with no cursor for the first page and with the stored cursor afterwards.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Entity type of the collection.
    type Item: Identified + Clone + Send + Sync;

    /// Short label used in logs and notifications, e.g. `"comments"`.
    fn label(&self) -> &str;

    /// Fetch one page.
    async fn fetch(&self, request: &PageRequest) -> Result<Page<Self::Item>>;
}
