//! Cursor-paginated collections.
//!
//! [`merge`] folds one fetched [`Page`] into a [`CollectionState`]. A
//! [`Collection`] owns a state, drives fetches through a
//! [`PageSource`](crate::PageSource) and serializes merges; a
//! [`CollectionRegistry`] keeps one collection per parent entity.

mod collection;
mod page;
mod registry;
mod state;

pub use collection::{Collection, LoadOutcome};
pub use page::{Page, PageRequest};
pub use registry::CollectionRegistry;
pub use state::{CollectionState, Identified, merge, merge_by};
