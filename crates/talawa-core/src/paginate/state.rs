//! Collection state and the page merge.

use std::collections::HashSet;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::types::Cursor;

use super::Page;

/// An entity with a stable unique id.
pub trait Identified {
    /// The id type; equality on it decides duplicates.
    type Id: Eq + Hash + Clone;

    /// Returns this entity's id.
    fn id(&self) -> &Self::Id;
}

/// The locally held part of a paginated collection.
///
/// Items keep arrival order and never repeat an id. A fresh state has no
/// items, no cursor and `has_more` set, meaning "not yet known to be
/// exhausted".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionState<T> {
    pub items: Vec<T>,
    pub cursor: Option<Cursor>,
    pub has_more: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

impl<T> CollectionState<T> {
    /// An empty state that has not seen any page yet.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            cursor: None,
            has_more: true,
            total_count: None,
        }
    }

    /// Number of items held.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if no items are held.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Identified> CollectionState<T> {
    /// Whether an item with `id` is held.
    pub fn contains(&self, id: &T::Id) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }

    /// Append an item the server has confirmed outside of paging, such as
    /// the current user's own up-vote. Returns false if the id is held.
    ///
    /// A known total count grows by one.
    pub fn insert(&mut self, item: T) -> bool {
        if self.contains(item.id()) {
            return false;
        }
        self.items.push(item);
        if let Some(total) = &mut self.total_count {
            *total += 1;
        }
        true
    }

    /// Remove the item with `id`, keeping the order of the rest. A known
    /// total count shrinks by one.
    pub fn remove(&mut self, id: &T::Id) -> Option<T> {
        let position = self.items.iter().position(|item| item.id() == id)?;
        if let Some(total) = &mut self.total_count {
            *total = total.saturating_sub(1);
        }
        Some(self.items.remove(position))
    }
}

impl<T> Default for CollectionState<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Fold `page` into `state`, keying entities by their [`Identified`] id.
///
/// See [`merge_by`] for the exact rules.
pub fn merge<T: Identified>(state: CollectionState<T>, page: Page<T>) -> CollectionState<T> {
    merge_by(state, page, |item| item.id().clone())
}

/// Fold `page` into `state`, keying entities with `key`.
///
/// - items of `page` whose key is not yet held are appended in page order;
///   the rest are dropped, including repeats within the page itself;
/// - the cursor becomes `page.end_cursor` when present, else it is kept;
/// - `has_more` always becomes `page.has_next_page`;
/// - the total count becomes `page.total_count` when present.
///
/// Held items are never reordered or removed, and applying the same page
/// twice yields the same state as applying it once.
pub fn merge_by<T, K, F>(state: CollectionState<T>, page: Page<T>, key: F) -> CollectionState<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let CollectionState {
        mut items,
        cursor,
        has_more: _,
        total_count,
    } = state;

    let mut seen: HashSet<K> = items.iter().map(&key).collect();
    items.reserve(page.items.len());

    for item in page.items {
        if seen.insert(key(&item)) {
            items.push(item);
        }
    }

    CollectionState {
        items,
        cursor: page.end_cursor.or(cursor),
        has_more: page.has_next_page,
        total_count: page.total_count.or(total_count),
    }
}
