//! Per-parent collection registry.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::traits::PageSource;

use super::Collection;

/// Keeps one [`Collection`] per parent key, e.g. the comment list of every
/// post currently expanded on screen.
///
/// Closing a key discards its collection, so a page still in flight for it
/// is dropped on arrival even if the same key is opened again meanwhile.
pub struct CollectionRegistry<K, S: PageSource> {
    collections: Mutex<HashMap<K, Arc<Collection<S>>>>,
}

impl<K, S> CollectionRegistry<K, S>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    S: PageSource,
{
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            collections: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<K, Arc<Collection<S>>>> {
        self.collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the collection for `key`, creating it with `create` if none
    /// is open.
    pub fn open<F>(&self, key: K, create: F) -> Arc<Collection<S>>
    where
        F: FnOnce(&K) -> Collection<S>,
    {
        let mut collections = self.lock();
        collections
            .entry(key)
            .or_insert_with_key(|key| {
                debug!(?key, "Opening collection");
                Arc::new(create(key))
            })
            .clone()
    }

    /// Returns the open collection for `key`, if any.
    pub fn get(&self, key: &K) -> Option<Arc<Collection<S>>> {
        self.lock().get(key).cloned()
    }

    /// Discard and forget the collection for `key`. Returns whether one was
    /// open.
    pub fn close(&self, key: &K) -> bool {
        let removed = self.lock().remove(key);
        match removed {
            Some(collection) => {
                debug!(?key, "Closing collection");
                collection.discard();
                true
            }
            None => false,
        }
    }

    /// Discard and forget every collection.
    pub fn clear(&self) {
        let drained: Vec<_> = self.lock().drain().map(|(_, c)| c).collect();
        for collection in drained {
            collection.discard();
        }
    }

    /// Number of open collections.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if no collection is open.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl<K, S> Default for CollectionRegistry<K, S>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    S: PageSource,
{
    fn default() -> Self {
        Self::new()
    }
}
