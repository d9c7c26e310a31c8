//! Collection controller.

use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_core::Stream;
use tracing::{debug, instrument, warn};

use crate::Result;
use crate::traits::{LogNotifier, Notifier, PageSource};
use crate::types::Cursor;

use super::{CollectionState, Identified, PageRequest, merge};

/// Result of a load trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page was fetched and merged.
    Loaded {
        /// Number of previously unseen items appended.
        added: usize,
        /// Whether the backend reports further pages.
        has_more: bool,
    },
    /// The last merged page reported no further pages; nothing was fetched.
    Exhausted,
    /// `load_initial` on a collection that already holds a page.
    AlreadyLoaded,
    /// Another load for this collection is in flight; nothing was fetched.
    Busy,
    /// More pages are reported but no cursor is stored; nothing was fetched.
    MissingCursor,
    /// The collection was discarded or reset while the fetch was in flight,
    /// or before the trigger; the page was dropped.
    Discarded,
    /// The backend reported more pages behind a cursor that was already
    /// requested in the same run. Only reported by [`Collection::load_all`]
    /// and [`Collection::pages`].
    Stalled,
}

struct Inner<T> {
    state: CollectionState<T>,
    loaded: bool,
    generation: u64,
    discarded: bool,
}

enum Advance<T> {
    Appended {
        items: Vec<T>,
        has_more: bool,
        /// Cursor the page was fetched with.
        requested: Option<Cursor>,
        /// Cursor the next page would be fetched with.
        next: Option<Cursor>,
    },
    Skipped(LoadOutcome),
}

/// Marks a collection as having a fetch in flight until dropped.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// A paginated collection bound to one [`PageSource`].
///
/// The collection owns its [`CollectionState`] and is the only thing that
/// merges into it. Triggers take `&self`, so a collection can be shared
/// (for example behind an `Arc`) between the code that renders it and the
/// code that reacts to "load more" requests:
///
/// - at most one fetch is in flight at a time; a trigger that arrives while
///   one is pending returns [`LoadOutcome::Busy`] without fetching;
/// - a page that resolves after [`discard`](Self::discard) or
///   [`reset`](Self::reset) is dropped and reported as
///   [`LoadOutcome::Discarded`];
/// - a failed fetch leaves the state untouched, is passed to the
///   collection's [`Notifier`], and is returned to the caller.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use talawa_core::{Backend, Collection, PostComments, PostId};
///
/// # async fn example(backend: Arc<impl Backend + 'static>) -> talawa_core::Result<()> {
/// let post = PostId::new("post-1")?;
/// let comments = Collection::new(PostComments::new(backend, post), 10);
///
/// comments.load_initial().await?;
/// while comments.has_more() {
///     comments.load_more().await?;
/// }
/// println!("{} comments", comments.len());
/// # Ok(())
/// # }
/// ```
pub struct Collection<S: PageSource> {
    source: S,
    page_size: u32,
    notifier: Arc<dyn Notifier>,
    in_flight: AtomicBool,
    inner: Mutex<Inner<S::Item>>,
}

impl<S: PageSource> Collection<S> {
    /// Create an empty collection that fetches `page_size` items per page.
    ///
    /// A `page_size` of 0 is raised to 1.
    pub fn new(source: S, page_size: u32) -> Self {
        Self::with_state(source, page_size, CollectionState::new(), false)
    }

    /// Create a collection from a previously held state.
    ///
    /// The state counts as loaded: the next [`load_more`](Self::load_more)
    /// continues from `state.cursor` instead of fetching the first page.
    pub fn resume(source: S, page_size: u32, state: CollectionState<S::Item>) -> Self {
        Self::with_state(source, page_size, state, true)
    }

    fn with_state(
        source: S,
        page_size: u32,
        state: CollectionState<S::Item>,
        loaded: bool,
    ) -> Self {
        Self {
            source,
            page_size: page_size.max(1),
            notifier: Arc::new(LogNotifier),
            in_flight: AtomicBool::new(false),
            inner: Mutex::new(Inner {
                state,
                loaded,
                generation: 0,
                discarded: false,
            }),
        }
    }

    /// Replace the notifier that receives fetch failures.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Returns the page source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the number of items requested per page.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    fn lock(&self) -> MutexGuard<'_, Inner<S::Item>> {
        // Merges never leave the state half-written, so a poisoned lock is
        // still consistent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a snapshot of the current state.
    pub fn state(&self) -> CollectionState<S::Item> {
        self.lock().state.clone()
    }

    /// Returns a snapshot of the held items.
    pub fn items(&self) -> Vec<S::Item> {
        self.lock().state.items.clone()
    }

    /// Number of held items.
    pub fn len(&self) -> usize {
        self.lock().state.len()
    }

    /// Returns true if no items are held.
    pub fn is_empty(&self) -> bool {
        self.lock().state.is_empty()
    }

    /// Whether more pages may be loaded.
    pub fn has_more(&self) -> bool {
        self.lock().state.has_more
    }

    /// Returns the stored continuation cursor.
    pub fn cursor(&self) -> Option<Cursor> {
        self.lock().state.cursor.clone()
    }

    /// Whether an item with `id` is held.
    pub fn contains(&self, id: &<S::Item as Identified>::Id) -> bool {
        self.lock().state.contains(id)
    }

    /// Add an item confirmed outside of paging. See
    /// [`CollectionState::insert`].
    pub fn insert(&self, item: S::Item) -> bool {
        self.lock().state.insert(item)
    }

    /// Remove a held item. See [`CollectionState::remove`].
    pub fn remove(&self, id: &<S::Item as Identified>::Id) -> Option<S::Item> {
        self.lock().state.remove(id)
    }

    /// Whether at least one page has been merged (or the collection was
    /// resumed from a state).
    pub fn is_loaded(&self) -> bool {
        self.lock().loaded
    }

    /// Whether a fetch is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Whether the collection has been discarded.
    pub fn is_discarded(&self) -> bool {
        self.lock().discarded
    }

    /// Stop accepting pages. Later triggers and in-flight fetches report
    /// [`LoadOutcome::Discarded`].
    pub fn discard(&self) {
        let mut inner = self.lock();
        inner.discarded = true;
        inner.generation += 1;
        debug!(collection = self.source.label(), "Collection discarded");
    }

    /// Return to the initial empty state. A fetch in flight at this point is
    /// dropped when it resolves.
    pub fn reset(&self) {
        let mut inner = self.lock();
        inner.state = CollectionState::new();
        inner.loaded = false;
        inner.generation += 1;
        debug!(collection = self.source.label(), "Collection reset");
    }

    /// Fetch and merge the first page if no page has been loaded yet.
    #[instrument(skip(self), fields(collection = self.source.label()))]
    pub async fn load_initial(&self) -> Result<LoadOutcome> {
        let Some(_in_flight) = InFlight::acquire(&self.in_flight) else {
            debug!("Load already in flight");
            return Ok(LoadOutcome::Busy);
        };

        {
            let inner = self.lock();
            if inner.discarded {
                return Ok(LoadOutcome::Discarded);
            }
            if inner.loaded {
                return Ok(LoadOutcome::AlreadyLoaded);
            }
        }

        Ok(self.fetch_and_merge(None).await?.into_outcome())
    }

    /// Fetch and merge the next page.
    ///
    /// Performs the initial load if nothing has been loaded yet.
    #[instrument(skip(self), fields(collection = self.source.label()))]
    pub async fn load_more(&self) -> Result<LoadOutcome> {
        Ok(self.advance().await?.into_outcome())
    }

    /// Load pages until the collection is exhausted.
    ///
    /// Returns the outcome that ended the loop: [`LoadOutcome::Exhausted`]
    /// on success, or whichever outcome stopped progress.
    pub async fn load_all(&self) -> Result<LoadOutcome> {
        let mut trail = CursorTrail::default();
        loop {
            match self.advance().await? {
                Advance::Appended {
                    has_more,
                    requested,
                    next,
                    ..
                } => {
                    if trail.revisits(requested, has_more, next.as_ref()) {
                        warn!(
                            collection = self.source.label(),
                            "Backend points back to an already requested cursor"
                        );
                        return Ok(LoadOutcome::Stalled);
                    }
                }
                Advance::Skipped(outcome) => return Ok(outcome),
            }
        }
    }

    /// Stream the items appended by each successive page.
    ///
    /// The stream ends when the collection is exhausted or a trigger is
    /// skipped (busy, discarded, missing cursor, stalled), and yields an
    /// error at most once, after which it ends.
    pub fn pages(&self) -> impl Stream<Item = Result<Vec<S::Item>>> + Send + '_ {
        async_stream::try_stream! {
            let mut trail = CursorTrail::default();
            loop {
                match self.advance().await? {
                    Advance::Appended { items, has_more, requested, next } => {
                        let stalled = trail.revisits(requested, has_more, next.as_ref());
                        if !items.is_empty() {
                            yield items;
                        }
                        if stalled {
                            warn!(
                                collection = self.source.label(),
                                "Backend points back to an already requested cursor"
                            );
                            break;
                        }
                    }
                    Advance::Skipped(_) => break,
                }
            }
        }
    }

    async fn advance(&self) -> Result<Advance<S::Item>> {
        let Some(_in_flight) = InFlight::acquire(&self.in_flight) else {
            debug!("Load already in flight");
            return Ok(Advance::Skipped(LoadOutcome::Busy));
        };

        let cursor = {
            let inner = self.lock();
            if inner.discarded {
                return Ok(Advance::Skipped(LoadOutcome::Discarded));
            }
            if !inner.loaded {
                None
            } else if !inner.state.has_more {
                debug!("No more pages");
                return Ok(Advance::Skipped(LoadOutcome::Exhausted));
            } else {
                match inner.state.cursor.clone() {
                    Some(cursor) => Some(cursor),
                    None => {
                        warn!(
                            collection = self.source.label(),
                            "More pages reported but no cursor is stored; skipping fetch"
                        );
                        return Ok(Advance::Skipped(LoadOutcome::MissingCursor));
                    }
                }
            }
        };

        self.fetch_and_merge(cursor).await
    }

    /// Fetch one page after `cursor` and merge it. The caller must hold the
    /// in-flight marker.
    async fn fetch_and_merge(&self, cursor: Option<Cursor>) -> Result<Advance<S::Item>> {
        let generation = self.lock().generation;
        let request = PageRequest {
            first: self.page_size,
            after: cursor,
        };

        debug!(first = request.first, after = ?request.after, "Fetching page");
        let result = self.source.fetch(&request).await;

        let mut inner = self.lock();
        if inner.discarded || inner.generation != generation {
            debug!("Dropping page for a discarded collection");
            return Ok(Advance::Skipped(LoadOutcome::Discarded));
        }

        let page = match result {
            Ok(page) => page,
            Err(e) => {
                drop(inner);
                self.notifier.fetch_failed(self.source.label(), &e);
                return Err(e);
            }
        };

        let before = inner.state.len();
        let state = std::mem::take(&mut inner.state);
        inner.state = merge(state, page);
        inner.loaded = true;

        let items = inner.state.items[before..].to_vec();
        let has_more = inner.state.has_more;
        let next = inner.state.cursor.clone();
        debug!(added = items.len(), has_more, "Merged page");

        Ok(Advance::Appended {
            items,
            has_more,
            requested: request.after,
            next,
        })
    }
}

/// Cursors requested during one [`Collection::load_all`] or
/// [`Collection::pages`] run.
#[derive(Default)]
struct CursorTrail(HashSet<Cursor>);

impl CursorTrail {
    /// Record the cursor a page was fetched with. Returns true if the next
    /// fetch would repeat a cursor already requested in this run.
    fn revisits(
        &mut self,
        requested: Option<Cursor>,
        has_more: bool,
        next: Option<&Cursor>,
    ) -> bool {
        if let Some(cursor) = requested {
            self.0.insert(cursor);
        }
        has_more && next.is_some_and(|cursor| self.0.contains(cursor))
    }
}

impl<T> Advance<T> {
    fn into_outcome(self) -> LoadOutcome {
        match self {
            Advance::Appended {
                items, has_more, ..
            } => LoadOutcome::Loaded {
                added: items.len(),
                has_more,
            },
            Advance::Skipped(outcome) => outcome,
        }
    }
}

impl<S: PageSource> fmt::Debug for Collection<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("Collection")
            .field("source", &self.source.label())
            .field("page_size", &self.page_size)
            .field("items", &inner.state.len())
            .field("has_more", &inner.state.has_more)
            .field("loaded", &inner.loaded)
            .field("discarded", &inner.discarded)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::AtomicUsize;

    use async_trait::async_trait;
    use futures_util::StreamExt;
    use tokio::sync::Notify;

    use super::*;
    use crate::error::{Error, TransportError};
    use crate::paginate::Page;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Item(&'static str);

    impl Identified for Item {
        type Id = &'static str;

        fn id(&self) -> &&'static str {
            &self.0
        }
    }

    /// Serves scripted pages in order and records every request.
    #[derive(Default)]
    struct ScriptedSource {
        pages: Mutex<VecDeque<Result<Page<Item>>>>,
        requests: Mutex<Vec<PageRequest>>,
        gate: Option<Arc<Notify>>,
    }

    impl ScriptedSource {
        fn new(pages: Vec<Result<Page<Item>>>) -> Self {
            Self {
                pages: Mutex::new(pages.into()),
                ..Self::default()
            }
        }

        fn gated(pages: Vec<Result<Page<Item>>>, gate: Arc<Notify>) -> Self {
            Self {
                gate: Some(gate),
                ..Self::new(pages)
            }
        }

        fn requests(&self) -> Vec<PageRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageSource for ScriptedSource {
        type Item = Item;

        fn label(&self) -> &str {
            "items"
        }

        async fn fetch(&self, request: &PageRequest) -> Result<Page<Item>> {
            self.requests.lock().unwrap().push(request.clone());
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.pages
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Page::empty()))
        }
    }

    #[derive(Default)]
    struct CountingNotifier(AtomicUsize);

    impl Notifier for CountingNotifier {
        fn fetch_failed(&self, _label: &str, _error: &Error) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn cursor(s: &str) -> Option<Cursor> {
        Some(Cursor::new(s).unwrap())
    }

    fn page(ids: &[&'static str], end: &str, has_next: bool) -> Result<Page<Item>> {
        Ok(Page::new(
            ids.iter().copied().map(Item).collect(),
            cursor(end),
            has_next,
        ))
    }

    fn timeout() -> Result<Page<Item>> {
        Err(TransportError::Timeout.into())
    }

    #[tokio::test]
    async fn initial_load_requests_first_page_without_cursor() {
        let collection = Collection::new(ScriptedSource::new(vec![page(&["a", "b"], "c1", true)]), 2);

        let outcome = collection.load_initial().await.unwrap();

        assert_eq!(
            outcome,
            LoadOutcome::Loaded {
                added: 2,
                has_more: true
            }
        );
        assert_eq!(collection.source().requests(), vec![PageRequest::first(2)]);
        assert_eq!(collection.cursor(), cursor("c1"));
        assert!(collection.is_loaded());
    }

    #[tokio::test]
    async fn load_initial_twice_fetches_once() {
        let collection = Collection::new(ScriptedSource::new(vec![page(&["a"], "c1", true)]), 10);

        collection.load_initial().await.unwrap();
        let outcome = collection.load_initial().await.unwrap();

        assert_eq!(outcome, LoadOutcome::AlreadyLoaded);
        assert_eq!(collection.source().requests().len(), 1);
    }

    #[tokio::test]
    async fn load_more_uses_stored_cursor_and_drops_duplicates() {
        let collection = Collection::new(
            ScriptedSource::new(vec![
                page(&["a", "b"], "c1", true),
                page(&["b", "c"], "c2", false),
            ]),
            2,
        );

        collection.load_more().await.unwrap();
        let outcome = collection.load_more().await.unwrap();

        assert_eq!(
            outcome,
            LoadOutcome::Loaded {
                added: 1,
                has_more: false
            }
        );
        assert_eq!(
            collection.source().requests(),
            vec![
                PageRequest::first(2),
                PageRequest::after(2, Cursor::new("c1").unwrap())
            ]
        );
        assert_eq!(collection.items(), vec![Item("a"), Item("b"), Item("c")]);
    }

    #[tokio::test]
    async fn exhausted_collection_does_not_fetch() {
        let collection = Collection::new(ScriptedSource::new(vec![page(&["a"], "c1", false)]), 10);

        collection.load_more().await.unwrap();
        let outcome = collection.load_more().await.unwrap();

        assert_eq!(outcome, LoadOutcome::Exhausted);
        assert_eq!(collection.source().requests().len(), 1);
    }

    #[tokio::test]
    async fn missing_cursor_suppresses_fetch() {
        let state = CollectionState {
            items: vec![Item("a")],
            cursor: None,
            has_more: true,
            total_count: None,
        };
        let collection = Collection::resume(ScriptedSource::new(vec![]), 10, state.clone());

        let outcome = collection.load_more().await.unwrap();

        assert_eq!(outcome, LoadOutcome::MissingCursor);
        assert!(collection.source().requests().is_empty());
        assert_eq!(collection.state(), state);
    }

    #[tokio::test]
    async fn resumed_collection_continues_from_its_cursor() {
        let state = CollectionState {
            items: vec![Item("a")],
            cursor: cursor("c1"),
            has_more: true,
            total_count: None,
        };
        let collection =
            Collection::resume(ScriptedSource::new(vec![page(&["b"], "c2", false)]), 5, state);

        collection.load_more().await.unwrap();

        assert_eq!(
            collection.source().requests(),
            vec![PageRequest::after(5, Cursor::new("c1").unwrap())]
        );
        assert_eq!(collection.items(), vec![Item("a"), Item("b")]);
    }

    #[tokio::test]
    async fn failed_fetch_leaves_state_and_notifies() {
        let notifier = Arc::new(CountingNotifier::default());
        let collection = Collection::new(
            ScriptedSource::new(vec![page(&["a"], "c1", true), timeout()]),
            10,
        )
        .with_notifier(notifier.clone());

        collection.load_more().await.unwrap();
        let before = collection.state();

        let err = collection.load_more().await.unwrap_err();

        assert!(matches!(err, Error::Transport(TransportError::Timeout)));
        assert_eq!(notifier.0.load(Ordering::SeqCst), 1);
        assert_eq!(collection.state(), before);
        assert!(!collection.is_loading());
    }

    #[tokio::test]
    async fn failed_initial_load_can_be_retried() {
        let collection = Collection::new(
            ScriptedSource::new(vec![timeout(), page(&["a"], "c1", false)]),
            10,
        );

        assert!(collection.load_initial().await.is_err());
        assert!(!collection.is_loaded());

        let outcome = collection.load_initial().await.unwrap();
        assert_eq!(
            outcome,
            LoadOutcome::Loaded {
                added: 1,
                has_more: false
            }
        );
    }

    #[tokio::test]
    async fn concurrent_trigger_is_rejected_while_fetch_in_flight() {
        let gate = Arc::new(Notify::new());
        let collection = Collection::new(
            ScriptedSource::gated(vec![page(&["a"], "c1", true)], gate.clone()),
            10,
        );

        let first = collection.load_more();
        let second = async {
            tokio::task::yield_now().await;
            assert!(collection.is_loading());
            let outcome = collection.load_more().await;
            gate.notify_one();
            outcome
        };

        let (first, second) = tokio::join!(first, second);

        assert_eq!(second.unwrap(), LoadOutcome::Busy);
        assert_eq!(
            first.unwrap(),
            LoadOutcome::Loaded {
                added: 1,
                has_more: true
            }
        );
        assert_eq!(collection.source().requests().len(), 1);
        assert!(!collection.is_loading());
    }

    #[tokio::test]
    async fn page_resolving_after_discard_is_dropped() {
        let gate = Arc::new(Notify::new());
        let collection = Collection::new(
            ScriptedSource::gated(vec![page(&["a"], "c1", true)], gate.clone()),
            10,
        );

        let load = collection.load_more();
        let close = async {
            tokio::task::yield_now().await;
            collection.discard();
            gate.notify_one();
        };

        let (outcome, ()) = tokio::join!(load, close);

        assert_eq!(outcome.unwrap(), LoadOutcome::Discarded);
        assert!(collection.is_empty());
        assert_eq!(
            collection.load_more().await.unwrap(),
            LoadOutcome::Discarded
        );
    }

    #[tokio::test]
    async fn failure_after_discard_is_not_notified() {
        let gate = Arc::new(Notify::new());
        let notifier = Arc::new(CountingNotifier::default());
        let collection = Collection::new(ScriptedSource::gated(vec![timeout()], gate.clone()), 10)
            .with_notifier(notifier.clone());

        let load = collection.load_more();
        let close = async {
            tokio::task::yield_now().await;
            collection.discard();
            gate.notify_one();
        };

        let (outcome, ()) = tokio::join!(load, close);

        assert_eq!(outcome.unwrap(), LoadOutcome::Discarded);
        assert_eq!(notifier.0.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn reset_drops_in_flight_page_and_starts_over() {
        let gate = Arc::new(Notify::new());
        let collection = Collection::new(
            ScriptedSource::gated(
                vec![page(&["stale"], "c1", true), page(&["fresh"], "c9", false)],
                gate.clone(),
            ),
            10,
        );

        let load = collection.load_more();
        let reset = async {
            tokio::task::yield_now().await;
            collection.reset();
            gate.notify_one();
        };
        let (outcome, ()) = tokio::join!(load, reset);
        assert_eq!(outcome.unwrap(), LoadOutcome::Discarded);
        assert!(!collection.is_loaded());

        gate.notify_one();
        collection.load_more().await.unwrap();

        assert_eq!(collection.items(), vec![Item("fresh")]);
        assert_eq!(
            collection.source().requests(),
            vec![PageRequest::first(10), PageRequest::first(10)]
        );
    }

    #[tokio::test]
    async fn load_all_walks_every_page() {
        let collection = Collection::new(
            ScriptedSource::new(vec![
                page(&["a", "b"], "c1", true),
                page(&["c", "d"], "c2", true),
                page(&["e"], "c3", false),
            ]),
            2,
        );

        let outcome = collection.load_all().await.unwrap();

        assert_eq!(outcome, LoadOutcome::Exhausted);
        assert_eq!(collection.len(), 5);
        assert_eq!(collection.source().requests().len(), 3);
    }

    #[tokio::test]
    async fn load_all_stops_when_backend_stalls() {
        let collection = Collection::new(
            ScriptedSource::new(vec![page(&["a"], "c1", true), page(&["a"], "c1", true)]),
            1,
        );

        let outcome = collection.load_all().await.unwrap();

        assert_eq!(outcome, LoadOutcome::Stalled);
        assert_eq!(collection.items(), vec![Item("a")]);
    }

    #[tokio::test]
    async fn load_all_stops_when_backend_alternates_cursors() {
        let collection = Collection::new(
            ScriptedSource::new(vec![
                page(&["a"], "c1", true),
                page(&["b"], "c2", true),
                page(&["a"], "c1", true),
                page(&["b"], "c2", true),
                page(&["z"], "c9", false),
            ]),
            1,
        );

        let outcome = collection.load_all().await.unwrap();

        assert_eq!(outcome, LoadOutcome::Stalled);
        assert_eq!(collection.items(), vec![Item("a"), Item("b")]);
        assert_eq!(collection.source().requests().len(), 3);
    }

    #[tokio::test]
    async fn load_all_stops_when_backend_points_back_to_an_earlier_cursor() {
        let collection = Collection::new(
            ScriptedSource::new(vec![
                page(&["a"], "c1", true),
                page(&["b"], "c2", true),
                page(&["c"], "c3", true),
                page(&["b"], "c2", true),
            ]),
            1,
        );

        let outcome = collection.load_all().await.unwrap();

        assert_eq!(outcome, LoadOutcome::Stalled);
        assert_eq!(collection.items(), vec![Item("a"), Item("b"), Item("c")]);
        assert_eq!(collection.source().requests().len(), 4);
    }

    #[tokio::test]
    async fn pages_stream_ends_when_cursor_repeats() {
        let collection = Collection::new(
            ScriptedSource::new(vec![
                page(&["a"], "c1", true),
                page(&["b"], "c2", true),
                page(&["a", "c"], "c1", true),
                page(&["d"], "c4", false),
            ]),
            2,
        );

        let pages: Vec<Vec<Item>> = collection
            .pages()
            .map(|page| page.unwrap())
            .collect()
            .await;

        assert_eq!(
            pages,
            vec![vec![Item("a")], vec![Item("b")], vec![Item("c")]]
        );
        assert_eq!(collection.source().requests().len(), 3);
    }

    #[tokio::test]
    async fn zero_page_size_is_raised_to_one() {
        let collection = Collection::new(ScriptedSource::new(vec![page(&["a"], "c1", false)]), 0);

        collection.load_more().await.unwrap();

        assert_eq!(collection.page_size(), 1);
        assert_eq!(collection.source().requests(), vec![PageRequest::first(1)]);
    }

    #[tokio::test]
    async fn pages_stream_yields_new_items_per_page() {
        let collection = Collection::new(
            ScriptedSource::new(vec![
                page(&["a", "b"], "c1", true),
                page(&["b", "c"], "c2", false),
            ]),
            2,
        );

        let pages: Vec<Vec<Item>> = collection
            .pages()
            .map(|page| page.unwrap())
            .collect()
            .await;

        assert_eq!(
            pages,
            vec![vec![Item("a"), Item("b")], vec![Item("c")]]
        );
    }

    #[tokio::test]
    async fn pages_stream_ends_with_error() {
        let collection = Collection::new(
            ScriptedSource::new(vec![page(&["a"], "c1", true), timeout()]),
            1,
        );

        let results: Vec<Result<Vec<Item>>> = collection.pages().collect().await;

        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }
}
