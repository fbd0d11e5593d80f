//! Article cache, pagination and lookup.
//!
//! [`ArticleStore`] fetches the full collection from an [`ArticleSource`]
//! the first time anything needs it, normalises it once, and then serves
//! page windows and single-article lookups from memory.  Failures never
//! escape as `Err`: callers read them back through [`ArticleStore::state`]
//! and [`ArticleStore::error`].
//!
//! ## Initialization guard
//!
//! The collection sits in a [`tokio::sync::OnceCell`].  The first caller
//! runs the fetch; callers arriving while it is in flight wait for that same
//! attempt instead of starting their own.  A failed attempt leaves the cell
//! empty, so the next caller (including one already waiting) tries again.
//! A caller dropped mid-fetch puts the state back to `Idle`.  Once filled,
//! the cell is never touched until [`ArticleStore::reset`].
//!
//! ## Locking
//!
//! View state lives behind a [`std::sync::Mutex`] that is only ever held
//! between awaits.

mod page;
mod state;

pub use page::Pager;
pub use state::LoadingState;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::article::Article;
use crate::error::FetchError;
use crate::normalize::normalize;
use crate::source::ArticleSource;

/// Message recorded when a lookup misses.
pub const ARTICLE_NOT_FOUND: &str = "Article not found";

/// Default number of articles per page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Store settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Articles per page (at least 1).
    pub page_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// An owned copy of everything the presentation layer reads.
#[derive(Debug, Clone, Default)]
pub struct StoreSnapshot {
    pub articles: Vec<Arc<Article>>,
    pub current: Option<Arc<Article>>,
    pub state: LoadingState,
    pub error: Option<String>,
    pub has_more: bool,
}

struct View {
    articles: Vec<Arc<Article>>,
    current: Option<Arc<Article>>,
    state: LoadingState,
    error: Option<String>,
    pager: Pager,
}

impl View {
    fn new(page_size: usize) -> Self {
        Self {
            articles: Vec::new(),
            current: None,
            state: LoadingState::Idle,
            error: None,
            pager: Pager::new(page_size),
        }
    }
}

/// Puts the state back to `Idle` if an initialization attempt is dropped
/// before the fetch completes.
struct LoadingGuard<'a> {
    store: &'a ArticleStore,
    armed: bool,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut view = self.store.view();
        if view.state == LoadingState::Loading {
            debug!("article collection load cancelled");
            view.state = LoadingState::Idle;
        }
    }
}

/// Lazily-initialised, paginated article cache.
pub struct ArticleStore {
    source: Arc<dyn ArticleSource>,
    config: StoreConfig,
    collection: OnceCell<Vec<Arc<Article>>>,
    view: Mutex<View>,
}

impl ArticleStore {
    pub fn new(source: Arc<dyn ArticleSource>, config: StoreConfig) -> Self {
        let view = View::new(config.page_size);
        Self {
            source,
            config,
            collection: OnceCell::new(),
            view: Mutex::new(view),
        }
    }

    fn view(&self) -> MutexGuard<'_, View> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // -- initialization ------------------------------------------------------

    /// Make sure the collection has been fetched, returning it.
    ///
    /// After a successful fetch this is free and leaves the state alone.
    /// After a failure it returns an empty slice and the next call retries.
    pub async fn ensure_initialized(&self) -> &[Arc<Article>] {
        match self.collection.get_or_try_init(|| self.initialize()).await {
            Ok(collection) => collection.as_slice(),
            Err(_) => &[],
        }
    }

    async fn initialize(&self) -> Result<Vec<Arc<Article>>, FetchError> {
        {
            let mut view = self.view();
            view.state = LoadingState::Loading;
            view.error = None;
        }
        let mut attempt = LoadingGuard { store: self, armed: true };
        info!(source = self.source.name(), "loading article collection");

        match self.source.fetch().await {
            Ok(raw) => {
                let now = Utc::now();
                let collection: Vec<Arc<Article>> = raw
                    .into_iter()
                    .enumerate()
                    .map(|(index, record)| Arc::new(normalize(record, index, now)))
                    .collect();

                info!(count = collection.len(), "article collection ready");
                attempt.armed = false;
                self.view().state = LoadingState::Success;
                Ok(collection)
            }
            Err(e) => {
                warn!(error = %e, status = ?e.status_code(), "failed to load article collection");
                attempt.armed = false;
                let mut view = self.view();
                view.state = LoadingState::Error;
                view.error = Some(FetchError::USER_MESSAGE.to_string());
                Err(e)
            }
        }
    }

    // -- operations ----------------------------------------------------------

    /// Show the first page (`reset`) or append the next one.
    pub async fn load_page(&self, reset: bool) {
        let collection = self.ensure_initialized().await;

        let mut view = self.view();
        let View { pager, articles, .. } = &mut *view;
        let added = pager.load(collection, articles, reset);
        debug!(
            reset,
            added,
            visible = articles.len(),
            page = pager.page(),
            has_more = pager.has_more(),
            "loaded page"
        );
    }

    /// Select the article whose id is `id` as the current one.
    ///
    /// A miss clears the current article and records [`ARTICLE_NOT_FOUND`]
    /// without changing the loading state.  A hit leaves the error field as
    /// it was.
    pub async fn load_by_id(&self, id: &str) {
        let collection = self.ensure_initialized().await;
        let found = collection.iter().find(|a| a.id == id).cloned();

        let mut view = self.view();
        if found.is_none() {
            debug!(id, "article lookup missed");
            view.error = Some(ARTICLE_NOT_FOUND.to_string());
        }
        view.current = found;
    }

    /// Drop the cached collection and every view, back to `Idle`.
    pub fn reset(&mut self) {
        self.collection.take();
        *self.view.get_mut().unwrap_or_else(PoisonError::into_inner) =
            View::new(self.page_size());
    }

    // -- read-only views -----------------------------------------------------

    pub fn articles(&self) -> Vec<Arc<Article>> {
        self.view().articles.clone()
    }

    pub fn current(&self) -> Option<Arc<Article>> {
        self.view().current.clone()
    }

    pub fn state(&self) -> LoadingState {
        self.view().state
    }

    pub fn error(&self) -> Option<String> {
        self.view().error.clone()
    }

    pub fn has_more(&self) -> bool {
        self.view().pager.has_more()
    }

    /// Pages loaded into the visible list.
    pub fn page(&self) -> usize {
        self.view().pager.page()
    }

    pub fn page_size(&self) -> usize {
        self.config.page_size.max(1)
    }

    pub fn is_initialized(&self) -> bool {
        self.collection.initialized()
    }

    /// Size of the cached collection, once fetched.
    pub fn collection_len(&self) -> Option<usize> {
        self.collection.get().map(Vec::len)
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        let view = self.view();
        StoreSnapshot {
            articles: view.articles.clone(),
            current: view.current.clone(),
            state: view.state,
            error: view.error.clone(),
            has_more: view.pager.has_more(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::fake::FakeSource;

    fn store_with(source: &Arc<FakeSource>, page_size: usize) -> ArticleStore {
        ArticleStore::new(source.clone(), StoreConfig { page_size })
    }

    fn ids(articles: &[Arc<Article>]) -> Vec<String> {
        articles.iter().map(|a| a.id.clone()).collect()
    }

    // -- initialization ------------------------------------------------------

    #[tokio::test]
    async fn new_store_is_idle_and_empty() {
        let source = Arc::new(FakeSource::new(3));
        let store = store_with(&source, 20);

        assert_eq!(store.state(), LoadingState::Idle);
        assert!(store.articles().is_empty());
        assert!(store.current().is_none());
        assert!(store.error().is_none());
        assert!(store.has_more());
        assert!(!store.is_initialized());
        assert_eq!(store.page_size(), 20);
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn sequential_initialization_fetches_once() {
        let source = Arc::new(FakeSource::new(3));
        let store = store_with(&source, 20);

        for _ in 0..5 {
            assert_eq!(store.ensure_initialized().await.len(), 3);
        }
        assert_eq!(source.calls(), 1);
        assert_eq!(store.state(), LoadingState::Success);
        assert_eq!(store.collection_len(), Some(3));
    }

    #[tokio::test]
    async fn concurrent_initialization_fetches_once() {
        let source = Arc::new(FakeSource::new(3));
        let store = store_with(&source, 20);

        let (a, b, ()) = tokio::join!(
            store.ensure_initialized(),
            store.ensure_initialized(),
            store.load_page(true),
        );
        assert_eq!(a.len(), 3);
        assert_eq!(b.len(), 3);
        assert_eq!(source.calls(), 1);
        assert_eq!(store.articles().len(), 3);
    }

    #[tokio::test]
    async fn ids_follow_collection_order() {
        let source = Arc::new(FakeSource::new(4));
        let store = store_with(&source, 20);

        let collection = store.ensure_initialized().await;
        assert_eq!(ids(collection), vec!["0", "1", "2", "3"]);
        assert_eq!(collection[2].title, "Article 2");
    }

    #[tokio::test]
    async fn fetch_failure_sets_error_and_leaves_cache_empty() {
        let source = Arc::new(FakeSource::failing(5, 1));
        let store = store_with(&source, 20);

        store.load_page(true).await;

        assert_eq!(store.state(), LoadingState::Error);
        assert_eq!(store.error().as_deref(), Some(FetchError::USER_MESSAGE));
        assert!(store.articles().is_empty());
        assert!(!store.has_more());
        assert!(!store.is_initialized());
        assert_eq!(store.collection_len(), None);
    }

    #[tokio::test]
    async fn waiter_on_failed_attempt_fetches_again() {
        let source = Arc::new(FakeSource::failing(3, 1));
        let store = store_with(&source, 20);

        let (first, second) = tokio::join!(store.ensure_initialized(), store.ensure_initialized());

        assert!(first.is_empty(), "the attempt that failed yields nothing");
        assert_eq!(second.len(), 3);
        assert_eq!(source.calls(), 2);
        assert_eq!(store.state(), LoadingState::Success);
        assert!(store.error().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_load_returns_to_idle() {
        let source = Arc::new(FakeSource::new(3));
        let store = store_with(&source, 20);

        let result =
            tokio::time::timeout(std::time::Duration::from_millis(1), store.load_page(true)).await;
        assert!(result.is_err(), "fetch outlives the timeout");

        assert_eq!(store.state(), LoadingState::Idle);
        assert!(!store.is_initialized());

        store.load_page(true).await;
        assert_eq!(source.calls(), 2);
        assert_eq!(store.state(), LoadingState::Success);
        assert_eq!(store.articles().len(), 3);
    }

    #[tokio::test]
    async fn failed_fetch_is_retried_by_next_reset_load() {
        let source = Arc::new(FakeSource::failing(5, 1));
        let store = store_with(&source, 20);

        store.load_page(true).await;
        assert_eq!(store.state(), LoadingState::Error);

        store.load_page(true).await;
        assert_eq!(source.calls(), 2);
        assert_eq!(store.state(), LoadingState::Success);
        assert!(store.error().is_none(), "entering loading clears the error");
        assert_eq!(store.articles().len(), 5);

        store.load_page(true).await;
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn append_after_failure_stays_disarmed_until_reset() {
        let source = Arc::new(FakeSource::failing(5, 1));
        let store = store_with(&source, 20);

        store.load_page(false).await;
        assert!(!store.has_more());

        // The retry succeeds, but the pager was disarmed by the empty window.
        store.load_page(false).await;
        assert_eq!(store.state(), LoadingState::Success);
        assert!(store.articles().is_empty());

        store.load_page(true).await;
        assert_eq!(store.articles().len(), 5);
    }

    // -- pagination ----------------------------------------------------------

    #[tokio::test]
    async fn pages_through_forty_five_articles() {
        let source = Arc::new(FakeSource::new(45));
        let store = store_with(&source, 20);

        store.load_page(true).await;
        assert_eq!(store.articles().len(), 20);
        assert!(store.has_more());

        store.load_page(false).await;
        assert_eq!(store.articles().len(), 40);
        assert!(store.has_more());

        store.load_page(false).await;
        assert_eq!(store.articles().len(), 45);
        assert!(!store.has_more());

        store.load_page(false).await;
        assert_eq!(store.articles().len(), 45);
        assert_eq!(store.page(), 3);
    }

    #[tokio::test]
    async fn draining_yields_full_collection() {
        for (len, page_size) in [(0, 20), (20, 20), (41, 20), (10, 3), (1, 1)] {
            let source = Arc::new(FakeSource::new(len));
            let store = store_with(&source, page_size);

            store.load_page(true).await;
            while store.has_more() {
                store.load_page(false).await;
            }

            let expected: Vec<String> = (0..len).map(|i| i.to_string()).collect();
            assert_eq!(ids(&store.articles()), expected, "len={len} page_size={page_size}");
        }
    }

    #[tokio::test]
    async fn visible_entries_share_cached_articles() {
        let source = Arc::new(FakeSource::new(2));
        let store = store_with(&source, 20);

        store.load_page(true).await;
        let visible = store.articles();
        let cached = store.ensure_initialized().await;
        assert!(Arc::ptr_eq(&visible[0], &cached[0]));
    }

    // -- lookup --------------------------------------------------------------

    #[tokio::test]
    async fn load_by_id_finds_article() {
        let source = Arc::new(FakeSource::new(3));
        let store = store_with(&source, 20);

        store.load_by_id("2").await;
        let current = store.current().expect("article 2 exists");
        assert_eq!(current.title, "Article 2");
        assert!(store.error().is_none());
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn load_by_id_miss_leaves_pages_alone() {
        let source = Arc::new(FakeSource::new(25));
        let store = store_with(&source, 20);

        store.load_page(true).await;
        store.load_by_id("1").await;
        store.load_by_id("not-present").await;

        assert!(store.current().is_none());
        assert_eq!(store.error().as_deref(), Some(ARTICLE_NOT_FOUND));
        assert_eq!(store.state(), LoadingState::Success);
        assert_eq!(store.articles().len(), 20);
        assert!(store.has_more());
        assert_eq!(store.page(), 1);
    }

    #[tokio::test]
    async fn hit_after_miss_keeps_previous_error() {
        let source = Arc::new(FakeSource::new(3));
        let store = store_with(&source, 20);

        store.load_by_id("99").await;
        store.load_by_id("0").await;

        assert!(store.current().is_some());
        assert_eq!(store.error().as_deref(), Some(ARTICLE_NOT_FOUND));
    }

    // -- lifecycle -----------------------------------------------------------

    #[tokio::test]
    async fn reset_forgets_collection() {
        let source = Arc::new(FakeSource::new(3));
        let mut store = store_with(&source, 20);

        store.load_page(true).await;
        store.load_by_id("0").await;
        store.reset();

        assert_eq!(store.state(), LoadingState::Idle);
        assert!(store.articles().is_empty());
        assert!(store.current().is_none());
        assert!(!store.is_initialized());

        store.load_page(true).await;
        assert_eq!(source.calls(), 2);
        assert_eq!(store.articles().len(), 3);
    }

    #[tokio::test]
    async fn independent_stores_do_not_share_state() {
        let source = Arc::new(FakeSource::new(3));
        let first = store_with(&source, 20);
        let second = store_with(&source, 1);

        first.load_page(true).await;
        second.load_page(true).await;

        assert_eq!(first.articles().len(), 3);
        assert_eq!(second.articles().len(), 1);
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn snapshot_matches_views() {
        let source = Arc::new(FakeSource::new(3));
        let store = store_with(&source, 2);

        store.load_page(true).await;
        store.load_by_id("1").await;

        let snap = store.snapshot();
        assert_eq!(ids(&snap.articles), vec!["0", "1"]);
        assert_eq!(snap.current.as_ref().map(|a| a.id.as_str()), Some("1"));
        assert_eq!(snap.state, LoadingState::Success);
        assert!(snap.error.is_none());
        assert!(snap.has_more);
    }
}
