//! Incremental gallery loader
//!
//! Maintains a growing list of displayable artworks fetched page by page.
//! The loader is a plain state holder: it decides *whether* a page should
//! be requested and applies the result, but never performs I/O itself.
//! The TUI dispatches the request on a background task and feeds the
//! completion back; headless mode uses [`GalleryLoader::load_next_page_from`].
//!
//! # State machine
//!
//! ```text
//! Idle ──load──▶ Loading ──success, more pages──▶ Idle
//!                   │ ──success, last page────▶ Exhausted (terminal)
//!                   └──failure───────────────▶ Error ──manual retry──▶ Loading
//! ```
//!
//! The `Loading` guard is the only thing preventing duplicate requests:
//! while a page is in flight every further load or near-end trigger is a
//! no-op, so at most one request is ever outstanding.

pub mod detail;

use crate::api::models::{Artwork, ArtworkId, ArtworkPage};
use crate::api::{CollectionSource, FetchError};

/// Loader state; exactly one holds at a time
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    /// Last page request failed; carries the user-visible message
    Error(String),
    /// Source reported no further pages
    Exhausted,
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Ticket for a dispatched page request
///
/// The completion must hand the same ticket back; anything else is a
/// stale or foreign completion and is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

/// What applying a completion did (used for logging and headless output)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing was dispatched or the completion did not match
    Skipped,
    /// Page appended; `kept` displayable, `filtered` lacked an image
    Appended {
        page: u32,
        kept: usize,
        filtered: usize,
        exhausted: bool,
    },
    /// Request failed; list and cursor untouched
    Failed(String),
}

/// Page-by-page loader for the gallery grid
#[derive(Debug, Clone)]
pub struct GalleryLoader {
    items: Vec<Artwork>,
    /// Next page to request (1-based)
    cursor: u32,
    state: LoadState,
    page_size: u32,
    in_flight: Option<PageRequest>,
}

impl GalleryLoader {
    /// Fresh loader: empty list, cursor at page 1, Idle
    pub fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            cursor: 1,
            state: LoadState::Idle,
            page_size: page_size.max(1),
            in_flight: None,
        }
    }

    pub fn items(&self) -> &[Artwork] {
        &self.items
    }

    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Id of the last displayed item (the element the near-end trigger binds to)
    pub fn last_item_id(&self) -> Option<ArtworkId> {
        self.items.last().map(|a| a.id)
    }

    /// Dispatch half of `loadNextPage`
    ///
    /// Returns the request to issue, or `None` when a page is already in
    /// flight or the collection is exhausted. Also used for manual retry
    /// from the `Error` state.
    pub fn begin_load(&mut self) -> Option<PageRequest> {
        match self.state {
            LoadState::Loading | LoadState::Exhausted => {
                tracing::trace!("load ignored in state {:?}", self.state);
                None
            }
            LoadState::Idle | LoadState::Error(_) => {
                let request = PageRequest {
                    page: self.cursor,
                    limit: self.page_size,
                };
                self.state = LoadState::Loading;
                self.in_flight = Some(request);
                tracing::debug!("Requesting gallery page {}", request.page);
                Some(request)
            }
        }
    }

    /// The view reports that the item bound to the trigger became visible
    ///
    /// Ignored while loading, exhausted, or in error (retry is manual).
    /// A trigger from an item that is no longer last is a stale binding
    /// and silently does nothing.
    pub fn on_near_end(&mut self, trigger_item_id: ArtworkId) -> Option<PageRequest> {
        if self.state != LoadState::Idle {
            return None;
        }
        if self.last_item_id() != Some(trigger_item_id) {
            tracing::trace!("stale near-end trigger from item {}", trigger_item_id);
            return None;
        }
        self.begin_load()
    }

    /// Apply the completion of a dispatched request
    pub fn complete(
        &mut self,
        request: PageRequest,
        result: Result<ArtworkPage, FetchError>,
    ) -> LoadOutcome {
        if self.in_flight != Some(request) {
            tracing::debug!("Dropping completion for page {} (not in flight)", request.page);
            return LoadOutcome::Skipped;
        }
        self.in_flight = None;

        match result {
            Ok(page) => {
                let received = page.data.len();
                let before = self.items.len();
                self.items
                    .extend(page.data.into_iter().filter(Artwork::has_image));
                let kept = self.items.len() - before;
                let exhausted = page.pagination.is_last();

                self.state = if exhausted {
                    LoadState::Exhausted
                } else {
                    LoadState::Idle
                };
                self.cursor += 1;

                tracing::info!(
                    "Loaded page {}/{}: {} artworks ({} without image)",
                    page.pagination.current_page,
                    page.pagination.total_pages,
                    kept,
                    received - kept
                );

                LoadOutcome::Appended {
                    page: request.page,
                    kept,
                    filtered: received - kept,
                    exhausted,
                }
            }
            Err(e) => {
                let message = e.to_string();
                tracing::warn!("Failed to load page {}: {}", request.page, message);
                self.state = LoadState::Error(message.clone());
                LoadOutcome::Failed(message)
            }
        }
    }

    /// Full `loadNextPage`: dispatch, await the source, apply
    pub async fn load_next_page_from<S: CollectionSource>(&mut self, source: &S) -> LoadOutcome {
        let Some(request) = self.begin_load() else {
            return LoadOutcome::Skipped;
        };
        let result = source.fetch_page(request.page, request.limit).await;
        self.complete(request, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::Pagination;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn art(id: ArtworkId, image: bool) -> Artwork {
        Artwork {
            id,
            title: Some(format!("Work {}", id)),
            artist_title: None,
            image_id: image.then(|| format!("img-{}", id)),
            date_display: None,
            medium_display: None,
            dimensions: None,
            credit_line: None,
            place_of_origin: None,
            department_title: None,
            term_titles: Vec::new(),
        }
    }

    /// Page with ids starting at `first_id`; ids listed in `no_image` lack an image
    fn page(current: u32, total: u32, first_id: u64, count: u64, no_image: &[u64]) -> ArtworkPage {
        ArtworkPage {
            data: (first_id..first_id + count)
                .map(|id| art(id, !no_image.contains(&id)))
                .collect(),
            pagination: Pagination {
                current_page: current,
                total_pages: total,
            },
        }
    }

    fn ids(loader: &GalleryLoader) -> Vec<ArtworkId> {
        loader.items().iter().map(|a| a.id).collect()
    }

    /// In-memory source that counts requests
    #[derive(Default)]
    struct FakeSource {
        pages: Mutex<HashMap<u32, Result<ArtworkPage, FetchError>>>,
        requests: AtomicUsize,
    }

    impl FakeSource {
        fn with(self, n: u32, result: Result<ArtworkPage, FetchError>) -> Self {
            self.pages.lock().unwrap().insert(n, result);
            self
        }
    }

    impl CollectionSource for FakeSource {
        async fn fetch_page(&self, page: u32, _limit: u32) -> Result<ArtworkPage, FetchError> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            self.pages
                .lock()
                .unwrap()
                .get(&page)
                .cloned()
                .unwrap_or_else(|| Err(FetchError::Status(404)))
        }
    }

    #[test]
    fn test_new_loader_is_idle_at_page_one() {
        let loader = GalleryLoader::new(12);
        assert_eq!(loader.state(), &LoadState::Idle);
        assert_eq!(loader.cursor(), 1);
        assert!(loader.items().is_empty());
    }

    #[test]
    fn test_first_page_filters_and_advances() {
        let mut loader = GalleryLoader::new(12);
        let request = loader.begin_load().unwrap();
        assert_eq!(request, PageRequest { page: 1, limit: 12 });

        let outcome = loader.complete(request, Ok(page(1, 3, 1, 12, &[4, 9])));

        assert_eq!(loader.items().len(), 10);
        assert_eq!(loader.state(), &LoadState::Idle);
        assert_eq!(loader.cursor(), 2);
        assert_eq!(
            outcome,
            LoadOutcome::Appended {
                page: 1,
                kept: 10,
                filtered: 2,
                exhausted: false
            }
        );
        assert!(loader.items().iter().all(Artwork::has_image));
        assert_eq!(ids(&loader), vec![1, 2, 3, 5, 6, 7, 8, 10, 11, 12]);
    }

    #[test]
    fn test_only_one_request_while_loading() {
        let mut loader = GalleryLoader::new(12);
        let first = loader.begin_load();
        assert!(first.is_some());

        for _ in 0..5 {
            assert!(loader.begin_load().is_none());
        }
        // No items yet, but even a matching trigger must not dispatch
        assert!(loader.on_near_end(1).is_none());
        assert!(loader.state().is_loading());
        assert_eq!(loader.cursor(), 1);
    }

    #[test]
    fn test_triggers_while_loading_are_ignored() {
        let mut loader = GalleryLoader::new(12);
        let request = loader.begin_load().unwrap();
        loader.complete(request, Ok(page(1, 3, 1, 12, &[])));

        let second = loader.on_near_end(12).unwrap();
        for _ in 0..10 {
            assert!(loader.on_near_end(12).is_none());
        }
        assert_eq!(second.page, 2);
    }

    #[test]
    fn test_last_page_exhausts() {
        let mut loader = GalleryLoader::new(12);
        for (n, first_id) in [(1u32, 1u64), (2, 13)] {
            let request = loader.begin_load().unwrap();
            loader.complete(request, Ok(page(n, 3, first_id, 12, &[])));
        }

        let request = loader.begin_load().unwrap();
        assert_eq!(request.page, 3);
        loader.complete(request, Ok(page(3, 3, 25, 12, &[])));

        assert_eq!(loader.state(), &LoadState::Exhausted);
        assert!(loader.begin_load().is_none());
        assert!(loader.on_near_end(36).is_none());
        assert_eq!(loader.cursor(), 4);
    }

    #[test]
    fn test_failure_keeps_items_and_cursor() {
        let mut loader = GalleryLoader::new(12);
        let request = loader.begin_load().unwrap();
        loader.complete(request, Ok(page(1, 3, 1, 12, &[2, 3])));
        let before = ids(&loader);

        let request = loader.begin_load().unwrap();
        let outcome = loader.complete(
            request,
            Err(FetchError::Network("connection reset".to_string())),
        );

        assert_eq!(ids(&loader), before);
        assert_eq!(loader.cursor(), 2);
        assert_eq!(
            loader.state().error(),
            Some("Network error: connection reset")
        );
        assert!(matches!(outcome, LoadOutcome::Failed(_)));
    }

    #[test]
    fn test_error_requires_manual_retry() {
        let mut loader = GalleryLoader::new(12);
        let request = loader.begin_load().unwrap();
        loader.complete(request, Ok(page(1, 3, 1, 12, &[])));
        let request = loader.begin_load().unwrap();
        loader.complete(request, Err(FetchError::Status(500)));

        // Visibility of the last item does not retry on its own
        assert!(loader.on_near_end(12).is_none());

        // Explicit retry re-requests the same page
        let retry = loader.begin_load().unwrap();
        assert_eq!(retry.page, 2);
        assert!(loader.state().is_loading());
    }

    #[test]
    fn test_all_filtered_page_still_advances_cursor() {
        let mut loader = GalleryLoader::new(3);
        let request = loader.begin_load().unwrap();
        let outcome = loader.complete(request, Ok(page(1, 5, 1, 3, &[1, 2, 3])));

        assert!(loader.items().is_empty());
        assert_eq!(loader.cursor(), 2);
        assert_eq!(loader.state(), &LoadState::Idle);
        assert!(matches!(outcome, LoadOutcome::Appended { kept: 0, filtered: 3, .. }));
    }

    #[test]
    fn test_two_pages_append_in_order() {
        let mut loader = GalleryLoader::new(4);
        let request = loader.begin_load().unwrap();
        loader.complete(request, Ok(page(1, 3, 1, 4, &[2])));
        let request = loader.on_near_end(4).unwrap();
        loader.complete(request, Ok(page(2, 3, 5, 4, &[5, 8])));

        assert_eq!(ids(&loader), vec![1, 3, 4, 6, 7]);
        assert_eq!(loader.cursor(), 3);
    }

    #[test]
    fn test_stale_trigger_is_noop() {
        let mut loader = GalleryLoader::new(4);
        let request = loader.begin_load().unwrap();
        loader.complete(request, Ok(page(1, 3, 1, 4, &[])));
        let request = loader.on_near_end(4).unwrap();
        loader.complete(request, Ok(page(2, 3, 5, 4, &[])));

        // Item 4 was last before page 2 arrived; its binding is stale now
        assert!(loader.on_near_end(4).is_none());
        assert_eq!(loader.state(), &LoadState::Idle);
        assert!(loader.on_near_end(8).is_some());
    }

    #[test]
    fn test_mismatched_completion_is_ignored() {
        let mut loader = GalleryLoader::new(12);
        let request = loader.begin_load().unwrap();
        let bogus = PageRequest {
            page: request.page + 1,
            limit: request.limit,
        };

        let outcome = loader.complete(bogus, Ok(page(2, 3, 1, 12, &[])));
        assert_eq!(outcome, LoadOutcome::Skipped);
        assert!(loader.items().is_empty());
        assert!(loader.state().is_loading());

        // Completing twice only applies once
        loader.complete(request, Ok(page(1, 3, 1, 12, &[])));
        let again = loader.complete(request, Ok(page(1, 3, 1, 12, &[])));
        assert_eq!(again, LoadOutcome::Skipped);
        assert_eq!(loader.items().len(), 12);
    }

    #[tokio::test]
    async fn test_load_next_page_from_source() {
        let source = FakeSource::default()
            .with(1, Ok(page(1, 3, 1, 12, &[1, 2])))
            .with(2, Err(FetchError::Network("timed out".to_string())))
            .with(3, Ok(page(3, 3, 25, 12, &[])));
        let mut loader = GalleryLoader::new(12);

        loader.load_next_page_from(&source).await;
        assert_eq!(loader.items().len(), 10);
        assert_eq!(loader.cursor(), 2);

        let outcome = loader.load_next_page_from(&source).await;
        assert!(matches!(outcome, LoadOutcome::Failed(_)));
        assert_eq!(loader.items().len(), 10);
        assert_eq!(loader.cursor(), 2);
        assert_eq!(source.requests.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_exhausted_loader_issues_no_requests() {
        let source = FakeSource::default().with(1, Ok(page(1, 1, 1, 12, &[])));
        let mut loader = GalleryLoader::new(12);

        loader.load_next_page_from(&source).await;
        assert!(loader.state().is_exhausted());

        for _ in 0..3 {
            assert_eq!(loader.load_next_page_from(&source).await, LoadOutcome::Skipped);
        }
        assert_eq!(source.requests.load(Ordering::SeqCst), 1);
    }
}
