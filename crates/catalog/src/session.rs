//! Browse sessions.
//!
//! A browser owns the navigation state of one listing (what is shown, which
//! page, whether more pages exist) and knows how to fetch the current page.
//! Callers hold one per screen instead of sharing mutable globals.

use crate::envelope::Envelope;
use crate::error::Result;
use crate::http::cancellable;
use crate::jikan::{AnimeSummary, JikanClient, SearchParams, TopFilter};
use crate::mangadex::{MangaDexClient, MangaSummary};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Items per browse page
pub const BROWSE_PAGE_SIZE: u32 = 24;

/// Quiet period before a typed query is searched
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// What an anime listing shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseMode {
    Top(Option<TopFilter>),
    Seasonal,
    Search(String),
}

/// Page-numbered navigation over the anime catalog
#[derive(Debug, Clone)]
pub struct AnimeBrowser {
    mode: BrowseMode,
    page: u32,
    has_next_page: bool,
}

impl Default for AnimeBrowser {
    fn default() -> Self {
        Self::new(BrowseMode::Top(None))
    }
}

impl AnimeBrowser {
    pub fn new(mode: BrowseMode) -> Self {
        Self {
            mode,
            page: 1,
            has_next_page: false,
        }
    }

    pub fn mode(&self) -> &BrowseMode {
        &self.mode
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn has_next_page(&self) -> bool {
        self.has_next_page
    }

    /// Switch listing and start over at page 1
    pub fn show(&mut self, mode: BrowseMode) {
        self.mode = mode;
        self.page = 1;
        self.has_next_page = false;
    }

    /// Search for `query`; a blank query goes back to the top listing
    pub fn search(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            self.show(BrowseMode::Top(None));
        } else {
            self.show(BrowseMode::Search(query.to_string()));
        }
    }

    /// Advance one page if the last fetch reported more
    pub fn next_page(&mut self) -> bool {
        if !self.has_next_page {
            return false;
        }
        self.page += 1;
        true
    }

    /// Go back one page, never below the first
    pub fn prev_page(&mut self) -> bool {
        if self.page <= 1 {
            return false;
        }
        self.page -= 1;
        true
    }

    /// Fetch the current page and record whether another one follows
    pub async fn fetch(
        &mut self,
        client: &JikanClient,
        token: &CancellationToken,
    ) -> Result<Envelope<Vec<AnimeSummary>>> {
        debug!(mode = ?self.mode, page = self.page, "Fetching anime browse page");

        let request = async {
            match &self.mode {
                BrowseMode::Top(filter) => {
                    client.list_top(self.page, BROWSE_PAGE_SIZE, *filter).await
                }
                BrowseMode::Seasonal => client.list_current_season(self.page).await,
                BrowseMode::Search(query) => {
                    let params = SearchParams {
                        limit: Some(BROWSE_PAGE_SIZE),
                        ..SearchParams::query(query.clone())
                    }
                    .with_page(self.page);
                    client.search(&params).await
                }
            }
        };
        let envelope = cancellable(token, request).await?;

        self.has_next_page = envelope
            .page_info()
            .map(|p| p.has_next_page)
            .unwrap_or(false);
        Ok(envelope)
    }
}

/// Offset-window navigation over the manga catalog
#[derive(Debug, Clone)]
pub struct MangaBrowser {
    query: Option<String>,
    limit: u32,
    offset: u32,
    total: u32,
}

impl Default for MangaBrowser {
    fn default() -> Self {
        Self::new(BROWSE_PAGE_SIZE)
    }
}

impl MangaBrowser {
    pub fn new(limit: u32) -> Self {
        Self {
            query: None,
            limit: limit.max(1),
            offset: 0,
            total: 0,
        }
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// 1-based page derived from the offset
    pub fn page(&self) -> u32 {
        self.offset / self.limit + 1
    }

    pub fn has_next(&self) -> bool {
        self.offset.saturating_add(self.limit) < self.total
    }

    /// Jump to a 1-based page
    pub fn go_to_page(&mut self, page: u32) {
        self.offset = (page.max(1) - 1).saturating_mul(self.limit);
    }

    pub fn next_page(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.go_to_page(self.page().saturating_add(1));
        true
    }

    pub fn prev_page(&mut self) -> bool {
        if self.page() <= 1 {
            return false;
        }
        self.go_to_page(self.page() - 1);
        true
    }

    /// Search by title; a blank query goes back to the popular listing
    pub fn search(&mut self, query: &str) {
        let query = query.trim();
        self.query = (!query.is_empty()).then(|| query.to_string());
        self.offset = 0;
        self.total = 0;
    }

    /// Fetch the current window and record the reported total
    pub async fn fetch(
        &mut self,
        client: &MangaDexClient,
        token: &CancellationToken,
    ) -> Result<Envelope<Vec<MangaSummary>>> {
        debug!(query = ?self.query, offset = self.offset, "Fetching manga browse page");

        let request = async {
            match &self.query {
                Some(title) => client.search(title, self.limit, self.offset).await,
                None => client.list_popular(self.limit, self.offset).await,
            }
        };
        let envelope = cancellable(token, request).await?;

        if let Some(window) = envelope.offset_info() {
            self.total = window.total;
        }
        Ok(envelope)
    }
}

/// Quiet-period debounce for search-as-you-type input.
///
/// Each new input replaces the pending one and restarts the quiet period;
/// only the value still pending when the period elapses is released.
#[derive(Debug, Clone, Copy)]
pub struct SearchDebouncer {
    quiet: Duration,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

impl SearchDebouncer {
    pub fn new(quiet: Duration) -> Self {
        Self { quiet }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Wait for the next settled input.
    ///
    /// Returns `None` once the sender is gone and nothing is pending. A value
    /// pending when the sender closes is released immediately.
    pub async fn settled(&self, inputs: &mut mpsc::Receiver<String>) -> Option<String> {
        let mut pending = inputs.recv().await?;

        loop {
            tokio::select! {
                next = inputs.recv() => match next {
                    Some(input) => pending = input,
                    None => return Some(pending),
                },
                _ = tokio::time::sleep(self.quiet) => return Some(pending),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::OffsetPagination;

    #[test]
    fn test_anime_browser_paging() {
        let mut browser = AnimeBrowser::default();
        assert_eq!(browser.page(), 1);

        // Nothing fetched yet, so no next page is known
        assert!(!browser.next_page());
        assert!(!browser.prev_page());

        browser.has_next_page = true;
        assert!(browser.next_page());
        assert!(browser.next_page());
        assert_eq!(browser.page(), 3);

        assert!(browser.prev_page());
        assert!(browser.prev_page());
        assert!(!browser.prev_page());
        assert_eq!(browser.page(), 1);
    }

    #[test]
    fn test_anime_search_resets_page() {
        let mut browser = AnimeBrowser::new(BrowseMode::Seasonal);
        browser.page = 4;
        browser.has_next_page = true;

        browser.search("  frieren ");
        assert_eq!(browser.mode(), &BrowseMode::Search("frieren".to_string()));
        assert_eq!(browser.page(), 1);
        assert!(!browser.has_next_page());

        browser.search("   ");
        assert_eq!(browser.mode(), &BrowseMode::Top(None));
    }

    #[test]
    fn test_manga_browser_offsets() {
        let mut browser = MangaBrowser::default();
        assert_eq!(browser.limit(), 24);

        browser.go_to_page(3);
        assert_eq!(browser.offset(), 48);
        assert_eq!(browser.page(), 3);

        browser.go_to_page(0);
        assert_eq!(browser.offset(), 0);
    }

    #[test]
    fn test_manga_browser_has_next() {
        let mut browser = MangaBrowser::new(24);
        browser.total = 50;

        assert!(browser.has_next());
        assert!(browser.next_page());
        assert_eq!(browser.offset(), 24);
        assert!(browser.has_next());
        assert!(browser.next_page());
        assert_eq!(browser.offset(), 48);
        assert!(!browser.has_next());
        assert!(!browser.next_page());

        assert!(browser.prev_page());
        assert_eq!(browser.offset(), 24);
    }

    #[test]
    fn test_manga_browser_far_pages_saturate() {
        let mut browser = MangaBrowser::new(24);

        browser.go_to_page(u32::MAX);
        assert_eq!(browser.offset(), u32::MAX);
        assert!(!browser.has_next());
        assert!(!browser.next_page());

        browser.total = u32::MAX;
        browser.offset = u32::MAX - 10;
        assert!(!browser.has_next());

        browser.offset = u32::MAX - 30;
        assert!(browser.has_next());
    }

    #[test]
    fn test_manga_search_resets_window() {
        let mut browser = MangaBrowser::new(24);
        browser.total = 500;
        browser.go_to_page(5);

        browser.search("berserk");
        assert_eq!(browser.query(), Some("berserk"));
        assert_eq!(browser.offset(), 0);
        assert_eq!(browser.total(), 0);

        browser.search("");
        assert_eq!(browser.query(), None);
    }

    #[test]
    fn test_offset_window_agrees_with_browser() {
        let window = OffsetPagination {
            limit: 24,
            offset: 24,
            total: 50,
        };
        let mut browser = MangaBrowser::new(24);
        browser.go_to_page(2);
        browser.total = window.total;

        assert_eq!(browser.has_next(), window.has_next());
    }

    #[tokio::test]
    async fn test_debouncer_releases_last_input() {
        let debouncer = SearchDebouncer::new(Duration::from_millis(100));
        let (tx, mut rx) = mpsc::channel(8);

        tokio::spawn(async move {
            for input in ["f", "fr", "frie", "frieren"] {
                tx.send(input.to_string()).await.unwrap();
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
            // Keep the channel open past the quiet period
            tokio::time::sleep(Duration::from_millis(500)).await;
        });

        let settled = debouncer.settled(&mut rx).await;
        assert_eq!(settled.as_deref(), Some("frieren"));
    }

    #[tokio::test]
    async fn test_debouncer_waits_for_quiet_period() {
        let debouncer = SearchDebouncer::new(Duration::from_millis(100));
        let (tx, mut rx) = mpsc::channel(8);

        tx.send("naruto".to_string()).await.unwrap();
        let start = tokio::time::Instant::now();
        let settled = debouncer.settled(&mut rx).await;

        assert_eq!(settled.as_deref(), Some("naruto"));
        assert!(start.elapsed() >= Duration::from_millis(100));
        drop(tx);
    }

    #[tokio::test]
    async fn test_debouncer_closed_channel() {
        let debouncer = SearchDebouncer::default();
        let (tx, mut rx) = mpsc::channel::<String>(1);
        drop(tx);

        assert_eq!(debouncer.settled(&mut rx).await, None);
        assert_eq!(debouncer.quiet_period(), Duration::from_millis(500));
    }
}
