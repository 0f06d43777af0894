//! # Paginated list state
//!
//! [`ListState`] holds what a resource list screen shows: the current page of
//! items as returned by the server, the page counters, the search box and the
//! load / error flags. It does no I/O; the view calls [`ListState::request`],
//! performs the fetch, and feeds the result back through
//! [`ListState::apply_page`] or [`ListState::apply_error`].
//!
//! Search is client-side over the loaded page only. It never changes
//! `total_count` or `total_pages`.
//!
//! A screen that switches collection calls [`ListState::reset`], which starts
//! a new epoch. Work started under an older epoch checks
//! [`ListState::is_current`] before touching the state.

use api::{Page, PageRequest};

/// Fields a list row can be searched by.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;

    /// Case-insensitive substring match against any search field. An empty
    /// term matches everything.
    fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&term))
    }
}

/// What to fetch after a successful delete.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteFollowUp {
    /// The page emptied out; move back one page.
    LoadPage(u32),
    /// Re-fetch the current page.
    Reload(u32),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListState<T> {
    pub page: u32,
    pub page_size: u32,
    pub search: String,
    pub items: Vec<T>,
    pub total_pages: u32,
    pub total_count: u64,
    pub loading: bool,
    pub error: Option<String>,
    epoch: u64,
}

impl<T> ListState<T> {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            search: String::new(),
            items: Vec::new(),
            total_pages: 0,
            total_count: 0,
            loading: false,
            error: None,
            epoch: 0,
        }
    }

    /// Start over for another collection.
    pub fn reset(&mut self, page_size: u32) {
        let epoch = self.epoch + 1;
        *self = Self::new(page_size);
        self.epoch = epoch;
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Whether work started at `epoch` still belongs to this list.
    pub fn is_current(&self, epoch: u64) -> bool {
        self.epoch == epoch
    }

    /// The request for the page currently selected.
    pub fn request(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn apply_page(&mut self, page: Page<T>) {
        self.items = page.items;
        self.total_pages = page.total_pages;
        self.total_count = page.total_count;
        self.page = page.page.max(1);
        self.loading = false;
        self.error = None;
    }

    /// Record a failed load. The previously loaded rows are kept.
    pub fn apply_error(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    /// Clear the error so the view re-issues the same request.
    pub fn retry(&mut self) -> PageRequest {
        self.error = None;
        self.request()
    }

    /// Changing the page size always returns to page 1.
    pub fn set_page_size(&mut self, page_size: u32) -> PageRequest {
        self.page_size = page_size.max(1);
        self.page = 1;
        self.request()
    }

    /// Select a page, clamped to the known range.
    pub fn go_to(&mut self, page: u32) -> PageRequest {
        let last = self.total_pages.max(1);
        self.page = page.clamp(1, last);
        self.request()
    }

    pub fn next(&mut self) -> PageRequest {
        self.go_to(self.page.saturating_add(1))
    }

    pub fn prev(&mut self) -> PageRequest {
        self.go_to(self.page.saturating_sub(1))
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Call after the server confirmed a delete of one row on this page.
    ///
    /// When that row was the only one on a page past the first, the view moves
    /// back one page; otherwise the current page is re-fetched.
    pub fn after_delete(&mut self) -> DeleteFollowUp {
        if self.items.len() <= 1 && self.page > 1 {
            self.page -= 1;
            DeleteFollowUp::LoadPage(self.page)
        } else {
            DeleteFollowUp::Reload(self.page)
        }
    }

    /// "Showing 11–11 of 11" style range for the footer, 1-based.
    pub fn range_label(&self) -> String {
        if self.total_count == 0 || self.items.is_empty() {
            return "No results".to_string();
        }
        let start = u64::from(self.page - 1) * u64::from(self.page_size) + 1;
        let end = (start + self.items.len() as u64 - 1).min(self.total_count.max(start));
        format!("Showing {start}–{end} of {}", self.total_count)
    }
}

impl<T: Searchable> ListState<T> {
    /// Rows of the loaded page matching the search term.
    pub fn visible_rows(&self) -> Vec<&T> {
        self.items.iter().filter(|item| item.matches(&self.search)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        subject: &'static str,
        topic: &'static str,
    }

    impl Searchable for Row {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.subject, self.topic]
        }
    }

    fn page_of(items: Vec<Row>, page: u32, size: u32, total: u64) -> Page<Row> {
        Page {
            items,
            page,
            page_size: size,
            total_pages: api::total_pages(total, size),
            total_count: total,
        }
    }

    fn rows(n: usize) -> Vec<Row> {
        (0..n)
            .map(|i| Row {
                subject: if i % 2 == 0 { "Mathematics" } else { "Biology" },
                topic: "Intro",
            })
            .collect()
    }

    #[test]
    fn test_page_size_change_resets_to_first_page() {
        let mut state = ListState::<Row>::new(10);
        state.apply_page(page_of(rows(10), 3, 10, 45));
        assert_eq!(state.page, 3);

        let req = state.set_page_size(25);
        assert_eq!(req, PageRequest::new(1, 25));
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_deleting_sole_item_on_last_page_moves_back() {
        // page 2 of 2, pageSize 10, totalCount 11
        let mut state = ListState::<Row>::new(10);
        state.apply_page(page_of(rows(1), 2, 10, 11));
        assert_eq!(state.total_pages, 2);

        assert_eq!(state.after_delete(), DeleteFollowUp::LoadPage(1));
        assert_eq!(state.page, 1);
        assert_eq!(state.request(), PageRequest::new(1, 10));
    }

    #[test]
    fn test_deleting_non_sole_item_reloads_current_page() {
        let mut state = ListState::<Row>::new(10);
        state.apply_page(page_of(rows(4), 2, 10, 14));
        assert_eq!(state.after_delete(), DeleteFollowUp::Reload(2));
        assert_eq!(state.page, 2);
    }

    #[test]
    fn test_deleting_sole_item_on_first_page_reloads() {
        let mut state = ListState::<Row>::new(10);
        state.apply_page(page_of(rows(1), 1, 10, 1));
        assert_eq!(state.after_delete(), DeleteFollowUp::Reload(1));
    }

    #[test]
    fn test_search_filters_loaded_rows_only() {
        let mut state = ListState::<Row>::new(10);
        state.apply_page(page_of(rows(6), 1, 10, 26));

        state.set_search("  BIOLOGY ");
        assert_eq!(state.visible_rows().len(), 3);
        assert_eq!(state.total_count, 26);
        assert_eq!(state.total_pages, 3);

        state.set_search("intro");
        assert_eq!(state.visible_rows().len(), 6);

        state.set_search("chemistry");
        assert!(state.visible_rows().is_empty());

        state.set_search("");
        assert_eq!(state.visible_rows().len(), 6);
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut state = ListState::<Row>::new(10);
        state.apply_page(page_of(rows(10), 1, 10, 30));
        assert!(!state.has_prev());
        assert!(state.has_next());

        assert_eq!(state.prev().page, 1);
        assert_eq!(state.next().page, 2);
        assert_eq!(state.go_to(99).page, 3);
        assert_eq!(state.go_to(0).page, 1);
    }

    #[test]
    fn test_error_keeps_rows_and_retry_clears() {
        let mut state = ListState::<Row>::new(10);
        state.apply_page(page_of(rows(2), 1, 10, 2));

        state.begin_load();
        assert!(state.loading);
        state.apply_error("Could not reach the server.");
        assert!(!state.loading);
        assert_eq!(state.items.len(), 2);
        assert!(state.error.is_some());

        assert_eq!(state.retry(), PageRequest::new(1, 10));
        assert!(state.error.is_none());
    }

    #[test]
    fn test_range_label() {
        let mut state = ListState::<Row>::new(10);
        assert_eq!(state.range_label(), "No results");
        state.apply_page(page_of(rows(1), 2, 10, 11));
        assert_eq!(state.range_label(), "Showing 11–11 of 11");
        state.apply_page(page_of(rows(10), 1, 10, 11));
        assert_eq!(state.range_label(), "Showing 1–10 of 11");
    }

    #[test]
    fn test_reset_outdates_work_from_previous_collection() {
        let mut state = ListState::<Row>::new(10);
        state.apply_page(page_of(rows(1), 2, 10, 11));
        let started = state.epoch();

        state.reset(5);
        assert!(!state.is_current(started));
        assert_eq!(state.page, 1);
        assert_eq!(state.page_size, 5);
        assert!(state.items.is_empty());

        // a delete confirmed for the old collection must not move this one
        if state.is_current(started) {
            state.after_delete();
        }
        assert_eq!(state.page, 1);
        assert!(state.is_current(state.epoch()));
    }
}
