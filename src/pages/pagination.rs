use crate::error::ApiError;
use crate::models::Page;
use tracing::warn;

/// Position within a zero-indexed paginated collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pager {
    pub page: u32,
    pub total_pages: u32,
    pub total_elements: u64,
}

impl Pager {
    pub fn from_page<T>(page: &Page<T>) -> Self {
        Self {
            page: page.page,
            total_pages: page.total_pages,
            total_elements: page.total_elements,
        }
    }

    pub fn previous_disabled(&self, loading: bool) -> bool {
        self.page == 0 || loading
    }

    pub fn next_disabled(&self, loading: bool) -> bool {
        self.page.saturating_add(1) >= self.total_pages || loading
    }

    /// Controls only render when there is somewhere to go
    pub fn controls_visible(&self) -> bool {
        self.total_pages > 1
    }

    /// Target page for a relative move, if it lands inside `[0, total_pages)`
    pub fn step(&self, direction: i32) -> Option<u32> {
        let next = i64::from(self.page) + i64::from(direction);
        (next >= 0 && next < i64::from(self.total_pages)).then_some(next as u32)
    }

    pub fn label(&self) -> String {
        format!("Page {} of {}", u64::from(self.page) + 1, self.total_pages)
    }
}

/// State behind every paginated list view.
///
/// `finish` applies whatever result it is handed. Overlapping fetches for the
/// same list are not sequenced, so the response applied last wins even when it
/// belongs to an older request.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub pager: Pager,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pager: Pager::default(),
            loading: false,
            error: None,
        }
    }
}

impl<T> ListState<T> {
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn finish(&mut self, result: Result<Page<T>, ApiError>, fallback: &str) {
        match result {
            Ok(page) => {
                self.pager = Pager::from_page(&page);
                self.items = page.content;
            }
            Err(err) => {
                warn!("List fetch failed: {}", err);
                self.items.clear();
                self.error = Some(err.message_or(fallback));
            }
        }
        self.loading = false;
    }

    /// Items to render; nothing while loading or after a failure
    pub fn visible(&self) -> &[T] {
        if self.loading || self.error.is_some() {
            &[]
        } else {
            &self.items
        }
    }

    /// Loaded fine but came back with nothing
    pub fn is_empty_result(&self) -> bool {
        !self.loading && self.error.is_none() && self.items.is_empty()
    }

    pub fn previous_disabled(&self) -> bool {
        self.pager.previous_disabled(self.loading)
    }

    pub fn next_disabled(&self) -> bool {
        self.pager.next_disabled(self.loading)
    }
}
