use crate::api::{MarketplaceApi, PageRequest, SearchFilters};
use crate::models::Property;
use crate::pages::pagination::ListState;
use std::sync::Arc;
use tracing::debug;

pub const HOME_PAGE_SIZE: u32 = 9;

/// Public listing browser with optional search filters
pub struct HomePage {
    api: Arc<dyn MarketplaceApi>,
    pub list: ListState<Property>,
    active_filters: SearchFilters,
}

impl HomePage {
    pub fn new(api: Arc<dyn MarketplaceApi>) -> Self {
        Self {
            api,
            list: ListState::default(),
            active_filters: SearchFilters::default(),
        }
    }

    pub fn active_filters(&self) -> &SearchFilters {
        &self.active_filters
    }

    /// List endpoint when no filter is active, search endpoint otherwise
    pub async fn fetch(&mut self, page: u32) {
        self.list.begin();
        let request = PageRequest::new(page, HOME_PAGE_SIZE);
        let result = if self.active_filters.is_empty() {
            self.api.list_properties(request).await
        } else {
            debug!("Searching with {:?}", self.active_filters.query());
            self.api.search_properties(&self.active_filters, request).await
        };
        self.list.finish(result, "Failed to load properties");
    }

    /// Apply a new filter set and start over from the first page
    pub async fn search(&mut self, filters: SearchFilters) {
        self.active_filters = filters.sanitized();
        self.fetch(0).await;
    }

    pub async fn reset(&mut self) {
        self.search(SearchFilters::default()).await;
    }

    /// Move one page back (`-1`) or forward (`1`); out-of-range moves are ignored
    pub async fn change_page(&mut self, direction: i32) -> bool {
        match self.list.pager.step(direction) {
            Some(page) => {
                self.fetch(page).await;
                true
            }
            None => false,
        }
    }
}
