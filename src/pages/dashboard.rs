use crate::api::{MarketplaceApi, PageRequest};
use crate::models::Property;
use crate::pages::pagination::ListState;
use crate::pages::Banner;
use std::sync::Arc;
use tracing::info;

pub const DASHBOARD_PAGE_SIZE: u32 = 9;
pub const DELETE_PROPERTY_PROMPT: &str = "Are you sure you want to delete this property?";

/// The signed-in user's own listings, in every moderation state
pub struct DashboardPage {
    api: Arc<dyn MarketplaceApi>,
    pub list: ListState<Property>,
    pub banner: Banner,
}

impl DashboardPage {
    pub fn new(api: Arc<dyn MarketplaceApi>) -> Self {
        Self {
            api,
            list: ListState::default(),
            banner: Banner::default(),
        }
    }

    pub async fn fetch(&mut self, page: u32) {
        self.list.begin();
        let result = self
            .api
            .my_properties(PageRequest::new(page, DASHBOARD_PAGE_SIZE))
            .await;
        self.list.finish(result, "Unable to load your properties");
    }

    pub async fn change_page(&mut self, direction: i32) -> bool {
        match self.list.pager.step(direction) {
            Some(page) => {
                self.fetch(page).await;
                true
            }
            None => false,
        }
    }

    /// Delete a listing once `confirm` agrees, then reload the current page.
    /// Returns false when the user declined.
    pub async fn delete(&mut self, property_id: i64, confirm: impl FnOnce(&str) -> bool) -> bool {
        if !confirm(DELETE_PROPERTY_PROMPT) {
            return false;
        }

        self.banner.clear();
        match self.api.delete_property(property_id).await {
            Ok(()) => {
                info!("Deleted property {}", property_id);
                self.banner.succeed("Property deleted successfully");
                self.fetch(self.list.pager.page).await;
            }
            Err(err) => self.banner.fail(&err, "Unable to delete property"),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{sample_property, FakeApi};
    use crate::models::PropertyStatus;

    fn seeded() -> Arc<FakeApi> {
        let api = Arc::new(FakeApi::new());
        api.state().mine = vec![
            sample_property(1, PropertyStatus::Pending),
            sample_property(2, PropertyStatus::Approved),
            sample_property(3, PropertyStatus::Rejected),
        ];
        api
    }

    #[tokio::test]
    async fn declined_confirmation_issues_no_request() {
        let api = seeded();
        let mut page = DashboardPage::new(api.clone());
        page.fetch(0).await;

        let mut prompt = String::new();
        let went_ahead = page
            .delete(2, |text| {
                prompt = text.to_string();
                false
            })
            .await;

        assert!(!went_ahead);
        assert_eq!(prompt, DELETE_PROPERTY_PROMPT);
        assert_eq!(api.calls(), vec!["GET /properties/me?page=0&size=9"]);
        assert_eq!(page.banner, Banner::default());
    }

    #[tokio::test]
    async fn confirmed_delete_refetches_current_page() {
        let api = seeded();
        let mut page = DashboardPage::new(api.clone());
        page.fetch(0).await;

        assert!(page.delete(2, |_| true).await);
        assert_eq!(
            api.calls(),
            vec![
                "GET /properties/me?page=0&size=9",
                "DELETE /properties/2",
                "GET /properties/me?page=0&size=9",
            ]
        );
        assert_eq!(page.banner.success.as_deref(), Some("Property deleted successfully"));
        let ids: Vec<i64> = page.list.items.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn failed_delete_shows_server_message() {
        let api = seeded();
        let mut page = DashboardPage::new(api.clone());
        page.fetch(0).await;

        api.fail_next(403, Some("You can only delete your own properties"));
        page.delete(1, |_| true).await;

        assert_eq!(page.banner.error.as_deref(), Some("You can only delete your own properties"));
        assert_eq!(page.banner.success, None);
        assert_eq!(page.list.items.len(), 3);
    }
}
