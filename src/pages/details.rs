use crate::api::MarketplaceApi;
use crate::models::Property;
use std::sync::Arc;
use tracing::warn;

pub struct PropertyDetailsPage {
    api: Arc<dyn MarketplaceApi>,
    pub property: Option<Property>,
    pub loading: bool,
    pub error: Option<String>,
}

impl PropertyDetailsPage {
    pub fn new(api: Arc<dyn MarketplaceApi>) -> Self {
        Self {
            api,
            property: None,
            loading: true,
            error: None,
        }
    }

    pub async fn load(&mut self, id: i64) {
        self.loading = true;
        self.error = None;
        match self.api.get_property(id).await {
            Ok(property) => self.property = Some(property),
            Err(err) => {
                warn!("Could not load property {}: {}", id, err);
                self.property = None;
                self.error = Some(err.message_or("Property not found"));
            }
        }
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{sample_property, FakeApi};
    use crate::models::PropertyStatus;

    #[tokio::test]
    async fn load_shows_listing() {
        let api = Arc::new(FakeApi::new());
        api.state().approved.push(sample_property(8, PropertyStatus::Approved));
        let mut page = PropertyDetailsPage::new(api);
        assert!(page.loading);

        page.load(8).await;
        assert!(!page.loading);
        assert_eq!(page.property.as_ref().map(|p| p.id), Some(8));
        assert_eq!(page.error, None);
    }

    #[tokio::test]
    async fn missing_listing_shows_server_message() {
        let api = Arc::new(FakeApi::new());
        let mut page = PropertyDetailsPage::new(api);

        page.load(77).await;
        assert!(page.property.is_none());
        assert_eq!(page.error.as_deref(), Some("Property not found with id 77"));
    }
}
