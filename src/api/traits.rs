use crate::api::types::{PageRequest, SearchFilters};
use crate::error::Result;
use crate::models::{
    AuthResponse, ImageUpload, LoginRequest, Page, Property, PropertyPayload, RegisterRequest, Role, User,
};
use async_trait::async_trait;

/// Every remote call the client makes.
/// Views hold this as a trait object so they can run against the HTTP client or a fake.
#[async_trait]
pub trait MarketplaceApi: Send + Sync {
    /// Replace the bearer token attached to later requests
    fn set_bearer_token(&self, token: Option<String>);

    async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse>;

    async fn register(&self, payload: &RegisterRequest) -> Result<AuthResponse>;

    /// Approved listings, newest first
    async fn list_properties(&self, page: PageRequest) -> Result<Page<Property>>;

    async fn search_properties(&self, filters: &SearchFilters, page: PageRequest) -> Result<Page<Property>>;

    async fn get_property(&self, id: i64) -> Result<Property>;

    /// Listings owned by the authenticated user, any status
    async fn my_properties(&self, page: PageRequest) -> Result<Page<Property>>;

    async fn create_property(&self, payload: &PropertyPayload, image: Option<ImageUpload>) -> Result<Property>;

    async fn update_property(
        &self,
        id: i64,
        payload: &PropertyPayload,
        image: Option<ImageUpload>,
    ) -> Result<Property>;

    async fn delete_property(&self, id: i64) -> Result<()>;

    async fn pending_properties(&self, page: PageRequest) -> Result<Page<Property>>;

    async fn approve_property(&self, id: i64) -> Result<Property>;

    async fn reject_property(&self, id: i64) -> Result<Property>;

    async fn list_users(&self, page: PageRequest) -> Result<Page<User>>;

    async fn update_user_role(&self, id: i64, role: Role) -> Result<User>;

    async fn delete_user(&self, id: i64) -> Result<()>;
}
