//! In-memory marketplace used by the view model tests.

use crate::api::traits::MarketplaceApi;
use crate::api::types::{PageRequest, SearchFilters};
use crate::error::{ApiError, Result};
use crate::models::{
    AuthResponse, ImageUpload, LoginRequest, Page, Property, PropertyPayload, PropertyStatus, PropertyType,
    RegisterRequest, Role, User,
};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
pub struct FakeState {
    /// Request log, one `METHOD /path` entry per call
    pub calls: Vec<String>,
    pub token: Option<String>,
    pub auth_response: Option<AuthResponse>,
    /// Fails the next call with this status and message
    pub fail_next: Option<(u16, Option<String>)>,
    pub approved: Vec<Property>,
    pub mine: Vec<Property>,
    pub pending: Vec<Property>,
    pub users: Vec<User>,
    pub uploads: Vec<(PropertyPayload, Option<ImageUpload>)>,
    /// The next login or create never completes
    pub stall_next: bool,
}

#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    pub fn fail_next(&self, status: u16, message: Option<&str>) {
        self.state().fail_next = Some((status, message.map(str::to_string)));
    }

    async fn stall(&self) {
        let stall = std::mem::take(&mut self.state().stall_next);
        if stall {
            std::future::pending::<()>().await;
        }
    }

    fn record(&self, call: String) -> Result<MutexGuard<'_, FakeState>> {
        let mut state = self.state();
        state.calls.push(call);
        match state.fail_next.take() {
            Some((status, message)) => Err(ApiError::Status { status, message }),
            None => Ok(state),
        }
    }
}

pub fn sample_user(id: i64, role: Role) -> User {
    User {
        id,
        name: format!("User {id}"),
        email: format!("user{id}@example.com"),
        role,
    }
}

pub fn sample_property(id: i64, status: PropertyStatus) -> Property {
    Property {
        id,
        title: format!("Listing {id}"),
        description: "A well kept home close to shops, parks and transit.".into(),
        price: Some(100_000.0 + id as f64),
        property_type: PropertyType::Sale,
        location: "Springfield".into(),
        status,
        image_url: None,
        contact_email: None,
        contact_phone: None,
        date_listed: None,
        owner: Some(sample_user(1, Role::Customer)),
    }
}

fn paginate<T: Clone>(items: &[T], req: PageRequest) -> Page<T> {
    let size = req.size.max(1) as usize;
    let total_pages = items.len().div_ceil(size) as u32;
    let start = (req.page as usize * size).min(items.len());
    let end = (start + size).min(items.len());
    Page {
        content: items[start..end].to_vec(),
        page: req.page,
        total_pages,
        total_elements: items.len() as u64,
    }
}

fn not_found(id: i64) -> ApiError {
    ApiError::Status {
        status: 404,
        message: Some(format!("Property not found with id {id}")),
    }
}

#[async_trait]
impl MarketplaceApi for FakeApi {
    fn set_bearer_token(&self, token: Option<String>) {
        self.state().token = token;
    }

    async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse> {
        self.stall().await;
        let state = self.record(format!("POST /auth/login {}", credentials.email))?;
        state.auth_response.clone().ok_or(ApiError::Status {
            status: 401,
            message: Some("Bad credentials".into()),
        })
    }

    async fn register(&self, payload: &RegisterRequest) -> Result<AuthResponse> {
        let state = self.record(format!("POST /auth/register {}", payload.email))?;
        state.auth_response.clone().ok_or(ApiError::Status {
            status: 400,
            message: Some("Email already registered".into()),
        })
    }

    async fn list_properties(&self, page: PageRequest) -> Result<Page<Property>> {
        let state = self.record(format!("GET /properties?page={}&size={}", page.page, page.size))?;
        Ok(paginate(&state.approved, page))
    }

    async fn search_properties(&self, filters: &SearchFilters, page: PageRequest) -> Result<Page<Property>> {
        let query: Vec<String> = filters.query().iter().map(|(k, v)| format!("{k}={v}")).collect();
        let state = self.record(format!(
            "GET /properties/search?{}&page={}&size={}",
            query.join("&"),
            page.page,
            page.size
        ))?;
        let clean = filters.sanitized();
        let matches: Vec<Property> = state
            .approved
            .iter()
            .filter(|p| {
                clean
                    .location
                    .as_ref()
                    .map_or(true, |loc| p.location.to_lowercase().contains(&loc.to_lowercase()))
                    && clean
                        .property_type
                        .as_ref()
                        .map_or(true, |t| p.property_type.as_str() == t)
                    && clean.keywords.as_ref().map_or(true, |kw| {
                        let kw = kw.to_lowercase();
                        p.title.to_lowercase().contains(&kw) || p.description.to_lowercase().contains(&kw)
                    })
            })
            .cloned()
            .collect();
        Ok(paginate(&matches, page))
    }

    async fn get_property(&self, id: i64) -> Result<Property> {
        let state = self.record(format!("GET /properties/{id}"))?;
        state
            .approved
            .iter()
            .chain(state.mine.iter())
            .chain(state.pending.iter())
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn my_properties(&self, page: PageRequest) -> Result<Page<Property>> {
        let state = self.record(format!("GET /properties/me?page={}&size={}", page.page, page.size))?;
        Ok(paginate(&state.mine, page))
    }

    async fn create_property(&self, payload: &PropertyPayload, image: Option<ImageUpload>) -> Result<Property> {
        self.stall().await;
        let mut state = self.record("POST /properties".to_string())?;
        let id = 1000 + state.mine.len() as i64;
        let mut property = sample_property(id, PropertyStatus::Pending);
        property.title = payload.title.clone();
        property.price = Some(payload.price);
        state.mine.push(property.clone());
        state.uploads.push((payload.clone(), image));
        Ok(property)
    }

    async fn update_property(
        &self,
        id: i64,
        payload: &PropertyPayload,
        image: Option<ImageUpload>,
    ) -> Result<Property> {
        let mut state = self.record(format!("PUT /properties/{id}"))?;
        state.uploads.push((payload.clone(), image));
        let property = state.mine.iter_mut().find(|p| p.id == id).ok_or_else(|| not_found(id))?;
        property.title = payload.title.clone();
        property.price = Some(payload.price);
        Ok(property.clone())
    }

    async fn delete_property(&self, id: i64) -> Result<()> {
        let mut state = self.record(format!("DELETE /properties/{id}"))?;
        state.mine.retain(|p| p.id != id);
        Ok(())
    }

    async fn pending_properties(&self, page: PageRequest) -> Result<Page<Property>> {
        let state = self.record(format!(
            "GET /admin/properties/pending?page={}&size={}",
            page.page, page.size
        ))?;
        Ok(paginate(&state.pending, page))
    }

    async fn approve_property(&self, id: i64) -> Result<Property> {
        let mut state = self.record(format!("POST /admin/properties/{id}/approve"))?;
        let pos = state.pending.iter().position(|p| p.id == id).ok_or_else(|| not_found(id))?;
        let mut property = state.pending.remove(pos);
        property.status = PropertyStatus::Approved;
        state.approved.push(property.clone());
        Ok(property)
    }

    async fn reject_property(&self, id: i64) -> Result<Property> {
        let mut state = self.record(format!("POST /admin/properties/{id}/reject"))?;
        let pos = state.pending.iter().position(|p| p.id == id).ok_or_else(|| not_found(id))?;
        let mut property = state.pending.remove(pos);
        property.status = PropertyStatus::Rejected;
        Ok(property)
    }

    async fn list_users(&self, page: PageRequest) -> Result<Page<User>> {
        let state = self.record(format!("GET /admin/users?page={}&size={}", page.page, page.size))?;
        Ok(paginate(&state.users, page))
    }

    async fn update_user_role(&self, id: i64, role: Role) -> Result<User> {
        let mut state = self.record(format!("PUT /admin/users/{id}/role {role}"))?;
        let user = state.users.iter_mut().find(|u| u.id == id).ok_or(ApiError::Status {
            status: 404,
            message: Some(format!("User not found with id {id}")),
        })?;
        user.role = role;
        Ok(user.clone())
    }

    async fn delete_user(&self, id: i64) -> Result<()> {
        let mut state = self.record(format!("DELETE /admin/users/{id}"))?;
        state.users.retain(|u| u.id != id);
        Ok(())
    }
}
