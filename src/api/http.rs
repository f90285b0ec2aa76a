use crate::api::traits::MarketplaceApi;
use crate::api::types::{PageRequest, SearchFilters};
use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::models::{
    ApiErrorBody, AuthResponse, ImageUpload, LoginRequest, Page, Property, PropertyPayload, RegisterRequest, Role,
    UpdateRoleRequest, User,
};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::RwLock;
use tracing::{debug, warn};

/// reqwest-backed marketplace client; attaches the base URL and bearer token to every call
pub struct HttpApi {
    client: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl HttpApi {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("realnest/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            token: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn bearer_token(&self) -> Option<String> {
        self.token.read().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!("{} {}{}", method, self.base_url, path);
        let builder = self.client.request(method, format!("{}{}", self.base_url, path));
        match self.bearer_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let parsed: ApiErrorBody = serde_json::from_str(&body).unwrap_or_default();
        if let Some(errors) = parsed.errors.as_ref().filter(|errors| !errors.is_empty()) {
            debug!("Field errors: {}", errors.join("; "));
        }
        warn!("API returned status: {}", status);

        Err(ApiError::Status {
            status: status.as_u16(),
            message: parsed.message,
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.send(builder).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn send_empty(&self, builder: RequestBuilder) -> Result<()> {
        self.send(builder).await?;
        Ok(())
    }

    /// `property` JSON part plus the optional `image` file part
    fn property_form(payload: &PropertyPayload, image: Option<ImageUpload>) -> Result<Form> {
        let json = serde_json::to_string(payload)?;
        let mut form = Form::new().part("property", Part::text(json).mime_str("application/json")?);
        if let Some(image) = image {
            debug!("Attaching image {} ({} bytes)", image.file_name, image.bytes.len());
            let part = Part::bytes(image.bytes)
                .file_name(image.file_name)
                .mime_str(&image.mime)?;
            form = form.part("image", part);
        }
        Ok(form)
    }
}

#[async_trait]
impl MarketplaceApi for HttpApi {
    fn set_bearer_token(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = token;
    }

    async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse> {
        self.send_json(self.request(Method::POST, "/auth/login").json(credentials))
            .await
    }

    async fn register(&self, payload: &RegisterRequest) -> Result<AuthResponse> {
        self.send_json(self.request(Method::POST, "/auth/register").json(payload))
            .await
    }

    async fn list_properties(&self, page: PageRequest) -> Result<Page<Property>> {
        self.send_json(self.request(Method::GET, "/properties").query(&page.query()))
            .await
    }

    async fn search_properties(&self, filters: &SearchFilters, page: PageRequest) -> Result<Page<Property>> {
        let builder = self
            .request(Method::GET, "/properties/search")
            .query(&filters.query())
            .query(&page.query());
        self.send_json(builder).await
    }

    async fn get_property(&self, id: i64) -> Result<Property> {
        self.send_json(self.request(Method::GET, &format!("/properties/{id}")))
            .await
    }

    async fn my_properties(&self, page: PageRequest) -> Result<Page<Property>> {
        self.send_json(self.request(Method::GET, "/properties/me").query(&page.query()))
            .await
    }

    async fn create_property(&self, payload: &PropertyPayload, image: Option<ImageUpload>) -> Result<Property> {
        let form = Self::property_form(payload, image)?;
        self.send_json(self.request(Method::POST, "/properties").multipart(form))
            .await
    }

    async fn update_property(
        &self,
        id: i64,
        payload: &PropertyPayload,
        image: Option<ImageUpload>,
    ) -> Result<Property> {
        let form = Self::property_form(payload, image)?;
        self.send_json(self.request(Method::PUT, &format!("/properties/{id}")).multipart(form))
            .await
    }

    async fn delete_property(&self, id: i64) -> Result<()> {
        self.send_empty(self.request(Method::DELETE, &format!("/properties/{id}")))
            .await
    }

    async fn pending_properties(&self, page: PageRequest) -> Result<Page<Property>> {
        self.send_json(self.request(Method::GET, "/admin/properties/pending").query(&page.query()))
            .await
    }

    async fn approve_property(&self, id: i64) -> Result<Property> {
        self.send_json(self.request(Method::POST, &format!("/admin/properties/{id}/approve")))
            .await
    }

    async fn reject_property(&self, id: i64) -> Result<Property> {
        self.send_json(self.request(Method::POST, &format!("/admin/properties/{id}/reject")))
            .await
    }

    async fn list_users(&self, page: PageRequest) -> Result<Page<User>> {
        self.send_json(self.request(Method::GET, "/admin/users").query(&page.query()))
            .await
    }

    async fn update_user_role(&self, id: i64, role: Role) -> Result<User> {
        let body = UpdateRoleRequest { role };
        self.send_json(self.request(Method::PUT, &format!("/admin/users/{id}/role")).json(&body))
            .await
    }

    async fn delete_user(&self, id: i64) -> Result<()> {
        self.send_empty(self.request(Method::DELETE, &format!("/admin/users/{id}")))
            .await
    }
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
