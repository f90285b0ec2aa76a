use crate::api::MarketplaceApi;
use crate::error::Result;
use crate::models::{LoginRequest, RegisterRequest, User};
use crate::session::storage::KeyValueStore;
use std::sync::Arc;
use tracing::{info, warn};

pub const TOKEN_KEY: &str = "realnest_token";
pub const USER_KEY: &str = "realnest_user";

/// Token and profile of the signed-in user; both present or both absent after any auth action
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }
}

/// Owns the session and is the only writer of it
pub struct AuthProvider {
    api: Arc<dyn MarketplaceApi>,
    store: Box<dyn KeyValueStore>,
    session: Session,
}

impl AuthProvider {
    /// Restore the persisted session and hand its token to the API client.
    ///
    /// A token without a readable user (or the reverse) is discarded and both keys are cleared.
    pub fn load(api: Arc<dyn MarketplaceApi>, store: Box<dyn KeyValueStore>) -> Result<Self> {
        let token = store.get(TOKEN_KEY)?.filter(|t| !t.is_empty());
        let raw_user = store.get(USER_KEY)?;
        let user = match raw_user.as_deref().map(serde_json::from_str::<User>) {
            Some(Ok(user)) => Some(user),
            Some(Err(err)) => {
                warn!("Ignoring unreadable stored user: {}", err);
                None
            }
            None => None,
        };

        let session = match (token, user) {
            (Some(token), Some(user)) => Session { token: Some(token), user: Some(user) },
            (None, None) if raw_user.is_none() => Session::default(),
            _ => {
                warn!("Discarding partial stored session");
                if let Err(err) = store.apply(&[(TOKEN_KEY, None), (USER_KEY, None)]) {
                    warn!("Failed to clear partial session: {}", err);
                }
                Session::default()
            }
        };

        api.set_bearer_token(session.token.clone());
        Ok(Self { api, store, session })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.session.is_admin()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.session.user.as_ref()
    }

    pub fn api(&self) -> Arc<dyn MarketplaceApi> {
        Arc::clone(&self.api)
    }

    pub async fn login(&mut self, credentials: &LoginRequest) -> Result<User> {
        let response = self.api.login(credentials).await?;
        info!("Signed in as user {}", response.user.id);
        self.set_auth(Some(response.token), Some(response.user.clone()))?;
        Ok(response.user)
    }

    pub async fn register(&mut self, payload: &RegisterRequest) -> Result<User> {
        let response = self.api.register(payload).await?;
        info!("Registered user {}", response.user.id);
        self.set_auth(Some(response.token), Some(response.user.clone()))?;
        Ok(response.user)
    }

    pub fn logout(&mut self) -> Result<()> {
        info!("Signing out");
        self.set_auth(None, None)
    }

    // Storage is written before memory, so a failed write leaves the old session everywhere.
    fn set_auth(&mut self, token: Option<String>, user: Option<User>) -> Result<()> {
        let user_json = user.as_ref().map(serde_json::to_string).transpose()?;
        self.store
            .apply(&[(TOKEN_KEY, token.clone()), (USER_KEY, user_json)])?;
        self.api.set_bearer_token(token.clone());
        self.session = Session { token, user };
        Ok(())
    }
}

#[cfg(test)]
#[path = "provider_test.rs"]
mod tests;
