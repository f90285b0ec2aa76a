use crate::api::{MarketplaceApi, PageRequest};
use crate::models::{Property, Role, User};
use crate::pages::pagination::ListState;
use crate::pages::Banner;
use std::sync::Arc;
use tracing::info;

pub const PENDING_PAGE_SIZE: u32 = 9;
pub const USER_PAGE_SIZE: u32 = 10;
pub const DELETE_USER_PROMPT: &str = "Delete this user? Their properties will be removed.";

/// Moderation queue plus user management
pub struct AdminConsole {
    api: Arc<dyn MarketplaceApi>,
    pub pending: ListState<Property>,
    pub users: ListState<User>,
    pub banner: Banner,
}

impl AdminConsole {
    pub fn new(api: Arc<dyn MarketplaceApi>) -> Self {
        Self {
            api,
            pending: ListState::default(),
            users: ListState::default(),
            banner: Banner::default(),
        }
    }

    /// First page of both lists, as on first visit
    pub async fn load(&mut self) {
        self.fetch_pending(0).await;
        self.fetch_users(0).await;
    }

    pub async fn fetch_pending(&mut self, page: u32) {
        self.pending.begin();
        let result = self
            .api
            .pending_properties(PageRequest::new(page, PENDING_PAGE_SIZE))
            .await;
        self.pending.finish(result, "Unable to load pending properties");
    }

    pub async fn fetch_users(&mut self, page: u32) {
        self.users.begin();
        let result = self.api.list_users(PageRequest::new(page, USER_PAGE_SIZE)).await;
        self.users.finish(result, "Unable to load users");
    }

    pub async fn change_pending_page(&mut self, direction: i32) -> bool {
        match self.pending.pager.step(direction) {
            Some(page) => {
                self.fetch_pending(page).await;
                true
            }
            None => false,
        }
    }

    pub async fn change_users_page(&mut self, direction: i32) -> bool {
        match self.users.pager.step(direction) {
            Some(page) => {
                self.fetch_users(page).await;
                true
            }
            None => false,
        }
    }

    /// Approve (`true`) or reject (`false`) a pending listing, then reload the same queue page
    pub async fn review(&mut self, property_id: i64, approve: bool) {
        self.banner.clear();
        let result = if approve {
            self.api.approve_property(property_id).await
        } else {
            self.api.reject_property(property_id).await
        };

        match result {
            Ok(property) => {
                let verdict = if approve { "approved" } else { "rejected" };
                info!("Property {} {}", property.id, verdict);
                self.banner.succeed(&format!("Property {verdict} successfully"));
                self.fetch_pending(self.pending.pager.page).await;
            }
            Err(err) => self.banner.fail(&err, "Unable to update property status"),
        }
    }

    pub async fn change_role(&mut self, user_id: i64, role: Role) {
        self.banner.clear();
        match self.api.update_user_role(user_id, role).await {
            Ok(user) => {
                info!("User {} is now {}", user.id, user.role);
                self.banner.succeed("User role updated");
                self.fetch_users(self.users.pager.page).await;
            }
            Err(err) => self.banner.fail(&err, "Unable to update user role"),
        }
    }

    /// Returns false when the user declined the confirmation
    pub async fn delete_user(&mut self, user_id: i64, confirm: impl FnOnce(&str) -> bool) -> bool {
        if !confirm(DELETE_USER_PROMPT) {
            return false;
        }

        self.banner.clear();
        match self.api.delete_user(user_id).await {
            Ok(()) => {
                info!("Deleted user {}", user_id);
                self.banner.succeed("User deleted");
                self.fetch_users(self.users.pager.page).await;
            }
            Err(err) => self.banner.fail(&err, "Unable to delete user"),
        }
        true
    }
}

#[cfg(test)]
#[path = "admin_test.rs"]
mod tests;
