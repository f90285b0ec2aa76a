pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod details;
pub mod home;
pub mod pagination;
pub mod property_form;

pub use admin::AdminConsole;
pub use auth::{LoginPage, RegisterPage};
pub use dashboard::DashboardPage;
pub use details::PropertyDetailsPage;
pub use home::HomePage;
pub use pagination::{ListState, Pager};
pub use property_form::{FormMode, PropertyFormPage};

use crate::error::ApiError;
use tracing::warn;

/// Transient success/error alerts shown above a view after a mutation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Banner {
    pub success: Option<String>,
    pub error: Option<String>,
}

impl Banner {
    pub fn clear(&mut self) {
        self.success = None;
        self.error = None;
    }

    pub fn succeed(&mut self, message: &str) {
        self.success = Some(message.to_string());
    }

    pub fn fail(&mut self, err: &ApiError, fallback: &str) {
        warn!("Action failed: {}", err);
        self.error = Some(err.message_or(fallback));
    }
}

/// Holds a form's `submitting` flag up until dropped, including when the submit future is cancelled
pub(crate) struct SubmitGuard<'a>(&'a mut bool);

impl<'a> SubmitGuard<'a> {
    pub(crate) fn raise(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}
