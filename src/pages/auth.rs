use crate::forms::{FieldErrors, LoginForm, RegisterForm};
use crate::pages::SubmitGuard;
use crate::routes::Route;
use crate::session::AuthProvider;
use tracing::warn;

pub struct LoginPage {
    pub values: LoginForm,
    pub field_errors: FieldErrors,
    pub error: Option<String>,
    pub submitting: bool,
    /// Where a guard bounced the visitor from
    from: Option<Route>,
}

impl LoginPage {
    pub fn new(from: Option<Route>) -> Self {
        Self {
            values: LoginForm::default(),
            field_errors: FieldErrors::default(),
            error: None,
            submitting: false,
            from,
        }
    }

    /// Sign in; on success returns the route the visitor originally wanted, or the dashboard
    pub async fn submit(&mut self, auth: &mut AuthProvider) -> Option<Route> {
        if self.submitting {
            return None;
        }
        if let Err(errors) = self.values.validate() {
            self.field_errors = errors;
            return None;
        }
        self.field_errors = FieldErrors::default();

        self.error = None;
        let result = {
            let _guard = SubmitGuard::raise(&mut self.submitting);
            auth.login(&self.values.to_request()).await
        };

        match result {
            Ok(_) => Some(self.from.unwrap_or(Route::Dashboard)),
            Err(err) => {
                warn!("Login failed: {}", err);
                self.error = Some(err.message_or("Invalid email or password"));
                None
            }
        }
    }
}

#[derive(Default)]
pub struct RegisterPage {
    pub values: RegisterForm,
    pub field_errors: FieldErrors,
    pub error: Option<String>,
    pub submitting: bool,
}

impl RegisterPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn submit(&mut self, auth: &mut AuthProvider) -> Option<Route> {
        if self.submitting {
            return None;
        }
        if let Err(errors) = self.values.validate() {
            self.field_errors = errors;
            return None;
        }
        self.field_errors = FieldErrors::default();

        self.error = None;
        let result = {
            let _guard = SubmitGuard::raise(&mut self.submitting);
            auth.register(&self.values.to_request()).await
        };

        match result {
            Ok(_) => Some(Route::Dashboard),
            Err(err) => {
                warn!("Registration failed: {}", err);
                self.error = Some(err.message_or("Unable to register"));
                None
            }
        }
    }
}
