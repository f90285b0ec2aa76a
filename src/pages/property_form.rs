use crate::api::MarketplaceApi;
use crate::error::{ApiError, Result};
use crate::forms::{FieldErrors, PropertyForm};
use crate::models::ImageUpload;
use crate::pages::SubmitGuard;
use crate::routes::Route;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

/// Create or edit a listing
pub struct PropertyFormPage {
    api: Arc<dyn MarketplaceApi>,
    mode: FormMode,
    pub values: PropertyForm,
    pub field_errors: FieldErrors,
    pub loading: bool,
    pub submitting: bool,
    /// Pre-load failure in edit mode; the form stays hidden
    pub load_error: Option<String>,
    /// Submit failure shown above the form
    pub error: Option<String>,
}

impl PropertyFormPage {
    pub fn new(api: Arc<dyn MarketplaceApi>, mode: FormMode) -> Self {
        Self {
            api,
            mode,
            values: PropertyForm::default(),
            field_errors: FieldErrors::default(),
            loading: matches!(mode, FormMode::Edit(_)),
            submitting: false,
            load_error: None,
            error: None,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Create a new property listing",
            FormMode::Edit(_) => "Update property",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match (self.submitting, self.mode) {
            (true, _) => "Saving...",
            (false, FormMode::Create) => "Create listing",
            (false, FormMode::Edit(_)) => "Save changes",
        }
    }

    /// The form can be filled in and submitted
    pub fn is_ready(&self) -> bool {
        !self.loading && self.load_error.is_none()
    }

    /// Edit mode pre-fills from the stored listing; create mode has nothing to load
    pub async fn load(&mut self) {
        let FormMode::Edit(id) = self.mode else {
            self.loading = false;
            return;
        };

        self.loading = true;
        self.load_error = None;
        match self.api.get_property(id).await {
            Ok(property) => self.values = PropertyForm::from_property(&property),
            Err(err) => {
                warn!("Could not load property {} for editing: {}", id, err);
                self.load_error = Some(err.message_or("Unable to load property"));
            }
        }
        self.loading = false;
    }

    /// Validate and save. Returns where to navigate on success.
    pub async fn submit(&mut self, image: Option<ImageUpload>) -> Option<Route> {
        if self.submitting || !self.is_ready() {
            return None;
        }

        let payload = match self.values.to_payload() {
            Ok(payload) => {
                self.field_errors = FieldErrors::default();
                payload
            }
            Err(errors) => {
                self.field_errors = errors;
                return None;
            }
        };

        self.error = None;
        let result = {
            let _guard = SubmitGuard::raise(&mut self.submitting);
            match self.mode {
                FormMode::Create => self.api.create_property(&payload, image).await,
                FormMode::Edit(id) => self.api.update_property(id, &payload, image).await,
            }
        };

        match result {
            Ok(property) => {
                info!("Saved property {} ({})", property.id, property.status);
                Some(Route::Dashboard)
            }
            Err(err) => {
                warn!("Saving property failed: {}", err);
                self.error = Some(err.message_or("Unable to save property"));
                None
            }
        }
    }
}

/// Read an image file from disk for upload
pub async fn read_image(path: &Path) -> Result<ImageUpload> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|err| ApiError::InvalidInput(format!("cannot read image {}: {err}", path.display())))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    Ok(ImageUpload::new(file_name, bytes))
}

#[cfg(test)]
#[path = "property_form_test.rs"]
mod tests;
