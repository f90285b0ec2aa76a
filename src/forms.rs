//! Form values as typed text plus their field-level validation rules.

use crate::models::{LoginRequest, Property, PropertyPayload, PropertyType, RegisterRequest};
use std::collections::BTreeMap;

pub const NAME_MIN_CHARS: usize = 3;
pub const PASSWORD_MIN_CHARS: usize = 6;
pub const DESCRIPTION_MIN_CHARS: usize = 30;

/// Validation messages keyed by field name; the first failing rule per field wins
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn add(&mut self, field: &'static str, message: &str) {
        self.0.entry(field).or_insert_with(|| message.to_string());
    }

    fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Loose `local@domain.tld` shape check
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

fn check_email(errors: &mut FieldErrors, field: &'static str, value: &str, required: bool) {
    if is_blank(value) {
        if required {
            errors.add(field, "Email is required");
        }
    } else if !is_valid_email(value.trim()) {
        errors.add(field, "Enter a valid email");
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        check_email(&mut errors, "email", &self.email, true);
        if self.password.is_empty() {
            errors.add("password", "Password is required");
        }
        errors.into_result()
    }

    pub fn to_request(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();

        if is_blank(&self.name) {
            errors.add("name", "Name is required");
        } else if self.name.trim().chars().count() < NAME_MIN_CHARS {
            errors.add("name", "Name is too short");
        }

        check_email(&mut errors, "email", &self.email, true);

        if self.password.is_empty() {
            errors.add("password", "Password is required");
        } else if self.password.chars().count() < PASSWORD_MIN_CHARS {
            errors.add("password", "Minimum 6 characters");
        }

        if self.confirm_password.is_empty() {
            errors.add("confirmPassword", "Confirm your password");
        } else if self.confirm_password != self.password {
            errors.add("confirmPassword", "Passwords must match");
        }

        errors.into_result()
    }

    /// The confirmation field never leaves the client
    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyForm {
    pub title: String,
    pub description: String,
    pub price: String,
    pub property_type: String,
    pub location: String,
    pub contact_email: String,
    pub contact_phone: String,
}

impl Default for PropertyForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            price: String::new(),
            property_type: PropertyType::Sale.as_str().to_string(),
            location: String::new(),
            contact_email: String::new(),
            contact_phone: String::new(),
        }
    }
}

impl PropertyForm {
    /// Pre-fill from an existing listing; absent contacts become empty text
    pub fn from_property(property: &Property) -> Self {
        Self {
            title: property.title.clone(),
            description: property.description.clone(),
            price: property.price.map(format_number).unwrap_or_default(),
            property_type: property.property_type.as_str().to_string(),
            location: property.location.clone(),
            contact_email: property.contact_email.clone().unwrap_or_default(),
            contact_phone: property.contact_phone.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        self.to_payload().map(|_| ())
    }

    /// Validate, then convert to the JSON part of the multipart request
    pub fn to_payload(&self) -> Result<PropertyPayload, FieldErrors> {
        let mut errors = FieldErrors::default();

        if is_blank(&self.title) {
            errors.add("title", "Title is required");
        }

        if is_blank(&self.description) {
            errors.add("description", "Description is required");
        } else if self.description.trim().chars().count() < DESCRIPTION_MIN_CHARS {
            errors.add("description", "Provide more detail (minimum 30 characters)");
        }

        let price = if is_blank(&self.price) {
            errors.add("price", "Price is required");
            None
        } else {
            match self.price.trim().parse::<f64>() {
                Ok(value) if !value.is_finite() => {
                    errors.add("price", "Price must be a number");
                    None
                }
                Ok(value) if value <= 0.0 => {
                    errors.add("price", "Price must be positive");
                    None
                }
                Ok(value) => Some(value),
                Err(_) => {
                    errors.add("price", "Price must be a number");
                    None
                }
            }
        };

        let property_type = if is_blank(&self.property_type) {
            errors.add("type", "Property type is required");
            None
        } else {
            match self.property_type.trim().parse::<PropertyType>() {
                Ok(value) => Some(value),
                Err(_) => {
                    errors.add("type", "Property type must be SALE or RENT");
                    None
                }
            }
        };

        if is_blank(&self.location) {
            errors.add("location", "Location is required");
        }

        check_email(&mut errors, "contactEmail", &self.contact_email, false);

        match (price, property_type) {
            (Some(price), Some(property_type)) if errors.is_empty() => Ok(PropertyPayload {
                title: self.title.trim().to_string(),
                description: self.description.trim().to_string(),
                price,
                property_type,
                location: self.location.trim().to_string(),
                contact_email: non_empty(&self.contact_email),
                contact_phone: non_empty(&self.contact_phone),
            }),
            _ => Err(errors),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
#[path = "forms_test.rs"]
mod tests;
