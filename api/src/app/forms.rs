//! Guest form validation
//!
//! Collects every problem with a submitted form as field-level messages, so
//! the visitor can fix them all in one pass.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::entities::GuestInfo;

/// Minimum length of a guest's first name
pub const FIRST_NAME_MIN_LENGTH: usize = 3;

static EMAIL_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

fn email_pattern() -> Option<&'static Regex> {
    EMAIL_PATTERN
        .get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$").ok())
        .as_ref()
}

/// Field name -> messages, sorted by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// First message for a field, if any
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Accumulates field errors across checks
#[derive(Debug, Default)]
pub struct Validator {
    errors: FormErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field must be present and not blank
    pub fn required(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors.add(field, "This field cannot be blank");
        }
        self
    }

    /// Field must have at least `min` characters
    pub fn min_length(&mut self, field: &str, value: &str, min: usize) -> &mut Self {
        if value.trim().chars().count() < min {
            self.errors
                .add(field, format!("This field must be at least {} characters long", min));
        }
        self
    }

    /// Field must look like `local@domain.tld`
    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        let valid = email_pattern().is_some_and(|re| re.is_match(value.trim()));
        if !valid {
            self.errors.add(field, "Invalid email address");
        }
        self
    }

    pub fn finish(self) -> Result<(), FormErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Guest details as posted by the reservation form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GuestForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl GuestForm {
    /// Guest info as entered, trimmed but not yet validated
    pub fn to_guest(&self) -> GuestInfo {
        GuestInfo {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<GuestInfo, FormErrors> {
        let mut v = Validator::new();
        v.required("first_name", &self.first_name)
            .required("last_name", &self.last_name)
            .required("email", &self.email)
            .required("phone", &self.phone)
            .min_length("first_name", &self.first_name, FIRST_NAME_MIN_LENGTH)
            .email("email", &self.email);
        v.finish()?;
        Ok(self.to_guest())
    }
}
