//! Rule-driven form validation. Each field gets at most one message: the first
//! rule that fails, checked in a fixed priority order.

use super::{validate_email, validate_password, validate_password_confirmation, validate_username};
use crate::auth::types::{Credentials, RegistrationRequest};
use secrecy::ExposeSecret;
use std::{collections::BTreeMap, fmt, sync::Arc};

/// Submitted field values keyed by field name.
pub type FormData = BTreeMap<String, String>;

/// Field name to the single message shown for it.
pub type FormErrors = BTreeMap<String, String>;

/// Custom rule: receives the field value and the whole form, returns a message on failure.
pub type CustomRule = Arc<dyn Fn(&str, &FormData) -> Option<String> + Send + Sync>;

/// Rules attached to one form field.
#[derive(Clone, Default)]
pub struct FieldRules {
    pub required: bool,
    pub label: Option<String>,
    pub email: bool,
    pub password: bool,
    pub username: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub validate: Option<CustomRule>,
}

impl fmt::Debug for FieldRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRules")
            .field("required", &self.required)
            .field("label", &self.label)
            .field("email", &self.email)
            .field("password", &self.password)
            .field("username", &self.username)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("validate", &self.validate.is_some())
            .finish()
    }
}

impl FieldRules {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    #[must_use]
    pub fn email(mut self) -> Self {
        self.email = true;
        self
    }

    #[must_use]
    pub fn password(mut self) -> Self {
        self.password = true;
        self
    }

    #[must_use]
    pub fn username(mut self) -> Self {
        self.username = true;
        self
    }

    #[must_use]
    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }

    #[must_use]
    pub fn max_length(mut self, length: usize) -> Self {
        self.max_length = Some(length);
        self
    }

    #[must_use]
    pub fn validate<F>(mut self, rule: F) -> Self
    where
        F: Fn(&str, &FormData) -> Option<String> + Send + Sync + 'static,
    {
        self.validate = Some(Arc::new(rule));
        self
    }

    fn display_name<'a>(&'a self, field: &'a str) -> &'a str {
        self.label.as_deref().unwrap_or(field)
    }

    /// First violated rule for `value`, or `None` when the field passes.
    fn check(&self, field: &str, value: Option<&str>, form_data: &FormData) -> Option<String> {
        if self.required && value.map_or(true, |v| v.trim().is_empty()) {
            return Some(format!("{} is required", self.display_name(field)));
        }

        // Optional and empty: nothing else applies.
        let value = value.filter(|v| !v.is_empty())?;

        if self.email && !validate_email(value) {
            return Some("Please enter a valid email address".to_string());
        }

        if self.password {
            if let Some(error) = validate_password(value).first_error() {
                return Some(error.to_string());
            }
        }

        if self.username {
            if let Some(error) = validate_username(value).first_error() {
                return Some(error.to_string());
            }
        }

        let length = value.chars().count();

        if let Some(min) = self.min_length {
            if length < min {
                return Some(format!(
                    "{} must be at least {min} characters",
                    self.display_name(field)
                ));
            }
        }

        if let Some(max) = self.max_length {
            if length > max {
                return Some(format!(
                    "{} must be no more than {max} characters",
                    self.display_name(field)
                ));
            }
        }

        self.validate
            .as_ref()
            .and_then(|rule| rule(value, form_data))
    }
}

/// Result of [`validate_form`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormValidation {
    pub errors: FormErrors,
}

impl FormValidation {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validates every field named in `rules` against `form_data`.
#[must_use]
pub fn validate_form(form_data: &FormData, rules: &BTreeMap<String, FieldRules>) -> FormValidation {
    let errors = rules
        .iter()
        .filter_map(|(field, field_rules)| {
            let value = form_data.get(field).map(String::as_str);
            field_rules
                .check(field, value, form_data)
                .map(|error| (field.clone(), error))
        })
        .collect();

    FormValidation { errors }
}

/// Builds a single-field validator for as-you-type feedback. The candidate
/// value replaces the field in the form before the rules run; fields without
/// rules always pass.
pub fn field_validator(
    rules: BTreeMap<String, FieldRules>,
) -> impl Fn(&str, &str, &FormData) -> Option<String> {
    move |field, value, form_data| {
        let field_rules = rules.get(field)?;
        let mut candidate = form_data.clone();
        candidate.insert(field.to_string(), value.to_string());
        field_rules.check(field, Some(value), &candidate)
    }
}

fn login_rules() -> BTreeMap<String, FieldRules> {
    BTreeMap::from([
        (
            "email".to_string(),
            FieldRules::new().required().label("Email").email(),
        ),
        (
            "password".to_string(),
            FieldRules::new().required().label("Password"),
        ),
    ])
}

fn registration_rules() -> BTreeMap<String, FieldRules> {
    BTreeMap::from([
        (
            "email".to_string(),
            FieldRules::new().required().label("Email").email(),
        ),
        (
            "username".to_string(),
            FieldRules::new().required().label("Username").min_length(3),
        ),
        (
            "password".to_string(),
            FieldRules::new().required().label("Password").min_length(8),
        ),
        (
            "confirm_password".to_string(),
            FieldRules::new()
                .required()
                .label("Password confirmation")
                .validate(|value, form| {
                    let password = form.get("password").map_or("", String::as_str);
                    validate_password_confirmation(password, value)
                }),
        ),
    ])
}

/// Login form checks: both fields present and a plausible email.
#[must_use]
pub fn validate_credentials(credentials: &Credentials) -> FormErrors {
    let form_data = FormData::from([
        ("email".to_string(), credentials.email.clone()),
        (
            "password".to_string(),
            credentials.password.expose_secret().to_string(),
        ),
    ]);

    validate_form(&form_data, &login_rules()).errors
}

/// Register form checks run before the request is attempted.
#[must_use]
pub fn validate_registration(request: &RegistrationRequest) -> FormErrors {
    let form_data = FormData::from([
        ("email".to_string(), request.email.clone()),
        ("username".to_string(), request.username.clone()),
        (
            "password".to_string(),
            request.password.expose_secret().to_string(),
        ),
        (
            "confirm_password".to_string(),
            request.confirm_password.expose_secret().to_string(),
        ),
    ]);

    validate_form(&form_data, &registration_rules()).errors
}
