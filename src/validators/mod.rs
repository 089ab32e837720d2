//! Input validators for the login and registration forms. They are pure
//! functions: nothing here touches the network or the durable store, and a
//! failed validation always blocks submission before any request is built.
//!
//! These checks are a UX convenience; the server must re-validate everything.

pub mod form;

pub use form::{
    field_validator, validate_credentials, validate_form, validate_registration, FieldRules,
    FormData, FormErrors, FormValidation,
};

use regex::Regex;

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 20;

/// Symbols accepted by the password "special character" rule.
pub const PASSWORD_SYMBOLS: &str = "@$!%*?&";

/// Outcome of a multi-rule validator: every violated rule, in rule order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Validation {
    pub errors: Vec<String>,
}

impl Validation {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// First violated rule, the message shown next to a form field.
    #[must_use]
    pub fn first_error(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }

    fn push(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}

/// Permissive `local@domain.tld` shape check, no deliverability lookup.
#[must_use]
pub fn validate_email(email: &str) -> bool {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").map_or(false, |re| re.is_match(email))
}

#[must_use]
pub fn validate_password(password: &str) -> Validation {
    let mut validation = Validation::default();

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        validation.push("Password must be at least 8 characters long");
    }

    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        validation.push("Password must contain at least one lowercase letter");
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        validation.push("Password must contain at least one uppercase letter");
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        validation.push("Password must contain at least one number");
    }

    if !password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        validation.push("Password must contain at least one special character (@$!%*?&)");
    }

    validation
}

#[must_use]
pub fn validate_username(username: &str) -> Validation {
    let mut validation = Validation::default();
    let length = username.chars().count();

    if length < MIN_USERNAME_LENGTH {
        validation.push("Username must be at least 3 characters long");
    }

    if length > MAX_USERNAME_LENGTH {
        validation.push("Username must be no more than 20 characters long");
    }

    let allowed = |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-';
    if username.is_empty() || !username.chars().all(allowed) {
        validation.push("Username can only contain letters, numbers, underscores, and hyphens");
    }

    let boundary = |c: char| c == '_' || c == '-';
    if username.starts_with(boundary) || username.ends_with(boundary) {
        validation.push("Username cannot start or end with underscore or hyphen");
    }

    validation
}

/// Returns the mismatch message when the confirmation differs from the password.
#[must_use]
pub fn validate_password_confirmation(password: &str, confirm_password: &str) -> Option<String> {
    if password == confirm_password {
        None
    } else {
        Some("Passwords do not match".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_accepts_simple_addresses() {
        assert!(validate_email("demo@legaleyes.com"));
        assert!(validate_email("a.b+tag@sub.example.org"));
    }

    #[test]
    fn email_rejects_malformed_addresses() {
        for email in ["", "demo", "demo@", "@legaleyes.com", "demo@legaleyes", "de mo@x.com"] {
            assert!(!validate_email(email), "{email} should be rejected");
        }
    }

    #[test]
    fn short_passwords_report_length() {
        for password in ["", "a", "Ab1!", "Abcde1!"] {
            let validation = validate_password(password);
            assert!(!validation.is_valid());
            assert!(validation
                .errors
                .contains(&"Password must be at least 8 characters long".to_string()));
        }
    }

    #[test]
    fn password_reports_every_violation() {
        let validation = validate_password("abc");
        assert_eq!(
            validation.errors,
            vec![
                "Password must be at least 8 characters long",
                "Password must contain at least one uppercase letter",
                "Password must contain at least one number",
                "Password must contain at least one special character (@$!%*?&)",
            ]
        );
        assert_eq!(
            validation.first_error(),
            Some("Password must be at least 8 characters long")
        );
    }

    #[test]
    fn strong_password_is_valid() {
        assert!(validate_password("Str0ng!pass").is_valid());
    }

    #[test]
    fn password_symbol_must_come_from_fixed_set() {
        let validation = validate_password("Str0ngpass#");
        assert_eq!(
            validation.errors,
            vec!["Password must contain at least one special character (@$!%*?&)"]
        );
    }

    #[test]
    fn username_boundary_characters_fail() {
        for username in ["_alice", "alice_", "-alice", "alice-", "-al-"] {
            let validation = validate_username(username);
            assert!(validation
                .errors
                .contains(&"Username cannot start or end with underscore or hyphen".to_string()));
        }
    }

    #[test]
    fn username_accumulates_violations() {
        let validation = validate_username("_");
        assert_eq!(
            validation.errors,
            vec![
                "Username must be at least 3 characters long",
                "Username cannot start or end with underscore or hyphen",
            ]
        );

        let validation = validate_username("this name is far too long");
        assert_eq!(validation.errors.len(), 2);
    }

    #[test]
    fn username_empty_fails_length_and_charset() {
        let validation = validate_username("");
        assert_eq!(
            validation.errors,
            vec![
                "Username must be at least 3 characters long",
                "Username can only contain letters, numbers, underscores, and hyphens",
            ]
        );
    }

    #[test]
    fn username_valid_examples() {
        for username in ["bob", "alice_smith", "a-b-c", "User2024"] {
            assert!(validate_username(username).is_valid(), "{username}");
        }
    }

    #[test]
    fn confirmation_mismatch() {
        assert_eq!(validate_password_confirmation("a", "a"), None);
        assert_eq!(
            validate_password_confirmation("a", "b"),
            Some("Passwords do not match".to_string())
        );
    }
}
