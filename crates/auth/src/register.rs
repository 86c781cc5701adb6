//! Registration input validation.

use serde::Deserialize;

use sweetshop_core::ValidationErrors;

/// Raw registration payload, exactly as posted to `/auth/register`.
///
/// All fields are optional at the wire level so that missing ones surface as
/// per-field validation messages rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Registration {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub password2: Option<String>,
}

/// A registration that passed validation. The password is still plaintext
/// here; hashing happens at the point the account is persisted.
#[derive(Debug, Clone)]
pub struct ValidRegistration {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Registration {
    /// Validate required fields and the password/confirmation pair.
    pub fn validate(self) -> Result<ValidRegistration, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let username = match required(self.username) {
            Some(username) => username,
            None => {
                errors.push("username", "This field is required.");
                String::new()
            }
        };

        let password = match required(self.password) {
            Some(password) => password,
            None => {
                errors.push("password", "This field is required.");
                String::new()
            }
        };

        let password2 = match required(self.password2) {
            Some(password2) => password2,
            None => {
                errors.push("password2", "This field is required.");
                String::new()
            }
        };

        if errors.is_empty() && password != password2 {
            errors.push("password", "Passwords do not match.");
        }

        errors.into_result()?;

        Ok(ValidRegistration {
            username,
            email: self.email.unwrap_or_default(),
            password,
        })
    }
}

fn required(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
