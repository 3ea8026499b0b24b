//! Sign-up form model.
//!
//! Every field reports at most one message: the "required" message wins over
//! format messages, which come from the `validator` rules on the struct.

use serde::Deserialize;
use validator::Validate;

use crate::errors::FieldErrors;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct SignUpForm {
    pub name: String,
    #[validate(email(message = "Invalid e-mail"))]
    pub email: String,
    #[validate(length(min = 6, message = "Minimum 6 characters"))]
    pub password: String,
}

impl SignUpForm {
    pub fn check(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.name.trim().is_empty() {
            errors.insert("name".to_string(), "Name is required".to_string());
        }
        if self.email.trim().is_empty() {
            errors.insert("email".to_string(), "E-mail is required".to_string());
        }
        if self.password.is_empty() {
            errors.insert("password".to_string(), "Password is required".to_string());
        }

        if let Err(report) = self.validate() {
            for (field, field_errors) in report.field_errors() {
                let field: &str = &field;
                if errors.contains_key(field) {
                    continue;
                }
                let message = field_errors
                    .iter()
                    .find_map(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid {field}"));
                errors.insert(field.to_string(), message);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Runs `on_submit` once if the form is valid; otherwise returns the
    /// field messages without calling it.
    pub fn submit<F, R>(&self, on_submit: F) -> Result<R, FieldErrors>
    where
        F: FnOnce(&SignUpForm) -> R,
    {
        self.check()?;
        Ok(on_submit(self))
    }
}
