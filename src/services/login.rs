//! Login form validation.
//!
//! ERROR HANDLING
//! ==============
//! Invalid credentials are reported as a typed `LoginError` and never touch
//! `AuthState`. There is no credential store: any well-formed email with a
//! long enough password signs the single session in.

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LoginError {
    #[error("email is required")]
    MissingEmail,
    #[error("email address is not valid")]
    InvalidEmail,
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

/// Login form submission.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    /// Remember the email for the next visit.
    pub remember: bool,
}

impl Credentials {
    /// Check the form against the login rules.
    ///
    /// # Errors
    ///
    /// Returns the first rule the submission breaks.
    pub fn validate(&self, min_password_len: usize) -> Result<(), LoginError> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(LoginError::MissingEmail);
        }
        if !is_plausible_email(email) {
            return Err(LoginError::InvalidEmail);
        }
        if self.password.chars().count() < min_password_len {
            return Err(LoginError::PasswordTooShort { min: min_password_len });
        }
        Ok(())
    }

    #[must_use]
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_ascii_lowercase()
    }
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}

#[cfg(test)]
#[path = "login_test.rs"]
mod tests;
