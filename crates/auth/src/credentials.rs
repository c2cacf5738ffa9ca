//! Login credential validation (shape only, no storage access).

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialsError {
    #[error("email and password are required")]
    MissingField,

    #[error("invalid email format")]
    InvalidEmail,
}

/// A syntactically valid login attempt.
///
/// Whether the credentials actually match a user is the store's business;
/// this type only guarantees the input is worth a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    pub fn new(email: &str, password: &str) -> Result<Self, CredentialsError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(CredentialsError::MissingField);
        }
        if !is_plausible_email(email) {
            return Err(CredentialsError::InvalidEmail);
        }
        Ok(Self {
            email: email.to_string(),
            password: password.to_string(),
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

/// Cheap structural check: exactly one `@`, non-empty local part, and a
/// domain containing a dot. Deliverability is not our problem.
fn is_plausible_email(email: &str) -> bool {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_normal_emails() {
        for email in ["alex@tecmade.com", "a.b@sub.example.org", "x@y.ar"] {
            assert!(Credentials::new(email, "secret").is_ok(), "{email}");
        }
    }

    #[test]
    fn rejects_malformed_emails() {
        for email in ["", "plain", "@x.com", "a@", "a@b", "a@@b.com", "a@.com", "a@com."] {
            let err = Credentials::new(email, "secret").unwrap_err();
            assert!(
                matches!(err, CredentialsError::InvalidEmail | CredentialsError::MissingField),
                "{email}"
            );
        }
    }

    #[test]
    fn rejects_empty_password() {
        assert_eq!(
            Credentials::new("alex@tecmade.com", "").unwrap_err(),
            CredentialsError::MissingField
        );
    }

    #[test]
    fn email_is_trimmed() {
        let c = Credentials::new("  alex@tecmade.com  ", "secret").unwrap();
        assert_eq!(c.email(), "alex@tecmade.com");
    }
}
