//! User domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::users_errors::UserError;

/// A registered account. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Registration form as submitted.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct UserRegistration {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl UserRegistration {
    /// Checks the fields that must hold before the password is hashed.
    pub fn validate(&self) -> Result<(), UserError> {
        if self.username.trim().is_empty() {
            return Err(UserError::Invalid("Username is required".to_string()));
        }
        let email = self.email.trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => return Err(UserError::Invalid("Email is not valid".to_string())),
        }
        if self.password.is_empty() {
            return Err(UserError::Invalid("Password is required".to_string()));
        }
        Ok(())
    }
}

/// Input model for storing a new user
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Emails are compared case-insensitively.
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(username: &str, email: &str, password: &str) -> UserRegistration {
        UserRegistration {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn accepts_complete_registration() {
        assert!(registration("ada", "ada@example.com", "pw").validate().is_ok());
    }

    #[test]
    fn rejects_missing_fields() {
        assert!(registration(" ", "ada@example.com", "pw").validate().is_err());
        assert!(registration("ada", "ada@example.com", "").validate().is_err());
    }

    #[test]
    fn rejects_implausible_email() {
        for email in ["", "ada", "@example.com", "ada@"] {
            assert!(
                registration("ada", email, "pw").validate().is_err(),
                "{email} should be rejected"
            );
        }
    }

    #[test]
    fn password_hash_is_not_serialized() {
        let user = User {
            id: "u1".to_string(),
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "secret".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret"));
        assert!(json.contains("createdAt"));
    }

    #[test]
    fn email_is_normalized() {
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
    }
}
