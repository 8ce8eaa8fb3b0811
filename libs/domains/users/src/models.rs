use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{UserError, UserResult};

/// Identifier assigned by the repository, starting at 1
pub type UserId = u64;

/// Minimum username length, in characters
pub const MIN_USERNAME_LEN: usize = 3;

pub(crate) const MISSING_FIELDS_MESSAGE: &str = "username and email fields are required";

/// local-part `@` domain `.` TLD of two or more letters
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is a valid regex")
});

/// A directory entry.
///
/// The only way to obtain a `User` is [`User::new`], which validates every
/// field, so a value of this type is always valid. Fields are read-only;
/// changes go through [`User::with_changes`], which builds a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct User {
    #[serde(rename = "user_id")]
    #[schema(example = 1)]
    id: UserId,
    #[schema(example = "testuser")]
    username: String,
    #[schema(example = "test@example.com")]
    email: String,
    created_at: DateTime<Utc>,
}

impl User {
    /// Validate and build a user. `created_at` defaults to now.
    ///
    /// Checks run in order (id, username, email) and the first failure is
    /// returned as [`UserError::Validation`].
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        email: impl Into<String>,
        created_at: Option<DateTime<Utc>>,
    ) -> UserResult<Self> {
        let username = username.into();
        let email = email.into();

        if id == 0 {
            return Err(UserError::Validation(
                "user_id must be a positive integer".to_string(),
            ));
        }

        if username.chars().count() < MIN_USERNAME_LEN {
            return Err(UserError::Validation(format!(
                "username must be at least {} characters long",
                MIN_USERNAME_LEN
            )));
        }

        if !is_valid_email(&email) {
            return Err(UserError::Validation("invalid email address".to_string()));
        }

        Ok(Self {
            id,
            username,
            email,
            created_at: created_at.unwrap_or_else(Utc::now),
        })
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Build the replacement for this record: same id and `created_at`,
    /// each field taken from `update` when it carries a non-empty value.
    /// `self` is untouched whether or not the replacement validates.
    pub fn with_changes(&self, update: &UpdateUser) -> UserResult<Self> {
        User::new(
            self.id,
            update.username().unwrap_or(self.username.as_str()),
            update.email().unwrap_or(self.email.as_str()),
            Some(self.created_at),
        )
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User(id={}, username='{}')", self.id, self.username)
    }
}

/// Whether `email` has the `local@domain.tld` shape accepted by the directory.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// DTO for creating a new user
///
/// Both fields are optional at the JSON level so that a missing field is
/// reported by [`CreateUser::into_parts`] rather than as a decoding error.
/// Field rules live in [`User::new`], so there is nothing to `Validate` here.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[schema(example = "testuser")]
    pub username: Option<String>,
    #[schema(example = "test@example.com")]
    pub email: Option<String>,
}

impl CreateUser {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            email: Some(email.into()),
        }
    }

    /// Split into `(username, email)`, failing if either is absent or empty.
    pub fn into_parts(self) -> UserResult<(String, String)> {
        match (self.username, self.email) {
            (Some(username), Some(email)) if !username.is_empty() && !email.is_empty() => {
                Ok((username, email))
            }
            _ => Err(UserError::Validation(MISSING_FIELDS_MESSAGE.to_string())),
        }
    }
}

/// DTO for updating an existing user.
///
/// Absent, null and empty-string fields keep their current value, so a body
/// naming no field is a valid no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[schema(example = "newname")]
    pub username: Option<String>,
    #[schema(example = "new@example.com")]
    pub email: Option<String>,
}

impl UpdateUser {
    /// New username, if one was given
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref().filter(|s| !s.is_empty())
    }

    /// New email, if one was given
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_valid_user() {
        let user = User::new(1, "testuser", "test@example.com", None).unwrap();
        assert_eq!(user.id(), 1);
        assert_eq!(user.username(), "testuser");
        assert_eq!(user.email(), "test@example.com");
        assert!(user.created_at() <= Utc::now());
    }

    #[test]
    fn test_zero_id_is_rejected() {
        let err = User::new(0, "testuser", "test@example.com", None).unwrap_err();
        assert!(matches!(err, UserError::Validation(_)));
        assert!(err.to_string().contains("positive integer"));
    }

    #[test]
    fn test_short_or_empty_username_is_rejected() {
        for username in ["", "ab"] {
            let err = User::new(1, username, "test@example.com", None).unwrap_err();
            assert!(err.to_string().contains("at least 3 characters"));
        }
        assert!(User::new(1, "abc", "test@example.com", None).is_ok());
    }

    #[test]
    fn test_username_length_counts_characters_not_bytes() {
        // two characters, four bytes
        assert!(User::new(1, "жж", "test@example.com", None).is_err());
        assert!(User::new(1, "жжж", "test@example.com", None).is_ok());
    }

    #[test]
    fn test_invalid_emails_are_rejected() {
        for email in [
            "invalid-email",
            "@example.com",
            "user@",
            "user@example",
            "user@example.c",
            "user example@example.com",
            "user@example.com\n",
        ] {
            let err = User::new(1, "testuser", email, None).unwrap_err();
            assert_eq!(err.to_string(), "invalid email address", "email: {email:?}");
        }
    }

    #[test]
    fn test_accepts_common_email_shapes() {
        for email in [
            "a.b-c_d%e+f@sub.example.co",
            "USER@EXAMPLE.ORG",
            "x@y.io",
        ] {
            assert!(is_valid_email(email), "email: {email}");
        }
    }

    #[test]
    fn test_id_is_checked_before_username_and_email() {
        let err = User::new(0, "x", "bad", None).unwrap_err();
        assert!(err.to_string().contains("positive integer"));
    }

    #[test]
    fn test_serializes_with_user_id_key() {
        let created_at = "2024-01-02T03:04:05Z".parse::<DateTime<Utc>>().unwrap();
        let user = User::new(1, "testuser", "test@example.com", Some(created_at)).unwrap();

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "user_id": 1,
                "username": "testuser",
                "email": "test@example.com",
                "created_at": "2024-01-02T03:04:05Z"
            })
        );
    }

    #[test]
    fn test_display_label() {
        let user = User::new(1, "test", "test@example.com", None).unwrap();
        assert_eq!(user.to_string(), "User(id=1, username='test')");
    }

    #[test]
    fn test_with_changes_keeps_identity_and_unspecified_fields() {
        let user = User::new(7, "original", "orig@example.com", None).unwrap();
        let update = UpdateUser {
            username: Some("renamed".to_string()),
            email: None,
        };

        let replacement = user.with_changes(&update).unwrap();
        assert_eq!(replacement.id(), 7);
        assert_eq!(replacement.username(), "renamed");
        assert_eq!(replacement.email(), "orig@example.com");
        assert_eq!(replacement.created_at(), user.created_at());
    }

    #[test]
    fn test_with_changes_validates_replacement() {
        let user = User::new(7, "original", "orig@example.com", None).unwrap();
        let update = UpdateUser {
            username: None,
            email: Some("not-an-email".to_string()),
        };

        assert!(user.with_changes(&update).is_err());
        assert_eq!(user.email(), "orig@example.com");
    }

    #[test]
    fn test_create_user_into_parts() {
        let (username, email) = CreateUser::new("testuser", "test@example.com")
            .into_parts()
            .unwrap();
        assert_eq!(username, "testuser");
        assert_eq!(email, "test@example.com");

        let missing = CreateUser {
            username: Some("test".to_string()),
            email: None,
        };
        assert!(missing.into_parts().is_err());

        let empty = CreateUser::new("", "test@example.com");
        assert!(empty.into_parts().is_err());
    }

    #[test]
    fn test_create_user_missing_field_message() {
        let err = CreateUser {
            username: None,
            email: Some("test@example.com".to_string()),
        }
        .into_parts()
        .unwrap_err();
        assert_eq!(err.to_string(), "username and email fields are required");
    }

    #[test]
    fn test_with_changes_ignores_empty_strings() {
        let user = User::new(7, "original", "orig@example.com", None).unwrap();
        let update = UpdateUser {
            username: Some(String::new()),
            email: Some(String::new()),
        };

        assert_eq!(update.username(), None);
        assert_eq!(update.email(), None);
        assert_eq!(user.with_changes(&update).unwrap(), user);
    }

    #[test]
    fn test_with_changes_without_fields_is_identity() {
        let user = User::new(7, "original", "orig@example.com", None).unwrap();
        assert_eq!(user.with_changes(&UpdateUser::default()).unwrap(), user);
    }
}
