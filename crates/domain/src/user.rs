//! User accounts that act as principals.

use rolegate_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::{Principal, PrincipalId};

/// Maximum accepted email length.
const EMAIL_MAX_LENGTH: usize = 254;

/// Validated, lower-cased email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// Checks structure only: exactly one `@`, non-empty local part and a
    /// domain containing at least one `.`.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let normalized = value.into().trim().to_lowercase();

        if normalized.is_empty() {
            return Err(AppError::Validation(
                "email address must not be empty".to_owned(),
            ));
        }

        if normalized.len() > EMAIL_MAX_LENGTH {
            return Err(AppError::Validation(format!(
                "email address must not exceed {EMAIL_MAX_LENGTH} characters"
            )));
        }

        let Some((local, domain)) = normalized.split_once('@') else {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        };

        if local.is_empty() || domain.contains('@') {
            return Err(AppError::Validation(format!(
                "email address '{normalized}' is malformed"
            )));
        }

        if domain.is_empty() || !domain.contains('.') {
            return Err(AppError::Validation(
                "email domain must contain at least one '.'".to_owned(),
            ));
        }

        Ok(Self(normalized))
    }

    /// Returns the validated email string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// User record that can be assigned roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: PrincipalId,
    display_name: NonEmptyString,
    email: EmailAddress,
}

impl User {
    /// Creates a user with a fresh identifier.
    pub fn new(display_name: impl Into<String>, email: impl Into<String>) -> AppResult<Self> {
        Self::from_parts(PrincipalId::new(), display_name, email)
    }

    /// Rebuilds a user loaded from storage.
    pub fn from_parts(
        id: PrincipalId,
        display_name: impl Into<String>,
        email: impl Into<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            display_name: NonEmptyString::new(display_name)?,
            email: EmailAddress::new(email)?,
        })
    }

    /// Returns the user identifier.
    #[must_use]
    pub fn id(&self) -> PrincipalId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the unique email address.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }
}

impl Principal for User {
    fn principal_id(&self) -> PrincipalId {
        self.id
    }
}
