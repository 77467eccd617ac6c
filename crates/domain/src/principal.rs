use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of an entity that can hold roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PrincipalId(Uuid);

impl PrincipalId {
    /// Creates a new random principal identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a principal identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PrincipalId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PrincipalId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Capability of being assigned roles.
///
/// Only the identifier is exposed; role bindings are stored apart from the
/// entity implementing this trait.
pub trait Principal {
    /// Returns the identifier role bindings are keyed by.
    fn principal_id(&self) -> PrincipalId;
}

impl Principal for PrincipalId {
    fn principal_id(&self) -> PrincipalId {
        *self
    }
}

impl<T: Principal + ?Sized> Principal for &T {
    fn principal_id(&self) -> PrincipalId {
        (**self).principal_id()
    }
}
