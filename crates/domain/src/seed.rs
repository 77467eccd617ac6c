//! Vocabulary created by the authorization bootstrap.

use serde::{Deserialize, Serialize};

/// Permissions created by the bootstrap procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultPermission {
    /// Allows listing and reading user records.
    ViewUsers,
    /// Allows creating user records.
    CreateUsers,
    /// Allows editing user records.
    EditUsers,
    /// Allows deleting user records.
    DeleteUsers,
    /// Allows locking a user account.
    LockUser,
}

impl DefaultPermission {
    /// Returns the stable permission name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ViewUsers => "view users",
            Self::CreateUsers => "create users",
            Self::EditUsers => "edit users",
            Self::DeleteUsers => "delete users",
            Self::LockUser => "lock user",
        }
    }

    /// Returns all default permissions in creation order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[DefaultPermission] = &[
            DefaultPermission::ViewUsers,
            DefaultPermission::CreateUsers,
            DefaultPermission::EditUsers,
            DefaultPermission::DeleteUsers,
            DefaultPermission::LockUser,
        ];

        ALL
    }
}

/// Roles created by the bootstrap procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultRole {
    /// Holds every default permission.
    Admin,
    /// May only view users.
    Manager,
    /// Holds no permissions by default.
    Employee,
}

impl DefaultRole {
    /// Returns the stable role name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Employee => "employee",
        }
    }

    /// Returns all default roles in creation order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[DefaultRole] = &[
            DefaultRole::Admin,
            DefaultRole::Manager,
            DefaultRole::Employee,
        ];

        ALL
    }

    /// Returns the permissions granted to this role at bootstrap.
    #[must_use]
    pub fn default_permissions(&self) -> &'static [DefaultPermission] {
        match self {
            Self::Admin => DefaultPermission::all(),
            Self::Manager => &[DefaultPermission::ViewUsers],
            Self::Employee => &[],
        }
    }
}
