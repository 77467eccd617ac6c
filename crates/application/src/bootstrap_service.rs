use rolegate_domain::{Permission, Role};

use crate::{AssignmentEngine, PermissionCatalog, RoleRegistry};

const DEFAULT_EMPLOYEE_COUNT: usize = 10;
const DEFAULT_SUPERUSER_NAME: &str = "Test User";
const DEFAULT_SUPERUSER_EMAIL: &str = "test@example.com";

/// Entities created by the role and permission bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    /// Roles in creation order.
    pub roles: Vec<Role>,
    /// Permissions in creation order.
    pub permissions: Vec<Permission>,
}

/// Progress of the role and permission bootstrap in a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedStatus {
    /// No default role or permission exists.
    Empty,
    /// Some defaults exist but roles, permissions or grants are missing.
    Partial,
    /// Every default role, permission and grant exists.
    Complete,
}

/// Shape of the user seed run after the role bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSeedPlan {
    /// Number of users created with the `employee` role.
    pub employee_count: usize,
    /// Display name of the user receiving the `admin` role.
    pub superuser_name: String,
    /// Email of the user receiving the `admin` role.
    pub superuser_email: String,
}

impl Default for UserSeedPlan {
    fn default() -> Self {
        Self {
            employee_count: DEFAULT_EMPLOYEE_COUNT,
            superuser_name: DEFAULT_SUPERUSER_NAME.to_owned(),
            superuser_email: DEFAULT_SUPERUSER_EMAIL.to_owned(),
        }
    }
}

/// One-time authorization bootstrap over explicit service handles.
#[derive(Clone)]
pub struct AuthorizationBootstrap {
    catalog: PermissionCatalog,
    registry: RoleRegistry,
    engine: AssignmentEngine,
}

impl AuthorizationBootstrap {
    /// Creates a bootstrap procedure over the given services.
    #[must_use]
    pub fn new(
        catalog: PermissionCatalog,
        registry: RoleRegistry,
        engine: AssignmentEngine,
    ) -> Self {
        Self {
            catalog,
            registry,
            engine,
        }
    }
}

mod roles;
mod users;
