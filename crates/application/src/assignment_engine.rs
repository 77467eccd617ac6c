use std::sync::Arc;

use crate::{AssignmentRepository, PermissionCatalog, RoleRegistry};

/// Binds permissions to roles and roles to principals, and answers
/// authorization queries over those bindings.
///
/// Roles and permissions are always resolved through their registries
/// before a binding is written, so bindings only ever reference entities
/// that exist.
#[derive(Clone)]
pub struct AssignmentEngine {
    catalog: PermissionCatalog,
    registry: RoleRegistry,
    repository: Arc<dyn AssignmentRepository>,
}

impl AssignmentEngine {
    /// Creates an engine over the given catalog, registry and binding store.
    #[must_use]
    pub fn new(
        catalog: PermissionCatalog,
        registry: RoleRegistry,
        repository: Arc<dyn AssignmentRepository>,
    ) -> Self {
        Self {
            catalog,
            registry,
            repository,
        }
    }
}

mod bindings;
mod queries;

#[cfg(test)]
mod tests;
