use std::collections::BTreeSet;
use std::sync::Arc;

use rolegate_core::{AppError, AppResult};
use rolegate_domain::Permission;
use tracing::info;

use crate::PermissionRepository;

/// Owns the set of known permissions and enforces name uniqueness.
#[derive(Clone)]
pub struct PermissionCatalog {
    repository: Arc<dyn PermissionRepository>,
}

impl PermissionCatalog {
    /// Creates a catalog backed by the given repository.
    #[must_use]
    pub fn new(repository: Arc<dyn PermissionRepository>) -> Self {
        Self { repository }
    }

    /// Registers a new permission.
    pub async fn create(&self, name: &str) -> AppResult<Permission> {
        let permission = Permission::new(name)?;

        if self.repository.find_permission(permission.name()).await?.is_some() {
            return Err(duplicate(permission.name()));
        }

        self.repository.save_permission(permission.clone()).await?;
        info!(
            permission = %permission.name(),
            permission_id = %permission.id(),
            "permission created"
        );

        Ok(permission)
    }

    /// Returns a snapshot of every registered permission.
    pub async fn all(&self) -> AppResult<BTreeSet<Permission>> {
        Ok(self
            .repository
            .list_permissions()
            .await?
            .into_iter()
            .collect())
    }

    /// Finds a permission by name.
    pub async fn find(&self, name: &str) -> AppResult<Permission> {
        self.repository
            .find_permission(name.trim())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("permission '{name}' was not found")))
    }

    /// Resolves several permission names, failing on the first unknown one.
    pub async fn find_many<S: AsRef<str>>(&self, names: &[S]) -> AppResult<Vec<Permission>> {
        let mut permissions = Vec::with_capacity(names.len());
        for name in names {
            permissions.push(self.find(name.as_ref()).await?);
        }

        Ok(permissions)
    }
}

fn duplicate(name: &str) -> AppError {
    AppError::DuplicateName(format!("permission '{name}' already exists"))
}
