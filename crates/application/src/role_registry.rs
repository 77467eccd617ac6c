use std::sync::Arc;

use rolegate_core::{AppError, AppResult};
use rolegate_domain::Role;
use tracing::info;

use crate::RoleRepository;

/// Owns the set of known roles and enforces name uniqueness.
#[derive(Clone)]
pub struct RoleRegistry {
    repository: Arc<dyn RoleRepository>,
}

impl RoleRegistry {
    /// Creates a registry backed by the given repository.
    #[must_use]
    pub fn new(repository: Arc<dyn RoleRepository>) -> Self {
        Self { repository }
    }

    /// Registers a new role with an empty permission set.
    pub async fn create(&self, name: &str) -> AppResult<Role> {
        let role = Role::new(name)?;

        if self.repository.find_role(role.name()).await?.is_some() {
            return Err(AppError::DuplicateName(format!(
                "role '{}' already exists",
                role.name()
            )));
        }

        self.repository.save_role(role.clone()).await?;
        info!(role = %role.name(), role_id = %role.id(), "role created");

        Ok(role)
    }

    /// Finds a role by name.
    pub async fn find(&self, name: &str) -> AppResult<Role> {
        self.repository
            .find_role(name.trim())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("role '{name}' was not found")))
    }

    /// Returns every registered role ordered by name.
    pub async fn all(&self) -> AppResult<Vec<Role>> {
        let mut roles = self.repository.list_roles().await?;
        roles.sort();
        Ok(roles)
    }
}
