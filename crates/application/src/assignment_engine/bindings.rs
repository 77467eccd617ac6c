use rolegate_core::{AppError, AppResult};
use rolegate_domain::{Permission, PermissionId, Principal, Role};
use tracing::{debug, info};

use super::AssignmentEngine;

impl AssignmentEngine {
    /// Adds permissions to a role's binding set.
    ///
    /// Re-adding an already bound permission is a no-op. The role and every
    /// permission must be registered; nothing is bound otherwise.
    pub async fn give_permission(&self, role: &Role, permissions: &[Permission]) -> AppResult<()> {
        let role = self.registered_role(role).await?;

        let mut permission_ids: Vec<PermissionId> = Vec::with_capacity(permissions.len());
        for permission in permissions {
            let registered = self.catalog.find(permission.name()).await?;
            if registered.id() != permission.id() {
                return Err(AppError::NotFound(format!(
                    "permission '{}' with id '{}' is not registered",
                    permission.name(),
                    permission.id()
                )));
            }
            permission_ids.push(registered.id());
        }
        permission_ids.sort();
        permission_ids.dedup();

        let added = self
            .repository
            .bind_permissions(role.id(), permission_ids.as_slice())
            .await?;

        if added == 0 {
            debug!(role = %role.name(), "permissions already bound to role");
        } else {
            info!(
                role = %role.name(),
                added,
                requested = permission_ids.len(),
                "permissions granted to role"
            );
        }

        Ok(())
    }

    /// Adds permissions to a role's binding set by permission name.
    pub async fn give_permission_by_name<S: AsRef<str>>(
        &self,
        role: &Role,
        permission_names: &[S],
    ) -> AppResult<()> {
        let permissions = self.catalog.find_many(permission_names).await?;
        self.give_permission(role, permissions.as_slice()).await
    }

    /// Assigns a role to a principal.
    ///
    /// Fails with `AppError::NotFound` for an unknown role, leaving the
    /// principal's roles untouched. Assigning a held role is a no-op.
    pub async fn assign_role(&self, principal: &impl Principal, role_name: &str) -> AppResult<()> {
        let principal_id = principal.principal_id();
        let role = self.registry.find(role_name).await?;

        if self.repository.bind_role(principal_id, role.id()).await? {
            info!(principal = %principal_id, role = %role.name(), "role assigned");
        } else {
            debug!(principal = %principal_id, role = %role.name(), "role already assigned");
        }

        Ok(())
    }

    async fn registered_role(&self, role: &Role) -> AppResult<Role> {
        let registered = self.registry.find(role.name()).await?;
        if registered.id() != role.id() {
            return Err(AppError::NotFound(format!(
                "role '{}' with id '{}' is not registered",
                role.name(),
                role.id()
            )));
        }

        Ok(registered)
    }
}
