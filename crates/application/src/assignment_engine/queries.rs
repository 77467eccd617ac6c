use std::collections::BTreeSet;

use rolegate_core::{AppError, AppResult};
use rolegate_domain::{PermissionId, Principal, PrincipalId};

use crate::RoleAssignment;

use super::AssignmentEngine;

impl AssignmentEngine {
    /// Returns whether any role assigned to the principal grants the permission.
    ///
    /// A principal without roles, or an unknown permission name, yields `false`.
    pub async fn has_permission(
        &self,
        principal: &impl Principal,
        permission_name: &str,
    ) -> AppResult<bool> {
        let permission = match self.catalog.find(permission_name).await {
            Ok(permission) => permission,
            Err(AppError::NotFound(_)) => return Ok(false),
            Err(error) => return Err(error),
        };

        let granted = self
            .effective_permission_ids(principal.principal_id())
            .await?;

        Ok(granted.contains(&permission.id()))
    }

    /// Fails with `AppError::Forbidden` unless the principal holds the permission.
    pub async fn require_permission(
        &self,
        principal: &impl Principal,
        permission_name: &str,
    ) -> AppResult<()> {
        if self.has_permission(principal, permission_name).await? {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "principal '{}' is missing permission '{}'",
            principal.principal_id(),
            permission_name.trim()
        )))
    }

    /// Returns the union of permission names across the principal's roles.
    pub async fn effective_permissions(
        &self,
        principal: &impl Principal,
    ) -> AppResult<BTreeSet<String>> {
        let granted = self
            .effective_permission_ids(principal.principal_id())
            .await?;
        if granted.is_empty() {
            return Ok(BTreeSet::new());
        }

        Ok(self
            .catalog
            .all()
            .await?
            .into_iter()
            .filter(|permission| granted.contains(&permission.id()))
            .map(|permission| permission.name().to_owned())
            .collect())
    }

    /// Returns the permission names bound to a role.
    pub async fn role_permissions(&self, role_name: &str) -> AppResult<BTreeSet<String>> {
        let role = self.registry.find(role_name).await?;
        let bound: BTreeSet<PermissionId> = self
            .repository
            .list_role_permissions(role.id())
            .await?
            .into_iter()
            .collect();

        Ok(self
            .catalog
            .all()
            .await?
            .into_iter()
            .filter(|permission| bound.contains(&permission.id()))
            .map(|permission| permission.name().to_owned())
            .collect())
    }

    /// Returns the names of roles assigned to the principal.
    pub async fn principal_roles(&self, principal: &impl Principal) -> AppResult<BTreeSet<String>> {
        let assigned = self
            .repository
            .list_principal_roles(principal.principal_id())
            .await?;
        if assigned.is_empty() {
            return Ok(BTreeSet::new());
        }

        Ok(self
            .registry
            .all()
            .await?
            .into_iter()
            .filter(|role| assigned.contains(&role.id()))
            .map(|role| role.name().to_owned())
            .collect())
    }

    /// Lists every principal-role binding.
    pub async fn list_role_assignments(&self) -> AppResult<Vec<RoleAssignment>> {
        self.repository.list_role_assignments().await
    }

    async fn effective_permission_ids(
        &self,
        principal_id: PrincipalId,
    ) -> AppResult<BTreeSet<PermissionId>> {
        let mut granted = BTreeSet::new();
        for role_id in self.repository.list_principal_roles(principal_id).await? {
            granted.extend(self.repository.list_role_permissions(role_id).await?);
        }

        Ok(granted)
    }
}
