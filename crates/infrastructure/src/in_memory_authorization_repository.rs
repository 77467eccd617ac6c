use std::collections::{BTreeMap, BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rolegate_application::{
    AssignmentRepository, PermissionRepository, RoleAssignment, RoleRepository,
};
use rolegate_core::{AppError, AppResult};
use rolegate_domain::{Permission, PermissionId, PrincipalId, Role, RoleId};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
struct BindingTables {
    role_permissions: HashMap<RoleId, BTreeSet<PermissionId>>,
    principal_roles: HashMap<PrincipalId, BTreeMap<RoleId, DateTime<Utc>>>,
}

/// In-memory authorization store.
///
/// Permissions, roles and bindings are each guarded by one coarse lock.
#[derive(Debug, Default)]
pub struct InMemoryAuthorizationRepository {
    permissions: RwLock<HashMap<String, Permission>>,
    roles: RwLock<HashMap<String, Role>>,
    bindings: RwLock<BindingTables>,
}

impl InMemoryAuthorizationRepository {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every permission, role and binding.
    pub async fn clear(&self) {
        self.permissions.write().await.clear();
        self.roles.write().await.clear();
        let mut bindings = self.bindings.write().await;
        bindings.role_permissions.clear();
        bindings.principal_roles.clear();
        debug!("in-memory authorization store cleared");
    }
}

#[async_trait]
impl PermissionRepository for InMemoryAuthorizationRepository {
    async fn save_permission(&self, permission: Permission) -> AppResult<()> {
        let mut permissions = self.permissions.write().await;

        if permissions.contains_key(permission.name()) {
            return Err(AppError::DuplicateName(format!(
                "permission '{}' already exists",
                permission.name()
            )));
        }

        permissions.insert(permission.name().to_owned(), permission);
        Ok(())
    }

    async fn find_permission(&self, name: &str) -> AppResult<Option<Permission>> {
        Ok(self.permissions.read().await.get(name).cloned())
    }

    async fn list_permissions(&self) -> AppResult<Vec<Permission>> {
        let mut listed: Vec<Permission> = self.permissions.read().await.values().cloned().collect();
        listed.sort();
        Ok(listed)
    }
}

#[async_trait]
impl RoleRepository for InMemoryAuthorizationRepository {
    async fn save_role(&self, role: Role) -> AppResult<()> {
        let mut roles = self.roles.write().await;

        if roles.contains_key(role.name()) {
            return Err(AppError::DuplicateName(format!(
                "role '{}' already exists",
                role.name()
            )));
        }

        roles.insert(role.name().to_owned(), role);
        Ok(())
    }

    async fn find_role(&self, name: &str) -> AppResult<Option<Role>> {
        Ok(self.roles.read().await.get(name).cloned())
    }

    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        let mut listed: Vec<Role> = self.roles.read().await.values().cloned().collect();
        listed.sort();
        Ok(listed)
    }
}

#[async_trait]
impl AssignmentRepository for InMemoryAuthorizationRepository {
    async fn bind_permissions(
        &self,
        role_id: RoleId,
        permission_ids: &[PermissionId],
    ) -> AppResult<usize> {
        let mut bindings = self.bindings.write().await;
        let bound = bindings.role_permissions.entry(role_id).or_default();

        Ok(permission_ids
            .iter()
            .filter(|permission_id| bound.insert(**permission_id))
            .count())
    }

    async fn list_role_permissions(&self, role_id: RoleId) -> AppResult<Vec<PermissionId>> {
        Ok(self
            .bindings
            .read()
            .await
            .role_permissions
            .get(&role_id)
            .map(|bound| bound.iter().copied().collect())
            .unwrap_or_default())
    }

    async fn bind_role(&self, principal_id: PrincipalId, role_id: RoleId) -> AppResult<bool> {
        let mut bindings = self.bindings.write().await;
        let assigned = bindings.principal_roles.entry(principal_id).or_default();

        if assigned.contains_key(&role_id) {
            return Ok(false);
        }

        assigned.insert(role_id, Utc::now());
        Ok(true)
    }

    async fn list_principal_roles(&self, principal_id: PrincipalId) -> AppResult<Vec<RoleId>> {
        Ok(self
            .bindings
            .read()
            .await
            .principal_roles
            .get(&principal_id)
            .map(|assigned| assigned.keys().copied().collect())
            .unwrap_or_default())
    }

    async fn list_role_assignments(&self) -> AppResult<Vec<RoleAssignment>> {
        let bindings = self.bindings.read().await;
        let mut listed: Vec<RoleAssignment> = bindings
            .principal_roles
            .iter()
            .flat_map(|(principal_id, assigned)| {
                assigned.iter().map(|(role_id, assigned_at)| RoleAssignment {
                    principal_id: *principal_id,
                    role_id: *role_id,
                    assigned_at: *assigned_at,
                })
            })
            .collect();
        listed.sort_by(|left, right| {
            left.assigned_at
                .cmp(&right.assigned_at)
                .then(left.principal_id.cmp(&right.principal_id))
                .then(left.role_id.cmp(&right.role_id))
        });

        Ok(listed)
    }
}
