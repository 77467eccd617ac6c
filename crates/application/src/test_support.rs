use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rolegate_core::{AppError, AppResult};
use rolegate_domain::{Permission, PermissionId, PrincipalId, Role, RoleId, User};
use tokio::sync::Mutex;

use crate::{
    AssignmentEngine, AssignmentRepository, PermissionCatalog, PermissionRepository,
    RoleAssignment, RoleRegistry, RoleRepository, UserRepository,
};

#[derive(Default)]
pub(crate) struct FakeAuthorizationStore {
    permissions: Mutex<BTreeMap<String, Permission>>,
    roles: Mutex<BTreeMap<String, Role>>,
    role_permissions: Mutex<BTreeSet<(RoleId, PermissionId)>>,
    principal_roles: Mutex<Vec<RoleAssignment>>,
    users: Mutex<BTreeMap<String, User>>,
}

#[async_trait]
impl PermissionRepository for FakeAuthorizationStore {
    async fn save_permission(&self, permission: Permission) -> AppResult<()> {
        let mut permissions = self.permissions.lock().await;
        if permissions.contains_key(permission.name()) {
            return Err(AppError::DuplicateName(permission.name().to_owned()));
        }
        permissions.insert(permission.name().to_owned(), permission);
        Ok(())
    }

    async fn find_permission(&self, name: &str) -> AppResult<Option<Permission>> {
        Ok(self.permissions.lock().await.get(name).cloned())
    }

    async fn list_permissions(&self) -> AppResult<Vec<Permission>> {
        Ok(self.permissions.lock().await.values().cloned().collect())
    }
}

#[async_trait]
impl RoleRepository for FakeAuthorizationStore {
    async fn save_role(&self, role: Role) -> AppResult<()> {
        let mut roles = self.roles.lock().await;
        if roles.contains_key(role.name()) {
            return Err(AppError::DuplicateName(role.name().to_owned()));
        }
        roles.insert(role.name().to_owned(), role);
        Ok(())
    }

    async fn find_role(&self, name: &str) -> AppResult<Option<Role>> {
        Ok(self.roles.lock().await.get(name).cloned())
    }

    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        Ok(self.roles.lock().await.values().cloned().collect())
    }
}

#[async_trait]
impl AssignmentRepository for FakeAuthorizationStore {
    async fn bind_permissions(
        &self,
        role_id: RoleId,
        permission_ids: &[PermissionId],
    ) -> AppResult<usize> {
        let mut bindings = self.role_permissions.lock().await;
        Ok(permission_ids
            .iter()
            .filter(|permission_id| bindings.insert((role_id, **permission_id)))
            .count())
    }

    async fn list_role_permissions(&self, role_id: RoleId) -> AppResult<Vec<PermissionId>> {
        Ok(self
            .role_permissions
            .lock()
            .await
            .iter()
            .filter_map(|(bound_role, permission_id)| {
                (bound_role == &role_id).then_some(*permission_id)
            })
            .collect())
    }

    async fn bind_role(&self, principal_id: PrincipalId, role_id: RoleId) -> AppResult<bool> {
        let mut assignments = self.principal_roles.lock().await;
        if assignments
            .iter()
            .any(|entry| entry.principal_id == principal_id && entry.role_id == role_id)
        {
            return Ok(false);
        }
        assignments.push(RoleAssignment {
            principal_id,
            role_id,
            assigned_at: Utc::now(),
        });
        Ok(true)
    }

    async fn list_principal_roles(&self, principal_id: PrincipalId) -> AppResult<Vec<RoleId>> {
        Ok(self
            .principal_roles
            .lock()
            .await
            .iter()
            .filter_map(|entry| (entry.principal_id == principal_id).then_some(entry.role_id))
            .collect())
    }

    async fn list_role_assignments(&self) -> AppResult<Vec<RoleAssignment>> {
        Ok(self.principal_roles.lock().await.clone())
    }
}

#[async_trait]
impl UserRepository for FakeAuthorizationStore {
    async fn save_user(&self, user: User) -> AppResult<()> {
        let mut users = self.users.lock().await;
        let email = user.email().as_str().to_owned();
        if users.contains_key(&email) {
            return Err(AppError::DuplicateName(email));
        }
        users.insert(email, user);
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.users.lock().await.get(email).cloned())
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        Ok(self.users.lock().await.values().cloned().collect())
    }
}

pub(crate) struct Services {
    pub store: Arc<FakeAuthorizationStore>,
    pub catalog: PermissionCatalog,
    pub registry: RoleRegistry,
    pub engine: AssignmentEngine,
}

pub(crate) fn services() -> Services {
    let store = Arc::new(FakeAuthorizationStore::default());
    let catalog = PermissionCatalog::new(store.clone());
    let registry = RoleRegistry::new(store.clone());
    let engine = AssignmentEngine::new(catalog.clone(), registry.clone(), store.clone());

    Services {
        store,
        catalog,
        registry,
        engine,
    }
}
