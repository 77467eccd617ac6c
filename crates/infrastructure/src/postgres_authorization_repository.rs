use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::debug;

use rolegate_application::{
    AssignmentRepository, PermissionRepository, RoleAssignment, RoleRepository,
};
use rolegate_core::{AppError, AppResult};
use rolegate_domain::{Permission, PermissionId, PrincipalId, Role, RoleId};

/// PostgreSQL-backed store for permissions, roles and their bindings.
#[derive(Clone)]
pub struct PostgresAuthorizationRepository {
    pool: PgPool,
}

impl PostgresAuthorizationRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NamedRow {
    id: uuid::Uuid,
    name: String,
}

#[derive(Debug, FromRow)]
struct RoleAssignmentRow {
    principal_id: uuid::Uuid,
    role_id: uuid::Uuid,
    assigned_at: DateTime<Utc>,
}

#[async_trait]
impl PermissionRepository for PostgresAuthorizationRepository {
    async fn save_permission(&self, permission: Permission) -> AppResult<()> {
        self.save_permission_impl(permission).await
    }

    async fn find_permission(&self, name: &str) -> AppResult<Option<Permission>> {
        self.find_permission_impl(name).await
    }

    async fn list_permissions(&self) -> AppResult<Vec<Permission>> {
        self.list_permissions_impl().await
    }
}

#[async_trait]
impl RoleRepository for PostgresAuthorizationRepository {
    async fn save_role(&self, role: Role) -> AppResult<()> {
        self.save_role_impl(role).await
    }

    async fn find_role(&self, name: &str) -> AppResult<Option<Role>> {
        self.find_role_impl(name).await
    }

    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        self.list_roles_impl().await
    }
}

#[async_trait]
impl AssignmentRepository for PostgresAuthorizationRepository {
    async fn bind_permissions(
        &self,
        role_id: RoleId,
        permission_ids: &[PermissionId],
    ) -> AppResult<usize> {
        self.bind_permissions_impl(role_id, permission_ids).await
    }

    async fn list_role_permissions(&self, role_id: RoleId) -> AppResult<Vec<PermissionId>> {
        self.list_role_permissions_impl(role_id).await
    }

    async fn bind_role(&self, principal_id: PrincipalId, role_id: RoleId) -> AppResult<bool> {
        self.bind_role_impl(principal_id, role_id).await
    }

    async fn list_principal_roles(&self, principal_id: PrincipalId) -> AppResult<Vec<RoleId>> {
        self.list_principal_roles_impl(principal_id).await
    }

    async fn list_role_assignments(&self) -> AppResult<Vec<RoleAssignment>> {
        self.list_role_assignments_impl().await
    }
}

/// Maps a unique violation to `DuplicateName`, anything else to `Internal`.
pub(crate) fn map_unique_violation(error: sqlx::Error, kind: &str, name: &str) -> AppError {
    if let sqlx::Error::Database(database_error) = &error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::DuplicateName(format!("{kind} '{name}' already exists"));
    }

    AppError::Internal(format!("failed to create {kind}: {error}"))
}

mod assignments;
mod permissions;
mod roles;
