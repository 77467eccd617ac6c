use async_trait::async_trait;

use rolegate_core::AppResult;
use rolegate_domain::{Permission, PermissionId, PrincipalId, Role, RoleId, User};

use super::assignments::RoleAssignment;

/// Repository port for the permission catalog.
#[async_trait]
pub trait PermissionRepository: Send + Sync {
    /// Persists a new permission.
    ///
    /// Fails with `AppError::DuplicateName` when the name is already taken.
    async fn save_permission(&self, permission: Permission) -> AppResult<()>;

    /// Finds a permission by its unique name.
    async fn find_permission(&self, name: &str) -> AppResult<Option<Permission>>;

    /// Lists every registered permission ordered by name.
    async fn list_permissions(&self) -> AppResult<Vec<Permission>>;
}

/// Repository port for the role registry.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Persists a new role.
    ///
    /// Fails with `AppError::DuplicateName` when the name is already taken.
    async fn save_role(&self, role: Role) -> AppResult<()>;

    /// Finds a role by its unique name.
    async fn find_role(&self, name: &str) -> AppResult<Option<Role>>;

    /// Lists every registered role ordered by name.
    async fn list_roles(&self) -> AppResult<Vec<Role>>;
}

/// Repository port for role-permission and principal-role bindings.
///
/// Both binding tables have set semantics: inserting an existing pair is a
/// no-op.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Binds permissions to a role and returns how many bindings were new.
    async fn bind_permissions(
        &self,
        role_id: RoleId,
        permission_ids: &[PermissionId],
    ) -> AppResult<usize>;

    /// Lists permissions bound to a role.
    async fn list_role_permissions(&self, role_id: RoleId) -> AppResult<Vec<PermissionId>>;

    /// Binds a role to a principal and returns whether the binding was new.
    async fn bind_role(&self, principal_id: PrincipalId, role_id: RoleId) -> AppResult<bool>;

    /// Lists roles bound to a principal.
    async fn list_principal_roles(&self, principal_id: PrincipalId) -> AppResult<Vec<RoleId>>;

    /// Lists every principal-role binding.
    async fn list_role_assignments(&self) -> AppResult<Vec<RoleAssignment>>;
}

/// Repository port for user records seeded alongside roles.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persists a new user.
    ///
    /// Fails with `AppError::DuplicateName` when the email is already taken.
    async fn save_user(&self, user: User) -> AppResult<()>;

    /// Finds a user by email address.
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Lists users ordered by email.
    async fn list_users(&self) -> AppResult<Vec<User>>;
}
