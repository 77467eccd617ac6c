use rolegate_core::{AppError, AppResult};
use rolegate_domain::{DefaultPermission, DefaultRole};
use tracing::info;

use super::{AuthorizationBootstrap, SeedStatus, SeedSummary};

impl AuthorizationBootstrap {
    /// Creates the default roles and permissions and wires their grants.
    ///
    /// Every role and permission is created before any binding is written.
    /// Running this twice fails with `AppError::DuplicateName`.
    pub async fn seed_roles_and_permissions(&self) -> AppResult<SeedSummary> {
        let mut roles = Vec::with_capacity(DefaultRole::all().len());
        for role in DefaultRole::all() {
            roles.push(self.registry.create(role.as_str()).await?);
        }

        let mut permissions = Vec::with_capacity(DefaultPermission::all().len());
        for permission in DefaultPermission::all() {
            permissions.push(self.catalog.create(permission.as_str()).await?);
        }

        for (default_role, role) in DefaultRole::all().iter().zip(roles.iter()) {
            let grants = default_role.default_permissions();
            if grants.is_empty() {
                continue;
            }

            let names: Vec<&str> = grants.iter().map(DefaultPermission::as_str).collect();
            self.engine
                .give_permission_by_name(role, names.as_slice())
                .await?;
        }

        info!(
            roles = roles.len(),
            permissions = permissions.len(),
            "authorization bootstrap completed"
        );

        Ok(SeedSummary { roles, permissions })
    }

    /// Reports how much of the default vocabulary is already stored.
    pub async fn seed_status(&self) -> AppResult<SeedStatus> {
        let mut present = 0_usize;
        let mut complete = true;

        for permission in DefaultPermission::all() {
            if exists(self.catalog.find(permission.as_str()).await)? {
                present += 1;
            } else {
                complete = false;
            }
        }

        for role in DefaultRole::all() {
            if !exists(self.registry.find(role.as_str()).await)? {
                complete = false;
                continue;
            }
            present += 1;

            let bound = self.engine.role_permissions(role.as_str()).await?;
            if role
                .default_permissions()
                .iter()
                .any(|permission| !bound.contains(permission.as_str()))
            {
                complete = false;
            }
        }

        Ok(match (present, complete) {
            (0, _) => SeedStatus::Empty,
            (_, true) => SeedStatus::Complete,
            (_, false) => SeedStatus::Partial,
        })
    }

    /// Returns whether every default role, permission and grant is stored.
    pub async fn is_seeded(&self) -> AppResult<bool> {
        Ok(self.seed_status().await? == SeedStatus::Complete)
    }
}

fn exists<T>(lookup: AppResult<T>) -> AppResult<bool> {
    match lookup {
        Ok(_) => Ok(true),
        Err(AppError::NotFound(_)) => Ok(false),
        Err(error) => Err(error),
    }
}
