use super::*;

impl PostgresAuthorizationRepository {
    pub(super) async fn bind_permissions_impl(
        &self,
        role_id: RoleId,
        permission_ids: &[PermissionId],
    ) -> AppResult<usize> {
        let mut transaction = self.pool.begin().await.map_err(|error| {
            AppError::Internal(format!("failed to begin transaction: {error}"))
        })?;

        let mut added = 0_u64;
        for permission_id in permission_ids {
            added += sqlx::query(
                r#"
                INSERT INTO rbac_role_permissions (role_id, permission_id)
                VALUES ($1, $2)
                ON CONFLICT (role_id, permission_id) DO NOTHING
                "#,
            )
            .bind(role_id.as_uuid())
            .bind(permission_id.as_uuid())
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to persist role permission: {error}"))
            })?
            .rows_affected();
        }

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })?;

        debug!(
            role_id = %role_id,
            requested = permission_ids.len(),
            added,
            "role permission bindings written"
        );

        usize::try_from(added)
            .map_err(|error| AppError::Internal(format!("binding count overflow: {error}")))
    }

    pub(super) async fn list_role_permissions_impl(
        &self,
        role_id: RoleId,
    ) -> AppResult<Vec<PermissionId>> {
        let ids = sqlx::query_scalar::<_, uuid::Uuid>(
            r#"
            SELECT permission_id
            FROM rbac_role_permissions
            WHERE role_id = $1
            ORDER BY permission_id
            "#,
        )
        .bind(role_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list role permissions: {error}"))
        })?;

        Ok(ids.into_iter().map(PermissionId::from_uuid).collect())
    }

    pub(super) async fn bind_role_impl(
        &self,
        principal_id: PrincipalId,
        role_id: RoleId,
    ) -> AppResult<bool> {
        let rows_affected = sqlx::query(
            r#"
            INSERT INTO rbac_principal_roles (principal_id, role_id)
            VALUES ($1, $2)
            ON CONFLICT (principal_id, role_id) DO NOTHING
            "#,
        )
        .bind(principal_id.as_uuid())
        .bind(role_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to assign role: {error}")))?
        .rows_affected();

        Ok(rows_affected > 0)
    }

    pub(super) async fn list_principal_roles_impl(
        &self,
        principal_id: PrincipalId,
    ) -> AppResult<Vec<RoleId>> {
        let ids = sqlx::query_scalar::<_, uuid::Uuid>(
            r#"
            SELECT role_id
            FROM rbac_principal_roles
            WHERE principal_id = $1
            ORDER BY role_id
            "#,
        )
        .bind(principal_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list principal roles: {error}")))?;

        Ok(ids.into_iter().map(RoleId::from_uuid).collect())
    }

    pub(super) async fn list_role_assignments_impl(&self) -> AppResult<Vec<RoleAssignment>> {
        let rows = sqlx::query_as::<_, RoleAssignmentRow>(
            r#"
            SELECT principal_id, role_id, assigned_at
            FROM rbac_principal_roles
            ORDER BY assigned_at, principal_id, role_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list role assignments: {error}")))?;

        Ok(rows
            .into_iter()
            .map(|row| RoleAssignment {
                principal_id: PrincipalId::from_uuid(row.principal_id),
                role_id: RoleId::from_uuid(row.role_id),
                assigned_at: row.assigned_at,
            })
            .collect())
    }
}
