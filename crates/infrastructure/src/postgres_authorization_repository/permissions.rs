use super::*;

impl PostgresAuthorizationRepository {
    pub(super) async fn save_permission_impl(&self, permission: Permission) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO rbac_permissions (id, name)
            VALUES ($1, $2)
            "#,
        )
        .bind(permission.id().as_uuid())
        .bind(permission.name())
        .execute(&self.pool)
        .await
        .map_err(|error| map_unique_violation(error, "permission", permission.name()))?;

        Ok(())
    }

    pub(super) async fn find_permission_impl(&self, name: &str) -> AppResult<Option<Permission>> {
        let row = sqlx::query_as::<_, NamedRow>(
            r#"
            SELECT id, name
            FROM rbac_permissions
            WHERE name = $1
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find permission: {error}")))?;

        row.map(permission_from_row).transpose()
    }

    pub(super) async fn list_permissions_impl(&self) -> AppResult<Vec<Permission>> {
        let rows = sqlx::query_as::<_, NamedRow>(
            r#"
            SELECT id, name
            FROM rbac_permissions
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list permissions: {error}")))?;

        rows.into_iter().map(permission_from_row).collect()
    }
}

fn permission_from_row(row: NamedRow) -> AppResult<Permission> {
    Permission::from_parts(PermissionId::from_uuid(row.id), row.name.as_str()).map_err(|error| {
        AppError::Internal(format!(
            "failed to decode permission '{}': {error}",
            row.id
        ))
    })
}
