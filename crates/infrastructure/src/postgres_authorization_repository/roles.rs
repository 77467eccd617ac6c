use super::*;

impl PostgresAuthorizationRepository {
    pub(super) async fn save_role_impl(&self, role: Role) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO rbac_roles (id, name)
            VALUES ($1, $2)
            "#,
        )
        .bind(role.id().as_uuid())
        .bind(role.name())
        .execute(&self.pool)
        .await
        .map_err(|error| map_unique_violation(error, "role", role.name()))?;

        Ok(())
    }

    pub(super) async fn find_role_impl(&self, name: &str) -> AppResult<Option<Role>> {
        let row = sqlx::query_as::<_, NamedRow>(
            r#"
            SELECT id, name
            FROM rbac_roles
            WHERE name = $1
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to resolve role: {error}")))?;

        row.map(role_from_row).transpose()
    }

    pub(super) async fn list_roles_impl(&self) -> AppResult<Vec<Role>> {
        let rows = sqlx::query_as::<_, NamedRow>(
            r#"
            SELECT id, name
            FROM rbac_roles
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list roles: {error}")))?;

        rows.into_iter().map(role_from_row).collect()
    }
}

fn role_from_row(row: NamedRow) -> AppResult<Role> {
    Role::from_parts(RoleId::from_uuid(row.id), row.name.as_str()).map_err(|error| {
        AppError::Internal(format!("failed to decode role '{}': {error}", row.id))
    })
}
