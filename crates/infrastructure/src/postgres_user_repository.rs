//! PostgreSQL-backed user repository.

use async_trait::async_trait;
use sqlx::PgPool;

use rolegate_application::UserRepository;
use rolegate_core::{AppError, AppResult};
use rolegate_domain::{PrincipalId, User};

use crate::postgres_authorization_repository::map_unique_violation;

/// PostgreSQL implementation of the user repository port.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: uuid::Uuid,
    display_name: String,
    email: String,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        User::from_parts(PrincipalId::from_uuid(row.id), row.display_name, row.email).map_err(
            |error| AppError::Internal(format!("failed to decode user '{}': {error}", row.id)),
        )
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn save_user(&self, user: User) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, display_name, email)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.display_name())
        .bind(user.email().as_str())
        .execute(&self.pool)
        .await
        .map_err(|error| map_unique_violation(error, "user", user.email().as_str()))?;

        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, display_name, email
            FROM users
            WHERE LOWER(email) = LOWER($1)
            LIMIT 1
            "#,
        )
        .bind(email.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find user by email: {error}")))?;

        row.map(User::try_from).transpose()
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, display_name, email
            FROM users
            ORDER BY email
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list users: {error}")))?;

        rows.into_iter().map(User::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use rolegate_application::UserRepository;
    use rolegate_core::AppError;
    use rolegate_domain::User;
    use sqlx::postgres::PgPoolOptions;

    use super::PostgresUserRepository;
    use crate::MIGRATOR;

    #[tokio::test]
    async fn save_user_rejects_duplicate_email() {
        let Ok(database_url) = std::env::var("DATABASE_URL") else {
            return;
        };
        let pool = match PgPoolOptions::new()
            .max_connections(1)
            .connect(database_url.as_str())
            .await
        {
            Ok(pool) => pool,
            Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
        };
        if let Err(error) = MIGRATOR.run(&pool).await {
            panic!("failed to run migrations for postgres user tests: {error}");
        }

        let repository = PostgresUserRepository::new(pool);
        let email = format!("{}@example.com", uuid::Uuid::new_v4().simple());
        let user = User::new("Seed User", email.as_str()).unwrap_or_else(|_| unreachable!());
        let twin = User::new("Seed Twin", email.as_str()).unwrap_or_else(|_| unreachable!());

        assert!(repository.save_user(user.clone()).await.is_ok());
        let duplicate = repository.save_user(twin).await;
        assert!(matches!(duplicate, Err(AppError::DuplicateName(_))));

        let found = repository.find_user_by_email(email.to_uppercase().as_str()).await;
        assert!(matches!(found, Ok(Some(ref stored)) if stored.id() == user.id()));
    }
}
