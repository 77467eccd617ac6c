//! Rolegate authorization seeder.

#![forbid(unsafe_code)]

mod seeder_config;

use std::sync::Arc;

use rolegate_application::{
    AssignmentEngine, AuthorizationBootstrap, PermissionCatalog, RoleRegistry, SeedStatus,
};
use rolegate_core::{AppError, AppResult};
use rolegate_infrastructure::{MIGRATOR, PostgresAuthorizationRepository, PostgresUserRepository};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

use crate::seeder_config::{SeederConfig, init_tracing};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = SeederConfig::load()?;
    let pool = connect_pool(config.database_url.as_str()).await?;

    MIGRATOR
        .run(&pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;

    if config.migrate_only {
        info!("database migrations applied successfully");
        return Ok(());
    }

    let bootstrap = build_bootstrap(pool.clone());
    match bootstrap.seed_status().await? {
        SeedStatus::Empty => {}
        SeedStatus::Complete => {
            warn!("authorization tables already seeded, skipping");
            return Ok(());
        }
        SeedStatus::Partial => {
            return Err(AppError::Validation(
                "authorization tables are partially seeded, reset them first".to_owned(),
            ));
        }
    }

    let summary = bootstrap.seed_roles_and_permissions().await?;
    info!(
        roles = summary.roles.len(),
        permissions = summary.permissions.len(),
        "roles and permissions seeded"
    );

    if config.seed_users {
        let users = PostgresUserRepository::new(pool);
        let seeded = bootstrap.seed_users(&users, &config.user_plan).await?;
        info!(
            users = seeded.len(),
            superuser = %config.user_plan.superuser_email,
            "users seeded"
        );
    }

    Ok(())
}

async fn connect_pool(database_url: &str) -> AppResult<PgPool> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))
}

fn build_bootstrap(pool: PgPool) -> AuthorizationBootstrap {
    let repository = Arc::new(PostgresAuthorizationRepository::new(pool));
    let catalog = PermissionCatalog::new(repository.clone());
    let registry = RoleRegistry::new(repository.clone());
    let engine = AssignmentEngine::new(catalog.clone(), registry.clone(), repository);

    AuthorizationBootstrap::new(catalog, registry, engine)
}
