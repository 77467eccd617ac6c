use std::env;

use rolegate_application::UserSeedPlan;
use rolegate_core::{AppError, AppResult};
use rolegate_domain::EmailAddress;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct SeederConfig {
    pub migrate_only: bool,
    pub database_url: String,
    pub seed_users: bool,
    pub user_plan: UserSeedPlan,
}

impl SeederConfig {
    pub fn load() -> AppResult<Self> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");
        let database_url = required_env("DATABASE_URL")?;
        let seed_users = parse_bool("SEED_USERS", env::var("SEED_USERS").ok(), true)?;

        let defaults = UserSeedPlan::default();
        let employee_count = parse_usize(
            "SEED_EMPLOYEE_COUNT",
            env::var("SEED_EMPLOYEE_COUNT").ok(),
            defaults.employee_count,
        )?;
        let superuser_name = non_empty_or(
            env::var("SEED_SUPERUSER_NAME").ok(),
            defaults.superuser_name,
        );
        let superuser_email = non_empty_or(
            env::var("SEED_SUPERUSER_EMAIL").ok(),
            defaults.superuser_email,
        );
        let superuser_email = parse_email("SEED_SUPERUSER_EMAIL", superuser_email.as_str())?;

        Ok(Self {
            migrate_only,
            database_url,
            seed_users,
            user_plan: UserSeedPlan {
                employee_count,
                superuser_name,
                superuser_email,
            },
        })
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> AppResult<String> {
    let value =
        env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}

fn parse_usize(name: &str, raw: Option<String>, default: usize) -> AppResult<usize> {
    match raw {
        Some(value) => value.trim().parse::<usize>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        None => Ok(default),
    }
}

fn parse_bool(name: &str, raw: Option<String>, default: bool) -> AppResult<bool> {
    let Some(value) = raw else {
        return Ok(default);
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(AppError::Validation(format!(
            "{name} must be a boolean, got '{value}'"
        ))),
    }
}

fn parse_email(name: &str, value: &str) -> AppResult<String> {
    EmailAddress::new(value)
        .map(|email| email.as_str().to_owned())
        .map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        })
}

fn non_empty_or(raw: Option<String>, default: String) -> String {
    raw.map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .unwrap_or(default)
}
