use std::collections::BTreeMap;

use async_trait::async_trait;
use rolegate_application::UserRepository;
use rolegate_core::{AppError, AppResult};
use rolegate_domain::User;
use tokio::sync::RwLock;

/// In-memory user store keyed by email.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<BTreeMap<String, User>>,
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory user store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save_user(&self, user: User) -> AppResult<()> {
        let mut users = self.users.write().await;
        let email = user.email().as_str().to_owned();

        if users.contains_key(&email) {
            return Err(AppError::DuplicateName(format!(
                "user '{email}' already exists"
            )));
        }

        users.insert(email, user);
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .get(email.trim().to_lowercase().as_str())
            .cloned())
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        Ok(self.users.read().await.values().cloned().collect())
    }
}
