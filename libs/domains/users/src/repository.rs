use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::{MutationResult, NewUser, UpdateUser, User};

/// Repository trait for User persistence
///
/// Updates and deletes report what the store matched rather than failing on a
/// missing document; callers decide what a zero match means.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return the stored record
    async fn create(&self, input: NewUser) -> UserResult<User>;

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// All users, oldest first
    async fn list(&self) -> UserResult<Vec<User>>;

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// Overwrite name and email
    async fn update_profile(&self, id: Uuid, input: UpdateUser) -> UserResult<MutationResult>;

    /// Store a new password hash
    async fn update_password(&self, id: Uuid, password_hash: String)
    -> UserResult<MutationResult>;

    async fn delete(&self, id: Uuid) -> UserResult<MutationResult>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, input: NewUser) -> UserResult<User> {
        let user = User::new(input);
        self.users.write().await.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, "Created user");
        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by_key(|u| (u.created_at, u.id));
        Ok(users)
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn update_profile(&self, id: Uuid, input: UpdateUser) -> UserResult<MutationResult> {
        let mut users = self.users.write().await;
        let Some(user) = users.get_mut(&id) else {
            return Ok(MutationResult::default());
        };

        let modified = user.name != input.name || user.email != input.email;
        user.name = input.name;
        user.email = input.email;
        user.updated_at = chrono::Utc::now();

        Ok(MutationResult::new(1, u64::from(modified)))
    }

    async fn update_password(
        &self,
        id: Uuid,
        password_hash: String,
    ) -> UserResult<MutationResult> {
        let mut users = self.users.write().await;
        let Some(user) = users.get_mut(&id) else {
            return Ok(MutationResult::default());
        };

        user.password_hash = password_hash;
        user.updated_at = chrono::Utc::now();

        Ok(MutationResult::new(1, 1))
    }

    async fn delete(&self, id: Uuid) -> UserResult<MutationResult> {
        let deleted = u64::from(self.users.write().await.remove(&id).is_some());
        if deleted > 0 {
            tracing::info!(user_id = %id, "Deleted user");
        }
        Ok(MutationResult::new(deleted, deleted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(new_user("Ann", "ann@example.com")).await.unwrap();

        let found = repo.get_by_id(created.id).await.unwrap();
        assert_eq!(found, Some(created.clone()));

        let by_email = repo.find_by_email("ann@example.com").await.unwrap();
        assert_eq!(by_email.map(|u| u.id), Some(created.id));
        assert!(repo.find_by_email("bob@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_returns_all() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("Ann", "ann@example.com")).await.unwrap();
        repo.create(new_user("Bob", "bob@example.com")).await.unwrap();

        let users = repo.list().await.unwrap();
        assert_eq!(users.len(), 2);
    }

    #[tokio::test]
    async fn test_update_profile_reports_matches() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create(new_user("Ann", "ann@example.com")).await.unwrap();

        let update = UpdateUser {
            name: "Annie".to_string(),
            email: "ann@example.com".to_string(),
        };
        let result = repo.update_profile(user.id, update.clone()).await.unwrap();
        assert_eq!(result, MutationResult::new(1, 1));

        // Same values again: matched, nothing modified
        let result = repo.update_profile(user.id, update.clone()).await.unwrap();
        assert_eq!(result, MutationResult::new(1, 0));
        assert!(result.is_success());

        let result = repo.update_profile(Uuid::now_v7(), update).await.unwrap();
        assert!(!result.is_success());
    }

    #[tokio::test]
    async fn test_update_password_replaces_hash() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create(new_user("Ann", "ann@example.com")).await.unwrap();

        let result = repo
            .update_password(user.id, "new-hash".to_string())
            .await
            .unwrap();
        assert!(result.is_success());

        let stored = repo.get_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.password_hash, "new-hash");
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create(new_user("Ann", "ann@example.com")).await.unwrap();

        assert_eq!(repo.delete(user.id).await.unwrap(), MutationResult::new(1, 1));
        assert_eq!(repo.delete(user.id).await.unwrap(), MutationResult::new(0, 0));
    }
}
