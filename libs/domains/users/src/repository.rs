use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{UpdateUser, User, UserId};

/// Repository trait for User storage.
///
/// Absence is reported as `Ok(None)` / `Ok(false)`, never as an error.
/// Errors are reserved for rejected writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a user with the next id. Fails on a duplicate email or invalid
    /// fields; the id counter only advances on success.
    async fn create(&self, username: String, email: String) -> UserResult<User>;

    /// Get a user by ID
    async fn get(&self, id: UserId) -> UserResult<Option<User>>;

    /// Get a user by exact email
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// All users, in id order
    async fn get_all(&self) -> UserResult<Vec<User>>;

    /// Replace a user with the given changes applied. `Ok(None)` if the id is
    /// unknown. On any error the stored record is unchanged.
    async fn update(&self, id: UserId, update: UpdateUser) -> UserResult<Option<User>>;

    /// Delete a user by ID, returning whether it existed
    async fn delete(&self, id: UserId) -> UserResult<bool>;

    /// Number of stored users
    async fn count(&self) -> UserResult<usize>;
}

/// Map plus id counter, always locked together.
#[derive(Debug)]
struct Directory {
    users: BTreeMap<UserId, User>,
    next_id: UserId,
}

impl Default for Directory {
    fn default() -> Self {
        Self {
            users: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl Directory {
    fn find_by_email(&self, email: &str) -> Option<&User> {
        self.users.values().find(|u| u.email() == email)
    }
}

/// In-memory implementation of UserRepository.
///
/// Clones share the same storage. Every write holds the lock across its
/// uniqueness check and commit.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    directory: Arc<RwLock<Directory>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, username: String, email: String) -> UserResult<User> {
        let mut directory = self.directory.write().await;

        if directory.find_by_email(&email).is_some() {
            return Err(UserError::DuplicateEmail(email));
        }

        let user = User::new(directory.next_id, username, email, None)?;
        directory.users.insert(user.id(), user.clone());
        directory.next_id += 1;

        tracing::info!(user_id = user.id(), email = %user.email(), "Created user");
        Ok(user)
    }

    async fn get(&self, id: UserId) -> UserResult<Option<User>> {
        let directory = self.directory.read().await;
        Ok(directory.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let directory = self.directory.read().await;
        Ok(directory.find_by_email(email).cloned())
    }

    async fn get_all(&self) -> UserResult<Vec<User>> {
        let directory = self.directory.read().await;
        Ok(directory.users.values().cloned().collect())
    }

    async fn update(&self, id: UserId, update: UpdateUser) -> UserResult<Option<User>> {
        let mut directory = self.directory.write().await;

        let Some(current) = directory.users.get(&id) else {
            return Ok(None);
        };

        if let Some(email) = update.email() {
            if email != current.email() && directory.find_by_email(email).is_some() {
                return Err(UserError::DuplicateEmail(email.to_string()));
            }
        }

        let replacement = current.with_changes(&update)?;
        directory.users.insert(id, replacement.clone());

        tracing::info!(user_id = id, "Updated user");
        Ok(Some(replacement))
    }

    async fn delete(&self, id: UserId) -> UserResult<bool> {
        let mut directory = self.directory.write().await;

        if directory.users.remove(&id).is_some() {
            tracing::info!(user_id = id, "Deleted user");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn count(&self) -> UserResult<usize> {
        let directory = self.directory.read().await;
        Ok(directory.users.len())
    }
}
