use std::sync::Arc;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User, UserId};
use crate::repository::UserRepository;

/// Service layer for User business logic.
///
/// Turns the repository's "absent" results into [`UserError::NotFound`] so
/// handlers can map everything through `UserError`.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new user
    pub async fn create_user(&self, input: CreateUser) -> UserResult<User> {
        let (username, email) = input.into_parts()?;
        self.repository.create(username, email).await
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: UserId) -> UserResult<User> {
        self.repository
            .get(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// Get a user by email, if any
    pub async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        self.repository.find_by_email(email).await
    }

    /// List all users with their count
    pub async fn list_users(&self) -> UserResult<(Vec<User>, usize)> {
        let users = self.repository.get_all().await?;
        let count = users.len();
        Ok((users, count))
    }

    /// Update a user. An update naming no field returns the record unchanged.
    pub async fn update_user(&self, id: UserId, input: UpdateUser) -> UserResult<User> {
        self.repository
            .update(id, input)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// Delete a user
    pub async fn delete_user(&self, id: UserId) -> UserResult<()> {
        if !self.repository.delete(id).await? {
            return Err(UserError::NotFound(id));
        }
        Ok(())
    }

    /// Number of stored users
    pub async fn count_users(&self) -> UserResult<usize> {
        self.repository.count().await
    }
}
