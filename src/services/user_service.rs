//! User service for business logic operations.

use std::sync::Arc;

use crate::error::AppResult;
use crate::models::{NewUser, User};
use crate::repositories::UserRepository;

/// User service for sign-up and listing.
///
/// Wraps a `UserRepository` trait object; cloning is cheap.
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    /// Creates a new UserService with the given repository.
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Records a user created by the identity provider.
    ///
    /// # Arguments
    /// * `new_user` - The user data to create
    ///
    /// # Returns
    /// The created user with its timestamp, or `Duplicate` when the id or
    /// clerk id is already taken
    pub async fn create_user(&self, new_user: NewUser) -> AppResult<User> {
        let user = self.repo.create(new_user).await?;
        tracing::info!(user_id = %user.id, clerk_id = %user.clerk_id, "User signed up");
        Ok(user)
    }

    /// Lists every user, oldest first.
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.list_all().await
    }
}
