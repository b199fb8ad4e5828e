use async_trait::async_trait;

use super::users_model::{NewUser, User, UserRegistration};
use crate::errors::Result;

/// Trait for account persistence
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    async fn create(&self, new_user: NewUser) -> Result<User>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    fn get_by_id(&self, user_id: &str) -> Result<User>;
}

/// Trait for account operations
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    /// Stores a validated registration. `password_hash` is produced by the
    /// caller from `registration.password`.
    async fn register(&self, registration: UserRegistration, password_hash: String)
        -> Result<User>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    fn get_user(&self, user_id: &str) -> Result<User>;
}
