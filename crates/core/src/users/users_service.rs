use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;

use super::users_errors::UserError;
use super::users_model::{normalize_email, NewUser, User, UserRegistration};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::errors::Result;
use crate::utils::Clock;

pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
    clock: Arc<dyn Clock>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>, clock: Arc<dyn Clock>) -> Self {
        UserService { repository, clock }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn register(
        &self,
        registration: UserRegistration,
        password_hash: String,
    ) -> Result<User> {
        registration.validate()?;
        let new_user = NewUser {
            username: registration.username.trim().to_string(),
            email: normalize_email(&registration.email),
            password_hash,
            created_at: self.clock.now(),
        };
        debug!("Registering user {}", new_user.username);

        match self.repository.create(new_user).await {
            Ok(user) => {
                info!("Registered user {}", user.id);
                Ok(user)
            }
            Err(e) if e.is_unique_violation() => Err(UserError::AlreadyExists.into()),
            Err(e) => Err(e),
        }
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.repository.find_by_email(&normalize_email(email))
    }

    fn get_user(&self, user_id: &str) -> Result<User> {
        self.repository.get_by_id(user_id).map_err(|e| {
            if e.is_not_found() {
                UserError::NotFound(user_id.to_string()).into()
            } else {
                e
            }
        })
    }
}
