//! Users module - account records and registration.

mod users_errors;
mod users_model;
mod users_service;
mod users_traits;


pub use users_errors::UserError;
pub use users_model::{NewUser, User, UserRegistration};
pub use users_service::UserService;
pub use users_traits::{UserRepositoryTrait, UserServiceTrait};
