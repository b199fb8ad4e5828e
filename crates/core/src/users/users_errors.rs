use thiserror::Error;

#[derive(Error, Debug)]
pub enum UserError {
    #[error("Email or username exists")]
    AlreadyExists,

    #[error("{0}")]
    Invalid(String),

    #[error("User {0} not found")]
    NotFound(String),
}
