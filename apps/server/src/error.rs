use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tally_core::errors::{DatabaseError, Error as CoreError};
use tally_core::expenses::{ExpenseError, ExpenseInput};
use tally_core::users::UserError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
    /// The rejected form values, so the client can re-display them.
    #[serde(skip_serializing_if = "Option::is_none")]
    attempted: Option<ExpenseInput>,
}

const INTERNAL_MESSAGE: &str = "Internal server error";

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut attempted = None;
        let (status, message) = match self {
            ApiError::Core(CoreError::Expense(ExpenseError::Invalid {
                attempted: input,
                reason,
            })) => {
                attempted = Some(input);
                (StatusCode::UNPROCESSABLE_ENTITY, reason)
            }
            // Someone else's record looks exactly like a missing one.
            ApiError::Core(CoreError::Expense(
                ExpenseError::NotFound(_) | ExpenseError::NotOwner(_),
            )) => (StatusCode::NOT_FOUND, "Expense not found".to_string()),
            ApiError::Core(CoreError::User(e @ UserError::AlreadyExists)) => {
                (StatusCode::CONFLICT, e.to_string())
            }
            ApiError::Core(CoreError::User(UserError::Invalid(reason))) => {
                (StatusCode::UNPROCESSABLE_ENTITY, reason)
            }
            ApiError::Core(CoreError::User(UserError::NotFound(_)))
            | ApiError::Core(CoreError::Database(DatabaseError::NotFound(_))) => {
                (StatusCode::NOT_FOUND, "Not Found".to_string())
            }
            ApiError::Core(e @ CoreError::Validation(_)) => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::Core(e) => {
                tracing::error!("Request failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
            ApiError::Unauthorized(reason) => (StatusCode::UNAUTHORIZED, reason),
            ApiError::Internal(reason) => {
                tracing::error!("Request failed: {}", reason);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
        };
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message,
            attempted,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn invalid_expense_echoes_the_input() {
        let err = CoreError::from(ExpenseError::Invalid {
            attempted: ExpenseInput::new("", "abc"),
            reason: "Description is required".to_string(),
        });
        let (status, body) = render(err.into()).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["message"], "Description is required");
        assert_eq!(body["attempted"]["amount"], "abc");
    }

    #[tokio::test]
    async fn not_owner_is_indistinguishable_from_not_found() {
        let (a_status, a_body) =
            render(CoreError::from(ExpenseError::NotOwner("e1".into())).into()).await;
        let (b_status, b_body) =
            render(CoreError::from(ExpenseError::NotFound("e1".into())).into()).await;
        assert_eq!(a_status, StatusCode::NOT_FOUND);
        assert_eq!(a_status, b_status);
        assert_eq!(a_body, b_body);
    }

    #[tokio::test]
    async fn storage_failures_are_generic() {
        let err = CoreError::Database(DatabaseError::QueryFailed("disk I/O error".into()));
        let (status, body) = render(err.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], INTERNAL_MESSAGE);
        assert!(body.get("attempted").is_none());
    }

    #[tokio::test]
    async fn duplicate_user_is_a_conflict() {
        let (status, body) = render(CoreError::from(UserError::AlreadyExists).into()).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["message"], "Email or username exists");
    }
}
