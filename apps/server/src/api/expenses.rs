use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use tally_core::expenses::{Expense, ExpenseLedger};

use crate::{auth::AuthUser, error::ApiResult, main_lib::AppState, models::ExpenseRequest};

async fn list_expenses(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<ExpenseLedger>> {
    let ledger = state.expense_service.list_expenses(&user.user_id)?;
    Ok(Json(ledger))
}

async fn create_expense(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<ExpenseRequest>,
) -> ApiResult<(StatusCode, Json<Expense>)> {
    let created = state
        .expense_service
        .add_expense(&user.user_id, payload.into())
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_expense(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<Expense>> {
    let expense = state.expense_service.get_expense(&user.user_id, &id)?;
    Ok(Json(expense))
}

async fn update_expense(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<ExpenseRequest>,
) -> ApiResult<Json<Expense>> {
    let updated = state
        .expense_service
        .edit_expense(&user.user_id, &id, payload.into())
        .await?;
    Ok(Json(updated))
}

async fn delete_expense(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<StatusCode> {
    state
        .expense_service
        .delete_expense(&user.user_id, &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route(
            "/expenses/{id}",
            get(get_expense).put(update_expense).delete(delete_expense),
        )
}
