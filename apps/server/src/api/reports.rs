use std::{convert::Infallible, sync::Arc};

use axum::{
    body::Body,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use futures::stream;
use tally_core::reports::WeeklyReport;
use tally_core::utils::time_utils::parse_reference_date;

use crate::{auth::AuthUser, error::ApiResult, main_lib::AppState, models::ReportQuery};

fn reference_instant(state: &AppState, query: &ReportQuery) -> ApiResult<DateTime<Utc>> {
    match query.date.as_deref() {
        Some(raw) => Ok(parse_reference_date(raw)?),
        None => Ok(state.clock.now()),
    }
}

async fn weekly_report(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Json<WeeklyReport>> {
    let reference = reference_instant(&state, &query)?;
    let report = state
        .expense_service
        .weekly_report(&user.user_id, reference)?;
    Ok(Json(report))
}

/// Streams the PDF one chunk per page as the document produces them.
async fn download_weekly_report(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Response> {
    let reference = reference_instant(&state, &query)?;
    let document = state
        .expense_service
        .weekly_report_document(&user.user_id, reference)?;
    let disposition = format!("attachment; filename=\"{}\"", document.file_name());
    tracing::debug!(
        "Streaming {} page(s) for user {}",
        document.page_count(),
        user.user_id
    );

    let body = Body::from_stream(stream::iter(document.map(Ok::<_, Infallible>)));
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reports/weekly", get(weekly_report))
        .route("/reports/weekly/download", get(download_weekly_report))
}
