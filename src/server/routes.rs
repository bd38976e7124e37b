use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::review::{NewReview, Review, parse_date};
use crate::server::AppState;
use crate::service::{Page, PageRequest, Report};
use crate::Error;

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ReportParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn reject(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ErrorResponse { error: message.into() }))
}

/// Map a service error to a response, logging it with the failed operation.
fn service_error(operation: &str, err: Error) -> ApiError {
    match err {
        Error::Validation(msg) => {
            tracing::debug!("{}: rejected input: {}", operation, msg);
            reject(StatusCode::UNPROCESSABLE_ENTITY, msg)
        }
        Error::NotFound(id) => {
            tracing::debug!("{}: review {} not found", operation, id);
            reject(StatusCode::NOT_FOUND, format!("Review {} not found", id))
        }
        Error::Classifier(msg) => {
            tracing::error!("{}: classifier failed: {}", operation, msg);
            reject(StatusCode::BAD_GATEWAY, "Sentiment classifier unavailable")
        }
        other => {
            tracing::error!("{}: {}", operation, other);
            reject(StatusCode::INTERNAL_SERVER_ERROR, "Storage error")
        }
    }
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn create_review(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewReview>, JsonRejection>,
) -> Result<Json<Review>, ApiError> {
    let Json(input) = body.map_err(|e| reject(e.status(), e.body_text()))?;
    let name = input.name.clone();

    let review = state
        .service
        .create(input)
        .await
        .map_err(|e| service_error(&format!("create review (name='{}')", name), e))?;

    Ok(Json(review))
}

pub async fn list_reviews(
    State(state): State<Arc<AppState>>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<Page<Review>>, ApiError> {
    let Query(params) = params.map_err(|e| reject(e.status(), e.body_text()))?;
    let operation = format!("list reviews (page={:?}, per_page={:?})", params.page, params.per_page);

    let request = PageRequest::from_query(params.page, params.per_page, state.service.default_page_size())
        .map_err(|e| service_error(&operation, e))?;

    let page = state
        .service
        .list(request)
        .await
        .map_err(|e| service_error(&operation, e))?;

    Ok(Json(page))
}

pub async fn get_review(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Review>, ApiError> {
    let Path(id) = id.map_err(|e| reject(e.status(), e.body_text()))?;

    let review = state
        .service
        .get(id)
        .await
        .map_err(|e| service_error(&format!("get review (id={})", id), e))?;

    Ok(Json(review))
}

/// Reviews dated within `[start_date, end_date]`. Missing or malformed dates are 422.
pub async fn report(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ReportParams>, QueryRejection>,
) -> Result<Json<Report>, ApiError> {
    let Query(params) = params.map_err(|e| reject(e.status(), e.body_text()))?;
    let operation = format!(
        "report (start_date={:?}, end_date={:?})",
        params.start_date, params.end_date
    );

    let dates = required_date("start_date", params.start_date.as_deref())
        .and_then(|start| Ok((start, required_date("end_date", params.end_date.as_deref())?)));
    let (start, end) = dates.map_err(|e| service_error(&operation, e))?;

    let report = state
        .service
        .report(start, end)
        .await
        .map_err(|e| service_error(&operation, e))?;

    Ok(Json(report))
}

fn required_date(field: &str, value: Option<&str>) -> crate::Result<chrono::NaiveDate> {
    match value {
        Some(value) => parse_date(field, value),
        None => Err(Error::Validation(format!("{} is required (YYYY-MM-DD)", field))),
    }
}
