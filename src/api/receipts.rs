use axum::{
    Json,
    extract::{Path, Query, State, rejection::{JsonRejection, PathRejection}},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use super::error::invalid_body;
use crate::domain::DomainError;
use crate::models::{ReceiptDto, ReceiptRequest};
use crate::services::receipt_service;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Matched against number, client name, email and phone
    pub q: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/receipts",
    tag = "receipts",
    request_body = ReceiptRequest,
    responses(
        (status = 201, description = "Receipt created", body = ReceiptDto),
        (status = 400, description = "Invalid receipt data")
    )
)]
pub async fn create_receipt(
    State(db): State<DatabaseConnection>,
    payload: Result<Json<ReceiptRequest>, JsonRejection>,
) -> Result<impl IntoResponse, DomainError> {
    let Json(request) = payload.map_err(invalid_body)?;
    let receipt = receipt_service::create_receipt(&db, request).await?;

    Ok((StatusCode::CREATED, Json(receipt)))
}

#[utoipa::path(
    get,
    path = "/api/receipts",
    tag = "receipts",
    responses(
        (status = 200, description = "All receipts with their activities", body = [ReceiptDto])
    )
)]
pub async fn list_receipts(
    State(db): State<DatabaseConnection>,
) -> Result<Json<Vec<ReceiptDto>>, DomainError> {
    Ok(Json(receipt_service::list_receipts(&db).await?))
}

#[utoipa::path(
    get,
    path = "/api/receipts/search",
    tag = "receipts",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching receipts", body = [ReceiptDto]),
        (status = 400, description = "Missing search query")
    )
)]
pub async fn search_receipts(
    State(db): State<DatabaseConnection>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<ReceiptDto>>, DomainError> {
    let q = params.q.unwrap_or_default();
    Ok(Json(receipt_service::search_receipts(&db, &q).await?))
}

#[utoipa::path(
    get,
    path = "/api/receipts/{id}",
    tag = "receipts",
    params(("id" = i32, Path, description = "Receipt id")),
    responses(
        (status = 200, description = "Receipt found", body = ReceiptDto),
        (status = 404, description = "Receipt not found")
    )
)]
pub async fn get_receipt(
    State(db): State<DatabaseConnection>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<ReceiptDto>, DomainError> {
    let Path(id) = path.map_err(invalid_body)?;
    Ok(Json(receipt_service::get_receipt(&db, id).await?))
}

#[utoipa::path(
    put,
    path = "/api/receipts/{id}",
    tag = "receipts",
    params(("id" = i32, Path, description = "Receipt id")),
    request_body = ReceiptRequest,
    responses(
        (status = 200, description = "Receipt replaced", body = ReceiptDto),
        (status = 400, description = "Invalid receipt data"),
        (status = 404, description = "Receipt not found")
    )
)]
pub async fn update_receipt(
    State(db): State<DatabaseConnection>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<ReceiptRequest>, JsonRejection>,
) -> Result<Json<ReceiptDto>, DomainError> {
    let Path(id) = path.map_err(invalid_body)?;
    let Json(request) = payload.map_err(invalid_body)?;
    Ok(Json(receipt_service::update_receipt(&db, id, request).await?))
}

#[utoipa::path(
    delete,
    path = "/api/receipts/{id}",
    tag = "receipts",
    params(("id" = i32, Path, description = "Receipt id")),
    responses(
        (status = 200, description = "Receipt and its activities deleted")
    )
)]
pub async fn delete_receipt(
    State(db): State<DatabaseConnection>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<impl IntoResponse, DomainError> {
    let Path(id) = path.map_err(invalid_body)?;
    receipt_service::delete_receipt(&db, id).await?;
    Ok(Json(json!({ "message": "Receipt deleted successfully" })))
}
