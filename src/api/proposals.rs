use axum::{
    Json,
    extract::{Path, State, rejection::{JsonRejection, PathRejection}},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;
use serde_json::json;

use super::error::invalid_body;
use crate::domain::DomainError;
use crate::models::{ProposalDto, ProposalRequest};
use crate::services::proposal_service;

#[utoipa::path(
    get,
    path = "/api/proposals",
    tag = "proposals",
    responses(
        (status = 200, description = "All proposals with hotel and rooms", body = [ProposalDto])
    )
)]
pub async fn list_proposals(
    State(db): State<DatabaseConnection>,
) -> Result<Json<Vec<ProposalDto>>, DomainError> {
    Ok(Json(proposal_service::list_proposals(&db).await?))
}

#[utoipa::path(
    post,
    path = "/api/proposals",
    tag = "proposals",
    request_body = ProposalRequest,
    responses(
        (status = 201, description = "Proposal created", body = ProposalDto),
        (status = 400, description = "Invalid proposal or not enough capacity"),
        (status = 404, description = "Hotel not found")
    )
)]
pub async fn create_proposal(
    State(db): State<DatabaseConnection>,
    payload: Result<Json<ProposalRequest>, JsonRejection>,
) -> Result<impl IntoResponse, DomainError> {
    let Json(request) = payload.map_err(invalid_body)?;
    let proposal = proposal_service::create_proposal(&db, request).await?;

    Ok((StatusCode::CREATED, Json(proposal)))
}

#[utoipa::path(
    get,
    path = "/api/proposals/{id}",
    tag = "proposals",
    params(("id" = i32, Path, description = "Proposal id")),
    responses(
        (status = 200, description = "Proposal found", body = ProposalDto),
        (status = 404, description = "Proposal not found")
    )
)]
pub async fn get_proposal(
    State(db): State<DatabaseConnection>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<ProposalDto>, DomainError> {
    let Path(id) = path.map_err(invalid_body)?;
    Ok(Json(proposal_service::get_proposal(&db, id).await?))
}

#[utoipa::path(
    put,
    path = "/api/proposals/{id}",
    tag = "proposals",
    params(("id" = i32, Path, description = "Proposal id")),
    request_body = ProposalRequest,
    responses(
        (status = 200, description = "Proposal replaced", body = ProposalDto),
        (status = 400, description = "Invalid proposal or not enough capacity"),
        (status = 404, description = "Proposal or hotel not found")
    )
)]
pub async fn update_proposal(
    State(db): State<DatabaseConnection>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<ProposalRequest>, JsonRejection>,
) -> Result<Json<ProposalDto>, DomainError> {
    let Path(id) = path.map_err(invalid_body)?;
    let Json(request) = payload.map_err(invalid_body)?;
    Ok(Json(proposal_service::update_proposal(&db, id, request).await?))
}

#[utoipa::path(
    delete,
    path = "/api/proposals/{id}",
    tag = "proposals",
    params(("id" = i32, Path, description = "Proposal id")),
    responses(
        (status = 200, description = "Proposal and its rooms deleted")
    )
)]
pub async fn delete_proposal(
    State(db): State<DatabaseConnection>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<impl IntoResponse, DomainError> {
    let Path(id) = path.map_err(invalid_body)?;
    proposal_service::delete_proposal(&db, id).await?;
    Ok(Json(json!({ "message": "Proposal deleted successfully" })))
}
