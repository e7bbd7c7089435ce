use axum::{
    Json,
    extract::{Path, State, rejection::{JsonRejection, PathRejection}},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use super::error::invalid_body;
use crate::domain::{CarRental, CreateCarRentalInput, DomainError};
use crate::infrastructure::AppState;

#[utoipa::path(
    get,
    path = "/api/car-rentals",
    tag = "car-rentals",
    responses(
        (status = 200, description = "All car rental companies", body = [CarRental])
    )
)]
pub async fn list_car_rentals(
    State(state): State<AppState>,
) -> Result<Json<Vec<CarRental>>, DomainError> {
    Ok(Json(state.car_rental_repo.find_all().await?))
}

#[utoipa::path(
    post,
    path = "/api/car-rentals",
    tag = "car-rentals",
    request_body = CreateCarRentalInput,
    responses(
        (status = 201, description = "Car rental created", body = CarRental),
        (status = 400, description = "Name is required")
    )
)]
pub async fn create_car_rental(
    State(state): State<AppState>,
    payload: Result<Json<CreateCarRentalInput>, JsonRejection>,
) -> Result<impl IntoResponse, DomainError> {
    let Json(input) = payload.map_err(invalid_body)?;
    let rental = state.car_rental_repo.create(input).await?;

    Ok((StatusCode::CREATED, Json(rental)))
}

#[utoipa::path(
    get,
    path = "/api/car-rentals/{id}",
    tag = "car-rentals",
    params(("id" = i32, Path, description = "Car rental id")),
    responses(
        (status = 200, description = "Car rental found", body = CarRental),
        (status = 404, description = "Car rental not found")
    )
)]
pub async fn get_car_rental(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<CarRental>, DomainError> {
    let Path(id) = path.map_err(invalid_body)?;
    state
        .car_rental_repo
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| DomainError::not_found("Car rental"))
}

#[utoipa::path(
    delete,
    path = "/api/car-rentals/{id}",
    tag = "car-rentals",
    params(("id" = i32, Path, description = "Car rental id")),
    responses(
        (status = 200, description = "Car rental deleted"),
        (status = 404, description = "Car rental not found")
    )
)]
pub async fn delete_car_rental(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<impl IntoResponse, DomainError> {
    let Path(id) = path.map_err(invalid_body)?;
    state.car_rental_repo.delete(id).await?;
    Ok(Json(json!({ "message": "Car rental deleted successfully" })))
}
