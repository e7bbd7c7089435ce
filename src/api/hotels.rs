use axum::{
    Json,
    extract::{Path, Query, State, rejection::{JsonRejection, PathRejection}},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use super::error::invalid_body;
use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::models::{HotelDto, HotelRequest};
use crate::services::hotel_service::{self, HotelFilter};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HotelsQuery {
    /// Case-insensitive substring of the city
    pub city: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/hotels",
    tag = "hotels",
    params(HotelsQuery),
    responses(
        (status = 200, description = "Hotels with their images", body = [HotelDto])
    )
)]
pub async fn list_hotels(
    State(state): State<AppState>,
    Query(params): Query<HotelsQuery>,
) -> Result<Json<Vec<HotelDto>>, DomainError> {
    let filter = HotelFilter { city: params.city };
    Ok(Json(hotel_service::list_hotels(state.db(), filter).await?))
}

#[utoipa::path(
    post,
    path = "/api/hotels",
    tag = "hotels",
    request_body = HotelRequest,
    responses(
        (status = 201, description = "Hotel created", body = HotelDto),
        (status = 400, description = "Invalid hotel data")
    )
)]
pub async fn create_hotel(
    State(state): State<AppState>,
    payload: Result<Json<HotelRequest>, JsonRejection>,
) -> Result<impl IntoResponse, DomainError> {
    let Json(request) = payload.map_err(invalid_body)?;
    let hotel = hotel_service::create_hotel(state.db(), request).await?;

    Ok((StatusCode::CREATED, Json(hotel)))
}

#[utoipa::path(
    get,
    path = "/api/hotels/{id}",
    tag = "hotels",
    params(("id" = i32, Path, description = "Hotel id")),
    responses(
        (status = 200, description = "Hotel found", body = HotelDto),
        (status = 404, description = "Hotel not found")
    )
)]
pub async fn get_hotel(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<HotelDto>, DomainError> {
    let Path(id) = path.map_err(invalid_body)?;
    Ok(Json(hotel_service::get_hotel(state.db(), id).await?))
}

#[utoipa::path(
    put,
    path = "/api/hotels/{id}",
    tag = "hotels",
    params(("id" = i32, Path, description = "Hotel id")),
    request_body = HotelRequest,
    responses(
        (status = 200, description = "Hotel updated", body = HotelDto),
        (status = 400, description = "Invalid hotel data"),
        (status = 404, description = "Hotel not found")
    )
)]
pub async fn update_hotel(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<HotelRequest>, JsonRejection>,
) -> Result<Json<HotelDto>, DomainError> {
    let Path(id) = path.map_err(invalid_body)?;
    let Json(request) = payload.map_err(invalid_body)?;
    Ok(Json(hotel_service::update_hotel(state.db(), id, request).await?))
}

#[utoipa::path(
    delete,
    path = "/api/hotels/{id}",
    tag = "hotels",
    params(("id" = i32, Path, description = "Hotel id")),
    responses(
        (status = 200, description = "Hotel and its images deleted"),
        (status = 400, description = "Hotel is still used by proposals")
    )
)]
pub async fn delete_hotel(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<impl IntoResponse, DomainError> {
    let Path(id) = path.map_err(invalid_body)?;
    hotel_service::delete_hotel(state.db(), state.image_store.as_ref(), id).await?;
    Ok(Json(json!({ "message": "Hotel deleted successfully" })))
}
