use axum::{
    Json,
    extract::{
        Multipart, Path, Query, State, multipart::MultipartRejection, rejection::PathRejection,
    },
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use super::error::invalid_body;
use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::services::hotel_image_service::{self, UploadedFile};
use crate::services::hotel_service;

/// Multipart field names accepted for uploads
const FILE_FIELDS: [&str; 2] = ["files", "file"];

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Base64Query {
    /// Only the first `limit` images; ignored unless a positive integer
    pub limit: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/hotels/{id}/images",
    tag = "hotels",
    params(("id" = i32, Path, description = "Hotel id")),
    request_body(
        content = Vec<u8>,
        content_type = "multipart/form-data",
        description = "One or more `files` / `file` parts"
    ),
    responses(
        (status = 200, description = "Stored images, by sort position"),
        (status = 400, description = "No files or invalid multipart body"),
        (status = 404, description = "Hotel not found")
    )
)]
pub async fn upload_images(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, DomainError> {
    let Path(id) = path.map_err(invalid_body)?;
    // Unknown hotels are reported before the body is looked at
    hotel_service::find_hotel(state.db(), id).await?;

    let mut multipart = multipart.map_err(invalid_body)?;
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(invalid_body)? {
        let is_file = field
            .name()
            .is_some_and(|name| FILE_FIELDS.contains(&name));
        if !is_file {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await.map_err(invalid_body)?;
        files.push(UploadedFile {
            file_name,
            data: data.to_vec(),
        });
    }

    let uploaded =
        hotel_image_service::upload_images(state.db(), state.image_store.as_ref(), id, files)
            .await?;

    Ok(Json(json!({ "uploaded": uploaded })))
}

#[utoipa::path(
    get,
    path = "/api/hotels/{id}/images",
    tag = "hotels",
    params(("id" = i32, Path, description = "Hotel id")),
    responses(
        (status = 200, description = "Images by sort position"),
        (status = 404, description = "Hotel not found")
    )
)]
pub async fn list_images(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<impl IntoResponse, DomainError> {
    let Path(id) = path.map_err(invalid_body)?;
    let images = hotel_image_service::list_images(state.db(), id).await?;
    Ok(Json(json!({ "images": images })))
}

#[utoipa::path(
    get,
    path = "/api/hotels/{id}/images/base64",
    tag = "hotels",
    params(("id" = i32, Path, description = "Hotel id"), Base64Query),
    responses(
        (status = 200, description = "Images as data URLs"),
        (status = 404, description = "Hotel not found")
    )
)]
pub async fn images_base64(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    Query(params): Query<Base64Query>,
) -> Result<impl IntoResponse, DomainError> {
    let Path(id) = path.map_err(invalid_body)?;
    let limit = params
        .limit
        .as_deref()
        .and_then(|l| l.trim().parse::<u64>().ok())
        .filter(|l| *l > 0);

    let images =
        hotel_image_service::images_as_data_urls(state.db(), state.image_store.as_ref(), id, limit)
            .await?;

    Ok(Json(json!({ "images": images })))
}
