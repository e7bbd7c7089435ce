//! Hotel Image Service - Upload and listing of hotel pictures
//!
//! Sort positions continue from the hotel's current maximum, one per file in
//! request order. Two concurrent uploads to the same hotel can therefore
//! compute the same positions; listing breaks such ties by id.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use std::path::Path;

use super::hotel_service::find_hotel;
use crate::domain::{DomainError, ImageStore};
use crate::models::hotel_image::{self, Entity as HotelImage, HotelImageDto};

/// One file received in an upload request
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Extension used to store an upload. Unsupported or missing extensions are
/// stored as `.jpg`.
pub fn storage_extension(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("jpeg") => ".jpeg",
        Some("png") => ".png",
        Some("webp") => ".webp",
        _ => ".jpg",
    }
}

pub fn mime_for_extension(ext: &str) -> &'static str {
    match ext {
        ".png" => "image/png",
        ".webp" => "image/webp",
        _ => "image/jpeg",
    }
}

/// Store uploaded files and record one image row per stored file.
///
/// A file that cannot be written, or whose row cannot be inserted, is
/// skipped; files stored before it are kept.
pub async fn upload_images(
    db: &DatabaseConnection,
    store: &dyn ImageStore,
    hotel_id: i32,
    files: Vec<UploadedFile>,
) -> Result<Vec<HotelImageDto>, DomainError> {
    let hotel = find_hotel(db, hotel_id).await?;

    if files.is_empty() {
        return Err(DomainError::validation("No files"));
    }

    let mut sort_order = HotelImage::find()
        .filter(hotel_image::Column::HotelId.eq(hotel.id))
        .order_by_desc(hotel_image::Column::SortOrder)
        .one(db)
        .await?
        .map(|image| image.sort_order)
        .unwrap_or(0);

    let mut created = Vec::with_capacity(files.len());

    for file in files {
        let ext = storage_extension(&file.file_name);
        sort_order += 1;
        let stored_name = format!("{}_{}{}", hotel.id, sort_order, ext);

        let path = match store.save(hotel.id, &stored_name, &file.data).await {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(
                    "Skipping upload '{}' for hotel {}: {}",
                    file.file_name,
                    hotel.id,
                    e
                );
                continue;
            }
        };

        let image = hotel_image::ActiveModel {
            hotel_id: Set(hotel.id),
            path: Set(path),
            mime: Set(mime_for_extension(ext).to_string()),
            sort_order: Set(sort_order),
            created_at: Set(Utc::now().to_rfc3339()),
            ..Default::default()
        };

        match image.insert(db).await {
            Ok(model) => created.push(HotelImageDto::from(model)),
            Err(e) => tracing::warn!(
                "Stored '{}' but failed to record it for hotel {}: {}",
                stored_name,
                hotel.id,
                e
            ),
        }
    }

    created.sort_by_key(|image| image.sort_order);
    tracing::info!("Uploaded {} image(s) for hotel {}", created.len(), hotel.id);
    Ok(created)
}

/// List a hotel's images by sort position
pub async fn list_images(
    db: &DatabaseConnection,
    hotel_id: i32,
) -> Result<Vec<HotelImageDto>, DomainError> {
    let hotel = find_hotel(db, hotel_id).await?;

    let images = HotelImage::find()
        .filter(hotel_image::Column::HotelId.eq(hotel.id))
        .order_by_asc(hotel_image::Column::SortOrder)
        .order_by_asc(hotel_image::Column::Id)
        .all(db)
        .await?;

    Ok(images.into_iter().map(HotelImageDto::from).collect())
}

/// A hotel's images as `data:` URLs, optionally limited to the first `limit`.
/// Files that can no longer be read are left out.
pub async fn images_as_data_urls(
    db: &DatabaseConnection,
    store: &dyn ImageStore,
    hotel_id: i32,
    limit: Option<u64>,
) -> Result<Vec<String>, DomainError> {
    let hotel = find_hotel(db, hotel_id).await?;

    let mut query = HotelImage::find()
        .filter(hotel_image::Column::HotelId.eq(hotel.id))
        .order_by_asc(hotel_image::Column::SortOrder)
        .order_by_asc(hotel_image::Column::Id);
    if let Some(limit) = limit.filter(|l| *l > 0) {
        query = query.limit(limit);
    }

    let images = query.all(db).await?;
    let mut urls = Vec::with_capacity(images.len());

    for image in images {
        match store.load(&image.path).await {
            Ok(bytes) => urls.push(format!(
                "data:{};base64,{}",
                image.mime,
                STANDARD.encode(bytes)
            )),
            Err(e) => tracing::debug!("Skipping unreadable image {}: {}", image.path, e),
        }
    }

    Ok(urls)
}
