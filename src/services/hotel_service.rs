//! Hotel Service - Hotel CRUD, city filtering and guarded deletion

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::collections::HashMap;

use super::{contains_ignoring_case, non_blank};
use crate::domain::{DomainError, ImageStore};
use crate::models::hotel::{self, Entity as Hotel, HotelDto, HotelKind, HotelRequest};
use crate::models::hotel_image::{self, Entity as HotelImage, HotelImageDto};
use crate::models::proposal::{self, Entity as Proposal};

/// Filter parameters for listing hotels
#[derive(Debug, Default, Clone)]
pub struct HotelFilter {
    /// Case-insensitive substring of the city
    pub city: Option<String>,
}

/// List hotels with their images
pub async fn list_hotels(
    db: &DatabaseConnection,
    filter: HotelFilter,
) -> Result<Vec<HotelDto>, DomainError> {
    let city = filter
        .city
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_lowercase);

    let mut hotels = Hotel::find()
        .order_by_asc(hotel::Column::Id)
        .all(db)
        .await?;
    if let Some(city) = city {
        hotels.retain(|h| contains_ignoring_case(&h.city, &city));
    }

    attach_images(db, hotels).await
}

/// Load the hotel row or fail with "Hotel not found"
pub async fn find_hotel<C: ConnectionTrait>(conn: &C, id: i32) -> Result<hotel::Model, DomainError> {
    Hotel::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| DomainError::not_found("Hotel"))
}

/// Get a single hotel with its images
pub async fn get_hotel<C: ConnectionTrait>(conn: &C, id: i32) -> Result<HotelDto, DomainError> {
    let hotel = find_hotel(conn, id).await?;
    let mut dtos = attach_images(conn, vec![hotel]).await?;
    dtos.pop()
        .ok_or_else(|| DomainError::Internal("Hotel disappeared while loading".to_string()))
}

pub async fn create_hotel(
    db: &DatabaseConnection,
    request: HotelRequest,
) -> Result<HotelDto, DomainError> {
    let kind = validate_request(&request)?;
    let now = Utc::now().to_rfc3339();

    let new_hotel = hotel::ActiveModel {
        name: Set(request.name.trim().to_string()),
        address: Set(request.address.trim().to_string()),
        city: Set(request.city.trim().to_string()),
        group_name: Set(non_blank(request.group_name)),
        r#type: Set(kind.as_str().to_string()),
        stars: Set(request.stars),
        breakfast: Set(request.breakfast),
        location_link: Set(non_blank(request.location_link)),
        website_link: Set(non_blank(request.website_link)),
        max_guests: Set(request.max_guests),
        current_guests: Set(request.current_guests),
        price: Set(request.price),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    let saved = new_hotel.insert(db).await?;
    tracing::info!("Created hotel '{}' (id {})", saved.name, saved.id);

    Ok(HotelDto::from_model(saved, Vec::new()))
}

pub async fn update_hotel(
    db: &DatabaseConnection,
    id: i32,
    request: HotelRequest,
) -> Result<HotelDto, DomainError> {
    let existing = find_hotel(db, id).await?;
    let kind = validate_request(&request)?;

    let mut active: hotel::ActiveModel = existing.into();
    active.name = Set(request.name.trim().to_string());
    active.address = Set(request.address.trim().to_string());
    active.city = Set(request.city.trim().to_string());
    active.group_name = Set(non_blank(request.group_name));
    active.r#type = Set(kind.as_str().to_string());
    active.stars = Set(request.stars);
    active.breakfast = Set(request.breakfast);
    active.location_link = Set(non_blank(request.location_link));
    active.website_link = Set(non_blank(request.website_link));
    active.max_guests = Set(request.max_guests);
    active.current_guests = Set(request.current_guests);
    active.price = Set(request.price);
    active.updated_at = Set(Utc::now().to_rfc3339());

    active.update(db).await?;
    get_hotel(db, id).await
}

/// Delete a hotel and its image rows, then its stored files.
///
/// Refused while proposals still reference the hotel. Unknown ids are not
/// an error.
pub async fn delete_hotel(
    db: &DatabaseConnection,
    store: &dyn ImageStore,
    id: i32,
) -> Result<(), DomainError> {
    let txn = db.begin().await?;

    let proposals = Proposal::find()
        .filter(proposal::Column::HotelId.eq(id))
        .count(&txn)
        .await?;
    if proposals > 0 {
        return Err(DomainError::validation(format!(
            "Hotel is referenced by {} proposal(s) and cannot be deleted",
            proposals
        )));
    }

    HotelImage::delete_many()
        .filter(hotel_image::Column::HotelId.eq(id))
        .exec(&txn)
        .await?;
    let deleted = Hotel::delete_by_id(id).exec(&txn).await?.rows_affected;

    txn.commit().await?;

    if deleted > 0 {
        tracing::info!("Deleted hotel {}", id);
        // Rows are committed; file cleanup is best-effort
        if let Err(e) = store.remove_hotel(id).await {
            tracing::warn!("Failed to remove image files of hotel {}: {}", id, e);
        }
    }
    Ok(())
}

/// Hotels (with images) keyed by id, for embedding in other responses
pub(crate) async fn hotels_by_id<C: ConnectionTrait>(
    conn: &C,
    ids: Vec<i32>,
) -> Result<HashMap<i32, HotelDto>, DomainError> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let hotels = Hotel::find()
        .filter(hotel::Column::Id.is_in(ids))
        .all(conn)
        .await?;

    Ok(attach_images(conn, hotels)
        .await?
        .into_iter()
        .map(|hotel| (hotel.id, hotel))
        .collect())
}

fn validate_request(request: &HotelRequest) -> Result<HotelKind, DomainError> {
    if request.name.trim().is_empty()
        || request.address.trim().is_empty()
        || request.city.trim().is_empty()
    {
        return Err(DomainError::validation("Name, Address, and City are required"));
    }
    if !(1..=5).contains(&request.stars) {
        return Err(DomainError::validation("Stars must be between 1 and 5"));
    }
    let kind = request
        .kind
        .trim()
        .parse::<HotelKind>()
        .map_err(|_| DomainError::validation("Type must be 'hotel' or 'apartment'"))?;

    if request.max_guests.is_some_and(|max| max < 0)
        || request.current_guests.is_some_and(|current| current < 0)
    {
        return Err(DomainError::validation("Guest counts cannot be negative"));
    }
    if let (Some(max), Some(current)) = (request.max_guests, request.current_guests) {
        if current > max {
            return Err(DomainError::validation(
                "Current guests cannot exceed max guests",
            ));
        }
    }
    if request.price.is_some_and(|price| !price.is_finite() || price < 0.0) {
        return Err(DomainError::validation("Price cannot be negative"));
    }

    Ok(kind)
}

async fn attach_images<C: ConnectionTrait>(
    conn: &C,
    hotels: Vec<hotel::Model>,
) -> Result<Vec<HotelDto>, DomainError> {
    let hotel_ids: Vec<i32> = hotels.iter().map(|h| h.id).collect();
    let mut by_hotel: HashMap<i32, Vec<HotelImageDto>> = HashMap::new();

    if !hotel_ids.is_empty() {
        let images = HotelImage::find()
            .filter(hotel_image::Column::HotelId.is_in(hotel_ids))
            .order_by_asc(hotel_image::Column::SortOrder)
            .order_by_asc(hotel_image::Column::Id)
            .all(conn)
            .await?;

        for image in images {
            by_hotel
                .entry(image.hotel_id)
                .or_default()
                .push(HotelImageDto::from(image));
        }
    }

    Ok(hotels
        .into_iter()
        .map(|hotel| {
            let images = by_hotel.remove(&hotel.id).unwrap_or_default();
            HotelDto::from_model(hotel, images)
        })
        .collect())
}
