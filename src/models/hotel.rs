use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use super::hotel_image::HotelImageDto;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "hotels")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub address: String,
    pub city: String,
    pub group_name: Option<String>,
    /// `hotel` or `apartment`, see [`HotelKind`]
    pub r#type: String,
    pub stars: i32,
    pub breakfast: bool,
    pub location_link: Option<String>,
    pub website_link: Option<String>,
    /// Capacity is only tracked when `max_guests` is set
    pub max_guests: Option<i32>,
    pub current_guests: Option<i32>,
    pub price: Option<f64>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::hotel_image::Entity")]
    HotelImage,
    #[sea_orm(has_many = "super::proposal::Entity")]
    Proposal,
}

impl Related<super::hotel_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HotelImage.def()
    }
}

impl Related<super::proposal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Proposal.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Free guest spots, `None` when the hotel does not track capacity
    pub fn available_spots(&self) -> Option<i32> {
        self.max_guests
            .map(|max| max - self.current_guests.unwrap_or(0))
    }
}

/// Kind of accommodation a hotel row describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotelKind {
    Hotel,
    Apartment,
}

impl HotelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HotelKind::Hotel => "hotel",
            HotelKind::Apartment => "apartment",
        }
    }
}

impl FromStr for HotelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hotel" => Ok(HotelKind::Hotel),
            "apartment" => Ok(HotelKind::Apartment),
            other => Err(format!("unknown hotel type '{}'", other)),
        }
    }
}

impl fmt::Display for HotelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body for creating or updating a hotel
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HotelRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    pub group_name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub stars: i32,
    #[serde(default)]
    pub breakfast: bool,
    pub location_link: Option<String>,
    pub website_link: Option<String>,
    pub max_guests: Option<i32>,
    pub current_guests: Option<i32>,
    pub price: Option<f64>,
}

/// Hotel as returned by the API, images ordered by sort position
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HotelDto {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub city: String,
    pub group_name: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub stars: i32,
    pub breakfast: bool,
    pub location_link: Option<String>,
    pub website_link: Option<String>,
    pub max_guests: Option<i32>,
    pub current_guests: Option<i32>,
    pub price: Option<f64>,
    pub images: Vec<HotelImageDto>,
    pub created_at: String,
    pub updated_at: String,
}

impl HotelDto {
    pub fn from_model(model: Model, images: Vec<HotelImageDto>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            address: model.address,
            city: model.city,
            group_name: model.group_name,
            kind: model.r#type,
            stars: model.stars,
            breakfast: model.breakfast,
            location_link: model.location_link,
            website_link: model.website_link,
            max_guests: model.max_guests,
            current_guests: model.current_guests,
            price: model.price,
            images,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
