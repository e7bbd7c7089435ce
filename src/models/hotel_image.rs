use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "hotel_images")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub hotel_id: i32,
    /// Location handed back by the image store
    pub path: String,
    pub mime: String,
    pub sort_order: i32,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::hotel::Entity",
        from = "Column::HotelId",
        to = "super::hotel::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Hotel,
}

impl Related<super::hotel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hotel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// URL path under which the static file service exposes this image
    pub fn public_path(&self) -> String {
        let file_name = Path::new(&self.path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("/uploads/hotels/{}/{}", self.hotel_id, file_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HotelImageDto {
    pub id: i32,
    pub path: String,
    pub mime: String,
    pub sort_order: i32,
}

impl From<Model> for HotelImageDto {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            path: model.public_path(),
            mime: model.mime,
            sort_order: model.sort_order,
        }
    }
}
