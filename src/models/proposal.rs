use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::hotel::HotelDto;
use super::proposal_room::{ProposalRoomDto, ProposalRoomRequest};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "proposals")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// `P` followed by at least five digits, assigned once at creation
    #[sea_orm(unique)]
    pub proposal_number: String,
    pub hotel_id: i32,
    pub client_name: String,
    pub guests: i32,
    pub check_in: String,
    pub check_out: String,
    pub price: f64,
    pub breakfast: bool,
    pub free_cancel: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::hotel::Entity",
        from = "Column::HotelId",
        to = "super::hotel::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Hotel,
    #[sea_orm(has_many = "super::proposal_room::Entity")]
    ProposalRoom,
}

impl Related<super::hotel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hotel.def()
    }
}

impl Related<super::proposal_room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProposalRoom.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Request body for creating or replacing a proposal
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProposalRequest {
    #[serde(default)]
    pub hotel_id: i32,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub guests: i32,
    #[serde(default)]
    pub check_in: String,
    #[serde(default)]
    pub check_out: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub breakfast: bool,
    #[serde(default)]
    pub free_cancel: bool,
    #[serde(default)]
    pub rooms: Vec<ProposalRoomRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProposalDto {
    pub id: i32,
    pub proposal_number: String,
    pub hotel_id: i32,
    pub client_name: String,
    pub guests: i32,
    pub check_in: String,
    pub check_out: String,
    pub price: f64,
    pub breakfast: bool,
    pub free_cancel: bool,
    pub hotel: Option<HotelDto>,
    pub rooms: Vec<ProposalRoomDto>,
    pub created_at: String,
    pub updated_at: String,
}

impl ProposalDto {
    pub fn from_model(model: Model, hotel: Option<HotelDto>, rooms: Vec<ProposalRoomDto>) -> Self {
        Self {
            id: model.id,
            proposal_number: model.proposal_number,
            hotel_id: model.hotel_id,
            client_name: model.client_name,
            guests: model.guests,
            check_in: model.check_in,
            check_out: model.check_out,
            price: model.price,
            breakfast: model.breakfast,
            free_cancel: model.free_cancel,
            hotel,
            rooms,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
