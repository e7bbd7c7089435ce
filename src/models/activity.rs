use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub receipt_id: i32,
    /// Free-form; the frontend sends `hotel`, `car_rental` or `transfer`
    pub r#type: String,
    pub property_name: Option<String>,
    pub property_address: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub amount: f64,
    pub car_model: Option<String>,
    pub car_plate: Option<String>,
    pub pickup_location: Option<String>,
    pub dropoff_location: Option<String>,
    pub transfer_type: Option<String>,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::receipt::Entity",
        from = "Column::ReceiptId",
        to = "super::receipt::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Receipt,
}

impl Related<super::receipt::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Receipt.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// One line item of a receipt request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRequest {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub property_name: Option<String>,
    pub property_address: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    #[serde(default)]
    pub amount: f64,
    pub car_model: Option<String>,
    pub car_plate: Option<String>,
    pub pickup_location: Option<String>,
    pub dropoff_location: Option<String>,
    pub transfer_type: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDto {
    pub id: i32,
    pub receipt_id: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub property_name: Option<String>,
    pub property_address: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub amount: f64,
    pub car_model: Option<String>,
    pub car_plate: Option<String>,
    pub pickup_location: Option<String>,
    pub dropoff_location: Option<String>,
    pub transfer_type: Option<String>,
    pub description: Option<String>,
}

impl From<Model> for ActivityDto {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            receipt_id: model.receipt_id,
            kind: model.r#type,
            property_name: model.property_name,
            property_address: model.property_address,
            check_in: model.check_in,
            check_out: model.check_out,
            amount: model.amount,
            car_model: model.car_model,
            car_plate: model.car_plate,
            pickup_location: model.pickup_location,
            dropoff_location: model.dropoff_location,
            transfer_type: model.transfer_type,
            description: model.description,
        }
    }
}
