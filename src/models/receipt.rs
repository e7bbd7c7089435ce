use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::activity::{ActivityDto, ActivityRequest};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "receipts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// `M` followed by at least five digits, assigned once at creation
    #[sea_orm(unique)]
    pub receipt_number: String,
    pub client_name: String,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub receipt_date: String,
    pub property_name: Option<String>,
    pub property_address: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub amount_paid: f64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::activity::Entity")]
    Activity,
}

impl Related<super::activity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Activity.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Request body for creating or replacing a receipt.
///
/// A `receiptNumber` sent by the client is ignored: numbers are assigned by
/// the server.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptRequest {
    #[serde(default)]
    pub client_name: String,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    #[serde(default)]
    pub receipt_date: String,
    pub property_name: Option<String>,
    pub property_address: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    #[serde(default)]
    pub amount_paid: f64,
    #[serde(default)]
    pub activities: Vec<ActivityRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptDto {
    pub id: i32,
    pub receipt_number: String,
    pub client_name: String,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub receipt_date: String,
    pub property_name: Option<String>,
    pub property_address: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub amount_paid: f64,
    pub activities: Vec<ActivityDto>,
    pub created_at: String,
    pub updated_at: String,
}

impl ReceiptDto {
    pub fn from_model(model: Model, activities: Vec<ActivityDto>) -> Self {
        Self {
            id: model.id,
            receipt_number: model.receipt_number,
            client_name: model.client_name,
            client_email: model.client_email,
            client_phone: model.client_phone,
            receipt_date: model.receipt_date,
            property_name: model.property_name,
            property_address: model.property_address,
            check_in: model.check_in,
            check_out: model.check_out,
            amount_paid: model.amount_paid,
            activities,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
