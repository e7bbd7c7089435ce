//! Receipt Service - Receipts and the activities they own
//!
//! A receipt and its activities are written as one unit: create, update and
//! delete each run in a single transaction, so a failure part-way leaves the
//! previous state untouched.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::collections::HashMap;

use super::{contains_ignoring_case, non_blank};
use super::reference_service;
use crate::domain::DomainError;
use crate::models::activity::{self, ActivityDto, ActivityRequest, Entity as Activity};
use crate::models::receipt::{self, Entity as Receipt, ReceiptDto, ReceiptRequest};
use crate::utils::datetime::{normalize_optional, parse_strict, to_storage};

/// List all receipts with their activities, oldest first
pub async fn list_receipts(db: &DatabaseConnection) -> Result<Vec<ReceiptDto>, DomainError> {
    let receipts = Receipt::find()
        .order_by_asc(receipt::Column::Id)
        .all(db)
        .await?;

    attach_activities(db, receipts).await
}

/// Get a single receipt with its activities
pub async fn get_receipt<C: ConnectionTrait>(conn: &C, id: i32) -> Result<ReceiptDto, DomainError> {
    let receipt = Receipt::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| DomainError::not_found("Receipt"))?;

    let mut dtos = attach_activities(conn, vec![receipt]).await?;
    dtos.pop()
        .ok_or_else(|| DomainError::Internal("Receipt disappeared while loading".to_string()))
}

/// Case-insensitive substring search over number, client name, email and phone
pub async fn search_receipts(
    db: &DatabaseConnection,
    query: &str,
) -> Result<Vec<ReceiptDto>, DomainError> {
    let term = query.trim();
    if term.is_empty() {
        return Err(DomainError::validation("Search query is required"));
    }

    // SQLite's LIKE only folds ASCII, so matching happens here
    let needle = term.to_lowercase();
    let receipts: Vec<receipt::Model> = Receipt::find()
        .order_by_asc(receipt::Column::Id)
        .all(db)
        .await?
        .into_iter()
        .filter(|r| {
            [
                Some(r.receipt_number.as_str()),
                Some(r.client_name.as_str()),
                r.client_email.as_deref(),
                r.client_phone.as_deref(),
            ]
            .into_iter()
            .flatten()
            .any(|field| contains_ignoring_case(field, &needle))
        })
        .collect();

    attach_activities(db, receipts).await
}

/// Create a receipt with a freshly assigned number and its activities
pub async fn create_receipt(
    db: &DatabaseConnection,
    request: ReceiptRequest,
) -> Result<ReceiptDto, DomainError> {
    let receipt_date = validate_request(&request)?;
    let now = Utc::now().to_rfc3339();

    let txn = db.begin().await?;

    let receipt_number = reference_service::next_receipt_number(&txn).await?;

    let new_receipt = receipt::ActiveModel {
        receipt_number: Set(receipt_number),
        client_name: Set(request.client_name.trim().to_string()),
        client_email: Set(non_blank(request.client_email)),
        client_phone: Set(non_blank(request.client_phone)),
        receipt_date: Set(to_storage(receipt_date)),
        property_name: Set(non_blank(request.property_name)),
        property_address: Set(non_blank(request.property_address)),
        check_in: Set(normalize_optional(request.check_in.as_deref())),
        check_out: Set(normalize_optional(request.check_out.as_deref())),
        amount_paid: Set(request.amount_paid),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    };

    let saved = new_receipt.insert(&txn).await?;
    insert_activities(&txn, saved.id, request.activities, &now).await?;

    let dto = get_receipt(&txn, saved.id).await?;
    txn.commit().await?;

    tracing::info!(
        "Created receipt {} (id {}) with {} activities",
        dto.receipt_number,
        dto.id,
        dto.activities.len()
    );
    Ok(dto)
}

/// Replace a receipt's fields and its whole activity list.
/// The receipt number is kept.
pub async fn update_receipt(
    db: &DatabaseConnection,
    id: i32,
    request: ReceiptRequest,
) -> Result<ReceiptDto, DomainError> {
    let txn = db.begin().await?;

    let existing = Receipt::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| DomainError::not_found("Receipt"))?;

    let receipt_date = validate_request(&request)?;
    let now = Utc::now().to_rfc3339();

    let mut active: receipt::ActiveModel = existing.into();
    active.client_name = Set(request.client_name.trim().to_string());
    active.client_email = Set(non_blank(request.client_email));
    active.client_phone = Set(non_blank(request.client_phone));
    active.receipt_date = Set(to_storage(receipt_date));
    active.property_name = Set(non_blank(request.property_name));
    active.property_address = Set(non_blank(request.property_address));
    active.check_in = Set(normalize_optional(request.check_in.as_deref()));
    active.check_out = Set(normalize_optional(request.check_out.as_deref()));
    active.amount_paid = Set(request.amount_paid);
    active.updated_at = Set(now.clone());

    let removed = Activity::delete_many()
        .filter(activity::Column::ReceiptId.eq(id))
        .exec(&txn)
        .await?
        .rows_affected;
    insert_activities(&txn, id, request.activities, &now).await?;

    active.update(&txn).await?;

    let dto = get_receipt(&txn, id).await?;
    txn.commit().await?;

    tracing::info!(
        "Updated receipt {}: replaced {} activities with {}",
        dto.receipt_number,
        removed,
        dto.activities.len()
    );
    Ok(dto)
}

/// Delete a receipt and its activities. Unknown ids are not an error.
pub async fn delete_receipt(db: &DatabaseConnection, id: i32) -> Result<(), DomainError> {
    let txn = db.begin().await?;

    let activities = Activity::delete_many()
        .filter(activity::Column::ReceiptId.eq(id))
        .exec(&txn)
        .await?
        .rows_affected;
    let receipts = Receipt::delete_by_id(id).exec(&txn).await?.rows_affected;

    txn.commit().await?;

    if receipts == 0 {
        tracing::debug!("Delete of unknown receipt {} ignored", id);
    } else {
        tracing::info!("Deleted receipt {} and {} activities", id, activities);
    }
    Ok(())
}

/// Field checks shared by create and update; returns the parsed receipt date
fn validate_request(request: &ReceiptRequest) -> Result<DateTime<Utc>, DomainError> {
    if request.client_name.trim().is_empty() {
        return Err(DomainError::validation("Client name is required"));
    }
    if !request.amount_paid.is_finite() || request.amount_paid < 0.0 {
        return Err(DomainError::validation("Amount paid cannot be negative"));
    }

    for (index, activity) in request.activities.iter().enumerate() {
        if activity.kind.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "Activity {} is missing a type",
                index + 1
            )));
        }
        if !activity.amount.is_finite() || activity.amount < 0.0 {
            return Err(DomainError::validation(format!(
                "Activity {} amount cannot be negative",
                index + 1
            )));
        }
    }

    parse_strict(&request.receipt_date, "receipt date")
}

async fn insert_activities<C: ConnectionTrait>(
    conn: &C,
    receipt_id: i32,
    activities: Vec<ActivityRequest>,
    now: &str,
) -> Result<(), DomainError> {
    for request in activities {
        let new_activity = activity::ActiveModel {
            receipt_id: Set(receipt_id),
            r#type: Set(request.kind.trim().to_string()),
            property_name: Set(non_blank(request.property_name)),
            property_address: Set(non_blank(request.property_address)),
            check_in: Set(normalize_optional(request.check_in.as_deref())),
            check_out: Set(normalize_optional(request.check_out.as_deref())),
            amount: Set(request.amount),
            car_model: Set(non_blank(request.car_model)),
            car_plate: Set(non_blank(request.car_plate)),
            pickup_location: Set(non_blank(request.pickup_location)),
            dropoff_location: Set(non_blank(request.dropoff_location)),
            transfer_type: Set(non_blank(request.transfer_type)),
            description: Set(non_blank(request.description)),
            created_at: Set(now.to_string()),
            updated_at: Set(now.to_string()),
            ..Default::default()
        };
        new_activity.insert(conn).await?;
    }
    Ok(())
}

async fn attach_activities<C: ConnectionTrait>(
    conn: &C,
    receipts: Vec<receipt::Model>,
) -> Result<Vec<ReceiptDto>, DomainError> {
    let receipt_ids: Vec<i32> = receipts.iter().map(|r| r.id).collect();
    let mut by_receipt: HashMap<i32, Vec<ActivityDto>> = HashMap::new();

    if !receipt_ids.is_empty() {
        let activities = Activity::find()
            .filter(activity::Column::ReceiptId.is_in(receipt_ids))
            .order_by_asc(activity::Column::Id)
            .all(conn)
            .await?;

        for activity in activities {
            by_receipt
                .entry(activity.receipt_id)
                .or_default()
                .push(ActivityDto::from(activity));
        }
    }

    Ok(receipts
        .into_iter()
        .map(|receipt| {
            let activities = by_receipt.remove(&receipt.id).unwrap_or_default();
            ReceiptDto::from_model(receipt, activities)
        })
        .collect())
}
