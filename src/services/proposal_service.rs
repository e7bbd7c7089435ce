//! Proposal Service - Price proposals for a hotel and the rooms they request
//!
//! Mirrors the receipt service: a proposal and its rooms are written in one
//! transaction, and updates replace the whole room list.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use std::collections::HashMap;

use super::hotel_service::{find_hotel, hotels_by_id};
use super::reference_service;
use crate::domain::DomainError;
use crate::models::hotel;
use crate::models::proposal::{self, Entity as Proposal, ProposalDto, ProposalRequest};
use crate::models::proposal_room::{
    self, Entity as ProposalRoom, ProposalRoomDto, ProposalRoomRequest,
};
use crate::utils::datetime::{parse_strict, to_storage};

/// Validated check-in/check-out pair, check-out strictly later
#[derive(Debug, Clone, Copy)]
struct Stay {
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
}

/// List all proposals with their hotel and rooms, oldest first
pub async fn list_proposals(db: &DatabaseConnection) -> Result<Vec<ProposalDto>, DomainError> {
    let proposals = Proposal::find()
        .order_by_asc(proposal::Column::Id)
        .all(db)
        .await?;

    attach_details(db, proposals).await
}

/// Get a single proposal with its hotel and rooms
pub async fn get_proposal<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<ProposalDto, DomainError> {
    let proposal = Proposal::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| DomainError::not_found("Proposal"))?;

    let mut dtos = attach_details(conn, vec![proposal]).await?;
    dtos.pop()
        .ok_or_else(|| DomainError::Internal("Proposal disappeared while loading".to_string()))
}

/// Create a proposal with a freshly assigned number and its rooms
pub async fn create_proposal(
    db: &DatabaseConnection,
    request: ProposalRequest,
) -> Result<ProposalDto, DomainError> {
    let stay = validate_request(&request)?;
    let now = Utc::now().to_rfc3339();

    let txn = db.begin().await?;

    let hotel = find_hotel(&txn, request.hotel_id).await?;
    check_capacity(&hotel, request.guests)?;

    let proposal_number = reference_service::next_proposal_number(&txn).await?;

    let new_proposal = proposal::ActiveModel {
        proposal_number: Set(proposal_number),
        hotel_id: Set(hotel.id),
        client_name: Set(request.client_name.trim().to_string()),
        guests: Set(request.guests),
        check_in: Set(to_storage(stay.check_in)),
        check_out: Set(to_storage(stay.check_out)),
        price: Set(request.price),
        breakfast: Set(request.breakfast),
        free_cancel: Set(request.free_cancel),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    };

    let saved = new_proposal.insert(&txn).await?;
    insert_rooms(&txn, saved.id, request.rooms, &now).await?;

    let dto = get_proposal(&txn, saved.id).await?;
    txn.commit().await?;

    tracing::info!(
        "Created proposal {} (id {}) for hotel {}",
        dto.proposal_number,
        dto.id,
        dto.hotel_id
    );
    Ok(dto)
}

/// Replace a proposal's fields and its whole room list.
/// The proposal number is kept.
pub async fn update_proposal(
    db: &DatabaseConnection,
    id: i32,
    request: ProposalRequest,
) -> Result<ProposalDto, DomainError> {
    let txn = db.begin().await?;

    let existing = Proposal::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| DomainError::not_found("Proposal"))?;

    let stay = validate_request(&request)?;
    let hotel = find_hotel(&txn, request.hotel_id).await?;
    check_capacity(&hotel, request.guests)?;

    let now = Utc::now().to_rfc3339();

    let mut active: proposal::ActiveModel = existing.into();
    active.hotel_id = Set(hotel.id);
    active.client_name = Set(request.client_name.trim().to_string());
    active.guests = Set(request.guests);
    active.check_in = Set(to_storage(stay.check_in));
    active.check_out = Set(to_storage(stay.check_out));
    active.price = Set(request.price);
    active.breakfast = Set(request.breakfast);
    active.free_cancel = Set(request.free_cancel);
    active.updated_at = Set(now.clone());
    active.update(&txn).await?;

    ProposalRoom::delete_many()
        .filter(proposal_room::Column::ProposalId.eq(id))
        .exec(&txn)
        .await?;
    insert_rooms(&txn, id, request.rooms, &now).await?;

    let dto = get_proposal(&txn, id).await?;
    txn.commit().await?;

    tracing::info!("Updated proposal {}", dto.proposal_number);
    Ok(dto)
}

/// Delete a proposal and its rooms. Unknown ids are not an error.
pub async fn delete_proposal(db: &DatabaseConnection, id: i32) -> Result<(), DomainError> {
    let txn = db.begin().await?;

    let rooms = ProposalRoom::delete_many()
        .filter(proposal_room::Column::ProposalId.eq(id))
        .exec(&txn)
        .await?
        .rows_affected;
    let proposals = Proposal::delete_by_id(id).exec(&txn).await?.rows_affected;

    txn.commit().await?;

    if proposals == 0 {
        tracing::debug!("Delete of unknown proposal {} ignored", id);
    } else {
        tracing::info!("Deleted proposal {} and {} room(s)", id, rooms);
    }
    Ok(())
}

fn validate_request(request: &ProposalRequest) -> Result<Stay, DomainError> {
    if request.client_name.trim().is_empty() {
        return Err(DomainError::validation("Client name is required"));
    }
    if request.guests < 1 {
        return Err(DomainError::validation("Guests must be at least 1"));
    }
    if !request.price.is_finite() || request.price < 0.0 {
        return Err(DomainError::validation("Price cannot be negative"));
    }

    let check_in = parse_strict(&request.check_in, "check-in date")?;
    let check_out = parse_strict(&request.check_out, "check-out date")?;
    if check_out <= check_in {
        return Err(DomainError::validation(
            "Check-out date must be after check-in date",
        ));
    }

    if request.rooms.is_empty() {
        return Err(DomainError::validation("At least one room is required"));
    }
    if request.rooms.iter().any(|room| room.count < 1) {
        return Err(DomainError::validation("Room count must be greater than 0"));
    }

    Ok(Stay {
        check_in,
        check_out,
    })
}

/// Hotels that track capacity only accept as many guests as they have free spots
fn check_capacity(hotel: &hotel::Model, guests: i32) -> Result<(), DomainError> {
    match hotel.available_spots() {
        Some(available) if guests > available => Err(DomainError::validation(format!(
            "Not enough capacity at {}: only {} spots available",
            hotel.name,
            available.max(0)
        ))),
        _ => Ok(()),
    }
}

async fn insert_rooms<C: ConnectionTrait>(
    conn: &C,
    proposal_id: i32,
    rooms: Vec<ProposalRoomRequest>,
    now: &str,
) -> Result<(), DomainError> {
    for room in rooms {
        let new_room = proposal_room::ActiveModel {
            proposal_id: Set(proposal_id),
            count: Set(room.count),
            created_at: Set(now.to_string()),
            ..Default::default()
        };
        new_room.insert(conn).await?;
    }
    Ok(())
}

async fn attach_details<C: ConnectionTrait>(
    conn: &C,
    proposals: Vec<proposal::Model>,
) -> Result<Vec<ProposalDto>, DomainError> {
    let proposal_ids: Vec<i32> = proposals.iter().map(|p| p.id).collect();
    let mut hotel_ids: Vec<i32> = proposals.iter().map(|p| p.hotel_id).collect();
    hotel_ids.sort_unstable();
    hotel_ids.dedup();

    let mut rooms_by_proposal: HashMap<i32, Vec<ProposalRoomDto>> = HashMap::new();
    if !proposal_ids.is_empty() {
        let rooms = ProposalRoom::find()
            .filter(proposal_room::Column::ProposalId.is_in(proposal_ids))
            .order_by_asc(proposal_room::Column::Id)
            .all(conn)
            .await?;

        for room in rooms {
            rooms_by_proposal
                .entry(room.proposal_id)
                .or_default()
                .push(ProposalRoomDto::from(room));
        }
    }

    let hotels = hotels_by_id(conn, hotel_ids).await?;

    Ok(proposals
        .into_iter()
        .map(|proposal| {
            let rooms = rooms_by_proposal.remove(&proposal.id).unwrap_or_default();
            let hotel = hotels.get(&proposal.hotel_id).cloned();
            ProposalDto::from_model(proposal, hotel, rooms)
        })
        .collect())
}
