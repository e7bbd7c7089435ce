//! Reference Service - Human-readable sequential numbers for receipts
//! (`M00001`) and proposals (`P00001`).
//!
//! Every call bumps the kind's row in `reference_counters`. Run inside the
//! transaction that inserts the numbered row, that update holds the write
//! lock until commit, so concurrent creations cannot read the same value.
//! The most recently created row is still consulted so that numbers inserted
//! by other means (seed data, imports) are never handed out twice.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::DomainError;
use crate::models::{proposal, receipt, reference_counter};

const DIGITS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Receipt,
    Proposal,
}

impl ReferenceKind {
    pub fn prefix(&self) -> char {
        match self {
            ReferenceKind::Receipt => 'M',
            ReferenceKind::Proposal => 'P',
        }
    }

    fn counter_key(&self) -> &'static str {
        match self {
            ReferenceKind::Receipt => "receipt",
            ReferenceKind::Proposal => "proposal",
        }
    }
}

/// Render a counter value, zero-padded to five digits (wider values are kept whole)
pub fn format_reference(kind: ReferenceKind, value: i64) -> String {
    format!("{}{:0width$}", kind.prefix(), value, width = DIGITS)
}

/// Numeric part of a stored reference: everything after the first character.
/// `None` when that part is not a non-negative integer.
pub fn parse_reference(number: &str) -> Option<i64> {
    let mut chars = number.chars();
    chars.next()?;
    chars.as_str().parse::<i64>().ok().filter(|n| *n >= 0)
}

/// Next receipt number (`M` prefix)
pub async fn next_receipt_number<C: ConnectionTrait>(conn: &C) -> Result<String, DomainError> {
    next_reference(conn, ReferenceKind::Receipt).await
}

/// Next proposal number (`P` prefix)
pub async fn next_proposal_number<C: ConnectionTrait>(conn: &C) -> Result<String, DomainError> {
    next_reference(conn, ReferenceKind::Proposal).await
}

pub async fn next_reference<C: ConnectionTrait>(
    conn: &C,
    kind: ReferenceKind,
) -> Result<String, DomainError> {
    let key = kind.counter_key();

    // Write first: inside a transaction this takes the lock before any read
    reference_counter::Entity::update_many()
        .col_expr(
            reference_counter::Column::LastValue,
            Expr::col(reference_counter::Column::LastValue).add(1),
        )
        .filter(reference_counter::Column::Kind.eq(key))
        .exec(conn)
        .await?;

    let counter = reference_counter::Entity::find_by_id(key.to_owned())
        .one(conn)
        .await?
        .ok_or_else(|| DomainError::Internal(format!("Missing reference counter '{}'", key)))?;

    let last_stored = last_stored_value(conn, kind).await?.unwrap_or(0);
    let bumped = counter.last_value;
    let next = bumped.max(last_stored + 1);

    if next != bumped {
        let mut active: reference_counter::ActiveModel = counter.into();
        active.last_value = Set(next);
        active.update(conn).await?;
    }

    let number = format_reference(kind, next);
    tracing::debug!("Assigned {:?} reference {}", kind, number);
    Ok(number)
}

/// Numeric value of the most recently created row, by primary key
async fn last_stored_value<C: ConnectionTrait>(
    conn: &C,
    kind: ReferenceKind,
) -> Result<Option<i64>, DomainError> {
    let number = match kind {
        ReferenceKind::Receipt => receipt::Entity::find()
            .order_by_desc(receipt::Column::Id)
            .one(conn)
            .await?
            .map(|r| r.receipt_number),
        ReferenceKind::Proposal => proposal::Entity::find()
            .order_by_desc(proposal::Column::Id)
            .one(conn)
            .await?
            .map(|p| p.proposal_number),
    };

    Ok(number.as_deref().and_then(parse_reference))
}
