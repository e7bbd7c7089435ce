//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::DomainError;

/// Car rental data for API responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarRental {
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Input for creating a car rental
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateCarRentalInput {
    #[serde(default)]
    pub name: String,
    pub address: Option<String>,
}

/// Repository trait for CarRental entity
#[async_trait]
pub trait CarRentalRepository: Send + Sync {
    /// Find all car rentals, oldest first
    async fn find_all(&self) -> Result<Vec<CarRental>, DomainError>;

    /// Find a car rental by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<CarRental>, DomainError>;

    /// Create a new car rental
    async fn create(&self, input: CreateCarRentalInput) -> Result<CarRental, DomainError>;

    /// Delete a car rental by ID, `NotFound` if it does not exist
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}
