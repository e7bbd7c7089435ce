//! SeaORM implementation of CarRentalRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::domain::{CarRental, CarRentalRepository, CreateCarRentalInput, DomainError};
use crate::models::car_rental::{ActiveModel, Column, Entity as CarRentalEntity, Model};

/// SeaORM-based implementation of CarRentalRepository
pub struct SeaOrmCarRentalRepository {
    db: DatabaseConnection,
}

impl SeaOrmCarRentalRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_domain(model: Model) -> CarRental {
    CarRental {
        id: model.id,
        name: model.name,
        address: model.address,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl CarRentalRepository for SeaOrmCarRentalRepository {
    async fn find_all(&self) -> Result<Vec<CarRental>, DomainError> {
        let rentals = CarRentalEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;

        Ok(rentals.into_iter().map(to_domain).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<CarRental>, DomainError> {
        let rental = CarRentalEntity::find_by_id(id).one(&self.db).await?;

        Ok(rental.map(to_domain))
    }

    async fn create(&self, input: CreateCarRentalInput) -> Result<CarRental, DomainError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("Name is required"));
        }

        let now = chrono::Utc::now().to_rfc3339();

        let rental = ActiveModel {
            name: Set(name.to_string()),
            address: Set(crate::services::non_blank(input.address)),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = rental.insert(&self.db).await?;
        tracing::info!("Created car rental '{}' (id {})", result.name, result.id);

        Ok(to_domain(result))
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = CarRentalEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Car rental"));
        }

        Ok(())
    }
}
