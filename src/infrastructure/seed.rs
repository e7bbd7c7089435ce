//! Reference data for a fresh installation
//!
//! Each table is seeded only while it is empty, so restarting with seeding
//! enabled never duplicates rows. Receipts go through the receipt service so
//! they get regular reference numbers.

use chrono::{Duration, Utc};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

use crate::domain::{CarRentalRepository, CreateCarRentalInput, DomainError};
use crate::infrastructure::SeaOrmCarRentalRepository;
use crate::models::activity::ActivityRequest;
use crate::models::{HotelRequest, ReceiptRequest, car_rental, hotel, receipt};
use crate::services::{hotel_service, receipt_service};

const HOTELS: [(&str, &str); 5] = [
    ("Hilton Tashkent City", "Amir Temur Square 107/B"),
    ("Hyatt Regency Tashkent", "Navoi Street 1A"),
    ("InterContinental Tashkent", "Shakhrisabz Street 2"),
    ("Wyndham Tashkent", "Amir Temur Avenue 56"),
    ("Lotte City Hotel Tashkent Palace", "Buyuk Turon Street 56"),
];

const CAR_RENTALS: [&str; 5] = [
    "Uzbekistan Airways Car Rental",
    "Avis Uzbekistan",
    "Local Car Rent",
    "UzAuto Rent",
    "Express Car Rental",
];

pub async fn seed_reference_data(db: &DatabaseConnection) -> Result<(), DomainError> {
    if hotel::Entity::find().count(db).await? == 0 {
        for (name, address) in HOTELS {
            let request = HotelRequest {
                name: name.to_string(),
                address: address.to_string(),
                city: "Tashkent".to_string(),
                kind: "hotel".to_string(),
                stars: 5,
                ..Default::default()
            };
            if let Err(e) = hotel_service::create_hotel(db, request).await {
                tracing::warn!("Failed to seed hotel {}: {}", name, e);
            }
        }
        tracing::info!("Hotels seeded");
    }

    if car_rental::Entity::find().count(db).await? == 0 {
        let repo = SeaOrmCarRentalRepository::new(db.clone());
        for name in CAR_RENTALS {
            let input = CreateCarRentalInput {
                name: name.to_string(),
                address: None,
            };
            if let Err(e) = repo.create(input).await {
                tracing::warn!("Failed to seed car rental {}: {}", name, e);
            }
        }
        tracing::info!("Car rentals seeded");
    }

    if receipt::Entity::find().count(db).await? == 0 {
        for request in demo_receipts() {
            let client = request.client_name.clone();
            if let Err(e) = receipt_service::create_receipt(db, request).await {
                tracing::warn!("Failed to seed receipt for {}: {}", client, e);
            }
        }
        tracing::info!("Demo receipts seeded");
    }

    Ok(())
}

fn demo_receipts() -> Vec<ReceiptRequest> {
    let now = Utc::now();
    let tomorrow = (now + Duration::days(1)).to_rfc3339();
    let yesterday = now - Duration::days(1);
    let now_text = now.to_rfc3339();

    vec![
        ReceiptRequest {
            client_name: "John Smith".to_string(),
            client_email: Some("john.smith@example.com".to_string()),
            client_phone: Some("+1234567890".to_string()),
            receipt_date: now_text.clone(),
            amount_paid: 250.0,
            activities: vec![ActivityRequest {
                kind: "hotel".to_string(),
                property_name: Some("Hilton Tashkent City".to_string()),
                property_address: Some("Amir Temur Square 107/B".to_string()),
                check_in: Some(now_text.clone()),
                check_out: Some(tomorrow.clone()),
                amount: 250.0,
                ..Default::default()
            }],
            ..Default::default()
        },
        ReceiptRequest {
            client_name: "Alice Johnson".to_string(),
            client_email: Some("alice.j@example.com".to_string()),
            client_phone: Some("+0987654321".to_string()),
            receipt_date: yesterday.to_rfc3339(),
            amount_paid: 300.0,
            activities: vec![
                ActivityRequest {
                    kind: "hotel".to_string(),
                    property_name: Some("Hyatt Regency Tashkent".to_string()),
                    property_address: Some("Navoi Street 1A".to_string()),
                    check_in: Some(yesterday.to_rfc3339()),
                    check_out: Some(tomorrow.clone()),
                    amount: 200.0,
                    ..Default::default()
                },
                ActivityRequest {
                    kind: "car_rental".to_string(),
                    property_name: Some("Avis Uzbekistan".to_string()),
                    property_address: Some("Downtown Tashkent".to_string()),
                    check_in: Some(now_text),
                    check_out: Some(tomorrow),
                    amount: 100.0,
                    ..Default::default()
                },
            ],
            ..Default::default()
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;

    #[tokio::test]
    async fn seeds_once() {
        let db = init_db("sqlite::memory:").await.expect("Failed to init db");

        seed_reference_data(&db).await.expect("First seed failed");
        seed_reference_data(&db).await.expect("Second seed failed");

        assert_eq!(hotel::Entity::find().count(&db).await.unwrap(), 5);
        assert_eq!(car_rental::Entity::find().count(&db).await.unwrap(), 5);

        let receipts = receipt_service::list_receipts(&db).await.unwrap();
        assert_eq!(receipts.len(), 2);
        assert_eq!(receipts[0].receipt_number, "M00001");
        assert_eq!(receipts[1].receipt_number, "M00002");
        assert_eq!(receipts[1].activities.len(), 2);
    }
}
