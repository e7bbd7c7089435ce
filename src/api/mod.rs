pub mod car_rentals;
pub mod error;
pub mod health;
pub mod hotel_images;
pub mod hotels;
pub mod proposals;
pub mod receipts;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::infrastructure::AppState;

/// Largest accepted image upload request
const UPLOAD_BODY_LIMIT: usize = 32 * 1024 * 1024;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Receipts (search before :id)
        .route(
            "/receipts",
            get(receipts::list_receipts).post(receipts::create_receipt),
        )
        .route("/receipts/search", get(receipts::search_receipts))
        .route(
            "/receipts/:id",
            get(receipts::get_receipt)
                .put(receipts::update_receipt)
                .delete(receipts::delete_receipt),
        )
        // Hotels
        .route("/hotels", get(hotels::list_hotels).post(hotels::create_hotel))
        .route(
            "/hotels/:id",
            get(hotels::get_hotel)
                .put(hotels::update_hotel)
                .delete(hotels::delete_hotel),
        )
        .route(
            "/hotels/:id/images",
            post(hotel_images::upload_images)
                .get(hotel_images::list_images)
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route(
            "/hotels/:id/images/base64",
            get(hotel_images::images_base64),
        )
        // Car rentals
        .route(
            "/car-rentals",
            get(car_rentals::list_car_rentals).post(car_rentals::create_car_rental),
        )
        .route(
            "/car-rentals/:id",
            get(car_rentals::get_car_rental).delete(car_rentals::delete_car_rental),
        )
        // Proposals
        .route(
            "/proposals",
            get(proposals::list_proposals).post(proposals::create_proposal),
        )
        .route(
            "/proposals/:id",
            get(proposals::get_proposal)
                .put(proposals::update_proposal)
                .delete(proposals::delete_proposal),
        )
        .with_state(state)
}
