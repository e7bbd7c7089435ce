//! Repository implementations using SeaORM

pub mod car_rental_repository;

pub use car_rental_repository::SeaOrmCarRentalRepository;
