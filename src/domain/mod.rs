//! Domain layer - Pure business abstractions
//!
//! Trait definitions for data access and file storage, plus the domain
//! error type. Implementations live in the infrastructure layer.

pub mod errors;
pub mod repositories;
pub mod storage;

pub use errors::DomainError;
pub use repositories::*;
pub use storage::ImageStore;
