//! File storage contract for uploaded hotel images.

use async_trait::async_trait;

use super::DomainError;

/// Persists raw image bytes outside the database.
///
/// Paths returned by [`ImageStore::save`] are opaque to callers: they are
/// stored on the image row and handed back to [`ImageStore::load`].
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Write `data` as `file_name` in the hotel's directory, returning the stored path
    async fn save(&self, hotel_id: i32, file_name: &str, data: &[u8])
    -> Result<String, DomainError>;

    /// Read back a previously stored file
    async fn load(&self, path: &str) -> Result<Vec<u8>, DomainError>;

    /// Remove every stored file of a hotel
    async fn remove_hotel(&self, hotel_id: i32) -> Result<(), DomainError>;
}
