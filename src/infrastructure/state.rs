//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::{CarRentalRepository, ImageStore};
use crate::infrastructure::SeaOrmCarRentalRepository;
use crate::infrastructure::storage::DiskImageStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    /// Car rental repository
    pub car_rental_repo: Arc<dyn CarRentalRepository>,
    /// Where uploaded hotel images are written
    pub image_store: Arc<dyn ImageStore>,
}

impl AppState {
    /// Create a new AppState storing images under `upload_dir`
    pub fn new(db: DatabaseConnection, upload_dir: impl Into<PathBuf>) -> Self {
        let car_rental_repo = Arc::new(SeaOrmCarRentalRepository::new(db.clone()));
        let image_store = Arc::new(DiskImageStore::new(upload_dir));

        Self {
            db,
            car_rental_repo,
            image_store,
        }
    }

    /// Swap the image store, e.g. for one that fails on purpose in tests
    pub fn with_image_store(mut self, store: Arc<dyn ImageStore>) -> Self {
        self.image_store = store;
        self
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

// Implement FromRef to allow extracting DatabaseConnection from AppState
impl axum::extract::FromRef<AppState> for DatabaseConnection {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
