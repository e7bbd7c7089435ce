//! Disk-backed image store
//!
//! Files live under `{root}/hotels/{hotel_id}/`. Stored paths are returned
//! relative to the working directory exactly as they were written, so they
//! can be read back without knowing the root.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::{DomainError, ImageStore};

pub struct DiskImageStore {
    root: PathBuf,
}

impl DiskImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn hotel_dir(&self, hotel_id: i32) -> PathBuf {
        self.root.join("hotels").join(hotel_id.to_string())
    }
}

#[async_trait]
impl ImageStore for DiskImageStore {
    async fn save(
        &self,
        hotel_id: i32,
        file_name: &str,
        data: &[u8],
    ) -> Result<String, DomainError> {
        // Only the final component is used; uploads cannot escape the hotel directory
        let name = Path::new(file_name)
            .file_name()
            .ok_or_else(|| DomainError::validation(format!("Invalid file name '{}'", file_name)))?;

        let dir = self.hotel_dir(hotel_id);
        tokio::fs::create_dir_all(&dir).await?;

        let path = dir.join(name);
        tokio::fs::write(&path, data).await?;

        tracing::debug!("Stored {} bytes at {}", data.len(), path.display());
        Ok(path.to_string_lossy().into_owned())
    }

    async fn load(&self, path: &str) -> Result<Vec<u8>, DomainError> {
        Ok(tokio::fs::read(path).await?)
    }

    async fn remove_hotel(&self, hotel_id: i32) -> Result<(), DomainError> {
        match tokio::fs::remove_dir_all(self.hotel_dir(hotel_id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
