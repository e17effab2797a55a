use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::uploads::models::{extension_for_content_type, ImageUpload, UploadedImage};

/// Seam for photo storage. The demo simulates a remote object store;
/// a real one plugs in behind the same trait.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Stores an already-validated upload and returns its display URL.
    async fn store(&self, upload: ImageUpload) -> Result<UploadedImage>;
}

/// Pretends to push the photo to a remote store, taking the configured
/// latency and minting a local display URL.
pub struct SimulatedImageStore {
    latency: Duration,
    base_url: String,
}

impl SimulatedImageStore {
    pub fn new(latency: Duration, base_url: String) -> Self {
        Self {
            latency,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ImageStore for SimulatedImageStore {
    async fn store(&self, upload: ImageUpload) -> Result<UploadedImage> {
        tokio::time::sleep(self.latency).await;

        let extension = extension_for_content_type(&upload.content_type).unwrap_or("bin");
        let display_url = format!("{}/{}.{}", self.base_url, Uuid::now_v7(), extension);

        tracing::debug!(
            "Stored {} ({} bytes) as {}",
            upload.filename,
            upload.data.len(),
            display_url
        );

        Ok(UploadedImage {
            display_url,
            filename: upload.filename,
            content_type: upload.content_type,
            size_bytes: upload.data.len(),
            uploaded_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn store_derives_url_from_base_and_extension() {
        let store = SimulatedImageStore::new(
            Duration::ZERO,
            "https://storage.example/uploads/".to_string(),
        );
        let uploaded = store
            .store(ImageUpload {
                data: vec![1, 2, 3],
                filename: "pothole.png".to_string(),
                content_type: "image/png".to_string(),
            })
            .await
            .unwrap();

        assert!(uploaded.display_url.starts_with("https://storage.example/uploads/"));
        assert!(uploaded.display_url.ends_with(".png"));
        assert_eq!(uploaded.size_bytes, 3);
    }

    #[test]
    fn distinct_uploads_get_distinct_urls() {
        tokio_test::block_on(async {
            let store = SimulatedImageStore::new(Duration::ZERO, "https://s.example".to_string());
            let upload = ImageUpload {
                data: vec![0],
                filename: "a.jpg".to_string(),
                content_type: "image/jpeg".to_string(),
            };
            let first = store.store(upload.clone()).await.unwrap();
            let second = store.store(upload).await.unwrap();
            assert_ne!(first.display_url, second.display_url);
        });
    }
}
