use std::sync::Arc;

use crate::core::error::Result;
use crate::features::analysis::models::AnalysisResult;
use crate::features::analysis::services::ImageAnalyzer;
use crate::features::uploads::models::{ImageUpload, UploadedImage};
use crate::features::uploads::services::ImageStore;

/// Upload followed by analysis, in that order. Analysis never runs for
/// an upload that failed validation or storage.
pub struct UploadPipeline {
    store: Arc<dyn ImageStore>,
    analyzer: Arc<dyn ImageAnalyzer>,
}

impl UploadPipeline {
    pub fn new(store: Arc<dyn ImageStore>, analyzer: Arc<dyn ImageAnalyzer>) -> Self {
        Self { store, analyzer }
    }

    /// Validates and stores a photo without analyzing it.
    pub async fn upload(&self, upload: ImageUpload) -> Result<UploadedImage> {
        upload.validate()?;
        self.store.store(upload).await
    }

    /// Validates, stores, then analyzes a photo.
    pub async fn ingest(&self, upload: ImageUpload) -> Result<(UploadedImage, AnalysisResult)> {
        let uploaded = self.upload(upload).await?;
        let analysis = self.analyzer.analyze(&uploaded.display_url).await?;
        Ok((uploaded, analysis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::features::reports::models::ReportSeverity;
    use crate::features::uploads::services::SimulatedImageStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Counts invocations so tests can prove the analyzer was never reached
    struct CountingAnalyzer {
        calls: AtomicUsize,
    }

    impl CountingAnalyzer {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ImageAnalyzer for CountingAnalyzer {
        async fn analyze(&self, _display_url: &str) -> Result<AnalysisResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(AnalysisResult {
                area_m2: 0.8,
                depth_m: 0.05,
                asphalt_estimate: "8 kg".to_string(),
                cement_estimate: "2 bags".to_string(),
                severity: ReportSeverity::Medium,
            })
        }
    }

    fn pipeline(analyzer: Arc<CountingAnalyzer>) -> UploadPipeline {
        let store = Arc::new(SimulatedImageStore::new(
            Duration::ZERO,
            "https://s.example".to_string(),
        ));
        UploadPipeline::new(store, analyzer)
    }

    #[tokio::test]
    async fn ingest_analyzes_after_a_successful_upload() {
        let analyzer = CountingAnalyzer::new();
        let pipeline = pipeline(analyzer.clone());

        let (uploaded, analysis) = pipeline
            .ingest(ImageUpload {
                data: vec![0u8; 64],
                filename: "pothole.jpg".to_string(),
                content_type: "image/jpeg".to_string(),
            })
            .await
            .unwrap();

        assert!(uploaded.display_url.ends_with(".jpg"));
        assert_eq!(analysis.severity, ReportSeverity::Medium);
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn rejected_upload_never_reaches_the_analyzer() {
        let analyzer = CountingAnalyzer::new();
        let pipeline = pipeline(analyzer.clone());

        let result = pipeline
            .ingest(ImageUpload {
                data: vec![0u8; 64],
                filename: "notes.txt".to_string(),
                content_type: "text/plain".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn oversized_upload_never_reaches_the_analyzer() {
        let analyzer = CountingAnalyzer::new();
        let pipeline = pipeline(analyzer.clone());

        let result = pipeline
            .ingest(ImageUpload {
                data: vec![0u8; crate::features::uploads::models::MAX_FILE_SIZE + 1],
                filename: "huge.jpg".to_string(),
                content_type: "image/jpeg".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 0);
    }
}
