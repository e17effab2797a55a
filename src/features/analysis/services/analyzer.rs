use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use serde::Deserialize;

use crate::core::config::{AnalyzerMode, SimulationConfig};
use crate::core::error::{AppError, Result};
use crate::features::analysis::models::AnalysisResult;
use crate::features::reports::models::ReportSeverity;

/// Seam for the damage analysis backend. The demo ships a canned
/// implementation; a real inference service plugs in behind the same trait.
#[async_trait]
pub trait ImageAnalyzer: Send + Sync {
    async fn analyze(&self, display_url: &str) -> Result<AnalysisResult>;
}

/// Builds the analyzer selected by `ANALYZER_MODE`.
pub fn analyzer_from_config(config: &SimulationConfig) -> Result<Arc<dyn ImageAnalyzer>> {
    match config.analyzer_mode {
        AnalyzerMode::Canned => Ok(Arc::new(CannedAnalyzer::new(config.analysis_latency))),
        AnalyzerMode::Remote => {
            let url = config.inference_url.clone().ok_or_else(|| {
                AppError::Internal("ANALYZER_MODE=remote requires INFERENCE_URL to be set".into())
            })?;
            Ok(Arc::new(RemoteAnalyzer::new(url)))
        }
    }
}

/// Returns one of three canned analysis results after a simulated
/// inference delay.
pub struct CannedAnalyzer {
    latency: Duration,
}

impl CannedAnalyzer {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// The fixed result set the demo rotates through
    pub fn canned_results() -> [AnalysisResult; 3] {
        [
            AnalysisResult {
                area_m2: 0.8,
                depth_m: 0.05,
                asphalt_estimate: "8 kg".to_string(),
                cement_estimate: "2 bags".to_string(),
                severity: ReportSeverity::Medium,
            },
            AnalysisResult {
                area_m2: 1.2,
                depth_m: 0.08,
                asphalt_estimate: "15 kg".to_string(),
                cement_estimate: "4 bags".to_string(),
                severity: ReportSeverity::High,
            },
            AnalysisResult {
                area_m2: 0.4,
                depth_m: 0.03,
                asphalt_estimate: "4 kg".to_string(),
                cement_estimate: "1 bag".to_string(),
                severity: ReportSeverity::Low,
            },
        ]
    }
}

#[async_trait]
impl ImageAnalyzer for CannedAnalyzer {
    async fn analyze(&self, display_url: &str) -> Result<AnalysisResult> {
        tokio::time::sleep(self.latency).await;

        let results = Self::canned_results();
        let pick = rand::thread_rng().gen_range(0..results.len());
        let result = results[pick].clone();

        tracing::debug!(
            "Analyzed {}: severity {}, area {} m²",
            display_url,
            result.severity,
            result.area_m2
        );

        Ok(result)
    }
}

/// Wire shape of the inference endpoint's response
#[derive(Debug, Deserialize)]
struct InferenceResponse {
    area: f64,
    depth: f64,
    material_estimate: InferenceMaterials,
    severity: ReportSeverity,
}

#[derive(Debug, Deserialize)]
struct InferenceMaterials {
    asphalt: String,
    cement: String,
}

/// Posts the image URL to a remote inference endpoint
pub struct RemoteAnalyzer {
    client: reqwest::Client,
    inference_url: String,
}

impl RemoteAnalyzer {
    pub fn new(inference_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            inference_url,
        }
    }
}

#[async_trait]
impl ImageAnalyzer for RemoteAnalyzer {
    async fn analyze(&self, display_url: &str) -> Result<AnalysisResult> {
        let response = self
            .client
            .post(&self.inference_url)
            .json(&serde_json::json!({ "image_url": display_url }))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Inference request failed: {:?}", e);
                AppError::ExternalServiceError(format!("Inference request failed: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(AppError::Analysis(format!(
                "Inference service returned status {}",
                response.status()
            )));
        }

        let body: InferenceResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse inference response: {:?}", e);
            AppError::ExternalServiceError(format!("Failed to parse inference response: {}", e))
        })?;

        Ok(AnalysisResult {
            area_m2: body.area,
            depth_m: body.depth,
            asphalt_estimate: body.material_estimate.asphalt,
            cement_estimate: body.material_estimate.cement,
            severity: body.severity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn canned_analyzer_returns_a_member_of_the_canned_set() {
        let analyzer = CannedAnalyzer::new(Duration::ZERO);
        let canned = CannedAnalyzer::canned_results();
        for _ in 0..10 {
            let result = analyzer
                .analyze("https://storage.example/pothole.jpg")
                .await
                .unwrap();
            assert!(canned.contains(&result));
        }
    }

    #[test]
    fn canned_set_has_one_result_per_severity_band() {
        let severities: Vec<_> = CannedAnalyzer::canned_results()
            .iter()
            .map(|r| r.severity)
            .collect();
        assert!(severities.contains(&ReportSeverity::Low));
        assert!(severities.contains(&ReportSeverity::Medium));
        assert!(severities.contains(&ReportSeverity::High));
    }
}
