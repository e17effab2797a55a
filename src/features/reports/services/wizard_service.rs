use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::geo::services::LocationProvider;
use crate::features::reports::dtos::{WizardConfirmationDto, WizardDetailsDto, WizardLocationDto};
use crate::features::reports::models::{NewReport, WizardSession, WizardStep};
use crate::features::reports::services::ReportService;
use crate::features::uploads::models::ImageUpload;
use crate::features::uploads::services::UploadPipeline;
use crate::shared::validation::parse_coordinate_pair;

/// Server-held wizard sessions, one draft per session id.
/// Sessions are independent of each other.
pub struct WizardService {
    sessions: RwLock<HashMap<Uuid, WizardSession>>,
    pipeline: Arc<UploadPipeline>,
    location_provider: Arc<dyn LocationProvider>,
    reports: Arc<ReportService>,
}

impl WizardService {
    pub fn new(
        pipeline: Arc<UploadPipeline>,
        location_provider: Arc<dyn LocationProvider>,
        reports: Arc<ReportService>,
    ) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            pipeline,
            location_provider,
            reports,
        }
    }

    pub async fn start(&self) -> WizardSession {
        let session = WizardSession::new();
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id, session.clone());
        tracing::info!("Started wizard session {}", session.id);
        session
    }

    pub async fn get(&self, id: Uuid) -> Result<WizardSession> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Wizard session {} not found", id)))
    }

    /// Fills in the details step and advances to photo & location.
    /// Advancing requires type, severity and description to be present.
    pub async fn submit_details(&self, id: Uuid, details: WizardDetailsDto) -> Result<WizardSession> {
        let mut sessions = self.sessions.write().await;
        let session = Self::session_mut(&mut sessions, id)?;

        if session.step != WizardStep::Details {
            return Err(AppError::Conflict(
                "Details can only be edited on the details step".to_string(),
            ));
        }

        session.draft.issue_type = details.issue_type;
        session.draft.severity = details.severity;
        session.draft.description = details.description;

        if !session.draft.details_complete() {
            session.touch();
            return Err(AppError::Validation(
                "Issue type, severity and description are required".to_string(),
            ));
        }

        session.step = WizardStep::PhotoLocation;
        session.touch();
        Ok(session.clone())
    }

    /// Uploads and analyzes one photo, then folds the result into the
    /// draft. Upload always precedes analysis and a rejected upload
    /// leaves the draft untouched.
    pub async fn attach_image(&self, id: Uuid, upload: ImageUpload) -> Result<WizardSession> {
        {
            let sessions = self.sessions.read().await;
            let session = sessions
                .get(&id)
                .ok_or_else(|| AppError::NotFound(format!("Wizard session {} not found", id)))?;
            if session.step != WizardStep::PhotoLocation {
                return Err(AppError::Conflict(
                    "Photos can only be attached on the photo & location step".to_string(),
                ));
            }
        }

        // Latency-bearing work happens outside the session lock
        let (uploaded, analysis) = self.pipeline.ingest(upload).await?;

        let mut sessions = self.sessions.write().await;
        let session = Self::session_mut(&mut sessions, id)?;
        // The session may have been reset or stepped back while the
        // upload was in flight; a stale photo never lands in the draft.
        if session.step != WizardStep::PhotoLocation {
            return Err(AppError::Conflict(
                "Photos can only be attached on the photo & location step".to_string(),
            ));
        }
        session.draft.attach_analyzed_image(uploaded.display_url, analysis);
        session.touch();
        Ok(session.clone())
    }

    /// Sets the free-text location. A "lat, lng" pair is also parsed
    /// into coordinates.
    pub async fn set_location(&self, id: Uuid, payload: WizardLocationDto) -> Result<WizardSession> {
        let mut sessions = self.sessions.write().await;
        let session = Self::session_mut(&mut sessions, id)?;

        if session.step != WizardStep::PhotoLocation {
            return Err(AppError::Conflict(
                "Location can only be set on the photo & location step".to_string(),
            ));
        }

        if let Some((lat, lng)) = parse_coordinate_pair(&payload.location) {
            session.draft.latitude = Some(lat);
            session.draft.longitude = Some(lng);
        }
        session.draft.location_text = payload.location;
        session.touch();
        Ok(session.clone())
    }

    /// Captures the device position. On failure the existing free-text
    /// location is left untouched and the error propagates.
    pub async fn detect_location(&self, id: Uuid) -> Result<WizardSession> {
        {
            let sessions = self.sessions.read().await;
            let session = sessions
                .get(&id)
                .ok_or_else(|| AppError::NotFound(format!("Wizard session {} not found", id)))?;
            if session.step != WizardStep::PhotoLocation {
                return Err(AppError::Conflict(
                    "Location can only be detected on the photo & location step".to_string(),
                ));
            }
        }

        let coords = self.location_provider.current_location().await?;

        let mut sessions = self.sessions.write().await;
        let session = Self::session_mut(&mut sessions, id)?;
        session.draft.location_text = coords.as_location_text();
        session.draft.latitude = Some(coords.latitude);
        session.draft.longitude = Some(coords.longitude);
        session.touch();
        Ok(session.clone())
    }

    /// Steps back from photo & location to details. Nothing is discarded.
    pub async fn back(&self, id: Uuid) -> Result<WizardSession> {
        let mut sessions = self.sessions.write().await;
        let session = Self::session_mut(&mut sessions, id)?;

        if session.step == WizardStep::Confirmation {
            return Err(AppError::Conflict(
                "A submitted report can no longer be edited".to_string(),
            ));
        }

        session.step = WizardStep::Details;
        session.touch();
        Ok(session.clone())
    }

    /// Turns the draft into a report in one atomic append. Requires at
    /// least one uploaded photo and a non-empty location.
    pub async fn submit(&self, id: Uuid, reported_by: &str) -> Result<WizardConfirmationDto> {
        let draft = {
            let sessions = self.sessions.read().await;
            let session = sessions
                .get(&id)
                .ok_or_else(|| AppError::NotFound(format!("Wizard session {} not found", id)))?;

            if session.step != WizardStep::PhotoLocation {
                return Err(AppError::Conflict(
                    "Only a draft on the photo & location step can be submitted".to_string(),
                ));
            }
            if !session.draft.has_uploaded_image() {
                return Err(AppError::Validation(
                    "At least one uploaded photo is required".to_string(),
                ));
            }
            if !session.draft.has_location() {
                return Err(AppError::Validation("Location is required".to_string()));
            }
            session.draft.clone()
        };

        let issue_type = draft.issue_type.ok_or_else(|| {
            AppError::Validation("Issue type is required".to_string())
        })?;

        let report = self
            .reports
            .create(NewReport {
                issue_type,
                description: draft.description,
                location_text: draft.location_text,
                latitude: draft.latitude,
                longitude: draft.longitude,
                severity: draft.severity,
                reported_by: reported_by.to_string(),
                material_estimate: draft.material_estimate,
                estimated_cost: None,
                image_urls: draft.images.iter().map(|i| i.display_url.clone()).collect(),
            })
            .await?;

        let mut sessions = self.sessions.write().await;
        let session = Self::session_mut(&mut sessions, id)?;
        session.step = WizardStep::Confirmation;
        session.submitted_reference = Some(report.reference.clone());
        session.touch();

        tracing::info!(
            "Wizard session {} submitted as report {} ({})",
            id,
            report.id,
            report.reference
        );

        Ok(WizardConfirmationDto {
            report_id: report.id,
            reference: report.reference,
        })
    }

    /// Clears the draft and returns to the details step.
    pub async fn reset(&self, id: Uuid) -> Result<WizardSession> {
        let mut sessions = self.sessions.write().await;
        let session = Self::session_mut(&mut sessions, id)?;

        session.step = WizardStep::Details;
        session.draft = Default::default();
        session.submitted_reference = None;
        session.touch();
        Ok(session.clone())
    }

    fn session_mut(
        sessions: &mut HashMap<Uuid, WizardSession>,
        id: Uuid,
    ) -> Result<&mut WizardSession> {
        sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Wizard session {} not found", id)))
    }
}
