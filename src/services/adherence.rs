use crate::{
    error::{AppError, Result},
    models::{
        adherence::{AdherenceLevel, AdherenceRecord, RecordAdherencePeriodRequest},
        notification::{CreateNotificationRequest, NotificationPriority, NotificationType},
    },
    services::{notification::NotificationService, store::RecordStore},
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

/// Computes adherence for a reporting period and raises an alert when a
/// patient falls into the low band.
#[derive(Clone)]
pub struct AdherenceService {
    store: Arc<dyn RecordStore>,
    notifications: NotificationService,
}

impl AdherenceService {
    pub fn new(store: Arc<dyn RecordStore>, notifications: NotificationService) -> Self {
        Self {
            store,
            notifications,
        }
    }

    pub async fn record_period(
        &self,
        request: RecordAdherencePeriodRequest,
    ) -> Result<AdherenceRecord> {
        request.validate()?;
        if request.doses_taken > request.doses_scheduled {
            return Err(AppError::validation(
                "Doses taken cannot exceed doses scheduled",
            ));
        }
        if request.period_end < request.period_start {
            return Err(AppError::validation("Period end precedes period start"));
        }

        let patient = self
            .store
            .patient_by_id(&request.patient_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Patient {} not found", request.patient_id))
            })?;
        let treatment = self
            .store
            .treatment_by_id(&request.treatment_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Treatment {} not found", request.treatment_id))
            })?;
        if treatment.patient_id != patient.id {
            return Err(AppError::bad_request(
                "Treatment does not belong to this patient",
            ));
        }

        let percentage =
            f64::from(request.doses_taken) / f64::from(request.doses_scheduled) * 100.0;
        let level = AdherenceLevel::classify(percentage);

        let record = AdherenceRecord {
            id: Uuid::new_v4().to_string(),
            patient_id: patient.id.clone(),
            treatment_id: treatment.id.clone(),
            period_start: request.period_start,
            period_end: request.period_end,
            doses_scheduled: request.doses_scheduled,
            doses_taken: request.doses_taken,
            doses_missed: request.doses_missed,
            doses_late: request.doses_late,
            adherence_percentage: percentage,
            level,
            computed_at: Utc::now(),
        };
        let record = self.store.insert_adherence(record).await?;
        info!(
            "Adherence {:.1}% ({:?}) recorded for patient {}",
            percentage, level, patient.id
        );

        if level == AdherenceLevel::Low {
            self.raise_low_adherence_alert(&patient.user_id, &record).await;
        }

        Ok(record)
    }

    /// The alert is best effort: a persisted record with a lost alert is
    /// better than no record at all.
    async fn raise_low_adherence_alert(&self, patient_user_id: &str, record: &AdherenceRecord) {
        let request = CreateNotificationRequest {
            recipient_id: patient_user_id.to_string(),
            origin_user_id: None,
            treatment_medication_id: None,
            notification_type: NotificationType::LowAdherenceAlert,
            title: "Low medication adherence".to_string(),
            message: format!(
                "Adherence for the period {} to {} was {:.1}%. Please review the treatment plan with your doctor.",
                record.period_start, record.period_end, record.adherence_percentage
            ),
            priority: NotificationPriority::High,
            channel: Default::default(),
            scheduled_at: None,
            lead_time_minutes: None,
            repeats: false,
            notify_caregiver: true,
            requires_confirmation: false,
            data: None,
        };

        if let Err(e) = self.notifications.create(request).await {
            warn!(
                "Failed to raise low-adherence alert for record {}: {}",
                record.id, e
            );
        }
    }

    pub async fn history_for_patient(&self, patient_id: &str) -> Result<Vec<AdherenceRecord>> {
        if self.store.patient_by_id(patient_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Patient {} not found",
                patient_id
            )));
        }
        self.store.adherence_for_patient(patient_id).await
    }
}
