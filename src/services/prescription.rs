use crate::{
    error::{AppError, Result},
    models::{
        doctor::Doctor,
        notification::{
            DeliveryChannel, Notification, NotificationPriority, NotificationState,
            NotificationType,
        },
        patient::Patient,
        treatment::{
            CreatePrescriptionRequest, PrescriptionLineReceipt, PrescriptionReceipt,
            PrescriptionSummary, Treatment, TreatmentMedication, TreatmentState,
        },
        user::User,
    },
    services::store::RecordStore,
};
use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// Issues prescriptions: one treatment, its medication lines and the
/// patient notification are created together or not at all.
#[derive(Clone)]
pub struct PrescriptionService {
    store: Arc<dyn RecordStore>,
}

impl PrescriptionService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn create_prescription(
        &self,
        request: CreatePrescriptionRequest,
    ) -> Result<PrescriptionReceipt> {
        request.validate()?;

        let (doctor, doctor_user) = self.resolve_doctor(&request.doctor_id).await?;
        let (patient, patient_user) = self.resolve_patient(&request.patient_id).await?;

        // Medication names resolved up front so the receipt and the atomic
        // insert agree on what exists.
        let mut line_names = Vec::with_capacity(request.medications.len());
        for line in &request.medications {
            let medication = self
                .store
                .medication_by_id(&line.medication_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Medication {} not found", line.medication_id))
                })?;
            line_names.push(medication.commercial_name);
        }

        let treatment = Treatment {
            id: Uuid::new_v4().to_string(),
            patient_id: patient.id.clone(),
            doctor_id: doctor.id.clone(),
            diagnosis: request.diagnosis.clone(),
            start_date: request.issued_on,
            end_date: request.issued_on + Duration::days(i64::from(request.validity_days)),
            duration_days: request.validity_days,
            kind: "prescription".to_string(),
            therapeutic_goal: request.instructions.clone(),
            state: TreatmentState::Active,
            notes: String::new(),
            created_at: Utc::now(),
        };

        let lines: Vec<TreatmentMedication> = request
            .medications
            .iter()
            .map(|line| TreatmentMedication {
                id: Uuid::new_v4().to_string(),
                treatment_id: treatment.id.clone(),
                medication_id: line.medication_id.clone(),
                dose: line.dose.clone(),
                frequency: line.frequency.clone(),
                route: line.route.clone(),
                duration_days: line.duration_days,
                schedule: line.schedule.clone(),
                special_instructions: line.special_instructions.clone(),
                active: true,
            })
            .collect();

        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            origin_user_id: Some(doctor_user.id.clone()),
            recipient_id: patient_user.id.clone(),
            treatment_medication_id: None,
            notification_type: NotificationType::DoctorMessage,
            title: "New prescription".to_string(),
            message: format!(
                "Dr. {} {} has issued a new prescription.",
                doctor_user.first_name, doctor_user.last_name
            ),
            priority: NotificationPriority::Medium,
            state: NotificationState::Pending,
            channel: DeliveryChannel::App,
            scheduled_at: None,
            lead_time_minutes: None,
            repeats: false,
            notify_caregiver: false,
            requires_confirmation: false,
            created_at: Utc::now(),
            sent_at: None,
            read_at: None,
            data: None,
        };

        let (treatment, lines, notification) = self
            .store
            .insert_prescription(treatment, lines, notification)
            .await?;
        info!(
            "Prescription {} issued by doctor {} for patient {} with {} line(s)",
            treatment.id,
            doctor.id,
            patient.id,
            lines.len()
        );

        let medications = lines
            .iter()
            .zip(line_names)
            .map(|(line, name)| PrescriptionLineReceipt {
                treatment_medication_id: line.id.clone(),
                medication: name,
                dose: line.dose.clone(),
                frequency: line.frequency.clone(),
            })
            .collect();

        Ok(PrescriptionReceipt {
            treatment_id: treatment.id,
            patient: patient_user.full_name(),
            doctor: doctor_user.full_name(),
            diagnosis: treatment.diagnosis,
            issued_on: treatment.start_date,
            expires_on: treatment.end_date,
            medications,
            notification_id: notification.id,
        })
    }

    /// Prescriptions filtered by patient or by doctor. One of the two
    /// filters is required.
    pub async fn list_prescriptions(
        &self,
        patient_id: Option<&str>,
        doctor_id: Option<&str>,
    ) -> Result<Vec<PrescriptionSummary>> {
        let treatments = match (patient_id, doctor_id) {
            (Some(patient_id), _) => self.store.treatments_for_patient(patient_id).await?,
            (None, Some(doctor_id)) => self.store.treatments_for_doctor(doctor_id).await?,
            (None, None) => {
                return Err(AppError::bad_request(
                    "Either patient_id or doctor_id is required",
                ));
            }
        };

        let mut summaries = Vec::with_capacity(treatments.len());
        for treatment in treatments.iter().filter(|t| t.kind == "prescription") {
            let (_, patient_user) = self.resolve_patient(&treatment.patient_id).await?;
            let (_, doctor_user) = self.resolve_doctor(&treatment.doctor_id).await?;
            let lines = self.store.medications_for_treatment(&treatment.id).await?;

            summaries.push(PrescriptionSummary {
                treatment_id: treatment.id.clone(),
                patient: patient_user.full_name(),
                doctor: doctor_user.full_name(),
                diagnosis: treatment.diagnosis.clone(),
                issued_on: treatment.start_date,
                expires_on: treatment.end_date,
                state: treatment.state,
                medication_count: lines.len(),
            });
        }
        Ok(summaries)
    }

    async fn resolve_doctor(&self, id: &str) -> Result<(Doctor, User)> {
        let doctor = self
            .store
            .doctor_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Doctor {} not found", id)))?;
        let user = self
            .store
            .user_by_id(&doctor.user_id)
            .await?
            .ok_or_else(|| AppError::internal("Doctor record without a user account"))?;
        Ok((doctor, user))
    }

    async fn resolve_patient(&self, id: &str) -> Result<(Patient, User)> {
        let patient = self
            .store
            .patient_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Patient {} not found", id)))?;
        let user = self
            .store
            .user_by_id(&patient.user_id)
            .await?
            .ok_or_else(|| AppError::internal("Patient record without a user account"))?;
        Ok((patient, user))
    }
}
