use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreatmentState {
    Active,
    Completed,
    Suspended,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Treatment {
    pub id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub diagnosis: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: u32,
    pub kind: String,
    pub therapeutic_goal: String,
    pub state: TreatmentState,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

/// One medication line of a treatment. Owned exclusively by its treatment:
/// deleting the treatment deletes every line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreatmentMedication {
    pub id: String,
    pub treatment_id: String,
    pub medication_id: String,
    pub dose: String,
    pub frequency: String,
    pub route: String,
    pub duration_days: u32,
    pub schedule: Vec<String>,
    pub special_instructions: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PrescriptionLineRequest {
    pub medication_id: String,

    #[validate(length(min = 1, max = 50))]
    pub dose: String,

    #[validate(length(min = 1, max = 50))]
    pub frequency: String,

    #[validate(length(min = 1, max = 50))]
    pub route: String,

    #[validate(range(min = 1, message = "Duration must be at least one day"))]
    pub duration_days: u32,

    #[serde(default)]
    pub schedule: Vec<String>,

    #[serde(default)]
    pub special_instructions: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePrescriptionRequest {
    pub doctor_id: String,
    pub patient_id: String,

    #[validate(length(min = 1, message = "Diagnosis is required"))]
    pub diagnosis: String,

    #[serde(default)]
    pub instructions: String,

    pub issued_on: NaiveDate,

    #[validate(range(min = 1, max = 180, message = "Validity must be between 1 and 180 days"))]
    #[serde(default = "default_validity_days")]
    pub validity_days: u32,

    #[validate]
    #[validate(length(min = 1, message = "At least one medication line is required"))]
    pub medications: Vec<PrescriptionLineRequest>,
}

fn default_validity_days() -> u32 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrescriptionLineReceipt {
    pub treatment_medication_id: String,
    pub medication: String,
    pub dose: String,
    pub frequency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrescriptionReceipt {
    pub treatment_id: String,
    pub patient: String,
    pub doctor: String,
    pub diagnosis: String,
    pub issued_on: NaiveDate,
    pub expires_on: NaiveDate,
    pub medications: Vec<PrescriptionLineReceipt>,
    pub notification_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrescriptionSummary {
    pub treatment_id: String,
    pub patient: String,
    pub doctor: String,
    pub diagnosis: String,
    pub issued_on: NaiveDate,
    pub expires_on: NaiveDate,
    pub state: TreatmentState,
    pub medication_count: usize,
}
