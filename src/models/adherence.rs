use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdherenceLevel {
    High,
    Medium,
    Low,
}

impl AdherenceLevel {
    pub fn classify(percentage: f64) -> Self {
        if percentage >= 85.0 {
            AdherenceLevel::High
        } else if percentage >= 50.0 {
            AdherenceLevel::Medium
        } else {
            AdherenceLevel::Low
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdherenceRecord {
    pub id: String,
    pub patient_id: String,
    pub treatment_id: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub doses_scheduled: u32,
    pub doses_taken: u32,
    pub doses_missed: u32,
    pub doses_late: u32,
    pub adherence_percentage: f64,
    pub level: AdherenceLevel,
    pub computed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordAdherencePeriodRequest {
    pub patient_id: String,
    pub treatment_id: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,

    #[validate(range(min = 1, message = "At least one scheduled dose is required"))]
    pub doses_scheduled: u32,

    pub doses_taken: u32,

    #[serde(default)]
    pub doses_missed: u32,

    #[serde(default)]
    pub doses_late: u32,
}
