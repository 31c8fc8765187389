use serde::{Deserialize, Serialize};
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkStatus {
    Active,
    Inactive,
    Suspended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    Full,
    Limited,
}

/// Relationship between a patient and a caregiver user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaregiverLink {
    pub id: String,
    pub patient_id: String,
    pub user_id: String,
    pub assigned_on: NaiveDate,
    pub status: LinkStatus,
    pub access_level: AccessLevel,
    pub receive_notifications: bool,
    pub can_record_doses: bool,
    pub relationship: String,
    pub certified: bool,
    pub availability: String,
    pub notes: String,
}
