use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use validator::Validate;

/// Closed set of notification kinds. Dispatch is on the tag, never on
/// free-form strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    MedicationReminder,
    MedicalAlert,
    DoctorMessage,
    SystemMessage,
    LowAdherenceAlert,
    TreatmentChange,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPriority {
    High,
    #[default]
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationState {
    Pending,
    Sent,
    Read,
    Failed,
}

impl NotificationState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, NotificationState::Read | NotificationState::Failed)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryChannel {
    #[default]
    App,
    Email,
    Sms,
    Push,
}

/// One message destined to one user.
///
/// Lifecycle: pending -> sent -> read, or pending -> failed. `sent_at` is set
/// once the state has reached sent or later; `read_at` only once read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    /// None for system-generated notifications.
    pub origin_user_id: Option<String>,
    pub recipient_id: String,
    /// Set for dosing reminders tied to a prescribed medication.
    pub treatment_medication_id: Option<String>,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub priority: NotificationPriority,
    pub state: NotificationState,
    pub channel: DeliveryChannel,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub lead_time_minutes: Option<u32>,
    pub repeats: bool,
    pub notify_caregiver: bool,
    pub requires_confirmation: bool,
    pub created_at: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,
    pub read_at: Option<DateTime<Utc>>,
    pub data: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateNotificationRequest {
    pub recipient_id: String,

    #[serde(default)]
    pub origin_user_id: Option<String>,

    #[serde(default)]
    pub treatment_medication_id: Option<String>,

    pub notification_type: NotificationType,

    #[validate(length(min = 1, max = 150))]
    pub title: String,

    #[validate(length(min = 1))]
    pub message: String,

    #[serde(default)]
    pub priority: NotificationPriority,

    #[serde(default)]
    pub channel: DeliveryChannel,

    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub lead_time_minutes: Option<u32>,

    #[serde(default)]
    pub repeats: bool,

    #[serde(default)]
    pub notify_caregiver: bool,

    #[serde(default)]
    pub requires_confirmation: bool,

    #[serde(default)]
    pub data: Option<serde_json::Value>,
}
