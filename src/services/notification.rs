use crate::{
    error::{AppError, Result},
    models::{
        caregiver::LinkStatus,
        notification::{CreateNotificationRequest, Notification, NotificationState},
    },
    services::store::RecordStore,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

/// Owns the notification lifecycle: creation in `pending`, the transitions
/// to `sent`, `read` and `failed`, and the caregiver copies of patient
/// notifications.
#[derive(Clone)]
pub struct NotificationService {
    store: Arc<dyn RecordStore>,
}

impl NotificationService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Creates a notification in the `pending` state. When the request asks
    /// for caregiver copies and the recipient is a patient, one copy goes to
    /// every active caregiver who opted into notifications; a failed copy is
    /// logged and never fails the original.
    pub async fn create(&self, request: CreateNotificationRequest) -> Result<Notification> {
        request.validate()?;

        let recipient = self
            .store
            .user_by_id(&request.recipient_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("User {} not found", request.recipient_id))
            })?;

        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            origin_user_id: request.origin_user_id.clone(),
            recipient_id: recipient.id.clone(),
            treatment_medication_id: request.treatment_medication_id.clone(),
            notification_type: request.notification_type,
            title: request.title.clone(),
            message: request.message.clone(),
            priority: request.priority,
            state: NotificationState::Pending,
            channel: request.channel,
            scheduled_at: request.scheduled_at,
            lead_time_minutes: request.lead_time_minutes,
            repeats: request.repeats,
            notify_caregiver: request.notify_caregiver,
            requires_confirmation: request.requires_confirmation,
            created_at: Utc::now(),
            sent_at: None,
            read_at: None,
            data: request.data.clone(),
        };
        let notification = self.store.insert_notification(notification).await?;
        debug!(
            "Created notification {} ({:?}) for user {}",
            notification.id, notification.notification_type, notification.recipient_id
        );

        if notification.notify_caregiver {
            self.copy_to_caregivers(&notification).await;
        }

        Ok(notification)
    }

    async fn copy_to_caregivers(&self, original: &Notification) {
        let patient = match self.store.patient_by_user_id(&original.recipient_id).await {
            Ok(Some(patient)) => patient,
            Ok(None) => return,
            Err(e) => {
                warn!("Caregiver copy skipped, patient lookup failed: {}", e);
                return;
            }
        };

        let links = match self.store.caregivers_for_patient(&patient.id).await {
            Ok(links) => links,
            Err(e) => {
                warn!("Caregiver copy skipped, link lookup failed: {}", e);
                return;
            }
        };

        for link in links
            .iter()
            .filter(|l| l.status == LinkStatus::Active && l.receive_notifications)
        {
            let mut copy = original.clone();
            copy.id = Uuid::new_v4().to_string();
            copy.recipient_id = link.user_id.clone();
            copy.notify_caregiver = false;
            copy.title = format!("[Patient alert] {}", original.title);
            if let Err(e) = self.store.insert_notification(copy).await {
                warn!(
                    "Failed to copy notification {} to caregiver {}: {}",
                    original.id, link.user_id, e
                );
            }
        }
    }

    /// pending -> sent. Any other starting state is a conflict.
    pub async fn mark_sent(&self, id: &str) -> Result<Notification> {
        let mut notification = self.get(id).await?;
        match notification.state {
            NotificationState::Pending => {}
            NotificationState::Sent => {
                return Err(AppError::conflict("Notification has already been sent"));
            }
            NotificationState::Read | NotificationState::Failed => {
                return Err(AppError::conflict(
                    "Notification is in a terminal state and cannot be sent",
                ));
            }
        }

        notification.state = NotificationState::Sent;
        notification.sent_at = Some(Utc::now());
        let notification = self.store.update_notification(notification).await?;
        info!("Notification {} marked sent", notification.id);
        Ok(notification)
    }

    /// pending|sent -> read. Reading a pending notification implies delivery,
    /// so `sent_at` is stamped as well when it was still unset.
    pub async fn mark_read(&self, id: &str) -> Result<Notification> {
        let mut notification = self.get(id).await?;
        if notification.state.is_terminal() {
            return Err(AppError::conflict(
                "Notification is in a terminal state and cannot be read",
            ));
        }

        let now = Utc::now();
        if notification.sent_at.is_none() {
            notification.sent_at = Some(now);
        }
        notification.state = NotificationState::Read;
        notification.read_at = Some(now);
        let notification = self.store.update_notification(notification).await?;
        info!("Notification {} marked read", notification.id);
        Ok(notification)
    }

    /// pending -> failed. Delivery failures only make sense before delivery.
    pub async fn mark_failed(&self, id: &str) -> Result<Notification> {
        let mut notification = self.get(id).await?;
        if notification.state != NotificationState::Pending {
            return Err(AppError::conflict(
                "Only a pending notification can be marked failed",
            ));
        }

        notification.state = NotificationState::Failed;
        let notification = self.store.update_notification(notification).await?;
        warn!("Notification {} marked failed", notification.id);
        Ok(notification)
    }

    /// Unread inbox: pending and sent notifications, newest first.
    pub async fn unread_for_user(&self, user_id: &str) -> Result<Vec<Notification>> {
        self.store
            .notifications_for_user(
                user_id,
                &[NotificationState::Pending, NotificationState::Sent],
            )
            .await
    }

    /// Medication reminders still waiting to go out, newest first.
    pub async fn pending_reminders_for_user(&self, user_id: &str) -> Result<Vec<Notification>> {
        self.store.pending_reminders(user_id).await
    }

    async fn get(&self, id: &str) -> Result<Notification> {
        self.store
            .notification_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Notification {} not found", id)))
    }
}
