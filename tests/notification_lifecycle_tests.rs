mod common;

use common::{seed_caregiver, seed_patient};
use meditrack::error::AppError;
use meditrack::models::notification::{
    CreateNotificationRequest, NotificationPriority, NotificationState, NotificationType,
};
use meditrack::services::{MemoryStore, NotificationService, RecordStore};
use std::sync::Arc;

fn request(recipient_id: &str) -> CreateNotificationRequest {
    CreateNotificationRequest {
        recipient_id: recipient_id.to_string(),
        origin_user_id: None,
        treatment_medication_id: None,
        notification_type: NotificationType::DoctorMessage,
        title: "Checkup reminder".to_string(),
        message: "Please schedule your quarterly checkup.".to_string(),
        priority: NotificationPriority::Medium,
        channel: Default::default(),
        scheduled_at: None,
        lead_time_minutes: None,
        repeats: false,
        notify_caregiver: false,
        requires_confirmation: false,
        data: None,
    }
}

fn setup() -> (Arc<MemoryStore>, NotificationService) {
    let store = Arc::new(MemoryStore::new());
    let service = NotificationService::new(store.clone());
    (store, service)
}

#[tokio::test]
async fn new_notifications_start_pending_without_timestamps() {
    let (store, service) = setup();
    let (_, account) = seed_patient(store.as_ref()).await;

    let notification = service.create(request(&account.id)).await.unwrap();
    assert_eq!(notification.state, NotificationState::Pending);
    assert!(notification.sent_at.is_none());
    assert!(notification.read_at.is_none());
}

#[tokio::test]
async fn sent_then_read_stamps_each_transition() {
    let (store, service) = setup();
    let (_, account) = seed_patient(store.as_ref()).await;
    let notification = service.create(request(&account.id)).await.unwrap();

    let sent = service.mark_sent(&notification.id).await.unwrap();
    assert_eq!(sent.state, NotificationState::Sent);
    assert!(sent.sent_at.is_some());
    assert!(sent.read_at.is_none());

    let read = service.mark_read(&notification.id).await.unwrap();
    assert_eq!(read.state, NotificationState::Read);
    assert_eq!(read.sent_at, sent.sent_at);
    assert!(read.read_at.is_some());
}

#[tokio::test]
async fn repeated_send_is_a_conflict() {
    let (store, service) = setup();
    let (_, account) = seed_patient(store.as_ref()).await;
    let notification = service.create(request(&account.id)).await.unwrap();

    service.mark_sent(&notification.id).await.unwrap();
    let err = service.mark_sent(&notification.id).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn reading_a_pending_notification_stamps_delivery_too() {
    let (store, service) = setup();
    let (_, account) = seed_patient(store.as_ref()).await;
    let notification = service.create(request(&account.id)).await.unwrap();

    let read = service.mark_read(&notification.id).await.unwrap();
    assert_eq!(read.state, NotificationState::Read);
    assert!(read.sent_at.is_some());
    assert!(read.read_at.is_some());
}

#[tokio::test]
async fn terminal_states_reject_every_transition() {
    let (store, service) = setup();
    let (_, account) = seed_patient(store.as_ref()).await;

    let failed = service.create(request(&account.id)).await.unwrap();
    service.mark_failed(&failed.id).await.unwrap();
    assert!(service.mark_sent(&failed.id).await.is_err());
    assert!(service.mark_read(&failed.id).await.is_err());
    assert!(service.mark_failed(&failed.id).await.is_err());

    let read = service.create(request(&account.id)).await.unwrap();
    service.mark_read(&read.id).await.unwrap();
    assert!(service.mark_sent(&read.id).await.is_err());
    assert!(service.mark_failed(&read.id).await.is_err());
}

#[tokio::test]
async fn only_pending_notifications_can_fail() {
    let (store, service) = setup();
    let (_, account) = seed_patient(store.as_ref()).await;
    let notification = service.create(request(&account.id)).await.unwrap();

    service.mark_sent(&notification.id).await.unwrap();
    let err = service.mark_failed(&notification.id).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn unread_excludes_terminal_states() {
    let (store, service) = setup();
    let (_, account) = seed_patient(store.as_ref()).await;

    let pending = service.create(request(&account.id)).await.unwrap();
    let sent = service.create(request(&account.id)).await.unwrap();
    service.mark_sent(&sent.id).await.unwrap();
    let read = service.create(request(&account.id)).await.unwrap();
    service.mark_read(&read.id).await.unwrap();
    let failed = service.create(request(&account.id)).await.unwrap();
    service.mark_failed(&failed.id).await.unwrap();

    let unread = service.unread_for_user(&account.id).await.unwrap();
    let ids: Vec<&str> = unread.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(unread.len(), 2);
    assert!(ids.contains(&pending.id.as_str()));
    assert!(ids.contains(&sent.id.as_str()));
}

#[tokio::test]
async fn pending_reminders_only_cover_medication_reminders() {
    let (store, service) = setup();
    let (_, account) = seed_patient(store.as_ref()).await;

    let mut reminder = request(&account.id);
    reminder.notification_type = NotificationType::MedicationReminder;
    let reminder = service.create(reminder).await.unwrap();

    let sent_reminder = {
        let mut r = request(&account.id);
        r.notification_type = NotificationType::MedicationReminder;
        let created = service.create(r).await.unwrap();
        service.mark_sent(&created.id).await.unwrap()
    };
    service.create(request(&account.id)).await.unwrap(); // doctor message

    let pending = service.pending_reminders_for_user(&account.id).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, reminder.id);
    assert_ne!(pending[0].id, sent_reminder.id);
}

#[tokio::test]
async fn caregiver_copies_go_to_opted_in_active_links() {
    let (store, service) = setup();
    let (patient, account) = seed_patient(store.as_ref()).await;
    let (_, caregiver) = seed_caregiver(store.as_ref(), &patient.id, true).await;
    let (_, silent_caregiver) = seed_caregiver(store.as_ref(), &patient.id, false).await;

    let mut req = request(&account.id);
    req.notify_caregiver = true;
    service.create(req).await.unwrap();

    let copies = store
        .notifications_for_user(&caregiver.id, &[NotificationState::Pending])
        .await
        .unwrap();
    assert_eq!(copies.len(), 1);
    assert!(copies[0].title.contains("Checkup reminder"));

    let silent = store
        .notifications_for_user(&silent_caregiver.id, &[NotificationState::Pending])
        .await
        .unwrap();
    assert!(silent.is_empty());
}

#[tokio::test]
async fn unknown_recipient_is_rejected() {
    let (_, service) = setup();
    let err = service.create(request("missing-user")).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn blank_title_fails_validation() {
    let (store, service) = setup();
    let (_, account) = seed_patient(store.as_ref()).await;

    let mut req = request(&account.id);
    req.title = String::new();
    let err = service.create(req).await.unwrap_err();
    assert!(matches!(err, AppError::ValidatorError(_)));
}
