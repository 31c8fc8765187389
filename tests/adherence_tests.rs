mod common;

use chrono::{NaiveDate, Utc};
use common::{medication, seed_caregiver, seed_patient};
use meditrack::error::AppError;
use meditrack::models::adherence::{AdherenceLevel, RecordAdherencePeriodRequest};
use meditrack::models::notification::{
    DeliveryChannel, Notification, NotificationPriority, NotificationState, NotificationType,
};
use meditrack::models::treatment::{Treatment, TreatmentMedication, TreatmentState};
use meditrack::services::{AdherenceService, MemoryStore, NotificationService, RecordStore};
use std::sync::Arc;
use uuid::Uuid;

async fn seed_treatment(store: &dyn RecordStore, patient_id: &str, recipient: &str) -> Treatment {
    let med = store.insert_medication(medication("Aspirin")).await.unwrap();
    let treatment = Treatment {
        id: Uuid::new_v4().to_string(),
        patient_id: patient_id.to_string(),
        doctor_id: "d1".to_string(),
        diagnosis: "Hypertension".to_string(),
        start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        duration_days: 30,
        kind: "prescription".to_string(),
        therapeutic_goal: String::new(),
        state: TreatmentState::Active,
        notes: String::new(),
        created_at: Utc::now(),
    };
    let line = TreatmentMedication {
        id: Uuid::new_v4().to_string(),
        treatment_id: treatment.id.clone(),
        medication_id: med.id,
        dose: "1 tablet".to_string(),
        frequency: "daily".to_string(),
        route: "oral".to_string(),
        duration_days: 30,
        schedule: vec![],
        special_instructions: String::new(),
        active: true,
    };
    let notification = Notification {
        id: Uuid::new_v4().to_string(),
        origin_user_id: None,
        recipient_id: recipient.to_string(),
        treatment_medication_id: None,
        notification_type: NotificationType::DoctorMessage,
        title: "New prescription".to_string(),
        message: "A new prescription was issued.".to_string(),
        priority: NotificationPriority::Medium,
        state: NotificationState::Read,
        channel: DeliveryChannel::App,
        scheduled_at: None,
        lead_time_minutes: None,
        repeats: false,
        notify_caregiver: false,
        requires_confirmation: false,
        created_at: Utc::now(),
        sent_at: Some(Utc::now()),
        read_at: Some(Utc::now()),
        data: None,
    };
    let (treatment, _, _) = store
        .insert_prescription(treatment, vec![line], notification)
        .await
        .unwrap();
    treatment
}

fn request(
    patient_id: &str,
    treatment_id: &str,
    scheduled: u32,
    taken: u32,
) -> RecordAdherencePeriodRequest {
    RecordAdherencePeriodRequest {
        patient_id: patient_id.to_string(),
        treatment_id: treatment_id.to_string(),
        period_start: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        period_end: NaiveDate::from_ymd_opt(2024, 3, 7).unwrap(),
        doses_scheduled: scheduled,
        doses_taken: taken,
        doses_missed: scheduled - taken,
        doses_late: 0,
    }
}

fn setup() -> (Arc<MemoryStore>, AdherenceService) {
    let store = Arc::new(MemoryStore::new());
    let notifications = NotificationService::new(store.clone());
    let service = AdherenceService::new(store.clone(), notifications);
    (store, service)
}

#[tokio::test]
async fn percentage_and_level_are_computed_from_the_dose_counts() {
    let (store, service) = setup();
    let (patient, account) = seed_patient(store.as_ref()).await;
    let treatment = seed_treatment(store.as_ref(), &patient.id, &account.id).await;

    let record = service
        .record_period(request(&patient.id, &treatment.id, 20, 18))
        .await
        .unwrap();
    assert!((record.adherence_percentage - 90.0).abs() < f64::EPSILON);
    assert_eq!(record.level, AdherenceLevel::High);

    let record = service
        .record_period(request(&patient.id, &treatment.id, 20, 13))
        .await
        .unwrap();
    assert_eq!(record.level, AdherenceLevel::Medium);
}

#[tokio::test]
async fn low_adherence_raises_a_high_priority_alert_with_caregiver_copy() {
    let (store, service) = setup();
    let (patient, account) = seed_patient(store.as_ref()).await;
    let (_, caregiver) = seed_caregiver(store.as_ref(), &patient.id, true).await;
    let treatment = seed_treatment(store.as_ref(), &patient.id, &account.id).await;

    let record = service
        .record_period(request(&patient.id, &treatment.id, 20, 8))
        .await
        .unwrap();
    assert_eq!(record.level, AdherenceLevel::Low);

    let alerts: Vec<_> = store
        .notifications_for_user(&account.id, &[NotificationState::Pending])
        .await
        .unwrap()
        .into_iter()
        .filter(|n| n.notification_type == NotificationType::LowAdherenceAlert)
        .collect();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].priority, NotificationPriority::High);
    assert!(alerts[0].message.contains("40.0%"));

    let copies = store
        .notifications_for_user(&caregiver.id, &[NotificationState::Pending])
        .await
        .unwrap();
    assert_eq!(copies.len(), 1);
    assert_eq!(
        copies[0].notification_type,
        NotificationType::LowAdherenceAlert
    );
}

#[tokio::test]
async fn medium_adherence_raises_no_alert() {
    let (store, service) = setup();
    let (patient, account) = seed_patient(store.as_ref()).await;
    let treatment = seed_treatment(store.as_ref(), &patient.id, &account.id).await;

    service
        .record_period(request(&patient.id, &treatment.id, 20, 12))
        .await
        .unwrap();

    let pending = store
        .notifications_for_user(&account.id, &[NotificationState::Pending])
        .await
        .unwrap();
    assert!(pending
        .iter()
        .all(|n| n.notification_type != NotificationType::LowAdherenceAlert));
}

#[tokio::test]
async fn impossible_dose_counts_are_rejected() {
    let (store, service) = setup();
    let (patient, account) = seed_patient(store.as_ref()).await;
    let treatment = seed_treatment(store.as_ref(), &patient.id, &account.id).await;

    let mut req = request(&patient.id, &treatment.id, 10, 10);
    req.doses_taken = 11;
    req.doses_missed = 0;
    let err = service.record_period(req).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = service
        .record_period(request(&patient.id, &treatment.id, 0, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidatorError(_)));
}

#[tokio::test]
async fn treatment_must_belong_to_the_patient() {
    let (store, service) = setup();
    let (patient, account) = seed_patient(store.as_ref()).await;
    let (other_patient, _) = seed_patient(store.as_ref()).await;
    let treatment = seed_treatment(store.as_ref(), &patient.id, &account.id).await;

    let err = service
        .record_period(request(&other_patient.id, &treatment.id, 10, 9))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn history_is_newest_first_and_requires_a_known_patient() {
    let (store, service) = setup();
    let (patient, account) = seed_patient(store.as_ref()).await;
    let treatment = seed_treatment(store.as_ref(), &patient.id, &account.id).await;

    for taken in [18, 12] {
        service
            .record_period(request(&patient.id, &treatment.id, 20, taken))
            .await
            .unwrap();
    }

    let history = service.history_for_patient(&patient.id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert!(history[0].computed_at >= history[1].computed_at);

    let err = service.history_for_patient("missing").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
