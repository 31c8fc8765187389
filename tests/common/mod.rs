#![allow(dead_code)]

use chrono::{NaiveDate, Utc};
use meditrack::models::{
    caregiver::{AccessLevel, CaregiverLink, LinkStatus},
    doctor::Doctor,
    medication::Medication,
    patient::Patient,
    user::{User, UserRole},
};
use meditrack::services::store::RecordStore;
use uuid::Uuid;

pub fn user(role: UserRole, first_name: &str, last_name: &str) -> User {
    User {
        id: Uuid::new_v4().to_string(),
        email: format!("{}.{}@example.com", first_name.to_lowercase(), Uuid::new_v4()),
        password_hash: String::new(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        phone: "555-0100".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1980, 6, 15).unwrap(),
        role,
        registered_at: Utc::now(),
        last_seen_at: Utc::now(),
        active: true,
    }
}

pub fn medication(name: &str) -> Medication {
    Medication {
        id: Uuid::new_v4().to_string(),
        commercial_name: name.to_string(),
        generic_name: name.to_lowercase(),
        manufacturer: "Acme Labs".to_string(),
        formulation: Some("tablet".to_string()),
        strength: "500 mg".to_string(),
        route: "oral".to_string(),
        requires_prescription: true,
        side_effects: String::new(),
        contraindications: String::new(),
        barcode: Uuid::new_v4().to_string(),
    }
}

/// A patient with their backing user account, both persisted.
pub async fn seed_patient(store: &dyn RecordStore) -> (Patient, User) {
    let account = store
        .insert_user(user(UserRole::Patient, "Paula", "Prince"))
        .await
        .unwrap();
    let patient = store
        .insert_patient(Patient {
            id: Uuid::new_v4().to_string(),
            user_id: account.id.clone(),
            identification_number: Some("ID-1001".to_string()),
            gender: None,
            blood_type: "O+".to_string(),
            allergies: String::new(),
            chronic_conditions: String::new(),
            address: "12 Main St".to_string(),
            emergency_contact: None,
            emergency_phone: None,
        })
        .await
        .unwrap();
    (patient, account)
}

/// A doctor with their backing user account, both persisted.
pub async fn seed_doctor(store: &dyn RecordStore) -> (Doctor, User) {
    let account = store
        .insert_user(user(UserRole::Doctor, "Gregory", "House"))
        .await
        .unwrap();
    let doctor = store
        .insert_doctor(Doctor {
            id: Uuid::new_v4().to_string(),
            user_id: account.id.clone(),
            specialty: Some("Internal medicine".to_string()),
            license_number: "LIC-4421".to_string(),
            institution: "Central Clinic".to_string(),
            years_experience: 15,
            office: "3B".to_string(),
            certifications: String::new(),
        })
        .await
        .unwrap();
    (doctor, account)
}

/// An active caregiver link for `patient_id`, with its user account.
pub async fn seed_caregiver(
    store: &dyn RecordStore,
    patient_id: &str,
    receive_notifications: bool,
) -> (CaregiverLink, User) {
    let account = store
        .insert_user(user(UserRole::Caregiver, "Carla", "Reyes"))
        .await
        .unwrap();
    let link = store
        .insert_caregiver_link(CaregiverLink {
            id: Uuid::new_v4().to_string(),
            patient_id: patient_id.to_string(),
            user_id: account.id.clone(),
            assigned_on: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            status: LinkStatus::Active,
            access_level: AccessLevel::Full,
            receive_notifications,
            can_record_doses: true,
            relationship: "family".to_string(),
            certified: false,
            availability: String::new(),
            notes: String::new(),
        })
        .await
        .unwrap();
    (link, account)
}
