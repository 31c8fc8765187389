use crate::{
    error::{AppError, Result},
    models::{
        adherence::AdherenceRecord,
        caregiver::CaregiverLink,
        doctor::Doctor,
        medication::Medication,
        notification::{Notification, NotificationState, NotificationType},
        patient::Patient,
        treatment::{Treatment, TreatmentMedication},
        user::{User, UserRole},
    },
};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Repository boundary over the persistent record store. Persistence
/// mechanics live behind this trait; services only see keyed CRUD plus the
/// filtered queries below. Every method is atomic with respect to
/// concurrent callers.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert_user(&self, user: User) -> Result<User>;
    async fn user_by_id(&self, id: &str) -> Result<Option<User>>;
    async fn user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn admin_exists(&self) -> Result<bool>;

    async fn insert_patient(&self, patient: Patient) -> Result<Patient>;
    async fn patient_by_id(&self, id: &str) -> Result<Option<Patient>>;
    async fn patient_by_user_id(&self, user_id: &str) -> Result<Option<Patient>>;

    async fn insert_doctor(&self, doctor: Doctor) -> Result<Doctor>;
    async fn doctor_by_id(&self, id: &str) -> Result<Option<Doctor>>;

    async fn insert_medication(&self, medication: Medication) -> Result<Medication>;
    async fn medication_by_id(&self, id: &str) -> Result<Option<Medication>>;

    /// Persists one treatment, its medication lines and the accompanying
    /// notification as a single all-or-nothing unit. If any line references
    /// a medication that does not exist, nothing is stored.
    async fn insert_prescription(
        &self,
        treatment: Treatment,
        lines: Vec<TreatmentMedication>,
        notification: Notification,
    ) -> Result<(Treatment, Vec<TreatmentMedication>, Notification)>;

    async fn treatment_by_id(&self, id: &str) -> Result<Option<Treatment>>;
    async fn treatments_for_patient(&self, patient_id: &str) -> Result<Vec<Treatment>>;
    async fn treatments_for_doctor(&self, doctor_id: &str) -> Result<Vec<Treatment>>;
    async fn medications_for_treatment(&self, treatment_id: &str) -> Result<Vec<TreatmentMedication>>;

    /// Deletes a treatment together with everything it owns: its medication
    /// lines and any reminder notifications tied to those lines.
    async fn delete_treatment(&self, id: &str) -> Result<()>;

    async fn insert_notification(&self, notification: Notification) -> Result<Notification>;
    async fn notification_by_id(&self, id: &str) -> Result<Option<Notification>>;
    async fn update_notification(&self, notification: Notification) -> Result<Notification>;

    /// Notifications for a user whose state is in `states`, newest first.
    async fn notifications_for_user(
        &self,
        user_id: &str,
        states: &[NotificationState],
    ) -> Result<Vec<Notification>>;

    /// Pending medication reminders for a user, newest first.
    async fn pending_reminders(&self, user_id: &str) -> Result<Vec<Notification>>;

    async fn insert_adherence(&self, record: AdherenceRecord) -> Result<AdherenceRecord>;
    async fn adherence_for_patient(&self, patient_id: &str) -> Result<Vec<AdherenceRecord>>;

    async fn insert_caregiver_link(&self, link: CaregiverLink) -> Result<CaregiverLink>;
    async fn caregivers_for_patient(&self, patient_id: &str) -> Result<Vec<CaregiverLink>>;
}

#[derive(Default)]
struct Tables {
    users: HashMap<String, User>,
    patients: HashMap<String, Patient>,
    doctors: HashMap<String, Doctor>,
    medications: HashMap<String, Medication>,
    treatments: HashMap<String, Treatment>,
    treatment_medications: HashMap<String, TreatmentMedication>,
    notifications: HashMap<String, Notification>,
    adherence_records: HashMap<String, AdherenceRecord>,
    caregiver_links: HashMap<String, CaregiverLink>,
}

/// Process-embedded record store. One RwLock guards all tables, so each
/// operation is a single atomic section.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(notifications: &mut Vec<Notification>) {
    notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert_user(&self, user: User) -> Result<User> {
        let mut tables = self.inner.write();
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(AppError::conflict("A user with this email already exists"));
        }
        tables.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn user_by_id(&self, id: &str) -> Result<Option<User>> {
        Ok(self.inner.read().users.get(id).cloned())
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .inner
            .read()
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn admin_exists(&self) -> Result<bool> {
        Ok(self
            .inner
            .read()
            .users
            .values()
            .any(|u| u.role == UserRole::Admin && u.active))
    }

    async fn insert_patient(&self, patient: Patient) -> Result<Patient> {
        self.inner
            .write()
            .patients
            .insert(patient.id.clone(), patient.clone());
        Ok(patient)
    }

    async fn patient_by_id(&self, id: &str) -> Result<Option<Patient>> {
        Ok(self.inner.read().patients.get(id).cloned())
    }

    async fn patient_by_user_id(&self, user_id: &str) -> Result<Option<Patient>> {
        Ok(self
            .inner
            .read()
            .patients
            .values()
            .find(|p| p.user_id == user_id)
            .cloned())
    }

    async fn insert_doctor(&self, doctor: Doctor) -> Result<Doctor> {
        self.inner
            .write()
            .doctors
            .insert(doctor.id.clone(), doctor.clone());
        Ok(doctor)
    }

    async fn doctor_by_id(&self, id: &str) -> Result<Option<Doctor>> {
        Ok(self.inner.read().doctors.get(id).cloned())
    }

    async fn insert_medication(&self, medication: Medication) -> Result<Medication> {
        self.inner
            .write()
            .medications
            .insert(medication.id.clone(), medication.clone());
        Ok(medication)
    }

    async fn medication_by_id(&self, id: &str) -> Result<Option<Medication>> {
        Ok(self.inner.read().medications.get(id).cloned())
    }

    async fn insert_prescription(
        &self,
        treatment: Treatment,
        lines: Vec<TreatmentMedication>,
        notification: Notification,
    ) -> Result<(Treatment, Vec<TreatmentMedication>, Notification)> {
        let mut tables = self.inner.write();

        // Resolve every line before touching any table.
        for line in &lines {
            if !tables.medications.contains_key(&line.medication_id) {
                return Err(AppError::NotFound(format!(
                    "Medication {} not found",
                    line.medication_id
                )));
            }
        }

        tables
            .treatments
            .insert(treatment.id.clone(), treatment.clone());
        for line in &lines {
            tables
                .treatment_medications
                .insert(line.id.clone(), line.clone());
        }
        tables
            .notifications
            .insert(notification.id.clone(), notification.clone());

        Ok((treatment, lines, notification))
    }

    async fn treatment_by_id(&self, id: &str) -> Result<Option<Treatment>> {
        Ok(self.inner.read().treatments.get(id).cloned())
    }

    async fn treatments_for_patient(&self, patient_id: &str) -> Result<Vec<Treatment>> {
        let mut treatments: Vec<Treatment> = self
            .inner
            .read()
            .treatments
            .values()
            .filter(|t| t.patient_id == patient_id)
            .cloned()
            .collect();
        treatments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(treatments)
    }

    async fn treatments_for_doctor(&self, doctor_id: &str) -> Result<Vec<Treatment>> {
        let mut treatments: Vec<Treatment> = self
            .inner
            .read()
            .treatments
            .values()
            .filter(|t| t.doctor_id == doctor_id)
            .cloned()
            .collect();
        treatments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(treatments)
    }

    async fn medications_for_treatment(&self, treatment_id: &str) -> Result<Vec<TreatmentMedication>> {
        Ok(self
            .inner
            .read()
            .treatment_medications
            .values()
            .filter(|m| m.treatment_id == treatment_id)
            .cloned()
            .collect())
    }

    async fn delete_treatment(&self, id: &str) -> Result<()> {
        let mut tables = self.inner.write();
        if tables.treatments.remove(id).is_none() {
            return Err(AppError::NotFound(format!("Treatment {} not found", id)));
        }

        let removed_lines: Vec<String> = tables
            .treatment_medications
            .values()
            .filter(|m| m.treatment_id == id)
            .map(|m| m.id.clone())
            .collect();
        for line_id in &removed_lines {
            tables.treatment_medications.remove(line_id);
        }
        tables.notifications.retain(|_, n| {
            n.treatment_medication_id
                .as_ref()
                .map_or(true, |line_id| !removed_lines.contains(line_id))
        });
        Ok(())
    }

    async fn insert_notification(&self, notification: Notification) -> Result<Notification> {
        self.inner
            .write()
            .notifications
            .insert(notification.id.clone(), notification.clone());
        Ok(notification)
    }

    async fn notification_by_id(&self, id: &str) -> Result<Option<Notification>> {
        Ok(self.inner.read().notifications.get(id).cloned())
    }

    async fn update_notification(&self, notification: Notification) -> Result<Notification> {
        let mut tables = self.inner.write();
        if !tables.notifications.contains_key(&notification.id) {
            return Err(AppError::NotFound(format!(
                "Notification {} not found",
                notification.id
            )));
        }
        tables
            .notifications
            .insert(notification.id.clone(), notification.clone());
        Ok(notification)
    }

    async fn notifications_for_user(
        &self,
        user_id: &str,
        states: &[NotificationState],
    ) -> Result<Vec<Notification>> {
        let mut notifications: Vec<Notification> = self
            .inner
            .read()
            .notifications
            .values()
            .filter(|n| n.recipient_id == user_id && states.contains(&n.state))
            .cloned()
            .collect();
        newest_first(&mut notifications);
        Ok(notifications)
    }

    async fn pending_reminders(&self, user_id: &str) -> Result<Vec<Notification>> {
        let mut reminders: Vec<Notification> = self
            .inner
            .read()
            .notifications
            .values()
            .filter(|n| {
                n.recipient_id == user_id
                    && n.notification_type == NotificationType::MedicationReminder
                    && n.state == NotificationState::Pending
            })
            .cloned()
            .collect();
        newest_first(&mut reminders);
        Ok(reminders)
    }

    async fn insert_adherence(&self, record: AdherenceRecord) -> Result<AdherenceRecord> {
        self.inner
            .write()
            .adherence_records
            .insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn adherence_for_patient(&self, patient_id: &str) -> Result<Vec<AdherenceRecord>> {
        let mut records: Vec<AdherenceRecord> = self
            .inner
            .read()
            .adherence_records
            .values()
            .filter(|r| r.patient_id == patient_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.computed_at.cmp(&a.computed_at));
        Ok(records)
    }

    async fn insert_caregiver_link(&self, link: CaregiverLink) -> Result<CaregiverLink> {
        self.inner
            .write()
            .caregiver_links
            .insert(link.id.clone(), link.clone());
        Ok(link)
    }

    async fn caregivers_for_patient(&self, patient_id: &str) -> Result<Vec<CaregiverLink>> {
        Ok(self
            .inner
            .read()
            .caregiver_links
            .values()
            .filter(|l| l.patient_id == patient_id)
            .cloned()
            .collect())
    }
}
