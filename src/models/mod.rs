pub mod adherence;
pub mod caregiver;
pub mod doctor;
pub mod drug_info;
pub mod medication;
pub mod notification;
pub mod patient;
pub mod treatment;
pub mod user;
