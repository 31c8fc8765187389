pub mod adherence;
pub mod medications;
pub mod notifications;
pub mod prescriptions;
