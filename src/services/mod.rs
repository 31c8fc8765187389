pub mod adherence;
pub mod drug_info;
pub mod interaction;
pub mod notification;
pub mod prescription;
pub mod store;
pub mod translation;
pub mod user;

pub use adherence::AdherenceService;
pub use drug_info::{DrugInfoService, DrugLookup};
pub use interaction::InteractionService;
pub use notification::NotificationService;
pub use prescription::PrescriptionService;
pub use store::{MemoryStore, RecordStore};
pub use translation::{Localizer, TranslationService};
pub use user::UserService;
