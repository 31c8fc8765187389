use serde::{Deserialize, Serialize};

/// Immutable catalog entry. Created by catalog management, read-only to the
/// treatment and interaction services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medication {
    pub id: String,
    pub commercial_name: String,
    pub generic_name: String,
    pub manufacturer: String,
    pub formulation: Option<String>,
    pub strength: String,
    pub route: String,
    pub requires_prescription: bool,
    pub side_effects: String,
    pub contraindications: String,
    pub barcode: String,
}
