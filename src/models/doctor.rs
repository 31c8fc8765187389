use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub user_id: String,
    pub specialty: Option<String>,
    pub license_number: String,
    pub institution: String,
    pub years_experience: u8,
    pub office: String,
    pub certifications: String,
}
