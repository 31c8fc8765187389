use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub user_id: String,
    pub identification_number: Option<String>,
    pub gender: Option<Gender>,
    pub blood_type: String,
    pub allergies: String,
    pub chronic_conditions: String,
    pub address: String,
    pub emergency_contact: Option<String>,
    pub emergency_phone: Option<String>,
}
