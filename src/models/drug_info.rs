use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sentinel used when the upstream label payload omits a field.
pub const NOT_AVAILABLE: &str = "Not available";

/// Structured drug-information record returned by the label gateway.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrugLabel {
    pub commercial_name: String,
    pub generic_name: String,
    pub manufacturer: String,
    pub indications: String,
    pub adverse_reactions: String,
    pub contraindications: String,
    pub dosage: String,
    pub warnings: String,
    pub precautions: String,
    pub interactions: String,
}

impl DrugLabel {
    /// Builds a label from one entry of an OpenFDA-style `results` array.
    /// Every absent field falls back to the "not available" sentinel.
    pub fn from_label_json(result: &Value) -> Self {
        let openfda = result.get("openfda");
        DrugLabel {
            commercial_name: first_string(openfda, "brand_name"),
            generic_name: first_string(openfda, "generic_name"),
            manufacturer: first_string(openfda, "manufacturer_name"),
            indications: first_string(Some(result), "indications_and_usage"),
            adverse_reactions: first_string(Some(result), "adverse_reactions"),
            contraindications: first_string(Some(result), "contraindications"),
            dosage: first_string(Some(result), "dosage_and_administration"),
            warnings: first_string(Some(result), "warnings"),
            precautions: first_string(Some(result), "precautions"),
            interactions: first_string(Some(result), "drug_interactions"),
        }
    }

    /// Raw interaction text for mention searching: the sentinel counts as
    /// "no interaction section", not as searchable text.
    pub fn interaction_text(&self) -> &str {
        if self.interactions == NOT_AVAILABLE {
            ""
        } else {
            &self.interactions
        }
    }
}

fn first_string(value: Option<&Value>, field: &str) -> String {
    value
        .and_then(|v| v.get(field))
        .and_then(|v| v.get(0))
        .and_then(|v| v.as_str())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

/// Full label lookup response for a single medication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicationInfo {
    pub searched_name: String,
    pub translated: bool,
    pub label: DrugLabel,
}

/// Adverse-effects excerpt of a label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdverseEffectsReport {
    pub medication: String,
    pub translated: bool,
    pub adverse_reactions: String,
    pub warnings: String,
    pub precautions: String,
}

/// One side of an interaction check: the label of `found_in` mentions the
/// other medication in its interaction text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionFinding {
    pub found_in: String,
    pub mentions: String,
    pub description: String,
}

/// Transient result of an interaction check between two medications.
/// Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionReport {
    pub medications: Vec<String>,
    pub translated: bool,
    pub interaction_specific_found: bool,
    pub message: String,
    pub warning: String,
    pub additional_info: Option<String>,
    pub findings: Vec<InteractionFinding>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_present_fields_and_defaults_missing_ones() {
        let result = json!({
            "openfda": {
                "brand_name": ["Aspirin"],
                "generic_name": ["acetylsalicylic acid"]
            },
            "drug_interactions": ["May interact with ibuprofen."],
            "warnings": ["Do not exceed the stated dose."]
        });

        let label = DrugLabel::from_label_json(&result);
        assert_eq!(label.commercial_name, "Aspirin");
        assert_eq!(label.generic_name, "acetylsalicylic acid");
        assert_eq!(label.manufacturer, NOT_AVAILABLE);
        assert_eq!(label.interactions, "May interact with ibuprofen.");
        assert_eq!(label.warnings, "Do not exceed the stated dose.");
        assert_eq!(label.indications, NOT_AVAILABLE);
        assert_eq!(label.precautions, NOT_AVAILABLE);
    }

    #[test]
    fn sentinel_interactions_are_not_searchable() {
        let label = DrugLabel {
            interactions: NOT_AVAILABLE.to_string(),
            ..DrugLabel::default()
        };
        assert_eq!(label.interaction_text(), "");

        let label = DrugLabel {
            interactions: "Avoid warfarin.".to_string(),
            ..DrugLabel::default()
        };
        assert_eq!(label.interaction_text(), "Avoid warfarin.");
    }
}
