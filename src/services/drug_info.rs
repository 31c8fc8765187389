use crate::{
    config::Config,
    error::{AppError, Result},
    models::drug_info::{AdverseEffectsReport, DrugLabel, MedicationInfo},
    services::translation::Localizer,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Lookup seam over the external drug-label service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DrugLookup: Send + Sync {
    /// Fetches the label for a brand name. `Ok(None)` means the medication
    /// is not in the upstream database; transport problems map to the
    /// gateway error kinds.
    async fn fetch_label(&self, name: &str) -> Result<Option<DrugLabel>>;
}

/// Gateway to an OpenFDA-compatible drug label API.
#[derive(Clone)]
pub struct DrugInfoService {
    client: reqwest::Client,
    base_url: String,
    localizer: Arc<dyn Localizer>,
    target_language: String,
}

impl DrugInfoService {
    pub fn new(config: &Config, localizer: Arc<dyn Localizer>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.drug_api_timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build gateway client: {}", e)))?;
        Ok(Self {
            client,
            base_url: config.drug_api_url.clone(),
            localizer,
            target_language: config.target_language.clone(),
        })
    }

    /// Full label lookup by brand name. Name fields are never translated;
    /// the free-text sections are localized on request, best effort.
    pub async fn lookup(&self, name: &str, translate: bool) -> Result<MedicationInfo> {
        let label = self
            .fetch_label(name)
            .await?
            .ok_or_else(|| not_found(name))?;

        let label = if translate {
            self.localize_label(label).await
        } else {
            label
        };

        Ok(MedicationInfo {
            searched_name: name.to_string(),
            translated: translate,
            label,
        })
    }

    /// Adverse-reaction excerpt of a label: reactions, warnings and
    /// precautions only.
    pub async fn adverse_effects(&self, name: &str, translate: bool) -> Result<AdverseEffectsReport> {
        let label = self
            .fetch_label(name)
            .await?
            .ok_or_else(|| not_found(name))?;

        let mut report = AdverseEffectsReport {
            medication: name.to_string(),
            translated: translate,
            adverse_reactions: label.adverse_reactions,
            warnings: label.warnings,
            precautions: label.precautions,
        };

        if translate {
            report.adverse_reactions = self.localize(&report.adverse_reactions).await;
            report.warnings = self.localize(&report.warnings).await;
            report.precautions = self.localize(&report.precautions).await;
        }

        Ok(report)
    }

    async fn localize_label(&self, mut label: DrugLabel) -> DrugLabel {
        label.indications = self.localize(&label.indications).await;
        label.adverse_reactions = self.localize(&label.adverse_reactions).await;
        label.contraindications = self.localize(&label.contraindications).await;
        label.dosage = self.localize(&label.dosage).await;
        label.warnings = self.localize(&label.warnings).await;
        label.precautions = self.localize(&label.precautions).await;
        label.interactions = self.localize(&label.interactions).await;
        label
    }

    async fn localize(&self, text: &str) -> String {
        self.localizer.localize(text, &self.target_language).await
    }
}

#[async_trait]
impl DrugLookup for DrugInfoService {
    async fn fetch_label(&self, name: &str) -> Result<Option<DrugLabel>> {
        if name.trim().is_empty() {
            return Err(AppError::validation("Medication name must not be empty"));
        }

        let url = format!(
            "{}?search=openfda.brand_name:\"{}\"&limit=1",
            self.base_url, name
        );
        debug!("Querying drug label API for {}", name);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(map_gateway_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(AppError::GatewayUnavailable(format!(
                "drug label API returned {}",
                status
            )));
        }

        let payload: serde_json::Value = response.json().await.map_err(map_gateway_error)?;
        let label = payload
            .get("results")
            .and_then(|r| r.get(0))
            .map(DrugLabel::from_label_json);
        Ok(label)
    }
}

fn map_gateway_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::GatewayTimeout
    } else {
        AppError::GatewayUnavailable(err.to_string())
    }
}

fn not_found(name: &str) -> AppError {
    AppError::NotFound(format!(
        "Medication \"{}\" was not found in the drug label database",
        name
    ))
}
