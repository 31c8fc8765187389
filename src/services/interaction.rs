use crate::{
    config::Config,
    error::{AppError, Result},
    models::drug_info::{InteractionFinding, InteractionReport},
    services::{drug_info::DrugLookup, translation::Localizer},
};
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, info};

/// Characters of context kept on each side of a term match before the
/// passage is snapped to sentence boundaries.
const CONTEXT_WINDOW_CHARS: usize = 500;

/// Checks two medications against each other's label interaction text.
///
/// Pure read-through of two gateway lookups; nothing is cached and nothing
/// is persisted. Either a complete report is returned or a single error.
#[derive(Clone)]
pub struct InteractionService {
    gateway: Arc<dyn DrugLookup>,
    localizer: Arc<dyn Localizer>,
    target_language: String,
}

impl InteractionService {
    pub fn new(gateway: Arc<dyn DrugLookup>, localizer: Arc<dyn Localizer>, config: &Config) -> Self {
        Self {
            gateway,
            localizer,
            target_language: config.target_language.clone(),
        }
    }

    pub async fn find_interaction(
        &self,
        name_a: &str,
        name_b: &str,
        translate: bool,
    ) -> Result<InteractionReport> {
        if name_a.trim().is_empty() || name_b.trim().is_empty() {
            return Err(AppError::validation("Both medication names are required"));
        }
        debug!("Checking interactions between {} and {}", name_a, name_b);

        let label_a = self.gateway.fetch_label(name_a).await?;
        let label_b = self.gateway.fetch_label(name_b).await?;

        let text_a = label_a
            .map(|l| l.interaction_text().to_string())
            .ok_or_else(|| not_found(name_a))?;
        let text_b = label_b
            .map(|l| l.interaction_text().to_string())
            .ok_or_else(|| not_found(name_b))?;

        let terms_a = search_terms(name_a);
        let terms_b = search_terms(name_b);

        // Asymmetric search: either label may mention the other medication.
        let lower_a = text_a.to_lowercase();
        let lower_b = text_b.to_lowercase();
        let mention_in_a = terms_b.iter().any(|t| lower_a.contains(t.as_str()));
        let mention_in_b = terms_a.iter().any(|t| lower_b.contains(t.as_str()));

        let mut findings = Vec::new();
        if mention_in_a {
            let mut passage = extract_passage(&text_a, &terms_b);
            if translate {
                passage = self.localize(&passage).await;
            }
            findings.push(InteractionFinding {
                found_in: name_a.to_string(),
                mentions: name_b.to_string(),
                description: passage,
            });
        }
        if mention_in_b {
            let mut passage = extract_passage(&text_b, &terms_a);
            if translate {
                passage = self.localize(&passage).await;
            }
            findings.push(InteractionFinding {
                found_in: name_b.to_string(),
                mentions: name_a.to_string(),
                description: passage,
            });
        }

        let specific = !findings.is_empty();
        let (mut message, mut warning, mut additional_info) = if specific {
            (
                format!(
                    "Interaction information found between {} and {}",
                    name_a, name_b
                ),
                "This information is for reference only. Consult your doctor before combining these medications.".to_string(),
                None,
            )
        } else {
            (
                format!(
                    "No specific interaction between {} and {} is documented in the drug label database",
                    name_a, name_b
                ),
                "Consult your doctor. The absence of documented interactions does not guarantee safety.".to_string(),
                Some(
                    "This does NOT mean the combination is safe. Always check with your doctor or pharmacist before combining medications.".to_string(),
                ),
            )
        };

        if translate {
            message = self.localize(&message).await;
            warning = self.localize(&warning).await;
            if let Some(info) = additional_info.take() {
                additional_info = Some(self.localize(&info).await);
            }
        }

        info!(
            "Interaction check {} / {}: specific mention found = {}",
            name_a, name_b, specific
        );

        Ok(InteractionReport {
            medications: vec![name_a.to_string(), name_b.to_string()],
            translated: translate,
            interaction_specific_found: specific,
            message,
            warning,
            additional_info,
            findings,
        })
    }

    async fn localize(&self, text: &str) -> String {
        self.localizer.localize(text, &self.target_language).await
    }
}

fn not_found(name: &str) -> AppError {
    AppError::NotFound(format!(
        "Medication \"{}\" was not found in the drug label database",
        name
    ))
}

/// Lowercase search terms for a medication name: the name itself plus the
/// name with internal hyphens removed, tolerating "drug-x" vs "drugx".
pub fn search_terms(name: &str) -> Vec<String> {
    let lower = name.to_lowercase();
    let dehyphenated = lower.replace('-', "");
    let mut terms = vec![lower];
    if dehyphenated != terms[0] {
        terms.push(dehyphenated);
    }
    terms
}

/// Extracts the passage around the first occurrence of any term.
///
/// A window of `CONTEXT_WINDOW_CHARS` on each side of the match is snapped
/// to the nearest sentence boundary (a literal ". " or a newline) so the
/// passage reads as complete sentences; without a boundary in range the raw
/// window is kept. If no term occurs at all, the lead of the text is
/// returned with a truncation marker.
pub fn extract_passage(text: &str, terms: &[String]) -> String {
    for term in terms {
        let pattern = match Regex::new(&format!("(?i){}", regex::escape(term))) {
            Ok(pattern) => pattern,
            Err(_) => continue,
        };
        let Some(found) = pattern.find(text) else {
            continue;
        };
        let pos = found.start();

        let window_start = floor_char_boundary(text, pos.saturating_sub(CONTEXT_WINDOW_CHARS));
        let mut start = window_start;
        if let Some(prev) = text[..pos].rfind(". ") {
            if prev + 2 > window_start {
                start = prev + 2;
            }
        } else if let Some(prev) = text[..pos].rfind('\n') {
            if prev + 1 > window_start {
                start = prev + 1;
            }
        }

        let mut end = ceil_char_boundary(text, (pos + CONTEXT_WINDOW_CHARS).min(text.len()));
        if let Some(next) = text[pos..end].find(". ") {
            end = pos + next + 1;
        } else if let Some(next) = text[pos..end].find('\n') {
            end = pos + next;
        }

        return text[start..end].trim().to_string();
    }

    // Safety net: a mention was detected but no term matched here, or the
    // caller asked for a passage anyway. Return the lead of the text.
    let prefix: String = text.chars().take(CONTEXT_WINDOW_CHARS).collect();
    if text.chars().count() > CONTEXT_WINDOW_CHARS {
        format!("{}...", prefix)
    } else {
        text.to_string()
    }
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn ceil_char_boundary(s: &str, mut index: usize) -> usize {
    while index < s.len() && !s.is_char_boundary(index) {
        index += 1;
    }
    index
}
