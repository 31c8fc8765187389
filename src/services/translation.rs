use crate::{
    config::Config,
    error::{AppError, Result},
    models::drug_info::NOT_AVAILABLE,
};
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

/// Safe per-call size for the translation provider.
pub const MAX_CHUNK_CHARS: usize = 4500;

/// Best-effort text localization. Implementations must never fail the
/// caller: a provider problem degrades to the original text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Localizer: Send + Sync {
    async fn localize(&self, text: &str, target_lang: &str) -> String;
}

/// Localization adapter backed by a LibreTranslate-compatible provider.
#[derive(Clone)]
pub struct TranslationService {
    client: reqwest::Client,
    api_url: String,
}

impl TranslationService {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.translate_timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build translation client: {}", e)))?;
        Ok(Self {
            client,
            api_url: config.translate_api_url.clone(),
        })
    }

    /// Translates text of any length, splitting at sentence boundaries to
    /// respect the provider's per-call size limit.
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String> {
        let chunks = chunk_text(text, MAX_CHUNK_CHARS);
        debug!("Translating {} chunk(s) to {}", chunks.len(), target_lang);

        let mut translated = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            translated.push(self.translate_chunk(chunk.trim(), target_lang).await?);
        }
        Ok(translated.join(" "))
    }

    async fn translate_chunk(&self, chunk: &str, target_lang: &str) -> Result<String> {
        let body = json!({
            "q": chunk,
            "source": "en",
            "target": target_lang,
            "format": "text",
        });

        let response = self
            .client
            .post(&self.api_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Translation provider error: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Internal(format!(
                "Translation provider returned {}",
                response.status()
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("Translation provider error: {}", e)))?;

        payload
            .get("translatedText")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| AppError::internal("Translation provider returned no translatedText"))
    }
}

#[async_trait]
impl Localizer for TranslationService {
    async fn localize(&self, text: &str, target_lang: &str) -> String {
        if text.is_empty() || text == NOT_AVAILABLE {
            return text.to_string();
        }

        match self.translate(text, target_lang).await {
            Ok(translated) => translated,
            Err(e) => {
                warn!("Translation failed, returning original text: {}", e);
                text.to_string()
            }
        }
    }
}

/// Splits `text` into chunks of at most `max_chars` characters, preferring
/// to cut after a `". "` sentence end, then after a newline, then hard at
/// the limit. Concatenating the chunks reproduces the input exactly.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        if rest.chars().count() <= max_chars {
            chunks.push(rest);
            break;
        }

        let window_end = rest
            .char_indices()
            .nth(max_chars)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let window = &rest[..window_end];

        let cut = window
            .rfind(". ")
            .map(|i| i + 1)
            .or_else(|| window.rfind('\n').map(|i| i + 1))
            .unwrap_or(window_end);

        chunks.push(&rest[..cut]);
        rest = &rest[cut..];
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_a_single_chunk() {
        let text = "A short sentence.";
        assert_eq!(chunk_text(text, MAX_CHUNK_CHARS), vec![text]);
    }

    #[test]
    fn long_text_splits_at_sentence_boundaries() {
        let sentence = "This drug may increase the risk of bleeding. ";
        let text = sentence.repeat(250); // ~11k chars
        let chunks = chunk_text(&text, MAX_CHUNK_CHARS);

        assert!(chunks.len() >= 2);
        for chunk in &chunks[..chunks.len() - 1] {
            assert!(chunk.ends_with('.'), "chunk should end at a sentence: {:?}", chunk);
            assert!(chunk.chars().count() <= MAX_CHUNK_CHARS);
        }
    }

    #[test]
    fn chunking_is_lossless() {
        let sentence = "Interaction with anticoagulants has been reported. ";
        let text = sentence.repeat(200);
        let chunks = chunk_text(&text, MAX_CHUNK_CHARS);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn falls_back_to_newline_then_hard_cut() {
        let text = format!("{}\n{}", "a".repeat(3000), "b".repeat(3000));
        let chunks = chunk_text(&text, 4500);
        assert_eq!(chunks[0], format!("{}\n", "a".repeat(3000)));

        let unbroken = "x".repeat(10_000);
        let chunks = chunk_text(&unbroken, 4500);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 4500);
        assert_eq!(chunks.concat(), unbroken);
    }
}
