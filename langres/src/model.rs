//! External text-improvement collaborators for the suggestion engine.
//!
//! The [`SuggestionModel`] trait abstracts over generative backends so the
//! engine never couples to one provider: [`OllamaModel`] talks to a local
//! Ollama instance over HTTP, and [`MockModel`] is a deterministic,
//! network-free implementation for tests.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::error::Error;
use crate::types::Locale;

/// A generative collaborator that can rewrite one UI string.
///
/// All methods are async: real implementations block on network I/O. Callers
/// are expected to bound the call with a timeout and degrade gracefully on
/// failure (see `suggest::suggest_with_model`).
#[async_trait]
pub trait SuggestionModel: Send + Sync {
    /// Produces an improved version of `text` for the given locale.
    async fn improve(
        &self,
        text: &str,
        locale: Locale,
        style_guide: Option<&str>,
    ) -> Result<String, Error>;

    /// Identifies the backend for logging and suggestion provenance.
    fn name(&self) -> &str;
}

/// Ollama `/api/generate` provider.
pub struct OllamaModel {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaModel {
    /// Creates a provider for an Ollama instance, e.g.
    /// `OllamaModel::new("http://localhost:11434", "llama3")`.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Result<Self, Error> {
        let base_url: String = base_url.into();
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::model(format!("failed to create HTTP client: {e}")))?;
        Ok(OllamaModel {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    /// Reads the base URL from the `OLLAMA_URL` environment variable.
    pub fn from_env(model: impl Into<String>) -> Result<Self, Error> {
        let base_url = std::env::var("OLLAMA_URL")
            .map_err(|_| Error::model("OLLAMA_URL environment variable not set"))?;
        Self::new(base_url, model)
    }
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[async_trait]
impl SuggestionModel for OllamaModel {
    async fn improve(
        &self,
        text: &str,
        locale: Locale,
        style_guide: Option<&str>,
    ) -> Result<String, Error> {
        let body = json!({
            "model": self.model,
            "prompt": build_prompt(text, locale, style_guide),
            "stream": false,
        });

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::model(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::model(format!(
                "model responded with status {}",
                response.status()
            )));
        }

        let payload: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::model(format!("invalid model response: {e}")))?;

        let improved = payload.response.trim().to_string();
        if improved.is_empty() {
            return Err(Error::model("model returned an empty suggestion"));
        }
        Ok(improved)
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

fn build_prompt(text: &str, locale: Locale, style_guide: Option<&str>) -> String {
    let mut prompt = format!(
        "Rewrite the following {} UI string so it is clear, concise, and consistent. \
         Reply with the rewritten string only.\n\n{}",
        locale, text
    );
    if let Some(guide) = style_guide {
        prompt.push_str(&format!("\n\nStyle guide: {}", guide));
    }
    prompt
}

/// Behaviors the [`MockModel`] can simulate.
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Append a fixed marker to the input.
    Suffix,
    /// Always return a fixed reply.
    Canned(String),
    /// Always fail with the given message.
    Error(String),
    /// Sleep before answering, to exercise caller timeouts.
    Slow(Duration),
}

/// Deterministic, network-free model for tests.
#[derive(Debug, Clone)]
pub struct MockModel {
    mode: MockMode,
}

impl MockModel {
    pub fn new(mode: MockMode) -> Self {
        MockModel { mode }
    }
}

#[async_trait]
impl SuggestionModel for MockModel {
    async fn improve(
        &self,
        text: &str,
        _locale: Locale,
        _style_guide: Option<&str>,
    ) -> Result<String, Error> {
        match &self.mode {
            MockMode::Suffix => Ok(format!("{} (improved)", text.trim())),
            MockMode::Canned(reply) => Ok(reply.clone()),
            MockMode::Error(message) => Err(Error::model(message.clone())),
            MockMode::Slow(delay) => {
                tokio::time::sleep(*delay).await;
                Ok(text.trim().to_string())
            }
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
