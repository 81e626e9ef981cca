use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

const DEFAULT_COMPLETION_URL: &str = "http://localhost:3000/api/chat";

/// Quality tier requested from the completion service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelTier {
    Smart,
}

/// Body sent to the completion service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRequest {
    pub message: String,
    pub model_tier: ModelTier,
}

impl CompletionRequest {
    /// Request at the tier all quiz content is generated with.
    #[must_use]
    pub fn smart(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            model_tier: ModelTier::Smart,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    response: String,
}

/// Opaque prompt-in, text-out backend.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Returns the raw reply text for a prompt.
    async fn complete(&self, request: CompletionRequest) -> Result<String, GenerationError>;
}

#[derive(Clone, Debug)]
pub struct CompletionConfig {
    pub url: String,
    pub api_key: Option<String>,
    pub timeout: Option<Duration>,
}

impl CompletionConfig {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: None,
            timeout: None,
        }
    }

    /// Reads `QUIZ_COMPLETION_URL`, `QUIZ_COMPLETION_API_KEY` and
    /// `QUIZ_COMPLETION_TIMEOUT_SECS`.
    #[must_use]
    pub fn from_env() -> Self {
        let url = env::var("QUIZ_COMPLETION_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_COMPLETION_URL.into());
        let api_key = env::var("QUIZ_COMPLETION_API_KEY")
            .ok()
            .filter(|value| !value.trim().is_empty());
        let timeout = env::var("QUIZ_COMPLETION_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);
        Self {
            url,
            api_key,
            timeout,
        }
    }
}

/// `CompletionService` that posts JSON to an HTTP chat endpoint.
#[derive(Clone)]
pub struct HttpCompletionService {
    client: Client,
    config: CompletionConfig,
}

impl HttpCompletionService {
    #[must_use]
    pub fn new(config: CompletionConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl CompletionService for HttpCompletionService {
    async fn complete(&self, request: CompletionRequest) -> Result<String, GenerationError> {
        let mut builder = self.client.post(&self.config.url).json(&request);
        if let Some(api_key) = &self.config.api_key {
            builder = builder.bearer_auth(api_key);
        }
        if let Some(timeout) = self.config.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        if !response.status().is_success() {
            return Err(GenerationError::HttpStatus(response.status()));
        }

        let body: CompletionResponse = response.json().await?;
        Ok(body.response)
    }
}
