//! Chat-completion client implementation using reqwest.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::domain::config::{API_KEY_ENV, CompletionConfig};
use crate::domain::{AppError, ChatMessage};
use crate::ports::{CompletionClient, CompletionClientFactory, CompletionRequest};

const DEFAULT_STATUS_MESSAGE: &str = "Completion request failed";

/// HTTP transport for an OpenAI-compatible chat-completions endpoint.
///
/// One request per call, no retries.
#[derive(Clone)]
pub struct HttpCompletionClient {
    api_key: String,
    api_url: Url,
    client: Client,
}

impl std::fmt::Debug for HttpCompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCompletionClient")
            .field("api_url", &self.api_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl HttpCompletionClient {
    /// Create a new HTTP client with the given API key and configuration.
    pub fn new(api_key: String, config: &CompletionConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::CompletionApi {
                message: format!("Failed to create HTTP client: {}", e),
                status: None,
            })?;

        Ok(Self { api_key, api_url: config.api_url.clone(), client })
    }

    fn send_request(&self, request: &ApiRequest) -> Result<String, AppError> {
        debug!(url = %self.api_url, model = %request.model, "sending completion request");

        let response = self
            .client
            .post(self.api_url.clone())
            .bearer_auth(&self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .map_err(|e| AppError::CompletionApi {
                message: format!("HTTP request failed: {}", e),
                status: None,
            })?;

        let status = response.status();
        let body_text = response.text().map_err(|e| AppError::CompletionApi {
            message: format!("Failed to read response body: {}", e),
            status: Some(status.as_u16()),
        })?;

        if status.is_success() {
            let api_response: ApiResponse =
                serde_json::from_str(&body_text).map_err(|e| AppError::CompletionApi {
                    message: format!("Failed to parse response: {}", e),
                    status: Some(status.as_u16()),
                })?;

            return api_response
                .choices
                .into_iter()
                .next()
                .map(|choice| choice.message.content.unwrap_or_default())
                .ok_or_else(|| AppError::CompletionApi {
                    message: "No choices in response".into(),
                    status: Some(status.as_u16()),
                });
        }

        let message = extract_error_message(&body_text).unwrap_or_else(|| {
            if !body_text.trim().is_empty() {
                body_text.clone()
            } else if status.as_u16() == 429 {
                "Rate limited".to_string()
            } else if status.is_server_error() {
                "Server error".to_string()
            } else {
                DEFAULT_STATUS_MESSAGE.to_string()
            }
        });

        Err(AppError::CompletionApi { message, status: Some(status.as_u16()) })
    }
}

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    content: Option<String>,
}

fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<serde_json::Value>(body).ok()?;

    if let Some(msg) = parsed
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
    {
        return Some(msg.to_string());
    }

    parsed.get("message").and_then(|message| message.as_str()).map(ToOwned::to_owned)
}

impl CompletionClient for HttpCompletionClient {
    fn complete(&self, request: CompletionRequest) -> Result<String, AppError> {
        let api_request = ApiRequest { model: &request.model, messages: &request.messages };
        self.send_request(&api_request)
    }
}

/// Builds an [`HttpCompletionClient`] per call from an explicitly held key.
#[derive(Clone)]
pub struct LazyCompletionClientFactory {
    api_key: String,
    config: CompletionConfig,
}

impl std::fmt::Debug for LazyCompletionClientFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyCompletionClientFactory")
            .field("api_url", &self.config.api_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl LazyCompletionClientFactory {
    pub fn new(api_key: String, config: CompletionConfig) -> Self {
        Self { api_key, config }
    }

    /// Read the API key from the environment once, at startup.
    pub fn from_env(config: CompletionConfig) -> Result<Self, AppError> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AppError::EnvironmentVariableMissing(API_KEY_ENV.into()))?;

        Ok(Self::new(api_key, config))
    }
}

impl CompletionClientFactory for LazyCompletionClientFactory {
    fn create(&self) -> Result<Box<dyn CompletionClient>, AppError> {
        Ok(Box::new(HttpCompletionClient::new(self.api_key.clone(), &self.config)?))
    }
}
