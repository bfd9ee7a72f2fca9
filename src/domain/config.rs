//! Runtime configuration (`costdraft.toml`).

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use crate::domain::AppError;
use crate::domain::conversation::DEFAULT_SYSTEM_MESSAGE;
use crate::domain::historical::HistoricalSchema;

pub const CONFIG_FILE_NAME: &str = "costdraft.toml";
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const DEFAULT_TEMPLATE: &str = "feasibility-v2";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
    #[serde(default)]
    pub historical: HistoricalConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Chat-completion endpoint settings. The API key is never read from here.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompletionConfig {
    pub api_url: Url,
    pub model: String,
    pub timeout_secs: u64,
    pub system_message: String,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            model: "gpt-4o-2024-05-13".to_string(),
            timeout_secs: 120,
            system_message: DEFAULT_SYSTEM_MESSAGE.to_string(),
        }
    }
}

fn default_api_url() -> Url {
    Url::parse("https://api.openai.com/v1/chat/completions").expect("static URL is valid")
}

/// Which instruction template to render.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PromptConfig {
    /// Name of a bundled template.
    pub template: String,
    /// A template file; takes precedence over `template`.
    pub template_path: Option<PathBuf>,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self { template: DEFAULT_TEMPLATE.to_string(), template_path: None }
    }
}

/// Reference dataset location and column mapping.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistoricalConfig {
    /// Dataset file; the bundled dataset is used when unset.
    pub path: Option<PathBuf>,
    pub columns: HistoricalSchema,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind: String,
    pub max_upload_bytes: usize,
    /// Browser origins allowed to call the API; `"*"` allows any origin.
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".to_string(),
            max_upload_bytes: 50 * 1024 * 1024,
            allowed_origins: vec![ANY_ORIGIN.to_string()],
        }
    }
}

const ANY_ORIGIN: &str = "*";

/// Cross-origin policy derived from `server.allowed_origins`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    Any,
    /// Serialized origins (`scheme://host[:port]`); empty allows none.
    List(Vec<String>),
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        self.bind.parse().map_err(|e| {
            AppError::config_error(format!("Invalid server.bind '{}': {}", self.bind, e))
        })
    }

    pub fn allowed_origins(&self) -> Result<AllowedOrigins, AppError> {
        if self.allowed_origins.iter().any(|origin| origin == ANY_ORIGIN) {
            return Ok(AllowedOrigins::Any);
        }

        let origins = self
            .allowed_origins
            .iter()
            .map(|origin| parse_origin(origin))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(AllowedOrigins::List(origins))
    }
}

fn parse_origin(origin: &str) -> Result<String, AppError> {
    let invalid = |reason: &str| {
        AppError::config_error(format!(
            "Invalid server.allowed_origins entry '{}': {}",
            origin, reason
        ))
    };

    let url = Url::parse(origin).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.path() != "/" || url.query().is_some() {
        return Err(invalid("an origin has no path or query"));
    }
    Ok(url.origin().ascii_serialization())
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.completion.model.trim().is_empty() {
            return Err(AppError::config_error("completion.model must not be empty"));
        }
        if self.completion.timeout_secs == 0 {
            return Err(AppError::config_error("completion.timeout_secs must be greater than 0"));
        }
        if self.prompt.template.trim().is_empty() && self.prompt.template_path.is_none() {
            return Err(AppError::config_error("prompt.template must not be empty"));
        }
        if self.server.max_upload_bytes == 0 {
            return Err(AppError::config_error("server.max_upload_bytes must be greater than 0"));
        }
        self.server.socket_addr()?;
        self.server.allowed_origins()?;
        self.historical.columns.validate()
    }

    /// Resolve relative file paths against the directory of the config file.
    pub fn resolve_paths(mut self, base_dir: &Path) -> Self {
        if let Some(path) = self.prompt.template_path.take() {
            self.prompt.template_path = Some(resolve(base_dir, path));
        }
        if let Some(path) = self.historical.path.take() {
            self.historical.path = Some(resolve(base_dir, path));
        }
        self
    }
}

fn resolve(base_dir: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() { path } else { base_dir.join(path) }
}

/// Parse and validate configuration from TOML content.
pub fn parse_config_content(content: &str) -> Result<AppConfig, AppError> {
    let config: AppConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}
