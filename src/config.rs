use axum::http::HeaderValue;
use std::env;
use std::fmt;
use thiserror::Error;

const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable was not provided.
    #[error("Missing environment variable: {0}")]
    MissingVariable(String),
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Cross-origin policy applied to every route.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CorsOrigins {
    /// Any origin may call the API (the default when `CORS_ORIGINS` is unset).
    Any,
    /// Only the listed origins may call the API.
    List(Vec<HeaderValue>),
}

/// Runtime configuration for the Scholar's Lens server.
///
/// Built once in `main` and handed by reference to the router and service builders.
#[derive(Clone)]
pub struct Config {
    /// API key for the Gemini `generateContent` endpoint.
    pub gemini_api_key: String,
    /// Model identifier used for note generation.
    pub gemini_model: String,
    /// Root URL of the Gemini API.
    pub gemini_base_url: String,
    /// Origins allowed to call the HTTP API.
    pub cors_origins: CorsOrigins,
    /// Optional override for the HTTP server port.
    pub server_port: Option<u16>,
    /// Maximum accepted request body size for uploads.
    pub max_upload_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            gemini_api_key: load_env_optional("GEMINI_API_KEY")
                .ok_or_else(|| ConfigError::MissingVariable("GEMINI_API_KEY".to_string()))?,
            gemini_model: load_env_optional("GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_base_url: load_env_optional("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            cors_origins: parse_cors_origins(load_env_optional("CORS_ORIGINS").as_deref())?,
            server_port: load_env_optional("SERVER_PORT")
                .map(|value| {
                    value
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".into()))
                })
                .transpose()?,
            max_upload_bytes: load_env_optional("MAX_UPLOAD_BYTES")
                .map(|value| {
                    value
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("MAX_UPLOAD_BYTES".into()))
                })
                .transpose()?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
        })
    }

    /// Seed the environment from `.env` (when present) and load the configuration.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("gemini_api_key", &"<redacted>")
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("cors_origins", &self.cors_origins)
            .field("server_port", &self.server_port)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish()
    }
}

/// Parse a comma-separated origin list. Blank input or a `*` entry means any origin.
pub fn parse_cors_origins(raw: Option<&str>) -> Result<CorsOrigins, ConfigError> {
    let Some(raw) = raw else {
        return Ok(CorsOrigins::Any);
    };

    let mut origins = Vec::new();
    for entry in raw.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
        if entry == "*" {
            return Ok(CorsOrigins::Any);
        }
        let value = HeaderValue::from_str(entry)
            .map_err(|_| ConfigError::InvalidValue(format!("CORS_ORIGINS ({entry})")))?;
        origins.push(value);
    }

    if origins.is_empty() {
        Ok(CorsOrigins::Any)
    } else {
        Ok(CorsOrigins::List(origins))
    }
}

fn load_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
impl Config {
    /// Configuration suitable for unit tests; points the provider at `base_url`.
    pub(crate) fn for_tests(base_url: &str) -> Self {
        Self {
            gemini_api_key: "test-key".into(),
            gemini_model: DEFAULT_GEMINI_MODEL.into(),
            gemini_base_url: base_url.into(),
            cors_origins: CorsOrigins::Any,
            server_port: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}
