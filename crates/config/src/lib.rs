//! Configuration loading, validation, and management for Trellis.
//!
//! Loads configuration from `~/.trellis/config.toml` with environment
//! variable overrides. Validated once at startup and then injected into the
//! gateway; nothing reads the environment per request.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.trellis/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Bearer credential for the upstream completion API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible API (without `/chat/completions`)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Upstream HTTP client behaviour
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Per-purpose route settings
    #[serde(default)]
    pub routes: RoutesConfig,

    /// Gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,
}

fn default_api_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_model() -> String {
    "gpt-4.1".into()
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .field("upstream", &self.upstream)
            .field("routes", &self.routes)
            .field("gateway", &self.gateway)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Total request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// TCP connect timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    120
}
fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// Settings for one routing variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteConfig {
    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
        }
    }
}

/// One entry per routing variant. Both currently default to the same model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoutesConfig {
    /// Requests whose purpose is `graph_lab`
    #[serde(default)]
    pub graph_lab: RouteConfig,

    /// Every other request
    #[serde(default)]
    pub general: RouteConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    /// CORS origins. `["*"]` allows any origin.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,

    /// Maximum accepted request body in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_port() -> u16 {
    3000
}
fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_allowed_origins() -> Vec<String> {
    vec!["*".into()]
}
fn default_max_body_bytes() -> usize {
    1024 * 1024
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            allowed_origins: default_allowed_origins(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.trellis/config.toml).
    ///
    /// Also checks environment variables:
    /// - `TRELLIS_API_KEY` (highest priority), then `OPENAI_API_KEY`
    /// - `TRELLIS_API_URL`
    /// - `TRELLIS_MODEL` (applies to every route)
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        // `api_key = ""` means "not set", so the environment can still supply one.
        config.api_key = non_blank(config.api_key.take());

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup. Taking the lookup as a
    /// closure keeps this testable without touching process state.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        self.api_key = non_blank(self.api_key.take());
        if self.api_key.is_none() {
            self.api_key = non_blank(lookup("TRELLIS_API_KEY"))
                .or_else(|| non_blank(lookup("OPENAI_API_KEY")));
        }

        if let Some(url) = lookup("TRELLIS_API_URL") {
            self.api_url = url;
        }

        if let Some(model) = lookup("TRELLIS_MODEL") {
            self.routes.graph_lab.model = model.clone();
            self.routes.general.model = model;
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".trellis")
    }

    /// Path of the main config file.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.upstream.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "upstream.timeout_secs must be greater than 0".into(),
            ));
        }

        if self.upstream.connect_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "upstream.connect_timeout_secs must be greater than 0".into(),
            ));
        }

        if self.routes.graph_lab.model.trim().is_empty()
            || self.routes.general.model.trim().is_empty()
        {
            return Err(ConfigError::ValidationError(
                "route models must not be empty".into(),
            ));
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(ConfigError::ValidationError(format!(
                "api_url must be an http(s) URL, got '{}'",
                self.api_url
            )));
        }

        if self.gateway.port == 0 {
            return Err(ConfigError::ValidationError(
                "gateway.port must not be 0".into(),
            ));
        }

        Ok(())
    }

    /// The configured API key, if there is a usable one.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key().is_some()
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: default_api_url(),
            upstream: UpstreamConfig::default(),
            routes: RoutesConfig::default(),
            gateway: GatewayConfig::default(),
        }
    }
}

/// Blank credentials count as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api_url, "https://api.openai.com/v1");
        assert_eq!(config.routes.graph_lab.model, "gpt-4.1");
        assert_eq!(config.routes.general.model, "gpt-4.1");
        assert_eq!(config.upstream.timeout_secs, 120);
        assert_eq!(config.gateway.port, 3000);
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.api_url, config.api_url);
        assert_eq!(parsed.gateway.port, config.gateway.port);
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = AppConfig {
            upstream: UpstreamConfig {
                timeout_secs: 0,
                connect_timeout_secs: 10,
            },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_model_rejected() {
        let mut config = AppConfig::default();
        config.routes.general.model = "  ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn non_http_url_rejected() {
        let config = AppConfig {
            api_url: "ftp://example.com".into(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/config.toml")).unwrap();
        assert!(config.api_key.is_none());
        assert_eq!(config.gateway.host, "127.0.0.1");
    }

    #[test]
    fn load_from_file_with_partial_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
api_key = "sk-file"

[routes.graph_lab]
model = "gpt-4o-mini"

[gateway]
port = 8080
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("sk-file"));
        assert_eq!(config.routes.graph_lab.model, "gpt-4o-mini");
        assert_eq!(config.routes.general.model, "gpt-4.1");
        assert_eq!(config.gateway.port, 8080);
        assert_eq!(config.gateway.allowed_origins, vec!["*".to_string()]);
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_key = [").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn env_key_precedence() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(env(&[
            ("OPENAI_API_KEY", "sk-openai"),
            ("TRELLIS_API_KEY", "sk-trellis"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("sk-trellis"));

        let mut config = AppConfig::default();
        config.apply_env_overrides(env(&[("OPENAI_API_KEY", "sk-openai")]));
        assert_eq!(config.api_key.as_deref(), Some("sk-openai"));
    }

    #[test]
    fn file_key_wins_over_env() {
        let mut config = AppConfig {
            api_key: Some("sk-file".into()),
            ..AppConfig::default()
        };
        config.apply_env_overrides(env(&[("OPENAI_API_KEY", "sk-openai")]));
        assert_eq!(config.api_key.as_deref(), Some("sk-file"));
    }

    #[test]
    fn blank_env_key_ignored() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(env(&[("OPENAI_API_KEY", "   ")]));
        assert!(!config.has_api_key());

        // An exported but empty TRELLIS_API_KEY must not hide OPENAI_API_KEY.
        let mut config = AppConfig::default();
        config.apply_env_overrides(env(&[
            ("TRELLIS_API_KEY", ""),
            ("OPENAI_API_KEY", "sk-real"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("sk-real"));
    }

    #[test]
    fn blank_file_key_counts_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_key = \"\"\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert!(config.api_key.is_none());
        assert!(!config.has_api_key());

        let mut config = AppConfig::load_from(&path).unwrap();
        config.apply_env_overrides(env(&[("OPENAI_API_KEY", "sk-env")]));
        assert_eq!(config.api_key.as_deref(), Some("sk-env"));
    }

    #[test]
    fn blank_key_set_in_code_is_not_usable() {
        let config = AppConfig {
            api_key: Some("  ".into()),
            ..AppConfig::default()
        };
        assert_eq!(config.api_key(), None);
        assert!(!config.has_api_key());
    }

    #[test]
    fn env_model_applies_to_all_routes() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(env(&[("TRELLIS_MODEL", "gpt-4o")]));
        assert_eq!(config.routes.graph_lab.model, "gpt-4o");
        assert_eq!(config.routes.general.model, "gpt-4o");
    }

    #[test]
    fn debug_redacts_key() {
        let config = AppConfig {
            api_key: Some("sk-very-secret".into()),
            ..AppConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-very-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("api.openai.com"));
        assert!(toml_str.contains("gpt-4.1"));
    }
}
