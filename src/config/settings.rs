//! Settings structures for the SEO dashboard API

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Main settings structure, loadable from `settings.yml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub outgoing: OutgoingSettings,
    pub provider: ProviderSettings,
    pub completion: CompletionSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    /// Merge values produced by `lookup`, keyed by environment variable name
    pub fn merge_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("DEBUG") {
            self.general.debug = val.eq_ignore_ascii_case("true");
        }
        if let Some(val) = lookup("PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = lookup("BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Some(val) = lookup("DATAFORSEO_USERNAME") {
            self.provider.username = Some(val);
        }
        if let Some(val) = lookup("DATAFORSEO_PASSWORD") {
            self.provider.password = Some(val);
        }
        if let Some(val) = lookup("DATAFORSEO_BASE_URL") {
            self.provider.base_url = val;
        }
        if let Some(val) = lookup("OPENAI_API_KEY") {
            self.completion.api_key = Some(val);
        }
        if let Some(val) = lookup("OPENAI_BASE_URL") {
            self.completion.base_url = val;
        }
        if let Some(val) = lookup("OPENAI_MODEL") {
            self.completion.model = val;
        }
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
    /// Service name reported by the status endpoint
    pub service_name: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            service_name: "SEO Dashboard API".to_string(),
        }
    }
}

impl GeneralSettings {
    /// Default log filter when `RUST_LOG` is not set
    pub fn log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 5001,
            bind_address: "0.0.0.0".to_string(),
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Request timeout in seconds (none = transport default)
    pub request_timeout: Option<f64>,
    /// Max idle connections kept per host
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
    /// Extra headers to send with every request
    pub extra_headers: HashMap<String, String>,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: None,
            pool_maxsize: 20,
            verify_ssl: true,
            proxies: ProxySettings::default(),
            extra_headers: HashMap::new(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Search-data provider settings
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Versioned REST base URL
    pub base_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.dataforseo.com/v3".to_string(),
            username: None,
            password: None,
        }
    }
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Chat-completion service settings
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionSettings {
    /// API key; AI keyword suggestions are disabled without it
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
        }
    }
}

impl std::fmt::Debug for CompletionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 5001);
        assert_eq!(settings.server.bind_address, "0.0.0.0");
        assert!(!settings.general.debug);
        assert_eq!(settings.provider.base_url, "https://api.dataforseo.com/v3");
        assert!(settings.provider.username.is_none());
        assert!(settings.completion.api_key.is_none());
    }

    #[test]
    fn test_merge_vars() {
        let vars: HashMap<&str, &str> = [
            ("DEBUG", "True"),
            ("PORT", "8080"),
            ("DATAFORSEO_USERNAME", "user"),
            ("DATAFORSEO_PASSWORD", "pass"),
            ("OPENAI_API_KEY", "sk-test"),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::default();
        settings.merge_vars(|key| vars.get(key).map(|v| v.to_string()));

        assert!(settings.general.debug);
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.provider.username.as_deref(), Some("user"));
        assert_eq!(settings.provider.password.as_deref(), Some("pass"));
        assert_eq!(settings.completion.api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_invalid_port_is_ignored() {
        let mut settings = Settings::default();
        settings.merge_vars(|key| (key == "PORT").then(|| "not-a-port".to_string()));
        assert_eq!(settings.server.port, 5001);
    }

    #[test]
    fn test_yaml_partial_settings() {
        let yaml = "server:\n  port: 9000\nprovider:\n  username: alice\n";
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.server.bind_address, "0.0.0.0");
        assert_eq!(settings.provider.username.as_deref(), Some("alice"));
        assert_eq!(settings.completion.model, "gpt-4o-mini");
    }

    #[test]
    fn test_debug_flag_sets_log_level() {
        assert_eq!(Settings::default().general.log_level(), "info");

        let settings: Settings = serde_yaml::from_str("general:\n  debug: true\n").unwrap();
        assert_eq!(settings.general.log_level(), "debug");

        let mut overlaid = Settings::default();
        overlaid.merge_vars(|key| (key == "DEBUG").then(|| "true".to_string()));
        assert_eq!(overlaid.general.log_level(), "debug");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let mut settings = Settings::default();
        settings.provider.password = Some("hunter2".to_string());
        settings.completion.api_key = Some("sk-secret".to_string());
        let printed = format!("{:?}", settings);
        assert!(!printed.contains("hunter2"));
        assert!(!printed.contains("sk-secret"));
    }
}
