#![allow(dead_code)]
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// `pretty` or `json`
    #[serde(default = "default_log_format")]
    pub log_format: String,
    /// Include the request id on error responses (strict JSON-RPC 2.0)
    #[serde(default)]
    pub echo_error_id: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_format: default_log_format(),
            echo_error_id: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_server_url")]
    pub server_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub debug: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            timeout_secs: default_timeout_secs(),
            debug: false,
        }
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_server_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Load configuration from ~/.vercel-mcp/config.toml, then apply environment overrides.
    /// Falls back to defaults if the file doesn't exist
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load configuration from a specific file, defaults if it is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Apply `MCP_SERVER_URL`, `MCP_TIMEOUT`, `MCP_DEBUG`, `HOST` and `PORT`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("MCP_SERVER_URL") {
            self.client.server_url = url;
        }
        if let Some(timeout) = lookup("MCP_TIMEOUT") {
            self.client.timeout_secs = timeout
                .trim()
                .parse()
                .with_context(|| format!("MCP_TIMEOUT must be whole seconds, got '{}'", timeout))?;
        }
        if let Some(debug) = lookup("MCP_DEBUG") {
            self.client.debug = debug.trim().eq_ignore_ascii_case("true");
        }
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a port number, got '{}'", port))?;
        }
        Ok(())
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".vercel-mcp").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.client.timeout_secs, 10);
        assert!(!config.client.debug);
        assert!(!config.server.echo_error_id);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.server.host, parsed.server.host);
        assert_eq!(config.client.server_url, parsed.client.server_url);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 8080\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.client.timeout_secs, 10);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_environment_overrides() {
        let mut config = Config::default();
        config
            .apply_overrides(lookup(&[
                ("MCP_SERVER_URL", "https://example.vercel.app"),
                ("MCP_TIMEOUT", "30"),
                ("MCP_DEBUG", "TRUE"),
                ("PORT", "8081"),
            ]))
            .unwrap();
        assert_eq!(config.client.server_url, "https://example.vercel.app");
        assert_eq!(config.client.timeout_secs, 30);
        assert!(config.client.debug);
        assert_eq!(config.server.port, 8081);
    }

    #[test]
    fn test_debug_flag_only_accepts_true() {
        let mut config = Config::default();
        config.apply_overrides(lookup(&[("MCP_DEBUG", "1")])).unwrap();
        assert!(!config.client.debug);
    }

    #[test]
    fn test_invalid_timeout_is_an_error() {
        let mut config = Config::default();
        assert!(config.apply_overrides(lookup(&[("MCP_TIMEOUT", "soon")])).is_err());
    }
}
