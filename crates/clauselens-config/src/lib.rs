//! Configuration loading for ClauseLens.
//! Reads clauselens.toml from the current directory or path in CLAUSELENS_CONFIG env var.
//! A missing file yields all defaults; a malformed file is a configuration error.

use serde::{Deserialize, Serialize};
use std::path::Path;

use clauselens_common::{ClauselensError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub uploads: UploadsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 3001 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

/// External analysis service the relay forwards uploads to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String { "http://localhost:5000".to_string() }
fn default_timeout_secs() -> u64 { 120 }

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { base_url: default_base_url(), timeout_secs: default_timeout_secs() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadsConfig {
    #[serde(default = "default_upload_dir")]
    pub dir: String,
}

fn default_upload_dir() -> String { "uploads".to_string() }

impl Default for UploadsConfig {
    fn default() -> Self {
        Self { dir: default_upload_dir() }
    }
}

impl Config {
    /// Load from the path in CLAUSELENS_CONFIG, falling back to ./clauselens.toml,
    /// falling back to defaults when neither exists.
    pub fn load() -> Result<Self> {
        let path = std::env::var("CLAUSELENS_CONFIG")
            .unwrap_or_else(|_| "clauselens.toml".to_string());
        Self::load_from(Path::new(&path))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw)
            .map_err(|e| ClauselensError::Config(format!("{}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 3001);
        assert_eq!(cfg.analysis.base_url, "http://localhost:5000");
        assert_eq!(cfg.analysis.timeout_secs, 120);
        assert_eq!(cfg.uploads.dir, "uploads");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let cfg: Config = toml::from_str(r#"
            [analysis]
            base_url = "http://analyzer:8000"
        "#).unwrap();
        assert_eq!(cfg.analysis.base_url, "http://analyzer:8000");
        assert_eq!(cfg.analysis.timeout_secs, 120);
        assert_eq!(cfg.server.port, 3001);
    }

    #[test]
    fn test_full_toml_override() {
        let cfg: Config = toml::from_str(r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [analysis]
            base_url = "http://analyzer:8000"
            timeout_secs = 30

            [uploads]
            dir = "/tmp/clauselens-uploads"
        "#).unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.analysis.timeout_secs, 30);
        assert_eq!(cfg.uploads.dir, "/tmp/clauselens-uploads");
    }

    #[test]
    fn test_missing_file_is_defaults() {
        let cfg = Config::load_from(Path::new("does-not-exist.toml")).unwrap();
        assert_eq!(cfg.server.port, 3001);
    }
}
