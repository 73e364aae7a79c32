//! Loader for pagetalk configuration with YAML + environment overlays.
//!
//! Sources merge in order: YAML file (optional), then `PAGETALK_`-prefixed
//! environment variables (`__` as the section separator, e.g.
//! `PAGETALK_INFERENCE__API_KEY`). `${VAR}` placeholders are expanded
//! recursively before the typed config materialises. The inference
//! endpoint, API key, and session secret are required; a missing one is a
//! startup failure, never a per-request error.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

#[derive(Debug, Deserialize)]
pub struct PagetalkConfig {
    pub inference: InferenceConfig,
    pub session: SessionConfig,
    #[serde(default)]
    pub scrape: ScrapeConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Chat-completions backend settings. `endpoint` is the full completions
/// URL of an OpenAI-compatible service.
#[derive(Debug, Deserialize)]
pub struct InferenceConfig {
    pub endpoint: String,
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
}

#[derive(Debug, Deserialize)]
pub struct SessionConfig {
    /// Key material for authenticating session cookies.
    pub secret: String,
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct ScrapeConfig {
    #[serde(default = "default_truncation_budget")]
    pub truncation_budget: usize,
    #[serde(default = "default_headless")]
    pub headless: bool,
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            truncation_budget: default_truncation_budget(),
            headless: default_headless(),
            webdriver_url: default_webdriver_url(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_model() -> String {
    "llama3-8b-8192".into()
}
fn default_ttl_secs() -> u64 {
    3600
}
fn default_truncation_budget() -> usize {
    12_000
}
fn default_headless() -> bool {
    true
}
fn default_webdriver_url() -> String {
    "http://localhost:9515".into()
}
fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    8080
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hiding the `config` crate wiring (YAML + env overrides).
pub struct PagetalkConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for PagetalkConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl PagetalkConfigLoader {
    /// Start with the default sources: `PAGETALK_` env overrides only.
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a config file; the `config` crate infers format by suffix.
    /// Missing files are tolerated so deployments can rely purely on the
    /// environment.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Merge an inline YAML snippet (tests/CLI).
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder, expand `${VAR}` placeholders, and materialise
    /// the validated, strongly typed config.
    pub fn load(self) -> Result<PagetalkConfig, ConfigError> {
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix("PAGETALK")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: PagetalkConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;
        validate(&typed)?;

        Ok(typed)
    }
}

fn validate(cfg: &PagetalkConfig) -> Result<(), ConfigError> {
    if cfg.inference.endpoint.trim().is_empty() {
        return Err(ConfigError::Message(
            "inference.endpoint must not be empty".into(),
        ));
    }
    if cfg.inference.api_key.trim().is_empty() {
        return Err(ConfigError::Message(
            "inference.api_key must not be empty".into(),
        ));
    }
    if cfg.session.secret.trim().is_empty() {
        return Err(ConfigError::Message(
            "session.secret must not be empty".into(),
        ));
    }
    Ok(())
}
