//! # Application Configuration
//!
//! This module defines the configuration structure for the `cjm-builder-server`
//! and loads it from an optional `config.yml` file layered under the process
//! environment. Top-level keys map directly to environment variables, so
//! `PORT` sets `port` and `OPENAI_API_KEY` sets `openai_api_key`.
//!
//! Empty environment values are treated as unset.

use config::{Config as ConfigBuilder, Environment, File, FileFormat, Map};
use rand::RngCore;
use serde::{Deserialize, Deserializer};
use std::{
    env,
    net::{Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
};
use tracing::info;

/// The config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.yml";

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates an explicitly requested configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Loaded from `PORT`.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Binds every interface instead of loopback. `PUBLIC=1` or `PUBLIC=true`.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub public: bool,
    /// Without a key, generation requests fail with a configuration error.
    #[serde(default)]
    pub openai_api_key: Option<String>,
    #[serde(default = "default_openai_api_url")]
    pub openai_api_url: String,
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
    /// The shared site password. Unset disables the login gate.
    #[serde(default)]
    pub site_password: Option<String>,
    /// The key used to sign session cookies. Random per process when unset.
    #[serde(default = "random_session_secret")]
    pub session_secret: String,
    /// Set by the Railway platform; its presence marks cookies `Secure`.
    #[serde(default)]
    pub railway_environment: Option<String>,
    #[serde(default = "default_dir")]
    pub knowledge_dir: PathBuf,
    /// Where `index.html` is served from.
    #[serde(default = "default_dir")]
    pub static_dir: PathBuf,
}

fn default_port() -> u16 {
    5001
}

fn default_openai_api_url() -> String {
    cjm_builder::providers::ai::openai::DEFAULT_OPENAI_API_URL.to_string()
}

fn default_openai_model() -> String {
    "gpt-4o".to_string()
}

fn default_dir() -> PathBuf {
    PathBuf::from(".")
}

/// 32 random bytes, hex-encoded.
fn random_session_secret() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .map(str::trim)
        .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true")))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    /// `0.0.0.0` in public mode, loopback otherwise.
    pub fn bind_address(&self) -> SocketAddr {
        let ip = if self.public {
            Ipv4Addr::UNSPECIFIED
        } else {
            Ipv4Addr::LOCALHOST
        };
        SocketAddr::from((ip, self.port))
    }

    pub fn secure_cookies(&self) -> bool {
        self.railway_environment.is_some()
    }

    // Values set to "" in a config file survive the environment filter.
    fn normalize(mut self) -> Self {
        self.openai_api_key = non_empty(self.openai_api_key);
        self.site_password = non_empty(self.site_password);
        self.railway_environment = non_empty(self.railway_environment);
        if self.session_secret.trim().is_empty() {
            self.session_secret = random_session_secret();
        }
        if self.openai_api_url.trim().is_empty() {
            self.openai_api_url = default_openai_api_url();
        }
        if self.openai_model.trim().is_empty() {
            self.openai_model = default_openai_model();
        }
        self
    }
}

/// The process environment without empty values.
fn non_empty_environment() -> Map<String, String> {
    env::vars().filter(|(_, v)| !v.trim().is_empty()).collect()
}

/// Loads the application configuration from a file and environment variables.
///
/// With `config_path_override`, that file must exist. Otherwise `config.yml`
/// in the working directory is used when present. Environment variables take
/// precedence over file values.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = ConfigBuilder::builder();

    match config_path_override {
        Some(path) => {
            if !Path::new(path).exists() {
                return Err(ConfigError::NotFound(format!(
                    "Config file not found at '{path}'."
                )));
            }
            info!("Loading configuration from '{path}'.");
            builder = builder.add_source(File::new(path, FileFormat::Yaml));
        }
        None => {
            if Path::new(DEFAULT_CONFIG_FILE).exists() {
                info!("Loading configuration from '{DEFAULT_CONFIG_FILE}'.");
            }
            builder = builder
                .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false));
        }
    }

    let settings = builder
        .add_source(Environment::default().source(Some(non_empty_environment())))
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;
    Ok(config.normalize())
}
