use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{env, fs};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";
const DEFAULT_MAX_POOL_SIZE: u32 = 5;

/// OTLP trace export. Omitted from the config file to only log locally.
#[derive(Deserialize, Clone)]
pub struct TelemetryConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
}

#[derive(Deserialize)]
pub struct Config {
    pub database_url: String,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_max_pool_size")]
    pub max_pool_size: u32,
    pub telemetry: Option<TelemetryConfig>,
}

fn default_bind_address() -> String {
    DEFAULT_BIND_ADDRESS.to_owned()
}

fn default_max_pool_size() -> u32 {
    DEFAULT_MAX_POOL_SIZE
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Config, anyhow::Error> {
        let config = fs::read_to_string(path).context("Unable to read config file")?;
        Config::from_toml(config.as_str())
    }

    pub fn from_toml(config: &str) -> Result<Config, anyhow::Error> {
        let config: Config = toml::from_str(config).with_context(|| "Unable to parse config")?;
        Ok(config)
    }

    pub fn from_env() -> Result<Config, anyhow::Error> {
        let database_url = read_env("DATABASE_URL")?;
        let bind_address = env::var("BIND_ADDRESS").unwrap_or_else(|_| default_bind_address());
        let max_pool_size = match env::var("MAX_POOL_SIZE") {
            Ok(size) => size
                .parse()
                .context("Unable to parse MAX_POOL_SIZE value")?,
            Err(_) => DEFAULT_MAX_POOL_SIZE,
        };
        let telemetry = env::var("OTLP_ENDPOINT")
            .ok()
            .map(|endpoint| TelemetryConfig {
                endpoint,
                api_key: env::var("OTLP_API_KEY").ok(),
            });

        let config = Config {
            database_url,
            bind_address,
            max_pool_size,
            telemetry,
        };
        Ok(config)
    }

    /// Looks for `config.toml` in the working directory, then in `$CONFIGURATION_DIRECTORY`.
    pub fn find_file() -> Option<PathBuf> {
        let config_current_dir = PathBuf::from("config.toml");
        if config_current_dir.exists() {
            return Some(config_current_dir);
        }
        if let Ok(config_env) = env::var("CONFIGURATION_DIRECTORY") {
            let config_path = PathBuf::from(config_env).join("config.toml");
            if config_path.exists() {
                return Some(config_path);
            }
        }

        None
    }

    /// Config from the config file if there is one, otherwise from the environment.
    pub fn load() -> Result<Config, anyhow::Error> {
        match Config::find_file() {
            Some(path) => Config::from_file(&path),
            None => Config::from_env(),
        }
    }
}

fn read_env(key: &str) -> Result<String, anyhow::Error> {
    env::var(key).with_context(|| format!("Unable to read env var: {}", key))
}
