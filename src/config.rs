use std::fs;
use std::path::{Path, PathBuf};

use regex::{Captures, Regex};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_MODE: &str = "local";
pub const DEFAULT_CONFIG_DIR: &str = "configs";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found for mode `{mode}` in {dir}")]
    NotFound { mode: String, dir: PathBuf },
    #[error("failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("server.port `{0}` is not a valid TCP port")]
    InvalidPort(String),
    #[error("invalid substitution pattern: {0}")]
    Pattern(#[from] regex::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub deepl_api_key: String,
    #[serde(default = "default_deepl_endpoint")]
    pub deepl_endpoint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub mode: String,
    #[serde(deserialize_with = "string_or_number")]
    pub port: String,
}

fn default_deepl_endpoint() -> String {
    "https://api-free.deepl.com/v2/translate".to_string()
}

/// YAML happily reads `port: 8080` as an integer; accept either form.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Text(String),
        Number(u64),
    }

    Ok(match Port::deserialize(deserializer)? {
        Port::Text(s) => s,
        Port::Number(n) => n.to_string(),
    })
}

impl Config {
    /// Load the configuration selected by `mode` from the directory named by
    /// `CONFIG_DIR` (default `configs`).
    pub fn load(mode: &str) -> Result<(Self, PathBuf), ConfigError> {
        let dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
        Self::load_from(Path::new(&dir), mode)
    }

    pub fn load_from(dir: &Path, mode: &str) -> Result<(Self, PathBuf), ConfigError> {
        let path = ["yaml", "yml"]
            .iter()
            .map(|ext| dir.join(format!("{mode}.{ext}")))
            .find(|p| p.is_file())
            .ok_or_else(|| ConfigError::NotFound {
                mode: mode.to_string(),
                dir: dir.to_path_buf(),
            })?;

        debug!("Reading configuration from {}", path.display());
        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;

        let config = Self::parse(&content, &path)?;
        Ok((config, path))
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let content = substitute_env(content)?;

        let config: Config = serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.port()?;
        Ok(config)
    }

    pub fn port(&self) -> Result<u16, ConfigError> {
        self.server
            .port
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidPort(self.server.port.clone()))
    }
}

/// Replace `${VAR_NAME}` with the value from the environment. Unset variables
/// are left untouched.
fn substitute_env(content: &str) -> Result<String, regex::Error> {
    let pattern = Regex::new(r"\$\{(\w+)\}")?;
    let replaced = pattern.replace_all(content, |caps: &Captures| {
        std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
    });
    Ok(replaced.into_owned())
}
