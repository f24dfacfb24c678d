use serde::{Deserialize, Serialize};

/// Value shipped in the sample `.env`; treated the same as no key at all.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY_HERE";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default = "default_appdir")]
    pub appdir: Option<String>,
    #[serde(default)]
    pub omdb: OmdbConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_port")]
    pub port: String,
    #[serde(default)]
    pub tlscert: Option<String>,
    #[serde(default)]
    pub tlskey: Option<String>,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: default_port(),
            tlscert: None,
            tlskey: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OmdbConfig {
    #[serde(alias = "baseurl", default = "default_base_url")]
    pub base_url: String,
    #[serde(alias = "apikey", default)]
    pub api_key: Option<String>,
    #[serde(default = "default_true")]
    pub require_api_key: bool,
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            require_api_key: true,
        }
    }
}

fn default_port() -> String {
    "3000".to_string()
}

fn default_appdir() -> Option<String> {
    Some("public".to_string())
}

fn default_base_url() -> String {
    "http://www.omdbapi.com/".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_string(), e))?;

        Self::from_yaml(&content).map_err(|e| ConfigError::ParseError(path.to_string(), e))
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Loads the config file if one was given, otherwise starts from defaults,
    /// then applies `.env` and process environment overrides.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self {
                appdir: default_appdir(),
                ..Self::default()
            },
        };

        dotenvy::dotenv().ok();
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Overrides file values with `PORT` and `OMDB_API_KEY`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT").filter(|p| !p.trim().is_empty()) {
            self.listen.port = port.trim().to_string();
        }
        if let Some(key) = lookup("OMDB_API_KEY") {
            self.omdb.api_key = Some(key);
        }
    }

    /// The usable API key, if any. Blank and placeholder keys count as missing.
    pub fn api_key(&self) -> Option<String> {
        self.omdb
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty() && *k != PLACEHOLDER_API_KEY)
            .map(str::to_string)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.omdb.require_api_key && self.api_key().is_none() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.listen.tlscert.is_some() != self.listen.tlskey.is_some() {
            return Err(ConfigError::IncompleteTls);
        }
        Ok(())
    }
}

/// Shows only the first four characters of a key, for startup logs.
pub fn mask_key(key: &str) -> String {
    let prefix: String = key.chars().take(4).collect();
    format!("{}****", prefix)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
    #[error("OMDb API key is not set (set OMDB_API_KEY, get a free key at https://www.omdbapi.com/apikey.aspx)")]
    MissingApiKey,
    #[error("Both listen.tlscert and listen.tlskey must be set to enable TLS")]
    IncompleteTls,
}
