use crate::models::TimerSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    /// Timer settings provisioned for new accounts.
    #[serde(default)]
    pub defaults: TimerSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub token_expiration_secs: i64,
    pub min_password_length: usize,
    /// JWT signing secret. Falls back to the JWT_SECRET environment
    /// variable, then a development default.
    pub jwt_secret: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_expiration_secs: 86400, // 24 hours
            min_password_length: 8,
            jwt_secret: None,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.auth.token_expiration_secs <= 0 {
            return Err("auth.token_expiration_secs must be positive".to_string());
        }
        if self.auth.min_password_length == 0 {
            return Err("auth.min_password_length must be at least 1".to_string());
        }
        if matches!(self.auth.jwt_secret.as_deref(), Some("")) {
            return Err("auth.jwt_secret must not be empty when set".to_string());
        }
        if self.defaults.focus_time == 0
            || self.defaults.short_break == 0
            || self.defaults.long_break == 0
        {
            return Err("default timer intervals must be at least 1 minute".to_string());
        }
        Ok(())
    }
}

/// Load configuration from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Arc<AppConfig>, String> {
    let path = path.as_ref();
    info!("Loading configuration from: {}", path.display());

    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

    let config: AppConfig = serde_yaml::from_str(&contents)
        .map_err(|e| format!("Failed to parse YAML config: {}", e))?;

    config.validate()?;

    info!(
        "Configuration loaded: listening on {}:{}, new accounts get {}m focus / {}m short break / {}m long break",
        config.server.host,
        config.server.port,
        config.defaults.focus_time,
        config.defaults.short_break,
        config.defaults.long_break
    );

    Ok(Arc::new(config))
}

/// Load configuration with fallback options, ending at built-in defaults
pub fn load_config_with_fallback() -> Arc<AppConfig> {
    // Try loading from environment variable first
    if let Ok(config_path) = std::env::var("CONFIG_PATH") {
        match load_config(&config_path) {
            Ok(config) => return config,
            Err(e) => warn!(
                "Failed to load config from CONFIG_PATH ({}): {}",
                config_path, e
            ),
        }
    }

    // Try common config file locations
    let paths = vec!["config.yaml", "config.yml", "./config.yaml", "./config.yml"];

    for path in paths {
        if Path::new(path).exists() {
            match load_config(path) {
                Ok(config) => return config,
                Err(e) => warn!("Failed to load config from '{}': {}", path, e),
            }
        }
    }

    info!("No configuration file found, using built-in defaults");
    Arc::new(AppConfig::default())
}
