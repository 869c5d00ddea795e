use crate::error::AppError;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const SERVICE_NAME: &str = "cloudlens";

/// Default backend; normally overridden per deployment.
pub const DEFAULT_BASE_URL: &str = "https://dashboard-backend.duckdns.org";

/// Dashboard data is re-fetched on this cadence.
pub const DEFAULT_REFRESH_SECONDS: u64 = 300;

/// Every backend request shares this timeout.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 15;

fn app_home_dir() -> Result<PathBuf, AppError> {
    if let Ok(custom) = std::env::var("CLOUDLENS_HOME") {
        return Ok(PathBuf::from(custom));
    }

    if let Some(dirs) = ProjectDirs::from("com", "cloudlens", SERVICE_NAME) {
        let candidate = dirs.data_local_dir().to_path_buf();
        if fs::create_dir_all(&candidate).is_ok() {
            return Ok(candidate);
        }
    }

    let cwd = std::env::current_dir()?;
    Ok(cwd.join(".cloudlens"))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub base_url: String,
    pub refresh_seconds: u64,
    pub request_timeout_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            refresh_seconds: DEFAULT_REFRESH_SECONDS,
            request_timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl AppConfig {
    /// Base URL with the `CLOUDLENS_BASE_URL` environment override applied.
    pub fn effective_base_url(&self) -> String {
        match std::env::var("CLOUDLENS_BASE_URL") {
            Ok(value) if !value.is_empty() => value,
            _ => self.base_url.clone(),
        }
    }
}

pub fn config_dir() -> Result<PathBuf, AppError> {
    Ok(app_home_dir()?.join("config"))
}

pub fn config_path() -> Result<PathBuf, AppError> {
    Ok(config_dir()?.join("config.toml"))
}

pub fn ensure_dirs() -> Result<(), AppError> {
    fs::create_dir_all(config_dir()?)?;
    Ok(())
}

pub fn load_config() -> Result<AppConfig, AppError> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let raw = fs::read_to_string(&path)?;
    let parsed: AppConfig = toml::from_str(&raw)?;
    Ok(parsed)
}

pub fn save_config(config: &AppConfig) -> Result<(), AppError> {
    ensure_dirs()?;
    let path = config_path()?;
    let raw = toml::to_string_pretty(config)?;
    fs::write(path, raw)?;
    Ok(())
}

pub fn ensure_initialized() -> Result<(), AppError> {
    ensure_dirs()?;
    let cfg_path = config_path()?;
    if !Path::new(&cfg_path).exists() {
        save_config(&AppConfig::default())?;
    }
    Ok(())
}
