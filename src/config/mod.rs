use crate::errors::{AppError, AppResult};
use crate::models::work_log::WorkerKind;
use crate::portal::{Credentials, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub username: String,
    pub password: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Hours a workday asks for; used by the balance.
    #[serde(default = "default_daily_hours")]
    pub daily_hours: f64,
    #[serde(default)]
    pub worker: WorkerKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_project: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_daily_hours() -> f64 {
    7.5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            base_url: default_base_url(),
            daily_hours: default_daily_hours(),
            worker: WorkerKind::default(),
            default_project: None,
        }
    }
}

impl Config {
    /// Return the full path of the config file: `~/.hrflow`
    pub fn config_file() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".hrflow")
    }

    /// The file given with `--config`, or the default one.
    pub fn resolve_path(custom: Option<&str>) -> PathBuf {
        custom.map(PathBuf::from).unwrap_or_else(Self::config_file)
    }

    /// Load and validate the configuration file.
    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.is_file() {
            return Err(AppError::ConfigLoad(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("decoding {}: {}", path.display(), e)))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.username.trim().is_empty() {
            return Err(AppError::Config("username is empty".into()));
        }
        if self.password.is_empty() {
            return Err(AppError::Config("password is empty".into()));
        }
        if !(self.daily_hours > 0.0 && self.daily_hours <= 24.0) {
            return Err(AppError::Config(format!(
                "daily_hours must be between 0 and 24, got {}",
                self.daily_hours
            )));
        }
        Ok(())
    }

    pub fn save(&self, path: &Path) -> AppResult<()> {
        let yaml =
            serde_yaml::to_string(self).map_err(|e| AppError::ConfigSave(e.to_string()))?;
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, yaml)?;
        Ok(())
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.username, &self.password)
    }

    /// Same config with the password masked, for printing.
    pub fn redacted(&self) -> Self {
        Self {
            password: "********".to_string(),
            ..self.clone()
        }
    }
}
