use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const AUDIT_LOG_ENV: &str = "CAREBOOK_AUDIT_LOG";
pub const TEMPLATE_DIR_ENV: &str = "CAREBOOK_TEMPLATE_DIR";
pub const CLINICIAN_ENV: &str = "CAREBOOK_CLINICIAN";

/// Every field is optional on disk; missing ones take the values from
/// [`Default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarebookConfig {
    /// Directory of additional `*.json` templates loaded at startup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,
    /// Register the built-in instruments.
    pub include_builtin: bool,
    /// JSON-lines file completed assessments are appended to. Unset means
    /// `<data dir>/carebook/assessments.jsonl`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit_log: Option<PathBuf>,
    /// Actor recorded on audit events.
    pub clinician: String,
}

impl Default for CarebookConfig {
    fn default() -> Self {
        Self {
            template_dir: None,
            include_builtin: true,
            audit_log: None,
            clinician: "clinician".to_string(),
        }
    }
}

impl CarebookConfig {
    /// Defaults with an explicit audit log location.
    pub fn new(audit_log: PathBuf) -> Self {
        Self {
            audit_log: Some(audit_log),
            ..Self::default()
        }
    }

    /// The configured audit log, or the platform data directory default.
    pub fn audit_log_path(&self) -> eyre::Result<PathBuf> {
        match &self.audit_log {
            Some(path) => Ok(path.clone()),
            None => {
                let base = dirs::data_dir().ok_or_else(|| eyre::eyre!("no data directory found"))?;
                Ok(base.join("carebook").join("assessments.jsonl"))
            }
        }
    }

    /// Apply `CAREBOOK_*` overrides. `lookup` is `std::env::var` in the
    /// binary; empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(path) = get(AUDIT_LOG_ENV) {
            tracing::debug!(key = AUDIT_LOG_ENV, "config override from environment");
            self.audit_log = Some(PathBuf::from(path));
        }
        if let Some(dir) = get(TEMPLATE_DIR_ENV) {
            tracing::debug!(key = TEMPLATE_DIR_ENV, "config override from environment");
            self.template_dir = Some(PathBuf::from(dir));
        }
        if let Some(clinician) = get(CLINICIAN_ENV) {
            tracing::debug!(key = CLINICIAN_ENV, "config override from environment");
            self.clinician = clinician;
        }
    }
}

pub fn default_config_path() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("carebook").join("config.json"))
}

pub fn load_config(path: &Path) -> eyre::Result<CarebookConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;
    serde_json::from_str(&contents)
        .map_err(|e| eyre::eyre!("invalid config at {}: {e}", path.display()))
}

/// Load the config at `path`, or defaults if no file exists yet.
pub fn load_or_default(path: &Path) -> eyre::Result<CarebookConfig> {
    if path.exists() {
        load_config(path)
    } else {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        Ok(CarebookConfig::default())
    }
}

pub fn save_config(path: &Path, config: &CarebookConfig) -> eyre::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json.as_bytes())?;
    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
