//! Board configuration.
//!
//! Config lives at ~/.config/evboard/config.toml. The deployment id and the
//! optional bootstrap token may also come from the host environment
//! (`EVBOARD_DEPLOYMENT_ID`, `EVBOARD_BOOTSTRAP_TOKEN`); both are resolved
//! once in `load` so nothing downstream reads ambient state.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{BoardError, BoardResult};

const DEPLOYMENT_ID_VAR: &str = "EVBOARD_DEPLOYMENT_ID";
const BOOTSTRAP_TOKEN_VAR: &str = "EVBOARD_BOOTSTRAP_TOKEN";

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_deployment_id() -> String {
    "default-app-id".to_string()
}

/// Configuration for the hosted board services.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardConfig {
    /// Firebase project backing the document store
    pub project_id: String,

    /// API key shared by the auth service and the document store
    pub api_key: String,

    /// Partitions the store namespace per deployment
    #[serde(default = "default_deployment_id")]
    pub deployment_id: String,

    /// Custom sign-in token from the host environment, if any
    #[serde(default)]
    pub bootstrap_token: Option<String>,

    /// API key for the text-generation endpoint
    pub gemini_api_key: String,

    #[serde(default = "default_model")]
    pub gemini_model: String,
}

impl BoardConfig {
    pub fn config_path() -> BoardResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| BoardError::Config("Could not determine config directory".into()))?
            .join("evboard");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config file and apply environment overrides.
    pub fn load() -> BoardResult<Self> {
        let path = Self::config_path()?;
        let contents = std::fs::read_to_string(&path).map_err(|e| {
            BoardError::Config(format!(
                "Could not read {}: {}\n\nCreate it with your project id and API keys.",
                path.display(),
                e
            ))
        })?;

        let config: BoardConfig = toml::from_str(&contents)
            .map_err(|e| BoardError::Config(format!("Invalid config file: {}", e)))?;

        Ok(config.with_env_overrides())
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(id) = std::env::var(DEPLOYMENT_ID_VAR) {
            if !id.is_empty() {
                self.deployment_id = id;
            }
        }
        if let Ok(token) = std::env::var(BOOTSTRAP_TOKEN_VAR) {
            if !token.is_empty() {
                self.bootstrap_token = Some(token);
            }
        }
        self
    }
}
