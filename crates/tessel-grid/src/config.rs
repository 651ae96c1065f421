//! Grid capacity and orientation as data.
//!
//! ```toml
//! # tessel.toml
//! max_columns = 3
//! max_rows = 2
//! orientation = "vertical"
//! ```
//!
//! ```rust,ignore
//! let config = GridConfig::from_toml_file("tessel.toml")?.with_env_overrides()?;
//! ```
//!
//! Missing fields fall back to [`GridConfig::default`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use tessel_core::Orientation;
use thiserror::Error;

use crate::error::GridError;
use crate::panel::PanelId;
use crate::split::possible_next_states;
use crate::state::WorkspaceGridState;

/// Environment variable overriding [`GridConfig::max_columns`].
pub const ENV_MAX_COLUMNS: &str = "TESSEL_MAX_COLUMNS";
/// Environment variable overriding [`GridConfig::max_rows`].
pub const ENV_MAX_ROWS: &str = "TESSEL_MAX_ROWS";
/// Environment variable overriding [`GridConfig::orientation`]
/// (`horizontal` or `vertical`).
pub const ENV_ORIENTATION: &str = "TESSEL_ORIENTATION";

/// Per-workspace tiling limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Most columns any row may hold.
    pub max_columns: u32,
    /// Most rows any column may hold.
    pub max_rows: u32,
    /// Primary tiling axis; breaks merge ties and picks unified resizer lines.
    pub orientation: Orientation,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            max_columns: 2,
            max_rows: 2,
            orientation: Orientation::Horizontal,
        }
    }
}

/// Errors from loading a [`GridConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

impl GridConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `TESSEL_*` environment overrides.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup (environment in production).
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut errors = Vec::new();

        if let Some(raw) = lookup(ENV_MAX_COLUMNS) {
            match raw.trim().parse() {
                Ok(value) => self.max_columns = value,
                Err(_) => errors.push(format!("{ENV_MAX_COLUMNS}: not a number: {raw:?}")),
            }
        }
        if let Some(raw) = lookup(ENV_MAX_ROWS) {
            match raw.trim().parse() {
                Ok(value) => self.max_rows = value,
                Err(_) => errors.push(format!("{ENV_MAX_ROWS}: not a number: {raw:?}")),
            }
        }
        if let Some(raw) = lookup(ENV_ORIENTATION) {
            match raw.trim().to_ascii_lowercase().as_str() {
                "horizontal" => self.orientation = Orientation::Horizontal,
                "vertical" => self.orientation = Orientation::Vertical,
                _ => errors.push(format!("{ENV_ORIENTATION}: unknown orientation {raw:?}")),
            }
        }

        if !errors.is_empty() {
            return Err(ConfigError::Validation(errors));
        }
        self.validate()?;
        Ok(self)
    }

    /// Reject limits that leave no room for a single panel.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();
        if self.max_columns == 0 {
            errors.push("max_columns must be at least 1".to_string());
        }
        if self.max_rows == 0 {
            errors.push("max_rows must be at least 1".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Most panels a workspace may hold.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.max_columns as usize * self.max_rows as usize
    }

    /// A workspace holding only `id`, oriented per this config.
    #[must_use]
    pub fn initial_state(&self, id: PanelId) -> WorkspaceGridState {
        WorkspaceGridState::single(id, self.orientation)
    }

    /// [`possible_next_states`] with this config's limits.
    pub fn possible_next_states(
        &self,
        state: &WorkspaceGridState,
    ) -> Result<Vec<WorkspaceGridState>, GridError> {
        possible_next_states(state, self.max_columns, self.max_rows)
    }
}
