//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Dice roller timing and commit mode
//! - An optional fixed dice seed
//! - Breakdown simulator delay
//!
//! Configuration is stored at `~/.config/taskdeck/config.toml`. Task data is
//! never written here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::gate::{CommitMode, GatePolicy};

/// Dice roller configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollerConfig {
    #[serde(default)]
    pub commit_mode: CommitMode,
    #[serde(default = "default_roll_delay_ms")]
    pub roll_delay_ms: u64,
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default = "default_progress_step")]
    pub progress_step: u8,
    /// Fixed seed for reproducible rolls. Entropy when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Breakdown simulator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownConfig {
    #[serde(default = "default_breakdown_delay_ms")]
    pub delay_ms: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/taskdeck/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub roller: RollerConfig,
    #[serde(default)]
    pub breakdown: BreakdownConfig,
}

fn default_roll_delay_ms() -> u64 {
    1500
}
fn default_tick_interval_ms() -> u64 {
    60
}
fn default_progress_step() -> u8 {
    2
}
fn default_breakdown_delay_ms() -> u64 {
    2000
}

impl Default for RollerConfig {
    fn default() -> Self {
        Self {
            commit_mode: CommitMode::Auto,
            roll_delay_ms: default_roll_delay_ms(),
            tick_interval_ms: default_tick_interval_ms(),
            progress_step: default_progress_step(),
            seed: None,
        }
    }
}

impl Default for BreakdownConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_breakdown_delay_ms(),
        }
    }
}

/// Returns `~/.config/taskdeck[-dev]/` based on TASKDECK_ENV.
///
/// Set TASKDECK_ENV=dev to use the development config directory.
/// TASKDECK_CONFIG_DIR, when set, replaces the whole path.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("TASKDECK_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("TASKDECK_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("taskdeck-dev")
            } else {
                base_dir.join("taskdeck")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::SaveFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}

/// Keys that may be absent from the file. `get` reports them as [`UNSET`]
/// and `set` clears them when given [`UNSET`], `none` or an empty string.
const OPTIONAL_KEYS: &[&str] = &["roller.seed"];

/// Display value of an optional key that has no value.
pub const UNSET: &str = "unset";

fn is_unset_value(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.eq_ignore_ascii_case(UNSET) || value.eq_ignore_ascii_case("none")
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let (parent_path, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, key),
        };
        if leaf.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        if let Some(parent_path) = parent_path {
            for part in parent_path.split('.') {
                current = current.get_mut(part).ok_or_else(unknown)?;
            }
        }
        let obj = current.as_object_mut().ok_or_else(unknown)?;

        // Optional keys are absent from the tree until set. All of them are
        // numbers today.
        let optional = OPTIONAL_KEYS.contains(&key);
        if optional && is_unset_value(value) {
            obj.remove(leaf);
            return Ok(());
        }
        let existing = match obj.get(leaf) {
            Some(v) => v.clone(),
            None if optional => serde_json::Value::Number(0.into()),
            None => return Err(unknown()),
        };

        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value
                    .parse::<bool>()
                    .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
            ),
            serde_json::Value::Number(_) => {
                let n = value
                    .parse::<u64>()
                    .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                serde_json::Value::Number(n.into())
            }
            serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
            }
            _ => serde_json::Value::String(value.into()),
        };

        obj.insert(leaf.to_string(), new_value);
        Ok(())
    }

    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(config_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Load from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cfg: Config = toml::from_str(&content)?;
        debug!(path = %path.display(), "config loaded");
        Ok(cfg)
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to a specific file.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key. Optional keys
    /// without a value read as [`UNSET`]; `None` means the key is unknown.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        match Self::get_json_value_by_path(&json, key) {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
            None if OPTIONAL_KEYS.contains(&key) => Some(UNSET.to_string()),
            None => None,
        }
    }

    /// Set a config value by key in memory. Returns error if key is unknown
    /// or the value does not fit the key's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Flattened `key = value` pairs, sorted by key.
    pub fn entries(&self) -> Vec<(String, String)> {
        fn walk(prefix: &str, value: &serde_json::Value, out: &mut Vec<(String, String)>) {
            match value {
                serde_json::Value::Object(map) => {
                    for (k, v) in map {
                        let key = if prefix.is_empty() {
                            k.clone()
                        } else {
                            format!("{prefix}.{k}")
                        };
                        walk(&key, v, out);
                    }
                }
                serde_json::Value::String(s) => out.push((prefix.to_string(), s.clone())),
                other => out.push((prefix.to_string(), other.to_string())),
            }
        }

        let mut out = Vec::new();
        if let Ok(json) = serde_json::to_value(self) {
            walk("", &json, &mut out);
        }
        out.sort();
        out
    }

    pub fn gate_policy(&self) -> GatePolicy {
        GatePolicy {
            mode: self.roller.commit_mode,
            progress_step: self.roller.progress_step,
            tick_interval_ms: self.roller.tick_interval_ms,
            roll_delay_ms: self.roller.roll_delay_ms,
        }
    }

    pub fn breakdown_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.breakdown.delay_ms)
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}
