use crate::error::{Result, TodoError};
use crate::paths;
use crate::state::DEFAULT_HISTORY_LIMIT;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Prefix of the input prompt.
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Route deletes through the confirmation dialog.
    #[serde(default = "default_confirm_delete")]
    pub confirm_delete: bool,
    /// Show short task ids in listings.
    #[serde(default)]
    pub show_ids: bool,
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_prompt() -> String {
    "todo".to_string()
}

fn default_confirm_delete() -> bool {
    true
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            confirm_delete: default_confirm_delete(),
            show_ids: false,
            history_limit: default_history_limit(),
        }
    }
}

impl Config {
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(TodoError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    pub fn load_or_default(root: &Path) -> Result<Self> {
        match Self::load(root) {
            Err(TodoError::NotInitialized) => Ok(Self::default()),
            other => other,
        }
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&paths::config_path(root), data.as_bytes())
    }

    /// Write the default config unless one exists. Returns true if written.
    pub fn init(root: &Path) -> Result<bool> {
        let data = serde_yaml::to_string(&Self::default())?;
        crate::io::write_if_missing(&paths::config_path(root), data.as_bytes())
    }

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.prompt.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "prompt is empty; the input prompt will start with ' ['".to_string(),
            });
        }

        if self.prompt.contains('\n') {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "prompt must be a single line".to_string(),
            });
        }

        if self.history_limit == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "history_limit is 0; state transitions will not be recorded".to_string(),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_not_initialized() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(TodoError::NotInitialized)
        ));
        assert_eq!(Config::load_or_default(dir.path()).unwrap(), Config::default());
    }

    #[test]
    fn partial_yaml_uses_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(paths::todo_dir(dir.path())).unwrap();
        std::fs::write(paths::config_path(dir.path()), "show_ids: true\n").unwrap();

        let cfg = Config::load(dir.path()).unwrap();
        assert!(cfg.show_ids);
        assert!(cfg.confirm_delete);
        assert_eq!(cfg.prompt, "todo");
        assert_eq!(cfg.history_limit, DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn init_then_save_round_trip() {
        let dir = TempDir::new().unwrap();
        assert!(Config::init(dir.path()).unwrap());
        assert!(!Config::init(dir.path()).unwrap());

        let mut cfg = Config::load(dir.path()).unwrap();
        cfg.confirm_delete = false;
        cfg.save(dir.path()).unwrap();
        assert!(!Config::load(dir.path()).unwrap().confirm_delete);
    }

    #[test]
    fn validate_flags_empty_prompt_and_zero_history() {
        let cfg = Config {
            prompt: "  ".to_string(),
            history_limit: 0,
            ..Config::default()
        };
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|w| w.level == WarnLevel::Warning));
        assert!(Config::default().validate().is_empty());
    }

    #[test]
    fn multi_line_prompt_is_an_error() {
        let cfg = Config {
            prompt: "to\ndo".to_string(),
            ..Config::default()
        };
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, WarnLevel::Error);
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(paths::todo_dir(dir.path())).unwrap();
        std::fs::write(paths::config_path(dir.path()), "history_limit: [oops\n").unwrap();
        assert!(matches!(Config::load(dir.path()), Err(TodoError::Yaml(_))));
    }
}
