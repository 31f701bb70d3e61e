use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use which::which;

use crate::{NotesError, Result, DEFAULT_SLOT};

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Directory holding the persistence slots
    pub data_dir: PathBuf,

    /// Name of the slot the note list is stored under
    pub slot: String,

    /// Editor used for `--edit`; falls back to $EDITOR
    pub editor_command: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".tintnotes"));

        Config {
            data_dir,
            slot: DEFAULT_SLOT.to_string(),
            editor_command: None,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "tintnotes")
}

impl Config {
    /// Default location of the configuration file
    pub fn default_path() -> PathBuf {
        project_dirs()
            .map(|dirs| dirs.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from(".tintnotes/config.json"))
    }

    /// Reads the configuration at `path`, or returns defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config =
            serde_json::from_str(&content).map_err(|e| NotesError::ConfigError {
                message: format!("{}: {}", path.display(), e),
            })?;
        config.validate()?;

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|_| NotesError::DirectoryError {
                path: parent.to_path_buf(),
            })?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Applies a `key=value` assignment from the command line
    pub fn set(&mut self, assignment: &str) -> Result<()> {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| NotesError::ConfigError {
                message: format!("expected key=value, got '{}'", assignment),
            })?;
        let value = value.trim();

        match key.trim() {
            "data_dir" => self.data_dir = PathBuf::from(value),
            "slot" => self.slot = value.to_string(),
            "editor_command" if value.is_empty() => self.editor_command = None,
            "editor_command" => self.editor_command = Some(value.to_string()),
            other => {
                return Err(NotesError::ConfigError {
                    message: format!("unknown setting '{}'", other),
                })
            }
        }
        self.validate()
    }

    /// Slot names become file names, so keep them to a safe alphabet
    fn validate(&self) -> Result<()> {
        let valid = !self.slot.is_empty()
            && self
                .slot
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(NotesError::ConfigError {
                message: format!(
                    "slot '{}' must be non-empty and use only letters, digits, '-' or '_'",
                    self.slot
                ),
            });
        }
        Ok(())
    }

    // This method provides smart fallbacks when no editor is configured
    pub fn get_editor_command(&self) -> String {
        if let Some(editor) = &self.editor_command {
            return editor.clone();
        }

        if let Ok(editor) = std::env::var("EDITOR") {
            return editor;
        }

        if cfg!(windows) {
            "notepad".to_string()
        } else if cfg!(target_os = "macos") {
            "open -W -t".to_string()
        } else {
            for editor in &["nano", "vim", "vi", "emacs"] {
                if which(editor).is_ok() {
                    return editor.to_string();
                }
            }
            "nano".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.slot, DEFAULT_SLOT);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf").join("config.json");
        let mut config = Config::default();
        config.set("slot=work").unwrap();
        config.set("editor_command=vim -n").unwrap();
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.slot, "work");
        assert_eq!(loaded.editor_command.as_deref(), Some("vim -n"));
        assert_eq!(loaded.get_editor_command(), "vim -n");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "slot": "home" }"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.slot, "home");
        assert_eq!(config.data_dir, Config::default().data_dir);
    }

    #[test]
    fn rejects_unknown_keys_and_bad_slots() {
        let mut config = Config::default();
        assert!(config.set("colour=red").is_err());
        assert!(config.set("no-equals-sign").is_err());
        assert!(matches!(
            config.set("slot=../escape"),
            Err(NotesError::ConfigError { .. })
        ));
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            Config::load(&path),
            Err(NotesError::ConfigError { .. })
        ));
    }
}
