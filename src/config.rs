use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::render::{Palette, Rgba};

pub const CONFIG_ENV_VAR: &str = "MAP_EDITOR_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "map_editor.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Editor settings. Every field is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub on_color: Rgba,
    pub off_color: Rgba,
    pub background_color: Rgba,
    pub cursor_color: Rgba,
    pub show_cursor: bool,
    pub default_file_name: String,
    pub default_width: String,
    pub default_height: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            window_width: 787,
            window_height: 787,
            on_color: [0, 128, 0, 255],
            off_color: [169, 169, 169, 255],
            background_color: [0, 0, 0, 255],
            cursor_color: [100, 149, 237, 255],
            show_cursor: true,
            default_file_name: "Untitled.map".to_string(),
            default_width: String::new(),
            default_height: String::new(),
        }
    }
}

impl EditorConfig {
    pub fn from_json(path: &Path, text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(path, &text)
    }

    /// Loads the config from `explicit`, then `$MAP_EDITOR_CONFIG`, then
    /// `map_editor.json` if it exists. Falls back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let env_path = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);

        match explicit.map(Path::to_path_buf).or(env_path) {
            Some(path) => {
                log::info!("Loading config from {}", path.display());
                Self::load_from(path)
            }
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    log::info!("Loading config from {}", path.display());
                    Self::load_from(path)
                } else {
                    log::info!("No config file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn palette(&self) -> Palette {
        Palette {
            on: self.on_color,
            off: self.off_color,
            background: self.background_color,
            cursor: self.show_cursor.then_some(self.cursor_color),
        }
    }
}
