//! Settings resolution: CLI flags, then the config file, then built-in defaults.
//!
//! ```toml
//! package = "com.acme.notes"
//! db_file = "notes.db"
//! db_class = "NotesDatabase"
//! db_version = 2
//! output_dir = "app/src/main/java/com/acme/notes"
//! legacy_split = false
//! strip_comments = true
//! ```

use directories::ProjectDirs;
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::emit::room::{RoomEmitter, DEFAULT_DB_CLASS, DEFAULT_DB_FILE, DEFAULT_PACKAGE};
use crate::error::{Error, Result};
use crate::parser::{ParenMode, ParseOptions};

const CONFIG_FILE: &str = "config.toml";

/// Partially specified settings from one source
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub package: Option<String>,
    pub db_file: Option<String>,
    pub db_class: Option<String>,
    pub db_version: Option<u32>,
    pub output_dir: Option<PathBuf>,
    pub legacy_split: Option<bool>,
    pub strip_comments: Option<bool>,
}

impl Settings {
    /// Default config location in the user config directory
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "schema-to-models").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load an explicit config file, or the default one when it exists
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::read(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::read(&path),
                _ => {
                    debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    fn read(path: &Path) -> Result<Self> {
        debug!("Loading config from {:?}", path);
        let text = fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&text, path)
    }

    pub fn from_toml(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Fill fields missing here from a lower-priority source
    pub fn or(self, lower: Settings) -> Settings {
        Settings {
            package: self.package.or(lower.package),
            db_file: self.db_file.or(lower.db_file),
            db_class: self.db_class.or(lower.db_class),
            db_version: self.db_version.or(lower.db_version),
            output_dir: self.output_dir.or(lower.output_dir),
            legacy_split: self.legacy_split.or(lower.legacy_split),
            strip_comments: self.strip_comments.or(lower.strip_comments),
        }
    }

    /// Apply built-in defaults to whatever is still unset
    pub fn resolve(self) -> Config {
        let defaults = Config::default();
        Config {
            package: self.package.unwrap_or(defaults.package),
            db_file: self.db_file.unwrap_or(defaults.db_file),
            db_class: self.db_class.unwrap_or(defaults.db_class),
            db_version: self.db_version.unwrap_or(defaults.db_version),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            legacy_split: self.legacy_split.unwrap_or(defaults.legacy_split),
            strip_comments: self.strip_comments.unwrap_or(defaults.strip_comments),
        }
    }
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub package: String,
    pub db_file: String,
    pub db_class: String,
    pub db_version: u32,
    pub output_dir: PathBuf,
    pub legacy_split: bool,
    pub strip_comments: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            package: DEFAULT_PACKAGE.to_string(),
            db_file: DEFAULT_DB_FILE.to_string(),
            db_class: DEFAULT_DB_CLASS.to_string(),
            db_version: 1,
            output_dir: PathBuf::from("."),
            legacy_split: false,
            strip_comments: true,
        }
    }
}

impl Config {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            parens: if self.legacy_split {
                ParenMode::Greedy
            } else {
                ParenMode::Balanced
            },
            strip_comments: self.strip_comments,
        }
    }

    pub fn room_emitter(&self) -> RoomEmitter {
        RoomEmitter::new(&self.package, &self.db_class, &self.db_file).with_version(self.db_version)
    }
}
