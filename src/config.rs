use std::{env, path::PathBuf};

use directories::ProjectDirs;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{MenuError, TransformKind, TranslationTable};
use crate::tui::{KeyBinding, KeyBindings, Theme, ThemeName};

const CONFIG: &str = include_str!("../.config/config.json5");
const CONFIG_FILE_NAME: &str = "config.json5";

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    pub static ref CONFIG_FOLDER: Option<PathBuf> =
        env::var(format!("{}_CONFIG", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub theme: ThemeName,
    /// Transform names offered by default
    #[serde(default)]
    pub visible_items: Vec<String>,
    #[serde(default)]
    pub translations: TranslationTable,
    #[serde(default)]
    pub keybindings: Vec<KeyBinding>,
}

impl Config {
    /// Load the embedded defaults overlaid with the user's config file.
    ///
    /// An explicit `config_path` must exist; the default location is optional.
    pub fn from_path(config_path: Option<&PathBuf>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(CONFIG, config::FileFormat::Json5));

        builder = match config_path {
            Some(path) => {
                debug!(path = %path.display(), "loading config");
                builder.add_source(
                    config::File::from(path.clone())
                        .format(config::FileFormat::Json5)
                        .required(true),
                )
            }
            None => {
                let path = get_config_dir().join(CONFIG_FILE_NAME);
                debug!(path = %path.display(), "loading optional config");
                builder.add_source(
                    config::File::from(path)
                        .format(config::FileFormat::Json5)
                        .required(false),
                )
            }
        };

        builder.build()?.try_deserialize()
    }

    /// The embedded defaults alone
    pub fn embedded() -> Result<Self, json5::Error> {
        json5::from_str(CONFIG)
    }

    pub fn theme(&self) -> Theme {
        Theme::from_name(self.theme)
    }

    pub fn visible_items(&self) -> Result<Vec<TransformKind>, MenuError> {
        self.visible_items.iter().map(|s| s.parse()).collect()
    }

    /// Configured key bindings, or the built-in set when none are configured
    pub fn keybindings(&self) -> KeyBindings {
        if self.keybindings.is_empty() {
            return KeyBindings::default();
        }
        let bindings = KeyBindings::new(self.keybindings.clone());
        for warning in bindings.validate() {
            warn!("{warning}");
        }
        bindings
    }
}

pub fn get_config_dir() -> PathBuf {
    if let Some(s) = CONFIG_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.config_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".config")
    }
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "selmenu", env!("CARGO_PKG_NAME"))
}
