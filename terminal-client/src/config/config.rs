use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use snake_common::config::{ConfigManager, FileContentConfigProvider, Validate};
use snake_common::driver::DriverSettings;
use snake_common::game::GameSettings;
use snake_common::input::KeyBindings;

use super::ReplayConfig;

const CONFIG_FILE_NAME: &str = "snake_terminal_config.yaml";

fn get_config_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

/// Manager for `path`, or for the file next to the executable.
pub fn get_config_manager(path: Option<&Path>) -> ConfigManager<FileContentConfigProvider, Config> {
    match path {
        Some(path) => ConfigManager::from_yaml_file(path),
        None => ConfigManager::from_yaml_file(get_config_path()),
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    pub game: GameSettings,
    pub driver: DriverSettings,
    #[serde(default)]
    pub keys: KeyBindings,
    #[serde(default)]
    pub replays: ReplayConfig,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()?;
        self.driver.validate()?;
        self.keys.validate()?;
        self.replays.validate()?;
        Ok(())
    }
}
