mod config;
mod replay_config;

pub use config::{get_config_manager, Config};
pub use replay_config::ReplayConfig;
