
pub mod config;
pub mod report;

pub use config::ConfigStorage;
pub use report::ReportStorage;

use std::path::PathBuf;

pub fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .expect("Could not find config directory")
        .join("bugle")
}

pub fn default_config_path() -> PathBuf {
    get_config_dir().join("config.json")
}
