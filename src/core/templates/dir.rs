//! Resolution of the user configuration directory holding `config.toml`
//! and the template folders it points at.

use std::path::PathBuf;

use tracing::debug;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "ARTI_CONFIG_DIR";

/// Trait for reading the configuration location, allowing dependency injection for testing
pub trait ConfigDirReader {
    fn get_config_dir(&self) -> Option<String>;
}

/// Production implementation that reads from environment variables
pub struct EnvConfigDirReader;

impl ConfigDirReader for EnvConfigDirReader {
    fn get_config_dir(&self) -> Option<String> {
        std::env::var(CONFIG_DIR_ENV).ok()
    }
}

/// Mock implementation for testing with controlled values
#[cfg(test)]
pub struct MockConfigDirReader(Option<String>);

#[cfg(test)]
impl MockConfigDirReader {
    pub fn new(config_dir: Option<String>) -> Self {
        Self(config_dir)
    }
}

#[cfg(test)]
impl ConfigDirReader for MockConfigDirReader {
    fn get_config_dir(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Find the configuration directory
///
/// Resolution order:
/// 1. `ARTI_CONFIG_DIR` environment variable
/// 2. `<platform config dir>/arti`, e.g. `~/.config/arti`
pub fn config_dir() -> Option<PathBuf> {
    config_dir_with_reader(&EnvConfigDirReader)
}

/// Find the configuration directory with a custom reader (for testing)
pub fn config_dir_with_reader(reader: &dyn ConfigDirReader) -> Option<PathBuf> {
    if let Some(dir) = reader.get_config_dir().filter(|d| !d.is_empty()) {
        debug!("Using {}: {}", CONFIG_DIR_ENV, dir);
        return Some(PathBuf::from(dir));
    }

    let dir = dirs::config_dir().map(|base| base.join("arti"));
    debug!("Using default config directory: {:?}", dir);
    dir
}
