use std::path::PathBuf;

use crate::platform::PlatformDirectories;


/// File name of the configuration file, both in the platform configuration
/// directory and as the relative fallback.
pub const DEFAULT_CONFIGURATION_FILE_NAME: &str = "miracle.config";


/// Returns the default configuration filepath: `miracle.config` in the platform
/// configuration directory if it exists there, otherwise the relative path `miracle.config`.
pub fn get_default_configuration_file_path(platform: &dyn PlatformDirectories) -> PathBuf {
    platform
        .config_file(DEFAULT_CONFIGURATION_FILE_NAME)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIGURATION_FILE_NAME))
}
