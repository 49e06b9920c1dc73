//! Where configuration and data files live on this computer.
//!
//! Nothing here is global: code that needs to know about these directories
//! receives a [`PlatformDirectories`] implementation explicitly.

use std::{
    env,
    fmt::Debug,
    path::{Path, PathBuf},
};


/// Name of the environment variable that, if set, overrides
/// both the configuration and the data directory.
pub const HOME_OVERRIDE_VARIABLE: &str = "MIRACLE_HOME";

const APPLICATION_DIRECTORY_NAME: &str = "miracle";


/// Platform information provider.
pub trait PlatformDirectories: Debug {
    /// Returns the full path of the configuration file `file_name`,
    /// or `None` if no such file exists in the configuration directory.
    fn config_file(&self, file_name: &str) -> Option<PathBuf>;

    /// Returns the full path the data file `file_name` would have.
    /// Does not check whether it exists.
    fn data_file(&self, file_name: &str) -> PathBuf;
}


/// A pair of explicitly chosen directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedDirectories {
    pub config_directory: PathBuf,
    pub data_directory: PathBuf,
}

impl FixedDirectories {
    pub fn new<C, D>(config_directory: C, data_directory: D) -> Self
    where
        C: Into<PathBuf>,
        D: Into<PathBuf>,
    {
        Self {
            config_directory: config_directory.into(),
            data_directory: data_directory.into(),
        }
    }
}

impl PlatformDirectories for FixedDirectories {
    fn config_file(&self, file_name: &str) -> Option<PathBuf> {
        existing_file(&self.config_directory, file_name)
    }

    fn data_file(&self, file_name: &str) -> PathBuf {
        self.data_directory.join(file_name)
    }
}


/// The conventional per-user directories of the current platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemDirectories {
    directories: FixedDirectories,
}

impl SystemDirectories {
    /// Discovers the directories from the environment.
    ///
    /// `MIRACLE_HOME` takes precedence. Otherwise:
    /// - Linux: `$XDG_CONFIG_HOME/miracle` and `$XDG_DATA_HOME/miracle`
    ///   (falling back to `~/.config` and `~/.local/share`),
    /// - macOS: `~/Library/Application Support/miracle` for both,
    /// - Windows: `%APPDATA%\miracle` for both.
    pub fn from_environment() -> Self {
        if let Ok(miracle_home) = env::var(HOME_OVERRIDE_VARIABLE) {
            let miracle_home = PathBuf::from(miracle_home);

            return Self {
                directories: FixedDirectories::new(&miracle_home, miracle_home.join("data")),
            };
        }

        let home_directory =
            PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")));

        let directories = if cfg!(target_os = "macos") {
            let application_support = home_directory
                .join("Library")
                .join("Application Support")
                .join(APPLICATION_DIRECTORY_NAME);

            FixedDirectories::new(&application_support, &application_support)
        } else if cfg!(target_os = "windows") {
            let app_data = env::var("APPDATA")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("C:\\"))
                .join(APPLICATION_DIRECTORY_NAME);

            FixedDirectories::new(&app_data, &app_data)
        } else {
            let config_home = env::var("XDG_CONFIG_HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| home_directory.join(".config"));
            let data_home = env::var("XDG_DATA_HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| home_directory.join(".local").join("share"));

            FixedDirectories::new(
                config_home.join(APPLICATION_DIRECTORY_NAME),
                data_home.join(APPLICATION_DIRECTORY_NAME),
            )
        };

        Self { directories }
    }

    pub fn config_directory(&self) -> &Path {
        &self.directories.config_directory
    }

    pub fn data_directory(&self) -> &Path {
        &self.directories.data_directory
    }
}

impl PlatformDirectories for SystemDirectories {
    fn config_file(&self, file_name: &str) -> Option<PathBuf> {
        self.directories.config_file(file_name)
    }

    fn data_file(&self, file_name: &str) -> PathBuf {
        self.directories.data_file(file_name)
    }
}


fn existing_file(directory: &Path, file_name: &str) -> Option<PathBuf> {
    let candidate = directory.join(file_name);

    if candidate.is_file() {
        Some(candidate)
    } else {
        None
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_files_are_joined_without_checking_existence() {
        let platform = FixedDirectories::new("/nonexistent/config", "/nonexistent/data");

        assert_eq!(
            platform.data_file("foo.txt"),
            PathBuf::from("/nonexistent/data/foo.txt")
        );
    }

    #[test]
    fn config_files_must_exist() {
        let config_directory = tempfile::tempdir().unwrap();
        std::fs::write(config_directory.path().join("miracle.config"), "{}").unwrap();

        let platform = FixedDirectories::new(config_directory.path(), config_directory.path());

        assert_eq!(
            platform.config_file("miracle.config"),
            Some(config_directory.path().join("miracle.config"))
        );
        assert_eq!(platform.config_file("other.config"), None);
    }
}
