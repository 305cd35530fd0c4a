//! Platform-specific directories for configuration and credentials

use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::warn;

/// Credential file name inside the data directory
pub const CREDENTIALS_FILE: &str = "credentials.json";

/// Default configuration file name inside the config directory
pub const CONFIG_FILE: &str = "config.toml";

/// Resolves where the CLI keeps its files
pub struct StateDir {
    project_dirs: Option<ProjectDirs>,
    override_dir: Option<PathBuf>,
}

impl StateDir {
    pub fn new() -> Self {
        let project_dirs = ProjectDirs::from("dev", "Notes", "notes");
        if project_dirs.is_none() {
            warn!("Failed to determine platform-specific directories, will use fallback");
        }
        Self {
            project_dirs,
            override_dir: None,
        }
    }

    /// Keep everything under `path` instead of the platform directories
    pub fn with_override(path: impl Into<PathBuf>) -> Self {
        Self {
            project_dirs: None,
            override_dir: Some(path.into()),
        }
    }

    /// Pick the override when given, the platform directories otherwise
    pub fn resolve(override_dir: Option<PathBuf>) -> Self {
        override_dir.map_or_else(Self::new, Self::with_override)
    }

    pub fn config_dir(&self) -> PathBuf {
        if let Some(override_dir) = &self.override_dir {
            return override_dir.join("config");
        }

        self.project_dirs
            .as_ref()
            .map_or_else(|| PathBuf::from("./config"), |dirs| dirs.config_dir().to_path_buf())
    }

    pub fn data_dir(&self) -> PathBuf {
        if let Some(override_dir) = &self.override_dir {
            return override_dir.join("data");
        }

        self.project_dirs
            .as_ref()
            .map_or_else(|| PathBuf::from("./data"), |dirs| dirs.data_dir().to_path_buf())
    }

    pub fn credentials_path(&self) -> PathBuf {
        self.data_dir().join(CREDENTIALS_FILE)
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir().join(CONFIG_FILE)
    }
}

impl Default for StateDir {
    fn default() -> Self {
        Self::new()
    }
}
