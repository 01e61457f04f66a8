use std::path::{Path, PathBuf};

/// OS lookups used to locate the config file and installed browsers
///
/// Detection goes through this trait so it can be pointed at a fake home
/// directory in tests.
pub trait Environment {
    fn home_dir(&self) -> Option<PathBuf>;

    /// Per-user configuration directory (roaming AppData on Windows)
    fn config_dir(&self) -> Option<PathBuf>;

    /// Per-user local data directory (local AppData on Windows)
    fn data_local_dir(&self) -> Option<PathBuf>;

    /// Resolve a program name on PATH
    fn find_program(&self, name: &str) -> Option<PathBuf>;

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    /// Default location of the Waypost config file
    fn config_file(&self) -> Option<PathBuf> {
        self.config_dir()
            .map(|dir| dir.join("waypost").join("config.json"))
    }
}

/// The real environment of the current user
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }

    fn config_dir(&self) -> Option<PathBuf> {
        dirs::config_dir()
    }

    fn data_local_dir(&self) -> Option<PathBuf> {
        dirs::data_local_dir()
    }

    fn find_program(&self, name: &str) -> Option<PathBuf> {
        which::which(name).ok()
    }
}
