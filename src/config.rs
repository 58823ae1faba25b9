use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "CARKEEP_HOME";

const DATA_DIR_NAME: &str = "carkeep";
const DATA_FILE_NAME: &str = "car_maintenance_data.json";
const UPLOADS_DIR_NAME: &str = "uploads";

/// Where carkeep keeps its files.
///
/// The data directory is chosen in the following order:
/// 1. An explicit directory (the `--data-dir` flag).
/// 2. `CARKEEP_HOME` environment variable.
/// 3. `~/.local/share/carkeep` (on Linux).
/// 4. `./carkeep` (fallback).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    data_dir: PathBuf,
}

impl Config {
    /// Resolves the data directory from the flag, the environment and the platform default.
    pub fn resolve(explicit: Option<PathBuf>) -> Self {
        let data_dir = explicit
            .or_else(|| std::env::var_os(HOME_ENV).map(PathBuf::from))
            .unwrap_or_else(|| {
                let mut p = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
                p.push(DATA_DIR_NAME);
                p
            });
        Self { data_dir }
    }

    /// Uses `dir` as the data directory as is.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: dir.into() }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The JSON document holding cars, maintenance and history.
    pub fn data_file(&self) -> PathBuf {
        self.data_dir.join(DATA_FILE_NAME)
    }

    /// Directory that uploaded car images are copied into.
    pub fn uploads_dir(&self) -> PathBuf {
        self.data_dir.join(UPLOADS_DIR_NAME)
    }
}

/// Name of the uploads directory, as it appears in recorded image paths.
pub fn uploads_dir_name() -> &'static str {
    UPLOADS_DIR_NAME
}
