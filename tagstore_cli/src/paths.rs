//! Centralized path management for the tagstore CLI
//!
//! Data (the SQLite database) and configuration live in separate platform
//! directories.

use std::path::PathBuf;

/// The name of the application directory used across all platforms
const APP_DIR: &str = "tagstore";

/// The name of the database file
const DATABASE_FILE: &str = "tagstore.db";

/// Returns the base data directory for the application
///
/// On Linux this is `~/.local/share/tagstore`; on Windows `%APPDATA%/tagstore`.
/// Falls back to `.tagstore` in the current directory.
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(".tagstore"))
}

/// Returns the default path of the tag database
pub fn get_database_path() -> PathBuf {
    get_data_dir().join(DATABASE_FILE)
}

pub fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(".tagstore"))
}

pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_path_is_in_data_dir() {
        let db_path = get_database_path();
        let data_dir = get_data_dir();

        assert!(
            db_path.starts_with(&data_dir),
            "Database path {} should be under data dir {}",
            db_path.display(),
            data_dir.display()
        );
    }

    #[test]
    fn test_database_path_has_correct_filename() {
        assert_eq!(
            get_database_path().file_name().and_then(|n| n.to_str()),
            Some(DATABASE_FILE)
        );
    }

    #[test]
    fn test_config_path_is_in_config_dir() {
        let config_path = get_config_path();
        assert!(config_path.starts_with(get_config_dir()));
        assert!(config_path.to_string_lossy().contains(APP_DIR));
    }
}
