use crate::error::Result;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Character that opens an abbreviation.
pub const ESCAPE_CHAR: char = '\\';
pub const DB_FILENAME: &str = "abbreviations.json";
pub const PORT_FILENAME: &str = "api_port.txt";
pub const DEFAULT_API_PORT: u16 = 3030;

/// Overrides the configuration directory when set.
pub const HOME_ENV: &str = "UNITYPE_HOME";

/// Get the unitype configuration directory
pub fn get_config_dir() -> PathBuf {
    if let Ok(dir) = env::var(HOME_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }

    env::var("HOME")
        .map(|home| PathBuf::from(home).join(".unitype"))
        .unwrap_or_else(|_| PathBuf::from(".unitype"))
}

/// Ensure the configuration directory exists
pub fn ensure_config_dir() -> Result<PathBuf> {
    let config_dir = get_config_dir();
    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

/// Get the path to the abbreviation database
pub fn get_db_file_path() -> PathBuf {
    get_config_dir().join(DB_FILENAME)
}

/// Get the path to the file recording the API server port
pub fn get_port_file_path() -> PathBuf {
    get_config_dir().join(PORT_FILENAME)
}
