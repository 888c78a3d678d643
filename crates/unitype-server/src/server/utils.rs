//! Utilities for managing the API server.

use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::Path;
use unitype_core::config::{ensure_config_dir, get_port_file_path};
use unitype_core::{Result, UnitypeError};

/// Try to get the API server port from stored configuration
pub fn get_api_server_port() -> Result<u16> {
    read_port_file(&get_port_file_path())
}

pub fn read_port_file(path: &Path) -> Result<u16> {
    if !path.exists() {
        return Err(UnitypeError::Other(
            "API server port information not found".to_string(),
        ));
    }

    let mut file = fs::File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    contents
        .trim()
        .parse::<u16>()
        .map_err(|_| UnitypeError::InvalidConfig("Invalid port stored in configuration".to_string()))
}

/// Check if a port is available by trying to bind to it
pub fn port_is_available(port: u16) -> bool {
    TcpListener::bind(("127.0.0.1", port)).is_ok()
}

/// First available port starting at `port`, trying up to `attempts` ports
pub fn find_available_port(port: u16, attempts: u16) -> Option<u16> {
    (0..attempts)
        .filter_map(|offset| port.checked_add(offset))
        .find(|candidate| port_is_available(*candidate))
}

/// Save the API port to a configuration file
pub fn save_api_port(port: u16) -> Result<()> {
    ensure_config_dir()?;
    write_port_file(&get_port_file_path(), port)
}

pub fn write_port_file(path: &Path, port: u16) -> Result<()> {
    let mut file = fs::File::create(path)?;
    write!(file, "{}", port)?;
    Ok(())
}

/// Remove the saved port, if any
pub fn clear_api_port() -> Result<()> {
    let path = get_port_file_path();
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn port_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("api_port.txt");
        assert!(read_port_file(&path).is_err());
        write_port_file(&path, 4180).unwrap();
        assert_eq!(read_port_file(&path).unwrap(), 4180);
    }

    #[test]
    fn garbage_port_is_invalid_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("api_port.txt");
        fs::write(&path, "not a port").unwrap();
        assert!(matches!(
            read_port_file(&path),
            Err(UnitypeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn bound_port_is_not_available() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        assert!(!port_is_available(port));
    }
}
