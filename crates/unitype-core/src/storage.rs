//! The user abbreviation database: a JSON object mapping abbreviations
//! (without the escape character) to symbols, layered over the built-in
//! defaults.

use crate::config::{ensure_config_dir, get_db_file_path, ESCAPE_CHAR};
use crate::defaults::DEFAULT_ABBREVIATIONS;
use crate::error::{Result, UnitypeError};
use crate::symbols::SymbolTable;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub type Abbreviations = BTreeMap<String, String>;

/// Entries stored in the database at `path` alone. Missing or empty files
/// hold no entries.
pub fn load_user_abbreviations_from(path: &Path) -> Result<Abbreviations> {
    if !path.exists() {
        return Ok(Abbreviations::new());
    }

    let content = fs::read_to_string(path)?;

    // Handle empty database file
    if content.trim().is_empty() {
        return Ok(Abbreviations::new());
    }

    serde_json::from_str(&content).map_err(|e| e.into())
}

/// Built-in defaults overlaid with the database at `path`.
pub fn load_abbreviations_from(path: &Path) -> Result<Abbreviations> {
    let mut abbreviations: Abbreviations = DEFAULT_ABBREVIATIONS
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    abbreviations.extend(load_user_abbreviations_from(path)?);
    Ok(abbreviations)
}

/// Built-in defaults overlaid with the user database.
pub fn load_abbreviations() -> Result<Abbreviations> {
    load_abbreviations_from(&get_db_file_path())
}

pub fn load_symbol_table() -> Result<SymbolTable> {
    Ok(SymbolTable::new(load_abbreviations()?))
}

/// Save the user entries to the database file at `path`
pub fn save_abbreviations_to(path: &Path, abbreviations: &Abbreviations) -> Result<()> {
    let serialized = serde_json::to_string_pretty(abbreviations)?;
    fs::write(path, serialized)?;
    Ok(())
}

pub fn validate_abbreviation(abbrev: &str) -> Result<()> {
    if abbrev.is_empty() {
        return Err(UnitypeError::InvalidAbbreviation(
            "abbreviation must not be empty".to_string(),
        ));
    }
    if abbrev.chars().any(char::is_whitespace) {
        return Err(UnitypeError::InvalidAbbreviation(format!(
            "'{}' contains whitespace",
            abbrev
        )));
    }
    if abbrev.starts_with(ESCAPE_CHAR) {
        return Err(UnitypeError::InvalidAbbreviation(format!(
            "'{}' must be given without the leading {}",
            abbrev, ESCAPE_CHAR
        )));
    }
    Ok(())
}

/// Add or overwrite an entry in the database at `path`
pub fn add_abbreviation_to(path: &Path, abbrev: &str, symbol: &str) -> Result<()> {
    validate_abbreviation(abbrev)?;
    let mut abbreviations = load_user_abbreviations_from(path)?;
    abbreviations.insert(abbrev.to_string(), symbol.to_string());
    save_abbreviations_to(path, &abbreviations)
}

/// Remove an entry from the database at `path`
pub fn delete_abbreviation_from(path: &Path, abbrev: &str) -> Result<()> {
    let mut abbreviations = load_user_abbreviations_from(path)?;
    if abbreviations.remove(abbrev).is_none() {
        return Err(UnitypeError::ShortcutNotFound(abbrev.to_string()));
    }
    save_abbreviations_to(path, &abbreviations)
}

/// Add a new abbreviation to the user database
pub fn add_abbreviation(abbrev: &str, symbol: &str) -> Result<()> {
    ensure_config_dir()?;
    add_abbreviation_to(&get_db_file_path(), abbrev, symbol)
}

/// Delete an abbreviation from the user database
pub fn delete_abbreviation(abbrev: &str) -> Result<()> {
    let path = get_db_file_path();
    if !path.exists() {
        return Err(UnitypeError::DatabaseNotFound(
            path.to_string_lossy().to_string(),
        ));
    }
    delete_abbreviation_from(&path, abbrev)
}
