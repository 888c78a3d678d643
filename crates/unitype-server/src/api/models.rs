//! Data models for API requests and responses.

use serde::{Deserialize, Serialize};

/// Standard API response format
#[derive(Serialize, Deserialize, Debug)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// Query for resolving one abbreviation (without the escape character)
#[derive(Deserialize)]
pub struct ResolveRequest {
    pub abbrev: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct ResolveResult {
    pub abbreviation: String,
    pub symbol: Option<String>,
}

/// Query for the abbreviations producing a symbol
#[derive(Deserialize)]
pub struct LookupRequest {
    pub symbol: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct LookupResult {
    pub symbol: String,
    pub abbreviations: Vec<String>,
    pub hover: Option<String>,
}

/// Body for converting a whole text
#[derive(Deserialize)]
pub struct ConvertRequest {
    pub text: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct ConvertResult {
    pub input: String,
    pub output: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct AbbreviationEntry {
    pub abbreviation: String,
    pub symbol: String,
}
