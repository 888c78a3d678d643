use crate::api::models::{
    AbbreviationEntry, ApiResponse, ConvertResult, LookupResult, ResolveResult,
};
use std::sync::Arc;
use unitype_core::{convert_text, hover_text, resolve, SymbolTable};

// Resolve a single abbreviation
pub fn resolve_handler(table: &SymbolTable, abbrev: &str) -> ApiResponse<ResolveResult> {
    let abbrev = abbrev.strip_prefix(table.escape()).unwrap_or(abbrev);
    if abbrev.is_empty() {
        return ApiResponse::error("Abbreviation must not be empty".to_string());
    }

    ApiResponse::success(ResolveResult {
        abbreviation: abbrev.to_string(),
        symbol: resolve(table, abbrev),
    })
}

// Abbreviations producing a symbol, shortest first
pub fn lookup_handler(table: &SymbolTable, symbol: &str) -> ApiResponse<LookupResult> {
    if symbol.chars().count() != 1 {
        return ApiResponse::error(format!(
            "Expected a single character, got {:?}",
            symbol
        ));
    }

    ApiResponse::success(LookupResult {
        symbol: symbol.to_string(),
        abbreviations: table.lookup_abbreviations(symbol),
        hover: hover_text(table, symbol),
    })
}

// Convert every abbreviation in a text
pub fn convert_handler(table: &Arc<SymbolTable>, text: String) -> ApiResponse<ConvertResult> {
    let output = convert_text(table, &text);
    ApiResponse::success(ConvertResult {
        input: text,
        output,
    })
}

// All known abbreviations
pub fn abbreviations_handler(table: &SymbolTable) -> ApiResponse<Vec<AbbreviationEntry>> {
    ApiResponse::success(
        table
            .iter()
            .map(|(abbreviation, symbol)| AbbreviationEntry {
                abbreviation: abbreviation.to_string(),
                symbol: symbol.to_string(),
            })
            .collect(),
    )
}
