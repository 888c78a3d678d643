use crate::buffer::{Position, Range, TextBuffer};
use crate::symbols::SymbolTable;

/// Help text for the character under a caret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hover {
    pub range: Range,
    pub contents: String,
}

/// "Type δ using \delta or \d", shortest abbreviations first. `None` when no
/// abbreviation produces exactly `symbol`.
pub fn hover_text(table: &SymbolTable, symbol: &str) -> Option<String> {
    let abbrevs = table.lookup_abbreviations(symbol);
    if abbrevs.is_empty() {
        return None;
    }

    let escape = table.escape();
    let spelled: Vec<String> = abbrevs
        .iter()
        .map(|a| format!("{}{}", escape, a))
        .collect();
    Some(format!("Type {} using {}", symbol, spelled.join(" or ")))
}

/// Hover for the single character at `position`.
pub fn hover_at(table: &SymbolTable, buffer: &dyn TextBuffer, position: Position) -> Option<Hover> {
    let range = Range::at(position, 1);
    let symbol = buffer.text_in(range);
    if symbol.is_empty() {
        return None;
    }

    hover_text(table, &symbol).map(|contents| Hover { range, contents })
}
