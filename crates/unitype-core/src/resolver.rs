use crate::symbols::SymbolTable;

/// Find the symbol to substitute for `typed` (the abbreviation without its
/// leading escape character).
///
/// In order: an exact match, then the shortest abbreviation extending
/// `typed`, then the same search on `typed` with trailing characters peeled
/// off one at a time, re-appending the peeled characters verbatim. So with
/// `delta → δ` and no `delta1`, `delta1` resolves to `δ1`.
///
/// The empty string never prefix-matches, so text that is neither an
/// abbreviation nor built on one resolves to `None`.
pub fn resolve(table: &SymbolTable, typed: &str) -> Option<String> {
    let mut prefix = typed;

    loop {
        if let Some(symbol) = lookup(table, prefix) {
            let rest = &typed[prefix.len()..];
            return Some(format!("{}{}", symbol, rest));
        }

        let (last, _) = prefix.char_indices().next_back()?;
        prefix = &prefix[..last];
    }
}

fn lookup<'a>(table: &'a SymbolTable, typed: &str) -> Option<&'a str> {
    if let Some(symbol) = table.get(typed) {
        return Some(symbol);
    }
    if typed.is_empty() {
        return None;
    }
    table.shortest_extension(typed).map(|(_, symbol)| symbol)
}
