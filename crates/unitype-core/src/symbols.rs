use crate::config::ESCAPE_CHAR;
use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;

/// Immutable mapping from abbreviation (without the escape character) to the
/// symbol it stands for.
///
/// The escape character always maps to itself, so typing it twice yields a
/// literal escape character. A reverse index answers which abbreviations
/// produce a given symbol.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    escape: char,
    entries: BTreeMap<String, String>,
    reverse: HashMap<String, Vec<String>>,
}

impl SymbolTable {
    /// Build a table from caller-supplied pairs. The pairs are copied; empty
    /// abbreviations are skipped.
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::with_escape(entries, ESCAPE_CHAR)
    }

    pub fn with_escape<I, K, V>(entries: I, escape: char) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map: BTreeMap<String, String> = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, _)| !k.is_empty())
            .collect();
        map.insert(escape.to_string(), escape.to_string());

        let mut reverse: HashMap<String, Vec<String>> = HashMap::new();
        for (abbrev, symbol) in &map {
            reverse
                .entry(symbol.clone())
                .or_default()
                .push(abbrev.clone());
        }
        // Stable, so equal lengths keep their sorted order
        for abbrevs in reverse.values_mut() {
            abbrevs.sort_by_key(|a| a.chars().count());
        }

        Self {
            escape,
            entries: map,
            reverse,
        }
    }

    pub fn escape(&self) -> char {
        self.escape
    }

    pub fn get(&self, abbrev: &str) -> Option<&str> {
        self.entries.get(abbrev).map(String::as_str)
    }

    pub fn contains(&self, abbrev: &str) -> bool {
        self.entries.contains_key(abbrev)
    }

    /// The shortest abbreviation that starts with `prefix` (including `prefix`
    /// itself). Among equally short ones the lexicographically first wins.
    pub fn shortest_extension(&self, prefix: &str) -> Option<(&str, &str)> {
        self.entries
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|(k, _)| k.starts_with(prefix))
            .min_by_key(|(k, _)| k.chars().count())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Every abbreviation whose symbol is exactly `symbol`, shortest first.
    pub fn lookup_abbreviations(&self, symbol: &str) -> Vec<String> {
        self.reverse.get(symbol).cloned().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
