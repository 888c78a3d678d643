//! unitype - live abbreviation-to-symbol input.
//!
//! Typing an escape-prefixed abbreviation such as `\delta` into a buffer is
//! tracked as a candidate range and replaced by its symbol once the token is
//! terminated by whitespace, a closing bracket, another escape character or an
//! explicit convert command.

pub mod abbreviator;
pub mod buffer;
pub mod candidate;
pub mod config;
pub mod convert;
pub mod defaults;
pub mod error;
pub mod hover;
pub mod memory;
pub mod resolver;
pub mod storage;
pub mod subscription;
pub mod symbols;
pub mod tracker;

// Re-export common items for convenience
pub use abbreviator::{Abbreviator, DocumentFilter};
pub use buffer::{
    BufferId, ContentChange, DocumentChange, Position, Range, Selection, SelectionChange,
    TextBuffer,
};
pub use config::{get_config_dir, DEFAULT_API_PORT, ESCAPE_CHAR};
pub use convert::convert_text;
pub use defaults::default_table;
pub use error::{Result, UnitypeError};
pub use hover::{hover_at, hover_text, Hover};
pub use memory::MemoryBuffer;
pub use resolver::resolve;
pub use storage::{add_abbreviation, delete_abbreviation, load_abbreviations, load_symbol_table};
pub use subscription::{Emitter, Subscription};
pub use symbols::SymbolTable;
