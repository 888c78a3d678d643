pub mod handlers;
pub mod models;

pub use handlers::{abbreviations_handler, convert_handler, lookup_handler, resolve_handler};
pub use models::{
    AbbreviationEntry, ApiResponse, ConvertRequest, ConvertResult, LookupRequest, LookupResult,
    ResolveRequest, ResolveResult,
};
