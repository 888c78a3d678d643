//! HTTP API for editor integrations that cannot link unitype-core directly.

pub mod api;
pub mod server;

pub use server::start_api_server;
