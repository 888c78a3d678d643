//! HTTP server implementation for the unitype API.

use crate::api::{
    abbreviations_handler, convert_handler, lookup_handler, resolve_handler, ConvertRequest,
    LookupRequest, ResolveRequest,
};
use crate::server::utils::{
    clear_api_port, find_available_port, get_api_server_port, port_is_available, save_api_port,
};
use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;
use unitype_core::{Result, SymbolTable, UnitypeError};
use warp::{Filter, Rejection, Reply};

fn with_table(
    table: Arc<SymbolTable>,
) -> impl Filter<Extract = (Arc<SymbolTable>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || Arc::clone(&table))
}

/// All API routes over `table`
pub fn routes(
    table: Arc<SymbolTable>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    // CORS for editor extensions running in a webview
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["Content-Type"])
        .allow_methods(vec!["GET", "POST"]);

    let resolve_route = warp::path!("api" / "resolve")
        .and(warp::get())
        .and(warp::query::<ResolveRequest>())
        .and(with_table(Arc::clone(&table)))
        .map(|query: ResolveRequest, table: Arc<SymbolTable>| {
            warp::reply::json(&resolve_handler(&table, &query.abbrev))
        });

    let lookup_route = warp::path!("api" / "lookup")
        .and(warp::get())
        .and(warp::query::<LookupRequest>())
        .and(with_table(Arc::clone(&table)))
        .map(|query: LookupRequest, table: Arc<SymbolTable>| {
            warp::reply::json(&lookup_handler(&table, &query.symbol))
        });

    let convert_route = warp::path!("api" / "convert")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_table(Arc::clone(&table)))
        .map(|body: ConvertRequest, table: Arc<SymbolTable>| {
            warp::reply::json(&convert_handler(&table, body.text))
        });

    let abbreviations_route = warp::path!("api" / "abbreviations")
        .and(warp::get())
        .and(with_table(table))
        .map(|table: Arc<SymbolTable>| warp::reply::json(&abbreviations_handler(&table)));

    // Health check endpoint
    let health_route = warp::path!("health").map(|| "unitype API is running");

    resolve_route
        .or(lookup_route)
        .or(convert_route)
        .or(abbreviations_route)
        .or(health_route)
        .with(cors)
}

/// Start the HTTP API server on the specified port
pub async fn start_api_server(port: u16, table: Arc<SymbolTable>) -> Result<()> {
    let port = if port_is_available(port) {
        port
    } else {
        let fallback = find_available_port(port.saturating_add(1), 10).ok_or_else(|| {
            UnitypeError::Other(format!("Port {} and the next 10 are in use", port))
        })?;
        log::warn!("Port {} is in use, using {} instead", port, fallback);
        fallback
    };
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    let server = warp::serve(routes(table)).try_bind_with_graceful_shutdown(addr, async {
        tokio::signal::ctrl_c().await.ok();
        log::info!("Received shutdown signal, stopping API server...");
    });

    match server {
        Ok((addr, server)) => {
            // Save the port to file so we can find it later
            if let Err(e) = save_api_port(addr.port()) {
                log::warn!("Failed to save API port information: {}", e);
            }
            println!("unitype API server listening on http://{}", addr);

            server.await;
            clear_api_port()?;
            Ok(())
        }
        Err(e) => Err(UnitypeError::Other(format!(
            "Failed to bind to port {}: {}",
            port, e
        ))),
    }
}

/// Check the health of a running API server
pub fn check_api_server_health() -> Result<()> {
    let port = get_api_server_port()?;
    println!("Checking API server on port {}...", port);

    match TcpStream::connect(("127.0.0.1", port)) {
        Ok(_) => {
            println!("API server is running on port {}", port);
            Ok(())
        }
        Err(e) => Err(UnitypeError::Other(format!(
            "Failed to connect to API server on port {}: {}",
            port, e
        ))),
    }
}
