use crate::cli::Commands;
use std::io::{self, Read};
use std::sync::Arc;
use unitype_core::{
    add_abbreviation, convert_text, delete_abbreviation, hover_text, load_symbol_table, resolve,
    Result, SymbolTable, UnitypeError, ESCAPE_CHAR,
};
use unitype_server::server::http_server::check_api_server_health;
use unitype_server::server::start_api_server;
use unitype_ui::run_editor;

pub fn handle_command(command: Option<Commands>) -> Result<()> {
    let table = Arc::new(load_symbol_table()?);
    log::debug!("loaded {} abbreviations", table.len());

    match command {
        Some(command) => handle_subcommand(command, table),
        None => run_editor(table), // Default: open the editor when no command provided
    }
}

fn handle_subcommand(command: Commands, table: Arc<SymbolTable>) -> Result<()> {
    match command {
        Commands::Resolve { abbrev } => {
            println!("{}", resolve_line(&table, &abbrev));
            Ok(())
        }
        Commands::Lookup { symbol } => {
            println!("{}", lookup_line(&table, &symbol));
            Ok(())
        }
        Commands::Convert { text } => {
            let text = match text {
                Some(text) => text,
                None => read_stdin()?,
            };
            println!("{}", convert_text(&table, text.trim_end_matches('\n')));
            Ok(())
        }
        Commands::List => {
            for line in list_lines(&table) {
                println!("{}", line);
            }
            Ok(())
        }
        Commands::Add { abbrev, symbol } => add_abbreviation(&abbrev, &symbol)
            .map(|_| println!("Abbreviation {}{} added", ESCAPE_CHAR, abbrev)),
        Commands::Delete { abbrev } => delete_abbreviation(&abbrev)
            .map(|_| println!("Abbreviation {}{} deleted", ESCAPE_CHAR, abbrev)),
        Commands::Edit => run_editor(table),
        Commands::Serve { port } => handle_serve_command(port, table),
        Commands::ApiStatus => check_api_server_health(),
    }
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;
    Ok(text)
}

pub(crate) fn resolve_line(table: &SymbolTable, abbrev: &str) -> String {
    let typed = abbrev.strip_prefix(table.escape()).unwrap_or(abbrev);
    match resolve(table, typed) {
        Some(symbol) => symbol,
        None => format!("No replacement for {}{}", table.escape(), typed),
    }
}

pub(crate) fn lookup_line(table: &SymbolTable, symbol: &str) -> String {
    hover_text(table, symbol)
        .unwrap_or_else(|| format!("No abbreviation produces {}", symbol))
}

pub(crate) fn list_lines(table: &SymbolTable) -> Vec<String> {
    let width = table.iter().map(|(a, _)| a.chars().count()).max().unwrap_or(0) + 1;
    table
        .iter()
        .map(|(abbrev, symbol)| {
            format!(
                "{:<width$}  {}",
                format!("{}{}", table.escape(), abbrev),
                symbol,
                width = width
            )
        })
        .collect()
}

fn handle_serve_command(port: u16, table: Arc<SymbolTable>) -> Result<()> {
    // Start API server only in a properly configured runtime
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(UnitypeError::Io)?;

    // Block the current thread with the server
    runtime.block_on(async {
        println!("Starting unitype API server on port {}...", port);
        start_api_server(port, table).await
    })
}
