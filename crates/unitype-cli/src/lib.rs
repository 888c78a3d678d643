pub mod cli;
pub mod commands;

use clap::Parser;
use cli::Unitype;
use commands::handle_command;
use std::process;

/// Run the unitype CLI application
pub fn run_main() {
    // RUST_LOG=debug shows tracker and server diagnostics
    env_logger::init();

    let args = Unitype::parse();
    let result = handle_command(args.commands);

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
