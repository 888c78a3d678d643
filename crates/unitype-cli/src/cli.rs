use clap::{Parser, Subcommand};
use std::env;
use unitype_core::DEFAULT_API_PORT;

#[derive(Parser, Debug)]
#[command(
    author = "bahdotsh",
    version = env!("CARGO_PKG_VERSION"),
    about = "unitype - type Unicode symbols through backslash abbreviations",
    long_about = "unitype turns abbreviations such as \\alpha or \\to into α and → as you type."
)]
pub struct Unitype {
    #[clap(subcommand)]
    pub commands: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Print the symbol an abbreviation resolves to
    Resolve {
        #[clap(help = "Abbreviation, with or without the leading backslash")]
        abbrev: String,
    },
    /// Show which abbreviations produce a symbol
    Lookup {
        #[clap(help = "A single symbol, e.g. λ")]
        symbol: String,
    },
    /// Convert every abbreviation in a text
    Convert {
        #[clap(help = "Text to convert; read from stdin when omitted")]
        text: Option<String>,
    },
    /// List all the abbreviations
    List,
    /// Add a new abbreviation to the user database
    Add {
        #[clap(long, short = 'a', help = "Abbreviation, without the leading backslash")]
        abbrev: String,

        #[clap(long, short = 's', help = "The symbol it produces")]
        symbol: String,
    },
    /// Delete an abbreviation from the user database
    Delete {
        #[clap(long, short = 'a', help = "Abbreviation to delete")]
        abbrev: String,
    },
    /// Open the terminal scratch editor
    Edit,
    /// Start the HTTP API server
    Serve {
        #[clap(long, short, default_value_t = DEFAULT_API_PORT, help = "Port to listen on")]
        port: u16,
    },
    /// Check if the API server is responsive
    ApiStatus,
}
