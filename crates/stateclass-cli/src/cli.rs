// CLI module - command-line argument parsing
//
// Subcommands:
// - triggers: list bound triggers and their parsed actions
// - click: activate triggers in order and print the result
// - repl: interactive session over one document

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use stateclass::VERSION;

/// Declarative stateful-class toggling for HTML files
#[derive(Parser, Debug)]
#[command(name = "stateclass")]
#[command(version = VERSION)]
#[command(about = "Activate data-class triggers in HTML files", long_about = None)]
pub struct Cli {
    /// TOML config file (falls back to $STATECLASS_CONFIG, then defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List bound triggers and their parsed actions
    Triggers {
        /// HTML file to load
        file: PathBuf,
    },

    /// Activate triggers in order, then print the document
    Click {
        /// HTML file to load
        file: PathBuf,

        /// Triggers to activate: `#id` or index from `triggers`
        #[arg(required = true)]
        triggers: Vec<String>,

        /// Print activation reports as JSON instead of the document
        #[arg(long)]
        json: bool,

        /// Write the resulting document to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Interactive session over one document
    Repl {
        /// HTML file to load
        file: PathBuf,
    },
}
