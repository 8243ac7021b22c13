//! stateclass command-line front end

mod cli;
mod repl;
mod session;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, Commands};
use session::Session;
use stateclass::StateclassConfig;

const CONFIG_ENV: &str = "STATECLASS_CONFIG";

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "stateclass=debug,stateclass_cli=debug,info",
        _ => "stateclass=trace,stateclass_cli=trace,debug",
    };
    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(flag: Option<&Path>) -> Result<StateclassConfig> {
    let path = flag
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

    match path {
        Some(path) => StateclassConfig::load(&path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(StateclassConfig::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Triggers { file } => {
            let session = Session::open(&file, config)?;
            print!("{}", session.describe_triggers());
        }

        Commands::Click {
            file,
            triggers,
            json,
            output,
        } => {
            let mut session = Session::open(&file, config)?;
            let mut reports = Vec::with_capacity(triggers.len());
            for reference in &triggers {
                let report = session
                    .click(reference)
                    .with_context(|| format!("Failed to activate {}", reference))?;
                reports.push(report);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            }

            let html = session.doc.to_html();
            match output {
                Some(path) => std::fs::write(&path, html)
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None if !json => print!("{}", html),
                None => {}
            }
        }

        Commands::Repl { file } => {
            let session = Session::open(&file, config)?;
            repl::run(session)?;
        }
    }

    Ok(())
}
