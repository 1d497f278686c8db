//! Pattern dispatch CLI.
//!
//! Loads an intent catalog and dispatches text against it.
//!
//! ```text
//! catalog.toml → config::load_config → catalog::build_dispatcher
//!     match <TEXT>...   dispatch each argument, print intent + response
//!     check             validate and compile, print a summary
//!     tree              dump the routing tree
//!     repl [--watch]    dispatch stdin lines; hot reload on file change
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};

use pattern_dispatch::catalog::build_dispatcher;
use pattern_dispatch::config::{load_config, watcher::ConfigWatcher, CatalogConfig};
use pattern_dispatch::observability::logging;
use pattern_dispatch::{Dispatcher, SharedDispatcher};

#[derive(Parser)]
#[command(name = "pattern-dispatch")]
#[command(about = "Match text against a catalog of intent templates", long_about = None)]
struct Cli {
    /// Catalog file (TOML).
    #[arg(short, long, default_value = "catalog.toml")]
    catalog: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dispatch each TEXT and print the result
    Match {
        #[arg(required = true)]
        text: Vec<String>,

        /// Print one JSON object per input
        #[arg(long)]
        json: bool,
    },
    /// Validate and compile the catalog
    Check,
    /// Print the routing tree
    Tree,
    /// Dispatch lines read from stdin
    Repl {
        /// Reload the catalog when the file changes
        #[arg(long)]
        watch: bool,
    },
}

#[derive(Serialize)]
struct MatchReport<'a> {
    input: &'a str,
    matched: bool,
    intent: Option<&'a str>,
    template: Option<&'a str>,
    response: Option<&'a str>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.catalog)?;
    logging::init(&config.logging)?;

    tracing::info!(
        catalog = %cli.catalog.display(),
        intents = config.intents.len(),
        "Catalog parsed"
    );

    let dispatcher = build_dispatcher(&config)?;

    match cli.command {
        Commands::Match { text, json } => {
            for input in &text {
                print_match(&dispatcher, input, json)?;
            }
        }
        Commands::Check => {
            println!(
                "{} intents, {} templates compiled (max depth {})",
                config.intents.len(),
                dispatcher.len(),
                dispatcher.max_depth().unwrap_or(1)
            );
        }
        Commands::Tree => {
            println!("{}", dispatcher);
            print!("{}", dispatcher.describe_tree());
        }
        Commands::Repl { watch } => {
            repl(&cli.catalog, dispatcher, watch).await?;
        }
    }

    Ok(())
}

fn print_match(
    dispatcher: &Dispatcher<String>,
    input: &str,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let matched = dispatcher.dispatch(input)?;

    if json {
        let report = MatchReport {
            input,
            matched: matched.is_some(),
            intent: matched.as_ref().map(|m| m.handler_name()),
            template: matched.as_ref().map(|m| m.template()),
            response: matched.as_ref().map(|m| m.value.as_str()),
        };
        println!("{}", serde_json::to_string(&report)?);
        return Ok(());
    }

    match matched {
        Some(m) => println!("{} => [{}] {}", input, m.handler_name(), m.value),
        None => println!("{} => no match", input),
    }
    Ok(())
}

async fn repl(
    path: &Path,
    dispatcher: Dispatcher<String>,
    watch: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let shared = SharedDispatcher::new(dispatcher)?;

    // Keep the watcher alive for the whole session.
    let (_watcher, mut updates) = if watch {
        let (watcher, updates) = ConfigWatcher::new(path);
        (Some(watcher.run()?), Some(updates))
    } else {
        (None, None)
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                match shared.dispatch(input) {
                    Ok(Some(m)) => println!("[{}] {}", m.handler_name(), m.value),
                    Ok(None) => println!("no match"),
                    Err(e) => eprintln!("error: {}", e),
                }
            }
            Some(catalog) = next_update(&mut updates) => {
                reload(&shared, &catalog);
            }
        }
    }

    Ok(())
}

async fn next_update(
    updates: &mut Option<tokio::sync::mpsc::UnboundedReceiver<CatalogConfig>>,
) -> Option<CatalogConfig> {
    match updates {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

fn reload(shared: &SharedDispatcher<String>, catalog: &CatalogConfig) {
    match build_dispatcher(catalog).and_then(|d| shared.store(d)) {
        Ok(()) => tracing::info!(intents = catalog.intents.len(), "Catalog reloaded"),
        Err(e) => tracing::error!(error = %e, "Reload failed; keeping current templates"),
    }
}
