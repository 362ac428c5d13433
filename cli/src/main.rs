//! roster - query a collection endpoint and list the names it returns.
//!
//! The binary is deliberately thin wiring: it constructs one
//! [`Directory`] (no ambient shared instance), hands it to a [`Binder`]
//! over a line-oriented surface, and drives submissions either from a
//! one-shot `--query` flag or an interactive prompt loop.

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use config::RosterConfig;
use roster_client::{ClientConfig, Directory};
use roster_ui::{Binder, Surface};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use url::Url;

const DEFAULT_ENDPOINT: &str = "https://www.fictionalapi.xyz/endpoint";

#[derive(Parser, Debug)]
#[command(
    name = "roster",
    version,
    about = "Query a collection endpoint and list the names it returns"
)]
struct Cli {
    /// Collection endpoint base URL (overrides the config file).
    #[arg(long)]
    endpoint: Option<Url>,

    /// Run a single query and exit instead of prompting interactively.
    #[arg(long)]
    query: Option<String>,

    /// Path to a roster.toml config file.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::try_new("warn").expect("warn filter is valid"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

/// Line-oriented stand-in for the form and list this pattern is usually
/// wired to: the input is whatever line the user last entered, and appended
/// items become bullet lines on stdout.
#[derive(Default)]
struct LineSurface {
    input: String,
}

impl Surface for LineSurface {
    fn input_value(&self) -> String {
        self.input.clone()
    }

    fn append_item(&mut self, text: &str) {
        println!("  - {text}");
    }
}

fn resolve_directory(cli: &Cli, file: &RosterConfig) -> Result<Directory> {
    let endpoint = match (&cli.endpoint, &file.endpoint) {
        (Some(url), _) => url.clone(),
        (None, Some(raw)) => Url::parse(raw)
            .with_context(|| format!("config endpoint is not a valid URL: {raw}"))?,
        (None, None) => Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
    };

    let mut client_config = ClientConfig::new(endpoint);
    if let Some(secs) = file.timeout_secs {
        client_config = client_config.with_request_timeout(Duration::from_secs(secs));
    }
    Ok(Directory::new(client_config))
}

async fn run_once(binder: &mut Binder<LineSurface>, directory: &Directory, query: String) {
    binder.surface_mut().input = query;
    binder.submit(directory).await;
}

async fn run_interactive(binder: &mut Binder<LineSurface>, directory: &Directory) -> Result<()> {
    let stdin = io::stdin();
    loop {
        print!("query> ");
        io::stdout().flush().context("failed to flush prompt")?;

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("failed to read query")?;
        if read == 0 {
            // EOF
            return Ok(());
        }

        let query = line.trim_end_matches(['\r', '\n']);
        if query.is_empty() {
            return Ok(());
        }

        run_once(binder, directory, query.to_string()).await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let file_config = match &cli.config {
        Some(path) => RosterConfig::load(path)?,
        None => RosterConfig::load_default()?,
    };

    let directory = resolve_directory(&cli, &file_config)?;
    tracing::debug!(endpoint = %directory.config().endpoint(), "resolved endpoint");

    let mut binder = Binder::new(LineSurface::default());
    match cli.query {
        Some(query) => run_once(&mut binder, &directory, query).await,
        None => run_interactive(&mut binder, &directory).await?,
    }

    Ok(())
}
