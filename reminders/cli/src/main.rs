use clap::{Parser, Subcommand};
use reminders_cli::{ClientStore, HttpItemApi, view};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "reminders", about = "Manage reminders on a reminders server")]
struct Cli {
    /// Server address
    #[arg(long, global = true, default_value = "http://127.0.0.1:8080")]
    base_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
enum Commands {
    /// Show all items, newest first
    List,
    /// Add a new item
    Add { text: String },
    /// Flip an item between open and completed
    Toggle { id: i32 },
    /// Delete an item
    Delete { id: i32 },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    let mut store = ClientStore::new(HttpItemApi::new(args.base_url));

    store.load().await;
    if store.state().error.is_none() {
        match args.command {
            Commands::List => {}
            Commands::Add { text } => store.add(&text).await,
            Commands::Toggle { id } => store.toggle(id).await,
            Commands::Delete { id } => store.delete(id).await,
        }
    }

    print!("{}", view::render(store.state()));

    if store.state().error.is_some() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
