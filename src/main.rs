mod menu;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use schoolbook::store::Store;

#[derive(Parser)]
#[command(name = "schoolbook")]
#[command(about = "Menu-driven school records manager backed by SQLite")]
struct Cli {
    /// Directory holding the database file (created if missing)
    #[arg(short, long, default_value = ".")]
    data_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    let store = Store::open(&cli.data_dir)?;
    tracing::info!(data_dir = %cli.data_dir.display(), "database opened");

    let stdin = io::stdin();
    menu::run(&store, &mut stdin.lock())?;

    store.close()?;
    tracing::info!("database closed");
    Ok(())
}
