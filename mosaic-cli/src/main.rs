//! mosaic - justified image-grid layout from the command line.

mod cli;
mod commands;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use mosaic_kernel::{GalleryConfig, PrefStore};

use crate::cli::{Args, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::setup_logging(args.verbose);

    let output = match &args.command {
        Command::Layout(layout) => {
            // A missing home directory only costs the saved column count here.
            let store = match &args.prefs {
                Some(path) => Some(PrefStore::open(path)),
                None => PrefStore::open_default()
                    .inspect_err(|e| tracing::warn!("Failed to open preference store: {}", e))
                    .ok(),
            };
            commands::run_layout(layout, store).await?
        }
        Command::Columns { value } => {
            let store = match &args.prefs {
                Some(path) => PrefStore::open(path),
                None => PrefStore::open_default().context("Failed to locate preference file")?,
            };
            commands::run_columns(*value, &store, &GalleryConfig::default())?
        }
    };

    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}
