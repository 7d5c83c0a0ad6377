use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(author, version, about = "Justified image-grid layout", long_about = None)]
pub struct Args {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Preference file (defaults to ~/.mosaic/prefs.json)
    #[arg(long, global = true)]
    pub prefs: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Lay out a directory of images or a list of aspect ratios
    Layout(LayoutArgs),

    /// Show or set the saved column count
    Columns {
        /// New column count
        value: Option<usize>,
    },
}

#[derive(clap::Args, Debug)]
#[command(group(clap::ArgGroup::new("source").required(true).args(["dir", "ratios"])))]
pub struct LayoutArgs {
    /// Directory of images, laid out newest first
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Comma-separated aspect ratios, e.g. "16/9,1/1,3:2"
    #[arg(long, value_delimiter = ',')]
    pub ratios: Option<Vec<String>>,

    /// Container width in pixels
    #[arg(long)]
    pub width: f32,

    /// Items per row (defaults to the saved preference)
    #[arg(long)]
    pub columns: Option<usize>,

    /// Gap between items in pixels
    #[arg(long)]
    pub gap: Option<f32>,

    /// Aspect ratio assumed for the empty slots of the last row
    #[arg(long)]
    pub placeholder: Option<f64>,

    /// JSON config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
