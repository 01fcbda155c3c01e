use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "msel", about = concat!("msel v", env!("CARGO_PKG_VERSION"), " - searchable multi-value picker"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file (TOML) with [network] and [log] tables
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the picker from a markup file in the terminal
    Pick(PickArgs),
    /// Hydrate a markup file and print the re-rendered widget regions
    Render(RenderArgs),
}

#[derive(Args)]
pub struct PickArgs {
    /// HTML page or fragment containing the widget
    pub markup: PathBuf,
}

#[derive(Args)]
pub struct RenderArgs {
    /// HTML page or fragment containing the widget
    pub markup: PathBuf,

    /// Toggle an item by id before rendering (repeatable)
    #[arg(long = "select", value_name = "ID")]
    pub select: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
