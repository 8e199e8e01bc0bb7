use crate::domain::TransportMode;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tongs", version, about = "Dependent select updater")]
pub struct Cli {
    /// Config file; defaults to ./.tongs.toml when present
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the browser script asset
    Script(ScriptArgs),
    /// Run one update against a live endpoint and print the dependent select
    Fetch(FetchArgs),
    /// Print the effective configuration
    Config,
}

#[derive(Args, Debug)]
pub struct ScriptArgs {
    /// Output root; the asset lands in <out>/assets/js
    #[arg(long, default_value = "dist")]
    pub out: PathBuf,
    /// Transport mode, overrides config
    #[arg(long)]
    pub mode: Option<TransportMode>,
}

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Value selected on the source control
    pub value: String,
    /// Transport mode, overrides config
    #[arg(long)]
    pub mode: Option<TransportMode>,
    /// Site base URL, overrides config
    #[arg(long)]
    pub base_url: Option<String>,
    /// CSRF token to send in post mode
    #[arg(long, conflicts_with = "cookie")]
    pub csrf_token: Option<String>,
    /// Cookie string, e.g. "sessionid=...; csrftoken=..."
    #[arg(long)]
    pub cookie: Option<String>,
}
