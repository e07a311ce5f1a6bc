//! Command-line definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "reveal")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Apply scroll reveals, ticker, counters and tab panels to a rendered page")]
pub struct Cli {
    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Enhance an HTML page and write the result
    Enhance(EnhanceArgs),
    /// Scroll through a page and print when each element is revealed
    Trace(TraceArgs),
    /// Print the built-in tab panel catalog as RON
    Panels {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
pub struct EnhanceArgs {
    /// Rendered HTML page
    pub input: PathBuf,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// RON panel catalog replacing the built-in one
    #[arg(long)]
    pub panels: Option<PathBuf>,

    /// Virtual milliseconds to run after init before writing
    #[arg(long, default_value_t = 0)]
    pub settle_ms: u64,

    /// Seed for counter jitter
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
}

#[derive(Debug, Args)]
pub struct TraceArgs {
    /// Rendered HTML page
    pub input: PathBuf,

    #[arg(long, default_value_t = 800.0)]
    pub viewport_height: f64,

    /// Pixels scrolled per step
    #[arg(long, default_value_t = 200.0)]
    pub scroll_step: f64,

    /// Virtual milliseconds between scroll steps
    #[arg(long, default_value_t = 250)]
    pub step_ms: u64,

    /// RON panel catalog replacing the built-in one
    #[arg(long)]
    pub panels: Option<PathBuf>,

    /// Seed for counter jitter
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Print the timeline as JSON
    #[arg(long)]
    pub json: bool,
}
