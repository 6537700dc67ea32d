use std::path::PathBuf;

use clap::Parser;

use crate::cli::{Commands, HELP_TEMPLATE};

#[derive(Parser, Debug)]
#[command(
    name = "redlite",
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None
)]
#[command(after_help = HELP_TEMPLATE.replace("%BINARY_NAME%", "redlite"))]
pub struct Cli {
    /// Directory holding the database (created on first write).
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Bucket to operate on
    #[arg(short = 'b', long, global = true, default_value = "0")]
    pub bucket: String,

    /// Open the database without write access
    #[arg(long, global = true)]
    pub read_only: bool,

    /// Tracing filter, e.g. `debug` or `redlite=trace`
    #[arg(long, global = true, default_value = "warn", value_name = "LEVEL")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}
