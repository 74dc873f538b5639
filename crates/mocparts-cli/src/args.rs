//! Command-line argument definitions for the mocparts CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, the LXFML translation table, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the mocparts tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input model (.mpd, .ldr or .lxfml)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output JSON file. The report goes to stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Path to the ldraw.xml translation table, overriding the configuration
    #[arg(short, long)]
    pub table: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
