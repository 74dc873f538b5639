//! CLI logic for the mocparts tool.
//!
//! This module contains the core CLI logic: load the configuration, process
//! the input model and write the JSON parts report.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    io::{self, Write},
};

use log::info;

use mocparts::{InventoryBuilder, MocError};

/// Run the mocparts CLI application
///
/// This function processes the input file and writes the parts report to
/// the output file, or to stdout when no output path is given.
///
/// # Errors
///
/// Returns `MocError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - LXFML import errors
pub fn run(args: &Args) -> Result<(), MocError> {
    info!(
        input_path = args.input,
        output_path:? = args.output;
        "Processing model"
    );

    // Load configuration
    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(table) = &args.table {
        app_config = app_config.with_translation_table(table);
    }

    let builder = InventoryBuilder::new(app_config);
    let parts = builder.load_path(&args.input)?;
    let json = parts.report().to_json_pretty()?;

    match &args.output {
        Some(output) => {
            fs::write(output, json)?;
            info!(output_file = output; "Report written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }

    Ok(())
}
