//! # Mocparts Parser
//!
//! Parser for line-oriented brick-model documents (multi-part `.mpd` files
//! and single `.ldr` models). This crate turns document text into a
//! [`ModelMap`] and flattens the root model into concrete part placements.
//!
//! ## Usage
//!
//! ```
//! # use mocparts_core::trace::DiagnosticTrace;
//! # use mocparts_parser::{flatten, parse_document, ParseError, ResolveConfig};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = "\
//! 0 FILE main.ldr
//! 1 4 0 0 0 1 0 0 0 1 0 0 0 1 3001.dat
//! 1 7 0 0 0 1 0 0 0 1 0 0 0 1 wheel.ldr
//! 0 NOFILE
//! 0 FILE wheel.ldr
//! 1 16 0 0 0 1 0 0 0 1 0 0 0 1 3003.dat
//! 0 NOFILE
//! ";
//!
//!     let mut trace = DiagnosticTrace::new();
//!     let models = parse_document(source, &mut trace)?;
//!     let resolution = flatten(&models, &ResolveConfig::default(), &mut trace)?;
//!     assert_eq!(resolution.entries.len(), 2);
//!     Ok(())
//! }
//! ```

mod collect;
pub mod encoding;
pub mod error;
mod fields;
pub mod line;
mod model_map;
pub mod resolve;
mod span;

pub use error::ParseError;
pub use model_map::ModelMap;
pub use resolve::{Resolution, ResolveConfig, Resolver};
pub use span::Span;

use log::info;

use mocparts_core::trace::DiagnosticTrace;

/// Split document text into models.
///
/// The pipeline runs line by line:
///
/// 1. **Lex** - Split each line into whitespace-separated fields
/// 2. **Classify** - Decide what the line means for the collector
/// 3. **Collect** - Partition placements into models
///
/// # Errors
///
/// Returns a [`ParseError`] for the first line that names a model or
/// sub-model without a name, or a PLI block without a target.
pub fn parse_document(source: &str, trace: &mut DiagnosticTrace) -> Result<ModelMap, ParseError> {
    trace.info("Phase 1 - build list of parts and referenced submodels");
    let models = collect::collect(source, trace)?;

    info!(models = models.len(); "Collected models");
    trace.info(format!("Found {} models", models.len()));
    Ok(models)
}

/// Flatten the root model of `models`.
///
/// # Errors
///
/// Returns a [`ParseError`] if the references are cyclic or the root model
/// is missing.
pub fn flatten(
    models: &ModelMap,
    config: &ResolveConfig,
    trace: &mut DiagnosticTrace,
) -> Result<Resolution, ParseError> {
    trace.info("Phase 2 - replace submodel references with list of parts");
    let resolution = Resolver::new(models, config).resolve(trace)?;

    info!(
        passes = resolution.passes,
        expansions = resolution.expansions,
        parts = resolution.entries.len();
        "Flattened root model"
    );
    Ok(resolution)
}
