//! Mocparts - parts lists for brick models.
//!
//! Reads a model described either as a line-oriented LDraw document
//! (`.mpd`/`.ldr`) or as an LXFML scene, flattens nested sub-models, and
//! counts the concrete parts by `(color, part)`.

pub mod aggregate;
pub mod config;
pub mod format;
pub mod lxfml;
pub mod report;

mod error;

pub use mocparts_core::{color, model, part, trace};
pub use mocparts_parser::encoding;

pub use error::MocError;

use std::{fs, path::Path};

use log::{debug, info};

use mocparts_core::{model::FlatEntry, trace::DiagnosticTrace};

use aggregate::{Aggregator, Inventory};
use config::AppConfig;
use format::InputFormat;
use lxfml::{ImportError, TranslationTable};
use report::PartsReport;

/// Builder for turning model files into parts lists.
///
/// The builder holds the configuration and can be reused for any number of
/// inputs; every load runs an independent pipeline with its own trace.
///
/// # Examples
///
/// ```
/// use mocparts::{InventoryBuilder, color::ColorId, part::PartId};
///
/// let source = "\
/// 0 FILE main.ldr
/// 1 4 0 0 0 1 0 0 0 1 0 0 0 1 3001.dat
/// 1 4 0 0 0 1 0 0 0 1 0 0 0 1 3001.dat
/// 0 NOFILE
/// ";
///
/// let parts = InventoryBuilder::default()
///     .load_str(source)
///     .expect("Failed to load");
///
/// assert_eq!(parts.inventory().count(&ColorId::new("4"), &PartId::new("3001")), 2);
/// ```
#[derive(Debug, Default)]
pub struct InventoryBuilder {
    config: AppConfig,
}

impl InventoryBuilder {
    /// Create a new builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Read and process a model file.
    ///
    /// # Errors
    ///
    /// Returns [`MocError::Io`] if the file cannot be read, and any error of
    /// [`InventoryBuilder::load_bytes`].
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<PartsList, MocError> {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading input file");

        let bytes = fs::read(path)?;
        let mut trace = DiagnosticTrace::new();
        trace.info(format!("Loading File {}", path.display()));
        self.process(&bytes, trace)
    }

    /// Process raw document bytes.
    ///
    /// The dialect is detected from the leading bytes and the text encoding
    /// is probed before parsing.
    ///
    /// # Errors
    ///
    /// Returns [`MocError::Parse`] for malformed LDraw documents,
    /// [`MocError::Import`] for LXFML problems (including a missing
    /// translation table) and [`MocError::Config`] for invalid settings.
    pub fn load_bytes(&self, bytes: &[u8]) -> Result<PartsList, MocError> {
        let mut trace = DiagnosticTrace::new();
        trace.info("Loading File");
        self.process(bytes, trace)
    }

    /// Process document text.
    ///
    /// # Errors
    ///
    /// See [`InventoryBuilder::load_bytes`].
    pub fn load_str(&self, source: &str) -> Result<PartsList, MocError> {
        self.load_bytes(source.as_bytes())
    }

    fn process(&self, bytes: &[u8], mut trace: DiagnosticTrace) -> Result<PartsList, MocError> {
        let format = InputFormat::detect(bytes);
        trace.info(format!("Format: {format}"));

        let decoded = encoding::probe(bytes);
        trace.info(format!("Encoding: {}", decoded.encoding));

        let entries = match format {
            InputFormat::Mpd => self.flatten_document(&decoded.text, &mut trace)?,
            InputFormat::Lxfml => self.import_scene(&decoded.text, &mut trace)?,
        };

        let aggregator = Aggregator::new(self.config.inventory().exclusions());
        let inventory = aggregator.aggregate(entries, &mut trace);

        trace.info("File loaded successfully.");
        info!(format = format.name(), parts = inventory.total(); "Input processed");

        Ok(PartsList {
            format,
            inventory,
            trace,
        })
    }

    fn flatten_document(
        &self,
        text: &str,
        trace: &mut DiagnosticTrace,
    ) -> Result<Vec<FlatEntry>, MocError> {
        let resolve_config = self
            .config
            .resolve()
            .to_resolve_config()
            .map_err(MocError::Config)?;

        let models = mocparts_parser::parse_document(text, trace)
            .map_err(|err| MocError::new_parse_error(err, text))?;
        if models.is_empty() {
            trace.warn("No models found");
            return Ok(Vec::new());
        }

        let resolution = mocparts_parser::flatten(&models, &resolve_config, trace)
            .map_err(|err| MocError::new_parse_error(err, text))?;
        debug!(passes = resolution.passes; "Document flattened");

        Ok(resolution.entries)
    }

    fn import_scene(
        &self,
        text: &str,
        trace: &mut DiagnosticTrace,
    ) -> Result<Vec<FlatEntry>, MocError> {
        let path = self
            .config
            .lxfml()
            .translation_table()
            .ok_or(ImportError::MissingTable)?;

        let table = TranslationTable::load(path)?;
        table.describe(trace);

        Ok(lxfml::import(text, &table, trace)?)
    }
}

/// The result of processing one input.
#[derive(Debug, Clone)]
pub struct PartsList {
    format: InputFormat,
    inventory: Inventory,
    trace: DiagnosticTrace,
}

impl PartsList {
    /// The detected input dialect.
    pub fn format(&self) -> InputFormat {
        self.format
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn trace(&self) -> &DiagnosticTrace {
        &self.trace
    }

    /// Build the serializable report.
    pub fn report(&self) -> PartsReport {
        PartsReport::new(&self.inventory, &self.trace)
    }
}
