//! Configuration types for parts list extraction.
//!
//! All types implement [`serde::Deserialize`] and every field has a default,
//! so a configuration file only needs the settings it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining all sections.
//! - [`ResolveOptions`] - The `[resolve]` section: default color and pass limit.
//! - [`InventoryConfig`] - The `[inventory]` section: extra excluded parts.
//! - [`LxfmlConfig`] - The `[lxfml]` section: location of `ldraw.xml`.
//!
//! # Example
//!
//! ```
//! # use mocparts::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.resolve().to_resolve_config().is_ok());
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use mocparts_core::color::ColorId;
use mocparts_parser::ResolveConfig;

use crate::aggregate::ExclusionSet;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Flattening settings.
    #[serde(default)]
    resolve: ResolveOptions,

    /// Counting settings.
    #[serde(default)]
    inventory: InventoryConfig,

    /// LXFML import settings.
    #[serde(default)]
    lxfml: LxfmlConfig,
}

impl AppConfig {
    pub fn new(resolve: ResolveOptions, inventory: InventoryConfig, lxfml: LxfmlConfig) -> Self {
        Self {
            resolve,
            inventory,
            lxfml,
        }
    }

    pub fn resolve(&self) -> &ResolveOptions {
        &self.resolve
    }

    pub fn inventory(&self) -> &InventoryConfig {
        &self.inventory
    }

    pub fn lxfml(&self) -> &LxfmlConfig {
        &self.lxfml
    }

    /// Replace the configured translation table path.
    pub fn with_translation_table(mut self, path: impl Into<PathBuf>) -> Self {
        self.lxfml.translation_table = Some(path.into());
        self
    }
}

fn default_color() -> String {
    ColorId::NO_COLOR.to_string()
}

/// Flattening settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolveOptions {
    /// Color token given to parts that still inherit after flattening.
    #[serde(default = "default_color")]
    default_color: String,

    /// Fixed pass limit. Defaults to the number of models plus one.
    #[serde(default)]
    max_passes: Option<usize>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            max_passes: None,
        }
    }
}

impl ResolveOptions {
    pub fn new(default_color: impl Into<String>, max_passes: Option<usize>) -> Self {
        Self {
            default_color: default_color.into(),
            max_passes,
        }
    }

    /// Validate the settings and build the resolver configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the default color is not a single token, is the
    /// inherit color `16`, or if the pass limit is zero.
    pub fn to_resolve_config(&self) -> Result<ResolveConfig, String> {
        let color: ColorId = self
            .default_color
            .parse()
            .map_err(|err| format!("Invalid default color in config: {err}"))?;
        if color.is_inherit() {
            return Err(format!(
                "Invalid default color in config: `{}` is the inherit color",
                ColorId::INHERIT
            ));
        }
        if self.max_passes == Some(0) {
            return Err("Invalid max_passes in config: must be at least 1".to_string());
        }

        Ok(ResolveConfig::default()
            .with_default_color(color)
            .with_max_passes(self.max_passes))
    }
}

/// Counting settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InventoryConfig {
    /// Part ids excluded in addition to the LSynth hose segments.
    #[serde(default)]
    extra_excluded_parts: Vec<String>,
}

impl InventoryConfig {
    pub fn new(extra_excluded_parts: Vec<String>) -> Self {
        Self {
            extra_excluded_parts,
        }
    }

    pub fn extra_excluded_parts(&self) -> &[String] {
        &self.extra_excluded_parts
    }

    /// The full exclusion set.
    pub fn exclusions(&self) -> ExclusionSet {
        ExclusionSet::lsynth().with_parts(&self.extra_excluded_parts)
    }
}

/// LXFML import settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LxfmlConfig {
    /// Path of the `ldraw.xml` translation table.
    #[serde(default)]
    translation_table: Option<PathBuf>,
}

impl LxfmlConfig {
    pub fn translation_table(&self) -> Option<&Path> {
        self.translation_table.as_deref()
    }
}
