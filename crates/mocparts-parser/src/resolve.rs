//! Sub-model flattening.
//!
//! The resolver starts from the entries of the root model and repeatedly
//! replaces every sub-model reference with the entries of the referenced
//! model. References found inside an expanded model are left for the next
//! pass. Once a pass finds no reference, the work list holds concrete parts
//! only and leftover inherit colors are resolved to the default color.
//!
//! An acyclic set of `n` models is flat after at most `n` passes, so more
//! than `n + 1` passes means some model contains itself.

use indexmap::IndexSet;
use log::debug;

use mocparts_core::{
    color::ColorId,
    model::{FlatEntry, ModelName, RawEntry},
    trace::DiagnosticTrace,
};

use crate::{
    error::{Diagnostic, ErrorCode, ParseError},
    model_map::ModelMap,
};

/// Options for flattening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveConfig {
    default_color: ColorId,
    max_passes: Option<usize>,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            default_color: ColorId::no_color(),
            max_passes: None,
        }
    }
}

impl ResolveConfig {
    /// Set the color given to parts that still inherit after flattening.
    pub fn with_default_color(mut self, color: ColorId) -> Self {
        self.default_color = color;
        self
    }

    /// Set a fixed pass limit instead of the one derived from the model count.
    pub fn with_max_passes(mut self, max_passes: Option<usize>) -> Self {
        self.max_passes = max_passes;
        self
    }

    pub fn default_color(&self) -> &ColorId {
        &self.default_color
    }

    pub fn max_passes(&self) -> Option<usize> {
        self.max_passes
    }
}

/// Result of one substitution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pass {
    /// The work list after the pass.
    pub entries: Vec<RawEntry>,
    /// References met during the pass, found or not.
    pub references: usize,
    /// References that were replaced by a model's entries.
    pub expansions: usize,
}

/// A flattened root model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub entries: Vec<FlatEntry>,
    pub passes: usize,
    pub expansions: usize,
}

/// Flattens the root model of a [`ModelMap`].
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    models: &'a ModelMap,
    config: &'a ResolveConfig,
}

impl<'a> Resolver<'a> {
    pub fn new(models: &'a ModelMap, config: &'a ResolveConfig) -> Self {
        Self { models, config }
    }

    /// Maximum number of passes before the references are declared cyclic.
    pub fn pass_limit(&self) -> usize {
        self.config
            .max_passes
            .unwrap_or_else(|| self.models.len() + 1)
    }

    /// Run a single substitution pass over `entries`.
    pub fn pass(&self, entries: &[RawEntry], trace: &mut DiagnosticTrace) -> Pass {
        let mut next = Vec::with_capacity(entries.len());
        let mut references = 0;
        let mut expansions = 0;

        for entry in entries {
            let RawEntry::SubModelRef {
                override_color,
                model_name,
            } = entry
            else {
                next.push(entry.clone());
                continue;
            };

            references += 1;
            let override_color = override_color.clone().and_then(ColorId::into_override);

            let Some(model) = self.models.get(model_name) else {
                trace.warn(format!("Submodel {model_name} not found"));
                continue;
            };

            trace.info(format!(
                "Expanding submodel {model_name} color {} ({} entries)",
                override_color.as_ref().map_or(ColorId::INHERIT, ColorId::as_str),
                model.len()
            ));
            next.extend(
                model
                    .iter()
                    .map(|child| child.instantiate(override_color.as_ref())),
            );
            expansions += 1;
        }

        Pass {
            entries: next,
            references,
            expansions,
        }
    }

    /// Flatten the root model.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorCode::E200`] if the root model has no definition and
    /// [`ErrorCode::E100`] if the pass limit is exceeded.
    pub fn resolve(&self, trace: &mut DiagnosticTrace) -> Result<Resolution, ParseError> {
        let Some(root) = self.models.root() else {
            return Ok(Resolution {
                entries: Vec::new(),
                passes: 0,
                expansions: 0,
            });
        };
        let Some(root_entries) = self.models.get(root) else {
            return Err(Diagnostic::new(ErrorCode::E200, "root model has no definition")
                .in_model(root)
                .into());
        };

        let limit = self.pass_limit();
        let mut entries = root_entries.to_vec();
        let mut passes = 0;
        let mut expansions = 0;

        loop {
            if passes >= limit {
                return Err(self.cycle_error(&entries, limit).into());
            }

            let pass = self.pass(&entries, trace);
            passes += 1;
            expansions += pass.expansions;
            debug!(
                pass = passes,
                references = pass.references,
                expansions = pass.expansions,
                entries = pass.entries.len();
                "Resolver pass finished"
            );
            entries = pass.entries;

            if pass.references == 0 {
                break;
            }
        }

        let default_color = &self.config.default_color;
        Ok(Resolution {
            entries: entries
                .into_iter()
                .filter_map(|entry| entry.into_flat(default_color))
                .collect(),
            passes,
            expansions,
        })
    }

    fn cycle_error(&self, pending: &[RawEntry], limit: usize) -> Diagnostic {
        let names: IndexSet<&ModelName> = pending
            .iter()
            .filter_map(|entry| match entry {
                RawEntry::SubModelRef { model_name, .. } => Some(model_name),
                RawEntry::DirectPart { .. } => None,
            })
            .collect();
        let names = names
            .iter()
            .map(|name| format!("`{name}`"))
            .collect::<Vec<_>>()
            .join(", ");

        Diagnostic::new(
            ErrorCode::E100,
            format!(
                "sub-model references did not resolve after {limit} passes; still pending: {names}"
            ),
        )
        .with_help("a model must not contain itself, directly or through other models")
    }
}


#[cfg(test)]
mod proptest_tests {
    use mocparts_core::part::PartId;
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    /// Raw material for one entry: reference flag, color code, target pick.
    type EntrySeed = (bool, u8, usize);

    fn model_name(index: usize) -> ModelName {
        ModelName::new(format!("m{index}.ldr"))
    }

    /// Build an acyclic map where model `i` only references models `j > i`.
    fn build_map(seeds: Vec<Vec<EntrySeed>>) -> ModelMap {
        let count = seeds.len();
        let mut map = ModelMap::new();

        for (index, model_seeds) in seeds.into_iter().enumerate() {
            let entries = model_seeds
                .into_iter()
                .map(|(is_ref, color, pick)| {
                    let later = count - index - 1;
                    if is_ref && later > 0 {
                        let target = index + 1 + pick % later;
                        let color = (color % 3 != 0).then(|| ColorId::new(color.to_string()));
                        RawEntry::reference(color, model_name(target))
                    } else {
                        let color = if color < 6 {
                            ColorId::inherit()
                        } else {
                            ColorId::new(color.to_string())
                        };
                        RawEntry::part(color, PartId::new(format!("{}", 3000 + pick % 8)))
                    }
                })
                .collect();

            let name = model_name(index);
            map.set_root(&name);
            map.seal(name, entries);
        }
        map
    }

    fn model_map_strategy() -> impl Strategy<Value = ModelMap> {
        let seed = (any::<bool>(), 0u8..24, 0usize..64);
        proptest::collection::vec(proptest::collection::vec(seed, 0..5), 1..6).prop_map(build_map)
    }

    fn flat_map_strategy() -> impl Strategy<Value = ModelMap> {
        let seed = (Just(false), 0u8..24, 0usize..64);
        proptest::collection::vec(seed, 0..12).prop_map(|seeds| build_map(vec![seeds]))
    }

    /// Number of parts a model contributes once flattened.
    fn expected_count(map: &ModelMap, name: &ModelName) -> usize {
        map.get(name).map_or(0, |entries| {
            entries
                .iter()
                .map(|entry| match entry {
                    RawEntry::DirectPart { .. } => 1,
                    RawEntry::SubModelRef { model_name, .. } => expected_count(map, model_name),
                })
                .sum()
        })
    }

    fn run(map: &ModelMap) -> Result<Resolution, TestCaseError> {
        let config = ResolveConfig::default();
        Resolver::new(map, &config)
            .resolve(&mut DiagnosticTrace::new())
            .map_err(|err| TestCaseError::fail(err.to_string()))
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Acyclic maps resolve within the pass limit and never leave an inherit color.
    fn check_acyclic_maps_resolve(map: ModelMap) -> Result<(), TestCaseError> {
        let resolution = run(&map)?;
        prop_assert!(resolution.passes <= map.len() + 1);
        for entry in &resolution.entries {
            prop_assert!(!entry.color().is_inherit(), "inherit survived: {entry:?}");
        }
        Ok(())
    }

    /// Flattening keeps every part reachable from the root, once per placement.
    fn check_part_count_is_conserved(map: ModelMap) -> Result<(), TestCaseError> {
        let resolution = run(&map)?;
        let root = map.root().cloned().unwrap_or_else(ModelName::unnamed);
        prop_assert_eq!(resolution.entries.len(), expected_count(&map, &root));
        Ok(())
    }

    /// Another pass over the resolved parts expands nothing.
    fn check_resolution_is_fixed_point(map: ModelMap) -> Result<(), TestCaseError> {
        let resolution = run(&map)?;
        let parts: Vec<RawEntry> = resolution
            .entries
            .iter()
            .map(|entry| RawEntry::part(entry.color().clone(), entry.part().clone()))
            .collect();

        let config = ResolveConfig::default();
        let pass = Resolver::new(&map, &config).pass(&parts, &mut DiagnosticTrace::new());
        prop_assert_eq!(pass.references, 0);
        prop_assert_eq!(pass.entries, parts);
        Ok(())
    }

    /// A model without references resolves to its own parts, in order.
    fn check_flat_model_is_unchanged(map: ModelMap) -> Result<(), TestCaseError> {
        let resolution = run(&map)?;
        let expected: Vec<FlatEntry> = map
            .root_entries()
            .unwrap_or_default()
            .iter()
            .filter_map(|entry| entry.clone().into_flat(&ColorId::no_color()))
            .collect();
        prop_assert_eq!(resolution.passes, 1);
        prop_assert_eq!(resolution.entries, expected);
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn acyclic_maps_resolve(map in model_map_strategy()) {
            check_acyclic_maps_resolve(map)?;
        }

        #[test]
        fn part_count_is_conserved(map in model_map_strategy()) {
            check_part_count_is_conserved(map)?;
        }

        #[test]
        fn resolution_is_fixed_point(map in model_map_strategy()) {
            check_resolution_is_fixed_point(map)?;
        }

        #[test]
        fn flat_model_is_unchanged(map in flat_map_strategy()) {
            check_flat_model_is_unchanged(map)?;
        }
    }
}
