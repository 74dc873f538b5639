//! The models of one document.

use indexmap::IndexMap;

use mocparts_core::model::{ModelName, RawEntry};

/// Model name to ordered entries, plus the root model.
///
/// Models keep the order in which they were first sealed, so diagnostics are
/// reproducible. Only the collector builds a map; afterwards it is read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelMap {
    models: IndexMap<ModelName, Vec<RawEntry>>,
    root: Option<ModelName>,
}

impl ModelMap {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Store `entries` under `name`, replacing an earlier model of that name.
    pub(crate) fn seal(&mut self, name: ModelName, entries: Vec<RawEntry>) -> Option<Vec<RawEntry>> {
        self.models.insert(name, entries)
    }

    /// Record the root model. Only the first call has an effect.
    pub(crate) fn set_root(&mut self, name: &ModelName) {
        if self.root.is_none() {
            self.root = Some(name.clone());
        }
    }

    /// Name of the root model, if any model was opened.
    pub fn root(&self) -> Option<&ModelName> {
        self.root.as_ref()
    }

    /// Entries of the root model.
    pub fn root_entries(&self) -> Option<&[RawEntry]> {
        self.root.as_ref().and_then(|root| self.get(root))
    }

    /// Entries of the model called `name`.
    pub fn get(&self, name: &ModelName) -> Option<&[RawEntry]> {
        self.models.get(name).map(Vec::as_slice)
    }

    /// Number of models.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Iterate over the models in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ModelName, &[RawEntry])> {
        self.models.iter().map(|(name, entries)| (name, entries.as_slice()))
    }
}
