//! Counting flat entries into a parts inventory.

use indexmap::{IndexMap, IndexSet};
use log::debug;

use mocparts_core::{color::ColorId, model::FlatEntry, part::PartId, trace::DiagnosticTrace};

/// Part ids generated by LSynth for flexible hose segments. They are not
/// real parts and are never counted.
pub const LSYNTH_PARTS: [&str; 28] = [
    "79", "80", "LS00", "LS01", "LS02", "LS03", "LS04", "LS05", "LS06", "LS07", "LS08", "LS09",
    "LS10", "LS11", "LS20", "LS20C", "LS21", "LS22", "LS23", "LS30", "LS40", "LS41", "LS50",
    "LS51", "LS60", "LS61", "LS70", "LS71",
];

/// Key of an inventory line: the color token and the upper-cased part id.
pub type AggregateKey = (ColorId, String);

/// Case-insensitive set of excluded part ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSet {
    parts: IndexSet<String>,
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self::lsynth()
    }
}

impl ExclusionSet {
    /// The LSynth hose segment set.
    pub fn lsynth() -> Self {
        Self::empty().with_parts(LSYNTH_PARTS)
    }

    /// A set that excludes nothing.
    pub fn empty() -> Self {
        Self {
            parts: IndexSet::new(),
        }
    }

    /// Add more part ids to the set.
    pub fn with_parts<I, S>(mut self, parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.parts.extend(
            parts
                .into_iter()
                .map(|part| PartId::new(part).canonical()),
        );
        self
    }

    /// Returns `true` if `part` is excluded.
    pub fn contains(&self, part: &PartId) -> bool {
        self.parts.contains(&part.canonical())
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// One counted `(color, part)` line. `part` is the first spelling seen.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Tally {
    part: PartId,
    count: usize,
}

/// Counted parts, in order of first appearance.
///
/// Part ids are matched ignoring case, the way LDraw file names are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    counts: IndexMap<AggregateKey, Tally>,
    total: usize,
}

impl Inventory {
    /// Count for a color and part, zero if absent.
    pub fn count(&self, color: &ColorId, part: &PartId) -> usize {
        self.counts
            .get(&(color.clone(), part.canonical()))
            .map_or(0, |tally| tally.count)
    }

    /// Iterate over `(color, part)` lines and their counts.
    pub fn iter(&self) -> impl Iterator<Item = (&ColorId, &PartId, usize)> {
        self.counts
            .iter()
            .map(|((color, _), tally)| (color, &tally.part, tally.count))
    }

    /// Number of retained entries, i.e. the sum of all counts.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct `(color, part)` lines.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    fn add(&mut self, color: ColorId, part: PartId) {
        let key = (color, part.canonical());
        self.counts
            .entry(key)
            .or_insert_with(|| Tally { part, count: 0 })
            .count += 1;
        self.total += 1;
    }
}

/// Counts flat entries, skipping excluded parts.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    exclusions: ExclusionSet,
}

impl Aggregator {
    pub fn new(exclusions: ExclusionSet) -> Self {
        Self { exclusions }
    }

    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    /// Count `entries` and write the final count to `trace`.
    pub fn aggregate(
        &self,
        entries: impl IntoIterator<Item = FlatEntry>,
        trace: &mut DiagnosticTrace,
    ) -> Inventory {
        let mut inventory = Inventory::default();
        let mut excluded = 0;

        for entry in entries {
            if self.exclusions.contains(entry.part()) {
                excluded += 1;
                continue;
            }
            let (color, part) = entry.into_parts();
            inventory.add(color, part);
        }

        debug!(
            lines = inventory.len(),
            total = inventory.total(),
            excluded;
            "Aggregated parts"
        );
        trace.info(format!("Final part count = {}", inventory.total()));
        inventory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(color: &str, id: &str) -> FlatEntry {
        FlatEntry::new(ColorId::new(color), PartId::new(id))
    }

    #[test]
    fn test_counts_pairs_in_first_appearance_order() {
        let mut trace = DiagnosticTrace::new();
        let inventory = Aggregator::default().aggregate(
            [
                flat("4", "3001"),
                flat("-1", "3002"),
                flat("4", "3001"),
                flat("1", "3001"),
            ],
            &mut trace,
        );

        let lines: Vec<_> = inventory
            .iter()
            .map(|(color, part, count)| (color.as_str(), part.as_str(), count))
            .collect();
        assert_eq!(lines, [("4", "3001", 2), ("-1", "3002", 1), ("1", "3001", 1)]);
        assert_eq!(inventory.total(), 4);
        assert_eq!(trace.to_strings(), ["Final part count = 4"]);
    }

    #[test]
    fn test_part_ids_differing_in_case_share_a_line() {
        let inventory = Aggregator::default().aggregate(
            [
                flat("15", "3626bp01"),
                flat("15", "3626BP01"),
                flat("14", "3626BP01"),
            ],
            &mut DiagnosticTrace::new(),
        );

        let lines: Vec<_> = inventory
            .iter()
            .map(|(color, part, count)| (color.as_str(), part.as_str(), count))
            .collect();
        assert_eq!(lines, [("15", "3626bp01", 2), ("14", "3626BP01", 1)]);
        assert_eq!(inventory.count(&ColorId::new("15"), &PartId::new("3626Bp01")), 2);
    }

    #[test]
    fn test_lsynth_parts_are_excluded_ignoring_case() {
        let inventory = Aggregator::default().aggregate(
            [flat("0", "LS01"), flat("0", "ls20c"), flat("0", "79"), flat("0", "3001")],
            &mut DiagnosticTrace::new(),
        );

        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory.count(&ColorId::new("0"), &PartId::new("3001")), 1);
        assert_eq!(inventory.count(&ColorId::new("0"), &PartId::new("LS01")), 0);
    }

    #[test]
    fn test_extra_exclusions() {
        let exclusions = ExclusionSet::lsynth().with_parts(["3001"]);
        assert_eq!(exclusions.len(), LSYNTH_PARTS.len() + 1);

        let inventory = Aggregator::new(exclusions)
            .aggregate([flat("4", "3001"), flat("4", "3002")], &mut DiagnosticTrace::new());
        assert_eq!(inventory.total(), 1);
    }

    #[test]
    fn test_empty_exclusions_count_everything() {
        let inventory = Aggregator::new(ExclusionSet::empty())
            .aggregate([flat("0", "LS01")], &mut DiagnosticTrace::new());
        assert_eq!(inventory.total(), 1);
    }
}
