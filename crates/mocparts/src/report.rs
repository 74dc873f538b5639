//! Serializable parts report.

use serde::Serialize;

use mocparts_core::{color::ColorId, part::PartId, trace::DiagnosticTrace};

use crate::aggregate::Inventory;

/// Part type of every report line: a loose part.
pub const LOOSE_PART: u8 = 1;

/// One line of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartRecord {
    pub id: PartId,
    pub color: ColorId,
    pub qty: usize,
    #[serde(rename = "type")]
    pub kind: u8,
}

/// The counted parts plus the diagnostic trace of the run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PartsReport {
    pub parts: Vec<PartRecord>,
    pub msg: Vec<String>,
}

impl PartsReport {
    pub fn new(inventory: &Inventory, trace: &DiagnosticTrace) -> Self {
        let parts = inventory
            .iter()
            .map(|(color, part, qty)| PartRecord {
                id: part.clone(),
                color: color.clone(),
                qty,
                kind: LOOSE_PART,
            })
            .collect();

        Self {
            parts,
            msg: trace.to_strings(),
        }
    }

    /// Serialize to compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use mocparts_core::model::FlatEntry;

    use super::*;
    use crate::aggregate::Aggregator;

    #[test]
    fn test_report_json() {
        let mut trace = DiagnosticTrace::new();
        trace.info("Format: MPD");
        let inventory = Aggregator::default().aggregate(
            [
                FlatEntry::new(ColorId::new("4"), PartId::new("3001")),
                FlatEntry::new(ColorId::new("4"), PartId::new("3001")),
            ],
            &mut trace,
        );
        trace.warn("Submodel z not found");

        let json = PartsReport::new(&inventory, &trace)
            .to_json()
            .expect("report should serialize");

        assert_eq!(
            json,
            r#"{"parts":[{"id":"3001","color":"4","qty":2,"type":1}],"msg":["Format: MPD","Final part count = 2","WARNING: Submodel z not found"]}"#
        );
    }
}
