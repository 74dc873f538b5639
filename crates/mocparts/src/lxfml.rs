//! LXFML scene import.
//!
//! LXFML is the XML scene format of LEGO Digital Designer. It names parts by
//! design id and colors by material id. The `ldraw.xml` translation table maps
//! both to LDraw numbers, and maps decoration ids to printed part ids.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use log::{debug, info};
use roxmltree::{Document, Node};
use thiserror::Error;

use mocparts_core::{color::ColorId, model::FlatEntry, part::PartId, trace::DiagnosticTrace};

/// Errors raised while importing an LXFML scene.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("LXFML input needs a translation table (ldraw.xml), but none is configured")]
    MissingTable,

    #[error("Failed to read translation table {path}: {source}")]
    TableIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed XML in {document}: {source}")]
    Xml {
        document: &'static str,
        #[source]
        source: roxmltree::Error,
    },

    #[error("LXFML document has no `Bricks` element")]
    MissingBricks,

    #[error("`{element}` element is missing the `{attribute}` attribute")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("Decoration `{0}` maps to an empty part name")]
    BlankDecoration(String),
}

/// The `ldraw.xml` translation table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable {
    comment: Option<String>,
    colors: IndexMap<String, String>,
    bricks: IndexMap<String, String>,
    decorations: IndexMap<String, String>,
}

impl TranslationTable {
    /// Parse a translation table document.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::Xml`] if the document is not well-formed.
    pub fn parse(xml: &str) -> Result<Self, ImportError> {
        let doc = Document::parse(xml).map_err(|source| ImportError::Xml {
            document: "translation table",
            source,
        })?;
        let root = doc.root_element();

        let mut table = Self {
            comment: root.attribute("comment").map(str::to_string),
            ..Self::default()
        };

        for child in root.children().filter(|node| node.is_element()) {
            let (map, target) = match child.tag_name().name() {
                "Material" => (&mut table.colors, "ldraw"),
                "Brick" => (&mut table.bricks, "ldraw"),
                "Decoration" => (&mut table.decorations, "rb"),
                _ => continue,
            };

            match (child.attribute("lego"), child.attribute(target)) {
                (Some(lego), Some(value)) => {
                    map.insert(lego.to_string(), value.to_string());
                }
                _ => debug!(
                    element = child.tag_name().name(),
                    position = child.range().start;
                    "Skipping incomplete translation entry"
                ),
            }
        }

        Ok(table)
    }

    /// Read and parse a translation table file.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::TableIo`] if the file cannot be read and
    /// [`ImportError::Xml`] if it is not well-formed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ImportError> {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading translation table");

        let xml = fs::read_to_string(path).map_err(|source| ImportError::TableIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&xml)
    }

    /// The table's `comment` attribute, usually its version.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// LDraw color for an LDD material id.
    pub fn color(&self, material: &str) -> Option<&str> {
        self.colors.get(material).map(String::as_str)
    }

    /// LDraw part file for an LDD design id.
    pub fn brick(&self, design_id: &str) -> Option<&str> {
        self.bricks.get(design_id).map(String::as_str)
    }

    /// Printed part id for an LDD decoration id.
    pub fn decoration(&self, decoration: &str) -> Option<&str> {
        self.decorations.get(decoration).map(String::as_str)
    }

    /// Write a summary of the table to `trace`.
    pub fn describe(&self, trace: &mut DiagnosticTrace) {
        trace.info(format!(
            "Using ldraw.xml: {}",
            self.comment.as_deref().unwrap_or("(no comment)")
        ));
        trace.info(format!(" Color Maps: {}", self.colors.len()));
        trace.info(format!(" Brick Maps: {}", self.bricks.len()));
        trace.info(format!(" Decoration Maps: {}", self.decorations.len()));
    }
}

fn required<'a>(
    node: &Node<'a, '_>,
    element: &'static str,
    attribute: &'static str,
) -> Result<&'a str, ImportError> {
    node.attribute(attribute)
        .ok_or(ImportError::MissingAttribute { element, attribute })
}

/// First entry of a comma-separated attribute value.
fn first_of(list: &str) -> &str {
    list.split(',').next().unwrap_or(list).trim()
}

/// Translate one `Part` element into a flat entry.
fn import_part(node: &Node<'_, '_>, table: &TranslationTable) -> Result<FlatEntry, ImportError> {
    let design_id = required(node, "Part", "designID")?;
    let material = first_of(required(node, "Part", "materials")?);

    let color = ColorId::new(table.color(material).unwrap_or(material));
    let mut part = match table.brick(design_id) {
        Some(file) => PartId::from_file_name(file),
        None => PartId::new(design_id),
    };

    if let Some(decoration) = node.attribute("decoration").map(first_of) {
        if let Some(printed) = table.decoration(decoration) {
            if printed.trim().is_empty() {
                return Err(ImportError::BlankDecoration(decoration.to_string()));
            }
            part = PartId::new(printed);
        }
    }

    Ok(FlatEntry::new(color, part))
}

/// Import every part of an LXFML scene.
///
/// Parts are read from `Bricks/Brick/Part`; a composite brick contributes
/// each of its parts.
///
/// # Errors
///
/// Returns an [`ImportError`] if the scene is not well-formed, has no
/// `Bricks` element, a part lacks its design or material id, or a decoration
/// maps to an empty name.
pub fn import(
    xml: &str,
    table: &TranslationTable,
    trace: &mut DiagnosticTrace,
) -> Result<Vec<FlatEntry>, ImportError> {
    let doc = Document::parse(xml).map_err(|source| ImportError::Xml {
        document: "LXFML scene",
        source,
    })?;

    let bricks = doc
        .root_element()
        .children()
        .find(|node| node.has_tag_name("Bricks"))
        .ok_or(ImportError::MissingBricks)?;

    let mut entries = Vec::new();
    for brick in bricks.children().filter(|node| node.has_tag_name("Brick")) {
        for part in brick.children().filter(|node| node.has_tag_name("Part")) {
            entries.push(import_part(&part, table)?);
        }
    }

    info!(parts = entries.len(); "Imported LXFML scene");
    trace.info(format!("Imported {} parts", entries.len()));
    Ok(entries)
}
