//! Integration tests for the InventoryBuilder API

use std::{fs, io::Write};

use mocparts::{
    InventoryBuilder, MocError,
    color::ColorId,
    config::{AppConfig, InventoryConfig, LxfmlConfig, ResolveOptions},
    format::InputFormat,
    lxfml::ImportError,
    part::PartId,
};
use mocparts_parser::error::ErrorCode;

const TABLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<LDrawMapping comment="test table">
  <Material ldraw="4" lego="21" />
  <Material ldraw="15" lego="1" />
  <Brick ldraw="3001.dat" lego="3001" />
  <Brick ldraw="3626bp01.dat" lego="3626" />
  <Decoration rb="973p01" lego="5001" />
</LDrawMapping>
"#;

const SCENE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no" ?>
<LXFML versionMajor="5" versionMinor="0" name="Scene">
  <Bricks cameraRef="0">
    <Brick refID="0" designID="3001"><Part refID="0" designID="3001" materials="21,0" /></Brick>
    <Brick refID="1" designID="3001"><Part refID="1" designID="3001" materials="21" /></Brick>
    <Brick refID="2" designID="3626"><Part refID="2" designID="3626" materials="1" decoration="5001" /></Brick>
    <Brick refID="3" designID="3626"><Part refID="3" designID="3626" materials="1" /></Brick>
  </Bricks>
</LXFML>
"#;

fn count(parts: &mocparts::PartsList, color: &str, id: &str) -> usize {
    parts
        .inventory()
        .count(&ColorId::new(color), &PartId::new(id))
}

#[test]
fn test_builder_api_exists() {
    let _builder = InventoryBuilder::default();
}

#[test]
fn test_scenario_root_default_color() {
    let source = "\
0 FILE m.ldr
1 4 0 0 0 1 0 0 0 1 0 0 0 1 3001.dat
1 16 0 0 0 1 0 0 0 1 0 0 0 1 3002.dat
0 NOFILE
";

    let parts = InventoryBuilder::default()
        .load_str(source)
        .expect("Failed to load");

    assert_eq!(parts.format(), InputFormat::Mpd);
    assert_eq!(count(&parts, "4", "3001"), 1);
    assert_eq!(count(&parts, "-1", "3002"), 1);
    assert_eq!(parts.inventory().total(), 2);
}

#[test]
fn test_scenario_override_and_default() {
    let source = "\
0 FILE m.ldr
1 7 0 0 0 1 0 0 0 1 0 0 0 1 n.ldr
1 16 10 0 0 1 0 0 0 1 0 0 0 1 N.LDR
0 NOFILE
0 FILE n.ldr
1 16 0 0 0 1 0 0 0 1 0 0 0 1 3003.dat
0 NOFILE
";

    let parts = InventoryBuilder::default()
        .load_str(source)
        .expect("Failed to load");

    assert_eq!(count(&parts, "7", "3003"), 1);
    assert_eq!(count(&parts, "-1", "3003"), 1);
    assert_eq!(parts.inventory().len(), 2);
}

#[test]
fn test_nested_reference_without_override_keeps_default() {
    let source = "\
0 FILE m.ldr
1 7 0 0 0 1 0 0 0 1 0 0 0 1 n.ldr
0 NOFILE
0 FILE n.ldr
1 16 0 0 0 1 0 0 0 1 0 0 0 1 p.ldr
0 NOFILE
0 FILE p.ldr
1 16 0 0 0 1 0 0 0 1 0 0 0 1 3005.dat
0 NOFILE
";

    let parts = InventoryBuilder::default()
        .load_str(source)
        .expect("Failed to load");

    assert_eq!(count(&parts, "-1", "3005"), 1);
    assert_eq!(count(&parts, "7", "3005"), 0);
}

#[test]
fn test_capture_block_rows_are_never_parsed() {
    let source = "\
0 !LPUB PLI BEGIN SUB 22463.dat 4
1 4 0 0 0 1 0 0 0 1 0 0 0 junk.ldr
0 !LPUB PLI END
1 4 0 0 0 1 0 0 0 1 0 0 0 1 3001.dat
";

    let parts = InventoryBuilder::default()
        .load_str(source)
        .expect("Failed to load");

    assert_eq!(parts.inventory().total(), 2);
    assert_eq!(count(&parts, "4", "22463"), 1);
    assert_eq!(count(&parts, "4", "3001"), 1);
}

#[test]
fn test_part_ids_are_counted_ignoring_case() {
    let source = "\
1 15 0 0 0 1 0 0 0 1 0 0 0 1 3626bp01.dat
1 15 0 0 0 1 0 0 0 1 0 0 0 1 3626BP01.DAT
";

    let parts = InventoryBuilder::default()
        .load_str(source)
        .expect("Failed to load");

    assert_eq!(parts.inventory().len(), 1);
    assert_eq!(parts.inventory().total(), 2);
    assert_eq!(parts.report().parts[0].id, PartId::new("3626bp01"));
}

#[test]
fn test_trace_order() {
    let source = "\
0 FILE m.ldr
1 4 0 0 0 1 0 0 0 1 0 0 0 1 3001.dat
0 NOFILE
";

    let parts = InventoryBuilder::default()
        .load_str(source)
        .expect("Failed to load");
    let messages = parts.trace().to_strings();

    assert_eq!(messages.first().map(String::as_str), Some("Loading File"));
    assert_eq!(messages[1], "Format: MPD");
    assert_eq!(messages[2], "Encoding: ascii");
    assert!(messages.contains(&"Final part count = 1".to_string()));
    assert_eq!(
        messages.last().map(String::as_str),
        Some("File loaded successfully.")
    );
}

#[test]
fn test_missing_sub_model_warns_and_continues() {
    let source = "\
0 FILE m.ldr
1 4 0 0 0 1 0 0 0 1 0 0 0 1 3001.dat
1 4 0 0 0 1 0 0 0 1 0 0 0 1 Z.ldr
0 NOFILE
";

    let parts = InventoryBuilder::default()
        .load_str(source)
        .expect("Failed to load");

    assert_eq!(parts.inventory().total(), 1);
    assert!(
        parts
            .report()
            .msg
            .contains(&"WARNING: Submodel z.ldr not found".to_string())
    );
}

#[test]
fn test_empty_document_warns() {
    let parts = InventoryBuilder::default()
        .load_str("0 just a comment\n")
        .expect("Failed to load");

    assert!(parts.inventory().is_empty());
    assert_eq!(
        parts.trace().warnings().map(ToString::to_string).collect::<Vec<_>>(),
        ["WARNING: No models found"]
    );
}

#[test]
fn test_blank_reference_name_is_fatal() {
    let source = "\
0 FILE m.ldr
1 4 0 0 0 1 0 0 0 1 0 0 0 .ldr
0 NOFILE
";

    let err = InventoryBuilder::default()
        .load_str(source)
        .expect_err("blank name should fail");

    match err {
        MocError::Parse { err, src } => {
            assert_eq!(err.code(), ErrorCode::E001);
            assert_eq!(err.diagnostic().line(), Some(2));
            assert_eq!(src, source);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_cycle_is_fatal() {
    let source = "\
0 FILE a.ldr
1 4 0 0 0 1 0 0 0 1 0 0 0 1 b.ldr
0 NOFILE
0 FILE b.ldr
1 4 0 0 0 1 0 0 0 1 0 0 0 1 a.ldr
0 NOFILE
";

    let err = InventoryBuilder::default()
        .load_str(source)
        .expect_err("cycle should fail");

    assert!(matches!(
        err,
        MocError::Parse { ref err, .. } if err.code() == ErrorCode::E100
    ));
}

#[test]
fn test_lsynth_and_extra_exclusions() {
    let source = "\
0 FILE m.ldr
1 4 0 0 0 1 0 0 0 1 0 0 0 1 3001.dat
1 0 0 0 0 1 0 0 0 1 0 0 0 1 LS01.dat
1 0 0 0 0 1 0 0 0 1 0 0 0 1 ls02.dat
1 0 0 0 0 1 0 0 0 1 0 0 0 1 3004.dat
0 NOFILE
";

    let parts = InventoryBuilder::default()
        .load_str(source)
        .expect("Failed to load");
    assert_eq!(parts.inventory().total(), 2);

    let config = AppConfig::new(
        ResolveOptions::default(),
        InventoryConfig::new(vec!["3004".to_string()]),
        LxfmlConfig::default(),
    );
    let parts = InventoryBuilder::new(config)
        .load_str(source)
        .expect("Failed to load");
    assert_eq!(parts.inventory().total(), 1);
}

#[test]
fn test_configured_default_color() {
    let source = "1 16 0 0 0 1 0 0 0 1 0 0 0 1 3002.dat\n";
    let config = AppConfig::new(
        ResolveOptions::new("0", None),
        InventoryConfig::default(),
        LxfmlConfig::default(),
    );

    let parts = InventoryBuilder::new(config)
        .load_str(source)
        .expect("Failed to load");

    assert_eq!(count(&parts, "0", "3002"), 1);
}

#[test]
fn test_inherit_default_color_is_config_error() {
    let config = AppConfig::new(
        ResolveOptions::new("16", None),
        InventoryConfig::default(),
        LxfmlConfig::default(),
    );

    let err = InventoryBuilder::new(config)
        .load_str("1 4 0 0 0 1 0 0 0 1 0 0 0 1 3001.dat\n")
        .expect_err("16 is not a valid default color");

    assert!(matches!(err, MocError::Config(_)));
}

#[test]
fn test_latin1_bytes_are_decoded() {
    let bytes = b"0 FILE caf\xE9.ldr\n1 4 0 0 0 1 0 0 0 1 0 0 0 1 3001.dat\n0 NOFILE\n";

    let parts = InventoryBuilder::default()
        .load_bytes(bytes)
        .expect("Failed to load");

    assert!(parts.trace().contains("Encoding: windows-1252"));
    assert!(parts.trace().contains("New model: caf\u{e9}.ldr"));
    assert_eq!(parts.inventory().total(), 1);
}

#[test]
fn test_lxfml_without_table_is_fatal() {
    let err = InventoryBuilder::default()
        .load_str(SCENE)
        .expect_err("table is required");

    assert!(matches!(err, MocError::Import(ImportError::MissingTable)));
}

#[test]
fn test_lxfml_with_table() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let table_path = dir.path().join("ldraw.xml");
    fs::write(&table_path, TABLE).expect("Failed to write table");

    let builder = InventoryBuilder::new(AppConfig::default().with_translation_table(&table_path));
    let parts = builder.load_str(SCENE).expect("Failed to load scene");

    assert_eq!(parts.format(), InputFormat::Lxfml);
    assert_eq!(count(&parts, "4", "3001"), 2);
    assert_eq!(count(&parts, "15", "973p01"), 1);
    assert_eq!(count(&parts, "15", "3626bp01"), 1);
    assert!(parts.trace().contains("Using ldraw.xml: test table"));
    assert!(parts.trace().contains("Imported 4 parts"));
}

#[test]
fn test_load_path() {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    writeln!(file, "0 FILE m.ldr").expect("write");
    writeln!(file, "1 4 0 0 0 1 0 0 0 1 0 0 0 1 3001.dat").expect("write");
    writeln!(file, "0 NOFILE").expect("write");

    let parts = InventoryBuilder::default()
        .load_path(file.path())
        .expect("Failed to load file");

    assert!(parts.trace().messages()[0].text().starts_with("Loading File "));
    assert_eq!(parts.inventory().total(), 1);
}

#[test]
fn test_load_missing_path_is_io_error() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");

    let err = InventoryBuilder::default()
        .load_path(dir.path().join("missing.mpd"))
        .expect_err("missing file");

    assert!(matches!(err, MocError::Io(_)));
}

#[test]
fn test_builder_reusability() {
    let builder = InventoryBuilder::default();

    let first = builder
        .load_str("1 4 0 0 0 1 0 0 0 1 0 0 0 1 3001.dat\n")
        .expect("Failed to load first");
    let second = builder
        .load_str("1 1 0 0 0 1 0 0 0 1 0 0 0 1 3002.dat\n")
        .expect("Failed to load second");

    assert_eq!(count(&first, "4", "3001"), 1);
    assert_eq!(count(&second, "1", "3002"), 1);
    assert_eq!(count(&second, "4", "3001"), 0);
}

#[test]
fn test_report_json() {
    let parts = InventoryBuilder::default()
        .load_str("1 4 0 0 0 1 0 0 0 1 0 0 0 1 3001.dat\n")
        .expect("Failed to load");

    let json = parts.report().to_json().expect("Failed to serialize");

    assert!(json.starts_with(r#"{"parts":[{"id":"3001","color":"4","qty":1,"type":1}],"msg":["#));
}
