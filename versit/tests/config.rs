// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for loading the TOML configuration from disk.

use pimkit_versit::config::DEFAULT_PRODUCT_ID;
use pimkit_versit::{
    ConfigError, FoldingStyle, OrganizerExporter, OrganizerImporter, VersitConfig,
    VersitDocument, VersitProperty, VersitType, read_documents,
};

#[test]
fn test_load_config_file() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = temp_dir.path().join("versit.toml");
    std::fs::write(
        &path,
        r#"
[writer]
folding = 20
folding_style = "tab"

[importer]
extended_properties = true

[exporter]
product_id = "-//Example Corp//Planner//EN"
"#,
    )
    .expect("Failed to write config");

    let config = VersitConfig::load(&path).unwrap();
    let options = config.writer.write_options();
    assert_eq!(options.folding, Some(20));
    assert_eq!(options.folding_style, FoldingStyle::Tab);
    assert!(config.importer.extended_properties);
    assert_eq!(config.exporter.product_id, "-//Example Corp//Planner//EN");

    let document = VersitDocument::new(VersitType::ICalendar20, "VCALENDAR").with_property(
        VersitProperty::text("DESCRIPTION", "A calendar description long enough to fold"),
    );
    let text = options.write_to_string(&document).unwrap();
    assert!(text.contains("\r\n\t"));
    assert!(text.split("\r\n").all(|line| line.len() <= 20));
    assert_eq!(read_documents(&text).unwrap(), [document]);
}

#[test]
fn test_configured_importer_and_exporter() {
    let config: VersitConfig = "[importer]\nextended_properties = true\n".parse().unwrap();
    let src = "BEGIN:VCALENDAR\r\nBEGIN:VJOURNAL\r\nUID:j\r\nX-MOOD:calm\r\nEND:VJOURNAL\r\nEND:VCALENDAR\r\n";
    let documents = read_documents(src).unwrap();

    let mut importer = OrganizerImporter::from_config(&config.importer);
    assert!(importer.import_document(&documents[0]));
    assert_eq!(importer.items()[0].details().len(), 2);

    let mut exporter = OrganizerExporter::from_config(&config.exporter);
    assert!(exporter.export_items(importer.items()));
    let prodid = exporter.document().property("PRODID").unwrap();
    assert_eq!(prodid.value().as_str(), Some(DEFAULT_PRODUCT_ID));
    let journal = &exporter.document().sub_documents()[0];
    assert!(journal.property("X-MOOD").is_none());
}

#[test]
fn test_missing_config_file() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let err = VersitConfig::load(temp_dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("missing.toml"));
}

#[test]
fn test_invalid_config_file() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = temp_dir.path().join("versit.toml");
    std::fs::write(&path, "[writer]\nfolding = 0\n").expect("Failed to write config");
    assert!(matches!(
        VersitConfig::load(&path),
        Err(ConfigError::Parse(_))
    ));
}
