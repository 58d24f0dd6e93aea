//! Writing artifacts to disk

use cardtray_core::export::{write_panels, JsonExporter, PanelExporter, SvgExporter};
use cardtray_core::{CardTrayMaker, GcodeExporter, Panel, TrayParameters};
use std::fs;

fn panels() -> Vec<Panel> {
    let tray = CardTrayMaker::new(TrayParameters::default())
        .unwrap()
        .generate()
        .unwrap();
    tray.panels().into_iter().cloned().collect()
}

#[test]
fn test_writes_one_file_per_panel() {
    let dir = tempfile::tempdir().unwrap();
    let panels = panels();
    let refs: Vec<&Panel> = panels.iter().collect();

    let written = write_panels(dir.path(), "tray", &refs, &SvgExporter::default()).unwrap();

    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "tray_divider.svg",
            "tray_bottom.svg",
            "tray_back.svg",
            "tray_front.svg"
        ]
    );
    for path in &written {
        let contents = fs::read_to_string(path).unwrap();
        assert!(contents.starts_with("<?xml"));
    }
}

#[test]
fn test_creates_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out").join("laser");
    let panels = panels();
    let refs: Vec<&Panel> = panels.iter().collect();

    let written = write_panels(&target, "box", &refs, &GcodeExporter::default()).unwrap();
    assert_eq!(written.len(), 4);
    assert!(target.join("box_bottom.gcode").is_file());
}

#[test]
fn test_failed_render_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let panels = panels();
    let refs: Vec<&Panel> = panels.iter().collect();
    let exporter = GcodeExporter {
        passes: 0,
        ..GcodeExporter::default()
    };

    assert!(write_panels(dir.path(), "tray", &refs, &exporter).is_err());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_json_round_trip_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let panels = panels();
    let refs: Vec<&Panel> = panels.iter().collect();

    let written = write_panels(dir.path(), "tray", &refs, &JsonExporter).unwrap();
    assert_eq!(JsonExporter.file_extension(), "json");

    let bottom: Panel = serde_json::from_str(&fs::read_to_string(&written[1]).unwrap()).unwrap();
    assert_eq!(bottom, panels[1]);
}
