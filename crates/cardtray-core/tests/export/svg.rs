//! SVG output of generated panels

use cardtray_core::{CardTrayMaker, PanelExporter, SvgExporter, TrayParameters};

#[test]
fn test_bottom_svg_dimensions() {
    let tray = CardTrayMaker::new(TrayParameters::default())
        .unwrap()
        .generate()
        .unwrap();
    let svg = SvgExporter::default().render(&tray.bottom).unwrap();

    assert!(svg.contains(r#"width="318mm" height="98mm" viewBox="0 0 318 98""#));
    assert!(svg.contains("stroke:blue;stroke-width:0.5"));
    // Outline plus four divider holes.
    assert_eq!(svg.matches("<path").count(), 5);
    assert_eq!(svg.matches("Z\"").count(), 5);
}

#[test]
fn test_divider_view_box_includes_back_tabs() {
    let tray = CardTrayMaker::new(TrayParameters::default())
        .unwrap()
        .generate()
        .unwrap();
    let svg = SvgExporter::new("black", 0.1).render(&tray.divider).unwrap();

    assert!(svg.contains(r#"viewBox="0 0 98 163""#));
    assert!(svg.contains("<!-- Dividers -->"));
}

#[test]
fn test_front_traces_are_left_open() {
    let tray = CardTrayMaker::new(TrayParameters::default())
        .unwrap()
        .generate()
        .unwrap();
    let svg = SvgExporter::default().render(&tray.front).unwrap();

    let paths = svg.matches("<path").count();
    let closed = svg.matches("Z\"").count();
    assert_eq!(paths, tray.front.paths.len());
    assert_eq!(closed, tray.front.closed_paths().count());
    assert!(closed < paths);
}
