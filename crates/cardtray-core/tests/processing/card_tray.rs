//! Scenario tests for the card tray generator

use cardtray_core::card_tray::{
    CardTrayMaker, LayoutParameters, TabStrategy, TrayParameters, DIVIDER_GAP, MIN_DECK_THICKNESS,
    RELIEF, SHORT_DIVIDER_INSET,
};
use cardtray_core::panel::{Bounds, CLOSURE_TOLERANCE};
use cardtray_core::{ParameterError, TrayError, TrayLayout};

fn generate(params: TrayParameters) -> TrayLayout {
    CardTrayMaker::new(params)
        .expect("Failed to create CardTrayMaker")
        .generate()
        .expect("Failed to generate tray")
}

fn with_decks(n: u32) -> TrayParameters {
    TrayParameters {
        deck_count: n,
        ..TrayParameters::default()
    }
}

fn assert_outlines_closed(tray: &TrayLayout) {
    for panel in tray.panels() {
        for (idx, path) in panel.paths.iter().enumerate().filter(|(_, p)| p.closed) {
            assert!(
                path.closure_gap() <= CLOSURE_TOLERANCE,
                "{} path {} misses its start by {}",
                panel.kind,
                idx,
                path.closure_gap()
            );
            assert!(path.points.len() >= 4);
        }
    }
}

#[test]
fn test_reference_tray() {
    let tray = generate(TrayParameters::default());

    assert_eq!(tray.bottom.width, 318.0);
    assert_eq!(tray.bottom.height, 98.0);
    assert_eq!(tray.divider.width, 98.0);
    assert_eq!(tray.back.width, 318.0);
    assert_eq!(tray.back.height, 23.0);
    assert_eq!(tray.front.height, 23.0);
    assert_outlines_closed(&tray);
}

#[test]
fn test_odd_deck_count_layout() {
    let tray = generate(with_decks(5));

    // Six full-length dividers, each a closed outline.
    assert_eq!(tray.divider.paths.len(), 6);
    for path in &tray.divider.paths {
        let bounds = Bounds::of(path.points.iter()).unwrap();
        assert_eq!(bounds.width(), 98.0);
        assert_eq!(bounds.height(), 23.0);
    }

    // Left end piece, four middle stubs with a hole each, right end piece.
    let closed = tray.front.closed_paths().count();
    let open = tray.front.paths.len() - closed;
    assert_eq!(closed, 1 + 4);
    assert_eq!(open, 4 + 1);
}

#[test]
fn test_even_deck_count_layout() {
    let tray = generate(with_decks(4));

    assert_eq!(tray.bottom.width, 255.0);
    assert_eq!(tray.bottom.height, 98.0);
    assert_eq!(tray.back.width, 255.0);
    assert_eq!(tray.divider.paths.len(), 5);

    // Short, long, short, long, short.
    let widths: Vec<f64> = tray
        .divider
        .paths
        .iter()
        .map(|path| Bounds::of(path.points.iter()).unwrap().width())
        .collect();
    let short = 3.0 + 92.0 - SHORT_DIVIDER_INSET;
    assert_eq!(widths, vec![short, 98.0, short, 98.0, short]);

    // Two double-width stubs.
    assert_eq!(tray.front.width, 2.0 * (20.0 + 2.0 * 3.0));
    assert_outlines_closed(&tray);
}

#[test]
fn test_front_piece_counts() {
    for n in 1..=12 {
        let layout = LayoutParameters::new(&with_decks(n)).unwrap();
        let expected = if n % 2 == 0 { n / 2 } else { n + 1 };
        assert_eq!(layout.front_piece_count(), expected, "n = {}", n);
    }
}

#[test]
fn test_dividers_are_stacked_with_gap() {
    let tray = generate(with_decks(3));
    let tops: Vec<f64> = tray
        .divider
        .paths
        .iter()
        .map(|path| Bounds::of(path.points.iter()).unwrap().min_y)
        .collect();

    for pair in tops.windows(2) {
        assert_eq!(pair[1] - pair[0], 20.0 + 3.0 + DIVIDER_GAP);
    }
}

#[test]
fn test_thin_decks_are_clamped() {
    let thin = generate(TrayParameters {
        deck_thickness: 5.0,
        ..TrayParameters::default()
    });
    let reference = generate(TrayParameters::default());

    assert_eq!(thin.divider, reference.divider);
    assert_eq!(thin.bottom, reference.bottom);
    assert_eq!(thin.back, reference.back);
    assert_eq!(thin.front, reference.front);

    assert_eq!(thin.adjustments.len(), 1);
    assert_eq!(thin.adjustments[0].requested, 5.0);
    assert_eq!(thin.adjustments[0].effective, MIN_DECK_THICKNESS);
    assert!(reference.adjustments.is_empty());
}

#[test]
fn test_distributed_tabs_on_thick_decks() {
    let params = TrayParameters {
        deck_thickness: 50.0,
        deck_count: 3,
        tab_strategy: TabStrategy::Distributed,
        ..TrayParameters::default()
    };
    let maker = CardTrayMaker::new(params).unwrap();
    assert_eq!(maker.layout().tabs(), 2);

    let tray = maker.generate().unwrap();
    // Outline plus two holes for each of the two interior dividers.
    assert_eq!(tray.back.paths.len(), 1 + 2 * 2);
    assert_eq!(tray.back.height, 53.0);
    // End pieces plus two middle stubs carrying two holes each.
    assert_eq!(tray.front.paths.len(), 2 + 2 * (1 + 2));
    assert_outlines_closed(&tray);
}

#[test]
fn test_centered_tabs_on_thick_decks() {
    let params = TrayParameters {
        deck_thickness: 50.0,
        deck_count: 3,
        ..TrayParameters::default()
    };
    let tray = generate(params);
    assert_eq!(tray.back.paths.len(), 1 + 2);
}

#[test]
fn test_assorted_trays_close() {
    let cases = [
        (92.0, 60.0, 20.0, 3.0, 1),
        (88.0, 63.0, 25.0, 3.0, 2),
        (120.0, 80.0, 45.5, 6.0, 7),
        (41.5, 21.0, 20.0, 1.5, 6),
        (300.0, 150.0, 99.0, 10.0, 10),
    ];

    for (h, w, d, m, n) in cases {
        for tab_strategy in [TabStrategy::Centered, TabStrategy::Distributed] {
            let tray = generate(TrayParameters {
                card_height: h,
                card_width: w,
                deck_thickness: d,
                material_thickness: m,
                deck_count: n,
                tab_strategy,
            });
            assert_outlines_closed(&tray);
            assert_eq!(tray.divider.paths.len(), n as usize + 1);
        }
    }
}

#[test]
fn test_short_cards_with_odd_deck_count() {
    for n in [1, 3, 5] {
        let tray = generate(TrayParameters {
            card_height: 35.0,
            deck_count: n,
            ..TrayParameters::default()
        });
        assert_outlines_closed(&tray);
        assert_eq!(tray.divider.width, 3.0 + 35.0 + 3.0);
        assert_eq!(tray.bottom.height, 35.0 + 2.0 * 3.0);
    }
}

#[test]
fn test_divider_relief_cut_is_full_length() {
    let tray = generate(TrayParameters::default());
    let outline = &tray.divider.paths[0].points;

    // The relief is cut into the front edge at x = m + h, one material
    // thickness deep, from the top corner down to the first tab.
    let mut ys: Vec<f64> = outline
        .iter()
        .filter(|p| p.x == 3.0 + 92.0 - 3.0)
        .map(|p| p.y)
        .collect();
    ys.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(ys, vec![0.0, RELIEF]);
}

#[test]
fn test_invalid_parameters_abort_generation() {
    let cases = [
        TrayParameters {
            deck_count: 0,
            ..TrayParameters::default()
        },
        TrayParameters {
            card_height: 40.0,
            deck_count: 4,
            ..TrayParameters::default()
        },
        TrayParameters {
            card_height: 10.0,
            ..TrayParameters::default()
        },
        TrayParameters {
            card_width: 20.0,
            ..TrayParameters::default()
        },
        TrayParameters {
            material_thickness: 0.0,
            ..TrayParameters::default()
        },
        TrayParameters {
            deck_thickness: f64::INFINITY,
            ..TrayParameters::default()
        },
    ];

    for params in cases {
        let result = CardTrayMaker::new(params.clone());
        assert!(
            matches!(result, Err(TrayError::Parameter(_))),
            "expected a parameter error for {:?}",
            params
        );
    }
}

#[test]
fn test_incompatible_even_tray() {
    let result = CardTrayMaker::new(TrayParameters {
        card_width: 21.0,
        material_thickness: 14.0,
        deck_count: 2,
        ..TrayParameters::default()
    });
    assert!(matches!(
        result,
        Err(TrayError::Parameter(ParameterError::Incompatible(_)))
    ));
}

#[test]
fn test_generation_is_deterministic() {
    let params = TrayParameters {
        card_height: 87.3,
        card_width: 56.1,
        deck_thickness: 33.3,
        material_thickness: 2.7,
        deck_count: 6,
        tab_strategy: TabStrategy::Distributed,
    };
    assert_eq!(generate(params.clone()), generate(params));
}
