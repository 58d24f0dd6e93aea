//! Mating cuts on different panels must land on the same coordinates.

use cardtray_core::card_tray::{CardTrayMaker, LayoutParameters, TrayParameters, TAB};
use cardtray_core::{Point, TrayLayout};

const EPS: f64 = 1e-9;

fn build(n: u32) -> (LayoutParameters, TrayLayout) {
    let maker = CardTrayMaker::new(TrayParameters {
        deck_count: n,
        ..TrayParameters::default()
    })
    .unwrap();
    let tray = maker.generate().unwrap();
    (maker.layout().clone(), tray)
}

fn sorted_unique(mut values: Vec<f64>) -> Vec<f64> {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap());
    values.dedup_by(|a, b| (*a - *b).abs() < EPS);
    values
}

/// X coordinates of every point lying on the horizontal line `y`.
fn xs_on_row(points: &[Point], y: f64) -> Vec<f64> {
    sorted_unique(
        points
            .iter()
            .filter(|p| (p.y - y).abs() < EPS)
            .map(|p| p.x)
            .collect(),
    )
}

/// Y coordinates of every point lying on the vertical line `x`.
fn ys_on_column(points: &[Point], x: f64) -> Vec<f64> {
    sorted_unique(
        points
            .iter()
            .filter(|p| (p.x - x).abs() < EPS)
            .map(|p| p.y)
            .collect(),
    )
}

fn assert_close(left: &[f64], right: &[f64]) {
    assert_eq!(left.len(), right.len(), "{:?} vs {:?}", left, right);
    for (a, b) in left.iter().zip(right) {
        assert!((a - b).abs() < 1e-6, "{:?} vs {:?}", left, right);
    }
}

#[test]
fn test_divider_bottom_tabs_meet_bottom_holes() {
    for n in [4, 5] {
        let (layout, tray) = build(n);
        let m = layout.m();
        let depth = layout.d() + m;

        // Hole edges, measured from the inside face of the back wall.
        let hole_ys: Vec<f64> = ys_on_column(&tray.bottom.paths[1].points, layout.pitch())
            .into_iter()
            .map(|y| y - m)
            .collect();
        assert_close(
            &hole_ys,
            &[layout.notch_back(), layout.notch_back() + TAB],
        );

        for (i, path) in tray.divider.paths.iter().enumerate() {
            let y0 = path.points[0].y;
            // Divider x is measured from its back edge at x = m.
            let tab_xs: Vec<f64> = xs_on_row(&path.points, y0 + depth)
                .into_iter()
                .map(|x| x - m)
                .collect();
            assert_close(&tab_xs, &hole_ys);
            assert!(path.closed, "divider {} is not closed", i);
        }
    }
}

#[test]
fn test_bottom_side_slots_match_divider_tab() {
    let (layout, tray) = build(5);
    let m = layout.m();
    let outline = &tray.bottom.paths[0].points;

    let slot_ys: Vec<f64> = ys_on_column(outline, m)
        .into_iter()
        .filter(|y| *y < tray.bottom.height - m - EPS)
        .collect();
    assert_close(
        &slot_ys,
        &[m + layout.notch_back(), m + layout.notch_back() + TAB],
    );
}

#[test]
fn test_back_tabs_meet_bottom_slots() {
    for n in [1, 2, 5] {
        let (layout, tray) = build(n);
        let m = layout.m();

        let slot_xs = xs_on_row(&tray.bottom.paths[0].points, m);
        let tab_xs = xs_on_row(&tray.back.paths[0].points, layout.d() + m);

        assert_eq!(slot_xs.len(), 2 * n as usize);
        assert_close(&slot_xs, &tab_xs);
    }
}

#[test]
fn test_back_holes_meet_divider_back_tabs() {
    let (layout, tray) = build(5);

    // The first divider starts at y = 0; its back tabs reach x = 0.
    let tab_ys = ys_on_column(&tray.divider.paths[0].points, 0.0);
    let offsets: Vec<f64> = layout
        .tab_offsets()
        .iter()
        .flat_map(|&offset| [offset, offset + TAB])
        .collect();
    assert_close(&tab_ys, &offsets);

    for (i, hole) in tray.back.paths[1..].iter().enumerate() {
        let x = layout.pitch() * (i + 1) as f64;
        assert_close(&ys_on_column(&hole.points, x), &offsets);
    }
}

#[test]
fn test_front_slots_meet_end_divider_front_tabs() {
    let (layout, tray) = build(5);
    let m = layout.m();

    let front_tip = m + layout.h() + m;
    let tab_ys = ys_on_column(&tray.divider.paths[0].points, front_tip);
    let slot_ys: Vec<f64> = ys_on_column(&tray.front.paths[0].points, m)
        .into_iter()
        .filter(|y| *y < layout.d() - EPS)
        .collect();
    assert_close(&tab_ys, &slot_ys);
}

#[test]
fn test_front_holes_use_shared_offsets() {
    for n in [4, 5] {
        let (layout, tray) = build(n);
        let holes: Vec<_> = tray
            .front
            .closed_paths()
            .filter(|path| path.points.len() == 5)
            .collect();

        let expected = match n % 2 {
            0 => layout.front_piece_count() as usize,
            _ => (n - 1) as usize,
        } * layout.tabs() as usize;
        assert_eq!(holes.len(), expected);

        for hole in holes {
            assert_close(
                &[hole.points[0].y],
                &[layout.tab_offsets()[0]],
            );
        }
    }
}
