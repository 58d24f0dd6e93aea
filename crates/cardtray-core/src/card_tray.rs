//! Card Tray Maker
//!
//! Generates the four flat pieces of a multi-deck card tray: the stacked
//! dividers, the bottom, the back wall and the front stubs. Every panel is
//! traced clockwise from its top-left corner on a y-down canvas, so tabs
//! are left notches and slots are right notches. All joint positions come
//! from one [`LayoutParameters`] value so mating cuts always line up.
//!
//! Odd deck counts get full-height dividers and a single-width front piece
//! at every divider. Even deck counts alternate short and long dividers and
//! put one double-width front piece on each long divider.

pub mod types;

pub use types::*;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cursor::Point;
use crate::error::TrayResult;
use crate::joints::JointPrimitives;
use crate::panel::{Panel, PanelBuilder, PanelKind};

/// The four generated panels plus any parameter adjustments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrayLayout {
    pub divider: Panel,
    pub bottom: Panel,
    pub back: Panel,
    pub front: Panel,
    #[serde(default)]
    pub adjustments: Vec<Adjustment>,
}

impl TrayLayout {
    /// Panels in output order.
    pub fn panels(&self) -> [&Panel; 4] {
        [&self.divider, &self.bottom, &self.back, &self.front]
    }
}

pub struct CardTrayMaker {
    layout: LayoutParameters,
}

impl CardTrayMaker {
    pub fn new(params: TrayParameters) -> TrayResult<Self> {
        let layout = LayoutParameters::new(&params)?;
        Ok(Self { layout })
    }

    pub fn layout(&self) -> &LayoutParameters {
        &self.layout
    }

    /// Draft every panel. Nothing is returned unless all four succeed.
    pub fn generate(&self) -> TrayResult<TrayLayout> {
        debug!(
            h = self.layout.h(),
            w = self.layout.w(),
            d = self.layout.d(),
            m = self.layout.m(),
            n = self.layout.n(),
            parity = ?self.layout.parity(),
            tabs = self.layout.tabs(),
            "Generating card tray"
        );

        let tray = TrayLayout {
            divider: self.draw_dividers()?,
            bottom: self.draw_bottom()?,
            back: self.draw_back()?,
            front: self.draw_front()?,
            adjustments: self.layout.adjustments(),
        };

        for panel in tray.panels() {
            info!(
                panel = panel.kind.name(),
                width = panel.width,
                height = panel.height,
                "Panel size"
            );
        }

        Ok(tray)
    }

    /// All `n + 1` dividers, stacked top to bottom.
    pub fn draw_dividers(&self) -> TrayResult<Panel> {
        let lp = &self.layout;
        let m = lp.m();
        let d = lp.d();
        let (notch_back, notch_front) = (lp.notch_back(), lp.notch_front());

        // The back tabs stick out to the left of x = m.
        PanelBuilder::draft(PanelKind::Divider, Point::new(m, 0.0), |b| {
            for i in 0..lp.divider_count() {
                let short = lp.is_short_divider(i);
                let inset = if short { SHORT_DIVIDER_INSET } else { 0.0 };
                let front_joint = if short { None } else { Some(Joint::Tab) };

                b.forward(lp.divider_length(i));
                b.turn_right();

                b.trace(&lp.short_edge(front_joint, true));
                b.turn_right();

                b.forward(notch_front - inset);
                b.notch_left(TAB, m);
                b.forward(notch_back);
                b.turn_right();

                let mut back_edge = lp.short_edge(Some(Joint::Tab), true);
                back_edge.reverse();
                b.trace(&back_edge);
                b.close_outline();

                b.shift_by(0.0, d + m + DIVIDER_GAP);
                b.east();
                b.begin();
            }
            Ok(())
        })
    }

    /// The floor, with slots for the back and the end dividers, holes for
    /// the interior dividers and a finger notch in front of each deck.
    pub fn draw_bottom(&self) -> TrayResult<Panel> {
        let lp = &self.layout;
        let m = lp.m();
        let w = lp.w();
        let n = lp.n();
        let (notch_back, notch_front) = (lp.notch_back(), lp.notch_front());
        let pitch = lp.pitch();

        PanelBuilder::draft(PanelKind::Bottom, Point::new(0.0, 0.0), |b| {
            // Back edge: one slot per deck for the back wall's tabs.
            for _ in 0..n {
                b.forward(m + w / 2.0 - TAB / 2.0);
                b.notch_right(TAB, m);
                b.forward(w / 2.0 - TAB / 2.0);
            }
            b.forward(m);
            b.turn_right();

            b.forward(m + notch_back);
            b.notch_right(TAB, m);
            b.forward(m + notch_front);
            b.turn_right();

            self.bottom_front_edge(b);
            b.turn_right();

            b.forward(m + notch_front);
            b.notch_right(TAB, m);
            b.forward(m + notch_back);
            b.close_outline();

            for i in 1..n {
                b.start_at(Point::new(pitch * i as f64, m + notch_back));
                b.rectangle(m, TAB);
                b.close_outline();
            }
            Ok(())
        })
    }

    /// Front edge of the bottom, traced right to left.
    fn bottom_front_edge(&self, b: &mut PanelBuilder) {
        let lp = &self.layout;
        let m = lp.m();
        let notch = lp.finger_notch_width();

        match lp.parity() {
            Parity::Odd => {
                for _ in 0..lp.n() {
                    b.forward(m);
                    b.jog_right(m);
                    b.forward(STUB_MARGIN);
                    b.notch_right(notch, FINGER_NOTCH_DEPTH);
                    b.forward(STUB_MARGIN);
                    b.jog_left(m);
                }
            }
            Parity::Even => {
                let margin = lp.front_margin();
                for _ in 0..lp.n() / 2 {
                    // Deck between a short divider (right) and a long one.
                    b.forward(m);
                    b.jog_right(m);
                    b.forward(STUB_MARGIN);
                    b.notch_right(notch, FINGER_NOTCH_DEPTH);
                    b.forward(margin);
                    b.jog_left(m);

                    // Mirrored on the other side of the long divider.
                    b.forward(m);
                    b.jog_right(m);
                    b.forward(margin);
                    b.notch_right(notch, FINGER_NOTCH_DEPTH);
                    b.forward(STUB_MARGIN);
                    b.jog_left(m);
                }
            }
        }
        b.forward(m);
    }

    /// The back wall: tabs into the bottom, slots for the end dividers and
    /// holes for the interior ones.
    pub fn draw_back(&self) -> TrayResult<Panel> {
        let lp = &self.layout;
        let m = lp.m();
        let w = lp.w();
        let n = lp.n();
        let pitch = lp.pitch();
        let width = lp.tray_width();

        PanelBuilder::draft(PanelKind::Back, Point::new(0.0, 0.0), |b| {
            let mut x = 0.0;
            for i in 1..n {
                let target = pitch * i as f64;
                b.forward(target - x);
                b.notch_right(m, lp.relief());
                x = target + m;
            }
            b.forward(width - x);
            b.turn_right();

            let side = lp.short_edge(Some(Joint::Slot), true);
            b.trace(&side);
            b.turn_right();

            for _ in 0..n {
                b.forward(m + w / 2.0 - TAB / 2.0);
                b.notch_left(TAB, m);
                b.forward(w / 2.0 - TAB / 2.0);
            }
            b.forward(m);
            b.turn_right();

            let mut other_side = side;
            other_side.reverse();
            b.trace(&other_side);
            b.close_outline();

            for i in 1..n {
                for offset in lp.tab_offsets() {
                    b.start_at(Point::new(pitch * i as f64, offset));
                    b.rectangle(m, TAB);
                    b.close_outline();
                }
            }
            Ok(())
        })
    }

    /// The front stubs, laid out side by side.
    pub fn draw_front(&self) -> TrayResult<Panel> {
        match self.layout.parity() {
            Parity::Odd => self.draw_front_single(),
            Parity::Even => self.draw_front_double(),
        }
    }

    // One narrow piece per divider; the two end pieces wrap the corners.
    fn draw_front_single(&self) -> TrayResult<Panel> {
        let lp = &self.layout;
        let m = lp.m();
        let d = lp.d();
        let n = lp.n();
        let piece = lp.front_piece_width();
        let side = lp.short_edge(Some(Joint::Slot), false);

        PanelBuilder::draft(PanelKind::Front, Point::new(0.0, 0.0), |b| {
            b.forward(m + STUB_MARGIN);
            b.turn_right();
            b.forward(d + m);
            b.turn_right();
            b.forward(STUB_MARGIN);
            b.turn_right();
            b.forward(m);
            b.turn_left();
            b.forward(m);
            b.turn_right();
            let mut left_side = side.clone();
            left_side.reverse();
            b.trace(&left_side);
            b.close_outline();

            for k in 0..n - 1 {
                let x0 = m + STUB_MARGIN + k as f64 * piece;
                self.front_stub(b, x0, piece, STUB_MARGIN, false);
            }

            let x0 = m + STUB_MARGIN + (n - 1) as f64 * piece;
            b.start_at(Point::new(x0, 0.0));
            b.forward(m + STUB_MARGIN);
            b.turn_right();
            b.trace(&side);
            b.turn_right();
            b.forward(m);
            b.turn_left();
            b.forward(m);
            b.turn_right();
            b.forward(STUB_MARGIN);
            b.lift();
            Ok(())
        })
    }

    // One wide piece per long divider; the first one closes its left side.
    fn draw_front_double(&self) -> TrayResult<Panel> {
        let lp = &self.layout;
        let piece = lp.front_piece_width();
        let margin = lp.front_margin();

        PanelBuilder::draft(PanelKind::Front, Point::new(0.0, 0.0), |b| {
            for k in 0..lp.front_piece_count() {
                self.front_stub(b, k as f64 * piece, piece, margin, k == 0);
            }
            Ok(())
        })
    }

    /// A stub piece straddling one divider: top, right side and the notched
    /// bottom. Unless `closed`, its left side is the previous piece's right
    /// side and the trace is left open.
    fn front_stub(
        &self,
        b: &mut PanelBuilder,
        x0: f64,
        piece: f64,
        margin: f64,
        closed: bool,
    ) {
        let lp = &self.layout;
        let m = lp.m();
        let d = lp.d();

        b.start_at(Point::new(x0, 0.0));
        b.forward(piece);
        b.turn_right();
        b.forward(d + m);
        b.turn_right();
        b.forward(margin);
        b.notch_right(m, m);
        b.forward(margin);
        if closed {
            b.turn_right();
            b.forward(d + m);
            b.close_outline();
        } else {
            b.lift();
        }

        for offset in lp.tab_offsets() {
            b.start_at(Point::new(x0 + margin, offset));
            b.rectangle(m, TAB);
            b.close_outline();
        }
    }
}
