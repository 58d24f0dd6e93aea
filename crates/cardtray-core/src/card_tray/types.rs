//! Type definitions for the card tray generator

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::error::{ParameterError, ParameterResult};
use crate::panel::EdgeStep;

/// Width of every finger tab along its edge.
pub const TAB: f64 = 10.0;

/// Thinnest deck that still fits a full tab with clearance around it.
pub const MIN_DECK_THICKNESS: f64 = 20.0;

/// Nominal length of the relief cut at the top of the short edges.
pub const RELIEF: f64 = 5.0;

/// Run beside a divider on the single-width front pieces.
pub const STUB_MARGIN: f64 = 5.0;

/// Depth of the finger notches cut into the bottom's front edge.
pub const FINGER_NOTCH_DEPTH: f64 = 10.0;

/// How far a short divider is cut back from the front.
pub const SHORT_DIVIDER_INSET: f64 = 15.0;

/// Vertical gap between stacked dividers.
pub const DIVIDER_GAP: f64 = 5.0;

/// Deck thickness above which the distributed strategy cuts two tabs.
pub const TWO_TAB_THRESHOLD: f64 = 40.0;

/// Cards must be taller than this for the short-divider inset to clear the
/// tab. Only even trays have short dividers; odd trays just need room for
/// the tab itself.
pub const MIN_CARD_HEIGHT: f64 = 2.0 * SHORT_DIVIDER_INSET + TAB;

/// Cards must be wider than this for the finger notch and front margins.
pub const MIN_CARD_WIDTH: f64 = 2.0 * TAB;

/// Upper bound on the number of decks in one tray.
pub const MAX_DECKS: u32 = 1000;

/// How tabs are laid out along the deck-thickness edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabStrategy {
    /// One centred tab.
    #[default]
    Centered,
    /// One tab, or two once the deck is thicker than [`TWO_TAB_THRESHOLD`].
    Distributed,
}

impl fmt::Display for TabStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Centered => write!(f, "centered"),
            Self::Distributed => write!(f, "distributed"),
        }
    }
}

impl FromStr for TabStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "centered" | "centred" | "single" => Ok(Self::Centered),
            "distributed" | "variable" => Ok(Self::Distributed),
            _ => Err(format!("Unknown tab strategy: {}", s)),
        }
    }
}

/// Even/odd deck count. Selects between the two tray tracings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    pub fn of(count: u32) -> Self {
        if count % 2 == 0 {
            Parity::Even
        } else {
            Parity::Odd
        }
    }
}

/// Raw tray inputs, in millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrayParameters {
    /// Card height (`h`), the depth of each compartment.
    pub card_height: f64,
    /// Card width (`w`), the width of each compartment.
    pub card_width: f64,
    /// Deck thickness (`d`), the height of the walls.
    pub deck_thickness: f64,
    /// Material thickness (`m`).
    pub material_thickness: f64,
    /// Number of decks (`n`).
    pub deck_count: u32,
    #[serde(default)]
    pub tab_strategy: TabStrategy,
}

impl Default for TrayParameters {
    fn default() -> Self {
        Self {
            card_height: 92.0,
            card_width: 60.0,
            deck_thickness: 20.0,
            material_thickness: 3.0,
            deck_count: 5,
            tab_strategy: TabStrategy::Centered,
        }
    }
}

impl TrayParameters {
    /// Reject dimensions no tray can be built from.
    ///
    /// A thin deck is not an error here; it is raised to the minimum when
    /// the layout is computed.
    pub fn validate(&self) -> ParameterResult<()> {
        let dimensions = [
            ("card_height", self.card_height),
            ("card_width", self.card_width),
            ("deck_thickness", self.deck_thickness),
            ("material_thickness", self.material_thickness),
        ];

        for (name, value) in dimensions {
            if !value.is_finite() {
                return Err(ParameterError::NotFinite {
                    name: name.to_string(),
                });
            }
            if value <= 0.0 {
                return Err(ParameterError::NonPositive {
                    name: name.to_string(),
                    value,
                });
            }
        }

        if self.deck_count < 1 || self.deck_count > MAX_DECKS {
            return Err(ParameterError::OutOfRange {
                name: "deck_count".to_string(),
                value: self.deck_count as f64,
                min: 1.0,
                max: MAX_DECKS as f64,
            });
        }

        let parity = Parity::of(self.deck_count);
        let min_height = min_card_height(parity);
        if self.card_height <= min_height {
            return Err(ParameterError::BelowMinimum {
                name: "card_height".to_string(),
                value: self.card_height,
                min: min_height,
            });
        }

        if self.card_width <= MIN_CARD_WIDTH {
            return Err(ParameterError::BelowMinimum {
                name: "card_width".to_string(),
                value: self.card_width,
                min: MIN_CARD_WIDTH,
            });
        }

        if finger_notch_width(self.card_width, self.material_thickness, parity) <= 0.0 {
            return Err(ParameterError::Incompatible(format!(
                "card width {} leaves no room for the finger notch with {} material",
                self.card_width, self.material_thickness
            )));
        }

        Ok(())
    }
}

/// A value the generator changed to make the geometry buildable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    pub parameter: String,
    pub requested: f64,
    pub effective: f64,
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} raised from {} to {}",
            self.parameter, self.requested, self.effective
        )
    }
}

/// Split `length` around one centred tab: `(before, after)`.
///
/// `after` is derived from `before` so the three pieces always add up to
/// `length` exactly. Every panel that cuts or receives a joint along the
/// card-height axis goes through this function.
pub fn centered_tab_split(length: f64) -> (f64, f64) {
    let before = (length - TAB) / 2.0;
    let after = length - (before + TAB);
    (before, after)
}

/// Number of tabs and the gap between them on an edge of `length`.
pub fn tab_layout(length: f64, strategy: TabStrategy) -> (u32, f64) {
    let tabs = match strategy {
        TabStrategy::Distributed if length > TWO_TAB_THRESHOLD => 2,
        _ => 1,
    };
    let vspace = (length - TAB * tabs as f64) / (1.0 + tabs as f64);
    (tabs, vspace)
}

fn front_margin(m: f64, parity: Parity) -> f64 {
    match parity {
        Parity::Odd => STUB_MARGIN,
        // Double-width pieces are twice a single piece, centred on the divider.
        Parity::Even => 2.0 * STUB_MARGIN + m / 2.0,
    }
}

fn finger_notch_width(w: f64, m: f64, parity: Parity) -> f64 {
    match parity {
        Parity::Odd => w - 2.0 * STUB_MARGIN,
        Parity::Even => w - STUB_MARGIN - front_margin(m, parity),
    }
}

fn min_card_height(parity: Parity) -> f64 {
    match parity {
        Parity::Odd => TAB,
        Parity::Even => MIN_CARD_HEIGHT,
    }
}

/// Validated inputs plus every derived constant the panels share.
///
/// Computed once per tray and only ever read afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutParameters {
    h: f64,
    w: f64,
    d: f64,
    m: f64,
    n: u32,
    requested_d: f64,
    notch_back: f64,
    notch_front: f64,
    tabs: u32,
    vspace: f64,
    relief: f64,
    parity: Parity,
    tab_strategy: TabStrategy,
}

impl LayoutParameters {
    pub fn new(params: &TrayParameters) -> ParameterResult<Self> {
        params.validate()?;

        let h = params.card_height;
        let w = params.card_width;
        let m = params.material_thickness;
        let n = params.deck_count;
        let requested_d = params.deck_thickness;

        let d = requested_d.max(MIN_DECK_THICKNESS);
        if d != requested_d {
            warn!(
                requested = requested_d,
                effective = d,
                "Deck thickness below minimum, clamping"
            );
        }

        let (notch_back, notch_front) = centered_tab_split(h);
        let (tabs, vspace) = tab_layout(d, params.tab_strategy);
        let relief = RELIEF.min(vspace);
        let parity = Parity::of(n);

        Ok(Self {
            h,
            w,
            d,
            m,
            n,
            requested_d,
            notch_back,
            notch_front,
            tabs,
            vspace,
            relief,
            parity,
            tab_strategy: params.tab_strategy,
        })
    }

    /// Card height.
    pub fn h(&self) -> f64 {
        self.h
    }

    /// Card width.
    pub fn w(&self) -> f64 {
        self.w
    }

    /// Effective deck thickness, after clamping.
    pub fn d(&self) -> f64 {
        self.d
    }

    /// Material thickness.
    pub fn m(&self) -> f64 {
        self.m
    }

    /// Deck count.
    pub fn n(&self) -> u32 {
        self.n
    }

    pub fn notch_back(&self) -> f64 {
        self.notch_back
    }

    pub fn notch_front(&self) -> f64 {
        self.notch_front
    }

    pub fn tabs(&self) -> u32 {
        self.tabs
    }

    pub fn vspace(&self) -> f64 {
        self.vspace
    }

    pub fn relief(&self) -> f64 {
        self.relief
    }

    pub fn parity(&self) -> Parity {
        self.parity
    }

    pub fn tab_strategy(&self) -> TabStrategy {
        self.tab_strategy
    }

    /// The requested deck thickness when it had to be clamped.
    pub fn clamped_from(&self) -> Option<f64> {
        (self.requested_d != self.d).then_some(self.requested_d)
    }

    pub fn adjustments(&self) -> Vec<Adjustment> {
        self.clamped_from()
            .map(|requested| Adjustment {
                parameter: "deck_thickness".to_string(),
                requested,
                effective: self.d,
            })
            .into_iter()
            .collect()
    }

    /// Width of the bottom and back panels.
    pub fn tray_width(&self) -> f64 {
        (self.n as f64 + 1.0) * self.m + self.n as f64 * self.w
    }

    /// Distance between neighbouring dividers.
    pub fn pitch(&self) -> f64 {
        self.w + self.m
    }

    /// Tab start offsets along a deck-thickness edge, measured from the top.
    pub fn tab_offsets(&self) -> Vec<f64> {
        (0..self.tabs)
            .map(|k| self.vspace + k as f64 * (TAB + self.vspace))
            .collect()
    }

    /// Whether divider `index` is cut back at the front.
    pub fn is_short_divider(&self, index: u32) -> bool {
        self.parity == Parity::Even && index % 2 == 0
    }

    pub fn divider_count(&self) -> u32 {
        self.n + 1
    }

    /// Length of divider `index` along the card-height axis.
    pub fn divider_length(&self, index: u32) -> f64 {
        if self.is_short_divider(index) {
            self.h - SHORT_DIVIDER_INSET
        } else {
            self.h
        }
    }

    /// Number of separate front pieces.
    pub fn front_piece_count(&self) -> u32 {
        match self.parity {
            Parity::Odd => self.n + 1,
            Parity::Even => self.n / 2,
        }
    }

    /// Run beside a divider on the front pieces that straddle it.
    pub fn front_margin(&self) -> f64 {
        front_margin(self.m, self.parity)
    }

    /// Width of a front piece that straddles a divider.
    pub fn front_piece_width(&self) -> f64 {
        2.0 * self.front_margin() + self.m
    }

    /// Width of the finger notch cut into the bottom in front of each deck.
    pub fn finger_notch_width(&self) -> f64 {
        finger_notch_width(self.w, self.m, self.parity)
    }

    /// Steps along a deck-thickness edge, top to bottom.
    ///
    /// `joint` picks the kind of cut at each tab offset (`None` for a plain
    /// edge); `relief` adds the corner relief at the top. Reverse the steps to
    /// walk the same edge bottom to top.
    pub fn short_edge(&self, joint: Option<Joint>, relief: bool) -> Vec<EdgeStep> {
        let mut steps = Vec::new();
        let mut pos = 0.0;

        if relief && self.relief > 0.0 {
            steps.push(EdgeStep::Slot {
                width: self.relief,
                depth: self.m,
            });
            pos = self.relief;
        }

        if let Some(joint) = joint {
            for offset in self.tab_offsets() {
                steps.push(EdgeStep::Run(offset - pos));
                steps.push(joint.step(self.m));
                pos = offset + TAB;
            }
        }

        steps.push(EdgeStep::Run(self.d - pos));
        steps
    }
}

/// Which side of a joint an edge carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Joint {
    /// The tab that pokes into a mating panel.
    Tab,
    /// The slot that receives a mating tab.
    Slot,
}

impl Joint {
    pub fn step(self, depth: f64) -> EdgeStep {
        match self {
            Joint::Tab => EdgeStep::Tab { width: TAB, depth },
            Joint::Slot => EdgeStep::Slot { width: TAB, depth },
        }
    }
}
