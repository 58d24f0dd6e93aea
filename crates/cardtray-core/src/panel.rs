//! Panel drafting sessions
//!
//! A [`PanelBuilder`] owns one [`Cursor`] for the lifetime of a single panel.
//! [`PanelBuilder::draft`] hands the builder to a drafting closure and always
//! finalizes it afterwards: on success the recorded polylines become a
//! [`Panel`] with its bounding box, on failure the partial path is dropped.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Deref, DerefMut};
use tracing::debug;

use crate::cursor::{Cursor, Heading, Point};
use crate::error::{TrayError, TrayResult};
use crate::joints::JointPrimitives;

/// Largest gap tolerated between the ends of a closed outline.
pub const CLOSURE_TOLERANCE: f64 = 1e-6;

/// Which tray piece a panel is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelKind {
    Divider,
    Bottom,
    Back,
    Front,
}

impl PanelKind {
    /// Identifier used in file names.
    pub fn name(self) -> &'static str {
        match self {
            PanelKind::Divider => "divider",
            PanelKind::Bottom => "bottom",
            PanelKind::Back => "back",
            PanelKind::Front => "front",
        }
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelKind::Divider => write!(f, "Dividers"),
            PanelKind::Bottom => write!(f, "Bottom"),
            PanelKind::Back => write!(f, "Back"),
            PanelKind::Front => write!(f, "Front"),
        }
    }
}

/// One polyline of a panel's cut path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubPath {
    pub points: Vec<Point>,
    /// The polyline is a complete outline and must end where it starts.
    pub closed: bool,
}

impl SubPath {
    /// Distance between the last and the first point.
    pub fn closure_gap(&self) -> f64 {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => first.distance_to(*last),
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn of<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        let mut bounds: Option<Bounds> = None;
        for p in points {
            let b = bounds.get_or_insert(Bounds {
                min_x: p.x,
                min_y: p.y,
                max_x: p.x,
                max_y: p.y,
            });
            b.min_x = b.min_x.min(p.x);
            b.min_y = b.min_y.min(p.y);
            b.max_x = b.max_x.max(p.x);
            b.max_y = b.max_y.max(p.y);
        }
        bounds
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Round up to the next whole unit, leaving values that are already whole
/// (up to float noise) alone.
pub fn round_up(value: f64) -> f64 {
    (value - 1e-9).ceil().max(0.0)
}

/// The finished cut path of one tray piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub kind: PanelKind,
    /// Bounding box width, rounded up to a whole millimetre.
    pub width: f64,
    /// Bounding box height, rounded up to a whole millimetre.
    pub height: f64,
    /// Exact bounds of every recorded point.
    pub bounds: Bounds,
    pub paths: Vec<SubPath>,
}

impl Panel {
    pub fn closed_paths(&self) -> impl Iterator<Item = &SubPath> {
        self.paths.iter().filter(|path| path.closed)
    }
}

/// One piece of a precomputed edge, interpreted by [`PanelBuilder::trace`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeStep {
    /// Straight run.
    Run(f64),
    /// Tab sticking out of the panel.
    Tab { width: f64, depth: f64 },
    /// Slot cut into the panel.
    Slot { width: f64, depth: f64 },
}

impl EdgeStep {
    /// Distance covered along the edge.
    pub fn advance(&self) -> f64 {
        match *self {
            EdgeStep::Run(length) => length,
            EdgeStep::Tab { width, .. } | EdgeStep::Slot { width, .. } => width,
        }
    }
}

/// A drafting session bound to one output panel.
pub struct PanelBuilder {
    kind: PanelKind,
    cursor: Cursor,
    // Polyline count when the current sub-path was started.
    subpath_start: usize,
    closed: Vec<usize>,
    finished: bool,
}

impl PanelBuilder {
    pub fn new(kind: PanelKind, start: Point) -> Self {
        Self {
            kind,
            cursor: Cursor::new(start),
            subpath_start: 0,
            closed: Vec::new(),
            finished: false,
        }
    }

    /// Run `draw` against a fresh builder and finalize it into a panel.
    pub fn draft<F>(kind: PanelKind, start: Point, draw: F) -> TrayResult<Panel>
    where
        F: FnOnce(&mut PanelBuilder) -> TrayResult<()>,
    {
        let mut builder = PanelBuilder::new(kind, start);
        match draw(&mut builder) {
            Ok(()) => builder.finish(),
            Err(e) => {
                debug!(panel = kind.name(), error = %e, "Discarding partial panel");
                builder.finished = true;
                Err(e)
            }
        }
    }

    /// Current cursor position.
    pub fn here(&self) -> Point {
        self.cursor.position()
    }

    pub fn east(&mut self) {
        self.cursor.set_heading(Heading::East);
    }

    pub fn north(&mut self) {
        self.cursor.set_heading(Heading::North);
    }

    pub fn west(&mut self) {
        self.cursor.set_heading(Heading::West);
    }

    pub fn south(&mut self) {
        self.cursor.set_heading(Heading::South);
    }

    /// Jump to `point` without drawing, keeping the heading.
    pub fn move_to(&mut self, point: Point) {
        let heading = self.cursor.heading();
        self.cursor.teleport_to(point, heading);
    }

    /// Jump by `(dx, dy)` without drawing, keeping the heading.
    pub fn shift_by(&mut self, dx: f64, dy: f64) {
        let target = self.here().offset(dx, dy);
        self.move_to(target);
    }

    /// Begin a new sub-path at `point`, heading East with the pen down.
    pub fn start_at(&mut self, point: Point) {
        self.cursor.teleport_to(point, Heading::East);
        self.begin();
    }

    /// Lower the pen, opening a new sub-path at the current position.
    pub fn begin(&mut self) {
        self.cursor.pen_up();
        self.subpath_start = self.cursor.polylines().len();
        self.cursor.pen_down();
    }

    /// End the current sub-path as a complete outline; it is checked for
    /// closure when the panel is finished.
    pub fn close_outline(&mut self) {
        let count = self.cursor.polylines().len();
        if count > self.subpath_start {
            self.closed.push(count - 1);
        }
        self.lift();
    }

    /// End the current sub-path as an open trace.
    pub fn lift(&mut self) {
        self.cursor.pen_up();
        self.subpath_start = self.cursor.polylines().len();
    }

    /// Follow a precomputed edge description from the current position.
    pub fn trace(&mut self, steps: &[EdgeStep]) {
        for step in steps {
            match *step {
                EdgeStep::Run(length) if length > 0.0 => self.cursor.forward(length),
                EdgeStep::Run(_) => {}
                EdgeStep::Tab { width, depth } => self.cursor.notch_left(width, depth),
                EdgeStep::Slot { width, depth } => self.cursor.notch_right(width, depth),
            }
        }
    }

    /// Compute the bounding box, verify closed outlines and return the panel.
    pub fn finish(mut self) -> TrayResult<Panel> {
        self.finished = true;
        let kind = self.kind;
        let closed = std::mem::take(&mut self.closed);
        let cursor = std::mem::replace(&mut self.cursor, Cursor::new(Point::default()));

        let paths: Vec<SubPath> = cursor
            .into_polylines()
            .into_iter()
            .enumerate()
            .map(|(idx, points)| SubPath {
                points,
                closed: closed.contains(&idx),
            })
            .collect();

        for (idx, path) in paths.iter().enumerate().filter(|(_, p)| p.closed) {
            let gap = path.closure_gap();
            if gap > CLOSURE_TOLERANCE || path.points.len() < 4 {
                return Err(TrayError::GeometryIntegrity {
                    panel: kind.name().to_string(),
                    path: idx,
                    gap,
                });
            }
        }

        let bounds = Bounds::of(paths.iter().flat_map(|path| path.points.iter()))
            .ok_or_else(|| TrayError::EmptyPanel(kind.name().to_string()))?;

        let panel = Panel {
            kind,
            width: round_up(bounds.width()),
            height: round_up(bounds.height()),
            bounds,
            paths,
        };

        debug!(
            panel = kind.name(),
            width = panel.width,
            height = panel.height,
            paths = panel.paths.len(),
            "Finished panel"
        );

        Ok(panel)
    }
}

impl Deref for PanelBuilder {
    type Target = Cursor;

    fn deref(&self) -> &Cursor {
        &self.cursor
    }
}

impl DerefMut for PanelBuilder {
    fn deref_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }
}

impl Drop for PanelBuilder {
    fn drop(&mut self) {
        if !self.finished {
            debug!(
                panel = self.kind.name(),
                polylines = self.cursor.polylines().len(),
                "Panel builder dropped before finish"
            );
        }
    }
}
