//! Turtle-style drafting cursor
//!
//! The cursor keeps an absolute position, one of four headings and a pen
//! state. Every `forward` taken with the pen down is recorded; lifting the
//! pen (or teleporting) ends the current polyline so disconnected cuts never
//! get joined. The canvas is y-down, so turning right is clockwise as seen
//! in the output.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on the panel plane, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The point displaced by `(dx, dy)`.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned drafting direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    East,
    North,
    West,
    South,
}

impl Heading {
    /// Unit step for this heading on the y-down canvas.
    pub fn unit_vector(self) -> (f64, f64) {
        match self {
            Heading::East => (1.0, 0.0),
            Heading::North => (0.0, -1.0),
            Heading::West => (-1.0, 0.0),
            Heading::South => (0.0, 1.0),
        }
    }

    /// Counter-clockwise quarter turn.
    pub fn left(self) -> Self {
        match self {
            Heading::East => Heading::North,
            Heading::North => Heading::West,
            Heading::West => Heading::South,
            Heading::South => Heading::East,
        }
    }

    /// Clockwise quarter turn.
    pub fn right(self) -> Self {
        match self {
            Heading::East => Heading::South,
            Heading::South => Heading::West,
            Heading::West => Heading::North,
            Heading::North => Heading::East,
        }
    }
}

/// A drawn line between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSegment {
    pub start: Point,
    pub end: Point,
}

impl PathSegment {
    pub fn length(&self) -> f64 {
        self.start.distance_to(self.end)
    }
}

/// Drafting state: position, heading and pen, plus the recorded polylines.
#[derive(Debug, Clone)]
pub struct Cursor {
    position: Point,
    heading: Heading,
    pen_down: bool,
    polylines: Vec<Vec<Point>>,
    // Next drawn segment must open a new polyline.
    detached: bool,
}

impl Cursor {
    /// A cursor at `start`, heading East with the pen down.
    pub fn new(start: Point) -> Self {
        Self {
            position: start,
            heading: Heading::East,
            pen_down: true,
            polylines: Vec::new(),
            detached: true,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn is_pen_down(&self) -> bool {
        self.pen_down
    }

    /// Advance by `distance` along the current heading, drawing if the pen is down.
    pub fn forward(&mut self, distance: f64) {
        debug_assert!(
            distance >= 0.0,
            "negative forward distance {distance} is not supported"
        );

        let (dx, dy) = self.heading.unit_vector();
        let target = self.position.offset(dx * distance, dy * distance);

        if self.pen_down {
            if self.detached || self.polylines.is_empty() {
                self.polylines.push(vec![self.position]);
                self.detached = false;
            }
            if let Some(line) = self.polylines.last_mut() {
                line.push(target);
            }
        }

        self.position = target;
    }

    pub fn turn_left(&mut self) {
        self.heading = self.heading.left();
    }

    pub fn turn_right(&mut self) {
        self.heading = self.heading.right();
    }

    /// Jump to `point` facing `heading` without drawing.
    pub fn teleport_to(&mut self, point: Point, heading: Heading) {
        self.position = point;
        self.heading = heading;
        self.detached = true;
    }

    pub fn set_heading(&mut self, heading: Heading) {
        self.heading = heading;
    }

    pub fn pen_up(&mut self) {
        self.pen_down = false;
        self.detached = true;
    }

    pub fn pen_down(&mut self) {
        self.pen_down = true;
    }

    /// Recorded polylines, in drawing order.
    pub fn polylines(&self) -> &[Vec<Point>] {
        &self.polylines
    }

    /// Every recorded segment, in drawing order.
    pub fn segments(&self) -> Vec<PathSegment> {
        self.polylines
            .iter()
            .flat_map(|line| {
                line.windows(2).map(|pair| PathSegment {
                    start: pair[0],
                    end: pair[1],
                })
            })
            .collect()
    }

    pub fn into_polylines(self) -> Vec<Vec<Point>> {
        self.polylines
    }
}
