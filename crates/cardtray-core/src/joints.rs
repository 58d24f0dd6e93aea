//! Finger joint primitives
//!
//! Every tab, slot and hole in the tray is built from these few moves. A
//! notch is a three-sided detour off the current edge: `width` runs along
//! the direction of travel and `height` is the perpendicular depth. The
//! cursor always comes back onto the baseline, `width` further along, with
//! its heading unchanged.
//!
//! Outlines are traced clockwise, which keeps the panel material on the
//! right of the cursor: `notch_left` therefore draws a tab that sticks out
//! of the panel and `notch_right` cuts a slot into it.

use crate::cursor::Cursor;

pub trait JointPrimitives {
    /// Three-sided step to the left of the direction of travel.
    fn notch_left(&mut self, width: f64, height: f64);

    /// Three-sided step to the right of the direction of travel.
    fn notch_right(&mut self, width: f64, height: f64);

    /// Sidestep `depth` to the left, keeping the heading.
    fn jog_left(&mut self, depth: f64);

    /// Sidestep `depth` to the right, keeping the heading.
    fn jog_right(&mut self, depth: f64);

    /// Closed box, `length` along the heading and `width` to the right.
    /// Leaves the cursor where it started, facing the same way.
    fn rectangle(&mut self, length: f64, width: f64);
}

impl JointPrimitives for Cursor {
    fn notch_left(&mut self, width: f64, height: f64) {
        self.turn_left();
        self.forward(height);
        self.turn_right();
        self.forward(width);
        self.turn_right();
        self.forward(height);
        self.turn_left();
    }

    fn notch_right(&mut self, width: f64, height: f64) {
        self.turn_right();
        self.forward(height);
        self.turn_left();
        self.forward(width);
        self.turn_left();
        self.forward(height);
        self.turn_right();
    }

    fn jog_left(&mut self, depth: f64) {
        self.turn_left();
        self.forward(depth);
        self.turn_right();
    }

    fn jog_right(&mut self, depth: f64) {
        self.turn_right();
        self.forward(depth);
        self.turn_left();
    }

    fn rectangle(&mut self, length: f64, width: f64) {
        for side in [length, width, length, width] {
            self.forward(side);
            self.turn_right();
        }
    }
}
