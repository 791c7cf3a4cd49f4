//! Connector geometry between block cards.
//!
//! Blocks are rectangles of one shared [`CardSize`], addressed by their
//! top-left [`Position`]. An edge leaves from the midpoint of one side of
//! its source card and arrives at the midpoint of one side of its target
//! card, following a cubic Bézier whose control points push out
//! perpendicular to the departure side.

use serde::{Deserialize, Serialize};

use crate::core::block::Position;

/// Lower bound of the control-point offset.
pub const MIN_CONTROL_OFFSET: f64 = 24.0;
/// Upper bound of the control-point offset.
pub const MAX_CONTROL_OFFSET: f64 = 56.0;
/// Control-point offset as a share of the distance along the departure axis.
pub const CONTROL_OFFSET_RATIO: f64 = 0.22;

/// A point in board coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Size shared by every block card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardSize {
    pub width: f64,
    pub height: f64,
}

impl CardSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Center of a card whose top-left corner sits at `position`.
    pub fn center(&self, position: Position) -> Point {
        Point::new(
            position.x + self.width / 2.0,
            position.y + self.height / 2.0,
        )
    }
}

impl Default for CardSize {
    fn default() -> Self {
        Self::new(240.0, 120.0)
    }
}

/// One of the four sides of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }

    /// Outward unit direction of the side.
    fn outward(&self) -> (f64, f64) {
        match self {
            Side::Left => (-1.0, 0.0),
            Side::Right => (1.0, 0.0),
            Side::Top => (0.0, -1.0),
            Side::Bottom => (0.0, 1.0),
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
            Side::Top => write!(f, "top"),
            Side::Bottom => write!(f, "bottom"),
        }
    }
}

/// Midpoint of `side` on a card whose top-left corner is `position`.
pub fn anchor_point(position: Position, card: CardSize, side: Side) -> Point {
    let Position { x, y } = position;
    match side {
        Side::Left => Point::new(x, y + card.height / 2.0),
        Side::Right => Point::new(x + card.width, y + card.height / 2.0),
        Side::Top => Point::new(x + card.width / 2.0, y),
        Side::Bottom => Point::new(x + card.width / 2.0, y + card.height),
    }
}

/// Sides to connect when drawing from card `a` to card `b`.
///
/// Compares the offset between the two centers: horizontal wins ties.
/// Coincident cards connect `right -> left`.
pub fn choose_sides(a: Position, b: Position, card: CardSize) -> (Side, Side) {
    let from = card.center(a);
    let to = card.center(b);
    let dx = to.x - from.x;
    let dy = to.y - from.y;

    if dx.abs() >= dy.abs() {
        if dx >= 0.0 {
            (Side::Right, Side::Left)
        } else {
            (Side::Left, Side::Right)
        }
    } else if dy >= 0.0 {
        (Side::Bottom, Side::Top)
    } else {
        (Side::Top, Side::Bottom)
    }
}

/// A cubic Bézier segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicCurve {
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

impl CubicCurve {
    /// Evaluate the curve at parameter `t` in `[0, 1]`.
    pub fn point_at(&self, t: f64) -> Point {
        let u = 1.0 - t;
        let w0 = u * u * u;
        let w1 = 3.0 * u * u * t;
        let w2 = 3.0 * u * t * t;
        let w3 = t * t * t;
        Point::new(
            w0 * self.start.x + w1 * self.control1.x + w2 * self.control2.x + w3 * self.end.x,
            w0 * self.start.y + w1 * self.control1.y + w2 * self.control2.y + w3 * self.end.y,
        )
    }

    pub fn midpoint(&self) -> Point {
        self.point_at(0.5)
    }

    /// SVG path data: `M start C control1, control2, end`.
    pub fn to_svg_path(&self) -> String {
        format!(
            "M {} {} C {} {}, {} {}, {} {}",
            self.start.x,
            self.start.y,
            self.control1.x,
            self.control1.y,
            self.control2.x,
            self.control2.y,
            self.end.x,
            self.end.y
        )
    }
}

/// Control-point offset for a curve leaving `start_side`.
fn control_offset(start: Point, end: Point, start_side: Side) -> f64 {
    let span = if start_side.is_horizontal() {
        (end.x - start.x).abs()
    } else {
        (end.y - start.y).abs()
    };
    (span * CONTROL_OFFSET_RATIO).clamp(MIN_CONTROL_OFFSET, MAX_CONTROL_OFFSET)
}

/// Cubic Bézier from `start` to `end`, departing perpendicular to `start_side`.
///
/// The first control point is pushed outward from `start` along the side's
/// axis and the second is pushed the same distance back from `end`.
pub fn build_curve(start: Point, end: Point, start_side: Side) -> CubicCurve {
    let offset = control_offset(start, end, start_side);
    let (ux, uy) = start_side.outward();
    CubicCurve {
        start,
        control1: start.offset(ux * offset, uy * offset),
        control2: end.offset(-ux * offset, -uy * offset),
        end,
    }
}

/// Point at `t = 0.5` on the curve [`build_curve`] produces for the same input.
pub fn curve_midpoint(start: Point, end: Point, start_side: Side) -> Point {
    build_curve(start, end, start_side).midpoint()
}
