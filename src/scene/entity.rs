//! Scene entities: rectangles (nodes) and free points
//!
//! Both entity kinds implement [`Connectable`], the only capability a
//! connector needs from its endpoints.

use crate::types::{PinId, Pos, SignalColor, SignalState};
use serde::{Deserialize, Serialize};

/// Half-size of the square used to hit-test a point
pub const POINT_HIT_RADIUS: f64 = 5.0;

/// Which entity map an endpoint lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Node,
    Point,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Node => write!(f, "node"),
            EntityKind::Point => write!(f, "point"),
        }
    }
}

/// Something a connector can attach to
pub trait Connectable {
    fn name(&self) -> &str;

    fn kind(&self) -> EntityKind;

    /// Connection point used when the line arrives here (p1)
    fn input_point(&self) -> Pos;

    /// Connection point used when the line leaves from here (p2)
    fn output_point(&self) -> Pos;
}

/// A rectangle with two connection points and three signal flags
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// When set, the input point sits on the right edge and the output on the left
    pub points_swapped: bool,
    pub signals: SignalState,
    /// Bound input pin, if any
    pub pin: Option<PinId>,
}

impl Node {
    pub fn new(name: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            width,
            height,
            points_swapped: false,
            signals: SignalState::default(),
            pin: None,
        }
    }

    /// Builder-style pin binding
    pub fn with_pin(mut self, pin: Option<PinId>) -> Self {
        self.pin = pin;
        self
    }

    fn left_mid(&self) -> Pos {
        Pos::new(self.x, self.y + self.height / 2.0)
    }

    fn right_mid(&self) -> Pos {
        Pos::new(self.x + self.width, self.y + self.height / 2.0)
    }

    /// Input connection point (p1)
    pub fn p1(&self) -> Pos {
        if self.points_swapped {
            self.right_mid()
        } else {
            self.left_mid()
        }
    }

    /// Output connection point (p2)
    pub fn p2(&self) -> Pos {
        if self.points_swapped {
            self.left_mid()
        } else {
            self.right_mid()
        }
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn switch_points(&mut self) {
        self.points_swapped = !self.points_swapped;
    }

    pub fn signal(&self, color: SignalColor) -> bool {
        self.signals.get(color)
    }

    /// Inclusive point-in-rectangle test
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

impl Connectable for Node {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Node
    }

    fn input_point(&self) -> Pos {
        self.p1()
    }

    fn output_point(&self) -> Pos {
        self.p2()
    }
}

/// A zero-extent connector endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub visible: bool,
}

impl Point {
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            visible: true,
        }
    }

    pub fn pos(&self) -> Pos {
        Pos::new(self.x, self.y)
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    pub fn toggle_visibility(&mut self) {
        self.visible = !self.visible;
    }

    /// Hit test against a small square around the point
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (x - self.x).abs() <= POINT_HIT_RADIUS && (y - self.y).abs() <= POINT_HIT_RADIUS
    }
}

impl Connectable for Point {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Point
    }

    fn input_point(&self) -> Pos {
        self.pos()
    }

    fn output_point(&self) -> Pos {
        self.pos()
    }
}
