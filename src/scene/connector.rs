//! Directed connector lines between two connectable entities

use super::entity::{Connectable, EntityKind};
use crate::types::Pos;
use serde::{Deserialize, Serialize};

/// Derived connector name for a start/end pair
pub fn connector_name(start: &str, end: &str) -> String {
    format!("Line_{}_to_{}", start, end)
}

/// Non-owning reference to a connector endpoint
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EndpointRef {
    pub kind: EntityKind,
    pub name: String,
}

impl EndpointRef {
    pub fn new(kind: EntityKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    /// Reference to an existing entity
    pub fn of(entity: &dyn Connectable) -> Self {
        Self::new(entity.kind(), entity.name())
    }
}

/// A directed line between two entities
///
/// Line coordinates are cached and only change when
/// [`update_coordinates`](Connector::update_coordinates) runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    pub name: String,
    pub start: EndpointRef,
    pub end: EndpointRef,
    /// Leave from the start's output point (and arrive at the end's input)
    pub start_is_output: bool,
    origin: Pos,
    terminus: Pos,
}

impl Connector {
    pub fn new(
        name: impl Into<String>,
        start: &dyn Connectable,
        end: &dyn Connectable,
        start_is_output: bool,
    ) -> Self {
        let mut connector = Self {
            name: name.into(),
            start: EndpointRef::of(start),
            end: EndpointRef::of(end),
            start_is_output,
            origin: Pos::default(),
            terminus: Pos::default(),
        };
        connector.update_coordinates(start, end);
        connector
    }

    /// Recompute the cached line from the current endpoint geometry
    pub fn update_coordinates(&mut self, start: &dyn Connectable, end: &dyn Connectable) {
        if self.start_is_output {
            self.origin = start.output_point();
            self.terminus = end.input_point();
        } else {
            self.origin = start.input_point();
            self.terminus = end.output_point();
        }
    }

    pub fn origin(&self) -> Pos {
        self.origin
    }

    pub fn terminus(&self) -> Pos {
        self.terminus
    }

    /// Whether either end refers to the given entity
    pub fn touches(&self, endpoint: &EndpointRef) -> bool {
        &self.start == endpoint || &self.end == endpoint
    }
}

#[cfg(test)]
mod tests {
    use super::super::entity::{Node, Point};
    use super::*;

    #[test]
    fn test_connector_name() {
        assert_eq!(connector_name("r1", "r2"), "Line_r1_to_r2");
    }

    #[test]
    fn test_output_orientation() {
        let a = Node::new("r1", 0.0, 0.0, 100.0, 50.0);
        let b = Node::new("r2", 200.0, 0.0, 100.0, 50.0);
        let line = Connector::new("Line_r1_to_r2", &a, &b, true);
        assert_eq!(line.origin(), Pos::new(100.0, 25.0));
        assert_eq!(line.terminus(), Pos::new(200.0, 25.0));
    }

    #[test]
    fn test_input_orientation() {
        let a = Node::new("r1", 0.0, 0.0, 100.0, 50.0);
        let b = Node::new("r2", 200.0, 0.0, 100.0, 50.0);
        let line = Connector::new("Line_r1_to_r2", &a, &b, false);
        assert_eq!(line.origin(), Pos::new(0.0, 25.0));
        assert_eq!(line.terminus(), Pos::new(300.0, 25.0));
    }

    #[test]
    fn test_cache_only_changes_on_update() {
        let mut a = Node::new("r1", 0.0, 0.0, 100.0, 50.0);
        let p = Point::new("p1", 300.0, 300.0);
        let mut line = Connector::new("Line_r1_to_p1", &a, &p, true);

        a.move_to(50.0, 0.0);
        assert_eq!(line.origin(), Pos::new(100.0, 25.0));
        line.update_coordinates(&a, &p);
        assert_eq!(line.origin(), Pos::new(150.0, 25.0));
        assert_eq!(line.terminus(), Pos::new(300.0, 300.0));
    }

    #[test]
    fn test_touches() {
        let a = Node::new("x", 0.0, 0.0, 10.0, 10.0);
        let p = Point::new("p", 20.0, 20.0);
        let line = Connector::new("Line_x_to_p", &a, &p, true);
        assert!(line.touches(&EndpointRef::new(EntityKind::Node, "x")));
        assert!(line.touches(&EndpointRef::new(EntityKind::Point, "p")));
        // Same name, other map
        assert!(!line.touches(&EndpointRef::new(EntityKind::Point, "x")));
    }
}
