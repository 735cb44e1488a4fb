//! Test data builders for creating scenes

use gpio_diagram::gpio::Gpio;
use gpio_diagram::scene::SceneGraph;
use gpio_diagram::types::PinId;

/// Builder for a single rectangle
#[derive(Debug, Clone)]
pub struct NodeBuilder {
    name: String,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    pin: Option<PinId>,
}

impl NodeBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 50.0,
            pin: None,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn pin(mut self, pin: PinId) -> Self {
        self.pin = Some(pin);
        self
    }
}

/// Builder for whole scenes; connections are made after all entities exist
#[derive(Debug, Default)]
pub struct SceneBuilder {
    nodes: Vec<NodeBuilder>,
    points: Vec<(String, f64, f64)>,
    connections: Vec<(String, String)>,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(mut self, node: NodeBuilder) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn point(mut self, name: &str, x: f64, y: f64) -> Self {
        self.points.push((name.to_string(), x, y));
        self
    }

    pub fn connect(mut self, from: &str, to: &str) -> Self {
        self.connections.push((from.to_string(), to.to_string()));
        self
    }

    pub fn build(self, gpio: &mut Gpio) -> SceneGraph {
        let mut scene = SceneGraph::new();
        for n in self.nodes {
            scene
                .add_or_update_node(&n.name, n.x, n.y, n.width, n.height, n.pin, gpio)
                .expect("node should be created");
        }
        for (name, x, y) in self.points {
            scene.add_point(&name, x, y).expect("point should be created");
        }
        for (from, to) in self.connections {
            scene.connect(&from, &to).expect("connection should be created");
        }
        scene
    }
}

/// r1 (0,0,100,50) and r2 (200,0,100,50), connected r1 -> r2
pub fn two_node_scene(gpio: &mut Gpio) -> SceneGraph {
    SceneBuilder::new()
        .node(NodeBuilder::new("r1"))
        .node(NodeBuilder::new("r2").at(200.0, 0.0))
        .connect("r1", "r2")
        .build(gpio)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_builder() {
        let mut gpio = Gpio::simulated();
        let scene = SceneBuilder::new()
            .node(NodeBuilder::new("n1").pin(5))
            .point("p1", 10.0, 10.0)
            .connect("p1", "n1")
            .build(&mut gpio);

        assert_eq!(scene.node("n1").unwrap().pin, Some(5));
        assert_eq!(scene.connector_count(), 1);
    }
}
