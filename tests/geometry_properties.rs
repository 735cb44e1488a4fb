//! Property tests for node geometry and connector bookkeeping

mod common;

use common::assert_float_eq;
use common::builders::{NodeBuilder, SceneBuilder};
use gpio_diagram::gpio::Gpio;
use gpio_diagram::scene::Node;
use proptest::prelude::*;

fn coord() -> impl Strategy<Value = f64> {
    -1000.0..1000.0f64
}

fn extent() -> impl Strategy<Value = f64> {
    0.5..500.0f64
}

proptest! {
    #[test]
    fn prop_points_differ_when_width_positive(
        x in coord(), y in coord(), w in extent(), h in extent()
    ) {
        let node = Node::new("n", x, y, w, h);
        prop_assert_ne!(node.p1(), node.p2());
        assert_float_eq(node.p1().y, y + h / 2.0, 1e-9);
        prop_assert!(node.p1().x < node.p2().x);
    }

    #[test]
    fn prop_switch_points_exchanges_pair(
        x in coord(), y in coord(), w in extent(), h in extent(), switches in 0usize..5
    ) {
        let mut node = Node::new("n", x, y, w, h);
        let (p1, p2) = (node.p1(), node.p2());
        node.switch_points();
        prop_assert_eq!((node.p1(), node.p2()), (p2, p1));

        for _ in 0..switches {
            node.switch_points();
        }
        let expected = if switches % 2 == 0 { (p2, p1) } else { (p1, p2) };
        prop_assert_eq!((node.p1(), node.p2()), expected);
    }

    #[test]
    fn prop_connect_then_disconnect(
        ax in coord(), bx in coord(), swap in any::<bool>()
    ) {
        let mut gpio = Gpio::simulated();
        let mut scene = SceneBuilder::new()
            .node(NodeBuilder::new("a").at(ax, 0.0))
            .node(NodeBuilder::new("b").at(bx, 100.0))
            .point("p", 0.0, 0.0)
            .connect("p", "a")
            .build(&mut gpio);

        let name = scene.connect("a", "b").unwrap();
        let conns = scene.get_connections("a").unwrap();
        prop_assert!(conns.iter().any(|c| c.peer == "b" && c.is_output && c.connector == name));

        let (first, second) = if swap { ("b", "a") } else { ("a", "b") };
        prop_assert_eq!(scene.disconnect(first, second), Some(name));
        prop_assert!(!scene.get_connections("a").unwrap().iter().any(|c| c.peer == "b"));
        prop_assert_eq!(scene.connector_count(), 1);
    }

    #[test]
    fn prop_move_keeps_connector_on_endpoints(
        x in coord(), y in coord(), w in extent(), h in extent()
    ) {
        let mut gpio = Gpio::simulated();
        let mut scene = SceneBuilder::new()
            .node(NodeBuilder::new("src"))
            .node(NodeBuilder::new("dst").at(300.0, 0.0))
            .connect("src", "dst")
            .build(&mut gpio);

        scene.move_entity("dst", x, y).unwrap();
        scene.resize("dst", w, h).unwrap();

        let dst = scene.node("dst").unwrap().clone();
        let line = scene.connector("Line_src_to_dst").unwrap();
        prop_assert_eq!(line.terminus(), dst.p1());
        prop_assert_eq!(line.origin(), scene.node("src").unwrap().p2());
    }
}
