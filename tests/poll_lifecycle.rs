//! Integration tests for the pin poll thread
//!
//! These tests validate the complete poll workflow:
//! - Spawning and bounded shutdown
//! - Mock pin levels reaching the red flag
//! - Messages and commands over the channels

mod common;

use std::time::Duration;

use common::builders::{NodeBuilder, SceneBuilder};
use common::mock_helpers::{live_mock_gpio, spawn_test_poller};
use common::{test_timeout, wait_until};
use gpio_diagram::gpio::lock_gpio;
use gpio_diagram::poll::PollMessage;
use gpio_diagram::scene::read_scene;
use gpio_diagram::types::PinLevel;

#[test]
fn test_poller_mirrors_mock_pin_into_red_flag() {
    let mut gpio = live_mock_gpio();
    let scene = SceneBuilder::new()
        .node(NodeBuilder::new("n1").pin(5))
        .node(NodeBuilder::new("unbound").at(200.0, 0.0))
        .build(&mut gpio);
    gpio.set_mock_value(5, PinLevel::High);

    let (scene, _gpio, mut handle) = spawn_test_poller(scene, gpio, Duration::from_millis(20));

    assert!(wait_until(test_timeout(), || {
        read_scene(&scene).map(|s| s.node("n1").unwrap().signals.red).unwrap_or(false)
    }));
    assert!(!read_scene(&scene).unwrap().node("unbound").unwrap().signals.red);

    let messages = handle.drain();
    assert!(messages.contains(&PollMessage::SignalChanged {
        node: "n1".into(),
        red: true,
    }));
    assert!(messages.contains(&PollMessage::Redraw));

    assert!(handle.stop(test_timeout()));
    assert!(!handle.is_running());
}

#[test]
fn test_poll_now_picks_up_change_before_interval() {
    let mut gpio = live_mock_gpio();
    let scene = SceneBuilder::new()
        .node(NodeBuilder::new("n1").pin(7))
        .build(&mut gpio);

    // Long interval: only PollNow can trigger the second cycle in time
    let (scene, gpio, mut handle) = spawn_test_poller(scene, gpio, Duration::from_secs(30));

    lock_gpio(&gpio).unwrap().set_mock_value(7, PinLevel::High);
    handle.poll_now();

    assert!(wait_until(test_timeout(), || {
        read_scene(&scene).unwrap().node("n1").unwrap().signals.red
    }));
    assert!(handle.stop(test_timeout()));
}

#[test]
fn test_stop_is_prompt_with_long_interval() {
    let mut gpio = live_mock_gpio();
    let scene = SceneBuilder::new().build(&mut gpio);

    let (_scene, _gpio, mut handle) = spawn_test_poller(scene, gpio, Duration::from_secs(60));
    let started = std::time::Instant::now();
    assert!(handle.stop(Duration::from_secs(1)));
    assert!(started.elapsed() < Duration::from_secs(1));

    // Stopping twice is harmless
    assert!(handle.stop(Duration::from_millis(10)));
}

#[test]
fn test_editing_while_polling() {
    let mut gpio = live_mock_gpio();
    let scene = SceneBuilder::new()
        .node(NodeBuilder::new("n1").pin(9))
        .build(&mut gpio);

    let (scene, gpio, mut handle) = spawn_test_poller(scene, gpio, Duration::from_millis(10));

    for i in 0..20 {
        let mut s = gpio_diagram::scene::write_scene(&scene).unwrap();
        let mut g = lock_gpio(&gpio).unwrap();
        s.move_entity("n1", i as f64, 0.0).unwrap();
        g.set_mock_value(9, PinLevel::from(i % 2 == 0));
    }

    assert!(handle.stop(test_timeout()));
    let s = read_scene(&scene).unwrap();
    assert_eq!(s.node("n1").unwrap().x, 19.0);
}
