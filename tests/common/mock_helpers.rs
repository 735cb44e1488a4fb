//! Shared GPIO and poller helpers

use std::time::Duration;

use gpio_diagram::gpio::{Gpio, SharedGpio};
use gpio_diagram::poll::{noop_wakeup, PollHandle};
use gpio_diagram::scene::{SceneGraph, SharedScene};

/// Gpio reading from the mock table with simulation switched off
pub fn live_mock_gpio() -> Gpio {
    Gpio::new(false)
}

/// Share a scene and its gpio, then start a fast poller over them
pub fn spawn_test_poller(
    scene: SceneGraph,
    gpio: Gpio,
    interval: Duration,
) -> (SharedScene, SharedGpio, PollHandle) {
    let scene = scene.into_shared();
    let gpio = gpio.into_shared();
    let handle = PollHandle::spawn(scene.clone(), gpio.clone(), interval, noop_wakeup())
        .expect("poll thread should start");
    (scene, gpio, handle)
}
