//! Pin poller worker
//!
//! Runs on its own thread and mirrors every bound pin into its node's red
//! flag once per interval. Between cycles the worker waits on the command
//! channel, so commands (including shutdown) are handled without waiting
//! for the interval to elapse.
//!
//! # Lock discipline
//!
//! A cycle never holds two locks at once:
//!
//! 1. Scene read lock: snapshot the `(node, pin)` bindings
//! 2. GPIO lock: read every pin
//! 3. Scene write lock: apply the levels

use super::{PollCommand, PollMessage, Wakeup, MIN_POLL_INTERVAL};
use crate::error::Result;
use crate::gpio::{lock_gpio, SharedGpio};
use crate::scene::{read_scene, write_scene, SharedScene};
use crate::types::{PinId, PinLevel};
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TrySendError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Result of one poll cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleSummary {
    /// Pins read successfully
    pub reads: usize,
    /// Pins whose read failed
    pub errors: usize,
    /// Nodes whose red flag changed
    pub changed: usize,
}

/// Background worker reading bound pins into the scene
pub struct PinPoller {
    scene: SharedScene,
    gpio: SharedGpio,
    command_rx: Receiver<PollCommand>,
    message_tx: Sender<PollMessage>,
    running: Arc<AtomicBool>,
    interval: Duration,
    wakeup: Wakeup,
    cycles: u64,
}

impl PinPoller {
    pub fn new(
        scene: SharedScene,
        gpio: SharedGpio,
        command_rx: Receiver<PollCommand>,
        message_tx: Sender<PollMessage>,
        running: Arc<AtomicBool>,
        interval: Duration,
        wakeup: Wakeup,
    ) -> Self {
        Self {
            scene,
            gpio,
            command_rx,
            message_tx,
            running,
            interval: interval.max(MIN_POLL_INTERVAL),
            wakeup,
            cycles: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of completed poll cycles
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Run until the running flag is cleared or a shutdown arrives
    pub fn run(&mut self) {
        tracing::info!("Pin poller started ({:?} interval)", self.interval);

        while self.running.load(Ordering::SeqCst) {
            if let Err(e) = self.poll_once() {
                tracing::error!("Poll cycle failed: {}", e);
            }
            self.wait_for_next_cycle();
        }

        tracing::info!("Pin poller stopped after {} cycle(s)", self.cycles);
    }

    /// Wait out the interval, handling commands as they arrive
    fn wait_for_next_cycle(&mut self) {
        let deadline = Instant::now() + self.interval;
        while self.running.load(Ordering::SeqCst) {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return;
            }
            match self.command_rx.recv_timeout(remaining) {
                Ok(PollCommand::PollNow) => return,
                Ok(cmd) => self.handle_command(cmd),
                Err(RecvTimeoutError::Timeout) => return,
                Err(RecvTimeoutError::Disconnected) => {
                    self.running.store(false, Ordering::SeqCst);
                    return;
                }
            }
        }
    }

    fn handle_command(&mut self, cmd: PollCommand) {
        match cmd {
            PollCommand::SetInterval(interval) => {
                self.interval = interval.max(MIN_POLL_INTERVAL);
                tracing::debug!("Poll interval set to {:?}", self.interval);
            }
            PollCommand::PollNow => {
                if let Err(e) = self.poll_once() {
                    tracing::error!("Poll cycle failed: {}", e);
                }
            }
            PollCommand::Shutdown => {
                tracing::debug!("Pin poller received shutdown");
                self.running.store(false, Ordering::SeqCst);
            }
        }
    }

    /// Run a single poll cycle
    ///
    /// A failed read is reported and the cycle moves on to the next node.
    pub fn poll_once(&mut self) -> Result<CycleSummary> {
        let bindings = read_scene(&self.scene)?.bound_pins();
        self.cycles += 1;
        let mut summary = CycleSummary::default();
        if bindings.is_empty() {
            return Ok(summary);
        }

        let mut readings: Vec<(String, PinId, PinLevel)> = Vec::with_capacity(bindings.len());
        {
            let mut gpio = lock_gpio(&self.gpio)?;
            for (node, pin) in bindings {
                match gpio.input(pin) {
                    Ok(level) => readings.push((node, pin, level)),
                    Err(e) => {
                        tracing::warn!("Error reading pin {} for '{}': {}", pin, node, e);
                        summary.errors += 1;
                        self.send(PollMessage::ReadError {
                            node,
                            pin,
                            error: e.to_string(),
                        });
                    }
                }
            }
        }
        summary.reads = readings.len();

        let mut changes = Vec::new();
        {
            let mut scene = write_scene(&self.scene)?;
            for (node, pin, level) in &readings {
                if scene.apply_pin_level(node, *pin, *level) == Some(true) {
                    changes.push((node.clone(), level.is_high()));
                }
            }
        }
        summary.changed = changes.len();

        for (node, red) in changes {
            tracing::debug!("Signal for '{}' now {}", node, if red { "on" } else { "off" });
            self.send(PollMessage::SignalChanged { node, red });
        }

        if !readings.is_empty() {
            self.send(PollMessage::Redraw);
            (self.wakeup)();
        }
        Ok(summary)
    }

    fn send(&self, msg: PollMessage) {
        match self.message_tx.try_send(msg) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => tracing::trace!("Poll message queue full, dropping"),
            Err(TrySendError::Disconnected(_)) => {
                tracing::debug!("Poll message receiver gone");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpio::{backend_trait::MockGpioBackend as MockBackend, Gpio};
    use crate::scene::SceneGraph;
    use crate::error::DiagramError;
    use crossbeam_channel::bounded;
    use std::sync::atomic::AtomicUsize;

    struct Harness {
        poller: PinPoller,
        scene: SharedScene,
        gpio: SharedGpio,
        messages: Receiver<PollMessage>,
        commands: Sender<PollCommand>,
        wakeups: Arc<AtomicUsize>,
    }

    fn create_test_poller(mut gpio: Gpio, pins: &[(&str, u8)]) -> Harness {
        let mut scene = SceneGraph::new();
        for (i, (name, pin)) in pins.iter().enumerate() {
            scene
                .add_or_update_node(name, i as f64 * 100.0, 0.0, 50.0, 50.0, Some(*pin), &mut gpio)
                .unwrap();
        }
        let scene = scene.into_shared();
        let gpio = gpio.into_shared();
        let (cmd_tx, cmd_rx) = bounded(16);
        let (msg_tx, msg_rx) = bounded(64);
        let wakeups = Arc::new(AtomicUsize::new(0));
        let counter = wakeups.clone();

        let poller = PinPoller::new(
            scene.clone(),
            gpio.clone(),
            cmd_rx,
            msg_tx,
            Arc::new(AtomicBool::new(true)),
            Duration::from_millis(1000),
            Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        Harness {
            poller,
            scene,
            gpio,
            messages: msg_rx,
            commands: cmd_tx,
            wakeups,
        }
    }

    #[test]
    fn test_poll_mirrors_pin_into_red_flag() {
        let mut h = create_test_poller(Gpio::new(false), &[("n1", 5)]);
        h.gpio.lock().unwrap().set_mock_value(5, PinLevel::High);

        let summary = h.poller.poll_once().unwrap();
        assert_eq!(summary, CycleSummary { reads: 1, errors: 0, changed: 1 });
        assert!(h.scene.read().unwrap().node("n1").unwrap().signals.red);

        let msgs: Vec<_> = h.messages.try_iter().collect();
        assert!(matches!(
            &msgs[0],
            PollMessage::SignalChanged { node, red: true } if node == "n1"
        ));
        assert!(matches!(msgs.last(), Some(PollMessage::Redraw)));
        assert_eq!(h.wakeups.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unchanged_level_sends_only_redraw() {
        let mut h = create_test_poller(Gpio::simulated(), &[("n1", 5)]);
        h.poller.poll_once().unwrap();

        let msgs: Vec<_> = h.messages.try_iter().collect();
        assert_eq!(msgs.len(), 1);
        assert!(matches!(msgs[0], PollMessage::Redraw));
    }

    #[test]
    fn test_no_bindings_no_redraw() {
        let mut h = create_test_poller(Gpio::simulated(), &[]);
        assert_eq!(h.poller.poll_once().unwrap(), CycleSummary::default());
        assert!(h.messages.try_recv().is_err());
        assert_eq!(h.wakeups.load(Ordering::SeqCst), 0);
        assert_eq!(h.poller.cycles(), 1);
    }

    #[test]
    fn test_read_failure_does_not_stop_cycle() {
        let mut backend = MockBackend::new();
        backend.expect_name().return_const("flaky");
        backend.expect_setup().returning(|_, _, _| Ok(()));
        backend.expect_read().returning(|pin| {
            if pin == 3 {
                Err(DiagramError::Gpio("pin 3 unavailable".into()))
            } else {
                Ok(PinLevel::High)
            }
        });
        let gpio = Gpio::with_backend(Box::new(backend), false);
        let mut h = create_test_poller(gpio, &[("bad", 3), ("good", 4)]);

        let summary = h.poller.poll_once().unwrap();
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.changed, 1);
        assert!(h.scene.read().unwrap().node("good").unwrap().signals.red);

        let msgs: Vec<_> = h.messages.try_iter().collect();
        assert!(msgs.iter().any(|m| matches!(
            m,
            PollMessage::ReadError { node, pin: 3, .. } if node == "bad"
        )));

        // Still polling on the next cycle
        assert!(h.poller.poll_once().is_ok());
    }

    #[test]
    fn test_set_interval_command() {
        let mut h = create_test_poller(Gpio::simulated(), &[]);
        h.commands
            .send(PollCommand::SetInterval(Duration::from_millis(250)))
            .unwrap();
        h.commands.send(PollCommand::PollNow).unwrap();
        h.poller.wait_for_next_cycle();
        assert_eq!(h.poller.interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_interval_has_floor() {
        let mut h = create_test_poller(Gpio::simulated(), &[]);
        h.poller.handle_command(PollCommand::SetInterval(Duration::ZERO));
        assert_eq!(h.poller.interval(), MIN_POLL_INTERVAL);
    }

    #[test]
    fn test_shutdown_command() {
        let mut h = create_test_poller(Gpio::simulated(), &[]);
        h.commands.send(PollCommand::Shutdown).unwrap();
        h.poller.wait_for_next_cycle();
        assert!(!h.poller.running.load(Ordering::SeqCst));
    }
}
