//! Background pin polling
//!
//! The poll loop runs in a separate thread and talks to the UI over
//! crossbeam channels:
//!
//! - [`PollCommand`] - Messages sent from UI to the poller
//! - [`PollMessage`] - Messages sent from the poller to UI
//! - [`PollHandle`] - UI-side handle that owns the thread
//! - [`PinPoller`] - The worker loop itself
//!
//! The poller never touches UI state. After a cycle that updated any node it
//! queues [`PollMessage::Redraw`] and calls the wakeup hook, which the UI
//! sets to a repaint request.
//!
//! # Example
//!
//! ```ignore
//! let handle = PollHandle::spawn(scene.clone(), gpio.clone(), Duration::from_secs(1), noop_wakeup())?;
//! for msg in handle.drain() {
//!     if let PollMessage::ReadError { node, error, .. } = msg {
//!         status = format!("{}: {}", node, error);
//!     }
//! }
//! handle.stop(Duration::from_secs(1));
//! ```

pub mod worker;

pub use worker::{CycleSummary, PinPoller};

use crate::error::{DiagramError, Result};
use crate::gpio::SharedGpio;
use crate::scene::SharedScene;
use crate::types::PinId;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

/// Default time between poll cycles
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Shortest interval the poller accepts
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Called from the poll thread when the UI should repaint
pub type Wakeup = Arc<dyn Fn() + Send + Sync>;

/// Wakeup hook that does nothing
pub fn noop_wakeup() -> Wakeup {
    Arc::new(|| {})
}

/// Commands sent from the UI to the poller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollCommand {
    /// Change the time between cycles
    SetInterval(Duration),
    /// Run a cycle now instead of waiting for the interval
    PollNow,
    /// Stop the poll loop
    Shutdown,
}

/// Messages sent from the poller to the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollMessage {
    /// A node's red flag changed
    SignalChanged { node: String, red: bool },
    /// Reading a node's pin failed
    ReadError {
        node: String,
        pin: PinId,
        error: String,
    },
    /// At least one node was updated this cycle
    Redraw,
}

/// UI-side handle owning the poll thread
pub struct PollHandle {
    command_tx: Sender<PollCommand>,
    message_rx: Receiver<PollMessage>,
    running: Arc<AtomicBool>,
    done_rx: Receiver<()>,
    thread: Option<JoinHandle<()>>,
}

impl PollHandle {
    /// Start the poll thread
    pub fn spawn(
        scene: SharedScene,
        gpio: SharedGpio,
        interval: Duration,
        wakeup: Wakeup,
    ) -> Result<Self> {
        let (cmd_tx, cmd_rx) = bounded(64);
        // Bounded so a stalled UI cannot grow the queue; the poller drops on full
        let (msg_tx, msg_rx) = bounded(1024);
        let (done_tx, done_rx) = bounded(1);
        let running = Arc::new(AtomicBool::new(true));

        let mut poller = PinPoller::new(
            scene,
            gpio,
            cmd_rx,
            msg_tx,
            running.clone(),
            interval,
            wakeup,
        );

        let thread = std::thread::Builder::new()
            .name("pin-poller".to_string())
            .spawn(move || {
                poller.run();
                let _ = done_tx.send(());
            })
            .map_err(|e| DiagramError::Channel(format!("Failed to spawn poll thread: {}", e)))?;

        Ok(Self {
            command_tx: cmd_tx,
            message_rx: msg_rx,
            running,
            done_rx,
            thread: Some(thread),
        })
    }

    /// Whether the poll thread is still meant to be running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst) && self.thread.is_some()
    }

    /// Try to receive a message (non-blocking)
    pub fn try_recv(&self) -> Option<PollMessage> {
        self.message_rx.try_recv().ok()
    }

    /// Drain all pending messages
    pub fn drain(&self) -> Vec<PollMessage> {
        self.message_rx.try_iter().collect()
    }

    /// Send a command to the poller
    pub fn send_command(&self, cmd: PollCommand) -> bool {
        self.command_tx.send(cmd).is_ok()
    }

    pub fn set_interval(&self, interval: Duration) {
        let _ = self.command_tx.send(PollCommand::SetInterval(interval));
    }

    pub fn poll_now(&self) {
        let _ = self.command_tx.send(PollCommand::PollNow);
    }

    /// Stop the poll thread, waiting at most `timeout`
    ///
    /// Returns `true` if the thread finished in time. A thread that misses
    /// the deadline is detached.
    pub fn stop(&mut self, timeout: Duration) -> bool {
        let Some(thread) = self.thread.take() else {
            return true;
        };

        self.running.store(false, Ordering::SeqCst);
        let _ = self.command_tx.try_send(PollCommand::Shutdown);

        match self.done_rx.recv_timeout(timeout) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                if thread.join().is_err() {
                    tracing::error!("Poll thread panicked");
                }
                true
            }
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!("Poll thread did not stop within {:?}", timeout);
                false
            }
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        if self.thread.is_some() {
            self.stop(Duration::from_millis(100));
        }
    }
}
