//! GpioBackend trait for unified pin access
//!
//! This module provides a common trait for all GPIO implementations,
//! enabling both real hardware pins (via rppal) and the in-memory mock
//! table used in simulated mode and in tests.

use crate::error::Result;
use crate::types::{PinId, PinLevel, PinMode, Pull};

/// Statistics for pin reads
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GpioStats {
    /// Total number of successful reads
    pub successful_reads: u64,
    /// Total number of failed reads
    pub failed_reads: u64,
    /// Number of reads answered from the mock table
    pub simulated_reads: u64,
}

impl GpioStats {
    /// Record a successful read
    pub fn record_success(&mut self, simulated: bool) {
        self.successful_reads += 1;
        if simulated {
            self.simulated_reads += 1;
        }
    }

    /// Record a failed read
    pub fn record_failure(&mut self) {
        self.failed_reads += 1;
    }

    /// Reset all statistics
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Unified interface for digital pin backends
///
/// Implementations must be `Send` so the [`Gpio`](super::Gpio) handle can be
/// shared with the poll thread.
///
/// # Example
///
/// ```ignore
/// fn read_button(backend: &mut dyn GpioBackend) -> Result<bool> {
///     backend.setup(21, PinMode::Input, Pull::Down)?;
///     Ok(backend.read(21)?.is_high())
/// }
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait GpioBackend: Send {
    /// Short backend name for logs and the status bar
    fn name(&self) -> &'static str;

    /// Configure a pin
    fn setup(&mut self, pin: PinId, mode: PinMode, pull: Pull) -> Result<()>;

    /// Read the current level of a pin
    fn read(&mut self, pin: PinId) -> Result<PinLevel>;

    /// Release one pin, or every pin when `pin` is `None`
    fn cleanup(&mut self, pin: Option<PinId>);
}
