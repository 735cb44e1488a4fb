//! In-memory GPIO backend
//!
//! The mock backend keeps a table of pin levels. It answers every read in
//! simulated mode and stands in for the hardware when the program runs
//! off-target.
//!
//! Unknown pins are never an error: the first reference (setup, read or
//! write) initializes the pin to LOW.

use crate::error::Result;
use crate::types::{PinId, PinLevel, PinMode, Pull};
use std::collections::HashMap;

use super::backend_trait::GpioBackend;

/// Mock pin table
#[derive(Debug, Default)]
pub struct MockGpioBackend {
    /// Current level of every pin referenced so far
    values: HashMap<PinId, PinLevel>,
    /// Pins currently configured through `setup`
    configured: HashMap<PinId, (PinMode, Pull)>,
}

impl MockGpioBackend {
    /// Create an empty pin table
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a pin's level, initializing it if needed
    pub fn set_value(&mut self, pin: PinId, level: PinLevel) {
        self.values.insert(pin, level);
    }

    /// Current level of a pin (LOW if never referenced); does not initialize it
    pub fn value(&self, pin: PinId) -> PinLevel {
        self.values.get(&pin).copied().unwrap_or_default()
    }

    /// Whether the pin is currently configured
    pub fn is_configured(&self, pin: PinId) -> bool {
        self.configured.contains_key(&pin)
    }

    /// Mode and pull of a configured pin
    pub fn configuration(&self, pin: PinId) -> Option<(PinMode, Pull)> {
        self.configured.get(&pin).copied()
    }

    /// Number of pins with a value in the table
    pub fn pin_count(&self) -> usize {
        self.values.len()
    }
}

impl GpioBackend for MockGpioBackend {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn setup(&mut self, pin: PinId, mode: PinMode, pull: Pull) -> Result<()> {
        tracing::debug!("Mock: Setting up GPIO pin {} as {} ({})", pin, mode, pull);
        self.configured.insert(pin, (mode, pull));
        self.values.entry(pin).or_insert(PinLevel::Low);
        Ok(())
    }

    fn read(&mut self, pin: PinId) -> Result<PinLevel> {
        let level = *self.values.entry(pin).or_insert(PinLevel::Low);
        tracing::trace!("Mock: Reading GPIO pin {}: {}", pin, level);
        Ok(level)
    }

    fn cleanup(&mut self, pin: Option<PinId>) {
        match pin {
            Some(pin) => {
                tracing::debug!("Mock: Cleaning up GPIO pin {}", pin);
                self.configured.remove(&pin);
            }
            None => {
                tracing::debug!("Mock: Cleaning up all GPIO pins");
                self.configured.clear();
            }
        }
    }
}
