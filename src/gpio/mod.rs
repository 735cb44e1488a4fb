//! GPIO abstraction with a simulated-hardware mode
//!
//! The [`Gpio`] handle is the single entry point the scene graph and the poll
//! loop use to touch pins. It always owns a [`MockGpioBackend`] pin table and
//! may additionally own a hardware backend.
//!
//! # Read routing
//!
//! - Simulating, or no hardware backend attached: reads come from the mock table
//! - Live with hardware attached: reads delegate to the hardware backend
//!
//! Setup and cleanup are mirrored into the mock table in every mode so that
//! switching simulation on at runtime keeps the same pin set.
//!
//! # Example
//!
//! ```ignore
//! use gpio_diagram::gpio::Gpio;
//! use gpio_diagram::types::{PinLevel, PinMode, Pull};
//!
//! let mut gpio = Gpio::simulated();
//! gpio.setup(5, PinMode::Input, Pull::Down)?;
//! gpio.set_mock_value(5, PinLevel::High);
//! assert_eq!(gpio.input(5)?, PinLevel::High);
//! ```

pub mod backend_trait;
#[cfg(feature = "hardware-gpio")]
pub mod hardware;
pub mod mock_gpio;

pub use backend_trait::{GpioBackend, GpioStats};
#[cfg(feature = "hardware-gpio")]
pub use hardware::RppalBackend;
pub use mock_gpio::MockGpioBackend;

use crate::error::{DiagramError, Result};
use crate::types::{PinId, PinLevel, PinMode, Pull};
use std::sync::{Arc, Mutex, MutexGuard};

/// GPIO handle shared between the UI thread and the poll loop
pub type SharedGpio = Arc<Mutex<Gpio>>;

/// Lock a shared GPIO handle, mapping poisoning to an error
pub fn lock_gpio(gpio: &SharedGpio) -> Result<MutexGuard<'_, Gpio>> {
    gpio.lock()
        .map_err(|e| DiagramError::Channel(format!("GPIO lock poisoned: {}", e)))
}

/// GPIO handle
pub struct Gpio {
    mock: MockGpioBackend,
    hardware: Option<Box<dyn GpioBackend>>,
    simulating: bool,
    stats: GpioStats,
}

impl Gpio {
    /// Create a handle with only the mock table attached
    pub fn new(simulating: bool) -> Self {
        Self {
            mock: MockGpioBackend::new(),
            hardware: None,
            simulating,
            stats: GpioStats::default(),
        }
    }

    /// Create a simulating handle with only the mock table attached
    pub fn simulated() -> Self {
        Self::new(true)
    }

    /// Create a handle with a hardware backend attached
    pub fn with_backend(backend: Box<dyn GpioBackend>, simulating: bool) -> Self {
        tracing::info!("Attached GPIO backend '{}'", backend.name());
        Self {
            hardware: Some(backend),
            ..Self::new(simulating)
        }
    }

    /// Convert into a shareable handle
    pub fn into_shared(self) -> SharedGpio {
        Arc::new(Mutex::new(self))
    }

    /// Whether a hardware backend is attached
    pub fn has_hardware(&self) -> bool {
        self.hardware.is_some()
    }

    /// Name of the backend answering reads right now
    pub fn active_backend(&self) -> &'static str {
        match &self.hardware {
            Some(hw) if !self.simulating => hw.name(),
            _ => self.mock.name(),
        }
    }

    pub fn is_simulating(&self) -> bool {
        self.simulating
    }

    /// Switch simulated mode; existing mock values are kept
    pub fn set_simulating(&mut self, simulating: bool) {
        if self.simulating != simulating {
            tracing::info!(
                "GPIO simulation {}",
                if simulating { "enabled" } else { "disabled" }
            );
        }
        self.simulating = simulating;
    }

    fn reads_from_mock(&self) -> bool {
        self.simulating || self.hardware.is_none()
    }

    /// Configure a pin
    pub fn setup(&mut self, pin: PinId, mode: PinMode, pull: Pull) -> Result<()> {
        self.mock.setup(pin, mode, pull)?;
        if let Some(hw) = self.hardware.as_mut() {
            hw.setup(pin, mode, pull)?;
        }
        Ok(())
    }

    /// Read a pin's current level
    pub fn input(&mut self, pin: PinId) -> Result<PinLevel> {
        let simulated = self.reads_from_mock();
        let result = match self.hardware.as_mut() {
            Some(hw) if !simulated => hw.read(pin),
            _ => self.mock.read(pin),
        };

        match &result {
            Ok(_) => self.stats.record_success(simulated),
            Err(e) => {
                self.stats.record_failure();
                tracing::debug!("GPIO read of pin {} failed: {}", pin, e);
            }
        }
        result
    }

    /// Set the simulated level of a pin
    pub fn set_mock_value(&mut self, pin: PinId, level: PinLevel) {
        tracing::trace!("Mock value for pin {} set to {}", pin, level);
        self.mock.set_value(pin, level);
    }

    /// Simulated level of a pin without initializing it
    pub fn mock_value(&self, pin: PinId) -> PinLevel {
        self.mock.value(pin)
    }

    /// Whether a pin is currently configured
    pub fn is_configured(&self, pin: PinId) -> bool {
        self.mock.is_configured(pin)
    }

    /// Release one pin, or all pins with `None`
    pub fn cleanup(&mut self, pin: Option<PinId>) {
        self.mock.cleanup(pin);
        if let Some(hw) = self.hardware.as_mut() {
            hw.cleanup(pin);
        }
    }

    pub fn stats(&self) -> &GpioStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }
}

impl Default for Gpio {
    fn default() -> Self {
        Self::simulated()
    }
}

impl std::fmt::Debug for Gpio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gpio")
            .field("simulating", &self.simulating)
            .field("hardware", &self.hardware.as_ref().map(|hw| hw.name()))
            .field("stats", &self.stats)
            .finish()
    }
}
