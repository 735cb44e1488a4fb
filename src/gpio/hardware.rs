//! Raspberry Pi GPIO backend using rppal
//!
//! Only compiled with the `hardware-gpio` feature. Pins are addressed with
//! BCM numbering. Dropping a configured pin resets it, so `cleanup` simply
//! forgets it.

use crate::error::{DiagramError, Result};
use crate::types::{PinId, PinLevel, PinMode, Pull};
use rppal::gpio::{Gpio as RpiGpio, InputPin, Level, OutputPin};
use std::collections::HashMap;

use super::backend_trait::GpioBackend;

enum ConfiguredPin {
    Input(InputPin),
    Output(OutputPin),
}

/// Hardware backend for the Raspberry Pi header
pub struct RppalBackend {
    gpio: RpiGpio,
    pins: HashMap<PinId, ConfiguredPin>,
}

impl RppalBackend {
    /// Open the GPIO peripheral
    pub fn new() -> Result<Self> {
        let gpio = RpiGpio::new().map_err(|e| DiagramError::Gpio(e.to_string()))?;
        tracing::info!("Opened Raspberry Pi GPIO peripheral");
        Ok(Self {
            gpio,
            pins: HashMap::new(),
        })
    }
}

impl std::fmt::Debug for RppalBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RppalBackend")
            .field("pins", &self.pins.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl GpioBackend for RppalBackend {
    fn name(&self) -> &'static str {
        "rppal"
    }

    fn setup(&mut self, pin: PinId, mode: PinMode, pull: Pull) -> Result<()> {
        // Re-requesting a pin we already hold would fail with PinUsed
        self.pins.remove(&pin);

        let raw = self
            .gpio
            .get(pin)
            .map_err(|e| DiagramError::Gpio(format!("pin {}: {}", pin, e)))?;

        let configured = match mode {
            PinMode::Input => ConfiguredPin::Input(match pull {
                Pull::Off => raw.into_input(),
                Pull::Down => raw.into_input_pulldown(),
                Pull::Up => raw.into_input_pullup(),
            }),
            PinMode::Output => ConfiguredPin::Output(raw.into_output_low()),
        };

        tracing::debug!("Set up GPIO pin {} as {} ({})", pin, mode, pull);
        self.pins.insert(pin, configured);
        Ok(())
    }

    fn read(&mut self, pin: PinId) -> Result<PinLevel> {
        if !self.pins.contains_key(&pin) {
            self.setup(pin, PinMode::Input, Pull::Down)?;
        }

        let level = match self.pins.get(&pin) {
            Some(ConfiguredPin::Input(input)) => input.read() == Level::High,
            Some(ConfiguredPin::Output(output)) => output.is_set_high(),
            None => return Err(DiagramError::Gpio(format!("pin {} unavailable", pin))),
        };

        let level = PinLevel::from(level);
        tracing::trace!("GPIO: Reading pin {}: {}", pin, level);
        Ok(level)
    }

    fn cleanup(&mut self, pin: Option<PinId>) {
        match pin {
            Some(pin) => {
                self.pins.remove(&pin);
            }
            None => self.pins.clear(),
        }
    }
}
