//! Core value types for gpio-diagram
//!
//! This module contains the small value types shared by the scene graph,
//! the GPIO layer and the poll loop.
//!
//! # Main Types
//!
//! - [`Pos`] - A 2D coordinate in canvas units
//! - [`SignalColor`] - One of the three indicator colors a node carries
//! - [`SignalState`] - The red/blue/yellow flag set of a node
//! - [`PinLevel`], [`PinMode`], [`Pull`] - Digital pin vocabulary

use crate::error::{DiagramError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// GPIO pin number (BCM numbering)
pub type PinId = u8;

/// A 2D position in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pos {
    pub x: f64,
    pub y: f64,
}

impl Pos {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Pos {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The three indicator colors drawn on a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalColor {
    /// Mirrors the bound GPIO pin (if any)
    Red,
    Blue,
    Yellow,
}

impl SignalColor {
    /// All colors in drawing order (top to bottom)
    pub fn all() -> &'static [SignalColor] {
        &[SignalColor::Red, SignalColor::Blue, SignalColor::Yellow]
    }

    /// Lowercase key used in commands and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalColor::Red => "red",
            SignalColor::Blue => "blue",
            SignalColor::Yellow => "yellow",
        }
    }
}

impl FromStr for SignalColor {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "red" => Ok(SignalColor::Red),
            "blue" => Ok(SignalColor::Blue),
            "yellow" => Ok(SignalColor::Yellow),
            other => Err(DiagramError::InvalidArgument(format!(
                "invalid color '{}', use 'red', 'blue', or 'yellow'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for SignalColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The tri-color flag set of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SignalState {
    pub red: bool,
    pub blue: bool,
    pub yellow: bool,
}

impl SignalState {
    /// Get the flag for a color
    pub fn get(&self, color: SignalColor) -> bool {
        match color {
            SignalColor::Red => self.red,
            SignalColor::Blue => self.blue,
            SignalColor::Yellow => self.yellow,
        }
    }

    /// Set the flag for a color
    pub fn set(&mut self, color: SignalColor, value: bool) {
        match color {
            SignalColor::Red => self.red = value,
            SignalColor::Blue => self.blue = value,
            SignalColor::Yellow => self.yellow = value,
        }
    }

    /// Set all three flags at once
    pub fn set_all(&mut self, value: bool) {
        self.red = value;
        self.blue = value;
        self.yellow = value;
    }
}

/// Logic level of a digital pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PinLevel {
    #[default]
    Low,
    High,
}

impl PinLevel {
    pub fn is_high(&self) -> bool {
        matches!(self, PinLevel::High)
    }
}

impl From<bool> for PinLevel {
    fn from(high: bool) -> Self {
        if high {
            PinLevel::High
        } else {
            PinLevel::Low
        }
    }
}

impl std::fmt::Display for PinLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PinLevel::Low => write!(f, "LOW"),
            PinLevel::High => write!(f, "HIGH"),
        }
    }
}

/// Direction a pin is configured for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PinMode {
    #[default]
    Input,
    Output,
}

impl std::fmt::Display for PinMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PinMode::Input => write!(f, "input"),
            PinMode::Output => write!(f, "output"),
        }
    }
}

/// Internal pull resistor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Pull {
    Off,
    /// Node-bound inputs use pull-down so an open button reads LOW
    #[default]
    Down,
    Up,
}

impl std::fmt::Display for Pull {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pull::Off => write!(f, "off"),
            Pull::Down => write!(f, "pull-down"),
            Pull::Up => write!(f, "pull-up"),
        }
    }
}
