//! # GPIO Diagram Editor
//!
//! An editor for block diagrams whose rectangles can mirror GPIO input pins.
//! A rectangle bound to a pin shows the pin's level in its red indicator,
//! refreshed by a background poll thread.
//!
//! ## Architecture
//!
//! - **Scene**: nodes, points and connectors with cascade rules on rename,
//!   removal and point switching
//! - **GPIO**: a simulated pin table plus an optional hardware backend
//! - **Poll**: a worker thread that reads bound pins and queues redraws
//! - **Frontend**: eframe/egui canvas, toolbar and dialogs
//!
//! The scene is shared as `Arc<RwLock<SceneGraph>>` and the GPIO handle as
//! `Arc<Mutex<Gpio>>`. The poll thread never holds both locks at once.
//!
//! ## Configuration
//!
//! Application state (recent scenes, preferences) and logs are stored in the
//! platform data directory under `dev.hxyulin.gpio-diagram`. Editor settings
//! come from an optional TOML file passed with `--config`.
//!
//! ## Example
//!
//! ```
//! use gpio_diagram::{gpio::Gpio, scene::SceneGraph, types::PinLevel};
//!
//! let mut gpio = Gpio::new(false);
//! let mut scene = SceneGraph::new();
//! scene.add_or_update_node("n1", 0.0, 0.0, 100.0, 50.0, Some(5), &mut gpio)?;
//!
//! gpio.set_mock_value(5, PinLevel::High);
//! scene.refresh_from_gpio(&mut gpio);
//! assert!(scene.node("n1").unwrap().signals.red);
//! # Ok::<(), gpio_diagram::DiagramError>(())
//! ```

pub mod config;
pub mod error;
pub mod frontend;
pub mod gpio;
pub mod poll;
pub mod scene;
pub mod types;

// Re-export commonly used types
pub use config::{AppState, EditorConfig};
pub use error::{DiagramError, Result};
pub use frontend::DiagramApp;
pub use gpio::{Gpio, GpioBackend, SharedGpio};
pub use poll::{PollCommand, PollHandle, PollMessage};
pub use scene::{Connector, Node, Point, SceneDocument, SceneGraph, SharedScene};
pub use types::{PinId, PinLevel, Pos, SignalColor};
