//! Action types for the frontend
//!
//! Toolbar buttons, dialogs and the signal row return [`AppAction`]s instead
//! of mutating the scene directly. Scene edits are applied by
//! [`apply_scene_action`], which holds no UI state and so can be tested
//! without a window.

use std::path::PathBuf;

use crate::error::{DiagramError, Result};
use crate::gpio::Gpio;
use crate::scene::{EntityKind, SceneGraph};
use crate::types::{PinId, SignalColor};

/// Actions that any UI element can emit
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    // Scene editing
    AddOrUpdateNode {
        name: String,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        pin: Option<PinId>,
    },
    AddPoint {
        name: String,
        x: f64,
        y: f64,
    },
    Move {
        name: String,
        x: f64,
        y: f64,
    },
    Resize {
        name: String,
        width: f64,
        height: f64,
    },
    Connect {
        from: String,
        to: String,
    },
    Disconnect {
        a: String,
        b: String,
    },
    SwitchPoints(String),
    /// Remove a node, or a point if no node has that name
    Remove(String),
    Rename {
        old: String,
        new: String,
    },

    // Signals
    ToggleSignal {
        name: String,
        color: SignalColor,
    },
    SetAllSignals {
        name: String,
        value: bool,
    },
    ToggleAllPointsVisibility,
    ToggleSimulation,

    // Files
    /// Save to the given path, or the current scene path
    SaveScene(Option<PathBuf>),
    LoadScene(PathBuf),

    OpenDialog(DialogId),
}

impl AppAction {
    /// Whether the action changes the scene
    pub fn is_edit(&self) -> bool {
        !matches!(
            self,
            AppAction::SaveScene(_)
                | AppAction::LoadScene(_)
                | AppAction::OpenDialog(_)
                | AppAction::ToggleSimulation
        )
    }
}

/// Dialog identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogId {
    NodeEditor,
    PointEditor,
    Move,
    Resize,
    Connect,
    Disconnect,
    SwitchPoints,
    Remove,
    Rename,
}

/// Apply a scene-editing action, returning a status message
///
/// File, dialog and simulation actions are not scene edits and are rejected
/// with `InvalidArgument`.
pub fn apply_scene_action(
    scene: &mut SceneGraph,
    gpio: &mut Gpio,
    action: AppAction,
) -> Result<String> {
    match action {
        AppAction::AddOrUpdateNode {
            name,
            x,
            y,
            width,
            height,
            pin,
        } => {
            let existed = scene.node(name.trim()).is_some();
            scene.add_or_update_node(&name, x, y, width, height, pin, gpio)?;
            Ok(format!(
                "Rectangle '{}' {}",
                name.trim(),
                if existed { "updated" } else { "created" }
            ))
        }
        AppAction::AddPoint { name, x, y } => {
            scene.add_point(&name, x, y)?;
            Ok(format!("Point '{}' created at ({}, {})", name.trim(), x, y))
        }
        AppAction::Move { name, x, y } => {
            scene.move_entity(&name, x, y)?;
            Ok(format!("Moved '{}' to ({}, {})", name, x, y))
        }
        AppAction::Resize {
            name,
            width,
            height,
        } => {
            scene.resize(&name, width, height)?;
            Ok(format!("Resized '{}' to {}x{}", name, width, height))
        }
        AppAction::Connect { from, to } => {
            let line = scene.connect(&from, &to)?;
            Ok(format!("Connected {} to {} ({})", from, to, line))
        }
        AppAction::Disconnect { a, b } => Ok(match scene.disconnect(&a, &b) {
            Some(line) => format!("Removed {}", line),
            None => format!("No connection found between {} and {}", a, b),
        }),
        AppAction::SwitchPoints(name) => {
            scene.switch_points(&name)?;
            Ok(format!("Switched points for '{}'", name))
        }
        AppAction::Remove(name) => match scene.resolve(&name).map(|e| e.kind) {
            Some(EntityKind::Node) => {
                scene.remove_node(&name, gpio)?;
                Ok(format!("Rectangle '{}' removed", name))
            }
            Some(EntityKind::Point) => {
                scene.remove_point(&name)?;
                Ok(format!("Point '{}' removed", name))
            }
            None => Err(DiagramError::not_found("shape", &name)),
        },
        AppAction::Rename { old, new } => {
            scene.rename_entity(&old, &new)?;
            Ok(format!("Renamed '{}' to '{}'", old, new.trim()))
        }
        AppAction::ToggleSignal { name, color } => {
            let value = scene.toggle_signal(&name, color, gpio)?;
            Ok(format!("Toggled {} signal for {} to {}", color, name, value))
        }
        AppAction::SetAllSignals { name, value } => {
            scene.set_all_signals(&name, value, gpio)?;
            Ok(format!(
                "All signals for {} {}",
                name,
                if value { "on" } else { "off" }
            ))
        }
        AppAction::ToggleAllPointsVisibility => Ok(match scene.toggle_all_points_visibility() {
            Some(true) => "All points are now visible".to_string(),
            Some(false) => "All points are now hidden".to_string(),
            None => "No points to toggle visibility".to_string(),
        }),
        other => Err(DiagramError::InvalidArgument(format!(
            "{:?} is not a scene edit",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene_with_nodes(gpio: &mut Gpio) -> SceneGraph {
        let mut scene = SceneGraph::new();
        for (name, x) in [("r1", 0.0), ("r2", 200.0)] {
            apply_scene_action(
                &mut scene,
                gpio,
                AppAction::AddOrUpdateNode {
                    name: name.into(),
                    x,
                    y: 0.0,
                    width: 100.0,
                    height: 50.0,
                    pin: None,
                },
            )
            .unwrap();
        }
        scene
    }

    #[test]
    fn test_connect_and_disconnect_messages() {
        let mut gpio = Gpio::simulated();
        let mut scene = scene_with_nodes(&mut gpio);

        let msg = apply_scene_action(
            &mut scene,
            &mut gpio,
            AppAction::Connect {
                from: "r1".into(),
                to: "r2".into(),
            },
        )
        .unwrap();
        assert!(msg.contains("Line_r1_to_r2"));

        let msg = apply_scene_action(
            &mut scene,
            &mut gpio,
            AppAction::Disconnect {
                a: "r2".into(),
                b: "r1".into(),
            },
        )
        .unwrap();
        assert_eq!(msg, "Removed Line_r1_to_r2");

        let msg = apply_scene_action(
            &mut scene,
            &mut gpio,
            AppAction::Disconnect {
                a: "r2".into(),
                b: "r1".into(),
            },
        )
        .unwrap();
        assert!(msg.starts_with("No connection found"));
    }

    #[test]
    fn test_remove_resolves_kind() {
        let mut gpio = Gpio::simulated();
        let mut scene = scene_with_nodes(&mut gpio);
        scene.add_point("p1", 10.0, 10.0).unwrap();

        apply_scene_action(&mut scene, &mut gpio, AppAction::Remove("p1".into())).unwrap();
        apply_scene_action(&mut scene, &mut gpio, AppAction::Remove("r1".into())).unwrap();
        assert_eq!((scene.node_count(), scene.point_count()), (1, 0));

        let err =
            apply_scene_action(&mut scene, &mut gpio, AppAction::Remove("r1".into())).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_update_message_distinguishes_create() {
        let mut gpio = Gpio::simulated();
        let mut scene = scene_with_nodes(&mut gpio);
        let msg = apply_scene_action(
            &mut scene,
            &mut gpio,
            AppAction::AddOrUpdateNode {
                name: "r1".into(),
                x: 5.0,
                y: 5.0,
                width: 10.0,
                height: 10.0,
                pin: Some(0),
            },
        )
        .unwrap();
        assert_eq!(msg, "Rectangle 'r1' updated");
    }

    #[test]
    fn test_non_edit_actions_rejected() {
        let mut gpio = Gpio::simulated();
        let mut scene = SceneGraph::new();
        assert!(!AppAction::SaveScene(None).is_edit());
        assert!(AppAction::ToggleAllPointsVisibility.is_edit());
        assert!(apply_scene_action(&mut scene, &mut gpio, AppAction::SaveScene(None)).is_err());
    }

    #[test]
    fn test_signal_actions_are_edits() {
        // Live mode blocks every edit, so the signal row is blocked with them
        for action in [
            AppAction::ToggleSignal {
                name: "r1".into(),
                color: SignalColor::Red,
            },
            AppAction::SetAllSignals {
                name: "r1".into(),
                value: true,
            },
        ] {
            assert!(action.is_edit());
        }
        assert!(!AppAction::ToggleSimulation.is_edit());
        assert!(!AppAction::LoadScene(PathBuf::from("scene.json")).is_edit());
    }
}
