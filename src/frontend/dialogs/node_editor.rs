//! Add/Edit Rectangle dialog
//!
//! Typing the name of an existing rectangle fills in its current geometry
//! and pin. Pin 0 (or blank) means no pin.

use super::{confirm_buttons, parse_field, Dialog, DialogAction, DialogState};
use crate::frontend::state::AppAction;
use crate::scene::SceneGraph;
use egui::Ui;

#[derive(Debug)]
pub struct NodeEditorState {
    pub name: String,
    pub x: String,
    pub y: String,
    pub width: String,
    pub height: String,
    pub pin: String,
    /// Name whose values were last filled in
    prefilled_for: Option<String>,
}

impl Default for NodeEditorState {
    fn default() -> Self {
        Self {
            name: String::new(),
            x: "0".into(),
            y: "0".into(),
            width: "50".into(),
            height: "50".into(),
            pin: "0".into(),
            prefilled_for: None,
        }
    }
}

impl DialogState for NodeEditorState {
    fn is_valid(&self) -> bool {
        self.to_action().is_some()
    }
}

impl NodeEditorState {
    /// Copy an existing node's values into the form
    pub fn prefill(&mut self, scene: &SceneGraph) {
        let name = self.name.trim();
        if self.prefilled_for.as_deref() == Some(name) {
            return;
        }
        if let Some(node) = scene.node(name) {
            self.x = node.x.to_string();
            self.y = node.y.to_string();
            self.width = node.width.to_string();
            self.height = node.height.to_string();
            self.pin = node.pin.unwrap_or(0).to_string();
            self.prefilled_for = Some(name.to_string());
        }
    }

    pub fn to_action(&self) -> Option<AppAction> {
        let name = self.name.trim();
        if name.is_empty() {
            return None;
        }
        Some(AppAction::AddOrUpdateNode {
            name: name.to_string(),
            x: parse_field(&self.x)?,
            y: parse_field(&self.y)?,
            width: parse_field(&self.width)?,
            height: parse_field(&self.height)?,
            pin: match self.pin.trim() {
                "" => None,
                pin => Some(pin.parse().ok()?),
            },
        })
    }
}

pub struct NodeEditorContext<'a> {
    pub scene: &'a SceneGraph,
}

pub struct NodeEditorDialog;

impl Dialog for NodeEditorDialog {
    type State = NodeEditorState;
    type Action = AppAction;
    type Context<'a> = NodeEditorContext<'a>;

    fn title(_state: &Self::State) -> &'static str {
        "Add/Edit Rectangle"
    }

    fn render(
        state: &mut Self::State,
        ctx: Self::Context<'_>,
        ui: &mut Ui,
    ) -> DialogAction<Self::Action> {
        egui::Grid::new("node_editor_grid")
            .num_columns(2)
            .spacing([8.0, 4.0])
            .show(ui, |ui| {
                ui.label("Name:");
                if ui.text_edit_singleline(&mut state.name).changed() {
                    state.prefill(ctx.scene);
                }
                ui.end_row();

                for (label, field) in [
                    ("X:", &mut state.x),
                    ("Y:", &mut state.y),
                    ("Width:", &mut state.width),
                    ("Height:", &mut state.height),
                    ("GPIO pin (0 = none):", &mut state.pin),
                ] {
                    ui.label(label);
                    ui.text_edit_singleline(field);
                    ui.end_row();
                }
            });

        let existing = ctx.scene.node(state.name.trim()).is_some();
        let label = if existing { "Update" } else { "Create" };
        match confirm_buttons(ui, label, state.is_valid()) {
            Some(true) => match state.to_action() {
                Some(action) => DialogAction::CloseWithAction(action),
                None => DialogAction::None,
            },
            Some(false) => DialogAction::Close,
            None => DialogAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpio::Gpio;

    #[test]
    fn test_prefill_from_existing_node() {
        let mut gpio = Gpio::simulated();
        let mut scene = SceneGraph::new();
        scene
            .add_or_update_node("r1", 10.0, 20.0, 30.0, 40.0, Some(17), &mut gpio)
            .unwrap();

        let mut state = NodeEditorState {
            name: "r1".into(),
            ..Default::default()
        };
        state.prefill(&scene);
        assert_eq!(
            state.to_action(),
            Some(AppAction::AddOrUpdateNode {
                name: "r1".into(),
                x: 10.0,
                y: 20.0,
                width: 30.0,
                height: 40.0,
                pin: Some(17),
            })
        );
    }

    #[test]
    fn test_invalid_form() {
        let mut state = NodeEditorState::default();
        assert!(!state.is_valid());
        state.name = "r9".into();
        assert!(state.is_valid());
        state.width = "wide".into();
        assert!(!state.is_valid());
    }
}
