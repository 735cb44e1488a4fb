//! Single-shape operations: move, resize, switch points, remove, rename
//!
//! One dialog covers all of them; the operation decides which extra fields
//! are shown.

use super::{confirm_buttons, parse_field, Dialog, DialogAction, DialogState};
use crate::frontend::state::AppAction;
use crate::scene::SceneGraph;
use egui::Ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeOp {
    #[default]
    Move,
    Resize,
    SwitchPoints,
    Remove,
    Rename,
}

impl ShapeOp {
    pub fn title(&self) -> &'static str {
        match self {
            ShapeOp::Move => "Move Shape",
            ShapeOp::Resize => "Resize Rectangle",
            ShapeOp::SwitchPoints => "Switch Points",
            ShapeOp::Remove => "Remove Shape",
            ShapeOp::Rename => "Rename Shape",
        }
    }

    fn field_labels(&self) -> Option<(&'static str, &'static str)> {
        match self {
            ShapeOp::Move => Some(("New X:", "New Y:")),
            ShapeOp::Resize => Some(("New width:", "New height:")),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct ShapeOpState {
    pub op: ShapeOp,
    pub name: String,
    pub first: String,
    pub second: String,
    /// New name for `Rename`
    pub new_name: String,
}

impl DialogState for ShapeOpState {
    fn reset(&mut self) {
        *self = Self::for_op(self.op);
    }

    fn is_valid(&self) -> bool {
        self.to_action().is_some()
    }
}

impl ShapeOpState {
    pub fn for_op(op: ShapeOp) -> Self {
        Self {
            op,
            ..Default::default()
        }
    }

    /// Fill the numeric fields from the named shape's current values
    pub fn prefill(&mut self, scene: &SceneGraph) {
        let name = self.name.trim();
        match self.op {
            ShapeOp::Move => {
                if let Some(node) = scene.node(name) {
                    self.first = node.x.to_string();
                    self.second = node.y.to_string();
                } else if let Some(point) = scene.point(name) {
                    self.first = point.x.to_string();
                    self.second = point.y.to_string();
                }
            }
            ShapeOp::Resize => {
                if let Some(node) = scene.node(name) {
                    self.first = node.width.to_string();
                    self.second = node.height.to_string();
                }
            }
            _ => {}
        }
    }

    pub fn to_action(&self) -> Option<AppAction> {
        let name = self.name.trim();
        if name.is_empty() {
            return None;
        }
        let name = name.to_string();
        match self.op {
            ShapeOp::Move => Some(AppAction::Move {
                name,
                x: parse_field(&self.first)?,
                y: parse_field(&self.second)?,
            }),
            ShapeOp::Resize => Some(AppAction::Resize {
                name,
                width: parse_field(&self.first)?,
                height: parse_field(&self.second)?,
            }),
            ShapeOp::SwitchPoints => Some(AppAction::SwitchPoints(name)),
            ShapeOp::Remove => Some(AppAction::Remove(name)),
            ShapeOp::Rename => {
                let new = self.new_name.trim();
                (!new.is_empty()).then(|| AppAction::Rename {
                    old: name,
                    new: new.to_string(),
                })
            }
        }
    }
}

pub struct ShapeOpDialog;

impl Dialog for ShapeOpDialog {
    type State = ShapeOpState;
    type Action = AppAction;
    type Context<'a> = &'a SceneGraph;

    fn title(state: &Self::State) -> &'static str {
        state.op.title()
    }

    fn render(
        state: &mut Self::State,
        scene: Self::Context<'_>,
        ui: &mut Ui,
    ) -> DialogAction<Self::Action> {
        egui::Grid::new("shape_op_grid").num_columns(2).show(ui, |ui| {
            ui.label("Shape name:");
            if ui.text_edit_singleline(&mut state.name).changed() {
                state.prefill(scene);
            }
            ui.end_row();

            if let Some((first, second)) = state.op.field_labels() {
                ui.label(first);
                ui.text_edit_singleline(&mut state.first);
                ui.end_row();
                ui.label(second);
                ui.text_edit_singleline(&mut state.second);
                ui.end_row();
            }

            if state.op == ShapeOp::Rename {
                ui.label("New name:");
                ui.text_edit_singleline(&mut state.new_name);
                ui.end_row();
            }
        });

        if state.op == ShapeOp::SwitchPoints {
            ui.weak("Connections to this rectangle will be removed.");
        }

        match confirm_buttons(ui, "Apply", state.is_valid()) {
            Some(true) => state
                .to_action()
                .map(DialogAction::CloseWithAction)
                .unwrap_or_default(),
            Some(false) => DialogAction::Close,
            None => DialogAction::None,
        }
    }
}
