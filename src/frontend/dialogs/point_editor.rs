//! Add Point dialog

use super::{confirm_buttons, parse_field, Dialog, DialogAction, DialogState};
use crate::frontend::state::AppAction;
use egui::Ui;

#[derive(Debug, Default)]
pub struct PointEditorState {
    pub name: String,
    pub x: String,
    pub y: String,
}

impl DialogState for PointEditorState {
    fn is_valid(&self) -> bool {
        self.to_action().is_some()
    }
}

impl PointEditorState {
    pub fn to_action(&self) -> Option<AppAction> {
        let name = self.name.trim();
        if name.is_empty() {
            return None;
        }
        Some(AppAction::AddPoint {
            name: name.to_string(),
            x: parse_field(&self.x)?,
            y: parse_field(&self.y)?,
        })
    }
}

pub struct PointEditorDialog;

impl Dialog for PointEditorDialog {
    type State = PointEditorState;
    type Action = AppAction;
    type Context<'a> = ();

    fn title(_state: &Self::State) -> &'static str {
        "Add Point"
    }

    fn render(
        state: &mut Self::State,
        _ctx: Self::Context<'_>,
        ui: &mut Ui,
    ) -> DialogAction<Self::Action> {
        egui::Grid::new("point_editor_grid")
            .num_columns(2)
            .show(ui, |ui| {
                ui.label("Name:");
                ui.text_edit_singleline(&mut state.name);
                ui.end_row();
                ui.label("X:");
                ui.text_edit_singleline(&mut state.x);
                ui.end_row();
                ui.label("Y:");
                ui.text_edit_singleline(&mut state.y);
                ui.end_row();
            });

        match confirm_buttons(ui, "Add", state.is_valid()) {
            Some(true) => state
                .to_action()
                .map(DialogAction::CloseWithAction)
                .unwrap_or_default(),
            Some(false) => DialogAction::Close,
            None => DialogAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_form() {
        let state = PointEditorState {
            name: " p3 ".into(),
            x: "12".into(),
            y: "7.5".into(),
        };
        assert_eq!(
            state.to_action(),
            Some(AppAction::AddPoint {
                name: "p3".into(),
                x: 12.0,
                y: 7.5
            })
        );
        assert!(!PointEditorState::default().is_valid());
    }
}
