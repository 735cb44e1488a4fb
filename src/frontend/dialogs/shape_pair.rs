//! Connect / Disconnect dialog: asks for two shape names

use super::{confirm_buttons, Dialog, DialogAction, DialogState};
use crate::frontend::state::AppAction;
use egui::Ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapePairKind {
    #[default]
    Connect,
    Disconnect,
}

#[derive(Debug, Default)]
pub struct ShapePairState {
    pub kind: ShapePairKind,
    pub first: String,
    pub second: String,
}

impl DialogState for ShapePairState {
    fn reset(&mut self) {
        self.first.clear();
        self.second.clear();
    }

    fn is_valid(&self) -> bool {
        !self.first.trim().is_empty() && !self.second.trim().is_empty()
    }
}

impl ShapePairState {
    pub fn for_kind(kind: ShapePairKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    pub fn to_action(&self) -> Option<AppAction> {
        if !self.is_valid() {
            return None;
        }
        let (a, b) = (self.first.trim().to_string(), self.second.trim().to_string());
        Some(match self.kind {
            ShapePairKind::Connect => AppAction::Connect { from: a, to: b },
            ShapePairKind::Disconnect => AppAction::Disconnect { a, b },
        })
    }
}

pub struct ShapePairDialog;

impl Dialog for ShapePairDialog {
    type State = ShapePairState;
    type Action = AppAction;
    type Context<'a> = ();

    fn title(state: &Self::State) -> &'static str {
        match state.kind {
            ShapePairKind::Connect => "Connect Shapes",
            ShapePairKind::Disconnect => "Disconnect Shapes",
        }
    }

    fn render(
        state: &mut Self::State,
        _ctx: Self::Context<'_>,
        ui: &mut Ui,
    ) -> DialogAction<Self::Action> {
        let (first, second) = match state.kind {
            ShapePairKind::Connect => ("From (output):", "To (input):"),
            ShapePairKind::Disconnect => ("First shape:", "Second shape:"),
        };
        egui::Grid::new("shape_pair_grid").num_columns(2).show(ui, |ui| {
            ui.label(first);
            ui.text_edit_singleline(&mut state.first);
            ui.end_row();
            ui.label(second);
            ui.text_edit_singleline(&mut state.second);
            ui.end_row();
        });

        let ok = match state.kind {
            ShapePairKind::Connect => "Connect",
            ShapePairKind::Disconnect => "Disconnect",
        };
        match confirm_buttons(ui, ok, state.is_valid()) {
            Some(true) => state
                .to_action()
                .map(DialogAction::CloseWithAction)
                .unwrap_or_default(),
            Some(false) => DialogAction::Close,
            None => DialogAction::None,
        }
    }
}
