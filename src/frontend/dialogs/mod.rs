//! Dialog trait system for the editor's input dialogs
//!
//! Each dialog implements [`Dialog`], keeping its form state in a
//! [`DialogState`] and returning a typed action when the user confirms.

use egui::{Align2, Context, Ui};

/// Actions that a dialog can return after rendering
#[derive(Debug, Clone, Default)]
pub enum DialogAction<A> {
    /// Keep the dialog open, no action needed
    #[default]
    None,
    /// Close the dialog without performing any action
    Close,
    /// Close the dialog and perform the specified action
    CloseWithAction(A),
}

impl<A> DialogAction<A> {
    pub fn should_close(&self) -> bool {
        matches!(self, DialogAction::Close | DialogAction::CloseWithAction(_))
    }

    pub fn into_action(self) -> Option<A> {
        match self {
            DialogAction::CloseWithAction(a) => Some(a),
            _ => None,
        }
    }
}

/// Form state of a dialog
pub trait DialogState: Default {
    fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether the form can be submitted
    fn is_valid(&self) -> bool {
        true
    }
}

/// Window appearance for a dialog
#[derive(Debug, Clone)]
pub struct DialogWindowConfig {
    pub default_width: f32,
    pub resizable: bool,
    pub anchor: Option<(Align2, [f32; 2])>,
}

impl Default for DialogWindowConfig {
    fn default() -> Self {
        Self {
            default_width: 320.0,
            resizable: false,
            anchor: Some((Align2::CENTER_CENTER, [0.0, 0.0])),
        }
    }
}

/// A modal input dialog
pub trait Dialog {
    type State: DialogState;
    type Action;
    type Context<'a>;

    fn title(state: &Self::State) -> &'static str;

    fn window_config() -> DialogWindowConfig {
        DialogWindowConfig::default()
    }

    fn render(
        state: &mut Self::State,
        ctx: Self::Context<'_>,
        ui: &mut Ui,
    ) -> DialogAction<Self::Action>;
}

/// Show a dialog if it is open, closing and resetting it when done
pub fn show_dialog<D: Dialog>(
    ctx: &Context,
    is_open: &mut bool,
    state: &mut D::State,
    dialog_ctx: D::Context<'_>,
) -> Option<D::Action> {
    let title = D::title(state);
    show_dialog_with_title::<D>(ctx, title, is_open, state, dialog_ctx)
}

/// [`show_dialog`] with a runtime title
pub fn show_dialog_with_title<D: Dialog>(
    ctx: &Context,
    title: &str,
    is_open: &mut bool,
    state: &mut D::State,
    dialog_ctx: D::Context<'_>,
) -> Option<D::Action> {
    if !*is_open {
        return None;
    }

    let config = D::window_config();
    let mut result = DialogAction::None;

    let mut window = egui::Window::new(title)
        .collapsible(false)
        .resizable(config.resizable)
        .default_width(config.default_width);
    if let Some((align, offset)) = config.anchor {
        window = window.anchor(align, offset);
    }

    window.show(ctx, |ui| {
        result = D::render(state, dialog_ctx, ui);
    });

    if result.should_close() {
        *is_open = false;
        state.reset();
    }
    result.into_action()
}

/// Parse a numeric text field, treating blank as `None`
pub(crate) fn parse_field<T: std::str::FromStr>(text: &str) -> Option<T> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        text.parse().ok()
    }
}

/// OK / Cancel button row
pub(crate) fn confirm_buttons(ui: &mut Ui, ok_label: &str, enabled: bool) -> Option<bool> {
    ui.separator();
    ui.horizontal(|ui| {
        if ui.add_enabled(enabled, egui::Button::new(ok_label)).clicked() {
            return Some(true);
        }
        if ui.button("Cancel").clicked() {
            return Some(false);
        }
        None
    })
    .inner
}

pub mod node_editor;
pub mod point_editor;
pub mod shape_op;
pub mod shape_pair;

pub use node_editor::{NodeEditorContext, NodeEditorDialog, NodeEditorState};
pub use point_editor::{PointEditorDialog, PointEditorState};
pub use shape_op::{ShapeOp, ShapeOpDialog, ShapeOpState};
pub use shape_pair::{ShapePairDialog, ShapePairKind, ShapePairState};
