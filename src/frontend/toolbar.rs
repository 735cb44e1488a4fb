//! Toolbar panel: shape editing buttons, file actions and the signal row.
//!
//! Sits between the menu bar and the canvas.

use egui::{Color32, RichText, Ui};

use crate::frontend::state::{AppAction, DialogId};
use crate::types::SignalColor;

/// Context needed to render the toolbar.
pub struct ToolbarContext<'a> {
    pub simulating: bool,
    /// Live mode disables every editing control
    pub live_mode: bool,
    pub has_hardware: bool,
    pub scene_path: &'a std::path::Path,
}

/// Result from rendering the toolbar
#[derive(Default)]
pub struct ToolbarResult {
    pub actions: Vec<AppAction>,
}

const EDIT_BUTTONS: &[(&str, DialogId)] = &[
    ("Add/Edit Rectangle", DialogId::NodeEditor),
    ("Add Point", DialogId::PointEditor),
    ("Move", DialogId::Move),
    ("Resize", DialogId::Resize),
    ("Connect", DialogId::Connect),
    ("Disconnect", DialogId::Disconnect),
    ("Switch Points", DialogId::SwitchPoints),
    ("Rename", DialogId::Rename),
    ("Remove", DialogId::Remove),
];

/// Render the shape and file toolbar.
pub fn render_toolbar(ui: &mut Ui, ctx: &ToolbarContext<'_>) -> ToolbarResult {
    let mut actions = Vec::new();

    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;

        ui.add_enabled_ui(!ctx.live_mode, |ui| {
            for (label, dialog) in EDIT_BUTTONS {
                if ui.button(*label).clicked() {
                    actions.push(AppAction::OpenDialog(*dialog));
                }
            }
        });

        ui.separator();

        if ui
            .button("Save")
            .on_hover_text(format!("Current file: {}", ctx.scene_path.display()))
            .clicked()
        {
            if let Some(path) = pick_save_path() {
                actions.push(AppAction::SaveScene(Some(path)));
            }
        }
        if ui.button("Load").clicked() {
            if let Some(path) = pick_scene_file() {
                actions.push(AppAction::LoadScene(path));
            }
        }

        ui.separator();

        if ui
            .add_enabled(!ctx.live_mode, egui::Button::new("Toggle All Points Visibility"))
            .clicked()
        {
            actions.push(AppAction::ToggleAllPointsVisibility);
        }

        render_simulation_toggle(ui, ctx, &mut actions);
    });

    ToolbarResult { actions }
}

fn render_simulation_toggle(ui: &mut Ui, ctx: &ToolbarContext<'_>, actions: &mut Vec<AppAction>) {
    let (text, fill) = if ctx.simulating {
        ("Simulation ON", Color32::from_rgb(50, 120, 50))
    } else {
        ("Simulation OFF", Color32::from_rgb(120, 50, 50))
    };
    let btn = egui::Button::new(RichText::new(text).color(Color32::WHITE)).fill(fill);
    let hover = if ctx.has_hardware {
        "Switch between simulated and hardware pin reads"
    } else {
        "No hardware attached: pins always read from the simulated table"
    };
    if ui.add(btn).on_hover_text(hover).clicked() {
        actions.push(AppAction::ToggleSimulation);
    }
}

/// Signal control row: a rectangle name and buttons for its indicators.
pub fn render_signal_row(ui: &mut Ui, name: &mut String, live_mode: bool) -> Vec<AppAction> {
    let mut actions = Vec::new();

    ui.horizontal(|ui| {
        ui.label("Rectangle:");
        ui.add(egui::TextEdit::singleline(name).desired_width(120.0));

        let target = name.trim().to_string();
        ui.add_enabled_ui(!live_mode && !target.is_empty(), |ui| {
            for &color in SignalColor::all() {
                if ui.button(format!("Toggle {}", capitalize(color.as_str()))).clicked() {
                    actions.push(AppAction::ToggleSignal {
                        name: target.clone(),
                        color,
                    });
                }
            }
            ui.separator();
            if ui.button("All On").clicked() {
                actions.push(AppAction::SetAllSignals {
                    name: target.clone(),
                    value: true,
                });
            }
            if ui.button("All Off").clicked() {
                actions.push(AppAction::SetAllSignals {
                    name: target.clone(),
                    value: false,
                });
            }
        });
    });

    actions
}

/// Native open dialog filtered to scene files
pub fn pick_scene_file() -> Option<std::path::PathBuf> {
    rfd::FileDialog::new()
        .add_filter("Scene", &[crate::config::SCENE_FILE_EXTENSION])
        .pick_file()
}

/// Native save dialog filtered to scene files
pub fn pick_save_path() -> Option<std::path::PathBuf> {
    rfd::FileDialog::new()
        .add_filter("Scene", &[crate::config::SCENE_FILE_EXTENSION])
        .save_file()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("yellow"), "Yellow");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_every_edit_dialog_has_a_button() {
        assert_eq!(EDIT_BUTTONS.len(), 9);
        assert!(EDIT_BUTTONS.iter().any(|(_, id)| *id == DialogId::Rename));
    }
}
