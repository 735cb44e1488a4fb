//! Frontend module for the egui diagram editor
//!
//! The UI thread owns every user-driven mutation. The pin poller runs on its
//! own thread, writes only red flags, and asks for repaints through
//! [`PollMessage::Redraw`] and the wakeup hook.
//!
//! # Main Types
//!
//! - [`DiagramApp`] - Main application state implementing [`eframe::App`]
//! - [`AppAction`] - Everything a toolbar button or dialog can request
//!
//! # Submodules
//!
//! - `canvas` - Scene drawing and drag-to-move
//! - `dialogs` - Input dialogs built on the [`dialogs::Dialog`] trait
//! - `toolbar` / `status_bar` - Top and bottom panels

pub mod canvas;
pub mod dialogs;
pub mod state;
pub mod status_bar;
pub mod toolbar;

pub use state::{apply_scene_action, AppAction, DialogId};

use std::path::PathBuf;

use dialogs::{
    show_dialog, NodeEditorContext, NodeEditorDialog, NodeEditorState,
    PointEditorDialog, PointEditorState, ShapeOp, ShapeOpDialog, ShapeOpState, ShapePairDialog,
    ShapePairKind, ShapePairState,
};
use egui::Vec2;

use crate::config::{AppState, EditorConfig};
use crate::error::Result;
use crate::gpio::{lock_gpio, SharedGpio};
use crate::poll::{PollHandle, PollMessage};
use crate::scene::{read_scene, write_scene, LoadReport, SceneDocument, SceneGraph, SharedScene};

/// Main application state
pub struct DiagramApp {
    scene: SharedScene,
    gpio: SharedGpio,
    poll: PollHandle,
    config: EditorConfig,
    app_state: AppState,
    scene_path: PathBuf,
    live_mode: bool,

    status: String,
    status_is_error: bool,
    /// Name typed into the signal row
    signal_target: String,

    node_editor_open: bool,
    node_editor_state: NodeEditorState,
    point_editor_open: bool,
    point_editor_state: PointEditorState,
    shape_pair_open: bool,
    shape_pair_state: ShapePairState,
    shape_op_open: bool,
    shape_op_state: ShapeOpState,
}

impl DiagramApp {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        scene: SharedScene,
        gpio: SharedGpio,
        poll: PollHandle,
        config: EditorConfig,
        app_state: AppState,
        scene_path: PathBuf,
        live_mode: bool,
    ) -> Self {
        cc.egui_ctx.set_visuals(if app_state.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });

        let status = if live_mode {
            "Live mode: editing disabled".to_string()
        } else {
            String::new()
        };

        Self {
            scene,
            gpio,
            poll,
            config,
            app_state,
            scene_path,
            live_mode,
            status,
            status_is_error: false,
            signal_target: String::new(),
            node_editor_open: false,
            node_editor_state: NodeEditorState::default(),
            point_editor_open: false,
            point_editor_state: PointEditorState::default(),
            shape_pair_open: false,
            shape_pair_state: ShapePairState::default(),
            shape_op_open: false,
            shape_op_state: ShapeOpState::default(),
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status = message.into();
        self.status_is_error = false;
        tracing::info!("{}", self.status);
    }

    fn set_error(&mut self, message: impl Into<String>) {
        self.status = message.into();
        self.status_is_error = true;
        tracing::warn!("{}", self.status);
    }

    /// Drain poller messages; returns true if a repaint is needed
    fn process_poll_messages(&mut self) -> bool {
        let messages = self.poll.drain();
        let mut redraw = false;

        for msg in messages {
            match msg {
                PollMessage::SignalChanged { node, red } => {
                    tracing::debug!("{} red -> {}", node, red);
                    redraw = true;
                }
                PollMessage::ReadError { node, pin, error } => {
                    self.set_error(format!("Error reading GPIO {} for {}: {}", pin, node, error));
                }
                PollMessage::Redraw => redraw = true,
            }
        }
        redraw
    }

    fn handle_action(&mut self, action: AppAction) {
        match action {
            AppAction::OpenDialog(id) => self.open_dialog(id),
            AppAction::SaveScene(path) => {
                let path = path.unwrap_or_else(|| self.scene_path.clone());
                self.save_scene_to_path(path);
            }
            AppAction::LoadScene(path) => self.load_scene_from_path(path),
            AppAction::ToggleSimulation => self.toggle_simulation(),
            edit => {
                if self.live_mode {
                    self.set_error("Editing is disabled in live mode");
                    return;
                }
                let result = self.apply_edit(edit);
                match result {
                    Ok(message) => self.set_status(message),
                    Err(e) => self.set_error(format!("Error: {}", e)),
                }
            }
        }
    }

    fn apply_edit(&self, action: AppAction) -> Result<String> {
        let mut scene = write_scene(&self.scene)?;
        let mut gpio = lock_gpio(&self.gpio)?;
        apply_scene_action(&mut scene, &mut gpio, action)
    }

    fn open_dialog(&mut self, id: DialogId) {
        if self.live_mode {
            self.set_error("Editing is disabled in live mode");
            return;
        }
        match id {
            DialogId::NodeEditor => self.node_editor_open = true,
            DialogId::PointEditor => self.point_editor_open = true,
            DialogId::Connect | DialogId::Disconnect => {
                let kind = if id == DialogId::Connect {
                    ShapePairKind::Connect
                } else {
                    ShapePairKind::Disconnect
                };
                self.shape_pair_state = ShapePairState::for_kind(kind);
                self.shape_pair_open = true;
            }
            DialogId::Move
            | DialogId::Resize
            | DialogId::SwitchPoints
            | DialogId::Remove
            | DialogId::Rename => {
                let op = match id {
                    DialogId::Move => ShapeOp::Move,
                    DialogId::Resize => ShapeOp::Resize,
                    DialogId::SwitchPoints => ShapeOp::SwitchPoints,
                    DialogId::Remove => ShapeOp::Remove,
                    _ => ShapeOp::Rename,
                };
                self.shape_op_state = ShapeOpState::for_op(op);
                self.shape_op_open = true;
            }
        }
    }

    /// Flip simulation mode, returning the new mode and the pins refreshed
    fn switch_simulation(&self) -> Result<(bool, usize)> {
        let mut scene = write_scene(&self.scene)?;
        let mut gpio = lock_gpio(&self.gpio)?;
        let enabled = !gpio.is_simulating();
        let refreshed = scene.set_simulation(enabled, &mut gpio);
        Ok((enabled, refreshed))
    }

    fn toggle_simulation(&mut self) {
        match self.switch_simulation() {
            Ok((enabled, refreshed)) => {
                self.poll.poll_now();
                self.set_status(format!(
                    "Simulation {} ({} pin(s) refreshed)",
                    if enabled { "ON" } else { "OFF" },
                    refreshed
                ));
            }
            Err(e) => self.set_error(format!("Error: {}", e)),
        }
    }

    fn save_scene_to_path(&mut self, path: PathBuf) {
        let result = read_scene(&self.scene).and_then(|scene| scene.to_document().save(&path));
        match result {
            Ok(()) => {
                self.scene_path = path.clone();
                self.app_state.add_recent_scene(&path);
                if let Err(e) = self.app_state.save() {
                    tracing::warn!("Failed to save app state: {}", e);
                }
                self.set_status(format!("Saved to {}", path.display()));
            }
            Err(e) => self.set_error(format!("Error saving file: {}", e)),
        }
    }

    /// Swap in a scene from disk, releasing the old scene's pins first
    fn replace_scene(&self, doc: &SceneDocument) -> Result<LoadReport> {
        let mut scene = write_scene(&self.scene)?;
        let mut gpio = lock_gpio(&self.gpio)?;
        scene.release_pins(&mut gpio);
        let (loaded, report) = SceneGraph::from_document(doc, &mut gpio);
        *scene = loaded;
        Ok(report)
    }

    fn load_scene_from_path(&mut self, path: PathBuf) {
        let doc = match SceneDocument::load(&path) {
            Ok(doc) => doc,
            Err(e) => {
                self.app_state.remove_recent_scene(&path);
                self.set_error(format!("Error loading file: {}", e));
                return;
            }
        };

        match self.replace_scene(&doc) {
            Ok(report) => {
                self.scene_path = path.clone();
                self.app_state.add_recent_scene(&path);
                if let Err(e) = self.app_state.save() {
                    tracing::warn!("Failed to save app state: {}", e);
                }
                self.poll.poll_now();
                if report.is_clean() {
                    self.set_status(format!("Loaded {}: {}", path.display(), report));
                } else {
                    self.set_error(format!("Loaded {} with problems: {}", path.display(), report));
                }
            }
            Err(e) => self.set_error(format!("Error loading file: {}", e)),
        }
    }

    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        let save = ctx.input_mut(|i| i.consume_key(egui::Modifiers::COMMAND, egui::Key::S));
        if save {
            self.handle_action(AppAction::SaveScene(None));
        }
        let escape = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if escape {
            self.node_editor_open = false;
            self.point_editor_open = false;
            self.shape_pair_open = false;
            self.shape_op_open = false;
        }
    }

    fn render_menu_bar(&mut self, ctx: &egui::Context) -> Vec<AppAction> {
        let mut actions = Vec::new();
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Save").clicked() {
                        actions.push(AppAction::SaveScene(None));
                        ui.close();
                    }
                    if ui.button("Save As...").clicked() {
                        if let Some(path) = toolbar::pick_save_path() {
                            actions.push(AppAction::SaveScene(Some(path)));
                        }
                        ui.close();
                    }
                    if ui.button("Load...").clicked() {
                        if let Some(path) = toolbar::pick_scene_file() {
                            actions.push(AppAction::LoadScene(path));
                        }
                        ui.close();
                    }
                    if !self.app_state.recent_scenes.is_empty() {
                        ui.separator();
                        ui.menu_button("Recent", |ui| {
                            for recent in &self.app_state.recent_scenes {
                                if ui.button(recent.display_name()).clicked() {
                                    actions.push(AppAction::LoadScene(recent.path.clone()));
                                    ui.close();
                                }
                            }
                        });
                    }
                });

                ui.menu_button("View", |ui| {
                    if ui.checkbox(&mut self.app_state.dark_mode, "Dark mode").changed() {
                        ctx.set_visuals(if self.app_state.dark_mode {
                            egui::Visuals::dark()
                        } else {
                            egui::Visuals::light()
                        });
                    }
                });
            });
        });
        actions
    }

    fn render_dialogs(&mut self, ctx: &egui::Context) -> Vec<AppAction> {
        let mut actions = Vec::new();
        let scene = match read_scene(&self.scene) {
            Ok(scene) => scene,
            Err(e) => {
                tracing::error!("Scene unavailable for dialogs: {}", e);
                return actions;
            }
        };

        actions.extend(show_dialog::<NodeEditorDialog>(
            ctx,
            &mut self.node_editor_open,
            &mut self.node_editor_state,
            NodeEditorContext { scene: &scene },
        ));
        actions.extend(show_dialog::<PointEditorDialog>(
            ctx,
            &mut self.point_editor_open,
            &mut self.point_editor_state,
            (),
        ));
        actions.extend(show_dialog::<ShapePairDialog>(
            ctx,
            &mut self.shape_pair_open,
            &mut self.shape_pair_state,
            (),
        ));
        actions.extend(show_dialog::<ShapeOpDialog>(
            ctx,
            &mut self.shape_op_open,
            &mut self.shape_op_state,
            &scene,
        ));
        actions
    }
}

impl eframe::App for DiagramApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.process_poll_messages() {
            ctx.request_repaint();
        }
        self.handle_keyboard_shortcuts(ctx);

        let mut actions = self.render_menu_bar(ctx);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            let (simulating, has_hardware) = match lock_gpio(&self.gpio) {
                Ok(gpio) => (gpio.is_simulating(), gpio.has_hardware()),
                Err(_) => (true, false),
            };
            let toolbar_ctx = toolbar::ToolbarContext {
                simulating,
                live_mode: self.live_mode,
                has_hardware,
                scene_path: &self.scene_path,
            };
            actions.extend(toolbar::render_toolbar(ui, &toolbar_ctx).actions);
            actions.extend(toolbar::render_signal_row(
                ui,
                &mut self.signal_target,
                self.live_mode,
            ));
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let counts = read_scene(&self.scene)
                .map(|s| (s.node_count(), s.point_count(), s.connector_count()))
                .unwrap_or_default();
            let (simulating, backend, stats) = match lock_gpio(&self.gpio) {
                Ok(gpio) => (gpio.is_simulating(), gpio.active_backend(), gpio.stats().clone()),
                Err(_) => (true, "unavailable", Default::default()),
            };
            status_bar::render_status_bar(
                ui,
                &status_bar::StatusBarContext {
                    message: &self.status,
                    is_error: self.status_is_error,
                    simulating,
                    backend,
                    live_mode: self.live_mode,
                    stats: &stats,
                    counts,
                    scene_path: &self.scene_path,
                },
            );
        });

        let mut drag_message = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                let size = Vec2::new(self.config.canvas_width, self.config.canvas_height)
                    .max(ui.available_size());
                match write_scene(&self.scene) {
                    Ok(mut scene) => {
                        let result = canvas::render_canvas(ui, &mut scene, size, !self.live_mode);
                        if let Some(name) = result.drag_finished {
                            drag_message = Some(format!("Moved '{}'", name));
                        }
                    }
                    Err(e) => {
                        ui.colored_label(egui::Color32::LIGHT_RED, e.to_string());
                    }
                }
            });
        });
        if let Some(message) = drag_message {
            self.set_status(message);
        }

        actions.extend(self.render_dialogs(ctx));

        for action in actions {
            self.handle_action(action);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if !self.poll.stop(self.config.shutdown_timeout()) {
            tracing::warn!("Poll thread did not stop in time");
        }

        match lock_gpio(&self.gpio) {
            Ok(mut gpio) => gpio.cleanup(None),
            Err(e) => tracing::warn!("Failed to release GPIO: {}", e),
        }

        self.app_state.last_scene_path = Some(self.scene_path.clone());
        if let Err(e) = self.app_state.save() {
            tracing::warn!("Failed to save app state: {}", e);
        }
        tracing::info!("Editor closed");
    }
}
