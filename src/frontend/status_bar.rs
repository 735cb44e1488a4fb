//! Status bar panel: last message, GPIO mode, read stats and scene counts.

use egui::{Color32, RichText, Ui};

use crate::gpio::GpioStats;

/// Context needed to render the status bar.
pub struct StatusBarContext<'a> {
    pub message: &'a str,
    /// Whether `message` reports a failure
    pub is_error: bool,
    pub simulating: bool,
    pub backend: &'static str,
    pub live_mode: bool,
    pub stats: &'a GpioStats,
    pub counts: (usize, usize, usize),
    pub scene_path: &'a std::path::Path,
}

/// Render the status bar.
pub fn render_status_bar(ui: &mut Ui, ctx: &StatusBarContext<'_>) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        let (mode_color, mode_text) = if ctx.simulating {
            (Color32::YELLOW, "Simulated")
        } else {
            (Color32::GREEN, ctx.backend)
        };
        ui.colored_label(mode_color, "●");
        ui.label(RichText::new(mode_text).small());
        if ctx.live_mode {
            ui.label(RichText::new("Live").small().strong());
        }

        ui.separator();

        ui.label(RichText::new(format!("Reads: {}", ctx.stats.successful_reads)).small());
        let error_color = if ctx.stats.failed_reads > 0 {
            Color32::LIGHT_RED
        } else {
            Color32::GRAY
        };
        ui.colored_label(
            error_color,
            RichText::new(format!("Errors: {}", ctx.stats.failed_reads)).small(),
        );

        ui.separator();

        let (nodes, points, lines) = ctx.counts;
        ui.label(
            RichText::new(format!(
                "{} rectangles, {} points, {} lines",
                nodes, points, lines
            ))
            .small(),
        );

        ui.separator();

        if !ctx.message.is_empty() {
            let color = if ctx.is_error {
                Color32::LIGHT_RED
            } else {
                ui.visuals().text_color()
            };
            ui.colored_label(color, RichText::new(ctx.message).small());
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                RichText::new(ctx.scene_path.display().to_string())
                    .small()
                    .weak(),
            );
        });
    });
}
