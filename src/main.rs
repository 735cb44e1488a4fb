//! GPIO Diagram Editor - Main Entry Point
//!
//! Draws rectangles, points and connecting lines, and mirrors GPIO pin
//! levels into each bound rectangle's red indicator.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use gpio_diagram::{
    config::{self, AppState, EditorConfig},
    frontend::DiagramApp,
    gpio::{lock_gpio, Gpio, SharedGpio},
    poll::{PollHandle, Wakeup},
    scene::{load_scene_or_default, SceneGraph},
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Diagram editor with live GPIO indicators
#[derive(Debug, Parser)]
#[command(name = "gpio-diagram", version, about)]
struct Cli {
    /// Poll pins only; all editing is disabled
    #[arg(long)]
    live: bool,

    /// Scene file to open at startup
    #[arg(long, value_name = "PATH")]
    load: Option<PathBuf>,

    /// Editor configuration file (TOML)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Start from the built-in scene without reading any file
    #[arg(long, conflicts_with = "load")]
    no_load: bool,

    /// Attach the Raspberry Pi GPIO backend
    #[arg(long)]
    hardware: bool,
}

/// Install stderr logging plus a daily log file when the data dir is usable
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,gpio_diagram=debug"));

    let file = config::log_dir().and_then(|dir| {
        std::fs::create_dir_all(&dir).ok()?;
        let appender = tracing_appender::rolling::daily(dir, "gpio-diagram.log");
        Some(tracing_appender::non_blocking(appender))
    });

    match file {
        Some((writer, guard)) => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
            None
        }
    }
}

fn build_gpio(cli: &Cli, simulating: bool) -> anyhow::Result<Gpio> {
    if cli.hardware {
        attach_hardware(simulating)
    } else {
        Ok(Gpio::new(simulating))
    }
}

#[cfg(feature = "hardware-gpio")]
fn attach_hardware(simulating: bool) -> anyhow::Result<Gpio> {
    let backend = gpio_diagram::gpio::RppalBackend::new()
        .context("Failed to open the GPIO peripheral")?;
    Ok(Gpio::with_backend(Box::new(backend), simulating))
}

#[cfg(not(feature = "hardware-gpio"))]
fn attach_hardware(simulating: bool) -> anyhow::Result<Gpio> {
    tracing::warn!("Built without the hardware-gpio feature; GPIO will be simulated");
    Ok(Gpio::new(simulating))
}

fn initial_scene(cli: &Cli, path: &Path, gpio: &SharedGpio) -> anyhow::Result<SceneGraph> {
    let mut gpio = lock_gpio(gpio)?;
    if cli.no_load {
        return Ok(SceneGraph::default_scene(&mut gpio)?);
    }
    let (scene, report) = load_scene_or_default(path, &mut gpio)?;
    if let Some(report) = report.filter(|r| !r.is_clean()) {
        tracing::warn!("Scene loaded with problems: {}", report);
    }
    Ok(scene)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging();

    tracing::info!("Starting GPIO Diagram Editor");

    let editor_config = match &cli.config {
        Some(path) => EditorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EditorConfig::default(),
    };

    let mut app_state = AppState::load_or_default();
    app_state.cleanup_missing_scenes();

    let gpio = build_gpio(&cli, editor_config.start_simulating)?.into_shared();
    let scene_path = cli
        .load
        .clone()
        .unwrap_or_else(|| editor_config.default_scene_file.clone());

    let scene = initial_scene(&cli, &scene_path, &gpio)?.into_shared();

    if cli.live {
        tracing::info!("Live mode: editing disabled");
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([
                editor_config.canvas_width + 40.0,
                editor_config.canvas_height + 140.0,
            ])
            .with_min_inner_size([640.0, 480.0])
            .with_title("GPIO Diagram Editor"),
        ..Default::default()
    };

    let live_mode = cli.live;
    eframe::run_native(
        "GPIO Diagram Editor",
        native_options,
        Box::new(move |cc| {
            let repaint_ctx = cc.egui_ctx.clone();
            let wakeup: Wakeup = std::sync::Arc::new(move || repaint_ctx.request_repaint());
            let poll = PollHandle::spawn(
                scene.clone(),
                gpio.clone(),
                editor_config.poll_interval(),
                wakeup,
            )?;

            Ok(Box::new(DiagramApp::new(
                cc,
                scene,
                gpio,
                poll,
                editor_config,
                app_state,
                scene_path,
                live_mode,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {}", e))?;

    tracing::info!("Shutting down...");
    Ok(())
}
