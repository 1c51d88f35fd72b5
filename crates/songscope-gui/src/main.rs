//! Songscope - interactive dashboard for a music streaming dataset.
//!
//! A projection scatter plot, an audio-feature radar, and platform comparison
//! views cross-linked through shared filters.
//! Compiles for both native (desktop) and wasm32 (browser) targets.

// ── Native entry point ──────────────────────────────────────────────────────

#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;
#[cfg(not(target_arch = "wasm32"))]
use eframe::egui;
use songscope_config::DashboardConfig;
use songscope_gui::SongscopeApp;

/// Songscope dashboard.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Parser, Debug)]
#[command(name = "songscope")]
#[command(about = "Cross-linked music dataset dashboard")]
#[command(version)]
struct Args {
    /// Dataset JSON file (overrides `data_path` from the config)
    #[arg(long)]
    data: Option<std::path::PathBuf>,

    /// Configuration file (default: the user config directory)
    #[arg(long)]
    config: Option<std::path::PathBuf>,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    use tracing_subscriber::EnvFilter;

    // Initialize tracing subscriber; bridge log:: calls from eframe/egui
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    tracing_log::LogTracer::init().ok();

    let args = Args::parse();

    tracing::info!("Starting Songscope");

    let mut config = match DashboardConfig::discover(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "config not loaded, using defaults");
            DashboardConfig::default()
        }
    };
    if let Some(data) = args.data {
        config.data_path = data;
    }
    tracing::info!(path = %config.data_path.display(), "dataset");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 860.0])
            .with_min_inner_size([1000.0, 640.0])
            .with_title("Songscope"),
        ..Default::default()
    };

    eframe::run_native(
        "Songscope",
        options,
        Box::new(move |cc| Ok(Box::new(SongscopeApp::new(cc, config)))),
    )
}

// ── Wasm entry point ────────────────────────────────────────────────────────

#[cfg(target_arch = "wasm32")]
fn main() {
    use wasm_bindgen::JsCast;

    eframe::WebLogger::init(log::LevelFilter::Debug).ok();
    tracing::info!("Songscope starting (wasm)");

    wasm_bindgen_futures::spawn_local(async {
        let document = web_sys::window()
            .expect("no window")
            .document()
            .expect("no document");
        let canvas = document
            .get_element_by_id("songscope_canvas")
            .expect("no canvas element with id 'songscope_canvas'")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("element is not a canvas");

        eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(|cc| Ok(Box::new(SongscopeApp::new(cc, DashboardConfig::default())))),
            )
            .await
            .expect("failed to start eframe");
    });
}
