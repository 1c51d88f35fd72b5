//! Main application: boot sequence and frame loop.

use std::sync::Arc;

use eframe::egui::{CentralPanel, Context, RichText};
use songscope_config::DashboardConfig;

use crate::Instant;
use crate::controller::Dashboard;
use crate::loader::DatasetLoader;
use crate::theme::Theme;

/// Where startup has got to.
enum BootState {
    /// Dataset still in flight.
    Loading(DatasetLoader),
    /// Load failed; the message stays on screen.
    Failed(String),
    /// Everything is wired.
    Ready(Box<Dashboard>),
}

/// The Songscope application.
pub struct SongscopeApp {
    config: DashboardConfig,
    theme: Theme,
    state: BootState,
}

impl SongscopeApp {
    /// Apply the theme and start loading the dataset named by `config`.
    pub fn new(cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let theme = Theme::default();
        theme.apply(&cc.egui_ctx);

        let loader = DatasetLoader::spawn(config.data_path.clone(), cc.egui_ctx.clone());

        Self {
            config,
            theme,
            state: BootState::Loading(loader),
        }
    }

    fn poll_loader(&mut self) {
        let BootState::Loading(loader) = &self.state else {
            return;
        };
        let Some(result) = loader.poll() else {
            return;
        };
        let source = loader.source().display().to_string();

        self.state = match result {
            Ok(dataset) => BootState::Ready(Box::new(Dashboard::new(
                Arc::new(dataset),
                &self.config,
            ))),
            Err(e) => {
                tracing::error!(source = %source, error = %e, "failed to load dataset");
                BootState::Failed(format!("Could not load {source}: {e}"))
            }
        };
    }
}

impl eframe::App for SongscopeApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.poll_loader();

        match &mut self.state {
            BootState::Loading(loader) => {
                let source = loader.source().display().to_string();
                CentralPanel::default().show(ctx, |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label(format!("Loading {source}..."));
                        });
                    });
                });
            }
            BootState::Failed(message) => {
                let color = self.theme.error;
                CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(ui.available_height() / 3.0);
                        ui.heading(RichText::new("Dataset unavailable").color(color));
                        ui.add_space(8.0);
                        ui.label(message.as_str());
                    });
                });
            }
            BootState::Ready(dashboard) => {
                dashboard.ui(ctx, &self.theme, Instant::now());
            }
        }
    }
}
