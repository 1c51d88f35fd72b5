//! Songscope dashboard GUI.
//!
//! Three cross-linked views over one filtered selection:
//!
//! - **Universe**: 2-D projection scatter with pan/zoom and a rectangular
//!   lasso
//! - **Fingerprint**: radar of mean audio features
//! - **Battleground**: feature/playlist correlation heatmap and per-platform
//!   bars
//!
//! A [`FilterCoordinator`](songscope_core::FilterCoordinator) owns the filter
//! state. Views emit [`views::ViewAction`]s while drawing; the
//! [`controller::Dashboard`] applies them once the frame is laid out.

pub mod app;
pub mod artist_search;
pub mod controller;
pub mod filter_panel;
pub mod loader;
pub mod theme;
pub mod views;
pub mod widgets;

pub use app::SongscopeApp;
pub use theme::Theme;

/// Monotonic clock that also works in the browser.
#[cfg(not(target_arch = "wasm32"))]
pub use std::time::Instant;
/// Monotonic clock that also works in the browser.
#[cfg(target_arch = "wasm32")]
pub use web_time::Instant;
