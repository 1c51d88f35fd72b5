//! The three cross-linked views.
//!
//! Each view subscribes to the filter coordinator and keeps only what it
//! needs to draw. Views never mutate filters themselves: user input is
//! returned as [`ViewAction`]s that the dashboard applies after the frame's
//! rendering is done.

mod battleground;
mod fingerprint;
mod universe;

pub use battleground::BattlegroundView;
pub use fingerprint::FingerprintView;
pub use universe::UniverseView;

use songscope_core::{ColorKey, Feature, FeatureRange, FilterSlot, LassoOutcome, Mode, Platform};

/// Something the user asked for in a view or control.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewAction {
    /// A brush was released.
    Lasso(LassoOutcome),
    /// Color points by a different key.
    ColorBy(ColorKey),
    /// A radar axis label was clicked.
    FeatureClicked(Feature),
    /// A heatmap cell was clicked.
    CellClicked {
        /// Row feature.
        feature: Feature,
        /// Column platform.
        platform: Platform,
        /// Correlation shown in the cell.
        correlation: f64,
    },
    /// A platform bar was clicked.
    HighlightPlatform(Platform),
    /// Set or clear the mode filter.
    SetMode(Option<Mode>),
    /// Edit the range on one feature.
    SetRange(Feature, FeatureRange),
    /// Filter to one artist by name.
    SelectArtist(String),
    /// Drop the artist filter.
    ClearArtist,
    /// Drop one filter from the summary panel.
    Remove(FilterSlot),
    /// Drop every filter.
    ClearAll,
}

/// "1 song" / "N songs".
pub fn songs_label(count: usize) -> String {
    if count == 1 {
        "1 song".to_string()
    } else {
        format!("{count} songs")
    }
}

/// Compact count: `1.2M`, `35K`, or the plain number.
pub fn compact_count(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.0}K", value / 1_000.0)
    } else {
        format!("{value:.0}")
    }
}

/// Thousands-separated integer, e.g. `1,234,567`.
pub fn grouped(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if value < 0.0 && digits != "0" {
        out.insert(0, '-');
    }
    out
}
