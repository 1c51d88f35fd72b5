//! Summary of active filters, each removable on its own.

use egui::{Color32, CornerRadius, Frame, Margin, RichText, Stroke, Ui};
use songscope_core::{FeatureRange, FilterSlot, FilterStore};
use songscope_registry::{FEATURE_MAX, FEATURE_MIN};

use crate::theme::{Theme, to_color32, with_opacity};
use crate::views::{ViewAction, songs_label};
use crate::widgets::RangeSlider;

const EMPTY_TEXT: &str = "No active filters. Use the controls above to filter songs.";
const LASSO_COLOR: Color32 = Color32::from_rgb(0x66, 0x7E, 0xEA);
const ARTIST_COLOR: Color32 = Color32::from_rgb(0xFF, 0xD7, 0x00);

/// One row of the panel.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterItem {
    /// Slot the row removes.
    pub slot: FilterSlot,
    /// Row title.
    pub title: String,
    /// Current value.
    pub detail: String,
    /// Accent strip.
    pub color: Color32,
    /// Editable bounds, for range rows.
    pub range: Option<FeatureRange>,
}

/// Rows for every set slot, in panel order.
pub fn items(store: &FilterStore) -> Vec<FilterItem> {
    store
        .active_slots()
        .into_iter()
        .filter_map(|slot| item(store, slot))
        .collect()
}

fn item(store: &FilterStore, slot: FilterSlot) -> Option<FilterItem> {
    let (title, detail, color, range) = match slot {
        FilterSlot::Lasso => (
            "Lasso Selection".to_string(),
            songs_label(store.lasso()?.len()),
            LASSO_COLOR,
            None,
        ),
        FilterSlot::Artist => (
            "Artist".to_string(),
            store.artist()?.name.clone(),
            ARTIST_COLOR,
            None,
        ),
        FilterSlot::Mode => {
            let mode = store.mode()?;
            ("Mode".to_string(), mode.label().to_string(), to_color32(mode.color()), None)
        }
        FilterSlot::Range(feature) => {
            let range = store.range(feature)?;
            (
                feature.name().to_string(),
                format!("{:.0} – {:.0}", range.min(), range.max()),
                to_color32(feature.color()),
                Some(range),
            )
        }
    };
    Some(FilterItem {
        slot,
        title,
        detail,
        color,
        range,
    })
}

/// Render the panel.
pub fn show(ui: &mut Ui, store: &FilterStore, theme: &Theme, actions: &mut Vec<ViewAction>) {
    let rows = items(store);

    ui.horizontal(|ui| {
        ui.label(RichText::new("Active Filters").strong());
        if !rows.is_empty() {
            badge(ui, rows.len(), theme);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("Clear all").clicked() {
                    actions.push(ViewAction::ClearAll);
                }
            });
        }
    });
    ui.add_space(4.0);

    if rows.is_empty() {
        ui.label(RichText::new(EMPTY_TEXT).italics().color(theme.text_secondary));
        return;
    }

    for row in rows {
        Frame::new()
            .fill(with_opacity(row.color, 0.12))
            .stroke(Stroke::new(1.0, with_opacity(row.color, 0.6)))
            .corner_radius(CornerRadius::same(4))
            .inner_margin(Margin::symmetric(8, 4))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&row.title).strong().color(row.color));
                    ui.label(&row.detail);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .small_button("×")
                            .on_hover_text("Remove filter")
                            .clicked()
                        {
                            actions.push(ViewAction::Remove(row.slot));
                        }
                    });
                });
                if let (FilterSlot::Range(feature), Some(range)) = (row.slot, row.range) {
                    let (mut low, mut high) = (range.min(), range.max());
                    let slider = RangeSlider::new(&mut low, &mut high, FEATURE_MIN, FEATURE_MAX)
                        .color(row.color)
                        .width(160.0);
                    if ui.add(slider).changed() {
                        actions.push(ViewAction::SetRange(feature, FeatureRange::new(low, high)));
                    }
                }
            });
        ui.add_space(2.0);
    }
}

fn badge(ui: &mut Ui, count: usize, theme: &Theme) {
    Frame::new()
        .fill(theme.accent)
        .corner_radius(CornerRadius::same(8))
        .inner_margin(Margin::symmetric(6, 0))
        .show(ui, |ui| {
            ui.label(RichText::new(count.to_string()).small().color(Color32::WHITE));
        });
}
