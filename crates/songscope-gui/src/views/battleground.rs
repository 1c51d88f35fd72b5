//! Platform comparison: feature/playlist correlation heatmap and mean
//! playlist bars.

use egui::{Align2, FontId, Rect, RichText, Sense, Stroke, StrokeKind, Ui, pos2, vec2};
use songscope_core::{
    CorrelationMatrix, Dataset, PlatformPresence, Preference, Record, SelectionListener,
    SelectionResult,
};
use songscope_registry::{Feature, Platform};

use super::{ViewAction, compact_count, grouped};
use crate::theme::{Theme, to_color32, with_opacity};

const ROW_LABEL_WIDTH: f32 = 100.0;
const HEADER_HEIGHT: f32 = 20.0;

/// The "Battleground" view.
#[derive(Debug)]
pub struct BattlegroundView {
    matrix: CorrelationMatrix,
    presence: Option<PlatformPresence>,
}

impl Default for BattlegroundView {
    fn default() -> Self {
        Self::new()
    }
}

impl BattlegroundView {
    /// An empty view; filled by the first selection.
    pub fn new() -> Self {
        Self {
            matrix: CorrelationMatrix::compute(&[]),
            presence: None,
        }
    }

    /// Correlation shown in one heatmap cell.
    pub fn correlation(&self, feature: Feature, platform: Platform) -> f64 {
        self.matrix.get(feature, platform)
    }

    /// Bar values, `None` for an empty selection.
    pub fn presence(&self) -> Option<&PlatformPresence> {
        self.presence.as_ref()
    }

    /// Render heatmap above bars.
    pub fn ui(&self, ui: &mut Ui, theme: &Theme, actions: &mut Vec<ViewAction>) {
        let avail = ui.available_size();
        let heatmap_height = (avail.y * 0.55).max(140.0);

        ui.label(RichText::new("Platform Battleground").strong());
        ui.allocate_ui(vec2(avail.x, heatmap_height), |ui| {
            self.heatmap(ui, theme, actions);
        });
        ui.add_space(8.0);
        ui.label(RichText::new("Average Playlists per Song").strong());
        self.bars(ui, theme, actions);
    }

    fn heatmap(&self, ui: &mut Ui, theme: &Theme, actions: &mut Vec<ViewAction>) {
        let size = ui.available_size().max(vec2(200.0, 120.0));
        let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
        let painter = ui.painter_at(rect);

        if self.presence.is_none() {
            no_data(&painter, rect, theme);
            return;
        }

        let cols = Platform::ALL.len() as f32;
        let rows = Feature::ALL.len() as f32;
        let cell_w = (rect.width() - ROW_LABEL_WIDTH) / cols;
        let cell_h = (rect.height() - HEADER_HEIGHT) / rows;
        let small = FontId::proportional(11.0);

        for (c, platform) in Platform::ALL.into_iter().enumerate() {
            painter.text(
                pos2(
                    rect.left() + ROW_LABEL_WIDTH + cell_w * (c as f32 + 0.5),
                    rect.top() + HEADER_HEIGHT / 2.0,
                ),
                Align2::CENTER_CENTER,
                platform.label(),
                small.clone(),
                to_color32(platform.color()),
            );
        }

        for (r, feature) in Feature::ALL.into_iter().enumerate() {
            let top = rect.top() + HEADER_HEIGHT + cell_h * r as f32;
            painter.text(
                pos2(rect.left() + ROW_LABEL_WIDTH - 6.0, top + cell_h / 2.0),
                Align2::RIGHT_CENTER,
                feature.name(),
                small.clone(),
                theme.text_primary,
            );

            for (c, platform) in Platform::ALL.into_iter().enumerate() {
                let cell = Rect::from_min_size(
                    pos2(rect.left() + ROW_LABEL_WIDTH + cell_w * c as f32, top),
                    vec2(cell_w, cell_h),
                )
                .shrink(1.0);
                let corr = self.matrix.get(feature, platform);
                let response = ui
                    .interact(cell, ui.id().with(("cell", r, c)), Sense::click())
                    .on_hover_cursor(egui::CursorIcon::PointingHand);

                painter.rect_filled(cell, 2.0, theme.correlation_color(corr));
                if response.hovered() {
                    painter.rect_stroke(
                        cell,
                        2.0,
                        Stroke::new(2.0, theme.text_primary),
                        StrokeKind::Inside,
                    );
                }
                painter.text(
                    cell.center(),
                    Align2::CENTER_CENTER,
                    format!("{corr:.2}"),
                    small.clone(),
                    if corr.abs() > 0.5 {
                        egui::Color32::WHITE
                    } else {
                        egui::Color32::from_rgb(30, 30, 30)
                    },
                );

                if response.clicked() {
                    actions.push(ViewAction::CellClicked {
                        feature,
                        platform,
                        correlation: corr,
                    });
                }
                response.on_hover_ui_at_pointer(|ui| {
                    ui.label(
                        RichText::new(format!("{} × {}", platform.label(), feature.name()))
                            .strong(),
                    );
                    ui.label(format!("Correlation: {corr:.3}"));
                    ui.label(Preference::classify(corr).label());
                    ui.label(
                        RichText::new("Click to filter by this feature")
                            .italics()
                            .small(),
                    );
                });
            }
        }
    }

    fn bars(&self, ui: &mut Ui, theme: &Theme, actions: &mut Vec<ViewAction>) {
        let size = ui.available_size().max(vec2(200.0, 100.0));
        let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
        let painter = ui.painter_at(rect);

        let Some(presence) = &self.presence else {
            no_data(&painter, rect, theme);
            return;
        };

        let max = presence.max().max(1.0);
        let label_h = 18.0;
        let plot = Rect::from_min_max(
            pos2(rect.left() + 10.0, rect.top() + label_h),
            pos2(rect.right() - 10.0, rect.bottom() - label_h),
        );
        let band = plot.width() / Platform::ALL.len() as f32;
        let small = FontId::proportional(11.0);

        painter.line_segment(
            [plot.left_bottom(), plot.right_bottom()],
            Stroke::new(1.0, theme.grid),
        );

        for (i, platform) in Platform::ALL.into_iter().enumerate() {
            let value = presence.mean(platform);
            let height = (value / max) as f32 * plot.height();
            let left = plot.left() + band * i as f32 + band * 0.15;
            let bar = Rect::from_min_max(
                pos2(left, plot.bottom() - height),
                pos2(left + band * 0.7, plot.bottom()),
            );
            let hit = Rect::from_min_max(pos2(bar.left(), plot.top()), bar.right_bottom());
            let response = ui
                .interact(hit, ui.id().with(("bar", i)), Sense::click())
                .on_hover_cursor(egui::CursorIcon::PointingHand);

            let color = to_color32(platform.color());
            let fill = if response.hovered() {
                color
            } else {
                with_opacity(color, 0.85)
            };
            painter.rect_filled(bar, 3.0, fill);
            painter.text(
                pos2(bar.center().x, bar.top() - 4.0),
                Align2::CENTER_BOTTOM,
                compact_count(value),
                small.clone(),
                theme.text_primary,
            );
            painter.text(
                pos2(bar.center().x, plot.bottom() + 3.0),
                Align2::CENTER_TOP,
                platform.label(),
                small.clone(),
                theme.text_secondary,
            );

            if response.clicked() {
                actions.push(ViewAction::HighlightPlatform(platform));
            }
            response.on_hover_ui_at_pointer(|ui| {
                ui.label(RichText::new(platform.label()).strong());
                ui.label(format!("Average Playlists: {}", grouped(value)));
                ui.label(
                    RichText::new("Click to highlight top performers")
                        .italics()
                        .small(),
                );
            });
        }
    }
}

fn no_data(painter: &egui::Painter, rect: Rect, theme: &Theme) {
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        "No data",
        FontId::proportional(14.0),
        theme.text_secondary,
    );
}

impl SelectionListener for BattlegroundView {
    fn selection_changed(&mut self, dataset: &Dataset, selection: &SelectionResult) {
        let records: Vec<&Record> = selection.records(dataset).collect();
        self.matrix = CorrelationMatrix::compute(&records);
        self.presence = PlatformPresence::compute(records.iter().copied());
    }
}
