//! Radar chart of mean audio features over the selection.

use std::f32::consts::{PI, TAU};

use egui::{Mesh, Pos2, Rect, RichText, Sense, Shape, Stroke, Ui, pos2, vec2};
use songscope_core::{Dataset, FeatureProfile, SelectionListener, SelectionResult};
use songscope_registry::{FEATURE_MAX, Feature};

use super::{ViewAction, songs_label};
use crate::theme::{Theme, with_opacity};

const LEVELS: usize = 5;
const LABEL_GAP: f32 = 25.0;

/// The "Fingerprint" view.
#[derive(Debug, Default)]
pub struct FingerprintView {
    profile: Option<FeatureProfile>,
}

impl FingerprintView {
    /// An empty radar; filled by the first selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current means, `None` for an empty selection.
    pub fn profile(&self) -> Option<&FeatureProfile> {
        self.profile.as_ref()
    }

    /// Render the radar.
    pub fn ui(&self, ui: &mut Ui, theme: &Theme, actions: &mut Vec<ViewAction>) {
        ui.horizontal(|ui| {
            ui.label(RichText::new("Audio Fingerprint").strong());
            if let Some(profile) = &self.profile {
                ui.label(
                    RichText::new(format!("({})", songs_label(profile.count())))
                        .small()
                        .color(theme.text_secondary),
                );
            }
        });

        let size = ui.available_size().max(vec2(160.0, 160.0));
        let (rect, response) = ui.allocate_exact_size(size, Sense::hover());
        let painter = ui.painter_at(rect);

        let Some(profile) = &self.profile else {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "No data",
                egui::FontId::proportional(14.0),
                theme.text_secondary,
            );
            return;
        };

        let center = rect.center();
        let radius = (rect.width().min(rect.height()) / 2.0 - LABEL_GAP - 16.0).max(20.0);
        let scale = |value: f64| (value / FEATURE_MAX).clamp(0.0, 1.0) as f32 * radius;

        // Grid
        for level in 1..=LEVELS {
            let r = radius * level as f32 / LEVELS as f32;
            painter.circle_stroke(center, r, Stroke::new(1.0, theme.grid));
            if level < LEVELS {
                painter.text(
                    pos2(center.x + 4.0, center.y - r),
                    egui::Align2::LEFT_BOTTOM,
                    format!("{}%", level * 100 / LEVELS),
                    egui::FontId::proportional(10.0),
                    theme.text_secondary,
                );
            }
        }

        // Area
        let points: Vec<Pos2> = Feature::ALL
            .iter()
            .enumerate()
            .map(|(i, f)| polar(center, axis_angle(i), scale(profile.mean(*f))))
            .collect();
        // Fan from the centre: the radar outline is star-shaped, not convex.
        let fill = with_opacity(theme.accent, 0.35);
        let mut mesh = Mesh::default();
        mesh.colored_vertex(center, fill);
        for p in &points {
            mesh.colored_vertex(*p, fill);
        }
        let n = points.len() as u32;
        for i in 0..n {
            mesh.add_triangle(0, 1 + i, 1 + (i + 1) % n);
        }
        painter.add(Shape::mesh(mesh));
        painter.add(Shape::closed_line(points.clone(), Stroke::new(2.0, theme.accent)));

        for i in 0..Feature::ALL.len() {
            painter.line_segment(
                [center, polar(center, axis_angle(i), radius)],
                Stroke::new(2.0, theme.grid),
            );
            painter.circle_filled(points[i], 4.0, theme.accent);
        }

        // Clickable axis labels
        for (i, feature) in Feature::ALL.into_iter().enumerate() {
            let anchor = polar(center, axis_angle(i), radius + LABEL_GAP);
            let galley = ui.painter().layout_no_wrap(
                feature.name().to_string(),
                egui::FontId::proportional(12.0),
                theme.text_primary,
            );
            let label_rect = Rect::from_center_size(anchor, galley.size() + vec2(8.0, 4.0));
            let label = ui
                .interact(label_rect, response.id.with(("axis", i)), Sense::click())
                .on_hover_cursor(egui::CursorIcon::PointingHand);

            let color = if label.hovered() {
                theme.accent
            } else {
                theme.text_primary
            };
            painter.rect_filled(label_rect, 3.0, with_opacity(theme.panel_bg, 0.8));
            painter.text(
                anchor,
                egui::Align2::CENTER_CENTER,
                feature.name(),
                egui::FontId::proportional(12.0),
                color,
            );

            if label.clicked() {
                actions.push(ViewAction::FeatureClicked(feature));
            }
        }

        let hovered = response
            .hover_pos()
            .and_then(|pos| points.iter().position(|p| pos.distance(*p) <= 8.0));
        if let Some(i) = hovered {
            let feature = Feature::ALL[i];
            response.on_hover_ui_at_pointer(|ui| {
                ui.label(RichText::new(feature.name()).strong());
                ui.label(format!("Average: {:.1}%", profile.mean(feature)));
            });
        }
    }
}

impl SelectionListener for FingerprintView {
    fn selection_changed(&mut self, dataset: &Dataset, selection: &SelectionResult) {
        self.profile = FeatureProfile::compute(selection.records(dataset));
    }
}

/// Angle of axis `i`, starting at twelve o'clock and going clockwise.
fn axis_angle(i: usize) -> f32 {
    TAU * i as f32 / Feature::ALL.len() as f32 - PI / 2.0
}

fn polar(center: Pos2, angle: f32, r: f32) -> Pos2 {
    center + vec2(angle.cos() * r, angle.sin() * r)
}
