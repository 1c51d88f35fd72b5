//! Projection scatter plot with pan/zoom and rectangular lasso.

use std::sync::Arc;

use egui::{Color32, Pos2, Rect, RichText, Sense, Stroke, StrokeKind, Ui, pos2, vec2};
use songscope_core::{
    ColorKey, Dataset, InteractionMode, OpacityTransition, Point, PointStyle, Record, RecordId,
    SelectionListener, SelectionResult, Universe, ZoomLimits,
};
use songscope_registry::{FALLBACK_COLOR, Feature, Mode};

use super::{ViewAction, grouped};
use crate::theme::{Theme, to_color32, with_opacity};

/// Opacity every point starts at before the first selection arrives.
const INITIAL_OPACITY: f32 = 0.7;
const HOVER_STROKE: f32 = 3.0;
const HINT: &str = "Drag to pan | Scroll to zoom | Toggle Lasso to select";

/// The "Universe" view.
pub struct UniverseView {
    dataset: Arc<Dataset>,
    universe: Option<Universe>,
    limits: ZoomLimits,
    radius_range: (f64, f64),
    style: PointStyle,
    opacity: OpacityTransition,
    membership: Vec<bool>,
    highlight: Option<Vec<bool>>,
    hovered: Option<RecordId>,
    pending_mode: Option<InteractionMode>,
}

impl UniverseView {
    /// Create the view; the plot is laid out on the first frame.
    pub fn new(
        dataset: Arc<Dataset>,
        limits: ZoomLimits,
        radius_range: (f64, f64),
        style: PointStyle,
        transition_secs: f32,
    ) -> Self {
        let n = dataset.len();
        Self {
            dataset,
            universe: None,
            limits,
            radius_range,
            style,
            opacity: OpacityTransition::new(n, INITIAL_OPACITY, transition_secs),
            membership: vec![true; n],
            highlight: None,
            hovered: None,
            pending_mode: None,
        }
    }

    /// Current interaction mode.
    pub fn mode(&self) -> InteractionMode {
        self.universe
            .as_ref()
            .map(Universe::mode)
            .or(self.pending_mode)
            .unwrap_or_default()
    }

    /// Flip between pan/zoom and lasso. Never touches filters.
    pub fn toggle_mode(&mut self) {
        match self.universe.as_mut() {
            Some(universe) => universe.toggle_mode(),
            None => {
                self.pending_mode = Some(match self.mode() {
                    InteractionMode::PanZoom => InteractionMode::LassoDraw,
                    InteractionMode::LassoDraw => InteractionMode::PanZoom,
                });
            }
        }
    }

    /// Emphasise `ids` until the next selection arrives.
    pub fn highlight(&mut self, ids: &[RecordId]) {
        let mut mask = vec![false; self.dataset.len()];
        for id in ids {
            if let Some(slot) = mask.get_mut(id.index()) {
                *slot = true;
            }
        }
        self.highlight = Some(mask);
        self.retarget();
    }

    /// Whether a transient highlight is showing.
    pub fn is_highlighting(&self) -> bool {
        self.highlight.is_some()
    }

    /// Target opacity of one record, ignoring any live brush.
    pub fn target_opacity(&self, id: RecordId) -> f32 {
        self.opacity.target(id.index())
    }

    /// Drop the drawn rectangle (after the lasso filter is removed elsewhere).
    pub fn clear_brush(&mut self) {
        if let Some(universe) = self.universe.as_mut() {
            universe.clear_brush();
        }
    }

    fn retarget(&mut self) {
        let targets = (0..self.dataset.len())
            .map(|i| {
                let highlight = self.highlight.as_ref().map(|h| h[i]);
                self.style.opacity(self.membership[i], None, highlight)
            })
            .collect();
        self.opacity.retarget(targets);
    }

    /// Render the toolbar, the plot, and its legend.
    pub fn ui(
        &mut self,
        ui: &mut Ui,
        color_key: ColorKey,
        theme: &Theme,
        actions: &mut Vec<ViewAction>,
    ) {
        ui.horizontal(|ui| {
            let lasso = self.mode() == InteractionMode::LassoDraw;
            let fill = if lasso { theme.lasso_on } else { theme.lasso_off };
            let label = if lasso { "Lasso: ON" } else { "Lasso: OFF" };
            if ui
                .add(egui::Button::new(RichText::new(label).color(Color32::WHITE)).fill(fill))
                .clicked()
            {
                self.toggle_mode();
            }
            if ui.button("Reset zoom").clicked()
                && let Some(universe) = self.universe.as_mut()
            {
                universe.reset_zoom();
            }
            ui.label(RichText::new(HINT).small().color(theme.text_secondary));
        });

        let size = ui.available_size().max(vec2(200.0, 200.0));
        let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());

        let (w, h) = (f64::from(rect.width()), f64::from(rect.height()));
        let universe = self.universe.get_or_insert_with(|| {
            Universe::new(&self.dataset, w, h, self.limits, self.radius_range)
        });
        universe.resize(&self.dataset, w, h);
        if let Some(mode) = self.pending_mode.take() {
            universe.set_mode(mode);
        }

        let local =
            |p: Pos2| Point::new(f64::from(p.x - rect.min.x), f64::from(p.y - rect.min.y));

        // Pointer input
        if response.drag_started() {
            let origin = ui
                .input(|i| i.pointer.press_origin())
                .or(response.interact_pointer_pos());
            if let Some(origin) = origin {
                universe.pointer_down(local(origin));
            }
        }
        if response.dragged()
            && let Some(pos) = response.interact_pointer_pos()
        {
            universe.pointer_move(local(pos));
        }
        let mut released = None;
        if response.drag_stopped() {
            let pos = response
                .interact_pointer_pos()
                .or(ui.input(|i| i.pointer.latest_pos()));
            if let Some(pos) = pos {
                released = Some(local(pos));
            }
        } else if response.clicked() && universe.mode() == InteractionMode::LassoDraw {
            // A click is a drag with no extent.
            if let Some(pos) = response.interact_pointer_pos() {
                universe.pointer_down(local(pos));
                released = Some(local(pos));
            }
        }
        if response.double_clicked() {
            universe.reset_zoom();
        }
        if response.hovered() {
            let (scroll, zoom, pointer) =
                ui.input(|i| (i.raw_scroll_delta.y, i.zoom_delta(), i.pointer.hover_pos()));
            if let Some(pointer) = pointer {
                let focal = local(pointer);
                if scroll != 0.0 {
                    universe.wheel(-f64::from(scroll), focal);
                }
                if zoom != 1.0 {
                    universe.zoom_by(f64::from(zoom), focal);
                }
            }
        }

        if let Some(p) = released {
            universe.pointer_move(p);
            if universe.is_brushing() {
                settle_on_preview(
                    &mut self.opacity,
                    &self.style,
                    &self.membership,
                    self.highlight.as_deref(),
                    universe,
                );
            }
            if let Some(outcome) = universe.pointer_up(p) {
                tracing::debug!(?outcome, "brush released");
                actions.push(ViewAction::Lasso(outcome));
            }
        }

        let Some(universe) = self.universe.as_ref() else {
            return;
        };

        self.hovered = if universe.is_brushing() {
            None
        } else {
            response
                .hover_pos()
                .and_then(|p| universe.hover(local(p)))
        };

        // Animation
        let dt = ui.input(|i| i.stable_dt);
        self.opacity.advance(dt);
        if self.opacity.is_animating() {
            ui.ctx().request_repaint();
        }

        self.paint(ui, rect, universe, color_key, theme);
        self.legend(ui, rect, color_key, theme);

        if let Some(id) = self.hovered
            && let Some(record) = self.dataset.get(id)
        {
            response.on_hover_ui_at_pointer(|ui| tooltip(ui, record));
        }
    }

    fn paint(
        &self,
        ui: &Ui,
        rect: Rect,
        universe: &Universe,
        color_key: ColorKey,
        theme: &Theme,
    ) {
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 4.0, theme.plot_bg);

        let brushing = universe.is_brushing();
        for (id, record) in self.dataset.iter() {
            let Some(p) = universe.screen_position(id) else {
                continue;
            };
            let center = pos2(rect.min.x + p.x as f32, rect.min.y + p.y as f32);
            let radius = universe.screen_radius(id) as f32;
            let i = id.index();

            let opacity = if brushing {
                let highlight = self.highlight.as_ref().map(|h| h[i]);
                self.style
                    .opacity(self.membership[i], universe.preview_contains(id), highlight)
            } else {
                self.opacity.value(i)
            };
            let emphasised = opacity >= self.style.matched_opacity;

            let fill = with_opacity(point_color(record, color_key), opacity);
            painter.circle_filled(center, radius, fill);
            let stroke = if self.hovered == Some(id) {
                Stroke::new(HOVER_STROKE, theme.hover)
            } else {
                Stroke::new(
                    self.style.stroke(emphasised),
                    with_opacity(Color32::WHITE, opacity),
                )
            };
            painter.circle_stroke(center, radius, stroke);
        }

        if let Some(brush) = universe.brush_rect() {
            let r = Rect::from_min_max(
                pos2(rect.min.x + brush.min.x as f32, rect.min.y + brush.min.y as f32),
                pos2(rect.min.x + brush.max.x as f32, rect.min.y + brush.max.y as f32),
            );
            painter.rect_filled(r, 0.0, with_opacity(theme.accent, 0.2));
            painter.rect_stroke(r, 0.0, Stroke::new(1.0, theme.accent), StrokeKind::Inside);
        }
    }

    fn legend(&self, ui: &Ui, rect: Rect, color_key: ColorKey, theme: &Theme) {
        let painter = ui.painter_at(rect);
        let font = egui::FontId::proportional(11.0);
        let origin = pos2(rect.right() - 150.0, rect.top() + 10.0);
        let bg = Rect::from_min_size(origin - vec2(8.0, 6.0), vec2(150.0, 58.0));
        painter.rect_filled(bg, 4.0, with_opacity(theme.panel_bg, 0.85));
        painter.text(
            origin,
            egui::Align2::LEFT_TOP,
            color_key.label(),
            font.clone(),
            theme.text_primary,
        );

        match color_key {
            ColorKey::Mode => {
                for (row, mode) in Mode::ALL.into_iter().enumerate() {
                    let y = origin.y + 22.0 + row as f32 * 16.0;
                    painter.circle_filled(pos2(origin.x + 6.0, y), 5.0, to_color32(mode.color()));
                    painter.text(
                        pos2(origin.x + 18.0, y),
                        egui::Align2::LEFT_CENTER,
                        mode.label(),
                        font.clone(),
                        theme.text_secondary,
                    );
                }
            }
            ColorKey::Feature(feature) => {
                let bar = Rect::from_min_size(origin + vec2(0.0, 20.0), vec2(130.0, 10.0));
                gradient(&painter, bar, feature);
                for (x, label) in [(bar.left(), "0%"), (bar.right(), "100%")] {
                    painter.text(
                        pos2(x, bar.bottom() + 4.0),
                        if x == bar.left() {
                            egui::Align2::LEFT_TOP
                        } else {
                            egui::Align2::RIGHT_TOP
                        },
                        label,
                        font.clone(),
                        theme.text_secondary,
                    );
                }
            }
        }
    }
}

impl SelectionListener for UniverseView {
    fn selection_changed(&mut self, _dataset: &Dataset, selection: &SelectionResult) {
        self.membership = selection.membership().to_vec();
        self.highlight = None;
        self.retarget();
    }
}

/// Freeze on the brush preview so the next retarget animates from it.
fn settle_on_preview(
    opacity: &mut OpacityTransition,
    style: &PointStyle,
    membership: &[bool],
    highlight: Option<&[bool]>,
    universe: &Universe,
) {
    let shown = (0..membership.len())
        .map(|i| {
            let id = RecordId::from_index(i);
            style.opacity(
                membership[i],
                universe.preview_contains(id),
                highlight.map(|h| h[i]),
            )
        })
        .collect();
    opacity.retarget(shown);
    opacity.finish();
}

/// Fill color of one point under the current color key.
pub fn point_color(record: &Record, key: ColorKey) -> Color32 {
    let rgb = match key {
        ColorKey::Mode => record.mode.map_or(FALLBACK_COLOR, Mode::color),
        ColorKey::Feature(f) => record
            .feature(f)
            .map_or(FALLBACK_COLOR, |v| f.palette().sample_percent(v)),
    };
    to_color32(rgb)
}

fn gradient(painter: &egui::Painter, bar: Rect, feature: Feature) {
    const STEPS: usize = 32;
    let step = bar.width() / STEPS as f32;
    for i in 0..STEPS {
        let t = (i as f32 + 0.5) / STEPS as f32;
        let slice = Rect::from_min_size(
            pos2(bar.left() + step * i as f32, bar.top()),
            vec2(step + 0.5, bar.height()),
        );
        painter.rect_filled(slice, 0.0, to_color32(feature.palette().sample(t)));
    }
}

fn tooltip(ui: &mut Ui, record: &Record) {
    ui.label(RichText::new(&record.track_name).strong());
    ui.label(&record.artists);
    if let Some(streams) = record.streams {
        ui.label(format!("Streams: {}", grouped(streams)));
    }
    ui.label(format!(
        "Mode: {}",
        record.mode.map_or("Unknown", Mode::label)
    ));
    for feature in [
        Feature::Energy,
        Feature::Danceability,
        Feature::Speechiness,
        Feature::Liveness,
    ] {
        let value = record
            .feature(feature)
            .map_or_else(|| "n/a".to_string(), |v| format!("{v:.0}%"));
        ui.label(format!("{}: {value}", feature.name()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use songscope_core::FilterCoordinator;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn dataset() -> Arc<Dataset> {
        Arc::new(Dataset::new(
            (0..4)
                .map(|i| {
                    Record::new(format!("s{i}"), "a")
                        .with_projection(f64::from(i), f64::from(i))
                        .with_feature(Feature::Energy, f64::from(i) * 30.0)
                })
                .collect(),
        ))
    }

    fn view(data: &Arc<Dataset>) -> UniverseView {
        UniverseView::new(
            Arc::clone(data),
            ZoomLimits::default(),
            (3.0, 20.0),
            PointStyle::default(),
            0.3,
        )
    }

    #[test]
    fn membership_drives_targets() {
        let data = dataset();
        let view = Rc::new(RefCell::new(view(&data)));
        let mut coordinator = FilterCoordinator::new(Arc::clone(&data));
        coordinator.subscribe(view.clone());
        coordinator.set_lasso(Some(vec![RecordId(1)]));

        let view = view.borrow();
        assert_eq!(view.target_opacity(RecordId(1)), 0.9);
        assert_eq!(view.target_opacity(RecordId(0)), 0.05);
    }

    #[test]
    fn highlight_is_cleared_by_next_selection() {
        let data = dataset();
        let view = Rc::new(RefCell::new(view(&data)));
        let mut coordinator = FilterCoordinator::new(Arc::clone(&data));
        coordinator.subscribe(view.clone());

        view.borrow_mut().highlight(&[RecordId(2)]);
        assert!(view.borrow().is_highlighting());
        assert_eq!(view.borrow().target_opacity(RecordId(2)), 0.9);
        assert_eq!(view.borrow().target_opacity(RecordId(3)), 0.1);

        coordinator.set_mode(None);
        assert!(!view.borrow().is_highlighting());
        assert_eq!(view.borrow().target_opacity(RecordId(3)), 0.9);
    }

    #[test]
    fn toggle_before_layout_is_remembered() {
        let data = dataset();
        let mut view = view(&data);
        assert_eq!(view.mode(), InteractionMode::PanZoom);
        view.toggle_mode();
        assert_eq!(view.mode(), InteractionMode::LassoDraw);
        view.toggle_mode();
        assert_eq!(view.mode(), InteractionMode::PanZoom);
    }

    #[test]
    fn point_colors_follow_key() {
        let record = Record::new("s", "a")
            .with_mode(Mode::Minor)
            .with_feature(Feature::Energy, 0.0);
        assert_eq!(
            point_color(&record, ColorKey::Mode),
            to_color32(Mode::Minor.color())
        );
        assert_eq!(
            point_color(&record, ColorKey::Feature(Feature::Energy)),
            to_color32(Feature::Energy.palette().sample(0.0))
        );
        assert_eq!(
            point_color(&record, ColorKey::Feature(Feature::Valence)),
            to_color32(FALLBACK_COLOR)
        );
    }
}
