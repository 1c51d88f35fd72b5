//! Tri-state Major / Minor / Both selector.

use egui::{Color32, CornerRadius, Response, Sense, Stroke, StrokeKind, Ui, Widget, vec2};
use songscope_registry::Mode;

use crate::theme::to_color32;

/// Segmented control over an optional mode; `None` is "Both".
pub struct ModeToggle<'a> {
    mode: &'a mut Option<Mode>,
    segment_width: f32,
}

impl<'a> ModeToggle<'a> {
    /// Create a toggle bound to `mode`.
    pub fn new(mode: &'a mut Option<Mode>) -> Self {
        Self {
            mode,
            segment_width: 56.0,
        }
    }
}

const SEGMENTS: [Option<Mode>; 3] = [None, Some(Mode::Major), Some(Mode::Minor)];

fn segment_label(mode: Option<Mode>) -> &'static str {
    mode.map_or("Both", Mode::label)
}

impl Widget for ModeToggle<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let height = 22.0;
        let size = vec2(self.segment_width * SEGMENTS.len() as f32, height);
        let (rect, mut response) = ui.allocate_exact_size(size, Sense::click());

        if response.clicked()
            && let Some(pos) = response.interact_pointer_pos()
        {
            let i = (((pos.x - rect.left()) / self.segment_width) as usize).min(SEGMENTS.len() - 1);
            if *self.mode != SEGMENTS[i] {
                *self.mode = SEGMENTS[i];
                response.mark_changed();
            }
        }

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            painter.rect_filled(rect, 4.0, Color32::from_rgb(40, 40, 52));

            for (i, segment) in SEGMENTS.into_iter().enumerate() {
                let seg = egui::Rect::from_min_size(
                    rect.min + vec2(self.segment_width * i as f32, 0.0),
                    vec2(self.segment_width, height),
                );
                let selected = *self.mode == segment;
                if selected {
                    let fill = segment.map_or(Color32::from_rgb(0x66, 0x7E, 0xEA), |m| {
                        to_color32(m.color())
                    });
                    painter.rect_filled(seg.shrink(1.0), CornerRadius::same(3), fill);
                }
                painter.text(
                    seg.center(),
                    egui::Align2::CENTER_CENTER,
                    segment_label(segment),
                    egui::FontId::proportional(12.0),
                    if selected {
                        Color32::WHITE
                    } else {
                        Color32::from_rgb(150, 150, 160)
                    },
                );
            }

            painter.rect_stroke(
                rect,
                4.0,
                Stroke::new(1.0, Color32::from_rgb(70, 70, 82)),
                StrokeKind::Inside,
            );
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(segment_label(None), "Both");
        assert_eq!(segment_label(Some(Mode::Minor)), "Minor");
    }
}
