//! Dual-thumb range slider.
//!
//! - Drag either thumb; the one nearest the pointer at drag start moves
//! - Click the track to jump the nearest thumb there
//! - Double-click to reset to the full range
//! - Values snap to whole numbers and the thumbs never cross

use egui::{Color32, Id, Response, Sense, Stroke, Ui, Widget, pos2, vec2};

/// Which end of the range a drag moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Thumb {
    /// Lower bound.
    Low,
    /// Upper bound.
    High,
}

/// The thumb closest to `value`; ties go to the upper thumb when the value
/// is above it and to the lower otherwise, so stacked thumbs can separate.
pub fn nearest_thumb(low: f64, high: f64, value: f64) -> Thumb {
    let to_low = (value - low).abs();
    let to_high = (value - high).abs();
    if to_low < to_high || (to_low == to_high && value <= low) {
        Thumb::Low
    } else {
        Thumb::High
    }
}

/// Move `thumb` to `value`, snapped and kept inside `[min, max]` without
/// crossing the other thumb.
pub fn move_thumb(low: &mut f64, high: &mut f64, thumb: Thumb, value: f64, min: f64, max: f64) {
    let v = value.round().clamp(min, max);
    match thumb {
        Thumb::Low => *low = v.min(*high),
        Thumb::High => *high = v.max(*low),
    }
}

/// A horizontal slider editing a closed interval.
pub struct RangeSlider<'a> {
    low: &'a mut f64,
    high: &'a mut f64,
    min: f64,
    max: f64,
    color: Color32,
    width: f32,
}

impl<'a> RangeSlider<'a> {
    /// Create a slider over `[min, max]`.
    pub fn new(low: &'a mut f64, high: &'a mut f64, min: f64, max: f64) -> Self {
        Self {
            low,
            high,
            min,
            max,
            color: Color32::from_rgb(0x66, 0x7E, 0xEA),
            width: 180.0,
        }
    }

    /// Fill color of the selected span.
    pub fn color(mut self, color: Color32) -> Self {
        self.color = color;
        self
    }

    /// Track width in pixels.
    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }
}

impl Widget for RangeSlider<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let thumb_radius = 7.0;
        let size = vec2(self.width, thumb_radius * 2.0 + 4.0);
        let (rect, mut response) = ui.allocate_exact_size(size, Sense::click_and_drag());

        let track_left = rect.left() + thumb_radius;
        let track_right = rect.right() - thumb_radius;
        let span = (self.max - self.min).max(f64::EPSILON);
        let to_x = |v: f64| track_left + ((v - self.min) / span) as f32 * (track_right - track_left);
        let to_value = |x: f32| {
            self.min + f64::from((x - track_left) / (track_right - track_left).max(1.0)) * span
        };

        let (before_low, before_high) = (*self.low, *self.high);
        let thumb_id: Id = response.id.with("thumb");

        if response.double_clicked() {
            *self.low = self.min;
            *self.high = self.max;
        } else if let Some(pointer) = response.interact_pointer_pos() {
            let value = to_value(pointer.x);
            let thumb = if response.drag_started() || response.clicked() {
                let thumb = nearest_thumb(*self.low, *self.high, value);
                ui.memory_mut(|m| m.data.insert_temp(thumb_id, thumb));
                thumb
            } else {
                ui.memory(|m| m.data.get_temp(thumb_id))
                    .unwrap_or_else(|| nearest_thumb(*self.low, *self.high, value))
            };
            move_thumb(self.low, self.high, thumb, value, self.min, self.max);
        }

        if *self.low != before_low || *self.high != before_high {
            response.mark_changed();
        }

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            let cy = rect.center().y;

            painter.line_segment(
                [pos2(track_left, cy), pos2(track_right, cy)],
                Stroke::new(4.0, Color32::from_rgb(60, 60, 72)),
            );
            let (lx, hx) = (to_x(*self.low), to_x(*self.high));
            painter.line_segment([pos2(lx, cy), pos2(hx, cy)], Stroke::new(4.0, self.color));

            let hovered = response.hovered() || response.dragged();
            for x in [lx, hx] {
                painter.circle_filled(pos2(x, cy), thumb_radius, Color32::from_rgb(230, 230, 235));
                painter.circle_stroke(
                    pos2(x, cy),
                    thumb_radius,
                    Stroke::new(if hovered { 2.0 } else { 1.0 }, self.color),
                );
            }
        }

        response
    }
}
