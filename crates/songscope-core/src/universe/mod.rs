//! Projection view state: scales, zoom transform, and the brush.
//!
//! Coordinates here are plot-local: `(0, 0)` is the top-left corner of the
//! plot area and `(width, height)` the bottom-right. The GUI converts pointer
//! positions into this space before calling in.

mod interaction;
mod scale;
mod transform;

pub use interaction::{Gesture, InteractionMode, LassoOutcome, Universe};
pub use scale::{LinearScale, ProjectionScales, SqrtScale};
pub use transform::{ViewTransform, ZoomLimits};

/// A position in plot-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position, growing downward.
    pub y: f64,
}

impl Point {
    /// Build a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance.
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned rectangle in plot-local pixels with `min <= max` on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    /// Top-left corner.
    pub min: Point,
    /// Bottom-right corner.
    pub max: Point,
}

impl ScreenRect {
    /// Rectangle spanned by two opposite corners, in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Width.
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Height.
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// True when the rectangle has no area.
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Inclusive containment.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Point opacities and outline widths of the projection view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointStyle {
    /// Points passing every filter, and points inside a brush or highlight.
    pub matched_opacity: f32,
    /// Points failing a filter.
    pub ghost_opacity: f32,
    /// Points outside the brush while it is being dragged.
    pub preview_outside_opacity: f32,
    /// Points outside a transient platform highlight.
    pub highlight_outside_opacity: f32,
    /// Outline width of emphasised points.
    pub matched_stroke: f32,
    /// Outline width of every other point.
    pub ghost_stroke: f32,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            matched_opacity: 0.9,
            ghost_opacity: 0.05,
            preview_outside_opacity: 0.2,
            highlight_outside_opacity: 0.1,
            matched_stroke: 2.0,
            ghost_stroke: 1.0,
        }
    }
}

impl PointStyle {
    /// Target opacity of one point.
    ///
    /// A live brush preview wins over a transient highlight, which wins over
    /// filter membership.
    pub fn opacity(&self, matched: bool, preview: Option<bool>, highlight: Option<bool>) -> f32 {
        match (preview, highlight) {
            (Some(true), _) | (None, Some(true)) => self.matched_opacity,
            (Some(false), _) => self.preview_outside_opacity,
            (None, Some(false)) => self.highlight_outside_opacity,
            (None, None) if matched => self.matched_opacity,
            (None, None) => self.ghost_opacity,
        }
    }

    /// Outline width of one point.
    pub fn stroke(&self, emphasised: bool) -> f32 {
        if emphasised {
            self.matched_stroke
        } else {
            self.ghost_stroke
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_normalizes_corners() {
        let rect = ScreenRect::from_corners(Point::new(10.0, 5.0), Point::new(2.0, 8.0));
        assert_eq!(rect.min, Point::new(2.0, 5.0));
        assert_eq!(rect.max, Point::new(10.0, 8.0));
        assert!(rect.contains(Point::new(2.0, 8.0)));
        assert!(!rect.contains(Point::new(1.9, 6.0)));
    }

    #[test]
    fn test_degenerate_rect() {
        let p = Point::new(3.0, 3.0);
        assert!(ScreenRect::from_corners(p, p).is_degenerate());
        assert!(ScreenRect::from_corners(p, Point::new(3.0, 9.0)).is_degenerate());
        assert!(!ScreenRect::from_corners(p, Point::new(4.0, 9.0)).is_degenerate());
    }

    #[test]
    fn test_point_style_precedence() {
        let style = PointStyle::default();
        assert_eq!(style.opacity(true, None, None), 0.9);
        assert_eq!(style.opacity(false, None, None), 0.05);
        assert_eq!(style.opacity(true, Some(false), None), 0.2);
        assert_eq!(style.opacity(false, Some(true), Some(false)), 0.9);
        assert_eq!(style.opacity(true, None, Some(false)), 0.1);
        assert_eq!(style.opacity(false, None, Some(true)), 0.9);
    }
}
