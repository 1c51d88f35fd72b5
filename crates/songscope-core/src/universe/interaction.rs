//! Pan/zoom and brush interaction of the projection view.

use crate::dataset::Dataset;
use crate::record::RecordId;

use super::scale::ProjectionScales;
use super::transform::{ViewTransform, ZoomLimits};
use super::{Point, ScreenRect};

/// What a pointer drag does. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// Drag pans the view.
    #[default]
    PanZoom,
    /// Drag draws a selection rectangle.
    LassoDraw,
}

/// A drag in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    /// No button held.
    #[default]
    Idle,
    /// Panning; `last` is the previous pointer position.
    Panning {
        /// Previous pointer position.
        last: Point,
    },
    /// Drawing a brush from `origin` to `current`.
    Brushing {
        /// Where the drag started.
        origin: Point,
        /// Latest pointer position, clamped to the plot.
        current: Point,
    },
}

/// Result of releasing a brush.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LassoOutcome {
    /// The rectangle had no area: clear the spatial filter.
    Clear,
    /// Records whose transformed centres lie inside the rectangle. May be
    /// empty, which is a filter that matches nothing.
    Select(Vec<RecordId>),
}

impl LassoOutcome {
    /// Value for the lasso filter slot.
    pub fn into_filter(self) -> Option<Vec<RecordId>> {
        match self {
            LassoOutcome::Clear => None,
            LassoOutcome::Select(ids) => Some(ids),
        }
    }
}

/// Interaction state of the projection view.
///
/// Owns the data-to-pixel scales, the zoom transform, the interaction mode,
/// and the brush. It never touches filter state: a finished brush is
/// returned as a [`LassoOutcome`] for the caller to apply.
#[derive(Debug, Clone)]
pub struct Universe {
    scales: ProjectionScales,
    positions: Vec<Option<Point>>,
    radii: Vec<f64>,
    radius_range: (f64, f64),
    width: f64,
    height: f64,
    limits: ZoomLimits,
    transform: ViewTransform,
    mode: InteractionMode,
    gesture: Gesture,
    committed: Option<ScreenRect>,
}

impl Universe {
    /// Lay out `dataset` in a `width` by `height` plot.
    pub fn new(
        dataset: &Dataset,
        width: f64,
        height: f64,
        limits: ZoomLimits,
        radius_range: (f64, f64),
    ) -> Self {
        let mut universe = Self {
            scales: ProjectionScales::fit(dataset, width, height, radius_range),
            positions: Vec::new(),
            radii: Vec::new(),
            radius_range,
            width,
            height,
            limits,
            transform: ViewTransform::IDENTITY,
            mode: InteractionMode::PanZoom,
            gesture: Gesture::Idle,
            committed: None,
        };
        universe.layout(dataset);
        universe
    }

    /// Refit to a new plot size. The zoom transform is kept and re-constrained.
    pub fn resize(&mut self, dataset: &Dataset, width: f64, height: f64) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.scales = ProjectionScales::fit(dataset, width, height, self.radius_range);
        self.layout(dataset);
        self.transform = self.constrained(self.transform);
        self.committed = None;
    }

    fn layout(&mut self, dataset: &Dataset) {
        let scales = self.scales;
        self.positions = dataset
            .records()
            .iter()
            .map(|r| {
                r.projection
                    .map(|(x, y)| Point::new(scales.x.map(x), scales.y.map(y)))
            })
            .collect();
        self.radii = dataset
            .records()
            .iter()
            .map(|r| r.streams.map_or(self.radius_range.0, |s| scales.size.map(s)))
            .collect();
    }

    /// Plot width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Plot height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Current scales.
    pub fn scales(&self) -> &ProjectionScales {
        &self.scales
    }

    /// Current zoom transform.
    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    /// Current interaction mode.
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Current gesture.
    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    /// Switch to the other mode.
    pub fn toggle_mode(&mut self) {
        let next = match self.mode {
            InteractionMode::PanZoom => InteractionMode::LassoDraw,
            InteractionMode::LassoDraw => InteractionMode::PanZoom,
        };
        self.set_mode(next);
    }

    /// Switch mode, abandoning any drag in progress. Leaving lasso mode also
    /// hides the drawn rectangle; the lasso filter itself is left alone.
    pub fn set_mode(&mut self, mode: InteractionMode) {
        if mode == self.mode {
            return;
        }
        self.gesture = Gesture::Idle;
        if self.mode == InteractionMode::LassoDraw {
            self.committed = None;
        }
        self.mode = mode;
    }

    fn clamp_to_plot(&self, p: Point) -> Point {
        Point::new(p.x.clamp(0.0, self.width), p.y.clamp(0.0, self.height))
    }

    fn viewport(&self) -> ScreenRect {
        ScreenRect {
            min: Point::new(0.0, 0.0),
            max: Point::new(self.width, self.height),
        }
    }

    fn constrained(&self, t: ViewTransform) -> ViewTransform {
        let extent = self.limits.translate_extent(self.width, self.height);
        t.constrain(&self.viewport(), &extent)
    }

    /// Primary button pressed at `p`.
    pub fn pointer_down(&mut self, p: Point) {
        self.gesture = match self.mode {
            InteractionMode::PanZoom => Gesture::Panning { last: p },
            InteractionMode::LassoDraw => {
                let origin = self.clamp_to_plot(p);
                Gesture::Brushing {
                    origin,
                    current: origin,
                }
            }
        };
    }

    /// Pointer moved to `p` with the button held.
    pub fn pointer_move(&mut self, p: Point) {
        match self.gesture {
            Gesture::Idle => {}
            Gesture::Panning { last } => {
                let moved = self.transform.translate_by(p.x - last.x, p.y - last.y);
                self.transform = self.constrained(moved);
                self.gesture = Gesture::Panning { last: p };
            }
            Gesture::Brushing { origin, .. } => {
                self.gesture = Gesture::Brushing {
                    origin,
                    current: self.clamp_to_plot(p),
                };
            }
        }
    }

    /// Button released at `p`. Returns an outcome only when a brush ends.
    pub fn pointer_up(&mut self, p: Point) -> Option<LassoOutcome> {
        self.pointer_move(p);
        let gesture = std::mem::take(&mut self.gesture);
        let Gesture::Brushing { origin, current } = gesture else {
            return None;
        };

        let rect = ScreenRect::from_corners(origin, current);
        if rect.is_degenerate() {
            self.committed = None;
            return Some(LassoOutcome::Clear);
        }
        self.committed = Some(rect);
        Some(LassoOutcome::Select(self.hit_test(&rect)))
    }

    /// Zoom for a wheel event around `focal`. Works in both modes.
    pub fn wheel(&mut self, delta_y: f64, focal: Point) {
        self.zoom_by(ZoomLimits::wheel_factor(delta_y), focal);
    }

    /// Multiply the scale by `factor` around `focal`.
    pub fn zoom_by(&mut self, factor: f64, focal: Point) {
        let scaled = self.transform.scale_at(factor, focal, &self.limits);
        self.transform = self.constrained(scaled);
    }

    /// Back to no zoom and no pan.
    pub fn reset_zoom(&mut self) {
        self.transform = ViewTransform::IDENTITY;
    }

    /// True while a brush is being dragged.
    pub fn is_brushing(&self) -> bool {
        matches!(self.gesture, Gesture::Brushing { .. })
    }

    /// Rectangle to draw: the live brush while dragging, else the last
    /// committed one.
    pub fn brush_rect(&self) -> Option<ScreenRect> {
        match self.gesture {
            Gesture::Brushing { origin, current } => Some(ScreenRect::from_corners(origin, current)),
            _ => self.committed,
        }
    }

    /// Hide the committed rectangle.
    pub fn clear_brush(&mut self) {
        self.committed = None;
    }

    /// Whether a record sits inside the live brush; `None` when not brushing.
    pub fn preview_contains(&self, id: RecordId) -> Option<bool> {
        let Gesture::Brushing { origin, current } = self.gesture else {
            return None;
        };
        let rect = ScreenRect::from_corners(origin, current);
        Some(self.screen_position(id).is_some_and(|p| rect.contains(p)))
    }

    /// Records whose transformed centres fall inside `rect`, in dataset order.
    pub fn hit_test(&self, rect: &ScreenRect) -> Vec<RecordId> {
        self.positions
            .iter()
            .enumerate()
            .filter_map(|(i, pos)| {
                let p = self.transform.apply((*pos)?);
                rect.contains(p).then(|| RecordId::from_index(i))
            })
            .collect()
    }

    /// Topmost record whose drawn circle covers `p`.
    pub fn hover(&self, p: Point) -> Option<RecordId> {
        (0..self.positions.len()).rev().find_map(|i| {
            let id = RecordId::from_index(i);
            let centre = self.screen_position(id)?;
            (centre.distance(p) <= self.screen_radius(id)).then_some(id)
        })
    }

    /// Transformed centre of a record; `None` if it has no projection.
    pub fn screen_position(&self, id: RecordId) -> Option<Point> {
        self.positions
            .get(id.index())
            .copied()
            .flatten()
            .map(|p| self.transform.apply(p))
    }

    /// Drawn radius of a record at the current zoom.
    pub fn screen_radius(&self, id: RecordId) -> f64 {
        self.radii.get(id.index()).copied().unwrap_or(0.0) * self.transform.k
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    /// Three projected records on a 100x100 plot, plus one without coordinates.
    ///
    /// Extent [0, 12] padded by 10% is [-1.2, 13.2], so 0, 6 and 12 land at
    /// 8.33, 50 and 91.67 px (y inverted).
    fn universe() -> (Dataset, Universe) {
        let dataset = Dataset::new(vec![
            Record::new("a", "x").with_projection(0.0, 6.0),
            Record::new("b", "x").with_projection(6.0, 0.0),
            Record::new("c", "x").with_projection(12.0, 12.0),
            Record::new("d", "x"),
        ]);
        let u = Universe::new(&dataset, 100.0, 100.0, ZoomLimits::default(), (3.0, 20.0));
        (dataset, u)
    }

    fn px(u: &Universe, i: u32) -> Point {
        u.screen_position(RecordId(i)).unwrap()
    }

    #[test]
    fn test_layout() {
        let (_, u) = universe();
        assert!((px(&u, 0).x - 8.333).abs() < 1e-3);
        assert!((px(&u, 0).y - 50.0).abs() < 1e-9);
        assert!((px(&u, 1).x - 50.0).abs() < 1e-9);
        assert!((px(&u, 1).y - 91.667).abs() < 1e-3);
        assert!((px(&u, 2).x - 91.667).abs() < 1e-3);
        assert!(u.screen_position(RecordId(3)).is_none());
    }

    #[test]
    fn test_drag_pans_only_in_pan_mode() {
        let (_, mut u) = universe();
        u.pointer_down(Point::new(50.0, 50.0));
        u.pointer_move(Point::new(80.0, 50.0));
        assert_eq!(u.pointer_up(Point::new(80.0, 50.0)), None);
        assert!(u.transform().x > 0.0);
        assert!(u.brush_rect().is_none());
    }

    #[test]
    fn test_brush_selects_inside() {
        let (_, mut u) = universe();
        u.toggle_mode();
        u.pointer_down(Point::new(0.0, 0.0));
        u.pointer_move(Point::new(60.0, 100.0));
        assert_eq!(u.preview_contains(RecordId(1)), Some(true));
        assert_eq!(u.preview_contains(RecordId(2)), Some(false));
        assert_eq!(u.preview_contains(RecordId(3)), Some(false));

        let outcome = u.pointer_up(Point::new(60.0, 100.0));
        assert_eq!(outcome, Some(LassoOutcome::Select(vec![RecordId(0), RecordId(1)])));
        assert!(u.brush_rect().is_some());
        assert_eq!(u.preview_contains(RecordId(1)), None);
    }

    #[test]
    fn test_zero_area_brush_clears() {
        let (_, mut u) = universe();
        u.set_mode(InteractionMode::LassoDraw);
        u.pointer_down(Point::new(40.0, 40.0));
        assert_eq!(u.pointer_up(Point::new(40.0, 70.0)), Some(LassoOutcome::Clear));
        assert!(u.brush_rect().is_none());
    }

    #[test]
    fn test_brush_that_misses_selects_nothing() {
        let (_, mut u) = universe();
        u.set_mode(InteractionMode::LassoDraw);
        u.pointer_down(Point::new(60.0, 0.0));
        let outcome = u.pointer_up(Point::new(80.0, 10.0));
        assert_eq!(outcome, Some(LassoOutcome::Select(Vec::new())));
        assert_eq!(outcome.and_then(LassoOutcome::into_filter), Some(Vec::new()));
    }

    #[test]
    fn test_brush_clamped_to_plot() {
        let (_, mut u) = universe();
        u.set_mode(InteractionMode::LassoDraw);
        u.pointer_down(Point::new(-50.0, -50.0));
        u.pointer_move(Point::new(500.0, 500.0));
        let rect = u.brush_rect().unwrap();
        assert_eq!(rect.min, Point::new(0.0, 0.0));
        assert_eq!(rect.max, Point::new(100.0, 100.0));
    }

    #[test]
    fn test_hit_test_uses_transform() {
        let (_, mut u) = universe();
        u.zoom_by(2.0, Point::new(50.0, 50.0));
        // b lands at (50, 133.3); a at (-33.3, 50) and c at (133.3, -33.3).
        let rect = ScreenRect::from_corners(Point::new(0.0, 0.0), Point::new(100.0, 150.0));
        let hits = u.hit_test(&rect);
        assert!(hits.contains(&RecordId(1)));
        assert!(!hits.contains(&RecordId(0)));
    }

    #[test]
    fn test_toggle_resets_gesture_and_hides_brush() {
        let (_, mut u) = universe();
        u.toggle_mode();
        u.pointer_down(Point::new(0.0, 0.0));
        u.pointer_up(Point::new(60.0, 60.0));
        u.pointer_down(Point::new(10.0, 10.0));
        u.toggle_mode();
        assert_eq!(u.mode(), InteractionMode::PanZoom);
        assert_eq!(u.gesture(), Gesture::Idle);
        assert!(u.brush_rect().is_none());
    }

    #[test]
    fn test_wheel_zooms_in_lasso_mode_and_reset() {
        let (_, mut u) = universe();
        u.set_mode(InteractionMode::LassoDraw);
        u.wheel(-500.0, Point::new(50.0, 50.0));
        assert!((u.transform().k - 2.0).abs() < 1e-9);
        u.reset_zoom();
        assert_eq!(u.transform(), ViewTransform::IDENTITY);
    }

    #[test]
    fn test_hover_topmost() {
        let (_, u) = universe();
        let b = px(&u, 1);
        assert_eq!(u.hover(Point::new(b.x + 2.0, b.y)), Some(RecordId(1)));
        assert_eq!(u.hover(Point::new(30.0, 10.0)), None);
    }
}
