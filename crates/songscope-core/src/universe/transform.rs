//! Uniform-scale-plus-translate view transform.

use super::{Point, ScreenRect};

/// Exponent base-2 factor per wheel delta unit (pixel-mode wheel events).
const WHEEL_STEP: f64 = 0.002;

/// Bounds on zooming and panning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    /// Smallest scale factor.
    pub min_zoom: f64,
    /// Largest scale factor.
    pub max_zoom: f64,
    /// How far past the plot edges, in untransformed pixels, the view may pan.
    pub pan_margin: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min_zoom: 0.5,
            max_zoom: 10.0,
            pan_margin: 100.0,
        }
    }
}

impl ZoomLimits {
    /// Clamp a scale factor into `[min_zoom, max_zoom]`.
    pub fn clamp(&self, k: f64) -> f64 {
        k.clamp(self.min_zoom, self.max_zoom)
    }

    /// The region the view must stay within: the plot grown by `pan_margin`.
    pub fn translate_extent(&self, width: f64, height: f64) -> ScreenRect {
        ScreenRect {
            min: Point::new(-self.pan_margin, -self.pan_margin),
            max: Point::new(width + self.pan_margin, height + self.pan_margin),
        }
    }

    /// Scale factor for a wheel delta (positive `delta_y` zooms out).
    pub fn wheel_factor(delta_y: f64) -> f64 {
        (-delta_y * WHEEL_STEP).exp2()
    }
}

/// `screen = plot * k + (x, y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    /// Scale factor.
    pub k: f64,
    /// Horizontal translation in screen pixels.
    pub x: f64,
    /// Vertical translation in screen pixels.
    pub y: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewTransform {
    /// No zoom, no pan.
    pub const IDENTITY: ViewTransform = ViewTransform {
        k: 1.0,
        x: 0.0,
        y: 0.0,
    };

    /// Plot coordinates to screen coordinates.
    pub fn apply(&self, p: Point) -> Point {
        Point::new(p.x * self.k + self.x, p.y * self.k + self.y)
    }

    /// Screen coordinates to plot coordinates.
    pub fn invert(&self, p: Point) -> Point {
        Point::new((p.x - self.x) / self.k, (p.y - self.y) / self.k)
    }

    /// Shift by a screen-space delta.
    pub fn translate_by(&self, dx: f64, dy: f64) -> Self {
        Self {
            k: self.k,
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Rescale by `factor` keeping `focal` fixed on screen. The resulting
    /// scale is clamped to `limits`.
    pub fn scale_at(&self, factor: f64, focal: Point, limits: &ZoomLimits) -> Self {
        let k = limits.clamp(self.k * factor);
        let anchor = self.invert(focal);
        Self {
            k,
            x: focal.x - anchor.x * k,
            y: focal.y - anchor.y * k,
        }
    }

    /// Adjust the translation so the visible region stays inside `extent`.
    ///
    /// `viewport` is the visible screen rectangle and `extent` the allowed
    /// region in plot coordinates. On an axis where the visible region is
    /// larger than the extent, the view is centred on the extent instead.
    pub fn constrain(&self, viewport: &ScreenRect, extent: &ScreenRect) -> Self {
        let lo = self.invert(viewport.min);
        let hi = self.invert(viewport.max);
        let shift = |d0: f64, d1: f64| {
            if d1 > d0 {
                (d0 + d1) / 2.0
            } else if d0 < 0.0 {
                d0
            } else if d1 > 0.0 {
                d1
            } else {
                0.0
            }
        };
        let tx = shift(lo.x - extent.min.x, hi.x - extent.max.x);
        let ty = shift(lo.y - extent.min.y, hi.y - extent.max.y);
        Self {
            k: self.k,
            x: self.x + self.k * tx,
            y: self.y + self.k * ty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> ScreenRect {
        ScreenRect::from_corners(Point::new(0.0, 0.0), Point::new(800.0, 600.0))
    }

    #[test]
    fn test_apply_invert_roundtrip() {
        let t = ViewTransform { k: 2.0, x: 10.0, y: -5.0 };
        let p = Point::new(3.0, 4.0);
        assert_eq!(t.apply(p), Point::new(16.0, 3.0));
        assert_eq!(t.invert(t.apply(p)), p);
    }

    #[test]
    fn test_scale_at_keeps_focal_point() {
        let limits = ZoomLimits::default();
        let focal = Point::new(200.0, 150.0);
        let t = ViewTransform::IDENTITY.scale_at(2.0, focal, &limits);
        assert_eq!(t.k, 2.0);
        assert_eq!((t.x, t.y), (-200.0, -150.0));
        assert_eq!(t.apply(focal), focal);
    }

    #[test]
    fn test_scale_clamped() {
        let limits = ZoomLimits::default();
        let t = ViewTransform::IDENTITY.scale_at(100.0, Point::default(), &limits);
        assert_eq!(t.k, 10.0);
        let t = ViewTransform::IDENTITY.scale_at(0.01, Point::default(), &limits);
        assert_eq!(t.k, 0.5);
    }

    #[test]
    fn test_constrain_limits_pan_to_margin() {
        let limits = ZoomLimits::default();
        let extent = limits.translate_extent(800.0, 600.0);
        let t = ViewTransform::IDENTITY
            .translate_by(500.0, -400.0)
            .constrain(&viewport(), &extent);
        assert_eq!((t.x, t.y), (100.0, -100.0));
        assert_eq!(
            ViewTransform::IDENTITY.constrain(&viewport(), &extent),
            ViewTransform::IDENTITY
        );
    }

    #[test]
    fn test_constrain_centres_when_zoomed_out() {
        let limits = ZoomLimits::default();
        let extent = limits.translate_extent(800.0, 600.0);
        let t = ViewTransform { k: 0.5, x: 0.0, y: 0.0 }.constrain(&viewport(), &extent);
        // Visible region 1600x1200 centred on the extent's centre (400, 300).
        let centre = t.invert(Point::new(400.0, 300.0));
        assert!((centre.x - 400.0).abs() < 1e-9);
        assert!((centre.y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_wheel_factor() {
        assert_eq!(ZoomLimits::wheel_factor(0.0), 1.0);
        assert!((ZoomLimits::wheel_factor(-500.0) - 2.0).abs() < 1e-12);
        assert!((ZoomLimits::wheel_factor(500.0) - 0.5).abs() < 1e-12);
    }
}
