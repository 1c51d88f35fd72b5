//! Data-to-pixel scales.

use crate::dataset::{Dataset, Extent};

/// Share of each projection extent added as padding on both sides.
const PROJECTION_PADDING: f64 = 0.10;

/// Affine map from a domain interval onto a range interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    /// Build a scale. The range may be inverted (`range.0 > range.1`).
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Map a domain value. A zero-width domain maps everything to the middle
    /// of the range.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// The domain interval.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }
}

/// Square-root scale: linear in `sqrt(value)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtScale {
    inner: LinearScale,
}

impl SqrtScale {
    /// Build a scale over a non-negative domain.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            inner: LinearScale::new((signed_sqrt(domain.0), signed_sqrt(domain.1)), range),
        }
    }

    /// Map a domain value.
    pub fn map(&self, value: f64) -> f64 {
        self.inner.map(signed_sqrt(value))
    }
}

fn signed_sqrt(v: f64) -> f64 {
    v.abs().sqrt().copysign(v)
}

/// Scales placing every record in the plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionScales {
    /// `tsne_1` to horizontal pixels.
    pub x: LinearScale,
    /// `tsne_2` to vertical pixels, inverted so larger values sit higher.
    pub y: LinearScale,
    /// Stream count to point radius.
    pub size: SqrtScale,
}

impl ProjectionScales {
    /// Fit the dataset into a `width` by `height` plot.
    ///
    /// Projection extents are padded by 10% on each side. Radii run from
    /// `radius.0` for the least streamed song to `radius.1` for the most.
    pub fn fit(dataset: &Dataset, width: f64, height: f64, radius: (f64, f64)) -> Self {
        let unit = Extent { min: 0.0, max: 1.0 };
        let (xs, ys) = dataset.projection_extent().unwrap_or((unit, unit));
        let streams = dataset.streams_extent().unwrap_or(unit);

        Self {
            x: LinearScale::new(padded(xs), (0.0, width)),
            y: LinearScale::new(padded(ys), (height, 0.0)),
            size: SqrtScale::new((streams.min, streams.max), radius),
        }
    }
}

fn padded(extent: Extent) -> (f64, f64) {
    let pad = extent.span() * PROJECTION_PADDING;
    (extent.min - pad, extent.max + pad)
}
