//! Aggregates rendered by the summary views.
//!
//! All of these are pure reductions over a set of records. Missing values
//! never raise: in means they count as zero, in correlations the record is
//! left out.

use songscope_registry::{Feature, Platform};

use crate::dataset::Dataset;
use crate::filter::FeatureRange;
use crate::record::{Record, RecordId};

/// Fewest usable records for a correlation to be reported.
const MIN_CORRELATION_SAMPLES: usize = 3;

/// Mean of every feature over a set of records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureProfile {
    means: [f64; Feature::ALL.len()],
    count: usize,
}

impl FeatureProfile {
    /// Means over `records`; `None` when there are none.
    ///
    /// A record missing a feature contributes zero to that feature's sum.
    pub fn compute<'a>(records: impl IntoIterator<Item = &'a Record>) -> Option<Self> {
        let mut sums = [0.0; Feature::ALL.len()];
        let mut count = 0usize;
        for record in records {
            for feature in Feature::ALL {
                sums[feature as usize] += record.feature(feature).unwrap_or(0.0);
            }
            count += 1;
        }
        if count == 0 {
            return None;
        }
        Some(Self {
            means: sums.map(|s| s / count as f64),
            count,
        })
    }

    /// Mean value of a feature.
    pub fn mean(&self, feature: Feature) -> f64 {
        self.means[feature as usize]
    }

    /// Number of records averaged.
    pub fn count(&self) -> usize {
        self.count
    }
}

/// Mean playlist count per platform over a set of records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformPresence {
    means: [f64; Platform::ALL.len()],
}

impl PlatformPresence {
    /// Means over `records`; `None` when there are none. Missing counts are zero.
    pub fn compute<'a>(records: impl IntoIterator<Item = &'a Record>) -> Option<Self> {
        let mut sums = [0.0; Platform::ALL.len()];
        let mut count = 0usize;
        for record in records {
            for platform in Platform::ALL {
                sums[platform as usize] += record.playlists(platform).unwrap_or(0.0);
            }
            count += 1;
        }
        (count > 0).then(|| Self {
            means: sums.map(|s| s / count as f64),
        })
    }

    /// Mean playlist count on a platform.
    pub fn mean(&self, platform: Platform) -> f64 {
        self.means[platform as usize]
    }

    /// Largest of the per-platform means.
    pub fn max(&self) -> f64 {
        self.means.iter().copied().fold(0.0, f64::max)
    }
}

/// Pearson correlation between a feature and `log10(playlists + 1)`.
///
/// Only records with the feature present and a positive playlist count take
/// part. Returns `0.0` with fewer than three such records or when the result
/// is undefined (zero variance).
pub fn correlation<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    feature: Feature,
    platform: Platform,
) -> f64 {
    let pairs: Vec<(f64, f64)> = records
        .into_iter()
        .filter_map(|r| {
            let x = r.feature(feature)?;
            let p = r.playlists(platform).filter(|p| *p > 0.0)?;
            Some((x, (p + 1.0).log10()))
        })
        .collect();

    let n = pairs.len();
    if n < MIN_CORRELATION_SAMPLES {
        return 0.0;
    }

    let nf = n as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / nf;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / nf;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let r = cov / (var_x * var_y).sqrt();
    if r.is_finite() { r } else { 0.0 }
}

/// Correlation of every feature against every platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationMatrix {
    values: [[f64; Platform::ALL.len()]; Feature::ALL.len()],
}

impl CorrelationMatrix {
    /// Compute all cells over `records`.
    pub fn compute(records: &[&Record]) -> Self {
        let mut values = [[0.0; Platform::ALL.len()]; Feature::ALL.len()];
        for feature in Feature::ALL {
            for platform in Platform::ALL {
                values[feature as usize][platform as usize] =
                    correlation(records.iter().copied(), feature, platform);
            }
        }
        Self { values }
    }

    /// One cell.
    pub fn get(&self, feature: Feature, platform: Platform) -> f64 {
        self.values[feature as usize][platform as usize]
    }
}

/// How strongly a correlation leans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Strength {
    /// `|r| <= 0.2`.
    None,
    /// `0.2 < |r| <= 0.4`.
    Slight,
    /// `0.4 < |r| <= 0.7`.
    Moderate,
    /// `|r| > 0.7`.
    Strong,
}

/// Reading of a correlation for the heatmap tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preference {
    /// Magnitude bucket.
    pub strength: Strength,
    /// Sign of the correlation.
    pub positive: bool,
}

impl Preference {
    /// Bucket a correlation coefficient.
    pub fn classify(r: f64) -> Self {
        let abs = r.abs();
        let strength = if abs > 0.7 {
            Strength::Strong
        } else if abs > 0.4 {
            Strength::Moderate
        } else if abs > 0.2 {
            Strength::Slight
        } else {
            Strength::None
        };
        Self {
            strength,
            positive: r > 0.0,
        }
    }

    /// Human-readable reading.
    pub fn label(&self) -> &'static str {
        match (self.strength, self.positive) {
            (Strength::Strong, true) => "Strong positive preference",
            (Strength::Strong, false) => "Strong negative preference",
            (Strength::Moderate, true) => "Moderate positive preference",
            (Strength::Moderate, false) => "Moderate negative preference",
            (Strength::Slight, true) => "Slight positive preference",
            (Strength::Slight, false) => "Slight negative preference",
            (Strength::None, _) => "No clear preference",
        }
    }
}

/// Range filter suggested after clicking a heatmap cell.
///
/// `None` means "no constraint" (the whole domain).
pub fn suggested_range(r: f64) -> Option<FeatureRange> {
    if r > 0.5 {
        Some(FeatureRange::new(60.0, 100.0))
    } else if r > 0.2 {
        Some(FeatureRange::new(40.0, 80.0))
    } else if r < -0.5 {
        Some(FeatureRange::new(0.0, 40.0))
    } else if r < -0.2 {
        Some(FeatureRange::new(20.0, 60.0))
    } else {
        None
    }
}

/// The top `fraction` of the whole dataset by playlist count on a platform.
///
/// Sorted descending with ties in dataset order; a missing count sorts as
/// zero. Takes `floor(len * fraction)` records.
pub fn top_by_platform(dataset: &Dataset, platform: Platform, fraction: f64) -> Vec<RecordId> {
    let mut ranked: Vec<(RecordId, f64)> = dataset
        .iter()
        .map(|(id, r)| (id, r.playlists(platform).unwrap_or(0.0)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    let take = (dataset.len() as f64 * fraction.clamp(0.0, 1.0)).floor() as usize;
    ranked.into_iter().take(take).map(|(id, _)| id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(energy: Option<f64>, spotify: f64) -> Record {
        let r = Record::new("s", "a").with_playlists(Platform::Spotify, spotify);
        match energy {
            Some(e) => r.with_feature(Feature::Energy, e),
            None => r,
        }
    }

    #[test]
    fn test_profile_counts_missing_as_zero() {
        let records = [record(Some(40.0), 1.0), record(None, 1.0)];
        let profile = FeatureProfile::compute(&records).unwrap();
        assert_eq!(profile.mean(Feature::Energy), 20.0);
        assert_eq!(profile.mean(Feature::Valence), 0.0);
        assert_eq!(profile.count(), 2);
    }

    #[test]
    fn test_profile_empty() {
        assert!(FeatureProfile::compute(&[] as &[Record]).is_none());
        assert!(PlatformPresence::compute(&[] as &[Record]).is_none());
    }

    #[test]
    fn test_platform_presence() {
        let records = [
            record(None, 100.0),
            record(None, 300.0).with_playlists(Platform::Deezer, 10.0),
        ];
        let presence = PlatformPresence::compute(&records).unwrap();
        assert_eq!(presence.mean(Platform::Spotify), 200.0);
        assert_eq!(presence.mean(Platform::Deezer), 5.0);
        assert_eq!(presence.mean(Platform::AppleMusic), 0.0);
        assert_eq!(presence.max(), 200.0);
    }

    #[test]
    fn test_correlation_perfect_positive() {
        // log10(p + 1) is monotonic, and with p = 10^e - 1 it is exactly e.
        let records: Vec<_> = [1.0, 2.0, 3.0, 4.0]
            .into_iter()
            .map(|e: f64| record(Some(e), 10f64.powf(e) - 1.0))
            .collect();
        let r = correlation(&records, Feature::Energy, Platform::Spotify);
        assert!((r - 1.0).abs() < 1e-9, "r = {r}");
    }

    #[test]
    fn test_correlation_needs_three_usable_records() {
        let records = [
            record(Some(10.0), 5.0),
            record(Some(20.0), 50.0),
            record(None, 500.0),
            record(Some(30.0), 0.0),
        ];
        assert_eq!(correlation(&records, Feature::Energy, Platform::Spotify), 0.0);
    }

    #[test]
    fn test_correlation_zero_variance_is_zero() {
        let records: Vec<_> = (0..5).map(|i| record(Some(50.0), i as f64 + 1.0)).collect();
        assert_eq!(correlation(&records, Feature::Energy, Platform::Spotify), 0.0);
    }

    #[test]
    fn test_matrix_matches_cells() {
        let records: Vec<_> = [10.0, 40.0, 20.0, 90.0]
            .into_iter()
            .map(|e| record(Some(e), e * 3.0))
            .collect();
        let refs: Vec<&Record> = records.iter().collect();
        let matrix = CorrelationMatrix::compute(&refs);
        assert_eq!(
            matrix.get(Feature::Energy, Platform::Spotify),
            correlation(&records, Feature::Energy, Platform::Spotify)
        );
        assert_eq!(matrix.get(Feature::Valence, Platform::Deezer), 0.0);
    }

    #[test]
    fn test_preference_buckets() {
        assert_eq!(Preference::classify(0.75).label(), "Strong positive preference");
        assert_eq!(Preference::classify(-0.5).label(), "Moderate negative preference");
        assert_eq!(Preference::classify(0.3).label(), "Slight positive preference");
        assert_eq!(Preference::classify(0.2).label(), "No clear preference");
        assert_eq!(Preference::classify(-0.1).strength, Strength::None);
    }

    #[test]
    fn test_suggested_range() {
        assert_eq!(suggested_range(0.6), Some(FeatureRange::new(60.0, 100.0)));
        assert_eq!(suggested_range(0.3), Some(FeatureRange::new(40.0, 80.0)));
        assert_eq!(suggested_range(-0.6), Some(FeatureRange::new(0.0, 40.0)));
        assert_eq!(suggested_range(-0.3), Some(FeatureRange::new(20.0, 60.0)));
        assert_eq!(suggested_range(0.2), None);
        assert_eq!(suggested_range(-0.2), None);
    }

    #[test]
    fn test_top_by_platform() {
        let records: Vec<_> = [5.0, 50.0, 20.0, 50.0, 1.0, 0.0, 3.0, 2.0, 9.0, 7.0, 8.0]
            .into_iter()
            .map(|p| record(None, p))
            .collect();
        let dataset = Dataset::new(records);
        // floor(11 * 0.1) = 1; ties keep dataset order.
        assert_eq!(top_by_platform(&dataset, Platform::Spotify, 0.1), [RecordId(1)]);
        assert_eq!(
            top_by_platform(&dataset, Platform::Spotify, 0.3),
            [RecordId(1), RecordId(3), RecordId(2)]
        );
        assert!(top_by_platform(&dataset, Platform::Deezer, 0.05).is_empty());
    }
}
