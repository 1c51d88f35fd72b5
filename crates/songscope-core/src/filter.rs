//! Filter slots and the store that holds them.
//!
//! The store has four independent slots. An unset slot places no constraint
//! on the selection; see [`crate::selection::combine`] for how set slots are
//! intersected.

use std::collections::BTreeMap;

use songscope_registry::{FEATURE_MAX, FEATURE_MIN, Feature, Mode};

use crate::record::RecordId;

/// Inclusive numeric interval on one feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRange {
    min: f64,
    max: f64,
}

impl FeatureRange {
    /// Build a range. Bounds given in the wrong order are swapped.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// The whole `[0, 100]` feature domain.
    pub fn full() -> Self {
        Self::new(FEATURE_MIN, FEATURE_MAX)
    }

    /// Lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// True when `min <= value <= max`.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// True when the range covers the whole feature domain.
    pub fn is_full(&self) -> bool {
        self.min <= FEATURE_MIN && self.max >= FEATURE_MAX
    }
}

impl Default for FeatureRange {
    fn default() -> Self {
        Self::full()
    }
}

/// An artist chosen in the search box, with every record that credits them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistFilter {
    /// Name as typed or picked.
    pub name: String,
    /// Records crediting the artist; empty for an unknown name.
    pub ids: Vec<RecordId>,
}

impl ArtistFilter {
    /// Build a filter.
    pub fn new(name: impl Into<String>, ids: Vec<RecordId>) -> Self {
        Self {
            name: name.into(),
            ids,
        }
    }
}

/// Names one slot of the store, for independent removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterSlot {
    /// Spatial brush selection.
    Lasso,
    /// Artist search.
    Artist,
    /// Major/minor toggle.
    Mode,
    /// Range on one feature.
    Range(Feature),
}

/// Current value of every filter slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterStore {
    lasso: Option<Vec<RecordId>>,
    artist: Option<ArtistFilter>,
    mode: Option<Mode>,
    ranges: BTreeMap<Feature, FeatureRange>,
}

impl FilterStore {
    /// An empty store: every slot unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records chosen by the brush, in brush order.
    pub fn lasso(&self) -> Option<&[RecordId]> {
        self.lasso.as_deref()
    }

    /// Active artist filter.
    pub fn artist(&self) -> Option<&ArtistFilter> {
        self.artist.as_ref()
    }

    /// Active mode filter.
    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    /// Active range on a feature.
    pub fn range(&self, feature: Feature) -> Option<FeatureRange> {
        self.ranges.get(&feature).copied()
    }

    /// Every active range, ordered by feature.
    pub fn ranges(&self) -> impl Iterator<Item = (Feature, FeatureRange)> + '_ {
        self.ranges.iter().map(|(f, r)| (*f, *r))
    }

    /// Set or unset the lasso slot.
    pub fn set_lasso(&mut self, ids: Option<Vec<RecordId>>) {
        self.lasso = ids;
    }

    /// Set or unset the artist slot.
    pub fn set_artist(&mut self, artist: Option<ArtistFilter>) {
        self.artist = artist;
    }

    /// Set or unset the mode slot.
    pub fn set_mode(&mut self, mode: Option<Mode>) {
        self.mode = mode;
    }

    /// Set or unset the range on one feature.
    pub fn set_range(&mut self, feature: Feature, range: Option<FeatureRange>) {
        match range {
            Some(range) => {
                self.ranges.insert(feature, range);
            }
            None => {
                self.ranges.remove(&feature);
            }
        }
    }

    /// Unset one slot.
    pub fn remove(&mut self, slot: FilterSlot) {
        match slot {
            FilterSlot::Lasso => self.lasso = None,
            FilterSlot::Artist => self.artist = None,
            FilterSlot::Mode => self.mode = None,
            FilterSlot::Range(feature) => self.set_range(feature, None),
        }
    }

    /// Unset every slot.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True when no slot is set.
    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// Set slots in panel order: lasso, artist, mode, then ranges by feature.
    pub fn active_slots(&self) -> Vec<FilterSlot> {
        let mut slots = Vec::with_capacity(3 + self.ranges.len());
        if self.lasso.is_some() {
            slots.push(FilterSlot::Lasso);
        }
        if self.artist.is_some() {
            slots.push(FilterSlot::Artist);
        }
        if self.mode.is_some() {
            slots.push(FilterSlot::Mode);
        }
        slots.extend(self.ranges.keys().map(|f| FilterSlot::Range(*f)));
        slots
    }

    /// Number of set slots, counting each range separately.
    pub fn active_count(&self) -> usize {
        usize::from(self.lasso.is_some())
            + usize::from(self.artist.is_some())
            + usize::from(self.mode.is_some())
            + self.ranges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_swaps_bounds() {
        let range = FeatureRange::new(80.0, 40.0);
        assert_eq!((range.min(), range.max()), (40.0, 80.0));
        assert!(range.contains(40.0));
        assert!(range.contains(80.0));
        assert!(!range.contains(80.5));
    }

    #[test]
    fn test_full_range() {
        assert!(FeatureRange::full().is_full());
        assert!(FeatureRange::new(0.0, 100.0).is_full());
        assert!(!FeatureRange::new(1.0, 100.0).is_full());
    }

    #[test]
    fn test_active_count_and_slots() {
        let mut store = FilterStore::new();
        assert!(store.is_empty());

        store.set_lasso(Some(vec![]));
        store.set_mode(Some(Mode::Minor));
        store.set_range(Feature::Valence, Some(FeatureRange::new(10.0, 20.0)));
        store.set_range(Feature::Danceability, Some(FeatureRange::new(10.0, 20.0)));
        assert_eq!(store.active_count(), 4);
        assert_eq!(
            store.active_slots(),
            [
                FilterSlot::Lasso,
                FilterSlot::Mode,
                FilterSlot::Range(Feature::Danceability),
                FilterSlot::Range(Feature::Valence),
            ]
        );

        store.remove(FilterSlot::Range(Feature::Valence));
        store.remove(FilterSlot::Lasso);
        assert_eq!(store.active_count(), 2);

        store.clear();
        assert_eq!(store, FilterStore::new());
    }

    #[test]
    fn test_empty_lasso_is_set() {
        let mut store = FilterStore::new();
        store.set_lasso(Some(Vec::new()));
        assert_eq!(store.lasso(), Some(&[][..]));
        store.set_lasso(None);
        assert_eq!(store.lasso(), None);
    }
}
