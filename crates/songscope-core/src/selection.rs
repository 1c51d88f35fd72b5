//! Combining filter slots into a selection.

use std::collections::HashSet;

use crate::dataset::Dataset;
use crate::filter::FilterStore;
use crate::record::{Record, RecordId};

/// The records passing every active filter.
///
/// Carries two views of the same answer: the matching ids in dataset order,
/// and a per-record membership flag over the whole dataset so the projection
/// view can ghost non-matching points instead of hiding them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionResult {
    ids: Vec<RecordId>,
    membership: Vec<bool>,
}

impl SelectionResult {
    /// Every record of the dataset.
    pub fn all(dataset: &Dataset) -> Self {
        Self {
            ids: dataset.ids().collect(),
            membership: vec![true; dataset.len()],
        }
    }

    /// Matching ids in dataset order.
    pub fn ids(&self) -> &[RecordId] {
        &self.ids
    }

    /// One flag per dataset record.
    pub fn membership(&self) -> &[bool] {
        &self.membership
    }

    /// Whether a record passes every filter.
    pub fn matches(&self, id: RecordId) -> bool {
        self.membership.get(id.index()).copied().unwrap_or(false)
    }

    /// Number of matching records.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True when nothing matches.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Share of the dataset that matches; `1.0` for an empty dataset.
    pub fn match_fraction(&self) -> f64 {
        if self.membership.is_empty() {
            1.0
        } else {
            self.ids.len() as f64 / self.membership.len() as f64
        }
    }

    /// The matching records.
    pub fn records<'a>(&'a self, dataset: &'a Dataset) -> impl Iterator<Item = &'a Record> + 'a {
        self.ids.iter().filter_map(|id| dataset.get(*id))
    }
}

/// Intersect every active slot of `store` over `dataset`.
///
/// An unset slot is the universal set. Set slots are AND-combined: the lasso
/// and artist slots by id membership, the mode slot by equality, and each
/// range by inclusive bounds. A record with no value for a constrained feature
/// fails that range. The result does not depend on the order slots were set.
pub fn combine(dataset: &Dataset, store: &FilterStore) -> SelectionResult {
    let lasso: Option<HashSet<RecordId>> = store.lasso().map(|ids| ids.iter().copied().collect());
    let artist: Option<HashSet<RecordId>> =
        store.artist().map(|a| a.ids.iter().copied().collect());
    let mode = store.mode();
    let ranges: Vec<_> = store.ranges().collect();

    let membership: Vec<bool> = dataset
        .iter()
        .map(|(id, record)| {
            lasso.as_ref().is_none_or(|set| set.contains(&id))
                && artist.as_ref().is_none_or(|set| set.contains(&id))
                && mode.is_none_or(|m| record.mode == Some(m))
                && ranges.iter().all(|(feature, range)| {
                    record.feature(*feature).is_some_and(|v| range.contains(v))
                })
        })
        .collect();

    let ids = membership
        .iter()
        .enumerate()
        .filter(|(_, matched)| **matched)
        .map(|(i, _)| RecordId::from_index(i))
        .collect();

    SelectionResult { ids, membership }
}
