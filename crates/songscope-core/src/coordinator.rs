//! The single writer of filter state.
//!
//! [`FilterCoordinator`] owns the dataset, the [`FilterStore`], and the latest
//! [`SelectionResult`]. Every setter mutates exactly the named slot, runs one
//! full recomputation, and pushes the new selection to every subscriber in the
//! order they subscribed.
//!
//! Subscribers never call back into the coordinator while it is broadcasting.
//! Views record what the user did and hand it to the controller, which
//! applies it once rendering is over.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use songscope_registry::{Feature, Mode};

use crate::dataset::Dataset;
use crate::filter::{ArtistFilter, FeatureRange, FilterSlot, FilterStore};
use crate::record::RecordId;
use crate::selection::{SelectionResult, combine};

/// Receives every recomputed selection.
pub trait SelectionListener {
    /// Called synchronously after each recomputation.
    fn selection_changed(&mut self, dataset: &Dataset, selection: &SelectionResult);
}

impl<F> SelectionListener for F
where
    F: FnMut(&Dataset, &SelectionResult),
{
    fn selection_changed(&mut self, dataset: &Dataset, selection: &SelectionResult) {
        self(dataset, selection);
    }
}

/// A subscriber shared between the coordinator and its owner.
pub type SharedListener = Rc<RefCell<dyn SelectionListener>>;

/// Owns filter state and broadcasts selections.
pub struct FilterCoordinator {
    dataset: Arc<Dataset>,
    store: FilterStore,
    selection: SelectionResult,
    listeners: Vec<SharedListener>,
    revision: u64,
}

impl FilterCoordinator {
    /// A coordinator with every slot unset; the selection is the full dataset.
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let selection = SelectionResult::all(&dataset);
        Self {
            dataset,
            store: FilterStore::new(),
            selection,
            listeners: Vec::new(),
            revision: 0,
        }
    }

    /// The dataset.
    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    /// Current filter state.
    pub fn store(&self) -> &FilterStore {
        &self.store
    }

    /// Latest selection.
    pub fn selection(&self) -> &SelectionResult {
        &self.selection
    }

    /// Incremented by every recomputation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Register a subscriber and deliver the current selection to it at once.
    pub fn subscribe(&mut self, listener: SharedListener) {
        listener
            .borrow_mut()
            .selection_changed(&self.dataset, &self.selection);
        self.listeners.push(listener);
    }

    /// Set (`Some`) or clear (`None`) the spatial selection.
    ///
    /// `Some(vec![])` is a filter that matches nothing, distinct from `None`.
    pub fn set_lasso(&mut self, ids: Option<Vec<RecordId>>) {
        #[cfg(feature = "tracing")]
        tracing::debug!(lasso = ?ids.as_ref().map(Vec::len), "lasso committed");
        self.store.set_lasso(ids);
        self.recompute();
    }

    /// Set or clear the artist filter.
    pub fn set_artist(&mut self, artist: Option<ArtistFilter>) {
        self.store.set_artist(artist);
        self.recompute();
    }

    /// Set or clear the mode filter.
    pub fn set_mode(&mut self, mode: Option<Mode>) {
        self.store.set_mode(mode);
        self.recompute();
    }

    /// Set or clear the range on one feature. A range covering the whole
    /// domain removes the constraint.
    pub fn set_range(&mut self, feature: Feature, range: Option<FeatureRange>) {
        self.store
            .set_range(feature, range.filter(|r| !r.is_full()));
        self.recompute();
    }

    /// Unset one slot.
    pub fn remove(&mut self, slot: FilterSlot) {
        self.store.remove(slot);
        self.recompute();
    }

    /// Unset every slot with a single recomputation.
    pub fn clear_all(&mut self) {
        self.store.clear();
        self.recompute();
    }

    fn recompute(&mut self) {
        self.selection = combine(&self.dataset, &self.store);
        self.revision += 1;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            matched = self.selection.len(),
            total = self.dataset.len(),
            active_filters = self.store.active_count(),
            "selection recomputed"
        );

        for listener in &self.listeners {
            match listener.try_borrow_mut() {
                Ok(mut listener) => listener.selection_changed(&self.dataset, &self.selection),
                Err(_) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!("selection listener busy during broadcast, skipped");
                }
            }
        }
    }
}

impl std::fmt::Debug for FilterCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterCoordinator")
            .field("records", &self.dataset.len())
            .field("store", &self.store)
            .field("matched", &self.selection.len())
            .field("listeners", &self.listeners.len())
            .field("revision", &self.revision)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    fn coordinator() -> FilterCoordinator {
        let records = (0..4)
            .map(|i| Record::new(format!("s{i}"), "a").with_feature(Feature::Energy, i as f64 * 30.0))
            .collect();
        FilterCoordinator::new(Arc::new(Dataset::new(records)))
    }

    #[test]
    fn test_subscribe_delivers_current_selection() {
        let mut coord = coordinator();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        coord.subscribe(Rc::new(RefCell::new(move |_: &Dataset, s: &SelectionResult| {
            sink.borrow_mut().push(s.len());
        })));
        assert_eq!(*seen.borrow(), [4]);
    }

    #[test]
    fn test_broadcast_in_registration_order() {
        let mut coord = coordinator();
        let log = Rc::new(RefCell::new(Vec::new()));
        for name in ["universe", "fingerprint", "battleground"] {
            let log = Rc::clone(&log);
            coord.subscribe(Rc::new(RefCell::new(move |_: &Dataset, _: &SelectionResult| {
                log.borrow_mut().push(name);
            })));
        }
        log.borrow_mut().clear();

        coord.set_mode(None);
        assert_eq!(*log.borrow(), ["universe", "fingerprint", "battleground"]);
    }

    #[test]
    fn test_each_setter_recomputes_once() {
        let mut coord = coordinator();
        let start = coord.revision();
        coord.set_range(Feature::Energy, Some(FeatureRange::new(20.0, 70.0)));
        coord.set_lasso(Some(vec![RecordId(1)]));
        coord.clear_all();
        assert_eq!(coord.revision(), start + 3);
    }

    #[test]
    fn test_full_range_removes_constraint() {
        let mut coord = coordinator();
        coord.set_range(Feature::Energy, Some(FeatureRange::new(20.0, 70.0)));
        assert_eq!(coord.selection().len(), 2);
        coord.set_range(Feature::Energy, Some(FeatureRange::new(100.0, 0.0)));
        assert_eq!(coord.store().range(Feature::Energy), None);
        assert_eq!(coord.selection().len(), 4);
    }

    #[test]
    fn test_remove_single_slot() {
        let mut coord = coordinator();
        coord.set_lasso(Some(vec![RecordId(0), RecordId(1)]));
        coord.set_range(Feature::Energy, Some(FeatureRange::new(20.0, 100.0)));
        assert_eq!(coord.selection().ids(), [RecordId(1)]);

        coord.remove(FilterSlot::Lasso);
        assert_eq!(coord.selection().ids(), [RecordId(1), RecordId(2), RecordId(3)]);
        assert!(coord.store().range(Feature::Energy).is_some());
    }
}
