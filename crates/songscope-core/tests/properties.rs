//! Property-based tests for filter combination and view transforms.
//!
//! Checks that the combined selection is exactly the intersection of the
//! per-slot predicates regardless of activation order, and that zoom and pan
//! never leave their configured bounds.

use std::sync::Arc;

use proptest::prelude::*;
use songscope_core::{
    ArtistFilter, Dataset, Feature, FeatureRange, FilterCoordinator, FilterStore, Mode, Point,
    Record, RecordId, ScreenRect, Universe, ViewTransform, ZoomLimits, combine,
};

/// One slot mutation, applied through the coordinator.
#[derive(Debug, Clone)]
enum Op {
    Lasso(Option<Vec<u32>>),
    Artist(Option<Vec<u32>>),
    Mode(Option<bool>),
    Range(usize, Option<(f64, f64)>),
}

fn arb_record() -> impl Strategy<Value = Record> {
    (
        prop::option::of(any::<bool>()),
        prop::array::uniform6(prop::option::weighted(0.9, 0.0f64..=100.0)),
        -50.0f64..50.0,
        -50.0f64..50.0,
    )
        .prop_map(|(major, features, x, y)| {
            let mut record = Record::new("song", "artist").with_projection(x, y);
            if let Some(major) = major {
                record = record.with_mode(if major { Mode::Major } else { Mode::Minor });
            }
            for (feature, value) in Feature::ALL.into_iter().zip(features) {
                if let Some(v) = value {
                    record = record.with_feature(feature, v);
                }
            }
            record
        })
}

fn arb_dataset() -> impl Strategy<Value = Dataset> {
    prop::collection::vec(arb_record(), 0..40).prop_map(Dataset::new)
}

fn arb_ids() -> impl Strategy<Value = Option<Vec<u32>>> {
    prop::option::of(prop::collection::vec(0u32..40, 0..20))
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arb_ids().prop_map(Op::Lasso),
        arb_ids().prop_map(Op::Artist),
        prop::option::of(any::<bool>()).prop_map(Op::Mode),
        (
            0usize..Feature::ALL.len(),
            prop::option::of((0.0f64..=100.0, 0.0f64..=100.0))
        )
            .prop_map(|(f, r)| Op::Range(f, r)),
    ]
}

fn ids(raw: &[u32]) -> Vec<RecordId> {
    raw.iter().copied().map(RecordId).collect()
}

fn apply(store: &mut FilterStore, op: &Op) {
    match op {
        Op::Lasso(v) => store.set_lasso(v.as_deref().map(ids)),
        Op::Artist(v) => store.set_artist(v.as_deref().map(|v| ArtistFilter::new("A", ids(v)))),
        Op::Mode(m) => store.set_mode(m.map(|major| if major { Mode::Major } else { Mode::Minor })),
        Op::Range(f, r) => {
            store.set_range(Feature::ALL[*f], r.map(|(a, b)| FeatureRange::new(a, b)));
        }
    }
}

/// Reference predicate: a record passes iff it satisfies every set slot.
fn passes(store: &FilterStore, id: RecordId, record: &Record) -> bool {
    if let Some(lasso) = store.lasso() {
        if !lasso.contains(&id) {
            return false;
        }
    }
    if let Some(artist) = store.artist() {
        if !artist.ids.contains(&id) {
            return false;
        }
    }
    if let Some(mode) = store.mode() {
        if record.mode != Some(mode) {
            return false;
        }
    }
    store.ranges().all(|(feature, range)| {
        record
            .feature(feature)
            .is_some_and(|v| v >= range.min() && v <= range.max())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// The selection is exactly the records passing every active slot, and
    /// the membership flags agree with the id list.
    #[test]
    fn selection_is_intersection(
        dataset in arb_dataset(),
        ops in prop::collection::vec(arb_op(), 0..8),
    ) {
        let mut store = FilterStore::new();
        for op in &ops {
            apply(&mut store, op);
        }
        let selection = combine(&dataset, &store);

        let expected: Vec<RecordId> = dataset
            .iter()
            .filter(|(id, r)| passes(&store, *id, r))
            .map(|(id, _)| id)
            .collect();
        prop_assert_eq!(selection.ids(), expected.as_slice());
        prop_assert_eq!(selection.membership().len(), dataset.len());
        for (id, _) in dataset.iter() {
            prop_assert_eq!(selection.matches(id), expected.contains(&id));
        }
    }

    /// Setting the same slots in reverse order yields the same selection.
    #[test]
    fn activation_order_is_irrelevant(
        dataset in arb_dataset(),
        lasso in arb_ids(),
        artist in arb_ids(),
        mode in prop::option::of(any::<bool>()),
        energy in prop::option::of((0.0f64..=100.0, 0.0f64..=100.0)),
        valence in prop::option::of((0.0f64..=100.0, 0.0f64..=100.0)),
    ) {
        let ops = vec![
            Op::Lasso(lasso),
            Op::Artist(artist),
            Op::Mode(mode),
            Op::Range(Feature::Energy as usize, energy),
            Op::Range(Feature::Valence as usize, valence),
        ];
        let mut forward = FilterStore::new();
        ops.iter().for_each(|op| apply(&mut forward, op));
        let mut backward = FilterStore::new();
        ops.iter().rev().for_each(|op| apply(&mut backward, op));

        prop_assert_eq!(combine(&dataset, &forward), combine(&dataset, &backward));
    }

    /// Clearing every filter returns to the full dataset with every record
    /// marked as matching.
    #[test]
    fn clear_all_restores_everything(
        dataset in arb_dataset(),
        ops in prop::collection::vec(arb_op(), 0..8),
    ) {
        let mut coord = FilterCoordinator::new(Arc::new(dataset));
        for op in ops {
            match op {
                Op::Lasso(v) => coord.set_lasso(v.as_deref().map(ids)),
                Op::Artist(v) => coord.set_artist(v.as_deref().map(|v| ArtistFilter::new("A", ids(v)))),
                Op::Mode(m) => coord.set_mode(m.map(|major| if major { Mode::Major } else { Mode::Minor })),
                Op::Range(f, r) => coord.set_range(Feature::ALL[f], r.map(|(a, b)| FeatureRange::new(a, b))),
            }
        }
        coord.clear_all();

        prop_assert_eq!(coord.selection().len(), coord.dataset().len());
        prop_assert!(coord.selection().membership().iter().all(|m| *m));
        prop_assert_eq!(coord.store().active_count(), 0);
    }

    /// Any sequence of wheel zooms keeps the scale within limits and the
    /// visible region within the pan margin.
    #[test]
    fn zoom_and_pan_stay_bounded(
        steps in prop::collection::vec(
            (-2000.0f64..2000.0, 0.0f64..800.0, 0.0f64..600.0, -300.0f64..300.0, -300.0f64..300.0),
            1..30,
        ),
    ) {
        let limits = ZoomLimits::default();
        let viewport = ScreenRect::from_corners(Point::new(0.0, 0.0), Point::new(800.0, 600.0));
        let extent = limits.translate_extent(800.0, 600.0);
        let mut t = ViewTransform::IDENTITY;

        for (wheel, fx, fy, dx, dy) in steps {
            t = t
                .scale_at(ZoomLimits::wheel_factor(wheel), Point::new(fx, fy), &limits)
                .constrain(&viewport, &extent);
            t = t.translate_by(dx, dy).constrain(&viewport, &extent);

            prop_assert!(t.k >= limits.min_zoom && t.k <= limits.max_zoom);
            let lo = t.invert(viewport.min);
            let hi = t.invert(viewport.max);
            let eps = 1e-6;
            if hi.x - lo.x <= extent.width() {
                prop_assert!(lo.x >= extent.min.x - eps && hi.x <= extent.max.x + eps);
            }
            if hi.y - lo.y <= extent.height() {
                prop_assert!(lo.y >= extent.min.y - eps && hi.y <= extent.max.y + eps);
            }
        }
    }

    /// A brush release selects exactly the points whose transformed centres
    /// lie inside the rectangle.
    #[test]
    fn brush_hits_match_geometry(
        dataset in arb_dataset(),
        zoom in -1500.0f64..1500.0,
        a in (0.0f64..400.0, 0.0f64..300.0),
        b in (0.0f64..400.0, 0.0f64..300.0),
    ) {
        let mut universe = Universe::new(&dataset, 400.0, 300.0, ZoomLimits::default(), (3.0, 20.0));
        universe.wheel(zoom, Point::new(200.0, 150.0));
        universe.toggle_mode();
        universe.pointer_down(Point::new(a.0, a.1));
        let outcome = universe.pointer_up(Point::new(b.0, b.1));
        let rect = ScreenRect::from_corners(Point::new(a.0, a.1), Point::new(b.0, b.1));

        match outcome.and_then(songscope_core::LassoOutcome::into_filter) {
            None => prop_assert!(rect.is_degenerate()),
            Some(hits) => {
                let expected: Vec<RecordId> = dataset
                    .ids()
                    .filter(|id| universe.screen_position(*id).is_some_and(|p| rect.contains(p)))
                    .collect();
                prop_assert_eq!(hits, expected);
            }
        }
    }
}
