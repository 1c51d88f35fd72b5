//! Songscope Core - data model and cross-view filtering for the songscope dashboard
//!
//! This crate holds everything the dashboard does that is not drawing: the
//! song dataset, the shared filter state, the intersection that turns filter
//! state into a selection, the aggregates the summary views render, and the
//! pan/zoom/brush state machine of the projection view. It has no GUI
//! dependency and is exercised headless by its tests.
//!
//! # Core Abstractions
//!
//! ## Data
//!
//! - [`Dataset`] - Immutable list of [`Record`]s loaded once at startup
//! - [`RecordId`] - Stable surrogate id (position in the loaded array)
//!
//! ## Filtering
//!
//! - [`FilterStore`] - Four independent slots: lasso, artist, mode, ranges
//! - [`combine`] - Pure intersection of every active slot
//! - [`FilterCoordinator`] - Single writer that recomputes and broadcasts
//! - [`SelectionListener`] - Subscription seam implemented by every view
//!
//! ## Aggregates
//!
//! - [`FeatureProfile`] - Per-feature means over a selection
//! - [`PlatformPresence`] - Mean playlist count per platform
//! - [`CorrelationMatrix`] - Feature vs. log playlist presence (Pearson)
//! - [`ArtistIndex`] - Co-artist aware lookup with ranked suggestions
//!
//! ## Projection
//!
//! - [`Universe`] - Interaction modes, zoom transform, and rectangular brush
//! - [`OpacityTransition`] - Restartable per-point opacity animation
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use songscope_core::{Dataset, Feature, FeatureRange, FilterCoordinator, Record};
//!
//! let records = [10.0, 30.0, 50.0, 70.0, 90.0]
//!     .into_iter()
//!     .map(|e| Record::new("song", "artist").with_feature(Feature::Energy, e))
//!     .collect();
//! let mut coordinator = FilterCoordinator::new(Arc::new(Dataset::new(records)));
//!
//! coordinator.set_range(Feature::Energy, Some(FeatureRange::new(40.0, 80.0)));
//! assert_eq!(coordinator.selection().len(), 2);
//!
//! coordinator.clear_all();
//! assert_eq!(coordinator.selection().match_fraction(), 1.0);
//! ```

pub mod aggregate;
pub mod artist;
pub mod coordinator;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod record;
pub mod selection;
pub mod transition;
pub mod universe;

pub use aggregate::{
    CorrelationMatrix, FeatureProfile, PlatformPresence, Preference, Strength, correlation,
    suggested_range, top_by_platform,
};
pub use artist::{ArtistIndex, ArtistMatch, match_ranges};
pub use coordinator::{FilterCoordinator, SelectionListener, SharedListener};
pub use dataset::{Dataset, Extent};
pub use error::DatasetError;
pub use filter::{ArtistFilter, FeatureRange, FilterSlot, FilterStore};
pub use record::{Record, RecordId};
pub use selection::{SelectionResult, combine};
pub use transition::OpacityTransition;
pub use universe::{
    Gesture, InteractionMode, LassoOutcome, LinearScale, Point, PointStyle, ProjectionScales,
    ScreenRect, SqrtScale, Universe, ViewTransform, ZoomLimits,
};

pub use songscope_registry::{ColorKey, Feature, Mode, Palette, Platform, Rgb};
