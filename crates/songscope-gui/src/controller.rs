//! Dashboard wiring: one coordinator, three views, the controls around them.
//!
//! Rendering never mutates filters. Every view and control appends
//! [`ViewAction`]s to a per-frame list, and [`Dashboard::apply`] feeds them
//! to the coordinator after all panels are drawn.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use egui::{CentralPanel, Context, RichText, SidePanel, TopBottomPanel};
use songscope_config::DashboardConfig;
use songscope_core::{
    ArtistIndex, ColorKey, Dataset, Feature, FeatureRange, FilterCoordinator, FilterSlot,
    FilterStore, suggested_range, top_by_platform,
};
use songscope_registry::{FEATURE_MAX, FEATURE_MIN};

use crate::Instant;
use crate::artist_search::ArtistSearch;
use crate::filter_panel;
use crate::theme::{Theme, to_color32};
use crate::views::{BattlegroundView, FingerprintView, UniverseView, ViewAction, songs_label};
use crate::widgets::{ModeToggle, RangeSlider};

/// Delay between a heatmap click recoloring the plot and its suggested
/// range being applied.
pub const SUGGESTION_DELAY: Duration = Duration::from_millis(100);

/// Share of the dataset highlighted by a platform bar click.
const TOP_FRACTION: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingRange {
    feature: Feature,
    range: Option<FeatureRange>,
    due: Instant,
}

/// The loaded dashboard.
pub struct Dashboard {
    coordinator: FilterCoordinator,
    artists: ArtistIndex,
    universe: Rc<RefCell<UniverseView>>,
    fingerprint: Rc<RefCell<FingerprintView>>,
    battleground: Rc<RefCell<BattlegroundView>>,
    search: ArtistSearch,
    color_key: ColorKey,
    pending: Option<PendingRange>,
}

impl Dashboard {
    /// Build the views over `dataset` and subscribe them.
    pub fn new(dataset: Arc<Dataset>, config: &DashboardConfig) -> Self {
        let artists = ArtistIndex::build(&dataset);
        tracing::info!(
            records = dataset.len(),
            artists = artists.len(),
            "dashboard ready"
        );

        let universe = Rc::new(RefCell::new(UniverseView::new(
            Arc::clone(&dataset),
            config.zoom_limits(),
            config.radius_range(),
            config.point_style(),
            config.style.transition_secs,
        )));
        let fingerprint = Rc::new(RefCell::new(FingerprintView::new()));
        let battleground = Rc::new(RefCell::new(BattlegroundView::new()));

        let mut coordinator = FilterCoordinator::new(dataset);
        coordinator.subscribe(universe.clone());
        coordinator.subscribe(fingerprint.clone());
        coordinator.subscribe(battleground.clone());

        Self {
            coordinator,
            artists,
            universe,
            fingerprint,
            battleground,
            search: ArtistSearch::new(config.search.max_suggestions),
            color_key: ColorKey::default(),
            pending: None,
        }
    }

    /// Current filter state.
    pub fn store(&self) -> &FilterStore {
        self.coordinator.store()
    }

    /// Number of records in the current selection.
    pub fn selected(&self) -> usize {
        self.coordinator.selection().len()
    }

    /// What the projection is colored by.
    pub fn color_key(&self) -> ColorKey {
        self.color_key
    }

    /// The search box.
    pub fn search(&self) -> &ArtistSearch {
        &self.search
    }

    /// The projection view.
    pub fn universe(&self) -> &Rc<RefCell<UniverseView>> {
        &self.universe
    }

    /// Whether a heatmap suggestion is still waiting to fire.
    pub fn has_pending_suggestion(&self) -> bool {
        self.pending.is_some()
    }

    /// Apply one user action.
    pub fn apply(&mut self, action: ViewAction, now: Instant) {
        tracing::debug!(?action, "apply");
        match action {
            ViewAction::Lasso(outcome) => self.coordinator.set_lasso(outcome.into_filter()),
            ViewAction::ColorBy(key) => self.color_key = key,
            ViewAction::FeatureClicked(feature) => self.color_key = ColorKey::Feature(feature),
            ViewAction::CellClicked {
                feature,
                correlation,
                ..
            } => {
                self.color_key = ColorKey::Feature(feature);
                self.pending = Some(PendingRange {
                    feature,
                    range: suggested_range(correlation),
                    due: now + SUGGESTION_DELAY,
                });
            }
            ViewAction::HighlightPlatform(platform) => {
                let top = top_by_platform(self.coordinator.dataset(), platform, TOP_FRACTION);
                tracing::debug!(platform = platform.label(), count = top.len(), "highlight");
                self.universe.borrow_mut().highlight(&top);
            }
            ViewAction::SetMode(mode) => self.coordinator.set_mode(mode),
            ViewAction::SetRange(feature, range) => {
                self.coordinator.set_range(feature, Some(range));
            }
            ViewAction::SelectArtist(name) => {
                let filter = self.artists.filter_for(&name);
                self.coordinator.set_artist(Some(filter));
            }
            ViewAction::ClearArtist => self.coordinator.set_artist(None),
            ViewAction::Remove(slot) => {
                if slot == FilterSlot::Lasso {
                    self.universe.borrow_mut().clear_brush();
                }
                if slot == FilterSlot::Artist {
                    self.search.reset();
                }
                self.coordinator.remove(slot);
            }
            ViewAction::ClearAll => {
                self.universe.borrow_mut().clear_brush();
                self.search.reset();
                self.coordinator.clear_all();
            }
        }
    }

    /// Fire the deferred heatmap suggestion once it is due. It only applies
    /// if the plot is still colored by the clicked feature.
    pub fn tick(&mut self, now: Instant) {
        let Some(pending) = self.pending else {
            return;
        };
        if now < pending.due {
            return;
        }
        self.pending = None;
        if self.color_key == ColorKey::Feature(pending.feature) {
            self.coordinator.set_range(pending.feature, pending.range);
        }
    }

    /// Draw every panel, then apply what the user did.
    pub fn ui(&mut self, ctx: &Context, theme: &Theme, now: Instant) {
        self.tick(now);
        if let Some(pending) = self.pending {
            ctx.request_repaint_after(pending.due.saturating_duration_since(now));
        }

        let mut actions = Vec::new();

        TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.add_space(4.0);
            self.controls(ui, theme, &mut actions);
            ui.add_space(4.0);
        });

        TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("{} selected", songs_label(self.selected())));
                ui.separator();
                ui.label(format!("{} total", songs_label(self.coordinator.dataset().len())));
                ui.separator();
                ui.label(format!("{} artists", self.artists.len()));
            });
        });

        SidePanel::left("filters")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                ui.add_space(6.0);
                ui.label(RichText::new("Artist").strong());
                self.search.ui(ui, &self.artists, theme, now, &mut actions);
                ui.add_space(10.0);
                ui.separator();
                filter_panel::show(ui, self.coordinator.store(), theme, &mut actions);
            });

        SidePanel::right("summary")
            .default_width(420.0)
            .resizable(true)
            .show(ctx, |ui| {
                let half = ui.available_height() / 2.0;
                ui.allocate_ui(egui::vec2(ui.available_width(), half), |ui| {
                    self.fingerprint.borrow().ui(ui, theme, &mut actions);
                });
                ui.separator();
                self.battleground.borrow().ui(ui, theme, &mut actions);
            });

        CentralPanel::default().show(ctx, |ui| {
            self.universe
                .borrow_mut()
                .ui(ui, self.color_key, theme, &mut actions);
        });

        for action in actions {
            self.apply(action, now);
        }
    }

    fn controls(&self, ui: &mut egui::Ui, theme: &Theme, actions: &mut Vec<ViewAction>) {
        ui.horizontal(|ui| {
            ui.heading(RichText::new("Songscope").color(theme.accent));
            ui.separator();

            ui.label("Color by");
            let mut key = self.color_key;
            egui::ComboBox::from_id_salt("color_key")
                .selected_text(key.label())
                .show_ui(ui, |ui| {
                    for option in ColorKey::ALL {
                        ui.selectable_value(&mut key, option, option.label());
                    }
                });
            if key != self.color_key {
                actions.push(ViewAction::ColorBy(key));
            }

            if let Some(feature) = self.color_key.feature() {
                let current = self.store().range(feature).unwrap_or_default();
                let (mut low, mut high) = (current.min(), current.max());
                let response = ui.add(
                    RangeSlider::new(&mut low, &mut high, FEATURE_MIN, FEATURE_MAX)
                        .color(to_color32(feature.color()))
                        .width(180.0),
                );
                ui.label(format!("{low:.0} – {high:.0}"));
                if response.changed() {
                    actions.push(ViewAction::SetRange(feature, FeatureRange::new(low, high)));
                }
            }

            ui.separator();
            ui.label("Mode");
            let mut mode = self.store().mode();
            if ui.add(ModeToggle::new(&mut mode)).changed() {
                actions.push(ViewAction::SetMode(mode));
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use songscope_core::{LassoOutcome, Mode, Platform, Record, RecordId};

    fn dashboard() -> Dashboard {
        let records = (0..20)
            .map(|i| {
                let mode = if i % 2 == 0 { Mode::Major } else { Mode::Minor };
                Record::new(format!("song {i}"), if i < 3 { "Bad Bunny" } else { "Other" })
                    .with_mode(mode)
                    .with_feature(Feature::Energy, f64::from(i) * 5.0)
                    .with_playlists(Platform::Spotify, f64::from(i))
                    .with_projection(f64::from(i), f64::from(i))
            })
            .collect();
        Dashboard::new(Arc::new(Dataset::new(records)), &DashboardConfig::default())
    }

    #[test]
    fn starts_unfiltered() {
        let d = dashboard();
        assert_eq!(d.selected(), 20);
        assert!(d.store().is_empty());
        assert_eq!(d.color_key(), ColorKey::Mode);
    }

    #[test]
    fn filters_intersect() {
        let mut d = dashboard();
        let now = Instant::now();
        d.apply(ViewAction::SetMode(Some(Mode::Major)), now);
        assert_eq!(d.selected(), 10);
        d.apply(ViewAction::SelectArtist("Bad Bunny".into()), now);
        assert_eq!(d.selected(), 2);
        d.apply(ViewAction::Remove(FilterSlot::Mode), now);
        assert_eq!(d.selected(), 3);
        d.apply(ViewAction::ClearArtist, now);
        assert_eq!(d.selected(), 20);
    }

    #[test]
    fn unknown_artist_matches_nothing() {
        let mut d = dashboard();
        d.apply(ViewAction::SelectArtist("Nobody".into()), Instant::now());
        assert_eq!(d.selected(), 0);
        assert_eq!(d.store().artist().map(|a| a.name.as_str()), Some("Nobody"));
    }

    #[test]
    fn lasso_outcomes() {
        let mut d = dashboard();
        let now = Instant::now();
        d.apply(
            ViewAction::Lasso(LassoOutcome::Select(vec![RecordId(1), RecordId(2)])),
            now,
        );
        assert_eq!(d.selected(), 2);
        d.apply(ViewAction::Lasso(LassoOutcome::Select(Vec::new())), now);
        assert_eq!(d.selected(), 0);
        d.apply(ViewAction::Lasso(LassoOutcome::Clear), now);
        assert_eq!(d.selected(), 20);
    }

    #[test]
    fn full_range_removes_slot() {
        let mut d = dashboard();
        let now = Instant::now();
        d.apply(
            ViewAction::SetRange(Feature::Energy, FeatureRange::new(0.0, 20.0)),
            now,
        );
        assert_eq!(d.selected(), 5);
        d.apply(ViewAction::SetRange(Feature::Energy, FeatureRange::full()), now);
        assert!(d.store().range(Feature::Energy).is_none());
        assert_eq!(d.selected(), 20);
    }

    #[test]
    fn cell_click_applies_suggestion_after_delay() {
        let mut d = dashboard();
        let now = Instant::now();
        d.apply(
            ViewAction::CellClicked {
                feature: Feature::Energy,
                platform: Platform::Spotify,
                correlation: 0.8,
            },
            now,
        );
        assert_eq!(d.color_key(), ColorKey::Feature(Feature::Energy));
        assert!(d.store().range(Feature::Energy).is_none());

        d.tick(now + Duration::from_millis(50));
        assert!(d.has_pending_suggestion());
        d.tick(now + SUGGESTION_DELAY);
        assert!(!d.has_pending_suggestion());
        assert_eq!(
            d.store().range(Feature::Energy),
            Some(FeatureRange::new(60.0, 100.0))
        );
    }

    #[test]
    fn suggestion_dropped_when_color_changes() {
        let mut d = dashboard();
        let now = Instant::now();
        d.apply(
            ViewAction::CellClicked {
                feature: Feature::Energy,
                platform: Platform::Spotify,
                correlation: -0.8,
            },
            now,
        );
        d.apply(ViewAction::ColorBy(ColorKey::Mode), now);
        d.tick(now + SUGGESTION_DELAY);
        assert!(d.store().is_empty());
    }

    #[test]
    fn weak_suggestion_removes_range() {
        let mut d = dashboard();
        let now = Instant::now();
        d.apply(
            ViewAction::SetRange(Feature::Energy, FeatureRange::new(10.0, 30.0)),
            now,
        );
        d.apply(
            ViewAction::CellClicked {
                feature: Feature::Energy,
                platform: Platform::Spotify,
                correlation: 0.1,
            },
            now,
        );
        d.tick(now + SUGGESTION_DELAY);
        assert!(d.store().range(Feature::Energy).is_none());
    }

    #[test]
    fn platform_click_highlights_top_tenth() {
        let mut d = dashboard();
        d.apply(ViewAction::HighlightPlatform(Platform::Spotify), Instant::now());
        let universe = d.universe().borrow();
        assert!(universe.is_highlighting());
        // Records 19 and 18 have the most Spotify playlists.
        assert!(universe.target_opacity(RecordId(19)) > universe.target_opacity(RecordId(0)));
        assert_eq!(
            universe.target_opacity(RecordId(18)),
            universe.target_opacity(RecordId(19))
        );
    }

    #[test]
    fn clear_all_resets_everything() {
        let mut d = dashboard();
        let now = Instant::now();
        d.apply(ViewAction::SetMode(Some(Mode::Minor)), now);
        d.apply(ViewAction::SelectArtist("Other".into()), now);
        d.apply(ViewAction::Lasso(LassoOutcome::Select(vec![RecordId(5)])), now);
        d.apply(ViewAction::ClearAll, now);
        assert!(d.store().is_empty());
        assert_eq!(d.selected(), 20);
        assert_eq!(d.search().query(), "");
    }
}
