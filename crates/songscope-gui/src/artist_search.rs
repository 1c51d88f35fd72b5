//! Artist search box with a keyboard-navigable suggestion list.
//!
//! The state machine is kept apart from rendering so it can be driven
//! from tests: [`ArtistSearch::set_query`], [`ArtistSearch::key`] and
//! [`ArtistSearch::choose`] return the [`ViewAction`] the dashboard should
//! apply, if any.

use std::time::Duration;

use egui::text::LayoutJob;
use egui::{Color32, FontId, Key, RichText, TextFormat, Ui, vec2};
use songscope_core::{ArtistIndex, ArtistMatch, match_ranges};

use crate::Instant;
use crate::theme::Theme;
use crate::views::{ViewAction, songs_label};

/// How long the list stays up after the box loses focus, so a click on a
/// suggestion still lands.
pub const BLUR_DELAY: Duration = Duration::from_millis(150);

/// Keys the search box reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKey {
    /// Move the active suggestion down.
    Down,
    /// Move the active suggestion up, past the first to none.
    Up,
    /// Pick the active suggestion.
    Enter,
    /// Hide the list and leave the box.
    Escape,
}

impl SearchKey {
    /// Whether the box gives up keyboard focus after this key.
    pub fn releases_focus(self) -> bool {
        self == SearchKey::Escape
    }
}

/// Search box state.
#[derive(Debug, Clone)]
pub struct ArtistSearch {
    query: String,
    suggestions: Vec<ArtistMatch>,
    active: Option<usize>,
    open: bool,
    close_at: Option<Instant>,
    limit: usize,
}

impl ArtistSearch {
    /// Empty search box showing at most `limit` suggestions.
    pub fn new(limit: usize) -> Self {
        Self {
            query: String::new(),
            suggestions: Vec::new(),
            active: None,
            open: false,
            close_at: None,
            limit,
        }
    }

    /// Current text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current suggestions, most prolific first.
    pub fn suggestions(&self) -> &[ArtistMatch] {
        &self.suggestions
    }

    /// Index of the keyboard-highlighted suggestion.
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Whether the list is showing.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The text changed. Matching ignores surrounding whitespace; a blank
    /// box clears the artist filter.
    pub fn set_query(&mut self, text: &str, index: &ArtistIndex) -> Option<ViewAction> {
        self.query = text.to_owned();
        self.active = None;
        self.close_at = None;
        let needle = text.trim();
        if needle.is_empty() {
            self.suggestions.clear();
            self.open = false;
            return Some(ViewAction::ClearArtist);
        }
        self.suggestions = index.suggest(needle, self.limit);
        self.open = true;
        None
    }

    /// The inline clear button: empty the box and drop the artist filter.
    pub fn clear(&mut self) -> ViewAction {
        self.reset();
        ViewAction::ClearArtist
    }

    /// A navigation key was pressed while the box had focus.
    pub fn key(&mut self, key: SearchKey) -> Option<ViewAction> {
        let len = self.suggestions.len();
        match key {
            SearchKey::Down => {
                if len > 0 {
                    self.active = Some(self.active.map_or(0, |i| (i + 1).min(len - 1)));
                }
                None
            }
            SearchKey::Up => {
                self.active = self.active.and_then(|i| i.checked_sub(1));
                None
            }
            SearchKey::Enter => match (self.active, len) {
                (Some(i), _) => self.choose(i),
                (None, 1) => self.choose(0),
                _ => None,
            },
            SearchKey::Escape => {
                self.open = false;
                self.active = None;
                None
            }
        }
    }

    /// Pick suggestion `i`: its name fills the box and becomes the filter.
    pub fn choose(&mut self, i: usize) -> Option<ViewAction> {
        let name = self.suggestions.get(i)?.name.clone();
        self.query.clone_from(&name);
        self.open = false;
        self.active = None;
        self.close_at = None;
        Some(ViewAction::SelectArtist(name))
    }

    /// The box gained focus: show the list again if there is text.
    pub fn focus(&mut self) {
        self.close_at = None;
        if !self.query.trim().is_empty() {
            self.open = true;
        }
    }

    /// The box lost focus: hide the list after [`BLUR_DELAY`].
    pub fn blur(&mut self, now: Instant) {
        if self.open {
            self.close_at = Some(now + BLUR_DELAY);
        }
    }

    /// Close the list once a pending blur has elapsed. Returns true while a
    /// close is still pending.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.close_at {
            Some(at) if now >= at => {
                self.open = false;
                self.active = None;
                self.close_at = None;
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    /// Empty the box without emitting anything (all filters were cleared).
    pub fn reset(&mut self) {
        self.query.clear();
        self.suggestions.clear();
        self.open = false;
        self.active = None;
        self.close_at = None;
    }

    /// Render the box and its dropdown.
    pub fn ui(
        &mut self,
        ui: &mut Ui,
        index: &ArtistIndex,
        theme: &Theme,
        now: Instant,
        actions: &mut Vec<ViewAction>,
    ) {
        if self.tick(now) {
            ui.ctx().request_repaint_after(BLUR_DELAY);
        }

        let mut text = self.query.clone();
        let mut cleared = false;
        let response = ui
            .horizontal(|ui| {
                let edit = ui.add(
                    egui::TextEdit::singleline(&mut text)
                        .hint_text("Search artists...")
                        .desired_width(200.0),
                );
                if !self.query.is_empty()
                    && ui
                        .small_button("×")
                        .on_hover_text("Clear search")
                        .clicked()
                {
                    cleared = true;
                }
                edit
            })
            .inner;

        if cleared {
            actions.push(self.clear());
            return;
        }

        if response.changed() {
            actions.extend(self.set_query(&text, index));
        }
        if response.gained_focus() {
            self.focus();
        }
        if response.has_focus() || response.lost_focus() {
            let pressed = ui.input(|i| {
                [
                    (Key::ArrowDown, SearchKey::Down),
                    (Key::ArrowUp, SearchKey::Up),
                    (Key::Enter, SearchKey::Enter),
                    (Key::Escape, SearchKey::Escape),
                ]
                .into_iter()
                .filter(|(k, _)| i.key_pressed(*k))
                .map(|(_, key)| key)
                .collect::<Vec<_>>()
            });
            for key in pressed {
                actions.extend(self.key(key));
                if key.releases_focus() {
                    response.surrender_focus();
                }
            }
        }
        if response.lost_focus() {
            self.blur(now);
            ui.ctx().request_repaint_after(BLUR_DELAY);
        }

        if !self.open {
            return;
        }

        let chosen = egui::Area::new(response.id.with("suggestions"))
            .order(egui::Order::Foreground)
            .fixed_pos(response.rect.left_bottom() + vec2(0.0, 2.0))
            .show(ui.ctx(), |ui| {
                egui::Frame::popup(ui.style())
                    .show(ui, |ui| self.dropdown(ui, theme))
                    .inner
            })
            .inner;
        if let Some(i) = chosen {
            actions.extend(self.choose(i));
        }
    }

    fn dropdown(&self, ui: &mut Ui, theme: &Theme) -> Option<usize> {
        ui.set_min_width(220.0);
        let header = match self.suggestions.len() {
            0 => "No artists found".to_string(),
            1 => "1 artist found".to_string(),
            n => format!("{n} artists found"),
        };
        ui.label(RichText::new(header).small().color(theme.text_secondary));

        let mut chosen = None;
        for (i, suggestion) in self.suggestions.iter().enumerate() {
            ui.horizontal(|ui| {
                let job = highlighted(&suggestion.name, self.query.trim(), theme);
                if ui.selectable_label(self.active == Some(i), job).clicked() {
                    chosen = Some(i);
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        RichText::new(songs_label(suggestion.count))
                            .small()
                            .color(theme.text_secondary),
                    );
                });
            });
        }
        chosen
    }
}

/// Split `name` into runs, flagging the runs that match `query`.
pub fn segments<'a>(name: &'a str, query: &str) -> Vec<(&'a str, bool)> {
    let mut out = Vec::new();
    let mut last = 0;
    for range in match_ranges(name, query) {
        if range.start > last {
            out.push((&name[last..range.start], false));
        }
        out.push((&name[range.clone()], true));
        last = range.end;
    }
    if last < name.len() {
        out.push((&name[last..], false));
    }
    out
}

fn highlighted(name: &str, query: &str, theme: &Theme) -> LayoutJob {
    let mut job = LayoutJob::default();
    for (text, matched) in segments(name, query) {
        let format = if matched {
            TextFormat {
                font_id: FontId::proportional(13.0),
                color: theme.hover,
                background: theme.accent.gamma_multiply(0.35),
                ..Default::default()
            }
        } else {
            TextFormat {
                font_id: FontId::proportional(13.0),
                color: theme.text_primary,
                background: Color32::TRANSPARENT,
                ..Default::default()
            }
        };
        job.append(text, 0.0, format);
    }
    job
}
