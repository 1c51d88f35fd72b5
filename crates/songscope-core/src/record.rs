//! Song records and their identifiers.
//!
//! Records arrive as flat JSON objects whose numeric columns are not always
//! numbers: counts may be strings with thousands separators and some cells are
//! blank. Every numeric field is therefore parsed leniently into `Option<f64>`,
//! and a value that cannot be read becomes `None` rather than failing the load.

use serde::Deserialize;
use serde::de::IgnoredAny;
use songscope_registry::{Feature, Mode, Platform};

/// Stable surrogate identifier of a record: its position in the loaded array.
///
/// Song titles and artist names are not unique, so every filter slot stores
/// ids rather than names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(pub u32);

impl RecordId {
    /// Build from a dataset index.
    pub fn from_index(index: usize) -> Self {
        RecordId(index as u32)
    }

    /// Position in the dataset.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One song of the dataset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawRecord")]
pub struct Record {
    /// Song title.
    pub track_name: String,
    /// Raw artist credit, possibly a comma-separated list of co-artists.
    pub artists: String,
    /// Musical mode, if the row carries a recognised label.
    pub mode: Option<Mode>,
    /// Total stream count.
    pub streams: Option<f64>,
    /// Precomputed 2D projection coordinates (`tsne_1`, `tsne_2`).
    pub projection: Option<(f64, f64)>,
    features: [Option<f64>; Feature::ALL.len()],
    playlists: [Option<f64>; Platform::ALL.len()],
}

impl Record {
    /// A record with the given title and artist credit and no numeric values.
    pub fn new(track_name: impl Into<String>, artists: impl Into<String>) -> Self {
        Self {
            track_name: track_name.into(),
            artists: artists.into(),
            mode: None,
            streams: None,
            projection: None,
            features: [None; Feature::ALL.len()],
            playlists: [None; Platform::ALL.len()],
        }
    }

    /// Set one feature value.
    pub fn with_feature(mut self, feature: Feature, value: f64) -> Self {
        self.features[feature as usize] = Some(value);
        self
    }

    /// Set the mode.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Set one platform's playlist count.
    pub fn with_playlists(mut self, platform: Platform, count: f64) -> Self {
        self.playlists[platform as usize] = Some(count);
        self
    }

    /// Set the stream count.
    pub fn with_streams(mut self, streams: f64) -> Self {
        self.streams = Some(streams);
        self
    }

    /// Set the projection coordinates.
    pub fn with_projection(mut self, x: f64, y: f64) -> Self {
        self.projection = Some((x, y));
        self
    }

    /// Value of a feature, `None` when the cell was missing or unreadable.
    pub fn feature(&self, feature: Feature) -> Option<f64> {
        self.features[feature as usize]
    }

    /// Playlist count on a platform.
    pub fn playlists(&self, platform: Platform) -> Option<f64> {
        self.playlists[platform as usize]
    }

    /// Individual artist names: the credit split on `,` and trimmed.
    pub fn artist_names(&self) -> impl Iterator<Item = &str> {
        self.artists
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// A JSON cell that may hold a number, a numeric string, or anything else.
#[derive(Deserialize)]
#[serde(untagged)]
enum Cell {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

impl Cell {
    fn number(self) -> Option<f64> {
        let value = match self {
            Cell::Number(n) => n,
            Cell::Text(s) => s.trim().replace(',', "").parse().ok()?,
            Cell::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }

    fn text(self) -> Option<String> {
        match self {
            Cell::Number(n) => Some(n.to_string()),
            Cell::Text(s) => Some(s),
            Cell::Other(_) => None,
        }
    }
}

#[derive(Deserialize)]
struct RawRecord {
    #[serde(default)]
    track_name: Option<Cell>,
    #[serde(default, rename = "artist(s)_name")]
    artists: Option<Cell>,
    #[serde(default)]
    mode: Option<Cell>,
    #[serde(default, rename = "danceability_%")]
    danceability: Option<Cell>,
    #[serde(default, rename = "energy_%")]
    energy: Option<Cell>,
    #[serde(default, rename = "valence_%")]
    valence: Option<Cell>,
    #[serde(default, rename = "acousticness_%")]
    acousticness: Option<Cell>,
    #[serde(default, rename = "speechiness_%")]
    speechiness: Option<Cell>,
    #[serde(default, rename = "liveness_%")]
    liveness: Option<Cell>,
    #[serde(default)]
    streams: Option<Cell>,
    #[serde(default)]
    in_spotify_playlists: Option<Cell>,
    #[serde(default)]
    in_apple_playlists: Option<Cell>,
    #[serde(default)]
    in_deezer_playlists: Option<Cell>,
    #[serde(default)]
    tsne_1: Option<Cell>,
    #[serde(default)]
    tsne_2: Option<Cell>,
}

fn number(cell: Option<Cell>) -> Option<f64> {
    cell.and_then(Cell::number)
}

impl From<RawRecord> for Record {
    fn from(raw: RawRecord) -> Self {
        // Order follows `Feature::ALL` and `Platform::ALL`.
        let features = [
            number(raw.danceability),
            number(raw.energy),
            number(raw.valence),
            number(raw.acousticness),
            number(raw.speechiness),
            number(raw.liveness),
        ];
        let playlists = [
            number(raw.in_spotify_playlists),
            number(raw.in_apple_playlists),
            number(raw.in_deezer_playlists),
        ];
        let projection = number(raw.tsne_1).zip(number(raw.tsne_2));

        Self {
            track_name: raw.track_name.and_then(Cell::text).unwrap_or_default(),
            artists: raw.artists.and_then(Cell::text).unwrap_or_default(),
            mode: raw
                .mode
                .and_then(Cell::text)
                .and_then(|label| Mode::from_label(&label)),
            streams: number(raw.streams),
            projection,
            features,
            playlists,
        }
    }
}
