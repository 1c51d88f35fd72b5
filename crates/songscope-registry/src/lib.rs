//! Feature, platform, and color registry for the songscope dashboard.
//!
//! This crate is the single lookup table mapping dataset field names to
//! display labels and colors. It holds no state: every query is answered from
//! static descriptor tables, so any crate in the workspace can depend on it
//! without pulling in the GUI stack.
//!
//! # Features
//!
//! - **Audio features**: the six `[0, 100]` percentages every song carries
//! - **Modes**: the categorical major/minor field
//! - **Platforms**: playlist-presence columns per streaming service
//! - **Palettes**: sequential color ramps used to color points by feature
//!
//! # Example
//!
//! ```rust
//! use songscope_registry::{ColorKey, Feature, Platform};
//!
//! // Resolve a dataset column name
//! let energy = Feature::from_id("energy_%").unwrap();
//! assert_eq!(energy.name(), "Energy");
//!
//! // Sample the feature's palette at 50%
//! let mid = energy.palette().sample(0.5);
//! println!("energy midpoint color: {mid:?}");
//!
//! // Color-mode keys round-trip through their ids
//! assert_eq!(ColorKey::from_id("mode"), Some(ColorKey::Mode));
//! assert_eq!(Platform::Spotify.playlist_column(), "in_spotify_playlists");
//! ```

mod palette;

pub use palette::{Palette, Rgb};

/// Neutral color for keys that have no registered color.
pub const FALLBACK_COLOR: Rgb = Rgb::from_hex(0x666666);

/// Lower bound of every feature's value domain.
pub const FEATURE_MIN: f64 = 0.0;

/// Upper bound of every feature's value domain.
pub const FEATURE_MAX: f64 = 100.0;

/// A continuous audio feature, expressed as a percentage in `[0, 100]`.
///
/// Variants are declared in radar-axis order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Feature {
    /// How suitable a track is for dancing.
    Danceability,
    /// Perceived intensity and activity.
    Energy,
    /// Musical positiveness ("happiness").
    Valence,
    /// Confidence that the track is acoustic.
    Acousticness,
    /// Presence of spoken words.
    Speechiness,
    /// Presence of a live audience.
    Liveness,
}

/// Describes one audio feature in the registry.
#[derive(Debug, Clone)]
pub struct FeatureDescriptor {
    /// The feature this entry describes.
    pub feature: Feature,
    /// Dataset column name (e.g. `"energy_%"`).
    pub id: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Compact label shown next to the range slider.
    pub short_label: &'static str,
    /// Brief description for tooltips.
    pub description: &'static str,
    /// Row label in the platform-comparison heatmap.
    pub trait_label: &'static str,
    /// Accent color used for chips, axes, and summary dots.
    pub color: Rgb,
    /// Sequential palette used when points are colored by this feature.
    pub palette: Palette,
}

static FEATURES: [FeatureDescriptor; 6] = [
    FeatureDescriptor {
        feature: Feature::Danceability,
        id: "danceability_%",
        name: "Danceability",
        short_label: "Dance:",
        description: "How suitable a track is for dancing",
        trait_label: "Danceable",
        color: Rgb::from_hex(0x6A51A3),
        palette: Palette::Plasma,
    },
    FeatureDescriptor {
        feature: Feature::Energy,
        id: "energy_%",
        name: "Energy",
        short_label: "Energy:",
        description: "Perceived intensity and activity",
        trait_label: "High Energy",
        color: Rgb::from_hex(0xCB181D),
        palette: Palette::Viridis,
    },
    FeatureDescriptor {
        feature: Feature::Valence,
        id: "valence_%",
        name: "Valence",
        short_label: "Happy:",
        description: "Musical positiveness conveyed by the track",
        trait_label: "Happy/Positive",
        color: Rgb::from_hex(0x238B45),
        palette: Palette::RdYlGn,
    },
    FeatureDescriptor {
        feature: Feature::Acousticness,
        id: "acousticness_%",
        name: "Acousticness",
        short_label: "Acoustic:",
        description: "Confidence that the track is acoustic",
        trait_label: "Acoustic",
        color: Rgb::from_hex(0x2171B5),
        palette: Palette::YlGnBu,
    },
    FeatureDescriptor {
        feature: Feature::Speechiness,
        id: "speechiness_%",
        name: "Speechiness",
        short_label: "Speech:",
        description: "Presence of spoken words",
        trait_label: "Lyric-Heavy",
        color: Rgb::from_hex(0x6A5ACD),
        palette: Palette::Cool,
    },
    FeatureDescriptor {
        feature: Feature::Liveness,
        id: "liveness_%",
        name: "Liveness",
        short_label: "Live:",
        description: "Presence of a live audience in the recording",
        trait_label: "Live",
        color: Rgb::from_hex(0xE6550D),
        palette: Palette::Turbo,
    },
];

impl Feature {
    /// All features in radar-axis order.
    pub const ALL: [Feature; 6] = [
        Feature::Danceability,
        Feature::Energy,
        Feature::Valence,
        Feature::Acousticness,
        Feature::Speechiness,
        Feature::Liveness,
    ];

    /// Returns the registry entry for this feature.
    pub fn descriptor(self) -> &'static FeatureDescriptor {
        &FEATURES[self as usize]
    }

    /// Dataset column name.
    pub fn id(self) -> &'static str {
        self.descriptor().id
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Compact slider label.
    pub fn short_label(self) -> &'static str {
        self.descriptor().short_label
    }

    /// Heatmap row label.
    pub fn trait_label(self) -> &'static str {
        self.descriptor().trait_label
    }

    /// Accent color.
    pub fn color(self) -> Rgb {
        self.descriptor().color
    }

    /// Sequential palette for point coloring.
    pub fn palette(self) -> Palette {
        self.descriptor().palette
    }

    /// Look up a feature by dataset column name.
    pub fn from_id(id: &str) -> Option<Feature> {
        FEATURES.iter().find(|d| d.id == id).map(|d| d.feature)
    }
}

/// Returns descriptors for all registered features, in radar-axis order.
pub fn all_features() -> &'static [FeatureDescriptor] {
    &FEATURES
}

/// The categorical musical mode of a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mode {
    /// Major key.
    Major,
    /// Minor key.
    Minor,
}

impl Mode {
    /// Both modes in legend order.
    pub const ALL: [Mode; 2] = [Mode::Major, Mode::Minor];

    /// Label as stored in the dataset.
    pub const fn label(self) -> &'static str {
        match self {
            Mode::Major => "Major",
            Mode::Minor => "Minor",
        }
    }

    /// Categorical point color.
    pub const fn color(self) -> Rgb {
        match self {
            Mode::Major => Rgb::from_hex(0xFF8C00),
            Mode::Minor => Rgb::from_hex(0x4169E1),
        }
    }

    /// Parse a dataset label. Matching is exact, as in the source data.
    pub fn from_label(label: &str) -> Option<Mode> {
        match label {
            "Major" => Some(Mode::Major),
            "Minor" => Some(Mode::Minor),
            _ => None,
        }
    }
}

/// What the projection view colors its points by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorKey {
    /// Color by the categorical mode field.
    #[default]
    Mode,
    /// Color by a continuous feature.
    Feature(Feature),
}

impl ColorKey {
    /// All color keys in selector order.
    pub const ALL: [ColorKey; 7] = [
        ColorKey::Mode,
        ColorKey::Feature(Feature::Energy),
        ColorKey::Feature(Feature::Danceability),
        ColorKey::Feature(Feature::Valence),
        ColorKey::Feature(Feature::Acousticness),
        ColorKey::Feature(Feature::Liveness),
        ColorKey::Feature(Feature::Speechiness),
    ];

    /// Identifier (`"mode"` or the feature's column name).
    pub fn id(self) -> &'static str {
        match self {
            ColorKey::Mode => "mode",
            ColorKey::Feature(f) => f.id(),
        }
    }

    /// Selector label.
    pub fn label(self) -> &'static str {
        match self {
            ColorKey::Mode => "Mode (Major/Minor)",
            ColorKey::Feature(f) => f.name(),
        }
    }

    /// Accent color for the key itself.
    pub fn color(self) -> Rgb {
        match self {
            ColorKey::Mode => Rgb::from_hex(0x764BA2),
            ColorKey::Feature(f) => f.color(),
        }
    }

    /// The feature, if this key is continuous.
    pub fn feature(self) -> Option<Feature> {
        match self {
            ColorKey::Mode => None,
            ColorKey::Feature(f) => Some(f),
        }
    }

    /// Parse an identifier.
    pub fn from_id(id: &str) -> Option<ColorKey> {
        if id == "mode" {
            Some(ColorKey::Mode)
        } else {
            Feature::from_id(id).map(ColorKey::Feature)
        }
    }
}

/// A streaming platform whose playlist presence the dataset records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Platform {
    /// Spotify.
    Spotify,
    /// Apple Music.
    AppleMusic,
    /// Deezer.
    Deezer,
}

impl Platform {
    /// All platforms in chart order.
    pub const ALL: [Platform; 3] = [Platform::Spotify, Platform::AppleMusic, Platform::Deezer];

    /// Display label.
    pub const fn label(self) -> &'static str {
        match self {
            Platform::Spotify => "Spotify",
            Platform::AppleMusic => "Apple Music",
            Platform::Deezer => "Deezer",
        }
    }

    /// Dataset column holding the playlist count.
    pub const fn playlist_column(self) -> &'static str {
        match self {
            Platform::Spotify => "in_spotify_playlists",
            Platform::AppleMusic => "in_apple_playlists",
            Platform::Deezer => "in_deezer_playlists",
        }
    }

    /// Brand color.
    pub const fn color(self) -> Rgb {
        match self {
            Platform::Spotify => Rgb::from_hex(0x1DB954),
            Platform::AppleMusic => Rgb::from_hex(0xFA243C),
            Platform::Deezer => Rgb::from_hex(0xFF0092),
        }
    }

    /// Look up a platform by its display label.
    pub fn from_label(label: &str) -> Option<Platform> {
        Platform::ALL.into_iter().find(|p| p.label() == label)
    }
}

/// Color registered for a field id, or [`FALLBACK_COLOR`].
pub fn field_color(id: &str) -> Rgb {
    ColorKey::from_id(id).map_or(FALLBACK_COLOR, ColorKey::color)
}
