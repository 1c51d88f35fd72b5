//! Colors and sequential palettes.

/// An opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Build from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Linear interpolation in sRGB space. `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb(
            mix(self.0, other.0),
            mix(self.1, other.1),
            mix(self.2, other.2),
        )
    }
}

/// Sequential color ramps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Palette {
    /// Dark purple → yellow.
    Viridis,
    /// Deep blue → yellow through magenta.
    Plasma,
    /// Red → yellow → green (diverging).
    RdYlGn,
    /// Pale yellow → navy.
    YlGnBu,
    /// Rainbow-like ramp with a dark red tail.
    Turbo,
    /// Purple → cyan → lime.
    Cool,
}

const VIRIDIS: &[u32] = &[
    0x440154, 0x482878, 0x3E4989, 0x31688E, 0x26828E, 0x1F9E89, 0x35B779, 0x6ECE58, 0xB5DE2B,
    0xFDE725,
];
const PLASMA: &[u32] = &[
    0x0D0887, 0x46039F, 0x7201A8, 0x9C179E, 0xBD3786, 0xD8576B, 0xED7953, 0xFB9F3A, 0xFDCA26,
    0xF0F921,
];
const RD_YL_GN: &[u32] = &[
    0xA50026, 0xD73027, 0xF46D43, 0xFDAE61, 0xFEE08B, 0xFFFFBF, 0xD9EF8B, 0xA6D96A, 0x66BD63,
    0x1A9850, 0x006837,
];
const YL_GN_BU: &[u32] = &[
    0xFFFFD9, 0xEDF8B1, 0xC7E9B4, 0x7FCDBB, 0x41B6C4, 0x1D91C0, 0x225EA8, 0x253494, 0x081D58,
];
const TURBO: &[u32] = &[
    0x30123B, 0x4662D7, 0x36AAF9, 0x1AE4B6, 0x72FE5E, 0xC7EF34, 0xFBB938, 0xF66B19, 0xCB2A04,
    0x7A0403,
];
const COOL: &[u32] = &[
    0x6E40AA, 0x6054C8, 0x4C6EDB, 0x368CE1, 0x23ABD8, 0x1AC7C2, 0x1DDFA3, 0x30EF82, 0x52F667,
    0x7FF658, 0xAFF05B,
];

impl Palette {
    fn stops(self) -> &'static [u32] {
        match self {
            Palette::Viridis => VIRIDIS,
            Palette::Plasma => PLASMA,
            Palette::RdYlGn => RD_YL_GN,
            Palette::YlGnBu => YL_GN_BU,
            Palette::Turbo => TURBO,
            Palette::Cool => COOL,
        }
    }

    /// Sample the ramp at `t` in `[0, 1]` (clamped; NaN maps to the start).
    pub fn sample(self, t: f32) -> Rgb {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let scaled = t * (stops.len() - 1) as f32;
        let i = (scaled.floor() as usize).min(stops.len() - 2);
        let frac = scaled - i as f32;
        Rgb::from_hex(stops[i]).lerp(Rgb::from_hex(stops[i + 1]), frac)
    }

    /// Sample with a value in the `[0, 100]` feature domain.
    pub fn sample_percent(self, value: f64) -> Rgb {
        self.sample((value / 100.0) as f32)
    }
}
