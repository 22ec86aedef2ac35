//! Color scale for weight-based node coloring
//!
//! Maps a numeric value onto a two-sided linear RGB scale: the range
//! `[min, threshold]` runs from the base color to white and
//! `[threshold, max]` runs from white to the end color. Interpolation is
//! per-channel in RGB space, truncated to integers.
//!
//! Also provides the HSV helpers used to derive alternate palettes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An RGB color, written as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// Create a color from its channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` hex string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#')?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Lowercase `#rrggbb` representation
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Color {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s).ok_or_else(|| {
            crate::Error::InvalidInput(format!("invalid color '{}': expected #RRGGBB", s))
        })
    }
}

impl TryFrom<String> for Color {
    type Error = crate::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Map `value` onto the scale `base -> white -> end`.
///
/// Returns `None` when there is no usable range (`min >= max`, or a NaN
/// bound/value). When both colors are equal every value maps to `base`.
/// Values at or beyond the range ends clamp to the endpoint colors.
pub fn value_to_color(
    value: f64,
    min: f64,
    max: f64,
    threshold: f64,
    base: Color,
    end: Color,
) -> Option<Color> {
    if min.is_nan() || max.is_nan() || min >= max {
        return None;
    }
    if base == end {
        return Some(base);
    }
    if value.is_nan() || threshold.is_nan() {
        return None;
    }
    if value <= min {
        return Some(base);
    }
    if value >= max {
        return Some(end);
    }

    let threshold = threshold.clamp(min, max);
    let (from, to, lo, hi) = if value <= threshold {
        (base, Color::WHITE, min, threshold)
    } else {
        (Color::WHITE, end, threshold, max)
    };

    let percent = (value - lo) / (hi - lo);
    Some(interpolate(from, to, percent))
}

fn interpolate(from: Color, to: Color, percent: f64) -> Color {
    let channel = |a: u8, b: u8| {
        let a = a as f64;
        let b = b as f64;
        (a + percent * (b - a)).trunc().clamp(0.0, 255.0) as u8
    };
    Color::rgb(
        channel(from.r, to.r),
        channel(from.g, to.g),
        channel(from.b, to.b),
    )
}

/// Hue of a color in degrees, normalized to `[0, 360)`. Grays have hue 0.
pub fn rgb_to_hue(color: Color) -> f64 {
    let r = color.r as f64;
    let g = color.g as f64;
    let b = color.b as f64;

    let cmax = r.max(g).max(b);
    let cmin = r.min(g).min(b);
    let delta = cmax - cmin;
    if delta == 0.0 {
        return 0.0;
    }

    let hue = if cmax == r {
        60.0 * (((g - b) / delta) % 6.0)
    } else if cmax == g {
        60.0 * (((b - r) / delta) + 2.0)
    } else {
        60.0 * (((r - g) / delta) + 4.0)
    };
    normalize_hue(hue)
}

/// Convert HSV to RGB using the six-sector formula.
///
/// Hue is normalized to `[0, 360)`; saturation and value are clamped to `[0, 1]`.
pub fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> Color {
    let s = saturation.clamp(0.0, 1.0);
    let v = value.clamp(0.0, 1.0);
    let to_channel = |x: f64| (x * 255.0).trunc().clamp(0.0, 255.0) as u8;

    if s == 0.0 {
        let c = to_channel(v);
        return Color::rgb(c, c, c);
    }

    let h = normalize_hue(hue) / 60.0;
    let sector = h.floor();
    let f = h - sector;

    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    let (r, g, b) = match sector as u8 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    Color::rgb(to_channel(r), to_channel(g), to_channel(b))
}

fn normalize_hue(hue: f64) -> f64 {
    if !hue.is_finite() {
        return 0.0;
    }
    let h = hue.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if h >= 360.0 { 0.0 } else { h }
}

/// `count` fully saturated colors evenly spaced in hue, starting at `start`'s hue
pub fn hue_palette(start: Color, count: usize) -> Vec<Color> {
    if count == 0 {
        return Vec::new();
    }
    let origin = rgb_to_hue(start);
    let step = 360.0 / count as f64;
    (0..count)
        .map(|i| hsv_to_rgb(origin + step * i as f64, 1.0, 1.0))
        .collect()
}

/// Observed range of a weight, used to pre-fill a color scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightRange {
    pub min: f64,
    pub max: f64,
}

impl WeightRange {
    /// Range of the finite values in `values`, if any
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |range, v| match range {
                None => Some(WeightRange { min: v, max: v }),
                Some(r) => Some(WeightRange {
                    min: r.min.min(v),
                    max: r.max.max(v),
                }),
            })
    }

    /// Value halfway between min and max
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Threshold at `percent` (0-100) of the way from min to max
    pub fn threshold_at(&self, percent: f64) -> f64 {
        self.min + percent.clamp(0.0, 100.0) * (self.max - self.min) / 100.0
    }

    /// A range with no width cannot drive a color scale
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }
}
