//! Color model for the six user-facing color spaces plus the XYZ pivot.
//!
//! Provides:
//! - Value types for RGB, HEX, HSL, HSV, CMYK, CIE Lab and CIE XYZ
//! - A tagged [`Color`] wrapper whose variant always matches its value
//! - [`ColorValues`], one color expanded into all six representations
//! - CSS text output for every format
//! - Integration with owo-colors and ratatui

use owo_colors::OwoColorize;
use ratatui::style::Color as RatatuiColor;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

use crate::{convert, error::HuewheelError};

/// Rounds to two decimal places, folding `-0.0` into `0.0`.
#[inline]
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0 + 0.0
}

/// Wraps a hue into `[0, 360)`.
#[inline]
pub(crate) fn normalize_hue(hue: f64) -> f64 {
    let hue = hue.rem_euclid(360.0);
    if hue >= 360.0 {
        0.0
    } else {
        hue
    }
}

#[inline]
fn is_percent(value: f64) -> bool {
    value.is_finite() && (0.0..=100.0).contains(&value)
}

/// 8-bit sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    #[inline]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Get the RGB components
    pub fn components(&self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    /// Convert to owo-colors RGB type
    pub fn to_owo_rgb(&self) -> owo_colors::Rgb {
        owo_colors::Rgb(self.red, self.green, self.blue)
    }

    /// Convert to ratatui Color
    pub fn to_ratatui(&self) -> RatatuiColor {
        RatatuiColor::Rgb(self.red, self.green, self.blue)
    }
}

impl From<Rgb> for owo_colors::Rgb {
    fn from(color: Rgb) -> Self {
        color.to_owo_rgb()
    }
}

impl From<Rgb> for RatatuiColor {
    fn from(color: Rgb) -> Self {
        color.to_ratatui()
    }
}

/// Hexadecimal color string, canonically `#RRGGBB`.
///
/// Holds whatever text it was given; malformed strings are only caught when
/// converted, where they fall back to black.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hex {
    pub hex: String,
}

impl Hex {
    pub fn new(hex: impl Into<String>) -> Self {
        Self { hex: hex.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.hex
    }
}

impl Default for Hex {
    fn default() -> Self {
        Self::new("#000000")
    }
}

/// Hue in degrees, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Hsl {
    #[inline]
    pub const fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.hue.is_finite() && is_percent(self.saturation) && is_percent(self.lightness)
    }
}

/// Hue in degrees, saturation and value in percent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsv {
    pub hue: f64,
    pub saturation: f64,
    pub value: f64,
}

impl Hsv {
    #[inline]
    pub const fn new(hue: f64, saturation: f64, value: f64) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.hue.is_finite() && is_percent(self.saturation) && is_percent(self.value)
    }
}

/// Process color, all channels in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cmyk {
    pub cyan: f64,
    pub magenta: f64,
    pub yellow: f64,
    pub key: f64,
}

impl Cmyk {
    #[inline]
    pub const fn new(cyan: f64, magenta: f64, yellow: f64, key: f64) -> Self {
        Self {
            cyan,
            magenta,
            yellow,
            key,
        }
    }

    pub fn is_valid(&self) -> bool {
        [self.cyan, self.magenta, self.yellow, self.key]
            .into_iter()
            .all(is_percent)
    }
}

impl Default for Cmyk {
    /// Black.
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 100.0)
    }
}

/// CIE L*a*b* relative to D65.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    #[inline]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    pub fn is_valid(&self) -> bool {
        is_percent(self.l) && self.a.is_finite() && self.b.is_finite()
    }
}

/// CIE 1931 XYZ scaled to the D65 reference white. Never user-facing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Xyz {
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// The user-selectable color spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
    #[default]
    Hex,
    Rgb,
    Hsl,
    Hsv,
    Cmyk,
    Lab,
}

impl ColorFormat {
    pub const ALL: [ColorFormat; 6] = [
        ColorFormat::Hex,
        ColorFormat::Rgb,
        ColorFormat::Hsl,
        ColorFormat::Hsv,
        ColorFormat::Cmyk,
        ColorFormat::Lab,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ColorFormat::Hex => "hex",
            ColorFormat::Rgb => "rgb",
            ColorFormat::Hsl => "hsl",
            ColorFormat::Hsv => "hsv",
            ColorFormat::Cmyk => "cmyk",
            ColorFormat::Lab => "lab",
        }
    }

    /// Builds the color of this format from an RGB pivot value.
    pub fn from_rgb(self, rgb: &Rgb) -> Color {
        match self {
            ColorFormat::Hex => Color::Hex(convert::rgb_to_hex(rgb)),
            ColorFormat::Rgb => Color::Rgb(*rgb),
            ColorFormat::Hsl => Color::Hsl(convert::rgb_to_hsl(rgb)),
            ColorFormat::Hsv => Color::Hsv(convert::rgb_to_hsv(rgb)),
            ColorFormat::Cmyk => Color::Cmyk(convert::rgb_to_cmyk(rgb)),
            ColorFormat::Lab => Color::Lab(convert::rgb_to_lab(rgb)),
        }
    }
}

impl Display for ColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorFormat {
    type Err = HuewheelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ColorFormat::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| HuewheelError::unsupported_format(s))
    }
}

/// A color tagged with the space it is expressed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", content = "value", rename_all = "lowercase")]
pub enum Color {
    Hex(Hex),
    Rgb(Rgb),
    Hsl(Hsl),
    Hsv(Hsv),
    Cmyk(Cmyk),
    Lab(Lab),
}

impl Color {
    pub fn format(&self) -> ColorFormat {
        match self {
            Color::Hex(_) => ColorFormat::Hex,
            Color::Rgb(_) => ColorFormat::Rgb,
            Color::Hsl(_) => ColorFormat::Hsl,
            Color::Hsv(_) => ColorFormat::Hsv,
            Color::Cmyk(_) => ColorFormat::Cmyk,
            Color::Lab(_) => ColorFormat::Lab,
        }
    }

    /// Whether every component lies in its declared range.
    pub fn is_valid(&self) -> bool {
        match self {
            Color::Hex(hex) => convert::parse_hex(hex).is_some(),
            Color::Rgb(_) => true,
            Color::Hsl(hsl) => hsl.is_valid(),
            Color::Hsv(hsv) => hsv.is_valid(),
            Color::Cmyk(cmyk) => cmyk.is_valid(),
            Color::Lab(lab) => lab.is_valid(),
        }
    }

    /// Converts to the RGB pivot.
    pub fn to_rgb(&self) -> Rgb {
        match self {
            Color::Hex(hex) => convert::hex_to_rgb(hex),
            Color::Rgb(rgb) => *rgb,
            Color::Hsl(hsl) => convert::hsl_to_rgb(hsl),
            Color::Hsv(hsv) => convert::hsv_to_rgb(hsv),
            Color::Cmyk(cmyk) => convert::cmyk_to_rgb(cmyk),
            Color::Lab(lab) => convert::lab_to_rgb(lab),
        }
    }

    /// Converts into `format`, returning a clone when already there.
    pub fn to_format(&self, format: ColorFormat) -> Color {
        if self.format() == format {
            return self.clone();
        }
        format.from_rgb(&self.to_rgb())
    }
}

impl From<Rgb> for Color {
    fn from(value: Rgb) -> Self {
        Color::Rgb(value)
    }
}

impl From<Hex> for Color {
    fn from(value: Hex) -> Self {
        Color::Hex(value)
    }
}

impl From<Hsl> for Color {
    fn from(value: Hsl) -> Self {
        Color::Hsl(value)
    }
}

impl From<Hsv> for Color {
    fn from(value: Hsv) -> Self {
        Color::Hsv(value)
    }
}

impl From<Cmyk> for Color {
    fn from(value: Cmyk) -> Self {
        Color::Cmyk(value)
    }
}

impl From<Lab> for Color {
    fn from(value: Lab) -> Self {
        Color::Lab(value)
    }
}

/// One color expanded into every user-facing representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorValues {
    pub hex: Hex,
    pub rgb: Rgb,
    pub hsl: Hsl,
    pub hsv: Hsv,
    pub cmyk: Cmyk,
    pub lab: Lab,
}

impl ColorValues {
    /// Expands `color`, keeping its own representation exact.
    ///
    /// Hex is the exception: it is always rewritten as `#RRGGBB`, whatever
    /// spelling the source used.
    pub fn from_color(color: &Color) -> Self {
        let rgb = color.to_rgb();
        let mut values = Self {
            hex: convert::rgb_to_hex(&rgb),
            rgb,
            hsl: convert::rgb_to_hsl(&rgb),
            hsv: convert::rgb_to_hsv(&rgb),
            cmyk: convert::rgb_to_cmyk(&rgb),
            lab: convert::rgb_to_lab(&rgb),
        };
        match color {
            Color::Hex(_) | Color::Rgb(_) => {}
            Color::Hsl(hsl) => values.hsl = *hsl,
            Color::Hsv(hsv) => values.hsv = *hsv,
            Color::Cmyk(cmyk) => values.cmyk = *cmyk,
            Color::Lab(lab) => values.lab = *lab,
        }
        values
    }

    /// The representation for `format`.
    pub fn get(&self, format: ColorFormat) -> Color {
        match format {
            ColorFormat::Hex => Color::Hex(self.hex.clone()),
            ColorFormat::Rgb => Color::Rgb(self.rgb),
            ColorFormat::Hsl => Color::Hsl(self.hsl),
            ColorFormat::Hsv => Color::Hsv(self.hsv),
            ColorFormat::Cmyk => Color::Cmyk(self.cmyk),
            ColorFormat::Lab => Color::Lab(self.lab),
        }
    }
}

impl From<&Color> for ColorValues {
    fn from(color: &Color) -> Self {
        Self::from_color(color)
    }
}

impl Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.red, self.green, self.blue)
    }
}

impl Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex)
    }
}

impl Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({},{}%,{}%)", self.hue, self.saturation, self.lightness)
    }
}

impl Display for Hsv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsv({},{}%,{}%)", self.hue, self.saturation, self.value)
    }
}

impl Display for Cmyk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cmyk({}%,{}%,{}%,{}%)",
            self.cyan, self.magenta, self.yellow, self.key
        )
    }
}

impl Display for Lab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lab({},{},{})", self.l, self.a, self.b)
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Hex(value) => value.fmt(f),
            Color::Rgb(value) => value.fmt(f),
            Color::Hsl(value) => value.fmt(f),
            Color::Hsv(value) => value.fmt(f),
            Color::Cmyk(value) => value.fmt(f),
            Color::Lab(value) => value.fmt(f),
        }
    }
}

/// Extension trait for painting strings as swatches with owo-colors
pub trait SwatchColorize: OwoColorize {
    /// Paint the text on the swatch background with a contrasting foreground
    #[inline]
    fn on_swatch(self, swatch: &ColorValues) -> String
    where
        Self: Sized + Display,
    {
        let (r, g, b) = swatch.rgb.components();
        let (fr, fg, fb) = label_color(swatch).components();
        format!("{}", self.on_truecolor(r, g, b).truecolor(fr, fg, fb))
    }

    /// Apply the swatch color as the foreground
    #[inline]
    fn swatch_fg(self, color: &Color) -> String
    where
        Self: Sized + Display,
    {
        let (r, g, b) = color.to_rgb().components();
        format!("{}", self.truecolor(r, g, b))
    }
}

impl<T: OwoColorize + Display> SwatchColorize for T {}

/// Black or white, whichever reads better on the swatch.
pub fn label_color(swatch: &ColorValues) -> Rgb {
    if swatch.lab.l > 50.0 {
        Rgb::new(0, 0, 0)
    } else {
        Rgb::new(255, 255, 255)
    }
}
