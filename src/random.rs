//! Random colors in every format, plus saturation/lightness pair draws.
//!
//! Every generator takes the RNG it draws from, so callers decide seeding and
//! nothing here holds state between calls.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::{
    colors::{Cmyk, Color, ColorFormat, Hex, Hsl, Hsv, Lab, Rgb},
    config::LimitConfig,
    convert,
};

/// Flags that shape randomly drawn colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationFlags {
    /// Keep saturation above the gray floor and lightness above the dark floor.
    pub limit_gray_and_black: bool,
    /// Keep lightness below the light ceiling.
    pub limit_light: bool,
    /// Recorded on palettes; colors themselves carry no alpha.
    pub enable_alpha: bool,
}

impl GenerationFlags {
    pub const fn limited() -> Self {
        Self {
            limit_gray_and_black: true,
            limit_light: true,
            enable_alpha: false,
        }
    }
}

/// A saturation and lightness pair, in percent.
///
/// Also used for saturation/value since the limiting rules are the same.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SlPair {
    pub saturation: f64,
    pub lightness: f64,
}

impl SlPair {
    pub const fn new(saturation: f64, lightness: f64) -> Self {
        Self {
            saturation,
            lightness,
        }
    }

    pub fn clamped(self) -> Self {
        Self::new(
            self.saturation.clamp(0.0, 100.0),
            self.lightness.clamp(0.0, 100.0),
        )
    }

    /// Runs the enabled limiters over the pair.
    pub fn limited(self, flags: &GenerationFlags, limits: &LimitConfig) -> Self {
        let mut pair = self;
        if flags.limit_gray_and_black {
            pair = apply_limit_gray_and_black(pair, limits);
        }
        if flags.limit_light {
            pair.lightness = apply_limit_light(pair.lightness, limits);
        }
        pair
    }
}

/// Raises saturation to the gray floor and lightness to the dark floor.
pub fn apply_limit_gray_and_black(pair: SlPair, limits: &LimitConfig) -> SlPair {
    SlPair::new(
        pair.saturation.max(limits.gray_saturation_floor),
        pair.lightness.max(limits.dark_lightness_floor),
    )
}

/// Caps lightness at the light ceiling.
pub fn apply_limit_light(lightness: f64, limits: &LimitConfig) -> f64 {
    lightness.min(limits.light_lightness_ceiling)
}

fn random_percent<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(0..=100u8) as f64
}

fn random_hue<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(0..360u16) as f64
}

pub fn random_sl<R: Rng + ?Sized>(
    rng: &mut R,
    flags: &GenerationFlags,
    limits: &LimitConfig,
) -> SlPair {
    SlPair::new(random_percent(rng), random_percent(rng))
        .clamped()
        .limited(flags, limits)
}

/// Same draw as [`random_sl`]; the second component is HSV value.
pub fn random_sv<R: Rng + ?Sized>(
    rng: &mut R,
    flags: &GenerationFlags,
    limits: &LimitConfig,
) -> SlPair {
    random_sl(rng, flags, limits)
}

pub fn random_rgb<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    Rgb::new(rng.gen(), rng.gen(), rng.gen())
}

pub fn random_hex<R: Rng + ?Sized>(rng: &mut R) -> Hex {
    convert::rgb_to_hex(&random_rgb(rng))
}

pub fn random_hsl<R: Rng + ?Sized>(
    rng: &mut R,
    flags: &GenerationFlags,
    limits: &LimitConfig,
) -> Hsl {
    let hue = random_hue(rng);
    let sl = random_sl(rng, flags, limits);
    Hsl::new(hue, sl.saturation, sl.lightness)
}

pub fn random_hsv<R: Rng + ?Sized>(
    rng: &mut R,
    flags: &GenerationFlags,
    limits: &LimitConfig,
) -> Hsv {
    let hue = random_hue(rng);
    let sv = random_sv(rng, flags, limits);
    Hsv::new(hue, sv.saturation, sv.lightness)
}

pub fn random_cmyk<R: Rng + ?Sized>(rng: &mut R) -> Cmyk {
    Cmyk::new(
        random_percent(rng),
        random_percent(rng),
        random_percent(rng),
        random_percent(rng),
    )
}

/// L in [0, 100]; a and b in [-128, 127], two decimals.
pub fn random_lab<R: Rng + ?Sized>(rng: &mut R) -> Lab {
    let l = rng.gen_range(0..=10_000u32) as f64 / 100.0;
    let a = rng.gen_range(-12_800..=12_700i32) as f64 / 100.0;
    let b = rng.gen_range(-12_800..=12_700i32) as f64 / 100.0;
    Lab::new(l, a, b)
}

/// Signature shared by every entry of [`RANDOMIZERS`].
pub type Randomizer = fn(&mut dyn RngCore, &GenerationFlags, &LimitConfig) -> Color;

/// Format to generator lookup used by every caller that needs a random color.
pub const RANDOMIZERS: [(ColorFormat, Randomizer); 6] = [
    (ColorFormat::Hex, |rng, _, _| Color::Hex(random_hex(rng))),
    (ColorFormat::Rgb, |rng, _, _| Color::Rgb(random_rgb(rng))),
    (ColorFormat::Hsl, |rng, flags, limits| {
        Color::Hsl(random_hsl(rng, flags, limits))
    }),
    (ColorFormat::Hsv, |rng, flags, limits| {
        Color::Hsv(random_hsv(rng, flags, limits))
    }),
    (ColorFormat::Cmyk, |rng, _, _| Color::Cmyk(random_cmyk(rng))),
    (ColorFormat::Lab, |rng, _, _| Color::Lab(random_lab(rng))),
];

pub fn randomizer(format: ColorFormat) -> Randomizer {
    RANDOMIZERS
        .iter()
        .find(|(candidate, _)| *candidate == format)
        .map(|(_, randomizer)| *randomizer)
        .unwrap_or(RANDOMIZERS[0].1)
}

/// A random color in `format`.
pub fn random_color<R: RngCore>(
    rng: &mut R,
    format: ColorFormat,
    flags: &GenerationFlags,
    limits: &LimitConfig,
) -> Color {
    randomizer(format)(rng, flags, limits)
}

/// Seeds a palette when the caller supplied no base color.
///
/// `format` defaults to hex when absent.
pub fn generate_random_first_color<R: RngCore>(
    rng: &mut R,
    flags: &GenerationFlags,
    limits: &LimitConfig,
    format: Option<ColorFormat>,
) -> Color {
    random_color(rng, format.unwrap_or_default(), flags, limits)
}
