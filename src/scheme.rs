//! Palette schemes and the hue arithmetic behind each of them.

use rand::{
    distributions::{Distribution, WeightedIndex},
    Rng,
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::{colors::normalize_hue, error::HuewheelError};

/// A hue relationship rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scheme {
    Random,
    Complementary,
    Triadic,
    Tetradic,
    SplitComplementary,
    Analogous,
    Hexadic,
    Diadic,
    Monochromatic,
}

/// Diadic separations as (low, high, weight), avoiding both 0 and 180.
const DIADIC_INTERVALS: [(u16, u16, u32); 3] = [(30, 60, 25), (60, 120, 50), (120, 150, 25)];

impl Scheme {
    pub const ALL: [Scheme; 9] = [
        Scheme::Random,
        Scheme::Complementary,
        Scheme::Triadic,
        Scheme::Tetradic,
        Scheme::SplitComplementary,
        Scheme::Analogous,
        Scheme::Hexadic,
        Scheme::Diadic,
        Scheme::Monochromatic,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Scheme::Random => "random",
            Scheme::Complementary => "complementary",
            Scheme::Triadic => "triadic",
            Scheme::Tetradic => "tetradic",
            Scheme::SplitComplementary => "split-complementary",
            Scheme::Analogous => "analogous",
            Scheme::Hexadic => "hexadic",
            Scheme::Diadic => "diadic",
            Scheme::Monochromatic => "monochromatic",
        }
    }

    /// Numeric identifier used by the palette type selector, 1-based.
    pub const fn id(self) -> u8 {
        match self {
            Scheme::Random => 1,
            Scheme::Complementary => 2,
            Scheme::Triadic => 3,
            Scheme::Tetradic => 4,
            Scheme::SplitComplementary => 5,
            Scheme::Analogous => 6,
            Scheme::Hexadic => 7,
            Scheme::Diadic => 8,
            Scheme::Monochromatic => 9,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|scheme| scheme.id() == id)
    }

    /// Fewest swatches the scheme can be drawn with.
    pub const fn min_swatches(self) -> usize {
        match self {
            Scheme::Random => 1,
            Scheme::Complementary
            | Scheme::Analogous
            | Scheme::Diadic
            | Scheme::Monochromatic => 2,
            Scheme::Triadic | Scheme::SplitComplementary => 3,
            Scheme::Tetradic => 4,
            Scheme::Hexadic => 6,
        }
    }

    /// Whether a request for `count` swatches can be honored.
    pub fn check_count(self, count: usize) -> Result<(), HuewheelError> {
        let minimum = self.min_swatches();
        if count < minimum {
            return Err(HuewheelError::insufficient_swatches(self.name(), count, minimum));
        }
        Ok(())
    }

    /// Hues that accompany `base` in a `count`-swatch palette, base excluded.
    ///
    /// Every returned hue lies in `[0, 360)`. Random and monochromatic
    /// palettes have no companion hues.
    pub fn target_hues<R: Rng + ?Sized>(
        self,
        base: f64,
        count: usize,
        analogous_arc: f64,
        rng: &mut R,
    ) -> Vec<f64> {
        let offsets: Vec<f64> = match self {
            Scheme::Random | Scheme::Monochromatic => Vec::new(),
            Scheme::Complementary => vec![180.0],
            Scheme::Triadic => vec![120.0, 240.0],
            Scheme::Tetradic => vec![90.0, 180.0, 270.0],
            Scheme::SplitComplementary => {
                let modifier = rng.gen_range(20..=30u16) as f64;
                vec![180.0 + modifier, 180.0 - modifier]
            }
            Scheme::Diadic => vec![diadic_distance(rng)],
            Scheme::Hexadic => {
                let d = rng.gen_range(10..=80u16) as f64;
                vec![180.0, d, d + 180.0, -d, -d + 180.0]
            }
            Scheme::Analogous => analogous_offsets(count, analogous_arc),
        };

        offsets
            .into_iter()
            .map(|offset| normalize_hue(base + offset))
            .collect()
    }
}

/// Draws a diadic hue distance, weighted toward moderate separations.
pub fn diadic_distance<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let weights = DIADIC_INTERVALS.map(|(_, _, weight)| weight);
    let (low, high) = match WeightedIndex::new(weights) {
        Ok(index) => {
            let (low, high, _) = DIADIC_INTERVALS[index.sample(rng)];
            (low, high)
        }
        Err(e) => {
            tracing::warn!(error = %e, "diadic weights rejected, drawing uniformly");
            (DIADIC_INTERVALS[0].0, DIADIC_INTERVALS[2].1)
        }
    };
    rng.gen_range(low..=high) as f64
}

/// `count - 1` evenly spaced offsets spreading over at most `arc` degrees,
/// never more than 30 degrees apart.
fn analogous_offsets(count: usize, arc: f64) -> Vec<f64> {
    if count < 2 {
        return Vec::new();
    }
    let step = (arc / (count - 1) as f64).min(30.0);
    (1..count).map(|i| i as f64 * step).collect()
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scheme {
    type Err = HuewheelError;

    /// Accepts names in kebab, camel or plain lower case, or a numeric id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if let Ok(id) = wanted.parse::<u8>() {
            return Self::from_id(id).ok_or_else(|| HuewheelError::unsupported_scheme(s));
        }

        let folded: String = wanted
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        Self::ALL
            .into_iter()
            .find(|scheme| scheme.name().replace('-', "") == folded)
            .ok_or_else(|| HuewheelError::unsupported_scheme(s))
    }
}
