//! Limiting thresholds and palette tunables.
//!
//! All values are percentages or degrees. Every field has a default, so a
//! JSON document only needs to name what it overrides.

use serde::{Deserialize, Serialize};

use crate::error::{HuewheelError, HuewheelResult};

/// Bounds used to keep random colors away from gray, black and white.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LimitConfig {
    /// Saturation below this reads as gray.
    pub gray_saturation_floor: f64,
    /// Lightness (or value) below this reads as black.
    pub dark_lightness_floor: f64,
    /// Lightness (or value) above this washes out.
    pub light_lightness_ceiling: f64,
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            gray_saturation_floor: 20.0,
            dark_lightness_floor: 25.0,
            light_lightness_ceiling: 75.0,
        }
    }
}

/// Tunables for palette construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaletteConfig {
    pub limits: LimitConfig,
    /// Maximum hue offset, in degrees, for colors added beyond a scheme's own hues.
    pub hue_jitter: u16,
    /// Minimum saturation or lightness distance between an added color and its source.
    pub min_separation: f64,
    /// Retries before the separation nudge is forced.
    pub max_separation_attempts: usize,
    /// Total arc, in degrees, that analogous hues may spread over.
    pub analogous_arc: f64,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            limits: LimitConfig::default(),
            hue_jitter: 5,
            min_separation: 10.0,
            max_separation_attempts: 100,
            analogous_arc: 60.0,
        }
    }
}

impl PaletteConfig {
    /// Loads and validates a configuration from JSON.
    pub fn from_json(src: &str) -> HuewheelResult<Self> {
        let config: Self = serde_json::from_str(src).map_err(|e| {
            let offset = line_col_offset(src, e.line(), e.column());
            HuewheelError::config(src, (offset, 1), e.to_string())
        })?;
        config.validate().map_err(|msg| HuewheelError::config(src, (0, src.len()), msg))?;
        Ok(config)
    }

    /// Checks that every threshold is usable.
    pub fn validate(&self) -> Result<(), String> {
        let limits = &self.limits;
        for (name, value) in [
            ("graySaturationFloor", limits.gray_saturation_floor),
            ("darkLightnessFloor", limits.dark_lightness_floor),
            ("lightLightnessCeiling", limits.light_lightness_ceiling),
            ("minSeparation", self.min_separation),
        ] {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(format!("{} must lie in [0, 100], got {}", name, value));
            }
        }
        if limits.dark_lightness_floor > limits.light_lightness_ceiling {
            return Err(format!(
                "darkLightnessFloor ({}) exceeds lightLightnessCeiling ({})",
                limits.dark_lightness_floor, limits.light_lightness_ceiling
            ));
        }
        if self.max_separation_attempts == 0 {
            return Err("maxSeparationAttempts must be at least 1".to_string());
        }
        if self.hue_jitter >= 180 {
            return Err(format!("hueJitter must be below 180, got {}", self.hue_jitter));
        }
        if !self.analogous_arc.is_finite() || !(0.0..=180.0).contains(&self.analogous_arc) {
            return Err(format!(
                "analogousArc must lie in [0, 180], got {}",
                self.analogous_arc
            ));
        }
        Ok(())
    }
}

/// Byte offset of a 1-based line/column pair as reported by serde_json.
fn line_col_offset(src: &str, line: usize, column: usize) -> usize {
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(src.len().saturating_sub(1))
}
