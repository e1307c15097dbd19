#![forbid(unsafe_code)]

//! # Huewheel
//!
//! Color-space conversions and hue-scheme palette generation.
//!
//! ## Overview
//!
//! The crate is built around a few main concepts:
//!
//! - **Color Model**: value types for Hex, RGB, HSL, HSV, CMYK and Lab, plus XYZ as a pivot
//! - **Fail-safe Conversions**: every pair of formats converts, and bad input degrades to black
//! - **Restartable Randomness**: random colors drawn from a caller-owned RNG, optionally
//!   kept away from gray, black and washed-out tones
//! - **Palette Schemes**: complementary, triadic, tetradic, split-complementary, analogous,
//!   hexadic, diadic, monochromatic and random palettes
//!
//! ## Core Components
//!
//! - [`Color`]: a color tagged with its format
//! - [`ColorValues`]: one color in all six formats
//! - [`PaletteGenerator`]: builds a [`Palette`] from a [`PaletteRequest`]
//! - [`SwatchRenderer`]: receives each swatch as it is placed
//! - [`PaletteView`]: ratatui widget for a finished palette
//!
//! ## Example Usage
//!
//! ```rust
//! use huewheel::{
//!     ColorFormat, Hsl, PaletteGenerator, PaletteRequest, Scheme, SwatchBoard,
//! };
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let generator = PaletteGenerator::default();
//! let request = PaletteRequest::new(Scheme::Triadic, 3)
//!     .color_space(ColorFormat::Hsl)
//!     .seed(Hsl::new(10.0, 80.0, 50.0));
//!
//! let mut board = SwatchBoard::new();
//! let palette = generator.generate(&request, &mut StdRng::seed_from_u64(1), &mut board);
//!
//! assert_eq!(palette.hues(), vec![10.0, 130.0, 250.0]);
//! assert_eq!(board.texts()[1], "hsl(130,80%,50%)");
//! ```
//!
//! ## Module Organization
//!
//! - `colors`: Color model and CSS text output
//! - `config`: Limiting thresholds and palette tunables
//! - `convert`: Conversion engine
//! - `error`: Error types and handling
//! - `palette`: Palette construction
//! - `parse`: Parsing colors from text
//! - `random`: Random colors and limiters
//! - `render`: Swatch renderers
//! - `scheme`: Scheme identifiers and hue arithmetic
//!
//! ## Error Handling
//!
//! Conversions never fail. Caller-visible problems (unknown names, malformed
//! text, refused swatch counts, bad configuration) are reported with
//! [`HuewheelError`], a `miette` diagnostic, and [`HuewheelResult`].
//! Diagnostics are also emitted through `tracing`.

/// Re-exports of core components
pub use colors::{
    Cmyk, Color, ColorFormat, ColorValues, Hex, Hsl, Hsv, Lab, Rgb, SwatchColorize, Xyz,
};
pub use config::{LimitConfig, PaletteConfig};
pub use error::{HuewheelError, HuewheelResult};
pub use palette::{Palette, PaletteGenerator, PaletteRequest, Separation};
pub use random::{GenerationFlags, SlPair};
pub use render::{AnsiPalette, PaletteView, SwatchBoard, SwatchCell, SwatchRenderer};
pub use scheme::Scheme;

/// Color model and CSS text output
pub mod colors;
/// Limiting thresholds and palette tunables
pub mod config;
/// Conversion engine
pub mod convert;
/// Error types and handling
pub mod error;
/// Palette construction
pub mod palette;
/// Parsing colors from text
pub mod parse;
/// Random colors and limiters
pub mod random;
/// Swatch renderers
pub mod render;
/// Scheme identifiers and hue arithmetic
pub mod scheme;
