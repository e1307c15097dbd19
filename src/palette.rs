//! Palette construction
//!
//! A palette is built from a base color (supplied or random) and the hues its
//! [`Scheme`] derives from it. When more swatches are requested than the
//! scheme has hues, extra colors are drawn near the scheme's hues with
//! saturation/lightness kept apart from the color they were derived from.
//!
//! Every swatch is handed to a [`SwatchRenderer`] as soon as it is placed, in
//! palette order. The swatch index is threaded through explicitly; nothing
//! here keeps state between calls.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::{
    colors::{normalize_hue, Color, ColorFormat, ColorValues, Hsl, Hsv},
    config::PaletteConfig,
    error::HuewheelError,
    random::{generate_random_first_color, random_color, random_sl, GenerationFlags, SlPair},
    render::{AnsiPalette, SwatchRenderer},
    scheme::Scheme,
};

/// What the caller asks a palette generation for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteRequest {
    pub scheme: Scheme,
    pub count: usize,
    /// Space used for a random base color and for swatch text.
    pub color_space: ColorFormat,
    /// Custom base color; a random one is drawn when absent.
    pub seed: Option<Color>,
    pub flags: GenerationFlags,
}

impl PaletteRequest {
    pub fn new(scheme: Scheme, count: usize) -> Self {
        Self {
            scheme,
            count,
            color_space: ColorFormat::default(),
            seed: None,
            flags: GenerationFlags::default(),
        }
    }

    pub fn color_space(mut self, color_space: ColorFormat) -> Self {
        self.color_space = color_space;
        self
    }

    pub fn seed(mut self, seed: impl Into<Color>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    pub fn flags(mut self, flags: GenerationFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// A generated palette and the request metadata it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub scheme: Scheme,
    pub requested: usize,
    pub color_space: ColorFormat,
    pub custom_color: Option<Color>,
    pub flags: GenerationFlags,
    pub swatches: Vec<ColorValues>,
}

impl Palette {
    /// A palette with the request's metadata and no swatches.
    pub fn empty(request: &PaletteRequest) -> Self {
        Self {
            scheme: request.scheme,
            requested: request.count,
            color_space: request.color_space,
            custom_color: request.seed.clone(),
            flags: request.flags,
            swatches: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    /// Swatches expressed in the palette's color space.
    pub fn colors(&self) -> Vec<Color> {
        self.swatches
            .iter()
            .map(|swatch| swatch.get(self.color_space))
            .collect()
    }

    pub fn hues(&self) -> Vec<f64> {
        self.swatches.iter().map(|swatch| swatch.hsl.hue).collect()
    }

    pub fn ansi(&self) -> AnsiPalette<'_> {
        AnsiPalette::new(self)
    }
}

/// Outcome of pushing a saturation/lightness pair away from its source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Separation {
    pub pair: SlPair,
    /// Perturbation rounds spent.
    pub attempts: usize,
    /// Whether the retry cap was hit and the nudge applied unconditionally.
    pub forced: bool,
}

/// Builds palettes according to a [`PaletteConfig`].
#[derive(Debug, Clone, Default)]
pub struct PaletteGenerator {
    config: PaletteConfig,
}

impl PaletteGenerator {
    pub fn new(config: PaletteConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PaletteConfig {
        &self.config
    }

    /// Generates the palette described by `request`, rendering each swatch.
    ///
    /// A count below the scheme's minimum raises an alert on the renderer and
    /// yields an empty palette, as does an invalid seed color (logged as an
    /// error). Neither case renders anything.
    pub fn generate<R, S>(&self, request: &PaletteRequest, rng: &mut R, renderer: &mut S) -> Palette
    where
        R: RngCore,
        S: SwatchRenderer + ?Sized,
    {
        let mut palette = Palette::empty(request);

        if let Err(err) = request.scheme.check_count(request.count) {
            tracing::warn!(scheme = %request.scheme, requested = request.count, "{}", err);
            renderer.alert(&err.to_string());
            return palette;
        }

        let base = match self.resolve_base(request, rng) {
            Ok(base) => base,
            Err(err) => {
                tracing::error!(scheme = %request.scheme, "{}", err);
                return palette;
            }
        };

        let swatches = match request.scheme {
            Scheme::Random => self.random_swatches(request, &base, rng),
            scheme => self.scheme_swatches(scheme, request, &base, rng),
        };

        let mut index = 0;
        for swatch in &swatches {
            index = render_swatch_at(renderer, index, swatch, request.color_space);
        }
        tracing::debug!(scheme = %request.scheme, swatches = index, "palette generated");

        palette.swatches = swatches;
        palette
    }

    /// Looks the scheme up by name or numeric id, then generates.
    ///
    /// Returns `None`, after logging, when the id names no scheme.
    pub fn generate_selected<R, S>(
        &self,
        scheme_id: &str,
        request: PaletteRequest,
        rng: &mut R,
        renderer: &mut S,
    ) -> Option<Palette>
    where
        R: RngCore,
        S: SwatchRenderer + ?Sized,
    {
        match scheme_id.parse::<Scheme>() {
            Ok(scheme) => {
                let request = PaletteRequest { scheme, ..request };
                Some(self.generate(&request, rng, renderer))
            }
            Err(err) => {
                tracing::error!(scheme = scheme_id, "{}", err);
                None
            }
        }
    }

    fn resolve_base<R: RngCore>(
        &self,
        request: &PaletteRequest,
        rng: &mut R,
    ) -> Result<Color, HuewheelError> {
        match &request.seed {
            Some(seed) if seed.is_valid() => Ok(with_wrapped_hue(seed)),
            Some(seed) => Err(HuewheelError::invalid_base_color(format!(
                "{:?} has components outside their range",
                seed
            ))),
            None => Ok(generate_random_first_color(
                rng,
                &request.flags,
                &self.config.limits,
                Some(request.color_space),
            )),
        }
    }

    /// The base color followed by `count - 1` independent random colors.
    fn random_swatches<R: RngCore>(
        &self,
        request: &PaletteRequest,
        base: &Color,
        rng: &mut R,
    ) -> Vec<ColorValues> {
        let mut swatches = Vec::with_capacity(request.count);
        swatches.push(ColorValues::from_color(base));
        for _ in 1..request.count {
            let color = random_color(rng, request.color_space, &request.flags, &self.config.limits);
            swatches.push(ColorValues::from_color(&color));
        }
        swatches
    }

    fn scheme_swatches<R: RngCore>(
        &self,
        scheme: Scheme,
        request: &PaletteRequest,
        base: &Color,
        rng: &mut R,
    ) -> Vec<ColorValues> {
        let count = request.count;
        let base_values = ColorValues::from_color(base);
        let anchor = base_values.hsl;

        let mut swatches = Vec::with_capacity(count);
        swatches.push(base_values);
        for hue in scheme
            .target_hues(anchor.hue, count, self.config.analogous_arc, rng)
            .into_iter()
            .take(count - 1)
        {
            let hsl = Hsl::new(hue, anchor.saturation, anchor.lightness);
            swatches.push(ColorValues::from_color(&Color::Hsl(hsl)));
        }

        let sources: Vec<Hsl> = swatches.iter().map(|swatch| swatch.hsl).collect();
        let jitter = scheme != Scheme::Monochromatic;
        for i in 0..count - sources.len() {
            let source = sources[i % sources.len()];
            swatches.push(self.extra_color(&source, jitter, &request.flags, rng));
        }
        swatches
    }

    /// A color near `source`'s hue with a freshly drawn, separated saturation/lightness.
    fn extra_color<R: Rng + ?Sized>(
        &self,
        source: &Hsl,
        jitter: bool,
        flags: &GenerationFlags,
        rng: &mut R,
    ) -> ColorValues {
        let hue = if jitter {
            let spread = i32::from(self.config.hue_jitter);
            normalize_hue(source.hue + rng.gen_range(-spread..=spread) as f64)
        } else {
            source.hue
        };
        let candidate = random_sl(rng, flags, &self.config.limits);
        let separation = self.separate(source, candidate, flags, rng);

        let hsl = Hsl::new(hue, separation.pair.saturation, separation.pair.lightness);
        ColorValues::from_color(&Color::Hsl(hsl))
    }

    /// Whether `pair` sits within the separation band of `source` on both channels.
    pub fn too_close(&self, source: &Hsl, pair: SlPair) -> bool {
        let band = self.config.min_separation;
        (pair.saturation - source.saturation).abs() < band
            && (pair.lightness - source.lightness).abs() < band
    }

    /// Perturbs `candidate` until it leaves `source`'s separation band.
    ///
    /// Each round moves saturation and lightness by the separation step in a
    /// random direction, then re-clamps and re-limits. After the configured
    /// number of rounds the pair is set one step away from `source`
    /// regardless.
    pub fn separate<R: Rng + ?Sized>(
        &self,
        source: &Hsl,
        candidate: SlPair,
        flags: &GenerationFlags,
        rng: &mut R,
    ) -> Separation {
        let step = self.config.min_separation;
        let limits = &self.config.limits;
        let mut pair = candidate;
        let mut attempts = 0;

        while self.too_close(source, pair) {
            if attempts >= self.config.max_separation_attempts {
                tracing::debug!(attempts, ?source, "separation retries exhausted, forcing");
                let nudge = |from: f64| {
                    if from + step <= 100.0 {
                        from + step
                    } else {
                        from - step
                    }
                };
                pair = SlPair::new(nudge(source.saturation), nudge(source.lightness))
                    .clamped()
                    .limited(flags, limits);
                return Separation {
                    pair,
                    attempts,
                    forced: true,
                };
            }

            let ds = if rng.gen_bool(0.5) { step } else { -step };
            let dl = if rng.gen_bool(0.5) { step } else { -step };
            pair = SlPair::new(pair.saturation + ds, pair.lightness + dl)
                .clamped()
                .limited(flags, limits);
            attempts += 1;
        }

        Separation {
            pair,
            attempts,
            forced: false,
        }
    }
}

/// Seeds given in HSL or HSV may carry any finite hue; wrap it into `[0, 360)`.
fn with_wrapped_hue(color: &Color) -> Color {
    match color {
        Color::Hsl(hsl) => Color::Hsl(Hsl {
            hue: normalize_hue(hsl.hue),
            ..*hsl
        }),
        Color::Hsv(hsv) => Color::Hsv(Hsv {
            hue: normalize_hue(hsv.hue),
            ..*hsv
        }),
        other => other.clone(),
    }
}

/// Renders one swatch and returns the index of the next one.
fn render_swatch_at<S: SwatchRenderer + ?Sized>(
    renderer: &mut S,
    index: usize,
    swatch: &ColorValues,
    format: ColorFormat,
) -> usize {
    renderer.render_swatch(index, &swatch.hex.to_string());
    renderer.populate_color_text_output_box(&swatch.get(format), index);
    index + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{colors::Hex, config::LimitConfig, render::SwatchBoard};
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, SeedableRng};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn red_hsl() -> Hsl {
        Hsl::new(0.0, 100.0, 50.0)
    }

    #[test]
    fn test_complementary_from_seed() {
        let generator = PaletteGenerator::default();
        let mut board = SwatchBoard::new();
        let request = PaletteRequest::new(Scheme::Complementary, 2)
            .color_space(ColorFormat::Hsl)
            .seed(red_hsl());

        let palette = generator.generate(&request, &mut rng(), &mut board);

        assert_eq!(palette.len(), 2);
        assert_eq!(palette.swatches[0].hsl, red_hsl());
        assert_eq!(palette.swatches[1].hsl, Hsl::new(180.0, 100.0, 50.0));
        assert_eq!(board.backgrounds(), vec!["#FF0000", "#00FFFF"]);
        assert_eq!(board.texts(), vec!["hsl(0,100%,50%)", "hsl(180,100%,50%)"]);
        assert_eq!(palette.custom_color, Some(Color::Hsl(red_hsl())));
    }

    #[test]
    fn test_triadic_hues() {
        let generator = PaletteGenerator::default();
        let request = PaletteRequest::new(Scheme::Triadic, 3).seed(Hsl::new(10.0, 60.0, 40.0));

        let palette = generator.generate(&request, &mut rng(), &mut SwatchBoard::new());
        assert_eq!(palette.hues(), vec![10.0, 130.0, 250.0]);
    }

    #[test]
    fn test_hex_seed_renders_canonical() {
        let generator = PaletteGenerator::default();
        for spelling in ["FF0000", "#f00", " #FF0000 "] {
            let mut board = SwatchBoard::new();
            let request = PaletteRequest::new(Scheme::Complementary, 2).seed(Hex::new(spelling));

            let palette = generator.generate(&request, &mut rng(), &mut board);

            assert_eq!(board.backgrounds(), vec!["#FF0000", "#00FFFF"], "{spelling:?}");
            assert_eq!(board.texts(), vec!["#FF0000", "#00FFFF"], "{spelling:?}");
            assert_eq!(palette.swatches[0].hex.as_str(), "#FF0000");
            assert_eq!(palette.custom_color, Some(Color::Hex(Hex::new(spelling))));
        }
    }

    #[test]
    fn test_hexadic_below_minimum_is_refused() {
        let generator = PaletteGenerator::default();
        let mut board = SwatchBoard::new();
        let request = PaletteRequest::new(Scheme::Hexadic, 5).seed(red_hsl());

        let palette = generator.generate(&request, &mut rng(), &mut board);

        assert!(palette.is_empty());
        assert!(board.swatches.is_empty());
        assert_eq!(
            board.alerts,
            vec!["A hexadic palette needs at least 6 swatches, got 5".to_string()]
        );
    }

    #[test]
    fn test_every_minimum_is_enforced() {
        let generator = PaletteGenerator::default();
        for scheme in Scheme::ALL {
            let mut board = SwatchBoard::new();
            let request = PaletteRequest::new(scheme, scheme.min_swatches() - 1);

            let palette = generator.generate(&request, &mut rng(), &mut board);
            assert!(palette.is_empty(), "{scheme}");
            assert!(board.swatches.is_empty(), "{scheme}");
            assert_eq!(board.alerts.len(), 1, "{scheme}");
        }
    }

    #[test]
    fn test_invalid_seed_aborts_without_rendering() {
        let generator = PaletteGenerator::default();
        let mut board = SwatchBoard::new();
        let request =
            PaletteRequest::new(Scheme::Triadic, 3).seed(Hsl::new(f64::NAN, 50.0, 50.0));

        let palette = generator.generate(&request, &mut rng(), &mut board);
        assert!(palette.is_empty());
        assert!(board.swatches.is_empty());
        assert!(board.alerts.is_empty());
    }

    #[test]
    fn test_seed_hue_is_wrapped() {
        let generator = PaletteGenerator::default();
        let request =
            PaletteRequest::new(Scheme::Complementary, 2).seed(Hsl::new(370.0, 50.0, 50.0));

        let palette = generator.generate(&request, &mut rng(), &mut SwatchBoard::new());
        assert_eq!(palette.hues(), vec![10.0, 190.0]);
    }

    #[test]
    fn test_requested_count_is_honored() {
        let generator = PaletteGenerator::default();
        for scheme in Scheme::ALL {
            for count in scheme.min_swatches()..scheme.min_swatches() + 6 {
                let mut board = SwatchBoard::new();
                let request = PaletteRequest::new(scheme, count)
                    .color_space(ColorFormat::Rgb)
                    .flags(GenerationFlags::limited());

                let palette = generator.generate(&request, &mut rng(), &mut board);
                assert_eq!(palette.len(), count, "{scheme} x{count}");
                assert_eq!(board.swatches.len(), count, "{scheme} x{count}");
                for (swatch, cell) in palette.swatches.iter().zip(&board.swatches) {
                    assert_eq!(cell.background.as_deref(), Some(swatch.hex.as_str()));
                }
            }
        }
    }

    #[test]
    fn test_extra_colors_stay_near_scheme_hues() {
        let generator = PaletteGenerator::default();
        let request =
            PaletteRequest::new(Scheme::Complementary, 6).seed(Hsl::new(100.0, 50.0, 50.0));

        let palette = generator.generate(&request, &mut rng(), &mut SwatchBoard::new());
        let hues = palette.hues();
        assert_eq!(&hues[..2], &[100.0, 280.0]);
        for (i, hue) in hues.iter().enumerate().skip(2) {
            let source = hues[(i - 2) % 2];
            let distance = (hue - source).abs().min(360.0 - (hue - source).abs());
            assert!(distance <= 5.0, "swatch {i}: {hue} vs {source}");
        }
    }

    #[test]
    fn test_monochromatic_shares_hue() {
        let generator = PaletteGenerator::default();
        let request =
            PaletteRequest::new(Scheme::Monochromatic, 5).seed(Hsl::new(200.0, 50.0, 50.0));

        let palette = generator.generate(&request, &mut rng(), &mut SwatchBoard::new());
        assert!(palette.hues().iter().all(|hue| *hue == 200.0));
        for swatch in &palette.swatches[1..] {
            let pair = SlPair::new(swatch.hsl.saturation, swatch.hsl.lightness);
            assert!(!generator.too_close(&palette.swatches[0].hsl, pair));
        }
    }

    #[test]
    fn test_random_palette_uses_color_space() {
        let generator = PaletteGenerator::default();
        let mut board = SwatchBoard::new();
        let request = PaletteRequest::new(Scheme::Random, 4).color_space(ColorFormat::Cmyk);

        let palette = generator.generate(&request, &mut rng(), &mut board);
        assert_eq!(palette.len(), 4);
        assert!(palette.colors().iter().all(|c| c.format() == ColorFormat::Cmyk));
        assert!(board.texts().iter().all(|text| text.starts_with("cmyk(")));
    }

    #[test]
    fn test_separation_moves_close_pairs_apart() {
        let generator = PaletteGenerator::default();
        let source = Hsl::new(0.0, 50.0, 50.0);
        let mut rng = rng();

        let separation = generator.separate(
            &source,
            SlPair::new(52.0, 47.0),
            &GenerationFlags::default(),
            &mut rng,
        );
        assert!(separation.attempts >= 1);
        assert!(!generator.too_close(&source, separation.pair));
    }

    #[test]
    fn test_separation_leaves_distant_pairs_alone() {
        let generator = PaletteGenerator::default();
        let source = Hsl::new(0.0, 50.0, 50.0);

        let separation = generator.separate(
            &source,
            SlPair::new(90.0, 50.0),
            &GenerationFlags::default(),
            &mut rng(),
        );
        assert_eq!(separation.pair, SlPair::new(90.0, 50.0));
        assert_eq!(separation.attempts, 0);
        assert!(!separation.forced);
    }

    #[test]
    fn test_separation_forces_after_cap() {
        // limits pin the pair inside the band, so only the forced nudge can escape
        let config = PaletteConfig {
            limits: LimitConfig {
                gray_saturation_floor: 100.0,
                dark_lightness_floor: 50.0,
                light_lightness_ceiling: 50.0,
            },
            max_separation_attempts: 3,
            ..PaletteConfig::default()
        };
        let generator = PaletteGenerator::new(config);
        let source = Hsl::new(0.0, 95.0, 50.0);

        let separation = generator.separate(
            &source,
            SlPair::new(100.0, 50.0),
            &GenerationFlags::limited(),
            &mut rng(),
        );
        assert!(separation.forced);
        assert_eq!(separation.attempts, 3);
        assert_eq!(separation.pair, SlPair::new(100.0, 50.0));
    }

    #[test]
    fn test_generate_selected() {
        let generator = PaletteGenerator::default();
        let template = PaletteRequest::new(Scheme::Random, 3).seed(Hex::new("#336699"));

        let palette = generator
            .generate_selected("triadic", template.clone(), &mut rng(), &mut SwatchBoard::new())
            .unwrap();
        assert_eq!(palette.scheme, Scheme::Triadic);
        assert_eq!(palette.len(), 3);

        let mut board = SwatchBoard::new();
        assert!(generator
            .generate_selected("pentadic", template, &mut rng(), &mut board)
            .is_none());
        assert!(board.swatches.is_empty());
    }

    #[test]
    fn test_same_seed_same_palette() {
        let generator = PaletteGenerator::default();
        let request = PaletteRequest::new(Scheme::Diadic, 7).flags(GenerationFlags::limited());

        let a = generator.generate(&request, &mut rng(), &mut SwatchBoard::new());
        let b = generator.generate(&request, &mut rng(), &mut SwatchBoard::new());
        assert_eq!(a, b);
    }
}
