//! Conversion engine between the six user-facing color spaces.
//!
//! Hex, HSL, HSV and CMYK convert to and from [`Rgb`] directly. Lab goes
//! through [`Xyz`]. Every other pair is composed from those pivots.
//!
//! No function here fails: malformed input (non-finite components, channels
//! outside their declared range, unparsable hex) is logged and answered with
//! the output format's black value.

use crate::colors::{normalize_hue, round2, Cmyk, Hex, Hsl, Hsv, Lab, Rgb, Xyz};

/// D65 reference white, scaled so that `Y = 100`.
pub const REF_X: f64 = 95.047;
pub const REF_Y: f64 = 100.0;
pub const REF_Z: f64 = 108.883;

const LAB_EPSILON: f64 = 0.008856;
const LAB_KAPPA: f64 = 7.787;
const LAB_OFFSET: f64 = 16.0 / 116.0;

#[inline]
fn unit(channel: u8) -> f64 {
    channel as f64 / 255.0
}

#[inline]
fn to_channel(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[inline]
fn percent(value: f64) -> f64 {
    round2(value * 100.0).clamp(0.0, 100.0)
}

#[inline]
fn degrees(hue: f64) -> f64 {
    normalize_hue(round2(normalize_hue(hue)))
}

/// Parses `#RRGGBB`, `RRGGBB` or the `#RGB` shorthand.
pub(crate) fn parse_hex(hex: &Hex) -> Option<Rgb> {
    let digits = hex.as_str().trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return None,
    };
    let value = u32::from_str_radix(&expanded, 16).ok()?;
    Some(Rgb::new(
        ((value >> 16) & 255) as u8,
        ((value >> 8) & 255) as u8,
        (value & 255) as u8,
    ))
}

pub fn hex_to_rgb(hex: &Hex) -> Rgb {
    parse_hex(hex).unwrap_or_else(|| {
        tracing::warn!(hex = hex.as_str(), "malformed hex color, using black");
        Rgb::default()
    })
}

pub fn rgb_to_hex(rgb: &Rgb) -> Hex {
    Hex::new(format!(
        "#{:02X}{:02X}{:02X}",
        rgb.red, rgb.green, rgb.blue
    ))
}

/// Hue in sixths of the wheel; `delta` must be non-zero.
fn hue_sixths(r: f64, g: f64, b: f64, max: f64, delta: f64) -> f64 {
    if max == r {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    }
}

pub fn rgb_to_hsl(rgb: &Rgb) -> Hsl {
    let (r, g, b) = (unit(rgb.red), unit(rgb.green), unit(rgb.blue));
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let lightness = (max + min) / 2.0;

    if max == min {
        return Hsl::new(0.0, 0.0, percent(lightness));
    }

    let delta = max - min;
    let saturation = if lightness > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };
    let hue = hue_sixths(r, g, b, max, delta) * 60.0;

    Hsl::new(degrees(hue), percent(saturation), percent(lightness))
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

pub fn hsl_to_rgb(hsl: &Hsl) -> Rgb {
    if !hsl.is_valid() {
        tracing::warn!(?hsl, "invalid HSL color, using black");
        return Rgb::default();
    }

    let h = normalize_hue(hsl.hue) / 360.0;
    let s = hsl.saturation / 100.0;
    let l = hsl.lightness / 100.0;

    if s == 0.0 {
        let v = to_channel(l);
        return Rgb::new(v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Rgb::new(
        to_channel(hue_to_rgb(p, q, h + 1.0 / 3.0)),
        to_channel(hue_to_rgb(p, q, h)),
        to_channel(hue_to_rgb(p, q, h - 1.0 / 3.0)),
    )
}

pub fn rgb_to_hsv(rgb: &Rgb) -> Hsv {
    let (r, g, b) = (unit(rgb.red), unit(rgb.green), unit(rgb.blue));
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    if delta == 0.0 {
        return Hsv::new(0.0, 0.0, percent(max));
    }

    let saturation = delta / max;
    let hue = hue_sixths(r, g, b, max, delta) * 60.0;

    Hsv::new(degrees(hue), percent(saturation), percent(max))
}

pub fn hsv_to_rgb(hsv: &Hsv) -> Rgb {
    if !hsv.is_valid() {
        tracing::warn!(?hsv, "invalid HSV color, using black");
        return Rgb::default();
    }

    let h = normalize_hue(hsv.hue) / 60.0;
    let s = hsv.saturation / 100.0;
    let v = hsv.value / 100.0;

    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    let (r, g, b) = match (sector as u32) % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    Rgb::new(to_channel(r), to_channel(g), to_channel(b))
}

pub fn rgb_to_cmyk(rgb: &Rgb) -> Cmyk {
    let (r, g, b) = (unit(rgb.red), unit(rgb.green), unit(rgb.blue));
    let key = 1.0 - r.max(g).max(b);

    let ink = |channel: f64| {
        if key >= 1.0 {
            0.0
        } else {
            (1.0 - channel - key) / (1.0 - key)
        }
    };

    Cmyk::new(percent(ink(r)), percent(ink(g)), percent(ink(b)), percent(key))
}

pub fn cmyk_to_rgb(cmyk: &Cmyk) -> Rgb {
    if !cmyk.is_valid() {
        tracing::warn!(?cmyk, "invalid CMYK color, using black");
        return Rgb::default();
    }

    let black = 1.0 - cmyk.key / 100.0;
    let channel = |ink: f64| to_channel((1.0 - ink / 100.0) * black);

    Rgb::new(
        channel(cmyk.cyan),
        channel(cmyk.magenta),
        channel(cmyk.yellow),
    )
}

pub fn rgb_to_xyz(rgb: &Rgb) -> Xyz {
    let expand = |channel: u8| {
        let c = unit(channel);
        let linear = if c > 0.04045 {
            ((c + 0.055) / 1.055).powf(2.4)
        } else {
            c / 12.92
        };
        linear * 100.0
    };
    let (r, g, b) = (expand(rgb.red), expand(rgb.green), expand(rgb.blue));

    Xyz::new(
        r * 0.4124 + g * 0.3576 + b * 0.1805,
        r * 0.2126 + g * 0.7152 + b * 0.0722,
        r * 0.0193 + g * 0.1192 + b * 0.9505,
    )
}

pub fn xyz_to_rgb(xyz: &Xyz) -> Rgb {
    if !xyz.is_valid() {
        tracing::warn!(?xyz, "invalid XYZ color, using black");
        return Rgb::default();
    }

    let (x, y, z) = (xyz.x / 100.0, xyz.y / 100.0, xyz.z / 100.0);
    let r = x * 3.2406 + y * -1.5372 + z * -0.4986;
    let g = x * -0.9689 + y * 1.8758 + z * 0.0415;
    let b = x * 0.0557 + y * -0.2040 + z * 1.0570;

    let compress = |c: f64| {
        if c > 0.0031308 {
            1.055 * c.powf(1.0 / 2.4) - 0.055
        } else {
            12.92 * c
        }
    };

    Rgb::new(
        to_channel(compress(r)),
        to_channel(compress(g)),
        to_channel(compress(b)),
    )
}

pub fn xyz_to_lab(xyz: &Xyz) -> Lab {
    if !xyz.is_valid() {
        tracing::warn!(?xyz, "invalid XYZ color, using black");
        return Lab::default();
    }

    let pivot = |t: f64| {
        if t > LAB_EPSILON {
            t.powf(1.0 / 3.0)
        } else {
            LAB_KAPPA * t + LAB_OFFSET
        }
    };
    let x = pivot(xyz.x / REF_X);
    let y = pivot(xyz.y / REF_Y);
    let z = pivot(xyz.z / REF_Z);

    Lab::new(
        round2(116.0 * y - 16.0).clamp(0.0, 100.0),
        round2(500.0 * (x - y)),
        round2(200.0 * (y - z)),
    )
}

pub fn lab_to_xyz(lab: &Lab) -> Xyz {
    if !lab.is_valid() {
        tracing::warn!(?lab, "invalid Lab color, using black");
        return Xyz::default();
    }

    let y = (lab.l + 16.0) / 116.0;
    let x = lab.a / 500.0 + y;
    let z = y - lab.b / 200.0;

    let unpivot = |t: f64| {
        let cube = t.powi(3);
        if cube > LAB_EPSILON {
            cube
        } else {
            (t - LAB_OFFSET) / LAB_KAPPA
        }
    };

    Xyz::new(unpivot(x) * REF_X, unpivot(y) * REF_Y, unpivot(z) * REF_Z)
}

pub fn rgb_to_lab(rgb: &Rgb) -> Lab {
    xyz_to_lab(&rgb_to_xyz(rgb))
}

pub fn lab_to_rgb(lab: &Lab) -> Rgb {
    xyz_to_rgb(&lab_to_xyz(lab))
}

/// Composes a conversion from a "to RGB" and a "from RGB" half.
macro_rules! via_rgb {
    ($($name:ident: $from:ty => $to:ty = $into_rgb:ident, $from_rgb:ident;)*) => {
        $(
            #[doc = concat!(
                "Converts [`", stringify!($from), "`] to [`", stringify!($to), "`] through RGB."
            )]
            pub fn $name(value: &$from) -> $to {
                $from_rgb(&$into_rgb(value))
            }
        )*
    };
}

via_rgb! {
    hex_to_hsl: Hex => Hsl = hex_to_rgb, rgb_to_hsl;
    hex_to_hsv: Hex => Hsv = hex_to_rgb, rgb_to_hsv;
    hex_to_cmyk: Hex => Cmyk = hex_to_rgb, rgb_to_cmyk;
    hex_to_lab: Hex => Lab = hex_to_rgb, rgb_to_lab;
    hsl_to_hex: Hsl => Hex = hsl_to_rgb, rgb_to_hex;
    hsl_to_hsv: Hsl => Hsv = hsl_to_rgb, rgb_to_hsv;
    hsl_to_cmyk: Hsl => Cmyk = hsl_to_rgb, rgb_to_cmyk;
    hsl_to_lab: Hsl => Lab = hsl_to_rgb, rgb_to_lab;
    hsv_to_hex: Hsv => Hex = hsv_to_rgb, rgb_to_hex;
    hsv_to_hsl: Hsv => Hsl = hsv_to_rgb, rgb_to_hsl;
    hsv_to_cmyk: Hsv => Cmyk = hsv_to_rgb, rgb_to_cmyk;
    hsv_to_lab: Hsv => Lab = hsv_to_rgb, rgb_to_lab;
    cmyk_to_hex: Cmyk => Hex = cmyk_to_rgb, rgb_to_hex;
    cmyk_to_hsl: Cmyk => Hsl = cmyk_to_rgb, rgb_to_hsl;
    cmyk_to_hsv: Cmyk => Hsv = cmyk_to_rgb, rgb_to_hsv;
    cmyk_to_lab: Cmyk => Lab = cmyk_to_rgb, rgb_to_lab;
    lab_to_hex: Lab => Hex = lab_to_rgb, rgb_to_hex;
    lab_to_hsl: Lab => Hsl = lab_to_rgb, rgb_to_hsl;
    lab_to_hsv: Lab => Hsv = lab_to_rgb, rgb_to_hsv;
    lab_to_cmyk: Lab => Cmyk = lab_to_rgb, rgb_to_cmyk;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // Helper function to compare floats with epsilon
    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb(&Hex::new("#FF0000")), Rgb::new(255, 0, 0));
        assert_eq!(hex_to_rgb(&Hex::new("ff8000")), Rgb::new(255, 128, 0));
        assert_eq!(hex_to_rgb(&Hex::new("#0f0")), Rgb::new(0, 255, 0));
    }

    #[test]
    fn test_malformed_hex_is_black() {
        for bad in ["", "#", "#12345", "#GGGGGG", "#1234567", "red"] {
            assert_eq!(hex_to_rgb(&Hex::new(bad)), Rgb::default(), "input {bad:?}");
        }
    }

    #[test]
    fn test_rgb_to_hex_is_zero_padded_uppercase() {
        assert_eq!(rgb_to_hex(&Rgb::new(1, 171, 255)).as_str(), "#01ABFF");
        assert_eq!(rgb_to_hex(&Rgb::new(0, 0, 0)).as_str(), "#000000");
    }

    #[test]
    fn test_rgb_to_hsl() {
        assert_eq!(rgb_to_hsl(&Rgb::new(255, 0, 0)), Hsl::new(0.0, 100.0, 50.0));
        assert_eq!(rgb_to_hsl(&Rgb::new(0, 0, 255)), Hsl::new(240.0, 100.0, 50.0));
        assert_eq!(rgb_to_hsl(&Rgb::new(0, 255, 0)), Hsl::new(120.0, 100.0, 50.0));
        assert_eq!(rgb_to_hsl(&Rgb::new(128, 128, 128)), Hsl::new(0.0, 0.0, 50.2));
    }

    #[test]
    fn test_hue_branch_wraps_for_magenta_side() {
        // red is max and blue > green, so the red branch adds a full turn
        let hsl = rgb_to_hsl(&Rgb::new(255, 0, 128));
        assert!(approx_eq(hsl.hue, 329.88, 0.01), "hue {}", hsl.hue);
        assert!(hsl.hue < 360.0);
    }

    #[test]
    fn test_hsl_to_rgb() {
        assert_eq!(hsl_to_rgb(&Hsl::new(0.0, 100.0, 50.0)), Rgb::new(255, 0, 0));
        assert_eq!(hsl_to_rgb(&Hsl::new(180.0, 100.0, 50.0)), Rgb::new(0, 255, 255));
        assert_eq!(hsl_to_rgb(&Hsl::new(0.0, 0.0, 100.0)), Rgb::new(255, 255, 255));
        // hue is circular
        assert_eq!(hsl_to_rgb(&Hsl::new(540.0, 100.0, 50.0)), Rgb::new(0, 255, 255));
    }

    #[test]
    fn test_hsv_round_trip_primary_sectors() {
        for (rgb, hue) in [
            (Rgb::new(255, 0, 0), 0.0),
            (Rgb::new(255, 255, 0), 60.0),
            (Rgb::new(0, 255, 0), 120.0),
            (Rgb::new(0, 255, 255), 180.0),
            (Rgb::new(0, 0, 255), 240.0),
            (Rgb::new(255, 0, 255), 300.0),
        ] {
            let hsv = rgb_to_hsv(&rgb);
            assert_eq!(hsv, Hsv::new(hue, 100.0, 100.0));
            assert_eq!(hsv_to_rgb(&hsv), rgb);
        }
    }

    #[test]
    fn test_cmyk() {
        assert_eq!(rgb_to_cmyk(&Rgb::new(0, 0, 0)), Cmyk::new(0.0, 0.0, 0.0, 100.0));
        assert_eq!(rgb_to_cmyk(&Rgb::new(255, 0, 0)), Cmyk::new(0.0, 100.0, 100.0, 0.0));
        assert_eq!(cmyk_to_rgb(&Cmyk::new(0.0, 100.0, 100.0, 0.0)), Rgb::new(255, 0, 0));
        assert_eq!(cmyk_to_rgb(&Cmyk::new(0.0, 0.0, 0.0, 100.0)), Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_lab_reference_colors() {
        let red = rgb_to_lab(&Rgb::new(255, 0, 0));
        assert!(approx_eq(red.l, 53.23, 0.02), "L {}", red.l);
        assert!(approx_eq(red.a, 80.11, 0.02), "a {}", red.a);
        assert!(approx_eq(red.b, 67.22, 0.02), "b {}", red.b);

        let white = rgb_to_lab(&Rgb::new(255, 255, 255));
        assert!(approx_eq(white.l, 100.0, 0.02));
        assert!(white.a.abs() < 0.05 && white.b.abs() < 0.05);

        assert_eq!(rgb_to_lab(&Rgb::new(0, 0, 0)), Lab::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_lab_round_trip() {
        for rgb in [
            Rgb::new(255, 0, 0),
            Rgb::new(0, 128, 255),
            Rgb::new(18, 52, 86),
            Rgb::new(250, 250, 250),
            Rgb::new(3, 3, 3),
        ] {
            let back = lab_to_rgb(&rgb_to_lab(&rgb));
            assert!(
                (back.red as i16 - rgb.red as i16).abs() <= 1
                    && (back.green as i16 - rgb.green as i16).abs() <= 1
                    && (back.blue as i16 - rgb.blue as i16).abs() <= 1,
                "{rgb:?} came back as {back:?}"
            );
        }
    }

    #[test]
    fn test_fail_safe_defaults() {
        assert_eq!(hsl_to_rgb(&Hsl::new(f64::NAN, 50.0, 50.0)), Rgb::default());
        assert_eq!(hsl_to_rgb(&Hsl::new(10.0, 150.0, 50.0)), Rgb::default());
        assert_eq!(hsv_to_rgb(&Hsv::new(10.0, 50.0, -1.0)), Rgb::default());
        assert_eq!(cmyk_to_rgb(&Cmyk::new(f64::INFINITY, 0.0, 0.0, 0.0)), Rgb::default());
        assert_eq!(lab_to_rgb(&Lab::new(f64::NAN, 0.0, 0.0)), Rgb::default());
        assert_eq!(xyz_to_lab(&Xyz::new(f64::NAN, 1.0, 1.0)), Lab::default());

        assert_eq!(hsl_to_cmyk(&Hsl::new(0.0, f64::NAN, 0.0)), Cmyk::default());
        assert_eq!(hex_to_hsl(&Hex::new("nope")), Hsl::default());
        assert_eq!(lab_to_hex(&Lab::new(200.0, 0.0, 0.0)).as_str(), "#000000");
    }

    #[test]
    fn test_composed_conversions() {
        assert_eq!(hsl_to_cmyk(&Hsl::new(0.0, 100.0, 50.0)), Cmyk::new(0.0, 100.0, 100.0, 0.0));
        assert_eq!(hex_to_hsv(&Hex::new("#00FF00")), Hsv::new(120.0, 100.0, 100.0));
        assert_eq!(cmyk_to_hex(&Cmyk::new(100.0, 0.0, 0.0, 0.0)).as_str(), "#00FFFF");
        assert_eq!(hsv_to_hsl(&Hsv::new(240.0, 100.0, 100.0)), Hsl::new(240.0, 100.0, 50.0));
    }
}
