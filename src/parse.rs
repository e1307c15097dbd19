//! Parsing of custom colors written in the CSS-like text forms.
//!
//! Accepts `#RRGGBB` (or `#RGB`), `rgb(r,g,b)`, `hsl(h,s%,l%)`,
//! `hsv(h,s%,v%)`, `cmyk(c%,m%,y%,k%)` and `lab(l,a,b)`. Whitespace around
//! components is ignored and `%` signs are optional.

use std::str::FromStr;

use crate::{
    colors::{Cmyk, Color, ColorFormat, Hex, Hsl, Hsv, Lab, Rgb},
    convert,
    error::HuewheelError,
};

/// A numeric component and where it sits in the source text.
struct Component {
    value: f64,
    start: usize,
    len: usize,
}

/// Splits `name(a,b,...)` into its numeric components.
fn components(
    src: &str,
    format: ColorFormat,
    expected: usize,
) -> Result<Vec<Component>, HuewheelError> {
    let open = src
        .find('(')
        .ok_or_else(|| HuewheelError::parse(src, (0, src.len()), "expected '('"))?;
    let close = src
        .rfind(')')
        .filter(|close| *close > open && src[close + 1..].trim().is_empty())
        .ok_or_else(|| {
            HuewheelError::parse(src, (open, src.len() - open), "expected a closing ')'")
        })?;

    let mut found = Vec::with_capacity(expected);
    let mut start = open + 1;
    for raw in src[open + 1..close].split(',') {
        let leading = raw.len() - raw.trim_start().len();
        let text = raw.trim();
        let span_start = start + leading;
        let number = text.strip_suffix('%').unwrap_or(text).trim_end();
        let value = number.parse::<f64>().ok().filter(|v| v.is_finite()).ok_or_else(|| {
            HuewheelError::parse(
                src,
                (span_start, text.len().max(1)),
                format!("'{}' is not a number", text),
            )
        })?;
        found.push(Component {
            value,
            start: span_start,
            len: text.len().max(1),
        });
        start += raw.len() + 1;
    }

    if found.len() != expected {
        return Err(HuewheelError::parse(
            src,
            (open, close + 1 - open),
            format!(
                "{} takes {} components, found {}",
                format,
                expected,
                found.len()
            ),
        ));
    }
    Ok(found)
}

fn ranged(
    src: &str,
    component: &Component,
    low: f64,
    high: f64,
    what: &str,
) -> Result<f64, HuewheelError> {
    if (low..=high).contains(&component.value) {
        Ok(component.value)
    } else {
        Err(HuewheelError::parse(
            src,
            (component.start, component.len),
            format!("{} must lie in [{}, {}]", what, low, high),
        ))
    }
}

fn parse_function(src: &str, format: ColorFormat) -> Result<Color, HuewheelError> {
    match format {
        ColorFormat::Rgb => {
            let c = components(src, format, 3)?;
            let channel = |i: usize| -> Result<u8, HuewheelError> {
                let value = ranged(src, &c[i], 0.0, 255.0, "rgb channels")?;
                Ok(value.round() as u8)
            };
            Ok(Color::Rgb(Rgb::new(channel(0)?, channel(1)?, channel(2)?)))
        }
        ColorFormat::Hsl => {
            let c = components(src, format, 3)?;
            Ok(Color::Hsl(Hsl::new(
                c[0].value,
                ranged(src, &c[1], 0.0, 100.0, "saturation")?,
                ranged(src, &c[2], 0.0, 100.0, "lightness")?,
            )))
        }
        ColorFormat::Hsv => {
            let c = components(src, format, 3)?;
            Ok(Color::Hsv(Hsv::new(
                c[0].value,
                ranged(src, &c[1], 0.0, 100.0, "saturation")?,
                ranged(src, &c[2], 0.0, 100.0, "value")?,
            )))
        }
        ColorFormat::Cmyk => {
            let c = components(src, format, 4)?;
            let ink = |i: usize| ranged(src, &c[i], 0.0, 100.0, "cmyk channels");
            Ok(Color::Cmyk(Cmyk::new(ink(0)?, ink(1)?, ink(2)?, ink(3)?)))
        }
        ColorFormat::Lab => {
            let c = components(src, format, 3)?;
            Ok(Color::Lab(Lab::new(
                ranged(src, &c[0], 0.0, 100.0, "lightness")?,
                c[1].value,
                c[2].value,
            )))
        }
        ColorFormat::Hex => Err(HuewheelError::parse(
            src,
            (0, src.len()),
            "hex colors are written as #RRGGBB",
        )),
    }
}

impl FromStr for Color {
    type Err = HuewheelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.starts_with('#') {
            let hex = Hex::new(trimmed);
            return match convert::parse_hex(&hex) {
                Some(_) => Ok(Color::Hex(hex)),
                None => Err(HuewheelError::parse(
                    s,
                    (0, s.len()),
                    "expected #RGB or #RRGGBB",
                )),
            };
        }

        let name_end = trimmed.find('(').unwrap_or(trimmed.len());
        let format = trimmed[..name_end]
            .trim()
            .parse::<ColorFormat>()
            .map_err(|_| {
                HuewheelError::parse(s, (0, name_end.max(1).min(s.len())), "unknown color function")
            })?;
        parse_function(trimmed, format)
    }
}
