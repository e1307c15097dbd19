//! Swatch rendering collaborators.
//!
//! Palette generation pushes every color it produces through a
//! [`SwatchRenderer`], in order, with the swatch index passed explicitly.
//! [`SwatchBoard`] records those calls, [`PaletteView`] paints a finished
//! palette into a ratatui buffer and [`AnsiPalette`] prints it with
//! truecolor escapes.

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};
use std::fmt;

use crate::{
    colors::{label_color, Color, ColorFormat, SwatchColorize},
    palette::Palette,
};

/// Receives the output of a palette generation, one swatch at a time.
pub trait SwatchRenderer {
    /// Sets the background of swatch `index` to a CSS color string.
    fn render_swatch(&mut self, index: usize, css: &str);

    /// Writes the textual form of `color` into swatch `index`.
    fn populate_color_text_output_box(&mut self, color: &Color, index: usize);

    /// Shows a user-facing warning, such as a refused swatch count.
    fn alert(&mut self, message: &str);
}

impl<T: SwatchRenderer + ?Sized> SwatchRenderer for &mut T {
    fn render_swatch(&mut self, index: usize, css: &str) {
        (**self).render_swatch(index, css);
    }

    fn populate_color_text_output_box(&mut self, color: &Color, index: usize) {
        (**self).populate_color_text_output_box(color, index);
    }

    fn alert(&mut self, message: &str) {
        (**self).alert(message);
    }
}

/// One swatch as last written by a renderer call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwatchCell {
    pub background: Option<String>,
    pub text: Option<String>,
}

/// In-memory renderer that keeps every swatch and alert it receives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwatchBoard {
    pub swatches: Vec<SwatchCell>,
    pub alerts: Vec<String>,
}

impl SwatchBoard {
    pub fn new() -> Self {
        Self::default()
    }

    fn cell_mut(&mut self, index: usize) -> &mut SwatchCell {
        if self.swatches.len() <= index {
            self.swatches.resize_with(index + 1, SwatchCell::default);
        }
        &mut self.swatches[index]
    }

    pub fn backgrounds(&self) -> Vec<&str> {
        self.swatches
            .iter()
            .filter_map(|cell| cell.background.as_deref())
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.swatches
            .iter()
            .filter_map(|cell| cell.text.as_deref())
            .collect()
    }
}

impl SwatchRenderer for SwatchBoard {
    fn render_swatch(&mut self, index: usize, css: &str) {
        self.cell_mut(index).background = Some(css.to_string());
    }

    fn populate_color_text_output_box(&mut self, color: &Color, index: usize) {
        self.cell_mut(index).text = Some(color.to_string());
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

/// Ratatui widget laying a palette out as equal-width vertical bands.
#[derive(Debug, Clone, Copy)]
pub struct PaletteView<'a> {
    palette: &'a Palette,
    label_format: ColorFormat,
}

impl<'a> PaletteView<'a> {
    pub fn new(palette: &'a Palette) -> Self {
        Self {
            palette,
            label_format: palette.color_space,
        }
    }

    /// Labels swatches in `format` instead of the palette's color space.
    pub fn label_format(mut self, format: ColorFormat) -> Self {
        self.label_format = format;
        self
    }
}

impl Widget for PaletteView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let swatches = &self.palette.swatches;
        if swatches.is_empty() || area.is_empty() {
            return;
        }

        let total = area.width as usize;
        let band = (total / swatches.len()).max(1);

        for (i, swatch) in swatches.iter().enumerate() {
            let offset = i * band;
            if offset >= total {
                break;
            }
            // the last band absorbs the remainder
            let width = if i + 1 == swatches.len() {
                total - offset
            } else {
                band.min(total - offset)
            };
            let rect = Rect::new(area.x + offset as u16, area.y, width as u16, area.height);

            let style = Style::default()
                .bg(swatch.rgb.to_ratatui())
                .fg(label_color(swatch).to_ratatui());
            buf.set_style(rect, style);

            let label = swatch.get(self.label_format).to_string();
            buf.set_stringn(
                rect.x,
                rect.y + rect.height / 2,
                label,
                rect.width as usize,
                style,
            );
        }
    }
}

/// Displays a palette as a row of truecolor swatches.
#[derive(Debug, Clone, Copy)]
pub struct AnsiPalette<'a> {
    palette: &'a Palette,
}

impl<'a> AnsiPalette<'a> {
    pub fn new(palette: &'a Palette) -> Self {
        Self { palette }
    }
}

impl fmt::Display for AnsiPalette<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, swatch) in self.palette.swatches.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            let text = format!(" {} ", swatch.get(self.palette.color_space));
            f.write_str(&text.on_swatch(swatch))?;
        }
        Ok(())
    }
}
