use garmentkit_core::Size;
use serde::{Deserialize, Serialize};

/// Measures the unscaled extent of a text element.
///
/// The rendering surface owns real font metrics; the designer only needs
/// the natural box to clamp and serialize against.
pub trait TextMeasure {
    fn measure(&self, text: &str, font_family: &str, font_size: f64) -> Size;
}

/// Fixed-advance estimate used when no surface metrics are available.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproximateTextMeasure {
    /// Average glyph advance as a fraction of the font size.
    pub advance_ratio: f64,
    /// Line height as a multiple of the font size.
    pub line_height: f64,
}

impl Default for ApproximateTextMeasure {
    fn default() -> Self {
        Self {
            advance_ratio: 0.6,
            line_height: 1.16,
        }
    }
}

impl TextMeasure for ApproximateTextMeasure {
    fn measure(&self, text: &str, _font_family: &str, font_size: f64) -> Size {
        let lines: Vec<&str> = text.split('\n').collect();
        let longest = lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0)
            .max(1);
        Size::new(
            longest as f64 * font_size * self.advance_ratio,
            lines.len() as f64 * font_size * self.line_height,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    pub text: String,
    pub font_family: String,
    pub fill_color: String,
    pub font_size: f64,
    /// Unscaled extent, refreshed whenever text, font or size changes.
    pub natural_size: Size,
}

impl TextElement {
    pub fn new(
        text: impl Into<String>,
        font_family: impl Into<String>,
        fill_color: impl Into<String>,
        font_size: f64,
        measure: &dyn TextMeasure,
    ) -> Self {
        let mut element = Self {
            text: text.into(),
            font_family: font_family.into(),
            fill_color: fill_color.into(),
            font_size,
            natural_size: Size::default(),
        };
        element.remeasure(measure);
        element
    }

    pub fn remeasure(&mut self, measure: &dyn TextMeasure) {
        self.natural_size = measure.measure(&self.text, &self.font_family, self.font_size);
    }
}
