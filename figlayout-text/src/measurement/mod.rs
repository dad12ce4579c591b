use crate::types::{FontStyle, FontWeight};

#[cfg(feature = "cosmic-text")]
extern crate lazy_static;

#[cfg(feature = "cosmic-text")]
pub mod cosmic;

/// Core trait for text measurement functionality
pub trait TextMeasurer: Send + Sync {
    /// Measures the bounding dimensions for a text string with given configuration
    fn measure_text_bounds(&self, config: &TextMeasurementConfig) -> TextBounds;
}

/// Configuration needed for text measurement
#[derive(Debug, Clone)]
pub struct TextMeasurementConfig<'a> {
    /// The text string to measure, lines separated by `\n`
    pub text: &'a str,
    /// Font family name
    pub font: &'a str,
    /// Font size in points
    pub font_size: f32,
    pub font_weight: &'a FontWeight,
    pub font_style: &'a FontStyle,
}

/// Results from text measurement, in points
#[derive(Debug, Clone, PartialEq)]
pub struct TextBounds {
    /// Total width of the text
    pub width: f32,
    /// Total height from top to bottom
    pub height: f32,
    /// Distance from top to baseline
    pub ascent: f32,
    /// Distance from bottom to baseline
    pub descent: f32,
    /// Distance from top to where the top of the next line would be
    pub line_height: f32,
}

impl TextBounds {
    pub fn empty() -> Self {
        TextBounds {
            width: 0.0,
            height: 0.0,
            ascent: 0.0,
            descent: 0.0,
            line_height: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }
}

/// Measurer that estimates extents from font metrics averages, without
/// loading any fonts.
///
/// Every glyph advances by `advance` em, lines are `line_height` em apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproxTextMeasurer {
    pub advance: f32,
    pub ascent: f32,
    pub descent: f32,
    pub line_height: f32,
    /// Extra advance factor applied to bold text
    pub bold_factor: f32,
}

impl Default for ApproxTextMeasurer {
    fn default() -> Self {
        Self {
            advance: 0.6,
            ascent: 0.8,
            descent: 0.2,
            line_height: 1.2,
            bold_factor: 1.1,
        }
    }
}

impl ApproxTextMeasurer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TextMeasurer for ApproxTextMeasurer {
    fn measure_text_bounds(&self, config: &TextMeasurementConfig) -> TextBounds {
        if config.text.is_empty() {
            return TextBounds::empty();
        }
        let size = config.font_size;
        let weight_factor = if config.font_weight.value() >= 600.0 {
            self.bold_factor
        } else {
            1.0
        };

        let lines: Vec<&str> = config.text.lines().collect();
        let max_chars = lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);

        let ascent = self.ascent * size;
        let descent = self.descent * size;
        let line_height = self.line_height * size;
        let extra_lines = lines.len().saturating_sub(1) as f32;

        TextBounds {
            width: max_chars as f32 * self.advance * size * weight_factor,
            height: ascent + descent + extra_lines * line_height,
            ascent,
            descent,
            line_height,
        }
    }
}

#[cfg(feature = "cosmic-text")]
pub fn default_text_measurer() -> impl TextMeasurer {
    crate::measurement::cosmic::CosmicTextMeasurer::new()
}

#[cfg(not(feature = "cosmic-text"))]
pub fn default_text_measurer() -> impl TextMeasurer {
    ApproxTextMeasurer::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    fn config(text: &str) -> TextMeasurementConfig<'_> {
        TextMeasurementConfig {
            text,
            font: "sans-serif",
            font_size: 10.0,
            font_weight: &FontWeight::Name(crate::types::FontWeightNameSpec::Normal),
            font_style: &FontStyle::Normal,
        }
    }

    #[test]
    fn test_approx_single_line() {
        let bounds = ApproxTextMeasurer::new().measure_text_bounds(&config("0.25"));
        assert_approx_eq!(f32, bounds.width, 24.0);
        assert_approx_eq!(f32, bounds.height, 10.0);
        assert_approx_eq!(f32, bounds.ascent, 8.0);
        assert_approx_eq!(f32, bounds.line_height, 12.0);
    }

    #[test]
    fn test_approx_multi_line() {
        let bounds = ApproxTextMeasurer::new().measure_text_bounds(&config("ab\nabcd"));
        assert_approx_eq!(f32, bounds.width, 24.0);
        assert_approx_eq!(f32, bounds.height, 22.0);
    }

    #[test]
    fn test_empty_and_bold() {
        let measurer = ApproxTextMeasurer::new();
        assert!(measurer.measure_text_bounds(&config("")).is_empty());

        let bold = FontWeight::bold();
        let bounds = measurer.measure_text_bounds(&TextMeasurementConfig {
            font_weight: &bold,
            ..config("abc")
        });
        assert_approx_eq!(f32, bounds.width, 19.8, epsilon = 1e-4);
    }
}
