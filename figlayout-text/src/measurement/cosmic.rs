use cosmic_text::{fontdb::Database, Attrs, Buffer, Family, FontSystem, Metrics};
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use super::{TextBounds, TextMeasurementConfig, TextMeasurer};
use crate::types::FontStyle;

use lazy_static::lazy_static;

lazy_static! {
    pub static ref FONT_SYSTEM: Mutex<FontSystem> = Mutex::new(build_font_system());
}

fn build_font_system() -> FontSystem {
    let mut font_system = FontSystem::new();
    setup_default_fonts(font_system.db_mut());
    font_system
}

fn lock_font_system() -> MutexGuard<'static, FontSystem> {
    FONT_SYSTEM
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn setup_default_fonts(fontdb: &mut Database) {
    let families: HashSet<String> = fontdb
        .faces()
        .flat_map(|face| {
            face.families
                .iter()
                .map(|(fam, _lang)| fam.clone())
                .collect::<Vec<_>>()
        })
        .collect();

    // The default plotting fonts come first
    for family in ["DejaVu Sans", "Helvetica", "Arial", "Liberation Sans"] {
        if families.contains(family) {
            fontdb.set_sans_serif_family(family);
            break;
        }
    }

    for family in ["DejaVu Serif", "Times New Roman", "Times", "Liberation Serif"] {
        if families.contains(family) {
            fontdb.set_serif_family(family);
            break;
        }
    }

    for family in ["DejaVu Sans Mono", "Courier New", "Liberation Mono"] {
        if families.contains(family) {
            fontdb.set_monospace_family(family);
            break;
        }
    }
}

/// Measures text by shaping it with system fonts
#[derive(Debug, Default, Clone, Copy)]
pub struct CosmicTextMeasurer {}

impl CosmicTextMeasurer {
    pub fn new() -> Self {
        Self {}
    }
}

impl TextMeasurer for CosmicTextMeasurer {
    fn measure_text_bounds(&self, config: &TextMeasurementConfig) -> TextBounds {
        if config.text.is_empty() {
            return TextBounds::empty();
        }
        let mut font_system = lock_font_system();
        let buffer = make_cosmic_text_buffer(config, &mut font_system);
        measure_text_buffer(&buffer)
    }
}

pub fn measure_text_buffer(buffer: &Buffer) -> TextBounds {
    let runs = buffer.layout_runs().collect::<Vec<_>>();
    if runs.is_empty() {
        return TextBounds::empty();
    }

    let mut max_ascent = 0.0;
    let mut max_descent = 0.0;
    let mut max_line_height = 0.0;
    let mut min_x = f32::MAX;
    let mut max_x = f32::MIN;

    for run in &runs {
        let ascent = run.line_y - run.line_top;
        max_ascent = f32::max(max_ascent, ascent);
        max_descent = f32::max(max_descent, run.line_height - ascent);
        max_line_height = f32::max(max_line_height, run.line_height);

        for glyph in run.glyphs {
            min_x = min_x.min(glyph.x);
            max_x = max_x.max(glyph.x + glyph.w);
        }
    }

    let width = if min_x == f32::MAX { 0.0 } else { max_x - min_x };
    let extra_lines = (runs.len() - 1) as f32;

    TextBounds {
        width,
        height: max_ascent + max_descent + extra_lines * max_line_height,
        ascent: max_ascent,
        descent: max_descent,
        line_height: max_line_height,
    }
}

pub fn make_cosmic_text_buffer(
    config: &TextMeasurementConfig,
    font_system: &mut FontSystem,
) -> Buffer {
    let mut attrs = Attrs::new();
    attrs.family = match config.font.to_lowercase().as_str() {
        "serif" => Family::Serif,
        "sans serif" | "sans-serif" => Family::SansSerif,
        "cursive" => Family::Cursive,
        "fantasy" => Family::Fantasy,
        "monospace" => Family::Monospace,
        _ => Family::Name(config.font),
    };
    attrs.weight = cosmic_text::Weight(config.font_weight.value() as u16);
    attrs.style = match config.font_style {
        FontStyle::Normal => cosmic_text::Style::Normal,
        FontStyle::Italic => cosmic_text::Style::Italic,
    };

    // Points are used as the pixel unit, so extents come back in points
    let metrics = Metrics::new(config.font_size, config.font_size * 1.2);
    let mut buffer = Buffer::new(font_system, metrics);
    buffer.set_text(
        font_system,
        config.text,
        attrs,
        cosmic_text::Shaping::Advanced,
    );
    buffer.set_size(font_system, None, None);
    buffer.shape_until_scroll(font_system, false);
    buffer
}

pub fn register_font_directory(dir: &str) {
    let mut font_system = lock_font_system();
    let fontdb = font_system.db_mut();
    fontdb.load_fonts_dir(dir);
    setup_default_fonts(fontdb);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FontWeight, FontWeightNameSpec};

    #[test]
    fn test_cosmic_text_measurer() {
        let measurer = CosmicTextMeasurer::new();
        let config = TextMeasurementConfig {
            text: "Hello, World!",
            font: "sans-serif",
            font_size: 10.0,
            font_weight: &FontWeight::Name(FontWeightNameSpec::Normal),
            font_style: &FontStyle::Normal,
        };

        let bounds = measurer.measure_text_bounds(&config);
        assert!(bounds.width >= 0.0);
        assert!(bounds.line_height > 0.0);
    }
}
