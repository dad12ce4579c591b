use crate::error::FigLayoutThemeError;
use figlayout_common::units::MM_PER_INCH;
use palette::Srgb;
use std::str::FromStr;

/// Width over height of a golden rectangle
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// Figure widths in inches of common publication formats
pub mod figwidth {
    use super::MM_PER_INCH;

    pub const NATURE_1COL: f64 = 3.54;
    pub const NATURE_2COL: f64 = 7.09;
    pub const PRL_1COL: f64 = 3.375;
    pub const PRL_2COL: f64 = 6.75;
    pub const SCIENCE_1COL: f64 = 2.25;
    pub const SCIENCE_2COL: f64 = 4.75;
    pub const SCIENCE_3COL: f64 = 7.25;
    pub const A4: f64 = 210.0 / MM_PER_INCH;
    pub const A5: f64 = 148.0 / MM_PER_INCH;
}

/// An ordered table of named hex colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    entries: &'static [(&'static str, &'static str)],
}

impl Palette {
    const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, hex)| *hex)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    /// Hex codes in table order
    pub fn hex_codes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(_, hex)| *hex)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub const COLORS: Palette = Palette::new(&[
    ("red", "#AE1117"),
    ("teal", "#008081"),
    ("blue", "#376EB5"),
    ("green", "#007F00"),
    ("grey", "#9D9D9C"),
    ("orange", "#ED7800"),
    ("pink", "#D4B9DA"),
    ("yellow", "#FCE205"),
    ("lemon", "#EFFD5F"),
    ("corn", "#E4CD05"),
    ("purple", "#CA8DFD"),
    ("dark_purple", "#9300FF"),
    ("forest_green", "#0B6623"),
    ("bright_green", "#3BB143"),
]);

/// Color-blind safe palette of Okabe and Ito
pub const OKABE_ITO: Palette = Palette::new(&[
    ("blue", "#56b4e9"),
    ("orange", "#e69f00"),
    ("green", "#009e73"),
    ("yellow", "#f0e442"),
    ("darkblue", "#0072b2"),
    ("darkorange", "#d55e00"),
    ("violet", "#cc79a7"),
    ("black", "#000000"),
]);

pub const OKABE_ITO_MUTED: Palette = Palette::new(&[
    ("sandstone", "#D9CBBE"),
    ("mist", "#C3CDD6"),
    ("mauve", "#CAB9C1"),
    ("ivory", "#F0EDD6"),
]);

pub const OKABE_ITO_ACCENT: Palette = Palette::new(&[
    ("blue", "#044F7E"),
    ("red", "#954000"),
    ("green", "#026D4E"),
]);

/// Parse `#rrggbb` (or `rrggbb`) into a floating point sRGB color
pub fn parse_hex(hex: &str) -> Result<Srgb<f32>, FigLayoutThemeError> {
    Srgb::<u8>::from_str(hex)
        .map(|c| c.into_format())
        .map_err(|_| FigLayoutThemeError::InvalidColor(hex.to_string()))
}

/// Lowercase `#rrggbb` code of a color
pub fn to_hex(color: Srgb<f32>) -> String {
    let c: Srgb<u8> = color.into_format();
    format!("#{:02x}{:02x}{:02x}", c.red, c.green, c.blue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_palette_lookup() {
        assert_eq!(COLORS.get("teal"), Some("#008081"));
        assert_eq!(COLORS.get("magenta"), None);
        assert_eq!(OKABE_ITO.len(), 8);
        assert_eq!(OKABE_ITO.hex_codes().next(), Some("#56b4e9"));
        assert_eq!(OKABE_ITO_ACCENT.names().collect::<Vec<_>>(), ["blue", "red", "green"]);
    }

    #[test]
    fn test_hex_round_trip() {
        let color = parse_hex("#AE1117").unwrap();
        assert_approx_eq!(f32, color.red, 174.0 / 255.0);
        assert_eq!(to_hex(color), "#ae1117");
        assert!(matches!(
            parse_hex("#12"),
            Err(FigLayoutThemeError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_constants() {
        assert_approx_eq!(f64, GOLDEN_RATIO, (1.0 + 5f64.sqrt()) / 2.0);
        assert_approx_eq!(f64, figwidth::A4, 8.267716535433072, epsilon = 1e-12);
    }
}
