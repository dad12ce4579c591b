use crate::error::FigLayoutTextError;
use ordered_float::OrderedFloat;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::VariantNames;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, VariantNames)]
#[cfg_attr(feature = "serde", serde(untagged))]
#[strum(serialize_all = "snake_case")]
pub enum FontWeight {
    Name(FontWeightNameSpec),
    Number(f32),
}

impl std::hash::Hash for FontWeight {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            Self::Name(spec) => spec.hash(state),
            Self::Number(num) => OrderedFloat::from(*num).hash(state),
        }
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::Name(FontWeightNameSpec::Normal)
    }
}

impl FontWeight {
    pub fn bold() -> Self {
        Self::Name(FontWeightNameSpec::Bold)
    }

    /// Numeric weight on the 1-1000 scale
    pub fn value(&self) -> f32 {
        match self {
            Self::Name(FontWeightNameSpec::Normal) => 400.0,
            Self::Name(FontWeightNameSpec::Bold) => 700.0,
            Self::Number(w) => *w,
        }
    }
}

impl FromStr for FontWeight {
    type Err = FigLayoutTextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" | "regular" => Ok(Self::Name(FontWeightNameSpec::Normal)),
            "bold" => Ok(Self::Name(FontWeightNameSpec::Bold)),
            other => match other.parse::<f32>() {
                Ok(w) if (1.0..=1000.0).contains(&w) => Ok(Self::Number(w)),
                _ => Err(FigLayoutTextError::InvalidFontWeight(s.to_string())),
            },
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, VariantNames)]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "snake_case")]
pub enum FontWeightNameSpec {
    #[default]
    Normal,
    Bold,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, VariantNames)]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "snake_case")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

impl FromStr for FontStyle {
    type Err = FigLayoutTextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "italic" | "oblique" => Ok(Self::Italic),
            _ => Err(FigLayoutTextError::InvalidFontStyle(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_font_weight() {
        assert_eq!("bold".parse::<FontWeight>().unwrap(), FontWeight::bold());
        assert_eq!("Normal".parse::<FontWeight>().unwrap(), FontWeight::default());
        assert_eq!("600".parse::<FontWeight>().unwrap(), FontWeight::Number(600.0));
        assert_eq!(FontWeight::bold().value(), 700.0);
        assert!("heavy".parse::<FontWeight>().is_err());
        assert!("0".parse::<FontWeight>().is_err());
    }

    #[test]
    fn test_parse_font_style() {
        assert_eq!("italic".parse::<FontStyle>().unwrap(), FontStyle::Italic);
        assert!("slanted".parse::<FontStyle>().is_err());
    }
}
