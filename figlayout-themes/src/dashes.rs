//! Dash patterns that exactly fill a legend handle.
//!
//! A legend handle is `legend_handle_length` font sizes long. Dash patterns
//! are measured in line widths, so a handle fits `font_size *
//! handle_length / line_width` pattern units.

use crate::error::FigLayoutThemeError;
use crate::theme::ThemeParams;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

/// Font sizes relative to the base font size
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, VariantNames)]
#[strum(serialize_all = "kebab-case")]
pub enum NamedFontSize {
    XxSmall,
    XSmall,
    Small,
    Medium,
    Large,
    XLarge,
    XxLarge,
    Larger,
    Smaller,
}

impl NamedFontSize {
    pub fn scaling(&self) -> f64 {
        match self {
            NamedFontSize::XxSmall => 0.579,
            NamedFontSize::XSmall => 0.694,
            NamedFontSize::Small | NamedFontSize::Smaller => 0.833,
            NamedFontSize::Medium => 1.0,
            NamedFontSize::Large | NamedFontSize::Larger => 1.2,
            NamedFontSize::XLarge => 1.44,
            NamedFontSize::XxLarge => 1.728,
        }
    }
}

/// A font size in points or relative to the base font size
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FontSize {
    Points(f64),
    Named(NamedFontSize),
}

impl FontSize {
    pub fn points(&self, base: f64) -> f64 {
        match self {
            FontSize::Points(pts) => *pts,
            FontSize::Named(named) => named.scaling() * base,
        }
    }

    /// Parse a named size such as `"x-small"`
    pub fn parse(value: &str) -> Result<Self, FigLayoutThemeError> {
        Ok(FontSize::Named(figlayout_common::types::parse_choice(
            "fontsize", value,
        )?))
    }
}

impl From<f64> for FontSize {
    fn from(value: f64) -> Self {
        FontSize::Points(value)
    }
}

impl From<NamedFontSize> for FontSize {
    fn from(value: NamedFontSize) -> Self {
        FontSize::Named(value)
    }
}

/// Line and legend geometry a dash pattern is fitted to. Unset values fall
/// back to the theme. `lw` and `lh` are aliases of `linewidth` and
/// `legend_handlelength`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DashOptions {
    pub linewidth: Option<f64>,
    pub lw: Option<f64>,
    pub fontsize: Option<FontSize>,
    pub legend_handlelength: Option<f64>,
    pub lh: Option<f64>,
}

/// Resolved line width, legend font size (points) and handle length
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashGeometry {
    pub line_width: f64,
    pub font_size: f64,
    pub handle_length: f64,
}

impl DashGeometry {
    /// Handle length in line widths
    pub fn total_units(&self) -> f64 {
        self.font_size * self.handle_length / self.line_width
    }
}

impl DashOptions {
    pub fn with_linewidth(mut self, linewidth: f64) -> Self {
        self.linewidth = Some(linewidth);
        self
    }

    pub fn with_fontsize(mut self, fontsize: impl Into<FontSize>) -> Self {
        self.fontsize = Some(fontsize.into());
        self
    }

    pub fn with_legend_handlelength(mut self, length: f64) -> Self {
        self.legend_handlelength = Some(length);
        self
    }

    pub fn resolve(&self, params: &ThemeParams) -> Result<DashGeometry, FigLayoutThemeError> {
        let line_width = pick_alias("linewidth", self.linewidth, "lw", self.lw)?
            .unwrap_or(params.line_width);
        let handle_length = pick_alias(
            "legend_handlelength",
            self.legend_handlelength,
            "lh",
            self.lh,
        )?
        .unwrap_or(params.legend_handle_length);
        let font_size = self
            .fontsize
            .unwrap_or(params.legend_font_size)
            .points(params.font_size);

        if !(line_width > 0.0) {
            return Err(FigLayoutThemeError::InvalidDashPattern(format!(
                "line width must be positive, got {line_width}"
            )));
        }
        Ok(DashGeometry {
            line_width,
            font_size,
            handle_length,
        })
    }
}

fn pick_alias(
    argument: &'static str,
    value: Option<f64>,
    alias: &'static str,
    alias_value: Option<f64>,
) -> Result<Option<f64>, FigLayoutThemeError> {
    match (value, alias_value) {
        (Some(_), Some(_)) => Err(FigLayoutThemeError::AliasConflict { argument, alias }),
        (value, alias_value) => Ok(value.or(alias_value)),
    }
}

/// Dash offset and on/off sequence in line widths
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashPattern {
    pub offset: f64,
    pub pattern: Vec<f64>,
}

impl DashPattern {
    /// On/off sequence in points for a line of `line_width`
    pub fn to_points(&self, line_width: f64) -> Vec<f64> {
        self.pattern.iter().map(|v| v * line_width).collect()
    }
}

/// Unit dots separated by equal gaps, with a dot at both ends of the handle
pub fn dotted(
    options: &DashOptions,
    params: &ThemeParams,
) -> Result<DashPattern, FigLayoutThemeError> {
    let total = options.resolve(params)?.total_units();
    let n_dots = (total / 2.0).ceil();
    if !(n_dots >= 2.0) {
        return Err(FigLayoutThemeError::InvalidDashPattern(format!(
            "a handle of {total} line widths fits fewer than two dots"
        )));
    }
    let space = (total - n_dots) / (n_dots - 1.0);
    Ok(DashPattern {
        offset: 0.0,
        pattern: vec![1.0, space],
    })
}

/// `n_dashes` dashes `ratio` times as long as the gaps between them
pub fn dashed(
    ratio: f64,
    n_dashes: usize,
    options: &DashOptions,
    params: &ThemeParams,
) -> Result<DashPattern, FigLayoutThemeError> {
    let total = options.resolve(params)?.total_units();
    if n_dashes == 0 || !(ratio > 0.0) {
        return Err(FigLayoutThemeError::InvalidDashPattern(format!(
            "dashed lines need at least one dash and a positive ratio, got n_dashes={n_dashes} and ratio={ratio}"
        )));
    }
    let n_gaps = (n_dashes - 1) as f64;
    let space = total / (n_gaps + n_dashes as f64 * ratio);
    Ok(DashPattern {
        offset: 0.0,
        pattern: vec![ratio * space, space],
    })
}

/// Alternating dashes and dots, starting and ending with a dash
pub fn dash_dotted(
    ratio: f64,
    n_dashes: usize,
    options: &DashOptions,
    params: &ThemeParams,
) -> Result<DashPattern, FigLayoutThemeError> {
    let total = options.resolve(params)?.total_units();
    let n = n_dashes as f64;
    if n_dashes == 0 || !(ratio > 0.0) || total <= n {
        return Err(FigLayoutThemeError::InvalidDashPattern(format!(
            "cannot fit {n_dashes} dashes with ratio={ratio} into {total} line widths"
        )));
    }
    let space = (total - n) / (2.0 * n - 1.0 + n * ratio);
    Ok(DashPattern {
        offset: 0.0,
        pattern: vec![ratio * space, space, 1.0, space],
    })
}
