use crate::dashes::{FontSize, NamedFontSize};
use crate::error::FigLayoutThemeError;
use figlayout_common::types::{Extent, HorizontalAlignment, Margins};
use figlayout_common::units::mm_to_inches;
use figlayout_scenegraph::figure::Figure;
use figlayout_scenegraph::panel::Panel;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

/// Font family used for text
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, VariantNames)]
#[strum(serialize_all = "kebab-case")]
pub enum FontFamily {
    Serif,
    #[default]
    SansSerif,
}

/// TeX engine that renders the figure text
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, VariantNames)]
#[strum(serialize_all = "lowercase")]
pub enum TexSystem {
    Pdflatex,
    Lualatex,
}

/// Font setups for LaTeX rendered text
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, VariantNames)]
pub enum LatexBackend {
    FiraSans,
    Times,
    ScholaX,
}

impl LatexBackend {
    pub fn tex_system(&self) -> TexSystem {
        match self {
            LatexBackend::FiraSans => TexSystem::Lualatex,
            LatexBackend::Times | LatexBackend::ScholaX => TexSystem::Pdflatex,
        }
    }

    pub fn font_family(&self) -> FontFamily {
        match self {
            LatexBackend::FiraSans => FontFamily::SansSerif,
            LatexBackend::Times | LatexBackend::ScholaX => FontFamily::Serif,
        }
    }

    pub fn preamble(&self) -> &'static str {
        match self {
            LatexBackend::FiraSans => concat!(
                r"\usepackage[mathrm=sym]{unicode-math}",
                r"\setmathfont{Fira Math}[Scale=MatchUppercase,Numbers=Tabular]",
                r"\setsansfont{Fira Sans}[Scale=MatchUppercase,Numbers=Lining]",
                r"\usepackage{picture,xcolor}\usepackage{nicefrac}",
            ),
            LatexBackend::Times => concat!(
                r"\usepackage[T1]{fontenc}\usepackage{newtxtext,newtxmath}",
                r"\usepackage{picture,xcolor}\usepackage{nicefrac}",
            ),
            LatexBackend::ScholaX => concat!(
                r"\usepackage{scholax}\usepackage{amsmath,amsthm}",
                r"\usepackage[scaled=1.075,ncf,vvarbb]{newtxmath}",
                r"\usepackage{picture,xcolor}\usepackage{nicefrac}",
            ),
        }
    }
}

/// LaTeX text rendering settings
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct LatexSettings {
    pub backend: LatexBackend,
    pub tex_system: TexSystem,
    pub preamble: String,
}

/// Style defaults applied to new figures and panels.
///
/// Lengths are in points unless noted otherwise.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeParams {
    pub font_size: f64,
    pub font_family: FontFamily,
    /// Fallback list of serif fonts, most preferred first
    pub serif_fonts: Vec<String>,
    /// Figure size in inches
    pub figure_size: Extent<f64>,
    pub dpi: f64,
    pub spines: Margins<bool>,
    pub spines_color: String,
    pub grid: bool,
    pub grid_color: String,
    pub axes_line_width: f64,
    pub line_width: f64,
    pub marker_size: f64,
    pub errorbar_capsize: f64,
    pub major_tick_size: f64,
    pub minor_tick_size: f64,
    pub major_tick_width: f64,
    pub minor_tick_width: f64,
    pub major_tick_pad: f64,
    pub minor_tick_pad: f64,
    pub xtick_color: String,
    pub ytick_color: String,
    pub label_pad: f64,
    pub title_pad: f64,
    pub title_location: HorizontalAlignment,
    pub legend_frame: bool,
    pub legend_font_size: FontSize,
    /// Legend handle length in font size units
    pub legend_handle_length: f64,
    /// Name of the default colormap
    pub colormap: String,
    /// Hex colors cycled through by successive artists
    pub color_cycle: Vec<String>,
    pub latex: Option<LatexSettings>,
}

impl Default for ThemeParams {
    fn default() -> Self {
        Self {
            font_size: 10.0,
            font_family: FontFamily::SansSerif,
            serif_fonts: vec!["DejaVu Serif".to_string(), "serif".to_string()],
            figure_size: Extent::new(6.4, 4.8),
            dpi: 100.0,
            spines: Margins::splat(true),
            spines_color: "#000000".to_string(),
            grid: false,
            grid_color: "#b0b0b0".to_string(),
            axes_line_width: 0.8,
            line_width: 1.5,
            marker_size: 6.0,
            errorbar_capsize: 0.0,
            major_tick_size: 3.5,
            minor_tick_size: 2.0,
            major_tick_width: 0.8,
            minor_tick_width: 0.6,
            major_tick_pad: 3.5,
            minor_tick_pad: 3.4,
            xtick_color: "#000000".to_string(),
            ytick_color: "#000000".to_string(),
            label_pad: 4.0,
            title_pad: 6.0,
            title_location: HorizontalAlignment::Center,
            legend_frame: true,
            legend_font_size: FontSize::Named(NamedFontSize::Medium),
            legend_handle_length: 2.0,
            colormap: "viridis".to_string(),
            color_cycle: Vec::new(),
            latex: None,
        }
    }
}

/// Parse a spines identifier such as `"lb"`: any of `l`, `b`, `t`, `r`,
/// each at most once
pub fn parse_spines(spines: &str) -> Result<Margins<bool>, FigLayoutThemeError> {
    let mut result = Margins::splat(false);
    for c in spines.chars() {
        let slot = match c {
            't' => &mut result.top,
            'r' => &mut result.right,
            'b' => &mut result.bottom,
            'l' => &mut result.left,
            _ => return Err(FigLayoutThemeError::InvalidSpines(spines.to_string())),
        };
        if *slot {
            return Err(FigLayoutThemeError::InvalidSpines(spines.to_string()));
        }
        *slot = true;
    }
    Ok(result)
}

/// Color of the panel frame
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum SpinesColor {
    /// Same color as the grid lines
    Grid,
    Hex(String),
}

/// Options of [`nice_theme`]
#[derive(Debug, Clone, PartialEq)]
pub struct NiceThemeOptions {
    pub spines: String,
    pub spines_color: SpinesColor,
    pub use_latex: bool,
    pub font_size: f64,
    pub use_serif: bool,
}

impl Default for NiceThemeOptions {
    fn default() -> Self {
        Self {
            spines: "ltbr".to_string(),
            spines_color: SpinesColor::Hex("#AFAFAF".to_string()),
            use_latex: false,
            font_size: 10.0,
            use_serif: true,
        }
    }
}

const NICE_GRID_COLOR: &str = "#E2E2E2";

/// Compact publication theme: small figures, light grid, thin grey frame,
/// left aligned titles and the `atom` colormap.
pub fn nice_theme(options: &NiceThemeOptions) -> Result<ThemeParams, FigLayoutThemeError> {
    let spines = parse_spines(&options.spines)?;
    let mut params = ThemeParams::default();
    crate::cycle::set_color_cycle(&mut params, None, &[], 7)?;

    params.font_size = options.font_size;
    match (options.use_latex, options.use_serif) {
        (true, true) => {
            params.font_family = FontFamily::Serif;
            params.set_latex_backend(LatexBackend::ScholaX);
        }
        (true, false) => params.set_latex_backend(LatexBackend::FiraSans),
        (false, true) => {
            params.font_family = FontFamily::Serif;
            params.serif_fonts = [
                "STIXGeneral",
                "DejaVu Serif",
                "Bitstream Vera Serif",
                "Computer Modern Roman",
                "New Century Schoolbook",
                "Century Schoolbook L",
                "Utopia",
                "ITC Bookman",
                "Bookman",
                "Nimbus Roman No9 L",
                "Times New Roman",
                "Times",
                "Palatino",
                "Charter",
                "serif",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect();
        }
        (false, false) => params.font_size = options.font_size * 0.9,
    }

    params.figure_size = Extent::new(mm_to_inches(80.0), mm_to_inches(60.0));
    params.dpi = 600.0;
    params.spines = spines;
    params.major_tick_pad = 1.8;
    params.minor_tick_pad = 1.5;
    params.label_pad = 2.0;
    params.title_pad = 5.0;
    params.grid = true;
    params.axes_line_width = 0.8;
    params.line_width = 2.0;
    params.marker_size = 3.0;
    params.errorbar_capsize = params.marker_size;
    params.major_tick_size = 3.5;
    params.minor_tick_size = 2.0;
    params.major_tick_width = params.axes_line_width;
    params.minor_tick_width = 0.4;
    params.title_location = HorizontalAlignment::Left;

    params.grid_color = NICE_GRID_COLOR.to_string();
    let spines_color = match &options.spines_color {
        SpinesColor::Grid => NICE_GRID_COLOR,
        SpinesColor::Hex(hex) => hex.as_str(),
    };
    // ticks on a hidden spine fade into the grid
    let tick_color = |visible: bool| if visible { spines_color } else { NICE_GRID_COLOR };
    params.xtick_color = tick_color(spines.bottom).to_string();
    params.ytick_color = tick_color(spines.left).to_string();
    params.spines_color = spines_color.to_string();
    params.legend_frame = false;
    params.colormap = "atom".to_string();
    Ok(params)
}

impl ThemeParams {
    /// Render text with LaTeX using the fonts of `backend`
    pub fn set_latex_backend(&mut self, backend: LatexBackend) {
        self.font_family = backend.font_family();
        self.latex = Some(LatexSettings {
            backend,
            tex_system: backend.tex_system(),
            preamble: backend.preamble().to_string(),
        });
    }

    /// Legend font size in points
    pub fn legend_font_size_pts(&self) -> f64 {
        self.legend_font_size.points(self.font_size)
    }

    /// Empty figure with the theme's size and resolution
    pub fn new_figure(&self) -> Result<Figure, FigLayoutThemeError> {
        Ok(Figure::new(self.figure_size)?.with_dpi(self.dpi))
    }

    /// Copy the theme into the decorations and style of `panel`
    pub fn apply_to_panel(&self, panel: &mut Panel) {
        let deco = &mut panel.decorations;
        deco.font = self.font_family.to_string();
        deco.font_size = self.font_size;
        deco.label_font_size = self.font_size;
        deco.title_font_size = FontSize::Named(NamedFontSize::Large).points(self.font_size);
        deco.label_pad = self.label_pad;
        deco.title_pad = self.title_pad;
        deco.spines = self.spines;
        deco.line_width = self.axes_line_width;
        deco.set_tick_length(self.major_tick_size);
        deco.set_tick_pad(self.major_tick_pad);

        panel.style.color_cycle = self.color_cycle.clone();
        panel.style.colormap = Some(self.colormap.clone());
    }

    /// Apply the theme to every panel of `figure`
    pub fn apply_to_figure(&self, figure: &mut Figure) {
        for panel in figure.panels_mut() {
            self.apply_to_panel(panel);
        }
    }
}
