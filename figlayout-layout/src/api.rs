//! Figure-level layout operations.
//!
//! Every function here requires the figure to use a
//! [`FixedPanelLayoutEngine`] and fails with
//! [`FigLayoutError::WrongLayoutEngine`] otherwise. Operations that move a
//! panel keep its colorbars attached.

use crate::colorbar::collect_colorbars;
use crate::context::SolveContext;
use crate::engine::{
    add_column_pad_inches, add_margins_inches, add_row_pad_inches, FixedPanelLayoutEngine,
    LayoutConfig,
};
use crate::error::FigLayoutError;
use crate::measure;
use figlayout_common::types::{
    Anchor, Bbox, Extent, HorizontalAlignment, HorizontalAnchor, Margins, VerticalAlignment,
    VerticalAnchor,
};
use figlayout_common::units::{inches_to_pts, pts_to_inches};
use figlayout_common::value::ScalarOrArray;
use figlayout_scenegraph::figure::Figure;
use figlayout_scenegraph::panel::PanelId;
use figlayout_scenegraph::renderer::Renderer;
use float_cmp::approx_eq;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::rc::Rc;

pub use crate::colorbar::{add_colorbar, update_colorbars, ColorbarOptions};

/// Requested panel size in inches
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelSize {
    /// Width, with the height following from the aspect
    Uniform(f64),
    Explicit(Extent<f64>),
}

impl From<f64> for PanelSize {
    fn from(value: f64) -> Self {
        PanelSize::Uniform(value)
    }
}

impl From<Extent<f64>> for PanelSize {
    fn from(value: Extent<f64>) -> Self {
        PanelSize::Explicit(value)
    }
}

/// Height over width of a panel
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum Aspect {
    #[default]
    Auto,
    Ratio(f64),
}

/// Fail unless `figure` is laid out by a [`FixedPanelLayoutEngine`]
pub fn validate_layout_engine(figure: &Figure) -> Result<(), FigLayoutError> {
    match figure.layout_engine() {
        Some(engine) if engine.as_any().is::<FixedPanelLayoutEngine>() => Ok(()),
        Some(_) => Err(FigLayoutError::WrongLayoutEngine(
            "another layout engine".to_string(),
        )),
        None => Err(FigLayoutError::WrongLayoutEngine("no layout engine".to_string())),
    }
}

/// Attach a [`FixedPanelLayoutEngine`] with `config` to `figure` and lay
/// the figure out right away
pub fn make_me_nice(
    figure: &mut Figure,
    renderer: &mut dyn Renderer,
    config: LayoutConfig,
) -> Result<Rc<FixedPanelLayoutEngine>, FigLayoutError> {
    let engine = Rc::new(FixedPanelLayoutEngine::new(config));
    figure.set_layout_engine(Some(engine.clone()));
    engine.solve(figure, renderer)?;
    Ok(engine)
}

// Panels

pub fn get_panel_size_inches(
    figure: &Figure,
    panel: PanelId,
) -> Result<Extent<f64>, FigLayoutError> {
    validate_layout_engine(figure)?;
    Ok(figure.panel_position_inches(panel)?.size())
}

/// Resize `panel` to `size` (inches), keeping the `anchor` point in place.
pub fn set_panel_size_inches(
    figure: &mut Figure,
    panel: PanelId,
    size: impl Into<PanelSize>,
    aspect: Aspect,
    anchor: Anchor,
) -> Result<(), FigLayoutError> {
    validate_layout_engine(figure)?;
    let (width, height) = match (size.into(), aspect) {
        (PanelSize::Uniform(s), Aspect::Auto) => (s, s),
        (PanelSize::Uniform(s), Aspect::Ratio(ratio)) => (s, s * ratio),
        (PanelSize::Explicit(e), Aspect::Auto) => (e.width, e.height),
        (PanelSize::Explicit(e), Aspect::Ratio(ratio)) => {
            if !approx_eq!(f64, e.height / e.width, ratio, epsilon = 1e-12, ulps = 4) {
                return Err(FigLayoutError::SizeAspectMismatch {
                    width: e.width,
                    height: e.height,
                    aspect: ratio,
                });
            }
            (e.width, e.height)
        }
    };

    let colorbars = collect_colorbars(figure)?;
    let old = figure.panel_position_inches(panel)?;
    let x0 = match anchor.horizontal {
        HorizontalAnchor::Left => old.x0,
        HorizontalAnchor::Center => old.x0 + (old.width() - width) / 2.0,
        HorizontalAnchor::Right => old.x0 + old.width() - width,
    };
    let y0 = match anchor.vertical {
        VerticalAnchor::Lower => old.y0,
        VerticalAnchor::Center => old.y0 + (old.height() - height) / 2.0,
        VerticalAnchor::Upper => old.y0 + old.height() - height,
    };
    figure.set_panel_position_inches(panel, Bbox::from_bounds(x0, y0, width, height))?;
    update_colorbars(figure, &colorbars)
}

pub fn get_panel_position_inches(
    figure: &Figure,
    panel: PanelId,
) -> Result<Bbox, FigLayoutError> {
    validate_layout_engine(figure)?;
    Ok(figure.panel_position_inches(panel)?)
}

pub fn set_panel_position_inches(
    figure: &mut Figure,
    panel: PanelId,
    position: Bbox,
) -> Result<(), FigLayoutError> {
    validate_layout_engine(figure)?;
    let colorbars = collect_colorbars(figure)?;
    figure.set_panel_position_inches(panel, position)?;
    update_colorbars(figure, &colorbars)
}

/// Box of `panel` including decorations and attached colorbars, in inches
pub fn get_panel_full_box_inches(
    figure: &Figure,
    renderer: &dyn Renderer,
    panel: PanelId,
) -> Result<Bbox, FigLayoutError> {
    validate_layout_engine(figure)?;
    measure::full_box(figure, renderer, panel, &collect_colorbars(figure)?)
}

/// Room taken by the decorations of `panel` on each side, in inches
pub fn get_panel_margins_inches(
    figure: &Figure,
    renderer: &dyn Renderer,
    panel: PanelId,
) -> Result<Margins<f64>, FigLayoutError> {
    validate_layout_engine(figure)?;
    measure::panel_margins(figure, renderer, panel, &collect_colorbars(figure)?)
}

/// Move `panel` vertically so it lines up with `reference`
pub fn align_panels_vertically(
    figure: &mut Figure,
    panel: PanelId,
    reference: PanelId,
    alignment: VerticalAlignment,
) -> Result<(), FigLayoutError> {
    validate_layout_engine(figure)?;
    let colorbars = collect_colorbars(figure)?;
    let reference = figure.panel_position_inches(reference)?;
    let old = figure.panel_position_inches(panel)?;
    let y0 = match alignment {
        VerticalAlignment::Center => reference.y0 + (reference.height() - old.height()) / 2.0,
        VerticalAlignment::Top => reference.y1 - old.height(),
        VerticalAlignment::Bottom => reference.y0,
    };
    figure.set_panel_position_inches(panel, old.translated(0.0, y0 - old.y0))?;
    update_colorbars(figure, &colorbars)
}

/// Move `panel` horizontally so it lines up with `reference`
pub fn align_panels_horizontally(
    figure: &mut Figure,
    panel: PanelId,
    reference: PanelId,
    alignment: HorizontalAlignment,
) -> Result<(), FigLayoutError> {
    validate_layout_engine(figure)?;
    let colorbars = collect_colorbars(figure)?;
    let reference = figure.panel_position_inches(reference)?;
    let old = figure.panel_position_inches(panel)?;
    let x0 = match alignment {
        HorizontalAlignment::Center => reference.x0 + (reference.width() - old.width()) / 2.0,
        HorizontalAlignment::Left => reference.x0,
        HorizontalAlignment::Right => reference.x1 - old.width(),
    };
    figure.set_panel_position_inches(panel, old.translated(x0 - old.x0, 0.0))?;
    update_colorbars(figure, &colorbars)
}

// Margins and pads

fn scan(figure: &Figure) -> Result<SolveContext, FigLayoutError> {
    validate_layout_engine(figure)?;
    SolveContext::scan(figure)
}

/// Figure margins in points
pub fn get_margins_pts(
    figure: &Figure,
    renderer: &dyn Renderer,
    ignore_labels: impl Into<ScalarOrArray<bool>>,
) -> Result<Margins<f64>, FigLayoutError> {
    let context = scan(figure)?;
    let ignore: ScalarOrArray<bool> = ignore_labels.into();
    let ignore = ignore.to_margins()?;
    Ok(measure::margins(figure, renderer, &context, ignore)?.map(inches_to_pts))
}

/// Grow the figure margins by `margins_pts` (one to four values),
/// keeping panel sizes
pub fn add_margins_pts(
    figure: &mut Figure,
    margins_pts: impl Into<ScalarOrArray<f64>>,
) -> Result<(), FigLayoutError> {
    let context = scan(figure)?;
    let margins: ScalarOrArray<f64> = margins_pts.into();
    let margins = margins.to_margins()?.map(pts_to_inches);
    add_margins_inches(figure, &context, margins)
}

/// Pad between column `icol - 1` and `icol` in points. `0` is the left
/// margin and `ncols` the right margin.
pub fn get_column_pad_pts(
    figure: &Figure,
    renderer: &dyn Renderer,
    icol: usize,
    ignore_labels: bool,
) -> Result<f64, FigLayoutError> {
    let context = scan(figure)?;
    let ncols = context.grid.ncols();
    let inches = if icol > 0 && icol < ncols {
        measure::column_gap(figure, renderer, &context, icol, ignore_labels)?
    } else if icol == 0 || icol == ncols {
        let ignore = Margins::splat(ignore_labels);
        let margins = measure::margins(figure, renderer, &context, ignore)?;
        if icol == 0 {
            margins.left
        } else {
            margins.right
        }
    } else {
        return Err(FigLayoutError::IndexOutOfRange {
            kind: "column",
            index: icol,
            max: ncols,
        });
    };
    Ok(inches_to_pts(inches))
}

/// Insert `pad_pts` before column `icol`, widening the figure
pub fn add_column_pad_pts(
    figure: &mut Figure,
    icol: usize,
    pad_pts: f64,
) -> Result<(), FigLayoutError> {
    let context = scan(figure)?;
    add_column_pad_inches(figure, &context, icol, pts_to_inches(pad_pts))
}

/// Pad between row `irow - 1` and `irow` in points. `0` is the top margin
/// and `nrows` the bottom margin.
pub fn get_row_pad_pts(
    figure: &Figure,
    renderer: &dyn Renderer,
    irow: usize,
    ignore_labels: bool,
) -> Result<f64, FigLayoutError> {
    let context = scan(figure)?;
    let nrows = context.grid.nrows();
    let inches = if irow > 0 && irow < nrows {
        measure::row_gap(figure, renderer, &context, irow, ignore_labels)?
    } else if irow == 0 || irow == nrows {
        let ignore = Margins::splat(ignore_labels);
        let margins = measure::margins(figure, renderer, &context, ignore)?;
        if irow == 0 {
            margins.top
        } else {
            margins.bottom
        }
    } else {
        return Err(FigLayoutError::IndexOutOfRange {
            kind: "row",
            index: irow,
            max: nrows,
        });
    };
    Ok(inches_to_pts(inches))
}

/// Insert `pad_pts` above row `irow`, heightening the figure
pub fn add_row_pad_pts(
    figure: &mut Figure,
    irow: usize,
    pad_pts: f64,
) -> Result<(), FigLayoutError> {
    let context = scan(figure)?;
    add_row_pad_inches(figure, &context, irow, pts_to_inches(pad_pts))
}
