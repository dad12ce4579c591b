use crate::colorbar::ColorbarRecord;
use crate::context::SolveContext;
use crate::error::FigLayoutError;
use figlayout_common::types::{Bbox, Margins, Side};
use figlayout_scenegraph::figure::Figure;
use figlayout_scenegraph::panel::PanelId;
use figlayout_scenegraph::renderer::Renderer;

/// Panel box in inches, without decorations
pub fn tight_box(figure: &Figure, panel: PanelId) -> Result<Bbox, FigLayoutError> {
    Ok(figure.panel_position_inches(panel)?)
}

/// Panel box in inches including its decorations and the decorations of the
/// colorbars attached to it.
///
/// A colorbar contributes its outer side and the two sides perpendicular to
/// it; the side facing the parent is covered by the parent already.
pub fn full_box(
    figure: &Figure,
    renderer: &dyn Renderer,
    panel: PanelId,
    colorbars: &[ColorbarRecord],
) -> Result<Bbox, FigLayoutError> {
    let mut bbox = figure.pixels_to_inches(renderer.panel_extent(figure, panel)?);
    for record in colorbars.iter().filter(|r| r.parent == panel) {
        let cb = figure.pixels_to_inches(renderer.panel_extent(figure, record.colorbar)?);
        if record.side != Side::Right {
            bbox.x0 = bbox.x0.min(cb.x0);
        }
        if record.side != Side::Left {
            bbox.x1 = bbox.x1.max(cb.x1);
        }
        if record.side != Side::Top {
            bbox.y0 = bbox.y0.min(cb.y0);
        }
        if record.side != Side::Bottom {
            bbox.y1 = bbox.y1.max(cb.y1);
        }
    }
    Ok(bbox)
}

/// Decorated or undecorated box of `panel`, in inches
pub fn panel_box(
    figure: &Figure,
    renderer: &dyn Renderer,
    context: &SolveContext,
    panel: PanelId,
    ignore_labels: bool,
) -> Result<Bbox, FigLayoutError> {
    if ignore_labels {
        tight_box(figure, panel)
    } else {
        full_box(figure, renderer, panel, &context.colorbars)
    }
}

fn boxes(
    figure: &Figure,
    renderer: &dyn Renderer,
    context: &SolveContext,
    panels: impl Iterator<Item = PanelId>,
    ignore_labels: bool,
) -> Result<Vec<Bbox>, FigLayoutError> {
    panels
        .map(|id| panel_box(figure, renderer, context, id, ignore_labels))
        .collect()
}

fn min_of(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(f64::INFINITY, f64::min)
}

fn max_of(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(f64::NEG_INFINITY, f64::max)
}

/// Distance in inches between the outer panels and the figure edges.
///
/// Each side uses undecorated boxes when its `ignore_labels` flag is set.
pub fn margins(
    figure: &Figure,
    renderer: &dyn Renderer,
    context: &SolveContext,
    ignore_labels: Margins<bool>,
) -> Result<Margins<f64>, FigLayoutError> {
    let grid = &context.grid;
    let size = figure.size_inches();

    let top = boxes(figure, renderer, context, grid.row(0), ignore_labels.top)?;
    let bottom = boxes(
        figure,
        renderer,
        context,
        grid.row(grid.nrows() - 1),
        ignore_labels.bottom,
    )?;
    let left = boxes(figure, renderer, context, grid.column(0), ignore_labels.left)?;
    let right = boxes(
        figure,
        renderer,
        context,
        grid.column(grid.ncols() - 1),
        ignore_labels.right,
    )?;

    Ok(Margins::new(
        min_of(top.iter().map(|b| size.height - b.y1)),
        min_of(right.iter().map(|b| size.width - b.x1)),
        min_of(bottom.iter().map(|b| b.y0)),
        min_of(left.iter().map(|b| b.x0)),
    ))
}

/// Gap in inches between column `icol - 1` and column `icol`
pub fn column_gap(
    figure: &Figure,
    renderer: &dyn Renderer,
    context: &SolveContext,
    icol: usize,
    ignore_labels: bool,
) -> Result<f64, FigLayoutError> {
    let grid = &context.grid;
    let before = boxes(figure, renderer, context, grid.column(icol - 1), ignore_labels)?;
    let after = boxes(figure, renderer, context, grid.column(icol), ignore_labels)?;
    Ok(min_of(after.iter().map(|b| b.x0)) - max_of(before.iter().map(|b| b.x1)))
}

/// Gap in inches between row `irow - 1` and row `irow` (rows count from
/// the top)
pub fn row_gap(
    figure: &Figure,
    renderer: &dyn Renderer,
    context: &SolveContext,
    irow: usize,
    ignore_labels: bool,
) -> Result<f64, FigLayoutError> {
    let grid = &context.grid;
    let above = boxes(figure, renderer, context, grid.row(irow - 1), ignore_labels)?;
    let below = boxes(figure, renderer, context, grid.row(irow), ignore_labels)?;
    Ok(min_of(above.iter().map(|b| b.y0)) - max_of(below.iter().map(|b| b.y1)))
}

/// Per-side room taken by decorations: full box minus tight box, in inches
pub fn panel_margins(
    figure: &Figure,
    renderer: &dyn Renderer,
    panel: PanelId,
    colorbars: &[ColorbarRecord],
) -> Result<Margins<f64>, FigLayoutError> {
    let tight = tight_box(figure, panel)?;
    let full = full_box(figure, renderer, panel, colorbars)?;
    Ok(Margins::new(
        full.y1 - tight.y1,
        full.x1 - tight.x1,
        tight.y0 - full.y0,
        tight.x0 - full.x0,
    ))
}
