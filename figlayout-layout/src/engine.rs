use crate::context::SolveContext;
use crate::error::FigLayoutError;
use crate::measure;
use figlayout_common::types::{Bbox, Extent, Margins};
use figlayout_common::units::{inches_to_pts, pts_to_inches};
use figlayout_common::value::ScalarOrArray;
use figlayout_scenegraph::engine::LayoutEngine;
use figlayout_scenegraph::error::FigLayoutSceneGraphError;
use figlayout_scenegraph::figure::Figure;
use figlayout_scenegraph::panel::PanelId;
use figlayout_scenegraph::renderer::Renderer;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::cell::Cell;
use tracing::{debug, info, trace};

/// Target spacing of a [`FixedPanelLayoutEngine`].
///
/// Margins take one to four values (see [`ScalarOrArray::to_margins`]),
/// column and row pads a scalar or one value per gap.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub margin_pad_pts: ScalarOrArray<f64>,
    pub margin_pad_ignores_labels: ScalarOrArray<bool>,
    pub col_pad_pts: ScalarOrArray<f64>,
    pub col_pad_ignores_labels: ScalarOrArray<bool>,
    pub row_pad_pts: ScalarOrArray<f64>,
    pub row_pad_ignores_labels: ScalarOrArray<bool>,
    /// Widest acceptable figure, in inches
    pub max_figwidth: f64,
    /// Number of margin and pad passes
    pub nruns: usize,
    /// Report the number of passes at `info` level
    pub log: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin_pad_pts: 3.0.into(),
            margin_pad_ignores_labels: false.into(),
            col_pad_pts: 10.0.into(),
            col_pad_ignores_labels: false.into(),
            row_pad_pts: 10.0.into(),
            row_pad_ignores_labels: false.into(),
            max_figwidth: f64::INFINITY,
            nruns: 2,
            log: false,
        }
    }
}

impl LayoutConfig {
    pub fn with_margin_pad_pts(mut self, pad: impl Into<ScalarOrArray<f64>>) -> Self {
        self.margin_pad_pts = pad.into();
        self
    }

    pub fn with_margin_pad_ignores_labels(mut self, ignore: impl Into<ScalarOrArray<bool>>) -> Self {
        self.margin_pad_ignores_labels = ignore.into();
        self
    }

    pub fn with_col_pad_pts(mut self, pad: impl Into<ScalarOrArray<f64>>) -> Self {
        self.col_pad_pts = pad.into();
        self
    }

    pub fn with_col_pad_ignores_labels(mut self, ignore: impl Into<ScalarOrArray<bool>>) -> Self {
        self.col_pad_ignores_labels = ignore.into();
        self
    }

    pub fn with_row_pad_pts(mut self, pad: impl Into<ScalarOrArray<f64>>) -> Self {
        self.row_pad_pts = pad.into();
        self
    }

    pub fn with_row_pad_ignores_labels(mut self, ignore: impl Into<ScalarOrArray<bool>>) -> Self {
        self.row_pad_ignores_labels = ignore.into();
        self
    }

    pub fn with_max_figwidth(mut self, max_figwidth: f64) -> Self {
        self.max_figwidth = max_figwidth;
        self
    }

    pub fn with_nruns(mut self, nruns: usize) -> Self {
        self.nruns = nruns;
        self
    }

    pub fn with_log(mut self, log: bool) -> Self {
        self.log = log;
        self
    }
}

/// Layout engine that keeps every panel at its size and adjusts the figure
/// size so margins and the pads between rows and columns match a
/// [`LayoutConfig`].
#[derive(Debug, Default)]
pub struct FixedPanelLayoutEngine {
    config: LayoutConfig,
    in_progress: Cell<bool>,
}

/// Clears the in-progress flag of an engine when dropped
struct ReentrancyGuard<'a>(&'a Cell<bool>);

impl Drop for ReentrancyGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl FixedPanelLayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            in_progress: Cell::new(false),
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress.get()
    }

    /// Mark the engine busy, or `None` if it already is
    fn enter(&self) -> Option<ReentrancyGuard<'_>> {
        if self.in_progress.replace(true) {
            None
        } else {
            Some(ReentrancyGuard(&self.in_progress))
        }
    }

    /// Resize `figure` until margins and pads match the configuration.
    pub fn solve(
        &self,
        figure: &mut Figure,
        renderer: &mut dyn Renderer,
    ) -> Result<(), FigLayoutError> {
        renderer.draw(figure)?;
        let context = SolveContext::scan(figure)?;
        let config = &self.config;
        let ncol_gaps = context.grid.ncols() - 1;
        let nrow_gaps = context.grid.nrows() - 1;

        let margins = config.margin_pad_pts.to_margins()?.map(pts_to_inches);
        let margins_ignore = config.margin_pad_ignores_labels.to_margins()?;
        let col_pads = config.col_pad_pts.to_gaps(ncol_gaps)?;
        let col_ignore = config.col_pad_ignores_labels.to_gaps(ncol_gaps)?;
        let row_pads = config.row_pad_pts.to_gaps(nrow_gaps)?;
        let row_ignore = config.row_pad_ignores_labels.to_gaps(nrow_gaps)?;

        for pass in 0..config.nruns {
            let current = measure::margins(figure, &*renderer, &context, margins_ignore)?;
            add_margins_inches(figure, &context, margins - current)?;
            renderer.draw(figure)?;

            for icol in 1..=ncol_gaps {
                let ignore = col_ignore[icol - 1];
                let current = measure::column_gap(figure, &*renderer, &context, icol, ignore)?;
                let delta = pts_to_inches(col_pads[icol - 1]) - current;
                trace!(
                    "column gap {icol}: {:.3}pt, adding {:.3}pt",
                    inches_to_pts(current),
                    inches_to_pts(delta)
                );
                add_column_pad_inches(figure, &context, icol, delta)?;
                renderer.draw(figure)?;
            }

            for irow in 1..=nrow_gaps {
                let ignore = row_ignore[irow - 1];
                let current = measure::row_gap(figure, &*renderer, &context, irow, ignore)?;
                let delta = pts_to_inches(row_pads[irow - 1]) - current;
                trace!(
                    "row gap {irow}: {:.3}pt, adding {:.3}pt",
                    inches_to_pts(current),
                    inches_to_pts(delta)
                );
                add_row_pad_inches(figure, &context, irow, delta)?;
                renderer.draw(figure)?;
            }

            let size = figure.size_inches();
            debug!(
                "layout pass {} of {}: figure size {:.4}x{:.4} inches",
                pass + 1,
                config.nruns,
                size.width,
                size.height
            );
        }

        let width = figure.size_inches().width;
        if round_to(width, 5) > config.max_figwidth {
            return Err(FigLayoutError::FigureTooWide {
                necessary: width,
                max: config.max_figwidth,
            });
        }
        if config.log {
            info!("fixed panel layout finished after {} passes", config.nruns);
        }
        Ok(())
    }
}

impl LayoutEngine for FixedPanelLayoutEngine {
    fn execute(
        &self,
        figure: &mut Figure,
        renderer: &mut dyn Renderer,
    ) -> Result<(), FigLayoutSceneGraphError> {
        let Some(_guard) = self.enter() else {
            trace!("layout already in progress, skipping nested execute");
            return Ok(());
        };
        Ok(self.solve(figure, renderer)?)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Snapshot of every panel box in inches
fn positions_inches(figure: &Figure) -> Vec<(PanelId, Bbox)> {
    let size = figure.size_inches();
    figure
        .panels()
        .map(|panel| (panel.id, panel.position_inches(size)))
        .collect()
}

/// Grow the figure by `margins` (inches, negative to shrink) on each side,
/// keeping panel sizes in inches.
pub fn add_margins_inches(
    figure: &mut Figure,
    context: &SolveContext,
    margins: Margins<f64>,
) -> Result<(), FigLayoutError> {
    let before = positions_inches(figure);
    let size = figure.size_inches();
    figure.set_size_inches(Extent::new(
        size.width + margins.horizontal(),
        size.height + margins.vertical(),
    ))?;
    for (id, bbox) in before {
        figure.set_panel_position_inches(id, bbox.translated(margins.left, margins.bottom))?;
    }
    context.update_colorbars(figure)
}

/// Insert `pad` inches before column `icol`; `0` grows the left margin and
/// `ncols` the right margin.
pub fn add_column_pad_inches(
    figure: &mut Figure,
    context: &SolveContext,
    icol: usize,
    pad: f64,
) -> Result<(), FigLayoutError> {
    let ncols = context.grid.ncols();
    if icol > ncols {
        return Err(FigLayoutError::IndexOutOfRange {
            kind: "column",
            index: icol,
            max: ncols,
        });
    }
    let before = positions_inches(figure);
    let size = figure.size_inches();
    figure.set_size_inches(Extent::new(size.width + pad, size.height))?;
    for (id, bbox) in before {
        let shift = match context.grid.locate(id) {
            Some((_, col)) if col >= icol => pad,
            _ => 0.0,
        };
        figure.set_panel_position_inches(id, bbox.translated(shift, 0.0))?;
    }
    context.update_colorbars(figure)
}

/// Insert `pad` inches above row `irow` (rows count from the top); `0`
/// grows the top margin and `nrows` the bottom margin.
pub fn add_row_pad_inches(
    figure: &mut Figure,
    context: &SolveContext,
    irow: usize,
    pad: f64,
) -> Result<(), FigLayoutError> {
    let nrows = context.grid.nrows();
    if irow > nrows {
        return Err(FigLayoutError::IndexOutOfRange {
            kind: "row",
            index: irow,
            max: nrows,
        });
    }
    let before = positions_inches(figure);
    let size = figure.size_inches();
    figure.set_size_inches(Extent::new(size.width, size.height + pad))?;
    for (id, bbox) in before {
        let shift = match context.grid.locate(id) {
            Some((row, _)) if row < irow => pad,
            _ => 0.0,
        };
        figure.set_panel_position_inches(id, bbox.translated(0.0, shift))?;
    }
    context.update_colorbars(figure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figlayout_scenegraph::renderer::DecorationRenderer;
    use figlayout_text::measurement::ApproxTextMeasurer;

    #[test]
    fn test_reentrancy_guard() {
        let engine = FixedPanelLayoutEngine::default();
        {
            let guard = engine.enter();
            assert!(guard.is_some());
            assert!(engine.is_in_progress());
            assert!(engine.enter().is_none());
        }
        assert!(!engine.is_in_progress());
        assert!(engine.enter().is_some());
    }

    #[test]
    fn test_guard_resets_after_error() {
        let engine = FixedPanelLayoutEngine::default();
        let mut figure = Figure::default();
        let mut renderer = DecorationRenderer::new(ApproxTextMeasurer::new());
        // no panels: the solve fails and the flag is released
        assert!(engine.execute(&mut figure, &mut renderer).is_err());
        assert!(!engine.is_in_progress());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_from_json() {
        let config: LayoutConfig =
            serde_json::from_str(r#"{"margin_pad_pts": [2, 4], "col_pad_pts": 5, "nruns": 3}"#)
                .unwrap();
        assert_eq!(config.margin_pad_pts, ScalarOrArray::Array(vec![2.0, 4.0]));
        assert_eq!(config.col_pad_pts, ScalarOrArray::Scalar(5.0));
        assert_eq!(config.row_pad_pts, ScalarOrArray::Scalar(10.0));
        assert_eq!(config.nruns, 3);
        assert!(config.max_figwidth.is_infinite());
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(3.1415926, 5), 3.14159);
        assert_eq!(round_to(2.000004, 5), 2.0);
    }
}
