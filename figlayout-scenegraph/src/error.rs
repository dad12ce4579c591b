use crate::gridspec::GridSpecId;
use crate::panel::PanelId;
use figlayout_common::error::FigLayoutCommonError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FigLayoutSceneGraphError {
    #[error("Panel {0:?} does not belong to this figure")]
    PanelNotFound(PanelId),

    #[error("Grid specification {0:?} does not belong to this figure")]
    GridSpecNotFound(GridSpecId),

    #[error("A grid needs at least one row and one column, got {nrows}x{ncols}")]
    InvalidGridShape { nrows: usize, ncols: usize },

    #[error("Cell range rows {rows:?}, columns {cols:?} is outside of a {nrows}x{ncols} grid")]
    CellOutOfRange {
        rows: std::ops::Range<usize>,
        cols: std::ops::Range<usize>,
        nrows: usize,
        ncols: usize,
    },

    #[error("Figure size must be positive, got {width}x{height} inches")]
    InvalidFigureSize { width: f64, height: f64 },

    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] FigLayoutCommonError),

    #[error("Layout engine failed: {0}")]
    LayoutEngine(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Renderer failed: {0}")]
    Renderer(String),
}
