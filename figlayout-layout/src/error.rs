use figlayout_common::error::FigLayoutCommonError;
use figlayout_scenegraph::error::FigLayoutSceneGraphError;
use figlayout_scenegraph::panel::PanelId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FigLayoutError {
    #[error("Figure layout engine must be `FixedPanelLayoutEngine`, but is `{0}`")]
    WrongLayoutEngine(String),

    #[error("Panel {0:?} is not placed on a grid")]
    NotOnGrid(PanelId),

    #[error("Multiple grid specifications are not supported")]
    MultipleGridSpecs,

    #[error("Panel {0:?} spans more than one grid cell")]
    SpansMultipleCells(PanelId),

    #[error("Figure has no data panels")]
    NoPanels,

    #[error("Grid cell ({row}, {col}) holds more than one panel")]
    CellOccupied { row: usize, col: usize },

    #[error("Grid cell ({row}, {col}) holds no panel")]
    EmptyCell { row: usize, col: usize },

    #[error("{kind} index {index} is out of range, expected at most {max}")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        max: usize,
    },

    #[error("Size {width}x{height} inches does not match aspect ratio {aspect}")]
    SizeAspectMismatch { width: f64, height: f64, aspect: f64 },

    #[error("Panel {0:?} is not a colorbar parent candidate: {1}")]
    InvalidColorbarParent(PanelId, String),

    #[error("Necessary figure width ({necessary} inches) exceeds max_figwidth ({max} inches)")]
    FigureTooWide { necessary: f64, max: f64 },

    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] FigLayoutCommonError),

    #[error("SceneGraph error: {0}")]
    SceneGraphError(#[from] FigLayoutSceneGraphError),
}

impl From<FigLayoutError> for FigLayoutSceneGraphError {
    fn from(value: FigLayoutError) -> Self {
        match value {
            FigLayoutError::SceneGraphError(e) => e,
            e => FigLayoutSceneGraphError::LayoutEngine(Box::new(e)),
        }
    }
}
