use figlayout_common::error::FigLayoutCommonError;
use figlayout_layout::error::FigLayoutError;
use figlayout_scenegraph::error::FigLayoutSceneGraphError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FigLayoutThemeError {
    #[error("Invalid color `{0}`, expected a hex code such as #1f77b4")]
    InvalidColor(String),

    #[error("No colormap named `{0}` is registered")]
    UnknownColormap(String),

    #[error("A colormap named `{0}` is already registered")]
    ColormapExists(String),

    #[error("Invalid colormap: {0}")]
    InvalidColormap(String),

    #[error("{name}={value}, but it must be within [0.0, 1.0]")]
    OutOfUnitRange { name: &'static str, value: f64 },

    #[error("For the Okabe and Ito palette, a maximum of {max} distinct colors can be used, but nsteps={requested}")]
    TooManyColors { requested: usize, max: usize },

    #[error("Invalid spines identifier `{0}`, spines must only contain b, l, r or t a maximum of one time")]
    InvalidSpines(String),

    #[error("Both '{argument}' and '{alias}' have been provided, but they are aliases")]
    AliasConflict {
        argument: &'static str,
        alias: &'static str,
    },

    #[error("Invalid dash pattern: {0}")]
    InvalidDashPattern(String),

    #[error("{name} must be a scalar or have shape {expected}")]
    InvalidOffsets { name: &'static str, expected: String },

    #[error("Label index {index} is out of range for {available} labels")]
    MissingLabel { index: usize, available: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] FigLayoutCommonError),

    #[error("Layout error: {0}")]
    LayoutError(#[from] FigLayoutError),

    #[error("SceneGraph error: {0}")]
    SceneGraphError(#[from] FigLayoutSceneGraphError),
}
