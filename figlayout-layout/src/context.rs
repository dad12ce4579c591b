use crate::colorbar::{collect_colorbars, update_colorbars, ColorbarRecord};
use crate::error::FigLayoutError;
use crate::grid::{extract_panel_grid, PanelGrid};
use figlayout_scenegraph::figure::Figure;

/// Snapshot of the figure structure taken at the start of a layout
/// operation and passed through every step of it.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveContext {
    pub grid: PanelGrid,
    pub colorbars: Vec<ColorbarRecord>,
}

impl SolveContext {
    pub fn scan(figure: &Figure) -> Result<Self, FigLayoutError> {
        Ok(Self {
            grid: extract_panel_grid(figure)?,
            colorbars: collect_colorbars(figure)?,
        })
    }

    pub fn update_colorbars(&self, figure: &mut Figure) -> Result<(), FigLayoutError> {
        update_colorbars(figure, &self.colorbars)
    }
}
