use crate::error::FigLayoutError;
use figlayout_scenegraph::figure::Figure;
use figlayout_scenegraph::panel::PanelId;

/// Data panels arranged by grid cell, row 0 at the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelGrid {
    nrows: usize,
    ncols: usize,
    /// Row-major cells
    cells: Vec<PanelId>,
}

impl PanelGrid {
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<PanelId> {
        if row < self.nrows && col < self.ncols {
            Some(self.cells[row * self.ncols + col])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> impl Iterator<Item = PanelId> + '_ {
        self.cells[row * self.ncols..(row + 1) * self.ncols]
            .iter()
            .copied()
    }

    pub fn column(&self, col: usize) -> impl Iterator<Item = PanelId> + '_ {
        self.cells.iter().skip(col).step_by(self.ncols).copied()
    }

    /// Every cell as `(row, col, panel)`, row by row
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, PanelId)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, id)| (i / self.ncols, i % self.ncols, *id))
    }

    /// Row and column of `panel`, if it is on the grid
    pub fn locate(&self, panel: PanelId) -> Option<(usize, usize)> {
        self.cells
            .iter()
            .position(|id| *id == panel)
            .map(|i| (i / self.ncols, i % self.ncols))
    }
}

/// Sort the data panels of `figure` into their grid cells.
///
/// Every data panel must occupy exactly one cell of the one grid
/// specification shared by all panels, and every cell must be filled.
pub fn extract_panel_grid(figure: &Figure) -> Result<PanelGrid, FigLayoutError> {
    let mut gridspec = None;
    let mut placed = Vec::new();

    for panel in figure.panels().filter(|p| !p.is_colorbar()) {
        let spec = panel
            .subplot_spec()
            .ok_or(FigLayoutError::NotOnGrid(panel.id))?;
        match gridspec {
            None => gridspec = Some(spec.gridspec),
            Some(id) if id != spec.gridspec => return Err(FigLayoutError::MultipleGridSpecs),
            Some(_) => {}
        }
        if !spec.is_single_cell() {
            return Err(FigLayoutError::SpansMultipleCells(panel.id));
        }
        placed.push((spec.row(), spec.col(), panel.id));
    }

    let gridspec = figure.gridspec(gridspec.ok_or(FigLayoutError::NoPanels)?)?;
    let (nrows, ncols) = (gridspec.nrows, gridspec.ncols);

    let mut cells: Vec<Option<PanelId>> = vec![None; nrows * ncols];
    for (row, col, id) in placed {
        let cell = &mut cells[row * ncols + col];
        if cell.is_some() {
            return Err(FigLayoutError::CellOccupied { row, col });
        }
        *cell = Some(id);
    }

    let cells = cells
        .into_iter()
        .enumerate()
        .map(|(i, cell)| {
            cell.ok_or(FigLayoutError::EmptyCell {
                row: i / ncols,
                col: i % ncols,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PanelGrid {
        nrows,
        ncols,
        cells,
    })
}
