use crate::error::FigLayoutSceneGraphError;
use figlayout_common::types::Bbox;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::ops::Range;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridSpecId(pub(crate) usize);

/// Placement of a grid inside the figure, as figure fractions. `wspace` and
/// `hspace` are fractions of the average cell width and height.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubplotParams {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
    pub wspace: f64,
    pub hspace: f64,
}

impl Default for SubplotParams {
    fn default() -> Self {
        Self {
            left: 0.125,
            right: 0.9,
            bottom: 0.11,
            top: 0.88,
            wspace: 0.2,
            hspace: 0.2,
        }
    }
}

/// A regular grid of `nrows` by `ncols` cells
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GridSpec {
    pub id: GridSpecId,
    pub nrows: usize,
    pub ncols: usize,
    pub params: SubplotParams,
}

impl GridSpec {
    pub(crate) fn try_new(
        id: GridSpecId,
        nrows: usize,
        ncols: usize,
        params: SubplotParams,
    ) -> Result<Self, FigLayoutSceneGraphError> {
        if nrows == 0 || ncols == 0 {
            return Err(FigLayoutSceneGraphError::InvalidGridShape { nrows, ncols });
        }
        Ok(Self {
            id,
            nrows,
            ncols,
            params,
        })
    }

    /// Subplot spec covering the given row and column ranges
    pub fn span(
        &self,
        rows: Range<usize>,
        cols: Range<usize>,
    ) -> Result<SubplotSpec, FigLayoutSceneGraphError> {
        if rows.is_empty() || cols.is_empty() || rows.end > self.nrows || cols.end > self.ncols {
            return Err(FigLayoutSceneGraphError::CellOutOfRange {
                rows,
                cols,
                nrows: self.nrows,
                ncols: self.ncols,
            });
        }
        Ok(SubplotSpec {
            gridspec: self.id,
            ncols: self.ncols,
            num1: rows.start * self.ncols + cols.start,
            num2: (rows.end - 1) * self.ncols + cols.end - 1,
        })
    }

    pub fn cell(&self, row: usize, col: usize) -> Result<SubplotSpec, FigLayoutSceneGraphError> {
        self.span(row..row + 1, col..col + 1)
    }

    /// Bottom and top of every row (top row first), and left and right of
    /// every column, as figure fractions
    pub fn grid_positions(&self) -> (Vec<[f64; 2]>, Vec<[f64; 2]>) {
        let p = &self.params;
        let nrows = self.nrows as f64;
        let ncols = self.ncols as f64;

        let cell_h = (p.top - p.bottom) / (nrows + p.hspace * (nrows - 1.0));
        let sep_h = p.hspace * cell_h;
        let rows = (0..self.nrows)
            .map(|i| {
                let top = p.top - i as f64 * (cell_h + sep_h);
                [top - cell_h, top]
            })
            .collect();

        let cell_w = (p.right - p.left) / (ncols + p.wspace * (ncols - 1.0));
        let sep_w = p.wspace * cell_w;
        let cols = (0..self.ncols)
            .map(|i| {
                let left = p.left + i as f64 * (cell_w + sep_w);
                [left, left + cell_w]
            })
            .collect();

        (rows, cols)
    }

    /// Position of a subplot spec of this grid, as figure fractions
    pub fn position(&self, spec: &SubplotSpec) -> Bbox {
        let (rows, cols) = self.grid_positions();
        let r = spec.rowspan();
        let c = spec.colspan();
        Bbox::from_extents(
            cols[c.start][0],
            rows[r.end - 1][0],
            cols[c.end - 1][1],
            rows[r.start][1],
        )
    }
}

/// Location of a panel within a [`GridSpec`]. `num1` and `num2` are the
/// row-major indices of the first and last covered cell.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubplotSpec {
    pub gridspec: GridSpecId,
    pub ncols: usize,
    pub num1: usize,
    pub num2: usize,
}

impl SubplotSpec {
    pub fn rowspan(&self) -> Range<usize> {
        let r1 = self.num1 / self.ncols;
        let r2 = self.num2 / self.ncols;
        r1.min(r2)..r1.max(r2) + 1
    }

    pub fn colspan(&self) -> Range<usize> {
        let c1 = self.num1 % self.ncols;
        let c2 = self.num2 % self.ncols;
        c1.min(c2)..c1.max(c2) + 1
    }

    pub fn is_single_cell(&self) -> bool {
        self.num1 == self.num2
    }

    pub fn row(&self) -> usize {
        self.rowspan().start
    }

    pub fn col(&self) -> usize {
        self.colspan().start
    }
}
