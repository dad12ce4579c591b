//! Subplot labels such as `(a)`, `(b)`, ... placed relative to a panel corner.

use crate::error::FigLayoutThemeError;
use figlayout_common::types::parse_choice;
use figlayout_common::units::pts_to_inches;
use figlayout_layout::grid::extract_panel_grid;
use figlayout_scenegraph::decorations::TextAnnotation;
use figlayout_scenegraph::figure::Figure;
use figlayout_scenegraph::panel::PanelId;
use indexmap::IndexMap;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};
use tracing::trace;

/// Corner of the panel box that label offsets are measured from
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, VariantNames)]
pub enum AbcAnchor {
    #[default]
    #[strum(serialize = "top left")]
    #[cfg_attr(feature = "serde", serde(rename = "top left"))]
    TopLeft,
    #[strum(serialize = "top right")]
    #[cfg_attr(feature = "serde", serde(rename = "top right"))]
    TopRight,
    #[strum(serialize = "bottom left")]
    #[cfg_attr(feature = "serde", serde(rename = "bottom left"))]
    BottomLeft,
    #[strum(serialize = "bottom right")]
    #[cfg_attr(feature = "serde", serde(rename = "bottom right"))]
    BottomRight,
}

impl AbcAnchor {
    pub fn parse(value: &str) -> Result<Self, FigLayoutThemeError> {
        Ok(parse_choice("anchor", value)?)
    }

    fn is_top(&self) -> bool {
        matches!(self, AbcAnchor::TopLeft | AbcAnchor::TopRight)
    }

    fn is_left(&self) -> bool {
        matches!(self, AbcAnchor::TopLeft | AbcAnchor::BottomLeft)
    }
}

/// One value for all grid cells, one per grid line, or one per cell
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Debug, Clone, PartialEq)]
pub enum CellValues {
    Scalar(f64),
    PerLine(Vec<f64>),
    /// Indexed `[row][col]`
    PerCell(Vec<Vec<f64>>),
}

impl From<f64> for CellValues {
    fn from(value: f64) -> Self {
        CellValues::Scalar(value)
    }
}

impl From<Vec<f64>> for CellValues {
    fn from(value: Vec<f64>) -> Self {
        CellValues::PerLine(value)
    }
}

impl From<Vec<Vec<f64>>> for CellValues {
    fn from(value: Vec<Vec<f64>>) -> Self {
        CellValues::PerCell(value)
    }
}

/// Which grid line a [`CellValues::PerLine`] entry applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineAxis {
    Row,
    Column,
}

impl CellValues {
    /// Expand to a full `nrows` by `ncols` table
    fn expand(
        &self,
        name: &'static str,
        nrows: usize,
        ncols: usize,
        per_line: LineAxis,
    ) -> Result<Vec<Vec<f64>>, FigLayoutThemeError> {
        let line_len = match per_line {
            LineAxis::Row => nrows,
            LineAxis::Column => ncols,
        };
        let invalid = || FigLayoutThemeError::InvalidOffsets {
            name,
            expected: format!("({line_len},) or ({nrows}, {ncols})"),
        };

        match self {
            CellValues::Scalar(v) => Ok(vec![vec![*v; ncols]; nrows]),
            CellValues::PerLine(values) if values.len() == line_len => Ok((0..nrows)
                .map(|row| {
                    (0..ncols)
                        .map(|col| match per_line {
                            LineAxis::Row => values[row],
                            LineAxis::Column => values[col],
                        })
                        .collect()
                })
                .collect()),
            CellValues::PerCell(values)
                if values.len() == nrows && values.iter().all(|r| r.len() == ncols) =>
            {
                Ok(values.clone())
            }
            _ => Err(invalid()),
        }
    }
}

/// Options of [`add_abc`]
#[derive(Debug, Clone, PartialEq)]
pub struct AbcOptions {
    /// Offset from the anchor in points, positive moves right. Per line
    /// values apply to columns.
    pub x_offset_pts: CellValues,
    /// Offset from the anchor in points, positive moves up. Per line values
    /// apply to rows.
    pub y_offset_pts: CellValues,
    pub anchor: AbcAnchor,
    /// Label texts; `None` uses the label of each panel
    pub labels: Option<Vec<String>>,
    pub pre: String,
    pub post: String,
    /// Number of leading `labels` to skip
    pub start_at: usize,
    /// Number along rows first, `a b / c d` instead of `a c / b d`
    pub rows_first: bool,
    pub font_size: f64,
}

impl Default for AbcOptions {
    fn default() -> Self {
        Self {
            x_offset_pts: CellValues::Scalar(2.0),
            y_offset_pts: CellValues::Scalar(-12.0),
            anchor: AbcAnchor::TopLeft,
            labels: Some(('a'..='z').map(String::from).collect()),
            pre: "(".to_string(),
            post: ")".to_string(),
            start_at: 0,
            rows_first: true,
            font_size: 10.0,
        }
    }
}

impl AbcOptions {
    /// Labels given as one string separated by `sep`, e.g. `"i;ii;iii"`
    pub fn with_labels_str(mut self, labels: &str, sep: &str) -> Self {
        self.labels = Some(labels.split(sep).map(str::to_string).collect());
        self
    }

    pub fn with_panel_labels(mut self) -> Self {
        self.labels = None;
        self
    }

    pub fn with_anchor(mut self, anchor: AbcAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_offsets_pts(
        mut self,
        x: impl Into<CellValues>,
        y: impl Into<CellValues>,
    ) -> Self {
        self.x_offset_pts = x.into();
        self.y_offset_pts = y.into();
        self
    }

    pub fn with_affixes(mut self, pre: impl Into<String>, post: impl Into<String>) -> Self {
        self.pre = pre.into();
        self.post = post.into();
        self
    }

    pub fn with_start_at(mut self, start_at: usize) -> Self {
        self.start_at = start_at;
        self
    }

    pub fn with_rows_first(mut self, rows_first: bool) -> Self {
        self.rows_first = rows_first;
        self
    }
}

/// Add a label to every panel of the figure's grid.
///
/// Returns, per panel, the index of the new annotation in `panel.texts`.
pub fn add_abc(
    figure: &mut Figure,
    options: &AbcOptions,
) -> Result<IndexMap<PanelId, usize>, FigLayoutThemeError> {
    let grid = extract_panel_grid(figure)?;
    let (nrows, ncols) = (grid.nrows(), grid.ncols());
    let x_offsets = options
        .x_offset_pts
        .expand("x_offset_pts", nrows, ncols, LineAxis::Column)?;
    let y_offsets = options
        .y_offset_pts
        .expand("y_offset_pts", nrows, ncols, LineAxis::Row)?;

    let mut placed = Vec::with_capacity(nrows * ncols);
    for (row, col, id) in grid.iter_cells() {
        let bbox = figure.panel_position_inches(id)?;
        let dx = pts_to_inches(x_offsets[row][col]) / bbox.width();
        let dy = pts_to_inches(y_offsets[row][col]) / bbox.height();
        let x = if options.anchor.is_left() { dx } else { 1.0 + dx };
        let y = if options.anchor.is_top() { 1.0 + dy } else { dy };

        let label = match &options.labels {
            None => figure.panel(id)?.label.clone().unwrap_or_default(),
            Some(labels) => {
                let index = options.start_at
                    + if options.rows_first {
                        ncols * row + col
                    } else {
                        nrows * col + row
                    };
                labels
                    .get(index)
                    .cloned()
                    .ok_or(FigLayoutThemeError::MissingLabel {
                        index,
                        available: labels.len(),
                    })?
            }
        };
        placed.push((id, format!("{}{}{}", options.pre, label, options.post), [x, y]));
    }

    // labels are only added once every cell has one
    let mut added = IndexMap::new();
    for (id, text, position) in placed {
        trace!("labelling panel {:?} at {:?} with {text}", id, position);
        let panel = figure.panel_mut(id)?;
        panel.add_text(TextAnnotation::new(text, position, options.font_size));
        added.insert(id, panel.texts.len() - 1);
    }
    Ok(added)
}
